//! Builder module for producing pyim dictionaries
//!
//! This module contains the merge/sort/dedup engine and the orchestrator that
//! drives directory scanning, per-file decoding and the final merge.

pub mod pyim_merger;
pub mod pyim_builder;

// Re-export commonly used types for convenience
pub use pyim_merger::{DedupGroup, MergeReport, MergedPyim, PyimMerger, MAX_ITEM_LINE_LENGTH, PYIM_BANNER};
pub use pyim_builder::{BuildReport, BuilderConfig, FileOutcome, PyimBuilder};
