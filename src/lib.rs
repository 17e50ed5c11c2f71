//! # scel2pyim - Sogou cell dictionary to pyim converter
//!
//! This crate decodes Sogou input method cell dictionaries (`.scel`) and turns
//! them into a single pyim dictionary: a UTF-8 text file of `key word` lines,
//! sorted by phonetic key and free of duplicates.
//!
//! ## Quick Start
//!
//! ### Decoding one scel file
//!
//! ```no_run
//! use scel2pyim::readers::ScelReader;
//!
//! # fn main() -> scel2pyim::Result<()> {
//! let data = std::fs::read("/path/to/dict.scel")?;
//! for entry in ScelReader::new(&data)?.entries() {
//!     let entry = entry?;
//!     println!("{} => {:?}", entry.phonetic_key, entry.words);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Converting a directory
//!
//! ```no_run
//! use scel2pyim::builder::{BuilderConfig, PyimBuilder};
//!
//! # fn main() -> scel2pyim::Result<()> {
//! let config = BuilderConfig {
//!     input_path: "/path/to/cells".to_string(),
//!     output_file: "/path/to/sogou.pyim".to_string(),
//!     ..Default::default()
//! };
//! PyimBuilder::build_with_config(&config, None)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **Reader modules**: [`readers`] for validating and decoding scel files
//! - **Builder modules**: [`builder`] for merging decoded text and running conversions
//! - **Storage & core types**: [`storage`] for the byte cursor, phonetic table and entries
//! - **Utilities**: [`utils`] for key ordering, directory scanning and progress reporting
//!
//! ## Error Handling
//!
//! All fallible operations return a [`Result<T>`] type, where errors are represented by
//! [`ScelError`]. The crate uses the `snafu` library for error handling with
//! context and backtraces.

pub mod builder;
pub mod error;
pub mod readers;
pub mod storage;
pub mod utils;

// Re-export commonly used types for convenience
pub use builder::{BuilderConfig, PyimBuilder, PyimMerger};
pub use readers::ScelReader;
pub use storage::{ScelEntry, WordOrder};

// Re-export error types for convenience
pub use error::{Result, ScelError, snafu};
