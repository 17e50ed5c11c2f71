// Utility functions and helpers
//
// This module provides the phonetic key order, directory scanning and
// progress reporting.

pub mod utils;
pub mod io_utils;
pub mod progress_report;

pub use utils::{phonetic_key_compare, pyim_line_key, split_pyim_line};
pub use io_utils::{is_directory, scan_dir, SCEL_FILE_PATTERN};
pub use progress_report::{ProgressReportFn, ProgressState};
