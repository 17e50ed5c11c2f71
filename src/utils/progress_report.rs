//! Progress reporting for conversion runs.
//!
//! The builder calls the reporter once for every input file, before it is
//! decoded. A reporter returning `true` cancels the run.
//!
//! # Examples
//!
//! ```
//! use scel2pyim::utils::progress_report::ProgressState;
//!
//! fn print_progress(state: &mut ProgressState) -> bool {
//!     println!("[{}/{}] {}", state.current + 1, state.total, state.item);
//!     false
//! }
//!
//! let mut progress = ProgressState::new("converting", 2, Some(print_progress));
//! assert!(!progress.report(0, "a.scel"));
//! assert!(!progress.report(1, "b.scel"));
//! ```

/// Callback type; return `true` to cancel.
pub type ProgressReportFn = fn(&mut ProgressState) -> bool;

pub struct ProgressState {
    /// Name of the running stage, e.g. "converting"
    pub stage: String,
    /// Number of items in the stage
    pub total: u64,
    /// Zero-based index of the item being reported
    pub current: u64,
    /// Display name of the item being reported
    pub item: String,
    pub reporter: Option<ProgressReportFn>,
}

impl ProgressState {
    pub fn new(stage: &str, total: u64, reporter: Option<ProgressReportFn>) -> Self {
        Self {
            stage: stage.to_string(),
            total,
            current: 0,
            item: String::new(),
            reporter,
        }
    }

    /// Reports item `current`. Returns `true` if the run should stop.
    pub fn report(&mut self, current: u64, item: &str) -> bool {
        let Some(reporter) = self.reporter else {
            return false;
        };
        self.current = current;
        self.item.clear();
        self.item.push_str(item);
        reporter(self)
    }
}
