//! Merging, sorting and deduplication of pyim text.
//!
//! The decoder output of every input file is concatenated into one text blob.
//! [`PyimMerger`] turns that blob into the final dictionary:
//!
//! 1. The first line is the banner and is kept verbatim.
//! 2. Lines that do not fit [`MAX_ITEM_LINE_LENGTH`] are dropped.
//! 3. Each line is split at its first space into key and target.
//! 4. Lines are stably sorted with [`phonetic_key_compare`].
//! 5. Targets are deduplicated per key in first-seen order; targets that still
//!    contain whitespace are rejected.
//!
//! # Examples
//!
//! ```
//! use scel2pyim::builder::PyimMerger;
//!
//! let text = ";; -*- coding: utf-8-unix; -*-\nni-hao 你好\na 啊\nni-hao 你好\n";
//! let merged = PyimMerger::default().merge(text);
//! assert_eq!(merged.to_text(), ";; -*- coding: utf-8-unix; -*-\na 啊\nni-hao 你好\n");
//! assert_eq!(merged.report.duplicate_targets, 1);
//! ```

use std::io::Write;

use indexmap::IndexSet;
use log::{debug, info, warn};

use crate::utils::{phonetic_key_compare, pyim_line_key, split_pyim_line};
use crate::{Result, ScelError};

/// First line of every pyim file.
pub const PYIM_BANNER: &str = ";; -*- coding: utf-8-unix; -*-";

/// Line length bound of the merge stage. A line is kept only if it, plus its
/// newline, stays below this many bytes.
pub const MAX_ITEM_LINE_LENGTH: usize = 128;

/// Counters collected while merging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Data lines seen, banner excluded
    pub lines_read: u64,
    pub dropped_too_long: u64,
    pub dropped_without_target: u64,
    /// Targets dropped because they contain whitespace
    pub rejected_targets: u64,
    pub duplicate_targets: u64,
    pub keys_written: u64,
    pub lines_written: u64,
}

/// All distinct targets of one phonetic key, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupGroup<'a> {
    pub key: &'a str,
    pub targets: IndexSet<&'a str>,
}

/// Result of a merge, borrowing from the input text.
#[derive(Debug, Clone)]
pub struct MergedPyim<'a> {
    pub banner: &'a str,
    pub groups: Vec<DedupGroup<'a>>,
    pub report: MergeReport,
}

impl MergedPyim<'_> {
    /// Writes the banner and one `key target` line per pair. Returns the number of data lines.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<u64> {
        writeln!(out, "{}", self.banner)?;
        let mut lines = 0u64;
        for group in &self.groups {
            for target in &group.targets {
                writeln!(out, "{} {}", group.key, target)?;
                lines += 1;
            }
        }
        out.flush()?;
        Ok(lines)
    }

    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(self.banner.len() + 1 + self.report.lines_written as usize * 16);
        text.push_str(self.banner);
        text.push('\n');
        for group in &self.groups {
            for target in &group.targets {
                text.push_str(group.key);
                text.push(' ');
                text.push_str(target);
                text.push('\n');
            }
        }
        text
    }
}

#[derive(Debug, Clone)]
pub struct PyimMerger {
    max_line_length: usize,
}

impl Default for PyimMerger {
    fn default() -> Self {
        Self { max_line_length: MAX_ITEM_LINE_LENGTH }
    }
}

impl PyimMerger {
    pub fn new(max_line_length: usize) -> Self {
        Self { max_line_length }
    }

    pub fn max_line_length(&self) -> usize {
        self.max_line_length
    }

    /// Fails with `LineTooLong` when `line` plus its newline does not fit.
    pub fn check_line_length(&self, line: &str) -> Result<()> {
        if line.len() + 1 >= self.max_line_length {
            return Err(ScelError::line_too_long(line.len(), self.max_line_length));
        }
        Ok(())
    }

    /// Sorts and deduplicates `text`.
    ///
    /// A first line starting with `;;` is taken as the banner; otherwise
    /// [`PYIM_BANNER`] is used and the first line is treated as data.
    pub fn merge<'a>(&self, text: &'a str) -> MergedPyim<'a> {
        let mut lines = text.lines().peekable();
        let banner = match lines.peek() {
            Some(first) if first.starts_with(";;") => {
                let banner = *first;
                lines.next();
                banner
            }
            _ => PYIM_BANNER,
        };

        let mut report = MergeReport::default();
        let mut pairs: Vec<(&'a str, &'a str)> = Vec::new();
        for line in lines {
            report.lines_read += 1;
            if let Err(e) = self.check_line_length(line) {
                warn!("Ignored line for key \"{}\": {}", pyim_line_key(line), e);
                report.dropped_too_long += 1;
                continue;
            }
            match split_pyim_line(line) {
                Some(pair) => pairs.push(pair),
                None => {
                    debug!("Ignored line without target: {}", line);
                    report.dropped_without_target += 1;
                }
            }
        }

        // Stable, so equal keys keep their input order.
        pairs.sort_by(|a, b| phonetic_key_compare(a.0, b.0));

        let mut groups: Vec<DedupGroup<'a>> = Vec::new();
        for chunk in pairs.chunk_by(|a, b| a.0 == b.0) {
            let key = chunk[0].0;
            let mut targets = IndexSet::with_capacity(chunk.len());
            for &(_, target) in chunk {
                if target.contains(char::is_whitespace) {
                    debug!("Rejected target with whitespace for key {}: {}", key, target);
                    report.rejected_targets += 1;
                } else if !targets.insert(target) {
                    report.duplicate_targets += 1;
                }
            }
            if targets.is_empty() {
                continue;
            }
            report.keys_written += 1;
            report.lines_written += targets.len() as u64;
            groups.push(DedupGroup { key, targets });
        }

        info!(
            "Merged {} lines into {} keys / {} lines ({} too long, {} duplicates, {} rejected)",
            report.lines_read,
            report.keys_written,
            report.lines_written,
            report.dropped_too_long,
            report.duplicate_targets,
            report.rejected_targets
        );
        MergedPyim { banner, groups, report }
    }

    /// Merges `text` and writes the result to `out`.
    pub fn merge_to_writer<W: Write>(&self, text: &str, out: &mut W) -> Result<MergeReport> {
        let merged = self.merge(text);
        merged.write_to(out)?;
        Ok(merged.report)
    }
}
