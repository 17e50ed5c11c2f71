//! End-to-end conversion of a directory of scel files into one pyim file.
//!
//! The build runs in two passes:
//!
//! 1. Every matching file is decoded and its lines are appended to an
//!    in-memory buffer that starts with the pyim banner. Files that fail
//!    validation are skipped; files with a corrupt record keep the lines
//!    decoded before it.
//! 2. The buffer is merged by [`PyimMerger`] and written to a freshly
//!    created output file.
//!
//! # Examples
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
//! let report = PyimBuilder::build_with_config(&config, None)?;
//! println!("{} lines written", report.merge.lines_written);
//! # Ok(())
//! # }
//! ```
//!
//! ## JSON Configuration
//!
//! ```no_run
//! use scel2pyim::builder::{BuilderConfig, PyimBuilder};
//!
//! # fn main() -> scel2pyim::Result<()> {
//! let config = BuilderConfig::from_json_file("scel2pyim.json")?;
//! PyimBuilder::build_with_config(&config, None)?;
//! # Ok(())
//! # }
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::builder::pyim_merger::{MergeReport, PyimMerger, MAX_ITEM_LINE_LENGTH, PYIM_BANNER};
use crate::readers::ScelReader;
use crate::storage::WordOrder;
use crate::utils::io_utils::{is_directory, scan_dir, SCEL_FILE_PATTERN};
use crate::utils::progress_report::{ProgressReportFn, ProgressState};
use crate::{Result, ScelError};

/// Configuration for a conversion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Directory searched for scel files
    pub input_path: String,
    /// Path of the pyim file to create
    pub output_file: String,
    /// Descend into subdirectories
    pub recursive: bool,
    /// Follow symbolic links while scanning
    pub follow_links: bool,
    /// Regex matched against file names
    pub file_pattern: String,
    /// Line length bound of the merge stage
    pub max_line_length: usize,
    /// Join order of multi-word records
    pub word_order: WordOrder,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            input_path: String::new(),
            output_file: String::new(),
            recursive: true,
            follow_links: true,
            file_pattern: SCEL_FILE_PATTERN.to_string(),
            max_line_length: MAX_ITEM_LINE_LENGTH,
            word_order: WordOrder::default(),
        }
    }
}

impl BuilderConfig {
    /// Loads a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !is_directory(&self.input_path) {
            return Err(ScelError::invalid_path(format!("{} is not a directory!", self.input_path)));
        }
        if self.output_file.is_empty() {
            return Err(ScelError::invalid_parameter("Output file cannot be empty"));
        }
        if self.max_line_length == 0 {
            return Err(ScelError::invalid_parameter("max_line_length must be positive"));
        }
        Ok(())
    }
}

/// What happened to a single input file.
#[derive(Debug)]
pub enum FileOutcome {
    Converted { lines: u64 },
    /// Decoding stopped at a corrupt record; `lines` were kept.
    Truncated { lines: u64, error: ScelError },
    /// Nothing was taken from the file.
    Skipped { error: ScelError },
}

#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub files_found: u64,
    pub files_converted: u64,
    pub files_truncated: u64,
    pub files_skipped: u64,
    /// Lines produced by the decoder before merging
    pub decoded_lines: u64,
    pub merge: MergeReport,
    pub output_file: PathBuf,
}

pub struct PyimBuilder {
    config: BuilderConfig,
}

impl PyimBuilder {
    pub fn from_config(config: BuilderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Decodes one in-memory scel file into `out`.
    ///
    /// Recoverable decode errors are reported through [`FileOutcome`]; only
    /// write failures are returned as `Err`.
    pub fn convert_bytes<W: Write>(&self, data: &[u8], out: &mut W) -> Result<FileOutcome> {
        let mut reader = match ScelReader::new(data) {
            Ok(reader) => reader,
            Err(error) if error.is_recoverable() => return Ok(FileOutcome::Skipped { error }),
            Err(error) => return Err(error),
        };
        match reader.write_pyim(out, self.config.word_order) {
            Ok(lines) => Ok(FileOutcome::Converted { lines }),
            Err(error) if error.is_recoverable() => Ok(FileOutcome::Truncated {
                lines: reader.lines_written(),
                error,
            }),
            Err(error) => Err(error),
        }
    }

    /// Reads and decodes one scel file. An unreadable file is skipped.
    pub fn convert_file<W: Write>(&self, path: &Path, out: &mut W) -> Result<FileOutcome> {
        match fs::read(path) {
            Ok(data) => self.convert_bytes(&data, out),
            Err(e) => Ok(FileOutcome::Skipped { error: e.into() }),
        }
    }

    /// Decodes `files` in order into a banner-prefixed text buffer.
    pub fn convert_files(
        &self,
        files: &[PathBuf],
        report: &mut BuildReport,
        prog_rpt: Option<ProgressReportFn>,
    ) -> Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(64 * 1024);
        writeln!(buffer, "{}", PYIM_BANNER)?;
        let mut progress = ProgressState::new("converting", files.len() as u64, prog_rpt);

        for (i, path) in files.iter().enumerate() {
            let display = path.display().to_string();
            if progress.report(i as u64, &display) {
                return Err(ScelError::user_interrupted());
            }
            match self.convert_file(path, &mut buffer)? {
                FileOutcome::Converted { lines } => {
                    info!("Converted \"{}\": {} lines", display, lines);
                    report.files_converted += 1;
                    report.decoded_lines += lines;
                }
                FileOutcome::Truncated { lines, error } => {
                    warn!("\"{}\" is not a valid scel file while writing to pyim: {}", display, error);
                    report.files_truncated += 1;
                    report.decoded_lines += lines;
                }
                FileOutcome::Skipped { error } => {
                    warn!("\"{}\" is not a valid scel file: {}", display, error);
                    report.files_skipped += 1;
                }
            }
        }
        Ok(buffer)
    }

    /// Runs the whole conversion described by the configuration.
    pub fn build(&self, prog_rpt: Option<ProgressReportFn>) -> Result<BuildReport> {
        self.config.validate()?;
        let pattern = Regex::new(&self.config.file_pattern)?;

        let files = scan_dir(
            &self.config.input_path,
            &pattern,
            self.config.recursive,
            self.config.follow_links,
        )?;
        info!("Found {} scel files under {}", files.len(), self.config.input_path);

        // Fail before decoding anything if the output cannot be created.
        let output = File::create(&self.config.output_file)?;
        let mut writer = BufWriter::new(output);

        let mut report = BuildReport {
            files_found: files.len() as u64,
            output_file: PathBuf::from(&self.config.output_file),
            ..Default::default()
        };
        let buffer = self.convert_files(&files, &mut report, prog_rpt)?;
        let text = String::from_utf8_lossy(&buffer);

        let merged = PyimMerger::new(self.config.max_line_length).merge(&text);
        merged.write_to(&mut writer)?;
        report.merge = merged.report;

        info!(
            "Wrote {} lines for {} keys to {}",
            report.merge.lines_written,
            report.merge.keys_written,
            self.config.output_file
        );
        Ok(report)
    }

    pub fn build_with_config(config: &BuilderConfig, prog_rpt: Option<ProgressReportFn>) -> Result<BuildReport> {
        Self::from_config(config.clone()).build(prog_rpt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readers::scel_reader::test_data::{push_record, scel_prefix};

    fn sample_scel(records: &[(&[u16], &[&str])]) -> Vec<u8> {
        let mut data = scel_prefix(&["ni", "hao", "a"]);
        for (codes, words) in records {
            push_record(&mut data, codes, words);
        }
        data
    }

    fn config_for(dir: &Path) -> BuilderConfig {
        BuilderConfig {
            input_path: dir.to_string_lossy().into_owned(),
            output_file: dir.join("out.pyim").to_string_lossy().into_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn test_convert_bytes_outcomes() {
        let builder = PyimBuilder::from_config(BuilderConfig::default());
        let mut out = Vec::new();

        let good = sample_scel(&[(&[0, 1], &["你好"])]);
        assert!(matches!(builder.convert_bytes(&good, &mut out).unwrap(), FileOutcome::Converted { lines: 1 }));

        let bad = sample_scel(&[(&[0, 1], &["你好"]), (&[500], &["坏"])]);
        match builder.convert_bytes(&bad, &mut out).unwrap() {
            FileOutcome::Truncated { lines, error } => {
                assert_eq!(lines, 1);
                assert!(matches!(error, ScelError::CorruptRecord { .. }));
            }
            other => panic!("expected Truncated, got {:?}", other),
        }

        assert!(matches!(
            builder.convert_bytes(b"not a scel file", &mut out).unwrap(),
            FileOutcome::Skipped { error: ScelError::InvalidFormat { .. } }
        ));
        assert_eq!(String::from_utf8(out).unwrap(), "ni-hao 你好\nni-hao 你好\n");
    }

    #[test]
    fn test_build_merges_directory() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("nested");
        fs::create_dir(&sub).unwrap();
        fs::write(dir.path().join("one.scel"), sample_scel(&[(&[1], &["好"]), (&[0, 1], &["你好"])])).unwrap();
        fs::write(sub.join("two.SCEL"), sample_scel(&[(&[0, 1], &["你好"]), (&[2], &["啊"])])).unwrap();
        fs::write(dir.path().join("broken.scel"), b"garbage").unwrap();
        fs::write(dir.path().join("readme.txt"), "ni 你").unwrap();

        let config = config_for(dir.path());
        let report = PyimBuilder::build_with_config(&config, None).unwrap();
        assert_eq!(report.files_found, 3);
        assert_eq!(report.files_converted, 2);
        assert_eq!(report.files_skipped, 1);
        assert_eq!(report.decoded_lines, 4);
        assert_eq!(report.merge.duplicate_targets, 1);

        let output = fs::read_to_string(&config.output_file).unwrap();
        assert_eq!(output, format!("{}\na 啊\nhao 好\nni-hao 你好\n", PYIM_BANNER));
    }

    #[cfg(unix)]
    #[test]
    fn test_build_survives_dangling_link() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("good.scel"), sample_scel(&[(&[0, 1], &["你好"])])).unwrap();
        std::os::unix::fs::symlink(dir.path().join("nowhere"), dir.path().join("dangling")).unwrap();

        let config = config_for(dir.path());
        let report = PyimBuilder::build_with_config(&config, None).unwrap();
        assert_eq!(report.files_converted, 1);
        let output = fs::read_to_string(&config.output_file).unwrap();
        assert_eq!(output, format!("{}\nni-hao 你好\n", PYIM_BANNER));
    }

    #[test]
    fn test_build_rejects_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_for(dir.path());
        config.input_path = dir.path().join("missing").to_string_lossy().into_owned();
        let result = PyimBuilder::build_with_config(&config, None);
        assert!(matches!(result, Err(ScelError::InvalidParameter { .. })));
        assert!(!Path::new(&config.output_file).exists());
    }

    #[test]
    fn test_build_rejects_uncreatable_output() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_for(dir.path());
        config.output_file = dir.path().join("no/such/dir/out.pyim").to_string_lossy().into_owned();
        assert!(matches!(PyimBuilder::build_with_config(&config, None), Err(ScelError::Io { .. })));
    }

    fn cancel_immediately(_: &mut ProgressState) -> bool {
        true
    }

    #[test]
    fn test_build_can_be_cancelled() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("one.scel"), sample_scel(&[(&[0], &["你"])])).unwrap();
        let config = config_for(dir.path());
        let result = PyimBuilder::build_with_config(&config, Some(cancel_immediately));
        assert!(matches!(result, Err(ScelError::UserInterrupted { .. })));
    }

    #[test]
    fn test_config_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"input_path": "cells", "output_file": "out.pyim", "word_order": "Declared"}"#).unwrap();
        let config = BuilderConfig::from_json_file(&path).unwrap();
        assert_eq!(config.input_path, "cells");
        assert_eq!(config.word_order, WordOrder::Declared);
        assert_eq!(config.max_line_length, MAX_ITEM_LINE_LENGTH);
        assert!(config.recursive);

        fs::write(&path, "{not json").unwrap();
        assert!(matches!(BuilderConfig::from_json_file(&path), Err(ScelError::ParserError { .. })));
    }
}
