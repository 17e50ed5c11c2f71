//! I/O utility functions for locating and loading input files.
//!
//! # Examples
//!
//! ```no_run
//! use regex::Regex;
//! use scel2pyim::utils::io_utils::scan_dir;
//!
//! let pattern = Regex::new(r"(?i)^.+\.scel$").unwrap();
//! let files = scan_dir("/path/to/cells", &pattern, true, true).unwrap();
//! for file in files {
//!     println!("{}", file.display());
//! }
//! ```

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{Result, ScelError};

/// Default file name pattern for scel inputs: case-insensitive suffix, non-empty stem.
pub const SCEL_FILE_PATTERN: &str = r"(?i)^.+\.scel$";

pub fn is_directory<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_dir()
}

/// Scan a directory for files whose name matches the given regex pattern
///
/// # Arguments
/// * `target_dir` - The directory to scan
/// * `pattern` - A regex pattern to match file names against
/// * `recursive` - Whether to scan subdirectories recursively
/// * `follow_links` - Whether symbolic links are followed
///
/// # Returns
/// The matching paths, sorted by file name within each directory.
pub fn scan_dir<P: AsRef<Path>>(
    target_dir: P,
    pattern: &regex::Regex,
    recursive: bool,
    follow_links: bool,
) -> Result<Vec<PathBuf>> {
    let target_dir = target_dir.as_ref();
    if !is_directory(target_dir) {
        return Err(ScelError::invalid_path(format!("{} is not a directory", target_dir.display())));
    }
    let mut walker = WalkDir::new(target_dir)
        .follow_links(follow_links)
        .sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // Only the root is fatal; unreadable subdirectories and broken links are skipped.
            Err(e) if e.depth() > 0 => {
                log::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
            Err(e) => {
                return Err(ScelError::from(std::io::Error::other(format!(
                    "Walk directory error: {}",
                    e
                ))));
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(file_name) = entry.file_name().to_str() else {
            log::warn!("Skipping file with non UTF-8 name: {}", entry.path().display());
            continue;
        };
        if pattern.is_match(file_name) {
            files.push(entry.path().to_path_buf());
        }
    }
    Ok(files)
}
