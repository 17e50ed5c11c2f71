//! Error types and result type for the scel2pyim crate.
//!
//! All conversion stages report failures through [`ScelError`]. The variants map
//! onto what the orchestrator does with them:
//!
//! - [`ScelError::InvalidFormat`]: the file is not a scel dictionary, it is skipped
//! - [`ScelError::CorruptRecord`]: decoding stops, lines already written are kept
//! - [`ScelError::LineTooLong`]: a single merged line is dropped
//! - [`ScelError::Io`]: fatal when it concerns the input directory or output file
//!
//! # Examples
//!
//! ```
//! use scel2pyim::{Result, ScelError};
//!
//! fn check_magic(data: &[u8]) -> Result<()> {
//!     if data.len() < 12 {
//!         return Err(ScelError::invalid_format("file is shorter than the scel header"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_magic(b"short").is_err());
//! ```

use std::io;

use snafu::{Backtrace, Snafu};

// Re-export snafu for context providers
pub use snafu;

/// Main error type for the scel2pyim crate.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ScelError {
    /// I/O error occurred during file operations.
    #[snafu(display("IO error: {source}"))]
    Io {
        source: io::Error,
        backtrace: Backtrace,
    },

    /// The header magic or the sub-magic at 0x1540 did not match.
    #[snafu(display("Invalid scel format: {message}"))]
    InvalidFormat {
        message: String,
        backtrace: Backtrace,
    },

    /// A record could not be decoded; nothing after `offset` is trustworthy.
    #[snafu(display("Corrupt record at {offset:#x}: {message}"))]
    CorruptRecord {
        offset: u64,
        message: String,
        backtrace: Backtrace,
    },

    /// A pyim line is longer than the merge stage accepts.
    #[snafu(display("Line too long: {length} bytes (max {max})"))]
    LineTooLong {
        length: usize,
        max: usize,
        backtrace: Backtrace,
    },

    /// Error parsing the JSON configuration.
    #[snafu(display("Parser error: {source}"))]
    ParserError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
        backtrace: Backtrace,
    },

    /// Function was called with invalid parameters.
    #[snafu(display("Invalid parameter: {message}"))]
    InvalidParameter {
        message: String,
        backtrace: Backtrace,
    },

    /// Operation was interrupted by the progress callback.
    #[snafu(display("User interrupted"))]
    UserInterrupted {
        backtrace: Backtrace,
    },
}

impl From<io::Error> for ScelError {
    fn from(source: io::Error) -> Self {
        Self::Io { source, backtrace: Backtrace::capture() }
    }
}

impl From<serde_json::Error> for ScelError {
    fn from(source: serde_json::Error) -> Self {
        Self::ParserError {
            source: Box::new(source),
            backtrace: Backtrace::capture(),
        }
    }
}

impl From<regex::Error> for ScelError {
    fn from(source: regex::Error) -> Self {
        Self::ParserError {
            source: Box::new(source),
            backtrace: Backtrace::capture(),
        }
    }
}

/// Helper methods for creating errors without context providers.
impl ScelError {
    /// Creates an `InvalidFormat` error with the given message.
    pub fn invalid_format<S: Into<String>>(message: S) -> Self {
        Self::InvalidFormat {
            message: message.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates a `CorruptRecord` error located at `offset` in the input.
    pub fn corrupt_record<S: Into<String>>(offset: u64, message: S) -> Self {
        Self::CorruptRecord {
            offset,
            message: message.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates a `LineTooLong` error.
    pub fn line_too_long(length: usize, max: usize) -> Self {
        Self::LineTooLong {
            length,
            max,
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates an `InvalidParameter` error with the given message.
    ///
    /// # Examples
    ///
    /// ```
    /// use scel2pyim::ScelError;
    ///
    /// let error = ScelError::invalid_parameter("Output path cannot be empty");
    /// assert!(!error.is_recoverable());
    /// ```
    pub fn invalid_parameter<S: Into<String>>(message: S) -> Self {
        Self::InvalidParameter {
            message: message.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates an `InvalidParameter` error for an invalid path.
    pub fn invalid_path<S: Into<String>>(path: S) -> Self {
        Self::InvalidParameter {
            message: format!("Invalid path: {}", path.into()),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates a `UserInterrupted` error.
    pub fn user_interrupted() -> Self {
        Self::UserInterrupted {
            backtrace: Backtrace::capture(),
        }
    }

    /// Whether a run can carry on with the next input after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ScelError::InvalidFormat { .. }
                | ScelError::CorruptRecord { .. }
                | ScelError::LineTooLong { .. }
        )
    }
}

/// A specialized `Result` type for scel2pyim operations.
pub type Result<T> = std::result::Result<T, ScelError>;
