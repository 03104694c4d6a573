//! Unified error types for chatlens.
//!
//! This module provides a single [`ChatlensError`] enum for every condition
//! that is escalated to the caller. Per-line problems never reach it: a line
//! that cannot be read as a message header is demoted to a continuation line
//! (see [`LineError`]), and the parse keeps going.
//!
//! Every escalated condition is recoverable. A caller can show the message
//! and ask for different input without restarting anything.

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for chatlens operations.
///
/// # Example
///
/// ```rust
/// use chatlens::error::Result;
/// use chatlens::MessageRecord;
///
/// fn load() -> Result<Vec<MessageRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatlensError>;

/// The error type for all chatlens operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlensError {
    /// An I/O error occurred while reading input or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The input bytes are not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::str::Utf8Error,
    },

    /// The input produced zero message records.
    ///
    /// `excerpt` holds the beginning of the raw input so the caller can
    /// show what the file actually looked like.
    #[error("No messages found in input{}", excerpt_suffix(.excerpt))]
    EmptyResult {
        /// Leading characters of the unparsed input
        excerpt: String,
    },

    /// An archive was supplied but none of its members is a `.txt` file.
    #[error("No .txt file found inside the archive ({members} member(s) inspected)")]
    NoTextInArchive {
        /// Number of archive members that were inspected
        members: usize,
    },

    /// The archive itself could not be read.
    #[cfg(feature = "archive")]
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Invalid date in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// Unknown output format, or one whose feature is disabled.
    #[error("Invalid output format: {message}")]
    InvalidFormat {
        /// Human-readable explanation
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn excerpt_suffix(excerpt: &str) -> String {
    if excerpt.trim().is_empty() {
        String::new()
    } else {
        format!(". Input starts with:\n{excerpt}")
    }
}

impl ChatlensError {
    /// Creates an empty-result error carrying a diagnostic excerpt.
    pub fn empty_result(excerpt: impl Into<String>) -> Self {
        ChatlensError::EmptyResult {
            excerpt: excerpt.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatlensError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates a UTF-8 error with context.
    pub fn utf8(context: impl Into<String>, source: std::str::Utf8Error) -> Self {
        ChatlensError::Utf8 {
            context: context.into(),
            source,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatlensError::Io(_))
    }

    /// Returns `true` if the input parsed but yielded no records.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, ChatlensError::EmptyResult { .. })
    }

    /// Returns `true` if an archive had no `.txt` member.
    pub fn is_no_text_in_archive(&self) -> bool {
        matches!(self, ChatlensError::NoTextInArchive { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatlensError::InvalidDate { .. })
    }

    /// Returns `true` if the caller can reasonably retry or continue.
    ///
    /// Always `true`: every variant describes a problem with one input.
    pub fn is_recoverable(&self) -> bool {
        true
    }

    /// Returns the diagnostic excerpt for [`ChatlensError::EmptyResult`].
    pub fn excerpt(&self) -> Option<&str> {
        match self {
            ChatlensError::EmptyResult { excerpt } => Some(excerpt),
            _ => None,
        }
    }
}

/// Why a single line was not accepted as a message header.
///
/// These never escape the parser. They are logged at `trace` level and
/// decide whether a line becomes a continuation line or is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LineError {
    /// No header pattern matched and there was no record to attach to.
    #[error("line matches no header format and has no preceding message")]
    MalformedLine,

    /// A header pattern matched but its date could not be parsed.
    #[error("unparsable date")]
    UnparsableDate,

    /// A header pattern matched but its time could not be parsed.
    #[error("unparsable time")]
    UnparsableTime,
}
