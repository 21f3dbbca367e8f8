//! crates/flist/src/error.rs
//! Enumeration failures.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure that aborts enumeration.
///
/// Per-directory listing failures are not errors: they are recorded in
/// [`FileListing::skipped`](crate::FileListing::skipped) and traversal
/// continues.
#[derive(Debug, Error)]
pub enum FlistError {
    /// The listing query process could not be launched or read.
    #[error("failed to run listing query for '{spec}': {source}")]
    Query {
        /// Operand that was being listed.
        spec: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A listing line did not match the record grammar.
    #[error("malformed listing record for '{spec}': {line:?}")]
    MalformedRecord {
        /// Operand whose listing contained the line.
        spec: String,
        /// The offending line.
        line: String,
    },

    /// The wildcard segment could not be compiled.
    #[error("invalid wildcard '{pattern}': {source}")]
    InvalidWildcard {
        /// Segment as written.
        pattern: String,
        /// Compilation failure.
        #[source]
        source: regex::Error,
    },

    /// The local enumeration root could not be inspected.
    #[error("failed to stat local source '{}': {source}", path.display())]
    LocalRoot {
        /// Root that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Cancellation arrived before the next listing query.
    #[error("enumeration cancelled before listing '{spec}'")]
    Cancelled {
        /// Operand that would have been listed next.
        spec: String,
    },
}

/// Failure while reading an explicit file list.
#[derive(Debug, Error)]
pub enum FilesFromError {
    /// The list file could not be opened.
    #[error("failed to open files-from list '{}': {source}", path.display())]
    Open {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Reading the list failed part way through.
    #[error("failed to read files-from list: {source}")]
    Read {
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A record was not valid UTF-8.
    #[error("files-from record {index} is not valid UTF-8")]
    Encoding {
        /// One-based record number.
        index: usize,
    },
}

impl FlistError {
    /// Returns the operand or path the error refers to.
    #[must_use]
    pub fn subject(&self) -> String {
        match self {
            Self::Query { spec, .. }
            | Self::MalformedRecord { spec, .. }
            | Self::Cancelled { spec } => spec.clone(),
            Self::InvalidWildcard { pattern, .. } => pattern.clone(),
            Self::LocalRoot { path, .. } => path.display().to_string(),
        }
    }
}
