//! crates/transfer/src/error.rs
//! Failures that abort a scheduler run.
//!
//! A transfer that runs and exits unsuccessfully is not an error here: it
//! ends in [`JobState::Failed`](crate::JobState::Failed) and is reported in
//! the [`TransferReport`](crate::TransferReport).

use std::io;
use std::path::Path;
use std::time::Duration;

use thiserror::Error;

/// Run-level transfer failure.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The transfer program could not be started.
    #[error("failed to launch rsync binary '{program}' for '{file}': {source}")]
    Spawn {
        /// Program that was executed.
        program: String,
        /// Relative name of the file being transferred.
        file: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// No active job produced output within the idle timeout.
    #[error("timeout: no transfer output for {} seconds", idle.as_secs())]
    Stalled {
        /// The configured idle timeout.
        idle: Duration,
        /// Jobs killed when the timeout fired.
        terminated: usize,
    },

    /// The run was cancelled.
    #[error("transfer cancelled with {terminated} transfer(s) in flight")]
    Cancelled {
        /// Jobs killed on cancellation.
        terminated: usize,
    },
}

impl TransferError {
    pub(crate) fn spawn(program: &std::ffi::OsStr, file: &str, source: io::Error) -> Self {
        Self::Spawn {
            program: Path::new(program).display().to_string(),
            file: file.to_owned(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_error_mentions_program_and_file() {
        let error = TransferError::spawn(
            std::ffi::OsStr::new("/opt/rsync"),
            "a/b.txt",
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        let rendered = error.to_string();
        assert!(rendered.contains("'/opt/rsync'"));
        assert!(rendered.contains("a/b.txt"));
        assert!(rendered.ends_with("missing"));
    }

    #[test]
    fn stalled_reports_seconds() {
        let error = TransferError::Stalled {
            idle: Duration::from_secs(30),
            terminated: 2,
        };
        assert_eq!(error.to_string(), "timeout: no transfer output for 30 seconds");
    }
}
