//! Failures that end a run early, and how they are reported.

use std::io::{self, Write};

use flist::{FilesFromError, FlistError};
use thiserror::Error;
use transfer::TransferError;

use super::defaults::PROGRAM_NAME;
use crate::exit_code::ExitCode;

/// Anything that stops a run before every transfer is retired.
#[derive(Debug, Error)]
pub(crate) enum RunError {
    #[error(transparent)]
    FilesFrom(#[from] FilesFromError),

    #[error(transparent)]
    Listing(#[from] FlistError),

    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

impl RunError {
    pub(crate) const fn exit_code(&self) -> ExitCode {
        match self {
            Self::FilesFrom(_)
            | Self::Listing(FlistError::LocalRoot { .. } | FlistError::InvalidWildcard { .. }) => {
                ExitCode::FileSelect
            }
            Self::Listing(FlistError::Query { .. } | FlistError::MalformedRecord { .. })
            | Self::Transfer(TransferError::Spawn { .. })
            | Self::Output(_) => ExitCode::FileIo,
            Self::Transfer(TransferError::Stalled { .. }) => ExitCode::Timeout,
            Self::Listing(FlistError::Cancelled { .. })
            | Self::Transfer(TransferError::Cancelled { .. }) => ExitCode::Signal,
        }
    }
}

/// Writes `prsync error: MESSAGE (code N)` to `stderr`.
pub(crate) fn write_error<E: Write>(
    stderr: &mut E,
    message: impl std::fmt::Display,
    code: ExitCode,
) -> io::Result<()> {
    writeln!(stderr, "{PROGRAM_NAME} error: {message} (code {})", code.as_i32())
}

/// Writes `prsync warning: MESSAGE` to `stderr`.
pub(crate) fn write_warning<E: Write>(
    stderr: &mut E,
    message: impl std::fmt::Display,
) -> io::Result<()> {
    writeln!(stderr, "{PROGRAM_NAME} warning: {message}")
}
