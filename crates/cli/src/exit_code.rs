//! crates/cli/src/exit_code.rs
//! Process exit statuses, numbered as rsync numbers them.

use std::fmt;

/// Exit status of a `prsync` run.
///
/// Values share rsync's `errcode.h` numbering so scripts that already
/// interpret rsync's status keep working.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ExitCode {
    /// Every file was transferred.
    Ok = 0,

    /// Syntax or usage error.
    ///
    /// Unknown options, a missing operand, or a non-numeric `N`.
    Syntax = 1,

    /// Errors selecting input/output files or directories.
    ///
    /// The local source cannot be inspected, the `--files-from` list cannot
    /// be read, or the wildcard segment does not compile.
    FileSelect = 3,

    /// Error in file I/O.
    ///
    /// A listing or transfer process cannot be launched, a listing line
    /// violates the record format, or output cannot be written.
    FileIo = 11,

    /// Interrupted by SIGINT or SIGTERM.
    Signal = 20,

    /// Partial transfer.
    ///
    /// At least one transfer failed or one directory could not be listed.
    PartialTransfer = 23,

    /// No transfer output within `--timeout`.
    Timeout = 30,
}

impl ExitCode {
    /// Returns the numeric exit status.
    ///
    /// ```
    /// use cli::ExitCode;
    ///
    /// assert_eq!(ExitCode::PartialTransfer.as_i32(), 23);
    /// ```
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Returns rsync's description of the status.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Ok => "success",
            Self::Syntax => "syntax or usage error",
            Self::FileSelect => "errors selecting input/output files, dirs",
            Self::FileIo => "error in file IO",
            Self::Signal => "received SIGINT, SIGTERM, or SIGHUP",
            Self::PartialTransfer => "some files/attrs were not transferred (see previous errors)",
            Self::Timeout => "timeout in data send/receive",
        }
    }

    /// Reports whether the status signals success.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.description(), self.as_i32())
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}
