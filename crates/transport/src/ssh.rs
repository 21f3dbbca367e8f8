//! crates/transport/src/ssh.rs
//! Remote shell command construction.

use std::ffi::{OsStr, OsString};
use std::process::Command;

/// Remote shell program together with its leading arguments.
///
/// Parsed from an rsync `-e`-style specification such as `ssh -p 2222`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RemoteShell {
    program: OsString,
    args: Vec<OsString>,
}

impl RemoteShell {
    /// Creates a shell that runs `program` with no leading arguments.
    #[must_use]
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Splits `spec` on whitespace. Returns `None` for a blank specification.
    #[must_use]
    pub fn parse(spec: &str) -> Option<Self> {
        let mut words = spec.split_whitespace();
        let program = OsString::from(words.next()?);
        Some(Self {
            program,
            args: words.map(OsString::from).collect(),
        })
    }

    /// Returns the program that is executed.
    #[must_use]
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// Returns the arguments placed before the host name.
    #[must_use]
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Builds `PROGRAM ARGS... HOST`.
    #[must_use]
    pub fn command(&self, host: &str) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).arg(host);
        command
    }

    /// Builds the remote `mkdir -p` invocation for `directory` on `host`.
    ///
    /// The directory is single-quoted because the remote side hands the
    /// command line to a shell.
    #[must_use]
    pub fn mkdir_command(&self, host: &str, directory: &str) -> Command {
        let mut command = self.command(host);
        command.arg(format!("mkdir -p -- {}", shell_quote(directory)));
        command
    }
}

/// Quotes `text` for a POSIX shell using single quotes.
///
/// # Examples
///
/// ```
/// use transport::shell_quote;
///
/// assert_eq!(shell_quote("plain"), "'plain'");
/// assert_eq!(shell_quote("it's"), r"'it'\''s'");
/// ```
#[must_use]
pub fn shell_quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for ch in text.chars() {
        if ch == '\'' {
            quoted.push_str(r"'\''");
        } else {
            quoted.push(ch);
        }
    }
    quoted.push('\'');
    quoted
}
