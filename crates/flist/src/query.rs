//! crates/flist/src/query.rs
//! The listing query seam.

use std::io;
use std::process::Stdio;

use tracing::debug;
use transport::{PathSpec, ToolConfig};

/// Captured result of one listing query.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ListingOutput {
    /// Standard output: one record per line.
    pub stdout: String,
    /// Standard error. Non-empty means the listing failed.
    pub stderr: String,
    /// Whether the process exited successfully.
    pub success: bool,
}

impl ListingOutput {
    /// Builds a successful result carrying `stdout`.
    #[must_use]
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            success: true,
        }
    }

    /// Builds a failed result carrying `stderr`.
    #[must_use]
    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            success: false,
        }
    }

    /// Returns the reason the listing should be treated as failed, if any.
    #[must_use]
    pub fn failure_reason(&self) -> Option<String> {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return Some(stderr.to_owned());
        }
        if self.success {
            None
        } else {
            Some("listing command exited unsuccessfully".to_owned())
        }
    }
}

/// Lists the entries of one operand.
///
/// Implemented by [`RsyncListing`] for real hosts and by closures in tests.
pub trait ListingQuery {
    /// Runs the query for `spec`.
    ///
    /// # Errors
    ///
    /// Returns an error only when the query could not be executed at all.
    /// A listing that ran and reported a problem is an `Ok` value with a
    /// non-empty [`ListingOutput::stderr`].
    fn list(&mut self, spec: &PathSpec) -> io::Result<ListingOutput>;
}

impl<F> ListingQuery for F
where
    F: FnMut(&PathSpec) -> io::Result<ListingOutput>,
{
    fn list(&mut self, spec: &PathSpec) -> io::Result<ListingOutput> {
        self(spec)
    }
}

/// Runs `rsync -s OPERAND` and captures its output.
#[derive(Clone, Debug, Default)]
pub struct RsyncListing {
    tools: ToolConfig,
}

impl RsyncListing {
    /// Creates a query that uses `tools` to build the command.
    #[must_use]
    pub const fn new(tools: ToolConfig) -> Self {
        Self { tools }
    }
}

impl ListingQuery for RsyncListing {
    fn list(&mut self, spec: &PathSpec) -> io::Result<ListingOutput> {
        let mut command = self.tools.listing_command(spec);
        command.stdin(Stdio::null());
        debug!(target: "prsync::cmd", command = ?command, "listing");
        let output = command.output()?;
        Ok(ListingOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            success: output.status.success(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stderr_takes_precedence_as_reason() {
        let output = ListingOutput {
            stdout: String::new(),
            stderr: "  permission denied\n".to_owned(),
            success: false,
        };
        assert_eq!(output.failure_reason().as_deref(), Some("permission denied"));
    }

    #[test]
    fn successful_output_has_no_reason() {
        assert!(ListingOutput::ok("x").failure_reason().is_none());
    }

    #[test]
    fn silent_failure_still_reports() {
        let output = ListingOutput {
            success: false,
            ..ListingOutput::default()
        };
        assert!(output.failure_reason().is_some());
    }

    #[test]
    fn closures_are_queries() {
        let mut seen = Vec::new();
        let mut query = |spec: &PathSpec| {
            seen.push(spec.to_string());
            Ok::<_, io::Error>(ListingOutput::ok(""))
        };
        query.list(&PathSpec::parse("h:/x/")).expect("query");
        assert_eq!(seen, vec!["h:/x/".to_owned()]);
    }

    #[cfg(unix)]
    #[test]
    fn missing_program_is_an_execution_error() {
        let tools = ToolConfig::new().with_rsync("/nonexistent/prsync-test/rsync");
        let mut query = RsyncListing::new(tools);
        assert!(query.list(&PathSpec::local("/")).is_err());
    }
}
