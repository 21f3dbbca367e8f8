//! crates/transport/src/tools.rs
//! External program selection and command assembly.

use std::ffi::{OsStr, OsString};
use std::process::Command;

use crate::operand::PathSpec;
use crate::ssh::RemoteShell;

/// Program used when neither the caller nor the environment selects one.
pub const DEFAULT_RSYNC: &str = "rsync";

/// Remote shell used when neither the caller nor the environment selects one.
pub const DEFAULT_RSH: &str = "ssh";

/// Environment variable that overrides the `rsync` program.
pub const RSYNC_ENV: &str = "PRSYNC_RSYNC";

/// Environment variable that overrides the remote shell.
pub const RSH_ENV: &str = "PRSYNC_RSH";

/// Archive, verbose, protected-args and progress mode for single-file transfers.
pub const TRANSFER_FLAGS: &str = "-avsP";

const LISTING_FLAGS: &str = "-s";

/// External programs and options used to list and transfer files.
///
/// # Examples
///
/// ```
/// use transport::{PathSpec, ToolConfig};
///
/// let tools = ToolConfig::new().with_rsync("/opt/bin/rsync");
/// let listing = tools.listing_command(&PathSpec::parse("nas:/srv/"));
/// let args: Vec<_> = listing.get_args().collect();
/// assert_eq!(args, ["-s", "nas:/srv/"]);
/// ```
#[derive(Clone, Debug)]
pub struct ToolConfig {
    rsync: OsString,
    rsh: Option<String>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolConfig {
    /// Creates a configuration using `rsync` and `ssh` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rsync: OsString::from(DEFAULT_RSYNC),
            rsh: None,
        }
    }

    /// Creates a configuration honouring [`RSYNC_ENV`] and [`RSH_ENV`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var_os(name))
    }

    /// Creates a configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let mut config = Self::new();
        if let Some(program) = lookup(RSYNC_ENV).filter(|value| !value.is_empty()) {
            config.rsync = program;
        }
        if let Some(rsh) = lookup(RSH_ENV).filter(|value| !value.is_empty()) {
            config.rsh = Some(rsh.to_string_lossy().into_owned());
        }
        config
    }

    /// Replaces the `rsync` program.
    #[must_use]
    pub fn with_rsync(mut self, program: impl Into<OsString>) -> Self {
        self.rsync = program.into();
        self
    }

    /// Replaces the remote shell specification (`-e` syntax).
    ///
    /// A blank specification restores the default.
    #[must_use]
    pub fn with_remote_shell(mut self, spec: impl Into<String>) -> Self {
        let spec = spec.into();
        self.rsh = if spec.trim().is_empty() { None } else { Some(spec) };
        self
    }

    /// Returns the configured `rsync` program.
    #[must_use]
    pub fn rsync_program(&self) -> &OsStr {
        &self.rsync
    }

    /// Returns the explicit remote shell specification, if one was set.
    #[must_use]
    pub fn remote_shell_spec(&self) -> Option<&str> {
        self.rsh.as_deref()
    }

    /// Returns the remote shell used for out-of-band commands such as `mkdir`.
    #[must_use]
    pub fn remote_shell(&self) -> RemoteShell {
        self.rsh
            .as_deref()
            .and_then(RemoteShell::parse)
            .unwrap_or_else(|| RemoteShell::new(DEFAULT_RSH))
    }

    /// Builds the listing-only query for `spec`.
    #[must_use]
    pub fn listing_command(&self, spec: &PathSpec) -> Command {
        let mut command = self.rsync_command();
        command.arg(LISTING_FLAGS).arg(spec.to_operand());
        command
    }

    /// Builds the single-file transfer invocation.
    #[must_use]
    pub fn transfer_command(&self, source: &PathSpec, destination: &PathSpec) -> Command {
        let mut command = self.rsync_command();
        command
            .arg(TRANSFER_FLAGS)
            .arg(source.to_operand())
            .arg(destination.to_operand());
        command
    }

    fn rsync_command(&self) -> Command {
        let mut command = Command::new(&self.rsync);
        if let Some(rsh) = &self.rsh {
            command.arg("-e").arg(rsh);
        }
        command
    }
}
