use std::ffi::OsString;

/// Parsed command-line arguments for the prsync front-end.
///
/// Optional values are `None` when the flag was absent; environment
/// defaults are applied later by [`resolve_tools`](super::resolve_tools).
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    /// `--help` / `-h`.
    pub show_help: bool,
    /// `--version` / `-V`.
    pub show_version: bool,
    /// Number of `-v` flags.
    pub verbose: u8,
    /// `--quiet` / `-q`.
    pub quiet: bool,
    /// `--dry-run` / `-n`.
    pub dry_run: bool,
    /// `--files-from FILE`.
    pub files_from: Option<OsString>,
    /// `--from0`.
    pub from0: bool,
    /// `--rsync-path PROGRAM`.
    pub rsync_path: Option<OsString>,
    /// `--rsh COMMAND` / `-e COMMAND`.
    pub rsh: Option<String>,
    /// `--timeout SECONDS`; zero disables it.
    pub timeout: Option<u64>,
    /// `--lenient-listing`.
    pub lenient_listing: bool,
    /// Parallel transfer count `N`; zero or negative is unlimited.
    pub parallel: i64,
    /// `SOURCE` operand.
    pub source: String,
    /// `DEST` operand.
    pub destination: String,
}
