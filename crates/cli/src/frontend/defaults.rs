//! Constants shared across the CLI front-end.

/// Name used in diagnostics and the version banner.
pub(crate) const PROGRAM_NAME: &str = "prsync";

/// Static help text.
pub(crate) const HELP_TEXT: &str = concat!(
    "Usage: prsync [OPTIONS] N SOURCE DEST\n",
    "\n",
    "Transfers every file under SOURCE to DEST with one rsync process per\n",
    "file, running at most N of them at once.\n",
    "\n",
    "Arguments:\n",
    "  N                The number of transfers to run in parallel; 0 or a\n",
    "                   negative number runs them all at once.\n",
    "  SOURCE, DEST     The tree to transfer from and the location to transfer\n",
    "                   to. Either may be local or remote (HOST:PATH), written\n",
    "                   as for rsync. The final segment of SOURCE may contain\n",
    "                   '*' wildcards.\n",
    "\n",
    "Options:\n",
    "  -h, --help               Show this help message and exit.\n",
    "  -V, --version            Output version information and exit.\n",
    "  -v, --verbose            Increase logging verbosity (repeatable).\n",
    "  -q, --quiet              Only log errors.\n",
    "  -n, --dry-run            List the transfers without running them.\n",
    "      --files-from=FILE    Transfer the names listed in FILE ('-' for stdin),\n",
    "                           relative to SOURCE, instead of enumerating it.\n",
    "      --from0              Names in FILE are separated by NUL bytes.\n",
    "      --rsync-path=PROGRAM Run PROGRAM instead of rsync.\n",
    "  -e, --rsh=COMMAND        Remote shell used by rsync and for mkdir.\n",
    "      --timeout=SECONDS    Abort when no transfer output arrives for\n",
    "                           SECONDS (0 disables).\n",
    "      --lenient-listing    Skip unrecognised listing lines instead of\n",
    "                           failing.\n",
    "\n",
    "Environment:\n",
    "  PRSYNC_RSYNC             Default for --rsync-path.\n",
    "  PRSYNC_RSH               Default for --rsh.\n",
    "  PRSYNC_LOG               Log filter directives, replacing -v/-q.\n",
);
