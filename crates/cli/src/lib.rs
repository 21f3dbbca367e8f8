#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` is the command-line front-end of `prsync`:
//!
//! ```text
//! prsync [OPTIONS] N SOURCE DEST
//! ```
//!
//! It enumerates SOURCE (through `rsync -s` listings when remote or
//! wildcard-qualified, a local walk otherwise, or an explicit
//! `--files-from` list), then runs one `rsync -avsP` per file with at most
//! `N` in flight, printing each job's progress to standard output.
//!
//! # Design
//!
//! [`run`] accepts an argument iterator plus handles for standard output and
//! error so tests can drive it in-process. A `clap` builder command parses
//! the arguments; tool programs are layered flag > environment
//! (`PRSYNC_RSYNC`, `PRSYNC_RSH`) > default. Enumeration comes from the
//! `flist` crate, scheduling from `transfer`. Progress lines are rendered by
//! a [`transfer::TransferObserver`] implementation.
//!
//! # Invariants
//!
//! - `run` never panics; failures surface as non-zero exit codes.
//! - Exit codes follow rsync's numbering ([`ExitCode`]).
//! - Every failure is reported on stderr as a single
//!   `prsync error: ... (code N)` line.
//!
//! # Errors
//!
//! Argument errors exit with `1`. Unreadable sources and files-from lists
//! exit with `3`, launch and listing-format failures with `11`. A run in
//! which any transfer failed, or any directory could not be listed, exits
//! with `23`. Cancellation exits with `20` and the idle timeout with `30`.
//!
//! # Examples
//!
//! ```
//! use cli::run;
//!
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = run(["prsync", "--version"], &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, 0);
//! assert!(String::from_utf8(stdout).unwrap().starts_with("prsync "));
//! assert!(stderr.is_empty());
//! ```

mod exit_code;
mod frontend;
mod signals;

pub use exit_code::ExitCode;
pub use frontend::{ParsedArgs, exit_code_from, parse_args, run, run_with_cancel};
pub use signals::cancel_on_signals;
