#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

//! # Overview
//!
//! `transport` holds the pieces of `prsync` that talk about *where* bytes
//! live and *which external programs* move them. Nothing in this crate moves
//! data itself: every transfer is delegated to an external `rsync` process
//! and, for remote paths, to the remote shell that `rsync` launches.
//!
//! # Design
//!
//! - [`PathSpec`] decomposes an rsync-style operand (`host:path` or `path`)
//!   into an optional host and a path, and provides the string-level joins
//!   the lister and scheduler need to rebuild per-file operands.
//! - [`ToolConfig`] records which `rsync` binary and remote shell to run and
//!   assembles the listing and transfer [`Command`](std::process::Command)s.
//! - [`RemoteShell`] splits an `-e`-style remote shell specification into a
//!   program and its leading arguments and renders the remote `mkdir -p`
//!   invocation used before pushing into a remote directory.
//!
//! # Invariants
//!
//! - Operand classification follows rsync's own rule: a colon that appears
//!   before any `/` marks a remote operand. There is no further validation.
//! - Paths are handled as strings with `/` separators regardless of the host
//!   platform because remote paths never map onto local [`std::path::Path`]
//!   semantics.
//!
//! # Examples
//!
//! ```
//! use transport::PathSpec;
//!
//! let spec = PathSpec::parse("backup@nas:/srv/data/");
//! assert_eq!(spec.host(), Some("backup@nas"));
//! assert_eq!(spec.path(), "/srv/data/");
//! assert_eq!(spec.join("a/x.txt").to_string(), "backup@nas:/srv/data/a/x.txt");
//! ```

mod operand;
mod ssh;
mod tools;

pub use operand::{PathSpec, join_path, parent_dir, relative_to};
pub use ssh::{RemoteShell, shell_quote};
pub use tools::{
    DEFAULT_RSH, DEFAULT_RSYNC, RSH_ENV, RSYNC_ENV, TRANSFER_FLAGS, ToolConfig,
};
