#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `flist` produces the ordered list of files a `prsync` run transfers. Three
//! producers share one result type, [`FileListing`]:
//!
//! - [`RemoteLister`] walks a tree through repeated `rsync --list-only`
//!   queries, optionally starting from a `*` wildcard in the final segment.
//! - [`walk_local`] walks a local tree directly.
//! - [`read_files_from`] takes the names from an explicit list.
//!
//! # Design
//!
//! The remote lister is generic over [`ListingQuery`] so traversal can be
//! exercised without a remote host. [`RsyncListing`] is the production
//! query. Each line of listing output is parsed by [`parse_record`] into a
//! [`ListEntry`]; directories are queued breadth-first and files accumulate
//! in discovery order. After the queue drains every path is made relative
//! to the parent of the first traversal root.
//!
//! # Invariants
//!
//! - Names in a [`FileListing`] are relative and unique.
//! - The `.` entry of a listing is never queued or returned.
//! - A directory whose listing reports an error is skipped, not retried, and
//!   recorded in [`FileListing::skipped`].
//!
//! # Errors
//!
//! [`FlistError`] aborts enumeration: the query could not run, a listing line
//! broke the record grammar in strict mode, or a local root is missing.
//! [`FilesFromError`] covers explicit lists.
//!
//! # Examples
//!
//! ```
//! use flist::{Enumeration, ListingOutput, RemoteLister};
//! use transport::PathSpec;
//!
//! let query = |spec: &PathSpec| -> std::io::Result<ListingOutput> {
//!     Ok(match spec.path() {
//!         "/data/" => ListingOutput::ok(
//!             "drwxr-xr-x          4,096 2024/03/01 10:15:00 .\n\
//!              -rw-r--r--            512 2024/03/01 10:15:00 b.txt\n",
//!         ),
//!         _ => ListingOutput::failed("no such directory"),
//!     })
//! };
//!
//! let mut lister = RemoteLister::new(query);
//! let Enumeration::Files(listing) = lister.enumerate(&PathSpec::parse("nas:/data/"))? else {
//!     unreachable!("no wildcard");
//! };
//! assert_eq!(listing.files(), ["b.txt"]);
//! # Ok::<(), flist::FlistError>(())
//! ```

mod error;
mod files_from;
mod listing;
mod local;
mod query;
mod record;
mod remote;
mod wildcard;

pub use crate::error::{FilesFromError, FlistError};
pub use crate::files_from::{parse_files_from, read_files_from};
pub use crate::listing::{FileListing, SkippedPath};
pub use crate::local::walk_local;
pub use crate::query::{ListingOutput, ListingQuery, RsyncListing};
pub use crate::record::{ListEntry, parse_record};
pub use crate::remote::{Enumeration, RemoteLister};
pub use crate::wildcard::{WildcardPattern, contains_wildcard, translate_wildcard};
