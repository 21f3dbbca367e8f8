//! crates/flist/src/remote.rs
//! Breadth-first enumeration through the listing query.

use std::collections::VecDeque;

use crossbeam_channel::{Receiver, TryRecvError};
use tracing::{debug, info, trace, warn};
use transport::{PathSpec, join_path, parent_dir};

use crate::error::FlistError;
use crate::listing::{FileListing, SkippedPath};
use crate::query::ListingQuery;
use crate::record::{ListEntry, parse_record};
use crate::wildcard::{WildcardPattern, contains_wildcard};

/// Outcome of [`RemoteLister::enumerate`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Enumeration {
    /// Traversal ran; the listing may be empty.
    Files(FileListing),
    /// The final path segment was a wildcard that matched nothing.
    NoWildcardMatch {
        /// The wildcard segment as written.
        pattern: String,
    },
}

/// Enumerates every file under an operand by repeated listing queries.
///
/// Each queued directory costs one query. A trailing `/` on an operand asks
/// for the directory's contents; without it the listing names the operand
/// itself, which the lister turns back into a contents request.
#[derive(Debug)]
pub struct RemoteLister<Q> {
    query: Q,
    lenient: bool,
    cancel: Option<Receiver<()>>,
}

impl<Q: ListingQuery> RemoteLister<Q> {
    /// Creates a strict lister over `query`.
    #[must_use]
    pub const fn new(query: Q) -> Self {
        Self {
            query,
            lenient: false,
            cancel: None,
        }
    }

    /// Skips malformed listing lines with a warning instead of failing.
    #[must_use]
    pub const fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    /// Stops enumeration before the next query once `cancel` receives a
    /// message. Dropping the sending side does not cancel.
    #[must_use]
    pub fn with_cancel(mut self, cancel: Receiver<()>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Returns the underlying query.
    #[must_use]
    pub const fn query(&self) -> &Q {
        &self.query
    }

    /// Enumerates all files under `root`.
    ///
    /// When the final segment of `root` contains `*`, the parent directory is
    /// listed once and every matching entry becomes a traversal root.
    ///
    /// # Errors
    ///
    /// Fails when a query cannot be executed or, in strict mode, when a
    /// listing line does not match the record grammar. Directories whose
    /// listing reports an error are skipped and recorded instead.
    pub fn enumerate(&mut self, root: &PathSpec) -> Result<Enumeration, FlistError> {
        let mut skipped = Vec::new();
        let roots = if contains_wildcard(root.final_segment()) {
            let roots = self.expand_wildcard(root, &mut skipped)?;
            if roots.is_empty() {
                if skipped.is_empty() {
                    return Ok(Enumeration::NoWildcardMatch {
                        pattern: root.final_segment().to_owned(),
                    });
                }
                let base = parent_dir(root.path().trim_end_matches('/'));
                return Ok(Enumeration::Files(FileListing::from_paths(
                    base,
                    Vec::new(),
                    skipped,
                )));
            }
            roots
        } else {
            vec![root.path().to_owned()]
        };

        let base = parent_dir(&roots[0]).to_owned();
        let files = self.traverse(root, roots, &mut skipped)?;
        info!(
            target: "prsync::flist",
            files = files.len(),
            skipped = skipped.len(),
            "enumerated {}",
            root
        );
        Ok(Enumeration::Files(FileListing::from_paths(
            base, files, skipped,
        )))
    }

    fn expand_wildcard(
        &mut self,
        root: &PathSpec,
        skipped: &mut Vec<SkippedPath>,
    ) -> Result<Vec<String>, FlistError> {
        let segment = root.final_segment();
        let pattern = WildcardPattern::new(segment).map_err(|source| {
            FlistError::InvalidWildcard {
                pattern: segment.to_owned(),
                source,
            }
        })?;
        let parent = parent_dir(root.path().trim_end_matches('/'));
        let listed = if parent.is_empty() {
            "./".to_owned()
        } else {
            format!("{}/", parent.trim_end_matches('/'))
        };

        let Some(entries) = self.list(&root.with_path(listed), skipped)? else {
            return Ok(Vec::new());
        };
        let roots: Vec<String> = entries
            .into_iter()
            .filter(|entry| !entry.is_self() && pattern.is_match(entry.name()))
            .map(|entry| join_path(parent, entry.name()))
            .collect();
        debug!(
            target: "prsync::flist",
            pattern = pattern.as_str(),
            matches = roots.len(),
            "resolved wildcard"
        );
        Ok(roots)
    }

    fn traverse(
        &mut self,
        root: &PathSpec,
        roots: Vec<String>,
        skipped: &mut Vec<SkippedPath>,
    ) -> Result<Vec<String>, FlistError> {
        let mut queue: VecDeque<String> = roots.into();
        let mut files = Vec::new();

        while let Some(path) = queue.pop_front() {
            let Some(entries) = self.list(&root.with_path(path.clone()), skipped)? else {
                continue;
            };
            let own_name = if path.ends_with('/') {
                None
            } else {
                path.rsplit('/').next()
            };

            for entry in entries {
                if entry.is_self() {
                    continue;
                }
                let listed_path = if own_name == Some(entry.name()) {
                    path.clone()
                } else {
                    join_path(&path, entry.name())
                };
                if entry.is_directory() {
                    trace!(target: "prsync::flist", dir = %listed_path, "queued");
                    queue.push_back(format!("{listed_path}/"));
                } else {
                    files.push(listed_path);
                }
            }
        }
        Ok(files)
    }

    /// Lists one operand. `None` means the listing failed and was recorded.
    fn list(
        &mut self,
        spec: &PathSpec,
        skipped: &mut Vec<SkippedPath>,
    ) -> Result<Option<Vec<ListEntry>>, FlistError> {
        if self.cancel_requested() {
            warn!(target: "prsync::flist", path = %spec, "enumeration cancelled");
            return Err(FlistError::Cancelled {
                spec: spec.to_string(),
            });
        }
        let output = self.query.list(spec).map_err(|source| FlistError::Query {
            spec: spec.to_string(),
            source,
        })?;
        if let Some(reason) = output.failure_reason() {
            warn!(target: "prsync::flist", path = %spec, "error listing path: {reason}");
            skipped.push(SkippedPath {
                path: spec.to_string(),
                reason,
            });
            return Ok(None);
        }

        let mut entries = Vec::new();
        for line in output.stdout.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_record(line) {
                Some(entry) => entries.push(entry),
                None if self.lenient => {
                    warn!(target: "prsync::flist", path = %spec, line, "ignoring unrecognised listing line");
                }
                None => {
                    return Err(FlistError::MalformedRecord {
                        spec: spec.to_string(),
                        line: line.to_owned(),
                    });
                }
            }
        }
        Ok(Some(entries))
    }

    fn cancel_requested(&mut self) -> bool {
        match self.cancel.as_ref().map(Receiver::try_recv) {
            Some(Ok(())) => true,
            Some(Err(TryRecvError::Disconnected)) => {
                self.cancel = None;
                false
            }
            Some(Err(TryRecvError::Empty)) | None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ListingOutput;
    use std::collections::HashMap;
    use std::io;

    fn dir(name: &str) -> String {
        format!("drwxr-xr-x          4,096 2024/03/01 10:15:00 {name}\n")
    }

    fn file(name: &str) -> String {
        format!("-rw-r--r--            512 2024/03/01 10:15:00 {name}\n")
    }

    struct FakeHost {
        listings: HashMap<String, ListingOutput>,
        calls: Vec<String>,
    }

    impl FakeHost {
        fn new(listings: &[(&str, ListingOutput)]) -> Self {
            Self {
                listings: listings
                    .iter()
                    .map(|(path, output)| ((*path).to_owned(), output.clone()))
                    .collect(),
                calls: Vec::new(),
            }
        }
    }

    impl ListingQuery for FakeHost {
        fn list(&mut self, spec: &PathSpec) -> io::Result<ListingOutput> {
            assert_eq!(spec.host(), Some("host"));
            self.calls.push(spec.path().to_owned());
            Ok(self
                .listings
                .get(spec.path())
                .cloned()
                .unwrap_or_else(|| ListingOutput::failed("No such file or directory")))
        }
    }

    fn files_of(enumeration: Enumeration) -> FileListing {
        match enumeration {
            Enumeration::Files(listing) => listing,
            other => panic!("expected files, got {other:?}"),
        }
    }

    #[test]
    fn breadth_first_listing_is_relative_to_root() {
        let host = FakeHost::new(&[
            ("/data/", ListingOutput::ok(dir(".") + &dir("a") + &file("b.txt"))),
            ("/data/a/", ListingOutput::ok(dir(".") + &file("x.txt"))),
        ]);
        let mut lister = RemoteLister::new(host);
        let listing = files_of(
            lister
                .enumerate(&PathSpec::parse("host:/data/"))
                .expect("enumerate"),
        );

        assert_eq!(listing.files(), ["b.txt", "a/x.txt"]);
        assert_eq!(listing.base(), "/data");
        assert_eq!(lister.query().calls, ["/data/", "/data/a/"]);
    }

    #[test]
    fn root_without_slash_lists_itself_then_contents() {
        let host = FakeHost::new(&[
            ("/data", ListingOutput::ok(dir("data"))),
            ("/data/", ListingOutput::ok(dir(".") + &file("b.txt"))),
        ]);
        let mut lister = RemoteLister::new(host);
        let listing = files_of(
            lister
                .enumerate(&PathSpec::parse("host:/data"))
                .expect("enumerate"),
        );

        assert_eq!(listing.files(), ["data/b.txt"]);
        assert_eq!(lister.query().calls, ["/data", "/data/"]);
    }

    #[test]
    fn single_file_root() {
        let host = FakeHost::new(&[("/data/f.iso", ListingOutput::ok(file("f.iso")))]);
        let listing = files_of(
            RemoteLister::new(host)
                .enumerate(&PathSpec::parse("host:/data/f.iso"))
                .expect("enumerate"),
        );
        assert_eq!(listing.files(), ["f.iso"]);
        assert_eq!(listing.base(), "/data");
    }

    #[test]
    fn wildcard_selects_matching_roots() {
        let host = FakeHost::new(&[
            (
                "/data/",
                ListingOutput::ok(dir(".") + &dir("build-1") + &dir("build-2") + &dir("other")),
            ),
            ("/data/build-1", ListingOutput::ok(dir("build-1"))),
            ("/data/build-1/", ListingOutput::ok(dir(".") + &file("a.o"))),
            ("/data/build-2", ListingOutput::ok(dir("build-2"))),
            ("/data/build-2/", ListingOutput::ok(dir(".") + &file("b.o"))),
        ]);
        let mut lister = RemoteLister::new(host);
        let listing = files_of(
            lister
                .enumerate(&PathSpec::parse("host:/data/build-*"))
                .expect("enumerate"),
        );

        assert_eq!(listing.files(), ["build-1/a.o", "build-2/b.o"]);
        assert!(!lister.query().calls.iter().any(|call| call.contains("other")));
    }

    #[test]
    fn wildcard_without_matches_is_reported() {
        let host = FakeHost::new(&[("/data/", ListingOutput::ok(dir(".") + &file("x")))]);
        let result = RemoteLister::new(host)
            .enumerate(&PathSpec::parse("host:/data/*.log"))
            .expect("enumerate");
        assert_eq!(
            result,
            Enumeration::NoWildcardMatch {
                pattern: "*.log".to_owned()
            }
        );
    }

    #[test]
    fn dot_is_literal_in_wildcards() {
        let host = FakeHost::new(&[
            ("/d/", ListingOutput::ok(dir(".") + &file("v1.0") + &file("v1x0"))),
            ("/d/v1.0", ListingOutput::ok(file("v1.0"))),
        ]);
        let listing = files_of(
            RemoteLister::new(host)
                .enumerate(&PathSpec::parse("host:/d/v1.*"))
                .expect("enumerate"),
        );
        assert_eq!(listing.files(), ["v1.0"]);
    }

    #[test]
    fn failing_subtree_is_skipped_and_recorded() {
        let host = FakeHost::new(&[
            ("/data/", ListingOutput::ok(dir(".") + &dir("locked") + &dir("open"))),
            ("/data/locked/", ListingOutput::failed("opendir failed: Permission denied (13)")),
            ("/data/open/", ListingOutput::ok(dir(".") + &file("ok.txt"))),
        ]);
        let listing = files_of(
            RemoteLister::new(host)
                .enumerate(&PathSpec::parse("host:/data/"))
                .expect("enumerate"),
        );

        assert_eq!(listing.files(), ["open/ok.txt"]);
        assert_eq!(listing.skipped().len(), 1);
        assert_eq!(listing.skipped()[0].path, "host:/data/locked/");
        assert!(listing.skipped()[0].reason.contains("Permission denied"));
    }

    #[test]
    fn dot_entries_are_never_queued() {
        let host = FakeHost::new(&[("/data/", ListingOutput::ok(dir(".") + &dir(".")))]);
        let mut lister = RemoteLister::new(host);
        let listing = files_of(
            lister
                .enumerate(&PathSpec::parse("host:/data/"))
                .expect("enumerate"),
        );
        assert!(listing.is_empty());
        assert_eq!(lister.query().calls, ["/data/"]);
    }

    #[test]
    fn strict_mode_rejects_malformed_lines() {
        let host = FakeHost::new(&[(
            "/data/",
            ListingOutput::ok(dir(".") + "this is not a record\n"),
        )]);
        let error = RemoteLister::new(host)
            .enumerate(&PathSpec::parse("host:/data/"))
            .expect_err("strict mode fails");
        assert!(matches!(
            error,
            FlistError::MalformedRecord { ref line, .. } if line == "this is not a record"
        ));
    }

    #[test]
    fn lenient_mode_skips_malformed_lines() {
        let host = FakeHost::new(&[(
            "/data/",
            ListingOutput::ok(dir(".") + "banner text\n\n" + &file("a")),
        )]);
        let listing = files_of(
            RemoteLister::new(host)
                .lenient(true)
                .enumerate(&PathSpec::parse("host:/data/"))
                .expect("enumerate"),
        );
        assert_eq!(listing.files(), ["a"]);
    }

    #[test]
    fn query_failure_aborts() {
        let query = |_: &PathSpec| -> io::Result<ListingOutput> {
            Err(io::Error::new(io::ErrorKind::NotFound, "rsync not found"))
        };
        let error = RemoteLister::new(query)
            .enumerate(&PathSpec::parse("host:/data/"))
            .expect_err("query failure");
        assert!(matches!(error, FlistError::Query { .. }));
    }

    #[test]
    fn cancellation_stops_before_the_next_query() {
        let (cancel, cancelled) = crossbeam_channel::bounded(1);
        let mut queried = Vec::new();
        let query = |spec: &PathSpec| -> io::Result<ListingOutput> {
            queried.push(spec.path().to_owned());
            cancel.try_send(()).expect("queue cancel");
            Ok(ListingOutput::ok(dir(".") + &dir("a") + &dir("b")))
        };
        let error = RemoteLister::new(query)
            .with_cancel(cancelled)
            .enumerate(&PathSpec::parse("host:/data/"))
            .expect_err("cancelled");

        assert!(matches!(error, FlistError::Cancelled { ref spec } if spec == "host:/data/a/"));
        assert_eq!(queried, ["/data/"]);
    }

    #[test]
    fn dropped_cancel_sender_does_not_cancel() {
        let host = FakeHost::new(&[("/data/", ListingOutput::ok(dir(".") + &file("a")))]);
        let (cancel, cancelled) = crossbeam_channel::bounded::<()>(1);
        drop(cancel);
        let listing = files_of(
            RemoteLister::new(host)
                .with_cancel(cancelled)
                .enumerate(&PathSpec::parse("host:/data/"))
                .expect("enumerate"),
        );
        assert_eq!(listing.files(), ["a"]);
    }
}
