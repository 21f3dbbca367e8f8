//! crates/flist/src/listing.rs
//! The enumeration result shared by every lister.

use std::collections::HashSet;

use tracing::warn;
use transport::relative_to;

/// A directory that could not be listed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SkippedPath {
    /// Operand whose listing failed.
    pub path: String,
    /// Diagnostic text reported for it.
    pub reason: String,
}

/// Ordered, de-duplicated file names relative to a common base.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FileListing {
    base: String,
    files: Vec<String>,
    skipped: Vec<SkippedPath>,
}

impl FileListing {
    /// Builds a listing from absolute (base-prefixed) paths.
    ///
    /// Each path is made relative to `base`; duplicates keep their first
    /// position. A path outside `base` is dropped with a warning.
    #[must_use]
    pub fn from_paths(
        base: impl Into<String>,
        paths: Vec<String>,
        skipped: Vec<SkippedPath>,
    ) -> Self {
        let base = base.into();
        let mut seen = HashSet::with_capacity(paths.len());
        let mut files = Vec::with_capacity(paths.len());
        for path in &paths {
            match relative_to(path, &base) {
                Some(relative) => {
                    if seen.insert(relative) {
                        files.push(relative.to_owned());
                    }
                }
                None => {
                    warn!(target: "prsync::flist", path = %path, base = %base, "listed path lies outside the base");
                }
            }
        }
        Self {
            base,
            files,
            skipped,
        }
    }

    /// Builds a listing from names that are already relative to `base`.
    #[must_use]
    pub fn from_relative(base: impl Into<String>, names: Vec<String>) -> Self {
        let mut seen = HashSet::with_capacity(names.len());
        let files = names
            .into_iter()
            .filter(|name| !name.is_empty() && seen.insert(name.clone()))
            .collect();
        Self {
            base: base.into(),
            files,
            skipped: Vec::new(),
        }
    }

    /// Returns the directory the file names are relative to.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Returns the relative file names in enumeration order.
    #[must_use]
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Returns the directories whose contents could not be listed.
    #[must_use]
    pub fn skipped(&self) -> &[SkippedPath] {
        &self.skipped
    }

    /// Returns the number of files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Reports whether no files were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
