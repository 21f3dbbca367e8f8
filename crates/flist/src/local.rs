//! crates/flist/src/local.rs
//! Deterministic breadth-first walk of a local source tree.

use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};
use transport::{join_path, parent_dir};

use crate::error::FlistError;
use crate::listing::{FileListing, SkippedPath};

/// Enumerates every regular file and symlink under the local path `root`.
///
/// Entries are visited breadth-first with each directory's children sorted
/// by name. Symlinks are listed, never followed. As with `rsync`, a trailing
/// `/` selects the directory's contents; without it names are prefixed with
/// the directory's own name.
///
/// # Errors
///
/// Fails when `root` itself cannot be inspected. Subdirectories that cannot
/// be read are recorded in [`FileListing::skipped`].
pub fn walk_local(root: &str) -> Result<FileListing, FlistError> {
    let root = if root == "." { "./" } else { root };
    let base = parent_dir(root).to_owned();
    let metadata = fs::symlink_metadata(root).map_err(|source| FlistError::LocalRoot {
        path: PathBuf::from(root),
        source,
    })?;

    if !metadata.is_dir() {
        return Ok(FileListing::from_paths(base, vec![root.to_owned()], Vec::new()));
    }

    let mut queue = VecDeque::from([root.to_owned()]);
    let mut files = Vec::new();
    let mut skipped = Vec::new();

    while let Some(dir) = queue.pop_front() {
        let children = match read_sorted(&dir) {
            Ok(children) => children,
            Err(error) => {
                warn!(target: "prsync::flist", path = %dir, "error reading directory: {error}");
                skipped.push(SkippedPath {
                    path: dir,
                    reason: error.to_string(),
                });
                continue;
            }
        };
        for (name, file_type) in children {
            let path = join_path(&dir, &name);
            if file_type.is_dir() {
                queue.push_back(path);
            } else if file_type.is_file() || file_type.is_symlink() {
                files.push(path);
            } else {
                debug!(target: "prsync::flist", path = %path, "skipping special file");
            }
        }
    }

    Ok(FileListing::from_paths(base, files, skipped))
}

fn read_sorted(dir: &str) -> std::io::Result<Vec<(String, fs::FileType)>> {
    let mut children = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        match entry.file_name().into_string() {
            Ok(name) => children.push((name, file_type)),
            Err(raw) => {
                warn!(target: "prsync::flist", dir, name = ?raw, "skipping non UTF-8 file name");
            }
        }
    }
    children.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(children)
}
