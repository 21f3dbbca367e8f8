//! crates/flist/src/files_from.rs
//! Explicit file lists (`--files-from`).

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::debug;
use transport::PathSpec;

use crate::error::FilesFromError;
use crate::listing::FileListing;

/// Splits a files-from list into relative names.
///
/// Records are separated by newlines, or by NUL bytes when
/// `nul_separated` is set. Carriage returns before a newline, leading `./`
/// and leading `/` are removed; blank records are dropped.
pub fn parse_files_from(bytes: &[u8], nul_separated: bool) -> Result<Vec<String>, FilesFromError> {
    let separator = if nul_separated { b'\0' } else { b'\n' };
    let mut names = Vec::new();
    for (index, record) in bytes.split(|byte| *byte == separator).enumerate() {
        let text = std::str::from_utf8(record)
            .map_err(|_| FilesFromError::Encoding { index: index + 1 })?;
        let text = if nul_separated {
            text
        } else {
            text.strip_suffix('\r').unwrap_or(text)
        };
        let mut name = text;
        while let Some(rest) = name.strip_prefix("./") {
            name = rest;
        }
        let name = name.trim_start_matches('/');
        if !name.is_empty() {
            names.push(name.to_owned());
        }
    }
    Ok(names)
}

/// Reads a files-from list and combines it with `source` as the base.
///
/// `list` names the file to read; `-` reads standard input.
pub fn read_files_from(
    source: &PathSpec,
    list: &Path,
    nul_separated: bool,
) -> Result<FileListing, FilesFromError> {
    let mut bytes = Vec::new();
    if list.as_os_str() == "-" {
        io::stdin()
            .lock()
            .read_to_end(&mut bytes)
            .map_err(|source| FilesFromError::Read { source })?;
    } else {
        File::open(list)
            .map_err(|source| FilesFromError::Open {
                path: list.to_path_buf(),
                source,
            })?
            .read_to_end(&mut bytes)
            .map_err(|source| FilesFromError::Read { source })?;
    }

    let names = parse_files_from(&bytes, nul_separated)?;
    debug!(target: "prsync::flist", records = names.len(), "read files-from list");
    Ok(FileListing::from_relative(base_of(source.path()), names))
}

fn base_of(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() && path.starts_with('/') {
        "/"
    } else {
        trimmed
    }
}
