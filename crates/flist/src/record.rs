//! crates/flist/src/record.rs
//! Parser for `rsync --list-only` output lines.

use std::sync::OnceLock;

use regex::Regex;

/// One entry from a directory listing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListEntry {
    is_directory: bool,
    name: String,
}

impl ListEntry {
    /// Creates an entry.
    #[must_use]
    pub fn new(is_directory: bool, name: impl Into<String>) -> Self {
        Self {
            is_directory,
            name: name.into(),
        }
    }

    /// Reports whether the permission string marked a directory.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        self.is_directory
    }

    /// Returns the entry name as listed, relative to the listed directory.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reports whether the entry names the listed directory itself.
    #[must_use]
    pub fn is_self(&self) -> bool {
        self.name == "."
    }
}

fn record_pattern() -> &'static Regex {
    static RECORD_RE: OnceLock<Regex> = OnceLock::new();
    RECORD_RE.get_or_init(|| {
        Regex::new(
            r"^([dlcbps-])[rwxsStT-]{9}\S*\s+[0-9,.]+\s+\d+/\d+/\d+\s+\d+:\d+:\d+ (.+)$",
        )
        .expect("valid regex")
    })
}

/// Parses a listing line of the form
/// `<permissions> <size> <YYYY/MM/DD> <HH:MM:SS> <name>`.
///
/// The name is everything after the single space following the time, so
/// embedded and leading spaces survive. Symlink entries have their
/// ` -> target` suffix removed. Returns `None` when the line does not match.
///
/// ```
/// use flist::parse_record;
///
/// let entry = parse_record("drwxr-xr-x          4,096 2024/03/01 10:15:00 photos").unwrap();
/// assert!(entry.is_directory());
/// assert_eq!(entry.name(), "photos");
/// ```
#[must_use]
pub fn parse_record(line: &str) -> Option<ListEntry> {
    let captures = record_pattern().captures(line)?;
    let kind = captures.get(1)?.as_str();
    let mut name = captures.get(2)?.as_str();
    if kind == "l"
        && let Some(arrow) = name.find(" -> ")
    {
        name = &name[..arrow];
    }
    Some(ListEntry::new(kind == "d", name))
}
