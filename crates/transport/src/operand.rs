//! crates/transport/src/operand.rs
//! Operand decomposition and `/`-separated path arithmetic.

use std::ffi::OsString;
use std::fmt;

/// Decomposed path expression: an optional remote host and a filesystem path.
///
/// A spec with a host is remote; [`Display`](fmt::Display) rebuilds the
/// `host:path` form expected by `rsync` operands.
///
/// # Examples
///
/// ```
/// use transport::PathSpec;
///
/// let remote = PathSpec::parse("nas:/srv/photos");
/// assert!(remote.is_remote());
/// assert_eq!(remote.to_string(), "nas:/srv/photos");
///
/// let local = PathSpec::parse("./dir:with-colon/file");
/// assert!(!local.is_remote());
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct PathSpec {
    host: Option<String>,
    path: String,
}

impl PathSpec {
    /// Parses a path expression using rsync's operand rule.
    ///
    /// The expression is split on its first colon. When that colon appears
    /// before any `/`, the left-hand side names the remote host and the rest
    /// is the path. Otherwise the whole expression is a local path.
    #[must_use]
    pub fn parse(expression: &str) -> Self {
        if let Some(colon) = expression.find(':') {
            let host = &expression[..colon];
            if !host.contains('/') {
                return Self::remote(host, &expression[colon + 1..]);
            }
        }
        Self::local(expression)
    }

    /// Creates a local spec.
    #[must_use]
    pub fn local(path: impl Into<String>) -> Self {
        Self {
            host: None,
            path: path.into(),
        }
    }

    /// Creates a remote spec for `host`.
    #[must_use]
    pub fn remote(host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            path: path.into(),
        }
    }

    /// Returns the remote host, if any.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Returns the path component.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Reports whether the spec names a remote location.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.host.is_some()
    }

    /// Returns a spec on the same host with `path` replaced.
    #[must_use]
    pub fn with_path(&self, path: impl Into<String>) -> Self {
        Self {
            host: self.host.clone(),
            path: path.into(),
        }
    }

    /// Appends a relative name to the path.
    #[must_use]
    pub fn join(&self, relative: &str) -> Self {
        self.with_path(join_path(&self.path, relative))
    }

    /// Returns the parent directory using `dirname` semantics.
    ///
    /// A trailing slash names the directory itself, so the parent of
    /// `/data/` is `/data` while the parent of `/data` is `/`.
    #[must_use]
    pub fn parent(&self) -> Self {
        self.with_path(parent_dir(&self.path))
    }

    /// Returns the spec with a trailing `/`, marking it as a directory operand.
    #[must_use]
    pub fn as_directory(&self) -> Self {
        if self.path.is_empty() || self.path.ends_with('/') {
            return self.clone();
        }
        self.with_path(format!("{}/", self.path))
    }

    /// Returns the text after the final `/`, ignoring a trailing slash.
    #[must_use]
    pub fn final_segment(&self) -> &str {
        let trimmed = self.path.trim_end_matches('/');
        trimmed.rsplit('/').next().unwrap_or(trimmed)
    }

    /// Renders the spec as a command-line operand.
    #[must_use]
    pub fn to_operand(&self) -> OsString {
        OsString::from(self.to_string())
    }
}

impl fmt::Display for PathSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.host {
            Some(host) => write!(f, "{host}:{}", self.path),
            None => f.write_str(&self.path),
        }
    }
}

impl From<&str> for PathSpec {
    fn from(expression: &str) -> Self {
        Self::parse(expression)
    }
}

/// Joins `name` onto `base` with exactly one `/` between them.
///
/// An empty base yields `name` unchanged.
#[must_use]
pub fn join_path(base: &str, name: &str) -> String {
    if base.is_empty() {
        return name.to_owned();
    }
    if base.ends_with('/') {
        format!("{base}{name}")
    } else {
        format!("{base}/{name}")
    }
}

/// Returns everything before the final `/`, with trailing slashes removed.
///
/// Mirrors POSIX `dirname` on strings: `"/data/"` → `"/data"`,
/// `"/data"` → `"/"`, `"data"` → `""`.
#[must_use]
pub fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        None => "",
        Some(index) => {
            let head = &path[..=index];
            let trimmed = head.trim_end_matches('/');
            if trimmed.is_empty() { head } else { trimmed }
        }
    }
}

/// Strips `base` from the front of `path`, returning the relative remainder.
///
/// Returns `None` when `path` does not live under `base` or equals it.
#[must_use]
pub fn relative_to<'a>(path: &'a str, base: &str) -> Option<&'a str> {
    if base.is_empty() {
        return Some(path);
    }
    let rest = path.strip_prefix(base)?;
    let rest = if base.ends_with('/') {
        rest
    } else {
        rest.strip_prefix('/')?
    };
    if rest.is_empty() { None } else { Some(rest) }
}
