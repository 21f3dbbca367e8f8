//! crates/flist/src/wildcard.rs
//! Single-segment `*` wildcards.

use regex::Regex;

/// Reports whether `segment` contains the `*` wildcard.
#[must_use]
pub fn contains_wildcard(segment: &str) -> bool {
    segment.contains('*')
}

/// Translates a wildcard into an anchored regular expression source.
///
/// Every character other than `*` matches literally; `*` matches any
/// (possibly empty) sequence.
///
/// ```
/// assert_eq!(flist::translate_wildcard("v1.*"), r"^v1\..*$");
/// ```
#[must_use]
pub fn translate_wildcard(pattern: &str) -> String {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    format!("^{body}$")
}

/// Compiled wildcard matched against whole entry names.
#[derive(Clone, Debug)]
pub struct WildcardPattern {
    pattern: String,
    regex: Regex,
}

impl WildcardPattern {
    /// Compiles `pattern`.
    ///
    /// # Errors
    ///
    /// Fails only when the translated expression exceeds the regex size
    /// limit, which requires a pathologically long pattern.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: pattern.to_owned(),
            regex: Regex::new(&translate_wildcard(pattern))?,
        })
    }

    /// Returns the wildcard as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Reports whether `name` matches the whole pattern.
    #[must_use]
    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}
