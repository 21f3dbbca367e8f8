//! crates/logging/src/levels.rs
//! Log targets emitted by the prsync crates.

use std::fmt;
use std::str::FromStr;

use tracing::level_filters::LevelFilter;

/// A `tracing` target used by one area of the program.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LogTarget {
    /// Source enumeration: listings, wildcard expansion, local walks.
    Flist,
    /// Job lifecycle and scheduler decisions.
    Transfer,
    /// Raw progress lines read from transfer processes.
    Progress,
    /// External commands about to be executed.
    Cmd,
}

impl LogTarget {
    /// Every target, in the order directives are rendered.
    pub const ALL: [Self; 4] = [Self::Flist, Self::Transfer, Self::Progress, Self::Cmd];

    /// Returns the target string passed to the `tracing` macros.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flist => "prsync::flist",
            Self::Transfer => "prsync::transfer",
            Self::Progress => "prsync::progress",
            Self::Cmd => "prsync::cmd",
        }
    }

    /// Maps an event target back to a [`LogTarget`].
    ///
    /// Nested targets such as `prsync::flist::remote` resolve to their prefix.
    #[must_use]
    pub fn from_target(target: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|candidate| {
            target
                .strip_prefix(candidate.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
        })
    }
}

impl fmt::Display for LogTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a target name is not recognised.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownTarget(pub String);

impl fmt::Display for UnknownTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log target '{}'", self.0)
    }
}

impl std::error::Error for UnknownTarget {}

impl FromStr for LogTarget {
    type Err = UnknownTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "flist" => Ok(Self::Flist),
            "transfer" => Ok(Self::Transfer),
            "progress" => Ok(Self::Progress),
            "cmd" => Ok(Self::Cmd),
            other => Self::from_target(other).ok_or_else(|| UnknownTarget(s.to_owned())),
        }
    }
}

/// Lowercase directive spelling of a level filter.
pub(crate) fn level_name(level: LevelFilter) -> &'static str {
    if level == LevelFilter::OFF {
        "off"
    } else if level == LevelFilter::ERROR {
        "error"
    } else if level == LevelFilter::WARN {
        "warn"
    } else if level == LevelFilter::INFO {
        "info"
    } else if level == LevelFilter::DEBUG {
        "debug"
    } else {
        "trace"
    }
}
