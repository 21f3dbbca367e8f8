//! crates/logging/src/config.rs
//! Per-target verbosity derived from `-v` and `-q`.

use tracing::level_filters::LevelFilter;

use super::levels::{LogTarget, level_name};

/// Level applied to each [`LogTarget`], plus the level for everything else.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VerbosityConfig {
    /// Level for events outside the prsync targets.
    pub default: LevelFilter,
    /// Level for [`LogTarget::Flist`].
    pub flist: LevelFilter,
    /// Level for [`LogTarget::Transfer`].
    pub transfer: LevelFilter,
    /// Level for [`LogTarget::Progress`].
    pub progress: LevelFilter,
    /// Level for [`LogTarget::Cmd`].
    pub cmd: LevelFilter,
}

impl Default for VerbosityConfig {
    fn default() -> Self {
        Self::from_verbose_level(0)
    }
}

impl VerbosityConfig {
    /// Maps a count of `-v` flags onto target levels.
    ///
    /// | level | flist | transfer | progress | cmd   |
    /// |-------|-------|----------|----------|-------|
    /// | 0     | warn  | warn     | warn     | warn  |
    /// | 1     | info  | info     | warn     | warn  |
    /// | 2     | debug | debug    | info     | debug |
    /// | 3+    | trace | trace    | trace    | trace |
    #[must_use]
    pub const fn from_verbose_level(level: u8) -> Self {
        let (flist, transfer, progress, cmd) = match level {
            0 => (LevelFilter::WARN, LevelFilter::WARN, LevelFilter::WARN, LevelFilter::WARN),
            1 => (LevelFilter::INFO, LevelFilter::INFO, LevelFilter::WARN, LevelFilter::WARN),
            2 => (LevelFilter::DEBUG, LevelFilter::DEBUG, LevelFilter::INFO, LevelFilter::DEBUG),
            _ => (LevelFilter::TRACE, LevelFilter::TRACE, LevelFilter::TRACE, LevelFilter::TRACE),
        };
        Self {
            default: LevelFilter::WARN,
            flist,
            transfer,
            progress,
            cmd,
        }
    }

    /// Errors only, for `-q`.
    #[must_use]
    pub const fn quiet() -> Self {
        Self {
            default: LevelFilter::ERROR,
            flist: LevelFilter::ERROR,
            transfer: LevelFilter::ERROR,
            progress: LevelFilter::ERROR,
            cmd: LevelFilter::ERROR,
        }
    }

    /// Resolves the command-line pair; `-q` wins over any `-v`.
    #[must_use]
    pub const fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            Self::quiet()
        } else {
            Self::from_verbose_level(verbose)
        }
    }

    /// Returns the level configured for `target`.
    #[must_use]
    pub const fn level(&self, target: LogTarget) -> LevelFilter {
        match target {
            LogTarget::Flist => self.flist,
            LogTarget::Transfer => self.transfer,
            LogTarget::Progress => self.progress,
            LogTarget::Cmd => self.cmd,
        }
    }

    /// Overrides the level of a single target.
    #[must_use]
    pub const fn with_level(mut self, target: LogTarget, level: LevelFilter) -> Self {
        match target {
            LogTarget::Flist => self.flist = level,
            LogTarget::Transfer => self.transfer = level,
            LogTarget::Progress => self.progress = level,
            LogTarget::Cmd => self.cmd = level,
        }
        self
    }

    /// Renders the configuration as `EnvFilter` directives.
    ///
    /// ```
    /// use logging::VerbosityConfig;
    ///
    /// assert_eq!(
    ///     VerbosityConfig::from_verbose_level(1).directives(),
    ///     "warn,prsync::flist=info,prsync::transfer=info,prsync::progress=warn,prsync::cmd=warn"
    /// );
    /// ```
    #[must_use]
    pub fn directives(&self) -> String {
        let mut rendered = String::from(level_name(self.default));
        for target in LogTarget::ALL {
            rendered.push(',');
            rendered.push_str(target.as_str());
            rendered.push('=');
            rendered.push_str(level_name(self.level(target)));
        }
        rendered
    }

    /// Most verbose level across all targets.
    #[must_use]
    pub fn max_level(&self) -> LevelFilter {
        LogTarget::ALL
            .into_iter()
            .map(|target| self.level(target))
            .fold(self.default, |widest, level| widest.max(level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_level_zero() {
        assert_eq!(VerbosityConfig::default(), VerbosityConfig::from_verbose_level(0));
        assert_eq!(VerbosityConfig::default().max_level(), LevelFilter::WARN);
    }

    #[test]
    fn levels_grow_with_verbosity() {
        for target in LogTarget::ALL {
            let mut previous = LevelFilter::OFF;
            for level in 0..=4 {
                let current = VerbosityConfig::from_verbose_level(level).level(target);
                assert!(current >= previous, "{target} shrank at -v x{level}");
                previous = current;
            }
        }
    }

    #[test]
    fn quiet_overrides_verbose() {
        let config = VerbosityConfig::from_flags(3, true);
        assert_eq!(config, VerbosityConfig::quiet());
        assert_eq!(config.max_level(), LevelFilter::ERROR);
    }

    #[test]
    fn single_target_override() {
        let config = VerbosityConfig::default().with_level(LogTarget::Cmd, LevelFilter::DEBUG);
        assert_eq!(config.cmd, LevelFilter::DEBUG);
        assert_eq!(config.flist, LevelFilter::WARN);
        assert!(config.directives().ends_with("prsync::cmd=debug"));
    }
}
