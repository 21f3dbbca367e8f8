//! crates/logging/src/tracing_bridge.rs
//! Installs the global `tracing` subscriber.

use std::io;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

use super::config::VerbosityConfig;

/// Environment variable whose value replaces the computed filter directives.
pub const LOG_ENV: &str = "PRSYNC_LOG";

/// Picks the directives to install: a non-blank override, or the config's.
#[must_use]
pub fn filter_directives(config: &VerbosityConfig, env_override: Option<&str>) -> String {
    match env_override.map(str::trim) {
        Some(directives) if !directives.is_empty() => directives.to_owned(),
        _ => config.directives(),
    }
}

/// Builds the `EnvFilter` for `config`, honouring [`LOG_ENV`].
#[must_use]
pub fn build_filter(config: &VerbosityConfig) -> EnvFilter {
    let env_override = std::env::var(LOG_ENV).ok();
    let directives = filter_directives(config, env_override.as_deref());
    EnvFilter::try_new(&directives).unwrap_or_else(|error| {
        eprintln!("prsync: ignoring invalid {LOG_ENV} value '{directives}': {error}");
        EnvFilter::new(config.directives())
    })
}

/// Installs a subscriber that writes filtered events to standard error.
///
/// Fails only when a global subscriber is already installed.
///
/// ```
/// use logging::{VerbosityConfig, init_tracing};
///
/// let first = init_tracing(VerbosityConfig::from_verbose_level(2));
/// assert!(first.is_ok());
/// assert!(init_tracing(VerbosityConfig::default()).is_err());
/// tracing::debug!(target: "prsync::flist", "listing started");
/// ```
pub fn init_tracing(config: VerbosityConfig) -> Result<(), TryInitError> {
    init_tracing_with_writer(config, io::stderr)
}

/// Like [`init_tracing`], with events sent to `writer` instead of stderr.
pub fn init_tracing_with_writer<W>(config: VerbosityConfig, writer: W) -> Result<(), TryInitError>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(build_filter(&config))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .without_time()
                .with_target(config.max_level() > tracing::level_filters::LevelFilter::INFO),
        )
        .try_init()
}
