#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` turns rsync-style verbosity flags into `tracing` filters. Every
//! prsync crate logs through the `tracing` macros with one of four stable
//! targets ([`LogTarget`]); this crate decides which of those events reach
//! standard error.
//!
//! # Design
//!
//! [`VerbosityConfig`] holds one [`LevelFilter`](tracing::level_filters::LevelFilter)
//! per target. [`VerbosityConfig::from_verbose_level`] maps the `-v` count,
//! [`VerbosityConfig::quiet`] covers `-q`. [`init_tracing`] renders the config
//! as `EnvFilter` directives and installs a `tracing-subscriber` registry with
//! a plain-text `fmt` layer. Setting `PRSYNC_LOG` replaces the directives
//! wholesale, using the usual `EnvFilter` syntax.
//!
//! # Invariants
//!
//! - Raising the `-v` count never lowers the level of any target.
//! - `-q` wins over `-v`: only errors are emitted.
//!
//! # Errors
//!
//! [`init_tracing`] fails only when a global subscriber already exists. An
//! unparsable `PRSYNC_LOG` is reported once and ignored.
//!
//! # Examples
//!
//! ```
//! use logging::{LogTarget, VerbosityConfig};
//! use tracing::level_filters::LevelFilter;
//!
//! let config = VerbosityConfig::from_flags(2, false);
//! assert_eq!(config.level(LogTarget::Cmd), LevelFilter::DEBUG);
//! assert_eq!(config.level(LogTarget::Progress), LevelFilter::INFO);
//! ```

mod config;
mod levels;
mod tracing_bridge;

pub use config::VerbosityConfig;
pub use levels::{LogTarget, UnknownTarget};
pub use tracing_bridge::{
    LOG_ENV, build_filter, filter_directives, init_tracing, init_tracing_with_writer,
};
