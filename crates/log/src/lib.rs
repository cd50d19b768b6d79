//! # lenstr-log
//!
//! Logger setup shared by the lenstr crates.
//!
//! ```rust,no_run
//! use lenstr_log::{Config, Format, info};
//!
//! let _guard = lenstr_log::init_with(Config::default().with_format(Format::Json))?;
//! info!(bytes = 14, "ready");
//! # Ok::<(), lenstr_log::LogError>(())
//! ```
//!
//! Library crates only emit events through the re-exported macros; the
//! binary decides whether a subscriber is installed at all.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod builder;
mod config;
mod error;
mod writer;

pub use builder::{LoggerBuilder, LoggerGuard};
pub use config::{Config, DisplayConfig, Format, WriterConfig};
pub use error::{LogError, LogResult};

// Re-export tracing macros
pub use tracing::{debug, error, info, trace, warn};

/// Initialize with default configuration
///
/// # Errors
///
/// See [`LoggerBuilder::build`].
pub fn init() -> LogResult<LoggerGuard> {
    init_with(Config::default())
}

/// Initialize with custom configuration
///
/// # Errors
///
/// See [`LoggerBuilder::build`].
pub fn init_with(config: Config) -> LogResult<LoggerGuard> {
    LoggerBuilder::from_config(config).build()
}

/// Pick a configuration from the environment and build type
///
/// `LENSTR_LOG` or `RUST_LOG` selects [`Config::from_env`]; otherwise debug
/// builds get [`Config::development`] and release builds
/// [`Config::production`]. Returns a [`LoggerGuard::noop`] when a logger is
/// already installed.
///
/// # Errors
///
/// See [`LoggerBuilder::build`].
pub fn auto_init() -> LogResult<LoggerGuard> {
    if tracing::dispatcher::has_been_set() {
        return Ok(LoggerGuard::noop());
    }

    let config = if Config::env_level_set() {
        Config::from_env()
    } else if cfg!(debug_assertions) {
        Config::development()
    } else {
        Config::production()
    };
    init_with(config)
}
