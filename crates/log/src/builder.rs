//! Logger builder implementation

use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::config::{Config, Format};
use crate::error::{LogError, LogResult};
use crate::writer;

type FilteredRegistry = Layered<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync + 'static>;

/// Format layer with the display options applied, boxed so every format
/// shares one subscriber type.
macro_rules! create_fmt_layer {
    ($layer:expr, $display:expr, $writer:expr) => {{
        let layer = $layer
            .with_writer($writer)
            .with_ansi($display.colors)
            .with_target($display.target)
            .with_file($display.source)
            .with_line_number($display.source);

        if $display.time {
            Box::new(layer) as BoxedLayer
        } else {
            Box::new(layer.without_time()) as BoxedLayer
        }
    }};
}

/// Logger builder
#[derive(Debug)]
pub struct LoggerBuilder {
    config: Config,
}

/// Guard returned by a successful initialization
///
/// The global subscriber lives for the rest of the process; the guard marks
/// which caller installed it.
#[derive(Debug)]
#[must_use = "dropping the guard right away hides which caller owns the logger"]
pub struct LoggerGuard {
    active: bool,
}

impl LoggerGuard {
    /// Guard for a call that found a logger already installed
    pub const fn noop() -> Self {
        Self { active: false }
    }

    /// Whether this guard belongs to the call that installed the logger
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

impl LoggerBuilder {
    /// Create builder from config
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// The filter this builder would install
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Filter`] if the level directive cannot be parsed.
    pub fn filter(&self) -> LogResult<EnvFilter> {
        EnvFilter::try_new(&self.config.level)
            .map_err(|e| LogError::filter(&self.config.level, e))
    }

    /// Build and install the global logger
    ///
    /// # Errors
    ///
    /// - [`LogError::Filter`] if the level directive cannot be parsed
    /// - [`LogError::AlreadyInitialized`] if a global subscriber exists
    pub fn build(self) -> LogResult<LoggerGuard> {
        let filter = self.filter()?;
        let writer = writer::make_writer(self.config.writer);
        let display = &self.config.display;

        let fmt_layer = match self.config.format {
            Format::Pretty => {
                create_fmt_layer!(tracing_subscriber::fmt::layer().pretty(), display, writer)
            }
            Format::Compact => {
                create_fmt_layer!(tracing_subscriber::fmt::layer().compact(), display, writer)
            }
            Format::Json => create_fmt_layer!(
                tracing_subscriber::fmt::layer().json().flatten_event(true),
                display,
                writer
            ),
        };

        Registry::default()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|_| LogError::AlreadyInitialized)?;

        tracing::debug!(
            level = %self.config.level,
            format = ?self.config.format,
            "logger initialized"
        );

        Ok(LoggerGuard { active: true })
    }
}
