//! Configuration types and presets

use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

/// Variables holding a level directive, in precedence order
const LEVEL_VARS: [&str; 2] = ["LENSTR_LOG", "RUST_LOG"];

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Level filter directive (e.g. "info", "lenstr_memory=trace,warn")
    pub level: String,

    /// Output format
    pub format: Format,

    /// Where events are written
    pub writer: WriterConfig,

    /// Display options
    pub display: DisplayConfig,
}

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Multi-line, human-readable
    Pretty,
    /// Single-line
    #[default]
    Compact,
    /// One JSON object per event
    Json,
}

/// Writer configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WriterConfig {
    /// Write to stderr
    #[default]
    Stderr,
    /// Write to stdout
    Stdout,
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show timestamps
    pub time: bool,
    /// Show source location (file:line)
    pub source: bool,
    /// Show target module
    pub target: bool,
    /// Use ANSI colors
    pub colors: bool,
}

// ============================================================================
// Implementations
// ============================================================================

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: Format::default(),
            writer: WriterConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            time: true,
            source: cfg!(debug_assertions),
            target: true,
            colors: std::io::stderr().is_terminal(),
        }
    }
}

impl Config {
    /// Configuration from `LENSTR_LOG` (or `RUST_LOG`) and `LENSTR_LOG_FORMAT`
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Whether `LENSTR_LOG` or `RUST_LOG` is set
    pub fn env_level_set() -> bool {
        LEVEL_VARS
            .iter()
            .any(|name| std::env::var_os(name).is_some())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = LEVEL_VARS.iter().find_map(|name| var(name)) {
            config.level = level;
        }

        if let Some(format) = var("LENSTR_LOG_FORMAT") {
            config.format = match format.to_lowercase().as_str() {
                "pretty" => Format::Pretty,
                "json" => Format::Json,
                _ => Format::Compact,
            };
        }

        config
    }

    /// Development configuration (pretty, debug level)
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            format: Format::Pretty,
            display: DisplayConfig {
                source: true,
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }

    /// Production configuration (JSON, info level)
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            format: Format::Json,
            display: DisplayConfig {
                colors: false,
                source: false,
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }

    /// Replace the level directive
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Replace the output format
    #[must_use]
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn vars<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_string())
        }
    }

    #[test]
    fn env_prefers_own_variable() {
        let config = Config::from_vars(vars(&[("LENSTR_LOG", "trace"), ("RUST_LOG", "warn")]));
        assert_eq!(config.level, "trace");
    }

    #[test]
    fn env_falls_back_to_rust_log() {
        let config = Config::from_vars(vars(&[("RUST_LOG", "warn")]));
        assert_eq!(config.level, "warn");
    }

    #[rstest]
    #[case("json", Format::Json)]
    #[case("PRETTY", Format::Pretty)]
    #[case("compact", Format::Compact)]
    #[case("logfmt", Format::Compact)]
    fn env_format(#[case] raw: &str, #[case] expected: Format) {
        let config = Config::from_vars(vars(&[("LENSTR_LOG_FORMAT", raw)]));
        assert_eq!(config.format, expected);
    }

    #[test]
    fn empty_env_is_default() {
        assert_eq!(Config::from_vars(|_| None), Config::default());
    }

    #[test]
    fn presets() {
        let dev = Config::development();
        assert_eq!(dev.level, "debug");
        assert_eq!(dev.format, Format::Pretty);
        assert!(dev.display.source);

        let prod = Config::production();
        assert_eq!(prod.format, Format::Json);
        assert!(!prod.display.colors);
    }

    #[test]
    fn partial_documents_fill_defaults() {
        let config: Config = serde_json::from_str(
            r#"{
                "level": "lenstr_memory=trace",
                "format": "json",
                "writer": { "type": "stdout" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.level, "lenstr_memory=trace");
        assert_eq!(config.format, Format::Json);
        assert_eq!(config.writer, WriterConfig::Stdout);
        assert_eq!(config.display, DisplayConfig::default());
    }
}
