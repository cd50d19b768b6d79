//! Layered driver configuration

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use figment::Figment;
use figment::providers::{Env, Format as _, Serialized, Toml};
use lenstr_log::WriterConfig;
use serde::{Deserialize, Serialize};

/// Bump heap capacity when none is configured
pub const DEFAULT_HEAP_SIZE: usize = 64 * 1024;

/// Driver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Allocator backend
    pub heap: HeapConfig,
    /// Logger setup
    pub log: lenstr_log::Config,
}

/// Allocator backend selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeapConfig {
    /// Backend kind
    pub kind: HeapKind,
    /// Capacity in bytes, used by the bump heap
    pub size: usize,
}

/// Allocator backend kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HeapKind {
    /// Process heap
    #[default]
    System,
    /// Fixed-capacity bump heap
    Bump,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            heap: HeapConfig::default(),
            log: lenstr_log::Config::default().with_level("warn"),
        }
    }
}

impl Default for HeapConfig {
    fn default() -> Self {
        Self {
            kind: HeapKind::default(),
            size: DEFAULT_HEAP_SIZE,
        }
    }
}

impl AppConfig {
    /// Defaults, then the TOML file at `path`, then `LENSTR_*` variables.
    ///
    /// When `LENSTR_LOG` or `RUST_LOG` is set, the logging defaults come from
    /// [`lenstr_log::Config::from_env`] instead, so the file and the nested
    /// `LENSTR_LOG__*` keys still override them. Nested keys use `__` in
    /// variable names (`LENSTR_HEAP__SIZE`).
    ///
    /// Log records must not share stdout with the joined bytes, so a
    /// `stdout` log writer is rejected.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut defaults = Self::default();
        if lenstr_log::Config::env_level_set() {
            defaults.log = lenstr_log::Config::from_env();
        }

        let mut figment = Figment::from(Serialized::defaults(defaults));

        if let Some(path) = path {
            if !path.is_file() {
                bail!("config file not found: {}", path.display());
            }
            figment = figment.merge(Toml::file(path));
        }

        let config: Self = figment
            .merge(Env::prefixed("LENSTR_").split("__").ignore(&["log"]))
            .extract()
            .context("invalid configuration")?;

        if config.log.writer != WriterConfig::Stderr {
            bail!("log writer must be stderr: stdout carries only the joined bytes");
        }
        Ok(config)
    }
}
