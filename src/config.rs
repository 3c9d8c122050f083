// =============================================================================
// CONFIGURATION - Optional settings file passed with --config
// =============================================================================
//
// Only ambient settings live here; the generated output has no knobs.
// Nothing is looked up implicitly: without --config the defaults apply.

use anyhow::{Context, Result};
use log::Level;
use serde::Deserialize;
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub log: LogConfig,
}

/// Logging settings
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration, falling back to defaults on any error.
    ///
    /// Runs before the logger exists, so what happened is handed back as
    /// log records for the caller to emit once logging is up.
    pub fn load(path: Option<&Path>) -> (Self, Vec<(Level, String)>) {
        let mut notes = Vec::new();

        let Some(path) = path else {
            notes.push((Level::Debug, "No config file given, using defaults".to_string()));
            return (Config::default(), notes);
        };

        if !path.exists() {
            notes.push((Level::Warn, format!("Config file not found at {:?}, using defaults", path)));
            return (Config::default(), notes);
        }

        let config = match Self::load_from_path(path) {
            Ok(config) => {
                notes.push((Level::Info, format!("Loaded configuration from {:?}", path)));
                notes.push((Level::Debug, format!("Config: {:?}", config)));
                config
            }
            Err(e) => {
                notes.push((Level::Warn, format!("{:#}. Using defaults.", e)));
                Config::default()
            }
        };

        (config, notes)
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Get log level as a `log` filter, `None` if the name is unknown
    pub fn level_filter(&self) -> Option<log::LevelFilter> {
        match self.log.level.to_lowercase().as_str() {
            "off" => Some(log::LevelFilter::Off),
            "error" => Some(log::LevelFilter::Error),
            "warn" => Some(log::LevelFilter::Warn),
            "info" => Some(log::LevelFilter::Info),
            "debug" => Some(log::LevelFilter::Debug),
            "trace" => Some(log::LevelFilter::Trace),
            _ => None,
        }
    }
}
