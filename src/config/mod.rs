//! Configuration loading
//!
//! The config file is optional and read-only: the mockup never writes it.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default tick interval for the TUI loop.
const DEFAULT_TICK_RATE_MS: u64 = 250;

/// Default number of lines kept in the debug log pane.
const DEFAULT_LOG_HISTORY: usize = 1000;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name shown for the local participant in the header bar
    pub display_name: String,
    /// Format new message timestamps as 24-hour "HH:MM"
    pub clock_24h: bool,
    /// Interval between UI ticks when no input arrives
    pub tick_rate_ms: u64,
    /// Lines of captured log output kept for the debug pane
    pub log_history: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display_name: "You".to_string(),
            clock_24h: false,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            log_history: DEFAULT_LOG_HISTORY,
        }
    }
}

impl Config {
    /// Get config file path in the platform config directory
    fn default_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "chat-mockup", "chat-mockup")
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from `path`, or from the default location.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };

        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config.sanitized())
    }

    /// strftime pattern for timestamps of newly sent messages.
    pub fn time_format(&self) -> &'static str {
        if self.clock_24h {
            "%H:%M"
        } else {
            "%I:%M %p"
        }
    }

    fn sanitized(mut self) -> Self {
        if self.tick_rate_ms == 0 {
            self.tick_rate_ms = DEFAULT_TICK_RATE_MS;
        }
        if self.display_name.trim().is_empty() {
            self.display_name = Self::default().display_name;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.display_name, "You");
        assert!(!config.clock_24h);
        assert_eq!(config.tick_rate_ms, 250);
        assert_eq!(config.time_format(), "%I:%M %p");
    }

    #[test]
    fn test_parse_partial() {
        let config = Config::parse("clock_24h = true\n").unwrap();
        assert!(config.clock_24h);
        assert_eq!(config.display_name, "You");
        assert_eq!(config.time_format(), "%H:%M");
    }

    #[test]
    fn test_parse_sanitizes() {
        let config = Config::parse("display_name = \"  \"\ntick_rate_ms = 0\n").unwrap();
        assert_eq!(config.display_name, "You");
        assert_eq!(config.tick_rate_ms, 250);
    }

    #[test]
    fn test_parse_rejects_bad_types() {
        assert!(Config::parse("tick_rate_ms = \"fast\"\n").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "display_name = \"Alex\"").unwrap();
        writeln!(file, "log_history = 50").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.display_name, "Alex");
        assert_eq!(config.log_history, 50);
    }
}
