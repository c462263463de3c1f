//! Dashboard settings: watched symbols and per-feed poll periods.
//!
//! Stored as JSON under `<data>/config/settings.json` and created with
//! defaults on first run, so users can edit the file by hand.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::data_paths::DataPaths;

/// Symbols shown in the ticker strip when no settings file exists yet
pub const DEFAULT_SYMBOLS: [&str; 8] = [
    "NVDA", "AAPL", "MSFT", "TSLA", "GOOGL", "AMZN", "META", "AMD",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardConfig {
    /// Symbols polled for the ticker strip
    #[serde(default = "default_symbols")]
    pub symbols: Vec<String>,

    /// Poll periods per feed, in seconds
    #[serde(default)]
    pub poll: PollPeriods,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PollPeriods {
    #[serde(default = "default_ticker_secs")]
    pub ticker_secs: u64,
    #[serde(default = "default_portfolio_secs")]
    pub portfolio_secs: u64,
    #[serde(default = "default_notifications_secs")]
    pub notifications_secs: u64,
    #[serde(default = "default_telegram_secs")]
    pub telegram_secs: u64,
    #[serde(default = "default_brief_secs")]
    pub brief_secs: u64,
}

fn default_symbols() -> Vec<String> {
    DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect()
}

fn default_ticker_secs() -> u64 {
    5
}
fn default_portfolio_secs() -> u64 {
    5
}
fn default_notifications_secs() -> u64 {
    20
}
fn default_telegram_secs() -> u64 {
    60
}
fn default_brief_secs() -> u64 {
    60
}

impl Default for PollPeriods {
    fn default() -> Self {
        Self {
            ticker_secs: default_ticker_secs(),
            portfolio_secs: default_portfolio_secs(),
            notifications_secs: default_notifications_secs(),
            telegram_secs: default_telegram_secs(),
            brief_secs: default_brief_secs(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            symbols: default_symbols(),
            poll: PollPeriods::default(),
        }
    }
}

impl DashboardConfig {
    /// Load the settings file, writing defaults when it does not exist.
    /// A corrupt file falls back to defaults instead of aborting the app.
    pub fn load_or_create(data_paths: &DataPaths) -> Result<Self> {
        let path = data_paths.settings_file();

        if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            match serde_json::from_str(&raw) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded dashboard settings");
                    return Ok(config);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Unreadable settings file, using defaults");
                    return Ok(Self::default());
                }
            }
        }

        let config = Self::default();
        config.save(data_paths)?;
        debug!(path = %path.display(), "Wrote default dashboard settings");
        Ok(config)
    }

    pub fn save(&self, data_paths: &DataPaths) -> Result<()> {
        data_paths.ensure_directories()?;
        let path = data_paths.settings_file();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.symbols.len(), 8);
        assert_eq!(config.symbols[0], "NVDA");
        assert_eq!(config.poll.ticker_secs, 5);
        assert_eq!(config.poll.notifications_secs, 20);
        assert_eq!(config.poll.brief_secs, 60);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = TempDir::new().unwrap();
        let paths = DataPaths::new(dir.path());

        let config = DashboardConfig::load_or_create(&paths).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert!(paths.settings_file().exists());

        // Second load reads the file back unchanged
        let reloaded = DashboardConfig::load_or_create(&paths).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let paths = DataPaths::new(dir.path());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.settings_file(), "not json").unwrap();

        let config = DashboardConfig::load_or_create(&paths).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_partial_file_fills_missing_fields() {
        let dir = TempDir::new().unwrap();
        let paths = DataPaths::new(dir.path());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.settings_file(), r#"{"symbols":["SPY"]}"#).unwrap();

        let config = DashboardConfig::load_or_create(&paths).unwrap();
        assert_eq!(config.symbols, vec!["SPY".to_string()]);
        assert_eq!(config.poll, PollPeriods::default());
    }
}
