//! Configuration loading.
//!
//! Read from `~/.config/touchline/config.toml` by default, or from an
//! explicit `--config` path. A missing default file means defaults;
//! missing fields in a present file fall back field by field.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::app::{Result, TouchlineError};
use crate::pipeline::DEFAULT_WORKERS;
use crate::scheduler;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feed: FeedConfig,
    pub sync: SyncConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Top-level news listing endpoint.
    pub listing_url: String,
    /// Per-article detail endpoint; the item id is appended as `?id=`.
    pub detail_url: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            listing_url: "https://www.brentfordfc.com/api/incrowd/getnewlistinformation?count=50"
                .into(),
            detail_url: "https://www.brentfordfc.com/api/incrowd/getnewsarticleinformation".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Cycle interval, e.g. "1h", "30m", "90s".
    pub interval: String,
    /// Concurrent detail fetches per batch.
    pub workers: usize,
    /// Run a cycle immediately on startup.
    pub on_start: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            interval: "1h".into(),
            workers: DEFAULT_WORKERS,
            on_start: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database path; defaults to the platform data directory.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8080".into(),
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_config_path()?, false),
        };

        if !path.exists() {
            if required {
                return Err(TouchlineError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| TouchlineError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;

        Ok(config)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TouchlineError::Config("Could not find config directory".into()))?;
        Ok(config_dir.join("touchline").join("config.toml"))
    }

    pub fn sync_interval(&self) -> Result<Duration> {
        scheduler::parse_interval(&self.sync.interval).map(Duration::from_secs)
    }

    pub fn server_addr(&self) -> Result<SocketAddr> {
        self.server
            .addr
            .parse()
            .map_err(|_| TouchlineError::Config(format!("invalid bind address: {}", self.server.addr)))
    }

    fn validate(&self) -> Result<()> {
        Url::parse(&self.feed.listing_url)?;
        Url::parse(&self.feed.detail_url)?;
        self.sync_interval()?;
        self.server_addr()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.sync.interval, "1h");
        assert_eq!(config.sync.workers, DEFAULT_WORKERS);
        assert!(config.sync.on_start);
        assert_eq!(config.server.addr, "127.0.0.1:8080");
        assert!(config.database.path.is_none());
    }

    #[test]
    fn test_partial_config_overrides() {
        let config: Config = toml::from_str(
            r#"
[sync]
interval = "15m"
workers = 4
"#,
        )
        .unwrap();

        assert_eq!(config.sync.interval, "15m");
        assert_eq!(config.sync.workers, 4);
        // Untouched sections keep their defaults.
        assert_eq!(config.server.addr, "127.0.0.1:8080");
        assert!(config.feed.listing_url.contains("getnewlistinformation"));
    }

    #[test]
    fn test_sync_interval_parses() {
        let config: Config = toml::from_str("[sync]\ninterval = \"90s\"").unwrap();
        assert_eq!(config.sync_interval().unwrap(), Duration::from_secs(90));
    }

    #[test]
    fn test_invalid_interval_rejected() {
        let config: Config = toml::from_str("[sync]\ninterval = \"soon\"").unwrap();
        assert!(config.sync_interval().is_err());
    }

    #[test]
    fn test_invalid_addr_rejected() {
        let config: Config = toml::from_str("[server]\naddr = \"nonsense\"").unwrap();
        assert!(matches!(
            config.server_addr().unwrap_err(),
            TouchlineError::Config(_)
        ));
    }

    #[test]
    fn test_load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[sync]\ninterval = \"30m\"\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.sync.interval, "30m");
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let err = Config::load(Some(Path::new("/nonexistent/config.toml"))).unwrap_err();
        assert!(matches!(err, TouchlineError::Config(_)));
    }
}
