//! TOML configuration of the HTTP server

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use campusnav_core::Error;
use campusnav_core::prelude::CampusModelConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub model: CampusModelConfig,
}

/// Listener and middleware settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
    /// Requests running longer than this are answered with 408
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Maximum number of requests processed at once
    #[serde(default = "default_concurrency_limit")]
    pub concurrency_limit: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            request_timeout_secs: default_request_timeout(),
            concurrency_limit: default_concurrency_limit(),
        }
    }
}

impl ServerSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_request_timeout() -> u64 {
    30
}

fn default_concurrency_limit() -> usize {
    64
}

impl ServerConfig {
    /// Reads the configuration file.
    ///
    /// Relative model paths are resolved against the directory of the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// settings are out of range
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path)?;
        let mut config = Self::parse(&text)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns an error if `text` is not a valid configuration
    pub fn parse(text: &str) -> Result<Self, Error> {
        let config: Self = toml::from_str(text).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        if config.server.concurrency_limit == 0 {
            return Err(Error::InvalidConfig(
                "server.concurrency_limit must be at least 1".to_string(),
            ));
        }
        if config.server.request_timeout_secs == 0 {
            return Err(Error::InvalidConfig(
                "server.request_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        let model = &mut self.model;
        if model.network_path.is_relative() {
            model.network_path = base.join(&model.network_path);
        }
        if model.catalog_path.is_relative() {
            model.catalog_path = base.join(&model.catalog_path);
        }
    }
}
