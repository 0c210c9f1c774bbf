//! Configuration loading and management
//!
//! Settings come from an optional YAML file, then environment variables
//! override individual keys, then command-line flags override those.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable overriding `bind_addr`
pub const ENV_BIND_ADDR: &str = "KENNYWOOD_BIND_ADDR";
/// Environment variable overriding `database_url`
pub const ENV_DATABASE_URL: &str = "KENNYWOOD_DATABASE_URL";
/// Environment variable overriding `media_root`
pub const ENV_MEDIA_ROOT: &str = "KENNYWOOD_MEDIA_ROOT";

/// Complete configuration for the API server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: String,

    /// `memory` for the in-memory store, otherwise a SQLite URL
    pub database_url: String,

    /// Directory holding uploaded images
    pub media_root: PathBuf,

    /// Origin used in hyperlinks; falls back to the request's `Host` header
    pub public_url: Option<String>,

    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,

    /// CORS origins; empty disables CORS
    pub allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".to_string(),
            database_url: "sqlite://kennywood.db".to_string(),
            media_root: PathBuf::from("media"),
            public_url: None,
            log_level: "info".to_string(),
            allowed_origins: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path))?;
        Self::from_yaml_str(&content).with_context(|| format!("invalid config file '{}'", path))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`
    ///
    /// Takes a lookup function so tests don't have to touch the process
    /// environment; the binary passes `|key| std::env::var(key).ok()`.
    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(addr) = lookup(ENV_BIND_ADDR) {
            self.bind_addr = addr;
        }
        if let Some(url) = lookup(ENV_DATABASE_URL) {
            self.database_url = url;
        }
        if let Some(root) = lookup(ENV_MEDIA_ROOT) {
            self.media_root = PathBuf::from(root);
        }
        self
    }

    /// Replace the port of `bind_addr`, keeping the host part
    pub fn with_port(mut self, port: u16) -> Self {
        let host = self
            .bind_addr
            .rsplit_once(':')
            .map(|(host, _)| host.to_string())
            .unwrap_or_else(|| self.bind_addr.clone());
        self.bind_addr = format!("{}:{}", host, port);
        self
    }
}
