//! Configuration for rolodex
//!
//! Sources, highest precedence first: command-line flags, environment
//! (`DATABASE_URL`, `ROLODEX_BIND`, also read from `.env`), the optional
//! `~/.rolodex/config.toml`, built-in defaults.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};

use rolodex_server::db::DEFAULT_MAX_CONNECTIONS;
use rolodex_server::ServerConfig;

/// Database used when nothing else is configured
pub const DEFAULT_DATABASE_URL: &str = "sqlite://rolodex.db";

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RolodexConfig {
    pub server: ServerSection,
}

/// `[server]` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: Option<SocketAddr>,
    pub database_url: Option<String>,
    pub max_connections: Option<u32>,
    pub cors_permissive: Option<bool>,
}

/// Flag/env overrides shared by `serve` and `config show`
#[derive(Args, Debug, Clone, Default)]
pub struct ServerOverrides {
    /// Address to bind to (default: 127.0.0.1:8000)
    #[arg(long, short = 'b', env = "ROLODEX_BIND")]
    pub bind: Option<SocketAddr>,

    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

/// Fully resolved settings the server runs with
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub bind: SocketAddr,
    pub database_url: String,
    pub max_connections: u32,
    pub cors_permissive: bool,
}

impl RolodexConfig {
    /// Config file path: `$ROLODEX_CONFIG` or `~/.rolodex/config.toml`
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("ROLODEX_CONFIG") {
            return PathBuf::from(path);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rolodex/config.toml")
    }

    /// Load the config file, falling back to defaults when it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load from an explicit path; a missing file is not an error
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file (invalid TOML): {}", path.display()))
    }

    /// Merge overrides over file values over defaults
    pub fn resolve(&self, overrides: &ServerOverrides) -> Settings {
        let defaults = ServerConfig::default();
        let file = &self.server;

        Settings {
            bind: overrides.bind.or(file.bind).unwrap_or(defaults.bind_addr),
            database_url: overrides
                .database_url
                .clone()
                .or_else(|| file.database_url.clone())
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            max_connections: overrides
                .max_connections
                .or(file.max_connections)
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            cors_permissive: overrides.cors_permissive
                || file.cors_permissive.unwrap_or(defaults.cors_permissive),
        }
    }
}

impl Settings {
    /// HTTP layer configuration
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            cors_permissive: self.cors_permissive,
        }
    }
}
