//! # Configuration
//!
//! Startup configuration, read once and never revalidated.
//!
//! Sources, highest precedence first:
//! 1. CLI flags (applied by the caller after loading)
//! 2. Environment variables
//! 3. An optional TOML file (`--config` or `STOREFRONT_CONFIG`)
//! 4. Built-in defaults
//!
//! ## Environment Variables
//!
//! - `DATABASE_URL`: MongoDB connection string
//! - `DATABASE_NAME`: database name
//! - `HOST` / `PORT`: bind address (default `0.0.0.0:8000`)
//! - `STOREFRONT_CHECKOUT_MODE`: `legacy` (default) or `strict`
//! - `STOREFRONT_CORS_ORIGINS`: `*` or a comma-separated origin list
//! - `STOREFRONT_RATE_LIMIT`: requests per second, `0` disables (default)

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use storefront_core::StorefrontError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

// =============================================================================
// CHECKOUT MODE
// =============================================================================

/// How checkout reacts when the order cannot be persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutMode {
    /// Acknowledge with a placeholder order id and a fallback note.
    #[default]
    Legacy,
    /// Report the persistence failure as a server error.
    Strict,
}

impl FromStr for CheckoutMode {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "strict" => Ok(Self::Strict),
            other => Err(StorefrontError::ConfigError(format!(
                "unknown checkout mode '{}', expected 'legacy' or 'strict'",
                other
            ))),
        }
    }
}

// =============================================================================
// FILE CONFIG
// =============================================================================

/// Shape of the optional TOML configuration file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub checkout_mode: Option<CheckoutMode>,
    pub cors_origins: Option<String>,
    pub rate_limit: Option<u32>,
}

impl FileConfig {
    /// Read and parse a TOML file.
    pub fn read(path: &Path) -> Result<Self, StorefrontError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            StorefrontError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        toml::from_str(&text).map_err(|e| {
            StorefrontError::ConfigError(format!("Invalid config '{}': {}", path.display(), e))
        })
    }
}

// =============================================================================
// RESOLVED CONFIG
// =============================================================================

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub checkout_mode: CheckoutMode,
    pub cors_origins: Option<String>,
    pub rate_limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_url: None,
            database_name: None,
            checkout_mode: CheckoutMode::Legacy,
            cors_origins: None,
            rate_limit: 0,
        }
    }
}

impl Config {
    /// Load from the process environment and an optional file.
    ///
    /// `path` wins over `STOREFRONT_CONFIG` when both are given.
    pub fn load(path: Option<&Path>) -> Result<Self, StorefrontError> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var("STOREFRONT_CONFIG").ok().map(PathBuf::from));

        let file = match path {
            Some(p) => {
                tracing::info!("Loading configuration file {}", p.display());
                Some(FileConfig::read(&p)?)
            }
            None => None,
        };

        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Merge a file layer and an environment lookup over the defaults.
    pub fn from_sources<F>(file: Option<FileConfig>, env: F) -> Result<Self, StorefrontError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(file) = file {
            config.host = file.host.unwrap_or(config.host);
            config.port = file.port.unwrap_or(config.port);
            config.database_url = file.database_url;
            config.database_name = file.database_name;
            config.checkout_mode = file.checkout_mode.unwrap_or(config.checkout_mode);
            config.cors_origins = file.cors_origins;
            config.rate_limit = file.rate_limit.unwrap_or(config.rate_limit);
        }

        let lookup = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = parse_var("PORT", &port)?;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            config.database_url = Some(url);
        }
        if let Some(name) = lookup("DATABASE_NAME") {
            config.database_name = Some(name);
        }
        if let Some(mode) = lookup("STOREFRONT_CHECKOUT_MODE") {
            config.checkout_mode = mode.parse()?;
        }
        if let Some(origins) = lookup("STOREFRONT_CORS_ORIGINS") {
            config.cors_origins = Some(origins);
        }
        if let Some(rps) = lookup("STOREFRONT_RATE_LIMIT") {
            config.rate_limit = parse_var("STOREFRONT_RATE_LIMIT", &rps)?;
        }

        Ok(config)
    }

    /// `host:port` for the listener.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr>(key: &str, raw: &str) -> Result<T, StorefrontError>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| StorefrontError::ConfigError(format!("Invalid {} value '{}': {}", key, raw, e)))
}

// =============================================================================
// TESTS
// =============================================================================
