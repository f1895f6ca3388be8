//! Configuration management for the Bookshelf service
//!
//! Settings come from defaults, an optional TOML file, `BOOKSHELF_*`
//! environment variables and finally command line flags, in that order.

use crate::core::error::{Error, Result};
use crate::core::types::{Book, BookId, IdPolicy};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::Path;

/// Config file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "bookshelf.toml";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "BOOKSHELF_";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Book store configuration
    pub store: StoreConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Metrics configuration
    pub metrics: MetricsConfig,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// HTTP server bind address
    pub http_addr: SocketAddr,

    /// Path the GraphQL endpoint is mounted on
    pub graphql_path: String,

    /// Serve the GraphiQL IDE on GET requests to the GraphQL path
    pub enable_graphiql: bool,
}

/// Book store configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// How new book ids are assigned
    pub id_policy: IdPolicy,

    /// Records to start with (None = the built-in two books)
    pub seed: Option<Vec<Book>>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (pretty, compact)
    pub format: String,
}

/// Metrics configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Expose Prometheus metrics on /metrics
    pub enabled: bool,
}

/// Values given on the command line, applied after file and environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--http-addr`
    pub http_addr: Option<String>,
    /// `--log-level`
    pub log_level: Option<String>,
    /// `--id-policy`
    pub id_policy: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: SocketAddr::from(([0, 0, 0, 0], 4000)),
            graphql_path: "/graphql".to_string(),
            enable_graphiql: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Config {
    /// Load configuration from the default config file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from(None, env_var, &CliOverrides::default())
    }

    /// Load configuration: file, then `lookup` overrides, then CLI flags, then validate
    ///
    /// With no `path`, `bookshelf.toml` in the working directory is read if it
    /// exists.
    pub fn load_from<F>(path: Option<&Path>, lookup: F, cli: &CliOverrides) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE)?,
            None => Config::default(),
        };

        config.apply_overrides_from(lookup)?;
        config.apply_cli_overrides(cli)?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| Error::config(format!("Failed to parse config file: {}", e)))
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(env_var)
    }

    /// Apply command line overrides
    pub fn apply_cli_overrides(&mut self, cli: &CliOverrides) -> Result<()> {
        if let Some(addr) = &cli.http_addr {
            self.server.http_addr = addr.parse()
                .map_err(|e| Error::config(format!("Invalid HTTP address: {}", e)))?;
        }

        if let Some(level) = &cli.log_level {
            self.logging.level = level.clone();
        }

        if let Some(policy) = &cli.id_policy {
            self.store.id_policy = policy.parse().map_err(Error::config)?;
        }

        Ok(())
    }

    /// Apply overrides looked up by key (without the `BOOKSHELF_` prefix)
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server overrides
        if let Some(addr) = lookup("HTTP_ADDR") {
            self.server.http_addr = addr.parse()
                .map_err(|e| Error::config(format!("Invalid HTTP address: {}", e)))?;
        }

        if let Some(path) = lookup("GRAPHQL_PATH") {
            self.server.graphql_path = path;
        }

        if let Some(flag) = lookup("ENABLE_GRAPHIQL") {
            self.server.enable_graphiql = parse_bool(&flag)?;
        }

        // Store overrides
        if let Some(policy) = lookup("ID_POLICY") {
            self.store.id_policy = policy.parse().map_err(Error::config)?;
        }

        // Logging overrides
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Some(format) = lookup("LOG_FORMAT") {
            self.logging.format = format;
        }

        if let Some(flag) = lookup("METRICS_ENABLED") {
            self.metrics.enabled = parse_bool(&flag)?;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !self.server.graphql_path.starts_with('/') {
            return Err(Error::config("GraphQL path must start with '/'"));
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => return Err(Error::config("Invalid log level")),
        }

        match self.logging.format.as_str() {
            "pretty" | "compact" => {}
            _ => return Err(Error::config("Invalid log format")),
        }

        if let Some(seed) = &self.store.seed {
            let mut seen = HashSet::new();
            for book in seed {
                if !seen.insert(book.id) {
                    return Err(Error::config(format!("Duplicate seed book id: {}", book.id)));
                }
            }
        }

        // A sequential counter past the largest id has nowhere to go
        if self.store.id_policy == IdPolicy::Sequential
            && self.seed_books().iter().any(|book| book.id == BookId::MAX)
        {
            return Err(Error::config(format!(
                "Seed book id {} leaves no room for sequential ids",
                BookId::MAX
            )));
        }

        Ok(())
    }

    /// Books the store starts with
    pub fn seed_books(&self) -> Vec<Book> {
        self.store.seed.clone().unwrap_or_else(crate::core::types::default_seed)
    }
}

/// Read `BOOKSHELF_<key>` from the process environment
pub fn env_var(key: &str) -> Option<String> {
    std::env::var(format!("{}{}", ENV_PREFIX, key)).ok()
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::config(format!("Invalid boolean value: {}", value))),
    }
}
