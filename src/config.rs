//! Configuration management for proxy-commands.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file (JSON)
//! 4. Default values
//!
//! Only the console and logging sections take overrides. The server,
//! group and permission tables always come from the file, and are the
//! part that `reload` re-reads.

use std::collections::{BTreeMap, HashMap};
use std::net::IpAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::api::ConsoleConfig;
use crate::cli::Args;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Administrative console settings.
    pub console: ConsoleSection,
    /// Logging configuration.
    pub logging: LoggingSection,
    /// Backend servers behind the proxy.
    pub servers: Vec<ServerEntry>,
    /// Extra group memberships, merged with those declared on servers.
    pub server_groups: BTreeMap<String, Vec<String>>,
    /// Permission group name to permission tokens.
    pub permission_groups: BTreeMap<String, Vec<String>>,
    /// Player name to permission group name.
    pub user_groups: HashMap<String, String>,
}

/// Administrative console section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleSection {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Drain in-flight requests on shutdown.
    pub graceful_shutdown: bool,
}

impl Default for ConsoleSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 40080,
            graceful_shutdown: true,
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level or filter directive.
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// One backend server entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerEntry {
    /// Unique server name.
    pub name: String,
    /// Network address of the backend.
    pub address: String,
    /// Groups this server belongs to.
    pub groups: Vec<String>,
    /// Media pool the server draws content from. Empty means the shared
    /// default pool.
    pub media_pool: String,
}

impl ServerEntry {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            groups: Vec::new(),
            media_pool: String::new(),
        }
    }

    /// Add a group membership.
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    /// Set the media pool.
    pub fn with_media_pool(mut self, pool: impl Into<String>) -> Self {
        self.media_pool = pool.into();
        self
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        if let Ok(host) = std::env::var("PROXY_COMMANDS_HOST") {
            self.console.host = host;
        }

        if let Ok(port) = std::env::var("PROXY_COMMANDS_PORT") {
            if let Ok(port) = port.parse() {
                self.console.port = port;
            }
        }

        if let Ok(level) = std::env::var("PROXY_COMMANDS_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Ok(level) = std::env::var("RUST_LOG") {
            self.logging.level = level;
        }
    }

    /// Apply CLI argument overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(host) = args.host {
            self.console.host = host.to_string();
        }

        if let Some(port) = args.port {
            self.console.port = port;
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match args.config {
            Some(ref path) => Config::from_file(path)?,
            None => Config::default(),
        };

        config.apply_env();
        config.apply_args(args);

        Ok(config)
    }

    /// Convert to the console server settings.
    pub fn to_console_config(&self) -> Result<ConsoleConfig, ConfigError> {
        let host: IpAddr = self
            .console
            .host
            .parse()
            .map_err(|_| ConfigError::InvalidHost(self.console.host.clone()))?;

        let mut console = ConsoleConfig::new(host.to_string(), self.console.port);
        if !self.console.graceful_shutdown {
            console = console.without_graceful_shutdown();
        }

        Ok(console)
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
    /// Invalid host address.
    InvalidHost(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Json(e) => write!(f, "failed to parse config file: {}", e),
            Self::InvalidHost(host) => write!(f, "invalid host address: {}", host),
        }
    }
}

impl std::error::Error for ConfigError {}
