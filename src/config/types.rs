//! Core configuration types and loading.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use thiserror::Error;

use super::limits::LimitsConfig;
use super::validation::{self, ValidationError};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Server configuration.
///
/// Every section is optional in the file; the server runs on defaults alone.
/// The port and connection password come from the command line and are
/// filled in with [`Config::with_credentials`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server identity.
    #[serde(default)]
    pub server: ServerConfig,
    /// Listener configuration.
    #[serde(default)]
    pub listen: ListenConfig,
    /// Resource limits.
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl Config {
    /// Load configuration from a TOML file and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        validation::validate(&config).map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Set the listening port and the connection password.
    #[must_use]
    pub fn with_credentials(mut self, port: u16, password: impl Into<String>) -> Self {
        self.listen.port = port;
        self.server.password = password.into();
        self
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Server name used as the prefix of every server reply.
    #[serde(default = "default_server_name")]
    pub name: String,
    /// Network name.
    #[serde(default = "default_network")]
    pub network: String,
    /// Version string advertised in RPL_YOURHOST and RPL_MYINFO.
    #[serde(default = "default_version")]
    pub version: String,
    /// Free-text description shown in WHOIS.
    #[serde(default = "default_description")]
    pub description: String,
    /// Connection password every client must supply with PASS.
    #[serde(skip)]
    pub password: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            network: default_network(),
            version: default_version(),
            description: default_description(),
            password: String::new(),
        }
    }
}

fn default_server_name() -> String {
    "irc.ircserv.com".to_string()
}

fn default_network() -> String {
    "ircserv".to_string()
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_description() -> String {
    "ircserv chat relay".to_string()
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListenConfig {
    /// Address to bind.
    #[serde(default = "default_address")]
    pub address: IpAddr,
    /// Port to bind; always taken from the command line.
    #[serde(skip)]
    pub port: u16,
}

impl ListenConfig {
    /// The full socket address to bind.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: 0,
        }
    }
}

fn default_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}
