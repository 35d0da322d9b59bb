//! # Server Configuration
//!
//! Built from environment variables at startup:
//!
//! | Variable            | Default   | Meaning                                  |
//! |---------------------|-----------|------------------------------------------|
//! | `HOST`              | `0.0.0.0` | Bind address                             |
//! | `PORT`              | `8080`    | Bind port                                |
//! | `LOG_FORMAT`        | `text`    | `text` or `json` log lines               |
//! | `SHAPEGATE_CATALOG` | unset     | Extra type catalog (YAML/JSON) to serve  |
//!
//! A set variable with an unparseable value is an error, not a fallback to
//! the default.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// Configuration errors, raised before anything is bound.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `PORT` is not a valid port number.
    #[error("invalid PORT \"{0}\": expected an integer between 0 and 65535")]
    InvalidPort(String),

    /// `HOST` is not an IP address.
    #[error("invalid HOST \"{0}\": expected an IPv4 or IPv6 address")]
    InvalidHost(String),

    /// `LOG_FORMAT` is not recognised.
    #[error("invalid LOG_FORMAT \"{0}\": expected \"text\" or \"json\"")]
    InvalidLogFormat(String),
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidLogFormat(s.to_string())),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Address to bind.
    pub host: IpAddr,
    /// Port to bind. `0` asks the OS for a free port.
    pub port: u16,
    /// Log line format.
    pub log_format: LogFormat,
    /// Optional catalog of additional types to register at startup.
    pub catalog_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            log_format: LogFormat::Text,
            catalog_path: None,
        }
    }
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = match lookup("HOST") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidHost(raw.clone()))?,
            None => defaults.host,
        };

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => defaults.port,
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => defaults.log_format,
        };

        let catalog_path = lookup("SHAPEGATE_CATALOG")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            log_format,
            catalog_path,
        })
    }

    /// The socket address to bind.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
