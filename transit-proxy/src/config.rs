//! Process configuration read from the environment at startup.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::upstream::UpstreamConfig;

/// Default listen port on localhost.
const DEFAULT_PORT: u16 = 3000;

/// Where API keys are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretSourceKind {
    /// JSON file at `secret_path`
    File,
    /// `BUS_TRACKER_API_KEY` / `TRAIN_TRACKER_API_KEY`
    Env,
}

/// Invalid configuration value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (`BIND_ADDR`)
    pub bind_addr: SocketAddr,
    /// Key source (`SECRET_SOURCE`: `file` or `env`)
    pub secret_source: SecretSourceKind,
    /// Secrets file (`SECRET_PATH`)
    pub secret_path: PathBuf,
    /// Upstream endpoints and timeout (`RAIL_BASE_URL`, `BUS_BASE_URL`, `UPSTREAM_TIMEOUT_SECS`)
    pub upstream: UpstreamConfig,
    /// Serve canned responses from this directory instead of calling upstream (`MOCK_DATA_DIR`)
    pub mock_data_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through a custom lookup function.
    ///
    /// Unset and empty variables fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let bind_addr = match get("BIND_ADDR") {
            Some(value) => value.parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::Invalid {
                    var: "BIND_ADDR",
                    reason: e.to_string(),
                    value,
                }
            })?,
            None => SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
        };

        let secret_source = match get("SECRET_SOURCE").as_deref() {
            None | Some("file") => SecretSourceKind::File,
            Some("env") => SecretSourceKind::Env,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "SECRET_SOURCE",
                    value: other.to_string(),
                    reason: "expected \"file\" or \"env\"".to_string(),
                });
            }
        };

        let secret_path = get("SECRET_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(crate::secrets::DEFAULT_SECRET_PATH));

        let mut upstream = UpstreamConfig::default();
        if let Some(url) = get("RAIL_BASE_URL") {
            upstream = upstream.with_rail_base_url(url);
        }
        if let Some(url) = get("BUS_BASE_URL") {
            upstream = upstream.with_bus_base_url(url);
        }
        if let Some(value) = get("UPSTREAM_TIMEOUT_SECS") {
            let secs = value.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    var: "UPSTREAM_TIMEOUT_SECS",
                    reason: e.to_string(),
                    value,
                }
            })?;
            upstream = upstream.with_timeout(secs);
        }

        Ok(Self {
            bind_addr,
            secret_source,
            secret_path,
            upstream,
            mock_data_dir: get("MOCK_DATA_DIR").map(PathBuf::from),
        })
    }
}
