//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Environment variable holding the listen address.
pub const ADDR_VAR: &str = "ROUTE_SERVER_ADDR";

/// Environment variable holding the path of a JSON network file.
pub const NETWORK_VAR: &str = "ROUTE_NETWORK_PATH";

/// Error from reading configuration.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Listen address could not be parsed
    #[error("invalid {var} value {value:?}: expected host:port")]
    InvalidAddr { var: &'static str, value: String },
}

/// Configuration parameters for the routing server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address to listen on.
    pub addr: SocketAddr,

    /// Network file to load.
    /// The built-in sample network is used when unset.
    pub network_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(addr: SocketAddr, network_path: Option<PathBuf>) -> Self {
        Self { addr, network_path }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its
    /// value. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let addr = match get(ADDR_VAR) {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidAddr {
                    var: ADDR_VAR,
                    value,
                })?,
            None => Self::default().addr,
        };

        let network_path = get(NETWORK_VAR).map(PathBuf::from);

        Ok(Self::new(addr, network_path))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(SocketAddr::from(([127, 0, 0, 1], 8000)), None)
    }
}
