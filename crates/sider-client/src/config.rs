//! Connection settings.

use crate::errors::ClientError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default server host.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default server port.
pub const DEFAULT_PORT: u16 = 6379;
/// Default logical database.
pub const DEFAULT_DB: i64 = 0;

/// Where and how to connect to a Sider server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Server host name or IP address.
    pub host: String,
    /// Server TCP port.
    pub port: u16,
    /// Logical database selected after connecting.
    pub db: i64,
    /// Upper bound on establishing the TCP connection.
    pub connect_timeout: Duration,
    /// Read/write timeout for each command; `None` blocks indefinitely.
    pub io_timeout: Option<Duration>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            db: DEFAULT_DB,
            connect_timeout: Duration::from_secs(5),
            io_timeout: None,
        }
    }
}

impl ConnectionConfig {
    /// Config for `host:port`, database `db`, with default timeouts.
    pub fn new(host: impl Into<String>, port: u16, db: i64) -> Self {
        Self {
            host: host.into(),
            port,
            db,
            ..Self::default()
        }
    }

    /// Checks the settings before any connection attempt.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.host.trim().is_empty() {
            return Err(ClientError::InvalidConfig("host must not be empty".into()));
        }
        if self.port == 0 {
            return Err(ClientError::InvalidConfig("port must not be 0".into()));
        }
        if self.db < 0 {
            return Err(ClientError::InvalidConfig(format!(
                "db must be non-negative, got {}",
                self.db
            )));
        }
        if self.connect_timeout.is_zero() {
            return Err(ClientError::InvalidConfig(
                "connect timeout must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Connection URL in `redis://host:port/db` form.
    pub fn url(&self) -> String {
        format!("redis://{}/{}", self.endpoint(), self.db)
    }

    /// `host:port`, with IPv6 literals bracketed.
    pub fn endpoint(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl fmt::Display for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} db {}", self.endpoint(), self.db)
    }
}
