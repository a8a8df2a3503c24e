use thiserror::Error;

/// Errors acquiring a connection.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection settings are unusable.
    #[error("invalid connection config: {0}")]
    InvalidConfig(String),
    /// The server could not be reached or refused the session.
    #[error("cannot connect to {endpoint}: {source}")]
    Connect {
        /// `host:port` that was dialed.
        endpoint: String,
        /// Underlying client error.
        source: redis::RedisError,
    },
}
