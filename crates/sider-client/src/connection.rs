//! Scoped server connection implementing [`DataSource`].

use crate::config::ConnectionConfig;
use crate::errors::ClientError;
use redis::{Cmd, FromRedisValue, RedisError};
use sider_digest::{DataSource, Key, ReadFailure, ValueType};
use tracing::debug;

/// An open connection to one server and database.
///
/// The socket is closed when the handle is dropped, whichever way the
/// owning scope exits.
pub struct SiderConnection {
    conn: redis::Connection,
    endpoint: String,
    db: i64,
}

impl SiderConnection {
    /// Connects and selects `config.db`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidConfig`] for unusable settings and
    /// [`ClientError::Connect`] if the server cannot be reached.
    pub fn open(config: &ConnectionConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let endpoint = config.endpoint();
        let connect_err = |source| ClientError::Connect {
            endpoint: endpoint.clone(),
            source,
        };

        let client = redis::Client::open(config.url().as_str()).map_err(connect_err)?;
        let conn = client
            .get_connection_with_timeout(config.connect_timeout)
            .map_err(connect_err)?;
        conn.set_read_timeout(config.io_timeout).map_err(connect_err)?;
        conn.set_write_timeout(config.io_timeout).map_err(connect_err)?;

        debug!(%endpoint, db = config.db, "connected");
        Ok(Self {
            conn,
            endpoint,
            db: config.db,
        })
    }

    /// `host:port` this connection was opened to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Selected logical database.
    pub fn db(&self) -> i64 {
        self.db
    }

    fn query<T: FromRedisValue>(&mut self, cmd: &Cmd) -> Result<T, RedisError> {
        cmd.query(&mut self.conn)
    }

    /// Runs a read against `key`, mapping a `WRONGTYPE` reply to a type change.
    fn read<T: FromRedisValue>(
        &mut self,
        cmd: &Cmd,
        key: &[u8],
        expected: ValueType,
    ) -> Result<T, ReadFailure> {
        self.query(cmd).map_err(|err| {
            if err.code() == Some("WRONGTYPE") {
                ReadFailure::type_changed(key, expected)
            } else {
                unavailable(err)
            }
        })
    }
}

impl Drop for SiderConnection {
    fn drop(&mut self) {
        debug!(endpoint = %self.endpoint, db = self.db, "released connection");
    }
}

fn unavailable(err: RedisError) -> ReadFailure {
    ReadFailure::Unavailable(Box::new(err))
}

impl DataSource for SiderConnection {
    fn list_keys(&mut self, pattern: &str) -> Result<Vec<Key>, ReadFailure> {
        let keys: Vec<Key> = self
            .query(redis::cmd("KEYS").arg(pattern))
            .map_err(unavailable)?;
        debug!(pattern, keys = keys.len(), "listed keys");
        Ok(keys)
    }

    fn type_of(&mut self, key: &[u8]) -> Result<ValueType, ReadFailure> {
        let name: String = self
            .query(redis::cmd("TYPE").arg(key))
            .map_err(unavailable)?;
        Ok(ValueType::parse(&name))
    }

    fn read_scalar(&mut self, key: &[u8]) -> Result<Option<Vec<u8>>, ReadFailure> {
        self.read(redis::cmd("GET").arg(key), key, ValueType::String)
    }

    fn read_list(&mut self, key: &[u8]) -> Result<Vec<Vec<u8>>, ReadFailure> {
        self.read(
            redis::cmd("LRANGE").arg(key).arg(0).arg(-1),
            key,
            ValueType::List,
        )
    }

    fn read_set_members(&mut self, key: &[u8]) -> Result<Vec<Vec<u8>>, ReadFailure> {
        self.read(redis::cmd("SMEMBERS").arg(key), key, ValueType::Set)
    }

    fn read_sorted_set_range(
        &mut self,
        key: &[u8],
        start: isize,
        stop: isize,
    ) -> Result<Vec<Vec<u8>>, ReadFailure> {
        self.read(
            redis::cmd("ZRANGE").arg(key).arg(start).arg(stop),
            key,
            ValueType::ZSet,
        )
    }

    fn cardinality(&mut self, key: &[u8], value_type: &ValueType) -> Result<u64, ReadFailure> {
        let command = cardinality_command(key, value_type)?;
        self.read(redis::cmd(command).arg(key), key, value_type.clone())
    }
}

/// Counting command for a collection type. Asking for the cardinality of a
/// non-collection is reported against the key, not as a server failure.
fn cardinality_command(key: &[u8], value_type: &ValueType) -> Result<&'static str, ReadFailure> {
    match value_type {
        ValueType::List => Ok("LLEN"),
        ValueType::Set => Ok("SCARD"),
        ValueType::ZSet => Ok("ZCARD"),
        other => Err(ReadFailure::type_changed(key, other.clone())),
    }
}

/// Opens a connection for the duration of `f` and releases it afterwards,
/// on success and on failure alike.
///
/// # Example
///
/// ```rust,no_run
/// use sider_client::{with_connection, ConnectionConfig};
/// use sider_digest::compute_digest;
///
/// let config = ConnectionConfig::default();
/// let digest = with_connection(&config, |conn| -> Result<_, Box<dyn std::error::Error>> {
///     Ok(compute_digest(conn)?)
/// })?;
/// println!("Dataset SHA1: {}", digest.hex);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn with_connection<T, E, F>(config: &ConnectionConfig, f: F) -> Result<T, E>
where
    E: From<ClientError>,
    F: FnOnce(&mut SiderConnection) -> Result<T, E>,
{
    let mut conn = SiderConnection::open(config)?;
    f(&mut conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinality_command_per_collection_type() {
        assert_eq!(cardinality_command(b"k", &ValueType::List).unwrap(), "LLEN");
        assert_eq!(cardinality_command(b"k", &ValueType::Set).unwrap(), "SCARD");
        assert_eq!(cardinality_command(b"k", &ValueType::ZSet).unwrap(), "ZCARD");
    }

    #[test]
    fn cardinality_of_scalar_is_not_a_server_failure() {
        match cardinality_command(b"greeting", &ValueType::String) {
            Err(ReadFailure::TypeChanged { key, expected }) => {
                assert_eq!(key, "greeting");
                assert_eq!(expected, ValueType::String);
            }
            other => panic!("expected type change, got {other:?}"),
        }
    }
}
