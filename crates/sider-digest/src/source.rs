//! Data source capability consumed by the digest engine.

use crate::value::{display_key, Key, Value, ValueType};
use thiserror::Error;

/// Boxed error from a data source backend.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure while reading from a data source.
///
/// The digest engine treats every variant as fatal: there is no snapshot
/// isolation, so a key that disappears or changes type mid-scan means the
/// digest would describe no real state of the dataset.
#[derive(Error, Debug)]
pub enum ReadFailure {
    /// The key was listed but no longer exists.
    #[error("key '{key}' vanished during the scan")]
    KeyVanished {
        /// Affected key, rendered lossily.
        key: String,
    },
    /// The key holds a different type than the one just reported.
    #[error("key '{key}' changed type during the scan (expected {expected})")]
    TypeChanged {
        /// Affected key, rendered lossily.
        key: String,
        /// Type reported before the read.
        expected: ValueType,
    },
    /// The source could not serve the request (I/O, protocol, dropped connection).
    #[error("data source unavailable: {0}")]
    Unavailable(#[source] BoxError),
}

impl ReadFailure {
    /// Builds a [`ReadFailure::KeyVanished`] for `key`.
    pub fn vanished(key: &[u8]) -> Self {
        ReadFailure::KeyVanished {
            key: display_key(key).into_owned(),
        }
    }

    /// Builds a [`ReadFailure::TypeChanged`] for `key`.
    pub fn type_changed(key: &[u8], expected: ValueType) -> Self {
        ReadFailure::TypeChanged {
            key: display_key(key).into_owned(),
            expected,
        }
    }
}

/// Outcome of [`DataSource::read_value`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedRead {
    /// One of the supported value variants.
    Value(Value),
    /// The key holds a type the digest does not define a payload for.
    Unsupported(ValueType),
}

/// A key-value store that can enumerate keys and read typed values.
///
/// Implemented by the network client in `sider-client` and by
/// [`MemorySource`](crate::MemorySource).
pub trait DataSource {
    /// Lists keys matching a glob `pattern`; `*` lists every key.
    /// The order of the returned keys is unspecified.
    fn list_keys(&mut self, pattern: &str) -> Result<Vec<Key>, ReadFailure>;

    /// Reports the type currently held by `key`.
    fn type_of(&mut self, key: &[u8]) -> Result<ValueType, ReadFailure>;

    /// Reads a scalar; `None` if the key does not exist.
    fn read_scalar(&mut self, key: &[u8]) -> Result<Option<Vec<u8>>, ReadFailure>;

    /// Reads a whole list in order.
    fn read_list(&mut self, key: &[u8]) -> Result<Vec<Vec<u8>>, ReadFailure>;

    /// Reads all members of a set, in whatever order the source returns them.
    fn read_set_members(&mut self, key: &[u8]) -> Result<Vec<Vec<u8>>, ReadFailure>;

    /// Reads sorted set members by rank, `start..=stop` with negative indexes
    /// counting from the end (`0, -1` is the full range).
    fn read_sorted_set_range(
        &mut self,
        key: &[u8],
        start: isize,
        stop: isize,
    ) -> Result<Vec<Vec<u8>>, ReadFailure>;

    /// Number of elements in a list, set or sorted set.
    fn cardinality(&mut self, key: &[u8], value_type: &ValueType) -> Result<u64, ReadFailure>;

    /// Whether a listed collection key can legitimately hold no elements.
    ///
    /// The server deletes a collection together with its last element, so
    /// by default a zero cardinality means the key vanished after its type
    /// was read. Sources that store empty collections return `true`.
    fn empty_collections_exist(&self) -> bool {
        false
    }

    /// Reads the value of `key` with its type.
    ///
    /// Empty collections are detected through [`cardinality`](Self::cardinality)
    /// and returned empty without transferring their contents. A collection
    /// that reads empty after a non-zero cardinality has vanished mid-read and
    /// fails with [`ReadFailure::KeyVanished`]. Types outside the four
    /// supported variants come back as [`TypedRead::Unsupported`] so the
    /// caller can decide what to do with them.
    fn read_value(&mut self, key: &[u8]) -> Result<TypedRead, ReadFailure> {
        let value = match self.type_of(key)? {
            ValueType::String => match self.read_scalar(key)? {
                Some(bytes) => Value::Scalar(bytes),
                None => return Err(ReadFailure::vanished(key)),
            },
            ValueType::List => Value::List(read_collection(self, key, &ValueType::List, |s| {
                s.read_list(key)
            })?),
            ValueType::Set => Value::Set(read_collection(self, key, &ValueType::Set, |s| {
                s.read_set_members(key)
            })?),
            ValueType::ZSet => Value::SortedSet(read_collection(self, key, &ValueType::ZSet, |s| {
                s.read_sorted_set_range(key, 0, -1)
            })?),
            ValueType::None => return Err(ReadFailure::vanished(key)),
            other @ ValueType::Other(_) => return Ok(TypedRead::Unsupported(other)),
        };

        Ok(TypedRead::Value(value))
    }
}

/// Probes the cardinality of a collection, then transfers its members.
fn read_collection<S, F>(
    source: &mut S,
    key: &[u8],
    value_type: &ValueType,
    read: F,
) -> Result<Vec<Vec<u8>>, ReadFailure>
where
    S: DataSource + ?Sized,
    F: FnOnce(&mut S) -> Result<Vec<Vec<u8>>, ReadFailure>,
{
    if source.cardinality(key, value_type)? == 0 {
        return if source.empty_collections_exist() {
            Ok(Vec::new())
        } else {
            Err(ReadFailure::vanished(key))
        };
    }

    let members = read(source)?;
    if members.is_empty() {
        return Err(ReadFailure::vanished(key));
    }
    Ok(members)
}
