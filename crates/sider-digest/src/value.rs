use std::borrow::Cow;
use std::fmt;

/// Opaque key bytes. Ordered byte-wise.
pub type Key = Vec<u8>;

/// Separator between list and sorted set members in a payload (SOH).
pub const SEQUENCE_SEPARATOR: u8 = 0x01;
/// Separator between set members in a payload (STX).
pub const SET_SEPARATOR: u8 = 0x02;

/// Renders key bytes for logs and error messages.
pub fn display_key(key: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(key)
}

/// Value held by a key, as read from a data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A single string.
    Scalar(Vec<u8>),
    /// Ordered sequence; order is significant.
    List(Vec<Vec<u8>>),
    /// Unordered members; order as stored carries no meaning.
    Set(Vec<Vec<u8>>),
    /// Members in the source's rank order.
    SortedSet(Vec<Vec<u8>>),
}

impl Value {
    /// The type tag of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Scalar(_) => ValueType::String,
            Value::List(_) => ValueType::List,
            Value::Set(_) => ValueType::Set,
            Value::SortedSet(_) => ValueType::ZSet,
        }
    }

    /// Canonical bytes folded into the digest, or `None` for an empty
    /// collection, which contributes nothing.
    ///
    /// Scalars always contribute, even when empty. Set members are sorted
    /// byte-wise first; list and sorted set members keep their order.
    pub fn canonical_payload(&self) -> Option<Vec<u8>> {
        match self {
            Value::Scalar(bytes) => Some(bytes.clone()),
            Value::List(items) | Value::SortedSet(items) => {
                join(items.iter().map(Vec::as_slice), SEQUENCE_SEPARATOR)
            }
            Value::Set(items) => {
                let mut sorted: Vec<&[u8]> = items.iter().map(Vec::as_slice).collect();
                sorted.sort_unstable();
                join(sorted.into_iter(), SET_SEPARATOR)
            }
        }
    }
}

fn join<'a>(mut items: impl Iterator<Item = &'a [u8]>, separator: u8) -> Option<Vec<u8>> {
    let first = items.next()?;
    let mut out = first.to_vec();
    for item in items {
        out.push(separator);
        out.extend_from_slice(item);
    }
    Some(out)
}

/// Type of a key as reported by the server (`TYPE` command).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// `string`
    String,
    /// `list`
    List,
    /// `set`
    Set,
    /// `zset`
    ZSet,
    /// `none`: the key does not exist.
    None,
    /// Any other server type (`hash`, `stream`, module types...).
    Other(String),
}

impl ValueType {
    /// Parses a `TYPE` reply.
    pub fn parse(name: &str) -> Self {
        match name {
            "string" => ValueType::String,
            "list" => ValueType::List,
            "set" => ValueType::Set,
            "zset" => ValueType::ZSet,
            "none" => ValueType::None,
            other => ValueType::Other(other.to_string()),
        }
    }

    /// Server name of the type.
    pub fn as_str(&self) -> &str {
        match self {
            ValueType::String => "string",
            ValueType::List => "list",
            ValueType::Set => "set",
            ValueType::ZSet => "zset",
            ValueType::None => "none",
            ValueType::Other(name) => name,
        }
    }

    /// True for the collection types that report a cardinality.
    pub fn is_collection(&self) -> bool {
        matches!(self, ValueType::List | ValueType::Set | ValueType::ZSet)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
