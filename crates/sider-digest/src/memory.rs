//! In-memory data source.

use crate::source::{DataSource, ReadFailure};
use crate::value::{Key, Value, ValueType};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Value(Value),
    Unsupported(String),
}

/// A dataset held in memory.
///
/// Keys are listed in insertion order and collection members are returned
/// exactly as inserted, so callers control the enumeration order the digest
/// engine sees. Reads of the wrong type fail with
/// [`ReadFailure::TypeChanged`] and missing collections read as empty, the
/// way the server behaves. Unlike the server, an empty collection can be
/// stored and is skipped by the digest rather than treated as vanished.
///
/// # Example
///
/// ```rust
/// use sider_digest::{Digester, MemorySource, Value};
///
/// let mut source = MemorySource::new()
///     .with("a", Value::Scalar(b"x".to_vec()))
///     .with("b", Value::Set(vec![b"m".to_vec(), b"n".to_vec()]));
///
/// let digest = Digester::default().compute(&mut source)?;
/// assert_eq!(digest.hex, "e9f3261e3546e96222b404fe20ba093bf37f1b1a");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: Vec<(Key, Entry)>,
}

impl MemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<Key>, value: Value) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets `key` to `value`. An existing key keeps its listing position.
    pub fn insert(&mut self, key: impl Into<Key>, value: Value) {
        self.put(key.into(), Entry::Value(value));
    }

    /// Sets `key` to a type the digest has no payload for (e.g. `hash`).
    pub fn insert_unsupported(&mut self, key: impl Into<Key>, type_name: impl Into<String>) {
        self.put(key.into(), Entry::Unsupported(type_name.into()));
    }

    /// Removes `key`, returning whether it existed.
    pub fn remove(&mut self, key: &[u8]) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(k, _)| k.as_slice() != key);
        self.entries.len() != before
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no keys are held.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn put(&mut self, key: Key, entry: Entry) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = entry,
            None => self.entries.push((key, entry)),
        }
    }

    fn get(&self, key: &[u8]) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_slice() == key)
            .map(|(_, entry)| entry)
    }

    /// Members of the collection at `key`, or an empty slice when absent.
    fn members(&self, key: &[u8], expected: &ValueType) -> Result<&[Vec<u8>], ReadFailure> {
        match (self.get(key), expected) {
            (None, _) => Ok(&[]),
            (Some(Entry::Value(Value::List(items))), ValueType::List)
            | (Some(Entry::Value(Value::Set(items))), ValueType::Set)
            | (Some(Entry::Value(Value::SortedSet(items))), ValueType::ZSet) => {
                Ok(items.as_slice())
            }
            _ => Err(ReadFailure::type_changed(key, expected.clone())),
        }
    }
}

impl DataSource for MemorySource {
    fn list_keys(&mut self, pattern: &str) -> Result<Vec<Key>, ReadFailure> {
        Ok(self
            .entries
            .iter()
            .filter(|(k, _)| glob_match(pattern.as_bytes(), k))
            .map(|(k, _)| k.clone())
            .collect())
    }

    fn type_of(&mut self, key: &[u8]) -> Result<ValueType, ReadFailure> {
        Ok(match self.get(key) {
            None => ValueType::None,
            Some(Entry::Value(value)) => value.value_type(),
            Some(Entry::Unsupported(name)) => ValueType::Other(name.clone()),
        })
    }

    fn read_scalar(&mut self, key: &[u8]) -> Result<Option<Vec<u8>>, ReadFailure> {
        match self.get(key) {
            None => Ok(None),
            Some(Entry::Value(Value::Scalar(bytes))) => Ok(Some(bytes.clone())),
            Some(_) => Err(ReadFailure::type_changed(key, ValueType::String)),
        }
    }

    fn read_list(&mut self, key: &[u8]) -> Result<Vec<Vec<u8>>, ReadFailure> {
        Ok(self.members(key, &ValueType::List)?.to_vec())
    }

    fn read_set_members(&mut self, key: &[u8]) -> Result<Vec<Vec<u8>>, ReadFailure> {
        Ok(self.members(key, &ValueType::Set)?.to_vec())
    }

    fn read_sorted_set_range(
        &mut self,
        key: &[u8],
        start: isize,
        stop: isize,
    ) -> Result<Vec<Vec<u8>>, ReadFailure> {
        let items = self.members(key, &ValueType::ZSet)?;
        let len = items.len() as isize;
        let start = if start < 0 { (len + start).max(0) } else { start };
        let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };
        if start > stop || start >= len {
            return Ok(Vec::new());
        }
        Ok(items[start as usize..=stop as usize].to_vec())
    }

    fn cardinality(&mut self, key: &[u8], value_type: &ValueType) -> Result<u64, ReadFailure> {
        Ok(self.members(key, value_type)?.len() as u64)
    }

    fn empty_collections_exist(&self) -> bool {
        true
    }
}

/// Glob matching in `KEYS` syntax: `*` (any run), `?` (any single byte),
/// `[abc]`, `[^abc]` and `[a-z]` classes, and `\` escaping the next byte.
///
/// Backtracks only to the most recent `*`, so matching stays polynomial in
/// pattern and key length.
fn glob_match(pattern: &[u8], text: &[u8]) -> bool {
    let (mut p, mut t) = (0, 0);
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() {
            if pattern[p] == b'*' {
                p += 1;
                star = Some((p, t));
                continue;
            }
            if let Some(next) = match_token(pattern, p, text[t]) {
                p = next;
                t += 1;
                continue;
            }
        }
        match star {
            Some((star_p, star_t)) => {
                p = star_p;
                t = star_t + 1;
                star = Some((star_p, t));
            }
            None => return false,
        }
    }

    pattern[p..].iter().all(|&c| c == b'*')
}

/// Matches the single-byte token at `pattern[p]`, returning the index after it.
fn match_token(pattern: &[u8], p: usize, byte: u8) -> Option<usize> {
    match pattern[p] {
        b'?' => Some(p + 1),
        b'[' => match_class(pattern, p + 1, byte),
        b'\\' if p + 1 < pattern.len() => (pattern[p + 1] == byte).then_some(p + 2),
        c => (c == byte).then_some(p + 1),
    }
}

/// Matches a `[...]` class starting just after the `[`. An unterminated
/// class runs to the end of the pattern.
fn match_class(pattern: &[u8], mut p: usize, byte: u8) -> Option<usize> {
    let negate = pattern.get(p) == Some(&b'^');
    if negate {
        p += 1;
    }

    let mut matched = false;
    while p < pattern.len() && pattern[p] != b']' {
        if pattern[p] == b'\\' && p + 1 < pattern.len() {
            matched |= pattern[p + 1] == byte;
            p += 2;
        } else if p + 2 < pattern.len() && pattern[p + 1] == b'-' && pattern[p + 2] != b']' {
            let (lo, hi) = (pattern[p].min(pattern[p + 2]), pattern[p].max(pattern[p + 2]));
            matched |= (lo..=hi).contains(&byte);
            p += 3;
        } else {
            matched |= pattern[p] == byte;
            p += 1;
        }
    }

    (matched != negate).then_some((p + 1).min(pattern.len()))
}
