use crate::source::ReadFailure;
use crate::value::ValueType;
use thiserror::Error;

/// Errors that abort a digest computation.
///
/// No partial digest is produced when any of these is returned.
#[derive(Error, Debug)]
pub enum DigestError {
    /// Keys could not be listed.
    #[error("failed to list keys: {0}")]
    ListKeys(#[source] ReadFailure),
    /// A listed key could not be read consistently.
    #[error("failed to read key '{key}': {source}")]
    Read {
        /// Key being read, rendered lossily.
        key: String,
        /// Underlying read failure.
        source: ReadFailure,
    },
    /// A key holds a type with no defined payload and the policy is to fail.
    #[error("key '{key}' holds unsupported type '{value_type}'")]
    UnsupportedType {
        /// Offending key, rendered lossily.
        key: String,
        /// Type reported by the source.
        value_type: ValueType,
    },
    /// The cancellation flag was raised between keys.
    #[error("digest cancelled after {scanned} of {total} keys")]
    Cancelled {
        /// Keys processed before cancellation.
        scanned: usize,
        /// Keys listed for the scan.
        total: usize,
    },
}
