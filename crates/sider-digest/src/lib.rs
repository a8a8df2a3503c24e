//! Deterministic content digest of a whole Sider dataset.
//!
//! The digest summarizes every key and value of a dataset in one hex string
//! that does not depend on the order keys are enumerated in, nor on the
//! order members of a set are stored in. List and sorted set order is part
//! of the data and does change the digest.
//!
//! With the default [`DigestAlg::Sha1`] the output is byte-compatible with
//! the legacy `sider-sha1` tool, so masters and replicas checked with either
//! can be compared.
//!
//! ## Quick Start
//!
//! ```rust
//! use sider_digest::{compute_digest, MemorySource, Value};
//!
//! let mut source = MemorySource::new()
//!     .with("b", Value::Set(vec![b"n".to_vec(), b"m".to_vec()]))
//!     .with("a", Value::Scalar(b"x".to_vec()));
//!
//! let digest = compute_digest(&mut source)?;
//! println!("Dataset SHA1: {}", digest.hex);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
#![deny(missing_docs)]

/// Hash primitives and the rolling accumulator.
pub mod digest;
/// Digest engine and scan report.
pub mod engine;
/// Error types for digest computation.
pub mod errors;
/// In-memory data source.
pub mod memory;
/// Data source capability trait.
pub mod source;
/// Value model and canonical payloads.
pub mod value;

pub use digest::{DigestAlg, RollingDigest, UnknownAlgError};
pub use engine::{compute_digest, DatasetDigest, Digester, ScanState, UnsupportedTypePolicy};
pub use errors::DigestError;
pub use memory::MemorySource;
pub use source::{BoxError, DataSource, ReadFailure, TypedRead};
pub use value::{display_key, Key, Value, ValueType, SEQUENCE_SEPARATOR, SET_SEPARATOR};
