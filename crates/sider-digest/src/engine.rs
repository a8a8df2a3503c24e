//! Dataset digest engine.
//!
//! Keys are listed, sorted byte-wise and folded one by one into a
//! [`RollingDigest`]: first the key, then the canonical payload of its value.
//! Sorting keys and set members makes the result independent of enumeration
//! order; list and sorted set order is kept because it is part of the data.

use crate::digest::{DigestAlg, RollingDigest};
use crate::errors::DigestError;
use crate::source::{DataSource, TypedRead};
use crate::value::{display_key, ValueType};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// What to do with keys holding a type outside Scalar/List/Set/SortedSet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnsupportedTypePolicy {
    /// Abort with [`DigestError::UnsupportedType`].
    #[default]
    Fail,
    /// Leave the key out of the digest and count it in the report.
    Skip,
}

/// Progress of a [`Digester`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    /// No computation has run yet.
    NotStarted,
    /// Folding keys; `next` is the index of the key about to be read.
    Scanning {
        /// Index into the sorted key list.
        next: usize,
        /// Number of keys listed.
        total: usize,
    },
    /// Last computation completed.
    Done,
    /// Last computation aborted with an error.
    Failed,
}

/// Final fingerprint of a dataset plus scan counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetDigest {
    /// Hash primitive the digest was computed with.
    pub alg: DigestAlg,
    /// Lowercase hex digest; empty for a dataset with nothing to fold.
    #[serde(rename = "digest")]
    pub hex: String,
    /// Keys listed and read.
    pub keys_scanned: usize,
    /// Keys folded into the digest.
    pub keys_folded: usize,
    /// Keys holding an empty collection.
    pub skipped_empty: usize,
    /// Keys left out under [`UnsupportedTypePolicy::Skip`].
    pub skipped_unsupported: usize,
}

/// Computes dataset digests over a [`DataSource`].
#[derive(Debug, Clone)]
pub struct Digester {
    alg: DigestAlg,
    policy: UnsupportedTypePolicy,
    cancel: Option<Arc<AtomicBool>>,
    state: ScanState,
}

impl Default for Digester {
    fn default() -> Self {
        Self::new(DigestAlg::default())
    }
}

impl Digester {
    /// Creates a digester using `alg`, failing on unsupported types.
    pub fn new(alg: DigestAlg) -> Self {
        Self {
            alg,
            policy: UnsupportedTypePolicy::default(),
            cancel: None,
            state: ScanState::NotStarted,
        }
    }

    /// Sets the policy for unsupported value types.
    pub fn with_policy(mut self, policy: UnsupportedTypePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Installs a cancellation flag, checked before each key is read.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Current progress.
    pub fn state(&self) -> &ScanState {
        &self.state
    }

    /// Computes the digest of every key in `source`.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError`] if keys cannot be listed, a key cannot be
    /// read, a key holds an unsupported type under
    /// [`UnsupportedTypePolicy::Fail`], or the cancellation flag is raised.
    pub fn compute<S: DataSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<DatasetDigest, DigestError> {
        let result = self.scan(source);
        self.state = match &result {
            Ok(_) => ScanState::Done,
            Err(_) => ScanState::Failed,
        };
        result
    }

    fn scan<S: DataSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<DatasetDigest, DigestError> {
        let mut keys = source.list_keys("*").map_err(DigestError::ListKeys)?;
        keys.sort_unstable();
        debug!(keys = keys.len(), alg = %self.alg, "scanning dataset");

        let total = keys.len();
        let mut rolling = RollingDigest::new(self.alg);
        let mut report = DatasetDigest {
            alg: self.alg,
            hex: String::new(),
            keys_scanned: 0,
            keys_folded: 0,
            skipped_empty: 0,
            skipped_unsupported: 0,
        };

        for (index, key) in keys.iter().enumerate() {
            self.state = ScanState::Scanning { next: index, total };
            if self.is_cancelled() {
                return Err(DigestError::Cancelled {
                    scanned: index,
                    total,
                });
            }

            let read = source.read_value(key).map_err(|failure| DigestError::Read {
                key: display_key(key).into_owned(),
                source: failure,
            })?;
            report.keys_scanned += 1;

            let value = match read {
                TypedRead::Value(value) => value,
                TypedRead::Unsupported(value_type) => {
                    self.unsupported(key, value_type)?;
                    report.skipped_unsupported += 1;
                    continue;
                }
            };

            let Some(payload) = value.canonical_payload() else {
                report.skipped_empty += 1;
                continue;
            };

            rolling.fold(key);
            rolling.fold(&payload);
            report.keys_folded += 1;
            trace!(key = %display_key(key), digest = rolling.hex(), "folded key");
        }

        report.hex = rolling.into_hex();
        Ok(report)
    }

    fn unsupported(&self, key: &[u8], value_type: ValueType) -> Result<(), DigestError> {
        match self.policy {
            UnsupportedTypePolicy::Fail => Err(DigestError::UnsupportedType {
                key: display_key(key).into_owned(),
                value_type,
            }),
            UnsupportedTypePolicy::Skip => {
                warn!(key = %display_key(key), %value_type, "skipping key with unsupported type");
                Ok(())
            }
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Computes the SHA-1 dataset digest of `source` with default settings.
///
/// Shorthand for `Digester::default().compute(source)`.
pub fn compute_digest<S: DataSource + ?Sized>(
    source: &mut S,
) -> Result<DatasetDigest, DigestError> {
    Digester::default().compute(source)
}
