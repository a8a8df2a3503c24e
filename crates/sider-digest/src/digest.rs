use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest as Sha2Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Hash primitives available for the rolling accumulator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DigestAlg {
    /// SHA-1 (160 bit). Byte-compatible with the legacy `sider-sha1` tool.
    #[default]
    #[serde(rename = "sha-1")]
    Sha1,
    /// SHA-256.
    #[serde(rename = "sha-256")]
    Sha256,
}

impl DigestAlg {
    /// Stable identifier used in reports and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            DigestAlg::Sha1 => "sha-1",
            DigestAlg::Sha256 => "sha-256",
        }
    }

    /// Short uppercase label used in human-readable output (`SHA1`, `SHA256`).
    pub fn label(&self) -> &'static str {
        match self {
            DigestAlg::Sha1 => "SHA1",
            DigestAlg::Sha256 => "SHA256",
        }
    }

    /// Hashes `prefix || data` and returns the lowercase hex digest.
    fn hex_digest(&self, prefix: &[u8], data: &[u8]) -> String {
        match self {
            DigestAlg::Sha1 => {
                let mut hasher = Sha1::new();
                hasher.update(prefix);
                hasher.update(data);
                hex::encode(hasher.finalize())
            }
            DigestAlg::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(prefix);
                hasher.update(data);
                hex::encode(hasher.finalize())
            }
        }
    }
}

impl fmt::Display for DigestAlg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown algorithm name.
#[derive(Debug, thiserror::Error)]
#[error("unknown digest algorithm '{0}' (expected sha-1 or sha-256)")]
pub struct UnknownAlgError(pub String);

impl FromStr for DigestAlg {
    type Err = UnknownAlgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha-1" | "sha1" => Ok(DigestAlg::Sha1),
            "sha-256" | "sha256" => Ok(DigestAlg::Sha256),
            _ => Err(UnknownAlgError(s.to_string())),
        }
    }
}

/// Rolling hash accumulator.
///
/// The state is the lowercase hex text of the last hash, starting out empty.
/// Each fold replaces it with `hex(H(state || input))`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollingDigest {
    alg: DigestAlg,
    state: String,
}

impl RollingDigest {
    /// Creates an empty accumulator.
    pub fn new(alg: DigestAlg) -> Self {
        Self {
            alg,
            state: String::new(),
        }
    }

    /// Folds `input` into the accumulator.
    pub fn fold(&mut self, input: &[u8]) {
        self.state = self.alg.hex_digest(self.state.as_bytes(), input);
    }

    /// Current hex state (empty until the first fold).
    pub fn hex(&self) -> &str {
        &self.state
    }

    /// Algorithm in use.
    pub fn alg(&self) -> DigestAlg {
        self.alg
    }

    /// Consumes the accumulator and returns its hex state.
    pub fn into_hex(self) -> String {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_accumulator_is_empty_text() {
        assert_eq!(RollingDigest::new(DigestAlg::Sha1).hex(), "");
    }

    #[test]
    fn first_fold_hashes_input_alone() {
        let mut digest = RollingDigest::new(DigestAlg::Sha1);
        digest.fold(b"");
        assert_eq!(digest.hex(), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
    }

    #[test]
    fn fold_chains_on_hex_text() {
        let mut stepped = RollingDigest::new(DigestAlg::Sha256);
        stepped.fold(b"a");
        let first = stepped.hex().to_string();
        stepped.fold(b"b");

        let mut manual = Sha256::new();
        manual.update(first.as_bytes());
        manual.update(b"b");
        assert_eq!(stepped.hex(), hex::encode(manual.finalize()));
        assert_eq!(stepped.hex().len(), 64);
    }

    #[test]
    fn alg_parses_both_spellings() {
        assert_eq!("sha-1".parse::<DigestAlg>().unwrap(), DigestAlg::Sha1);
        assert_eq!("SHA256".parse::<DigestAlg>().unwrap(), DigestAlg::Sha256);
        assert!("md5".parse::<DigestAlg>().is_err());
    }
}
