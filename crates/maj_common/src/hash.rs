//! Fingerprints of emitted logic, used to check runs are diff-stable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// XXH3-128 digest of a byte string or of a value's JSON serialization.
///
/// Equal fingerprints mean two runs emitted byte-identical models.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(u128);

impl ContentHash {
    /// Hashes raw bytes.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self(xxhash_rust::xxh3::xxh3_128(data))
    }

    /// Hashes the compact JSON serialization of `value`.
    ///
    /// Field order follows the type's declaration, so the digest is stable
    /// across runs for types without hash-map fields.
    pub fn of_serialized<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::from_bytes(&serde_json::to_vec(value)?))
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({:08x}..)", self.0 >> 96)
    }
}
