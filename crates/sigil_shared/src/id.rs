//! Element identity.
//!
//! Every element is keyed by a 32-bit hash of an explicit id string or of its
//! content. The hash is the only thing that links the layout pass to the
//! interaction pass, and the only thing that survives between frames.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of an element across the two passes of a frame.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HashedId(pub u32);

impl HashedId {
    /// Sentinel for "no element". Never produced by the hash functions.
    pub const NULL: Self = Self(0);

    /// Starting value of the string hash.
    const INITIAL: u32 = 0x8422_2325;

    /// FNV prime.
    const PRIME: u32 = 0x0000_01b3;

    /// Knuth multiplicative constant.
    const KNUTH: u32 = 2_654_435_761;

    /// Hashes a UTF-8 id string.
    #[must_use]
    pub fn of(id: &str) -> Self {
        Self::from_bytes(id.as_bytes(), Self::INITIAL)
    }

    /// Hashes a list of strings into one id, in order.
    #[must_use]
    pub fn from_parts(parts: &[&str]) -> Self {
        let hash = parts
            .iter()
            .fold(Self::INITIAL, |hash, part| Self::from_bytes(part.as_bytes(), hash).0);
        Self::non_null(hash)
    }

    /// Hashes an integer value.
    #[must_use]
    pub fn from_value(value: i32) -> Self {
        #[allow(clippy::cast_sign_loss)]
        let raw = (value as u32).wrapping_mul(Self::KNUTH);
        Self::non_null(raw)
    }

    /// Derives an id for the `seq`-th instance of `id`.
    #[must_use]
    pub fn from_sequence(id: &str, seq: u64) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let seed = ((seq >> 32) ^ seq) as u32;
        Self::from_bytes(id.as_bytes(), seed)
    }

    /// Returns true for the null sentinel.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Returns the raw hash value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    fn from_bytes(bytes: &[u8], seed: u32) -> Self {
        let hash = bytes
            .iter()
            .fold(seed, |hash, &b| (hash ^ u32::from(b)).wrapping_mul(Self::PRIME));
        Self::non_null(hash)
    }

    // Zero is reserved for NULL, so a colliding hash is nudged off it.
    const fn non_null(hash: u32) -> Self {
        if hash == 0 {
            Self(Self::PRIME)
        } else {
            Self(hash)
        }
    }
}

impl From<&str> for HashedId {
    fn from(id: &str) -> Self {
        Self::of(id)
    }
}

impl fmt::Display for HashedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08x}", self.0)
    }
}
