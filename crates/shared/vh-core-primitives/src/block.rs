//! Block-related primitives

pub mod header;

use crate::hashes::Hash256;
use core::fmt;
use derive_more::{AsMut, AsRef, Deref, DerefMut, From, Into};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Block hash.
///
/// All-zero block hash is "null" and is only used as the parent hash of a genesis block.
#[derive(
    Default,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    From,
    Into,
    AsRef,
    AsMut,
    Deref,
    DerefMut,
)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[repr(C)]
pub struct BlockHash(Hash256);

impl fmt::Display for BlockHash {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for BlockHash {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl AsRef<[u8]> for BlockHash {
    #[inline(always)]
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl From<[u8; Hash256::SIZE]> for BlockHash {
    #[inline(always)]
    fn from(value: [u8; Hash256::SIZE]) -> Self {
        Self(Hash256::new(value))
    }
}

impl BlockHash {
    /// Size in bytes
    pub const SIZE: usize = Hash256::SIZE;
    /// Null block hash
    pub const NULL: Self = Self(Hash256::ZERO);

    /// Create a new instance
    #[inline(always)]
    pub const fn new(hash: Hash256) -> Self {
        Self(hash)
    }

    /// Whether this is a null hash (parent of the genesis block)
    #[inline]
    pub fn is_null(&self) -> bool {
        self.0.is_zero()
    }
}
