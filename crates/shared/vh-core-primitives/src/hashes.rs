//! Hashes-related data structures.

use core::fmt;
use core::str::FromStr;
use derive_more::{AsMut, AsRef, Deref, DerefMut, From, Into};
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 256-bit hash output transparent wrapper.
///
/// Bytes are stored in their natural order, the same order in which they appear on the wire.
#[derive(
    Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, From, Into, AsMut, Deref, DerefMut,
)]
#[repr(C)]
pub struct Hash256([u8; Hash256::SIZE]);

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for Hash256 {
    type Err = hex::FromHexError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0; Self::SIZE];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
struct Hash256Binary([u8; Hash256::SIZE]);

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
struct Hash256Hex(#[serde(with = "hex")] [u8; Hash256::SIZE]);

#[cfg(feature = "serde")]
impl Serialize for Hash256 {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            Hash256Hex(self.0).serialize(serializer)
        } else {
            Hash256Binary(self.0).serialize(serializer)
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Hash256 {
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self(if deserializer.is_human_readable() {
            Hash256Hex::deserialize(deserializer)?.0
        } else {
            Hash256Binary::deserialize(deserializer)?.0
        }))
    }
}

impl AsRef<[u8]> for Hash256 {
    #[inline(always)]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsMut<[u8]> for Hash256 {
    #[inline(always)]
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl Hash256 {
    /// Size in bytes
    pub const SIZE: usize = 32;
    /// All-zero hash, used as "null" and as the sentinel for failed hashing
    pub const ZERO: Self = Self([0; Self::SIZE]);

    /// Create a new instance
    #[inline(always)]
    pub const fn new(hash: [u8; Self::SIZE]) -> Self {
        Self(hash)
    }

    /// Get internal representation
    #[inline(always)]
    pub const fn as_bytes(&self) -> &[u8; Self::SIZE] {
        &self.0
    }

    /// Whether all bytes are zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == [0; Self::SIZE]
    }

    /// Create an instance from the beginning of provided bytes.
    ///
    /// Returns an instance and remaining bytes on success, `None` if too few bytes were given.
    #[inline]
    pub fn try_from_bytes(mut bytes: &[u8]) -> Option<(Self, &[u8])> {
        let hash = bytes.split_off(..Self::SIZE)?;
        let mut output = [0; Self::SIZE];
        output.copy_from_slice(hash);

        Some((Self(output), bytes))
    }
}

/// Chain identifier, 160-bit, as used by PBaaS header entries
#[derive(
    Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, From, Into, AsRef, AsMut, Deref,
)]
#[repr(C)]
pub struct ChainId([u8; ChainId::SIZE]);

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChainId({self})")
    }
}

impl FromStr for ChainId {
    type Err = hex::FromHexError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0; Self::SIZE];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
struct ChainIdHex(#[serde(with = "hex")] [u8; ChainId::SIZE]);

#[cfg(feature = "serde")]
impl Serialize for ChainId {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ChainIdHex(self.0).serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for ChainId {
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self(ChainIdHex::deserialize(deserializer)?.0))
    }
}

impl ChainId {
    /// Size in bytes
    pub const SIZE: usize = 20;
    /// Null chain ID
    pub const NULL: Self = Self([0; Self::SIZE]);

    /// Create a new instance
    #[inline(always)]
    pub const fn new(id: [u8; Self::SIZE]) -> Self {
        Self(id)
    }

    /// Get internal representation
    #[inline(always)]
    pub const fn as_bytes(&self) -> &[u8; Self::SIZE] {
        &self.0
    }
}
