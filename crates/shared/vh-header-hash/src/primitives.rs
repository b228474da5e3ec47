//! Hash primitives consumed by header hashing.
//!
//! Header hashing logic only depends on the [`HashPrimitives`] trait, primitives are injected into
//! [`CanonicalHasher`](crate::selector::CanonicalHasher).
//!
//! [`ReferencePrimitives`] is the backend used by the [`api`](crate::api) module. Double SHA-256
//! is the real thing. VerusHash family members are stand-ins built on keyed BLAKE3 with a distinct
//! derived key per variant and finalize mode: they have the same shape (32-byte output, one
//! independent function per variant/mode), but not the same output as the Haraka-based
//! VerusHash implementation, so a bit-compatible backend needs to be plugged in through
//! [`HashPrimitives`] to verify mainnet headers.

use sha2::{Digest, Sha256};
use vh_core_primitives::hashes::Hash256;
use vh_core_primitives::solutions::SolutionVersion;

/// VerusHash 2 algorithm variant
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum VerusHashV2Variant {
    /// VerusHash 2.0
    V2,
    /// VerusHash 2.1
    V2_1,
    /// VerusHash 2.2
    V2_2,
}

impl VerusHashV2Variant {
    /// All variants
    pub const ALL: [Self; 3] = [Self::V2, Self::V2_1, Self::V2_2];

    /// Variant used for headers with provided solution version
    #[inline]
    pub fn from_solution_version(solution_version: SolutionVersion) -> Self {
        if solution_version >= SolutionVersion::ACTIVATE_VERUSHASH2_2 {
            Self::V2_2
        } else if solution_version >= SolutionVersion::ACTIVATE_VERUSHASH2_1 {
            Self::V2_1
        } else {
            Self::V2
        }
    }

    #[inline(always)]
    const fn index(self) -> usize {
        match self {
            Self::V2 => 0,
            Self::V2_1 => 1,
            Self::V2_2 => 2,
        }
    }
}

/// VerusHash 2 finalize mode
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum VerusHashV2Finalize {
    /// Regular finalization
    Standard,
    /// `2b` finalization, used for block headers
    V2b,
}

impl VerusHashV2Finalize {
    /// All finalize modes
    pub const ALL: [Self; 2] = [Self::Standard, Self::V2b];

    #[inline(always)]
    const fn index(self) -> usize {
        match self {
            Self::Standard => 0,
            Self::V2b => 1,
        }
    }
}

/// Hash primitives used by header hashing
pub trait HashPrimitives: Send + Sync {
    /// Double SHA-256, used for genesis headers
    fn sha256d(&self, data: &[u8]) -> Hash256;

    /// VerusHash 1.0, used for headers before VerusHash 2.0 activation
    fn verus_v1(&self, data: &[u8]) -> Hash256;

    /// VerusHash 2 of provided variant and finalize mode
    fn verus_v2(
        &self,
        data: &[u8],
        variant: VerusHashV2Variant,
        finalize: VerusHashV2Finalize,
    ) -> Hash256;
}

impl<T> HashPrimitives for &T
where
    T: HashPrimitives + ?Sized,
{
    #[inline(always)]
    fn sha256d(&self, data: &[u8]) -> Hash256 {
        (**self).sha256d(data)
    }

    #[inline(always)]
    fn verus_v1(&self, data: &[u8]) -> Hash256 {
        (**self).verus_v1(data)
    }

    #[inline(always)]
    fn verus_v2(
        &self,
        data: &[u8],
        variant: VerusHashV2Variant,
        finalize: VerusHashV2Finalize,
    ) -> Hash256 {
        (**self).verus_v2(data, variant, finalize)
    }
}

const VERUS_V1_CONTEXT: &str = "vh-header-hash 2024-01-01 reference VerusHash 1.0";
const VERUS_V2_CONTEXTS: [[&str; VerusHashV2Finalize::ALL.len()];
    VerusHashV2Variant::ALL.len()] = [
    [
        "vh-header-hash 2024-01-01 reference VerusHash 2.0 finalize",
        "vh-header-hash 2024-01-01 reference VerusHash 2.0 finalize 2b",
    ],
    [
        "vh-header-hash 2024-01-01 reference VerusHash 2.1 finalize",
        "vh-header-hash 2024-01-01 reference VerusHash 2.1 finalize 2b",
    ],
    [
        "vh-header-hash 2024-01-01 reference VerusHash 2.2 finalize",
        "vh-header-hash 2024-01-01 reference VerusHash 2.2 finalize 2b",
    ],
];

/// Reference hash primitives, see module documentation for details.
///
/// Creating an instance derives per-variant key tables, so it should be created once and reused.
#[derive(Debug, Clone)]
pub struct ReferencePrimitives {
    verus_v1_key: [u8; blake3::KEY_LEN],
    verus_v2_keys: [[[u8; blake3::KEY_LEN]; VerusHashV2Finalize::ALL.len()];
        VerusHashV2Variant::ALL.len()],
}

impl Default for ReferencePrimitives {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl HashPrimitives for ReferencePrimitives {
    #[inline]
    fn sha256d(&self, data: &[u8]) -> Hash256 {
        let first: [u8; Hash256::SIZE] = Sha256::digest(data).into();
        Hash256::new(Sha256::digest(first).into())
    }

    #[inline]
    fn verus_v1(&self, data: &[u8]) -> Hash256 {
        Hash256::new(*blake3::keyed_hash(&self.verus_v1_key, data).as_bytes())
    }

    #[inline]
    fn verus_v2(
        &self,
        data: &[u8],
        variant: VerusHashV2Variant,
        finalize: VerusHashV2Finalize,
    ) -> Hash256 {
        let key = &self.verus_v2_keys[variant.index()][finalize.index()];
        Hash256::new(*blake3::keyed_hash(key, data).as_bytes())
    }
}

impl ReferencePrimitives {
    /// Create a new instance, deriving key tables
    pub fn new() -> Self {
        Self {
            verus_v1_key: blake3::derive_key(VERUS_V1_CONTEXT, &[]),
            verus_v2_keys: VERUS_V2_CONTEXTS
                .map(|contexts| contexts.map(|context| blake3::derive_key(context, &[]))),
        }
    }
}
