//! Solution descriptor embedded at the beginning of the header's solution field.
//!
//! Newer headers reuse the beginning of the proof-of-work solution to carry a small descriptor
//! that selects the hashing variant and, for PBaaS-enabled versions, commitments to data of other
//! chains. Older or standalone headers are not guaranteed to carry a descriptor at all, so
//! everything here degrades to "no PBaaS data" on short input instead of failing.


use crate::hashes::{ChainId, Hash256};
use alloc::vec::Vec;
use derive_more::{Display, From, Into};

/// Solution version, selects descriptor layout and hashing algorithm variant
#[derive(Debug, Display, Default, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, From, Into)]
#[repr(C)]
pub struct SolutionVersion(u32);

impl SolutionVersion {
    /// Size in bytes
    pub const SIZE: usize = size_of::<u32>();
    /// VerusHash 1.0
    pub const V1: Self = Self(0);
    /// VerusHash 2.0
    pub const V2: Self = Self(1);
    /// Extra nonce in solution
    pub const V3: Self = Self(2);
    /// VerusHash 2.1
    pub const V4: Self = Self(3);
    /// Stake hash and identity
    pub const V5: Self = Self(4);
    /// VerusHash 2.2 and PBaaS headers
    pub const V5_1: Self = Self(5);
    /// PBaaS
    pub const V6: Self = Self(6);
    /// PBaaS header update
    pub const V7: Self = Self(7);
    /// First version that uses VerusHash 2.1
    pub const ACTIVATE_VERUSHASH2_1: Self = Self::V4;
    /// First version that uses VerusHash 2.2
    pub const ACTIVATE_VERUSHASH2_2: Self = Self::V5_1;
    /// First version that carries MMR roots and PBaaS header entries
    pub const ACTIVATE_PBAAS_HEADER: Self = Self::V5_1;

    /// Create a new instance
    #[inline(always)]
    pub const fn new(n: u32) -> Self {
        Self(n)
    }

    /// Get internal representation
    #[inline(always)]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Whether this version carries MMR roots and PBaaS header entries
    #[inline(always)]
    pub const fn supports_pbaas_header(self) -> bool {
        self.0 >= Self::ACTIVATE_PBAAS_HEADER.0
    }
}

/// PBaaS header entry, a commitment to the pre-header of the block on a particular chain
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct PbaasHeaderEntry {
    /// Chain the commitment is for
    pub chain_id: ChainId,
    /// Commitment hash of the pre-header on that chain
    pub pre_header_hash: Hash256,
}

impl PbaasHeaderEntry {
    /// Size in bytes
    pub const SIZE: usize = ChainId::SIZE + Hash256::SIZE;

    /// Create an instance from encoded bytes
    #[inline]
    pub fn from_bytes(bytes: &[u8; Self::SIZE]) -> Self {
        // Layout here is as follows:
        // * chain ID: ChainId
        // * pre-header hash: Hash256

        let mut chain_id = [0; ChainId::SIZE];
        chain_id.copy_from_slice(&bytes[..ChainId::SIZE]);
        let mut pre_header_hash = [0; Hash256::SIZE];
        pre_header_hash.copy_from_slice(&bytes[ChainId::SIZE..]);

        Self {
            chain_id: ChainId::new(chain_id),
            pre_header_hash: Hash256::new(pre_header_hash),
        }
    }

    /// Encoded representation of the entry
    #[inline]
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0; Self::SIZE];
        bytes[..ChainId::SIZE].copy_from_slice(self.chain_id.as_bytes());
        bytes[ChainId::SIZE..].copy_from_slice(self.pre_header_hash.as_bytes());
        bytes
    }
}

/// Parsed view of the descriptor at the beginning of the solution field.
///
/// This is a pure projection of solution bytes, derived fresh whenever needed.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct SolutionDescriptor {
    /// Solution version
    pub version: SolutionVersion,
    /// Descriptor bit flags
    pub descr_bits: u8,
    /// Number of PBaaS header entries, non-zero when the solution carries cross-chain
    /// commitments
    pub num_pbaas_headers: u8,
    /// Size of extra data that follows PBaaS header entries
    pub extra_data_size: u16,
    /// MMR root of the previous block, zero unless the version supports PBaaS headers
    pub prev_mmr_root: Hash256,
    /// MMR root of the block, zero unless the version supports PBaaS headers
    pub block_mmr_root: Hash256,
}

impl SolutionDescriptor {
    /// Size of the part of the descriptor that is present in all versions
    pub const BASE_SIZE: usize = SolutionVersion::SIZE + 2 * size_of::<u8>() + size_of::<u16>();
    /// Size of the descriptor for versions that support PBaaS headers
    pub const PBAAS_SIZE: usize = Self::BASE_SIZE + 2 * Hash256::SIZE;
    /// Offset of MMR roots within the solution
    pub const MMR_ROOTS_OFFSET: usize = Self::BASE_SIZE;

    /// Parse descriptor from solution bytes.
    ///
    /// Never fails: truncated or missing parts of the descriptor are treated as absent.
    pub fn parse(solution: &[u8]) -> Self {
        // Layout here is as follows:
        // * version: u32 as unaligned little-endian bytes
        // * descriptor bits: u8
        // * number of PBaaS headers: u8
        // * extra data size: u16 as unaligned little-endian bytes
        // * (version >= ACTIVATE_PBAAS_HEADER) previous MMR root: Hash256
        // * (version >= ACTIVATE_PBAAS_HEADER) block MMR root: Hash256

        let mut descriptor = Self::default();

        let Some(version) = solution.first_chunk::<{ SolutionVersion::SIZE }>() else {
            return descriptor;
        };
        descriptor.version = SolutionVersion::new(u32::from_le_bytes(*version));

        let Some(&[_, _, _, _, descr_bits, num_pbaas_headers, extra_0, extra_1]) =
            solution.first_chunk::<{ Self::BASE_SIZE }>()
        else {
            return descriptor;
        };
        descriptor.descr_bits = descr_bits;
        descriptor.extra_data_size = u16::from_le_bytes([extra_0, extra_1]);

        if !descriptor.version.supports_pbaas_header() {
            return descriptor;
        }

        let Some((prev_mmr_root, remainder)) =
            Hash256::try_from_bytes(&solution[Self::MMR_ROOTS_OFFSET..])
        else {
            return descriptor;
        };
        let Some((block_mmr_root, _remainder)) = Hash256::try_from_bytes(remainder) else {
            return descriptor;
        };

        descriptor.num_pbaas_headers = num_pbaas_headers;
        descriptor.prev_mmr_root = prev_mmr_root;
        descriptor.block_mmr_root = block_mmr_root;

        descriptor
    }

    /// Non-zero when the solution carries cross-chain commitment data
    #[inline(always)]
    pub const fn pbaas_type(&self) -> u8 {
        self.num_pbaas_headers
    }

    /// Whether the solution carries cross-chain commitment data
    #[inline(always)]
    pub const fn has_pbaas_data(&self) -> bool {
        self.num_pbaas_headers != 0
    }

    /// Append encoded descriptor to `buffer`.
    ///
    /// MMR roots are only written for versions that support PBaaS headers.
    pub fn encode_into(&self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(&self.version.as_u32().to_le_bytes());
        buffer.push(self.descr_bits);
        buffer.push(self.num_pbaas_headers);
        buffer.extend_from_slice(&self.extra_data_size.to_le_bytes());

        if self.version.supports_pbaas_header() {
            buffer.extend_from_slice(self.prev_mmr_root.as_bytes());
            buffer.extend_from_slice(self.block_mmr_root.as_bytes());
        }
    }

    /// Zero MMR roots in place in `solution` bytes.
    ///
    /// Does nothing if `solution` doesn't contain a complete PBaaS descriptor.
    pub fn clear_mmr_roots(solution: &mut [u8]) {
        if !Self::parse(solution).version.supports_pbaas_header() {
            return;
        }
        if let Some(mmr_roots) = solution.get_mut(Self::MMR_ROOTS_OFFSET..Self::PBAAS_SIZE) {
            mmr_roots.fill(0);
        }
    }

    /// Iterate over PBaaS header entries that follow the descriptor in `solution`.
    ///
    /// Only complete entries are returned, at most [`Self::num_pbaas_headers`] of them.
    pub fn pbaas_headers<'a>(
        &self,
        solution: &'a [u8],
    ) -> impl ExactSizeIterator<Item = PbaasHeaderEntry> + 'a {
        let num_entries = if self.has_pbaas_data() {
            let complete_entries =
                solution.len().saturating_sub(Self::PBAAS_SIZE) / PbaasHeaderEntry::SIZE;
            complete_entries.min(usize::from(self.num_pbaas_headers))
        } else {
            0
        };
        let entries = solution
            .get(Self::PBAAS_SIZE..Self::PBAAS_SIZE + num_entries * PbaasHeaderEntry::SIZE)
            .unwrap_or_default();

        entries
            .as_chunks::<{ PbaasHeaderEntry::SIZE }>()
            .0
            .iter()
            .map(PbaasHeaderEntry::from_bytes)
    }
}
