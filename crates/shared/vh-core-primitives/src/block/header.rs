//! Block header primitives

pub mod canonical;
pub mod pre_header;
#[cfg(test)]
mod tests;

use crate::block::BlockHash;
use crate::block::header::canonical::CanonicalBlockHeader;
use crate::block::header::pre_header::PbaasPreHeader;
use crate::compact_size::{
    CompactSizeError, compact_size_len, read_compact_size, write_compact_size,
};
use crate::hashes::Hash256;
use crate::solutions::SolutionDescriptor;
use alloc::vec::Vec;

/// Errors for [`BlockHeader::try_from_bytes()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum HeaderDecodeError {
    /// Not enough bytes for fixed-size header fields
    #[error("Not enough bytes for fixed-size header fields: {actual} < {expected}")]
    TruncatedFixedFields {
        /// Expected number of bytes
        expected: usize,
        /// Actual number of bytes
        actual: usize,
    },
    /// Invalid solution length prefix
    #[error("Invalid solution length prefix: {error}")]
    SolutionLength {
        /// Low-level error
        #[from]
        error: CompactSizeError,
    },
    /// Solution is shorter than its length prefix says
    #[error("Solution is shorter than its length prefix says: {actual} < {expected}")]
    TruncatedSolution {
        /// Length from the prefix
        expected: u64,
        /// Available number of bytes
        actual: usize,
    },
}

/// Block header.
///
/// All fields except `solution` are hashed verbatim, only data inside `solution` is ever subject
/// to canonicalization (see [`CanonicalBlockHeader`]).
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct BlockHeader {
    /// Header version
    pub version: i32,
    /// Hash of the parent block, null for genesis block
    pub prev_block_hash: BlockHash,
    /// Root of the block's transactions
    pub merkle_root: Hash256,
    /// Root of the Sapling note commitment tree after this block
    pub final_sapling_root: Hash256,
    /// Unix timestamp in seconds
    pub timestamp: u32,
    /// Compact difficulty target
    pub bits: u32,
    /// Nonce
    pub nonce: Hash256,
    /// Proof-of-work solution, possibly with an embedded [`SolutionDescriptor`]
    pub solution: Vec<u8>,
}

impl BlockHeader {
    /// Original header version, hashed with VerusHash 1.0
    pub const VERSION_V1: i32 = 4;
    /// Version bit that enables VerusHash 2.0 and later
    pub const VERSION_VERUSHASH_V2_BIT: i32 = 0x0001_0000;
    /// Header version hashed with VerusHash 2.0 and later
    pub const VERSION_V2: i32 = Self::VERSION_V1 | Self::VERSION_VERUSHASH_V2_BIT;
    /// Size of all fields except solution
    pub const FIXED_SIZE: usize = size_of::<i32>()
        + BlockHash::SIZE
        + Hash256::SIZE * 2
        + size_of::<u32>() * 2
        + Hash256::SIZE;

    /// Try to create a new instance from provided bytes.
    ///
    /// Returns an instance and remaining bytes on success.
    pub fn try_from_bytes(mut bytes: &[u8]) -> Result<(Self, &[u8]), HeaderDecodeError> {
        // Layout here is as follows:
        // * version: i32 as little-endian bytes
        // * previous block hash: BlockHash
        // * merkle root: Hash256
        // * final Sapling root: Hash256
        // * timestamp: u32 as little-endian bytes
        // * bits: u32 as little-endian bytes
        // * nonce: Hash256
        // * solution: CompactSize length followed by solution bytes

        let Some(fixed) = bytes.split_off(..Self::FIXED_SIZE) else {
            return Err(HeaderDecodeError::TruncatedFixedFields {
                expected: Self::FIXED_SIZE,
                actual: bytes.len(),
            });
        };
        let (version, fixed) = split_array::<4>(fixed);
        let (prev_block_hash, fixed) = split_array::<{ BlockHash::SIZE }>(fixed);
        let (merkle_root, fixed) = split_array::<{ Hash256::SIZE }>(fixed);
        let (final_sapling_root, fixed) = split_array::<{ Hash256::SIZE }>(fixed);
        let (timestamp, fixed) = split_array::<4>(fixed);
        let (bits, fixed) = split_array::<4>(fixed);
        let (nonce, _fixed) = split_array::<{ Hash256::SIZE }>(fixed);

        let solution_len;
        (solution_len, bytes) = read_compact_size(bytes)?;
        let solution = usize::try_from(solution_len)
            .ok()
            .and_then(|solution_len| bytes.split_off(..solution_len))
            .ok_or(HeaderDecodeError::TruncatedSolution {
                expected: solution_len,
                actual: bytes.len(),
            })?;

        Ok((
            Self {
                version: i32::from_le_bytes(version),
                prev_block_hash: BlockHash::from(prev_block_hash),
                merkle_root: Hash256::new(merkle_root),
                final_sapling_root: Hash256::new(final_sapling_root),
                timestamp: u32::from_le_bytes(timestamp),
                bits: u32::from_le_bytes(bits),
                nonce: Hash256::new(nonce),
                solution: solution.to_vec(),
            },
            bytes,
        ))
    }

    /// Size of the encoded header in bytes
    #[inline]
    pub fn encoded_size(&self) -> usize {
        Self::FIXED_SIZE + compact_size_len(self.solution.len() as u64) + self.solution.len()
    }

    /// Append encoded header to `buffer`
    pub fn encode_into(&self, buffer: &mut Vec<u8>) {
        buffer.reserve(self.encoded_size());
        buffer.extend_from_slice(&self.version.to_le_bytes());
        buffer.extend_from_slice(self.prev_block_hash.as_bytes());
        buffer.extend_from_slice(self.merkle_root.as_bytes());
        buffer.extend_from_slice(self.final_sapling_root.as_bytes());
        buffer.extend_from_slice(&self.timestamp.to_le_bytes());
        buffer.extend_from_slice(&self.bits.to_le_bytes());
        buffer.extend_from_slice(self.nonce.as_bytes());
        write_compact_size(buffer, self.solution.len() as u64);
        buffer.extend_from_slice(&self.solution);
    }

    /// Encode header into a new buffer
    #[inline]
    pub fn encode(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(self.encoded_size());
        self.encode_into(&mut buffer);
        buffer
    }

    /// Whether this is a genesis block header (has null parent hash)
    #[inline]
    pub fn is_genesis(&self) -> bool {
        self.prev_block_hash.is_null()
    }

    /// Whether this header version is hashed with VerusHash 2.0 and later
    #[inline(always)]
    pub const fn is_version_v2(&self) -> bool {
        self.version == Self::VERSION_V2
    }

    /// Parse solution descriptor from the solution field
    #[inline]
    pub fn descriptor(&self) -> SolutionDescriptor {
        SolutionDescriptor::parse(&self.solution)
    }

    /// Derive PBaaS pre-header from this header
    #[inline]
    pub fn pre_header(&self) -> PbaasPreHeader {
        PbaasPreHeader::derive(self)
    }

    /// Canonical projection of this header with non-canonical data cleared
    #[inline]
    pub fn to_canonical(&self) -> CanonicalBlockHeader {
        CanonicalBlockHeader::project(self)
    }
}

#[inline(always)]
fn split_array<const N: usize>(bytes: &[u8]) -> ([u8; N], &[u8]) {
    let (array, remainder) = bytes.split_at(N);
    let mut output = [0; N];
    output.copy_from_slice(array);
    (output, remainder)
}
