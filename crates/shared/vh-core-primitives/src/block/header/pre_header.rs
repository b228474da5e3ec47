//! PBaaS pre-header, the chain-independent summary of a block header

use crate::block::BlockHash;
use crate::block::header::BlockHeader;
use crate::hashes::Hash256;

/// PBaaS pre-header.
///
/// Contains exactly the subset of header data that a merge-mined header commits to for each chain
/// in its PBaaS header entries. Constructed with [`Self::derive()`] and immutable afterwards.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct PbaasPreHeader {
    prev_block_hash: BlockHash,
    merkle_root: Hash256,
    final_sapling_root: Hash256,
    nonce: Hash256,
    bits: u32,
    prev_mmr_root: Hash256,
    block_mmr_root: Hash256,
}

impl PbaasPreHeader {
    /// Size of the encoded pre-header
    pub const SIZE: usize =
        BlockHash::SIZE + Hash256::SIZE * 3 + size_of::<u32>() + Hash256::SIZE * 2;

    /// Derive pre-header from a block header.
    ///
    /// MMR roots are only taken from the solution descriptor when its version supports PBaaS
    /// headers, otherwise they are zero.
    pub fn derive(header: &BlockHeader) -> Self {
        let descriptor = header.descriptor();
        let (prev_mmr_root, block_mmr_root) = if descriptor.version.supports_pbaas_header() {
            (descriptor.prev_mmr_root, descriptor.block_mmr_root)
        } else {
            (Hash256::ZERO, Hash256::ZERO)
        };

        Self {
            prev_block_hash: header.prev_block_hash,
            merkle_root: header.merkle_root,
            final_sapling_root: header.final_sapling_root,
            nonce: header.nonce,
            bits: header.bits,
            prev_mmr_root,
            block_mmr_root,
        }
    }

    /// Hash of the parent block
    #[inline(always)]
    pub fn prev_block_hash(&self) -> &BlockHash {
        &self.prev_block_hash
    }

    /// Root of the block's transactions
    #[inline(always)]
    pub fn merkle_root(&self) -> &Hash256 {
        &self.merkle_root
    }

    /// Root of the Sapling note commitment tree
    #[inline(always)]
    pub fn final_sapling_root(&self) -> &Hash256 {
        &self.final_sapling_root
    }

    /// Nonce
    #[inline(always)]
    pub fn nonce(&self) -> &Hash256 {
        &self.nonce
    }

    /// Compact difficulty target
    #[inline(always)]
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// MMR root of the previous block
    #[inline(always)]
    pub fn prev_mmr_root(&self) -> &Hash256 {
        &self.prev_mmr_root
    }

    /// MMR root of the block
    #[inline(always)]
    pub fn block_mmr_root(&self) -> &Hash256 {
        &self.block_mmr_root
    }

    /// Encoded representation, the input of the pre-header commitment hash
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        // Layout here is as follows:
        // * previous block hash: BlockHash
        // * merkle root: Hash256
        // * final Sapling root: Hash256
        // * nonce: Hash256
        // * bits: u32 as little-endian bytes
        // * previous MMR root: Hash256
        // * block MMR root: Hash256

        let mut bytes = [0; Self::SIZE];
        let mut offset = 0;
        for field in [
            self.prev_block_hash.as_bytes().as_slice(),
            self.merkle_root.as_bytes().as_slice(),
            self.final_sapling_root.as_bytes().as_slice(),
            self.nonce.as_bytes().as_slice(),
            self.bits.to_le_bytes().as_slice(),
            self.prev_mmr_root.as_bytes().as_slice(),
            self.block_mmr_root.as_bytes().as_slice(),
        ] {
            bytes[offset..][..field.len()].copy_from_slice(field);
            offset += field.len();
        }

        bytes
    }
}
