//! Canonical projection of a block header

use crate::block::header::BlockHeader;
use crate::solutions::SolutionDescriptor;
use alloc::vec::Vec;

/// Block header with non-canonical data cleared.
///
/// Non-canonical data is chain-specific content of the solution descriptor (MMR roots) that a
/// verifier without access to full chain state can't reproduce, but that is committed to by the
/// header's PBaaS header entries. Clearing it makes the header hash identical across chains.
///
/// The projection is immutable and only exposes read access, it is meant to be encoded and hashed
/// rather than used in place of the original [`BlockHeader`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CanonicalBlockHeader {
    header: BlockHeader,
}

impl CanonicalBlockHeader {
    /// Create canonical projection of the provided header
    pub fn project(header: &BlockHeader) -> Self {
        let mut header = header.clone();
        SolutionDescriptor::clear_mmr_roots(&mut header.solution);

        Self { header }
    }

    /// Read-only access to the projected header fields
    #[inline(always)]
    pub fn header(&self) -> &BlockHeader {
        &self.header
    }

    /// Append encoded canonical header to `buffer`
    #[inline]
    pub fn encode_into(&self, buffer: &mut Vec<u8>) {
        self.header.encode_into(buffer);
    }

    /// Encode canonical header into a new buffer
    #[inline]
    pub fn encode(&self) -> Vec<u8> {
        self.header.encode()
    }
}
