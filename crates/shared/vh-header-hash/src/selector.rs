//! Selection of the header hashing strategy and canonical header hashing


use crate::config::HasherConfig;
use crate::primitives::{HashPrimitives, VerusHashV2Finalize, VerusHashV2Variant};
use tracing::trace;
use vh_core_primitives::block::header::pre_header::PbaasPreHeader;
use vh_core_primitives::block::header::{BlockHeader, HeaderDecodeError};
use vh_core_primitives::hashes::Hash256;

/// Error for [`CanonicalHasher::hash_bytes()`]
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum HeaderHashError {
    /// Failed to decode header
    #[error("Failed to decode header: {error}")]
    Decode {
        /// Low-level error
        #[from]
        error: HeaderDecodeError,
    },
}

/// Strategy used to hash a particular header
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HashStrategy {
    /// Genesis header, double SHA-256 of the encoded header
    Genesis,
    /// Header before VerusHash 2.0 activation, VerusHash 1.0 of the encoded header
    LegacyV1,
    /// VerusHash 2 header without non-canonical data, hashed as is
    V2Standalone {
        /// Variant derived from the solution version
        variant: VerusHashV2Variant,
    },
    /// VerusHash 2 header with a non-canonical commitment to the configured chain, its canonical
    /// projection is hashed
    V2PbaasCanonical {
        /// Variant derived from the solution version
        variant: VerusHashV2Variant,
    },
}

/// Header hasher that hashes canonical header projections where needed.
///
/// Hash primitives are injected, which allows hashing with primitives other than
/// [`ReferencePrimitives`](crate::primitives::ReferencePrimitives).
#[derive(Debug, Clone)]
pub struct CanonicalHasher<P> {
    primitives: P,
    config: HasherConfig,
}

impl<P> CanonicalHasher<P>
where
    P: HashPrimitives,
{
    /// Create a new instance
    #[inline(always)]
    pub fn new(primitives: P, config: HasherConfig) -> Self {
        Self { primitives, config }
    }

    /// Hash primitives in use
    #[inline(always)]
    pub fn primitives(&self) -> &P {
        &self.primitives
    }

    /// Configuration in use
    #[inline(always)]
    pub fn config(&self) -> &HasherConfig {
        &self.config
    }

    /// Commitment hash of the PBaaS pre-header, VerusHash 2.0 with standard finalization
    #[inline]
    pub fn pre_header_hash(&self, pre_header: &PbaasPreHeader) -> Hash256 {
        self.primitives.verus_v2(
            &pre_header.to_bytes(),
            VerusHashV2Variant::V2,
            VerusHashV2Finalize::Standard,
        )
    }

    /// Whether the header carries non-canonical data.
    ///
    /// This is the case when the solution contains a PBaaS header entry for the configured chain
    /// whose pre-header hash matches the commitment hash of the header's pre-header.
    pub fn has_non_canonical_data(&self, header: &BlockHeader) -> bool {
        let descriptor = header.descriptor();
        if !descriptor.has_pbaas_data() {
            return false;
        }

        let Some(entry) = descriptor
            .pbaas_headers(&header.solution)
            .find(|entry| entry.chain_id == self.config.chain_id)
        else {
            return false;
        };

        entry.pre_header_hash == self.pre_header_hash(&header.pre_header())
    }

    /// Select strategy for the header
    pub fn select(&self, header: &BlockHeader) -> HashStrategy {
        if header.is_genesis() {
            return HashStrategy::Genesis;
        }
        if !header.is_version_v2() {
            return HashStrategy::LegacyV1;
        }

        let variant = VerusHashV2Variant::from_solution_version(header.descriptor().version);
        if self.has_non_canonical_data(header) {
            HashStrategy::V2PbaasCanonical { variant }
        } else {
            HashStrategy::V2Standalone { variant }
        }
    }

    /// Hash the header using strategy from [`Self::select()`]
    pub fn hash(&self, header: &BlockHeader) -> Hash256 {
        let strategy = self.select(header);
        trace!(?strategy, version = header.version, "Selected header hash strategy");

        match strategy {
            HashStrategy::Genesis => self.primitives.sha256d(&header.encode()),
            HashStrategy::LegacyV1 => self.primitives.verus_v1(&header.encode()),
            HashStrategy::V2Standalone { variant } => {
                self.primitives
                    .verus_v2(&header.encode(), variant, VerusHashV2Finalize::V2b)
            }
            HashStrategy::V2PbaasCanonical { variant } => self.primitives.verus_v2(
                &header.to_canonical().encode(),
                variant,
                VerusHashV2Finalize::V2b,
            ),
        }
    }

    /// Decode header from `bytes` and hash it with [`Self::hash()`].
    ///
    /// Bytes after the header are ignored.
    pub fn hash_bytes(&self, bytes: &[u8]) -> Result<Hash256, HeaderHashError> {
        let (header, remainder) = BlockHeader::try_from_bytes(bytes)?;
        if !remainder.is_empty() {
            trace!(trailing = remainder.len(), "Ignoring bytes after the header");
        }

        Ok(self.hash(&header))
    }
}
