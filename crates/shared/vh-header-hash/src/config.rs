//! Header hashing configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use vh_core_primitives::hashes::ChainId;

/// Configuration of canonical header hashing
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", deny_unknown_fields))]
pub struct HasherConfig {
    /// ID of the chain whose PBaaS header entry marks a header as carrying non-canonical data.
    ///
    /// Defaults to the null chain ID.
    #[cfg_attr(feature = "serde", serde(default))]
    pub chain_id: ChainId,
}

impl HasherConfig {
    /// Configuration for a specific chain
    #[inline(always)]
    pub const fn new(chain_id: ChainId) -> Self {
        Self { chain_id }
    }
}
