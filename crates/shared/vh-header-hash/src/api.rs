//! Boundary functions over raw bytes.
//!
//! All functions use [`ReferencePrimitives`](crate::primitives::ReferencePrimitives), whose
//! VerusHash functions are reference stand-ins rather than the real VerusHash (see
//! [`primitives`](crate::primitives)). Header hashing is initialized implicitly with default
//! config if [`initialize()`] or [`initialize_with_config()`](crate::init::initialize_with_config)
//! wasn't called before.
//!
//! # Panics
//!
//! All functions panic if implicit initialization fails. Call [`initialize()`] explicitly first to
//! handle initialization errors.

use crate::init::{config, initialize, reference_primitives};
use crate::primitives::{
    HashPrimitives, ReferencePrimitives, VerusHashV2Finalize, VerusHashV2Variant,
};
use crate::selector::{CanonicalHasher, HeaderHashError};
use tracing::debug;
use vh_core_primitives::hashes::Hash256;

fn primitives() -> &'static ReferencePrimitives {
    if let Err(error) = initialize() {
        panic!("Header hashing initialization failed: {error}");
    }

    reference_primitives()
}

fn hasher() -> CanonicalHasher<&'static ReferencePrimitives> {
    let primitives = primitives();

    CanonicalHasher::new(primitives, config().unwrap_or_default())
}

/// Reference VerusHash 1.0 stand-in of `data`
pub fn hash_v1(data: &[u8]) -> Hash256 {
    primitives().verus_v1(data)
}

/// Reference VerusHash 2.0 stand-in of `data`
pub fn hash_v2(data: &[u8]) -> Hash256 {
    primitives().verus_v2(data, VerusHashV2Variant::V2, VerusHashV2Finalize::Standard)
}

/// Reference VerusHash 2.0 stand-in of `data` with `2b` finalization
pub fn hash_v2b(data: &[u8]) -> Hash256 {
    primitives().verus_v2(data, VerusHashV2Variant::V2, VerusHashV2Finalize::V2b)
}

/// Reference VerusHash 2.1 stand-in of `data` with `2b` finalization
pub fn hash_v2b1(data: &[u8]) -> Hash256 {
    primitives().verus_v2(data, VerusHashV2Variant::V2_1, VerusHashV2Finalize::V2b)
}

/// Reference VerusHash 2.2 stand-in of `data` with `2b` finalization.
///
/// Hashes bytes as is without decoding them, use [`hash_v2b2()`] for block headers.
pub fn hash_v2b2_raw(data: &[u8]) -> Hash256 {
    primitives().verus_v2(data, VerusHashV2Variant::V2_2, VerusHashV2Finalize::V2b)
}

/// Hash of encoded block header, same as [`hash_header_canonical()`].
///
/// Decodes the header and hashes it according to its version, with non-canonical data cleared.
/// Returns [`Hash256::ZERO`] if header can't be decoded.
#[inline]
pub fn hash_v2b2(header: &[u8]) -> Hash256 {
    hash_header_canonical(header)
}

/// Canonical hash of encoded block header.
///
/// Bytes after the header are ignored.
pub fn try_hash_header_canonical(header: &[u8]) -> Result<Hash256, HeaderHashError> {
    hasher().hash_bytes(header)
}

/// Canonical hash of encoded block header, [`Hash256::ZERO`] if header can't be decoded.
///
/// Lenient counterpart of [`try_hash_header_canonical()`] for callers that treat an all-zero hash
/// as failure.
pub fn hash_header_canonical(header: &[u8]) -> Hash256 {
    try_hash_header_canonical(header).unwrap_or_else(|error| {
        debug!(%error, len = header.len(), "Failed to hash header, returning zero hash");

        Hash256::ZERO
    })
}
