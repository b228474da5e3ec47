//! Canonical block header hashing for standalone and PBaaS chains.
//!
//! Block headers on chains that carry cross-chain (PBaaS) commitment data embed chain-specific MMR
//! roots in the solution field. When the header commits to its own pre-header for the configured
//! chain, those roots are cleared before hashing, so the same header hashes identically on every
//! chain it is merge-mined with.
//!
//! [`selector::CanonicalHasher`] implements hashing over injected [`primitives::HashPrimitives`],
//! [`api`] exposes boundary functions over raw bytes backed by process-wide state from [`init`].

#![warn(rust_2018_idioms, missing_debug_implementations, missing_docs)]

pub mod api;
pub mod config;
pub mod init;
pub mod primitives;
pub mod selector;
