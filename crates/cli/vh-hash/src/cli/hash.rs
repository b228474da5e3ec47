use crate::Error;
use crate::cli::input::{InputError, read_hex_input};
use clap::Parser;
use tracing::debug;
use vh_core_primitives::hashes::Hash256;
use vh_header_hash::api::{hash_v1, hash_v2, hash_v2b, hash_v2b1, hash_v2b2_raw};
use vh_header_hash::init::{InitError, initialize};

/// Error for [`RawHash`]
#[derive(Debug, thiserror::Error)]
pub(crate) enum RawHashError {
    /// Invalid input
    #[error("Invalid input: {error}")]
    Input {
        /// Low-level error
        #[from]
        error: InputError,
    },
    /// Failed to initialize header hashing
    #[error("Failed to initialize header hashing: {error}")]
    Init {
        /// Low-level error
        #[from]
        error: InitError,
    },
}

/// Hash function applied by [`RawHash`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum RawHashAlgorithm {
    V1,
    V2,
    V2b,
    V2b1,
    V2b2Raw,
}

impl RawHashAlgorithm {
    pub(crate) fn hash_fn(self) -> fn(&[u8]) -> Hash256 {
        match self {
            Self::V1 => hash_v1,
            Self::V2 => hash_v2,
            Self::V2b => hash_v2b,
            Self::V2b1 => hash_v2b1,
            Self::V2b2Raw => hash_v2b2_raw,
        }
    }
}

/// Hash hex-encoded data
#[derive(Debug, Parser)]
pub(crate) struct RawHash {
    /// Hex-encoded data, read from stdin if not provided
    pub(crate) input: Option<String>,
}

impl RawHash {
    pub(crate) fn run(self, algorithm: RawHashAlgorithm) -> Result<(), Error> {
        Ok(self.hash(algorithm)?)
    }

    fn hash(self, algorithm: RawHashAlgorithm) -> Result<(), RawHashError> {
        initialize()?;

        let data = read_hex_input(self.input.as_deref())?;
        debug!(?algorithm, len = data.len(), "Hashing raw data");

        println!("{}", algorithm.hash_fn()(&data));

        Ok(())
    }
}
