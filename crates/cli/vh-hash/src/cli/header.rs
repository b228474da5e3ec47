use crate::Error;
use crate::cli::CliCommand;
use crate::cli::input::{InputError, read_hex_input};
use clap::{Args, Parser};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::debug;
use vh_core_primitives::block::header::{BlockHeader, HeaderDecodeError};
use vh_core_primitives::hashes::ChainId;
use vh_header_hash::api::{hash_header_canonical, try_hash_header_canonical};
use vh_header_hash::config::HasherConfig;
use vh_header_hash::init::{InitError, initialize_with_config, reference_primitives};
use vh_header_hash::selector::{CanonicalHasher, HeaderHashError};

/// Error for [`HeaderHash`] and [`Describe`]
#[derive(Debug, thiserror::Error)]
pub(crate) enum HeaderCommandError {
    /// Invalid input
    #[error("Invalid input: {error}")]
    Input {
        /// Low-level error
        #[from]
        error: InputError,
    },
    /// Failed to read config file
    #[error("Failed to read config file: {error}")]
    ReadConfig {
        /// Low-level error
        error: io::Error,
    },
    /// Failed to parse config file
    #[error("Failed to parse config file: {error}")]
    ParseConfig {
        /// Low-level error
        error: serde_json::Error,
    },
    /// Failed to initialize header hashing
    #[error("Failed to initialize header hashing: {error}")]
    Init {
        /// Low-level error
        #[from]
        error: InitError,
    },
    /// Failed to decode header
    #[error("Failed to decode header: {error}")]
    Decode {
        /// Low-level error
        #[from]
        error: HeaderDecodeError,
    },
    /// Failed to hash header
    #[error("Failed to hash header: {error}")]
    Hash {
        /// Low-level error
        #[from]
        error: HeaderHashError,
    },
}

/// Options that define header hashing config
#[derive(Debug, Args)]
pub(crate) struct HasherOptions {
    /// Path to JSON config file
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
    /// Hex-encoded ID of the chain whose commitment marks non-canonical data, overrides config
    /// file
    #[arg(long)]
    pub(crate) chain_id: Option<ChainId>,
}

impl HasherOptions {
    fn hasher_config(&self) -> Result<HasherConfig, HeaderCommandError> {
        let mut config = match &self.config {
            Some(path) => {
                let contents = fs::read_to_string(path)
                    .map_err(|error| HeaderCommandError::ReadConfig { error })?;
                serde_json::from_str(&contents)
                    .map_err(|error| HeaderCommandError::ParseConfig { error })?
            }
            None => HasherConfig::default(),
        };

        if let Some(chain_id) = self.chain_id {
            config.chain_id = chain_id;
        }

        debug!(?config, "Using hasher config");

        Ok(config)
    }

    fn initialize(&self) -> Result<HasherConfig, HeaderCommandError> {
        let config = self.hasher_config()?;
        initialize_with_config(config)?;

        Ok(config)
    }
}

/// Canonical hash of hex-encoded block header
#[derive(Debug, Parser)]
pub(crate) struct HeaderHash {
    /// Hex-encoded block header, read from stdin if not provided
    pub(crate) input: Option<String>,
    /// Fail on headers that can't be decoded instead of printing zero hash
    #[arg(long)]
    pub(crate) strict: bool,
    #[clap(flatten)]
    pub(crate) options: HasherOptions,
}

impl CliCommand for HeaderHash {
    fn run(self) -> Result<(), Error> {
        Ok(self.run()?)
    }
}

impl HeaderHash {
    fn run(self) -> Result<(), HeaderCommandError> {
        let Self {
            input,
            strict,
            options,
        } = self;

        options.initialize()?;
        let header = read_hex_input(input.as_deref())?;

        let hash = if strict {
            try_hash_header_canonical(&header)?
        } else {
            hash_header_canonical(&header)
        };
        println!("{hash}");

        Ok(())
    }
}

/// Decode hex-encoded block header and show how it is hashed
#[derive(Debug, Parser)]
pub(crate) struct Describe {
    /// Hex-encoded block header, read from stdin if not provided
    pub(crate) input: Option<String>,
    #[clap(flatten)]
    pub(crate) options: HasherOptions,
}

impl CliCommand for Describe {
    fn run(self) -> Result<(), Error> {
        Ok(self.run()?)
    }
}

impl Describe {
    fn run(self) -> Result<(), HeaderCommandError> {
        let Self { input, options } = self;

        let config = options.initialize()?;
        let bytes = read_hex_input(input.as_deref())?;
        let (header, remainder) = BlockHeader::try_from_bytes(&bytes)?;
        let hasher = CanonicalHasher::new(reference_primitives(), config);

        let descriptor = header.descriptor();
        println!("Version: {:#010x}", header.version);
        println!("Previous block hash: {}", header.prev_block_hash);
        println!("Merkle root: {}", header.merkle_root);
        println!("Final sapling root: {}", header.final_sapling_root);
        println!("Timestamp: {}", header.timestamp);
        println!("Bits: {:#010x}", header.bits);
        println!("Nonce: {}", header.nonce);
        println!("Solution size: {}", header.solution.len());
        println!("Solution version: {}", descriptor.version);
        println!("PBaaS type: {}", descriptor.pbaas_type());
        println!("Previous MMR root: {}", descriptor.prev_mmr_root);
        println!("Block MMR root: {}", descriptor.block_mmr_root);
        for entry in descriptor.pbaas_headers(&header.solution) {
            println!(
                "PBaaS header: chain {}, pre-header hash {}",
                entry.chain_id, entry.pre_header_hash
            );
        }
        if !remainder.is_empty() {
            println!("Trailing bytes: {}", remainder.len());
        }
        println!("Strategy: {:?}", hasher.select(&header));
        println!(
            "Non-canonical data: {}",
            hasher.has_non_canonical_data(&header)
        );
        println!("Hash: {}", hasher.hash(&header));

        Ok(())
    }
}
