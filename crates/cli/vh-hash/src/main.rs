//! Block header hashing CLI

mod cli;

use crate::cli::CliCommand;
use crate::cli::hash::{RawHash, RawHashAlgorithm, RawHashError};
use crate::cli::header::{Describe, HeaderCommandError, HeaderHash};
use clap::Parser;
use vh_cli_utils::{init_logger, set_exit_on_panic};

/// Block header hashing CLI
#[derive(Debug, Parser)]
#[clap(about, version)]
enum Cli {
    /// Reference VerusHash 1.0 stand-in of hex-encoded data
    V1(RawHash),
    /// Reference VerusHash 2.0 stand-in of hex-encoded data
    V2(RawHash),
    /// Reference VerusHash 2.0 stand-in with `2b` finalization of hex-encoded data
    V2b(RawHash),
    /// Reference VerusHash 2.1 stand-in with `2b` finalization of hex-encoded data
    V2b1(RawHash),
    /// Hash of hex-encoded block header, same as `header`
    V2b2(HeaderHash),
    /// Reference VerusHash 2.2 stand-in with `2b` finalization of hex-encoded data
    V2b2Raw(RawHash),
    /// Canonical hash of hex-encoded block header
    Header(HeaderHash),
    /// Decode hex-encoded block header and show how it is hashed
    Describe(Describe),
}

#[derive(Debug, thiserror::Error)]
enum Error {
    /// Raw hash error
    #[error("Raw hash error: {0}")]
    RawHash(#[from] RawHashError),
    /// Header command error
    #[error("Header command error: {0}")]
    Header(#[from] HeaderCommandError),
}

fn main() -> Result<(), Error> {
    set_exit_on_panic();
    init_logger();

    match Cli::parse() {
        Cli::V1(cmd) => cmd.run(RawHashAlgorithm::V1),
        Cli::V2(cmd) => cmd.run(RawHashAlgorithm::V2),
        Cli::V2b(cmd) => cmd.run(RawHashAlgorithm::V2b),
        Cli::V2b1(cmd) => cmd.run(RawHashAlgorithm::V2b1),
        Cli::V2b2(cmd) => cmd.run(),
        Cli::V2b2Raw(cmd) => cmd.run(RawHashAlgorithm::V2b2Raw),
        Cli::Header(cmd) => cmd.run(),
        Cli::Describe(cmd) => cmd.run(),
    }
}
