use std::io;
use std::io::Read;

/// Error for [`read_hex_input()`]
#[derive(Debug, thiserror::Error)]
pub(crate) enum InputError {
    /// Failed to read input from stdin
    #[error("Failed to read input from stdin: {error}")]
    ReadStdin {
        /// Low-level error
        error: io::Error,
    },
    /// Input is not valid hex
    #[error("Input is not valid hex: {error}")]
    Hex {
        /// Low-level error
        #[from]
        error: hex::FromHexError,
    },
}

/// Decode hex input from the argument or from stdin if the argument is missing.
///
/// Surrounding whitespace and an optional `0x` prefix are ignored.
pub(crate) fn read_hex_input(input: Option<&str>) -> Result<Vec<u8>, InputError> {
    let stdin_input;
    let input = match input {
        Some(input) => input,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|error| InputError::ReadStdin { error })?;
            stdin_input = buffer;
            &stdin_input
        }
    };

    decode_hex(input)
}

pub(crate) fn decode_hex(input: &str) -> Result<Vec<u8>, InputError> {
    let input = input.trim();
    let input = input.strip_prefix("0x").unwrap_or(input);

    Ok(hex::decode(input)?)
}
