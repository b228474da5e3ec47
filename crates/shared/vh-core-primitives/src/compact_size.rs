//! CompactSize length prefix used by variable-length header fields.

#[cfg(test)]
mod tests;

use alloc::vec::Vec;

/// Largest length accepted for a length-prefixed field
pub const MAX_SIZE: u64 = 0x0200_0000;

/// Errors for [`read_compact_size()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum CompactSizeError {
    /// Not enough bytes to read the length prefix
    #[error("Not enough bytes to read the length prefix")]
    Truncated,
    /// Value was not encoded in the shortest possible form
    #[error("Non-canonical length prefix for value {value}")]
    NonCanonical {
        /// Decoded value
        value: u64,
    },
    /// Value exceeds [`MAX_SIZE`]
    #[error("Length {value} exceeds maximum of {MAX_SIZE}")]
    TooLarge {
        /// Decoded value
        value: u64,
    },
}

/// Read a CompactSize value from the beginning of `bytes`.
///
/// Returns the value and remaining bytes on success.
pub fn read_compact_size(mut bytes: &[u8]) -> Result<(u64, &[u8]), CompactSizeError> {
    // Layout here is as follows:
    // * < 0xfd: the value itself as a single byte
    // * 0xfd: u16 as little-endian bytes, value >= 0xfd
    // * 0xfe: u32 as little-endian bytes, value >= 0x1_0000
    // * 0xff: u64 as little-endian bytes, value >= 0x1_0000_0000

    let marker = bytes.split_off_first().ok_or(CompactSizeError::Truncated)?;

    let (value, min_value) = match *marker {
        0xfd => {
            let value = bytes
                .split_off(..size_of::<u16>())
                .ok_or(CompactSizeError::Truncated)?;
            (u64::from(u16::from_le_bytes([value[0], value[1]])), 0xfd)
        }
        0xfe => {
            let value = bytes
                .split_off(..size_of::<u32>())
                .ok_or(CompactSizeError::Truncated)?;
            (
                u64::from(u32::from_le_bytes([value[0], value[1], value[2], value[3]])),
                0x1_0000,
            )
        }
        0xff => {
            let value = bytes
                .split_off(..size_of::<u64>())
                .ok_or(CompactSizeError::Truncated)?;
            (
                u64::from_le_bytes([
                    value[0], value[1], value[2], value[3], value[4], value[5], value[6], value[7],
                ]),
                0x1_0000_0000,
            )
        }
        marker => (u64::from(marker), 0),
    };

    if value < min_value {
        return Err(CompactSizeError::NonCanonical { value });
    }
    if value > MAX_SIZE {
        return Err(CompactSizeError::TooLarge { value });
    }

    Ok((value, bytes))
}

/// Append CompactSize encoding of `value` to `buffer`
pub fn write_compact_size(buffer: &mut Vec<u8>, value: u64) {
    if value < 0xfd {
        buffer.push(value as u8);
    } else if let Ok(value) = u16::try_from(value) {
        buffer.push(0xfd);
        buffer.extend_from_slice(&value.to_le_bytes());
    } else if let Ok(value) = u32::try_from(value) {
        buffer.push(0xfe);
        buffer.extend_from_slice(&value.to_le_bytes());
    } else {
        buffer.push(0xff);
        buffer.extend_from_slice(&value.to_le_bytes());
    }
}

/// Size of CompactSize encoding of `value` in bytes
#[inline]
pub const fn compact_size_len(value: u64) -> usize {
    if value < 0xfd {
        1
    } else if value <= u16::MAX as u64 {
        1 + size_of::<u16>()
    } else if value <= u32::MAX as u64 {
        1 + size_of::<u32>()
    } else {
        1 + size_of::<u64>()
    }
}
