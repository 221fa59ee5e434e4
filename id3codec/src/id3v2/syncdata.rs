//! Synch-safe integers.
//!
//! A synch-safe integer spreads 28 bits over 4 bytes, leaving the top bit of every byte
//! clear so that the bytes can never be mistaken for an MPEG sync marker.

/// The largest value a synch-safe integer can hold.
pub const MAX: u32 = 0x0FFF_FFFF;

/// Convert a plain integer into its synch-safe form, or `None` if it exceeds [`MAX`].
pub fn encode(value: u32) -> Option<u32> {
    if value > MAX {
        return None;
    }

    // Peel off 7 bits at a time, shifting everything above the mask up by one so that
    // the bit under it is left clear.
    let mut encoded = value;
    let mut mask: u32 = 0x7F;

    while mask != 0x7FFF_FFFF {
        encoded = ((encoded & !mask) << 1) | (encoded & mask);
        mask = ((mask + 1) << 8) - 1;
    }

    Some(encoded)
}

/// Convert a synch-safe integer back into a plain integer. The top bit of each byte
/// is ignored.
pub fn decode(value: u32) -> u32 {
    ((value >> 24) & 0x7F) << 21
        | ((value >> 16) & 0x7F) << 14
        | ((value >> 8) & 0x7F) << 7
        | (value & 0x7F)
}

pub fn from_u28(value: u32) -> Option<[u8; 4]> {
    encode(value).map(u32::to_be_bytes)
}

pub fn to_u28(raw: [u8; 4]) -> u32 {
    decode(u32::from_be_bytes(raw))
}

/// Whether `raw` could be a synch-safe integer.
///
/// Passing this check does not prove the bytes were written as synch-safe. Any value
/// below 0x80 is spelled the same either way, and so is any larger value whose plain
/// bytes happen to keep their top bits clear.
pub fn is_sync_safe(raw: &[u8; 4]) -> bool {
    raw.iter().all(|byte| byte & 0x80 == 0)
}
