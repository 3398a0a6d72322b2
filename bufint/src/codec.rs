//! Nibble <-> hex character conversion.
//!
//! Characters are handled as ASCII bytes. Output is always uppercase; input
//! accepts either case.

use crate::error::{fail, BbiError, Result};

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Convert a nibble (0..=15) to its uppercase hex character.
///
/// ```
/// use bufint::codec::nibble_to_hex_char;
///
/// assert_eq!(nibble_to_hex_char(0xB), Ok(b'B'));
/// assert!(nibble_to_hex_char(16).is_err());
/// ```
pub fn nibble_to_hex_char(nibble: u8) -> Result<u8> {
    match HEX_DIGITS.get(nibble as usize) {
        Some(&c) => Ok(c),
        None => fail(BbiError::BadInput {
            byte: nibble,
            offset: 0,
        }),
    }
}

/// Convert a hex character (`[0-9a-fA-F]`) to its nibble value.
pub fn hex_char_to_nibble(c: u8) -> Result<u8> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => fail(BbiError::NotHex { byte: c }),
    }
}

/// Split a byte into two uppercase hex characters, high nibble first.
#[inline]
pub fn byte_to_hex_chars(byte: u8) -> [u8; 2] {
    [
        HEX_DIGITS[(byte >> 4) as usize],
        HEX_DIGITS[(byte & 0x0F) as usize],
    ]
}

/// Combine a high and a low hex character into one byte.
///
/// The error names which half of the pair was rejected.
pub fn hex_chars_to_byte(high: u8, low: u8) -> Result<u8> {
    let pair = [high, low];
    let Ok(hi) = hex_char_to_nibble(high) else {
        return fail(BbiError::BadHighNibble { pair });
    };
    let Ok(lo) = hex_char_to_nibble(low) else {
        return fail(BbiError::BadLowNibble { pair });
    };
    Ok((hi << 4) | lo)
}

/// Strip an optional `0x` / `0X` prefix.
pub(crate) fn strip_hex_prefix(text: &[u8]) -> &[u8] {
    match text {
        [b'0', b'x' | b'X', rest @ ..] => rest,
        _ => text,
    }
}
