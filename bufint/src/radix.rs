//! Decimal <-> hex text conversion of arbitrary length.
//!
//! Both directions run the same long-multiplication engine over "cells":
//! one digit of the target radix per byte, big-endian, right-aligned inside
//! the caller's output buffer. Each input digit multiplies every active cell
//! by the source radix and adds the digit, carrying leftward. Cost is
//! O(digits^2), fine for the operand sizes this crate targets.
//!
//! The output buffer doubles as scratch space, so no extra memory is needed.
//! A conversion that runs out of room mid-way reports
//! [`BbiError::StringBufTooSmallPartial`]: the buffer then holds cell garbage.
//!
//! The converters work on magnitudes only; sign handling lives in
//! [`Bbi`](crate::Bbi)'s decimal methods.

use crate::codec::{hex_char_to_nibble, nibble_to_hex_char, strip_hex_prefix};
use crate::error::{fail, BbiError, Result};

const MIN_HEX_TEXT: usize = 5; // "0x00" + NUL
pub(crate) const MIN_DECIMAL_TEXT: usize = 2; // "0" + NUL

/// Multiply the cells by `factor` and add `addend`, all in radix `base`.
///
/// The value occupies the `active` rightmost cells of `cells`; growth extends
/// it leftward. Returns the new active width, or `None` once the value no
/// longer fits.
pub(crate) fn mul_add_cells(
    cells: &mut [u8],
    active: usize,
    base: u32,
    factor: u32,
    addend: u32,
) -> Option<usize> {
    let len = cells.len();
    let mut carry = addend;
    for cell in cells[len - active..].iter_mut().rev() {
        let v = *cell as u32 * factor + carry;
        *cell = (v % base) as u8;
        carry = v / base;
    }
    let mut active = active;
    while carry != 0 {
        if active == len {
            return None;
        }
        active += 1;
        cells[len - active] = (carry % base) as u8;
        carry /= base;
    }
    Some(active)
}

/// Move the `digits` rightmost cells of `region` to its front as ASCII and
/// terminate them with NUL. `out_len` is only used for error reporting.
pub(crate) fn emit_cells(region: &mut [u8], digits: usize, out_len: usize) -> Result<usize> {
    let start = region.len() - digits;
    region.copy_within(start.., 0);
    for cell in &mut region[..digits] {
        *cell = nibble_to_hex_char(*cell)?;
    }
    match region.get_mut(digits) {
        Some(nul) => {
            *nul = 0;
            Ok(digits)
        }
        None => fail(BbiError::StringBufTooSmallNoNull { len: out_len }),
    }
}

/// Convert decimal magnitude text to `0x`-prefixed uppercase hex text.
///
/// The hex digits are byte-aligned. When the leading digit would set the
/// sign bit, a `00` pair is kept in front so the text loads back as a
/// non-negative value. Returns the text length, NUL excluded.
///
/// ```
/// use bufint::radix::decimal_text_to_hex_text;
///
/// let mut out = [0u8; 16];
/// let n = decimal_text_to_hex_text("4660", &mut out).unwrap();
/// assert_eq!(&out[..n], b"0x1234");
///
/// let n = decimal_text_to_hex_text("255", &mut out).unwrap();
/// assert_eq!(&out[..n], b"0x00FF");
/// ```
pub fn decimal_text_to_hex_text(dec: &str, out: &mut [u8]) -> Result<usize> {
    let digits = dec.as_bytes();
    if digits.is_empty() {
        return fail(BbiError::ZeroLenString);
    }
    if let Some(offset) = digits.iter().position(|c| !c.is_ascii_digit()) {
        return fail(BbiError::BadInput {
            byte: digits[offset],
            offset,
        });
    }
    if out.len() < MIN_HEX_TEXT {
        return fail(BbiError::StringBufTooSmall {
            needed: MIN_HEX_TEXT,
            len: out.len(),
        });
    }

    let out_len = out.len();
    let region = &mut out[2..];
    let room = region.len();
    let mut active = 0;
    for &c in digits {
        active = match mul_add_cells(region, active, 16, 10, (c - b'0') as u32) {
            Some(a) => a,
            None => return fail(BbiError::StringBufTooSmallPartial { len: out_len }),
        };
    }

    // Whole bytes, and a spare 00 pair if the top nibble would read as a sign.
    let mut width = active.max(2);
    width += width % 2;
    if width == active && region[room - active] >= 8 {
        width += 2;
    }
    if width > room {
        return fail(BbiError::StringBufTooSmallPartial { len: out_len });
    }
    region[room - width..room - active].fill(0);

    let n = emit_cells(region, width, out_len)?;
    out[..2].copy_from_slice(b"0x");
    Ok(n + 2)
}

/// Convert hex magnitude text (optional `0x`/`0X`) to decimal text.
///
/// Leading zeros are stripped; zero renders as `"0"`. Returns the text
/// length, NUL excluded.
///
/// ```
/// use bufint::radix::hex_text_to_decimal_text;
///
/// let mut out = [0u8; 16];
/// let n = hex_text_to_decimal_text("0x00FF", &mut out).unwrap();
/// assert_eq!(&out[..n], b"255");
/// ```
pub fn hex_text_to_decimal_text(hex: &str, out: &mut [u8]) -> Result<usize> {
    let digits = strip_hex_prefix(hex.as_bytes());
    if digits.is_empty() {
        return fail(BbiError::ZeroLenString);
    }
    let prefix = hex.len() - digits.len();
    if let Some(offset) = digits.iter().position(|c| !c.is_ascii_hexdigit()) {
        return fail(BbiError::BadInput {
            byte: digits[offset],
            offset: prefix + offset,
        });
    }
    if out.len() < MIN_DECIMAL_TEXT {
        return fail(BbiError::StringBufTooSmall {
            needed: MIN_DECIMAL_TEXT,
            len: out.len(),
        });
    }

    let out_len = out.len();
    let mut active = 0;
    for &c in digits {
        let nibble = hex_char_to_nibble(c)? as u32;
        active = match mul_add_cells(out, active, 10, 16, nibble) {
            Some(a) => a,
            None => return fail(BbiError::StringBufTooSmallPartial { len: out_len }),
        };
    }
    if active == 0 {
        out[out_len - 1] = 0;
        active = 1;
    }
    emit_cells(out, active, out_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_hex(dec: &str) -> String {
        let mut out = [0u8; 64];
        let n = decimal_text_to_hex_text(dec, &mut out).unwrap();
        assert_eq!(out[n], 0, "missing terminator");
        String::from_utf8(out[..n].to_vec()).unwrap()
    }

    fn to_dec(hex: &str) -> String {
        let mut out = [0u8; 64];
        let n = hex_text_to_decimal_text(hex, &mut out).unwrap();
        assert_eq!(out[n], 0, "missing terminator");
        String::from_utf8(out[..n].to_vec()).unwrap()
    }

    #[test]
    fn test_mul_add_cells_grows_left() {
        let mut cells = [0u8; 4];
        let mut active = 0;
        for d in [1, 2, 3] {
            active = mul_add_cells(&mut cells, active, 10, 10, d).unwrap();
        }
        assert_eq!(active, 3);
        assert_eq!(&cells[1..], &[1, 2, 3]);
        assert_eq!(mul_add_cells(&mut cells, active, 10, 100, 0), None);
    }

    #[test]
    fn test_decimal_to_hex() {
        assert_eq!(to_hex("0"), "0x00");
        assert_eq!(to_hex("10"), "0x0A");
        assert_eq!(to_hex("4095"), "0x0FFF");
        assert_eq!(to_hex("127"), "0x7F");
        assert_eq!(to_hex("128"), "0x0080");
        assert_eq!(to_hex("0042"), "0x2A");
        assert_eq!(to_hex("12345678901234567890000"), "0x029D42B64E7671424450");
    }

    #[test]
    fn test_hex_to_decimal() {
        assert_eq!(to_dec("0"), "0");
        assert_eq!(to_dec("0x0000"), "0");
        assert_eq!(to_dec("0X2a"), "42");
        assert_eq!(to_dec("FFFFFFFFFFFFFFFF"), "18446744073709551615");
    }

    #[test]
    fn test_decimal_round_trip() {
        let dec = "12345678901234567890000";
        assert_eq!(to_dec(&to_hex(dec)), dec);
    }

    #[test]
    fn test_bad_input_reports_offset() {
        let mut out = [0u8; 16];
        assert_eq!(
            decimal_text_to_hex_text("12a4", &mut out),
            Err(BbiError::BadInput {
                byte: b'a',
                offset: 2
            })
        );
        assert_eq!(
            hex_text_to_decimal_text("0x1g", &mut out),
            Err(BbiError::BadInput {
                byte: b'g',
                offset: 3
            })
        );
    }

    #[test]
    fn test_empty_input() {
        let mut out = [0u8; 16];
        assert_eq!(
            decimal_text_to_hex_text("", &mut out),
            Err(BbiError::ZeroLenString)
        );
        assert_eq!(
            hex_text_to_decimal_text("0x", &mut out),
            Err(BbiError::ZeroLenString)
        );
    }

    #[test]
    fn test_small_output_buffers() {
        let mut tiny = [0u8; 4];
        assert_eq!(
            decimal_text_to_hex_text("1", &mut tiny),
            Err(BbiError::StringBufTooSmall { needed: 5, len: 4 })
        );

        // "0x" + "FFFF" needs 6 bytes plus the terminator.
        let mut six = [0u8; 6];
        assert_eq!(
            decimal_text_to_hex_text("32767", &mut six),
            Err(BbiError::StringBufTooSmallNoNull { len: 6 })
        );
        let mut five = [0u8; 5];
        assert_eq!(
            decimal_text_to_hex_text("65535", &mut five),
            Err(BbiError::StringBufTooSmallPartial { len: 5 })
        );

        let mut three = [0u8; 3];
        assert_eq!(
            hex_text_to_decimal_text("0xFF", &mut three),
            Err(BbiError::StringBufTooSmallNoNull { len: 3 })
        );
        assert_eq!(
            hex_text_to_decimal_text("0x3E8", &mut three),
            Err(BbiError::StringBufTooSmallPartial { len: 3 })
        );
    }
}
