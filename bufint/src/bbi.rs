//! The buffer-backed integer.
//!
//! A [`Bbi`] is a view over caller-owned storage plus a count of significant
//! bytes. The significant bytes sit at the *end* of the buffer, most
//! significant first, and read as a two's-complement value: the high bit of
//! the first significant byte is the sign. Bytes in front of the window are
//! sign-extension filler kept for legibility in a debugger; nothing reads them.

use core::fmt;

use crate::codec::{byte_to_hex_chars, hex_chars_to_byte, strip_hex_prefix};
use crate::error::{fail, BbiError, Result};
use crate::radix::{emit_cells, mul_add_cells, MIN_DECIMAL_TEXT};

/// Signed arbitrary-precision integer over a fixed byte buffer.
///
/// `S` is any byte storage: `[u8; N]` on the stack, `&mut [u8]` borrowed
/// from elsewhere, or `Vec<u8>` with the `alloc` feature. The integer never
/// grows its storage; every operation that needs more room fails instead.
///
/// ```
/// use bufint::Bbi;
///
/// let mut a = Bbi::new([0u8; 8]);
/// let mut b = Bbi::new([0u8; 8]);
/// a.load_from_decimal("1000").unwrap();
/// b.load_from_hex("0x18").unwrap();
///
/// let mut sum = Bbi::new([0u8; 8]);
/// sum.add(&a, &b).unwrap();
/// assert_eq!(sum.to_string(), "0x0400");
/// ```
#[derive(Clone)]
pub struct Bbi<S> {
    pub(crate) storage: S,
    pub(crate) used: usize,
}

/// Vec-backed integer for hosts that can allocate.
#[cfg(feature = "alloc")]
pub type OwnedBbi = Bbi<alloc::vec::Vec<u8>>;

/// Sign-extension byte implied by `byte`'s high bit.
#[inline(always)]
pub(crate) const fn sign_of(byte: u8) -> u8 {
    if byte & 0x80 != 0 {
        0xFF
    } else {
        0x00
    }
}

/// Number of leading pairs the text form drops: while the first two bytes
/// are both `00` or both `FF`, the first one is redundant. Runs like
/// `0x0012` survive; this is not a minimal-width guarantee.
fn canonical_skip(bytes: &[u8]) -> usize {
    bytes
        .windows(2)
        .take_while(|w| w[0] == w[1] && (w[0] == 0x00 || w[0] == 0xFF))
        .count()
}

// ============================================================================
// Read-only API
// ============================================================================

impl<S: AsRef<[u8]>> Bbi<S> {
    /// Adopt a buffer that already holds a value in its `used` trailing bytes.
    pub fn from_parts(storage: S, used: usize) -> Result<Self> {
        let capacity = storage.as_ref().len();
        if used == 0 {
            return fail(BbiError::MissingOperand);
        }
        if used > capacity {
            return fail(BbiError::BytesTooSmall {
                needed: used,
                capacity,
            });
        }
        Ok(Self { storage, used })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.as_ref().len()
    }

    /// Count of significant bytes.
    #[inline]
    pub fn used(&self) -> usize {
        self.used
    }

    /// The significant bytes, most significant first.
    #[inline]
    pub fn significant_bytes(&self) -> &[u8] {
        let buf = self.storage.as_ref();
        &buf[buf.len() - self.used..]
    }

    /// The whole backing buffer, filler included.
    #[inline]
    pub fn storage(&self) -> &[u8] {
        self.storage.as_ref()
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.sign_byte() == 0xFF
    }

    pub fn is_zero(&self) -> bool {
        self.significant_bytes().iter().all(|&b| b == 0)
    }

    #[inline]
    pub(crate) fn sign_byte(&self) -> u8 {
        match self.significant_bytes().first() {
            Some(&top) => sign_of(top),
            None => 0x00,
        }
    }

    /// Byte `k` counted from the least significant end. `k` must be below
    /// the capacity.
    #[inline]
    pub(crate) fn get(&self, k: usize) -> u8 {
        let buf = self.storage.as_ref();
        buf[buf.len() - 1 - k]
    }

    /// Byte `k` of the value sign-extended to any width.
    #[inline]
    pub(crate) fn byte(&self, k: usize) -> u8 {
        if k < self.used {
            self.get(k)
        } else {
            self.sign_byte()
        }
    }

    pub(crate) fn require_value(&self) -> Result<()> {
        if self.used == 0 {
            return fail(BbiError::MissingOperand);
        }
        Ok(())
    }

    /// Significant length once redundant leading sign bytes are dropped.
    pub(crate) fn minimal_len(&self) -> usize {
        let bytes = self.significant_bytes();
        let mut skip = 0;
        while bytes.len() - skip > 1 && bytes[skip] == sign_of(bytes[skip + 1]) {
            skip += 1;
        }
        bytes.len() - skip
    }

    pub(crate) fn magnitude(&self) -> Magnitude<'_> {
        Magnitude::new(self.significant_bytes())
    }

    /// Write `0x`, two uppercase hex digits per byte, and a NUL into `out`.
    ///
    /// `out` must hold `used * 2 + 3` bytes even though the canonical form
    /// may come out shorter. Returns the text length, NUL excluded.
    pub fn store_to_hex(&self, out: &mut [u8]) -> Result<usize> {
        self.require_value()?;
        let needed = self.used * 2 + 3;
        if out.len() < needed {
            return fail(BbiError::StringBufTooSmall {
                needed,
                len: out.len(),
            });
        }
        let bytes = self.significant_bytes();
        out[..2].copy_from_slice(b"0x");
        let mut pos = 2;
        for &b in &bytes[canonical_skip(bytes)..] {
            out[pos..pos + 2].copy_from_slice(&byte_to_hex_chars(b));
            pos += 2;
        }
        out[pos] = 0;
        Ok(pos)
    }

    /// Write the value as decimal text, `-` first when negative, then a NUL.
    /// Returns the text length, NUL excluded.
    pub fn store_to_decimal(&self, out: &mut [u8]) -> Result<usize> {
        self.require_value()?;
        let prefix = usize::from(self.is_negative());
        if out.len() < prefix + MIN_DECIMAL_TEXT {
            return fail(BbiError::StringBufTooSmall {
                needed: prefix + MIN_DECIMAL_TEXT,
                len: out.len(),
            });
        }

        let out_len = out.len();
        let magnitude = self.magnitude();
        let (sign, region) = out.split_at_mut(prefix);
        let mut active = 0;
        for k in (0..magnitude.len()).rev() {
            active = match mul_add_cells(region, active, 10, 256, magnitude.byte(k) as u32) {
                Some(a) => a,
                None => return fail(BbiError::StringBufTooSmallPartial { len: out_len }),
            };
        }
        if active == 0 {
            let last = region.len() - 1;
            region[last] = 0;
            active = 1;
        }
        let n = emit_cells(region, active, out_len)?;
        if let Some(minus) = sign.first_mut() {
            *minus = b'-';
        }
        Ok(prefix + n)
    }
}

// ============================================================================
// Mutating API
// ============================================================================

impl<S: AsRef<[u8]> + AsMut<[u8]>> Bbi<S> {
    /// Bind `storage` and set the value to zero.
    ///
    /// A zero-length buffer yields an integer with no value; using it as a
    /// source fails with [`BbiError::MissingOperand`].
    pub fn new(storage: S) -> Self {
        let mut bbi = Self { storage, used: 0 };
        bbi.reset();
        bbi
    }

    pub fn set_zero(&mut self) -> Result<()> {
        if self.capacity() == 0 {
            return fail(BbiError::BytesTooSmall {
                needed: 1,
                capacity: 0,
            });
        }
        self.reset();
        Ok(())
    }

    /// Drop redundant leading sign bytes, leaving the minimal
    /// two's-complement width.
    pub fn normalize(&mut self) {
        self.used = self.minimal_len();
        self.fill_extension();
    }

    /// Canonical zero, or no value at all for a zero-length buffer.
    pub(crate) fn reset(&mut self) {
        let buf = self.storage.as_mut();
        buf.fill(0);
        self.used = usize::from(!buf.is_empty());
    }

    #[inline]
    pub(crate) fn put(&mut self, k: usize, byte: u8) {
        let buf = self.storage.as_mut();
        let idx = buf.len() - 1 - k;
        buf[idx] = byte;
    }

    fn fill_extension(&mut self) {
        let sign = self.sign_byte();
        let used = self.used;
        let buf = self.storage.as_mut();
        let end = buf.len() - used;
        buf[..end].fill(sign);
    }

    /// Commit the `len` freshly written low bytes as the new value.
    ///
    /// `ext` is the byte the true result has just above the window. If the
    /// window's own sign disagrees with it, `ext` is appended as a new top
    /// byte; `overflow` is reported when there is no room for it. The result
    /// is normalized. On failure the integer is reset to zero.
    pub(crate) fn commit(&mut self, len: usize, ext: u8, overflow: BbiError) -> Result<()> {
        let mut used = len;
        if sign_of(self.get(len - 1)) != ext {
            if len >= self.capacity() {
                self.reset();
                return fail(overflow);
            }
            self.put(len, ext);
            used += 1;
        }
        self.used = used;
        self.normalize();
        Ok(())
    }

    /// Commit an unsigned magnitude in the `len` low bytes (`len >= 1`),
    /// negating it first when `negative` is set.
    pub(crate) fn commit_magnitude(
        &mut self,
        len: usize,
        negative: bool,
        overflow: BbiError,
    ) -> Result<()> {
        let zero = (0..len).all(|k| self.get(k) == 0);
        if negative && !zero {
            let mut carry = 1u16;
            for k in 0..len {
                let t = (!self.get(k)) as u16 + carry;
                self.put(k, t as u8);
                carry = t >> 8;
            }
            self.commit(len, 0xFF, overflow)
        } else {
            self.commit(len, 0x00, overflow)
        }
    }

    /// Load a two's-complement big-endian byte string. Redundant leading
    /// sign bytes are dropped before the capacity check.
    pub fn load_from_be_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.is_empty() {
            return fail(BbiError::ZeroLenString);
        }
        let mut skip = 0;
        while bytes.len() - skip > 1 && bytes[skip] == sign_of(bytes[skip + 1]) {
            skip += 1;
        }
        let value = &bytes[skip..];
        let capacity = self.capacity();
        if value.len() > capacity {
            return fail(BbiError::BytesTooSmall {
                needed: value.len(),
                capacity,
            });
        }
        let buf = self.storage.as_mut();
        buf[capacity - value.len()..].copy_from_slice(value);
        self.used = value.len();
        self.fill_extension();
        Ok(())
    }

    pub fn load_from_u64(&mut self, value: u64) -> Result<()> {
        let mut bytes = [0u8; 9];
        bytes[1..].copy_from_slice(&value.to_be_bytes());
        self.load_from_be_bytes(&bytes)
    }

    pub fn load_from_i64(&mut self, value: i64) -> Result<()> {
        self.load_from_be_bytes(&value.to_be_bytes())
    }

    /// Load hex text with an optional `0x`/`0X` prefix.
    ///
    /// Digits pair up from the right; an odd leftover digit gets an implicit
    /// `0` high nibble. The value keeps exactly as many bytes as the text
    /// spells out, so `0xFF` is -1 and `0x00FF` is 255.
    ///
    /// Capacity is checked before anything is written. A bad digit resets
    /// the integer to zero.
    pub fn load_from_hex(&mut self, text: &str) -> Result<()> {
        let digits = strip_hex_prefix(text.as_bytes());
        if digits.is_empty() {
            return fail(BbiError::ZeroLenString);
        }
        let prefix = text.len() - digits.len();
        let needed = digits.len().div_ceil(2);
        let capacity = self.capacity();
        if needed > capacity {
            return fail(BbiError::BytesTooSmall { needed, capacity });
        }

        if let Err(err) = decode_hex_pairs(self.storage.as_mut(), digits, prefix) {
            self.reset();
            return fail(err);
        }
        self.used = needed;
        self.fill_extension();
        Ok(())
    }

    /// Load decimal text with an optional leading `-`.
    ///
    /// The digits are accumulated straight into the storage, one byte per
    /// base-256 cell, so no scratch buffer is involved.
    pub fn load_from_decimal(&mut self, text: &str) -> Result<()> {
        let bytes = text.as_bytes();
        let (negative, digits) = match bytes {
            [b'-', rest @ ..] => (true, rest),
            _ => (false, bytes),
        };
        if digits.is_empty() {
            return fail(BbiError::ZeroLenString);
        }
        if let Some(offset) = digits.iter().position(|c| !c.is_ascii_digit()) {
            return fail(BbiError::BadInput {
                byte: digits[offset],
                offset: offset + usize::from(negative),
            });
        }
        let capacity = self.capacity();
        if capacity == 0 {
            return fail(BbiError::BytesTooSmall {
                needed: 1,
                capacity,
            });
        }

        let overflow = BbiError::BytesTooSmall {
            needed: capacity + 1,
            capacity,
        };
        let Some(active) = accumulate_decimal(self.storage.as_mut(), digits) else {
            self.reset();
            return fail(overflow);
        };
        if active == 0 {
            self.put(0, 0);
        }
        self.commit_magnitude(active.max(1), negative, overflow)
    }
}

/// Decode `digits` into the tail of `buf`, two characters per byte, starting
/// from the right. `prefix` offsets the positions reported in errors.
fn decode_hex_pairs(buf: &mut [u8], digits: &[u8], prefix: usize) -> Result<()> {
    let capacity = buf.len();
    let mut end = digits.len();
    let mut k = 0;
    while end > 0 {
        let start = end.saturating_sub(2);
        let pair = if end - start == 2 {
            [digits[start], digits[start + 1]]
        } else {
            [b'0', digits[start]]
        };
        match hex_chars_to_byte(pair[0], pair[1]) {
            Ok(byte) => buf[capacity - 1 - k] = byte,
            Err(_) => {
                return Err(BbiError::BadData {
                    offset: prefix + start,
                    pair,
                })
            }
        }
        end = start;
        k += 1;
    }
    Ok(())
}

/// `cells = cells * 10 + digit` for every digit, base-256 cells.
fn accumulate_decimal(cells: &mut [u8], digits: &[u8]) -> Option<usize> {
    let mut active = 0;
    for &c in digits {
        active = mul_add_cells(cells, active, 256, 10, (c - b'0') as u32)?;
    }
    Some(active)
}

#[cfg(feature = "alloc")]
impl Bbi<alloc::vec::Vec<u8>> {
    /// Zero-valued integer over a freshly allocated buffer.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(alloc::vec![0u8; capacity])
    }
}

// ============================================================================
// Magnitude view
// ============================================================================

/// Absolute value of a two's-complement byte string, read byte by byte
/// without copying. Negation happens on the fly: below the lowest nonzero
/// byte everything is zero, that byte is negated, everything above it is
/// inverted.
pub(crate) struct Magnitude<'a> {
    bytes: &'a [u8],
    negative: bool,
    lowest: usize,
    len: usize,
}

impl<'a> Magnitude<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        let negative = bytes.first().is_some_and(|&b| b & 0x80 != 0);
        let lowest = bytes
            .iter()
            .rev()
            .position(|&b| b != 0)
            .unwrap_or(bytes.len());
        let mut view = Self {
            bytes,
            negative,
            lowest,
            len: 0,
        };
        view.len = (0..bytes.len())
            .rev()
            .find(|&k| view.byte(k) != 0)
            .map_or(0, |k| k + 1);
        view
    }

    /// Bytes needed for the magnitude; zero for a zero value.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Magnitude byte `k`, least significant first.
    pub(crate) fn byte(&self, k: usize) -> u8 {
        if k >= self.bytes.len() {
            return 0;
        }
        let x = self.bytes[self.bytes.len() - 1 - k];
        if !self.negative {
            x
        } else if k < self.lowest {
            0
        } else if k == self.lowest {
            x.wrapping_neg()
        } else {
            !x
        }
    }
}

// ============================================================================
// Trait impls
// ============================================================================

impl<S: AsRef<[u8]>> fmt::Display for Bbi<S> {
    /// Canonical hex form, as [`Bbi::store_to_hex`] writes it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.used == 0 {
            return f.write_str("(empty)");
        }
        let bytes = self.significant_bytes();
        f.write_str("0x")?;
        for &b in &bytes[canonical_skip(bytes)..] {
            let [hi, lo] = byte_to_hex_chars(b);
            write!(f, "{}{}", hi as char, lo as char)?;
        }
        Ok(())
    }
}

impl<S: AsRef<[u8]>> fmt::Debug for Bbi<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bbi[{}/{}](0x", self.used, self.capacity())?;
        for &b in self.significant_bytes() {
            write!(f, "{:02X}", b)?;
        }
        f.write_str(")")
    }
}

// ============================================================================
// Tests
// ============================================================================
