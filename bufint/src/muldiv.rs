//! Multiplication and division with remainder.
//!
//! Both work on operand magnitudes written straight into the destination's
//! storage, then fix up the sign on commit. Neither needs scratch memory.

use crate::arith::sbb;
use crate::bbi::{Bbi, Magnitude};
use crate::error::{fail, BbiError, Result};

/// Multiply-accumulate: (lo, carry) = a * b + c + carry_in
#[inline(always)]
const fn mac(a: u8, b: u8, c: u8, carry: u8) -> (u8, u8) {
    let tmp = a as u16 * b as u16 + c as u16 + carry as u16;
    (tmp as u8, (tmp >> 8) as u8)
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> Bbi<S> {
    /// `self = a * b`, schoolbook over the operand magnitudes.
    ///
    /// Fails with [`BbiError::BytesTooSmall`] when the product's magnitude
    /// outgrows the buffer (`needed` is the operands' combined length, an
    /// upper bound), and with [`BbiError::BytesTooSmallForCarry`] when only
    /// the sign byte does not fit.
    ///
    /// ```
    /// use bufint::Bbi;
    ///
    /// let mut a = Bbi::new([0u8; 8]);
    /// let mut b = Bbi::new([0u8; 8]);
    /// a.load_from_decimal("-12").unwrap();
    /// b.load_from_decimal("12").unwrap();
    ///
    /// let mut p = Bbi::new([0u8; 8]);
    /// p.multiply(&a, &b).unwrap();
    /// assert_eq!(p.significant_bytes(), &[0xFF, 0x70]);
    /// ```
    pub fn multiply<A, B>(&mut self, a: &Bbi<A>, b: &Bbi<B>) -> Result<()>
    where
        A: AsRef<[u8]>,
        B: AsRef<[u8]>,
    {
        a.require_value()?;
        b.require_value()?;
        let capacity = self.capacity();
        if capacity == 0 {
            return fail(BbiError::BytesTooSmall {
                needed: 1,
                capacity,
            });
        }

        let (ma, mb) = (a.magnitude(), b.magnitude());
        let needed = ma.len() + mb.len();
        let width = needed.clamp(1, capacity);
        for k in 0..width {
            self.put(k, 0);
        }

        for i in 0..ma.len() {
            let x = ma.byte(i);
            if x == 0 {
                continue;
            }
            let mut carry = 0;
            for j in 0..mb.len() {
                let k = i + j;
                let acc = if k < width { self.get(k) } else { 0 };
                let (lo, hi) = mac(x, mb.byte(j), acc, carry);
                if k < width {
                    self.put(k, lo);
                } else if lo != 0 {
                    self.reset();
                    return fail(BbiError::BytesTooSmall { needed, capacity });
                }
                carry = hi;
            }
            // Nothing has been written at i + len yet.
            let k = i + mb.len();
            if k < width {
                self.put(k, carry);
            } else if carry != 0 {
                self.reset();
                return fail(BbiError::BytesTooSmall { needed, capacity });
            }
        }

        let negative = a.is_negative() != b.is_negative();
        self.commit_magnitude(width, negative, BbiError::BytesTooSmallForCarry { capacity })
    }
}

/// Truncating division: `numerator = quotient * denominator + remainder`.
///
/// The quotient rounds toward zero and the remainder takes the numerator's
/// sign, matching Rust's `/` and `%` on primitive integers. `remainder` must
/// hold at least as many bytes as the numerator's minimal width.
///
/// Precondition failures leave both outputs untouched. A quotient that does
/// not fit resets both to zero.
///
/// ```
/// use bufint::{divide, Bbi};
///
/// let mut n = Bbi::new([0u8; 8]);
/// let mut d = Bbi::new([0u8; 8]);
/// n.load_from_decimal("287713").unwrap();
/// d.load_from_decimal("571").unwrap();
///
/// let mut q = Bbi::new([0u8; 8]);
/// let mut r = Bbi::new([0u8; 8]);
/// divide(&mut q, &mut r, &n, &d).unwrap();
///
/// let mut out = [0u8; 16];
/// let len = q.store_to_decimal(&mut out).unwrap();
/// assert_eq!(&out[..len], b"503");
/// let len = r.store_to_decimal(&mut out).unwrap();
/// assert_eq!(&out[..len], b"500");
/// ```
pub fn divide<Q, R, N, D>(
    quotient: &mut Bbi<Q>,
    remainder: &mut Bbi<R>,
    numerator: &Bbi<N>,
    denominator: &Bbi<D>,
) -> Result<()>
where
    Q: AsRef<[u8]> + AsMut<[u8]>,
    R: AsRef<[u8]> + AsMut<[u8]>,
    N: AsRef<[u8]>,
    D: AsRef<[u8]>,
{
    numerator.require_value()?;
    denominator.require_value()?;
    if denominator.is_zero() {
        return fail(BbiError::DivideByZero);
    }
    let (qcap, rcap) = (quotient.capacity(), remainder.capacity());
    let needed = numerator.minimal_len();
    if rcap < needed {
        return fail(BbiError::BytesTooSmall {
            needed,
            capacity: rcap,
        });
    }
    if qcap == 0 {
        return fail(BbiError::BytesTooSmall {
            needed: 1,
            capacity: qcap,
        });
    }

    let (mn, md) = (numerator.magnitude(), denominator.magnitude());
    // The running remainder never exceeds the numerator, nor twice the
    // denominator, so these widths never overflow.
    let rw = mn.len().min(md.len() + 1).max(1);
    let qw = mn.len().clamp(1, qcap);
    for k in 0..rw {
        remainder.put(k, 0);
    }
    for k in 0..qw {
        quotient.put(k, 0);
    }

    // Bit-by-bit long division, MSB first
    for i in (0..mn.len() * 8).rev() {
        let (byte_idx, bit_idx) = (i / 8, i % 8);

        // Shift remainder left by 1 and bring down bit i
        let mut carry = (mn.byte(byte_idx) >> bit_idx) & 1;
        for k in 0..rw {
            let r = remainder.get(k);
            remainder.put(k, (r << 1) | carry);
            carry = r >> 7;
        }

        if !magnitude_gte(remainder, rw, &md) {
            continue;
        }
        let mut borrow = 0;
        for k in 0..rw {
            let (r, b) = sbb(remainder.get(k), md.byte(k), borrow);
            remainder.put(k, r);
            borrow = b;
        }
        if byte_idx >= qw {
            quotient.reset();
            remainder.reset();
            return fail(BbiError::BytesTooSmall {
                needed: mn.len(),
                capacity: qcap,
            });
        }
        let q = quotient.get(byte_idx);
        quotient.put(byte_idx, q | (1 << bit_idx));
    }

    let negative = numerator.is_negative();
    let q_neg = negative != denominator.is_negative();
    let overflow = BbiError::BytesTooSmallForCarry { capacity: qcap };
    if let Err(err) = quotient.commit_magnitude(qw, q_neg, overflow) {
        remainder.reset();
        return Err(err);
    }
    let overflow = BbiError::BytesTooSmallForCarry { capacity: rcap };
    if let Err(err) = remainder.commit_magnitude(rw, negative, overflow) {
        quotient.reset();
        return Err(err);
    }
    Ok(())
}

/// `remainder[..rw] >= divisor`, both unsigned.
fn magnitude_gte<R>(remainder: &Bbi<R>, rw: usize, divisor: &Magnitude<'_>) -> bool
where
    R: AsRef<[u8]>,
{
    for k in (0..rw.max(divisor.len())).rev() {
        let r = if k < rw { remainder.get(k) } else { 0 };
        let d = divisor.byte(k);
        if r != d {
            return r > d;
        }
    }
    true // equal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec<const N: usize>(text: &str) -> Bbi<[u8; N]> {
        let mut b = Bbi::new([0u8; N]);
        b.load_from_decimal(text).unwrap();
        b
    }

    fn to_dec<S: AsRef<[u8]>>(b: &Bbi<S>) -> String {
        let mut out = [0u8; 64];
        let n = b.store_to_decimal(&mut out).unwrap();
        String::from_utf8(out[..n].to_vec()).unwrap()
    }

    fn div<const N: usize>(n: &str, d: &str) -> (String, String) {
        let mut q = Bbi::new([0u8; N]);
        let mut r = Bbi::new([0u8; N]);
        divide(&mut q, &mut r, &dec::<N>(n), &dec::<N>(d)).unwrap();
        (to_dec(&q), to_dec(&r))
    }

    #[test]
    fn test_mac() {
        assert_eq!(mac(0xFF, 0xFF, 0xFF, 0xFF), (0xFF, 0xFF));
        assert_eq!(mac(0x10, 0x10, 0x00, 0x00), (0x00, 0x01));
    }

    // --- Multiply ---

    #[test]
    fn test_multiply_basic() {
        let mut p = Bbi::new([0u8; 8]);
        p.multiply(&dec::<8>("9415273"), &dec::<8>("252533")).unwrap();
        assert_eq!(to_dec(&p), "2377667136509");
        assert_eq!(p.to_string(), "0x022998014BFD");
    }

    #[test]
    fn test_multiply_signs() {
        let mut p = Bbi::new([0u8; 4]);
        p.multiply(&dec::<4>("-7"), &dec::<4>("6")).unwrap();
        assert_eq!(to_dec(&p), "-42");
        p.multiply(&dec::<4>("-7"), &dec::<4>("-6")).unwrap();
        assert_eq!(to_dec(&p), "42");
        p.multiply(&dec::<4>("-7"), &dec::<4>("0")).unwrap();
        assert!(p.is_zero());
        assert!(!p.is_negative());
        assert_eq!(p.used(), 1);
    }

    #[test]
    fn test_multiply_exact_fit() {
        // 0x80 magnitude fits as -128 in one byte but not as +128.
        let mut one = Bbi::new([0u8; 1]);
        one.multiply(&dec::<2>("-16"), &dec::<2>("8")).unwrap();
        assert_eq!(one.significant_bytes(), &[0x80]);
        assert_eq!(
            one.multiply(&dec::<2>("16"), &dec::<2>("8")),
            Err(BbiError::BytesTooSmallForCarry { capacity: 1 })
        );
        assert!(one.is_zero());
    }

    #[test]
    fn test_multiply_overflow() {
        let mut p = Bbi::new([0u8; 2]);
        assert_eq!(
            p.multiply(&dec::<4>("65536"), &dec::<4>("2")),
            Err(BbiError::BytesTooSmall {
                needed: 4,
                capacity: 2
            })
        );
        assert!(p.is_zero());

        // Combined length exceeds capacity, product does not.
        p.multiply(&dec::<4>("256"), &dec::<4>("2")).unwrap();
        assert_eq!(to_dec(&p), "512");
    }

    // --- Divide ---

    #[test]
    fn test_divide_basic() {
        assert_eq!(div::<8>("287713", "571"), ("503".into(), "500".into()));
        assert_eq!(div::<8>("571", "571"), ("1".into(), "0".into()));
        assert_eq!(div::<8>("570", "571"), ("0".into(), "570".into()));
        assert_eq!(div::<8>("0", "3"), ("0".into(), "0".into()));
    }

    #[test]
    fn test_divide_truncates_toward_zero() {
        assert_eq!(div::<4>("-7", "2"), ("-3".into(), "-1".into()));
        assert_eq!(div::<4>("7", "-2"), ("-3".into(), "1".into()));
        assert_eq!(div::<4>("-7", "-2"), ("3".into(), "-1".into()));
        assert_eq!(div::<4>("-128", "-1"), ("128".into(), "0".into()));
    }

    #[test]
    fn test_divide_large() {
        assert_eq!(
            div::<16>("12345678901234567890123", "987654321"),
            ("12499999887343".into(), "740731020".into())
        );
    }

    #[test]
    fn test_divide_by_zero() {
        let mut q = dec::<4>("5");
        let mut r = dec::<4>("6");
        assert_eq!(
            divide(&mut q, &mut r, &dec::<4>("1"), &dec::<4>("0")),
            Err(BbiError::DivideByZero)
        );
        assert_eq!(to_dec(&q), "5");
        assert_eq!(to_dec(&r), "6");
    }

    #[test]
    fn test_divide_remainder_capacity() {
        let mut q = Bbi::new([0u8; 4]);
        let mut r = Bbi::new([0u8; 1]);
        assert_eq!(
            divide(&mut q, &mut r, &dec::<4>("1000"), &dec::<4>("7")),
            Err(BbiError::BytesTooSmall {
                needed: 2,
                capacity: 1
            })
        );
    }

    #[test]
    fn test_divide_quotient_overflow() {
        let mut q = Bbi::new([0u8; 1]);
        let mut r = Bbi::new([0u8; 4]);
        assert_eq!(
            divide(&mut q, &mut r, &dec::<4>("1000"), &dec::<4>("2")),
            Err(BbiError::BytesTooSmall {
                needed: 2,
                capacity: 1
            })
        );
        assert!(q.is_zero());
        assert!(r.is_zero());
    }
}
