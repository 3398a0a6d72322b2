//! Signed comparison.

use core::cmp::Ordering;

use crate::bbi::Bbi;
use crate::error::Result;

impl<S: AsRef<[u8]>> Bbi<S> {
    /// Compare two integers of any storage.
    ///
    /// Sign decides first. With equal signs, the wider value (after redundant
    /// sign bytes are dropped) has the larger magnitude, so it is greater
    /// when non-negative and less when negative. Equal widths compare byte by
    /// byte, most significant first.
    ///
    /// ```
    /// use core::cmp::Ordering;
    /// use bufint::Bbi;
    ///
    /// let mut a = Bbi::new([0u8; 4]);
    /// let mut b = Bbi::new([0u8; 4]);
    /// a.load_from_decimal("-300").unwrap();
    /// b.load_from_decimal("-2").unwrap();
    /// assert_eq!(a.compare(&b), Ok(Ordering::Less));
    /// ```
    pub fn compare<T: AsRef<[u8]>>(&self, other: &Bbi<T>) -> Result<Ordering> {
        self.require_value()?;
        other.require_value()?;

        let negative = self.is_negative();
        match (negative, other.is_negative()) {
            (false, true) => return Ok(Ordering::Greater),
            (true, false) => return Ok(Ordering::Less),
            _ => {}
        }

        let (n, m) = (self.minimal_len(), other.minimal_len());
        match n.cmp(&m) {
            Ordering::Equal => {}
            ord if negative => return Ok(ord.reverse()),
            ord => return Ok(ord),
        }
        for k in (0..n).rev() {
            match self.get(k).cmp(&other.get(k)) {
                Ordering::Equal => continue,
                ord => return Ok(ord),
            }
        }
        Ok(Ordering::Equal)
    }

    /// `false` if either side holds no value.
    pub fn equals<T: AsRef<[u8]>>(&self, other: &Bbi<T>) -> bool {
        self.compare(other) == Ok(Ordering::Equal)
    }

    pub fn less_than<T: AsRef<[u8]>>(&self, other: &Bbi<T>) -> bool {
        self.compare(other) == Ok(Ordering::Less)
    }

    pub fn greater_than<T: AsRef<[u8]>>(&self, other: &Bbi<T>) -> bool {
        self.compare(other) == Ok(Ordering::Greater)
    }
}

// ============================================================================
// Trait impls
// ============================================================================

impl<S: AsRef<[u8]>, T: AsRef<[u8]>> PartialEq<Bbi<T>> for Bbi<S> {
    fn eq(&self, other: &Bbi<T>) -> bool {
        self.equals(other)
    }
}

impl<S: AsRef<[u8]>, T: AsRef<[u8]>> PartialOrd<Bbi<T>> for Bbi<S> {
    fn partial_cmp(&self, other: &Bbi<T>) -> Option<Ordering> {
        self.compare(other).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BbiError;

    fn hex<const N: usize>(text: &str) -> Bbi<[u8; N]> {
        let mut b = Bbi::new([0u8; N]);
        b.load_from_hex(text).unwrap();
        b
    }

    fn int(value: i64) -> Bbi<[u8; 8]> {
        let mut b = Bbi::new([0u8; 8]);
        b.load_from_i64(value).unwrap();
        b
    }

    #[test]
    fn test_sign_decides_first() {
        assert_eq!(int(-1).compare(&int(0)), Ok(Ordering::Less));
        assert_eq!(int(1).compare(&int(-1000)), Ok(Ordering::Greater));
    }

    #[test]
    fn test_width_decides_next() {
        assert_eq!(int(256).compare(&int(255)), Ok(Ordering::Greater));
        assert_eq!(int(-129).compare(&int(-128)), Ok(Ordering::Less));
        assert_eq!(int(-128).compare(&int(-129)), Ok(Ordering::Greater));
    }

    #[test]
    fn test_bytes_decide_last() {
        assert_eq!(int(0x1234).compare(&int(0x1235)), Ok(Ordering::Less));
        assert_eq!(int(-2).compare(&int(-3)), Ok(Ordering::Greater));
        assert_eq!(int(77).compare(&int(77)), Ok(Ordering::Equal));
    }

    #[test]
    fn test_redundant_sign_bytes_ignored() {
        // Loads keep the text's width; comparison must not.
        let wide = hex::<8>("0x000000FF");
        let narrow = hex::<2>("0x00FF");
        assert_eq!(wide.compare(&narrow), Ok(Ordering::Equal));
        assert_eq!(hex::<4>("0xFFFF"), hex::<1>("0xFF"));
        assert!(hex::<4>("0x0000FF").greater_than(&hex::<4>("0xFF")));
    }

    #[test]
    fn test_predicates_are_exclusive() {
        let values = [-300, -128, -1, 0, 1, 127, 128, 300];
        for &x in &values {
            for &y in &values {
                let (a, b) = (int(x), int(y));
                let hits = [a.less_than(&b), a.equals(&b), a.greater_than(&b)];
                assert_eq!(hits.iter().filter(|&&h| h).count(), 1, "{x} vs {y}");
                assert_eq!(a.compare(&b), Ok(x.cmp(&y)));
            }
        }
    }

    #[test]
    fn test_errors_read_as_false() {
        let empty = Bbi::new([0u8; 0]);
        let one = int(1);
        assert_eq!(one.compare(&empty), Err(BbiError::MissingOperand));
        assert!(!one.equals(&empty));
        assert!(!one.less_than(&empty));
        assert!(!one.greater_than(&empty));
        assert_eq!(one.partial_cmp(&empty), None);
    }
}
