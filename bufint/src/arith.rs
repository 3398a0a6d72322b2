//! Carry/borrow arithmetic: add, subtract, increment, decrement, negate.
//!
//! Every operation walks bytes from least to most significant with a single
//! carry (or borrow) threaded through. Operands of different widths are
//! sign-extended to the longer one. Once the loop ends, the byte the exact
//! result would have just above the window is known; if it is not a plain
//! sign extension of the window, it becomes a new top byte, or the operation
//! fails when the buffer has no room left.
//!
//! `add`/`subtract` write into a destination that the borrow checker keeps
//! apart from both sources. `increment`/`decrement` update in place.

use crate::bbi::Bbi;
use crate::error::{fail, BbiError, Result};

/// Add with carry: (result, carry) = a + b + carry_in
#[inline(always)]
pub(crate) const fn adc(a: u8, b: u8, carry: u8) -> (u8, u8) {
    let tmp = a as u16 + b as u16 + carry as u16;
    (tmp as u8, (tmp >> 8) as u8)
}

/// Subtract with borrow: (result, borrow) = a - b - borrow_in
#[inline(always)]
pub(crate) const fn sbb(a: u8, b: u8, borrow: u8) -> (u8, u8) {
    let tmp = (a as u16)
        .wrapping_sub(b as u16)
        .wrapping_sub(borrow as u16);
    (tmp as u8, (tmp >> 15) as u8) // borrow is 0 or 1
}

type Step = fn(u8, u8, u8) -> (u8, u8);

impl<S: AsRef<[u8]> + AsMut<[u8]>> Bbi<S> {
    /// `self = a + b`.
    ///
    /// ```
    /// use bufint::Bbi;
    ///
    /// let mut a = Bbi::new([0u8; 4]);
    /// let mut b = Bbi::new([0u8; 4]);
    /// a.load_from_hex("0x7F").unwrap();
    /// b.load_from_hex("0x01").unwrap();
    ///
    /// let mut sum = Bbi::new([0u8; 4]);
    /// sum.add(&a, &b).unwrap();
    /// assert_eq!(sum.significant_bytes(), &[0x00, 0x80]);
    /// ```
    pub fn add<A, B>(&mut self, a: &Bbi<A>, b: &Bbi<B>) -> Result<()>
    where
        A: AsRef<[u8]>,
        B: AsRef<[u8]>,
    {
        let capacity = self.capacity();
        self.combine(a, b, adc, BbiError::BytesTooSmallForCarry { capacity })
    }

    /// `self = a - b`.
    pub fn subtract<A, B>(&mut self, a: &Bbi<A>, b: &Bbi<B>) -> Result<()>
    where
        A: AsRef<[u8]>,
        B: AsRef<[u8]>,
    {
        let capacity = self.capacity();
        self.combine(a, b, sbb, BbiError::BytesTooSmallForCarry { capacity })
    }

    /// `self += val`, widening `self` when the sum needs it.
    pub fn increment<T: AsRef<[u8]>>(&mut self, val: &Bbi<T>) -> Result<()> {
        let capacity = self.capacity();
        self.apply(val, adc, BbiError::BytesTooSmallForCarry { capacity })
    }

    /// `self -= val`. The result is trimmed to its minimal width.
    pub fn decrement<T: AsRef<[u8]>>(&mut self, val: &Bbi<T>) -> Result<()> {
        let capacity = self.capacity();
        self.apply(val, sbb, BbiError::BytesTooSmallForBorrow { capacity })
    }

    /// `self += value` for a native unsigned integer.
    ///
    /// ```
    /// use bufint::Bbi;
    ///
    /// let mut n = Bbi::new([0u8; 12]);
    /// n.load_from_hex("0x700000000000000001").unwrap();
    /// n.increment_by_u64(0xFFFF_FFFF).unwrap();
    /// assert_eq!(n.to_string(), "0x700000000100000000");
    /// ```
    pub fn increment_by_u64(&mut self, value: u64) -> Result<()> {
        let scratch = machine_integer(value)?;
        self.increment(&scratch)
    }

    /// `self -= value` for a native unsigned integer.
    pub fn decrement_by_u64(&mut self, value: u64) -> Result<()> {
        let scratch = machine_integer(value)?;
        self.decrement(&scratch)
    }

    /// `self = -self`.
    pub fn negate(&mut self) -> Result<()> {
        self.require_value()?;
        let n = self.used;
        let ext = !self.sign_byte();
        let mut carry = 1;
        for k in 0..n {
            let (r, c) = adc(!self.get(k), 0, carry);
            self.put(k, r);
            carry = c;
        }
        let (ext, _) = adc(ext, 0, carry);
        let capacity = self.capacity();
        self.commit(n, ext, BbiError::BytesTooSmallForCarry { capacity })
    }

    /// Run `step` over two sources into `self`.
    fn combine<A, B>(
        &mut self,
        a: &Bbi<A>,
        b: &Bbi<B>,
        step: Step,
        overflow: BbiError,
    ) -> Result<()>
    where
        A: AsRef<[u8]>,
        B: AsRef<[u8]>,
    {
        a.require_value()?;
        b.require_value()?;
        let n = a.used().max(b.used());
        let capacity = self.capacity();
        if n > capacity {
            return fail(BbiError::BytesTooSmall {
                needed: n,
                capacity,
            });
        }

        let mut carry = 0;
        for k in 0..n {
            let (r, c) = step(a.byte(k), b.byte(k), carry);
            self.put(k, r);
            carry = c;
        }
        let (ext, _) = step(a.sign_byte(), b.sign_byte(), carry);
        self.commit(n, ext, overflow)
    }

    /// Run `step` with `self` as both the left source and the destination.
    fn apply<T>(&mut self, val: &Bbi<T>, step: Step, overflow: BbiError) -> Result<()>
    where
        T: AsRef<[u8]>,
    {
        self.require_value()?;
        val.require_value()?;
        let n = self.used.max(val.used());
        let capacity = self.capacity();
        if n > capacity {
            return fail(BbiError::BytesTooSmall {
                needed: n,
                capacity,
            });
        }

        // Captured up front: writing the top byte changes what byte() reports.
        let own_sign = self.sign_byte();
        let own_used = self.used;
        let mut carry = 0;
        for k in 0..n {
            let x = if k < own_used { self.get(k) } else { own_sign };
            let (r, c) = step(x, val.byte(k), carry);
            self.put(k, r);
            carry = c;
        }
        let (ext, _) = step(own_sign, val.sign_byte(), carry);
        self.commit(n, ext, overflow)
    }
}

/// Pack `value` into a stack integer with room for a clear sign bit.
fn machine_integer(value: u64) -> Result<Bbi<[u8; 9]>> {
    let mut scratch = Bbi::new([0u8; 9]);
    scratch.load_from_u64(value)?;
    Ok(scratch)
}
