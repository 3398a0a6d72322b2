//! Signed arbitrary-precision integers over caller-supplied byte buffers.
//!
//! A [`Bbi`] never allocates. Its value lives in the tail of a fixed buffer
//! as big-endian two's complement, and every operation that would need more
//! room than the buffer has fails with a [`BbiError`] instead of wrapping.
//!
//! ```
//! use bufint::{divide, Bbi};
//!
//! let mut a = Bbi::new([0u8; 16]);
//! let mut b = Bbi::new([0u8; 16]);
//! a.load_from_decimal("9415273").unwrap();
//! b.load_from_decimal("252533").unwrap();
//!
//! let mut product = Bbi::new([0u8; 16]);
//! product.multiply(&a, &b).unwrap();
//!
//! let mut q = Bbi::new([0u8; 16]);
//! let mut r = Bbi::new([0u8; 16]);
//! divide(&mut q, &mut r, &product, &b).unwrap();
//! assert_eq!(q, a);
//! assert!(r.is_zero());
//! ```
//!
//! Failures are also reported on the [`log`] facade at `debug` level.
//!
//! Without the default `std` feature the crate is `no_std`; the `alloc`
//! feature adds the `Vec`-backed [`OwnedBbi`].

#![cfg_attr(not(any(feature = "std", test)), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod codec;
pub mod radix;

mod arith;
mod bbi;
mod cmp;
mod error;
mod muldiv;

pub use bbi::Bbi;
#[cfg(feature = "alloc")]
pub use bbi::OwnedBbi;
pub use error::{BbiError, Result};
pub use muldiv::divide;
