//! Error kinds shared by every fallible operation.
//!
//! Every failure path goes through [`fail`], which records a one-line
//! `file:line: message` entry on the `log` facade before handing the error
//! back. Whether anything is printed is up to the host's logger.

use core::fmt;
use core::panic::Location;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, BbiError>;

/// Errors from buffer-backed integer operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BbiError {
    /// A character that is not valid for the expected radix, or a nibble
    /// value above 15.
    #[error("bad input '{}' at offset {offset}", escaped(core::slice::from_ref(.byte)))]
    BadInput { byte: u8, offset: usize },

    #[error("'{}' is not a hex digit", escaped(core::slice::from_ref(.byte)))]
    NotHex { byte: u8 },

    #[error("bad high nibble in hex pair '{}'", escaped(.pair))]
    BadHighNibble { pair: [u8; 2] },

    #[error("bad low nibble in hex pair '{}'", escaped(.pair))]
    BadLowNibble { pair: [u8; 2] },

    /// A hex string contained an undecodable pair.
    #[error("invalid hex pair '{}' at offset {offset}", escaped(.pair))]
    BadData { offset: usize, pair: [u8; 2] },

    #[error("empty string")]
    ZeroLenString,

    /// A source operand holds no value (zero-capacity or unset buffer).
    #[error("operand holds no value")]
    MissingOperand,

    #[error("need {needed} bytes, buffer holds {capacity}")]
    BytesTooSmall { needed: usize, capacity: usize },

    #[error("no room for carry byte in {capacity}-byte buffer")]
    BytesTooSmallForCarry { capacity: usize },

    #[error("no room for borrow byte in {capacity}-byte buffer")]
    BytesTooSmallForBorrow { capacity: usize },

    /// The output text buffer is too small; nothing was written.
    #[error("text buffer of {len} bytes too small, need {needed}")]
    StringBufTooSmall { needed: usize, len: usize },

    /// The output text buffer filled up mid-write. Its contents are garbage.
    #[error("text buffer of {len} bytes exhausted mid-write")]
    StringBufTooSmallPartial { len: usize },

    /// Every character fit, the NUL terminator did not.
    #[error("text buffer of {len} bytes has no room for terminator")]
    StringBufTooSmallNoNull { len: usize },

    #[error("division by zero")]
    DivideByZero,
}

/// Log `err` with the caller's location and return it.
#[track_caller]
pub(crate) fn fail<T>(err: BbiError) -> Result<T> {
    let at = Location::caller();
    log::debug!("{}:{}: {}", at.file(), at.line(), err);
    Err(err)
}

struct Escaped<'a>(&'a [u8]);

fn escaped(bytes: &[u8]) -> Escaped<'_> {
    Escaped(bytes)
}

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{}", b.escape_ascii())?;
        }
        Ok(())
    }
}
