//! Fixed-point decimal numbers backed by a single `i64`
//!
//! A value is an unscaled `i64` together with a scale of 0 to 18 fractional
//! digits that is fixed at compile time:
//!
//! - **`Decimal<S>`**: immutable, `Copy`, every operation returns a new value
//! - **`MutableDecimal<S>`**: owns its unscaled value and overwrites it in place
//! - **`DecimalArithmetic`**: the operation table behind both, selected by
//!   `(scale, RoundingMode, OverflowMode)`
//!
//! ## Features
//!
//! - **Exact decimal rounding**: eight rounding modes, applied once to the
//!   exact result of every narrowing operation
//! - **No premature overflow**: products and rescales are computed at double
//!   width before dividing back down
//! - **Checked or wrapping**: `OverflowMode::Checked` reports overflow,
//!   `OverflowMode::Unchecked` wraps like native integers
//! - **Exact conversions**: `BigInt`, `BigDecimal`, `f64` and `f32` are
//!   converted against their exact values, not approximations
//! - **no_std compatible**: requires `alloc` only
//!
//! ## Example
//!
//! ```rust
//! use scaledec::{Decimal2f, DecimalOps, OverflowMode, RoundingMode};
//!
//! let price: Decimal2f = "2.50".parse().unwrap();
//! let other: Decimal2f = "1.50".parse().unwrap();
//!
//! assert_eq!((price + other).to_string(), "4.00");
//! assert_eq!(price.try_avg(other, RoundingMode::HalfUp).unwrap().unscaled(), 200);
//!
//! let third = Decimal2f::ONE
//!     .try_div(Decimal2f::from_i64(3).unwrap(), RoundingMode::Down, OverflowMode::Checked)
//!     .unwrap();
//! assert_eq!(third.to_string(), "0.33");
//! ```

#![no_std]
#![cfg_attr(test, allow(unused_imports))]

#[cfg(any(test, feature = "std"))]
extern crate std;

extern crate alloc;

mod arithmetic;
mod convert;
mod decimal;
mod format;
pub mod interop;
mod mutable;
mod ops;
mod pow;
mod rounding;
mod scale;
pub mod unsigned;

pub use arithmetic::{DecimalArithmetic, OverflowMode};
pub use decimal::*;
pub use mutable::MutableDecimal;
pub use ops::{DecimalOps, UnscaledValue};
pub use rounding::{RoundingMode, TruncatedPart};
pub use scale::{ScaleMetrics, MAX_SCALE, SCALE_METRICS};

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecimalError {
    #[error("overflow: value too large to represent")]
    Overflow,

    #[error("rounding necessary: exact result has a discarded remainder")]
    RoundingRequired,

    #[error("division by zero")]
    DivisionByZero,

    #[error("value is NaN or infinite")]
    NonFinite,

    #[error("invalid string format")]
    InvalidFormat,

    #[error("scale must be in 0..=18")]
    InvalidScale,

    #[error("square root of a negative value")]
    NegativeSquareRoot,
}

/// The three failure classes every [`DecimalError`] falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The exact result does not fit the 64-bit unscaled value.
    RangeOverflow,
    /// `RoundingMode::Unnecessary` met a non-zero discarded remainder.
    RoundingRequired,
    /// Zero divisor, non-finite float, malformed input or invalid scale.
    InvalidOperand,
}

impl DecimalError {
    pub const fn kind(self) -> ErrorKind {
        match self {
            DecimalError::Overflow => ErrorKind::RangeOverflow,
            DecimalError::RoundingRequired => ErrorKind::RoundingRequired,
            DecimalError::DivisionByZero
            | DecimalError::NonFinite
            | DecimalError::InvalidFormat
            | DecimalError::InvalidScale
            | DecimalError::NegativeSquareRoot => ErrorKind::InvalidOperand,
        }
    }
}

pub type Result<T> = core::result::Result<T, DecimalError>;
