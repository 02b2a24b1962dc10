//! Conversions between fixed-point decimals and arbitrary precision numbers.
//!
//! Readers accept anything implementing [`UnscaledValue`]. Writers take a
//! [`DecimalOps`] target, so a [`MutableDecimal`](crate::MutableDecimal) can
//! be loaded from a `BigDecimal` in place:
//!
//! ```rust
//! use bigdecimal::BigDecimal;
//! use scaledec::{interop, MutableDecimal, RoundingMode};
//!
//! let source: BigDecimal = "12.345".parse().unwrap();
//! let mut target = MutableDecimal::<2>::new();
//! interop::from_big_decimal(&mut target, &source, RoundingMode::HalfEven).unwrap();
//! assert_eq!(target.unscaled(), 1234);
//! ```

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::arithmetic::OverflowMode;
use crate::ops::{DecimalOps, UnscaledValue};
use crate::rounding::RoundingMode;
use crate::{Decimal, Result};

/// Exact `BigDecimal` with scale `S`.
pub fn to_big_decimal<const S: u8, T: UnscaledValue<S> + ?Sized>(value: &T) -> BigDecimal {
    Decimal::<S>::from_unscaled(value.unscaled_value()).to_big_decimal()
}

/// Exact `BigDecimal` rescaled to `target_scale`, rounding when it drops
/// digits.
pub fn to_big_decimal_with_scale<const S: u8, T: UnscaledValue<S> + ?Sized>(
    value: &T,
    target_scale: i64,
    rounding: RoundingMode,
) -> Result<BigDecimal> {
    Decimal::<S>::arithmetic(rounding, OverflowMode::Checked)
        .to_big_decimal_with_scale(value.unscaled_value(), target_scale)
}

/// Stores `source` rounded to scale `S`. Fails with `Overflow` when out of
/// range.
pub fn from_big_decimal<const S: u8, T: DecimalOps<S>>(
    target: T,
    source: &BigDecimal,
    rounding: RoundingMode,
) -> Result<T::Output> {
    let unscaled = Decimal::<S>::arithmetic(rounding, OverflowMode::Checked)
        .from_big_decimal(source)?;
    Ok(target.with_unscaled(unscaled))
}

/// Integer value, rounded.
pub fn to_big_int<const S: u8, T: UnscaledValue<S> + ?Sized>(
    value: &T,
    rounding: RoundingMode,
) -> Result<BigInt> {
    Decimal::<S>::arithmetic(rounding, OverflowMode::Checked).to_big_int(value.unscaled_value())
}

/// Integer value; fails with `RoundingRequired` when there is a fraction.
pub fn to_big_int_exact<const S: u8, T: UnscaledValue<S> + ?Sized>(value: &T) -> Result<BigInt> {
    Decimal::<S>::arithmetic(RoundingMode::Unnecessary, OverflowMode::Checked)
        .to_big_int_exact(value.unscaled_value())
}

/// Stores the whole number `source`. Fails with `Overflow` when out of range.
pub fn from_big_int<const S: u8, T: DecimalOps<S>>(
    target: T,
    source: &BigInt,
) -> Result<T::Output> {
    let unscaled = Decimal::<S>::arithmetic(RoundingMode::Unnecessary, OverflowMode::Checked)
        .from_big_int(source)?;
    Ok(target.with_unscaled(unscaled))
}
