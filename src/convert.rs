//! Conversions between unscaled values and `BigInt`, `BigDecimal`, `f64` and
//! `f32`.
//!
//! Every conversion works on the exact value of its input. Narrowing into an
//! unscaled `i64` is always range-checked, whatever the overflow mode.

use core::cmp::Ordering;

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{ToPrimitive, Zero};

use crate::arithmetic::DecimalArithmetic;
use crate::rounding::{divide_by_pow10_rounded, RoundingMode, TruncatedPart};
use crate::unsigned::{magnitude_to_i64, pow10_u128};
use crate::{DecimalError, Result, SCALE_METRICS};

#[cold]
fn out_of_range(source: &'static str) -> DecimalError {
    tracing::trace!(source, "conversion result outside the unscaled range");
    DecimalError::Overflow
}

// ============================================================================
// BigInt and BigDecimal
// ============================================================================

impl DecimalArithmetic {
    /// The unscaled representation of the whole number `value`.
    pub fn from_big_int(&self, value: &BigInt) -> Result<i64> {
        value
            .to_i64()
            .and_then(|whole| self.metrics().multiply_by_scale_factor_checked(whole))
            .ok_or_else(|| out_of_range("BigInt"))
    }

    /// `a` as a whole number, rounded with this arithmetic's rounding mode.
    pub fn to_big_int(&self, a: i64) -> Result<BigInt> {
        self.to_long(a).map(BigInt::from)
    }

    /// `a` as a whole number; fails unless `a` is integral.
    pub fn to_big_int_exact(&self, a: i64) -> Result<BigInt> {
        self.with_rounding(RoundingMode::Unnecessary).to_big_int(a)
    }

    /// Rounds `value` to this scale.
    pub fn from_big_decimal(&self, value: &BigDecimal) -> Result<i64> {
        let (digits, scale) = value.as_bigint_and_exponent();
        self.from_big_unscaled(&digits, scale)
    }

    /// Rounds the decimal `digits * 10^-scale` to this scale.
    fn from_big_unscaled(&self, digits: &BigInt, scale: i64) -> Result<i64> {
        if digits.is_zero() {
            return Ok(0);
        }
        let negative = digits.sign() == Sign::Minus;
        let magnitude = digits.magnitude();
        let delta = self.scale() as i64 - scale;

        let rounded = if delta >= 0 {
            // A non-zero value gains a digit for every step up in scale.
            if delta > 38 {
                None
            } else {
                pow10_u128(delta as u32)
                    .and_then(|factor| (magnitude * BigUint::from(factor)).to_u128())
            }
        } else {
            let dropped = delta.unsigned_abs();
            // magnitude < 2^bits <= 10^(0.30103 * bits + 1)
            let digit_bound = magnitude.bits() * 30_103 / 100_000 + 1;
            if dropped > digit_bound + 1 {
                Some(self.rounding().round_magnitude(
                    negative,
                    0,
                    TruncatedPart::LessThanHalf,
                )?)
            } else {
                let divisor = BigUint::from(10u32).pow(dropped as u32);
                let part = TruncatedPart::from_remainder_big(&(magnitude % &divisor), &divisor);
                match (magnitude / &divisor).to_u128() {
                    Some(quotient) => {
                        Some(self.rounding().round_magnitude(negative, quotient, part)?)
                    }
                    None => None,
                }
            }
        };
        rounded
            .and_then(|magnitude| magnitude_to_i64(negative, magnitude))
            .ok_or_else(|| out_of_range("BigDecimal"))
    }

    /// `a` as a `BigDecimal` at this scale; exact.
    pub fn to_big_decimal(&self, a: i64) -> BigDecimal {
        BigDecimal::new(BigInt::from(a), self.scale() as i64)
    }

    /// `a` as a `BigDecimal` at `target_scale`, rounding when the target scale
    /// is smaller.
    pub fn to_big_decimal_with_scale(&self, a: i64, target_scale: i64) -> Result<BigDecimal> {
        let delta = target_scale - self.scale() as i64;
        if delta >= 0 {
            let exponent = u32::try_from(delta).map_err(|_| out_of_range("BigDecimal"))?;
            let digits = BigInt::from(a) * BigInt::from(10u32).pow(exponent);
            return Ok(BigDecimal::new(digits, target_scale));
        }
        let dropped = u32::try_from(delta.unsigned_abs()).unwrap_or(u32::MAX);
        let negative = a < 0;
        let magnitude =
            divide_by_pow10_rounded(self.rounding(), negative, a.unsigned_abs() as u128, dropped)?;
        let digits = BigInt::from(magnitude);
        let digits = if negative { -digits } else { digits };
        Ok(BigDecimal::new(digits, target_scale))
    }
}

// ============================================================================
// Binary floating point
// ============================================================================

/// IEEE-754 binary formats, viewed through their raw bits.
trait BinaryFloat: Copy {
    const FRACTION_BITS: u32;
    const EXPONENT_BITS: u32;
    const ZERO: Self;

    fn to_raw(self) -> u64;
    fn from_raw(raw: u64) -> Self;
    fn finite(self) -> bool;
    /// `magnitude / 10^scale`, within a few units in the last place.
    fn approximate(magnitude: u64, scale: u8) -> Self;

    /// `(negative, mantissa, exponent)` with `|self| = mantissa * 2^exponent`.
    fn decompose(self) -> (bool, u64, i32) {
        let raw = self.to_raw();
        let negative = (raw >> (Self::FRACTION_BITS + Self::EXPONENT_BITS)) & 1 == 1;
        let biased = ((raw >> Self::FRACTION_BITS) & ((1 << Self::EXPONENT_BITS) - 1)) as i32;
        let fraction = raw & ((1 << Self::FRACTION_BITS) - 1);
        let offset = (1 << (Self::EXPONENT_BITS - 1)) - 1 + Self::FRACTION_BITS as i32;
        if biased == 0 {
            (negative, fraction, 1 - offset)
        } else {
            (negative, fraction | 1 << Self::FRACTION_BITS, biased - offset)
        }
    }

    fn negated(self) -> Self {
        Self::from_raw(self.to_raw() ^ (1 << (Self::FRACTION_BITS + Self::EXPONENT_BITS)))
    }

    /// Next representable value away from zero; `self` positive and finite.
    fn next_up(self) -> Self {
        Self::from_raw(self.to_raw() + 1)
    }

    /// Next representable value toward zero; `self` positive.
    fn next_down(self) -> Self {
        Self::from_raw(self.to_raw() - 1)
    }
}

impl BinaryFloat for f64 {
    const FRACTION_BITS: u32 = 52;
    const EXPONENT_BITS: u32 = 11;
    const ZERO: Self = 0.0;

    #[inline(always)]
    fn to_raw(self) -> u64 {
        self.to_bits()
    }

    #[inline(always)]
    fn from_raw(raw: u64) -> Self {
        f64::from_bits(raw)
    }

    #[inline(always)]
    fn finite(self) -> bool {
        self.is_finite()
    }

    #[inline(always)]
    fn approximate(magnitude: u64, scale: u8) -> Self {
        magnitude as f64 / SCALE_METRICS[scale as usize].scale_factor() as f64
    }
}

impl BinaryFloat for f32 {
    const FRACTION_BITS: u32 = 23;
    const EXPONENT_BITS: u32 = 8;
    const ZERO: Self = 0.0;

    #[inline(always)]
    fn to_raw(self) -> u64 {
        self.to_bits() as u64
    }

    #[inline(always)]
    fn from_raw(raw: u64) -> Self {
        f32::from_bits(raw as u32)
    }

    #[inline(always)]
    fn finite(self) -> bool {
        self.is_finite()
    }

    #[inline(always)]
    fn approximate(magnitude: u64, scale: u8) -> Self {
        magnitude as f32 / SCALE_METRICS[scale as usize].scale_factor() as f32
    }
}

/// Compares `mantissa * 2^exponent` with `magnitude / 10^scale`.
fn compare_exact(mantissa: &BigUint, exponent: i32, magnitude: u64, scale: u8) -> Ordering {
    let left = mantissa * BigUint::from(SCALE_METRICS[scale as usize].scale_factor() as u64);
    let right = BigUint::from(magnitude);
    if exponent >= 0 {
        (left << exponent as usize).cmp(&right)
    } else {
        left.cmp(&(right << exponent.unsigned_abs() as usize))
    }
}

fn compare_float<F: BinaryFloat>(value: F, magnitude: u64, scale: u8) -> Ordering {
    let (_, mantissa, exponent) = value.decompose();
    compare_exact(&BigUint::from(mantissa), exponent, magnitude, scale)
}

impl DecimalArithmetic {
    fn from_float<F: BinaryFloat>(&self, value: F) -> Result<i64> {
        if !value.finite() {
            tracing::trace!("rejected NaN or infinite float");
            return Err(DecimalError::NonFinite);
        }
        let (negative, mantissa, exponent) = value.decompose();
        if mantissa == 0 {
            return Ok(0);
        }
        // Below 2^53 * 2^60, comfortably inside u128.
        let scaled = mantissa as u128 * self.one() as u128;

        let magnitude = if exponent >= 0 {
            let shift = exponent as u32;
            if shift >= 64 || scaled.leading_zeros() < shift {
                return Err(out_of_range("float"));
            }
            scaled << shift
        } else {
            let shift = exponent.unsigned_abs();
            let (quotient, part) = if shift >= 128 {
                (0, TruncatedPart::LessThanHalf)
            } else {
                let divisor = 1u128 << shift;
                (
                    scaled >> shift,
                    TruncatedPart::from_remainder_wide(scaled & (divisor - 1), divisor),
                )
            };
            self.rounding().round_magnitude(negative, quotient, part)?
        };
        magnitude_to_i64(negative, magnitude).ok_or_else(|| out_of_range("float"))
    }

    fn to_float<F: BinaryFloat>(&self, a: i64) -> Result<F> {
        if a == 0 {
            return Ok(F::ZERO);
        }
        let negative = a < 0;
        let magnitude = a.unsigned_abs();
        let scale = self.scale();

        // Walk from the approximation to the largest float not above the
        // exact value.
        let mut lower = F::approximate(magnitude, scale);
        while compare_float(lower, magnitude, scale) == Ordering::Greater {
            lower = lower.next_down();
        }
        loop {
            let next = lower.next_up();
            if compare_float(next, magnitude, scale) == Ordering::Greater {
                break;
            }
            lower = next;
        }

        let chosen = if compare_float(lower, magnitude, scale) == Ordering::Equal {
            lower
        } else {
            let upper = lower.next_up();
            let (_, low_mantissa, low_exponent) = lower.decompose();
            let (_, high_mantissa, high_exponent) = upper.decompose();
            let exponent = low_exponent.min(high_exponent);
            let doubled_midpoint = (BigUint::from(low_mantissa)
                << (low_exponent - exponent) as usize)
                + (BigUint::from(high_mantissa) << (high_exponent - exponent) as usize);
            let vs_half = compare_exact(&doubled_midpoint, exponent - 1, magnitude, scale).reverse();
            let part = TruncatedPart::from_half_comparison(vs_half, true);
            if self.rounding().rounds_away(negative, low_mantissa & 1 == 1, part)? {
                upper
            } else {
                lower
            }
        };
        Ok(if negative { chosen.negated() } else { chosen })
    }

    /// The exact value of `value`, rounded to this scale.
    ///
    /// # Errors
    /// `NonFinite` for NaN and infinities, `Overflow` when out of range.
    pub fn from_f64(&self, value: f64) -> Result<i64> {
        self.from_float(value)
    }

    pub fn from_f32(&self, value: f32) -> Result<i64> {
        self.from_float(value)
    }

    /// `a` rounded to a neighbouring `f64` with this arithmetic's rounding
    /// mode; only `Unnecessary` can fail.
    pub fn to_f64(&self, a: i64) -> Result<f64> {
        self.to_float(a)
    }

    pub fn to_f32(&self, a: i64) -> Result<f32> {
        self.to_float(a)
    }
}
