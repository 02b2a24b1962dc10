use core::cmp::Ordering;

use crate::rounding::{divide_by_pow10_rounded, divide_rounded, RoundingMode, TruncatedPart};
use crate::scale::ScaleMetrics;
use crate::unsigned::{self, magnitude_to_i64, magnitude_to_i64_wrapping};
use crate::{DecimalError, Result};

/// Whether overflow of a 64-bit result is reported or wrapped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum OverflowMode {
    /// Silent two's complement wraparound, like native integer arithmetic.
    #[default]
    Unchecked,
    /// Overflow fails with [`DecimalError::Overflow`].
    Checked,
}

impl OverflowMode {
    #[inline(always)]
    pub const fn is_checked(self) -> bool {
        matches!(self, OverflowMode::Checked)
    }
}

/// Arithmetic on unscaled `i64` values for one `(scale, rounding, overflow)`
/// combination.
///
/// Every operand and result is an unscaled value at this arithmetic's scale.
/// Instances are small `Copy` values and can be built in `const` context, so
/// the full 19 × 8 × 2 table never needs to be materialized.
///
/// # Failures
/// - `Checked` reports results outside `i64` as [`DecimalError::Overflow`];
///   `Unchecked` wraps them instead.
/// - Both modes report [`DecimalError::DivisionByZero`] and
///   [`DecimalError::RoundingRequired`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DecimalArithmetic {
    metrics: ScaleMetrics,
    rounding: RoundingMode,
    overflow: OverflowMode,
}

// ============================================================================
// Construction
// ============================================================================

impl DecimalArithmetic {
    /// Creates the arithmetic for `scale`.
    ///
    /// # Panics
    /// Panics if `scale > 18`; in const context this is a compile error.
    #[inline]
    pub const fn new(scale: u8, rounding: RoundingMode, overflow: OverflowMode) -> Self {
        Self {
            metrics: ScaleMetrics::get(scale),
            rounding,
            overflow,
        }
    }

    /// Creates the arithmetic for a runtime scale.
    pub fn try_new(scale: u32, rounding: RoundingMode, overflow: OverflowMode) -> Result<Self> {
        let metrics = *ScaleMetrics::of(scale)?;
        Ok(Self {
            metrics,
            rounding,
            overflow,
        })
    }

    /// Same modes, different scale.
    pub fn derive(self, scale: u32) -> Result<Self> {
        Self::try_new(scale, self.rounding, self.overflow)
    }

    #[inline(always)]
    pub const fn with_rounding(self, rounding: RoundingMode) -> Self {
        Self { rounding, ..self }
    }

    #[inline(always)]
    pub const fn with_overflow(self, overflow: OverflowMode) -> Self {
        Self { overflow, ..self }
    }

    #[inline(always)]
    pub const fn scale(&self) -> u8 {
        self.metrics.scale()
    }

    #[inline(always)]
    pub const fn metrics(&self) -> &ScaleMetrics {
        &self.metrics
    }

    #[inline(always)]
    pub const fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    #[inline(always)]
    pub const fn overflow(&self) -> OverflowMode {
        self.overflow
    }

    /// The unscaled representation of `1`.
    #[inline(always)]
    pub const fn one(&self) -> i64 {
        self.metrics.scale_factor()
    }
}

// ============================================================================
// Result narrowing
// ============================================================================

impl DecimalArithmetic {
    /// Signs and narrows a magnitude according to the overflow mode.
    #[inline]
    pub(crate) const fn finish(&self, negative: bool, magnitude: u128) -> Result<i64> {
        match self.overflow {
            OverflowMode::Unchecked => Ok(magnitude_to_i64_wrapping(negative, magnitude)),
            OverflowMode::Checked => match magnitude_to_i64(negative, magnitude) {
                Some(value) => Ok(value),
                None => Err(DecimalError::Overflow),
            },
        }
    }

    #[inline]
    const fn narrow(&self, value: i128) -> Result<i64> {
        match self.overflow {
            OverflowMode::Unchecked => Ok(value as i64),
            OverflowMode::Checked => {
                if value < i64::MIN as i128 || value > i64::MAX as i128 {
                    Err(DecimalError::Overflow)
                } else {
                    Ok(value as i64)
                }
            }
        }
    }

    #[inline]
    const fn pick(&self, checked: Option<i64>, wrapped: i64) -> Result<i64> {
        match self.overflow {
            OverflowMode::Unchecked => Ok(wrapped),
            OverflowMode::Checked => match checked {
                Some(value) => Ok(value),
                None => Err(DecimalError::Overflow),
            },
        }
    }
}

// ============================================================================
// Addition and Subtraction
// ============================================================================

impl DecimalArithmetic {
    #[inline]
    pub const fn add(&self, a: i64, b: i64) -> Result<i64> {
        self.pick(a.checked_add(b), a.wrapping_add(b))
    }

    #[inline]
    pub const fn subtract(&self, a: i64, b: i64) -> Result<i64> {
        self.pick(a.checked_sub(b), a.wrapping_sub(b))
    }

    /// `a + whole`, where `whole` is a whole number (not unscaled).
    #[inline]
    pub const fn add_long(&self, a: i64, whole: i64) -> Result<i64> {
        self.narrow(a as i128 + whole as i128 * self.metrics.scale_factor() as i128)
    }

    /// `a - whole`, where `whole` is a whole number (not unscaled).
    #[inline]
    pub const fn subtract_long(&self, a: i64, whole: i64) -> Result<i64> {
        self.narrow(a as i128 - whole as i128 * self.metrics.scale_factor() as i128)
    }
}

// ============================================================================
// Multiplication
// ============================================================================

impl DecimalArithmetic {
    /// `a * b`, rescaled back down by the scale factor and rounded.
    ///
    /// The product of the two magnitudes is formed at full 128-bit width before
    /// the division, so operands near `i64::MAX` never overflow early.
    pub fn multiply(&self, a: i64, b: i64) -> Result<i64> {
        let negative = (a < 0) != (b < 0);
        let (high, low) = unsigned::multiply_hi_lo(a.unsigned_abs(), b.unsigned_abs());
        if self.scale() == 0 {
            return self.finish(negative, unsigned::join(high, low));
        }

        let factor = self.metrics.scale_factor() as u64;
        let (quotient, remainder) = unsigned::divide_wide(high, low, factor);
        let part = TruncatedPart::from_remainder(remainder, factor);
        let magnitude = self.rounding.round_magnitude(negative, quotient, part)?;
        self.finish(negative, magnitude)
    }

    /// `a * a`
    #[inline]
    pub fn square(&self, a: i64) -> Result<i64> {
        self.multiply(a, a)
    }

    /// `a * whole`, where `whole` is a whole number; no rescaling involved.
    #[inline]
    pub const fn multiply_by_long(&self, a: i64, whole: i64) -> Result<i64> {
        self.pick(a.checked_mul(whole), a.wrapping_mul(whole))
    }

    /// `a * 10^n`; negative `n` divides and rounds.
    #[inline]
    pub fn multiply_by_power_of_ten(&self, a: i64, n: i32) -> Result<i64> {
        self.rescale(a, n as i64)
    }

    /// `a * 2^n`; negative `n` shifts right with rounding.
    pub fn shift_left(&self, a: i64, n: i32) -> Result<i64> {
        if n < 0 {
            return self.shift_right_by(a, n.unsigned_abs());
        }
        let n = n as u32;
        if n == 0 || a == 0 {
            return Ok(a);
        }
        let checked = if n < 64 {
            let shifted = (a as i128) << n;
            if shifted < i64::MIN as i128 || shifted > i64::MAX as i128 {
                None
            } else {
                Some(shifted as i64)
            }
        } else {
            None
        };
        let wrapped = if n < 64 { a.wrapping_shl(n) } else { 0 };
        self.pick(checked, wrapped)
    }

    /// Shifts by a power of ten, `delta > 0` multiplying, `delta < 0`
    /// dividing with rounding.
    pub(crate) fn rescale(&self, value: i64, delta: i64) -> Result<i64> {
        if delta == 0 || value == 0 {
            return Ok(value);
        }
        if delta > 0 {
            let checked = if delta <= 18 {
                value.checked_mul(10i64.pow(delta as u32))
            } else {
                None
            };
            // 10^k is a multiple of 2^64 once k >= 64
            let wrapped = if delta < 64 {
                value.wrapping_mul(10i64.wrapping_pow(delta as u32))
            } else {
                0
            };
            return self.pick(checked, wrapped);
        }
        let exponent = u32::try_from(delta.unsigned_abs()).unwrap_or(u32::MAX);
        let negative = value < 0;
        let magnitude =
            divide_by_pow10_rounded(self.rounding, negative, value.unsigned_abs() as u128, exponent)?;
        self.finish(negative, magnitude)
    }
}

// ============================================================================
// Division
// ============================================================================

impl DecimalArithmetic {
    /// `a / b` at this scale, rounded.
    ///
    /// The dividend is widened to `a * 10^scale` at 128 bits before dividing.
    pub fn divide(&self, a: i64, b: i64) -> Result<i64> {
        if b == 0 {
            return Err(DecimalError::DivisionByZero);
        }
        let negative = (a < 0) != (b < 0);
        let dividend = self.metrics.multiply_by_scale_factor_wide(a.unsigned_abs());
        let magnitude =
            divide_rounded(self.rounding, negative, dividend, b.unsigned_abs() as u128)?;
        self.finish(negative, magnitude)
    }

    /// `a / whole`, where `whole` is a whole number, rounded.
    pub fn divide_by_long(&self, a: i64, whole: i64) -> Result<i64> {
        if whole == 0 {
            return Err(DecimalError::DivisionByZero);
        }
        let negative = (a < 0) != (whole < 0);
        let magnitude = divide_rounded(
            self.rounding,
            negative,
            a.unsigned_abs() as u128,
            whole.unsigned_abs() as u128,
        )?;
        self.finish(negative, magnitude)
    }

    /// `a / 10^n`; negative `n` multiplies.
    #[inline]
    pub fn divide_by_power_of_ten(&self, a: i64, n: i32) -> Result<i64> {
        self.rescale(a, -(n as i64))
    }

    /// `a / 2^n` with rounding; negative `n` shifts left.
    pub fn shift_right(&self, a: i64, n: i32) -> Result<i64> {
        if n < 0 {
            return self.shift_left(a, n.checked_neg().unwrap_or(i32::MAX));
        }
        self.shift_right_by(a, n as u32)
    }

    fn shift_right_by(&self, a: i64, n: u32) -> Result<i64> {
        if n == 0 {
            return Ok(a);
        }
        let negative = a < 0;
        let magnitude = a.unsigned_abs() as u128;
        let (quotient, part) = if n >= 128 {
            let part = if magnitude == 0 {
                TruncatedPart::Zero
            } else {
                TruncatedPart::LessThanHalf
            };
            (0, part)
        } else {
            let divisor = 1u128 << n;
            (
                magnitude >> n,
                TruncatedPart::from_remainder_wide(magnitude & (divisor - 1), divisor),
            )
        };
        let rounded = self.rounding.round_magnitude(negative, quotient, part)?;
        self.finish(negative, rounded)
    }

    /// Integer part of `a / b`, as an unscaled value.
    pub fn divide_to_integral_value(&self, a: i64, b: i64) -> Result<i64> {
        if b == 0 {
            return Err(DecimalError::DivisionByZero);
        }
        let quotient = a as i128 / b as i128;
        self.narrow(quotient * self.metrics.scale_factor() as i128)
    }

    /// Integer part of `a / b` as a whole number.
    pub fn divide_to_long(&self, a: i64, b: i64) -> Result<i64> {
        if b == 0 {
            return Err(DecimalError::DivisionByZero);
        }
        self.pick(a.checked_div(b), a.wrapping_div(b))
    }

    /// `a - b * trunc(a / b)`; exact, with the sign of `a`.
    pub fn remainder(&self, a: i64, b: i64) -> Result<i64> {
        if b == 0 {
            return Err(DecimalError::DivisionByZero);
        }
        Ok(a.wrapping_rem(b))
    }

    /// `1 / a`, rounded.
    #[inline]
    pub fn invert(&self, a: i64) -> Result<i64> {
        self.divide(self.one(), a)
    }
}

// ============================================================================
// Average, Power and Square Root
// ============================================================================

impl DecimalArithmetic {
    /// `(a + b) / 2`, rounded.
    ///
    /// Never overflows: the sum is formed as `(a & b) + ((a ^ b) >> 1)`, which
    /// carries the shared bits and halves the differing ones separately.
    pub fn average(&self, a: i64, b: i64) -> Result<i64> {
        let differing = a ^ b;
        let floor = (a & b) + (differing >> 1);
        if differing & 1 == 0 {
            return Ok(floor);
        }
        // Exact result is floor + 1/2.
        let (negative, truncated) = if floor >= 0 {
            (false, floor)
        } else {
            (true, floor + 1)
        };
        let increment =
            self.rounding
                .rounding_increment(negative, truncated, TruncatedPart::EqualToHalf)?;
        Ok(truncated + increment)
    }

    /// `a^exponent`, rounded once from an extended-precision evaluation.
    ///
    /// Negative exponents evaluate the reciprocal of `a` first. The cost is
    /// logarithmic in `|exponent|`.
    #[inline]
    pub fn pow(&self, a: i64, exponent: i32) -> Result<i64> {
        crate::pow::power(self, a, exponent)
    }

    /// Square root of `a`, rounded.
    ///
    /// Computed as the integer square root of `a * 10^scale`. An exact tie is
    /// impossible (`4N` is even while `(2r + 1)^2` is odd), so the half-way
    /// modes only need to know which side of `r + 1/2` the root lies.
    pub fn sqrt(&self, a: i64) -> Result<i64> {
        if a < 0 {
            return Err(DecimalError::NegativeSquareRoot);
        }
        let radicand = self.metrics.multiply_by_scale_factor_wide(a as u64);
        let root = radicand.isqrt();
        let remainder = radicand - root * root;
        let part = if remainder == 0 {
            TruncatedPart::Zero
        } else if remainder > root {
            TruncatedPart::GreaterThanHalf
        } else {
            TruncatedPart::LessThanHalf
        };
        let magnitude = self.rounding.round_magnitude(false, root, part)?;
        self.finish(false, magnitude)
    }
}

// ============================================================================
// Sign, Comparison and Rounding
// ============================================================================

impl DecimalArithmetic {
    #[inline]
    pub const fn negate(&self, a: i64) -> Result<i64> {
        self.pick(a.checked_neg(), a.wrapping_neg())
    }

    #[inline]
    pub const fn abs(&self, a: i64) -> Result<i64> {
        self.pick(a.checked_abs(), a.wrapping_abs())
    }

    #[inline(always)]
    pub const fn signum(&self, a: i64) -> i32 {
        a.signum() as i32
    }

    #[inline(always)]
    pub const fn is_zero(&self, a: i64) -> bool {
        a == 0
    }

    #[inline(always)]
    pub const fn is_one(&self, a: i64) -> bool {
        a == self.metrics.scale_factor()
    }

    #[inline(always)]
    pub fn compare(&self, a: i64, b: i64) -> Ordering {
        a.cmp(&b)
    }

    #[inline(always)]
    pub const fn is_integral(&self, a: i64) -> bool {
        self.metrics.modulo_by_scale_factor(a) == 0
    }

    /// `a` truncated toward zero to a whole number, still unscaled.
    #[inline(always)]
    pub const fn integral_part(&self, a: i64) -> i64 {
        a - self.metrics.modulo_by_scale_factor(a)
    }

    /// The digits of `a` after the decimal point, with the sign of `a`.
    #[inline(always)]
    pub const fn fractional_part(&self, a: i64) -> i64 {
        self.metrics.modulo_by_scale_factor(a)
    }

    /// Rounds `a` to `precision` fractional digits, keeping the scale.
    ///
    /// A negative precision rounds to tens, hundreds and so on; a precision at
    /// or above the scale returns `a` unchanged.
    pub fn round(&self, a: i64, precision: i32) -> Result<i64> {
        let digits = self.scale() as i64 - precision as i64;
        if digits <= 0 || a == 0 {
            return Ok(a);
        }
        let digits = u32::try_from(digits).unwrap_or(u32::MAX);
        let negative = a < 0;
        let quotient =
            divide_by_pow10_rounded(self.rounding, negative, a.unsigned_abs() as u128, digits)?;
        match unsigned::pow10_u128(digits).and_then(|factor| quotient.checked_mul(factor)) {
            Some(magnitude) => self.finish(negative, magnitude),
            None => {
                let factor = if digits < 64 {
                    10u64.wrapping_pow(digits)
                } else {
                    0
                };
                let wrapped = (quotient as u64).wrapping_mul(factor);
                self.pick(None, magnitude_to_i64_wrapping(negative, wrapped as u128))
            }
        }
    }
}

// ============================================================================
// Whole Numbers and Rescaling
// ============================================================================

impl DecimalArithmetic {
    /// The unscaled representation of the whole number `whole`.
    #[inline]
    pub const fn from_long(&self, whole: i64) -> Result<i64> {
        self.pick(
            self.metrics.multiply_by_scale_factor_checked(whole),
            self.metrics.multiply_by_scale_factor(whole),
        )
    }

    /// `a` as a whole number, rounded. Always fits.
    pub fn to_long(&self, a: i64) -> Result<i64> {
        if self.scale() == 0 {
            return Ok(a);
        }
        let negative = a < 0;
        let magnitude = divide_rounded(
            self.rounding,
            negative,
            a.unsigned_abs() as u128,
            self.metrics.scale_factor() as u128,
        )?;
        Ok(magnitude_to_i64_wrapping(negative, magnitude))
    }

    /// Converts `unscaled` at `scale` to this arithmetic's scale.
    #[inline]
    pub fn from_unscaled(&self, unscaled: i64, scale: i32) -> Result<i64> {
        self.rescale(unscaled, self.scale() as i64 - scale as i64)
    }

    /// Converts `a` to an unscaled value at `target_scale`.
    #[inline]
    pub fn to_unscaled(&self, a: i64, target_scale: i32) -> Result<i64> {
        self.rescale(a, target_scale as i64 - self.scale() as i64)
    }
}
