//! Integer powers evaluated at extended precision.
//!
//! Positive powers whose exact product fits 128 bits are computed exactly
//! and rounded once. Everything else goes through [`Extended`].
//!
//! Intermediate products are kept as `mantissa * 10^exponent` with a mantissa
//! of at most [`PRECISION`] significant digits, truncated toward zero. A sticky
//! flag remembers whether anything was ever dropped, so the single final
//! rounding step can still tell an exact tie from a value just above it.

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

use crate::arithmetic::{DecimalArithmetic, OverflowMode};
use crate::rounding::{divide_by_pow10_rounded, TruncatedPart};
use crate::unsigned::magnitude_to_i64;
use crate::{DecimalError, Result};

/// Significant digits carried through the intermediate products.
const PRECISION: u32 = 40;

#[derive(Clone, Debug)]
struct Extended {
    mantissa: BigUint,
    exponent: i64,
    inexact: bool,
}

impl Extended {
    fn from_unscaled(magnitude: u64, scale: u8) -> Self {
        Self {
            mantissa: BigUint::from(magnitude),
            exponent: -(scale as i64),
            inexact: false,
        }
        .normalized()
    }

    /// `1 / (magnitude * 10^-scale)`; `magnitude` must be non-zero.
    fn reciprocal(magnitude: u64, scale: u8) -> Self {
        let shift = PRECISION + decimal_digits(&BigUint::from(magnitude));
        let numerator = pow10(shift);
        let divisor = BigUint::from(magnitude);
        let inexact = !(&numerator % &divisor).is_zero();
        Self {
            mantissa: numerator / divisor,
            exponent: scale as i64 - shift as i64,
            inexact,
        }
        .normalized()
    }

    fn multiply(&self, other: &Self) -> Self {
        Self {
            mantissa: &self.mantissa * &other.mantissa,
            exponent: self.exponent + other.exponent,
            inexact: self.inexact || other.inexact,
        }
        .normalized()
    }

    fn normalized(mut self) -> Self {
        if self.mantissa.is_zero() {
            return self;
        }
        // Trailing zeros of an exact value would crowd out real digits. An
        // inexact mantissa keeps all PRECISION digits.
        while !self.inexact && (&self.mantissa % 10u32).is_zero() {
            self.mantissa /= 10u32;
            self.exponent += 1;
        }
        let digits = decimal_digits(&self.mantissa);
        if digits > PRECISION {
            let dropped = digits - PRECISION;
            let divisor = pow10(dropped);
            if !(&self.mantissa % &divisor).is_zero() {
                self.inexact = true;
            }
            self.mantissa /= divisor;
            self.exponent += dropped as i64;
        }
        self
    }

    /// Rounds to an unscaled magnitude at `scale`; `None` when it cannot fit
    /// a `u128`.
    fn round_to_scale(&self, arith: &DecimalArithmetic, negative: bool) -> Result<Option<u128>> {
        let shift = self.exponent + arith.scale() as i64;
        if shift >= 0 {
            // An inexact mantissa has PRECISION digits, so the value is at
            // least 10^39 units and cannot fit regardless.
            if self.inexact || shift > 38 {
                return Ok(None);
            }
            return Ok((&self.mantissa * pow10(shift as u32)).to_u128());
        }

        let dropped = shift.unsigned_abs();
        let digits = decimal_digits(&self.mantissa) as u64;
        let (quotient, part) = if dropped > digits + 1 {
            // mantissa < 10^digits <= 10^(dropped - 2), well below half
            (BigUint::zero(), TruncatedPart::LessThanHalf)
        } else {
            let divisor = pow10(dropped as u32);
            let remainder = &self.mantissa % &divisor;
            (
                &self.mantissa / &divisor,
                TruncatedPart::from_remainder_big(&remainder, &divisor),
            )
        };
        let part = part.with_sticky(self.inexact);
        match quotient.to_u128() {
            Some(quotient) => arith.rounding().round_magnitude(negative, quotient, part).map(Some),
            None => Ok(None),
        }
    }
}

fn pow10(exponent: u32) -> BigUint {
    BigUint::from(10u32).pow(exponent)
}

/// Number of decimal digits of a non-zero value.
fn decimal_digits(value: &BigUint) -> u32 {
    if value.is_zero() {
        return 1;
    }
    // (bits - 1) * log10(2) rounded down is a lower bound off by at most one.
    let estimate = ((value.bits() - 1) * 30_103 / 100_000) as u32 + 1;
    if *value >= pow10(estimate) {
        estimate + 1
    } else {
        estimate
    }
}

pub(crate) fn power(arith: &DecimalArithmetic, base: i64, exponent: i32) -> Result<i64> {
    if exponent == 0 {
        return Ok(arith.one());
    }
    if base == 0 {
        return if exponent > 0 {
            Ok(0)
        } else {
            Err(DecimalError::DivisionByZero)
        };
    }
    match exponent {
        1 => return Ok(base),
        -1 => return arith.invert(base),
        _ => {}
    }

    let negative = base < 0 && exponent & 1 != 0;
    if exponent > 0 {
        if let Some(exact) = exact_power(base.unsigned_abs(), exponent as u32) {
            // The product carries `scale * exponent` fractional digits.
            let dropped = arith.scale() as u64 * (exponent as u64 - 1);
            let dropped = u32::try_from(dropped).unwrap_or(u32::MAX);
            let rounded = divide_by_pow10_rounded(arith.rounding(), negative, exact, dropped)?;
            if let Some(value) = magnitude_to_i64(negative, rounded) {
                return Ok(value);
            }
        }
    }
    extended_power(arith, base, exponent)
}

/// `magnitude^exponent` when it fits 128 bits.
fn exact_power(magnitude: u64, exponent: u32) -> Option<u128> {
    let mut factor = magnitude as u128;
    let mut remaining = exponent;
    let mut result = 1u128;
    loop {
        if remaining & 1 == 1 {
            result = result.checked_mul(factor)?;
        }
        remaining >>= 1;
        if remaining == 0 {
            return Some(result);
        }
        factor = factor.checked_mul(factor)?;
    }
}

fn extended_power(arith: &DecimalArithmetic, base: i64, exponent: i32) -> Result<i64> {
    let negative = base < 0 && exponent & 1 != 0;
    let magnitude = base.unsigned_abs();
    let mut factor = if exponent > 0 {
        Extended::from_unscaled(magnitude, arith.scale())
    } else {
        Extended::reciprocal(magnitude, arith.scale())
    };

    let mut remaining = exponent.unsigned_abs();
    let mut result = Extended {
        mantissa: BigUint::one(),
        exponent: 0,
        inexact: false,
    };
    loop {
        if remaining & 1 == 1 {
            result = result.multiply(&factor);
        }
        remaining >>= 1;
        if remaining == 0 {
            break;
        }
        factor = factor.multiply(&factor);
    }

    let rounded = result
        .round_to_scale(arith, negative)?
        .and_then(|magnitude| magnitude_to_i64(negative, magnitude));
    match (rounded, arith.overflow()) {
        (Some(value), _) => Ok(value),
        (None, OverflowMode::Checked) => {
            tracing::trace!(base, exponent, "power overflows 64 bits");
            Err(DecimalError::Overflow)
        }
        (None, OverflowMode::Unchecked) => wrapping_power(arith, base, exponent),
    }
}

/// Square-and-multiply with the arithmetic's own wrapping multiply, for
/// results that do not fit.
fn wrapping_power(arith: &DecimalArithmetic, base: i64, exponent: i32) -> Result<i64> {
    let mut factor = if exponent > 0 {
        base
    } else {
        arith.invert(base)?
    };
    let mut remaining = exponent.unsigned_abs();
    let mut result = arith.one();
    while remaining > 0 {
        if remaining & 1 == 1 {
            result = arith.multiply(result, factor)?;
        }
        remaining >>= 1;
        if remaining > 0 {
            factor = arith.multiply(factor, factor)?;
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RoundingMode;
    use bigdecimal::BigDecimal;
    use num_bigint::BigInt;
    use proptest::prelude::*;

    fn arith(scale: u8, rounding: RoundingMode) -> DecimalArithmetic {
        DecimalArithmetic::new(scale, rounding, OverflowMode::Checked)
    }

    #[test]
    fn test_decimal_digits() {
        assert_eq!(decimal_digits(&BigUint::from(1u32)), 1);
        assert_eq!(decimal_digits(&BigUint::from(9u32)), 1);
        assert_eq!(decimal_digits(&BigUint::from(10u32)), 2);
        assert_eq!(decimal_digits(&BigUint::from(u64::MAX)), 20);
        assert_eq!(decimal_digits(&pow10(40)), 41);
        assert_eq!(decimal_digits(&(pow10(40) - 1u32)), 40);
    }

    #[test]
    fn test_exact_power() {
        assert_eq!(exact_power(7, 0), Some(1));
        assert_eq!(exact_power(1, u32::MAX), Some(1));
        assert_eq!(exact_power(10, 38), Some(10u128.pow(38)));
        assert_eq!(exact_power(2, 127), Some(1u128 << 127));
        assert_eq!(exact_power(2, 128), None);
        assert_eq!(exact_power(u64::MAX, 2), Some(u64::MAX as u128 * u64::MAX as u128));
        assert_eq!(exact_power(u64::MAX, 3), None);
    }

    #[test]
    fn test_ulp_powers_round_away() {
        let down = arith(18, RoundingMode::Down);
        let up = arith(18, RoundingMode::Up);
        assert_eq!(down.pow(1, 1_000_000), Ok(0));
        assert_eq!(up.pow(1, 1_000_000), Ok(1));
        assert_eq!(up.pow(-1, 1_000_001), Ok(-1));
        assert_eq!(
            arith(18, RoundingMode::Unnecessary).pow(1, 2),
            Err(DecimalError::RoundingRequired)
        );
    }

    #[test]
    fn test_small_powers_exact() {
        let scale_2 = arith(2, RoundingMode::Unnecessary);
        assert_eq!(scale_2.pow(200, 10), Ok(102_400));
        assert_eq!(scale_2.pow(-200, 3), Ok(-800));
        assert_eq!(scale_2.pow(-200, 2), Ok(400));
        assert_eq!(scale_2.pow(155, 2), Err(DecimalError::RoundingRequired));
        assert_eq!(scale_2.pow(200, -2), Ok(25));
        assert_eq!(scale_2.pow(1, 1), Ok(1));
        assert_eq!(scale_2.pow(12_345, 0), Ok(100));
    }

    #[test]
    fn test_rounded_powers() {
        // 1.5^2 = 2.25 at scale 1
        assert_eq!(arith(1, RoundingMode::HalfUp).pow(15, 2), Ok(23));
        assert_eq!(arith(1, RoundingMode::HalfEven).pow(15, 2), Ok(22));
        // 3^-1 at scale 4
        assert_eq!(arith(4, RoundingMode::HalfUp).pow(3_0000, -1), Ok(3333));
        // 3^-2 = 0.111...
        assert_eq!(arith(4, RoundingMode::HalfUp).pow(3_0000, -2), Ok(1111));
        assert_eq!(arith(4, RoundingMode::Up).pow(3_0000, -2), Ok(1112));
    }

    #[test]
    fn test_zero_and_one() {
        let scale_4 = arith(4, RoundingMode::HalfUp);
        assert_eq!(scale_4.pow(0, 5), Ok(0));
        assert_eq!(scale_4.pow(0, 0), Ok(1_0000));
        assert_eq!(scale_4.pow(0, -3), Err(DecimalError::DivisionByZero));
        assert_eq!(scale_4.pow(1_0000, i32::MAX), Ok(1_0000));
        assert_eq!(scale_4.pow(1_0000, i32::MIN), Ok(1_0000));
        assert_eq!(scale_4.pow(-1_0000, i32::MAX), Ok(-1_0000));
        assert_eq!(scale_4.pow(-1_0000, i32::MIN), Ok(1_0000));
    }

    #[test]
    fn test_huge_exponents() {
        let scale_4 = arith(4, RoundingMode::HalfUp);
        assert_eq!(scale_4.pow(2_0000, i32::MAX), Err(DecimalError::Overflow));
        assert_eq!(scale_4.pow(2_0000, i32::MIN), Ok(0));
        assert_eq!(scale_4.with_rounding(RoundingMode::Up).pow(2_0000, i32::MIN), Ok(1));
        assert_eq!(scale_4.pow(5000, i32::MAX), Ok(0));
        // 1.0001^10000 = 2.71814...
        assert_eq!(scale_4.pow(1_0001, 10_000), Ok(2_7181));
    }

    #[test]
    fn test_unchecked_power_wraps() {
        let unchecked = DecimalArithmetic::new(0, RoundingMode::HalfUp, OverflowMode::Unchecked);
        assert_eq!(unchecked.pow(2, 64), Ok(0));
        assert_eq!(unchecked.pow(3, 41), Ok(3i64.wrapping_pow(41)));
        assert_eq!(unchecked.pow(3, 20), Ok(3_486_784_401));
    }

    #[test]
    fn test_near_tie_is_not_mistaken_for_tie() {
        // 0.5^2 = 0.25 rounds to 0.3 with HalfUp and 0.2 with HalfDown at scale 1.
        assert_eq!(arith(1, RoundingMode::HalfUp).pow(5, 2), Ok(3));
        assert_eq!(arith(1, RoundingMode::HalfDown).pow(5, 2), Ok(2));
        // 1/8 = 0.125 exactly: a tie at scale 2.
        assert_eq!(arith(2, RoundingMode::HalfDown).pow(800, -1), Ok(12));
        assert_eq!(arith(2, RoundingMode::HalfUp).pow(200, -3), Ok(13));
        assert_eq!(arith(2, RoundingMode::HalfDown).pow(200, -3), Ok(12));
    }

    proptest! {
        #[test]
        fn prop_matches_big_decimal(
            base in -2_000_000i64..2_000_000,
            exponent in 2i32..6,
            mode_index in 0usize..7,
        ) {
            let rounding = RoundingMode::ALL[mode_index];
            let arith = arith(6, rounding);
            let exact = BigDecimal::new(BigInt::from(base).pow(exponent as u32), 6 * exponent as i64)
                .with_scale_round(6, rounding.to_bigdecimal().unwrap());
            let (digits, _) = exact.into_bigint_and_exponent();
            match digits.to_i64() {
                Some(expected) => prop_assert_eq!(arith.pow(base, exponent), Ok(expected)),
                None => prop_assert_eq!(arith.pow(base, exponent), Err(DecimalError::Overflow)),
            }
        }

        #[test]
        fn prop_exact_path_agrees_with_extended(
            base in prop_oneof![any::<i64>(), -1_000_000i64..1_000_000, -100i64..100],
            exponent in 2i32..12,
            scale in 0u8..=18,
            mode_index in 0usize..7,
        ) {
            prop_assume!(base != 0);
            let rounding = RoundingMode::ALL[mode_index];
            for overflow in [OverflowMode::Checked, OverflowMode::Unchecked] {
                let arith = DecimalArithmetic::new(scale, rounding, overflow);
                prop_assert_eq!(
                    power(&arith, base, exponent),
                    extended_power(&arith, base, exponent)
                );
            }
        }
    }
}
