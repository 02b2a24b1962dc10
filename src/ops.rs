use crate::arithmetic::{DecimalArithmetic, OverflowMode};
use crate::rounding::RoundingMode;
use crate::{Decimal, Result};

fn apply<const S: u8, T>(
    target: T,
    rounding: RoundingMode,
    overflow: OverflowMode,
    op: impl FnOnce(&DecimalArithmetic, i64) -> Result<i64>,
) -> Result<T::Output>
where
    T: DecimalOps<S>,
{
    let arith = Decimal::<S>::arithmetic(rounding, overflow);
    let unscaled = op(&arith, target.unscaled_value())?;
    Ok(target.with_unscaled(unscaled))
}

/// Read access to the unscaled value of a decimal at scale `S`.
///
/// Implemented for [`Decimal`], [`MutableDecimal`](crate::MutableDecimal)
/// and `&mut MutableDecimal`, so read-only helpers accept any of them.
pub trait UnscaledValue<const S: u8> {
    fn unscaled_value(&self) -> i64;
}

impl<T: UnscaledValue<S> + ?Sized, const S: u8> UnscaledValue<S> for &mut T {
    #[inline(always)]
    fn unscaled_value(&self) -> i64 {
        (**self).unscaled_value()
    }
}

/// Operations shared by [`Decimal`] and [`MutableDecimal`](crate::MutableDecimal).
///
/// Every operation names its rounding and overflow modes, so the caller
/// always decides how an inexact or out-of-range result is handled. For
/// `Decimal` the result is a new value; for `&mut MutableDecimal` the
/// result overwrites the receiver, which is left untouched on error.
///
/// The right-hand operand is always a [`Decimal`] of the same scale.
///
/// ```rust
/// use scaledec::{Decimal2f, DecimalOps, MutableDecimal, OverflowMode, RoundingMode};
///
/// let mut total = MutableDecimal::<2>::new();
/// total
///     .try_add(Decimal2f::from_unscaled(1_000), OverflowMode::Checked)
///     .unwrap()
///     .try_mul(Decimal2f::from_unscaled(105), RoundingMode::HalfEven, OverflowMode::Checked)
///     .unwrap();
/// assert_eq!(total.to_immutable().unscaled(), 1_050);
/// ```
pub trait DecimalOps<const S: u8>: UnscaledValue<S> + Sized {
    type Output;

    /// Produces the result holding `unscaled`.
    fn with_unscaled(self, unscaled: i64) -> Self::Output;

    fn try_add(self, rhs: Decimal<S>, overflow: OverflowMode) -> Result<Self::Output> {
        apply::<S, Self>(self, RoundingMode::Unnecessary, overflow, |arith, a| {
            arith.add(a, rhs.unscaled())
        })
    }

    fn try_sub(self, rhs: Decimal<S>, overflow: OverflowMode) -> Result<Self::Output> {
        apply::<S, Self>(self, RoundingMode::Unnecessary, overflow, |arith, a| {
            arith.subtract(a, rhs.unscaled())
        })
    }

    fn try_mul(
        self,
        rhs: Decimal<S>,
        rounding: RoundingMode,
        overflow: OverflowMode,
    ) -> Result<Self::Output> {
        apply::<S, Self>(self, rounding, overflow, |arith, a| arith.multiply(a, rhs.unscaled()))
    }

    fn try_div(
        self,
        rhs: Decimal<S>,
        rounding: RoundingMode,
        overflow: OverflowMode,
    ) -> Result<Self::Output> {
        apply::<S, Self>(self, rounding, overflow, |arith, a| arith.divide(a, rhs.unscaled()))
    }

    /// Remainder of truncating division; exact.
    fn try_rem(self, rhs: Decimal<S>) -> Result<Self::Output> {
        apply::<S, Self>(self, RoundingMode::Unnecessary, OverflowMode::Checked, |arith, a| {
            arith.remainder(a, rhs.unscaled())
        })
    }

    /// Mean of `self` and `rhs`; never overflows.
    fn try_avg(self, rhs: Decimal<S>, rounding: RoundingMode) -> Result<Self::Output> {
        apply::<S, Self>(self, rounding, OverflowMode::Checked, |arith, a| {
            arith.average(a, rhs.unscaled())
        })
    }

    fn try_add_i64(self, whole: i64, overflow: OverflowMode) -> Result<Self::Output> {
        apply::<S, Self>(self, RoundingMode::Unnecessary, overflow, |arith, a| {
            arith.add_long(a, whole)
        })
    }

    fn try_sub_i64(self, whole: i64, overflow: OverflowMode) -> Result<Self::Output> {
        apply::<S, Self>(self, RoundingMode::Unnecessary, overflow, |arith, a| {
            arith.subtract_long(a, whole)
        })
    }

    fn try_mul_i64(self, whole: i64, overflow: OverflowMode) -> Result<Self::Output> {
        apply::<S, Self>(self, RoundingMode::Unnecessary, overflow, |arith, a| {
            arith.multiply_by_long(a, whole)
        })
    }

    fn try_div_i64(
        self,
        whole: i64,
        rounding: RoundingMode,
        overflow: OverflowMode,
    ) -> Result<Self::Output> {
        apply::<S, Self>(self, rounding, overflow, |arith, a| arith.divide_by_long(a, whole))
    }

    fn try_pow(
        self,
        exponent: i32,
        rounding: RoundingMode,
        overflow: OverflowMode,
    ) -> Result<Self::Output> {
        apply::<S, Self>(self, rounding, overflow, |arith, a| arith.pow(a, exponent))
    }

    fn try_sqrt(self, rounding: RoundingMode) -> Result<Self::Output> {
        apply::<S, Self>(self, rounding, OverflowMode::Checked, |arith, a| arith.sqrt(a))
    }

    fn try_square(self, rounding: RoundingMode, overflow: OverflowMode) -> Result<Self::Output> {
        apply::<S, Self>(self, rounding, overflow, |arith, a| arith.square(a))
    }

    fn try_recip(self, rounding: RoundingMode, overflow: OverflowMode) -> Result<Self::Output> {
        apply::<S, Self>(self, rounding, overflow, |arith, a| arith.invert(a))
    }

    fn try_neg(self, overflow: OverflowMode) -> Result<Self::Output> {
        apply::<S, Self>(self, RoundingMode::Unnecessary, overflow, |arith, a| arith.negate(a))
    }

    fn try_abs(self, overflow: OverflowMode) -> Result<Self::Output> {
        apply::<S, Self>(self, RoundingMode::Unnecessary, overflow, |arith, a| arith.abs(a))
    }

    /// Rounds to `precision` fractional digits; negative precisions round
    /// to tens, hundreds and so on.
    fn try_round(
        self,
        precision: i32,
        rounding: RoundingMode,
        overflow: OverflowMode,
    ) -> Result<Self::Output> {
        apply::<S, Self>(self, rounding, overflow, |arith, a| arith.round(a, precision))
    }

    /// `self * 2^n`, rounding when `n` is negative.
    fn try_shl(self, n: i32, rounding: RoundingMode, overflow: OverflowMode) -> Result<Self::Output> {
        apply::<S, Self>(self, rounding, overflow, |arith, a| arith.shift_left(a, n))
    }

    /// `self / 2^n`, rounded.
    fn try_shr(self, n: i32, rounding: RoundingMode, overflow: OverflowMode) -> Result<Self::Output> {
        apply::<S, Self>(self, rounding, overflow, |arith, a| arith.shift_right(a, n))
    }

    /// `self * 10^n`, rounding when `n` is negative.
    fn try_scale_by_pow10(
        self,
        n: i32,
        rounding: RoundingMode,
        overflow: OverflowMode,
    ) -> Result<Self::Output> {
        apply::<S, Self>(self, rounding, overflow, |arith, a| {
            arith.multiply_by_power_of_ten(a, n)
        })
    }
}
