use core::fmt;
use core::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

use crate::ops::{DecimalOps, UnscaledValue};
use crate::scale::MAX_SCALE;
use crate::Decimal;

/// Fixed-point decimal that owns its unscaled value and overwrites it.
///
/// Every [`DecimalOps`] method on `&mut MutableDecimal` stores the result in
/// the receiver and hands the same reference back, so operations chain:
///
/// ```rust
/// use scaledec::{Decimal2f, DecimalOps, MutableDecimal, OverflowMode, RoundingMode};
///
/// let mut value = MutableDecimal::<2>::from_unscaled(1_000);
/// value
///     .try_div_i64(3, RoundingMode::HalfUp, OverflowMode::Checked)?
///     .try_add(Decimal2f::ONE, OverflowMode::Checked)?;
/// assert_eq!(value.to_string(), "4.33");
/// # Ok::<(), scaledec::DecimalError>(())
/// ```
///
/// On error the receiver keeps its previous value. Not `Copy`: use
/// [`to_immutable`](Self::to_immutable) to take a snapshot.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MutableDecimal<const S: u8> {
    unscaled: i64,
}

impl<const S: u8> MutableDecimal<S> {
    const VALID_SCALE: () = assert!(S <= MAX_SCALE, "scale must be in 0..=18");

    /// A new zero.
    #[inline(always)]
    pub const fn new() -> Self {
        Self::from_unscaled(0)
    }

    /// ```compile_fail
    /// let _ = scaledec::MutableDecimal::<19>::from_unscaled(5);
    /// ```
    #[inline(always)]
    pub const fn from_unscaled(unscaled: i64) -> Self {
        let () = Self::VALID_SCALE;
        Self { unscaled }
    }

    #[inline(always)]
    pub const fn scale(&self) -> u8 {
        S
    }

    #[inline(always)]
    pub const fn unscaled(&self) -> i64 {
        self.unscaled
    }

    /// Overwrites the value with `value`.
    #[inline(always)]
    pub fn set(&mut self, value: Decimal<S>) -> &mut Self {
        self.unscaled = value.unscaled();
        self
    }

    #[inline(always)]
    pub fn set_unscaled(&mut self, unscaled: i64) -> &mut Self {
        self.unscaled = unscaled;
        self
    }

    /// Immutable snapshot of the current value.
    #[inline(always)]
    pub const fn to_immutable(&self) -> Decimal<S> {
        Decimal::from_unscaled(self.unscaled)
    }
}

impl<const S: u8> Default for MutableDecimal<S> {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<const S: u8> UnscaledValue<S> for MutableDecimal<S> {
    #[inline(always)]
    fn unscaled_value(&self) -> i64 {
        self.unscaled
    }
}

impl<'a, const S: u8> DecimalOps<S> for &'a mut MutableDecimal<S> {
    type Output = &'a mut MutableDecimal<S>;

    #[inline(always)]
    fn with_unscaled(self, unscaled: i64) -> Self::Output {
        self.unscaled = unscaled;
        self
    }
}

// ============================================================================
// Operator Overloading
// ============================================================================

impl<const S: u8> AddAssign<Decimal<S>> for MutableDecimal<S> {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Decimal<S>) {
        self.unscaled = (self.to_immutable() + rhs).unscaled();
    }
}

impl<const S: u8> SubAssign<Decimal<S>> for MutableDecimal<S> {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Decimal<S>) {
        self.unscaled = (self.to_immutable() - rhs).unscaled();
    }
}

impl<const S: u8> MulAssign<Decimal<S>> for MutableDecimal<S> {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: Decimal<S>) {
        self.unscaled = (self.to_immutable() * rhs).unscaled();
    }
}

impl<const S: u8> DivAssign<Decimal<S>> for MutableDecimal<S> {
    #[inline(always)]
    fn div_assign(&mut self, rhs: Decimal<S>) {
        self.unscaled = (self.to_immutable() / rhs).unscaled();
    }
}

// ============================================================================
// Conversions and Formatting
// ============================================================================

impl<const S: u8> From<Decimal<S>> for MutableDecimal<S> {
    #[inline(always)]
    fn from(value: Decimal<S>) -> Self {
        value.to_mutable()
    }
}

impl<const S: u8> From<&MutableDecimal<S>> for Decimal<S> {
    #[inline(always)]
    fn from(value: &MutableDecimal<S>) -> Self {
        value.to_immutable()
    }
}

impl<const S: u8> From<MutableDecimal<S>> for Decimal<S> {
    #[inline(always)]
    fn from(value: MutableDecimal<S>) -> Self {
        value.to_immutable()
    }
}

impl<const S: u8> fmt::Display for MutableDecimal<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_immutable(), f)
    }
}

impl<const S: u8> fmt::Debug for MutableDecimal<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.debug_struct("MutableDecimal")
                .field("unscaled", &self.unscaled)
                .field("scale", &S)
                .finish()
        } else {
            write!(f, "MutableDecimal<{}>({})", S, self)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::string::ToString;

    use super::*;
    use crate::{Decimal2f, DecimalError, OverflowMode, RoundingMode};

    #[test]
    fn test_new_is_zero() {
        let value = MutableDecimal::<4>::new();
        assert_eq!(value.unscaled(), 0);
        assert_eq!(value.scale(), 4);
        assert_eq!(value, MutableDecimal::default());
    }

    #[test]
    fn test_set() {
        let mut value = MutableDecimal::<2>::new();
        value.set(Decimal2f::from_unscaled(125));
        assert_eq!(value.to_immutable(), Decimal2f::from_unscaled(125));
        value.set_unscaled(-7);
        assert_eq!(value.to_string(), "-0.07");
    }

    #[test]
    fn test_chained_operations() {
        let mut value = MutableDecimal::<2>::from_unscaled(1_000);
        value
            .try_mul_i64(3, OverflowMode::Checked)
            .unwrap()
            .try_sqrt(RoundingMode::HalfUp)
            .unwrap()
            .try_round(1, RoundingMode::HalfEven, OverflowMode::Checked)
            .unwrap();
        // sqrt(30) = 5.477...
        assert_eq!(value.unscaled(), 550);
    }

    #[test]
    fn test_error_leaves_value() {
        let mut value = MutableDecimal::<2>::from_unscaled(i64::MAX);
        let result = value.try_add_i64(1, OverflowMode::Checked).map(|v| v.unscaled());
        assert_eq!(result, Err(DecimalError::Overflow));
        assert_eq!(value.unscaled(), i64::MAX);

        value
            .try_add(Decimal2f::ULP, OverflowMode::Unchecked)
            .unwrap();
        assert_eq!(value.unscaled(), i64::MIN);
    }

    #[test]
    fn test_assign_operators() {
        let mut value = MutableDecimal::<2>::from_unscaled(250);
        value += Decimal2f::ONE;
        value -= Decimal2f::from_unscaled(50);
        value *= Decimal2f::from_unscaled(200);
        value /= Decimal2f::from_unscaled(300);
        assert_eq!(value.to_immutable(), Decimal2f::from_unscaled(200));
    }

    #[test]
    #[should_panic(expected = "attempt to add with overflow")]
    fn test_add_assign_panics() {
        let mut value = MutableDecimal::<2>::from_unscaled(i64::MAX);
        value += Decimal2f::ULP;
    }

    #[test]
    fn test_conversions() {
        let immutable = Decimal2f::from_unscaled(42);
        let mutable = MutableDecimal::from(immutable);
        assert_eq!(Decimal2f::from(&mutable), immutable);
        assert_eq!(Decimal2f::from(mutable.clone()), immutable);
        assert_eq!(std::format!("{:?}", mutable), "MutableDecimal<2>(0.42)");
    }
}
