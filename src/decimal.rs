use core::fmt;
use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign};
use core::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::arithmetic::{DecimalArithmetic, OverflowMode};
use crate::format::write_unscaled;
use crate::ops::{DecimalOps, UnscaledValue};
use crate::rounding::RoundingMode;
use crate::scale::{ScaleMetrics, MAX_SCALE, SCALE_METRICS};
use crate::{DecimalError, MutableDecimal};

/// Immutable fixed-point decimal: an `i64` unscaled value with `S`
/// fractional digits.
///
/// The value is `unscaled / 10^S`. `S` must be in `0..=18`; larger scales fail
/// to compile as soon as an operation is used.
///
/// Operators (`+ - * / % -x`) round `HalfUp` and panic on overflow or
/// division by zero. The [`DecimalOps`] methods take explicit rounding and
/// overflow modes and return a `Result`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Decimal<const S: u8> {
    unscaled: i64,
}

pub type Decimal0f = Decimal<0>;
pub type Decimal1f = Decimal<1>;
pub type Decimal2f = Decimal<2>;
pub type Decimal3f = Decimal<3>;
pub type Decimal4f = Decimal<4>;
pub type Decimal5f = Decimal<5>;
pub type Decimal6f = Decimal<6>;
pub type Decimal7f = Decimal<7>;
pub type Decimal8f = Decimal<8>;
pub type Decimal9f = Decimal<9>;
pub type Decimal10f = Decimal<10>;
pub type Decimal11f = Decimal<11>;
pub type Decimal12f = Decimal<12>;
pub type Decimal13f = Decimal<13>;
pub type Decimal14f = Decimal<14>;
pub type Decimal15f = Decimal<15>;
pub type Decimal16f = Decimal<16>;
pub type Decimal17f = Decimal<17>;
pub type Decimal18f = Decimal<18>;

// ============================================================================
// Constants
// ============================================================================

impl<const S: u8> Decimal<S> {
    /// Arithmetic behind the operators: `HalfUp`, checked.
    const OPERATORS: DecimalArithmetic =
        DecimalArithmetic::new(S, RoundingMode::HalfUp, OverflowMode::Checked);

    /// Number of fractional digits.
    pub const SCALE: u8 = S;

    /// `10^S`
    pub const SCALE_FACTOR: i64 = Self::OPERATORS.one();

    pub const ZERO: Self = Self::from_unscaled(0);

    pub const ONE: Self = Self::from_unscaled(Self::SCALE_FACTOR);

    /// Unit in the last place: `10^-S`.
    pub const ULP: Self = Self::from_unscaled(1);

    pub const MIN: Self = Self::from_unscaled(i64::MIN);

    pub const MAX: Self = Self::from_unscaled(i64::MAX);

    /// Evaluated by every constructor; fails the build for `S > 18`.
    const VALID_SCALE: () = assert!(S <= MAX_SCALE, "scale must be in 0..=18");
}

impl<const S: u8> Default for Decimal<S> {
    #[inline(always)]
    fn default() -> Self {
        Self::ZERO
    }
}

// ============================================================================
// Construction and Accessors
// ============================================================================

impl<const S: u8> Decimal<S> {
    /// # Examples
    ///
    /// Scales above 18 are rejected at compile time:
    ///
    /// ```compile_fail
    /// let _ = scaledec::Decimal::<19>::from_unscaled(5);
    /// ```
    #[inline(always)]
    pub const fn from_unscaled(unscaled: i64) -> Self {
        let () = Self::VALID_SCALE;
        Self { unscaled }
    }

    #[inline(always)]
    pub const fn unscaled(self) -> i64 {
        self.unscaled
    }

    #[inline(always)]
    pub const fn scale(self) -> u8 {
        S
    }

    pub fn metrics() -> &'static ScaleMetrics {
        &SCALE_METRICS[Self::OPERATORS.scale() as usize]
    }

    /// The arithmetic for this scale with the given modes.
    #[inline(always)]
    pub const fn arithmetic(rounding: RoundingMode, overflow: OverflowMode) -> DecimalArithmetic {
        Self::OPERATORS.with_rounding(rounding).with_overflow(overflow)
    }

    /// A mutable copy of this value.
    #[inline(always)]
    pub const fn to_mutable(self) -> MutableDecimal<S> {
        MutableDecimal::from_unscaled(self.unscaled)
    }
}

// ============================================================================
// Arithmetic Operations - Checked and Wrapping
// ============================================================================

impl<const S: u8> Decimal<S> {
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.unscaled.checked_add(rhs.unscaled) {
            Some(unscaled) => Some(Self { unscaled }),
            None => None,
        }
    }

    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn wrapping_add(self, rhs: Self) -> Self {
        Self {
            unscaled: self.unscaled.wrapping_add(rhs.unscaled),
        }
    }

    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn checked_sub(self, rhs: Self) -> Option<Self> {
        match self.unscaled.checked_sub(rhs.unscaled) {
            Some(unscaled) => Some(Self { unscaled }),
            None => None,
        }
    }

    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn wrapping_sub(self, rhs: Self) -> Self {
        Self {
            unscaled: self.unscaled.wrapping_sub(rhs.unscaled),
        }
    }

    /// Checked multiplication, rounding `HalfUp`. Returns `None` on overflow.
    #[inline]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        Self::OPERATORS
            .multiply(self.unscaled, rhs.unscaled)
            .ok()
            .map(Self::from_unscaled)
    }

    /// Multiplication rounding `HalfUp`, keeping the low 64 bits of the
    /// rounded result.
    #[inline]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn wrapping_mul(self, rhs: Self) -> Self {
        let unchecked = Self::OPERATORS.with_overflow(OverflowMode::Unchecked);
        // HalfUp never reports RoundingRequired.
        Self::from_unscaled(unchecked.multiply(self.unscaled, rhs.unscaled).unwrap_or_default())
    }

    /// Checked division, rounding `HalfUp`. Returns `None` on overflow or
    /// division by zero.
    #[inline]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        Self::OPERATORS
            .divide(self.unscaled, rhs.unscaled)
            .ok()
            .map(Self::from_unscaled)
    }

    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn checked_rem(self, rhs: Self) -> Option<Self> {
        if rhs.unscaled == 0 {
            None
        } else {
            Some(Self {
                unscaled: self.unscaled.wrapping_rem(rhs.unscaled),
            })
        }
    }

    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn checked_neg(self) -> Option<Self> {
        match self.unscaled.checked_neg() {
            Some(unscaled) => Some(Self { unscaled }),
            None => None,
        }
    }

    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn wrapping_neg(self) -> Self {
        Self {
            unscaled: self.unscaled.wrapping_neg(),
        }
    }

    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn checked_abs(self) -> Option<Self> {
        match self.unscaled.checked_abs() {
            Some(unscaled) => Some(Self { unscaled }),
            None => None,
        }
    }

    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn wrapping_abs(self) -> Self {
        Self {
            unscaled: self.unscaled.wrapping_abs(),
        }
    }

    /// Mean of `self` and `other`, rounding `HalfUp`; never overflows.
    #[inline]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn average(self, other: Self) -> Self {
        Self::from_unscaled(
            Self::OPERATORS
                .average(self.unscaled, other.unscaled)
                .unwrap_or_default(),
        )
    }
}

// ============================================================================
// Sign and Parts
// ============================================================================

impl<const S: u8> Decimal<S> {
    #[inline(always)]
    pub const fn is_zero(self) -> bool {
        self.unscaled == 0
    }

    #[inline(always)]
    pub const fn is_positive(self) -> bool {
        self.unscaled > 0
    }

    #[inline(always)]
    pub const fn is_negative(self) -> bool {
        self.unscaled < 0
    }

    #[inline(always)]
    pub const fn signum(self) -> i32 {
        self.unscaled.signum() as i32
    }

    #[inline(always)]
    pub const fn is_one(self) -> bool {
        self.unscaled == Self::SCALE_FACTOR
    }

    #[inline(always)]
    pub const fn is_integral(self) -> bool {
        Self::OPERATORS.is_integral(self.unscaled)
    }

    /// Integer part, truncated toward zero.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn trunc(self) -> Self {
        Self {
            unscaled: Self::OPERATORS.integral_part(self.unscaled),
        }
    }

    /// Fractional part, with the sign of `self`.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn fract(self) -> Self {
        Self {
            unscaled: Self::OPERATORS.fractional_part(self.unscaled),
        }
    }
}

// ============================================================================
// Integer and Float Conversions
// ============================================================================

impl<const S: u8> Decimal<S> {
    /// The whole number `value`; fails with `Overflow` when out of range.
    #[inline]
    pub const fn from_i64(value: i64) -> crate::Result<Self> {
        match Self::OPERATORS.from_long(value) {
            Ok(unscaled) => Ok(Self { unscaled }),
            Err(e) => Err(e),
        }
    }

    /// The nearest whole number, ties rounded `HalfUp`.
    #[inline]
    pub fn to_i64(self) -> i64 {
        // Only Unnecessary can fail, and the rounded value always fits.
        Self::OPERATORS.to_long(self.unscaled).unwrap_or_default()
    }

    /// Integer part, truncated toward zero.
    #[inline(always)]
    pub const fn trunc_to_i64(self) -> i64 {
        Self::OPERATORS.metrics().divide_by_scale_factor(self.unscaled)
    }

    pub fn to_i64_with(self, rounding: RoundingMode) -> crate::Result<i64> {
        Self::OPERATORS.with_rounding(rounding).to_long(self.unscaled)
    }

    /// The exact value of `value` rounded `HalfUp`.
    pub fn from_f64(value: f64) -> crate::Result<Self> {
        Self::from_f64_with(value, RoundingMode::HalfUp)
    }

    pub fn from_f64_with(value: f64, rounding: RoundingMode) -> crate::Result<Self> {
        Self::OPERATORS
            .with_rounding(rounding)
            .from_f64(value)
            .map(Self::from_unscaled)
    }

    pub fn from_f32(value: f32) -> crate::Result<Self> {
        Self::from_f32_with(value, RoundingMode::HalfUp)
    }

    pub fn from_f32_with(value: f32, rounding: RoundingMode) -> crate::Result<Self> {
        Self::OPERATORS
            .with_rounding(rounding)
            .from_f32(value)
            .map(Self::from_unscaled)
    }

    /// The nearest `f64`, ties rounded `HalfUp`.
    pub fn to_f64(self) -> f64 {
        // Only Unnecessary can fail.
        Self::OPERATORS.to_f64(self.unscaled).unwrap_or_default()
    }

    pub fn to_f64_with(self, rounding: RoundingMode) -> crate::Result<f64> {
        Self::OPERATORS.with_rounding(rounding).to_f64(self.unscaled)
    }

    pub fn to_f32(self) -> f32 {
        Self::OPERATORS.to_f32(self.unscaled).unwrap_or_default()
    }

    pub fn to_f32_with(self, rounding: RoundingMode) -> crate::Result<f32> {
        Self::OPERATORS.with_rounding(rounding).to_f32(self.unscaled)
    }

    /// Converts to another scale, rounding when `T < S`.
    pub fn rescale<const T: u8>(self, rounding: RoundingMode) -> crate::Result<Decimal<T>> {
        Decimal::<T>::arithmetic(rounding, OverflowMode::Checked)
            .from_unscaled(self.unscaled, S as i32)
            .map(Decimal::from_unscaled)
    }
}

// ============================================================================
// Arbitrary Precision Conversions
// ============================================================================

impl<const S: u8> Decimal<S> {
    pub fn from_big_int(value: &BigInt) -> crate::Result<Self> {
        Self::OPERATORS.from_big_int(value).map(Self::from_unscaled)
    }

    pub fn to_big_int(self, rounding: RoundingMode) -> crate::Result<BigInt> {
        Self::OPERATORS.with_rounding(rounding).to_big_int(self.unscaled)
    }

    pub fn from_big_decimal(value: &BigDecimal, rounding: RoundingMode) -> crate::Result<Self> {
        Self::OPERATORS
            .with_rounding(rounding)
            .from_big_decimal(value)
            .map(Self::from_unscaled)
    }

    /// Exact `BigDecimal` with scale `S`.
    pub fn to_big_decimal(self) -> BigDecimal {
        Self::OPERATORS.to_big_decimal(self.unscaled)
    }
}

// ============================================================================
// String Conversions
// ============================================================================

impl<const S: u8> Decimal<S> {
    /// Parses plain decimal text, rounding surplus fraction digits.
    pub fn from_str_with(text: &str, rounding: RoundingMode) -> crate::Result<Self> {
        Self::OPERATORS
            .with_rounding(rounding)
            .parse(text)
            .map(Self::from_unscaled)
    }
}

impl<const S: u8> FromStr for Decimal<S> {
    type Err = DecimalError;

    #[inline]
    fn from_str(text: &str) -> crate::Result<Self> {
        Self::from_str_with(text, RoundingMode::HalfUp)
    }
}

impl<const S: u8> fmt::Display for Decimal<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_unscaled(f, self.unscaled, S)
    }
}

impl<const S: u8> fmt::Debug for Decimal<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.debug_struct("Decimal")
                .field("unscaled", &self.unscaled)
                .field("scale", &S)
                .finish()
        } else {
            write!(f, "Decimal<{}>({})", S, self)
        }
    }
}

// ============================================================================
// DecimalOps
// ============================================================================

impl<const S: u8> UnscaledValue<S> for Decimal<S> {
    #[inline(always)]
    fn unscaled_value(&self) -> i64 {
        self.unscaled
    }
}

impl<const S: u8> DecimalOps<S> for Decimal<S> {
    type Output = Self;

    #[inline(always)]
    fn with_unscaled(self, unscaled: i64) -> Self {
        Self::from_unscaled(unscaled)
    }
}

// ============================================================================
// Operator Overloading
// ============================================================================

impl<const S: u8> Add for Decimal<S> {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs).expect("attempt to add with overflow")
    }
}

impl<const S: u8> Sub for Decimal<S> {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs)
            .expect("attempt to subtract with overflow")
    }
}

impl<const S: u8> Mul for Decimal<S> {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        self.checked_mul(rhs)
            .expect("attempt to multiply with overflow")
    }
}

impl<const S: u8> Div for Decimal<S> {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self::Output {
        self.checked_div(rhs)
            .expect("attempt to divide by zero or overflow")
    }
}

impl<const S: u8> Rem for Decimal<S> {
    type Output = Self;

    #[inline(always)]
    fn rem(self, rhs: Self) -> Self::Output {
        self.checked_rem(rhs)
            .expect("attempt to calculate the remainder with a divisor of zero")
    }
}

impl<const S: u8> Neg for Decimal<S> {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self::Output {
        self.checked_neg().expect("attempt to negate with overflow")
    }
}

impl<const S: u8> AddAssign for Decimal<S> {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<const S: u8> SubAssign for Decimal<S> {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<const S: u8> MulAssign for Decimal<S> {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<const S: u8> DivAssign for Decimal<S> {
    #[inline(always)]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl<const S: u8> RemAssign for Decimal<S> {
    #[inline(always)]
    fn rem_assign(&mut self, rhs: Self) {
        *self = *self % rhs;
    }
}

// ============================================================================
// Standard Library Trait Implementations
// ============================================================================

impl<const S: u8> TryFrom<i64> for Decimal<S> {
    type Error = DecimalError;

    #[inline(always)]
    fn try_from(value: i64) -> crate::Result<Self> {
        Self::from_i64(value)
    }
}

impl<const S: u8> TryFrom<f64> for Decimal<S> {
    type Error = DecimalError;

    #[inline(always)]
    fn try_from(value: f64) -> crate::Result<Self> {
        Self::from_f64(value)
    }
}

impl<const S: u8> TryFrom<f32> for Decimal<S> {
    type Error = DecimalError;

    #[inline(always)]
    fn try_from(value: f32) -> crate::Result<Self> {
        Self::from_f32(value)
    }
}

impl<const S: u8> Sum for Decimal<S> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl<'a, const S: u8> Sum<&'a Decimal<S>> for Decimal<S> {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + *x)
    }
}

impl<const S: u8> Product for Decimal<S> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x)
    }
}

impl<'a, const S: u8> Product<&'a Decimal<S>> for Decimal<S> {
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * *x)
    }
}

// ============================================================================
// Serde Support
// ============================================================================

#[cfg(feature = "serde")]
impl<const S: u8> Serialize for Decimal<S> {
    fn serialize<Z>(&self, serializer: Z) -> core::result::Result<Z::Ok, Z::Error>
    where
        Z: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            self.unscaled.serialize(serializer)
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, const S: u8> Deserialize<'de> for Decimal<S> {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let text = alloc::string::String::deserialize(deserializer)?;
            Self::from_str(&text).map_err(de::Error::custom)
        } else {
            let unscaled = i64::deserialize(deserializer)?;
            Ok(Self::from_unscaled(unscaled))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::string::ToString;

    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(Decimal2f::ZERO.unscaled(), 0);
        assert_eq!(Decimal2f::ONE.unscaled(), 100);
        assert_eq!(Decimal2f::ULP.unscaled(), 1);
        assert_eq!(Decimal18f::ONE.unscaled(), 1_000_000_000_000_000_000);
        assert_eq!(Decimal0f::ONE.unscaled(), 1);
        assert_eq!(Decimal6f::SCALE, 6);
        assert_eq!(Decimal6f::SCALE_FACTOR, 1_000_000);
        assert_eq!(Decimal6f::ONE.scale(), 6);
        assert_eq!(Decimal6f::metrics().scale_factor(), 1_000_000);
        assert_eq!(Decimal2f::default(), Decimal2f::ZERO);
    }

    #[test]
    fn test_largest_scale_constructs() {
        let value = Decimal::<18>::from_unscaled(5);
        assert_eq!(std::format!("{}", value), "0.000000000000000005");
        assert_eq!(Decimal::<18>::default(), Decimal18f::ZERO);
        assert_eq!(
            MutableDecimal::<18>::default().to_immutable(),
            Decimal18f::ZERO
        );
    }

    #[test]
    fn test_checked_and_wrapping() {
        let a = Decimal2f::from_unscaled(250);
        let b = Decimal2f::from_unscaled(150);
        assert_eq!(a.checked_add(b), Some(Decimal2f::from_unscaled(400)));
        assert_eq!(a.checked_sub(b), Some(Decimal2f::from_unscaled(100)));
        assert_eq!(a.checked_mul(b), Some(Decimal2f::from_unscaled(375)));
        assert_eq!(a.checked_div(b), Some(Decimal2f::from_unscaled(167)));
        assert_eq!(a.checked_rem(b), Some(Decimal2f::from_unscaled(100)));
        assert_eq!(a.checked_div(Decimal2f::ZERO), None);
        assert_eq!(a.checked_rem(Decimal2f::ZERO), None);
        assert_eq!(Decimal2f::MAX.checked_add(Decimal2f::ULP), None);
        assert_eq!(Decimal2f::MIN.checked_sub(Decimal2f::ULP), None);
        assert_eq!(Decimal2f::MIN.checked_neg(), None);
        assert_eq!(Decimal2f::MIN.checked_abs(), None);
        assert_eq!(Decimal2f::MAX.wrapping_add(Decimal2f::ULP), Decimal2f::MIN);
        assert_eq!(Decimal2f::MIN.wrapping_sub(Decimal2f::ULP), Decimal2f::MAX);
        assert_eq!(Decimal2f::MIN.wrapping_neg(), Decimal2f::MIN);
        assert_eq!(Decimal2f::MIN.wrapping_abs(), Decimal2f::MIN);
    }

    #[test]
    fn test_wrapping_mul_scale_18() {
        let nine = Decimal18f::from_i64(9).unwrap();
        assert_eq!(nine.checked_mul(nine), None);
        assert_eq!(
            nine.wrapping_mul(nine).unscaled(),
            7_213_023_705_161_793_536
        );
    }

    #[test]
    fn test_average() {
        let a = Decimal2f::from_unscaled(250);
        let b = Decimal2f::from_unscaled(150);
        assert_eq!(a.average(b), Decimal2f::from_unscaled(200));
        assert_eq!(
            Decimal2f::MAX.average(Decimal2f::MAX),
            Decimal2f::MAX
        );
    }

    #[test]
    fn test_sign_and_parts() {
        let value = Decimal2f::from_unscaled(-375);
        assert!(value.is_negative());
        assert!(!value.is_positive());
        assert!(!value.is_zero());
        assert_eq!(value.signum(), -1);
        assert_eq!(value.trunc(), Decimal2f::from_unscaled(-300));
        assert_eq!(value.fract(), Decimal2f::from_unscaled(-75));
        assert!(!value.is_integral());
        assert!(value.trunc().is_integral());
        assert!(Decimal2f::ONE.is_one());
    }

    #[test]
    fn test_ordering() {
        let small = Decimal2f::from_unscaled(-1);
        let large = Decimal2f::from_unscaled(1);
        assert!(small < large);
        assert_eq!(small.max(large), large);
        assert_eq!(small.min(large), small);
        assert_eq!(
            Decimal2f::from_unscaled(500).clamp(small, large),
            large
        );
    }

    #[test]
    fn test_integer_conversions() {
        assert_eq!(Decimal2f::from_i64(42).unwrap().unscaled(), 4200);
        assert_eq!(Decimal2f::from_i64(i64::MAX), Err(DecimalError::Overflow));
        assert_eq!(
            Decimal18f::from_i64(10),
            Err(DecimalError::Overflow)
        );
        assert_eq!(Decimal18f::from_i64(-9).unwrap().unscaled(), -9_000_000_000_000_000_000);
        assert_eq!(Decimal2f::from_unscaled(-375).to_i64(), -4);
        assert_eq!(Decimal2f::from_unscaled(-350).to_i64(), -4);
        assert_eq!(Decimal2f::from_unscaled(349).to_i64(), 3);
        assert_eq!(Decimal18f::MIN.to_i64(), -9);
        assert_eq!(Decimal2f::from_unscaled(-375).trunc_to_i64(), -3);
        assert_eq!(Decimal2f::from_unscaled(399).trunc_to_i64(), 3);
        assert_eq!(
            Decimal2f::from_unscaled(-375).to_i64_with(RoundingMode::HalfUp),
            Ok(-4)
        );
        assert_eq!(Decimal2f::try_from(7i64).unwrap().unscaled(), 700);
    }

    #[test]
    fn test_float_conversions() {
        assert_eq!(Decimal2f::from_f64(1.005).unwrap().unscaled(), 100);
        assert_eq!(Decimal2f::from_f64(1.125).unwrap().unscaled(), 113);
        assert_eq!(
            Decimal2f::from_f64_with(1.125, RoundingMode::HalfEven)
                .unwrap()
                .unscaled(),
            112
        );
        assert_eq!(Decimal2f::from_f64(f64::NAN), Err(DecimalError::NonFinite));
        assert_eq!(Decimal2f::from_f32(0.5).unwrap().unscaled(), 50);
        assert_eq!(Decimal2f::try_from(2.5f32).unwrap().unscaled(), 250);
        assert_eq!(Decimal2f::try_from(2.5f64).unwrap().unscaled(), 250);
        assert_eq!(Decimal2f::from_unscaled(10).to_f64(), 0.1);
        assert_eq!(Decimal2f::from_unscaled(10).to_f32(), 0.1f32);
        assert_eq!(
            Decimal2f::from_unscaled(10).to_f64_with(RoundingMode::Unnecessary),
            Err(DecimalError::RoundingRequired)
        );
        assert_eq!(
            Decimal2f::from_unscaled(25).to_f32_with(RoundingMode::Unnecessary),
            Ok(0.25)
        );
    }

    #[test]
    fn test_rescale() {
        let value = Decimal4f::from_unscaled(1_2345);
        assert_eq!(
            value.rescale::<2>(RoundingMode::HalfUp),
            Ok(Decimal2f::from_unscaled(123))
        );
        assert_eq!(
            value.rescale::<6>(RoundingMode::Unnecessary),
            Ok(Decimal6f::from_unscaled(1_234_500))
        );
        assert_eq!(
            value.rescale::<2>(RoundingMode::Unnecessary),
            Err(DecimalError::RoundingRequired)
        );
        assert_eq!(
            Decimal0f::MAX.rescale::<1>(RoundingMode::HalfUp),
            Err(DecimalError::Overflow)
        );
    }

    #[test]
    fn test_big_conversions() {
        let value = Decimal2f::from_unscaled(-250);
        assert_eq!(value.to_big_int(RoundingMode::HalfEven), Ok(BigInt::from(-2)));
        assert_eq!(value.to_big_decimal(), BigDecimal::new(BigInt::from(-250), 2));
        assert_eq!(
            Decimal2f::from_big_int(&BigInt::from(12)),
            Ok(Decimal2f::from_unscaled(1200))
        );
        assert_eq!(
            Decimal2f::from_big_decimal(
                &BigDecimal::new(BigInt::from(-2505), 3),
                RoundingMode::HalfEven
            ),
            Ok(Decimal2f::from_unscaled(-250))
        );
    }

    #[test]
    fn test_to_mutable() {
        let value = Decimal2f::from_unscaled(125);
        assert_eq!(value.to_mutable().to_immutable(), value);
    }

    #[test]
    fn test_display() {
        assert_eq!(Decimal2f::from_unscaled(150).to_string(), "1.50");
        assert_eq!(Decimal2f::from_unscaled(-1).to_string(), "-0.01");
        assert_eq!(Decimal0f::from_unscaled(-7).to_string(), "-7");
        assert_eq!(Decimal18f::MAX.to_string(), "9.223372036854775807");
    }

    #[test]
    fn test_debug() {
        let value = Decimal2f::from_unscaled(150);
        assert_eq!(std::format!("{:?}", value), "Decimal<2>(1.50)");
        assert!(std::format!("{:#?}", value).contains("unscaled: 150"));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("1.5".parse::<Decimal2f>(), Ok(Decimal2f::from_unscaled(150)));
        assert_eq!("1.005".parse::<Decimal2f>(), Ok(Decimal2f::from_unscaled(101)));
        assert_eq!(
            Decimal2f::from_str_with("1.005", RoundingMode::Down),
            Ok(Decimal2f::from_unscaled(100))
        );
        assert_eq!("x".parse::<Decimal2f>(), Err(DecimalError::InvalidFormat));
    }

    #[test]
    fn test_iterators() {
        let values = [
            Decimal2f::from_unscaled(150),
            Decimal2f::from_unscaled(250),
            Decimal2f::from_unscaled(200),
        ];
        assert_eq!(values.iter().sum::<Decimal2f>(), Decimal2f::from_unscaled(600));
        assert_eq!(
            values.into_iter().sum::<Decimal2f>(),
            Decimal2f::from_unscaled(600)
        );
        assert_eq!(
            values.iter().product::<Decimal2f>(),
            Decimal2f::from_unscaled(750)
        );
    }
}
