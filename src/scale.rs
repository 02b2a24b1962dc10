use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::DecimalError;

/// Largest supported scale: `10^18` is the largest power of ten below `i64::MAX`.
pub const MAX_SCALE: u8 = 18;

const LOW_MASK: i64 = 0xFFFF_FFFF;

/// Constants and scale-factor primitives for one scale.
///
/// There is exactly one instance per scale, in [`SCALE_METRICS`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScaleMetrics {
    scale: u8,
    scale_factor: i64,
    leading_zeros: u32,
    min_integer: i64,
    max_integer: i64,
    factor_hi: u64,
    factor_lo: u64,
}

/// Canonical metrics for scales `0..=18`, indexed by scale.
pub static SCALE_METRICS: [ScaleMetrics; 19] = METRICS_TABLE;

pub(crate) const METRICS_TABLE: [ScaleMetrics; 19] = {
    let mut table = [ScaleMetrics::build(0); 19];
    let mut scale = 1;
    while scale <= MAX_SCALE {
        table[scale as usize] = ScaleMetrics::build(scale);
        scale += 1;
    }
    table
};

impl ScaleMetrics {
    const fn build(scale: u8) -> Self {
        let scale_factor = 10i64.pow(scale as u32);
        Self {
            scale,
            scale_factor,
            leading_zeros: scale_factor.leading_zeros(),
            min_integer: i64::MIN / scale_factor,
            max_integer: i64::MAX / scale_factor,
            factor_hi: (scale_factor >> 32) as u64,
            factor_lo: (scale_factor & LOW_MASK) as u64,
        }
    }

    /// Returns the canonical metrics for `scale`.
    pub fn of(scale: u32) -> crate::Result<&'static ScaleMetrics> {
        if scale > MAX_SCALE as u32 {
            tracing::trace!(scale, "rejected scale outside 0..=18");
            return Err(DecimalError::InvalidScale);
        }
        Ok(&SCALE_METRICS[scale as usize])
    }

    /// Const lookup by value; panics (a compile error in const context) if
    /// `scale > 18`.
    #[inline(always)]
    pub(crate) const fn get(scale: u8) -> ScaleMetrics {
        assert!(scale <= MAX_SCALE, "scale must be in 0..=18");
        METRICS_TABLE[scale as usize]
    }

    #[inline(always)]
    pub const fn scale(&self) -> u8 {
        self.scale
    }

    /// `10^scale`
    #[inline(always)]
    pub const fn scale_factor(&self) -> i64 {
        self.scale_factor
    }

    pub fn scale_factor_as_big_int(&self) -> BigInt {
        BigInt::from(self.scale_factor)
    }

    pub fn scale_factor_as_big_decimal(&self) -> BigDecimal {
        BigDecimal::new(self.scale_factor_as_big_int(), 0)
    }

    /// `i64::MIN / 10^scale`, truncated toward zero.
    #[inline(always)]
    pub const fn min_integer_value(&self) -> i64 {
        self.min_integer
    }

    /// `i64::MAX / 10^scale`, truncated toward zero.
    #[inline(always)]
    pub const fn max_integer_value(&self) -> i64 {
        self.max_integer
    }

    /// Leading zero bits of the scale factor.
    #[inline(always)]
    pub const fn scale_factor_leading_zeros(&self) -> u32 {
        self.leading_zeros
    }

    /// Whether the whole number `value` can be represented at this scale.
    #[inline(always)]
    pub const fn is_valid_integer_value(&self, value: i64) -> bool {
        self.min_integer <= value && value <= self.max_integer
    }

    /// `value * 10^scale`, wrapping on overflow.
    #[inline(always)]
    pub const fn multiply_by_scale_factor(&self, value: i64) -> i64 {
        value.wrapping_mul(self.scale_factor)
    }

    /// `value * 10^scale`, or `None` on overflow.
    #[inline(always)]
    pub const fn multiply_by_scale_factor_checked(&self, value: i64) -> Option<i64> {
        if self.is_valid_integer_value(value) {
            Some(value * self.scale_factor)
        } else {
            None
        }
    }

    /// Full-width `value * 10^scale` for an unsigned magnitude.
    ///
    /// Assembled from the mulhi/mullo partial products of both 32-bit halves
    /// of `value`, so the result is exact for every `u64`.
    #[inline]
    pub const fn multiply_by_scale_factor_wide(&self, value: u64) -> u128 {
        // Fast path: the product provably fits 64 bits.
        if value.leading_zeros() + self.leading_zeros >= 65 {
            return (value * self.scale_factor as u64) as u128;
        }
        let hi = (value >> 32) as u32;
        let lo = value as u32;

        let upper = ((self.mulhi_by_scale_factor(hi) as u128) << 32)
            + self.mullo_by_scale_factor(hi) as u128;
        let lower = ((self.mulhi_by_scale_factor(lo) as u128) << 32)
            + self.mullo_by_scale_factor(lo) as u128;

        (upper << 32) + lower
    }

    /// `value / 10^scale`, truncated toward zero.
    #[inline(always)]
    pub const fn divide_by_scale_factor(&self, value: i64) -> i64 {
        value / self.scale_factor
    }

    /// `value % 10^scale`, with the sign of `value`.
    #[inline(always)]
    pub const fn modulo_by_scale_factor(&self, value: i64) -> i64 {
        value % self.scale_factor
    }

    /// Divides the bit pattern of `value` read as `u64`.
    #[inline(always)]
    pub const fn divide_unsigned_by_scale_factor(&self, value: i64) -> i64 {
        ((value as u64) / self.scale_factor as u64) as i64
    }

    /// Remainder of the bit pattern of `value` read as `u64`.
    #[inline(always)]
    pub const fn modulo_unsigned_by_scale_factor(&self, value: i64) -> i64 {
        ((value as u64) % self.scale_factor as u64) as i64
    }

    /// `value * (10^scale >> 32)`: the partial product against the high
    /// word of the scale factor.
    #[inline(always)]
    pub const fn mulhi_by_scale_factor(&self, value: u32) -> u64 {
        value as u64 * self.factor_hi
    }

    /// `value * (10^scale & 0xFFFF_FFFF)`: the partial product against the
    /// low word of the scale factor.
    #[inline(always)]
    pub const fn mullo_by_scale_factor(&self, value: u32) -> u64 {
        value as u64 * self.factor_lo
    }
}
