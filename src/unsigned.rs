//! Double-width unsigned primitives.
//!
//! Products of two unscaled values, or of an unscaled value and a scale factor,
//! can need up to 127 bits. These helpers build such products from 32-bit
//! halves and narrow double-width magnitudes back to `i64`.

const LOW_MASK: u64 = 0xFFFF_FFFF;

/// Powers of ten that fit in a `u128` (`10^0` through `10^38`).
const POW10_U128: [u128; 39] = {
    let mut table = [1u128; 39];
    let mut i = 1;
    while i < 39 {
        table[i] = table[i - 1] * 10;
        i += 1;
    }
    table
};

/// Full 128-bit product of two `u64`, returned as `(high, low)` words.
///
/// Computed from four 32×32-bit partial products so no intermediate can
/// overflow 64 bits.
#[inline]
pub const fn multiply_hi_lo(a: u64, b: u64) -> (u64, u64) {
    let a_lo = a & LOW_MASK;
    let a_hi = a >> 32;
    let b_lo = b & LOW_MASK;
    let b_hi = b >> 32;

    let lo_lo = a_lo * b_lo;
    let hi_lo = a_hi * b_lo;
    let lo_hi = a_lo * b_hi;
    let hi_hi = a_hi * b_hi;

    // Middle column: at most three 32-bit quantities, cannot overflow.
    let cross = (lo_lo >> 32) + (hi_lo & LOW_MASK) + lo_hi;
    let high = hi_hi + (hi_lo >> 32) + (cross >> 32);
    let low = (cross << 32) | (lo_lo & LOW_MASK);

    (high, low)
}

/// Joins `(high, low)` words into one `u128`.
#[inline(always)]
pub const fn join(high: u64, low: u64) -> u128 {
    ((high as u128) << 64) | low as u128
}

/// Splits a `u128` into `(high, low)` words.
#[inline(always)]
pub const fn split(value: u128) -> (u64, u64) {
    ((value >> 64) as u64, value as u64)
}

/// Divides the 128-bit value `(high, low)` by `divisor`.
///
/// Returns the quotient and remainder. The divisor must be non-zero.
#[inline]
pub const fn divide_wide(high: u64, low: u64, divisor: u64) -> (u128, u64) {
    let dividend = join(high, low);
    let divisor = divisor as u128;
    (dividend / divisor, (dividend % divisor) as u64)
}

/// `10^exponent` as `u128`, or `None` above `10^38`.
#[inline]
pub const fn pow10_u128(exponent: u32) -> Option<u128> {
    if exponent < POW10_U128.len() as u32 {
        Some(POW10_U128[exponent as usize])
    } else {
        None
    }
}

/// Applies a sign to an unsigned magnitude if the result fits `i64`.
///
/// Negative magnitudes may reach `2^63` (that is `i64::MIN`), positive ones
/// stop at `i64::MAX`.
#[inline]
pub const fn magnitude_to_i64(negative: bool, magnitude: u128) -> Option<i64> {
    if negative {
        if magnitude <= 1u128 << 63 {
            Some((magnitude as u64).wrapping_neg() as i64)
        } else {
            None
        }
    } else if magnitude <= i64::MAX as u128 {
        Some(magnitude as i64)
    } else {
        None
    }
}

/// Applies a sign to an unsigned magnitude, keeping the low 64 bits of the
/// two's complement result.
#[inline]
pub const fn magnitude_to_i64_wrapping(negative: bool, magnitude: u128) -> i64 {
    let low = magnitude as u64;
    if negative {
        low.wrapping_neg() as i64
    } else {
        low as i64
    }
}
