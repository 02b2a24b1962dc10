use core::cmp::Ordering;

use num_bigint::BigUint;

use crate::DecimalError;

/// How a discarded remainder is resolved when a result is narrowed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum RoundingMode {
    /// Away from zero.
    Up,
    /// Toward zero (truncation).
    Down,
    /// Toward positive infinity.
    Ceiling,
    /// Toward negative infinity.
    Floor,
    /// To nearest; ties away from zero.
    #[default]
    HalfUp,
    /// To nearest; ties toward zero.
    HalfDown,
    /// To nearest; ties to the even neighbour.
    HalfEven,
    /// Exact result required; any discarded remainder is an error.
    Unnecessary,
}

/// Classification of a discarded remainder relative to half of one unit in
/// the last kept place.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TruncatedPart {
    Zero,
    LessThanHalf,
    EqualToHalf,
    GreaterThanHalf,
}

impl TruncatedPart {
    /// Classifies `remainder` (magnitude) against `divisor`.
    #[inline]
    pub const fn from_remainder(remainder: u64, divisor: u64) -> Self {
        Self::from_remainder_wide(remainder as u128, divisor as u128)
    }

    /// Classifies `remainder` against `divisor`; both below `2^127`.
    #[inline]
    pub const fn from_remainder_wide(remainder: u128, divisor: u128) -> Self {
        if remainder == 0 {
            return TruncatedPart::Zero;
        }
        let doubled = remainder << 1;
        if doubled < divisor {
            TruncatedPart::LessThanHalf
        } else if doubled == divisor {
            TruncatedPart::EqualToHalf
        } else {
            TruncatedPart::GreaterThanHalf
        }
    }

    pub fn from_remainder_big(remainder: &BigUint, divisor: &BigUint) -> Self {
        if remainder.bits() == 0 {
            return TruncatedPart::Zero;
        }
        let doubled: BigUint = remainder << 1u32;
        Self::from_half_comparison(doubled.cmp(divisor), true)
    }

    /// Classifies from the first discarded decimal digit and whether any
    /// later discarded digit is non-zero.
    #[inline]
    pub const fn from_digits(first_digit: u8, rest_nonzero: bool) -> Self {
        match first_digit {
            0 if !rest_nonzero => TruncatedPart::Zero,
            0..=4 => TruncatedPart::LessThanHalf,
            5 if !rest_nonzero => TruncatedPart::EqualToHalf,
            _ => TruncatedPart::GreaterThanHalf,
        }
    }

    /// Classifies from the comparison of the discarded part with one half.
    #[inline]
    pub const fn from_half_comparison(vs_half: Ordering, nonzero: bool) -> Self {
        if !nonzero {
            return TruncatedPart::Zero;
        }
        match vs_half {
            Ordering::Less => TruncatedPart::LessThanHalf,
            Ordering::Equal => TruncatedPart::EqualToHalf,
            Ordering::Greater => TruncatedPart::GreaterThanHalf,
        }
    }

    /// Marks a part as larger than its computed value by an unknown positive
    /// amount (a truncated intermediate below the last kept place).
    #[inline]
    pub const fn with_sticky(self, sticky: bool) -> Self {
        if !sticky {
            return self;
        }
        match self {
            TruncatedPart::Zero => TruncatedPart::LessThanHalf,
            TruncatedPart::EqualToHalf => TruncatedPart::GreaterThanHalf,
            other => other,
        }
    }

    #[inline(always)]
    pub const fn is_zero(self) -> bool {
        matches!(self, TruncatedPart::Zero)
    }
}

impl RoundingMode {
    /// All modes, `Unnecessary` last.
    pub const ALL: [RoundingMode; 8] = [
        RoundingMode::Up,
        RoundingMode::Down,
        RoundingMode::Ceiling,
        RoundingMode::Floor,
        RoundingMode::HalfUp,
        RoundingMode::HalfDown,
        RoundingMode::HalfEven,
        RoundingMode::Unnecessary,
    ];

    /// Decides whether a truncated (toward zero) magnitude must be bumped by
    /// one unit away from zero.
    ///
    /// `negative` is the sign of the exact result, `truncated_is_odd` the
    /// parity of the truncated quotient.
    ///
    /// # Errors
    /// `RoundingRequired` for `Unnecessary` with a non-zero part.
    #[inline]
    pub const fn rounds_away(
        self,
        negative: bool,
        truncated_is_odd: bool,
        part: TruncatedPart,
    ) -> crate::Result<bool> {
        if part.is_zero() {
            return Ok(false);
        }
        let away = match self {
            RoundingMode::Up => true,
            RoundingMode::Down => false,
            RoundingMode::Ceiling => !negative,
            RoundingMode::Floor => negative,
            RoundingMode::HalfUp => {
                matches!(part, TruncatedPart::EqualToHalf | TruncatedPart::GreaterThanHalf)
            }
            RoundingMode::HalfDown => matches!(part, TruncatedPart::GreaterThanHalf),
            RoundingMode::HalfEven => match part {
                TruncatedPart::GreaterThanHalf => true,
                TruncatedPart::EqualToHalf => truncated_is_odd,
                _ => false,
            },
            RoundingMode::Unnecessary => return Err(DecimalError::RoundingRequired),
        };
        Ok(away)
    }

    /// Signed adjustment (`-1`, `0` or `+1`) to add to a quotient that was
    /// truncated toward zero.
    #[inline]
    pub const fn rounding_increment(
        self,
        negative: bool,
        truncated_quotient: i64,
        part: TruncatedPart,
    ) -> crate::Result<i64> {
        match self.rounds_away(negative, truncated_quotient & 1 != 0, part) {
            Ok(true) if negative => Ok(-1),
            Ok(true) => Ok(1),
            Ok(false) => Ok(0),
            Err(e) => Err(e),
        }
    }

    /// Rounds a truncated magnitude: adds one if [`rounds_away`](Self::rounds_away).
    #[inline]
    pub(crate) const fn round_magnitude(
        self,
        negative: bool,
        truncated: u128,
        part: TruncatedPart,
    ) -> crate::Result<u128> {
        match self.rounds_away(negative, truncated & 1 != 0, part) {
            Ok(true) => Ok(truncated + 1),
            Ok(false) => Ok(truncated),
            Err(e) => Err(e),
        }
    }

    /// The `bigdecimal` counterpart of this mode; `Unnecessary` has none.
    pub const fn to_bigdecimal(self) -> Option<bigdecimal::RoundingMode> {
        use bigdecimal::RoundingMode as Big;
        match self {
            RoundingMode::Up => Some(Big::Up),
            RoundingMode::Down => Some(Big::Down),
            RoundingMode::Ceiling => Some(Big::Ceiling),
            RoundingMode::Floor => Some(Big::Floor),
            RoundingMode::HalfUp => Some(Big::HalfUp),
            RoundingMode::HalfDown => Some(Big::HalfDown),
            RoundingMode::HalfEven => Some(Big::HalfEven),
            RoundingMode::Unnecessary => None,
        }
    }
}

impl From<bigdecimal::RoundingMode> for RoundingMode {
    fn from(mode: bigdecimal::RoundingMode) -> Self {
        use bigdecimal::RoundingMode as Big;
        match mode {
            Big::Up => RoundingMode::Up,
            Big::Down => RoundingMode::Down,
            Big::Ceiling => RoundingMode::Ceiling,
            Big::Floor => RoundingMode::Floor,
            Big::HalfUp => RoundingMode::HalfUp,
            Big::HalfDown => RoundingMode::HalfDown,
            Big::HalfEven => RoundingMode::HalfEven,
        }
    }
}

/// Divides a signed magnitude by `divisor` and rounds the quotient.
///
/// Returns the rounded quotient magnitude; the sign is the caller's. The
/// divisor must be non-zero and below `2^127`.
#[inline]
pub(crate) const fn divide_rounded(
    rounding: RoundingMode,
    negative: bool,
    magnitude: u128,
    divisor: u128,
) -> crate::Result<u128> {
    let quotient = magnitude / divisor;
    let remainder = magnitude % divisor;
    rounding.round_magnitude(
        negative,
        quotient,
        TruncatedPart::from_remainder_wide(remainder, divisor),
    )
}

/// Divides a signed magnitude by `10^exponent` and rounds the quotient.
///
/// Exponents beyond `10^38` leave a zero quotient; any `u128` magnitude is
/// then below half the divisor.
#[inline]
pub(crate) const fn divide_by_pow10_rounded(
    rounding: RoundingMode,
    negative: bool,
    magnitude: u128,
    exponent: u32,
) -> crate::Result<u128> {
    match crate::unsigned::pow10_u128(exponent) {
        Some(divisor) => divide_rounded(rounding, negative, magnitude, divisor),
        None => {
            let part = if magnitude == 0 {
                TruncatedPart::Zero
            } else {
                TruncatedPart::LessThanHalf
            };
            rounding.round_magnitude(negative, 0, part)
        }
    }
}
