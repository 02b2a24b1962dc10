use core::fmt::{self, Write};

use alloc::string::String;

use crate::arithmetic::DecimalArithmetic;
use crate::rounding::TruncatedPart;
use crate::unsigned::magnitude_to_i64;
use crate::{DecimalError, Result, SCALE_METRICS};

/// Writes `unscaled` at `scale` as plain decimal text, with exactly `scale`
/// fractional digits.
pub(crate) fn write_unscaled<W: Write>(out: &mut W, unscaled: i64, scale: u8) -> fmt::Result {
    let factor = SCALE_METRICS[scale as usize].scale_factor() as u64;
    let magnitude = unscaled.unsigned_abs();
    if unscaled < 0 {
        out.write_char('-')?;
    }
    write!(out, "{}", magnitude / factor)?;
    if scale > 0 {
        write!(out, ".{:0width$}", magnitude % factor, width = scale as usize)?;
    }
    Ok(())
}

impl DecimalArithmetic {
    /// `a` as plain decimal text: `-?digits(.digits)?` with exactly `scale`
    /// fractional digits.
    #[allow(clippy::inherent_to_string)]
    pub fn to_string(&self, a: i64) -> String {
        let mut text = String::with_capacity(22);
        // Writing into a String cannot fail.
        let _ = write_unscaled(&mut text, a, self.scale());
        text
    }

    /// Parses plain decimal text: optional sign, digits, optional `.` and
    /// fraction.
    ///
    /// Fraction digits beyond the scale are rounded away with this
    /// arithmetic's rounding mode. No exponent, whitespace or grouping.
    ///
    /// # Errors
    /// `InvalidFormat` for malformed text, `Overflow` when out of range
    /// (whatever the overflow mode), `RoundingRequired` for `Unnecessary`
    /// with non-zero surplus digits.
    pub fn parse(&self, text: &str) -> Result<i64> {
        let bytes = text.as_bytes();
        let (negative, body) = match bytes.split_first() {
            Some((b'-', rest)) => (true, rest),
            Some((b'+', rest)) => (false, rest),
            _ => (false, bytes),
        };
        let (integer_digits, fraction_digits) = match body.iter().position(|&b| b == b'.') {
            Some(dot) => (&body[..dot], &body[dot + 1..]),
            None => (body, &[][..]),
        };
        if integer_digits.is_empty() && fraction_digits.is_empty() {
            return Err(DecimalError::InvalidFormat);
        }
        if !integer_digits.iter().chain(fraction_digits).all(u8::is_ascii_digit) {
            return Err(DecimalError::InvalidFormat);
        }

        let mut integer: u128 = 0;
        for &digit in integer_digits {
            integer = integer * 10 + (digit - b'0') as u128;
            if integer > u64::MAX as u128 {
                tracing::trace!(len = text.len(), "parsed integer part exceeds 64 bits");
                return Err(DecimalError::Overflow);
            }
        }

        let scale = self.scale() as usize;
        let mut fraction: u128 = 0;
        for index in 0..scale {
            let digit = fraction_digits.get(index).map_or(0, |&b| b - b'0');
            fraction = fraction * 10 + digit as u128;
        }
        let part = match fraction_digits.get(scale) {
            Some(&first) => TruncatedPart::from_digits(
                first - b'0',
                fraction_digits[scale + 1..].iter().any(|&b| b != b'0'),
            ),
            None => TruncatedPart::Zero,
        };

        let truncated = integer * self.one() as u128 + fraction;
        let magnitude = self.rounding().round_magnitude(negative, truncated, part)?;
        magnitude_to_i64(negative, magnitude).ok_or(DecimalError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arithmetic::OverflowMode;
    use crate::RoundingMode;
    use proptest::prelude::*;

    fn arith(scale: u8, rounding: RoundingMode) -> DecimalArithmetic {
        DecimalArithmetic::new(scale, rounding, OverflowMode::Unchecked)
    }

    #[test]
    fn test_to_string() {
        let scale_2 = arith(2, RoundingMode::HalfUp);
        assert_eq!(scale_2.to_string(150), "1.50");
        assert_eq!(scale_2.to_string(-5), "-0.05");
        assert_eq!(scale_2.to_string(0), "0.00");
        assert_eq!(arith(0, RoundingMode::HalfUp).to_string(-42), "-42");
        assert_eq!(
            arith(18, RoundingMode::HalfUp).to_string(i64::MIN),
            "-9.223372036854775808"
        );
        assert_eq!(
            arith(4, RoundingMode::HalfUp).to_string(i64::MAX),
            "922337203685477.5807"
        );
    }

    #[test]
    fn test_parse() {
        let scale_2 = arith(2, RoundingMode::HalfUp);
        assert_eq!(scale_2.parse("1.5"), Ok(150));
        assert_eq!(scale_2.parse("-1.50"), Ok(-150));
        assert_eq!(scale_2.parse("+3"), Ok(300));
        assert_eq!(scale_2.parse(".25"), Ok(25));
        assert_eq!(scale_2.parse("7."), Ok(700));
        assert_eq!(scale_2.parse("0001.10"), Ok(110));
    }

    #[test]
    fn test_parse_rounds_surplus_digits() {
        let scale_2 = arith(2, RoundingMode::HalfUp);
        assert_eq!(scale_2.parse("1.234"), Ok(123));
        assert_eq!(scale_2.parse("1.235"), Ok(124));
        assert_eq!(scale_2.parse("-1.235"), Ok(-124));
        assert_eq!(scale_2.parse("1.2350000"), Ok(124));
        assert_eq!(
            arith(2, RoundingMode::HalfDown).parse("1.2350000"),
            Ok(123)
        );
        assert_eq!(
            arith(2, RoundingMode::HalfDown).parse("1.2350001"),
            Ok(124)
        );
        assert_eq!(arith(2, RoundingMode::Floor).parse("-0.001"), Ok(-1));
        assert_eq!(
            arith(2, RoundingMode::Unnecessary).parse("1.231"),
            Err(DecimalError::RoundingRequired)
        );
        assert_eq!(arith(2, RoundingMode::Unnecessary).parse("1.2300"), Ok(123));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let scale_2 = arith(2, RoundingMode::HalfUp);
        for text in ["", "-", ".", "+.", "1.2.3", "abc", "1e5", " 1", "1,000", "--1"] {
            assert_eq!(scale_2.parse(text), Err(DecimalError::InvalidFormat), "{text}");
        }
    }

    #[test]
    fn test_parse_range() {
        let scale_0 = arith(0, RoundingMode::HalfUp);
        assert_eq!(scale_0.parse("9223372036854775807"), Ok(i64::MAX));
        assert_eq!(scale_0.parse("-9223372036854775808"), Ok(i64::MIN));
        assert_eq!(
            scale_0.parse("9223372036854775808"),
            Err(DecimalError::Overflow)
        );
        assert_eq!(
            scale_0.parse("9223372036854775807.5"),
            Err(DecimalError::Overflow)
        );
        assert_eq!(
            scale_0.parse("123456789012345678901234567890"),
            Err(DecimalError::Overflow)
        );
        assert_eq!(
            arith(18, RoundingMode::HalfUp).parse("9.3"),
            Err(DecimalError::Overflow)
        );
    }

    proptest! {
        #[test]
        fn prop_string_round_trip(unscaled in any::<i64>(), scale in 0u8..=18) {
            let arith = arith(scale, RoundingMode::Unnecessary);
            let text = arith.to_string(unscaled);
            prop_assert_eq!(arith.parse(&text), Ok(unscaled));
        }
    }
}
