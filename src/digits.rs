//! Conversion between the trace's digit-array text and arbitrary-precision integers.
//!
//! The library under test prints its numbers limb by limb in memory order, so a
//! bracketed array reads least-significant digit first and each element spans
//! `8 * width` bits.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::trace::TraceError;

/// Mask applied to every digit emitted by [`encode`], fixed at 32 bits
/// regardless of the declared digit width (see DESIGN.md).
const DIAGNOSTIC_DIGIT_MASK: u32 = u32::MAX;

/// Decodes the first bracketed digit array found in `line`.
///
/// Whitespace anywhere in the line is ignored, so operand lines like
/// `a = [3, 5]` decode directly. Digits are folded most-significant first after
/// reversing the array, giving `Σ digit_i * (2^(8 * width))^i`.
pub fn decode(line: &str, width: usize) -> Result<BigUint, TraceError> {
    let cleaned: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    let (open, close) = match (cleaned.find('['), cleaned.find(']')) {
        (Some(open), Some(close)) if open < close => (open, close),
        _ => {
            return Err(TraceError::MissingBrackets {
                line: line.to_string(),
            });
        }
    };

    let mut value = BigUint::zero();
    for token in cleaned[open + 1..close].split(',').rev() {
        let digit: BigUint = token.parse().map_err(|source| TraceError::BadDigit {
            token: token.to_string(),
            source,
        })?;
        value = (value << (8 * width)) + digit;
    }
    Ok(value)
}

/// Re-encodes `value` into the trace's digit-array form, for diagnostics only.
///
/// Digits are extracted low-first with the fixed 32-bit mask and the shift given
/// by `width`; the first digit is emitted even when the value is zero. For
/// `width != 4` the mask truncates digits wider than 32 bits, so the output is
/// not a faithful re-encoding there (see DESIGN.md; exercised in tests).
pub fn encode(value: &BigUint, width: usize) -> String {
    let mask = BigUint::from(DIAGNOSTIC_DIGIT_MASK);
    let mut rest = value.clone();
    let mut text = format!("[{}", &rest & &mask);
    rest >>= 8 * width;
    while !rest.is_zero() {
        text.push_str(", ");
        text.push_str(&(&rest & &mask).to_string());
        rest >>= 8 * width;
    }
    text.push(']');
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: u128) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn decodes_single_digit() {
        assert_eq!(decode("[3]", 4).unwrap(), big(3));
    }

    #[test]
    fn decodes_operand_line_with_surrounding_text() {
        assert_eq!(decode("a + b = [7]", 4).unwrap(), big(7));
        assert_eq!(decode("  Modulo = [6] + 1", 4).unwrap(), big(6));
    }

    #[test]
    fn first_array_element_is_least_significant() {
        // [1, 2] with 4-byte digits is 2 * 2^32 + 1.
        assert_eq!(decode("[1, 2]", 4).unwrap(), big((2u128 << 32) + 1));
        assert_eq!(decode("[0, 0, 1]", 4).unwrap(), big(1u128 << 64));
    }

    #[test]
    fn digit_width_sets_the_shift() {
        assert_eq!(decode("[1, 2]", 1).unwrap(), big((2 << 8) + 1));
        assert_eq!(decode("[1, 2]", 8).unwrap(), big((2u128 << 64) + 1));
    }

    #[test]
    fn rejects_line_without_brackets() {
        assert!(matches!(
            decode("a = 3", 4),
            Err(TraceError::MissingBrackets { .. })
        ));
        assert!(matches!(
            decode("a = ]3[", 4),
            Err(TraceError::MissingBrackets { .. })
        ));
    }

    #[test]
    fn rejects_non_numeric_digit() {
        assert!(matches!(
            decode("[1, x]", 4),
            Err(TraceError::BadDigit { .. })
        ));
        assert!(matches!(decode("[]", 4), Err(TraceError::BadDigit { .. })));
        assert!(matches!(
            decode("[-3]", 4),
            Err(TraceError::BadDigit { .. })
        ));
    }

    #[test]
    fn encodes_zero_unconditionally() {
        assert_eq!(encode(&BigUint::zero(), 4), "[0]");
    }

    #[test]
    fn encodes_low_digit_first() {
        assert_eq!(encode(&big((2u128 << 32) + 1), 4), "[1, 2]");
    }

    #[test]
    fn encode_then_decode_is_identity_at_width_4() {
        let x = big(0x1234_5678_9abc_def0_1122_3344);
        assert_eq!(decode(&encode(&x, 4), 4).unwrap(), x);
    }

    #[test]
    fn diagnostic_mask_truncates_wide_digits() {
        // One 8-byte digit worth 2^40: the 32-bit mask drops it entirely, so the
        // round trip does not hold away from 4-byte digits.
        let x = big(1u128 << 40);
        assert_eq!(encode(&x, 8), "[0]");
        assert_ne!(decode(&encode(&x, 8), 8).unwrap(), x);
    }
}
