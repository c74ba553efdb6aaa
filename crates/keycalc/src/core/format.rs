//! Numeric formatting for the displays
//!
//! Results are rendered with the shortest digit string that round-trips.
//! Common magnitudes always come out in plain decimal notation; very large or
//! very small values fall back to exponent notation.

use crate::core::operations::normalize;

/// Lower bound (inclusive) of the plain-notation range
const PLAIN_MIN: f64 = 1e-9;
/// Upper bound (exclusive) of the plain-notation range
const PLAIN_MAX: f64 = 1e12;

/// Decimal exponents strictly between these bounds render without an exponent
const DEFAULT_EXP_MIN: i32 = -7;
const DEFAULT_EXP_MAX: i32 = 21;

/// Formats a number for display
///
/// Non-finite input renders as `error_marker`.
#[must_use]
pub fn format_number(n: f64, error_marker: &str) -> String {
    if !n.is_finite() {
        return error_marker.to_string();
    }

    let normalized = normalize(n);
    let abs = normalized.abs();
    if abs != 0.0 && !(PLAIN_MIN..PLAIN_MAX).contains(&abs) {
        return default_numeral(normalized);
    }

    let s = default_numeral(normalized);
    if s.contains('e') {
        return s;
    }
    strip_fraction_zeros(&s).to_string()
}

/// Shortest round-trip rendering, switching to exponent form outside
/// `1e-7 < |n| < 1e21`
fn default_numeral(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }

    let scientific = format!("{n:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent > DEFAULT_EXP_MIN && exponent < DEFAULT_EXP_MAX {
        format!("{n}")
    } else if exponent < 0 {
        format!("{mantissa}e{exponent}")
    } else {
        format!("{mantissa}e+{exponent}")
    }
}

/// Removes trailing fractional zeros and a dangling decimal point
fn strip_fraction_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKER: &str = "Error";

    #[test]
    fn test_format_integers() {
        assert_eq!(format_number(0.0, MARKER), "0");
        assert_eq!(format_number(8.0, MARKER), "8");
        assert_eq!(format_number(-42.0, MARKER), "-42");
        assert_eq!(format_number(999_999_999_999.0, MARKER), "999999999999");
    }

    #[test]
    fn test_format_decimals() {
        assert_eq!(format_number(0.5, MARKER), "0.5");
        assert_eq!(format_number(0.1 + 0.2, MARKER), "0.3");
        assert_eq!(format_number(-2.25, MARKER), "-2.25");
        assert_eq!(format_number(1.0 / 3.0, MARKER), "0.333333333333");
    }

    #[test]
    fn test_format_negative_zero() {
        assert_eq!(format_number(-0.0, MARKER), "0");
    }

    #[test]
    fn test_format_non_finite_uses_marker() {
        assert_eq!(format_number(f64::NAN, MARKER), "Error");
        assert_eq!(format_number(f64::INFINITY, "Erro"), "Erro");
        assert_eq!(format_number(f64::NEG_INFINITY, MARKER), "Error");
    }

    #[test]
    fn test_format_large_plain_below_exponent_threshold() {
        assert_eq!(format_number(1e12, MARKER), "1000000000000");
        assert_eq!(format_number(123_456_789_012_345.0, MARKER), "123456789012345");
    }

    #[test]
    fn test_format_huge_uses_exponent() {
        assert_eq!(format_number(1e21, MARKER), "1e+21");
        assert_eq!(format_number(-2.5e27, MARKER), "-2.5e+27");
    }

    #[test]
    fn test_format_tiny_uses_exponent() {
        // Twelve-place rounding leaves 1e-12 representable
        assert_eq!(format_number(1e-12, MARKER), "1e-12");
        assert_eq!(format_number(5e-10, MARKER), "5e-10");
    }

    #[test]
    fn test_format_small_inside_plain_range() {
        assert_eq!(format_number(0.000_001, MARKER), "0.000001");
        assert_eq!(format_number(5e-8, MARKER), "5e-8");
    }

    #[test]
    fn test_format_rounds_below_twelve_places_to_zero() {
        assert_eq!(format_number(1e-13, MARKER), "0");
    }

    #[test]
    fn test_strip_fraction_zeros() {
        assert_eq!(strip_fraction_zeros("1.500"), "1.5");
        assert_eq!(strip_fraction_zeros("2.000"), "2");
        assert_eq!(strip_fraction_zeros("100"), "100");
    }
}
