//! The text buffer holding the number being typed
//!
//! Error prevention: every edit keeps the buffer a valid (possibly partial)
//! numeral, so parsing only fails on the error marker.

use crate::core::{CalcError, CalcResult};

/// Buffer contents when nothing has been typed
pub const IDLE: &str = "0";

/// Parses the buffer into a number
///
/// Accepts an optional leading `-`, digits, at most one `.` (a trailing `.`
/// is allowed), and an optional exponent as produced by the formatter.
pub fn parse_buffer(text: &str) -> CalcResult<f64> {
    if !is_numeral(text) {
        return Err(CalcError::Parse(text.to_string()));
    }
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(CalcError::Parse(text.to_string())),
    }
}

/// Returns true if `text` matches `-?\d+(\.\d*)?([eE][+-]?\d+)?`
#[must_use]
pub fn is_numeral(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(i) => (&unsigned[..i], Some(&unsigned[i + 1..])),
        None => (unsigned, None),
    };

    let (whole, fraction) = match mantissa.split_once('.') {
        Some((w, f)) => (w, f),
        None => (mantissa, ""),
    };
    if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !digits.is_empty() && all_digits(digits)
        }
    }
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// Appends a digit, replacing a lone zero
pub fn push_digit(buffer: &mut String, digit: char) {
    match buffer.as_str() {
        "0" => {
            buffer.clear();
            buffer.push(digit);
        }
        "-0" => {
            buffer.truncate(1);
            buffer.push(digit);
        }
        _ => buffer.push(digit),
    }
}

/// Appends a decimal point unless the numeral already has one
///
/// Exponent forms take no decimal point either.
pub fn push_dot(buffer: &mut String) {
    if !buffer.contains(['.', 'e', 'E']) {
        buffer.push('.');
    }
}

/// Removes the last character, collapsing to `"0"` when nothing
/// meaningful remains
pub fn pop_last(buffer: &mut String) {
    let len = buffer.chars().count();
    if len <= 1 || (len == 2 && buffer.starts_with('-')) {
        reset(buffer);
        return;
    }

    buffer.pop();
    // A dangling exponent marker is not a numeral
    while buffer.ends_with(['e', 'E', '+']) || (buffer.ends_with('-') && buffer.len() > 1) {
        buffer.pop();
    }
    if buffer.is_empty() || buffer == "-" || buffer == "-0" {
        reset(buffer);
    }
}

/// Prepends or strips the leading minus sign
pub fn toggle_sign(buffer: &mut String) {
    if let Some(rest) = buffer.strip_prefix('-') {
        *buffer = rest.to_string();
    } else {
        buffer.insert(0, '-');
    }
}

/// Returns the buffer to the idle `"0"`
pub fn reset(buffer: &mut String) {
    buffer.clear();
    buffer.push_str(IDLE);
}
