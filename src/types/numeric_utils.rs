//! Culture-invariant parsing for the binary numeric types.
//!
//! The decimal separator is always `.` and the group separator is always
//! `,`. Surrounding whitespace is ignored.
use std::borrow::Cow;

use crate::{LenientError, Result};

/// Parse a 32-bit integer. Group separators, fractions and exponents are
/// rejected.
pub fn parse_i32(s: &str) -> Result<i32> {
    let trimmed = s.trim();
    trimmed
        .parse::<i32>()
        .map_err(|e| LenientError::TypeConversion(format!("Invalid integer value '{trimmed}': {e}")))
}

/// Parse a 64-bit integer with the same grammar as [`parse_i32`].
pub fn parse_i64(s: &str) -> Result<i64> {
    let trimmed = s.trim();
    trimmed
        .parse::<i64>()
        .map_err(|e| LenientError::TypeConversion(format!("Invalid long value '{trimmed}': {e}")))
}

/// Parse a double. Accepts an exponent, `,` group separators in the integer
/// part and the special values `NaN`, `Infinity` and `-Infinity`.
pub fn parse_f64(s: &str) -> Result<f64> {
    let trimmed = s.trim();
    let normalized = strip_group_separators(trimmed)?;
    normalized
        .parse::<f64>()
        .map_err(|e| LenientError::TypeConversion(format!("Invalid double value '{trimmed}': {e}")))
}

/// Remove `,` group separators from the integer part of a number.
///
/// Separators must follow at least one digit and may not appear after the
/// decimal point or exponent marker.
pub fn strip_group_separators(s: &str) -> Result<Cow<'_, str>> {
    if !s.contains(',') {
        return Ok(Cow::Borrowed(s));
    }

    let int_end = s.find(['.', 'e', 'E']).unwrap_or(s.len());
    let (int_part, rest) = s.split_at(int_end);

    let digits = int_part.trim_start_matches(['+', '-']);
    let starts_with_digit = digits.chars().next().is_some_and(|c| c.is_ascii_digit());
    if !starts_with_digit || rest.contains(',') {
        return Err(LenientError::TypeConversion(format!(
            "Misplaced group separator in '{s}'"
        )));
    }

    let mut normalized = String::with_capacity(s.len());
    normalized.extend(int_part.chars().filter(|&c| c != ','));
    normalized.push_str(rest);
    Ok(Cow::Owned(normalized))
}

/// Insert `,` group separators into the integer part of a rendered number.
pub fn group_digits(rendered: &str) -> String {
    let (sign, unsigned) = match rendered.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rendered),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(pos) => unsigned.split_at(pos),
        None => (unsigned, ""),
    };

    let mut grouped = String::with_capacity(rendered.len() + int_part.len() / 3);
    grouped.push_str(sign);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped.push_str(frac_part);
    grouped
}
