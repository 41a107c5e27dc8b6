//! Defensive conversion of loosely-typed values.
//!
//! Every `is_*` predicate answers whether a [`Value`] can be read as the
//! target type, and every `get_*` getter returns the converted value or the
//! caller's default. Only [`ValidationHelper::get_string_formatted`] can
//! fail, and only on a malformed template.
mod getters;
mod predicates;

use tracing::trace;

use crate::value::Value;

/// Stateless conversion and validation helpers.
pub struct ValidationHelper;

impl ValidationHelper {
    /// Return `default`, noting why a non-null value was not convertible.
    fn fallback<T>(value: &Value, target_type: &'static str, default: T) -> T {
        if !Self::is_null(value) {
            trace!(kind = %value.kind(), target_type, "value not convertible, using default");
        }
        default
    }
}

/// The four recognized boolean strings, compared case-insensitively.
fn parse_string_boolean(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") || s == "1" {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") || s == "0" {
        Some(false)
    } else {
        None
    }
}

/// `true`/`false` words with surrounding whitespace, case-insensitive.
fn parse_bool_word(s: &str) -> Option<bool> {
    let trimmed = s.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
