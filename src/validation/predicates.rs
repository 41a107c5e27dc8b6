use super::{ValidationHelper, parse_string_boolean};
use crate::types::uuid::GUID_TEXT_LEN;
use crate::types::{DecimalHandler, UuidHandler, datetime_utils, numeric_utils};
use crate::value::Value;

impl ValidationHelper {
    /// True for an absent value or the database null marker.
    pub fn is_null(value: &Value) -> bool {
        matches!(value, Value::Null | Value::DbNull)
    }

    /// True for native booleans and values whose string form is `true`,
    /// `false`, `1` or `0` (case-insensitive).
    pub fn is_boolean(value: &Value) -> bool {
        match value {
            Value::Null | Value::DbNull => false,
            Value::Bool(_) => true,
            other => parse_string_boolean(&other.string_form()).is_some(),
        }
    }

    pub fn is_date_time(value: &Value) -> bool {
        match value {
            Value::Null | Value::DbNull => false,
            Value::DateTime(_) => true,
            other => datetime_utils::parse_datetime(&other.string_form()).is_ok(),
        }
    }

    pub fn is_decimal(value: &Value) -> bool {
        match value {
            Value::Null | Value::DbNull => false,
            Value::Decimal(_) => true,
            other => DecimalHandler::parse_decimal(&other.string_form()).is_ok(),
        }
    }

    pub fn is_double(value: &Value) -> bool {
        match value {
            Value::Null | Value::DbNull => false,
            Value::Double(_) => true,
            other => numeric_utils::parse_f64(&other.string_form()).is_ok(),
        }
    }

    /// Only the 36-character hyphenated form is accepted for text.
    pub fn is_guid(value: &Value) -> bool {
        match value {
            Value::Null | Value::DbNull => false,
            Value::Guid(_) => true,
            other => {
                let text = other.string_form();
                text.len() == GUID_TEXT_LEN && UuidHandler::parse_uuid(&text).is_ok()
            }
        }
    }

    /// Fractional and out-of-range values are not integers.
    pub fn is_integer(value: &Value) -> bool {
        match value {
            Value::Null | Value::DbNull => false,
            Value::Int(_) => true,
            other => numeric_utils::parse_i32(&other.string_form()).is_ok(),
        }
    }

    pub fn is_long(value: &Value) -> bool {
        match value {
            Value::Null | Value::DbNull => false,
            Value::Int(_) | Value::Long(_) => true,
            other => numeric_utils::parse_i64(&other.string_form()).is_ok(),
        }
    }

    /// True iff `min <= value <= max`. Bounds are never swapped, so the
    /// range is empty when `min > max`.
    pub fn is_in_range<T: PartialOrd>(min: T, max: T, value: T) -> bool {
        if value < min {
            return false;
        }

        value <= max
    }
}
