use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use super::{ValidationHelper, parse_bool_word, parse_string_boolean};
use crate::format;
use crate::types::{DecimalHandler, UuidHandler, datetime_utils, numeric_utils};
use crate::value::Value;
use crate::Result;

impl ValidationHelper {
    /// Convert to a boolean.
    ///
    /// Native booleans are returned as-is. Text and opaque values are matched
    /// against `true`/`false`/`1`/`0` (case-insensitive), then against a
    /// trimmed `true`/`false`. Numbers are true when non-zero. Anything else
    /// yields `default`.
    pub fn get_boolean(value: &Value, default: bool) -> bool {
        match value {
            Value::Null | Value::DbNull => default,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Long(l) => *l != 0,
            Value::Double(d) => *d != 0.0,
            Value::Decimal(d) => !d.is_zero(),
            Value::Text(s) | Value::Other(s) => parse_string_boolean(s)
                .or_else(|| parse_bool_word(s))
                .unwrap_or_else(|| Self::fallback(value, "bool", default)),
            Value::DateTime(_) | Value::Guid(_) => Self::fallback(value, "bool", default),
        }
    }

    pub fn get_date_time(value: &Value, default: NaiveDateTime) -> NaiveDateTime {
        match value {
            Value::Null | Value::DbNull => default,
            Value::DateTime(dt) => *dt,
            other => datetime_utils::parse_datetime(&other.string_form())
                .unwrap_or_else(|_| Self::fallback(value, "datetime", default)),
        }
    }

    pub fn get_decimal(value: &Value, default: Decimal) -> Decimal {
        if !Self::is_decimal(value) {
            return Self::fallback(value, "decimal", default);
        }

        match value {
            Value::Decimal(d) => *d,
            other => DecimalHandler::parse_decimal(&other.string_form()).unwrap_or(default),
        }
    }

    pub fn get_double(value: &Value, default: f64) -> f64 {
        if !Self::is_double(value) {
            return Self::fallback(value, "double", default);
        }

        match value {
            Value::Double(d) => *d,
            other => numeric_utils::parse_f64(&other.string_form()).unwrap_or(default),
        }
    }

    pub fn get_guid(value: &Value, default: Uuid) -> Uuid {
        if !Self::is_guid(value) {
            return Self::fallback(value, "guid", default);
        }

        match value {
            Value::Guid(g) => *g,
            other => UuidHandler::parse_uuid(&other.string_form()).unwrap_or(default),
        }
    }

    pub fn get_integer(value: &Value, default: i32) -> i32 {
        if !Self::is_integer(value) {
            return Self::fallback(value, "int", default);
        }

        match value {
            Value::Int(i) => *i,
            other => numeric_utils::parse_i32(&other.string_form()).unwrap_or(default),
        }
    }

    pub fn get_long(value: &Value, default: i64) -> i64 {
        if !Self::is_long(value) {
            return Self::fallback(value, "long", default);
        }

        match value {
            Value::Int(i) => i64::from(*i),
            Value::Long(l) => *l,
            other => numeric_utils::parse_i64(&other.string_form()).unwrap_or(default),
        }
    }

    /// The value's string form, or `default` for a null-equivalent value.
    pub fn get_string(value: &Value, default: &str) -> String {
        if Self::is_null(value) {
            return default.to_string();
        }

        value.to_string()
    }

    /// Render `value` through a single-placeholder template such as
    /// `"Number is {0}"`. A null value is replaced by `default` before
    /// rendering; without a template this is [`ValidationHelper::get_string`].
    ///
    /// Unlike every other getter this one fails: a malformed template is a
    /// programming error and is returned to the caller.
    pub fn get_string_formatted(value: &Value, default: &str, template: Option<&str>) -> Result<String> {
        let Some(template) = template else {
            return Ok(Self::get_string(value, default));
        };

        let substituted;
        let value = if Self::is_null(value) {
            substituted = Value::from(default);
            &substituted
        } else {
            value
        };

        format::format_single(template, value).map_err(|e| {
            debug!(template, error = %e, "malformed format template");
            e.into()
        })
    }
}
