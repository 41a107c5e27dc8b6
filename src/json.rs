//! serde integration: JSON documents as a source of loosely-typed values.
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value as JsonValue};

use crate::types::datetime_utils::format_datetime;
use crate::value::Value;

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => from_number(&n),
            JsonValue::String(s) => Value::Text(s),
            nested @ (JsonValue::Array(_) | JsonValue::Object(_)) => Value::Other(nested.to_string()),
        }
    }
}

/// Narrowest native kind that holds the number exactly
fn from_number(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        return i32::try_from(i).map_or(Value::Long(i), Value::Int);
    }
    if let Some(u) = n.as_u64() {
        return Value::Decimal(Decimal::from(u));
    }
    n.as_f64().map_or_else(|| Value::Other(n.to_string()), Value::Double)
}

/// Values serialize as their natural JSON shape. Decimals, date-times and
/// GUIDs serialize as their string form so no precision is lost.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null | Value::DbNull => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i32(*i),
            Value::Long(l) => serializer.serialize_i64(*l),
            Value::Double(d) => serializer.serialize_f64(*d),
            Value::Decimal(d) => serializer.collect_str(d),
            Value::Text(s) | Value::Other(s) => serializer.serialize_str(s),
            Value::DateTime(dt) => serializer.serialize_str(&format_datetime(dt)),
            Value::Guid(g) => serializer.collect_str(&g.hyphenated()),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        JsonValue::deserialize(deserializer).map(Value::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_numbers() {
        assert_eq!(Value::from(json!(7)), Value::Int(7));
        assert_eq!(Value::from(json!(i64::MAX)), Value::Long(i64::MAX));
        assert_eq!(Value::from(json!(u64::MAX)), Value::Decimal(Decimal::from(u64::MAX)));
        assert_eq!(Value::from(json!(3.14)), Value::Double(3.14));
    }

    #[test]
    fn test_from_json_nested_is_opaque() {
        assert_eq!(Value::from(json!(null)), Value::Null);
        assert_eq!(Value::from(json!([1, 2])), Value::Other("[1,2]".into()));
        assert_eq!(Value::from(json!({"a": true})), Value::Other(r#"{"a":true}"#.into()));
    }

    #[test]
    fn test_serialize() {
        let rendered = serde_json::to_string(&vec![
            Value::DbNull,
            Value::Int(1),
            Value::Decimal(Decimal::new(1050, 2)),
            Value::from("x"),
        ])
        .unwrap();
        assert_eq!(rendered, r#"[null,1,"10.50","x"]"#);
    }

    #[test]
    fn test_deserialize() {
        let values: Vec<Value> = serde_json::from_str(r#"[true, "16/05/2022", 2.5, null]"#).unwrap();
        assert_eq!(
            values,
            vec![Value::Bool(true), Value::from("16/05/2022"), Value::Double(2.5), Value::Null]
        );
    }
}
