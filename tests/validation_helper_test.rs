use chrono::{NaiveDate, NaiveDateTime};
use lenient::{FormatError, LenientError, ValidationHelper, Value};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

const GUID_TEXT: &str = "a5c4c4cb-67f8-407d-8fa7-f59372e5b820";
const OTHER_GUID_TEXT: &str = "0fe38975-f6cd-4ba1-acfb-1cefa9d9c13b";

fn guid(s: &str) -> Uuid {
    Uuid::parse_str(s).unwrap()
}

#[test]
fn test_get_boolean() {
    let cases: Vec<(Value, bool, bool)> = vec![
        (Value::Null, false, false),
        (Value::Null, true, true),
        (Value::from("test"), false, false),
        (Value::from("test"), true, true),
        (Value::Int(-1), false, true),
        (Value::Int(0), false, false),
        (Value::Int(1), false, true),
        (Value::Int(2), false, true),
        (Value::from("false"), true, false),
        (Value::from("true"), true, true),
        (Value::Bool(false), true, false),
        (Value::Bool(false), false, false),
        (Value::from("TRUE"), false, true),
        (Value::from("0"), true, false),
    ];

    for (value, default, expected) in cases {
        assert_eq!(
            ValidationHelper::get_boolean(&value, default),
            expected,
            "get_boolean({value:?}, {default})"
        );
    }
}

#[test]
fn test_get_date_time() {
    let min = NaiveDateTime::MIN;
    let max = NaiveDateTime::MAX;
    let may_16 = NaiveDate::from_ymd_opt(2022, 5, 16).unwrap().and_hms_opt(0, 0, 0).unwrap();

    let cases: Vec<(Value, NaiveDateTime, NaiveDateTime)> = vec![
        (Value::Null, min, min),
        (Value::Int(i32::MIN), min, min),
        (Value::Int(i32::MAX), max, max),
        (Value::Long(i64::MIN), min, min),
        (Value::Long(i64::MAX), max, max),
        (Value::Decimal(Decimal::MIN), min, min),
        (Value::Decimal(Decimal::MAX), max, max),
        (Value::DateTime(min), max, min),
        (Value::DateTime(max), min, max),
        (Value::from("16/05/2022"), min, may_16),
        (Value::from("16 May 2022"), min, may_16),
        (Value::from("May 16, 2022"), min, may_16),
        (Value::from("Mon, 16 May 2022 00:00:00 GMT"), min, may_16),
        (Value::from("test"), min, min),
    ];

    for (value, default, expected) in cases {
        assert_eq!(ValidationHelper::get_date_time(&value, default), expected, "{value:?}");
    }
}

#[test]
fn test_get_decimal() {
    let one = Decimal::ONE;
    let cases: Vec<(Value, Decimal)> = vec![
        (Value::Null, one),
        (Value::from("test"), one),
        (Value::Int(i32::MIN), Decimal::from(i32::MIN)),
        (Value::Int(i32::MAX), Decimal::from(i32::MAX)),
        (Value::Long(i64::MIN), Decimal::from(i64::MIN)),
        (Value::Long(i64::MAX), Decimal::from(i64::MAX)),
        (Value::Decimal(Decimal::MIN), Decimal::MIN),
        (Value::Decimal(Decimal::MAX), Decimal::MAX),
    ];

    for (value, expected) in cases {
        assert_eq!(ValidationHelper::get_decimal(&value, one), expected, "{value:?}");
    }
}

#[test]
fn test_get_double() {
    let cases: Vec<(Value, f64, f64)> = vec![
        (Value::Null, 1.0, 1.0),
        (Value::Double(3.14), 1.0, 3.14),
        (Value::Int(100), 1.0, 100.0),
        (Value::from("test"), 0.0, 0.0),
        (Value::Double(f64::MIN), 1.0, f64::MIN),
        (Value::Double(f64::MAX), 1.0, f64::MAX),
    ];

    for (value, default, expected) in cases {
        assert_eq!(ValidationHelper::get_double(&value, default), expected, "{value:?}");
    }
}

#[test]
fn test_get_guid() {
    let expected = guid(GUID_TEXT);
    assert_eq!(ValidationHelper::get_guid(&Value::Null, expected), expected);
    assert_eq!(ValidationHelper::get_guid(&Value::from("test"), expected), expected);
    assert_eq!(
        ValidationHelper::get_guid(&Value::from(GUID_TEXT), guid(OTHER_GUID_TEXT)),
        expected
    );
}

#[test]
fn test_get_integer() {
    let cases: Vec<(Value, i32, i32)> = vec![
        (Value::Null, 1, 1),
        (Value::Double(3.14), 1, 1),
        (Value::Int(100), 1, 100),
        (Value::from("test"), 0, 0),
        (Value::Int(i32::MIN), 1, i32::MIN),
        (Value::Int(i32::MAX), 1, i32::MAX),
    ];

    for (value, default, expected) in cases {
        assert_eq!(ValidationHelper::get_integer(&value, default), expected, "{value:?}");
    }
}

#[test]
fn test_get_long() {
    let cases: Vec<(Value, i64, i64)> = vec![
        (Value::Null, 1, 1),
        (Value::Double(3.14), 1, 1),
        (Value::Int(100), 1, 100),
        (Value::from("test"), 0, 0),
        (Value::Long(i64::MIN), 1, i64::MIN),
        (Value::Long(i64::MAX), 1, i64::MAX),
    ];

    for (value, default, expected) in cases {
        assert_eq!(ValidationHelper::get_long(&value, default), expected, "{value:?}");
    }
}

#[test]
fn test_get_string() {
    let cases: Vec<(Value, &str, String)> = vec![
        (Value::Null, "test", "test".to_string()),
        (Value::from("test"), "", "test".to_string()),
        (Value::Int(i32::MIN), "", i32::MIN.to_string()),
        (Value::Int(i32::MAX), "", i32::MAX.to_string()),
        (Value::Long(i64::MIN), "", i64::MIN.to_string()),
        (Value::Long(i64::MAX), "", i64::MAX.to_string()),
        (Value::Decimal(Decimal::MIN), "", "-79228162514264337593543950335".to_string()),
        (Value::Decimal(Decimal::MAX), "", "79228162514264337593543950335".to_string()),
        (Value::Double(f64::INFINITY), "", "Infinity".to_string()),
        (Value::Double(f64::NEG_INFINITY), "", "-Infinity".to_string()),
    ];

    for (value, default, expected) in cases {
        assert_eq!(ValidationHelper::get_string(&value, default), expected);
    }
}

#[test]
fn test_get_string_formatted() {
    assert_eq!(
        ValidationHelper::get_string_formatted(&Value::from("20"), "", Some("Number is {0}")).unwrap(),
        "Number is 20"
    );
    assert_eq!(
        ValidationHelper::get_string_formatted(&Value::Int(20), "", Some("Number is {0}")).unwrap(),
        "Number is 20"
    );
    assert_eq!(
        ValidationHelper::get_string_formatted(&Value::from("Stuart"), "", Some("My name is {0}"))
            .unwrap(),
        "My name is Stuart"
    );
}

#[test]
fn test_get_string_formatted_specifiers() {
    let dt = NaiveDate::from_ymd_opt(2022, 5, 16).unwrap().and_hms_opt(8, 30, 0).unwrap();
    let cases: Vec<(Value, &str, &str)> = vec![
        (Value::DateTime(dt), "{0:yyyy-MM-dd}", "2022-05-16"),
        (Value::DateTime(dt), "{0:HH:mm}", "08:30"),
        (Value::Double(2.5), "{0:0.00}", "2.50"),
        (Value::Double(1234.5), "{0:G}", "1234.5"),
        (Value::Double(1234.5), "{0:E2}", "1.23E+003"),
        (Value::Double(0.5), "{0:P0}", "50 %"),
        (Value::Int(5), "{0:C}", "\u{a4}5.00"),
        (Value::Double(f64::INFINITY), "{0}", "Infinity"),
    ];

    for (value, template, expected) in cases {
        assert_eq!(
            ValidationHelper::get_string_formatted(&value, "", Some(template)).unwrap(),
            expected,
            "{template} with {value:?}"
        );
    }
}

#[test]
fn test_get_string_formatted_rejects_oversized_alignment() {
    let err = ValidationHelper::get_string_formatted(&Value::Int(1), "", Some("{0,5000000}")).unwrap_err();
    assert_eq!(err, LenientError::Format(FormatError::InvalidAlignment { position: 3 }));
}

#[test]
fn test_get_string_formatted_propagates_template_errors() {
    let err = ValidationHelper::get_string_formatted(&Value::Int(20), "", Some("Number is {0"))
        .unwrap_err();
    assert_eq!(err, LenientError::Format(FormatError::UnbalancedBrace { position: 10 }));
    assert_eq!(err.to_string(), "Format error: unbalanced brace at byte 10");
}

#[test]
fn test_is_boolean() {
    let cases: Vec<(Value, bool)> = vec![
        (Value::Null, false),
        (Value::Int(2), false),
        (Value::from("test"), false),
        (Value::Int(0), true),
        (Value::Int(1), true),
        (Value::from("false"), true),
        (Value::from("true"), true),
        (Value::Bool(true), true),
        (Value::Bool(false), true),
    ];

    for (value, expected) in cases {
        assert_eq!(ValidationHelper::is_boolean(&value), expected, "{value:?}");
    }
}

#[test]
fn test_is_date_time() {
    let cases: Vec<(Value, bool)> = vec![
        (Value::Int(i32::MIN), false),
        (Value::Int(i32::MAX), false),
        (Value::Long(i64::MIN), false),
        (Value::Long(i64::MAX), false),
        (Value::Double(f64::MIN), false),
        (Value::Double(f64::MAX), false),
        (Value::Decimal(Decimal::MIN), false),
        (Value::Decimal(Decimal::MAX), false),
        (Value::DateTime(NaiveDateTime::MIN), true),
        (Value::DateTime(NaiveDateTime::MAX), true),
        (Value::from("16/05/2022"), true),
        (Value::from("16 May 2022"), true),
        (Value::from("May 16, 2022"), true),
        (Value::from("Mon, 16 May 2022 08:30:00 GMT"), true),
        (Value::from("May 2022"), false),
    ];

    for (value, expected) in cases {
        assert_eq!(ValidationHelper::is_date_time(&value), expected, "{value:?}");
    }
}

#[test]
fn test_is_decimal() {
    let cases: Vec<(Value, bool)> = vec![
        (Value::Null, false),
        (Value::from("test"), false),
        (Value::Double(3.1415926535), true),
        (Value::Int(i32::MIN), true),
        (Value::Int(i32::MAX), true),
        (Value::Long(i64::MIN), true),
        (Value::Long(i64::MAX), true),
        (Value::Double(f64::MIN), false),
        (Value::Double(f64::MAX), false),
    ];

    for (value, expected) in cases {
        assert_eq!(ValidationHelper::is_decimal(&value), expected, "{value:?}");
    }
}

#[test]
fn test_is_double() {
    let cases: Vec<(Value, bool)> = vec![
        (Value::Null, false),
        (Value::from("test"), false),
        (Value::Double(3.1415926535), true),
        (Value::Int(i32::MIN), true),
        (Value::Int(i32::MAX), true),
        (Value::Long(i64::MIN), true),
        (Value::Long(i64::MAX), true),
        (Value::Double(f64::MIN), true),
        (Value::Double(f64::MAX), true),
    ];

    for (value, expected) in cases {
        assert_eq!(ValidationHelper::is_double(&value), expected, "{value:?}");
    }
}

#[test]
fn test_is_guid() {
    assert!(!ValidationHelper::is_guid(&Value::Null));
    assert!(!ValidationHelper::is_guid(&Value::from("test")));
    assert!(ValidationHelper::is_guid(&Value::from(GUID_TEXT)));

    // valid GUIDs in every other textual layout are rejected on length
    let simple = GUID_TEXT.replace('-', "");
    for text in [simple, format!("{{{GUID_TEXT}}}"), format!("urn:uuid:{GUID_TEXT}")] {
        assert!(Uuid::parse_str(&text).is_ok());
        assert!(!ValidationHelper::is_guid(&Value::from(text.as_str())), "{text}");
    }
}

#[test]
fn test_is_integer() {
    let cases: Vec<(Value, bool)> = vec![
        (Value::Null, false),
        (Value::from("test"), false),
        (Value::Double(3.1415926535), false),
        (Value::Int(i32::MIN), true),
        (Value::Int(i32::MAX), true),
        (Value::Long(i64::MIN), false),
        (Value::Long(i64::MAX), false),
        (Value::Double(f64::MIN), false),
        (Value::Double(f64::MAX), false),
    ];

    for (value, expected) in cases {
        assert_eq!(ValidationHelper::is_integer(&value), expected, "{value:?}");
    }
}

#[test]
fn test_is_long() {
    let cases: Vec<(Value, bool)> = vec![
        (Value::Null, false),
        (Value::from("test"), false),
        (Value::Double(3.1415926535), false),
        (Value::Int(i32::MIN), true),
        (Value::Int(i32::MAX), true),
        (Value::Long(i64::MIN), true),
        (Value::Long(i64::MAX), true),
        (Value::Double(f64::MIN), false),
        (Value::Double(f64::MAX), false),
    ];

    for (value, expected) in cases {
        assert_eq!(ValidationHelper::is_long(&value), expected, "{value:?}");
    }
}

#[test]
fn test_is_null() {
    assert!(!ValidationHelper::is_null(&Value::Int(1)));
    assert!(!ValidationHelper::is_null(&Value::from("test")));
    assert!(ValidationHelper::is_null(&Value::Null));
    assert!(ValidationHelper::is_null(&Value::DbNull));
}

#[test]
fn test_is_in_range_integer() {
    let cases = [
        (1, 10, 12, false),
        (10, 100, 120, false),
        (-200, 200, -300, false),
        (1, 10, 5, true),
        (10, 100, 50, true),
        (-200, 200, 100, true),
    ];

    for (min, max, value, expected) in cases {
        assert_eq!(ValidationHelper::is_in_range(min, max, value), expected);
    }
}

#[test]
fn test_is_in_range_double() {
    let cases = [
        (1.5, 2.5, 1.0, false),
        (100.25, 200.50, 50.50, false),
        (1.5, 2.5, 2.0, true),
        (100.25, 200.50, 200.25, true),
        (-1000.50, 2000.50, 1000.0, true),
        (-1000.50, 2000.50, -1000.0, true),
    ];

    for (min, max, value, expected) in cases {
        assert_eq!(ValidationHelper::is_in_range(min, max, value), expected);
    }
}

#[test]
fn test_is_in_range_decimal() {
    let d = |s: &str| Decimal::from_str(s).unwrap();
    let cases = [
        (d("1.5"), d("2.5"), d("1"), false),
        (d("100.25"), d("200.50"), d("50.50"), false),
        (d("1.5"), d("2.5"), d("2"), true),
        (d("100.25"), d("200.50"), d("200.25"), true),
        (d("-1000.50"), d("2000.50"), d("1000"), true),
        (Decimal::MIN, Decimal::MAX, d("100"), true),
    ];

    for (min, max, value, expected) in cases {
        assert_eq!(ValidationHelper::is_in_range(min, max, value), expected);
    }
}
