//! Reading and binding [`Value`]s through rusqlite.
//!
//! SQL `NULL` maps to [`Value::DbNull`], so a missing column value is
//! distinguishable from an absent Rust value.
use rusqlite::ToSql;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};

use crate::types::UuidHandler;
use crate::types::datetime_utils::format_datetime;
use crate::value::Value;

impl FromSql for Value {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Null => Ok(Value::DbNull),
            ValueRef::Integer(i) => Ok(Value::Long(i)),
            ValueRef::Real(f) => Ok(Value::Double(f)),
            ValueRef::Text(bytes) => std::str::from_utf8(bytes)
                .map(|s| Value::Text(s.to_string()))
                .map_err(|e| FromSqlError::Other(Box::new(e))),
            // 16-byte blobs are how UUID columns are stored
            ValueRef::Blob(bytes) if bytes.len() == 16 => UuidHandler::bytes_to_uuid(bytes)
                .map(Value::Guid)
                .map_err(|e| FromSqlError::Other(Box::new(e))),
            ValueRef::Blob(bytes) => Ok(Value::Other(hex::encode(bytes))),
        }
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        use rusqlite::types::Value as SqlValue;

        let output = match self {
            Value::Null | Value::DbNull => ToSqlOutput::Owned(SqlValue::Null),
            Value::Bool(b) => ToSqlOutput::Owned(SqlValue::Integer(i64::from(*b))),
            Value::Int(i) => ToSqlOutput::Owned(SqlValue::Integer(i64::from(*i))),
            Value::Long(l) => ToSqlOutput::Owned(SqlValue::Integer(*l)),
            Value::Double(d) => ToSqlOutput::Owned(SqlValue::Real(*d)),
            Value::Decimal(d) => ToSqlOutput::Owned(SqlValue::Text(d.to_string())),
            Value::Text(s) | Value::Other(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Value::DateTime(dt) => ToSqlOutput::Owned(SqlValue::Text(format_datetime(dt))),
            Value::Guid(g) => ToSqlOutput::Owned(SqlValue::Blob(g.as_bytes().to_vec())),
        };
        Ok(output)
    }
}
