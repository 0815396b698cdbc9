use rusqlite::types::{FromSqlError, ToSql, ToSqlOutput, Value as SqlValue, ValueRef};
use strata_core::{stmt::Value as CoreValue, Error, Result};

#[derive(Debug)]
pub struct Value<'a>(&'a CoreValue);

impl<'a> From<&'a CoreValue> for Value<'a> {
    fn from(value: &'a CoreValue) -> Self {
        Self(value)
    }
}

/// Converts a column of a result row. Booleans come back as integers and
/// are coerced by the model, not here.
pub(crate) fn from_sql(value: ValueRef<'_>) -> Result<CoreValue> {
    Ok(match value {
        ValueRef::Null => CoreValue::Null,
        ValueRef::Integer(value) => CoreValue::I64(value),
        ValueRef::Real(value) => CoreValue::F64(value),
        ValueRef::Text(value) => CoreValue::String(
            std::str::from_utf8(value)
                .map_err(Error::driver_operation_failed)?
                .to_string(),
        ),
        ValueRef::Blob(_) => {
            return Err(Error::driver_operation_failed(FromSqlError::InvalidType));
        }
    })
}

impl ToSql for Value<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self.0 {
            CoreValue::Bool(true) => Ok(ToSqlOutput::Owned(SqlValue::Integer(1))),
            CoreValue::Bool(false) => Ok(ToSqlOutput::Owned(SqlValue::Integer(0))),
            CoreValue::I64(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v))),
            CoreValue::F64(v) => Ok(ToSqlOutput::Owned(SqlValue::Real(*v))),
            CoreValue::String(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes()))),
            CoreValue::Null => Ok(ToSqlOutput::Owned(SqlValue::Null)),
        }
    }
}
