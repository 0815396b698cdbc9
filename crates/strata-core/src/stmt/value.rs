use super::Type;
use crate::{Error, Result};

/// A literal that travels to the database as a bind value.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// 64-bit floating point number
    F64(f64),

    /// Signed 64-bit integer
    I64(i64),

    /// Null value
    #[default]
    Null,

    /// String value
    String(String),
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn to_bool(self) -> Result<bool> {
        match self {
            Self::Bool(v) => Ok(v),
            _ => Err(Error::type_conversion(self, "bool")),
        }
    }

    /// Converts to `i64`. Integral floats and numeric strings are accepted
    /// since drivers report `COUNT(..)` with differing types.
    pub fn to_i64(self) -> Result<i64> {
        match self {
            Self::I64(v) => Ok(v),
            Self::F64(v) if v.fract() == 0.0 => Ok(v as i64),
            Self::String(ref v) => v
                .parse()
                .map_err(|_| Error::type_conversion(self.clone(), "i64")),
            _ => Err(Error::type_conversion(self, "i64")),
        }
    }

    pub fn to_f64(self) -> Result<f64> {
        match self {
            Self::F64(v) => Ok(v),
            Self::I64(v) => Ok(v as f64),
            _ => Err(Error::type_conversion(self, "f64")),
        }
    }

    pub fn into_string(self) -> Result<String> {
        match self {
            Self::String(v) => Ok(v),
            _ => Err(Error::type_conversion(self, "String")),
        }
    }

    /// Coerces a value read from storage into the declared column type.
    ///
    /// Storage engines without a native boolean report `0`/`1`, and integer
    /// literals may come back for floating point columns.
    pub fn cast(self, ty: Type) -> Result<Value> {
        match (ty, self) {
            (_, Value::Null) => Ok(Value::Null),
            (Type::Bool, Value::Bool(v)) => Ok(Value::Bool(v)),
            (Type::Bool, Value::I64(v)) => Ok(Value::Bool(v != 0)),
            (Type::I64, Value::I64(v)) => Ok(Value::I64(v)),
            (Type::F64, Value::F64(v)) => Ok(Value::F64(v)),
            (Type::F64, Value::I64(v)) => Ok(Value::F64(v as f64)),
            (Type::String, Value::String(v)) => Ok(Value::String(v)),
            (ty, value) => Err(Error::type_conversion(value, ty.name())),
        }
    }

    pub fn is_a(&self, ty: Type) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(_) => ty == Type::Bool,
            Self::F64(_) => ty == Type::F64,
            Self::I64(_) => ty == Type::I64,
            Self::String(_) => ty == Type::String,
        }
    }

    pub(crate) fn variant_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "Bool",
            Self::F64(_) => "F64",
            Self::I64(_) => "I64",
            Self::Null => "Null",
            Self::String(_) => "String",
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I64(src.into())
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<u32> for Value {
    fn from(src: u32) -> Self {
        Self::I64(src.into())
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&String> for Value {
    fn from(src: &String) -> Self {
        Self::String(src.clone())
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl<T> From<Option<T>> for Value
where
    Value: From<T>,
{
    fn from(src: Option<T>) -> Self {
        match src {
            Some(value) => Value::from(value),
            None => Value::Null,
        }
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = Error;

    fn try_from(src: serde_json::Value) -> Result<Value> {
        use serde_json::Value as Json;

        match src {
            Json::Null => Ok(Value::Null),
            Json::Bool(v) => Ok(Value::Bool(v)),
            Json::Number(n) => match n.as_i64() {
                Some(v) => Ok(Value::I64(v)),
                None => n
                    .as_f64()
                    .map(Value::F64)
                    .ok_or_else(|| Error::malformed_filter(format!("number {n} out of range"))),
            },
            Json::String(v) => Ok(Value::String(v)),
            other => Err(Error::malformed_filter(format!(
                "expected a scalar value; got `{other}`"
            ))),
        }
    }
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::Null => f.write_str("NULL"),
            Self::String(v) => write!(f, "{v:?}"),
        }
    }
}
