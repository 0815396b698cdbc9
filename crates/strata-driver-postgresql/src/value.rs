use postgres_types::{accepts, private::BytesMut, to_sql_checked, IsNull, ToSql, Type};
use strata_core::stmt::Value as CoreValue;

type BoxError = Box<dyn std::error::Error + Sync + Send>;

/// Binds a core value, adapting numbers to the parameter type the server
/// inferred for the placeholder.
#[derive(Debug)]
pub struct Value<'a>(&'a CoreValue);

impl<'a> From<&'a CoreValue> for Value<'a> {
    fn from(value: &'a CoreValue) -> Self {
        Self(value)
    }
}

impl ToSql for Value<'_> {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError>
    where
        Self: Sized,
    {
        match self.0 {
            CoreValue::Null => Ok(IsNull::Yes),
            CoreValue::Bool(value) => match *ty {
                Type::BOOL => value.to_sql(ty, out),
                _ => Err(mismatch(self.0, ty)),
            },
            CoreValue::I64(value) => match *ty {
                Type::INT2 => i16::try_from(*value)?.to_sql(ty, out),
                Type::INT4 => i32::try_from(*value)?.to_sql(ty, out),
                Type::INT8 => value.to_sql(ty, out),
                Type::FLOAT4 => (*value as f32).to_sql(ty, out),
                Type::FLOAT8 => (*value as f64).to_sql(ty, out),
                Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME | Type::UNKNOWN => {
                    value.to_string().to_sql(ty, out)
                }
                _ => Err(mismatch(self.0, ty)),
            },
            CoreValue::F64(value) => match *ty {
                Type::FLOAT4 => (*value as f32).to_sql(ty, out),
                Type::FLOAT8 => value.to_sql(ty, out),
                _ => Err(mismatch(self.0, ty)),
            },
            CoreValue::String(value) => match *ty {
                Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME | Type::UNKNOWN => {
                    value.to_sql(ty, out)
                }
                _ => Err(mismatch(self.0, ty)),
            },
        }
    }

    accepts!(BOOL, INT2, INT4, INT8, FLOAT4, FLOAT8, TEXT, VARCHAR, BPCHAR, NAME, UNKNOWN);
    to_sql_checked!();
}

fn mismatch(value: &CoreValue, ty: &Type) -> BoxError {
    format!("cannot bind `{value}` to a parameter of type `{ty}`").into()
}
