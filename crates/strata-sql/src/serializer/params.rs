use super::{Formatter, ToSql};

use strata_core::{stmt::Value, Result};

/// Collects bind values while a statement is serialized.
pub trait Params {
    fn push(&mut self, param: &Value) -> Placeholder;
}

/// 1-based position of a bind value, written as `$n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder(pub usize);

impl Params for Vec<Value> {
    fn push(&mut self, value: &Value) -> Placeholder {
        self.push(value.clone());
        Placeholder(self.len())
    }
}

impl ToSql for Placeholder {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        use std::fmt::Write;

        write!(f.dst, "${}", self.0).map_err(|err| strata_core::err!("{err}"))
    }
}

impl ToSql for &Value {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let placeholder = f.params.push(self);
        placeholder.to_sql(f)
    }
}
