use super::{Formatter, Ident, Params, ToSql};

use std::borrow::Cow;
use strata_core::Result;

/// `"table"."column"`
pub(super) struct ColumnRef<'a> {
    pub(super) table: &'a str,
    pub(super) column: Cow<'a, str>,
}

impl ToSql for &ColumnRef<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        fmt!(f, Ident(self.table) "." Ident(&*self.column));
        Ok(())
    }
}

impl ToSql for ColumnRef<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        (&self).to_sql(f)
    }
}
