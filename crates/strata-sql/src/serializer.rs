#[macro_use]
mod fmt;
use fmt::ToSql;

mod column;
use column::ColumnRef;

mod delim;
use delim::{Comma, Delimited};

mod filter;

mod ident;
use ident::Ident;

mod params;
pub use params::{Params, Placeholder};

mod statement;

use crate::stmt::{Filter, Statement};

use strata_core::{schema::Model, Result};

/// Serialize a statement to a SQL string
#[derive(Debug)]
pub struct Serializer<'a> {
    /// Model against which the statement is serialized
    model: &'a Model,
}

struct Formatter<'a, T> {
    /// Handle to the serializer
    serializer: &'a Serializer<'a>,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,
}

impl<'a> Serializer<'a> {
    pub fn new(model: &'a Model) -> Serializer<'a> {
        Serializer { model }
    }

    pub fn model(&self) -> &'a Model {
        self.model
    }

    /// Serializes a whole statement. Bind values are appended to `params` in
    /// the order their placeholders appear in the returned text.
    ///
    /// Filters must be resolved first; an `$async` branch still pending is
    /// reported as an unreachable filter.
    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> Result<String> {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
        };

        stmt.to_sql(&mut fmt)?;

        Ok(ret)
    }

    /// Compiles a single filter to a parenthesized boolean fragment.
    pub fn filter(&self, filter: &Filter, params: &mut impl Params) -> Result<String> {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
        };

        filter.to_sql(&mut fmt)?;

        Ok(ret)
    }

    fn table_name(&self) -> Ident<&'a str> {
        Ident(self.model.table_name())
    }

    /// Table-qualified reference to a logical column.
    fn column<'b>(&self, logical: &'b str) -> ColumnRef<'b>
    where
        'a: 'b,
    {
        ColumnRef {
            table: self.model.table_name(),
            column: self.model.physical_name(logical),
        }
    }

    /// Unqualified storage name of a logical column, as used in `SET` and
    /// `INSERT` column lists.
    fn column_name<'b>(&self, logical: &'b str) -> Ident<std::borrow::Cow<'b, str>>
    where
        'a: 'b,
    {
        Ident(self.model.physical_name(logical))
    }

    fn identifier(&self) -> ColumnRef<'a> {
        self.column(self.model.identifier())
    }
}
