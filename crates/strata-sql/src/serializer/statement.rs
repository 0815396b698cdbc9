use super::{ColumnRef, Comma, Formatter, Ident, Params, Serializer, ToSql};

use crate::stmt::{Columns, Count, Delete, Filter, Insert, Scope, Select, Statement, Update, Value};

use std::borrow::Cow;
use strata_core::{bail, stmt::OrderBy, Result};

/// Largest LIMIT or OFFSET; SQL integers are signed 64-bit. Also written as
/// the limit of a skip without one, since `OFFSET` alone is rejected by some
/// engines.
const MAX_WINDOW: u64 = i64::MAX as u64;

impl ToSql for &Statement {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        match self {
            Statement::Count(stmt) => stmt.to_sql(f),
            Statement::Delete(stmt) => stmt.to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Select(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &Select {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let serializer = f.serializer;
        let columns: Vec<ColumnRef<'_>> = match &self.columns {
            Columns::All => serializer
                .model()
                .keys()
                .map(|name| serializer.column(name))
                .collect(),
            Columns::List(names) => names.iter().map(|name| serializer.column(name)).collect(),
        };

        fmt!(f, "SELECT " Comma(columns) Rows(&self.scope));
        Ok(())
    }
}

impl ToSql for &Count {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let serializer = f.serializer;

        if self.scope.is_bounded() {
            // The window applies to the rows, not to the single count row
            let identifier = serializer.identifier();
            fmt!(
                f, "SELECT COUNT(*) AS \"count\" FROM (SELECT " identifier Rows(&self.scope) ") AS \"window\""
            );
        } else {
            let table_name = serializer.table_name();
            fmt!(f, "SELECT COUNT(*) AS \"count\" FROM " table_name Where(self.scope.filter()));
        }

        Ok(())
    }
}

impl ToSql for &Update {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        if self.assignments.is_empty() {
            bail!("UPDATE requires at least one assignment");
        }

        let serializer = f.serializer;
        let table_name = serializer.table_name();
        let assignments = self.assignments.iter().map(|(column, value)| Assignment {
            column: serializer.column_name(column),
            value,
        });

        fmt!(f, "UPDATE " table_name " SET " Comma(assignments) Target(&self.scope));
        Ok(())
    }
}

impl ToSql for &Delete {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let table_name = f.serializer.table_name();

        fmt!(f, "DELETE FROM " table_name Target(&self.scope));
        Ok(())
    }
}

impl ToSql for &Insert {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let serializer = f.serializer;
        let table_name = serializer.table_name();
        let identifier = serializer.column_name(serializer.model().identifier());

        fmt!(f, "INSERT INTO " table_name);

        if self.values.is_empty() {
            fmt!(f, " DEFAULT VALUES");
        } else {
            let columns = self.values.keys().map(|name| serializer.column_name(name));
            let values = self.values.values();
            fmt!(f, " (" Comma(columns) ") VALUES (" Comma(values) ")");
        }

        fmt!(f, " RETURNING " identifier);
        Ok(())
    }
}

struct Assignment<'a> {
    column: Ident<Cow<'a, str>>,
    value: &'a Value,
}

impl ToSql for Assignment<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        fmt!(f, self.column " = " self.value);
        Ok(())
    }
}

/// ` FROM "table"` followed by the scope's filter, ordering and window.
struct Rows<'a>(&'a Scope);

impl ToSql for Rows<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let table_name = f.serializer.table_name();
        let scope = self.0;

        fmt!(f, " FROM " table_name Where(scope.filter()) Order(scope.order()) Window(scope));
        Ok(())
    }
}

/// The `WHERE` clause of an `UPDATE` or `DELETE`. A bounded scope is
/// narrowed through a sub-select of identifiers since neither statement
/// takes `LIMIT` portably.
struct Target<'a>(&'a Scope);

impl ToSql for Target<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let scope = self.0;

        if !scope.is_bounded() {
            return Where(scope.filter()).to_sql(f);
        }

        let identifier = &f.serializer.identifier();
        fmt!(f, " WHERE " identifier " IN (SELECT " identifier Rows(scope) ")");
        Ok(())
    }
}

struct Where<'a>(&'a Filter);

impl ToSql for Where<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        // An unfiltered scope has no clause at all
        if self.0.is_all() {
            return Ok(());
        }

        fmt!(f, " WHERE " self.0);
        Ok(())
    }
}

struct Order<'a>(&'a [OrderBy]);

impl ToSql for Order<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        if self.0.is_empty() {
            return Ok(());
        }

        fmt!(f, " ORDER BY " Comma(self.0));
        Ok(())
    }
}

impl ToSql for &OrderBy {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let serializer = f.serializer;
        let column = serializer.column(&self.column);
        fmt!(f, column " " self.direction.as_sql());
        Ok(())
    }
}

struct Window<'a>(&'a Scope);

impl ToSql for Window<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let limit = match (self.0.limit(), self.0.skip()) {
            (Some(limit), _) => Some(limit.min(MAX_WINDOW)),
            (None, Some(_)) => Some(MAX_WINDOW),
            (None, None) => None,
        };
        let skip = self.0.skip().map(|skip| skip.min(MAX_WINDOW));

        fmt!(f, limit.map(|limit| (" LIMIT ", limit)) skip.map(|skip| (" OFFSET ", skip)));
        Ok(())
    }
}
