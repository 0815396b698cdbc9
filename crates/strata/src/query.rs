mod batch;

mod lookup;
pub use lookup::Lookup;

use crate::{Db, Record, Result};

use indexmap::IndexMap;
use std::sync::Arc;
use strata_core::{
    bail,
    driver::Row,
    err,
    schema::Model,
    stmt::{Filter, OrderBy, Scope, Type, Value},
    Error,
};
use strata_sql::Statement;

/// A model together with the scope it is currently refined to.
///
/// Refinements return a new query and never modify `self`. Terminal
/// operations resolve any deferred filter branches, serialize the scope and
/// run the statement through the database's driver.
#[derive(Debug, Clone)]
pub struct Query {
    db: Db,
    model: Arc<Model>,
    scope: Scope,
}

impl Query {
    pub(crate) fn new(db: Db, model: Arc<Model>) -> Query {
        Query::with_scope(db, model, Scope::new())
    }

    pub(crate) fn with_scope(db: Db, model: Arc<Model>, scope: Scope) -> Query {
        Query { db, model, scope }
    }

    pub fn db(&self) -> &Db {
        &self.db
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    fn refine(&self, scope: Scope) -> Query {
        Query::with_scope(self.db.clone(), self.model.clone(), scope)
    }

    pub fn limit_by(&self, amount: u64) -> Query {
        self.refine(self.scope.limit_by(amount))
    }

    pub fn unlimited(&self) -> Query {
        self.refine(self.scope.unlimited())
    }

    pub fn skip_by(&self, amount: u64) -> Query {
        self.refine(self.scope.skip_by(amount))
    }

    pub fn unskipped(&self) -> Query {
        self.refine(self.scope.unskipped())
    }

    pub fn order_by(&self, item: impl Into<OrderBy>) -> Query {
        self.refine(self.scope.order_by(item))
    }

    pub fn reorder(&self, item: impl Into<OrderBy>) -> Query {
        self.refine(self.scope.reorder(item))
    }

    pub fn unordered(&self) -> Query {
        self.refine(self.scope.unordered())
    }

    pub fn filter_by(&self, filter: Filter) -> Query {
        self.refine(self.scope.filter_by(filter))
    }

    pub fn unfiltered(&self) -> Query {
        self.refine(self.scope.unfiltered())
    }

    /// Narrows to rows whose `column` equals the lookup value, or is one of
    /// the lookup values when given a list.
    pub fn query_by(&self, column: &str, lookup: impl Into<Lookup>) -> Result<Query> {
        if !self.model.has_column(column) {
            return Err(Error::unknown_column(self.model.table_name(), column));
        }

        Ok(self.filter_by(lookup.into().into_filter(column)))
    }

    pub async fn all(&self) -> Result<Vec<Record>> {
        let scope = self.scope.resolve().await?;
        let response = self.db.exec(&self.model, &Statement::select(scope)).await?;

        response
            .rows
            .into_iter()
            .map(|row| Record::load(self.db.clone(), self.model.clone(), row))
            .collect()
    }

    pub async fn first(&self) -> Result<Option<Record>> {
        Ok(self.limit_by(1).all().await?.into_iter().next())
    }

    pub async fn find(&self, filter: Filter) -> Result<Option<Record>> {
        self.filter_by(filter).first().await
    }

    pub async fn find_by(&self, column: &str, lookup: impl Into<Lookup>) -> Result<Option<Record>> {
        self.query_by(column, lookup)?.first().await
    }

    /// Number of rows inside the current limit/skip window.
    pub async fn count(&self) -> Result<u64> {
        let scope = self.scope.resolve().await?;
        let response = self.db.exec(&self.model, &Statement::count(scope)).await?;

        let Some(row) = response.into_first() else {
            bail!("count on `{}` returned no rows", self.model.table_name());
        };

        let count = row.into_values().next().unwrap_or_default().to_i64()?;
        u64::try_from(count).map_err(|_| err!("count returned a negative value: {count}"))
    }

    /// Reads the listed columns. Rows are keyed by logical column name.
    pub async fn select<S: Into<String>>(
        &self,
        columns: impl IntoIterator<Item = S>,
    ) -> Result<Vec<Row>> {
        let scope = self.scope.resolve().await?;
        let stmt = Statement::select_columns(scope, columns);
        let response = self.db.exec(&self.model, &stmt).await?;

        response
            .rows
            .into_iter()
            .map(|row| self.model.row_to_logical(row))
            .collect()
    }

    pub async fn pluck(&self, column: &str) -> Result<Vec<Value>> {
        Ok(self
            .select([column])
            .await?
            .into_iter()
            .map(|row| row.into_values().next().unwrap_or_default())
            .collect())
    }

    /// Writes `attrs` to every row in scope and returns the affected row
    /// count. No statement is issued when `attrs` is empty.
    pub async fn update_all<K, V>(&self, attrs: impl IntoIterator<Item = (K, V)>) -> Result<u64>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let assignments = attributes(&self.model, attrs)?;
        if assignments.is_empty() {
            return Ok(0);
        }

        let scope = self.scope.resolve().await?;
        let response = self
            .db
            .exec(&self.model, &Statement::update(scope, assignments))
            .await?;

        Ok(response.row_count)
    }

    pub async fn delete_all(&self) -> Result<u64> {
        let scope = self.scope.resolve().await?;
        let response = self.db.exec(&self.model, &Statement::delete(scope)).await?;

        Ok(response.row_count)
    }

    /// Runs caller-provided SQL with `$1..$n` bindings. Result rows are
    /// keyed by logical column name.
    pub async fn execute<V: Into<Value>>(
        &self,
        sql: &str,
        bindings: impl IntoIterator<Item = V>,
    ) -> Result<Vec<Row>> {
        let params: Vec<Value> = bindings.into_iter().map(Into::into).collect();
        let response = self.db.execute(sql, &params).await?;

        response
            .rows
            .into_iter()
            .map(|row| self.model.row_to_logical(row))
            .collect()
    }

    /// An unsaved record carrying `attrs`.
    pub fn build<K, V>(&self, attrs: impl IntoIterator<Item = (K, V)>) -> Result<Record>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let mut record = Record::new(self.db.clone(), self.model.clone());
        record.assign(attrs)?;
        Ok(record)
    }

    pub async fn create<K, V>(&self, attrs: impl IntoIterator<Item = (K, V)>) -> Result<Record>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let mut record = self.build(attrs)?;
        record.save().await?;
        Ok(record)
    }
}

/// Collects attribute assignments, rejecting columns the model does not
/// declare and values that do not fit the column type.
pub(crate) fn attributes<K, V>(
    model: &Model,
    attrs: impl IntoIterator<Item = (K, V)>,
) -> Result<IndexMap<String, Value>>
where
    K: Into<String>,
    V: Into<Value>,
{
    attrs
        .into_iter()
        .map(|(column, value)| {
            let column = column.into();
            let value = attribute(model, &column, value.into())?;
            Ok((column, value))
        })
        .collect()
}

/// Checks one attribute value against its declared column.
pub(crate) fn attribute(model: &Model, column: &str, value: Value) -> Result<Value> {
    let Some(column) = model.column(column) else {
        return Err(Error::unknown_column(model.table_name(), column));
    };

    match (column.ty, value) {
        (ty, value) if value.is_a(ty) => Ok(value),
        // Integers widen into floating point columns
        (Type::F64, Value::I64(v)) => Ok(Value::F64(v as f64)),
        (ty, value) => Err(Error::type_conversion(value, ty.name())),
    }
}
