mod builder;
pub use builder::Builder;

mod connect;

use crate::{Query, Result};

use indexmap::IndexMap;
use std::sync::Arc;
use strata_core::{
    driver::{Driver, Response},
    schema::Model,
    stmt::Value,
    Error,
};
use strata_sql::{Serializer, Statement};

/// A database handle: the execution collaborator plus the registered model
/// descriptors. Cloning is cheap and clones share both.
#[derive(Debug, Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    driver: Arc<dyn Driver>,

    /// Registered models, keyed by table name
    models: IndexMap<String, Arc<Model>>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.shared.driver
    }

    /// Starts a query over every row of a registered model.
    pub fn model(&self, table_name: &str) -> Result<Query> {
        let Some(model) = self.shared.models.get(table_name) else {
            return Err(Error::invalid_schema(format!(
                "no model registered for table `{table_name}`"
            )));
        };

        Ok(Query::new(self.clone(), model.clone()))
    }

    pub fn models(&self) -> impl ExactSizeIterator<Item = &Model> + '_ {
        self.shared.models.values().map(|model| &**model)
    }

    /// Serializes `stmt` against `model` and executes it. Filters in the
    /// statement must already be resolved.
    pub(crate) async fn exec(&self, model: &Model, stmt: &Statement) -> Result<Response> {
        let mut params = vec![];
        let sql = Serializer::new(model).serialize(stmt, &mut params)?;

        self.execute(&sql, &params).await
    }

    /// Hands caller-provided SQL straight to the driver.
    pub async fn execute(&self, sql: &str, params: &[Value]) -> Result<Response> {
        tracing::debug!(sql, params = params.len(), "executing statement");

        self.shared.driver.exec(sql, params).await
    }
}
