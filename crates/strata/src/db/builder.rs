use super::{connect, Db, Shared};
use crate::Result;

use indexmap::IndexMap;
use std::sync::Arc;
use strata_core::{driver::Driver, schema::Model, Error};

#[derive(Debug, Default)]
pub struct Builder {
    models: Vec<Model>,
}

impl Builder {
    pub fn register(&mut self, model: Model) -> &mut Self {
        self.models.push(model);
        self
    }

    /// Connects to the database named by `url`. The scheme selects the
    /// driver: `sqlite:` or `postgresql:`, each behind the feature of the
    /// same name.
    pub async fn connect(&mut self, url: &str) -> Result<Db> {
        let driver = connect::connect(url).await?;
        self.build_with(driver)
    }

    pub fn build(&mut self, driver: impl Driver) -> Result<Db> {
        self.build_with(Arc::new(driver))
    }

    fn build_with(&mut self, driver: Arc<dyn Driver>) -> Result<Db> {
        let mut models = IndexMap::with_capacity(self.models.len());

        for model in self.models.drain(..) {
            let table_name = model.table_name().to_string();

            if models.contains_key(&table_name) {
                return Err(Error::invalid_schema(format!(
                    "table `{table_name}` registered twice"
                )));
            }

            models.insert(table_name, Arc::new(model));
        }

        tracing::debug!(url = %driver.url(), models = models.len(), "database ready");

        Ok(Db {
            shared: Arc::new(Shared { driver, models }),
        })
    }
}
