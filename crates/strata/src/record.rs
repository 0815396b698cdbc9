use crate::{
    query::{attribute, attributes},
    Db, Query, Result,
};

use indexmap::IndexMap;
use std::sync::Arc;
use strata_core::{
    bail,
    driver::Row,
    schema::Model,
    stmt::{Filter, Scope, Value},
    Error,
};
use strata_sql::Statement;

/// One attribute's persisted and current value.
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    pub before: Value,
    pub after: Value,
}

/// An in-memory row of a model.
///
/// A record keeps the current value of every declared column next to the
/// values last confirmed by the database (the persisted shadow). Changes
/// are always derived by comparing the two.
#[derive(Debug, Clone)]
pub struct Record {
    db: Db,
    model: Arc<Model>,
    attributes: IndexMap<String, Value>,
    persisted: IndexMap<String, Value>,
}

impl Record {
    /// A new, unsaved record with every column null.
    pub(crate) fn new(db: Db, model: Arc<Model>) -> Record {
        let attributes: IndexMap<_, _> = model
            .keys()
            .map(|name| (name.to_string(), Value::Null))
            .collect();

        Record {
            db,
            model,
            persisted: attributes.clone(),
            attributes,
        }
    }

    /// Materializes a record from a storage row.
    pub(crate) fn load(db: Db, model: Arc<Model>, row: Row) -> Result<Record> {
        let attributes = model.load_attributes(row)?;

        Ok(Record {
            db,
            model,
            persisted: attributes.clone(),
            attributes,
        })
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Current values of all declared columns, in declaration order.
    pub fn attributes(&self) -> &IndexMap<String, Value> {
        &self.attributes
    }

    pub fn get(&self, column: &str) -> Result<&Value> {
        self.attributes
            .get(column)
            .ok_or_else(|| Error::unknown_column(self.model.table_name(), column))
    }

    pub fn set(&mut self, column: &str, value: impl Into<Value>) -> Result<()> {
        let value = attribute(&self.model, column, value.into())?;
        self.attributes.insert(column.to_string(), value);
        Ok(())
    }

    /// Value of the identifying column.
    pub fn id(&self) -> &Value {
        self.attributes
            .get(self.model.identifier())
            .unwrap_or(&Value::Null)
    }

    /// Returns `true` while the identifier is unset.
    pub fn is_new(&self) -> bool {
        self.id().is_null()
    }

    pub fn is_persistent(&self) -> bool {
        !self.is_new()
    }

    pub fn is_changed(&self) -> bool {
        self.diff().next().is_some()
    }

    /// `before`/`after` of every column that differs from the persisted
    /// shadow.
    pub fn changes(&self) -> IndexMap<String, Change> {
        self.diff()
            .map(|(name, before, after)| {
                let change = Change {
                    before: before.clone(),
                    after: after.clone(),
                };
                (name.to_string(), change)
            })
            .collect()
    }

    /// The changed columns with their current value.
    pub fn change_set(&self) -> IndexMap<String, Value> {
        self.diff()
            .map(|(name, _, after)| (name.to_string(), after.clone()))
            .collect()
    }

    fn diff(&self) -> impl Iterator<Item = (&str, &Value, &Value)> + '_ {
        self.attributes.iter().filter_map(|(name, after)| {
            let before = self.persisted.get(name).unwrap_or(&Value::Null);
            (before != after).then_some((name.as_str(), before, after))
        })
    }

    /// Sets several attributes. Nothing is assigned when any column is not
    /// declared. The persisted shadow is left untouched.
    pub fn assign<K, V>(&mut self, attrs: impl IntoIterator<Item = (K, V)>) -> Result<()>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let attrs = attributes(&self.model, attrs)?;
        self.attributes.extend(attrs);
        Ok(())
    }

    pub fn revert_change(&mut self, column: &str) -> Result<()> {
        let persisted = self.persisted.get(column).cloned().unwrap_or_default();
        self.set(column, persisted)
    }

    pub fn revert_changes(&mut self) {
        self.attributes.clone_from(&self.persisted);
    }

    /// The identifier the database knows this record by. Differs from
    /// [`id`](Record::id) while an edited identifier is unsaved.
    fn persisted_id(&self) -> &Value {
        match self.persisted.get(self.model.identifier()) {
            Some(id) if !id.is_null() => id,
            _ => self.id(),
        }
    }

    /// The scope selecting this record's row by its persisted identifier.
    pub fn query(&self) -> Query {
        let id = self.persisted_id().clone();
        let scope = Scope::new().filter_by(Filter::eq(self.model.identifier(), id));
        Query::with_scope(self.db.clone(), self.model.clone(), scope)
    }

    /// Inserts a new record or writes the changed columns of a persisted
    /// one. A persisted record without changes issues no statement.
    pub async fn save(&mut self) -> Result<()> {
        if self.is_new() {
            self.insert().await
        } else {
            self.update().await
        }
    }

    async fn insert(&mut self) -> Result<()> {
        let values = self
            .attributes
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        let model = self.model.clone();
        let response = self.db.exec(&model, &Statement::insert(values)).await?;

        let Some(row) = response.into_first() else {
            bail!("insert into `{}` returned no identifier", model.table_name());
        };

        let mut row = model.row_to_logical(row)?;
        let id = row.swap_remove(model.identifier()).unwrap_or_default();
        self.set(model.identifier(), id)?;

        self.persisted = self.attributes.clone();
        Ok(())
    }

    async fn update(&mut self) -> Result<()> {
        let change_set = self.change_set();
        if change_set.is_empty() {
            return Ok(());
        }

        let scope = self.query().scope().clone();
        self.db
            .exec(&self.model, &Statement::update(scope, change_set))
            .await?;

        self.persisted = self.attributes.clone();
        Ok(())
    }

    /// Deletes the row and clears the identifier. Deleting a new record is a
    /// no-op.
    pub async fn delete(&mut self) -> Result<()> {
        if self.is_new() {
            return Ok(());
        }

        let model = self.model.clone();
        let scope = self.query().scope().clone();
        self.db.exec(&model, &Statement::delete(scope)).await?;

        self.set(model.identifier(), Value::Null)?;
        self.persisted = self.attributes.clone();
        Ok(())
    }

    /// Re-reads the record from the database, discarding unsaved changes.
    pub async fn reload(&mut self) -> Result<()> {
        if self.is_new() {
            bail!("cannot reload an unsaved `{}` record", self.model.table_name());
        }

        let Some(fresh) = self.query().first().await? else {
            bail!(
                "`{}` record with identifier {} no longer exists",
                self.model.table_name(),
                self.id()
            );
        };

        self.attributes = fresh.attributes;
        self.persisted = fresh.persisted;
        Ok(())
    }
}
