use super::{physical_case, Column, Model};
use crate::{stmt::Type, Error, Result};

use indexmap::IndexMap;
use std::collections::HashMap;

/// Declares a model once: table, identifier, ordered columns and any
/// physical-name overrides.
#[derive(Debug)]
pub struct Builder {
    table_name: String,
    identifier: String,
    columns: Vec<(String, Type)>,
    storage_names: HashMap<String, String>,
}

impl Builder {
    pub(super) fn new(table_name: impl Into<String>) -> Builder {
        Builder {
            table_name: table_name.into(),
            identifier: "id".to_string(),
            columns: vec![],
            storage_names: HashMap::new(),
        }
    }

    /// Sets the identifying column. Defaults to `id`.
    pub fn identifier(&mut self, name: impl Into<String>) -> &mut Self {
        self.identifier = name.into();
        self
    }

    pub fn column(&mut self, name: impl Into<String>, ty: Type) -> &mut Self {
        self.columns.push((name.into(), ty));
        self
    }

    /// Overrides the physical name of a column instead of deriving it from
    /// the logical name.
    pub fn column_name(
        &mut self,
        logical: impl Into<String>,
        physical: impl Into<String>,
    ) -> &mut Self {
        self.storage_names.insert(logical.into(), physical.into());
        self
    }

    pub fn build(&self) -> Result<Model> {
        if self.table_name.is_empty() {
            return Err(Error::invalid_schema("table name is empty"));
        }

        let mut columns = IndexMap::with_capacity(self.columns.len());
        let mut by_storage_name = HashMap::with_capacity(self.columns.len());

        for (name, ty) in &self.columns {
            let storage_name = self
                .storage_names
                .get(name)
                .cloned()
                .unwrap_or_else(|| physical_case(name));

            if by_storage_name
                .insert(storage_name.clone(), name.clone())
                .is_some()
            {
                return Err(Error::invalid_schema(format!(
                    "column `{storage_name}` declared twice on `{}`",
                    self.table_name
                )));
            }

            let column = Column {
                name: name.clone(),
                storage_name,
                ty: *ty,
            };

            if columns.insert(name.clone(), column).is_some() {
                return Err(Error::invalid_schema(format!(
                    "column `{name}` declared twice on `{}`",
                    self.table_name
                )));
            }
        }

        if let Some(name) = self
            .storage_names
            .keys()
            .find(|name| !columns.contains_key(*name))
        {
            return Err(Error::invalid_schema(format!(
                "column name override for undeclared column `{name}` on `{}`",
                self.table_name
            )));
        }

        if !columns.contains_key(&self.identifier) {
            return Err(Error::invalid_schema(format!(
                "identifier `{}` is not a column of `{}`",
                self.identifier, self.table_name
            )));
        }

        Ok(Model {
            table_name: self.table_name.clone(),
            identifier: self.identifier.clone(),
            columns,
            by_storage_name,
        })
    }
}
