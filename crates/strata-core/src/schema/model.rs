use super::{logical_case, physical_case, Builder, Column};
use crate::{driver::Row, stmt::Value, Result};

use indexmap::IndexMap;
use std::{borrow::Cow, collections::HashMap};

/// Static, per-entity metadata: table, identifier and declared columns.
#[derive(Debug, Clone)]
pub struct Model {
    pub(super) table_name: String,
    pub(super) identifier: String,

    /// Declared columns, keyed by logical name, in declaration order
    pub(super) columns: IndexMap<String, Column>,

    /// Physical name -> logical name
    pub(super) by_storage_name: HashMap<String, String>,
}

impl Model {
    pub fn builder(table_name: impl Into<String>) -> Builder {
        Builder::new(table_name)
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Logical name of the identifying column.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Logical names of the declared columns.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.columns.keys().map(String::as_str)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Translates a logical column name to its storage name. Names that are
    /// not declared are translated mechanically.
    pub fn physical_name<'a>(&'a self, logical: &'a str) -> Cow<'a, str> {
        match self.columns.get(logical) {
            Some(column) => Cow::Borrowed(&column.storage_name),
            None => Cow::Owned(physical_case(logical)),
        }
    }

    /// Translates a storage column name back to its logical name.
    pub fn logical_name<'a>(&'a self, physical: &'a str) -> Cow<'a, str> {
        match self.by_storage_name.get(physical) {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(logical_case(physical)),
        }
    }

    /// Renames a storage row to logical names, coercing declared columns to
    /// their type.
    pub fn row_to_logical(&self, row: Row) -> Result<Row> {
        row.into_iter()
            .map(|(physical, value)| {
                let name = self.logical_name(&physical).into_owned();
                let value = match self.columns.get(&name) {
                    Some(column) => value.cast(column.ty)?,
                    None => value,
                };
                Ok((name, value))
            })
            .collect()
    }

    /// Materializes the attributes of one row: every declared column in
    /// declaration order, null when the row does not carry it.
    pub fn load_attributes(&self, row: Row) -> Result<IndexMap<String, Value>> {
        let mut row = self.row_to_logical(row)?;

        Ok(self
            .columns
            .keys()
            .map(|name| {
                let value = row.swap_remove(name).unwrap_or_default();
                (name.clone(), value)
            })
            .collect())
    }
}
