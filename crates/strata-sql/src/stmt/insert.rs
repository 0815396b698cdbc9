use super::{Statement, Value};

use indexmap::IndexMap;

/// Inserts one row and returns its identifier.
#[derive(Debug, Clone)]
pub struct Insert {
    /// Logical column name -> value. An empty map inserts `DEFAULT VALUES`.
    pub values: IndexMap<String, Value>,
}

impl Statement {
    pub fn insert(values: IndexMap<String, Value>) -> Statement {
        Insert { values }.into()
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Statement::Insert(value)
    }
}
