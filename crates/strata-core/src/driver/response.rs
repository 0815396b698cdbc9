use crate::stmt::Value;

use indexmap::IndexMap;

/// One result row, keyed by column name as reported by the database.
pub type Row = IndexMap<String, Value>;

#[derive(Debug, Default)]
pub struct Response {
    /// Rows produced by the statement. Empty for statements without a
    /// result set.
    pub rows: Vec<Row>,

    /// Number of rows returned or affected
    pub row_count: u64,
}

impl Response {
    /// A response for a statement that only affected rows.
    pub fn count(row_count: u64) -> Self {
        Self {
            rows: vec![],
            row_count,
        }
    }

    pub fn rows(rows: Vec<Row>) -> Self {
        Self {
            row_count: rows.len() as u64,
            rows,
        }
    }

    /// Takes the first row, if any.
    pub fn into_first(self) -> Option<Row> {
        self.rows.into_iter().next()
    }
}
