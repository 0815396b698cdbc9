use super::{Scope, Statement};

/// Which columns a SELECT returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Columns {
    /// Every declared column of the model
    All,

    /// The listed logical column names, in order
    List(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct Select {
    pub columns: Columns,
    pub scope: Scope,
}

impl Statement {
    /// `SELECT` every declared column of the rows in `scope`.
    pub fn select(scope: Scope) -> Statement {
        Select {
            columns: Columns::All,
            scope,
        }
        .into()
    }

    /// `SELECT` the listed logical columns of the rows in `scope`.
    pub fn select_columns<S: Into<String>>(
        scope: Scope,
        columns: impl IntoIterator<Item = S>,
    ) -> Statement {
        Select {
            columns: Columns::List(columns.into_iter().map(Into::into).collect()),
            scope,
        }
        .into()
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Statement::Select(value)
    }
}
