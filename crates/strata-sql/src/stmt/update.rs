use super::{Scope, Statement, Value};

use indexmap::IndexMap;

#[derive(Debug, Clone)]
pub struct Update {
    /// Logical column name -> new value, in `SET` order
    pub assignments: IndexMap<String, Value>,

    pub scope: Scope,
}

impl Statement {
    pub fn update(scope: Scope, assignments: IndexMap<String, Value>) -> Statement {
        Update { assignments, scope }.into()
    }
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Statement::Update(value)
    }
}
