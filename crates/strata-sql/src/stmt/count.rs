use super::{Scope, Statement};

/// Counts the rows inside a scope's window, returned as column `count`.
#[derive(Debug, Clone)]
pub struct Count {
    pub scope: Scope,
}

impl Statement {
    pub fn count(scope: Scope) -> Statement {
        Count { scope }.into()
    }
}

impl From<Count> for Statement {
    fn from(value: Count) -> Self {
        Statement::Count(value)
    }
}
