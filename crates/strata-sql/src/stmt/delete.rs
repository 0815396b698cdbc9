use super::{Scope, Statement};

#[derive(Debug, Clone)]
pub struct Delete {
    pub scope: Scope,
}

impl Statement {
    pub fn delete(scope: Scope) -> Statement {
        Delete { scope }.into()
    }
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Statement::Delete(value)
    }
}
