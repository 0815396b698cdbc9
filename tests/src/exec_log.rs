use std::sync::{Arc, Mutex};
use strata::Value;

/// One statement as it reached the database.
#[derive(Debug, Clone, PartialEq)]
pub struct Executed {
    pub sql: String,
    pub params: Vec<Value>,
    pub row_count: u64,
}

/// A handle on the statements recorded by a [`LoggingDriver`](crate::LoggingDriver).
#[derive(Debug, Clone)]
pub struct ExecLog {
    statements: Arc<Mutex<Vec<Executed>>>,
}

impl ExecLog {
    pub(crate) fn new(statements: Arc<Mutex<Vec<Executed>>>) -> Self {
        Self { statements }
    }

    pub fn len(&self) -> usize {
        self.statements.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.lock().unwrap().is_empty()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.statements.lock().unwrap().clear();
    }

    /// Remove and return the oldest statement, panicking when none is left.
    #[track_caller]
    pub fn pop(&self) -> Executed {
        let mut statements = self.statements.lock().unwrap();
        assert!(!statements.is_empty(), "no statement was executed");
        statements.remove(0)
    }

    /// SQL text of every recorded statement.
    pub fn sql(&self) -> Vec<String> {
        self.statements
            .lock()
            .unwrap()
            .iter()
            .map(|executed| executed.sql.clone())
            .collect()
    }
}
