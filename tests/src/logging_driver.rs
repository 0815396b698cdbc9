use crate::{ExecLog, Executed};

use std::{
    borrow::Cow,
    sync::{Arc, Mutex},
};
use strata::{driver::Response, Driver, Result, Value};
use strata_core::async_trait;

/// Wraps a driver and records every statement it executes.
#[derive(Debug)]
pub struct LoggingDriver {
    inner: Box<dyn Driver>,

    /// Statements executed through this driver, oldest first
    log: Arc<Mutex<Vec<Executed>>>,
}

impl LoggingDriver {
    pub fn new(driver: impl Driver) -> Self {
        Self {
            inner: Box::new(driver),
            log: Arc::new(Mutex::new(vec![])),
        }
    }

    /// Get a handle to inspect the statements log
    pub fn log(&self) -> ExecLog {
        ExecLog::new(self.log.clone())
    }
}

#[async_trait]
impl Driver for LoggingDriver {
    fn url(&self) -> Cow<'_, str> {
        self.inner.url()
    }

    async fn exec(&self, sql: &str, params: &[Value]) -> Result<Response> {
        let response = self.inner.exec(sql, params).await?;

        self.log
            .lock()
            .expect("Failed to acquire exec log lock")
            .push(Executed {
                sql: sql.to_string(),
                params: params.to_vec(),
                row_count: response.row_count,
            });

        Ok(response)
    }
}
