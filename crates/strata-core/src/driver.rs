mod response;
pub use response::{Response, Row};

use crate::{async_trait, stmt::Value};

use std::{borrow::Cow, fmt::Debug};

/// The execution collaborator: runs one SQL statement with positional bind
/// values and returns the produced rows.
///
/// Statement text uses `$1, $2, ..` placeholders referring to `params` in
/// order. Failures are reported as
/// [`Error::driver_operation_failed`](crate::Error::driver_operation_failed)
/// and are never retried by the caller.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Describes where the driver connects to, for diagnostics.
    fn url(&self) -> Cow<'_, str>;

    /// Execute a statement
    async fn exec(&self, sql: &str, params: &[Value]) -> crate::Result<Response>;
}
