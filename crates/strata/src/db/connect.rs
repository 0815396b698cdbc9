use crate::Result;

use std::sync::Arc;
use strata_core::{driver::Driver, Error};
use url::Url;

/// Picks the driver for a connection URL by its scheme.
pub(super) async fn connect(url: &str) -> Result<Arc<dyn Driver>> {
    let parsed = Url::parse(url)
        .map_err(|err| Error::invalid_connection_url(format!("{err}; url={url}")))?;

    match parsed.scheme() {
        "postgresql" | "postgres" => connect_postgresql(url).await,
        "sqlite" => connect_sqlite(url),
        scheme => Err(Error::invalid_connection_url(format!(
            "unsupported database; scheme={scheme}; url={url}"
        ))),
    }
}

#[cfg(feature = "postgresql")]
async fn connect_postgresql(url: &str) -> Result<Arc<dyn Driver>> {
    let driver = strata_driver_postgresql::PostgreSQL::connect(url).await?;
    Ok(Arc::new(driver))
}

#[cfg(not(feature = "postgresql"))]
async fn connect_postgresql(_url: &str) -> Result<Arc<dyn Driver>> {
    Err(Error::invalid_connection_url("`postgresql` feature not enabled"))
}

#[cfg(feature = "sqlite")]
fn connect_sqlite(url: &str) -> Result<Arc<dyn Driver>> {
    let driver = strata_driver_sqlite::Sqlite::connect(url)?;
    Ok(Arc::new(driver))
}

#[cfg(not(feature = "sqlite"))]
fn connect_sqlite(_url: &str) -> Result<Arc<dyn Driver>> {
    Err(Error::invalid_connection_url("`sqlite` feature not enabled"))
}
