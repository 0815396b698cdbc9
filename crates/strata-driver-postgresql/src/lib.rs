mod value;
use value::Value;

use postgres_types::{ToSql, Type};
use std::borrow::Cow;
use strata_core::{
    async_trait, bail,
    driver::{Driver, Response},
    stmt::Value as CoreValue,
    Error, Result,
};
use tokio_postgres::{Client, Config, NoTls, Row};
use url::Url;

#[derive(Debug)]
pub struct PostgreSQL {
    /// The PostgreSQL client.
    client: Client,

    /// Connection URL with the password redacted
    url: String,
}

impl PostgreSQL {
    /// Connects to a PostgreSQL database using a connection string.
    pub async fn connect(url: &str) -> Result<Self> {
        let mut url = Url::parse(url)
            .map_err(|err| Error::invalid_connection_url(format!("{err}; url={url}")))?;

        if !matches!(url.scheme(), "postgresql" | "postgres") {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `postgresql` scheme; url={url}"
            )));
        }

        let Some(host) = url.host_str() else {
            return Err(Error::invalid_connection_url(format!(
                "missing host in connection URL; url={url}"
            )));
        };

        let dbname = url.path().trim_start_matches('/');
        if dbname.is_empty() {
            return Err(Error::invalid_connection_url(format!(
                "no database specified - missing path in connection URL; url={url}"
            )));
        }

        let mut config = Config::new();
        config.host(host);
        config.dbname(dbname);

        if let Some(port) = url.port() {
            config.port(port);
        }

        if !url.username().is_empty() {
            config.user(url.username());
        }

        if let Some(password) = url.password() {
            config.password(password);
            // Never kept around in diagnostics
            let _ = url.set_password(Some("****"));
        }

        let (client, connection) = config
            .connect(NoTls)
            .await
            .map_err(Error::driver_operation_failed)?;

        tokio::spawn(async move {
            if let Err(err) = connection.await {
                tracing::error!(error = %err, "postgresql connection failed");
            }
        });

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl Driver for PostgreSQL {
    fn url(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.url)
    }

    async fn exec(&self, sql: &str, params: &[CoreValue]) -> Result<Response> {
        let stmt = self
            .client
            .prepare(sql)
            .await
            .map_err(Error::driver_operation_failed)?;

        let params = params.iter().map(Value::from).collect::<Vec<_>>();
        let args = params
            .iter()
            .map(|param| param as &(dyn ToSql + Sync))
            .collect::<Vec<_>>();

        if stmt.columns().is_empty() {
            let count = self
                .client
                .execute(&stmt, &args)
                .await
                .map_err(Error::driver_operation_failed)?;
            return Ok(Response::count(count));
        }

        let rows = self
            .client
            .query(&stmt, &args)
            .await
            .map_err(Error::driver_operation_failed)?;

        let rows = rows
            .iter()
            .map(postgres_to_strata)
            .collect::<Result<Vec<_>>>()?;

        Ok(Response::rows(rows))
    }
}

/// Converts a PostgreSQL row into a row of core values keyed by column name.
fn postgres_to_strata(row: &Row) -> Result<strata_core::driver::Row> {
    row.columns()
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let value = postgres_value(row, index, column.type_())?;
            Ok((column.name().to_string(), value))
        })
        .collect()
}

fn postgres_value(row: &Row, index: usize, ty: &Type) -> Result<CoreValue> {
    // NOTE: the PostgreSQL type enum is opaque, so each type is matched by
    // constant.
    let value = match *ty {
        Type::BOOL => get::<bool>(row, index)?.map(CoreValue::Bool),
        Type::INT2 => get::<i16>(row, index)?.map(|v| CoreValue::I64(v.into())),
        Type::INT4 => get::<i32>(row, index)?.map(|v| CoreValue::I64(v.into())),
        Type::INT8 => get::<i64>(row, index)?.map(CoreValue::I64),
        Type::FLOAT4 => get::<f32>(row, index)?.map(|v| CoreValue::F64(v.into())),
        Type::FLOAT8 => get::<f64>(row, index)?.map(CoreValue::F64),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
            get::<String>(row, index)?.map(CoreValue::String)
        }
        _ => bail!(
            "unsupported PostgreSQL type `{ty}` for column `{}`",
            row.columns()[index].name()
        ),
    };

    Ok(value.unwrap_or(CoreValue::Null))
}

fn get<'a, T>(row: &'a Row, index: usize) -> Result<Option<T>>
where
    T: tokio_postgres::types::FromSql<'a>,
{
    row.try_get(index).map_err(Error::driver_operation_failed)
}
