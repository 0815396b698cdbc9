mod value;
use value::Value;

use rusqlite::Connection;
use std::{borrow::Cow, path::Path, sync::Mutex};
use strata_core::{
    async_trait,
    driver::{Driver, Response, Row},
    err,
    stmt::Value as CoreValue,
    Error, Result,
};
use url::Url;

/// Executes statements on a single SQLite connection.
#[derive(Debug)]
pub struct Sqlite {
    url: String,
    connection: Mutex<Connection>,
}

impl Sqlite {
    /// Connects using a `sqlite:` URL. `sqlite::memory:` opens an in-memory
    /// database; any other path is opened as a file.
    pub fn connect(url: &str) -> Result<Self> {
        let parsed = Url::parse(url)
            .map_err(|err| Error::invalid_connection_url(format!("{err}; url={url}")))?;

        if parsed.scheme() != "sqlite" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={url}"
            )));
        }

        if parsed.path() == ":memory:" {
            Self::in_memory()
        } else {
            Self::open(parsed.path())
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory().map_err(Error::driver_operation_failed)?;

        Ok(Self {
            url: "sqlite::memory:".to_string(),
            connection: Mutex::new(connection),
        })
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let connection = Connection::open(path).map_err(Error::driver_operation_failed)?;

        Ok(Self {
            url: format!("sqlite:{}", path.display()),
            connection: Mutex::new(connection),
        })
    }

    fn exec_sync(&self, sql: &str, params: &[CoreValue]) -> Result<Response> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| err!("sqlite connection lock poisoned"))?;

        let mut stmt = connection
            .prepare_cached(sql)
            .map_err(Error::driver_operation_failed)?;

        // Placeholders are named `$n`; the same one may appear several times
        // and not necessarily in ascending order.
        for (index, param) in params.iter().enumerate() {
            let name = format!("${}", index + 1);
            let Some(position) = stmt
                .parameter_index(&name)
                .map_err(Error::driver_operation_failed)?
            else {
                continue;
            };

            stmt.raw_bind_parameter(position, Value::from(param))
                .map_err(Error::driver_operation_failed)?;
        }

        if stmt.column_count() == 0 {
            let count = stmt.raw_execute().map_err(Error::driver_operation_failed)?;
            return Ok(Response::count(count as u64));
        }

        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut rows = stmt.raw_query();
        let mut ret = vec![];

        while let Some(row) = rows.next().map_err(Error::driver_operation_failed)? {
            let mut record = Row::with_capacity(columns.len());

            for (index, column) in columns.iter().enumerate() {
                let value = row.get_ref(index).map_err(Error::driver_operation_failed)?;
                record.insert(column.clone(), value::from_sql(value)?);
            }

            ret.push(record);
        }

        Ok(Response::rows(ret))
    }
}

#[async_trait]
impl Driver for Sqlite {
    fn url(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.url)
    }

    async fn exec(&self, sql: &str, params: &[CoreValue]) -> Result<Response> {
        tracing::trace!(sql, "sqlite exec");
        self.exec_sync(sql, params)
    }
}
