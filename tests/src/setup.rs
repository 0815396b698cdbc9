use crate::{ExecLog, LoggingDriver};

use strata::{schema::Model, Db, Driver, Query, Type, Value};
use strata_driver_sqlite::Sqlite;

const CREATE_USERS: &str = "CREATE TABLE \"users\" (
    \"id\" INTEGER PRIMARY KEY AUTOINCREMENT,
    \"first_name\" TEXT,
    \"last_name\" TEXT,
    \"is_admin\" INTEGER NOT NULL DEFAULT 0,
    \"age\" INTEGER
)";

const CREATE_BOOKS: &str = "CREATE TABLE \"books\" (
    \"book_id\" INTEGER PRIMARY KEY AUTOINCREMENT,
    \"title\" TEXT NOT NULL
)";

/// A fresh in-memory database with the `users` and `books` models
/// registered.
pub struct Test {
    pub db: Db,

    /// Statements the test issued, schema setup excluded
    pub log: ExecLog,
}

impl Test {
    pub fn users(&self) -> Query {
        self.db.model("users").unwrap()
    }

    pub fn books(&self) -> Query {
        self.db.model("books").unwrap()
    }

    /// Inserts `(firstName, lastName, isAdmin, age)` rows, then clears the log.
    pub async fn seed(&self, rows: &[(&str, &str, bool, i64)]) {
        for (first_name, last_name, is_admin, age) in rows {
            self.users()
                .create([
                    ("firstName", Value::from(*first_name)),
                    ("lastName", Value::from(*last_name)),
                    ("isAdmin", Value::from(*is_admin)),
                    ("age", Value::from(*age)),
                ])
                .await
                .unwrap();
        }

        self.log.clear();
    }
}

/// `users { id, firstName, lastName, isAdmin, age }`
pub fn users() -> Model {
    Model::builder("users")
        .column("id", Type::I64)
        .column("firstName", Type::String)
        .column("lastName", Type::String)
        .column("isAdmin", Type::Bool)
        .column("age", Type::I64)
        .build()
        .unwrap()
}

/// `books { bookId, title }`, identified by `bookId`
pub fn books() -> Model {
    Model::builder("books")
        .identifier("bookId")
        .column("bookId", Type::I64)
        .column("title", Type::String)
        .build()
        .unwrap()
}

pub async fn setup() -> Test {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let sqlite = Sqlite::in_memory().unwrap();
    sqlite.exec(CREATE_USERS, &[]).await.unwrap();
    sqlite.exec(CREATE_BOOKS, &[]).await.unwrap();

    let driver = LoggingDriver::new(sqlite);
    let log = driver.log();
    let db = Db::builder()
        .register(users())
        .register(books())
        .build(driver)
        .unwrap();

    Test { db, log }
}
