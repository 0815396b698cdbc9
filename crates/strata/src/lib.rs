pub mod db;
pub use db::Db;

pub mod query;
pub use query::{Lookup, Query};

mod record;
pub use record::{Change, Record};

pub use strata_core::{
    driver::{self, Driver, Response, Row},
    filter,
    schema::{self, Model},
    stmt::{self, Direction, Filter, OrderBy, Type, Value},
    Error, Result,
};

#[cfg(test)]
mod testing;
