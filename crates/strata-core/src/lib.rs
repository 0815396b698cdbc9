#[macro_use]
mod macros;

pub mod driver;
pub use driver::Driver;

mod error;
pub use error::{Error, IntoError};

pub mod schema;
pub use schema::Model;

pub mod stmt;

/// A Result type alias that uses Strata's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;

#[doc(hidden)]
pub use serde_json;
