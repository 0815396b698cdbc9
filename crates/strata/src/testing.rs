use crate::{
    driver::{Driver, Response},
    schema::Model,
    Db, Query, Result, Type, Value,
};
use std::borrow::Cow;
use strata_core::async_trait;

/// Driver for tests that must not reach the database.
#[derive(Debug)]
pub(crate) struct Unreachable;

#[async_trait]
impl Driver for Unreachable {
    fn url(&self) -> Cow<'_, str> {
        Cow::Borrowed("unreachable://")
    }

    async fn exec(&self, sql: &str, _params: &[Value]) -> Result<Response> {
        panic!("unexpected statement: {sql}");
    }
}

/// `users { id, firstName, lastName }` over the unreachable driver.
pub(crate) fn users() -> Query {
    let model = Model::builder("users")
        .column("id", Type::I64)
        .column("firstName", Type::String)
        .column("lastName", Type::String)
        .build()
        .unwrap();

    let db = Db::builder().register(model).build(Unreachable).unwrap();
    db.model("users").unwrap()
}
