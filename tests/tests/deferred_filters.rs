use pretty_assertions::assert_eq;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use strata::{Error, Filter, Value};
use tests::*;

#[tokio::test]
async fn deferred_branches_resolve_before_compiling() {
    let test = setup().await;
    test.seed(&[
        ("Ada", "Lovelace", false, 36),
        ("Grace", "Hopper", true, 85),
    ])
    .await;

    let query = test.users().filter_by(Filter::or([
        Filter::deferred(async {
            tokio::task::yield_now().await;
            Ok(Filter::eq("firstName", "Ada"))
        }),
        Filter::deferred(async { Ok(Filter::eq("firstName", "Grace")) }),
    ]));

    assert_eq!(query.count().await.unwrap(), 2);

    let executed = test.log.pop();
    assert_eq!(
        executed.sql,
        r#"SELECT COUNT(*) AS "count" FROM "users" WHERE (("users"."first_name" = $1) OR ("users"."first_name" = $2))"#
    );
    assert_eq!(executed.params, [Value::from("Ada"), Value::from("Grace")]);
}

#[tokio::test]
async fn deferred_future_runs_once() {
    let test = setup().await;
    test.seed(&[("Ada", "Lovelace", false, 36)]).await;

    let polls = Arc::new(AtomicUsize::new(0));
    let counter = polls.clone();

    let query = test.users().filter_by(Filter::deferred(async move {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Filter::eq("lastName", "Lovelace"))
    }));

    assert_eq!(query.count().await.unwrap(), 1);
    assert_eq!(query.all().await.unwrap().len(), 1);
    assert_eq!(polls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn deferred_errors_propagate() {
    let test = setup().await;

    let query = test.users().filter_by(Filter::deferred(async {
        Err(Error::malformed_filter("lookup failed"))
    }));

    let err = assert_err!(query.all().await);
    assert!(err.is_malformed_filter());
    assert!(test.log.is_empty());
}
