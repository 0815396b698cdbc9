use pretty_assertions::assert_eq;
use strata::{filter, Filter, Query, Value};
use tests::*;

/// Three users; the second has no last name.
async fn seeded() -> Test {
    let test = setup().await;

    for last_name in [Value::from("bar"), Value::Null, Value::from("bar")] {
        test.users()
            .create([("firstName", Value::from("user")), ("lastName", last_name)])
            .await
            .unwrap();
    }

    test.log.clear();
    test
}

async fn ids(query: &Query) -> Vec<i64> {
    query
        .order_by("id")
        .pluck("id")
        .await
        .unwrap()
        .into_iter()
        .map(|id| id.to_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn special_filters_match_rows() {
    let test = seeded().await;
    let users = test.users();

    let cases = [
        (filter!({ "$null": "lastName" }), vec![2]),
        (filter!({ "$notNull": "lastName" }), vec![1, 3]),
        (filter!({ "$or": [{ "id": 1 }, { "id": 2 }] }), vec![1, 2]),
        (filter!({ "$between": { "id": { "from": 1, "to": 2 } } }), vec![1, 2]),
        (filter!({ "$notBetween": { "id": { "from": 1, "to": 2 } } }), vec![3]),
        (filter!({ "$and": [] }), vec![1, 2, 3]),
        (filter!({ "$or": [] }), vec![]),
        (filter!({ "$not": { "id": 1 } }), vec![2, 3]),
        (filter!({ "$in": { "id": [1, 3] } }), vec![1, 3]),
        (filter!({ "$in": { "id": [] } }), vec![]),
        (filter!({ "$notIn": { "id": [1] } }), vec![2, 3]),
        (filter!({ "$notIn": { "id": [] } }), vec![1, 2, 3]),
        (filter!({ "$gt": { "id": 1 } }), vec![2, 3]),
        (filter!({ "$lte": { "id": 2 } }), vec![1, 2]),
        (filter!({ "lastName": "bar" }), vec![1, 3]),
        (filter!({}), vec![1, 2, 3]),
    ];

    for (filter, expected) in cases {
        let filter = filter.unwrap();
        let key = filter.key();
        assert_eq!(ids(&users.filter_by(filter)).await, expected, "filter={key:?}");
    }
}

#[tokio::test]
async fn raw_filters_bind_after_preceding_params() {
    let test = seeded().await;

    let query = test
        .users()
        .filter_by(Filter::eq("lastName", "bar"))
        .filter_by(Filter::raw("\"id\" > $1", [1]));

    assert_eq!(ids(&query).await, [3]);

    let executed = test.log.pop();
    assert_eq!(
        executed.sql,
        r#"SELECT "users"."id" FROM "users" WHERE (("users"."last_name" = $1) AND ("id" > $2)) ORDER BY "users"."id" ASC"#
    );
    assert_eq!(executed.params, [Value::from("bar"), Value::I64(1)]);
}

#[tokio::test]
async fn filter_by_composes_with_and() {
    let test = seeded().await;

    let query = test
        .users()
        .filter_by(Filter::eq("lastName", "bar"))
        .filter_by(Filter::gt("id", 1));

    assert_eq!(query.count().await.unwrap(), 1);

    let executed = test.log.pop();
    assert_eq!(
        executed.sql,
        r#"SELECT COUNT(*) AS "count" FROM "users" WHERE (("users"."last_name" = $1) AND ("users"."id" > $2))"#
    );
    assert_eq!(executed.params, [Value::from("bar"), Value::I64(1)]);
}

#[tokio::test]
async fn compiling_twice_is_deterministic() {
    let test = seeded().await;

    let query = test.users().filter_by(
        filter!({ "$or": [{ "$in": { "id": [1, 2] } }, { "$null": "lastName" }] }).unwrap(),
    );

    query.all().await.unwrap();
    query.all().await.unwrap();

    let first = test.log.pop();
    let second = test.log.pop();
    assert_eq!(first, second);
}

#[tokio::test]
async fn malformed_filters_never_reach_the_database() {
    let test = seeded().await;

    let err = assert_err!(filter!({ "$null": "lastName", "$notNull": "firstName" }));
    assert!(err.is_malformed_filter());

    let err = assert_err!(filter!({ "$like": { "firstName": "u%" } }));
    assert!(err.is_unreachable_filter());

    let err = assert_err!(test.users().filter_by(Filter::raw("\"id\" = $2", [1])).all().await);
    assert!(err.is_malformed_filter());

    assert!(test.log.is_empty());
}
