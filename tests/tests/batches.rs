use pretty_assertions::assert_eq;
use strata::{Filter, Value};
use tests::*;

async fn seeded() -> Test {
    let test = setup().await;
    test.seed(&[
        ("Ada", "Lovelace", false, 36),
        ("Grace", "Hopper", true, 85),
        ("Alan", "Turing", false, 41),
    ])
    .await;
    test
}

#[tokio::test]
async fn batches_cover_every_row() {
    let test = seeded().await;

    let batches = test.users().order_by("id").in_batches_of(2).await.unwrap();

    let windows: Vec<_> = batches
        .iter()
        .map(|batch| (batch.scope().limit(), batch.scope().skip()))
        .collect();
    assert_eq!(windows, [(Some(2), Some(0)), (Some(1), Some(2))]);

    assert_eq!(
        test.log.pop().sql,
        r#"SELECT COUNT(*) AS "count" FROM "users""#
    );

    let mut names = vec![];
    for batch in &batches {
        for record in batch.all().await.unwrap() {
            names.push(record.get("firstName").unwrap().clone());
        }
    }
    assert_eq!(
        names,
        [Value::from("Ada"), Value::from("Grace"), Value::from("Alan")]
    );

    assert_eq!(
        test.log.pop().sql,
        r#"SELECT "users"."id", "users"."first_name", "users"."last_name", "users"."is_admin", "users"."age" FROM "users" ORDER BY "users"."id" ASC LIMIT 2 OFFSET 0"#
    );
}

#[tokio::test]
async fn batches_start_at_existing_skip() {
    let test = seeded().await;

    let batches = test.users().skip_by(1).in_batches_of(1).await.unwrap();

    let windows: Vec<_> = batches
        .iter()
        .map(|batch| (batch.scope().limit(), batch.scope().skip()))
        .collect();
    assert_eq!(windows, [(Some(1), Some(1)), (Some(1), Some(2))]);
}

#[tokio::test]
async fn degenerate_batches_are_empty() {
    let test = seeded().await;

    assert!(test.users().in_batches_of(0).await.unwrap().is_empty());
    assert!(test.log.is_empty());

    let none = test.users().filter_by(Filter::gt("age", 100));
    assert!(none.in_batches_of(2).await.unwrap().is_empty());
}
