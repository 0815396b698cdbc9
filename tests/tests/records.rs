use pretty_assertions::assert_eq;
use strata::{Change, Value};
use tests::*;

#[tokio::test]
async fn create_inserts_and_returns_identifier() {
    let test = setup().await;

    let record = test
        .users()
        .create([("firstName", Value::from("Jane")), ("isAdmin", true.into())])
        .await
        .unwrap();

    assert!(record.is_persistent());
    assert_eq!(record.id(), &Value::I64(1));
    assert!(record.change_set().is_empty());

    let executed = test.log.pop();
    assert_eq!(
        executed.sql,
        r#"INSERT INTO "users" ("first_name", "is_admin") VALUES ($1, $2) RETURNING "id""#
    );
    assert_eq!(executed.params, [Value::from("Jane"), Value::Bool(true)]);
}

#[tokio::test]
async fn loaded_record_has_no_changes() {
    let test = setup().await;
    test.seed(&[("Jane", "Doe", true, 30)]).await;

    let record = assert_some!(test.users().find_by("id", 1).await.unwrap());

    assert!(!record.is_changed());
    assert!(record.change_set().is_empty());
    assert_eq!(record.get("isAdmin").unwrap(), &Value::Bool(true));
    assert_eq!(record.get("age").unwrap(), &Value::I64(30));
}

#[tokio::test]
async fn revert_changes_restores_loaded_values() {
    let test = setup().await;
    test.seed(&[("Jane", "Doe", false, 30)]).await;

    let mut record = assert_some!(test.users().first().await.unwrap());
    let loaded = record.attributes().clone();

    record
        .assign([("firstName", Value::from("Janet")), ("age", 31.into())])
        .unwrap();
    assert_eq!(
        record.changes().get("firstName"),
        Some(&Change {
            before: "Jane".into(),
            after: "Janet".into(),
        })
    );

    record.revert_changes();
    assert!(!record.is_changed());
    assert_eq!(record.attributes(), &loaded);
}

#[tokio::test]
async fn save_writes_only_the_change_set() {
    let test = setup().await;
    test.seed(&[("Jane", "Doe", false, 30)]).await;

    let mut record = assert_some!(test.users().first().await.unwrap());
    test.log.clear();

    // Nothing changed, nothing sent
    record.save().await.unwrap();
    assert!(test.log.is_empty());

    record.set("lastName", "Smith").unwrap();
    record.save().await.unwrap();
    assert!(!record.is_changed());

    let executed = test.log.pop();
    assert_eq!(
        executed.sql,
        r#"UPDATE "users" SET "last_name" = $1 WHERE ("users"."id" = $2)"#
    );
    assert_eq!(executed.params, [Value::from("Smith"), Value::I64(1)]);
    assert_eq!(executed.row_count, 1);
}

#[tokio::test]
async fn reload_discards_unsaved_changes() {
    let test = setup().await;
    test.seed(&[("Jane", "Doe", false, 30)]).await;

    let mut record = assert_some!(test.users().first().await.unwrap());
    let mut other = record.clone();

    other.set("age", 40).unwrap();
    other.save().await.unwrap();

    record.set("firstName", "Janet").unwrap();
    record.reload().await.unwrap();

    assert_eq!(record.get("firstName").unwrap(), &Value::from("Jane"));
    assert_eq!(record.get("age").unwrap(), &Value::I64(40));
    assert!(!record.is_changed());
}

#[tokio::test]
async fn delete_clears_identifier() {
    let test = setup().await;
    test.seed(&[("Jane", "Doe", false, 30)]).await;

    let mut record = assert_some!(test.users().first().await.unwrap());
    record.delete().await.unwrap();

    assert!(record.is_new());
    assert_eq!(record.id(), &Value::Null);
    assert_eq!(test.users().count().await.unwrap(), 0);

    let err = assert_err!(record.reload().await);
    assert!(err.to_string().contains("unsaved"), "err={err}");
}

#[tokio::test]
async fn build_then_save() {
    let test = setup().await;

    let mut record = test.users().build([("firstName", "Ada")]).unwrap();
    assert!(record.is_new());
    assert!(test.log.is_empty());

    record.save().await.unwrap();
    assert!(record.is_persistent());

    let found = assert_some!(test.users().find_by("firstName", "Ada").await.unwrap());
    assert_eq!(found.id(), record.id());
}

#[tokio::test]
async fn unknown_attributes_are_rejected() {
    let test = setup().await;

    let err = assert_err!(test.users().build([("nickname", "Ada")]));
    assert!(err.is_unknown_column());

    let mut record = test.users().build([("firstName", "Ada")]).unwrap();
    let err = assert_err!(record.set("nickname", "A"));
    assert!(err.is_unknown_column());
}

#[tokio::test]
async fn edited_identifier_updates_the_original_row() {
    let test = setup().await;
    test.seed(&[("Ada", "Lovelace", false, 36), ("Grace", "Hopper", true, 85)])
        .await;

    let mut record = assert_some!(test.users().find_by("id", 1).await.unwrap());
    record.set("id", 3).unwrap();
    record.set("firstName", "Changed").unwrap();
    record.save().await.unwrap();
    assert!(!record.is_changed());

    let executed = test.log.pop();
    assert_eq!(
        executed.sql,
        r#"UPDATE "users" SET "id" = $1, "first_name" = $2 WHERE ("users"."id" = $3)"#
    );
    assert_eq!(
        executed.params,
        [Value::I64(3), Value::from("Changed"), Value::I64(1)]
    );

    assert_none!(test.users().find_by("id", 1).await.unwrap());
    let grace = assert_some!(test.users().find_by("id", 2).await.unwrap());
    assert_eq!(grace.get("firstName").unwrap(), &Value::from("Grace"));
    let moved = assert_some!(test.users().find_by("id", 3).await.unwrap());
    assert_eq!(moved.get("firstName").unwrap(), &Value::from("Changed"));
}

#[tokio::test]
async fn edited_identifier_never_overwrites_another_row() {
    let test = setup().await;
    test.seed(&[("Ada", "Lovelace", false, 36), ("Grace", "Hopper", true, 85)])
        .await;

    let mut record = assert_some!(test.users().find_by("id", 1).await.unwrap());
    record.set("id", 2).unwrap();
    record.set("firstName", "Changed").unwrap();

    // The primary key collides, so the database refuses the update
    let err = assert_err!(record.save().await);
    assert!(err.is_driver_operation_failed(), "err={err}");
    assert!(record.is_changed());

    let names: Vec<_> = test
        .users()
        .order_by("id")
        .pluck("firstName")
        .await
        .unwrap();
    assert_eq!(names, [Value::from("Ada"), Value::from("Grace")]);
}

#[tokio::test]
async fn edited_identifier_deletes_the_original_row() {
    let test = setup().await;
    test.seed(&[("Ada", "Lovelace", false, 36), ("Grace", "Hopper", true, 85)])
        .await;

    let mut record = assert_some!(test.users().find_by("id", 1).await.unwrap());
    record.set("id", 2).unwrap();
    record.delete().await.unwrap();

    let ids: Vec<_> = test.users().pluck("id").await.unwrap();
    assert_eq!(ids, [Value::I64(2)]);
}

#[tokio::test]
async fn attribute_types_are_checked() {
    let test = setup().await;

    let err = assert_err!(test.users().build([("age", "old")]));
    assert!(err.is_type_conversion());

    let err = assert_err!(test.users().update_all([("isAdmin", "yes")]).await);
    assert!(err.is_type_conversion());
    assert!(test.log.is_empty());
}

#[tokio::test]
async fn custom_identifier_column() {
    let test = setup().await;
    let books = test.books();

    let mut book = books.create([("title", "Dune")]).await.unwrap();
    assert_eq!(book.id(), &Value::I64(1));
    assert_eq!(book.get("bookId").unwrap(), &Value::I64(1));

    let executed = test.log.pop();
    assert_eq!(
        executed.sql,
        r#"INSERT INTO "books" ("title") VALUES ($1) RETURNING "book_id""#
    );

    book.set("title", "Dune Messiah").unwrap();
    book.save().await.unwrap();

    let executed = test.log.pop();
    assert_eq!(
        executed.sql,
        r#"UPDATE "books" SET "title" = $1 WHERE ("books"."book_id" = $2)"#
    );
    assert_eq!(executed.params, [Value::from("Dune Messiah"), Value::I64(1)]);

    let found = assert_some!(books.find_by("bookId", 1).await.unwrap());
    assert_eq!(found.get("title").unwrap(), &Value::from("Dune Messiah"));

    book.delete().await.unwrap();
    assert!(book.is_new());
    assert_eq!(books.count().await.unwrap(), 0);
}
