use strata::Db;
use tests::*;

#[tokio::test]
async fn sqlite_url_connects() {
    let db = Db::builder()
        .register(users())
        .connect("sqlite::memory:")
        .await
        .unwrap();

    assert_eq!(db.driver().url(), "sqlite::memory:");
    assert_eq!(db.models().len(), 1);
}

#[tokio::test]
async fn unsupported_urls_are_rejected() {
    for url in ["mysql://localhost/app", "not a url", "sqlite"] {
        let err = assert_err!(Db::builder().connect(url).await, "url={url}");
        assert!(err.is_invalid_connection_url(), "url={url}; err={err}");
    }
}

#[tokio::test]
async fn unregistered_models_are_rejected() {
    let test = setup().await;

    let err = assert_err!(test.db.model("accounts"));
    assert!(err.is_invalid_schema());
}

#[test]
fn duplicate_registration_is_rejected() {
    let sqlite = strata_driver_sqlite::Sqlite::in_memory().unwrap();
    let err = assert_err!(Db::builder()
        .register(users())
        .register(users())
        .build(sqlite));
    assert!(err.is_invalid_schema());
}
