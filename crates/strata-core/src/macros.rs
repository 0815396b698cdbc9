/// Builds a [`Filter`](crate::stmt::Filter) from the `$`-keyed JSON filter
/// language.
///
/// ```
/// let filter = strata_core::filter!({ "$or": [{ "id": 1 }, { "id": 2 }] }).unwrap();
/// assert_eq!(filter.key(), Some("$or"));
/// ```
#[macro_export]
macro_rules! filter {
    ( $( $json:tt )+ ) => {
        $crate::stmt::Filter::from_json($crate::serde_json::json!($( $json )+))
    };
}
