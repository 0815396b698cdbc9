use super::Value;

/// A `$raw` filter: caller-trusted SQL text with its own `$1..$n`
/// placeholders and the values they refer to.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterRaw {
    pub query: String,
    pub bindings: Vec<Value>,
}

impl FilterRaw {
    pub fn new(query: impl Into<String>, bindings: Vec<Value>) -> FilterRaw {
        FilterRaw {
            query: query.into(),
            bindings,
        }
    }
}
