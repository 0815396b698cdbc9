use super::Value;

/// Inclusive bounds of a `$between` / `$notBetween` filter.
///
/// The bounds are bound in `from, to` order; no normalization is done when
/// `from > to`.
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    pub from: Value,
    pub to: Value,
}

impl Range {
    pub fn new(from: impl Into<Value>, to: impl Into<Value>) -> Range {
        Range {
            from: from.into(),
            to: to.into(),
        }
    }
}
