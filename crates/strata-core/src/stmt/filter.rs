use super::{BinaryOp, FilterAsync, FilterRaw, Range, Value};

use indexmap::IndexMap;
use std::{fmt, sync::Arc};

/// A boolean row predicate.
///
/// Filters are immutable. Cloning only bumps a reference count, so composing
/// a new filter on top of an existing one shares the existing tree instead
/// of copying it.
#[derive(Clone)]
pub struct Filter {
    kind: Arc<FilterKind>,
}

#[derive(Debug)]
pub enum FilterKind {
    /// Implicit equality on every listed column, `{ "col": value, .. }`.
    /// An empty map matches every row.
    Property(IndexMap<String, Value>),

    /// `$and`
    And(Vec<Filter>),

    /// `$or`
    Or(Vec<Filter>),

    /// `$not`
    Not(Filter),

    /// `$in`
    In(IndexMap<String, Vec<Value>>),

    /// `$notIn`
    NotIn(IndexMap<String, Vec<Value>>),

    /// `$null`
    Null(String),

    /// `$notNull`
    NotNull(String),

    /// `$between`
    Between(IndexMap<String, Range>),

    /// `$notBetween`
    NotBetween(IndexMap<String, Range>),

    /// `$gt`, `$gte`, `$lt`, `$lte`
    Compare(BinaryOp, IndexMap<String, Value>),

    /// `$raw`
    Raw(FilterRaw),

    /// `$async`
    Async(FilterAsync),
}

impl Filter {
    pub fn kind(&self) -> &FilterKind {
        &self.kind
    }

    /// The filter that matches every row.
    pub fn all() -> Filter {
        FilterKind::Property(IndexMap::new()).into()
    }

    /// Returns `true` for the empty property filter.
    pub fn is_all(&self) -> bool {
        matches!(self.kind(), FilterKind::Property(columns) if columns.is_empty())
    }

    /// The reserved key of a special filter, `None` for property filters.
    pub fn key(&self) -> Option<&'static str> {
        match self.kind() {
            FilterKind::Property(_) => None,
            FilterKind::And(_) => Some("$and"),
            FilterKind::Or(_) => Some("$or"),
            FilterKind::Not(_) => Some("$not"),
            FilterKind::In(_) => Some("$in"),
            FilterKind::NotIn(_) => Some("$notIn"),
            FilterKind::Null(_) => Some("$null"),
            FilterKind::NotNull(_) => Some("$notNull"),
            FilterKind::Between(_) => Some("$between"),
            FilterKind::NotBetween(_) => Some("$notBetween"),
            FilterKind::Compare(op, _) => op.key(),
            FilterKind::Raw(_) => Some("$raw"),
            FilterKind::Async(_) => Some("$async"),
        }
    }

    /// Equality on a single column.
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Filter {
        Filter::property([(column.into(), value.into())])
    }

    /// Equality on every listed column.
    pub fn property<K, V>(columns: impl IntoIterator<Item = (K, V)>) -> Filter
    where
        K: Into<String>,
        V: Into<Value>,
    {
        FilterKind::Property(
            columns
                .into_iter()
                .map(|(column, value)| (column.into(), value.into()))
                .collect(),
        )
        .into()
    }

    pub fn and(filters: impl IntoIterator<Item = Filter>) -> Filter {
        FilterKind::And(filters.into_iter().collect()).into()
    }

    pub fn or(filters: impl IntoIterator<Item = Filter>) -> Filter {
        FilterKind::Or(filters.into_iter().collect()).into()
    }

    pub fn not(filter: Filter) -> Filter {
        FilterKind::Not(filter).into()
    }

    pub fn in_list<V: Into<Value>>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Filter {
        FilterKind::In(single(column, collect_values(values))).into()
    }

    pub fn not_in_list<V: Into<Value>>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Filter {
        FilterKind::NotIn(single(column, collect_values(values))).into()
    }

    pub fn null(column: impl Into<String>) -> Filter {
        FilterKind::Null(column.into()).into()
    }

    pub fn not_null(column: impl Into<String>) -> Filter {
        FilterKind::NotNull(column.into()).into()
    }

    pub fn between(
        column: impl Into<String>,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> Filter {
        FilterKind::Between(single(column, Range::new(from, to))).into()
    }

    pub fn not_between(
        column: impl Into<String>,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> Filter {
        FilterKind::NotBetween(single(column, Range::new(from, to))).into()
    }

    pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Filter {
        Filter::compare(BinaryOp::Gt, column, value)
    }

    pub fn gte(column: impl Into<String>, value: impl Into<Value>) -> Filter {
        Filter::compare(BinaryOp::Ge, column, value)
    }

    pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Filter {
        Filter::compare(BinaryOp::Lt, column, value)
    }

    pub fn lte(column: impl Into<String>, value: impl Into<Value>) -> Filter {
        Filter::compare(BinaryOp::Le, column, value)
    }

    fn compare(op: BinaryOp, column: impl Into<String>, value: impl Into<Value>) -> Filter {
        FilterKind::Compare(op, single(column, value.into())).into()
    }

    /// Caller-trusted SQL. Placeholders `$1..$n` refer to `bindings` and are
    /// renumbered when the filter is compiled.
    ///
    /// Every `$<digits>` token counts as a placeholder, including one inside a
    /// quoted literal; pass such text as a binding instead.
    pub fn raw<V: Into<Value>>(
        query: impl Into<String>,
        bindings: impl IntoIterator<Item = V>,
    ) -> Filter {
        FilterKind::Raw(FilterRaw::new(query, collect_values(bindings))).into()
    }
}

fn single<T>(column: impl Into<String>, value: T) -> IndexMap<String, T> {
    IndexMap::from([(column.into(), value)])
}

fn collect_values<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Vec<Value> {
    values.into_iter().map(Into::into).collect()
}

impl Default for Filter {
    fn default() -> Self {
        Filter::all()
    }
}

impl From<FilterKind> for Filter {
    fn from(kind: FilterKind) -> Self {
        Filter {
            kind: Arc::new(kind),
        }
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}
