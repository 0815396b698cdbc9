use strata_core::stmt::{Filter, Value};

/// The argument of [`Query::query_by`](super::Query::query_by): one value
/// to compare against, or a list of candidates.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Value(Value),
    List(Vec<Value>),
}

impl Lookup {
    pub(crate) fn into_filter(self, column: &str) -> Filter {
        match self {
            Lookup::Value(value) => Filter::eq(column, value),
            Lookup::List(values) => Filter::in_list(column, values),
        }
    }
}

macro_rules! impl_lookup {
    ( $($t:ty),+ ) => {
        $(
            impl From<$t> for Lookup {
                fn from(src: $t) -> Self {
                    Lookup::Value(src.into())
                }
            }
        )+
    };
}

impl_lookup!(bool, i32, i64, u32, f64, String, &String, &str, Value);

impl<T: Into<Value>> From<Vec<T>> for Lookup {
    fn from(src: Vec<T>) -> Self {
        Lookup::List(src.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Lookup {
    fn from(src: [T; N]) -> Self {
        Lookup::List(src.into_iter().map(Into::into).collect())
    }
}
