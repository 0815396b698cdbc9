use super::{Filter, OrderBy};
use crate::Result;

/// What rows a model query currently represents, how many of them and in
/// which order.
///
/// A scope is an immutable value: every refinement returns a new scope and
/// leaves `self` untouched. The filter tree of the parent is shared with the
/// refined scope rather than copied.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    filter: Filter,
    limit: Option<u64>,
    skip: Option<u64>,
    order: Vec<OrderBy>,
}

impl Scope {
    /// The unrefined scope: all rows, unbounded, unordered.
    pub fn new() -> Scope {
        Scope::default()
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn skip(&self) -> Option<u64> {
        self.skip
    }

    pub fn order(&self) -> &[OrderBy] {
        &self.order
    }

    /// Returns `true` when a limit or skip restricts the window of rows.
    pub fn is_bounded(&self) -> bool {
        self.limit.is_some() || self.skip.is_some()
    }

    pub fn limit_by(&self, amount: u64) -> Scope {
        Scope {
            limit: Some(amount),
            ..self.clone()
        }
    }

    pub fn unlimited(&self) -> Scope {
        Scope {
            limit: None,
            ..self.clone()
        }
    }

    pub fn skip_by(&self, amount: u64) -> Scope {
        Scope {
            skip: Some(amount),
            ..self.clone()
        }
    }

    pub fn unskipped(&self) -> Scope {
        Scope {
            skip: None,
            ..self.clone()
        }
    }

    /// Appends a sort directive after the existing ones.
    pub fn order_by(&self, item: impl Into<OrderBy>) -> Scope {
        let mut order = self.order.clone();
        order.push(item.into());

        Scope {
            order,
            ..self.clone()
        }
    }

    /// Replaces the ordering list with `item`.
    pub fn reorder(&self, item: impl Into<OrderBy>) -> Scope {
        Scope {
            order: vec![item.into()],
            ..self.clone()
        }
    }

    pub fn unordered(&self) -> Scope {
        Scope {
            order: vec![],
            ..self.clone()
        }
    }

    /// Narrows the scope: `{ $and: [current, filter] }`.
    pub fn filter_by(&self, filter: Filter) -> Scope {
        Scope {
            filter: Filter::and([self.filter.clone(), filter]),
            ..self.clone()
        }
    }

    pub fn unfiltered(&self) -> Scope {
        Scope {
            filter: Filter::all(),
            ..self.clone()
        }
    }

    /// Returns this scope with every `$async` branch of its filter resolved.
    pub async fn resolve(&self) -> Result<Scope> {
        if self.filter.is_resolved() {
            return Ok(self.clone());
        }

        Ok(Scope {
            filter: self.filter.resolve().await?,
            ..self.clone()
        })
    }
}
