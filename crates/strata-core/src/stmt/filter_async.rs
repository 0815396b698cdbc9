use super::{Filter, FilterKind};
use crate::Result;

use async_recursion::async_recursion;
use futures::future::{self, BoxFuture, FutureExt, Shared};
use std::{fmt, future::Future};

/// A filter branch whose value is not available yet.
///
/// The underlying future is shared so a scope holding it can be resolved any
/// number of times; the future itself runs once.
#[derive(Clone)]
pub struct FilterAsync {
    future: Shared<BoxFuture<'static, Result<Filter>>>,
}

impl FilterAsync {
    pub fn new<F>(future: F) -> FilterAsync
    where
        F: Future<Output = Result<Filter>> + Send + 'static,
    {
        FilterAsync {
            future: future.boxed().shared(),
        }
    }

    /// Waits for the deferred filter.
    pub async fn get(&self) -> Result<Filter> {
        self.future.clone().await
    }
}

impl fmt::Debug for FilterAsync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.future.peek().is_some() {
            "ready"
        } else {
            "pending"
        };
        f.debug_tuple("FilterAsync").field(&state).finish()
    }
}

impl Filter {
    /// A `$async` filter that compiles to whatever `future` yields.
    pub fn deferred<F>(future: F) -> Filter
    where
        F: Future<Output = Result<Filter>> + Send + 'static,
    {
        FilterKind::Async(FilterAsync::new(future)).into()
    }

    /// Returns `true` when no `$async` branch remains anywhere in the tree.
    pub fn is_resolved(&self) -> bool {
        match self.kind() {
            FilterKind::And(filters) | FilterKind::Or(filters) => {
                filters.iter().all(Filter::is_resolved)
            }
            FilterKind::Not(filter) => filter.is_resolved(),
            FilterKind::Async(_) => false,
            _ => true,
        }
    }

    /// Replaces every `$async` branch with the filter it resolves to.
    ///
    /// Siblings under `$and` / `$or` are awaited concurrently; their order in
    /// the returned tree always matches the input order. Subtrees without a
    /// deferred branch are shared, not rebuilt.
    #[async_recursion]
    pub async fn resolve(&self) -> Result<Filter> {
        if self.is_resolved() {
            return Ok(self.clone());
        }

        match self.kind() {
            FilterKind::And(filters) => Ok(FilterKind::And(resolve_all(filters).await?).into()),
            FilterKind::Or(filters) => Ok(FilterKind::Or(resolve_all(filters).await?).into()),
            FilterKind::Not(filter) => Ok(Filter::not(filter.resolve().await?)),
            FilterKind::Async(deferred) => {
                tracing::trace!("awaiting deferred filter");
                deferred.get().await?.resolve().await
            }
            _ => Ok(self.clone()),
        }
    }
}

async fn resolve_all(filters: &[Filter]) -> Result<Vec<Filter>> {
    future::try_join_all(filters.iter().map(|filter| filter.resolve())).await
}
