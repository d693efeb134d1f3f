use std::fmt::Debug;
use std::future::Future;

use flawsync_common::bug::{Bug, BugId};

/// A batched read against the bug-tracking service.
///
/// Folds the service's query-builder surface into a value: the ids to
/// resolve, the fields to materialize on each record, and an optional
/// product scope narrowing the result.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BugQuery {
    pub ids: Vec<BugId>,
    pub include_fields: Vec<String>,
    pub product: Option<String>,
}

impl BugQuery {
    pub fn new(ids: impl IntoIterator<Item = BugId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
            include_fields: Vec::new(),
            product: None,
        }
    }

    pub fn include_fields(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.include_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }
}

/// Read-only access to the bug-tracking service.
///
/// Implementations are expected to be authenticated and rate limited
/// externally. The engine issues one call per distinct id set and adds no
/// retry, timeout, or caching of its own.
pub trait BugTracker {
    type Error: Debug;

    /// Resolve a batch of bugs.
    ///
    /// Returns one record per resolvable id, with at least the requested
    /// fields populated. Unresolvable ids are omitted, not errored.
    fn query(&self, query: BugQuery) -> impl Future<Output = Result<Vec<Bug>, Self::Error>>;
}
