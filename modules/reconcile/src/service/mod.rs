mod first_fix;
mod flaw;

use flawsync_common::bug::Bug;

use crate::client::{BugQuery, BugTracker};
use crate::config::ReconcileConfig;
use crate::error::Error;

/// The reconciliation engine.
///
/// Stateless between calls: every operation fetches fresh snapshots
/// through the client and computes in memory, so concurrent invocations
/// only need their own client instance.
pub struct ReconcileService<T> {
    client: T,
    config: ReconcileConfig,
}

impl<T> ReconcileService<T> {
    pub fn new(client: T, config: ReconcileConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }
}

impl<T: BugTracker> ReconcileService<T>
where
    T::Error: std::error::Error + Send + Sync + 'static,
{
    /// Issue one batched read, surfacing client failures as-is.
    async fn fetch(&self, query: BugQuery) -> Result<Vec<Bug>, Error> {
        self.client
            .query(query)
            .await
            .map_err(|err| Error::Tracker(anyhow::Error::new(err)))
    }
}
