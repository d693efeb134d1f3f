use std::collections::BTreeSet;

use itertools::Itertools;

use flawsync_common::bug::BugId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Strict-mode validation failure: an advisory carrying a tracker
    /// with no reachable flaw bug cannot be safely released. The ids are
    /// listed in ascending order so operator-facing diagnostics stay
    /// stable.
    #[error("No flaw bugs could be found for these trackers: {}", id_set(.trackers))]
    NoCorrespondingFlaws { trackers: BTreeSet<BugId> },

    /// A failure raised by the bug-tracking service client, surfaced
    /// as-is.
    #[error(transparent)]
    Tracker(anyhow::Error),

    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

/// Render ids as a set literal, e.g. `{10, 12}`.
fn id_set(ids: &BTreeSet<BugId>) -> String {
    format!("{{{}}}", ids.iter().join(", "))
}
