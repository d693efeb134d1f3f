use serde::{Deserialize, Serialize};

use flawsync_common::bug::BugId;

/// The engine's view of a pending release advisory.
///
/// Advisories are owned by the advisory service; only the attached bug
/// ids matter here. Attaching or detaching bugs is the caller's business.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Advisory {
    /// Ids of the bugs currently attached to the advisory.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errata_bugs: Vec<BugId>,
}
