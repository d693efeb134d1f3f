use serde::{Deserialize, Serialize};

/// Unique identifier of a ticket in the bug-tracking service.
pub type BugId = u64;

/// A ticket snapshot as returned by the bug-tracking service.
///
/// Records are read-only for the duration of one reconciliation. Any state
/// change, such as attaching a flaw to an advisory, is performed by the
/// caller after the engine returns its decision.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Bug {
    /// The unique id of the ticket.
    pub id: BugId,

    /// Keyword tags attached to the ticket.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,

    /// The product the ticket is filed against.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub product: String,

    /// The component within the product.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub component: String,

    /// Lifecycle status, in the tracking system's vocabulary
    /// (e.g. `ON_QA`, `RELEASE_PENDING`).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,

    /// Resolution, only meaningful once the ticket is closed.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resolution: String,

    /// Free-text whiteboard. May embed a `component:<name>` token naming
    /// the affected release component.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub whiteboard: String,

    /// Target release versions, most specific first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_release: Vec<String>,

    /// Ids of the bugs this ticket depends on. A flaw depends on the
    /// trackers created to fix it in each component and release.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<BugId>,

    /// Ids of the bugs blocked by this ticket. A tracker blocks the
    /// flaw(s) it fixes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<BugId>,
}
