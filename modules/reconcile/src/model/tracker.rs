use std::ops::Deref;

use once_cell::sync::Lazy;
use regex::Regex;

use flawsync_common::bug::Bug;

use crate::config::ReconcileConfig;

/// Whiteboard token naming the release component a tracker fixes,
/// e.g. `component:runc`.
static COMPONENT_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"component:\s*(\S+)").expect("hard-coded pattern"));

/// A bug classified as a security tracker: one concrete effort to fix one
/// vulnerability in one component for one target release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerBug(Bug);

impl TrackerBug {
    /// Classify a bug snapshot as a tracker: any bug whose keywords
    /// intersect the configured tracker-marker set.
    pub fn classify(bug: Bug, config: &ReconcileConfig) -> Option<Self> {
        config.is_tracker_bug(&bug).then(|| Self(bug))
    }

    /// The release component this tracker fixes, parsed from the
    /// whiteboard.
    ///
    /// The whiteboard is free text and the token is frequently missing or
    /// mangled upstream, so absence is a data-quality condition for the
    /// caller to handle, not an error.
    pub fn whiteboard_component(&self) -> Option<&str> {
        COMPONENT_TOKEN
            .captures(&self.0.whiteboard)
            .and_then(|captures| captures.get(1))
            .map(|component| component.as_str())
    }

    pub fn into_bug(self) -> Bug {
        self.0
    }
}

impl Deref for TrackerBug {
    type Target = Bug;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
