use std::collections::BTreeMap;
use std::ops::Deref;

use flawsync_common::bug::{Bug, BugId};

use crate::config::ReconcileConfig;

/// A bug classified as a canonical vulnerability record.
///
/// Its `depends_on` list enumerates every tracker created against the
/// vulnerability across components and releases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlawBug(Bug);

impl FlawBug {
    /// Classify a bug snapshot as a flaw record, requiring the configured
    /// flaw product and component.
    pub fn classify(bug: Bug, config: &ReconcileConfig) -> Option<Self> {
        config.is_flaw_bug(&bug).then(|| Self(bug))
    }

    pub fn into_bug(self) -> Bug {
        self.0
    }
}

impl Deref for FlawBug {
    type Target = Bug;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Result of resolving the flaw bugs behind a set of trackers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrespondingFlaws {
    /// Matched flaw bugs, deduplicated by id, in the order the service
    /// returned them.
    pub flaw_bugs: Vec<FlawBug>,

    /// For each tracker, the ids of the matched flaw bugs it blocks.
    /// Trackers matching nothing map to an empty list; in strict mode
    /// such trackers fail the operation instead.
    pub tracker_flaws: BTreeMap<BugId, Vec<BugId>>,
}

#[cfg(test)]
mod tests {
    use super::FlawBug;
    use crate::config::ReconcileConfig;
    use flawsync_common::bug::Bug;

    #[test]
    fn classify_by_product_and_component() {
        let config = ReconcileConfig::default();

        let flaw = Bug {
            id: 1,
            product: "Security Response".into(),
            component: "vulnerability".into(),
            ..Bug::default()
        };
        assert!(FlawBug::classify(flaw, &config).is_some());

        let wrong_product = Bug {
            id: 3,
            product: "foo".into(),
            component: "vulnerability".into(),
            ..Bug::default()
        };
        assert!(FlawBug::classify(wrong_product, &config).is_none());

        let wrong_component = Bug {
            id: 4,
            product: "Security Response".into(),
            component: "bar".into(),
            ..Bug::default()
        };
        assert!(FlawBug::classify(wrong_component, &config).is_none());
    }
}
