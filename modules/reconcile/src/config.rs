use flawsync_common::bug::Bug;

/// Lifecycle status of a closed ticket; whether the fix actually shipped
/// is then decided by the resolution.
const STATUS_CLOSED: &str = "CLOSED";

/// Vocabulary of the bug-tracking service.
///
/// Production deployments run with the defaults below. The values are
/// injected rather than hard-coded so tests and alternate deployments can
/// substitute their own vocabulary.
#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
#[command(next_help_heading = "Reconcile")]
pub struct ReconcileConfig {
    /// Keywords marking a bug as a security tracker.
    #[arg(
        id = "tracker-keywords",
        long = "tracker-keyword",
        env = "RECONCILE_TRACKER_KEYWORDS",
        value_delimiter = ',',
        default_values_t = ["Security".to_string(), "SecurityTracking".to_string()],
    )]
    pub tracker_keywords: Vec<String>,

    /// Product of canonical vulnerability records.
    #[arg(
        id = "flaw-product",
        long,
        env = "RECONCILE_FLAW_PRODUCT",
        default_value = "Security Response"
    )]
    pub flaw_product: String,

    /// Component of canonical vulnerability records.
    #[arg(
        id = "flaw-component",
        long,
        env = "RECONCILE_FLAW_COMPONENT",
        default_value = "vulnerability"
    )]
    pub flaw_component: String,

    /// Product scope applied when querying the trackers of a flaw for
    /// first-fix analysis.
    #[arg(
        id = "tracker-product",
        long,
        env = "RECONCILE_TRACKER_PRODUCT",
        default_value = "OpenShift Container Platform"
    )]
    pub tracker_product: String,

    /// Statuses under which a tracker's fix counts as shipped.
    #[arg(
        id = "fixed-statuses",
        long = "fixed-status",
        env = "RECONCILE_FIXED_STATUSES",
        value_delimiter = ',',
        default_values_t = ["VERIFIED".to_string(), "RELEASE_PENDING".to_string()],
    )]
    pub fixed_statuses: Vec<String>,

    /// Resolutions under which a closed tracker's fix counts as shipped.
    #[arg(
        id = "fixed-resolutions",
        long = "fixed-resolution",
        env = "RECONCILE_FIXED_RESOLUTIONS",
        value_delimiter = ',',
        default_values_t = [
            "ERRATA".to_string(),
            "CURRENTRELEASE".to_string(),
            "NEXTRELEASE".to_string(),
        ],
    )]
    pub fixed_resolutions: Vec<String>,
}

impl ReconcileConfig {
    /// Whether a bug is a security tracker: its keywords intersect the
    /// tracker-marker set.
    pub fn is_tracker_bug(&self, bug: &Bug) -> bool {
        bug.keywords
            .iter()
            .any(|keyword| self.tracker_keywords.contains(keyword))
    }

    /// Whether a bug is a canonical vulnerability record. A bug lacking
    /// the configured product or component is never a flaw.
    pub fn is_flaw_bug(&self, bug: &Bug) -> bool {
        bug.product == self.flaw_product && bug.component == self.flaw_component
    }

    /// Whether a status/resolution combination indicates the fix shipped.
    pub fn is_fixed(&self, status: &str, resolution: &str) -> bool {
        if status == STATUS_CLOSED {
            return self.fixed_resolutions.iter().any(|fixed| fixed == resolution);
        }
        self.fixed_statuses.iter().any(|fixed| fixed == status)
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            tracker_keywords: vec!["Security".into(), "SecurityTracking".into()],
            flaw_product: "Security Response".into(),
            flaw_component: "vulnerability".into(),
            tracker_product: "OpenShift Container Platform".into(),
            fixed_statuses: vec!["VERIFIED".into(), "RELEASE_PENDING".into()],
            fixed_resolutions: vec![
                "ERRATA".into(),
                "CURRENTRELEASE".into(),
                "NEXTRELEASE".into(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ReconcileConfig;
    use flawsync_common::bug::Bug;

    #[test]
    fn tracker_classification() {
        let config = ReconcileConfig::default();

        let tracker = Bug {
            keywords: vec!["Security".into(), "SecurityTracking".into()],
            ..Bug::default()
        };
        assert!(config.is_tracker_bug(&tracker));

        let one_marker = Bug {
            keywords: vec!["Regression".into(), "SecurityTracking".into()],
            ..Bug::default()
        };
        assert!(config.is_tracker_bug(&one_marker));

        let unrelated = Bug {
            keywords: vec!["SomeOtherKeyword".into()],
            ..Bug::default()
        };
        assert!(!config.is_tracker_bug(&unrelated));

        assert!(!config.is_tracker_bug(&Bug::default()));
    }

    #[test]
    fn flaw_classification() {
        let config = ReconcileConfig::default();

        let flaw = Bug {
            product: "Security Response".into(),
            component: "vulnerability".into(),
            ..Bug::default()
        };
        assert!(config.is_flaw_bug(&flaw));

        let wrong_product = Bug {
            product: "foo".into(),
            component: "vulnerability".into(),
            ..Bug::default()
        };
        assert!(!config.is_flaw_bug(&wrong_product));

        let wrong_component = Bug {
            product: "Security Response".into(),
            component: "bar".into(),
            ..Bug::default()
        };
        assert!(!config.is_flaw_bug(&wrong_component));
    }

    #[test]
    fn fixed_states() {
        let config = ReconcileConfig::default();

        assert!(config.is_fixed("RELEASE_PENDING", ""));
        assert!(config.is_fixed("VERIFIED", ""));
        assert!(config.is_fixed("CLOSED", "ERRATA"));

        assert!(!config.is_fixed("ON_QA", ""));
        assert!(!config.is_fixed("ASSIGNED", ""));
        assert!(!config.is_fixed("CLOSED", "WONTFIX"));
        // a closed ticket ships through its resolution, not its status
        assert!(!config.is_fixed("CLOSED", ""));
    }

    #[test]
    fn alternate_vocabulary() {
        let config = ReconcileConfig {
            tracker_keywords: vec!["Tracking".into()],
            ..ReconcileConfig::default()
        };

        let bug = Bug {
            keywords: vec!["Security".into()],
            ..Bug::default()
        };
        assert!(!config.is_tracker_bug(&bug));

        let bug = Bug {
            keywords: vec!["Tracking".into()],
            ..Bug::default()
        };
        assert!(config.is_tracker_bug(&bug));
    }
}
