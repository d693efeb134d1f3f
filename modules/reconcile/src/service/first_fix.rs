use std::collections::BTreeMap;
use std::str::FromStr;

use log::{debug, warn};
use tracing::instrument;

use flawsync_common::release::Release;

use crate::client::{BugQuery, BugTracker};
use crate::config::ReconcileConfig;
use crate::error::Error;
use crate::model::{FlawBug, TrackerBug};

/// Fields materialized on a flaw's trackers for first-fix analysis.
const TRACKER_FIELDS: &[&str] = &[
    "keywords",
    "target_release",
    "status",
    "resolution",
    "whiteboard",
];

impl<T: BugTracker> super::ReconcileService<T>
where
    T::Error: std::error::Error + Send + Sync + 'static,
{
    /// Whether `target` is the first release within its major line known
    /// to fix `flaw_bug` for at least one affected component.
    ///
    /// With no flaw record, or no trackers to compare against, there is
    /// nothing to be first ahead of and the answer is vacuously `true`.
    #[instrument(skip(self, flaw_bug), err)]
    pub async fn is_first_fix_any(
        &self,
        flaw_bug: Option<&FlawBug>,
        target: &Release,
    ) -> Result<bool, Error> {
        let flaw_bug = match flaw_bug {
            Some(flaw_bug) => flaw_bug,
            None => return Ok(true),
        };
        if flaw_bug.depends_on.is_empty() {
            return Ok(true);
        }

        let bugs = self
            .fetch(
                BugQuery::new(flaw_bug.depends_on.iter().copied())
                    .include_fields(TRACKER_FIELDS.iter().copied())
                    .product(self.config().tracker_product.clone()),
            )
            .await?;

        let trackers = bugs
            .into_iter()
            .filter_map(|bug| TrackerBug::classify(bug, self.config()))
            .collect::<Vec<_>>();

        if trackers.is_empty() {
            debug!("flaw {} has no comparable trackers", flaw_bug.id);
            return Ok(true);
        }

        Ok(first_fix_any(&trackers, target, self.config()))
    }
}

/// The decision itself, over fetched tracker snapshots. Deterministic:
/// identical snapshots yield identical results.
fn first_fix_any(trackers: &[TrackerBug], target: &Release, config: &ReconcileConfig) -> bool {
    let mut by_component: BTreeMap<&str, Vec<&TrackerBug>> = BTreeMap::new();

    for tracker in trackers {
        let component = match tracker.whiteboard_component() {
            Some(component) => component,
            None => {
                // Without a component tag the component-scoped comparison
                // cannot be trusted for this tracker's release.
                if head_release(tracker) == Some(*target) {
                    warn!(
                        "tracker {} targets {} but names no component, not a first fix",
                        tracker.id, target
                    );
                    return false;
                }
                // TODO: clarify with the security team whether an
                // untagged tracker for another release should also
                // disqualify its component
                debug!("tracker {} names no component, skipped", tracker.id);
                continue;
            }
        };
        by_component.entry(component).or_default().push(tracker);
    }

    // a component participates only if this release line has a tracker
    // for it at all
    by_component
        .iter()
        .filter(|(_, group)| {
            group
                .iter()
                .any(|tracker| targets_major_line(tracker, target))
        })
        .any(|(component, group)| {
            let first = !already_fixed(group, target, config);
            debug!("component {component}: first fix for {target}: {first}");
            first
        })
}

/// The tracker's most specific target release, if it parses.
fn head_release(tracker: &TrackerBug) -> Option<Release> {
    tracker
        .target_release
        .first()
        .and_then(|release| Release::from_str(release).ok())
}

fn targets_major_line(tracker: &TrackerBug, target: &Release) -> bool {
    head_release(tracker).is_some_and(|release| release.same_major(target))
}

/// Whether an earlier tracker in this component group already shipped a
/// fix within the target's major line. The release under test's own
/// tracker never counts as prior history.
fn already_fixed(group: &[&TrackerBug], target: &Release, config: &ReconcileConfig) -> bool {
    group.iter().any(|tracker| match head_release(tracker) {
        Some(release) => {
            release.same_major(target)
                && release < *target
                && config.is_fixed(&tracker.status, &tracker.resolution)
        }
        None => false,
    })
}
