use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use tracing::instrument;

use crate::client::{BugQuery, BugTracker};
use crate::error::Error;
use crate::model::{Advisory, CorrespondingFlaws, FlawBug, TrackerBug};

impl<T: BugTracker> super::ReconcileService<T>
where
    T::Error: std::error::Error + Send + Sync + 'static,
{
    /// Fetch the bugs attached to an advisory and keep the security
    /// trackers, preserving the order the service returned them in.
    ///
    /// `keywords` is materialized on top of the caller's fields so
    /// classification works regardless of the subset asked for.
    #[instrument(skip(self, advisory), err)]
    pub async fn tracker_bugs(
        &self,
        advisory: &Advisory,
        fields: &[&str],
    ) -> Result<Vec<TrackerBug>, Error> {
        let bugs = self
            .fetch(
                BugQuery::new(advisory.errata_bugs.iter().copied())
                    .include_fields(merge_fields(fields, &["keywords"])),
            )
            .await?;

        let trackers = bugs
            .into_iter()
            .filter_map(|bug| TrackerBug::classify(bug, self.config()))
            .collect::<Vec<_>>();

        debug!(
            "{} of {} attached bugs are security trackers",
            trackers.len(),
            advisory.errata_bugs.len()
        );

        Ok(trackers)
    }

    /// Resolve the flaw bugs the given trackers block.
    ///
    /// One batch query over the union of all `blocks` ids; `product` and
    /// `component` are materialized on top of the caller's fields for
    /// classification. Every tracker appears in the returned map, with an
    /// empty list when nothing matched.
    ///
    /// With `strict`, a tracker matching no flaw bug fails the whole
    /// operation: an advisory with an unresolved tracker cannot be safely
    /// released.
    #[instrument(skip(self, trackers), err)]
    pub async fn corresponding_flaw_bugs(
        &self,
        trackers: &[TrackerBug],
        fields: &[&str],
        strict: bool,
    ) -> Result<CorrespondingFlaws, Error> {
        let candidates = trackers
            .iter()
            .flat_map(|tracker| tracker.blocks.iter().copied())
            .collect::<BTreeSet<_>>();

        let bugs = self
            .fetch(
                BugQuery::new(candidates)
                    .include_fields(merge_fields(fields, &["product", "component"])),
            )
            .await?;

        let mut seen = BTreeSet::new();
        let flaw_bugs = bugs
            .into_iter()
            .filter(|bug| seen.insert(bug.id))
            .filter_map(|bug| FlawBug::classify(bug, self.config()))
            .collect::<Vec<_>>();

        let flaw_ids = flaw_bugs.iter().map(|flaw| flaw.id).collect::<BTreeSet<_>>();

        let tracker_flaws = trackers
            .iter()
            .map(|tracker| {
                let matched = tracker
                    .blocks
                    .iter()
                    .copied()
                    .filter(|id| flaw_ids.contains(id))
                    .collect::<Vec<_>>();
                (tracker.id, matched)
            })
            .collect::<BTreeMap<_, _>>();

        if strict {
            let unmatched = tracker_flaws
                .iter()
                .filter(|(_, flaws)| flaws.is_empty())
                .map(|(id, _)| *id)
                .collect::<BTreeSet<_>>();

            if !unmatched.is_empty() {
                return Err(Error::NoCorrespondingFlaws {
                    trackers: unmatched,
                });
            }
        }

        debug!(
            "{} flaw bugs behind {} trackers",
            flaw_bugs.len(),
            trackers.len()
        );

        Ok(CorrespondingFlaws {
            flaw_bugs,
            tracker_flaws,
        })
    }
}

/// The caller's field list with the engine's required fields appended,
/// deduplicated, in a deterministic order.
fn merge_fields(fields: &[&str], required: &[&str]) -> Vec<String> {
    let mut merged = fields
        .iter()
        .map(|field| field.to_string())
        .collect::<Vec<_>>();

    for field in required {
        if !merged.iter().any(|existing| existing == field) {
            merged.push((*field).to_string());
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::merge_fields;

    #[test]
    fn merge_fields_appends_missing_only() {
        assert_eq!(vec!["keywords"], merge_fields(&["keywords"], &["keywords"]));
        assert_eq!(
            vec!["somefield", "product", "component"],
            merge_fields(&["somefield"], &["product", "component"])
        );
        assert_eq!(
            vec!["product", "summary", "component"],
            merge_fields(&["product", "summary"], &["product", "component"])
        );
    }
}
