/// Full triangulation pass: sweep every (chromosome, lineage) segment group
/// and filter match candidates against each overlap window.
use log::{debug, info};
use rayon::prelude::*;

use crate::match_grouper::filter_window_matches;
use crate::overlap_sweep::sweep_segments;
use crate::roster::Roster;
use crate::segment::{group_by_chrom_lineage, ChromLineage, Segment};
use crate::triang::TriangRecord;
use crate::triang_index::TriangIndex;

/// Counts reported after a run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub groups: usize,
    pub windows: usize,
    pub accepted: usize,
}

/// Run the triangulation over all segments.
///
/// Groups are processed in (chromosome, lineage) order; windows in sweep
/// order; records in absorption order. The groups are independent, so they
/// are evaluated in parallel and merged back in key order, keeping the
/// output deterministic.
pub fn triangulate(
    segments: Vec<Segment>,
    roster: &Roster,
    index: &TriangIndex,
) -> (Vec<TriangRecord>, RunSummary) {
    let sibling_kits = roster.sibling_kits();
    let groups: Vec<(ChromLineage, Vec<Segment>)> =
        group_by_chrom_lineage(segments).into_iter().collect();

    let per_group: Vec<(usize, Vec<TriangRecord>)> = groups
        .par_iter()
        .map(|(key, group_segments)| {
            let excluded_kits = roster.excluded_kits(&key.lineage);
            let windows = sweep_segments(group_segments);
            debug!(
                "chr {} lineage {}: {} segments -> {} windows, {} excluded kits",
                key.chromosome,
                key.lineage,
                group_segments.len(),
                windows.len(),
                excluded_kits.len()
            );

            let mut accepted = Vec::new();
            for window in &windows {
                // A reference sibling with no records on this chromosome is
                // an empty result, not an error
                let Some(records) = index.get_group(window.reference_kit(), key.chromosome)
                else {
                    continue;
                };
                accepted.extend(filter_window_matches(
                    window,
                    records,
                    &sibling_kits,
                    &excluded_kits,
                ));
            }
            (windows.len(), accepted)
        })
        .collect();

    let mut summary = RunSummary {
        groups: groups.len(),
        ..RunSummary::default()
    };
    let mut accepted = Vec::new();
    for (window_count, group_accepted) in per_group {
        summary.windows += window_count;
        summary.accepted += group_accepted.len();
        accepted.extend(group_accepted);
    }

    info!(
        "triangulated {} groups, {} windows, {} accepted records",
        summary.groups, summary.windows, summary.accepted
    );

    (accepted, summary)
}
