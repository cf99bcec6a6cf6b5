/// Per-window filtering of a reference sibling's triangulation records.
use std::collections::{HashMap, HashSet};

use crate::segment::OverlapWindow;
use crate::triang::TriangRecord;

/// Accumulator for one contiguous run of records sharing a `subject_kit`.
///
/// Constructed fresh per run and discarded after evaluation; no group state
/// survives across windows.
#[derive(Debug)]
struct MatchGroup {
    subject_kit: String,
    records: Vec<TriangRecord>,
    /// other_kit -> hit count, restricted to known sibling kits
    sibling_hits: HashMap<String, u32>,
    contains_excluded_cousin: bool,
}

impl MatchGroup {
    fn new(subject_kit: &str) -> Self {
        MatchGroup {
            subject_kit: subject_kit.to_string(),
            records: Vec::new(),
            sibling_hits: HashMap::new(),
            contains_excluded_cousin: false,
        }
    }

    /// Absorb a record whose interval lies within the window
    fn absorb(
        &mut self,
        record: &TriangRecord,
        sibling_kits: &HashSet<String>,
        excluded_kits: &HashSet<String>,
    ) {
        if sibling_kits.contains(&record.other_kit) {
            *self.sibling_hits.entry(record.other_kit.clone()).or_insert(0) += 1;
        }
        if excluded_kits.contains(&record.other_kit) {
            self.contains_excluded_cousin = true;
        }
        self.records.push(record.clone());
    }

    /// The acceptance predicate for a closed group. All conditions must hold:
    /// the candidate co-triangulates with every non-reference owner of the
    /// window, hits no sibling outside the window's owners, touches no
    /// excluded cousin, and is itself neither an excluded cousin nor a
    /// sibling.
    fn is_accepted(
        &self,
        window: &OverlapWindow,
        sibling_kits: &HashSet<String>,
        excluded_kits: &HashSet<String>,
    ) -> bool {
        let reference_kit = window.reference_kit();

        for owner in &window.owner_kits {
            if owner != reference_kit && !self.sibling_hits.contains_key(owner) {
                return false;
            }
        }

        for hit_kit in self.sibling_hits.keys() {
            if !window.owner_kits.contains(hit_kit) {
                return false;
            }
        }

        if self.contains_excluded_cousin {
            return false;
        }
        if excluded_kits.contains(&self.subject_kit) {
            return false;
        }
        if sibling_kits.contains(&self.subject_kit) {
            return false;
        }

        true
    }

    /// Close the group: stamp and emit every absorbed record if accepted,
    /// drop the group whole otherwise.
    fn close_into(
        mut self,
        window: &OverlapWindow,
        sibling_kits: &HashSet<String>,
        excluded_kits: &HashSet<String>,
        accepted: &mut Vec<TriangRecord>,
    ) {
        if !self.is_accepted(window, sibling_kits, excluded_kits) {
            return;
        }
        let lineage = window.lineage.clone();
        let reference_kit = window.reference_kit().to_string();
        for record in &mut self.records {
            record.stamp(&lineage, &reference_kit);
        }
        accepted.append(&mut self.records);
    }
}

/// Filter one window's candidates out of the reference sibling's records.
///
/// `records` is the reference sibling's slice for the window's chromosome,
/// sorted by (subject kit, start, end) so that each candidate forms one
/// contiguous run. Records outside the window's absorption bound are skipped
/// without closing the run. Acceptance is all-or-nothing per run.
pub fn filter_window_matches(
    window: &OverlapWindow,
    records: &[TriangRecord],
    sibling_kits: &HashSet<String>,
    excluded_kits: &HashSet<String>,
) -> Vec<TriangRecord> {
    let mut accepted = Vec::new();
    let mut current: Option<MatchGroup> = None;

    for record in records {
        debug_assert_eq!(record.chromosome, window.chromosome);

        let same_run = current
            .as_ref()
            .is_some_and(|g| g.subject_kit == record.subject_kit);
        if !same_run {
            if let Some(closed) = current.take() {
                closed.close_into(window, sibling_kits, excluded_kits, &mut accepted);
            }
            current = Some(MatchGroup::new(&record.subject_kit));
        }

        if window.admits(record.start, record.end) {
            if let Some(group) = current.as_mut() {
                group.absorb(record, sibling_kits, excluded_kits);
            }
        }
    }

    if let Some(closed) = current.take() {
        closed.close_into(window, sibling_kits, excluded_kits, &mut accepted);
    }

    accepted
}
