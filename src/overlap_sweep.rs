/// Event sweep that turns one (chromosome, lineage) segment set into maximal
/// simultaneous-overlap windows.
use indexmap::IndexSet;

use crate::segment::{owners_in_order, OverlapWindow, Segment};

/// Compute the overlap windows for a non-empty set of segments sharing one
/// chromosome and one lineage.
///
/// Start and end events are kept as two coordinate-sorted sequences consumed
/// by two cursors. The active set changes only at event coordinates, so each
/// emitted window is the maximal span over which the contributing set is
/// constant. Windows are closed intervals: a coordinate that ends one
/// segment and starts another appears as the right edge of one window and
/// the left edge of the next.
///
/// An empty input is a precondition violation; callers group segments before
/// invoking, so a group is non-empty by construction.
pub fn sweep_segments(segments: &[Segment]) -> Vec<OverlapWindow> {
    assert!(
        !segments.is_empty(),
        "overlap sweep invoked with an empty segment set"
    );
    let chromosome = segments[0].chromosome;
    let lineage = &segments[0].lineage;
    debug_assert!(
        segments
            .iter()
            .all(|s| s.chromosome == chromosome && s.lineage == *lineage),
        "overlap sweep requires a single (chromosome, lineage) group"
    );
    debug_assert!(
        segments.iter().all(|s| s.start <= s.end),
        "inverted segment interval"
    );

    let mut starts: Vec<(u64, usize)> = segments
        .iter()
        .enumerate()
        .map(|(idx, s)| (s.start, idx))
        .collect();
    starts.sort_unstable();

    // Ends tie-broken by segment start so that a zero-length segment sorts
    // after the segments it shares its end coordinate with; its end must not
    // fire before its start has been activated.
    let mut ends: Vec<(u64, usize)> = segments
        .iter()
        .enumerate()
        .map(|(idx, s)| (s.end, idx))
        .collect();
    ends.sort_unstable_by_key(|&(end, idx)| (end, segments[idx].start, idx));

    let mut active: IndexSet<usize> = IndexSet::new();
    let mut windows = Vec::new();
    let mut start_cursor = 0;
    let mut end_cursor = 0;
    let mut pos: u64 = 0;

    while end_cursor < ends.len() {
        // Activate every segment starting at the cursor position
        while start_cursor < starts.len() && starts[start_cursor].0 == pos {
            active.insert(starts[start_cursor].1);
            start_cursor += 1;
        }

        // Next event coordinate in either sequence
        let next_end = ends[end_cursor].0;
        let boundary = match starts.get(start_cursor) {
            Some(&(next_start, _)) if next_start < next_end => next_start,
            _ => next_end,
        };

        if !active.is_empty() {
            let contributing: Vec<Segment> =
                active.iter().map(|&idx| segments[idx].clone()).collect();
            let min_active_start = contributing.iter().map(|s| s.start).min().unwrap_or(pos);
            let owner_kits = owners_in_order(&contributing);
            windows.push(OverlapWindow {
                chromosome,
                lineage: lineage.clone(),
                start: pos.max(min_active_start),
                end: boundary,
                segments: contributing,
                owner_kits,
            });
        }

        // Retire segments ending at the boundary. A not-yet-active segment
        // here is zero-length and starting at this coordinate; it is left
        // unfired for the next pass.
        while end_cursor < ends.len() && ends[end_cursor].0 == boundary {
            if active.shift_remove(&ends[end_cursor].1) {
                end_cursor += 1;
            } else {
                break;
            }
        }

        pos = boundary;
    }

    windows
}
