// Pins the closed-interval boundary behavior at shared START/END coordinates
use kinsweep::overlap_sweep::sweep_segments;
use kinsweep::segment::Segment;
use pretty_assertions::assert_eq;

fn seg(owner: &str, start: u64, end: u64) -> Segment {
    Segment::new(3, owner, "PGF", start, end)
}

#[test]
fn test_adjacent_windows_share_their_boundary_coordinate() {
    // K2 starts exactly where K1 ends
    let windows = sweep_segments(&[seg("K1", 0, 10), seg("K2", 10, 20)]);
    let bounds: Vec<(u64, u64)> = windows.iter().map(|w| (w.start, w.end)).collect();
    assert_eq!(bounds, vec![(0, 10), (10, 20)]);

    // The window ending at 10 excludes K2, the one starting at 10 excludes K1
    assert_eq!(windows[0].owner_kits, vec!["K1"]);
    assert_eq!(windows[1].owner_kits, vec!["K2"]);
}

#[test]
fn test_boundary_base_satisfies_both_windows() {
    let windows = sweep_segments(&[seg("K1", 0, 10), seg("K2", 10, 20)]);

    // A record spanning exactly the shared base is admitted on both sides
    assert!(windows[0].admits(10, 10));
    assert!(windows[1].admits(10, 10));
}

#[test]
fn test_start_boundary_also_shared() {
    let windows = sweep_segments(&[seg("K1", 0, 100), seg("K2", 50, 150)]);
    let bounds: Vec<(u64, u64)> = windows.iter().map(|w| (w.start, w.end)).collect();
    assert_eq!(bounds, vec![(0, 50), (50, 100), (100, 150)]);

    // Coordinate 50 is the right edge of the single-owner window and the
    // left edge of the two-owner window
    assert!(windows[0].admits(50, 50));
    assert!(windows[1].admits(50, 50));

    // Coordinate 100 likewise belongs to both the two-owner window and the
    // trailing single-owner window
    assert!(windows[1].admits(100, 100));
    assert!(windows[2].admits(100, 100));
}

#[test]
fn test_interior_record_admitted_by_exactly_one_window() {
    let windows = sweep_segments(&[seg("K1", 0, 100), seg("K2", 50, 150)]);

    let admitting: Vec<usize> = windows
        .iter()
        .enumerate()
        .filter(|(_, w)| w.admits(60, 90))
        .map(|(idx, _)| idx)
        .collect();
    assert_eq!(admitting, vec![1]);
}

#[test]
fn test_zero_length_segment_at_shared_end() {
    let windows = sweep_segments(&[seg("K1", 0, 10), seg("K2", 10, 10)]);
    let bounds: Vec<(u64, u64)> = windows.iter().map(|w| (w.start, w.end)).collect();
    assert_eq!(bounds, vec![(0, 10), (10, 10)]);
    assert_eq!(windows[1].owner_kits, vec!["K2"]);
}
