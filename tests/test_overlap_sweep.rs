// Sweep coverage and window-structure tests
use kinsweep::overlap_sweep::sweep_segments;
use kinsweep::segment::Segment;
use pretty_assertions::assert_eq;

fn seg(owner: &str, start: u64, end: u64) -> Segment {
    Segment::new(7, owner, "MGM", start, end)
}

#[test]
fn test_windows_cover_input_without_gaps() {
    let segments = vec![
        seg("K1", 25_898_921, 180_690_937),
        seg("K2", 34_948_532, 90_620_309),
        seg("K3", 127_248_485, 163_633_239),
        seg("K4", 0, 23_000_000),
        seg("K5", 81_917_419, 148_700_714),
        seg("K6", 10_863_291, 180_690_937),
        seg("K7", 0, 180_690_937),
    ];
    let windows = sweep_segments(&segments);

    // Windows are ordered and left-to-right contiguous across covered space
    for pair in windows.windows(2) {
        assert!(pair[0].end <= pair[1].start);
    }

    // Full coverage: this input has no gap, so adjacent windows meet at
    // their shared boundary coordinate
    assert_eq!(windows.first().unwrap().start, 0);
    assert_eq!(windows.last().unwrap().end, 180_690_937);
    for pair in windows.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }

    // Every contributing segment spans its whole window
    for window in &windows {
        assert!(!window.segments.is_empty());
        for segment in &window.segments {
            assert!(segment.start <= window.start && segment.end >= window.end);
        }
    }

    // Maximality: any segment spanning a window contributes to it
    for window in &windows {
        for segment in &segments {
            if segment.start <= window.start && segment.end >= window.end {
                assert!(
                    window.segments.contains(segment),
                    "segment {}..{} missing from window {}..{}",
                    segment.start,
                    segment.end,
                    window.start,
                    window.end
                );
            }
        }
    }
}

#[test]
fn test_membership_is_constant_and_changes_between_windows() {
    let windows = sweep_segments(&[
        seg("K1", 0, 100),
        seg("K2", 50, 150),
        seg("K3", 60, 70),
    ]);

    let described: Vec<(u64, u64, Vec<&str>)> = windows
        .iter()
        .map(|w| {
            (
                w.start,
                w.end,
                w.owner_kits.iter().map(|k| k.as_str()).collect(),
            )
        })
        .collect();

    assert_eq!(
        described,
        vec![
            (0, 50, vec!["K1"]),
            (50, 60, vec!["K1", "K2"]),
            (60, 70, vec!["K1", "K2", "K3"]),
            (70, 100, vec!["K1", "K2"]),
            (100, 150, vec!["K2"]),
        ]
    );
}

#[test]
fn test_disjoint_inputs_leave_a_gap() {
    let windows = sweep_segments(&[
        seg("K1", 0, 100),
        seg("K2", 50, 150),
        seg("K3", 200, 300),
    ]);
    let bounds: Vec<(u64, u64)> = windows.iter().map(|w| (w.start, w.end)).collect();
    assert_eq!(bounds, vec![(0, 50), (50, 100), (100, 150), (200, 300)]);
}

#[test]
fn test_window_metadata_carries_group_identity() {
    let windows = sweep_segments(&[seg("K1", 10, 20)]);
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].chromosome, 7);
    assert_eq!(windows[0].lineage, "MGM");
    assert_eq!(windows[0].reference_kit(), "K1");
}
