/// Grandparent-attributed chromosome segments and the overlap windows
/// derived from them.
use std::collections::BTreeMap;

use indexmap::IndexSet;

/// A chromosome segment inherited by one sibling from one grandparent.
///
/// Coordinates are closed intervals (`start <= end`) on a single reference
/// build. Chromosome and lineage are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub chromosome: u8,
    /// Kit of the sibling carrying this segment
    pub owner_kit: String,
    /// Grandparent this segment is attributed to
    pub lineage: String,
    pub start: u64,
    pub end: u64,
}

impl Segment {
    pub fn new(chromosome: u8, owner_kit: &str, lineage: &str, start: u64, end: u64) -> Self {
        Segment {
            chromosome,
            owner_kit: owner_kit.to_string(),
            lineage: lineage.to_string(),
            start,
            end,
        }
    }

    /// Number of bases covered (closed interval)
    pub fn span(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// A maximal run of simultaneously overlapping segments on one
/// (chromosome, lineage) pair.
///
/// `segments` holds the contributing segments in activation order;
/// `owner_kits` is the deduplicated owner sequence in first-seen order.
/// The first owner is the reference sibling whose match export drives the
/// candidate search downstream.
#[derive(Debug, Clone)]
pub struct OverlapWindow {
    pub chromosome: u8,
    pub lineage: String,
    pub start: u64,
    pub end: u64,
    pub segments: Vec<Segment>,
    pub owner_kits: Vec<String>,
}

impl OverlapWindow {
    /// The sibling whose match file is scanned for this window
    pub fn reference_kit(&self) -> &str {
        &self.owner_kits[0]
    }

    /// Absorption bound for match records: the record must start inside the
    /// window and must not extend past its right edge. Both edges inclusive.
    pub fn admits(&self, start: u64, end: u64) -> bool {
        start >= self.start && start <= self.end && end <= self.end
    }
}

/// Key for grouping segments by chromosome and grandparent lineage
#[derive(Debug, Clone, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct ChromLineage {
    pub chromosome: u8,
    pub lineage: String,
}

/// Group segments under their (chromosome, lineage) key.
///
/// BTreeMap keeps the groups in (chromosome, lineage) order, which fixes the
/// ordering of the final output.
pub fn group_by_chrom_lineage(segments: Vec<Segment>) -> BTreeMap<ChromLineage, Vec<Segment>> {
    let mut groups: BTreeMap<ChromLineage, Vec<Segment>> = BTreeMap::new();
    for segment in segments {
        let key = ChromLineage {
            chromosome: segment.chromosome,
            lineage: segment.lineage.clone(),
        };
        groups.entry(key).or_default().push(segment);
    }
    groups
}

/// Derive the deduplicated owner sequence from contributing segments,
/// preserving first-seen order.
pub fn owners_in_order(segments: &[Segment]) -> Vec<String> {
    let mut owners: IndexSet<&str> = IndexSet::new();
    for segment in segments {
        owners.insert(segment.owner_kit.as_str());
    }
    owners.into_iter().map(|kit| kit.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_chrom_lineage() {
        let segments = vec![
            Segment::new(2, "K1", "PGF", 100, 200),
            Segment::new(1, "K2", "PGF", 100, 200),
            Segment::new(1, "K1", "PGF", 50, 150),
            Segment::new(1, "K1", "PGM", 50, 150),
        ];

        let groups = group_by_chrom_lineage(segments);
        assert_eq!(groups.len(), 3);

        let keys: Vec<&ChromLineage> = groups.keys().collect();
        // Chromosome ascending, lineage ascending within chromosome
        assert_eq!(keys[0].chromosome, 1);
        assert_eq!(keys[0].lineage, "PGF");
        assert_eq!(keys[1].chromosome, 1);
        assert_eq!(keys[1].lineage, "PGM");
        assert_eq!(keys[2].chromosome, 2);

        let chr1_pgf = &groups[&ChromLineage {
            chromosome: 1,
            lineage: "PGF".to_string(),
        }];
        assert_eq!(chr1_pgf.len(), 2);
    }

    #[test]
    fn test_owners_first_seen_order() {
        let segments = vec![
            Segment::new(1, "K2", "PGF", 0, 100),
            Segment::new(1, "K1", "PGF", 50, 150),
            Segment::new(1, "K2", "PGF", 200, 300),
        ];
        assert_eq!(owners_in_order(&segments), vec!["K2", "K1"]);
    }

    #[test]
    fn test_window_admits_inclusive_edges() {
        let window = OverlapWindow {
            chromosome: 1,
            lineage: "PGF".to_string(),
            start: 100,
            end: 200,
            segments: vec![],
            owner_kits: vec!["K1".to_string()],
        };

        assert!(window.admits(100, 200));
        assert!(window.admits(200, 200));
        assert!(window.admits(150, 180));
        // Starts before the window
        assert!(!window.admits(99, 150));
        // Extends past the right edge
        assert!(!window.admits(150, 201));
        // Starts past the right edge
        assert!(!window.admits(201, 250));
    }
}
