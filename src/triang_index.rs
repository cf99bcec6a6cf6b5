/// Grouped storage for per-sibling triangulation records
use std::collections::HashMap;

use crate::triang::TriangRecord;

/// Key for grouping records by sibling kit and chromosome
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct SiblingChrom {
    pub kit: String,
    pub chromosome: u8,
}

/// Storage for triangulation records pre-grouped by (sibling kit, chromosome)
#[derive(Debug, Default)]
pub struct TriangIndex {
    groups: HashMap<SiblingChrom, Vec<TriangRecord>>,
}

impl TriangIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record under the owning sibling's kit
    pub fn add_record(&mut self, sibling_kit: &str, record: TriangRecord) {
        let key = SiblingChrom {
            kit: sibling_kit.to_string(),
            chromosome: record.chromosome,
        };
        self.groups.entry(key).or_default().push(record);
    }

    /// Sort every group by (subject kit, start, end).
    ///
    /// The match grouper requires this order so that all records about one
    /// candidate form a contiguous run.
    pub fn sort_groups(&mut self) {
        for records in self.groups.values_mut() {
            records.sort_by(|a, b| {
                a.subject_kit
                    .cmp(&b.subject_kit)
                    .then_with(|| a.start.cmp(&b.start))
                    .then_with(|| a.end.cmp(&b.end))
            });
        }
    }

    /// Records of one sibling on one chromosome
    pub fn get_group(&self, kit: &str, chromosome: u8) -> Option<&[TriangRecord]> {
        let key = SiblingChrom {
            kit: kit.to_string(),
            chromosome,
        };
        self.groups.get(&key).map(|v| v.as_slice())
    }

    /// Number of (sibling, chromosome) groups
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    /// Total number of records across all groups
    pub fn num_records(&self) -> usize {
        self.groups.values().map(|v| v.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SiblingChrom, &Vec<TriangRecord>)> {
        self.groups.iter()
    }

    /// Get summary statistics
    pub fn stats(&self) -> TriangIndexStats {
        let group_sizes: Vec<usize> = self.groups.values().map(|v| v.len()).collect();
        let total = group_sizes.iter().sum();
        let min = group_sizes.iter().min().copied().unwrap_or(0);
        let max = group_sizes.iter().max().copied().unwrap_or(0);

        TriangIndexStats {
            num_groups: self.groups.len(),
            num_records: total,
            min_group_size: min,
            max_group_size: max,
        }
    }
}

/// Statistics about the grouped records
#[derive(Debug)]
pub struct TriangIndexStats {
    pub num_groups: usize,
    pub num_records: usize,
    pub min_group_size: usize,
    pub max_group_size: usize,
}
