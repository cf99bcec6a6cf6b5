use anyhow::{bail, Result};

/// Numeric stand-in for the X chromosome in match exports
pub const X_CHROMOSOME: u8 = 23;

/// A pairwise shared-segment observation between two kits on one chromosome.
///
/// Sourced from one sibling's personal match export; the file owner is
/// implicit. `subject_kit`/`other_kit` are the two kits triangulating with
/// the owner over `[start, end]` (closed interval). Immutable once parsed,
/// except for the two attribution fields stamped when a record is accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangRecord {
    pub chromosome: u8,
    pub subject_kit: String,
    pub subject_name: String,
    pub subject_email: String,
    pub other_kit: String,
    pub other_name: String,
    pub other_email: String,
    pub start: u64,
    pub end: u64,
    pub centimorgans: f64,
    /// Grandparent lineage, stamped on acceptance
    pub matched_lineage: Option<String>,
    /// Reference sibling kit, stamped on acceptance
    pub matched_reference_kit: Option<String>,
}

impl TriangRecord {
    /// Stamp the attribution carried by accepted records
    pub fn stamp(&mut self, lineage: &str, reference_kit: &str) {
        self.matched_lineage = Some(lineage.to_string());
        self.matched_reference_kit = Some(reference_kit.to_string());
    }
}

/// Parse a chromosome label from a match export or workbook cell.
///
/// "X" normalizes to 23; numeric labels must fall in 1..=23.
pub fn parse_chromosome(label: &str) -> Result<u8> {
    let label = label.trim();
    if label.eq_ignore_ascii_case("X") {
        return Ok(X_CHROMOSOME);
    }
    match label.parse::<u8>() {
        Ok(n) if (1..=X_CHROMOSOME).contains(&n) => Ok(n),
        _ => bail!("invalid chromosome label: {label:?}"),
    }
}
