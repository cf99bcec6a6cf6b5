/// Per-sibling triangulation CSV import and matched-record export.
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use log::warn;

use crate::roster::Roster;
use crate::triang::{parse_chromosome, TriangRecord};
use crate::triang_index::TriangIndex;

const COLUMNS: [&str; 10] = [
    "Chr",
    "Kit1 Number",
    "Kit1 Name",
    "Kit1 Email",
    "Kit2 Number",
    "Kit2 Name",
    "Kit2 Email",
    "B37 Start",
    "B37 End",
    "cM",
];

struct ColumnMap {
    indices: HashMap<String, usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord, path: &Path) -> Result<Self> {
        let indices: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.trim().to_string(), idx))
            .collect();
        for required in COLUMNS {
            if !indices.contains_key(required) {
                anyhow::bail!("{path:?} is missing column {required:?}");
            }
        }
        Ok(ColumnMap { indices })
    }

    fn text<'r>(&self, row: &'r StringRecord, name: &str) -> &'r str {
        self.indices
            .get(name)
            .and_then(|&idx| row.get(idx))
            .unwrap_or("")
            .trim()
    }
}

/// Read one sibling's triangulation export
pub fn read_triang_file<P: AsRef<Path>>(path: P) -> Result<Vec<TriangRecord>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to open {path:?}"))?;
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);
    let columns = ColumnMap::from_headers(reader.headers()?, path)?;

    let mut records = Vec::new();
    for (row_idx, row) in reader.records().enumerate() {
        let row = row.with_context(|| format!("{path:?} row {}", row_idx + 2))?;
        let row_label = row_idx + 2;

        let chromosome = parse_chromosome(columns.text(&row, "Chr"))
            .with_context(|| format!("{path:?} row {row_label}"))?;
        let start: u64 = columns
            .text(&row, "B37 Start")
            .parse()
            .with_context(|| format!("{path:?} row {row_label}: bad start"))?;
        let end: u64 = columns
            .text(&row, "B37 End")
            .parse()
            .with_context(|| format!("{path:?} row {row_label}: bad end"))?;
        if start > end {
            anyhow::bail!("{path:?} row {row_label}: inverted interval {start}..{end}");
        }
        let centimorgans: f64 = columns
            .text(&row, "cM")
            .parse()
            .with_context(|| format!("{path:?} row {row_label}: bad cM"))?;

        records.push(TriangRecord {
            chromosome,
            subject_kit: columns.text(&row, "Kit1 Number").to_string(),
            subject_name: columns.text(&row, "Kit1 Name").to_string(),
            subject_email: columns.text(&row, "Kit1 Email").to_string(),
            other_kit: columns.text(&row, "Kit2 Number").to_string(),
            other_name: columns.text(&row, "Kit2 Name").to_string(),
            other_email: columns.text(&row, "Kit2 Email").to_string(),
            start,
            end,
            centimorgans,
            matched_lineage: None,
            matched_reference_kit: None,
        });
    }
    Ok(records)
}

/// Build the triangulation index from a directory of per-sibling exports.
///
/// Each sibling's records live in `<kit>.csv`. A sibling without an export
/// file is treated as having no matches.
pub fn load_triang_index<P: AsRef<Path>>(dir: P, roster: &Roster) -> Result<TriangIndex> {
    let dir = dir.as_ref();
    let mut index = TriangIndex::new();

    for sibling in roster.siblings() {
        let path = dir.join(format!("{}.csv", sibling.kit));
        if !path.is_file() {
            warn!("no triangulation export for sibling {} at {path:?}", sibling.kit);
            continue;
        }
        for record in read_triang_file(&path)? {
            index.add_record(&sibling.kit, record);
        }
    }

    index.sort_groups();
    Ok(index)
}

/// Write the accepted records, one row per record, original columns plus the
/// stamped attribution
pub fn write_matched_csv<P: AsRef<Path>>(path: P, records: &[TriangRecord]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("failed to create {path:?}"))?;
    let mut writer = WriterBuilder::new().from_writer(file);

    let mut header: Vec<&str> = COLUMNS.to_vec();
    header.push("Grandparent");
    header.push("Reference Kit");
    writer.write_record(&header)?;

    for record in records {
        let chromosome = record.chromosome.to_string();
        let start = record.start.to_string();
        let end = record.end.to_string();
        let centimorgans = record.centimorgans.to_string();
        writer.write_record([
            chromosome.as_str(),
            record.subject_kit.as_str(),
            record.subject_name.as_str(),
            record.subject_email.as_str(),
            record.other_kit.as_str(),
            record.other_name.as_str(),
            record.other_email.as_str(),
            start.as_str(),
            end.as_str(),
            centimorgans.as_str(),
            record.matched_lineage.as_deref().unwrap_or(""),
            record.matched_reference_kit.as_deref().unwrap_or(""),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
