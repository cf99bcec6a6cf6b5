/// Roster workbook import.
///
/// One `.xlsx` workbook with the sheets `Siblings` (Name, Kit), `Cousins`
/// (Name, Kit, Grandparent), `Grandparents` (Name) and `GrandparentSegments`
/// (Chr, Sibling, Grandparent, B37 Start, B37 End). All row validation
/// happens here; the core assumes clean values.
use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use calamine::{open_workbook, Data, DataType, Range, Reader, Xlsx};

use crate::roster::Roster;
use crate::segment::Segment;
use crate::triang::parse_chromosome;

fn cell_text(cell: &Data) -> String {
    match cell.get_string() {
        Some(s) => s.trim().to_string(),
        None => cell.to_string().trim().to_string(),
    }
}

fn cell_u64(cell: &Data) -> Option<u64> {
    cell.as_i64()
        .and_then(|v| u64::try_from(v).ok())
        .or_else(|| cell_text(cell).replace(',', "").parse().ok())
}

fn header_map(header: &[Data]) -> HashMap<String, usize> {
    header
        .iter()
        .enumerate()
        .map(|(idx, cell)| (cell_text(cell), idx))
        .collect()
}

fn column(headers: &HashMap<String, usize>, name: &str, sheet: &str) -> Result<usize> {
    headers
        .get(name)
        .copied()
        .with_context(|| format!("sheet {sheet:?} is missing column {name:?}"))
}

fn sheet_range(workbook: &mut Xlsx<std::io::BufReader<std::fs::File>>, name: &str) -> Result<Range<Data>> {
    workbook
        .worksheet_range(name)
        .with_context(|| format!("workbook has no sheet named {name:?}"))
}

/// Load the roster and the attributed segments from one workbook
pub fn load_workbook<P: AsRef<Path>>(path: P) -> Result<(Roster, Vec<Segment>)> {
    let path = path.as_ref();
    let mut workbook: Xlsx<_> =
        open_workbook(path).with_context(|| format!("failed to open workbook {path:?}"))?;

    let mut roster = Roster::new();
    read_siblings(&sheet_range(&mut workbook, "Siblings")?, &mut roster)?;
    read_cousins(&sheet_range(&mut workbook, "Cousins")?, &mut roster)?;
    read_grandparents(&sheet_range(&mut workbook, "Grandparents")?, &mut roster)?;

    let segments = read_segments(&sheet_range(&mut workbook, "GrandparentSegments")?, &roster)?;

    Ok((roster, segments))
}

fn read_siblings(range: &Range<Data>, roster: &mut Roster) -> Result<()> {
    let mut rows = range.rows();
    let header = rows.next().context("sheet \"Siblings\" is empty")?;
    let headers = header_map(header);
    let name_col = column(&headers, "Name", "Siblings")?;
    let kit_col = column(&headers, "Kit", "Siblings")?;

    for row in rows {
        let name = cell_text(&row[name_col]);
        let kit = cell_text(&row[kit_col]);
        if name.is_empty() && kit.is_empty() {
            continue;
        }
        if name.is_empty() || kit.is_empty() {
            bail!("sibling row with blank name or kit: {name:?} / {kit:?}");
        }
        roster.add_sibling(&name, &kit);
    }
    Ok(())
}

fn read_cousins(range: &Range<Data>, roster: &mut Roster) -> Result<()> {
    let mut rows = range.rows();
    let header = rows.next().context("sheet \"Cousins\" is empty")?;
    let headers = header_map(header);
    let name_col = column(&headers, "Name", "Cousins")?;
    let kit_col = column(&headers, "Kit", "Cousins")?;
    let lineage_col = column(&headers, "Grandparent", "Cousins")?;

    for row in rows {
        let name = cell_text(&row[name_col]);
        let kit = cell_text(&row[kit_col]);
        let lineage = cell_text(&row[lineage_col]);
        if name.is_empty() && kit.is_empty() {
            continue;
        }
        if kit.is_empty() || lineage.is_empty() {
            bail!("cousin {name:?} has blank kit or grandparent");
        }
        roster.add_cousin(&name, &kit, &lineage);
    }
    Ok(())
}

fn read_grandparents(range: &Range<Data>, roster: &mut Roster) -> Result<()> {
    let mut rows = range.rows();
    let header = rows.next().context("sheet \"Grandparents\" is empty")?;
    let headers = header_map(header);
    let name_col = column(&headers, "Name", "Grandparents")?;

    for row in rows {
        let name = cell_text(&row[name_col]);
        if !name.is_empty() {
            roster.add_grandparent(&name);
        }
    }
    Ok(())
}

fn read_segments(range: &Range<Data>, roster: &Roster) -> Result<Vec<Segment>> {
    let mut rows = range.rows();
    let header = rows.next().context("sheet \"GrandparentSegments\" is empty")?;
    let headers = header_map(header);
    let chr_col = column(&headers, "Chr", "GrandparentSegments")?;
    let sibling_col = column(&headers, "Sibling", "GrandparentSegments")?;
    let lineage_col = column(&headers, "Grandparent", "GrandparentSegments")?;
    let start_col = column(&headers, "B37 Start", "GrandparentSegments")?;
    let end_col = column(&headers, "B37 End", "GrandparentSegments")?;

    let mut segments = Vec::new();
    for (row_idx, row) in rows.enumerate() {
        let sibling_name = cell_text(&row[sibling_col]);
        if sibling_name.is_empty() {
            continue;
        }
        let row_label = row_idx + 2; // 1-based, after the header row

        let chromosome = parse_chromosome(&cell_text(&row[chr_col]))
            .with_context(|| format!("GrandparentSegments row {row_label}"))?;
        let lineage = cell_text(&row[lineage_col]);
        if lineage.is_empty() {
            bail!("GrandparentSegments row {row_label}: blank grandparent");
        }
        let owner_kit = roster
            .sibling_kit_for_name(&sibling_name)
            .with_context(|| {
                format!("GrandparentSegments row {row_label}: unknown sibling {sibling_name:?}")
            })?
            .to_string();
        let start = cell_u64(&row[start_col])
            .with_context(|| format!("GrandparentSegments row {row_label}: bad start"))?;
        let end = cell_u64(&row[end_col])
            .with_context(|| format!("GrandparentSegments row {row_label}: bad end"))?;
        if start > end {
            bail!("GrandparentSegments row {row_label}: inverted interval {start}..{end}");
        }

        segments.push(Segment {
            chromosome,
            owner_kit,
            lineage,
            start,
            end,
        });
    }
    Ok(segments)
}
