use anyhow::Result;
use clap::Parser;

use kinsweep::pipeline::triangulate;
use kinsweep::roster_io::load_workbook;
use kinsweep::triang_io::{load_triang_index, write_matched_csv};

/// kinsweep - segment triangulation and lineage filtering
///
/// Sweeps grandparent-attributed segments into sibling overlap windows, then
/// filters each sibling's triangulation export down to the match records
/// consistent with the window's grandparent lineage.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Roster workbook (Siblings/Cousins/Grandparents/GrandparentSegments sheets)
    #[clap(short = 'w', long = "workbook")]
    workbook: String,

    /// Directory of per-sibling triangulation exports (<kit>.csv)
    #[clap(short = 'd', long = "triang-dir")]
    triang_dir: String,

    /// Output CSV of matched triangulations
    #[clap(short = 'o', long = "output", default_value = "matched_triangulations.csv")]
    output: String,

    /// Number of threads for parallel processing
    #[clap(short = 't', long = "threads", default_value = "8")]
    threads: usize,

    /// Quiet mode (no progress output)
    #[clap(long = "quiet")]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build_global()?;

    let (roster, segments) = load_workbook(&args.workbook)?;
    if !args.quiet {
        eprintln!(
            "Loaded {} siblings, {} cousins, {} segments from {}",
            roster.num_siblings(),
            roster.num_cousins(),
            segments.len(),
            args.workbook
        );
    }

    let index = load_triang_index(&args.triang_dir, &roster)?;
    if !args.quiet {
        let stats = index.stats();
        eprintln!(
            "Indexed {} triangulation records in {} (sibling, chromosome) groups",
            stats.num_records, stats.num_groups
        );
    }

    let (accepted, summary) = triangulate(segments, &roster, &index);
    write_matched_csv(&args.output, &accepted)?;

    if !args.quiet {
        eprintln!(
            "Swept {} windows across {} groups; wrote {} matched records to {}",
            summary.windows, summary.groups, summary.accepted, args.output
        );
    }

    Ok(())
}
