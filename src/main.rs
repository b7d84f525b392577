/// Entry point: command-line front end.
///
///   levelprobe analyze [PATHS...]   metrics for level files / directories
///   levelprobe map <FILE>           reachability overlay for one level

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use serde::Serialize;

use levelprobe::analysis::report::MetricsReport;
use levelprobe::batch;
use levelprobe::levels::{self, LevelSource};
use levelprobe::ui::{csv_log, overlay, summary};
use levelprobe::{compute_accessibility, ProbeConfig, ProbeError, ProbeResult, TileGrid};

#[derive(Parser)]
#[command(name = "levelprobe", version, about = "Playability and structure metrics for platformer levels")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze level files or directories of `.txt` levels
    Analyze(AnalyzeArgs),
    /// Draw one level with its reachability overlay
    Map(MapArgs),
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// Level files or directories (default: the configured levels dir)
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Explicit config file instead of the searched `levelprobe.toml`
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print a JSON document instead of the console summary
    #[arg(long)]
    json: bool,

    /// Append one row per level to this CSV file
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Worker threads (0 = one per core)
    #[arg(long, value_name = "N")]
    threads: Option<usize>,

    /// Report timing and skipped files on stderr
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Parser)]
struct MapArgs {
    #[arg(value_name = "FILE")]
    file: PathBuf,

    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the bare 0/1 accessibility matrix
    #[arg(long)]
    plain: bool,
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    name: &'a str,
    path: &'a Path,
    report: &'a MetricsReport,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Analyze(args) => run_analyze(args),
        Command::Map(args) => Ok(run_map(args)?),
    }
}

fn load_config(explicit: Option<&Path>) -> ProbeResult<ProbeConfig> {
    match explicit {
        Some(path) => ProbeConfig::load_from(path),
        None => Ok(ProbeConfig::load()),
    }
}

// ══════════════════════════════════════════════════════════════
// analyze
// ══════════════════════════════════════════════════════════════

fn run_analyze(args: AnalyzeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(args.config.as_deref())?;
    batch::init_threads(args.threads.unwrap_or(config.threads));

    let roots = if args.paths.is_empty() {
        vec![config.levels_dir.clone()]
    } else {
        args.paths.clone()
    };

    let mut failures = 0usize;
    let sources = gather_sources(&roots, args.verbose, &mut failures);

    let started = Instant::now();
    let outcomes = batch::analyze_levels(&sources, &config);
    if args.verbose {
        eprintln!(
            "analyzed {} level(s) in {:.1} ms",
            outcomes.len(),
            started.elapsed().as_secs_f64() * 1000.0
        );
    }

    for outcome in &outcomes {
        if let Err(source) = &outcome.result {
            let err = ProbeError::Level { path: outcome.path.clone(), source: source.clone() };
            eprintln!("Warning: {err}");
            failures += 1;
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        let records: Vec<JsonRecord> = outcomes
            .iter()
            .filter_map(|o| {
                o.result.as_ref().ok().map(|report| JsonRecord {
                    name: &o.name,
                    path: &o.path,
                    report,
                })
            })
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&records).map_err(ProbeError::from)?)?;
    } else {
        for o in &outcomes {
            if let Ok(report) = &o.result {
                writeln!(out, "{}", summary::format_report(&o.name, report, config.large_hole_width))?;
            }
        }
    }

    if let Some(csv_path) = &args.csv {
        let rows = csv_log::append_reports(csv_path, &outcomes, config.large_hole_width)?;
        if args.verbose {
            eprintln!("appended {rows} row(s) to {}", csv_path.display());
        }
    }

    if failures > 0 {
        return Err(format!("{failures} level(s) could not be analyzed").into());
    }
    Ok(())
}

/// Expand every root and read its level files. Unreadable entries are
/// reported and counted, the rest are returned in order.
fn gather_sources(roots: &[PathBuf], verbose: bool, failures: &mut usize) -> Vec<LevelSource> {
    let mut sources = vec![];
    for root in roots {
        let paths = match levels::collect_level_paths(root) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Warning: {e}");
                *failures += 1;
                continue;
            }
        };
        for path in paths {
            match levels::read_level(&path) {
                Ok(src) => sources.push(src),
                Err(e) => {
                    eprintln!("Warning: {e}");
                    if verbose {
                        eprintln!("skipped {}", path.display());
                    }
                    *failures += 1;
                }
            }
        }
    }
    sources
}

// ══════════════════════════════════════════════════════════════
// map
// ══════════════════════════════════════════════════════════════

fn run_map(args: MapArgs) -> ProbeResult<()> {
    let config = load_config(args.config.as_deref())?;
    let src = levels::read_level(&args.file)?;
    let grid = TileGrid::parse(&src.text).map_err(|source| ProbeError::Level {
        path: src.path.clone(),
        source,
    })?;
    let matrix = compute_accessibility(&grid, &config.settings.movement);

    let write_err = |source| ProbeError::Write { path: PathBuf::from("<stdout>"), source };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.plain {
        overlay::render_plain(&mut out, &matrix).map_err(write_err)?;
    } else {
        writeln!(out, "{} ({}x{})", src.name, grid.width(), grid.height()).map_err(write_err)?;
        overlay::render(&mut out, &grid, &matrix).map_err(write_err)?;
        writeln!(out, "{}", overlay::legend()).map_err(write_err)?;
        writeln!(
            out,
            "reachable cells: {}  end reachable: {}",
            matrix.reachable_count(),
            levelprobe::analysis::holes::is_level_end_reachable(&grid, &matrix)
        )
        .map_err(write_err)?;
    }
    Ok(())
}
