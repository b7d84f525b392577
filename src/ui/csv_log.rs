/// CSV run log. Rows are appended, so repeated runs accumulate in one file;
/// the header is written only when the file is new or empty.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::analysis::report::MetricsReport;
use crate::batch::LevelOutcome;
use crate::error::{ProbeError, ProbeResult};

use super::hole_detail;

pub const HEADER: &str = "LevelPath,Width,Height,Coherence,Leniency,Linearity,GroundSegments,\
StructuralDiversity,UnjumpableHoles,TotalVerticalHoles,LargeVerticalHolesDetail,EndReachable";

/// One CSV line (no trailing newline).
pub fn format_row(level_path: &Path, report: &MetricsReport, large_hole_width: usize) -> String {
    let detail = hole_detail(report.large_vertical_holes(large_hole_width), ";");
    format!(
        "\"{}\",{},{},{:.2},{},{:.6},{},{},{},{},\"{}\",{}",
        level_path.display().to_string().replace('"', "\"\""),
        report.width,
        report.height,
        report.structural_coherence,
        report.leniency,
        report.linearity,
        report.ground_segments,
        report.structural_diversity,
        report.unjumpable_holes,
        report.vertical_hole_count,
        detail,
        report.end_reachable,
    )
}

/// Append one row per successfully analyzed level. Returns the row count.
pub fn append_reports(
    path: &Path,
    outcomes: &[LevelOutcome],
    large_hole_width: usize,
) -> ProbeResult<usize> {
    let write_err = |source| ProbeError::Write { path: path.to_path_buf(), source };

    let needs_header = std::fs::metadata(path).map_or(true, |m| m.len() == 0);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(write_err)?;
    let mut writer = BufWriter::new(file);

    if needs_header {
        writeln!(writer, "{HEADER}").map_err(write_err)?;
    }

    let mut rows = 0;
    for outcome in outcomes {
        if let Ok(report) = &outcome.result {
            writeln!(writer, "{}", format_row(&outcome.path, report, large_hole_width))
                .map_err(write_err)?;
            rows += 1;
        }
    }
    writer.flush().map_err(write_err)?;
    Ok(rows)
}
