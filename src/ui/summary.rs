/// Console summary: one aligned key/value block per level.

use std::fmt::Write;

use crate::analysis::report::MetricsReport;

use super::hole_detail;

pub fn format_report(name: &str, report: &MetricsReport, large_hole_width: usize) -> String {
    let mut out = String::new();
    let large = hole_detail(report.large_vertical_holes(large_hole_width), " ");

    // String formatting cannot fail.
    let _ = writeln!(out, "== {name} ({}x{}) ==", report.width, report.height);
    let _ = writeln!(out, "  {:<22}{}", "leniency", report.leniency);
    let _ = writeln!(out, "  {:<22}{:.6}", "linearity", report.linearity);
    let _ = writeln!(out, "  {:<22}{}", "ground segments", report.ground_segments);
    let _ = writeln!(out, "  {:<22}{}", "structural diversity", report.structural_diversity);
    let _ = writeln!(out, "  {:<22}{:.2}", "coherence", report.structural_coherence);
    let _ = writeln!(out, "  {:<22}{}", "end reachable", if report.end_reachable { "yes" } else { "no" });
    let _ = writeln!(out, "  {:<22}{}", "reachable cells", report.reachable_cells);
    let _ = writeln!(out, "  {:<22}{}", "unjumpable holes", report.unjumpable_holes);
    let _ = writeln!(out, "  {:<22}{}", "vertical holes", report.vertical_hole_count);
    let _ = writeln!(
        out,
        "  {:<22}{}",
        format!("holes >= {large_hole_width} wide"),
        if large.is_empty() { "-" } else { large.as_str() }
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::report::{analyze_text, AnalysisSettings};

    #[test]
    fn summary_lists_metrics_and_wide_holes() {
        let text = "\
M---------------
XX--------XX---X
";
        let r = analyze_text(text, &AnalysisSettings::default()).unwrap();
        let s = format_report("pit", &r, 6);
        assert!(s.starts_with("== pit (16x2) ==\n"));
        assert!(s.contains("unjumpable holes      1\n"), "{s}");
        assert!(s.contains("vertical holes        2\n"), "{s}");
        assert!(s.contains("holes >= 6 wide       [2-9:8]\n"), "{s}");
        assert!(s.contains("end reachable         no\n"), "{s}");
    }

    #[test]
    fn no_wide_holes_prints_dash() {
        let r = analyze_text("M--\nXXX\n", &AnalysisSettings::default()).unwrap();
        let s = format_report("flat", &r, 6);
        assert!(s.contains("holes >= 6 wide       -\n"), "{s}");
        assert!(s.contains("coherence             1.00\n"), "{s}");
    }
}
