/// MetricsReport: everything measured about one level, assembled once.

use serde::Serialize;

use crate::domain::grid::TileGrid;
use crate::domain::physics::MovementModel;
use crate::error::FormatError;

use super::holes::{self, HoleInterval, HoleRules};
use super::reach::{self, AccessibilityMatrix};
use super::structure::{self, GroundSegmentMode};

/// Parameters for a full analysis run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnalysisSettings {
    pub movement: MovementModel,
    pub holes: HoleRules,
    pub ground_segments: GroundSegmentMode,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetricsReport {
    pub width: usize,
    pub height: usize,
    pub leniency: i64,
    pub linearity: f64,
    pub ground_segments: usize,
    pub structural_diversity: usize,
    pub vertical_holes: Vec<HoleInterval>,
    pub vertical_hole_count: usize,
    pub unjumpable_holes: usize,
    pub structural_coherence: f64,
    pub end_reachable: bool,
    pub reachable_cells: usize,
}

impl MetricsReport {
    /// Vertical holes at least `min_width` columns wide.
    pub fn large_vertical_holes(&self, min_width: usize) -> impl Iterator<Item = &HoleInterval> {
        self.vertical_holes.iter().filter(move |h| h.width() >= min_width)
    }
}

/// Run every analyzer on `grid`.
pub fn analyze(grid: &TileGrid, settings: &AnalysisSettings) -> MetricsReport {
    analyze_with_matrix(grid, settings).0
}

/// Like `analyze`, also handing back the accessibility matrix.
pub fn analyze_with_matrix(
    grid: &TileGrid,
    settings: &AnalysisSettings,
) -> (MetricsReport, AccessibilityMatrix) {
    let matrix = reach::compute_accessibility(grid, &settings.movement);
    let vertical_holes = holes::find_vertical_holes(grid);

    let report = MetricsReport {
        width: grid.width(),
        height: grid.height(),
        leniency: structure::leniency(grid),
        linearity: structure::linearity(grid),
        ground_segments: structure::ground_segments(grid, settings.ground_segments),
        structural_diversity: structure::structural_diversity(grid),
        vertical_hole_count: vertical_holes.len(),
        vertical_holes,
        unjumpable_holes: holes::count_unjumpable_holes(grid, &settings.holes),
        structural_coherence: structure::structural_coherence(grid, &matrix),
        end_reachable: holes::is_level_end_reachable(grid, &matrix),
        reachable_cells: matrix.reachable_count(),
    };
    (report, matrix)
}

/// Parse level text and analyze it.
pub fn analyze_text(text: &str, settings: &AnalysisSettings) -> Result<MetricsReport, FormatError> {
    let grid = TileGrid::parse(text)?;
    Ok(analyze(&grid, settings))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
----------------------
----------------------
-----------SSS--------
----------------------
--M-----g------k----F-
XXXXXXX--------XXXXXXX
XXXXXXX--------XXXXXXX
";

    #[test]
    fn full_report_on_sample() {
        let r = analyze_text(SAMPLE, &AnalysisSettings::default()).unwrap();
        assert_eq!((r.width, r.height), (22, 7));
        // the bricks count as ground, so their columns are not vertical holes
        assert_eq!(r.vertical_holes, vec![
            HoleInterval { start: 7, end: 11 },
            HoleInterval { start: 14, end: 15 },
        ]);
        assert_eq!(r.vertical_hole_count, 2);
        // gap of 8 in the ground row, bricks 4 rows up start 5 columns from the left edge
        assert_eq!(r.unjumpable_holes, 0);
        assert_eq!(r.ground_segments, 2);
        // two enemies, 3 bricks, 28 ground
        assert_eq!(r.leniency, -4 - 31);
        assert!(r.linearity > 0.0);
        assert!(!r.end_reachable);
        assert!(r.structural_coherence > 0.0 && r.structural_coherence < 1.0);
        assert_eq!(r.large_vertical_holes(4).count(), 1);
        assert_eq!(r.large_vertical_holes(5).count(), 0);
    }

    #[test]
    fn wider_jumps_reach_the_exit() {
        let mut settings = AnalysisSettings::default();
        settings.movement.max_jump_radius = 9;
        let r = analyze_text(SAMPLE, &settings).unwrap();
        assert!(r.end_reachable);
    }

    #[test]
    fn format_errors_surface() {
        assert_eq!(
            analyze_text("---\n--\n", &AnalysisSettings::default()).unwrap_err(),
            FormatError::RaggedRow { row: 1, expected: 3, found: 2 }
        );
    }

    #[test]
    fn matrix_matches_report() {
        let grid = TileGrid::parse(SAMPLE).unwrap();
        let (report, matrix) = analyze_with_matrix(&grid, &AnalysisSettings::default());
        assert_eq!(report.reachable_cells, matrix.reachable_count());
        assert_eq!(report, analyze(&grid, &AnalysisSettings::default()));
    }
}
