/// Structural metrics: pure functions of the grid (plus the accessibility
/// matrix for coherence). Each one is a single full scan.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::grid::TileGrid;

use super::reach::AccessibilityMatrix;

/// Which rows `ground_segments` counts runs on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroundSegmentMode {
    /// Only the main ground row (the lowest row with any ground).
    #[default]
    MainRow,
    /// Every row, summed.
    AllRows,
}

/// Difficulty score: −2 per enemy, −1 per solid tile. Lower is harder.
pub fn leniency(grid: &TileGrid) -> i64 {
    grid.cells()
        .map(|(_, _, t)| {
            if t.is_enemy() {
                -2
            } else if t.is_solid() {
                -1
            } else {
                0
            }
        })
        .sum()
}

/// Height of the ground in column `x`: rows above the bottom edge of the
/// first ground-like cell met scanning upward.
fn ground_height(grid: &TileGrid, x: usize) -> Option<usize> {
    let h = grid.height();
    (0..h).rev().find(|&y| grid.is_ground(x, y)).map(|y| h - 1 - y)
}

/// Population variance of per-column ground heights. Columns without any
/// ground are left out; no ground at all gives 0.0.
pub fn linearity(grid: &TileGrid) -> f64 {
    let heights: Vec<f64> = (0..grid.width())
        .filter_map(|x| ground_height(grid, x))
        .map(|h| h as f64)
        .collect();
    if heights.is_empty() {
        return 0.0;
    }
    let n = heights.len() as f64;
    let mean = heights.iter().sum::<f64>() / n;
    heights.iter().map(|h| (h - mean).powi(2)).sum::<f64>() / n
}

fn row_segments(grid: &TileGrid, y: usize) -> usize {
    let mut count = 0;
    let mut in_segment = false;
    for x in 0..grid.width() {
        let ground = grid.is_ground(x, y);
        if ground && !in_segment {
            count += 1;
        }
        in_segment = ground;
    }
    count
}

/// Number of maximal horizontal runs of ground-like tiles.
pub fn ground_segments(grid: &TileGrid, mode: GroundSegmentMode) -> usize {
    match mode {
        GroundSegmentMode::MainRow => grid
            .main_ground_row()
            .map_or(0, |y| row_segments(grid, y)),
        GroundSegmentMode::AllRows => (0..grid.height()).map(|y| row_segments(grid, y)).sum(),
    }
}

/// Number of distinct 2×2 symbol motifs over all overlapping windows.
pub fn structural_diversity(grid: &TileGrid) -> usize {
    let (w, h) = (grid.width(), grid.height());
    if w < 2 || h < 2 {
        return 0;
    }
    let mut motifs: HashSet<[char; 4]> = HashSet::new();
    for y in 0..h - 1 {
        for x in 0..w - 1 {
            motifs.insert([
                grid.symbol(x, y),
                grid.symbol(x + 1, y),
                grid.symbol(x, y + 1),
                grid.symbol(x + 1, y + 1),
            ]);
        }
    }
    motifs.len()
}

/// Share of solid-or-ground cells the character reaches. 0/0 is 0.0.
pub fn structural_coherence(grid: &TileGrid, matrix: &AccessibilityMatrix) -> f64 {
    let (reached, total) = grid
        .cells()
        .filter(|&(_, _, t)| t.is_solid_or_ground())
        .fold((0usize, 0usize), |(r, n), (x, y, _)| {
            (r + matrix.is_reachable(x, y) as usize, n + 1)
        });
    if total == 0 {
        0.0
    } else {
        reached as f64 / total as f64
    }
}
