/// Hole analysis: vertical holes, unjumpable gaps, end reachability.
///
/// A *vertical hole* is a run of columns with no ground-like tile anywhere.
/// An *unjumpable hole* is a gap in the main ground row (the lowest row with
/// any ground) that is wider than the jump distance and has no elevated
/// ground run close enough to either of its edges.
///
/// The bridging check is a static proximity test. It does not prove the
/// elevated run can itself be reached by a chain of valid jumps.

use serde::Serialize;

use crate::domain::grid::TileGrid;

use super::reach::AccessibilityMatrix;

/// Half-open column range `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HoleInterval {
    pub start: usize,
    pub end: usize,
}

impl HoleInterval {
    pub fn width(&self) -> usize {
        self.end - self.start
    }

    /// Last column inside the hole.
    pub fn last(&self) -> usize {
        self.end - 1
    }
}

/// Gap-crossing parameters for `count_unjumpable_holes`. Independent of the
/// reachability movement model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoleRules {
    pub max_jump_distance: usize,
    pub max_jump_height: usize,
}

impl Default for HoleRules {
    fn default() -> Self {
        HoleRules { max_jump_distance: 6, max_jump_height: 6 }
    }
}

/// Contiguous runs of columns without any ground. A run reaching the right
/// edge ends at `width`.
pub fn find_vertical_holes(grid: &TileGrid) -> Vec<HoleInterval> {
    let mut holes = vec![];
    let mut hole_start: Option<usize> = None;

    for x in 0..grid.width() {
        let empty = !grid.column_has_ground(x);
        match (empty, hole_start) {
            (true, None) => hole_start = Some(x),
            (false, Some(start)) => {
                holes.push(HoleInterval { start, end: x });
                hole_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = hole_start {
        holes.push(HoleInterval { start, end: grid.width() });
    }
    holes
}

/// Split row `y` of columns `[from, to)` into maximal ground / non-ground runs.
fn runs(grid: &TileGrid, y: usize, from: usize, to: usize) -> Vec<(bool, HoleInterval)> {
    let mut out = vec![];
    let mut x = from;
    while x < to {
        let ground = grid.is_ground(x, y);
        let start = x;
        while x < to && grid.is_ground(x, y) == ground {
            x += 1;
        }
        out.push((ground, HoleInterval { start, end: x }));
    }
    out
}

/// Horizontal distance check: `d` must be non-negative and within reach.
#[inline]
fn within(d: isize, reach: usize) -> bool {
    d >= 0 && d as usize <= reach
}

/// Can an elevated run `[p_start, p_end)` be reached from either edge of
/// the gap `[gap.start, gap.end)`?
fn bridges(gap: HoleInterval, p_start: usize, p_end: usize, width: usize, reach: usize) -> bool {
    let (ps, pe) = (p_start as isize, p_end as isize);
    if gap.start > 0 {
        let left = gap.start as isize - 1;
        if within(ps - left, reach) || within(pe - 1 - left, reach) {
            return true;
        }
    }
    if gap.end < width {
        let right = gap.end as isize;
        if within(right - pe + 1, reach) || within(right - ps, reach) {
            return true;
        }
    }
    false
}

/// Gaps in the main ground row that cannot be crossed.
pub fn count_unjumpable_holes(grid: &TileGrid, rules: &HoleRules) -> usize {
    let ground_row = match grid.main_ground_row() {
        Some(y) => y,
        None => return 0,
    };

    runs(grid, ground_row, 0, grid.width())
        .into_iter()
        .filter(|&(ground, gap)| !ground && gap.width() > rules.max_jump_distance)
        .filter(|&(_, gap)| !is_bridged(grid, ground_row, gap, rules))
        .count()
}

fn is_bridged(grid: &TileGrid, ground_row: usize, gap: HoleInterval, rules: &HoleRules) -> bool {
    (1..=rules.max_jump_height)
        .map_while(|dy| ground_row.checked_sub(dy))
        .any(|py| {
            runs(grid, py, gap.start, gap.end)
                .into_iter()
                .filter(|&(ground, _)| ground)
                .any(|(_, p)| bridges(gap, p.start, p.end, grid.width(), rules.max_jump_distance))
        })
}

/// Is the end of the level reachable?
///
/// With an exit marker: whether the marker cell is reachable. Without one:
/// the lowest solid cell of the last column is located and the standing
/// surface of its stack (the topmost solid cell above it) is checked.
pub fn is_level_end_reachable(grid: &TileGrid, matrix: &AccessibilityMatrix) -> bool {
    if let Some((x, y)) = grid.find_exit() {
        return matrix.is_reachable(x, y);
    }
    let x = grid.width() - 1;
    match (0..grid.height()).rev().find(|&y| grid.is_solid(x, y)) {
        Some(y) => {
            let top = grid.stack_top(x, y, |t| t.is_solid());
            matrix.is_reachable(x, top)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::reach::compute_accessibility;
    use crate::domain::grid::grid_from;
    use crate::domain::physics::MovementModel;

    fn rules(distance: usize, height: usize) -> HoleRules {
        HoleRules { max_jump_distance: distance, max_jump_height: height }
    }

    #[test]
    fn vertical_holes_middle_and_right_edge() {
        let g = grid_from(&[
            "---------",
            "XX--XX---",
        ]);
        let holes = find_vertical_holes(&g);
        assert_eq!(holes, vec![
            HoleInterval { start: 2, end: 4 },
            HoleInterval { start: 6, end: 9 },
        ]);
        assert_eq!(holes[1].width(), 3);
        assert_eq!(holes[1].last(), 8);
    }

    #[test]
    fn column_with_floating_block_is_not_a_hole() {
        let g = grid_from(&[
            "--S--",
            "-----",
            "XX-XX",
        ]);
        assert!(find_vertical_holes(&g).is_empty());
    }

    #[test]
    fn no_ground_is_one_big_hole() {
        let g = grid_from(&["----", "----"]);
        assert_eq!(find_vertical_holes(&g), vec![HoleInterval { start: 0, end: 4 }]);
    }

    #[test]
    fn single_gap_against_jump_distance() {
        let g = grid_from(&[
            "--------------",
            "XXX-------XXXX",
        ]);
        // gap of 7
        assert_eq!(count_unjumpable_holes(&g, &rules(6, 6)), 1);
        assert_eq!(count_unjumpable_holes(&g, &rules(7, 6)), 0);
    }

    #[test]
    fn elevated_run_bridges_wide_gap() {
        let g = grid_from(&[
            "----------------",
            "----------------",
            "-------SS-------",
            "----------------",
            "XXX----------XXX",
        ]);
        // gap [3, 13), width 10; bricks at 7..9 sit 2 rows up, 5 columns
        // from the left edge (x = 2)
        assert_eq!(count_unjumpable_holes(&g, &rules(6, 6)), 0);
        // too high for a ceiling of 1
        assert_eq!(count_unjumpable_holes(&g, &rules(6, 1)), 1);
    }

    #[test]
    fn elevated_run_too_far_from_both_edges() {
        let g = grid_from(&[
            "------------------------",
            "-----------S------------",
            "XX--------------------XX",
        ]);
        // gap [2, 22), brick at 11: 10 from the left edge (x = 1), 11 from the right (x = 22)
        assert_eq!(count_unjumpable_holes(&g, &rules(6, 6)), 1);
    }

    #[test]
    fn main_ground_row_is_lowest_ground() {
        let g = grid_from(&[
            "SSSSSSSSSSSS",
            "------------",
            "XX--------XX",
            "------------",
        ]);
        // row 0 is all bricks but only 2 rows up; the ceiling of 1 misses it
        assert_eq!(count_unjumpable_holes(&g, &rules(6, 1)), 1);
        assert_eq!(count_unjumpable_holes(&g, &rules(6, 2)), 0);
    }

    #[test]
    fn no_ground_means_no_unjumpable_holes() {
        let g = grid_from(&["-----", "-----"]);
        assert_eq!(count_unjumpable_holes(&g, &HoleRules::default()), 0);
    }

    #[test]
    fn end_reachable_via_exit_marker() {
        let g = grid_from(&[
            "M-----F",
            "XXXXXXX",
        ]);
        let m = compute_accessibility(&g, &MovementModel::default());
        assert!(is_level_end_reachable(&g, &m));
    }

    #[test]
    fn exit_behind_pit_is_unreachable() {
        let g = grid_from(&[
            "M------------F",
            "XXX---------XX",
        ]);
        let m = compute_accessibility(&g, &MovementModel::default());
        assert!(!is_level_end_reachable(&g, &m));
    }

    #[test]
    fn end_without_marker_uses_last_column_surface() {
        let g = grid_from(&[
            "M-----",
            "XXXXXX",
            "XXXXXX",
        ]);
        let m = compute_accessibility(&g, &MovementModel::default());
        assert!(is_level_end_reachable(&g, &m));
    }

    #[test]
    fn end_without_solid_in_last_column() {
        let g = grid_from(&[
            "M----",
            "XXXX-",
        ]);
        let m = compute_accessibility(&g, &MovementModel::default());
        assert!(!is_level_end_reachable(&g, &m));
    }
}
