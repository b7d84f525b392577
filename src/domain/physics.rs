/// Movement model, the approximate physics shared by the analyzers.
///
/// ## Footing
///
/// A cell is a FOOTHOLD if:
///   - the character can occupy it (walkable), and
///   - the cell directly below is SOLID.
///
/// There is no support at the bottom edge: a character standing in the last
/// row would be standing on nothing. The literal floor of a level is the
/// solid row itself, and it counts as reached through the foothold above it.
///
/// ## Fall
///
/// From a candidate cell the character drops straight down through walkable,
/// non-solid cells until the cell below is solid. Leaving the grid through
/// the bottom, or starting inside a non-walkable cell, means no landing.
///
/// ## Jump reach
///
/// A jump from a foothold can end anywhere in the box
/// `dx ∈ [-radius, radius]`, `h ∈ [1, height]` above it; the character then
/// falls from there. No trajectories, no momentum.

use super::grid::TileGrid;

/// Movement parameters. Callers supply them; nothing here is compiled in
/// except the defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovementModel {
    /// Rows a jump can climb.
    pub max_jump_height: usize,
    /// Columns a jump can cover left or right.
    pub max_jump_radius: usize,
    /// Steps a single walk may take; `None` walks until an edge or a ledge.
    pub max_walk_distance: Option<usize>,
}

impl Default for MovementModel {
    fn default() -> Self {
        MovementModel {
            max_jump_height: 6,
            max_jump_radius: 4,
            max_walk_distance: None,
        }
    }
}

impl MovementModel {
    /// Candidate offsets of one jump, in a fixed order (row by row upward,
    /// left to right within a row).
    pub fn jump_offsets(&self) -> impl Iterator<Item = (isize, isize)> + '_ {
        let r = self.max_jump_radius as isize;
        (1..=self.max_jump_height as isize)
            .flat_map(move |h| (-r..=r).map(move |dx| (dx, -h)))
    }
}

/// Apply a signed offset, returning `None` outside the grid.
#[inline]
pub fn offset(grid: &TileGrid, x: usize, y: usize, dx: isize, dy: isize) -> Option<(usize, usize)> {
    let nx = x.checked_add_signed(dx)?;
    let ny = y.checked_add_signed(dy)?;
    grid.in_bounds(nx, ny).then_some((nx, ny))
}

/// Is the cell directly below (x, y) solid?
#[inline]
pub fn has_footing(grid: &TileGrid, x: usize, y: usize) -> bool {
    y + 1 < grid.height() && grid.is_solid(x, y + 1)
}

/// Can the character stand at (x, y)?
pub fn is_foothold(grid: &TileGrid, x: usize, y: usize) -> bool {
    grid.is_walkable(x, y) && !grid.is_solid(x, y) && has_footing(grid, x, y)
}

/// Drop from (x, y) and return the landing row, if any.
pub fn simulate_fall(grid: &TileGrid, x: usize, y: usize) -> Option<usize> {
    if !grid.is_walkable(x, y) || grid.is_solid(x, y) {
        return None;
    }
    let mut cy = y;
    loop {
        if has_footing(grid, x, cy) {
            return Some(cy);
        }
        let below = cy + 1;
        if below >= grid.height() {
            return None; // fell out of the level
        }
        if !grid.is_walkable(x, below) {
            return None;
        }
        cy = below;
    }
}
