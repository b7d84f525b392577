/// Reachability: breadth-first flood fill over footholds.
///
/// The worklist holds candidate positions. Each one is dropped through
/// `simulate_fall`; a landing not seen before becomes a confirmed foothold,
/// and its walk and jump moves feed new candidates back into the queue.
/// Every foothold is finalized once, so the run is bounded by
/// O(W · H · jump_height · jump_radius).
///
/// The resulting matrix marks every confirmed foothold and the solid tile
/// it stands on (the walked-on surface).

use std::collections::VecDeque;
use std::fmt;

use crate::domain::grid::TileGrid;
use crate::domain::physics::{self, MovementModel};

/// W×H reachability bitset. Cells only ever flip to `true`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessibilityMatrix {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl AccessibilityMatrix {
    pub fn new(width: usize, height: usize) -> Self {
        AccessibilityMatrix { width, height, cells: vec![false; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) outside {}x{} matrix",
            self.width,
            self.height
        );
        y * self.width + x
    }

    pub fn is_reachable(&self, x: usize, y: usize) -> bool {
        self.cells[self.index(x, y)]
    }

    fn mark(&mut self, x: usize, y: usize) {
        let i = self.index(x, y);
        self.cells[i] = true;
    }

    pub fn reachable_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Reachable cells in row-major order.
    pub fn iter_reachable(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let w = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c)
            .map(move |(i, _)| (i % w, i / w))
    }
}

/// One row per line, `1` for reachable and `0` otherwise.
impl fmt::Display for AccessibilityMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for &c in row {
                f.write_str(if c { "1" } else { "0" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Flood-fill the level from its start position.
///
/// A level with no start marker and no ground yields an all-false matrix.
pub fn compute_accessibility(grid: &TileGrid, model: &MovementModel) -> AccessibilityMatrix {
    let (w, h) = (grid.width(), grid.height());
    let mut matrix = AccessibilityMatrix::new(w, h);
    let mut visited = vec![false; w * h];

    let start = match grid.find_start() {
        Some(s) => s,
        None => return matrix,
    };

    let mut queue: VecDeque<(usize, usize)> = VecDeque::with_capacity(256);
    queue.push_back(start);

    while let Some((x, y)) = queue.pop_front() {
        let fy = match physics::simulate_fall(grid, x, y) {
            Some(fy) => fy,
            None => continue,
        };
        if visited[fy * w + x] {
            continue;
        }
        visited[fy * w + x] = true;
        matrix.mark(x, fy);
        // the surface under the foothold is walked on too
        matrix.mark(x, fy + 1);

        walk(grid, model, x, fy, &visited, &mut queue);
        jump(grid, model, x, fy, &visited, &mut queue);
    }

    matrix
}

/// Push `(x, y)` after dropping it, unless its landing is already final.
fn enqueue_landing(
    grid: &TileGrid,
    x: usize,
    y: usize,
    visited: &[bool],
    queue: &mut VecDeque<(usize, usize)>,
) {
    if let Some(ly) = physics::simulate_fall(grid, x, y) {
        if !visited[ly * grid.width() + x] {
            queue.push_back((x, ly));
        }
    }
}

/// Walk left and right along the foothold row.
///
/// Walking continues while the next cell is open and supported. The first
/// unsupported step drops the character off the ledge and ends that
/// direction.
fn walk(
    grid: &TileGrid,
    model: &MovementModel,
    fx: usize,
    fy: usize,
    visited: &[bool],
    queue: &mut VecDeque<(usize, usize)>,
) {
    let limit = model.max_walk_distance.unwrap_or(grid.width());
    for dir in [-1isize, 1] {
        let mut x = fx;
        for _ in 0..limit {
            let Some((nx, ny)) = physics::offset(grid, x, fy, dir, 0) else { break };
            if !grid.is_walkable(nx, ny) || grid.is_solid(nx, ny) {
                break;
            }
            enqueue_landing(grid, nx, ny, visited, queue);
            if !physics::has_footing(grid, nx, ny) {
                break;
            }
            x = nx;
        }
    }
}

/// Try every cell of the jump-reach box above the foothold.
fn jump(
    grid: &TileGrid,
    model: &MovementModel,
    fx: usize,
    fy: usize,
    visited: &[bool],
    queue: &mut VecDeque<(usize, usize)>,
) {
    for (dx, dy) in model.jump_offsets() {
        let Some((nx, ny)) = physics::offset(grid, fx, fy, dx, dy) else { continue };
        if !grid.is_walkable(nx, ny) {
            continue;
        }
        enqueue_landing(grid, nx, ny, visited, queue);
    }
}
