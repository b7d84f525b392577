//! Level model: tiles, the grid, and the movement model.

pub mod grid;
pub mod physics;
pub mod tile;
