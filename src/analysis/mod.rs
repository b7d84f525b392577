//! Analyzers. Everything here is a pure function of a `TileGrid` (and, for
//! coherence and end reachability, of an `AccessibilityMatrix`).

pub mod holes;
pub mod reach;
pub mod report;
pub mod structure;
