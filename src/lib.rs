//! levelprobe: static playability and structure metrics for tile-based
//! platformer levels.
//!
//! Layers, bottom-up:
//!   domain:   tiles, the parsed grid, movement physics
//!   analysis: reachability fill, hole analysis, structural metrics
//!   levels, batch, config: files, parallel runs, `levelprobe.toml`
//!   ui:       console summary, CSV log, terminal overlay

pub mod analysis;
pub mod batch;
pub mod config;
pub mod domain;
pub mod error;
pub mod levels;
pub mod ui;

pub use analysis::reach::{compute_accessibility, AccessibilityMatrix};
pub use analysis::report::{analyze, analyze_text, AnalysisSettings, MetricsReport};
pub use config::ProbeConfig;
pub use domain::grid::TileGrid;
pub use domain::physics::MovementModel;
pub use error::{FormatError, ProbeError, ProbeResult};
