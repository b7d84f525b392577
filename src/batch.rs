/// Parallel batch analysis.
///
/// Levels are independent, so each one is parsed and analyzed on its own
/// rayon task. Results come back in input order.

use std::path::PathBuf;

use rayon::prelude::*;

use crate::analysis::report::{self, MetricsReport};
use crate::config::ProbeConfig;
use crate::error::FormatError;
use crate::levels::LevelSource;

/// Result of analyzing one level of a batch.
#[derive(Clone, Debug)]
pub struct LevelOutcome {
    pub name: String,
    pub path: PathBuf,
    pub result: Result<MetricsReport, FormatError>,
}

impl LevelOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Size the global rayon pool. 0 keeps rayon's default.
/// Call once, before the first batch.
pub fn init_threads(threads: usize) {
    if threads > 0 {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            eprintln!("Warning: could not size thread pool to {threads}: {e}");
        }
    }
}

pub fn analyze_levels(sources: &[LevelSource], config: &ProbeConfig) -> Vec<LevelOutcome> {
    let settings = config.settings;
    sources
        .par_iter()
        .map(|src| LevelOutcome {
            name: src.name.clone(),
            path: src.path.clone(),
            result: report::analyze_text(&src.text, &settings),
        })
        .collect()
}
