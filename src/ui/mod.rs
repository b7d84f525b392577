pub mod csv_log;
pub mod overlay;
pub mod summary;

use crate::analysis::holes::HoleInterval;

/// `[start-last:width]` for each hole, joined with `sep`.
pub fn hole_detail<'a>(holes: impl Iterator<Item = &'a HoleInterval>, sep: &str) -> String {
    holes
        .map(|h| format!("[{}-{}:{}]", h.start, h.last(), h.width()))
        .collect::<Vec<_>>()
        .join(sep)
}
