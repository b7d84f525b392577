/// Terminal map overlay: the level's symbols, colored by what the
/// reachability fill found.
///
///   reachable foothold   → green on dark green
///   reached surface      → bright tile color
///   unreached structure  → dim grey
///   enemy                → red, start / exit markers → yellow / cyan
///
/// Colors are batched with `queue!` and flushed once per map. Only the
/// foreground changes between cells, and only when it differs from the
/// previous cell.

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};

use crate::analysis::reach::AccessibilityMatrix;
use crate::domain::grid::TileGrid;
use crate::domain::tile::TileCategory;

const FOOTHOLD_BG: Color = Color::Rgb { r: 20, g: 60, b: 20 };

fn cell_colors(category: TileCategory, reachable: bool) -> (Color, Color) {
    match (category, reachable) {
        (TileCategory::StartMarker, _) => (Color::Yellow, Color::Reset),
        (TileCategory::ExitMarker, _) => (Color::Cyan, Color::Reset),
        (TileCategory::Enemy, true) => (Color::Red, FOOTHOLD_BG),
        (TileCategory::Enemy, false) => (Color::DarkRed, Color::Reset),
        (TileCategory::GroundLike | TileCategory::Solid, true) => {
            (Color::Rgb { r: 180, g: 120, b: 60 }, Color::Reset)
        }
        (TileCategory::GroundLike | TileCategory::Solid, false) => (Color::DarkGrey, Color::Reset),
        (_, true) => (Color::Green, FOOTHOLD_BG),
        (_, false) => (Color::Reset, Color::Reset),
    }
}

/// Draw `grid` with `matrix` overlaid. Empty reachable cells are shown
/// as `·` so footholds stand out.
pub fn render<W: Write>(out: &mut W, grid: &TileGrid, matrix: &AccessibilityMatrix) -> io::Result<()> {
    let mut last = (Color::Reset, Color::Reset);
    queue!(out, ResetColor)?;

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let reachable = matrix.is_reachable(x, y);
            let category = grid.traits(x, y).category();
            let colors = cell_colors(category, reachable);

            if colors != last {
                queue!(out, ResetColor)?;
                if colors.0 != Color::Reset {
                    queue!(out, SetForegroundColor(colors.0))?;
                }
                if colors.1 != Color::Reset {
                    queue!(out, SetBackgroundColor(colors.1))?;
                }
                last = colors;
            }

            let ch = match grid.symbol(x, y) {
                '-' if reachable => '·',
                c => c,
            };
            queue!(out, Print(ch))?;
        }
        queue!(out, ResetColor, Print('\n'))?;
        last = (Color::Reset, Color::Reset);
    }

    out.flush()
}

/// Legend line printed under the map.
pub fn legend() -> &'static str {
    "· reachable foothold   colored block: reached surface   grey: unreached"
}

/// The matrix alone, `0`/`1` per cell, one row per line.
pub fn render_plain<W: Write>(out: &mut W, matrix: &AccessibilityMatrix) -> io::Result<()> {
    write!(out, "{matrix}")?;
    out.flush()
}
