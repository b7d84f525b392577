/// Immutable tile grid parsed from level text.
///
/// Rows are lines, columns are characters. `y = 0` is the top row, so
/// "down" is `y + 1`. Symbols are kept verbatim (motif metrics need the raw
/// character) and each cell's capability set is classified once at load.
///
/// Coordinates outside `0..width` / `0..height` are a caller bug: the
/// accessors panic instead of returning a sentinel.

use crate::error::FormatError;

use super::tile::{classify, Tile, TileTraits};

#[derive(Clone, Debug)]
pub struct TileGrid {
    width: usize,
    height: usize,
    symbols: Vec<char>,
    traits: Vec<TileTraits>,
}

impl TileGrid {
    /// Parse a rectangular block of equal-length lines.
    ///
    /// Trailing blank lines are dropped (files usually end with a newline).
    /// No partial grid is ever returned.
    pub fn parse(text: &str) -> Result<TileGrid, FormatError> {
        let mut rows: Vec<&str> = text.lines().collect();
        while rows.last().map_or(false, |r| r.is_empty()) {
            rows.pop();
        }
        if rows.is_empty() {
            return Err(FormatError::Empty);
        }

        let width = rows[0].chars().count();
        if width == 0 {
            return Err(FormatError::ZeroWidth);
        }

        let height = rows.len();
        let mut symbols = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let before = symbols.len();
            symbols.extend(row.chars());
            let found = symbols.len() - before;
            if found != width {
                return Err(FormatError::RaggedRow { row: y, expected: width, found });
            }
        }

        let traits = symbols.iter().map(|&c| classify(c)).collect();
        Ok(TileGrid { width, height, symbols, traits })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            self.in_bounds(x, y),
            "cell ({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        y * self.width + x
    }

    /// Raw symbol at (x, y).
    #[inline]
    pub fn symbol(&self, x: usize, y: usize) -> char {
        self.symbols[self.index(x, y)]
    }

    #[inline]
    pub fn tile(&self, x: usize, y: usize) -> Tile {
        Tile::from_char(self.symbol(x, y))
    }

    #[inline]
    pub fn traits(&self, x: usize, y: usize) -> TileTraits {
        self.traits[self.index(x, y)]
    }

    pub fn is_solid(&self, x: usize, y: usize) -> bool {
        self.traits(x, y).is_solid()
    }

    pub fn is_walkable(&self, x: usize, y: usize) -> bool {
        self.traits(x, y).is_walkable()
    }

    pub fn is_ground(&self, x: usize, y: usize) -> bool {
        self.traits(x, y).is_ground()
    }

    /// All cells in row-major order with their coordinates.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, TileTraits)> + '_ {
        let w = self.width;
        self.traits.iter().enumerate().map(move |(i, &t)| (i % w, i / w, t))
    }

    /// Level text rows, one `String` per row.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.symbols.chunks(self.width).map(|row| row.iter().collect())
    }

    /// First cell carrying `marker`, scanning columns left to right and
    /// each column top to bottom.
    fn find_marker(&self, marker: TileTraits) -> Option<(usize, usize)> {
        (0..self.width)
            .flat_map(|x| (0..self.height).map(move |y| (x, y)))
            .find(|&(x, y)| self.traits(x, y).contains(marker))
    }

    /// Where the character begins.
    ///
    /// The explicit start marker wins. Otherwise: the first ground cell found
    /// scanning columns left to right and each column bottom to top; the start
    /// is the open cell directly above that ground stack. `None` when the level
    /// has no ground at all (or every ground stack reaches the top row).
    pub fn find_start(&self) -> Option<(usize, usize)> {
        if let Some(pos) = self.find_marker(TileTraits::START) {
            return Some(pos);
        }
        for x in 0..self.width {
            for y in (0..self.height).rev() {
                if !self.is_ground(x, y) {
                    continue;
                }
                let top = self.stack_top(x, y, |t| t.is_ground() || t.is_solid());
                if top > 0 {
                    return Some((x, top - 1));
                }
                break;
            }
        }
        None
    }

    pub fn find_exit(&self) -> Option<(usize, usize)> {
        self.find_marker(TileTraits::EXIT)
    }

    /// Topmost cell of the contiguous run of cells matching `pred` that
    /// contains (x, y), walking upward.
    pub fn stack_top(&self, x: usize, y: usize, pred: impl Fn(TileTraits) -> bool) -> usize {
        let mut top = y;
        while top > 0 && pred(self.traits(x, top - 1)) {
            top -= 1;
        }
        top
    }

    /// Lowest row containing any ground-like tile ("main ground row").
    pub fn main_ground_row(&self) -> Option<usize> {
        (0..self.height)
            .rev()
            .find(|&y| (0..self.width).any(|x| self.is_ground(x, y)))
    }

    /// Does column `x` contain any ground-like tile?
    pub fn column_has_ground(&self, x: usize) -> bool {
        (0..self.height).any(|y| self.is_ground(x, y))
    }
}

/// Build a grid from a string diagram (test fixtures).
#[cfg(test)]
pub(crate) fn grid_from(rows: &[&str]) -> TileGrid {
    TileGrid::parse(&rows.join("\n")).expect("valid test grid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trip_dimensions() {
        let text = "------\n--M---\nXXXXXX\n";
        let g = TileGrid::parse(text).unwrap();
        assert_eq!(g.height(), 3);
        assert_eq!(g.width(), 6);
        let rows: Vec<String> = g.rows().collect();
        assert_eq!(rows.join("\n") + "\n", text);
    }

    #[test]
    fn parse_accepts_crlf() {
        let g = TileGrid::parse("--\r\nXX\r\n").unwrap();
        assert_eq!((g.width(), g.height()), (2, 2));
        assert!(g.is_ground(1, 1));
    }

    #[test]
    fn parse_rejects_empty() {
        assert_eq!(TileGrid::parse("").unwrap_err(), FormatError::Empty);
        assert_eq!(TileGrid::parse("\n\n").unwrap_err(), FormatError::Empty);
    }

    #[test]
    fn parse_rejects_zero_width() {
        assert_eq!(TileGrid::parse("\n---\n").unwrap_err(), FormatError::ZeroWidth);
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        let err = TileGrid::parse("----\n---\nXXXX").unwrap_err();
        assert_eq!(err, FormatError::RaggedRow { row: 1, expected: 4, found: 3 });
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn out_of_bounds_access_panics() {
        let g = grid_from(&["--", "XX"]);
        g.symbol(2, 0);
    }

    #[test]
    fn start_marker_wins() {
        let g = grid_from(&[
            "-----",
            "---M-",
            "XXXXX",
        ]);
        assert_eq!(g.find_start(), Some((3, 1)));
    }

    #[test]
    fn start_falls_back_above_ground_stack() {
        let g = grid_from(&[
            "-----",
            "-----",
            "--XXX",
            "--XXX",
        ]);
        // first ground column is x=2, stack is two high
        assert_eq!(g.find_start(), Some((2, 1)));
    }

    #[test]
    fn no_start_without_ground() {
        let g = grid_from(&["---", "---"]);
        assert_eq!(g.find_start(), None);
    }

    #[test]
    fn main_ground_row_is_lowest() {
        let g = grid_from(&[
            "--X-",
            "----",
            "XX--",
            "----",
        ]);
        assert_eq!(g.main_ground_row(), Some(2));
        assert!(g.column_has_ground(2));
        assert!(!g.column_has_ground(3));
    }

    #[test]
    fn exit_marker_found() {
        let g = grid_from(&["---F", "XXXX"]);
        assert_eq!(g.find_exit(), Some((3, 0)));
    }
}
