#![forbid(unsafe_code)]

//! Character-cell grid produced by [`layout`](crate::layout::layout).

/// How strongly a cell is emphasized.
///
/// - `Preview`: the step is about to act here.
/// - `Active`: the step is acting here.
/// - `Result`: the step produced this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Emphasis {
    #[default]
    Plain,
    Preview,
    Active,
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub symbol: char,
    pub emphasis: Emphasis,
}

impl Cell {
    pub const BLANK: Self = Self {
        symbol: ' ',
        emphasis: Emphasis::Plain,
    };

    #[must_use]
    pub const fn new(symbol: char) -> Self {
        Self {
            symbol,
            emphasis: Emphasis::Plain,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

/// A rectangular grid of cells; every row has the same width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// A blank grid of `height` rows.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            rows: vec![vec![Cell::BLANK; width]; height],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        self.rows.get(y)?.get(x)
    }

    #[must_use]
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        self.rows.get(y).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Write `symbol` at `(x, y)`. Out-of-bounds writes are dropped.
    pub fn put(&mut self, x: usize, y: usize, symbol: char) {
        if let Some(cell) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            cell.symbol = symbol;
        }
    }

    /// Write `text` left to right starting at `(x, y)`.
    pub fn put_str(&mut self, x: usize, y: usize, text: &str) {
        for (offset, ch) in text.chars().enumerate() {
            self.put(x + offset, y, ch);
        }
    }

    /// Emphasize cells `x_start..=x_end` of row `y`.
    pub fn emphasize(&mut self, y: usize, x_start: usize, x_end: usize, emphasis: Emphasis) {
        let Some(row) = self.rows.get_mut(y) else {
            return;
        };
        for cell in row.iter_mut().take(x_end + 1).skip(x_start) {
            cell.emphasis = emphasis;
        }
    }

    /// Row `y` as text, trailing blanks removed.
    #[must_use]
    pub fn row_text(&self, y: usize) -> String {
        self.rows
            .get(y)
            .map(|row| {
                let text: String = row.iter().map(|cell| cell.symbol).collect();
                text.trim_end().to_string()
            })
            .unwrap_or_default()
    }

    /// All rows as text, trailing blanks removed.
    #[must_use]
    pub fn to_plain_lines(&self) -> Vec<String> {
        (0..self.height()).map(|y| self.row_text(y)).collect()
    }

    /// Cells with the given emphasis, as `(x, y)` pairs in row-major order.
    #[must_use]
    pub fn emphasized(&self, emphasis: Emphasis) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for (y, row) in self.rows.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if cell.emphasis == emphasis {
                    out.push((x, y));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_are_clipped() {
        let mut grid = Grid::new(3, 1);
        grid.put_str(1, 0, "abcd");
        grid.put(0, 5, 'z');
        assert_eq!(grid.row_text(0), " ab");
        assert_eq!(grid.height(), 1);
    }

    #[test]
    fn emphasis_range_is_inclusive() {
        let mut grid = Grid::new(5, 2);
        grid.emphasize(1, 1, 3, Emphasis::Active);
        assert_eq!(
            grid.emphasized(Emphasis::Active),
            vec![(1, 1), (2, 1), (3, 1)]
        );
        grid.emphasize(7, 0, 4, Emphasis::Result);
        assert!(grid.emphasized(Emphasis::Result).is_empty());
    }

    #[test]
    fn plain_lines_trim_trailing_blanks() {
        let mut grid = Grid::new(6, 2);
        grid.put_str(2, 1, "42");
        assert_eq!(grid.to_plain_lines(), vec!["".to_string(), "  42".to_string()]);
    }
}
