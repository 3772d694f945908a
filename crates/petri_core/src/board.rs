//! Initial board description handed over by the loader.

/// Grid dimensions, round count and the initially live cells.
///
/// Coordinates are `(row, col)`. Duplicates are allowed and collapse to a
/// single live cell when seeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub rows: usize,
    pub cols: usize,
    pub iters: u64,
    pub cells: Vec<(usize, usize)>,
}

impl Board {
    #[must_use]
    pub fn new(rows: usize, cols: usize, iters: u64) -> Self {
        Self {
            rows,
            cols,
            iters,
            cells: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_cells<I>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        self.cells.extend(cells);
        self
    }
}
