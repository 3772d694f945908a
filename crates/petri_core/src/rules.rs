//! B3/S23 rule and toroidal neighbor counting.

use crate::grid::GridView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    #[inline]
    #[must_use]
    pub fn is_alive(self) -> bool {
        self == Self::Alive
    }
}

impl From<bool> for CellState {
    #[inline]
    fn from(alive: bool) -> Self {
        if alive {
            Self::Alive
        } else {
            Self::Dead
        }
    }
}

/// Applies Conway's rule to one cell.
///
/// Returns the next state and its contribution (0 or 1) to the live tally.
#[inline]
#[must_use]
pub fn next_state(current: CellState, live_neighbors: u8) -> (CellState, usize) {
    match (current, live_neighbors) {
        (CellState::Dead, 3) | (CellState::Alive, 2 | 3) => (CellState::Alive, 1),
        _ => (CellState::Dead, 0),
    }
}

/// Counts live cells among the 8 Moore neighbors of `(row, col)` with
/// wraparound on both axes.
///
/// On grids narrower than 3 along an axis, wrapped offsets can land on the
/// same cell (or the cell itself); each offset is counted independently.
#[inline]
#[must_use]
pub fn count_live_neighbors(view: &GridView<'_>, row: usize, col: usize) -> u8 {
    let rows = view.rows();
    let cols = view.cols();
    let mut live = 0;
    for dr in 0..3 {
        let nr = (row + rows + dr - 1) % rows;
        for dc in 0..3 {
            if dr == 1 && dc == 1 {
                continue;
            }
            let nc = (col + cols + dc - 1) % cols;
            if view.is_alive(nr, nc) {
                live += 1;
            }
        }
    }
    live
}
