//! Double-buffered toroidal cell grid shared by all workers.
//!
//! Both buffers live in one `Grid`. An index selects which buffer is
//! authoritative; only the round leader flips it, and only between the two
//! barrier phases, so every worker sees the same buffer for a whole round.
//!
//! Cells are `AtomicBool` so workers can write their own region of the
//! staging buffer through a shared reference. Loads and stores are
//! `Relaxed`: the round barrier orders every write before any read of the
//! next round.

use crate::error::{EngineError, Result};
use crate::rules::CellState;
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

pub struct Grid {
    rows: usize,
    cols: usize,
    buffers: [Vec<AtomicBool>; 2],
    current: AtomicUsize,
    generation: AtomicU64,
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("generation", &self.generation())
            .finish_non_exhaustive()
    }
}

fn alloc_buffer(len: usize) -> Result<Vec<AtomicBool>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|e| EngineError::resource(format!("cannot allocate {len} cells: {e}")))?;
    buffer.extend((0..len).map(|_| AtomicBool::new(false)));
    Ok(buffer)
}

impl Grid {
    /// Allocates an all-dead `rows × cols` grid.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(EngineError::config(format!(
                "grid must have at least one row and column, got {rows}x{cols}"
            )));
        }
        let len = rows
            .checked_mul(cols)
            .ok_or_else(|| EngineError::resource(format!("{rows}x{cols} grid overflows")))?;
        Ok(Self {
            rows,
            cols,
            buffers: [alloc_buffer(len)?, alloc_buffer(len)?],
            current: AtomicUsize::new(0),
            generation: AtomicU64::new(0),
        })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of completed swaps since construction.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Marks a cell alive in the current buffer. Setting a live cell again is a no-op.
    pub fn seed(&mut self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(EngineError::input(format!(
                "cell ({row}, {col}) outside {}x{} grid",
                self.rows, self.cols
            )));
        }
        let idx = row * self.cols + col;
        let current = *self.current.get_mut();
        *self.buffers[current][idx].get_mut() = true;
        Ok(())
    }

    /// Read-only view of the authoritative buffer.
    #[must_use]
    pub fn view(&self) -> GridView<'_> {
        self.round_buffers().0
    }

    /// The authoritative buffer and the staging buffer for one round,
    /// resolved from a single read of the buffer index.
    #[must_use]
    pub fn round_buffers(&self) -> (GridView<'_>, Staging<'_>) {
        let current = self.current.load(Ordering::Acquire);
        (
            GridView {
                rows: self.rows,
                cols: self.cols,
                cells: &self.buffers[current],
            },
            Staging {
                cols: self.cols,
                cells: &self.buffers[current ^ 1],
            },
        )
    }

    /// Makes the staging buffer authoritative. Leader only, between barriers.
    pub fn swap(&self) {
        self.current.fetch_xor(1, Ordering::AcqRel);
        self.generation.fetch_add(1, Ordering::AcqRel);
    }
}

/// Read-only view over one buffer.
#[derive(Clone, Copy)]
pub struct GridView<'a> {
    rows: usize,
    cols: usize,
    cells: &'a [AtomicBool],
}

impl<'a> GridView<'a> {
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    #[must_use]
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.cols + col].load(Ordering::Relaxed)
    }

    #[inline]
    #[must_use]
    pub fn state(&self, row: usize, col: usize) -> CellState {
        CellState::from(self.is_alive(row, col))
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.load(Ordering::Relaxed))
            .count()
    }

    /// Copies the buffer out row by row.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        (0..self.rows)
            .map(|r| (0..self.cols).map(|c| self.is_alive(r, c)).collect())
            .collect()
    }

    /// SHA-256 over the dimensions and the row-major cell bytes.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update((self.rows as u64).to_le_bytes());
        hasher.update((self.cols as u64).to_le_bytes());
        let bytes: Vec<u8> = self
            .cells
            .iter()
            .map(|c| u8::from(c.load(Ordering::Relaxed)))
            .collect();
        hasher.update(&bytes);
        hex::encode(hasher.finalize())
    }
}

/// Write handle over the staging buffer.
#[derive(Clone, Copy)]
pub struct Staging<'a> {
    cols: usize,
    cells: &'a [AtomicBool],
}

impl Staging<'_> {
    #[inline]
    pub fn set(&self, row: usize, col: usize, state: CellState) {
        self.cells[row * self.cols + col].store(state.is_alive(), Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_dead() {
        let grid = Grid::new(3, 4).unwrap();
        assert_eq!(grid.view().live_count(), 0);
        assert_eq!(grid.generation(), 0);
    }

    #[test]
    fn test_empty_dimensions_rejected() {
        assert!(matches!(Grid::new(0, 4), Err(EngineError::Config(_))));
        assert!(matches!(Grid::new(4, 0), Err(EngineError::Config(_))));
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        assert!(matches!(
            Grid::new(usize::MAX, 2),
            Err(EngineError::Resource(_))
        ));
    }

    #[test]
    fn test_seed_is_idempotent() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.seed(1, 2).unwrap();
        grid.seed(1, 2).unwrap();
        assert_eq!(grid.view().live_count(), 1);
        assert!(grid.view().is_alive(1, 2));
    }

    #[test]
    fn test_seed_out_of_range() {
        let mut grid = Grid::new(3, 5).unwrap();
        assert!(grid.seed(2, 4).is_ok());
        assert!(matches!(grid.seed(3, 0), Err(EngineError::Input(_))));
        assert!(matches!(grid.seed(0, 5), Err(EngineError::Input(_))));
    }

    #[test]
    fn test_row_major_layout_non_square() {
        let mut grid = Grid::new(2, 5).unwrap();
        grid.seed(1, 4).unwrap();
        let rows = grid.view().to_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![false; 5]);
        assert_eq!(rows[1], vec![false, false, false, false, true]);
    }

    #[test]
    fn test_swap_flips_authoritative_buffer() {
        let grid = Grid::new(2, 2).unwrap();
        let (_, staging) = grid.round_buffers();
        staging.set(0, 1, CellState::Alive);
        assert!(!grid.view().is_alive(0, 1));

        grid.swap();
        assert!(grid.view().is_alive(0, 1));
        assert_eq!(grid.generation(), 1);
    }

    #[test]
    fn test_fingerprint_tracks_contents() {
        let mut a = Grid::new(4, 4).unwrap();
        let mut b = Grid::new(4, 4).unwrap();
        assert_eq!(a.view().fingerprint(), b.view().fingerprint());

        a.seed(0, 0).unwrap();
        assert_ne!(a.view().fingerprint(), b.view().fingerprint());
        b.seed(0, 0).unwrap();
        assert_eq!(a.view().fingerprint(), b.view().fingerprint());
    }

    #[test]
    fn test_fingerprint_distinguishes_shape() {
        let a = Grid::new(2, 8).unwrap();
        let b = Grid::new(8, 2).unwrap();
        assert_ne!(a.view().fingerprint(), b.view().fingerprint());
    }
}
