pub mod macros;

use petri_core::{Board, Frame, PartitionAxis, Renderer, RunConfig, RunSummary, Simulation};
use std::sync::Mutex;

/// Builds boards from ASCII art: `@` or `#` is alive, anything else dead.
#[allow(dead_code)]
pub struct BoardBuilder {
    rows: usize,
    cols: usize,
    iters: u64,
    cells: Vec<(usize, usize)>,
}

#[allow(dead_code)]
impl BoardBuilder {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            iters: 1,
            cells: Vec::new(),
        }
    }

    pub fn from_art(art: &[&str]) -> Self {
        let cols = art.first().map_or(0, |line| line.len());
        let mut builder = Self::new(art.len(), cols);
        for (row, line) in art.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                if matches!(ch, '@' | '#') {
                    builder.cells.push((row, col));
                }
            }
        }
        builder
    }

    pub fn iters(mut self, iters: u64) -> Self {
        self.iters = iters;
        self
    }

    pub fn alive(mut self, row: usize, col: usize) -> Self {
        self.cells.push((row, col));
        self
    }

    /// Stamps `art` with its top-left corner at `(row, col)`.
    pub fn stamp(mut self, row: usize, col: usize, art: &[&str]) -> Self {
        for (dr, line) in art.iter().enumerate() {
            for (dc, ch) in line.chars().enumerate() {
                if matches!(ch, '@' | '#') {
                    self.cells.push((row + dr, col + dc));
                }
            }
        }
        self
    }

    pub fn build(self) -> Board {
        Board::new(self.rows, self.cols, self.iters).with_cells(self.cells)
    }
}

/// Converts ASCII art to the row-major cell layout `GridView::to_rows` uses.
#[allow(dead_code)]
pub fn art(rows: &[&str]) -> Vec<Vec<bool>> {
    rows.iter()
        .map(|line| line.chars().map(|ch| matches!(ch, '@' | '#')).collect())
        .collect()
}

#[allow(dead_code)]
pub fn config(threads: usize, axis: PartitionAxis) -> RunConfig {
    RunConfig {
        threads,
        axis,
        ..Default::default()
    }
}

/// One round as the leader saw it.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub round: u64,
    pub live_cells: usize,
    pub cells: Vec<Vec<bool>>,
}

/// Records every round's grid and tally.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingRenderer {
    snapshots: Mutex<Vec<Snapshot>>,
}

#[allow(dead_code)]
impl RecordingRenderer {
    pub fn snapshots(&self) -> Vec<Snapshot> {
        self.snapshots.lock().unwrap().clone()
    }
}

impl Renderer for RecordingRenderer {
    fn round_end(&self, frame: &Frame<'_>) -> petri_core::Result<()> {
        self.snapshots.lock().unwrap().push(Snapshot {
            round: frame.round,
            live_cells: frame.live_cells,
            cells: frame.view.to_rows(),
        });
        Ok(())
    }
}

/// Runs `board` to completion and returns the final grid with the summary.
#[allow(dead_code)]
pub fn run_to_end(board: &Board, threads: usize, axis: PartitionAxis) -> (Vec<Vec<bool>>, RunSummary) {
    let mut sim = Simulation::new(board, &config(threads, axis)).expect("valid simulation");
    let summary = sim.run(&petri_core::NullRenderer).expect("run succeeds");
    (sim.grid().view().to_rows(), summary)
}

/// Runs `board` and returns every round it rendered.
#[allow(dead_code)]
pub fn record(board: &Board, threads: usize, axis: PartitionAxis) -> Vec<Snapshot> {
    let mut sim = Simulation::new(board, &config(threads, axis)).expect("valid simulation");
    let renderer = RecordingRenderer::default();
    sim.run(&renderer).expect("run succeeds");
    renderer.snapshots()
}
