//! Run coordinator: owns the grid and tally, spawns the worker pool,
//! drives the configured number of rounds and joins.

use crate::board::Board;
use crate::config::RunConfig;
use crate::error::{EngineError, Result};
use crate::grid::Grid;
use crate::metrics::RunMetrics;
use crate::partition::{self, Region};
use crate::render::Renderer;
use crate::sync::{FailureLatch, RoundBarrier, StartGate};
use crate::tally::LiveTally;
use crate::worker::{RoundContext, Worker};
use std::thread;
use std::time::{Duration, Instant};

/// Outcome of one call to [`Simulation::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub rounds: u64,
    pub live_cells: usize,
    pub elapsed: Duration,
}

#[derive(Debug)]
pub struct Simulation {
    grid: Grid,
    tally: LiveTally,
    regions: Vec<Region>,
    iters: u64,
    metrics: RunMetrics,
}

impl Simulation {
    /// Builds the grid from `board` and partitions it for `config.threads`
    /// workers. No thread is created here, so every configuration and input
    /// error surfaces before the pool exists.
    pub fn new(board: &Board, config: &RunConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| EngineError::config(format!("{e:#}")))?;

        let mut grid = Grid::new(board.rows, board.cols)?;
        for &(row, col) in &board.cells {
            grid.seed(row, col)?;
        }
        let regions = partition::assign(board.rows, board.cols, config.threads, config.axis)?;
        for region in &regions {
            tracing::debug!(%region, "Partition assigned");
        }

        let tally = LiveTally::new(grid.view().live_count());
        Ok(Self {
            grid,
            tally,
            regions,
            iters: board.iters,
            metrics: RunMetrics::new(),
        })
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    #[must_use]
    pub fn iters(&self) -> u64 {
        self.iters
    }

    /// Rounds completed so far, across every call to `run`.
    #[must_use]
    pub fn round(&self) -> u64 {
        self.grid.generation()
    }

    #[must_use]
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    /// Live cells as of the last round boundary.
    pub fn live_cells(&self) -> Result<usize> {
        self.tally.read()
    }

    /// Advances the grid by `iters` rounds on a fresh pool of workers.
    ///
    /// Calling `run` again continues from the settled grid.
    pub fn run(&mut self, renderer: &dyn Renderer) -> Result<RunSummary> {
        let workers = self.regions.len();
        tracing::info!(
            rows = self.grid.rows(),
            cols = self.grid.cols(),
            iters = self.iters,
            workers,
            "Simulation starting"
        );

        // Round subtotals accumulate from zero; until now the tally held
        // the settled count from seeding or the previous run.
        if self.iters > 0 {
            self.tally.reset()?;
        }

        let ctx = RoundContext {
            grid: &self.grid,
            tally: &self.tally,
            renderer,
            metrics: &self.metrics,
            barrier: RoundBarrier::new(workers),
            latch: FailureLatch::default(),
            gate: StartGate::default(),
            iters: self.iters,
            first_round: self.grid.generation(),
        };

        let started = Instant::now();
        let pool = thread::scope(|scope| {
            let mut handles = Vec::with_capacity(workers);
            let mut spawn_error = None;
            for region in &self.regions {
                let worker = Worker::new(*region, &ctx);
                let spawned = thread::Builder::new()
                    .name(format!("petri-worker-{}", region.worker))
                    .spawn_scoped(scope, move || worker.run());
                match spawned {
                    Ok(handle) => handles.push((region.worker, handle)),
                    Err(source) => {
                        spawn_error = Some(EngineError::Spawn {
                            worker: region.worker,
                            source,
                        });
                        break;
                    }
                }
            }
            ctx.gate.open(spawn_error.is_none());

            let mut panicked = None;
            for (worker, handle) in handles {
                if handle.join().is_err() && panicked.is_none() {
                    panicked = Some(worker);
                }
            }
            match (spawn_error, panicked) {
                (Some(err), _) => Err(err),
                (None, Some(worker)) => Err(EngineError::WorkerPanicked { worker }),
                (None, None) => Ok(()),
            }
        });
        let elapsed = started.elapsed();

        if let Some(err) = ctx.latch.take() {
            return Err(err);
        }
        pool?;

        let live_cells = self.tally.read()?;
        self.metrics.record_run(elapsed, live_cells);
        Ok(RunSummary {
            rounds: self.iters,
            live_cells,
            elapsed,
        })
    }
}
