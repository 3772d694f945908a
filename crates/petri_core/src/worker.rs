//! Per-thread simulation loop.
//!
//! Each round a worker goes through
//! `Computing -> barrier A -> (leader: round end) -> barrier B -> painting`
//! and repeats until the configured number of rounds is done.

use crate::error::{EngineError, Result};
use crate::grid::Grid;
use crate::metrics::RunMetrics;
use crate::partition::Region;
use crate::render::{Frame, Renderer};
use crate::rules::{count_live_neighbors, next_state};
use crate::sync::{FailureLatch, RoundBarrier, StartGate};
use crate::tally::LiveTally;
use std::panic::{self, AssertUnwindSafe};

/// Worker index that performs round-end bookkeeping.
pub const LEADER: usize = 0;

/// State shared by every worker for one run.
pub(crate) struct RoundContext<'a> {
    pub grid: &'a Grid,
    pub tally: &'a LiveTally,
    pub renderer: &'a dyn Renderer,
    pub metrics: &'a RunMetrics,
    pub barrier: RoundBarrier,
    pub latch: FailureLatch,
    pub gate: StartGate,
    pub iters: u64,
    /// Grid generation when the run started
    pub first_round: u64,
}

pub(crate) struct Worker<'a> {
    region: Region,
    ctx: &'a RoundContext<'a>,
}

impl<'a> Worker<'a> {
    pub fn new(region: Region, ctx: &'a RoundContext<'a>) -> Self {
        Self { region, ctx }
    }

    fn id(&self) -> usize {
        self.region.worker
    }

    fn is_leader(&self) -> bool {
        self.id() == LEADER
    }

    /// Runs every round. Errors are published through the shared latch so
    /// all workers stop after the same barrier; the returned error only
    /// says this worker stopped early.
    pub fn run(&self) -> Result<u64> {
        let ctx = self.ctx;
        if !ctx.gate.wait() {
            return Err(EngineError::Aborted { worker: self.id() });
        }
        tracing::debug!(worker = self.id(), region = %self.region, "Worker started");

        for round in 0..ctx.iters {
            if let Err(err) = self.guarded(|| self.compute()) {
                ctx.latch.trip(self.id(), err);
            }

            // The leader latches its own failure before barrier B, so every
            // peer sees it on the check below.
            ctx.barrier.settle(self.is_leader(), || {
                if ctx.latch.is_tripped() {
                    return Ok::<(), EngineError>(());
                }
                if let Err(err) = self.guarded(|| self.round_end(round)) {
                    ctx.latch.trip(self.id(), err);
                }
                Ok(())
            })?;
            if ctx.latch.is_tripped() {
                return Err(EngineError::Aborted { worker: self.id() });
            }

            if let Err(err) = self.guarded(|| self.paint(round)) {
                ctx.latch.trip(self.id(), err);
            }
        }
        Ok(ctx.iters)
    }

    /// Writes the next state of every owned cell and adds the subtotal to the tally.
    fn compute(&self) -> Result<()> {
        let (view, staging) = self.ctx.grid.round_buffers();
        let mut live = 0;
        for row in self.region.rows.iter() {
            for col in self.region.cols.iter() {
                let neighbors = count_live_neighbors(&view, row, col);
                let (state, contributed) = next_state(view.state(row, col), neighbors);
                staging.set(row, col, state);
                live += contributed;
            }
        }
        self.ctx.tally.add(live)
    }

    /// Leader only: swap buffers, emit the frame, reset the tally unless
    /// this was the final round.
    fn round_end(&self, round: u64) -> Result<()> {
        let ctx = self.ctx;
        ctx.grid.swap();

        let live_cells = ctx.tally.read()?;
        ctx.renderer.round_end(&Frame {
            round: ctx.first_round + round,
            live_cells,
            view: ctx.grid.view(),
        })?;
        ctx.metrics.record_round(live_cells);

        if round + 1 < ctx.iters {
            ctx.tally.reset()?;
        }
        Ok(())
    }

    fn paint(&self, round: u64) -> Result<()> {
        let ctx = self.ctx;
        ctx.renderer.paint_region(
            self.id(),
            &self.region,
            ctx.first_round + round,
            ctx.grid.view(),
        )
    }

    /// Turns a panic into an error so the panicking worker keeps its place
    /// at the barriers instead of stranding its peers.
    fn guarded<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce() -> Result<()>,
    {
        panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|_| {
            Err(EngineError::WorkerPanicked { worker: self.id() })
        })
    }
}
