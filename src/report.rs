//! End-of-run report.

use petri_core::{PartitionAxis, RunConfig, RunSummary, Simulation};
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};

/// What a finished run prints: timing, the final tally, and a fingerprint
/// of the final grid for comparing runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub rows: usize,
    pub cols: usize,
    pub rounds: u64,
    pub threads: usize,
    pub axis: PartitionAxis,
    pub live_cells: usize,
    pub elapsed_secs: f64,
    pub fingerprint: String,
}

impl RunReport {
    #[must_use]
    pub fn new(sim: &Simulation, config: &RunConfig, summary: &RunSummary) -> Self {
        let view = sim.grid().view();
        Self {
            rows: view.rows(),
            cols: view.cols(),
            rounds: summary.rounds,
            threads: sim.regions().len(),
            axis: config.axis,
            live_cells: summary.live_cells,
            elapsed_secs: summary.elapsed.as_secs_f64(),
            fingerprint: view.fingerprint(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total time: {:.3} seconds", self.elapsed_secs)?;
        writeln!(
            f,
            "Number of live cells after {} rounds: {}",
            self.rounds, self.live_cells
        )?;
        writeln!(f)
    }
}

/// Writes one `tid i: rows: s:e (n) cols: s:e (m)` line per worker.
pub fn write_partition<W: Write>(out: &mut W, sim: &Simulation) -> io::Result<()> {
    for region in sim.regions() {
        writeln!(out, "{region}")?;
    }
    out.flush()
}
