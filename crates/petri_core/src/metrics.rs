//! Run metrics and logging setup.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Interval, in rounds, between progress log lines.
const PROGRESS_INTERVAL: u64 = 1000;

/// Counters updated by the round leader.
#[derive(Debug, Default)]
pub struct RunMetrics {
    rounds: AtomicU64,
    live_cells: AtomicU64,
}

impl RunMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a completed round.
    pub fn record_round(&self, live_cells: usize) {
        let rounds = self.rounds.fetch_add(1, Ordering::Relaxed) + 1;
        self.live_cells.store(live_cells as u64, Ordering::Relaxed);

        if rounds.is_multiple_of(PROGRESS_INTERVAL) {
            tracing::info!(rounds, live_cells, "Simulation progress");
        }
    }

    /// Logs the end of a run.
    pub fn record_run(&self, elapsed: Duration, live_cells: usize) {
        tracing::info!(
            rounds = self.rounds(),
            live_cells,
            elapsed_ms = elapsed.as_millis() as u64,
            "Simulation finished"
        );
    }

    #[must_use]
    pub fn rounds(&self) -> u64 {
        self.rounds.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn live_cells(&self) -> u64 {
        self.live_cells.load(Ordering::Relaxed)
    }
}

/// Initialize tracing subscriber for logging.
///
/// Logs go to stderr so they never mix with the report on stdout. `RUST_LOG`
/// takes precedence over `verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish(),
    )
    .ok();
}
