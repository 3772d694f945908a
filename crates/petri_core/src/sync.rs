//! Synchronization primitives for the worker pool.
//!
//! - [`RoundBarrier`]: barrier A, leader-only round-end work, barrier B.
//! - [`FailureLatch`]: first-error slot every worker checks after barrier B.
//! - [`StartGate`]: holds spawned workers until the whole pool exists.

use crate::error::EngineError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Barrier, Condvar, Mutex};

/// Two-phase round barrier.
///
/// Collapsing the two waits into one would let peers start reading the grid
/// while the leader is still swapping buffers or resetting the tally.
#[derive(Debug)]
pub struct RoundBarrier {
    barrier: Barrier,
    parties: usize,
}

impl RoundBarrier {
    #[must_use]
    pub fn new(parties: usize) -> Self {
        Self {
            barrier: Barrier::new(parties),
            parties,
        }
    }

    #[must_use]
    pub fn parties(&self) -> usize {
        self.parties
    }

    /// Runs one round boundary.
    ///
    /// Every party blocks until all have arrived, the leader alone runs
    /// `round_end`, then every party blocks again until the leader is done.
    /// The leader's error is returned to the leader only; it must still
    /// reach the second wait so peers are released.
    pub fn settle<F, E>(&self, leader: bool, round_end: F) -> Result<(), E>
    where
        F: FnOnce() -> Result<(), E>,
    {
        self.barrier.wait();
        let outcome = if leader { round_end() } else { Ok(()) };
        self.barrier.wait();
        outcome
    }
}

/// Keeps the first error raised anywhere in the pool.
#[derive(Debug, Default)]
pub struct FailureLatch {
    tripped: AtomicBool,
    first: Mutex<Option<EngineError>>,
}

impl FailureLatch {
    /// Records `err` unless an earlier error is already held.
    pub fn trip(&self, worker: usize, err: EngineError) {
        tracing::error!(worker, error = %err, "Worker failed");
        let mut first = self.first.lock().unwrap_or_else(|e| e.into_inner());
        if first.is_none() {
            *first = Some(err);
        }
        self.tripped.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_tripped(&self) -> bool {
        self.tripped.load(Ordering::Acquire)
    }

    pub fn take(&self) -> Option<EngineError> {
        self.first
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
    }
}

/// One-shot gate opened after every worker thread has been spawned.
///
/// If spawning fails part-way, the gate opens with `false` and the workers
/// already running exit instead of waiting forever at a barrier sized for
/// the full pool.
#[derive(Debug, Default)]
pub struct StartGate {
    state: Mutex<Option<bool>>,
    opened: Condvar,
}

impl StartGate {
    pub fn open(&self, proceed: bool) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        *state = Some(proceed);
        self.opened.notify_all();
    }

    /// Blocks until [`open`](Self::open) is called; returns its verdict.
    pub fn wait(&self) -> bool {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        loop {
            if let Some(proceed) = *state {
                return proceed;
            }
            state = self
                .opened
                .wait(state)
                .unwrap_or_else(|e| e.into_inner());
        }
    }
}
