//! Shared live-cell tally.

use crate::error::{EngineError, Result};
use std::sync::{Mutex, MutexGuard};

/// Process-wide live-cell count, aggregated from per-worker subtotals.
///
/// Workers `add` once per round after finishing their region; the leader
/// `reset`s between barriers on every round except the last, so the final
/// round's total survives for reporting.
#[derive(Debug, Default)]
pub struct LiveTally {
    count: Mutex<usize>,
}

impl LiveTally {
    #[must_use]
    pub fn new(initial: usize) -> Self {
        Self {
            count: Mutex::new(initial),
        }
    }

    pub fn add(&self, live: usize) -> Result<()> {
        let mut count = self.lock()?;
        *count += live;
        Ok(())
    }

    pub fn reset(&self) -> Result<()> {
        *self.lock()? = 0;
        Ok(())
    }

    pub fn read(&self) -> Result<usize> {
        Ok(*self.lock()?)
    }

    fn lock(&self) -> Result<MutexGuard<'_, usize>> {
        self.count
            .lock()
            .map_err(|_| EngineError::sync("live-cell tally lock poisoned"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_starts_at_initial_value() {
        assert_eq!(LiveTally::new(7).read().unwrap(), 7);
        assert_eq!(LiveTally::default().read().unwrap(), 0);
    }

    #[test]
    fn test_add_and_reset() {
        let tally = LiveTally::new(0);
        tally.add(3).unwrap();
        tally.add(4).unwrap();
        assert_eq!(tally.read().unwrap(), 7);
        tally.reset().unwrap();
        assert_eq!(tally.read().unwrap(), 0);
    }

    #[test]
    fn test_concurrent_adds_are_not_lost() {
        let tally = Arc::new(LiveTally::new(0));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let tally = Arc::clone(&tally);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        tally.add(1).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(tally.read().unwrap(), 8000);
    }

    #[test]
    fn test_poisoned_lock_is_sync_error() {
        let tally = Arc::new(LiveTally::new(0));
        let poisoner = Arc::clone(&tally);
        let _ = thread::spawn(move || {
            let _guard = poisoner.count.lock().unwrap();
            panic!("poison the tally");
        })
        .join();

        assert!(matches!(tally.add(1), Err(EngineError::Sync(_))));
        assert!(matches!(tally.read(), Err(EngineError::Sync(_))));
    }
}
