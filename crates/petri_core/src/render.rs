//! Renderer capability consumed by the worker loop.
//!
//! The engine never writes to a terminal or sleeps; anything visible happens
//! behind this trait, selected once when the run is set up.

use crate::error::Result;
use crate::grid::GridView;
use crate::partition::Region;

/// State handed to the leader at the end of a round.
#[derive(Clone, Copy)]
pub struct Frame<'a> {
    /// Zero-based round that just completed.
    pub round: u64,
    /// Live cells after this round.
    pub live_cells: usize,
    /// The buffer that is now authoritative.
    pub view: GridView<'a>,
}

pub trait Renderer: Send + Sync {
    /// Called by the leader between the two barrier phases, after the swap.
    fn round_end(&self, _frame: &Frame<'_>) -> Result<()> {
        Ok(())
    }

    /// Called by every worker after the second barrier phase, for its own region.
    fn paint_region(
        &self,
        _worker: usize,
        _region: &Region,
        _round: u64,
        _view: GridView<'_>,
    ) -> Result<()> {
        Ok(())
    }
}

/// Renders nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {}
