//! Frame-buffer renderer.
//!
//! Every worker paints its own region of a shared ratatui [`Buffer`] after
//! each round: live cells black, dead cells in the worker's palette colour.
//! The last worker to finish hands the completed frame to an optional sink.

use petri_core::{EngineError, GridView, Region, Renderer};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use std::io;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::mpsc::SyncSender;
use std::sync::{Mutex, MutexGuard};

/// Terminal columns per grid cell, so cells render roughly square.
pub const CELL_WIDTH: usize = 2;

pub const ALIVE_COLOR: Color = Color::Rgb(0, 0, 0);

/// Dead-cell colour per worker, indexed by `worker % 8`.
pub const PALETTE: [Color; 8] = [
    Color::Rgb(230, 25, 75),
    Color::Rgb(60, 180, 75),
    Color::Rgb(0, 130, 200),
    Color::Rgb(255, 225, 25),
    Color::Rgb(145, 30, 180),
    Color::Rgb(70, 240, 240),
    Color::Rgb(245, 130, 48),
    Color::Rgb(240, 50, 230),
];

#[must_use]
pub fn worker_color(worker: usize) -> Color {
    PALETTE[worker % PALETTE.len()]
}

/// A completed frame.
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    pub round: u64,
    pub buffer: Buffer,
}

pub struct FrameRenderer {
    buffer: Mutex<Buffer>,
    workers: usize,
    painted: AtomicUsize,
    frames: AtomicU64,
    sink: Option<Mutex<SyncSender<FrameSnapshot>>>,
}

impl FrameRenderer {
    /// Frame buffer for a `rows × cols` board painted by `workers` workers.
    pub fn new(rows: usize, cols: usize, workers: usize) -> petri_core::Result<Self> {
        let too_large = || {
            EngineError::config(format!(
                "{rows}x{cols} board is too large for frame output"
            ))
        };
        let width = cols
            .checked_mul(CELL_WIDTH)
            .filter(|w| rows.checked_mul(*w).is_some_and(|area| area <= usize::from(u16::MAX)))
            .ok_or_else(too_large)?;
        if workers == 0 {
            return Err(EngineError::config("frame output needs at least one worker"));
        }
        let area = Rect::new(
            0,
            0,
            u16::try_from(width).map_err(|_| too_large())?,
            u16::try_from(rows).map_err(|_| too_large())?,
        );
        Ok(Self {
            buffer: Mutex::new(Buffer::empty(area)),
            workers,
            painted: AtomicUsize::new(0),
            frames: AtomicU64::new(0),
            sink: None,
        })
    }

    /// Sends every completed frame to `sink`.
    #[must_use]
    pub fn with_sink(mut self, sink: SyncSender<FrameSnapshot>) -> Self {
        self.sink = Some(Mutex::new(sink));
        self
    }

    /// Number of frames completed so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Acquire)
    }

    /// Copy of the current frame buffer.
    pub fn snapshot(&self) -> petri_core::Result<Buffer> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> petri_core::Result<MutexGuard<'_, Buffer>> {
        self.buffer
            .lock()
            .map_err(|_| EngineError::sync("frame buffer lock poisoned"))
    }

    fn hand_off(&self, round: u64) -> petri_core::Result<()> {
        self.frames.fetch_add(1, Ordering::AcqRel);
        let Some(sink) = &self.sink else {
            return Ok(());
        };
        let buffer = self.lock()?.clone();
        let sink = sink
            .lock()
            .map_err(|_| EngineError::sync("frame sink lock poisoned"))?;
        sink.send(FrameSnapshot { round, buffer }).map_err(|_| {
            EngineError::Render(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "frame presenter hung up",
            ))
        })
    }
}

impl Renderer for FrameRenderer {
    fn paint_region(
        &self,
        worker: usize,
        region: &Region,
        round: u64,
        view: GridView<'_>,
    ) -> petri_core::Result<()> {
        {
            let mut buffer = self.lock()?;
            let dead = worker_color(worker);
            for row in region.rows.iter() {
                for col in region.cols.iter() {
                    let color = if view.is_alive(row, col) { ALIVE_COLOR } else { dead };
                    // Bounds were checked against u16 in `new`
                    let y = row as u16;
                    for dx in 0..CELL_WIDTH {
                        let x = (col * CELL_WIDTH + dx) as u16;
                        if let Some(cell) = buffer.cell_mut((x, y)) {
                            cell.set_symbol(" ").set_bg(color);
                        }
                    }
                }
            }
        }

        // No worker can paint round k+1 before every worker has passed the
        // barriers of round k+1, so the counter resets before it is reused.
        if self.painted.fetch_add(1, Ordering::AcqRel) + 1 == self.workers {
            self.painted.store(0, Ordering::Release);
            self.hand_off(round)?;
        }
        Ok(())
    }
}
