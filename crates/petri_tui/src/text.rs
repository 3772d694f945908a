//! Text dump renderer: one line per row, two characters per cell.

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use petri_core::{EngineError, Frame, GridView, Renderer};
use std::io::{self, Write};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

pub const ALIVE_GLYPH: &str = " @";
pub const DEAD_GLYPH: &str = " .";

/// Prints the board at the end of every round.
pub struct TextRenderer<W> {
    out: Mutex<W>,
    clear_screen: bool,
    delay: Duration,
}

impl<W: Write + Send> TextRenderer<W> {
    /// No screen clearing, no pause between frames.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            clear_screen: false,
            delay: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn with_clear_screen(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

/// Writes `Round: k`, the board, and `Live cells: n`. Rounds print 1-based.
pub fn write_board<W: Write>(out: &mut W, round: u64, view: &GridView<'_>, live_cells: usize) -> io::Result<()> {
    writeln!(out, "Round: {}", round + 1)?;
    let mut line = String::with_capacity(view.cols() * 2);
    for row in 0..view.rows() {
        line.clear();
        for col in 0..view.cols() {
            line.push_str(if view.is_alive(row, col) {
                ALIVE_GLYPH
            } else {
                DEAD_GLYPH
            });
        }
        writeln!(out, "{line}")?;
    }
    writeln!(out, "Live cells: {live_cells}")?;
    writeln!(out)
}

impl<W: Write + Send> Renderer for TextRenderer<W> {
    fn round_end(&self, frame: &Frame<'_>) -> petri_core::Result<()> {
        {
            let mut guard = self
                .out
                .lock()
                .map_err(|_| EngineError::sync("text renderer output lock poisoned"))?;
            let out = &mut *guard;
            if self.clear_screen {
                queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
            }
            write_board(out, frame.round, &frame.view, frame.live_cells)?;
            out.flush()?;
        }
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        Ok(())
    }
}
