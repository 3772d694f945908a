use anyhow::Result;
use crossterm::{
    cursor, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::prelude::CrosstermBackend;
use ratatui::widgets::Widget;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::mpsc::Receiver;
use std::thread;
use std::time::Duration;

pub mod frame;
pub mod text;

pub use frame::{FrameRenderer, FrameSnapshot};
pub use text::TextRenderer;

/// Copies a completed frame into the terminal buffer, clipped to `area`.
pub struct FrameWidget<'a> {
    frame: &'a FrameSnapshot,
}

impl<'a> FrameWidget<'a> {
    pub fn new(frame: &'a FrameSnapshot) -> Self {
        Self { frame }
    }
}

impl Widget for FrameWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let src = &self.frame.buffer;
        let width = src.area.width.min(area.width);
        let height = src.area.height.min(area.height);
        for y in 0..height {
            for x in 0..width {
                if let (Some(from), Some(to)) =
                    (src.cell((x, y)), buf.cell_mut((area.x + x, area.y + y)))
                {
                    *to = from.clone();
                }
            }
        }
    }
}

/// Draws frames handed off by a [`FrameRenderer`] on the alternate screen.
pub struct TerminalPresenter {
    pub terminal: Terminal<CrosstermBackend<Stdout>>,
    delay: Duration,
}

impl TerminalPresenter {
    pub fn new(delay: Duration) -> Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok(Self { terminal, delay })
    }

    pub fn init(&mut self) -> Result<()> {
        execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        self.terminal.clear()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    pub fn present(&mut self, frame: &FrameSnapshot) -> Result<()> {
        self.terminal
            .draw(|f| f.render_widget(FrameWidget::new(frame), f.area()))?;
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        Ok(())
    }

    /// Presents frames until the sending side hangs up. Returns the number
    /// of frames drawn.
    pub fn run(mut self, frames: Receiver<FrameSnapshot>) -> Result<u64> {
        self.init()?;
        let mut drawn = 0;
        for frame in frames {
            self.present(&frame)?;
            drawn += 1;
        }
        self.exit()?;
        tracing::debug!(frames = drawn, "Presenter finished");
        Ok(drawn)
    }
}

impl Drop for TerminalPresenter {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn test_frame_widget_clips_to_area() {
        let mut src = Buffer::empty(Rect::new(0, 0, 6, 3));
        src.cell_mut((5, 2)).unwrap().set_bg(Color::Red);
        src.cell_mut((1, 0)).unwrap().set_bg(Color::Blue);
        let frame = FrameSnapshot {
            round: 0,
            buffer: src,
        };

        let mut dst = Buffer::empty(Rect::new(0, 0, 4, 4));
        FrameWidget::new(&frame).render(Rect::new(1, 1, 3, 3), &mut dst);

        assert_eq!(dst.cell((2, 1)).unwrap().bg, Color::Blue);
        // (5, 2) falls outside the 3-wide target area
        assert!(dst.content.iter().all(|c| c.bg != Color::Red));
    }
}
