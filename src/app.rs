//! Wires a loaded board, a run configuration and the chosen renderer into
//! one simulation run.

use crate::report::{self, RunReport};
use anyhow::{anyhow, Context, Result};
use petri_core::{Board, NullRenderer, OutputMode, Renderer, RunConfig, Simulation};
use petri_tui::{FrameRenderer, FrameSnapshot, TerminalPresenter, TextRenderer};
use std::io::{self, Write};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

/// The renderer chosen for a run, plus the presenter thread frame output
/// draws from.
pub struct Output {
    renderer: Box<dyn Renderer>,
    presenter: Option<JoinHandle<Result<u64>>>,
}

impl Output {
    /// Picks the renderer once, before any worker exists.
    pub fn select(config: &RunConfig, board: &Board) -> Result<Self> {
        match config.render.output {
            OutputMode::None => Ok(Self {
                renderer: Box::new(NullRenderer),
                presenter: None,
            }),
            OutputMode::Text => Ok(Self {
                renderer: Box::new(
                    TextRenderer::new(io::stderr())
                        .with_clear_screen(config.render.clear_screen)
                        .with_delay(config.frame_delay()),
                ),
                presenter: None,
            }),
            OutputMode::Frame => {
                let delay = config.frame_delay();
                Self::frame(config, board, move |frames| {
                    TerminalPresenter::new(delay)?.run(frames)
                })
            }
        }
    }

    /// Frame output whose completed frames are drained by `present` on a
    /// dedicated thread.
    pub fn frame<P>(config: &RunConfig, board: &Board, present: P) -> Result<Self>
    where
        P: FnOnce(Receiver<FrameSnapshot>) -> Result<u64> + Send + 'static,
    {
        let renderer = FrameRenderer::new(board.rows, board.cols, config.threads)?;
        let (tx, rx) = mpsc::sync_channel::<FrameSnapshot>(1);
        let presenter = thread::Builder::new()
            .name("petri-presenter".to_string())
            .spawn(move || present(rx))
            .context("Failed to start frame presenter")?;
        Ok(Self {
            renderer: Box::new(renderer.with_sink(tx)),
            presenter: Some(presenter),
        })
    }

    #[must_use]
    pub fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }

    /// Drops the renderer, which closes the frame channel, and waits for the
    /// presenter to restore the terminal.
    pub fn finish(self) -> Result<()> {
        drop(self.renderer);
        if let Some(presenter) = self.presenter {
            let frames = presenter
                .join()
                .map_err(|_| anyhow!("Frame presenter panicked"))??;
            tracing::debug!(frames, "Frame output closed");
        }
        Ok(())
    }
}

/// Runs `board` under `config`. Partition lines, when requested, go to
/// `out` before the workers start.
///
/// `out` must not hold the stdout lock: the frame presenter draws to stdout
/// while the run is in progress.
pub fn run<W: Write>(board: &Board, config: &RunConfig, out: &mut W) -> Result<RunReport> {
    run_with(board, config, out, Output::select)
}

/// [`run`] with the output chosen by `select`.
pub fn run_with<W, S>(board: &Board, config: &RunConfig, out: &mut W, select: S) -> Result<RunReport>
where
    W: Write,
    S: FnOnce(&RunConfig, &Board) -> Result<Output>,
{
    let mut sim = Simulation::new(board, config)?;
    if config.print_partition {
        report::write_partition(out, &sim)?;
    }

    let output = select(config, board)?;
    let outcome = sim.run(output.renderer());
    let finished = output.finish();
    let summary = outcome?;
    finished?;

    Ok(RunReport::new(&sim, config, &summary))
}
