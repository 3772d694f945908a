//! # Petri Core
//!
//! Multi-threaded engine for Conway's Game of Life on a toroidal grid.
//!
//! This crate contains:
//! - Static partitioning of one grid axis among a fixed pool of workers
//! - A double-buffered grid whose authoritative buffer is flipped by index
//! - The B3/S23 rule and wraparound neighbor counting
//! - The worker loop and its two-phase round barrier
//! - A lock-guarded live-cell tally
//! - The renderer capability the worker loop reports through
//!
//! ## Round protocol
//!
//! Every worker computes its region into the staging buffer and adds its
//! live subtotal to the tally. All workers then meet at barrier A; worker 0
//! alone swaps buffers, emits the frame and resets the tally; all meet
//! again at barrier B before the next round reads the new buffer.
//!
//! ## Example
//!
//! ```
//! use petri_core::{Board, NullRenderer, PartitionAxis, RunConfig, Simulation};
//!
//! // Horizontal blinker on a 5x5 torus, two rounds, three row workers
//! let board = Board::new(5, 5, 2).with_cells([(2, 1), (2, 2), (2, 3)]);
//! let config = RunConfig {
//!     threads: 3,
//!     axis: PartitionAxis::Rows,
//!     ..Default::default()
//! };
//!
//! let mut sim = Simulation::new(&board, &config).unwrap();
//! let summary = sim.run(&NullRenderer).unwrap();
//! assert_eq!(summary.live_cells, 3);
//! assert!(sim.grid().view().is_alive(2, 1));
//! ```

/// Initial board description
pub mod board;
/// Run configuration and TOML loading
pub mod config;
/// Engine error type and result alias
pub mod error;
/// Double-buffered toroidal grid
pub mod grid;
/// Run metrics and logging setup
pub mod metrics;
/// Axis partitioning among workers
pub mod partition;
/// Renderer capability and frames
pub mod render;
/// Cell rule and neighbor counting
pub mod rules;
/// Run coordinator
pub mod simulation;
/// Round barrier, failure latch and start gate
pub mod sync;
/// Shared live-cell tally
pub mod tally;
/// Per-thread round loop
pub mod worker;

pub use board::Board;
pub use config::{OutputMode, RenderConfig, RunConfig};
pub use error::{EngineError, Result};
pub use grid::{Grid, GridView};
pub use metrics::{init_logging, RunMetrics};
pub use partition::{PartitionAxis, Region, Span};
pub use render::{Frame, NullRenderer, Renderer};
pub use rules::CellState;
pub use simulation::{RunSummary, Simulation};
