//! Run configuration.
//!
//! Values come from three layers, later ones winning:
//!
//! 1. Default values (hardcoded in `Default` impl)
//! 2. An optional `petri.toml` file
//! 3. Command-line flags
//!
//! ## Example `petri.toml`
//!
//! ```toml
//! threads = 4
//! axis = "columns"
//! print_partition = true
//!
//! [render]
//! output = "text"
//! frame_delay_ms = 50
//! clear_screen = false
//! ```

pub use crate::partition::PartitionAxis;
use serde::{Deserialize, Serialize};

/// Upper bound on the worker table.
pub const MAX_THREADS: usize = 1024;
/// Upper bound on the per-frame pause of animated output.
pub const MAX_FRAME_DELAY_MS: u64 = 10_000;

/// Which renderer the run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    #[default]
    None,
    Text,
    Frame,
}

/// Renderer settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RenderConfig {
    pub output: OutputMode,
    /// Pause after each emitted frame
    pub frame_delay_ms: u64,
    /// Clear the terminal before each text frame
    pub clear_screen: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output: OutputMode::None,
            frame_delay_ms: 100,
            clear_screen: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RunConfig {
    pub threads: usize,
    pub axis: PartitionAxis,
    /// Print each worker's region before the run starts
    pub print_partition: bool,
    pub render: RenderConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            threads: 1,
            axis: PartitionAxis::Rows,
            print_partition: false,
            render: RenderConfig::default(),
        }
    }
}

impl RunConfig {
    /// Validates run parameters.
    ///
    /// # Validation Rules
    /// - Thread count must be in `[1, MAX_THREADS]`
    /// - Frame delay must not exceed `MAX_FRAME_DELAY_MS`
    ///
    /// Whether the thread count fits the board is checked when partitioning.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.threads > 0, "Thread count must be positive");
        anyhow::ensure!(
            self.threads <= MAX_THREADS,
            "Thread count too large (max {MAX_THREADS})"
        );
        anyhow::ensure!(
            self.render.frame_delay_ms <= MAX_FRAME_DELAY_MS,
            "Frame delay too long (max {MAX_FRAME_DELAY_MS} ms)"
        );
        Ok(())
    }

    /// Parses and validates a configuration file's contents.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn frame_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.render.frame_delay_ms)
    }
}
