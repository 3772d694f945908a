use anyhow::{Context, Result};
use clap::Parser;
use petri_core::{init_logging, OutputMode, PartitionAxis, RunConfig};
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Board file: `rows cols iters count` followed by `count` row/col pairs
    board: PathBuf,

    /// What to draw after each round
    #[arg(short, long, value_enum)]
    output: Option<Output>,

    /// Number of worker threads
    #[arg(short, long)]
    threads: Option<usize>,

    /// Axis the grid is split along
    #[arg(short, long, value_enum)]
    axis: Option<Axis>,

    /// Print each worker's region before the run
    #[arg(short, long)]
    print_partition: bool,

    /// Run configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pause after each drawn round, in milliseconds
    #[arg(long)]
    frame_delay_ms: Option<u64>,

    /// Keep scrolling instead of clearing the terminal between text frames
    #[arg(long)]
    no_clear: bool,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Output {
    #[value(alias = "0")]
    None,
    #[value(aliases = ["1", "ascii"])]
    Text,
    #[value(aliases = ["2", "visual"])]
    Frame,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Axis {
    #[value(alias = "0")]
    Rows,
    #[value(aliases = ["1", "cols"])]
    Columns,
}

impl Args {
    /// Config file first, then command-line overrides.
    fn run_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                RunConfig::from_toml(&content)
                    .with_context(|| format!("Invalid config {}", path.display()))?
            }
            None => RunConfig::default(),
        };

        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        if let Some(axis) = self.axis {
            config.axis = match axis {
                Axis::Rows => PartitionAxis::Rows,
                Axis::Columns => PartitionAxis::Columns,
            };
        }
        if let Some(output) = self.output {
            config.render.output = match output {
                Output::None => OutputMode::None,
                Output::Text => OutputMode::Text,
                Output::Frame => OutputMode::Frame,
            };
        }
        if let Some(delay) = self.frame_delay_ms {
            config.render.frame_delay_ms = delay;
        }
        if self.no_clear {
            config.render.clear_screen = false;
        }
        config.print_partition |= self.print_partition;

        config.validate()?;
        Ok(config)
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.run_config()?;
    let board = petri_io::load_board(&args.board)?;
    let report = petri_lib::run(&board, &config, &mut io::stdout())?;

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{report}");
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
