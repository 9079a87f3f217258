//! Command-line interface for solving, generating, and sweeping cost grids

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::algorithm::exhaustive::fits_exhaustive;
use crate::algorithm::observer::TracingObserver;
use crate::algorithm::strategy::StrategyKind;
use crate::analysis::experiments::{
    SweepConfig, cost_range_sweep, iteration_sweep, render_iteration_table, render_range_table,
    render_size_table, size_sweep,
};
use crate::io::configuration::{
    AGENT_COLORS, DEFAULT_GRID_SIZE, DEFAULT_MAX_COST, DEFAULT_MAX_ITERATIONS, DEFAULT_MIN_COST,
    DEFAULT_SEED, EXHAUSTIVE_CELL_LIMIT, PNG_CELL_SCALE, SWEEP_MAX_ITERATIONS, SWEEP_MAX_SIZE,
    SWEEP_MIN_SIZE, SWEEP_RANGE_COUNT, SWEEP_RANGE_GRID_SIZE, SWEEP_RANGE_STEP,
    SWEEP_TASKS_PER_POINT,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::export_partition_as_png;
use crate::io::matrix::{MatrixGenerator, parse_inline_matrix, read_matrix, write_matrix};
use crate::io::progress::{ProgressObserver, sweep_bar};
use crate::io::render::render_report;
use crate::spatial::grid::Grid;

#[derive(Parser)]
#[command(name = "quadsplit")]
#[command(
    author,
    version,
    about = "Split a cost grid into four connected, balanced regions"
)]
/// Command-line arguments for the partitioning tool
pub struct Cli {
    /// Enable verbose logging (repeat for more: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Operation to perform
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Top-level operations
#[derive(Subcommand)]
pub enum Command {
    /// Partition a grid with one or all algorithms
    Solve(SolveArgs),
    /// Write a random matrix file
    Generate(GenerateArgs),
    /// Run an experiment sweep and print the results table
    Sweep(SweepArgs),
}

/// Where `solve` gets its grid from
#[derive(Args)]
pub struct MatrixSource {
    /// Matrix file (one row per line)
    #[arg(value_name = "FILE", conflicts_with_all = ["matrix", "random"])]
    pub file: Option<PathBuf>,

    /// Inline matrix with `;` between rows, e.g. "1 2;3 4"
    #[arg(short, long, conflicts_with = "random")]
    pub matrix: Option<String>,

    /// Generate a random matrix instead of reading one
    #[arg(short, long)]
    pub random: bool,

    #[command(flatten)]
    /// Random generation parameters
    pub generation: GenerationArgs,
}

/// Random matrix parameters
#[derive(Args, Clone, Copy)]
pub struct GenerationArgs {
    /// Number of rows
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    pub rows: usize,

    /// Number of columns
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    pub cols: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Smallest generated cost
    #[arg(long, default_value_t = DEFAULT_MIN_COST)]
    pub min_cost: u64,

    /// Largest generated cost
    #[arg(long, default_value_t = DEFAULT_MAX_COST)]
    pub max_cost: u64,
}

/// Algorithm selection for `solve`
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmChoice {
    /// Run every algorithm
    All,
    /// Exhaustive search (at most 16 cells)
    Exhaustive,
    /// Greedy growth
    Greedy,
    /// Block split plus boundary refinement
    TwoStage,
}

impl AlgorithmChoice {
    /// Strategies to run, in report order
    pub fn strategies(self) -> Vec<StrategyKind> {
        match self {
            Self::All => StrategyKind::ALL.to_vec(),
            Self::Exhaustive => vec![StrategyKind::Exhaustive],
            Self::Greedy => vec![StrategyKind::Greedy],
            Self::TwoStage => vec![StrategyKind::TwoStage],
        }
    }
}

/// Arguments of `solve`
#[derive(Args)]
pub struct SolveArgs {
    #[command(flatten)]
    /// Grid source
    pub source: MatrixSource,

    /// Algorithm to run
    #[arg(short, long, value_enum, default_value_t = AlgorithmChoice::All)]
    pub algorithm: AlgorithmChoice,

    /// Refinement budget for the two-stage algorithm
    #[arg(short = 'i', long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iterations: usize,

    /// Write one PNG per algorithm as <PREFIX>_<algorithm>.png
    #[arg(long, value_name = "PREFIX")]
    pub png: Option<PathBuf>,
}

/// Arguments of `generate`
#[derive(Args)]
pub struct GenerateArgs {
    /// Output matrix file
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    #[command(flatten)]
    /// Random generation parameters
    pub generation: GenerationArgs,
}

/// Available sweeps
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SweepKind {
    /// Two-stage objective against the iteration budget
    Iterations,
    /// Strategy objectives against the cost range
    Ranges,
    /// Strategy objectives and runtimes against grid size
    Sizes,
}

/// Arguments of `sweep`
#[derive(Args)]
pub struct SweepArgs {
    /// Which sweep to run
    #[arg(value_enum)]
    pub kind: SweepKind,

    /// Grids per data point
    #[arg(short, long, default_value_t = SWEEP_TASKS_PER_POINT)]
    pub tasks: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Smallest square grid side
    #[arg(long, default_value_t = SWEEP_MIN_SIZE)]
    pub min_size: usize,

    /// Largest square grid side
    #[arg(long, default_value_t = SWEEP_MAX_SIZE)]
    pub max_size: usize,

    /// Two-stage refinement budget (largest budget probed for `iterations`)
    #[arg(short = 'i', long)]
    pub max_iterations: Option<usize>,

    /// Comma-separated strategies to compare
    #[arg(long, value_delimiter = ',', value_parser = parse_strategy)]
    pub strategies: Vec<StrategyKind>,
}

fn parse_strategy(value: &str) -> std::result::Result<StrategyKind, String> {
    value.parse().map_err(|e: crate::io::error::AlgorithmError| e.to_string())
}

/// Executes a parsed command line
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the selected command
    ///
    /// # Errors
    ///
    /// Returns an error if the grid cannot be loaded, a parameter is invalid,
    /// or an output file cannot be written
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Command::Solve(args) => self.solve(args),
            Command::Generate(args) => Self::generate(args),
            Command::Sweep(args) => self.sweep(args),
        }
    }

    // Allow print for the solve report
    #[allow(clippy::print_stdout)]
    fn solve(&self, args: &SolveArgs) -> Result<()> {
        let grid = load_grid(&args.source)?;
        tracing::info!(rows = grid.rows(), cols = grid.cols(), "grid loaded");

        for kind in args.algorithm.strategies() {
            if kind == StrategyKind::Exhaustive
                && args.algorithm == AlgorithmChoice::All
                && !fits_exhaustive(grid.cell_count())
            {
                tracing::warn!(
                    cells = grid.cell_count(),
                    "skipping exhaustive search for a grid above {EXHAUSTIVE_CELL_LIMIT} cells"
                );
                continue;
            }

            let strategy = kind.build(args.max_iterations);
            let start = Instant::now();
            let mut tracer = TracingObserver::new(strategy.name());
            let allocation = if self.cli.should_show_progress() && kind == StrategyKind::Exhaustive
            {
                let mut observer = (ProgressObserver::new(strategy.name()), tracer);
                strategy.allocate_observed(&grid, &mut observer)
            } else {
                strategy.allocate_observed(&grid, &mut tracer)
            };
            let elapsed = start.elapsed();

            println!(
                "{}",
                render_report(
                    &grid,
                    &allocation.partition,
                    strategy.name(),
                    strategy.diagnostic_label(),
                    allocation.diagnostic,
                )
            );
            println!("Elapsed: {:.3} ms\n", elapsed.as_secs_f64() * 1000.0);

            if let Some(prefix) = &args.png {
                let path = png_path(prefix, strategy.name());
                export_partition_as_png(
                    &allocation.partition,
                    &AGENT_COLORS,
                    PNG_CELL_SCALE,
                    &path,
                )?;
                tracing::info!(path = %path.display(), "partition image written");
            }
        }

        Ok(())
    }

    fn generate(args: &GenerateArgs) -> Result<()> {
        let grid = generate_grid(args.generation)?;
        write_matrix(&grid, &args.output)?;
        tracing::info!(
            path = %args.output.display(),
            rows = grid.rows(),
            cols = grid.cols(),
            "matrix written"
        );
        Ok(())
    }

    // Allow print for the sweep table
    #[allow(clippy::print_stdout)]
    fn sweep(&self, args: &SweepArgs) -> Result<()> {
        let visible = self.cli.should_show_progress();
        let config = SweepConfig {
            seed: args.seed,
            tasks_per_point: args.tasks,
            min_size: args.min_size,
            max_size: args.max_size,
            max_iterations: args.max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS),
            ..SweepConfig::default()
        };

        let table = match args.kind {
            SweepKind::Iterations => {
                let largest = args.max_iterations.unwrap_or(SWEEP_MAX_ITERATIONS);
                let budgets: Vec<usize> = (1..=largest).collect();
                let bar = sweep_bar("iteration budgets", 0, visible);
                render_iteration_table(&iteration_sweep(&config, &budgets, &bar)?)
            }
            SweepKind::Ranges => {
                let strategies = strategies_or(&args.strategies, &StrategyKind::ALL);
                let upper_bounds: Vec<u64> = (1..=SWEEP_RANGE_COUNT as u64)
                    .map(|step| config.min_cost + step * SWEEP_RANGE_STEP)
                    .collect();
                let bar = sweep_bar("cost ranges", 0, visible);
                render_range_table(&cost_range_sweep(
                    &config,
                    SWEEP_RANGE_GRID_SIZE,
                    &upper_bounds,
                    &strategies,
                    &bar,
                )?)
            }
            SweepKind::Sizes => {
                let heuristics = [StrategyKind::Greedy, StrategyKind::TwoStage];
                let strategies = strategies_or(&args.strategies, &heuristics);
                let bar = sweep_bar("grid sizes", 0, visible);
                render_size_table(&size_sweep(&config, &strategies, &bar)?)
            }
        };

        println!("{table}");
        Ok(())
    }
}

fn strategies_or(requested: &[StrategyKind], default: &[StrategyKind]) -> Vec<StrategyKind> {
    if requested.is_empty() {
        default.to_vec()
    } else {
        requested.to_vec()
    }
}

/// Build a random grid from generation arguments
///
/// # Errors
///
/// Returns `InvalidParameter` for zero dimensions or an inverted cost range
pub fn generate_grid(generation: GenerationArgs) -> Result<Grid> {
    if generation.rows == 0 || generation.cols == 0 {
        return Err(invalid_parameter(
            "rows/cols",
            &format!("{}x{}", generation.rows, generation.cols),
            &"dimensions must be at least 1",
        ));
    }
    MatrixGenerator::new(generation.seed).generate(
        generation.rows,
        generation.cols,
        generation.min_cost,
        generation.max_cost,
    )
}

/// Resolve the grid described by a matrix source
///
/// # Errors
///
/// Returns an error if no source was given, or the chosen source fails to
/// load or parse
pub fn load_grid(source: &MatrixSource) -> Result<Grid> {
    if let Some(path) = &source.file {
        return read_matrix(path);
    }
    if let Some(text) = &source.matrix {
        return parse_inline_matrix(text);
    }
    if source.random {
        return generate_grid(source.generation);
    }
    Err(invalid_parameter(
        "source",
        &"",
        &"provide a matrix FILE, --matrix, or --random",
    ))
}

/// Output path `<prefix>_<algorithm>.png`
pub fn png_path(prefix: &Path, algorithm: &str) -> PathBuf {
    let stem = prefix.file_stem().unwrap_or_default().to_string_lossy();
    let name = format!("{stem}_{algorithm}.png");

    match prefix.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(name),
        _ => PathBuf::from(name),
    }
}
