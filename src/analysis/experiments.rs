//! Seeded experiment sweeps comparing the partitioning strategies
//!
//! Every data point regenerates its grids from the configured seed, so all
//! points of a sweep see the same random matrices and objective values are
//! reproducible. Durations are wall-clock and naturally vary between runs.

use indicatif::ProgressBar;
use std::fmt::Write as _;
use std::time::{Duration, Instant};

use crate::algorithm::exhaustive::fits_exhaustive;
use crate::algorithm::strategy::{AllocationStrategy, StrategyKind, TwoStage};
use crate::io::configuration::{
    DEFAULT_MAX_COST, DEFAULT_MAX_ITERATIONS, DEFAULT_MIN_COST, DEFAULT_SEED,
    EXHAUSTIVE_CELL_LIMIT, SWEEP_MAX_SIZE, SWEEP_MIN_SIZE, SWEEP_TASKS_PER_POINT,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::matrix::MatrixGenerator;
use crate::spatial::grid::Grid;

/// Shared parameters of every sweep
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SweepConfig {
    /// Seed for matrix generation
    pub seed: u64,
    /// Grids generated per data point and grid size
    pub tasks_per_point: usize,
    /// Smallest square grid side
    pub min_size: usize,
    /// Largest square grid side
    pub max_size: usize,
    /// Lower bound of generated costs
    pub min_cost: u64,
    /// Upper bound of generated costs
    pub max_cost: u64,
    /// Refinement budget for the two-stage strategy
    pub max_iterations: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            tasks_per_point: SWEEP_TASKS_PER_POINT,
            min_size: SWEEP_MIN_SIZE,
            max_size: SWEEP_MAX_SIZE,
            min_cost: DEFAULT_MIN_COST,
            max_cost: DEFAULT_MAX_COST,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SweepConfig {
    /// Check the configuration describes at least one task
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for zero tasks, an empty size range, or an
    /// inverted cost range
    pub fn validate(&self) -> Result<()> {
        if self.tasks_per_point == 0 {
            return Err(invalid_parameter("tasks", &0, &"must be at least 1"));
        }
        if self.min_size == 0 || self.min_size > self.max_size {
            return Err(invalid_parameter(
                "min_size",
                &self.min_size,
                &format!("must be between 1 and max_size ({})", self.max_size),
            ));
        }
        if self.min_cost > self.max_cost {
            return Err(invalid_parameter(
                "min_cost",
                &self.min_cost,
                &format!("must not exceed max_cost ({})", self.max_cost),
            ));
        }
        Ok(())
    }

    fn sizes(&self) -> impl Iterator<Item = usize> {
        self.min_size..=self.max_size
    }

    fn size_count(&self) -> usize {
        self.max_size + 1 - self.min_size
    }
}

/// Refuse exhaustive search on square grids it would not enumerate
fn check_exhaustive_side(strategies: &[StrategyKind], side: usize) -> Result<()> {
    let cells = side.saturating_mul(side);
    if strategies.contains(&StrategyKind::Exhaustive) && !fits_exhaustive(cells) {
        return Err(invalid_parameter(
            "strategies",
            &StrategyKind::Exhaustive,
            &format!("a {side}x{side} grid has {cells} cells, above {EXHAUSTIVE_CELL_LIMIT}"),
        ));
    }
    Ok(())
}

/// Mean objective and runtime of one strategy at one data point
#[derive(Clone, Debug, PartialEq)]
pub struct StrategyStats {
    /// Strategy name
    pub strategy: &'static str,
    /// Mean imbalance over all tasks
    pub mean_objective: f64,
    /// Mean wall-clock time per task
    pub mean_duration: Duration,
}

/// Mean two-stage objective for one iteration budget
#[derive(Clone, Debug, PartialEq)]
pub struct IterationPoint {
    /// Refinement budget used
    pub max_iterations: usize,
    /// Mean imbalance over all sizes and tasks
    pub mean_objective: f64,
}

/// Strategy comparison for one cost range
#[derive(Clone, Debug, PartialEq)]
pub struct RangePoint {
    /// Upper bound of generated costs
    pub max_cost: u64,
    /// Mean max−min cost spread of the generated grids
    pub mean_spread: f64,
    /// One entry per strategy, in the requested order
    pub strategies: Vec<StrategyStats>,
}

/// Strategy comparison for one grid size
#[derive(Clone, Debug, PartialEq)]
pub struct SizePoint {
    /// Side length of the square grids
    pub size: usize,
    /// One entry per strategy, in the requested order
    pub strategies: Vec<StrategyStats>,
}

#[derive(Default)]
struct Accumulator {
    objective_total: u64,
    duration_total: Duration,
    samples: u32,
}

impl Accumulator {
    fn record(&mut self, strategy: &dyn AllocationStrategy, grid: &Grid) {
        let start = Instant::now();
        let allocation = strategy.allocate(grid);
        self.duration_total += start.elapsed();
        self.objective_total += allocation.imbalance(grid);
        self.samples += 1;
    }

    fn mean_objective(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.objective_total as f64 / f64::from(self.samples)
        }
    }

    fn stats(&self, strategy: &'static str) -> StrategyStats {
        StrategyStats {
            strategy,
            mean_objective: self.mean_objective(),
            mean_duration: self
                .duration_total
                .checked_div(self.samples)
                .unwrap_or_default(),
        }
    }
}

/// Mean two-stage objective as a function of the iteration budget
///
/// # Errors
///
/// Returns `InvalidParameter` if the configuration is invalid
pub fn iteration_sweep(
    config: &SweepConfig,
    budgets: &[usize],
    progress: &ProgressBar,
) -> Result<Vec<IterationPoint>> {
    config.validate()?;
    progress.set_length((budgets.len() * config.size_count() * config.tasks_per_point) as u64);

    let mut points = Vec::with_capacity(budgets.len());
    for &max_iterations in budgets {
        let strategy = TwoStage { max_iterations };
        let mut generator = MatrixGenerator::new(config.seed);
        let mut accumulator = Accumulator::default();

        for size in config.sizes() {
            for _ in 0..config.tasks_per_point {
                let grid = generator.generate(size, size, config.min_cost, config.max_cost)?;
                accumulator.record(&strategy, &grid);
                progress.inc(1);
            }
        }

        let point = IterationPoint {
            max_iterations,
            mean_objective: accumulator.mean_objective(),
        };
        tracing::info!(max_iterations, mean = point.mean_objective, "iteration point");
        points.push(point);
    }

    progress.finish_and_clear();
    Ok(points)
}

/// Strategy objectives as the cost range widens on fixed-size grids
///
/// Costs are drawn from `config.min_cost..=upper` for each upper bound.
///
/// # Errors
///
/// Returns `InvalidParameter` if the configuration is invalid, an upper
/// bound is below `config.min_cost`, or exhaustive search is requested for
/// grids above its cell limit
pub fn cost_range_sweep(
    config: &SweepConfig,
    grid_size: usize,
    upper_bounds: &[u64],
    strategies: &[StrategyKind],
    progress: &ProgressBar,
) -> Result<Vec<RangePoint>> {
    config.validate()?;
    check_exhaustive_side(strategies, grid_size)?;
    progress.set_length((upper_bounds.len() * config.tasks_per_point) as u64);

    let built: Vec<Box<dyn AllocationStrategy>> = strategies
        .iter()
        .map(|kind| kind.build(config.max_iterations))
        .collect();

    let mut points = Vec::with_capacity(upper_bounds.len());
    for &upper in upper_bounds {
        let mut generator = MatrixGenerator::new(config.seed);
        let mut accumulators: Vec<Accumulator> =
            built.iter().map(|_| Accumulator::default()).collect();
        let mut spread_total = 0;

        for _ in 0..config.tasks_per_point {
            let grid = generator.generate(grid_size, grid_size, config.min_cost, upper)?;
            spread_total += grid.cost_spread();
            for (strategy, accumulator) in built.iter().zip(accumulators.iter_mut()) {
                accumulator.record(strategy.as_ref(), &grid);
            }
            progress.inc(1);
        }

        let point = RangePoint {
            max_cost: upper,
            mean_spread: spread_total as f64 / config.tasks_per_point as f64,
            strategies: built
                .iter()
                .zip(&accumulators)
                .map(|(strategy, accumulator)| accumulator.stats(strategy.name()))
                .collect(),
        };
        tracing::info!(max_cost = upper, spread = point.mean_spread, "cost range point");
        points.push(point);
    }

    progress.finish_and_clear();
    Ok(points)
}

/// Strategy objectives and runtimes per square grid size
///
/// # Errors
///
/// Returns `InvalidParameter` if the configuration is invalid or exhaustive
/// search is requested with `max_size` above its cell limit
pub fn size_sweep(
    config: &SweepConfig,
    strategies: &[StrategyKind],
    progress: &ProgressBar,
) -> Result<Vec<SizePoint>> {
    config.validate()?;
    check_exhaustive_side(strategies, config.max_size)?;
    progress.set_length((config.size_count() * config.tasks_per_point) as u64);

    let built: Vec<Box<dyn AllocationStrategy>> = strategies
        .iter()
        .map(|kind| kind.build(config.max_iterations))
        .collect();

    let mut generator = MatrixGenerator::new(config.seed);
    let mut points = Vec::with_capacity(config.size_count());
    for size in config.sizes() {
        let mut accumulators: Vec<Accumulator> =
            built.iter().map(|_| Accumulator::default()).collect();

        for _ in 0..config.tasks_per_point {
            let grid = generator.generate(size, size, config.min_cost, config.max_cost)?;
            for (strategy, accumulator) in built.iter().zip(accumulators.iter_mut()) {
                accumulator.record(strategy.as_ref(), &grid);
            }
            progress.inc(1);
        }

        tracing::info!(size, "size point");
        points.push(SizePoint {
            size,
            strategies: built
                .iter()
                .zip(&accumulators)
                .map(|(strategy, accumulator)| accumulator.stats(strategy.name()))
                .collect(),
        });
    }

    progress.finish_and_clear();
    Ok(points)
}

/// Two-column table of iteration budget against mean objective
pub fn render_iteration_table(points: &[IterationPoint]) -> String {
    let mut text = format!("{:>10} {:>14}\n", "iterations", "mean objective");
    for point in points {
        let _ = writeln!(text, "{:>10} {:>14.2}", point.max_iterations, point.mean_objective);
    }
    text
}

/// Table of mean spread and per-strategy mean objective per cost range
pub fn render_range_table(points: &[RangePoint]) -> String {
    let mut text = format!("{:>8} {:>10}", "max cost", "spread");
    for stats in points.first().map(|p| p.strategies.as_slice()).unwrap_or_default() {
        let _ = write!(text, " {:>12}", stats.strategy);
    }
    text.push('\n');

    for point in points {
        let _ = write!(text, "{:>8} {:>10.2}", point.max_cost, point.mean_spread);
        for stats in &point.strategies {
            let _ = write!(text, " {:>12.2}", stats.mean_objective);
        }
        text.push('\n');
    }
    text
}

/// Table of per-strategy mean objective and mean runtime per grid size
pub fn render_size_table(points: &[SizePoint]) -> String {
    let mut text = format!("{:>6}", "size");
    for stats in points.first().map(|p| p.strategies.as_slice()).unwrap_or_default() {
        let _ = write!(text, " {:>12} {:>12}", stats.strategy, "time (ms)");
    }
    text.push('\n');

    for point in points {
        let _ = write!(text, "{:>6}", format!("{0}x{0}", point.size));
        for stats in &point.strategies {
            let _ = write!(
                text,
                " {:>12.2} {:>12.3}",
                stats.mean_objective,
                stats.mean_duration.as_secs_f64() * 1000.0
            );
        }
        text.push('\n');
    }
    text
}
