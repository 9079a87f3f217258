//! Uniform interface over the three partitioning algorithms
//!
//! The CLI and the experiment sweeps drive algorithms through
//! `AllocationStrategy` so they can be selected, compared, and timed
//! without caring which one is running.

use std::fmt;
use std::str::FromStr;

use crate::algorithm::exhaustive::exhaustive_search_observed;
use crate::algorithm::greedy::greedy_build_observed;
use crate::algorithm::objective::RegionSums;
use crate::algorithm::observer::{NoOpObserver, SearchObserver};
use crate::algorithm::two_stage::two_stage_optimize_observed;
use crate::io::configuration::DEFAULT_MAX_ITERATIONS;
use crate::io::error::{AlgorithmError, invalid_parameter};
use crate::spatial::grid::Grid;
use crate::spatial::partition::Partition;

/// Partition produced by any strategy plus its diagnostic counter
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Allocation {
    /// Resulting partition
    pub partition: Partition,
    /// Combinations checked or iterations performed, depending on strategy
    pub diagnostic: u64,
}

impl Allocation {
    /// Per-agent totals of the partition
    pub fn sums(&self, grid: &Grid) -> RegionSums {
        RegionSums::of(grid, &self.partition)
    }

    /// Objective value of the partition
    pub fn imbalance(&self, grid: &Grid) -> u64 {
        self.sums(grid).imbalance()
    }
}

/// A runnable partitioning algorithm
pub trait AllocationStrategy {
    /// Short identifier used in logs and reports
    fn name(&self) -> &'static str;

    /// Human label for the diagnostic counter
    fn diagnostic_label(&self) -> &'static str;

    /// Partition a grid, reporting checkpoints to an observer
    fn allocate_observed(&self, grid: &Grid, observer: &mut dyn SearchObserver) -> Allocation;

    /// Partition a grid
    fn allocate(&self, grid: &Grid) -> Allocation {
        self.allocate_observed(grid, &mut NoOpObserver)
    }
}

/// Global optimum by enumeration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Exhaustive;

impl AllocationStrategy for Exhaustive {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn diagnostic_label(&self) -> &'static str {
        "combinations checked"
    }

    fn allocate_observed(&self, grid: &Grid, observer: &mut dyn SearchObserver) -> Allocation {
        let outcome = exhaustive_search_observed(grid, observer);
        Allocation {
            partition: outcome.partition,
            diagnostic: outcome.combinations_checked,
        }
    }
}

/// Corner-seeded greedy growth
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Greedy;

impl AllocationStrategy for Greedy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn diagnostic_label(&self) -> &'static str {
        "growth iterations"
    }

    fn allocate_observed(&self, grid: &Grid, observer: &mut dyn SearchObserver) -> Allocation {
        let outcome = greedy_build_observed(grid, observer);
        Allocation {
            partition: outcome.partition,
            diagnostic: outcome.iterations as u64,
        }
    }
}

/// Block split plus boundary refinement
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TwoStage {
    /// Refinement iteration budget
    pub max_iterations: usize,
}

impl Default for TwoStage {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl AllocationStrategy for TwoStage {
    fn name(&self) -> &'static str {
        "two-stage"
    }

    fn diagnostic_label(&self) -> &'static str {
        "refinement iterations"
    }

    fn allocate_observed(&self, grid: &Grid, observer: &mut dyn SearchObserver) -> Allocation {
        let outcome = two_stage_optimize_observed(grid, self.max_iterations, observer);
        Allocation {
            partition: outcome.partition,
            diagnostic: outcome.iterations as u64,
        }
    }
}

/// Algorithm selector parsed from the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyKind {
    /// `exhaustive`
    Exhaustive,
    /// `greedy`
    Greedy,
    /// `two-stage`
    TwoStage,
}

impl StrategyKind {
    /// Every strategy, in report order
    pub const ALL: [Self; 3] = [Self::Greedy, Self::TwoStage, Self::Exhaustive];

    /// Instantiate the strategy
    pub fn build(self, max_iterations: usize) -> Box<dyn AllocationStrategy> {
        match self {
            Self::Exhaustive => Box::new(Exhaustive),
            Self::Greedy => Box::new(Greedy),
            Self::TwoStage => Box::new(TwoStage { max_iterations }),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Exhaustive => "exhaustive",
            Self::Greedy => "greedy",
            Self::TwoStage => "two-stage",
        };
        write!(f, "{name}")
    }
}

impl FromStr for StrategyKind {
    type Err = AlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exhaustive" | "brute-force" | "brute" => Ok(Self::Exhaustive),
            "greedy" => Ok(Self::Greedy),
            "two-stage" | "two_stage" | "twostage" => Ok(Self::TwoStage),
            _ => Err(invalid_parameter(
                "algorithm",
                &s,
                &"expected exhaustive, greedy, or two-stage",
            )),
        }
    }
}
