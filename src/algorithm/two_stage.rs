//! Construct-then-refine partitioning
//!
//! Stage one cuts the row-major cell sequence into four contiguous runs of
//! near-equal length. Stage two is steepest-descent local search: each
//! iteration evaluates every single-cell relocation across every boundary
//! and applies the one with the largest strictly positive imbalance
//! reduction.
//!
//! Relocations are chosen on balance alone. Region connectivity is not
//! re-checked after a move, so refinement may split a region.

use std::fmt;

use crate::algorithm::objective::RegionSums;
use crate::algorithm::observer::{NoOpObserver, SearchObserver};
use crate::io::configuration::DEFAULT_MAX_ITERATIONS;
use crate::spatial::grid::{Cell, Grid};
use crate::spatial::partition::{AGENT_COUNT, Partition};
use crate::spatial::region::CellSet;

/// Lifecycle of the boundary refinement loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefinementState {
    /// Still finding improving moves
    Improving,
    /// An iteration found no improving move
    Converged,
    /// The iteration budget ran out first
    IterationBudgetExhausted,
}

impl fmt::Display for RefinementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Improving => write!(f, "improving"),
            Self::Converged => write!(f, "converged"),
            Self::IterationBudgetExhausted => write!(f, "iteration budget exhausted"),
        }
    }
}

/// Single-cell relocation between two regions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Relocation {
    /// Cell being moved
    pub cell: Cell,
    /// Agent losing the cell
    pub from: usize,
    /// Agent gaining the cell
    pub to: usize,
    /// Imbalance after the move
    pub imbalance: u64,
}

/// Result of two-stage optimization
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefinementOutcome {
    /// Refined partition
    pub partition: Partition,
    /// Refinement iterations executed, including a final non-improving one
    pub iterations: usize,
    /// Terminal state of the refinement loop
    pub state: RefinementState,
    /// Imbalance of the partition refinement started from
    pub initial_imbalance: u64,
}

impl RefinementOutcome {
    /// Split into `(partition, iterations)`
    pub fn into_parts(self) -> (Partition, usize) {
        (self.partition, self.iterations)
    }
}

/// Stage one: split row-major cells into four contiguous runs
///
/// Runs differ in length by at most one; the first `cells % 4` agents get
/// the extra cell.
pub fn block_split(grid: &Grid) -> Partition {
    let mut partition = Partition::empty_for(grid);
    let cell_count = grid.cell_count();
    let base = cell_count / AGENT_COUNT;
    let remainder = cell_count % AGENT_COUNT;

    let mut cells = grid.cells();
    for agent in 0..AGENT_COUNT {
        let run = base + usize::from(agent < remainder);
        for cell in cells.by_ref().take(run) {
            partition.assign(agent, cell);
        }
    }
    partition
}

/// Cells of either region with a 4-neighbor in the other, in row-major order
pub fn boundary_cells(
    grid: &Grid,
    partition: &Partition,
    first: usize,
    second: usize,
) -> Vec<Cell> {
    let (Some(a), Some(b)) = (partition.region(first), partition.region(second)) else {
        return Vec::new();
    };

    let mut boundary = CellSet::new(grid.cell_count());
    for (region, other) in [(a, b), (b, a)] {
        for index in region.iter() {
            let Some(cell) = grid.cell_at(index) else {
                continue;
            };
            let touches = grid
                .neighbors(cell)
                .filter_map(|neighbor| grid.index_of(neighbor))
                .any(|neighbor| other.contains(neighbor));
            if touches {
                boundary.insert(index);
            }
        }
    }

    boundary.iter().filter_map(|index| grid.cell_at(index)).collect()
}

/// Best improving relocation under (first agent, second agent, cell) order
///
/// Returns `None` when no relocation strictly reduces the imbalance. Ties
/// keep the earliest move found.
pub fn best_relocation(
    grid: &Grid,
    partition: &Partition,
    sums: &RegionSums,
) -> Option<Relocation> {
    let current = sums.imbalance();
    let mut best: Option<(u64, Relocation)> = None;

    for first in 0..AGENT_COUNT {
        for second in (0..AGENT_COUNT).filter(|&second| second != first) {
            for cell in boundary_cells(grid, partition, first, second) {
                let (from, to) = if partition.owner_of(cell) == Some(first) {
                    (first, second)
                } else {
                    (second, first)
                };

                let imbalance = sums.with_moved(from, to, grid.cost(cell)).imbalance();
                let Some(improvement) = current.checked_sub(imbalance).filter(|&gain| gain > 0)
                else {
                    continue;
                };

                if best.is_none_or(|(best_gain, _)| improvement > best_gain) {
                    best = Some((
                        improvement,
                        Relocation {
                            cell,
                            from,
                            to,
                            imbalance,
                        },
                    ));
                }
            }
        }
    }

    best.map(|(_, relocation)| relocation)
}

/// Stage two: relocate boundary cells until converged or out of budget
pub fn refine_boundaries(
    grid: &Grid,
    mut partition: Partition,
    max_iterations: usize,
    observer: &mut dyn SearchObserver,
) -> RefinementOutcome {
    let mut sums = RegionSums::of(grid, &partition);
    let initial_imbalance = sums.imbalance();
    let mut iterations = 0;
    let mut state = RefinementState::Improving;

    while state == RefinementState::Improving {
        if iterations >= max_iterations {
            state = RefinementState::IterationBudgetExhausted;
            break;
        }

        let relocation = best_relocation(grid, &partition, &sums);
        iterations += 1;

        match relocation {
            Some(Relocation {
                cell,
                from,
                to,
                imbalance,
            }) => {
                partition.relocate(cell, from, to);
                sums = sums.with_moved(from, to, grid.cost(cell));
                observer.on_move(iterations, cell, from, to, imbalance);
            }
            None => state = RefinementState::Converged,
        }
    }

    let imbalance = sums.imbalance();
    tracing::info!(
        iterations,
        initial_imbalance,
        imbalance,
        state = %state,
        "boundary refinement finished"
    );
    observer.on_finish(iterations as u64, imbalance);

    RefinementOutcome {
        partition,
        iterations,
        state,
        initial_imbalance,
    }
}

/// Block split followed by boundary refinement with the default budget
pub fn two_stage_optimize_default(grid: &Grid) -> RefinementOutcome {
    two_stage_optimize(grid, DEFAULT_MAX_ITERATIONS)
}

/// Block split followed by at most `max_iterations` refinement iterations
pub fn two_stage_optimize(grid: &Grid, max_iterations: usize) -> RefinementOutcome {
    two_stage_optimize_observed(grid, max_iterations, &mut NoOpObserver)
}

/// Two-stage optimization reporting every applied move
pub fn two_stage_optimize_observed(
    grid: &Grid,
    max_iterations: usize,
    observer: &mut dyn SearchObserver,
) -> RefinementOutcome {
    if grid.is_empty() {
        return RefinementOutcome {
            partition: Partition::empty_for(grid),
            iterations: 0,
            state: RefinementState::Converged,
            initial_imbalance: 0,
        };
    }

    let initial = block_split(grid);
    refine_boundaries(grid, initial, max_iterations, observer)
}
