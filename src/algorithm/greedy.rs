//! Greedy region growing from corner seeds
//!
//! Each step hands one free cell to the agent with the smallest total,
//! picking the adjacent free cell that leaves the smallest global imbalance.
//! Adjacent free cells are always visited in row-major order, so the result
//! is fully determined by the grid.

use crate::algorithm::objective::RegionSums;
use crate::algorithm::observer::{NoOpObserver, SearchObserver};
use crate::spatial::grid::{Cell, Grid};
use crate::spatial::partition::{AGENT_COUNT, Partition};
use crate::spatial::region::CellSet;

/// Result of greedy construction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GreedyOutcome {
    /// Constructed partition, possibly missing cells if growth stalled
    pub partition: Partition,
    /// Number of growth steps performed after seeding
    pub iterations: usize,
}

impl GreedyOutcome {
    /// Whether every cell ended up assigned
    pub fn is_complete(&self) -> bool {
        self.partition.is_complete()
    }

    /// Split into `(partition, iterations)`
    pub fn into_parts(self) -> (Partition, usize) {
        (self.partition, self.iterations)
    }
}

/// Pick one distinct starting cell per agent
///
/// Agents take the top-left, top-right, bottom-left and bottom-right corners
/// in that order. On grids with a single row or column some corners
/// coincide; an agent whose corner is already taken gets the free cell
/// farthest (minimum Manhattan distance to all seeds so far) from the
/// existing seeds instead, lowest row-major index on ties. Agents beyond the
/// grid's cell count get no seed.
pub fn seed_cells(grid: &Grid) -> Vec<(usize, Cell)> {
    if grid.is_empty() {
        return Vec::new();
    }

    let last_row = grid.rows() - 1;
    let last_col = grid.cols() - 1;
    let corners = [
        Cell::new(0, 0),
        Cell::new(0, last_col),
        Cell::new(last_row, 0),
        Cell::new(last_row, last_col),
    ];

    let mut seeds: Vec<(usize, Cell)> = Vec::with_capacity(AGENT_COUNT);
    for (agent, corner) in corners.into_iter().enumerate() {
        let taken = seeds.iter().any(|&(_, seed)| seed == corner);
        let choice = if taken {
            farthest_free_cell(grid, &seeds)
        } else {
            Some(corner)
        };
        if let Some(cell) = choice {
            seeds.push((agent, cell));
        }
    }
    seeds
}

fn farthest_free_cell(grid: &Grid, seeds: &[(usize, Cell)]) -> Option<Cell> {
    let mut best: Option<(usize, Cell)> = None;
    for cell in grid.cells() {
        let nearest = seeds
            .iter()
            .map(|&(_, seed)| seed.manhattan(cell))
            .min()
            .unwrap_or(usize::MAX);
        if nearest == 0 {
            continue;
        }
        if best.is_none_or(|(distance, _)| nearest > distance) {
            best = Some((nearest, cell));
        }
    }
    best.map(|(_, cell)| cell)
}

/// Free cells 4-adjacent to an agent's region, in row-major order
pub fn adjacent_free_cells(
    grid: &Grid,
    partition: &Partition,
    free: &CellSet,
    agent: usize,
) -> Vec<Cell> {
    let Some(region) = partition.region(agent) else {
        return Vec::new();
    };

    let mut adjacent = CellSet::new(grid.cell_count());
    for index in region.iter() {
        let Some(cell) = grid.cell_at(index) else {
            continue;
        };
        for neighbor_index in grid.neighbors(cell).filter_map(|n| grid.index_of(n)) {
            if free.contains(neighbor_index) {
                adjacent.insert(neighbor_index);
            }
        }
    }

    adjacent.iter().filter_map(|index| grid.cell_at(index)).collect()
}

/// Grow four regions greedily from corner seeds
pub fn greedy_build(grid: &Grid) -> GreedyOutcome {
    greedy_build_observed(grid, &mut NoOpObserver)
}

/// Greedy construction reporting every assignment
pub fn greedy_build_observed(grid: &Grid, observer: &mut dyn SearchObserver) -> GreedyOutcome {
    let mut partition = Partition::empty_for(grid);
    if grid.is_empty() {
        return GreedyOutcome {
            partition,
            iterations: 0,
        };
    }

    let mut free = CellSet::full(grid.cell_count());
    let mut sums = RegionSums::default();

    for (agent, cell) in seed_cells(grid) {
        if partition.assign(agent, cell) {
            if let Some(index) = grid.index_of(cell) {
                free.remove(index);
            }
            sums.add(agent, grid.cost(cell));
            observer.on_assignment(agent, cell, 0);
        }
    }

    let mut iterations = 0;
    while !free.is_empty() {
        let Some((agent, candidates)) = growth_candidates(grid, &partition, &free, &sums) else {
            tracing::warn!(
                unassigned = free.len(),
                iterations,
                "no region can grow; stopping with an incomplete partition"
            );
            break;
        };

        let Some(cell) = least_imbalanced_choice(grid, &sums, agent, &candidates) else {
            break;
        };

        partition.assign(agent, cell);
        if let Some(index) = grid.index_of(cell) {
            free.remove(index);
        }
        sums.add(agent, grid.cost(cell));
        iterations += 1;
        observer.on_assignment(agent, cell, iterations);
    }

    let imbalance = sums.imbalance();
    tracing::info!(iterations, imbalance, sums = %sums, "greedy construction complete");
    observer.on_finish(iterations as u64, imbalance);

    GreedyOutcome {
        partition,
        iterations,
    }
}

/// Agent to grow next and its adjacent free cells
///
/// Prefers the agent with the smallest total. If that region is boxed in,
/// the first agent in index order with any adjacent free cell grows instead.
fn growth_candidates(
    grid: &Grid,
    partition: &Partition,
    free: &CellSet,
    sums: &RegionSums,
) -> Option<(usize, Vec<Cell>)> {
    let poorest = sums.min_agent();
    let candidates = adjacent_free_cells(grid, partition, free, poorest);
    if !candidates.is_empty() {
        return Some((poorest, candidates));
    }

    (0..AGENT_COUNT).find_map(|agent| {
        let candidates = adjacent_free_cells(grid, partition, free, agent);
        (!candidates.is_empty()).then_some((agent, candidates))
    })
}

fn least_imbalanced_choice(
    grid: &Grid,
    sums: &RegionSums,
    agent: usize,
    candidates: &[Cell],
) -> Option<Cell> {
    let mut best: Option<(u64, Cell)> = None;
    for &cell in candidates {
        let imbalance = sums.with_added(agent, grid.cost(cell)).imbalance();
        if best.is_none_or(|(best_imbalance, _)| imbalance < best_imbalance) {
            best = Some((imbalance, cell));
        }
    }
    best.map(|(_, cell)| cell)
}
