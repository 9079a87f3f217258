use std::fmt;

use crate::spatial::grid::Grid;
use crate::spatial::partition::{AGENT_COUNT, Partition};

/// Per-agent cost totals for one partition
///
/// Cheap to copy; the search algorithms simulate moves on copies rather
/// than recomputing from the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegionSums {
    sums: [u64; AGENT_COUNT],
}

impl RegionSums {
    /// Wrap explicit totals
    pub const fn from_array(sums: [u64; AGENT_COUNT]) -> Self {
        Self { sums }
    }

    /// Sum the costs of every region of a partition
    ///
    /// Empty regions contribute zero.
    pub fn of(grid: &Grid, partition: &Partition) -> Self {
        let sums = std::array::from_fn(|agent| {
            partition
                .region(agent)
                .map_or(0, |region| region.iter().map(|index| grid.cost_at(index)).sum::<u64>())
        });
        Self { sums }
    }

    /// Totals indexed by agent
    pub const fn as_array(&self) -> &[u64; AGENT_COUNT] {
        &self.sums
    }

    /// Total of one agent, zero for an invalid agent
    pub fn get(&self, agent: usize) -> u64 {
        self.sums.get(agent).copied().unwrap_or(0)
    }

    /// Add a cell cost to an agent
    pub fn add(&mut self, agent: usize, cost: u64) {
        if let Some(sum) = self.sums.get_mut(agent) {
            *sum += cost;
        }
    }

    /// Remove a cell cost from an agent
    pub fn subtract(&mut self, agent: usize, cost: u64) {
        if let Some(sum) = self.sums.get_mut(agent) {
            *sum = sum.saturating_sub(cost);
        }
    }

    /// Totals after giving `cost` to `agent`
    #[must_use]
    pub fn with_added(mut self, agent: usize, cost: u64) -> Self {
        self.add(agent, cost);
        self
    }

    /// Totals after moving a cell of `cost` from `from` to `to`
    #[must_use]
    pub fn with_moved(mut self, from: usize, to: usize, cost: u64) -> Self {
        self.subtract(from, cost);
        self.add(to, cost);
        self
    }

    /// Agent with the smallest total, lowest index on ties
    pub fn min_agent(&self) -> usize {
        let mut best = 0;
        for (agent, &sum) in self.sums.iter().enumerate() {
            if sum < self.get(best) {
                best = agent;
            }
        }
        best
    }

    /// Largest total minus smallest total
    pub fn imbalance(&self) -> u64 {
        imbalance(&self.sums)
    }
}

impl fmt::Display for RegionSums {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.sums)
    }
}

/// Largest value minus smallest value, zero for an empty slice
pub fn imbalance(sums: &[u64]) -> u64 {
    let max = sums.iter().copied().max().unwrap_or(0);
    let min = sums.iter().copied().min().unwrap_or(0);
    max - min
}

/// Imbalance of a partition over a grid
pub fn partition_imbalance(grid: &Grid, partition: &Partition) -> u64 {
    RegionSums::of(grid, partition).imbalance()
}
