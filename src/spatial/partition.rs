//! Four-way assignment of grid cells to agents
//!
//! A `Partition` owns one `CellSet` per agent. Mutation goes through
//! `assign` and `relocate`, which refuse to create overlapping regions, so
//! disjointness holds for every partition built through this API.
//! Coverage is not enforced: greedy construction may legitimately stop with
//! unassigned cells.

use ndarray::Array2;

use crate::spatial::grid::{Cell, Grid};
use crate::spatial::region::CellSet;

/// Number of agents every partition is split between
pub const AGENT_COUNT: usize = 4;

/// Ordered set of exactly four cell regions over one grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition {
    regions: [CellSet; AGENT_COUNT],
    rows: usize,
    cols: usize,
}

impl Partition {
    /// Four empty regions sized for the given grid
    pub fn empty_for(grid: &Grid) -> Self {
        Self::with_dimensions(grid.rows(), grid.cols())
    }

    /// Four empty regions sized for `rows × cols`
    pub fn with_dimensions(rows: usize, cols: usize) -> Self {
        let capacity = rows * cols;
        Self {
            regions: std::array::from_fn(|_| CellSet::new(capacity)),
            rows,
            cols,
        }
    }

    /// Build a partition from one label per cell in row-major order
    ///
    /// Labels outside `0..AGENT_COUNT` leave their cell unassigned.
    pub fn from_labels(rows: usize, cols: usize, labels: &[u8]) -> Self {
        let mut partition = Self::with_dimensions(rows, cols);
        for (index, &label) in labels.iter().enumerate().take(rows * cols) {
            if let Some(region) = partition.regions.get_mut(label as usize) {
                region.insert(index);
            }
        }
        partition
    }

    /// Number of grid rows this partition covers
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of grid columns this partition covers
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of grid cells
    pub const fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Region bitset for an agent
    pub fn region(&self, agent: usize) -> Option<&CellSet> {
        self.regions.get(agent)
    }

    /// All four region bitsets
    pub const fn region_sets(&self) -> &[CellSet; AGENT_COUNT] {
        &self.regions
    }

    /// Cells of one agent's region in row-major order
    pub fn region_cells(&self, agent: usize) -> Vec<Cell> {
        self.regions
            .get(agent)
            .map(|region| region.iter().map(|index| self.cell_of(index)).collect())
            .unwrap_or_default()
    }

    /// All four regions as coordinate lists, row-major within each region
    pub fn regions(&self) -> [Vec<Cell>; AGENT_COUNT] {
        std::array::from_fn(|agent| self.region_cells(agent))
    }

    /// Number of cells held by an agent
    pub fn region_len(&self, agent: usize) -> usize {
        self.regions.get(agent).map_or(0, CellSet::len)
    }

    /// Agent that owns the cell at a linear index
    pub fn owner_at(&self, index: usize) -> Option<usize> {
        self.regions.iter().position(|region| region.contains(index))
    }

    /// Agent that owns a cell
    pub fn owner_of(&self, cell: Cell) -> Option<usize> {
        self.index_of(cell).and_then(|index| self.owner_at(index))
    }

    /// Give an unowned cell to an agent
    ///
    /// Returns false and leaves the partition unchanged if the cell is out of
    /// bounds, already owned, or the agent index is invalid.
    pub fn assign(&mut self, agent: usize, cell: Cell) -> bool {
        let Some(index) = self.index_of(cell) else {
            return false;
        };
        if agent >= AGENT_COUNT || self.owner_at(index).is_some() {
            return false;
        }
        self.regions
            .get_mut(agent)
            .is_some_and(|region| region.insert(index))
    }

    /// Move a cell from one agent's region to another's
    ///
    /// Returns false and leaves the partition unchanged unless `from` owns
    /// the cell and `to` is a different, valid agent.
    pub fn relocate(&mut self, cell: Cell, from: usize, to: usize) -> bool {
        let Some(index) = self.index_of(cell) else {
            return false;
        };
        if from == to || to >= AGENT_COUNT || self.owner_at(index) != Some(from) {
            return false;
        }
        let removed = self
            .regions
            .get_mut(from)
            .is_some_and(|region| region.remove(index));
        removed
            && self
                .regions
                .get_mut(to)
                .is_some_and(|region| region.insert(index))
    }

    /// Number of cells owned by any agent
    pub fn assigned_count(&self) -> usize {
        self.regions.iter().map(CellSet::len).sum()
    }

    /// True when every grid cell is owned by exactly one agent
    pub fn is_complete(&self) -> bool {
        self.is_disjoint() && self.assigned_count() == self.cell_count()
    }

    /// True when no cell belongs to more than one region
    pub fn is_disjoint(&self) -> bool {
        self.regions.iter().enumerate().all(|(a, region)| {
            self.regions
                .iter()
                .skip(a + 1)
                .all(|other| !region.intersects(other))
        })
    }

    /// True when all four regions are empty
    pub fn is_empty(&self) -> bool {
        self.regions.iter().all(CellSet::is_empty)
    }

    /// Owner of every cell as a `rows × cols` array
    pub fn label_grid(&self) -> Array2<Option<usize>> {
        Array2::from_shape_fn((self.rows, self.cols), |(row, col)| {
            self.owner_of(Cell::new(row, col))
        })
    }

    fn index_of(&self, cell: Cell) -> Option<usize> {
        (cell.row < self.rows && cell.col < self.cols).then(|| cell.row * self.cols + cell.col)
    }

    const fn cell_of(&self, index: usize) -> Cell {
        // cols is non-zero whenever a region holds an index
        Cell::new(index / self.cols, index % self.cols)
    }
}
