//! Rectangular cost grid and cell coordinates
//!
//! The grid is immutable once built. Cells are addressed either by their
//! `(row, col)` coordinate or by the row-major linear index `row * cols + col`,
//! which is what the bitset-backed region types store.

use ndarray::Array2;
use std::fmt;

use crate::io::error::{AlgorithmError, Result};

/// Grid coordinate with 0-based row and column
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Row index
    pub row: usize,
    /// Column index
    pub col: usize,
}

impl Cell {
    /// Create a cell from its coordinates
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to another cell
    pub const fn manhattan(self, other: Self) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Immutable n×m matrix of non-negative cell costs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    costs: Array2<u64>,
}

impl Grid {
    /// Build a grid from row vectors
    ///
    /// # Errors
    ///
    /// Returns `InvalidGrid` if the rows have different lengths or the total
    /// cost does not fit in `u64`
    pub fn from_rows(rows: Vec<Vec<u64>>) -> Result<Self> {
        let row_count = rows.len();
        let col_count = rows.first().map_or(0, Vec::len);

        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != col_count)
        {
            return Err(AlgorithmError::InvalidGrid {
                reason: format!(
                    "row {index} has {} columns, expected {col_count}",
                    row.len()
                ),
            });
        }

        // Region sums never exceed the total
        if rows
            .iter()
            .flatten()
            .try_fold(0_u64, |total, &cost| total.checked_add(cost))
            .is_none()
        {
            return Err(AlgorithmError::InvalidGrid {
                reason: "total cost overflows u64".to_string(),
            });
        }

        // A row list of empty rows is a zero-width grid
        let flat: Vec<u64> = rows.into_iter().flatten().collect();
        let shape = if col_count == 0 { (0, 0) } else { (row_count, col_count) };
        let costs = Array2::from_shape_vec(shape, flat).map_err(|e| AlgorithmError::InvalidGrid {
            reason: e.to_string(),
        })?;

        Ok(Self { costs })
    }

    /// Grid with no cells
    pub fn empty() -> Self {
        Self {
            costs: Array2::zeros((0, 0)),
        }
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.costs.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.costs.ncols()
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.costs.len()
    }

    /// True when the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Underlying cost array
    pub const fn costs(&self) -> &Array2<u64> {
        &self.costs
    }

    /// Cost of a cell, zero when out of bounds
    pub fn cost(&self, cell: Cell) -> u64 {
        self.costs.get([cell.row, cell.col]).copied().unwrap_or(0)
    }

    /// Cost of the cell at a row-major linear index
    pub fn cost_at(&self, index: usize) -> u64 {
        self.cell_at(index).map_or(0, |cell| self.cost(cell))
    }

    /// Sum of all cell costs
    pub fn total_cost(&self) -> u64 {
        self.costs.iter().sum()
    }

    /// Spread between the largest and smallest cell cost
    pub fn cost_spread(&self) -> u64 {
        let max = self.costs.iter().copied().max().unwrap_or(0);
        let min = self.costs.iter().copied().min().unwrap_or(0);
        max - min
    }

    /// Test whether a cell lies inside the grid
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows() && cell.col < self.cols()
    }

    /// Row-major linear index of a cell
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        self.contains(cell).then(|| cell.row * self.cols() + cell.col)
    }

    /// Cell at a row-major linear index
    pub fn cell_at(&self, index: usize) -> Option<Cell> {
        (index < self.cell_count()).then(|| Cell::new(index / self.cols(), index % self.cols()))
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let cols = self.cols();
        (0..self.cell_count()).map(move |index| Cell::new(index / cols, index % cols))
    }

    /// In-bounds 4-neighbors of a cell, ordered up, down, left, right
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        neighbors_within(cell, self.rows(), self.cols())
    }

    /// Row vectors, for serialization and display
    pub fn to_rows(&self) -> Vec<Vec<u64>> {
        self.costs.rows().into_iter().map(|row| row.to_vec()).collect()
    }
}

/// In-bounds 4-neighbors for given grid dimensions, ordered up, down, left, right
pub fn neighbors_within(cell: Cell, rows: usize, cols: usize) -> impl Iterator<Item = Cell> {
    let up = cell.row.checked_sub(1).map(|row| Cell::new(row, cell.col));
    let down = (cell.row + 1 < rows).then(|| Cell::new(cell.row + 1, cell.col));
    let left = cell.col.checked_sub(1).map(|col| Cell::new(cell.row, col));
    let right = (cell.col + 1 < cols).then(|| Cell::new(cell.row, cell.col + 1));

    [up, down, left, right]
        .into_iter()
        .flatten()
        .filter(move |n| n.row < rows && n.col < cols)
}
