//! Tests for cost grid construction, indexing, and neighbor ordering

#[cfg(test)]
mod tests {
    use quadsplit::AlgorithmError;
    use quadsplit::spatial::grid::{Cell, Grid, neighbors_within};

    fn grid_3x3() -> Grid {
        Grid::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]])
            .expect("rectangular rows should build a grid")
    }

    // Tests rectangular rows keep their shape and values
    // Verified by swapping rows and cols in from_rows
    #[test]
    fn test_from_rows_builds_rectangular_grid() {
        let grid = Grid::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]])
            .expect("rectangular rows should build a grid");

        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.cell_count(), 6);
        assert_eq!(grid.cost(Cell::new(1, 0)), 4);
        assert_eq!(grid.to_rows(), vec![vec![1, 2, 3], vec![4, 5, 6]]);
    }

    // Tests jagged rows are rejected instead of padded
    // Verified by removing the row length check
    #[test]
    fn test_from_rows_rejects_jagged_rows() {
        let result = Grid::from_rows(vec![vec![1, 2], vec![3]]);

        assert!(matches!(result, Err(AlgorithmError::InvalidGrid { .. })));
    }

    // Tests a total above u64::MAX is rejected at construction
    // Verified by summing the costs with unchecked addition
    #[test]
    fn test_from_rows_rejects_overflowing_total() {
        let result = Grid::from_rows(vec![vec![u64::MAX, 1], vec![1, 1]]);

        assert!(matches!(
            result,
            Err(AlgorithmError::InvalidGrid { reason }) if reason.contains("overflows")
        ));
    }

    // Tests a total of exactly u64::MAX is still accepted
    // Verified by treating the maximum total as an overflow
    #[test]
    fn test_from_rows_accepts_maximal_total() {
        let grid = Grid::from_rows(vec![vec![u64::MAX - 3, 1], vec![1, 1]])
            .expect("total equal to u64::MAX fits");

        assert_eq!(grid.total_cost(), u64::MAX);
    }

    // Tests both empty encodings produce a grid with no cells
    // Verified by keeping the row count for zero-width input
    #[test]
    fn test_empty_inputs_produce_empty_grid() {
        let no_rows = Grid::from_rows(Vec::new()).expect("no rows is a valid empty grid");
        let empty_rows =
            Grid::from_rows(vec![Vec::new(), Vec::new()]).expect("empty rows are a valid grid");

        assert!(no_rows.is_empty());
        assert!(empty_rows.is_empty());
        assert_eq!(empty_rows.cell_count(), 0);
        assert_eq!(no_rows, Grid::empty());
        assert_eq!(no_rows.cells().count(), 0);
    }

    // Tests linear indices are row-major and invert cleanly
    // Verified by using column-major indexing in index_of
    #[test]
    fn test_index_of_and_cell_at_are_row_major() {
        let grid = Grid::from_rows(vec![vec![0; 3]; 2]).expect("valid grid");

        assert_eq!(grid.index_of(Cell::new(0, 2)), Some(2));
        assert_eq!(grid.index_of(Cell::new(1, 0)), Some(3));
        assert_eq!(grid.index_of(Cell::new(2, 0)), None);
        assert_eq!(grid.index_of(Cell::new(0, 3)), None);

        for (index, cell) in grid.cells().enumerate() {
            assert_eq!(grid.cell_at(index), Some(cell));
            assert_eq!(grid.index_of(cell), Some(index));
        }
        assert_eq!(grid.cell_at(6), None);
    }

    // Tests out-of-bounds lookups return zero cost
    // Verified by indexing the cost array directly
    #[test]
    fn test_cost_out_of_bounds_is_zero() {
        let grid = grid_3x3();

        assert_eq!(grid.cost(Cell::new(3, 0)), 0);
        assert_eq!(grid.cost_at(9), 0);
        assert_eq!(grid.cost_at(4), 5);
    }

    // Tests aggregate cost statistics
    // Verified by computing spread as max instead of max - min
    #[test]
    fn test_total_cost_and_spread() {
        let grid = grid_3x3();

        assert_eq!(grid.total_cost(), 45);
        assert_eq!(grid.cost_spread(), 8);
        assert_eq!(Grid::empty().cost_spread(), 0);
    }

    // Tests neighbors are yielded up, down, left, right and clipped at edges
    // Verified by reordering the neighbor array
    #[test]
    fn test_neighbors_order_and_clipping() {
        let grid = grid_3x3();

        let center: Vec<Cell> = grid.neighbors(Cell::new(1, 1)).collect();
        assert_eq!(
            center,
            vec![
                Cell::new(0, 1),
                Cell::new(2, 1),
                Cell::new(1, 0),
                Cell::new(1, 2)
            ]
        );

        let corner: Vec<Cell> = grid.neighbors(Cell::new(0, 0)).collect();
        assert_eq!(corner, vec![Cell::new(1, 0), Cell::new(0, 1)]);

        let far_corner: Vec<Cell> = grid.neighbors(Cell::new(2, 2)).collect();
        assert_eq!(far_corner, vec![Cell::new(1, 2), Cell::new(2, 1)]);
    }

    // Tests rows do not wrap into each other through the linear index
    // Verified by deriving neighbors from index +/- 1
    #[test]
    fn test_neighbors_do_not_wrap_rows() {
        let neighbors: Vec<Cell> = neighbors_within(Cell::new(0, 2), 2, 3).collect();

        assert_eq!(neighbors, vec![Cell::new(1, 2), Cell::new(0, 1)]);
        assert!(!neighbors.contains(&Cell::new(1, 0)));
    }

    // Tests Manhattan distance and coordinate display
    // Verified by using Chebyshev distance
    #[test]
    fn test_cell_distance_and_display() {
        let a = Cell::new(0, 0);
        let b = Cell::from((2, 3));

        assert_eq!(a.manhattan(b), 5);
        assert_eq!(b.manhattan(a), 5);
        assert_eq!(b.to_string(), "(2, 3)");
    }
}
