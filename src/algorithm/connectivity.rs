use std::collections::VecDeque;

use crate::spatial::grid::{Cell, neighbors_within};
use crate::spatial::partition::Partition;
use crate::spatial::region::CellSet;

/// Test whether a set of cells is edge-connected under 4-neighbor adjacency
///
/// Sets of zero or one cell are trivially connected. Otherwise a
/// breadth-first traversal starts from the lowest member index and only
/// steps into in-bounds members; the set is connected iff every member is
/// reached.
pub fn is_connected(cells: &CellSet, rows: usize, cols: usize) -> bool {
    let member_count = cells.len();
    if member_count <= 1 {
        return true;
    }
    let Some(start) = cells.first() else {
        return true;
    };
    if cols == 0 {
        return false;
    }

    let mut visited = CellSet::new(cells.capacity());
    let mut queue = VecDeque::with_capacity(member_count);
    visited.insert(start);
    queue.push_back(start);
    let mut reached = 1;

    while let Some(index) = queue.pop_front() {
        let cell = Cell::new(index / cols, index % cols);
        for neighbor in neighbors_within(cell, rows, cols) {
            let neighbor_index = neighbor.row * cols + neighbor.col;
            if cells.contains(neighbor_index) && visited.insert(neighbor_index) {
                reached += 1;
                queue.push_back(neighbor_index);
            }
        }
    }

    reached == member_count
}

/// Test whether every non-empty region of a partition is connected
pub fn all_regions_connected(partition: &Partition) -> bool {
    partition
        .region_sets()
        .iter()
        .all(|region| is_connected(region, partition.rows(), partition.cols()))
}
