//! Plain-text rendering of partitions for the console

use std::fmt::Write as _;

use crate::algorithm::objective::RegionSums;
use crate::spatial::grid::Grid;
use crate::spatial::partition::{AGENT_COUNT, Partition};

/// Agent number (1–4) of each cell, `-` for unassigned cells
pub fn render_labels(partition: &Partition) -> String {
    let mut text = String::new();
    for row in partition.label_grid().rows() {
        for owner in row {
            match owner {
                Some(agent) => {
                    let _ = write!(text, "{:>3}", agent + 1);
                }
                None => text.push_str("  -"),
            }
        }
        text.push('\n');
    }
    text
}

/// Cost of each cell, right-aligned to the widest value
pub fn render_costs(grid: &Grid) -> String {
    let width = grid
        .costs()
        .iter()
        .map(|cost| cost.to_string().len())
        .max()
        .unwrap_or(1)
        + 1;

    let mut text = String::new();
    for row in grid.to_rows() {
        for cost in row {
            let _ = write!(text, "{cost:>width$}");
        }
        text.push('\n');
    }
    text
}

/// Per-agent totals, objective value, and the algorithm's diagnostic count
pub fn render_summary(
    grid: &Grid,
    partition: &Partition,
    algorithm: &str,
    diagnostic_label: &str,
    diagnostic: u64,
) -> String {
    let sums = RegionSums::of(grid, partition);
    let mut text = format!("=== {algorithm} ===\n");
    for agent in 0..AGENT_COUNT {
        let _ = writeln!(
            text,
            "Agent {}: {} ({} cells)",
            agent + 1,
            sums.get(agent),
            partition.region_len(agent)
        );
    }
    let _ = writeln!(text, "Objective (max - min): {}", sums.imbalance());
    let _ = writeln!(text, "{diagnostic_label}: {diagnostic}");

    let unassigned = partition.cell_count() - partition.assigned_count();
    if unassigned > 0 {
        let _ = writeln!(text, "Unassigned cells: {unassigned}");
    }
    text
}

/// Summary followed by the label grid and the cost grid
pub fn render_report(
    grid: &Grid,
    partition: &Partition,
    algorithm: &str,
    diagnostic_label: &str,
    diagnostic: u64,
) -> String {
    let mut text = render_summary(grid, partition, algorithm, diagnostic_label, diagnostic);
    text.push_str("\nAllocation:\n");
    text.push_str(&render_labels(partition));
    text.push_str("\nCosts:\n");
    text.push_str(&render_costs(grid));
    text
}
