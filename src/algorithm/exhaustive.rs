//! Exhaustive enumeration of every four-way labeling of a small grid
//!
//! Candidates are generated by an odometer over one label digit per cell in
//! row-major order, the last cell turning fastest. The first candidate is
//! all zeros. The odometer keeps per-agent totals and cell counts up to date
//! as digits change, so each candidate costs O(1) amortised until it has to
//! be checked for connectivity, and only candidates that strictly beat the
//! incumbent are checked at all. Ties therefore keep the earliest candidate.

use crate::algorithm::connectivity::all_regions_connected;
use crate::algorithm::objective::RegionSums;
use crate::algorithm::observer::{NoOpObserver, SearchObserver};
use crate::io::configuration::{EXHAUSTIVE_CELL_LIMIT, PROGRESS_REPORT_INTERVAL};
use crate::spatial::grid::Grid;
use crate::spatial::partition::{AGENT_COUNT, Partition};

/// Result of an exhaustive search
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Best valid partition, or four empty regions if none exists
    pub partition: Partition,
    /// Number of labelings examined
    pub combinations_checked: u64,
}

impl SearchOutcome {
    fn degenerate(grid: &Grid, combinations_checked: u64) -> Self {
        Self {
            partition: Partition::empty_for(grid),
            combinations_checked,
        }
    }

    /// Split into `(partition, combinations_checked)`
    pub fn into_parts(self) -> (Partition, u64) {
        (self.partition, self.combinations_checked)
    }
}

/// Number of labelings for a grid of `cell_count` cells, if it fits in `u64`
pub fn candidate_count(cell_count: usize) -> Option<u64> {
    u32::try_from(cell_count)
        .ok()
        .and_then(|exponent| (AGENT_COUNT as u64).checked_pow(exponent))
}

/// Whether a grid of `cell_count` cells is small enough to enumerate
///
/// The limit is inclusive: a 16-cell grid is searched.
pub const fn fits_exhaustive(cell_count: usize) -> bool {
    cell_count <= EXHAUSTIVE_CELL_LIMIT
}

/// Find the globally most balanced connected partition
///
/// Grids above `EXHAUSTIVE_CELL_LIMIT` cells, and empty grids, return four
/// empty regions and a zero count without enumerating.
pub fn exhaustive_search(grid: &Grid) -> SearchOutcome {
    exhaustive_search_observed(grid, &mut NoOpObserver)
}

/// Exhaustive search reporting progress every `PROGRESS_REPORT_INTERVAL` candidates
pub fn exhaustive_search_observed(
    grid: &Grid,
    observer: &mut dyn SearchObserver,
) -> SearchOutcome {
    let cell_count = grid.cell_count();

    if cell_count == 0 {
        return SearchOutcome::degenerate(grid, 0);
    }
    if !fits_exhaustive(cell_count) {
        tracing::warn!(
            rows = grid.rows(),
            cols = grid.cols(),
            cells = cell_count,
            limit = EXHAUSTIVE_CELL_LIMIT,
            "grid too large for exhaustive search"
        );
        return SearchOutcome::degenerate(grid, 0);
    }

    let total = candidate_count(cell_count).unwrap_or(u64::MAX);
    tracing::info!(candidates = total, "starting exhaustive search");

    let mut odometer = Odometer::new(grid);
    let mut best: Option<(u64, Partition)> = None;
    let mut checked: u64 = 0;

    loop {
        checked += 1;
        if checked % PROGRESS_REPORT_INTERVAL == 0 {
            observer.on_progress(checked, total);
        }

        if odometer.all_agents_used() {
            let imbalance = odometer.sums.imbalance();
            let improves = best
                .as_ref()
                .is_none_or(|(best_imbalance, _)| imbalance < *best_imbalance);
            if improves {
                let candidate = Partition::from_labels(grid.rows(), grid.cols(), &odometer.labels);
                if all_regions_connected(&candidate) {
                    observer.on_improvement(imbalance, checked);
                    best = Some((imbalance, candidate));
                }
            }
        }

        if !odometer.advance(grid) {
            break;
        }
    }

    observer.on_progress(checked, total);

    match best {
        Some((imbalance, partition)) => {
            tracing::info!(checked, imbalance, "exhaustive search complete");
            observer.on_finish(checked, imbalance);
            SearchOutcome {
                partition,
                combinations_checked: checked,
            }
        }
        None => {
            tracing::warn!(checked, "no valid partition exists");
            observer.on_finish(checked, 0);
            SearchOutcome::degenerate(grid, checked)
        }
    }
}

/// Base-4 counter over cell labels with running per-agent bookkeeping
struct Odometer {
    labels: Vec<u8>,
    sums: RegionSums,
    counts: [usize; AGENT_COUNT],
}

impl Odometer {
    /// All cells start with agent 0
    fn new(grid: &Grid) -> Self {
        let cell_count = grid.cell_count();
        Self {
            labels: vec![0; cell_count],
            sums: RegionSums::from_array([grid.total_cost(), 0, 0, 0]),
            counts: [cell_count, 0, 0, 0],
        }
    }

    fn all_agents_used(&self) -> bool {
        self.counts.iter().all(|&count| count > 0)
    }

    /// Step to the next labeling, returning false after the last one
    fn advance(&mut self, grid: &Grid) -> bool {
        for (index, label) in self.labels.iter_mut().enumerate().rev() {
            let from = *label as usize;
            let to = (from + 1) % AGENT_COUNT;
            let cost = grid.cost_at(index);

            *label = to as u8;
            self.sums = self.sums.with_moved(from, to, cost);
            if let Some(count) = self.counts.get_mut(from) {
                *count -= 1;
            }
            if let Some(count) = self.counts.get_mut(to) {
                *count += 1;
            }

            // No carry unless this digit wrapped
            if to != 0 {
                return true;
            }
        }
        false
    }
}
