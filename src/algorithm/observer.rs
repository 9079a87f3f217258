//! Checkpoint callbacks for the partitioning algorithms
//!
//! Every algorithm has an `_observed` entry point taking a `SearchObserver`.
//! Callbacks are notifications only: an observer cannot steer or stop a
//! search, and every method defaults to doing nothing so implementors pick
//! the checkpoints they care about.
//!
//! Methods take `&mut self`; observers are single-threaded.

use crate::spatial::grid::Cell;

/// Receives progress notifications from a running algorithm
pub trait SearchObserver {
    /// Exhaustive search has examined `checked` of `total` candidates
    fn on_progress(&mut self, _checked: u64, _total: u64) {}

    /// Exhaustive search found a strictly better valid candidate
    fn on_improvement(&mut self, _imbalance: u64, _checked: u64) {}

    /// Greedy construction assigned a cell
    ///
    /// Seeds are reported with iteration 0.
    fn on_assignment(&mut self, _agent: usize, _cell: Cell, _iteration: usize) {}

    /// Boundary refinement relocated a cell, leaving the given imbalance
    fn on_move(
        &mut self,
        _iteration: usize,
        _cell: Cell,
        _from: usize,
        _to: usize,
        _imbalance: u64,
    ) {
    }

    /// Algorithm finished with its diagnostic count and final imbalance
    fn on_finish(&mut self, _diagnostic: u64, _imbalance: u64) {}
}

/// Observer that ignores every checkpoint
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoOpObserver;

impl SearchObserver for NoOpObserver {}

/// Observer that forwards checkpoints to `tracing` events
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TracingObserver {
    algorithm: &'static str,
}

impl TracingObserver {
    /// Create an observer tagging events with the algorithm name
    pub const fn new(algorithm: &'static str) -> Self {
        Self { algorithm }
    }
}

impl SearchObserver for TracingObserver {
    fn on_progress(&mut self, checked: u64, total: u64) {
        tracing::trace!(algorithm = self.algorithm, checked, total, "progress");
    }

    fn on_improvement(&mut self, imbalance: u64, checked: u64) {
        tracing::debug!(
            algorithm = self.algorithm,
            imbalance,
            checked,
            "new best candidate"
        );
    }

    fn on_assignment(&mut self, agent: usize, cell: Cell, iteration: usize) {
        tracing::trace!(
            algorithm = self.algorithm,
            agent = agent + 1,
            %cell,
            iteration,
            "cell assigned"
        );
    }

    fn on_move(&mut self, iteration: usize, cell: Cell, from: usize, to: usize, imbalance: u64) {
        tracing::debug!(
            algorithm = self.algorithm,
            iteration,
            %cell,
            from = from + 1,
            to = to + 1,
            imbalance,
            "boundary cell moved"
        );
    }

    fn on_finish(&mut self, diagnostic: u64, imbalance: u64) {
        tracing::info!(algorithm = self.algorithm, diagnostic, imbalance, "finished");
    }
}

/// Fan a checkpoint out to two observers
impl<A, B> SearchObserver for (A, B)
where
    A: SearchObserver,
    B: SearchObserver,
{
    fn on_progress(&mut self, checked: u64, total: u64) {
        self.0.on_progress(checked, total);
        self.1.on_progress(checked, total);
    }

    fn on_improvement(&mut self, imbalance: u64, checked: u64) {
        self.0.on_improvement(imbalance, checked);
        self.1.on_improvement(imbalance, checked);
    }

    fn on_assignment(&mut self, agent: usize, cell: Cell, iteration: usize) {
        self.0.on_assignment(agent, cell, iteration);
        self.1.on_assignment(agent, cell, iteration);
    }

    fn on_move(&mut self, iteration: usize, cell: Cell, from: usize, to: usize, imbalance: u64) {
        self.0.on_move(iteration, cell, from, to, imbalance);
        self.1.on_move(iteration, cell, from, to, imbalance);
    }

    fn on_finish(&mut self, diagnostic: u64, imbalance: u64) {
        self.0.on_finish(diagnostic, imbalance);
        self.1.on_finish(diagnostic, imbalance);
    }
}

impl<T: SearchObserver + ?Sized> SearchObserver for &mut T {
    fn on_progress(&mut self, checked: u64, total: u64) {
        (**self).on_progress(checked, total);
    }

    fn on_improvement(&mut self, imbalance: u64, checked: u64) {
        (**self).on_improvement(imbalance, checked);
    }

    fn on_assignment(&mut self, agent: usize, cell: Cell, iteration: usize) {
        (**self).on_assignment(agent, cell, iteration);
    }

    fn on_move(&mut self, iteration: usize, cell: Cell, from: usize, to: usize, imbalance: u64) {
        (**self).on_move(iteration, cell, from, to, imbalance);
    }

    fn on_finish(&mut self, diagnostic: u64, imbalance: u64) {
        (**self).on_finish(diagnostic, imbalance);
    }
}
