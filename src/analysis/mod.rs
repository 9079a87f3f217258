//! Experiment harness for comparing partitioning strategies

/// Seeded sweeps over iteration budgets, cost ranges, and grid sizes
pub mod experiments;
