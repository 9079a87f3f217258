//! Balanced partitioning of cost grids into four connected regions
//!
//! A rectangular grid of non-negative cell costs is split between four
//! agents so that every region is edge-connected and the spread between the
//! largest and smallest region total is as small as possible. Three solvers
//! share the same data model and objective:
//!
//! - exhaustive enumeration, the global optimum for grids of up to 16 cells
//! - greedy growth from the four corners
//! - a block split refined by boundary-cell relocation

#![forbid(unsafe_code)]

/// Partitioning algorithms and their shared primitives
pub mod algorithm;
/// Experiment sweeps comparing the algorithms
pub mod analysis;
/// Input/output operations, configuration, and error handling
pub mod io;
/// Grid, region, and partition data structures
pub mod spatial;

pub use algorithm::exhaustive::{SearchOutcome, exhaustive_search};
pub use algorithm::greedy::{GreedyOutcome, greedy_build};
pub use algorithm::two_stage::{RefinementOutcome, RefinementState, two_stage_optimize};
pub use io::error::{AlgorithmError, Result};
pub use spatial::{AGENT_COUNT, Cell, Grid, Partition};
