//! Spatial data structures for grid partitioning
//!
//! This module contains the data model shared by every algorithm:
//! - The immutable cost grid and cell coordinates
//! - Bitset-backed cell regions
//! - Four-way partitions of a grid

/// Cost grid and cell coordinates
pub mod grid;
/// Four-region partition bookkeeping
pub mod partition;
/// Fixed-size cell bitsets
pub mod region;

pub use grid::{Cell, Grid};
pub use partition::{AGENT_COUNT, Partition};
pub use region::CellSet;
