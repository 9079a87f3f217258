/// Command-line argument parsing and command execution
pub mod cli;
/// Algorithm constants and runtime defaults
pub mod configuration;
/// Error types for the crate boundary
pub mod error;
/// PNG export of partitions
pub mod image;
/// Tracing subscriber setup
pub mod logging;
/// Matrix text format and random generation
pub mod matrix;
/// Terminal progress bars
pub mod progress;
/// Console rendering of partitions
pub mod render;
