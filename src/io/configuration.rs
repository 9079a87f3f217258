//! Algorithm constants and runtime configuration defaults

// Exhaustive enumeration is 4^cells, so it is capped hard
/// Largest grid (in cells) the exhaustive search will enumerate
pub const EXHAUSTIVE_CELL_LIMIT: usize = 16;

/// Candidates between exhaustive-search progress checkpoints
pub const PROGRESS_REPORT_INTERVAL: u64 = 10_000;

/// Default refinement budget for the two-stage optimizer
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

// Default values for random matrix generation
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;
/// Default lower bound of generated cell costs (inclusive)
pub const DEFAULT_MIN_COST: u64 = 0;
/// Default upper bound of generated cell costs (inclusive)
pub const DEFAULT_MAX_COST: u64 = 100;
/// Default generated grid height and width
pub const DEFAULT_GRID_SIZE: usize = 4;

// Output settings
/// RGBA color per agent for PNG export
pub const AGENT_COLORS: [[u8; 4]; 4] = [
    [230, 85, 13, 255],
    [49, 130, 189, 255],
    [49, 163, 84, 255],
    [117, 107, 177, 255],
];
/// Side length in pixels of one cell in exported PNGs
pub const PNG_CELL_SCALE: u32 = 16;

// Sweep defaults
/// Grids generated per sweep data point
pub const SWEEP_TASKS_PER_POINT: usize = 10;
/// Smallest square grid side used by size sweeps
pub const SWEEP_MIN_SIZE: usize = 3;
/// Largest square grid side used by size sweeps
pub const SWEEP_MAX_SIZE: usize = 10;
/// Largest iteration budget probed by the iteration sweep
pub const SWEEP_MAX_ITERATIONS: usize = 20;
/// Side of the square grids used by the cost range sweep
pub const SWEEP_RANGE_GRID_SIZE: usize = 3;
/// Step between successive upper cost bounds in the cost range sweep
pub const SWEEP_RANGE_STEP: u64 = 10;
/// Number of cost ranges probed by the cost range sweep
pub const SWEEP_RANGE_COUNT: usize = 10;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
