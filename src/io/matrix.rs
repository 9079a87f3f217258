//! Cost matrix text format and random generation
//!
//! One grid row per line; values separated by whitespace and/or commas.
//! Blank lines and lines starting with `#` are ignored. The inline form used
//! on the command line separates rows with `;`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

use crate::io::error::{AlgorithmError, Result, file_system_error, invalid_parameter};
use crate::spatial::grid::Grid;

/// Parse a multi-line matrix
///
/// # Errors
///
/// Returns `MatrixParse` for a non-integer token and `InvalidGrid` for
/// jagged rows
pub fn parse_matrix(text: &str) -> Result<Grid> {
    let mut rows = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        rows.push(parse_row(trimmed, number + 1)?);
    }
    Grid::from_rows(rows)
}

/// Parse the inline `;`-separated form, e.g. `"1 2; 3 4"`
///
/// # Errors
///
/// Returns the same errors as `parse_matrix`
pub fn parse_inline_matrix(text: &str) -> Result<Grid> {
    parse_matrix(&text.replace(';', "\n"))
}

fn parse_row(line: &str, number: usize) -> Result<Vec<u64>> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<u64>().map_err(|e| AlgorithmError::MatrixParse {
                line: number,
                reason: format!("'{token}' is not a non-negative integer: {e}"),
            })
        })
        .collect()
}

/// Read a matrix file
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be read, otherwise the errors of
/// `parse_matrix`
pub fn read_matrix(path: &Path) -> Result<Grid> {
    let text = std::fs::read_to_string(path).map_err(file_system_error(path, "read matrix"))?;
    parse_matrix(&text)
}

/// Render a grid in the text format
pub fn format_matrix(grid: &Grid) -> String {
    let mut text = String::new();
    for row in grid.to_rows() {
        let line: Vec<String> = row.iter().map(u64::to_string).collect();
        text.push_str(&line.join(" "));
        text.push('\n');
    }
    text
}

/// Write a grid to a matrix file, creating parent directories
///
/// # Errors
///
/// Returns `FileSystem` if the directory or file cannot be written
pub fn write_matrix(grid: &Grid, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(file_system_error(parent, "create directory"))?;
    }
    std::fs::write(path, format_matrix(grid)).map_err(file_system_error(path, "write matrix"))
}

/// Seeded generator of random cost grids
pub struct MatrixGenerator {
    rng: StdRng,
}

impl MatrixGenerator {
    /// Create a deterministic generator
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate a `rows × cols` grid with costs uniform in `min..=max`
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `min > max`
    pub fn generate(&mut self, rows: usize, cols: usize, min: u64, max: u64) -> Result<Grid> {
        if min > max {
            return Err(invalid_parameter(
                "min_cost",
                &min,
                &format!("must not exceed max_cost ({max})"),
            ));
        }
        let costs: Vec<Vec<u64>> = (0..rows)
            .map(|_| {
                (0..cols)
                    .map(|_| self.rng.random_range(min..=max))
                    .collect::<Vec<u64>>()
            })
            .collect();
        Grid::from_rows(costs)
    }
}
