//! PNG export of partitions with transparency for unassigned cells

use image::{Rgba, RgbaImage};
use std::path::Path;

use crate::io::error::{AlgorithmError, Result, file_system_error, invalid_parameter};
use crate::spatial::grid::Cell;
use crate::spatial::partition::Partition;

/// Paint each cell as a `scale × scale` square in its agent's color
///
/// # Errors
///
/// Returns an error if:
/// - The partition has no cells
/// - `scale` is zero
/// - An agent has no entry in `agent_colors`
pub fn render_partition_image(
    partition: &Partition,
    agent_colors: &[[u8; 4]],
    scale: u32,
) -> Result<RgbaImage> {
    if partition.cell_count() == 0 {
        return Err(AlgorithmError::InvalidGrid {
            reason: "Cannot render a partition of an empty grid".to_string(),
        });
    }
    if scale == 0 {
        return Err(invalid_parameter("scale", &scale, &"must be at least 1"));
    }

    let width = partition.cols() as u32 * scale;
    let height = partition.rows() as u32 * scale;
    let mut img = RgbaImage::new(width, height);

    for row in 0..partition.rows() {
        for col in 0..partition.cols() {
            let color = match partition.owner_of(Cell::new(row, col)) {
                Some(agent) => {
                    let rgba = agent_colors.get(agent).copied().ok_or_else(|| {
                        invalid_parameter(
                            "agent_colors",
                            &agent_colors.len(),
                            &format!("no color for agent {}", agent + 1),
                        )
                    })?;
                    Rgba(rgba)
                }
                None => Rgba([0, 0, 0, 0]),
            };

            let x0 = col as u32 * scale;
            let y0 = row as u32 * scale;
            for dy in 0..scale {
                for dx in 0..scale {
                    img.put_pixel(x0 + dx, y0 + dy, color);
                }
            }
        }
    }

    Ok(img)
}

/// Export a partition as a PNG file, creating parent directories
///
/// # Errors
///
/// Returns the errors of `render_partition_image`, or an error if the parent
/// directory cannot be created or the image cannot be saved
pub fn export_partition_as_png(
    partition: &Partition,
    agent_colors: &[[u8; 4]],
    scale: u32,
    output_path: &Path,
) -> Result<()> {
    let img = render_partition_image(partition, agent_colors, scale)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(file_system_error(parent, "create directory"))?;
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
