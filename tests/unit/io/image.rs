//! Tests for PNG export of partitions including file creation and error handling

#[cfg(test)]
mod tests {
    use quadsplit::AlgorithmError;
    use quadsplit::io::configuration::AGENT_COLORS;
    use quadsplit::io::image::{export_partition_as_png, render_partition_image};
    use quadsplit::spatial::grid::Cell;
    use quadsplit::spatial::partition::Partition;
    use tempfile::TempDir;

    fn checker() -> Partition {
        Partition::from_labels(2, 3, &[0, 1, 2, 3, 0, 9])
    }

    // Tests image dimensions scale with the grid
    // Verified by swapping width and height
    #[test]
    fn test_image_dimensions() {
        let img = render_partition_image(&checker(), &AGENT_COLORS, 4).expect("renderable");

        assert_eq!(img.dimensions(), (12, 8));
    }

    // Tests each cell is painted in its agent's color
    // Verified by painting only the top-left pixel of each cell
    #[test]
    fn test_cells_use_agent_colors() {
        let img = render_partition_image(&checker(), &AGENT_COLORS, 2).expect("renderable");

        assert_eq!(img.get_pixel(0, 0).0, [230, 85, 13, 255]);
        assert_eq!(img.get_pixel(3, 1).0, [49, 130, 189, 255]);
        assert_eq!(img.get_pixel(1, 3).0, [117, 107, 177, 255]);
        assert_eq!(img.get_pixel(3, 3).0, [230, 85, 13, 255]);
    }

    // Tests unassigned cells are transparent
    // Verified by painting unassigned cells black
    #[test]
    fn test_unassigned_cells_are_transparent() {
        let img = render_partition_image(&checker(), &AGENT_COLORS, 1).expect("renderable");

        assert_eq!(img.get_pixel(2, 1).0, [0, 0, 0, 0]);
    }

    // Tests invalid inputs are rejected before drawing
    // Verified by removing the scale check
    #[test]
    fn test_render_errors() {
        assert!(matches!(
            render_partition_image(&Partition::with_dimensions(0, 0), &AGENT_COLORS, 1),
            Err(AlgorithmError::InvalidGrid { .. })
        ));
        assert!(matches!(
            render_partition_image(&checker(), &AGENT_COLORS, 0),
            Err(AlgorithmError::InvalidParameter { parameter: "scale", .. })
        ));

        let mut partition = Partition::with_dimensions(1, 1);
        partition.assign(3, Cell::new(0, 0));
        let short_palette = [[1, 2, 3, 255]];
        assert!(matches!(
            render_partition_image(&partition, &short_palette, 1),
            Err(AlgorithmError::InvalidParameter {
                parameter: "agent_colors",
                ..
            })
        ));
    }

    // Tests PNG file creation in a missing directory
    // Verified by disabling file save operation
    #[test]
    fn test_export_creates_file() {
        let dir = TempDir::new().expect("temporary directory");
        let path = dir.path().join("out/partition.png");

        let result = export_partition_as_png(&checker(), &AGENT_COLORS, 3, &path);
        assert!(result.is_ok(), "PNG export should succeed");

        let decoded = image::open(&path).expect("exported PNG should decode");
        assert_eq!((decoded.width(), decoded.height()), (9, 6));
    }
}
