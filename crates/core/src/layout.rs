//! Turns the requested canvas into a concrete room grid and the per-cell mm
//! geometry consumed by the renderer.

use crate::config::{FillMode, GeneratorConfig, Parity};
use crate::error::{Error, Result};
use crate::geometry::RoomSize;

const MINIMUM_ROOM_COUNT: i64 = 3;

fn count_with_parity(length: f64, side_length: f64, parity: Parity) -> i64 {
    let base = (length / side_length).round() as i64;
    if parity.matches(base) {
        base
    } else {
        // Both neighbors satisfy the parity and are equally near; the tie
        // breaks toward the larger count.
        base + 1
    }
}

/// The committed room counts for the configured canvas.
pub(crate) fn grid_size(config: &GeneratorConfig) -> Result<RoomSize> {
    let nx = count_with_parity(config.width, config.side_length, config.width_parity);
    let ny = count_with_parity(config.height, config.side_length, config.height_parity);
    if nx < MINIMUM_ROOM_COUNT || ny < MINIMUM_ROOM_COUNT {
        return Err(Error::CanvasTooSmall { nx, ny });
    }
    Ok(RoomSize::new(nx as u32, ny as u32))
}

/// The mm edge coordinates of every cell row and column. Fill modes only
/// change this geometry; the room counts stay committed.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CellGeometry {
    pub x_edges: Vec<f64>,
    pub y_edges: Vec<f64>,
    pub cell_width: f64,
    pub cell_height: f64,
}

impl CellGeometry {
    /// The smaller cell side, reported in the layout status event.
    pub fn cell_mm(&self) -> f64 {
        self.cell_width.min(self.cell_height)
    }
}

pub(crate) fn cell_geometry(config: &GeneratorConfig, size: RoomSize) -> CellGeometry {
    let nx = size.width as usize;
    let ny = size.height as usize;
    let fill = config.fill_mode;

    let (cell_width, cell_height) = if !fill.scales_rooms() {
        (config.side_length, config.side_length)
    } else {
        let stretched_x = config.width / nx as f64;
        let stretched_y = config.height / ny as f64;
        if fill.keeps_square_rooms() {
            let side = stretched_x.min(stretched_y);
            (side, side)
        } else {
            (stretched_x, stretched_y)
        }
    };

    let (offset_x, offset_y) = if fill.centers_rooms() {
        (
            (config.width - cell_width * nx as f64) / 2.0,
            (config.height - cell_height * ny as f64) / 2.0,
        )
    } else {
        (0.0, 0.0)
    };

    let mut x_edges: Vec<f64> = (0..=nx).map(|i| offset_x + i as f64 * cell_width).collect();
    let mut y_edges: Vec<f64> = (0..=ny).map(|i| offset_y + i as f64 * cell_height).collect();
    if fill.stretches_edge() {
        x_edges[0] = 0.0;
        x_edges[nx] = config.width;
        y_edges[0] = 0.0;
        y_edges[ny] = config.height;
    }
    CellGeometry { x_edges, y_edges, cell_width, cell_height }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_parity_rounds_the_count_up() {
        let mut config = GeneratorConfig::new(40.0, 40.0);
        config.side_length = 5.0;
        assert_eq!(grid_size(&config).unwrap(), RoomSize::new(9, 9));
    }

    #[test]
    fn even_parity_keeps_an_even_count() {
        let mut config = GeneratorConfig::new(30.0, 30.0);
        config.side_length = 5.0;
        config.width_parity = Parity::Even;
        config.height_parity = Parity::Even;
        assert_eq!(grid_size(&config).unwrap(), RoomSize::new(6, 6));
    }

    #[test]
    fn no_parity_keeps_the_rounded_count() {
        let mut config = GeneratorConfig::new(42.0, 38.0);
        config.side_length = 4.0;
        config.width_parity = Parity::None;
        config.height_parity = Parity::None;
        // 42/4 = 10.5 rounds to 11, 38/4 = 9.5 rounds to 10.
        assert_eq!(grid_size(&config).unwrap(), RoomSize::new(11, 10));
    }

    #[test]
    fn tiny_canvas_is_rejected() {
        let config = GeneratorConfig::new(8.0, 8.0);
        assert!(matches!(grid_size(&config), Err(Error::CanvasTooSmall { .. })));
    }

    #[test]
    fn stretch_edge_pins_the_outer_edges_to_the_canvas() {
        let mut config = GeneratorConfig::new(40.0, 40.0);
        config.side_length = 5.0;
        let size = grid_size(&config).unwrap();
        let geometry = cell_geometry(&config, size);
        assert_eq!(geometry.x_edges.len(), 10);
        assert_eq!(geometry.x_edges[0], 0.0);
        assert_eq!(*geometry.x_edges.last().unwrap(), 40.0);
        // 40/9 square rooms, centered: the second edge is pulled inward.
        assert!(geometry.cell_width > 4.0 && geometry.cell_width < 5.0);
    }

    #[test]
    fn fixed_center_keeps_the_configured_side_and_centers_the_block() {
        let mut config = GeneratorConfig::new(40.0, 40.0);
        config.side_length = 5.0;
        config.fill_mode = FillMode::FixedCenter;
        let size = grid_size(&config).unwrap();
        let geometry = cell_geometry(&config, size);
        assert_eq!(geometry.cell_width, 5.0);
        // 9 rooms of 5 mm in a 40 mm canvas leave -5/2 mm on each side.
        assert_eq!(geometry.x_edges[0], -2.5);
        assert_eq!(*geometry.x_edges.last().unwrap(), 42.5);
    }

    #[test]
    fn stretch_mode_allows_non_square_rooms() {
        let mut config = GeneratorConfig::new(45.0, 36.0);
        config.side_length = 4.0;
        config.width_parity = Parity::None;
        config.height_parity = Parity::None;
        config.fill_mode = FillMode::Stretch;
        let size = grid_size(&config).unwrap();
        let geometry = cell_geometry(&config, size);
        assert!(geometry.cell_width != geometry.cell_height);
        assert_eq!(geometry.x_edges[0], 0.0);
        assert!((geometry.x_edges.last().unwrap() - 45.0).abs() < 1e-9);
    }
}
