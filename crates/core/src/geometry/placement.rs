//! Symbolic placements and the anchor math that turns them into cells.

use serde::{Deserialize, Serialize};

use crate::error::Error;

use super::direction::Direction;
use super::location::{RoomLocation, RoomSize};

/// One of the nine symbolic anchors on the grid, or a random placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Placement {
    West,
    NorthWest,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    Center,
    Random,
}

impl Placement {
    /// Parse a placement name or its compass alias.
    pub fn parse(text: &str) -> Result<Self, Error> {
        match text.trim().to_ascii_lowercase().as_str() {
            "w" | "left" => Ok(Placement::West),
            "nw" | "top_left" => Ok(Placement::NorthWest),
            "n" | "top" => Ok(Placement::North),
            "ne" | "top_right" => Ok(Placement::NorthEast),
            "e" | "right" => Ok(Placement::East),
            "se" | "bottom_right" => Ok(Placement::SouthEast),
            "s" | "bottom" => Ok(Placement::South),
            "sw" | "bottom_left" => Ok(Placement::SouthWest),
            "c" | "center" => Ok(Placement::Center),
            "r" | "random" => Ok(Placement::Random),
            _ => Err(Error::BadPlacement(text.to_string())),
        }
    }

    /// Outward-pointing normals, used to derive the inward diagonal offset.
    pub fn direction_normals(self) -> (i32, i32) {
        match self {
            Placement::West => (-1, 0),
            Placement::NorthWest => (-1, -1),
            Placement::North => (0, -1),
            Placement::NorthEast => (1, -1),
            Placement::East => (1, 0),
            Placement::SouthEast => (1, 1),
            Placement::South => (0, 1),
            Placement::SouthWest => (-1, 1),
            Placement::Center | Placement::Random => (0, 0),
        }
    }

    /// Application order within a modifier phase: center placements first,
    /// corners next, edges after that, and random placements last so they can
    /// dodge the explicitly placed areas.
    pub fn order_class(self) -> u8 {
        match self {
            Placement::Center => 0,
            Placement::NorthWest
            | Placement::NorthEast
            | Placement::SouthEast
            | Placement::SouthWest => 1,
            Placement::West | Placement::North | Placement::East | Placement::South => 2,
            Placement::Random => 3,
        }
    }

    pub fn is_random(self) -> bool {
        self == Placement::Random
    }

    /// The anchor cell of this placement on a grid of the given size.
    /// Corners are literal, edges are edge midpoints, center is the floored
    /// grid center. Random has no anchor.
    pub fn anchor_cell(self, grid: RoomSize) -> RoomLocation {
        let max_x = grid.width as i32 - 1;
        let max_y = grid.height as i32 - 1;
        let mid_x = max_x / 2;
        let mid_y = max_y / 2;
        match self {
            Placement::West => RoomLocation::new(0, mid_y),
            Placement::NorthWest => RoomLocation::new(0, 0),
            Placement::North => RoomLocation::new(mid_x, 0),
            Placement::NorthEast => RoomLocation::new(max_x, 0),
            Placement::East => RoomLocation::new(max_x, mid_y),
            Placement::SouthEast => RoomLocation::new(max_x, max_y),
            Placement::South => RoomLocation::new(mid_x, max_y),
            Placement::SouthWest => RoomLocation::new(0, max_y),
            Placement::Center => RoomLocation::new(mid_x, mid_y),
            Placement::Random => RoomLocation::new(0, 0),
        }
    }

    /// The top left cell of a rectangle of `size` aligned to this placement:
    /// the anchor-adjacent corner of the rectangle sits at the anchor cell,
    /// and centered alignments round toward the north west on ties.
    pub fn aligned_top_left(self, grid: RoomSize, size: RoomSize) -> RoomLocation {
        let anchor = self.anchor_cell(grid);
        let full_x = size.width as i32 - 1;
        let full_y = size.height as i32 - 1;
        let east_x = grid.width as i32 - size.width as i32;
        let south_y = grid.height as i32 - size.height as i32;
        match self {
            Placement::West => RoomLocation::new(0, anchor.y - full_y / 2),
            Placement::NorthWest => RoomLocation::new(0, 0),
            Placement::North => RoomLocation::new(anchor.x - full_x / 2, 0),
            Placement::NorthEast => RoomLocation::new(east_x, 0),
            Placement::East => RoomLocation::new(east_x, anchor.y - full_y / 2),
            Placement::SouthEast => RoomLocation::new(east_x, south_y),
            Placement::South => RoomLocation::new(anchor.x - full_x / 2, south_y),
            Placement::SouthWest => RoomLocation::new(0, south_y),
            Placement::Center => {
                RoomLocation::new(anchor.x - full_x / 2, anchor.y - full_y / 2)
            }
            Placement::Random => RoomLocation::new(0, 0),
        }
    }

    /// The exterior side an endpoint at this placement opens through, when
    /// the placement itself determines one. Corner placements open through
    /// their north or south side.
    pub fn opening_direction(self) -> Option<Direction> {
        match self {
            Placement::West => Some(Direction::West),
            Placement::East => Some(Direction::East),
            Placement::North | Placement::NorthWest | Placement::NorthEast => {
                Some(Direction::North)
            }
            Placement::South | Placement::SouthWest | Placement::SouthEast => {
                Some(Direction::South)
            }
            Placement::Center | Placement::Random => None,
        }
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Placement::West => "left",
            Placement::NorthWest => "top_left",
            Placement::North => "top",
            Placement::NorthEast => "top_right",
            Placement::East => "right",
            Placement::SouthEast => "bottom_right",
            Placement::South => "bottom",
            Placement::SouthWest => "bottom_left",
            Placement::Center => "center",
            Placement::Random => "random",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_aliases_and_full_names() {
        assert_eq!(Placement::parse("w").unwrap(), Placement::West);
        assert_eq!(Placement::parse("top_left").unwrap(), Placement::NorthWest);
        assert_eq!(Placement::parse(" C ").unwrap(), Placement::Center);
        assert_eq!(Placement::parse("random").unwrap(), Placement::Random);
        assert!(Placement::parse("middle").is_err());
    }

    #[test]
    fn anchors_sit_on_corners_edges_and_center() {
        let grid = RoomSize::new(9, 9);
        assert_eq!(Placement::NorthWest.anchor_cell(grid), RoomLocation::new(0, 0));
        assert_eq!(Placement::SouthEast.anchor_cell(grid), RoomLocation::new(8, 8));
        assert_eq!(Placement::West.anchor_cell(grid), RoomLocation::new(0, 4));
        assert_eq!(Placement::Center.anchor_cell(grid), RoomLocation::new(4, 4));
    }

    #[test]
    fn center_alignment_rounds_north_west_on_ties() {
        let grid = RoomSize::new(9, 9);
        assert_eq!(
            Placement::Center.aligned_top_left(grid, RoomSize::new(3, 3)),
            RoomLocation::new(3, 3)
        );
        assert_eq!(
            Placement::Center.aligned_top_left(grid, RoomSize::new(4, 4)),
            RoomLocation::new(3, 3)
        );
    }

    #[test]
    fn edge_alignment_keeps_the_rectangle_on_the_edge() {
        let grid = RoomSize::new(9, 7);
        assert_eq!(
            Placement::East.aligned_top_left(grid, RoomSize::new(2, 3)),
            RoomLocation::new(7, 2)
        );
        assert_eq!(
            Placement::South.aligned_top_left(grid, RoomSize::new(3, 2)),
            RoomLocation::new(3, 5)
        );
    }
}
