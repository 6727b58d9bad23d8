//! Rectangular cell areas used by modifiers and room extents.

use super::direction::{Corner, Direction};
use super::location::{RoomInsets, RoomLocation, RoomSize};

/// A rectangle of cells, defined by its top left cell and size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellRect {
    pub location: RoomLocation,
    pub size: RoomSize,
}

impl CellRect {
    pub fn new(location: RoomLocation, size: RoomSize) -> Self {
        Self { location, size }
    }

    pub fn right(self) -> i32 {
        self.location.x + self.size.width as i32 - 1
    }

    pub fn bottom(self) -> i32 {
        self.location.y + self.size.height as i32 - 1
    }

    pub fn corner(self, corner: Corner) -> RoomLocation {
        match corner {
            Corner::TopLeft => self.location,
            Corner::TopRight => RoomLocation::new(self.right(), self.location.y),
            Corner::BottomRight => RoomLocation::new(self.right(), self.bottom()),
            Corner::BottomLeft => RoomLocation::new(self.location.x, self.bottom()),
        }
    }

    /// The midpoint cell of one side, rounding toward the north west.
    pub fn middle(self, direction: Direction) -> RoomLocation {
        let mid_x = self.location.x + (self.size.width as i32 - 1) / 2;
        let mid_y = self.location.y + (self.size.height as i32 - 1) / 2;
        match direction {
            Direction::North => RoomLocation::new(mid_x, self.location.y),
            Direction::East => RoomLocation::new(self.right(), mid_y),
            Direction::South => RoomLocation::new(mid_x, self.bottom()),
            Direction::West => RoomLocation::new(self.location.x, mid_y),
        }
    }

    pub fn contains(self, location: RoomLocation) -> bool {
        location.x >= self.location.x
            && location.x <= self.right()
            && location.y >= self.location.y
            && location.y <= self.bottom()
    }

    pub fn contains_rect(self, other: CellRect) -> bool {
        self.contains(other.location) && self.contains(other.corner(Corner::BottomRight))
    }

    /// All cells in row-major order.
    pub fn cells(self) -> impl Iterator<Item = RoomLocation> {
        let rect = self;
        (rect.location.y..=rect.bottom()).flat_map(move |y| {
            (rect.location.x..=rect.right()).map(move |x| RoomLocation::new(x, y))
        })
    }

    /// Whether the cell sits on the outermost ring of this rectangle.
    pub fn is_on_boundary(self, location: RoomLocation) -> bool {
        self.contains(location)
            && (location.x == self.location.x
                || location.x == self.right()
                || location.y == self.location.y
                || location.y == self.bottom())
    }

    /// The sides of a boundary cell that face out of this rectangle.
    pub fn outward_sides(self, location: RoomLocation) -> Vec<Direction> {
        debug_assert!(self.contains(location));
        let mut sides = Vec::new();
        if location.y == self.location.y {
            sides.push(Direction::North);
        }
        if location.x == self.right() {
            sides.push(Direction::East);
        }
        if location.y == self.bottom() {
            sides.push(Direction::South);
        }
        if location.x == self.location.x {
            sides.push(Direction::West);
        }
        sides
    }

    /// Whether a cell lies inside the frame described by the insets, measured
    /// from this rectangle's border inward.
    pub fn is_in_frame(self, location: RoomLocation, insets: RoomInsets) -> bool {
        if !self.contains(location) {
            return false;
        }
        let local_x = location.x - self.location.x;
        let local_y = location.y - self.location.y;
        local_y < insets.top as i32
            || local_x >= self.size.width as i32 - insets.right as i32
            || local_y >= self.size.height as i32 - insets.bottom as i32
            || local_x < insets.left as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_and_middles_of_an_odd_rect() {
        let rect = CellRect::new(RoomLocation::new(2, 3), RoomSize::new(5, 3));
        assert_eq!(rect.corner(Corner::BottomRight), RoomLocation::new(6, 5));
        assert_eq!(rect.middle(Direction::North), RoomLocation::new(4, 3));
        assert_eq!(rect.middle(Direction::East), RoomLocation::new(6, 4));
        assert_eq!(rect.middle(Direction::West), RoomLocation::new(2, 4));
    }

    #[test]
    fn cells_iterate_row_major() {
        let rect = CellRect::new(RoomLocation::new(1, 1), RoomSize::new(2, 2));
        let cells: Vec<_> = rect.cells().collect();
        assert_eq!(
            cells,
            vec![
                RoomLocation::new(1, 1),
                RoomLocation::new(2, 1),
                RoomLocation::new(1, 2),
                RoomLocation::new(2, 2),
            ]
        );
    }

    #[test]
    fn outward_sides_match_position_on_the_boundary() {
        let rect = CellRect::new(RoomLocation::new(0, 0), RoomSize::new(3, 3));
        assert_eq!(
            rect.outward_sides(RoomLocation::new(0, 0)),
            vec![Direction::North, Direction::West]
        );
        assert_eq!(rect.outward_sides(RoomLocation::new(1, 0)), vec![Direction::North]);
        assert!(rect.outward_sides(RoomLocation::new(1, 1)).is_empty());
    }

    #[test]
    fn frame_membership_follows_insets() {
        let rect = CellRect::new(RoomLocation::new(0, 0), RoomSize::new(5, 5));
        let insets = RoomInsets { top: 1, right: 2, bottom: 1, left: 1 };
        assert!(rect.is_in_frame(RoomLocation::new(2, 0), insets));
        assert!(rect.is_in_frame(RoomLocation::new(3, 2), insets));
        assert!(!rect.is_in_frame(RoomLocation::new(2, 2), insets));
        assert!(rect.is_in_frame(RoomLocation::new(0, 3), insets));
    }
}
