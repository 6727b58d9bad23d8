//! Compass directions and corners on the room grid.

/// One of the four sides of a cell or room. The grid origin is the top left
/// corner, so north decreases y and west decreases x.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions in the fixed enumeration order used for carving.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Stable index used for lexicographic wall ordering.
    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }
}

/// A corner of a rectangular cell area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    /// The two sides of the corner cell that face out of the area.
    pub fn outward_sides(self) -> [Direction; 2] {
        match self {
            Corner::TopLeft => [Direction::North, Direction::West],
            Corner::TopRight => [Direction::North, Direction::East],
            Corner::BottomRight => [Direction::South, Direction::East],
            Corner::BottomLeft => [Direction::South, Direction::West],
        }
    }
}
