//! Room locations, sizes, offsets, and insets with their parsing grammars.

use serde::{Deserialize, Serialize};

use crate::error::Error;

use super::direction::Direction;

/// An integer cell position on the grid. The origin is the top left cell,
/// x grows to the east and y to the south.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RoomLocation {
    pub x: i32,
    pub y: i32,
}

impl RoomLocation {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighboring location one step in the given direction.
    pub fn advance(self, direction: Direction) -> Self {
        match direction {
            Direction::North => Self { x: self.x, y: self.y - 1 },
            Direction::East => Self { x: self.x + 1, y: self.y },
            Direction::South => Self { x: self.x, y: self.y + 1 },
            Direction::West => Self { x: self.x - 1, y: self.y },
        }
    }

    pub fn translated(self, delta_x: i32, delta_y: i32) -> Self {
        Self { x: self.x + delta_x, y: self.y + delta_y }
    }

    pub fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// A room extent in whole cells. Always at least 1x1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomSize {
    pub width: u32,
    pub height: u32,
}

const MAX_ROOM_SPAN: u32 = 10_000;

impl RoomSize {
    pub fn new(width: u32, height: u32) -> Self {
        debug_assert!(width >= 1 && height >= 1);
        Self { width, height }
    }

    pub fn single() -> Self {
        Self { width: 1, height: 1 }
    }

    pub fn is_single(self) -> bool {
        self.width == 1 && self.height == 1
    }

    pub fn cell_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Parse `NAME | N | NxN`. Named sizes are single, small, medium, large.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let trimmed = text.trim().to_ascii_lowercase();
        match trimmed.as_str() {
            "single" => return Ok(Self::new(1, 1)),
            "small" => return Ok(Self::new(2, 2)),
            "medium" => return Ok(Self::new(3, 3)),
            "large" => return Ok(Self::new(4, 4)),
            _ => {}
        }
        let bad = || Error::BadSize(text.to_string());
        let parse_span = |part: &str| -> Result<u32, Error> {
            let value: u32 = part.trim().parse().map_err(|_| bad())?;
            if value < 1 || value >= MAX_ROOM_SPAN {
                return Err(bad());
            }
            Ok(value)
        };
        match trimmed.split_once('x') {
            None => {
                let value = parse_span(&trimmed)?;
                Ok(Self::new(value, value))
            }
            Some((width, height)) => Ok(Self::new(parse_span(width)?, parse_span(height)?)),
        }
    }
}

impl std::fmt::Display for RoomSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A placement offset. A diagonal offset carries a single magnitude and moves
/// toward the grid center; the direction is inferred from the placement. An
/// explicit offset is applied verbatim in grid cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomOffset {
    pub x: i32,
    pub y: i32,
    pub diagonal: bool,
}

impl RoomOffset {
    pub fn explicit(x: i32, y: i32) -> Self {
        Self { x, y, diagonal: false }
    }

    pub fn diagonal(magnitude: i32) -> Self {
        Self { x: magnitude, y: 0, diagonal: true }
    }

    pub fn is_zero(self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Parse `N` (diagonal toward the center) or `N,N` (explicit x,y).
    pub fn parse(text: &str) -> Result<Self, Error> {
        let trimmed = text.trim();
        let bad = || Error::BadOffset(text.to_string());
        if trimmed.is_empty() {
            return Err(bad());
        }
        match trimmed.split_once(',') {
            None => {
                let magnitude: i32 = trimmed.parse().map_err(|_| bad())?;
                Ok(Self::diagonal(magnitude))
            }
            Some((x, y)) => {
                if y.contains(',') {
                    return Err(bad());
                }
                let x: i32 = x.trim().parse().map_err(|_| bad())?;
                let y: i32 = y.trim().parse().map_err(|_| bad())?;
                Ok(Self::explicit(x, y))
            }
        }
    }
}

impl std::fmt::Display for RoomOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.diagonal {
            write!(f, "{}", self.x)
        } else {
            write!(f, "{},{}", self.x, self.y)
        }
    }
}

/// Frame insets, one value per side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomInsets {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl RoomInsets {
    pub fn uniform(value: u32) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }

    /// Parse one to four comma separated non-negative integers, expanded by
    /// the CSS shorthand rules: one value for all sides, two for
    /// vertical/horizontal, three for top/horizontal/bottom, four for
    /// top/right/bottom/left.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let bad = || Error::BadInsets(text.to_string());
        let values: Vec<u32> = text
            .split(',')
            .map(|part| part.trim().parse::<u32>().map_err(|_| bad()))
            .collect::<Result<_, _>>()?;
        match values.as_slice() {
            [all] => Ok(Self::uniform(*all)),
            [vertical, horizontal] => Ok(Self {
                top: *vertical,
                right: *horizontal,
                bottom: *vertical,
                left: *horizontal,
            }),
            [top, horizontal, bottom] => Ok(Self {
                top: *top,
                right: *horizontal,
                bottom: *bottom,
                left: *horizontal,
            }),
            [top, right, bottom, left] => {
                Ok(Self { top: *top, right: *right, bottom: *bottom, left: *left })
            }
            _ => Err(bad()),
        }
    }
}

impl std::fmt::Display for RoomInsets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{},{}", self.top, self.right, self.bottom, self.left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_accepts_names_numbers_and_pairs() {
        assert_eq!(RoomSize::parse("single").unwrap(), RoomSize::new(1, 1));
        assert_eq!(RoomSize::parse("large").unwrap(), RoomSize::new(4, 4));
        assert_eq!(RoomSize::parse("7").unwrap(), RoomSize::new(7, 7));
        assert_eq!(RoomSize::parse("5x15").unwrap(), RoomSize::new(5, 15));
        assert_eq!(RoomSize::parse(" 2X3 ").unwrap(), RoomSize::new(2, 3));
    }

    #[test]
    fn size_rejects_zero_unknown_names_and_garbage() {
        assert!(RoomSize::parse("0").is_err());
        assert!(RoomSize::parse("huge").is_err());
        assert!(RoomSize::parse("3x").is_err());
        assert!(RoomSize::parse("3x0").is_err());
        assert!(RoomSize::parse("").is_err());
    }

    #[test]
    fn offset_distinguishes_diagonal_and_explicit_forms() {
        assert_eq!(RoomOffset::parse("3").unwrap(), RoomOffset::diagonal(3));
        assert_eq!(RoomOffset::parse("-2").unwrap(), RoomOffset::diagonal(-2));
        assert_eq!(RoomOffset::parse("-4,3").unwrap(), RoomOffset::explicit(-4, 3));
        assert!(RoomOffset::parse("1,2,3").is_err());
        assert!(RoomOffset::parse("a").is_err());
    }

    #[test]
    fn insets_expand_by_shorthand_rules() {
        assert_eq!(
            RoomInsets::parse("2").unwrap(),
            RoomInsets { top: 2, right: 2, bottom: 2, left: 2 }
        );
        assert_eq!(
            RoomInsets::parse("1,2").unwrap(),
            RoomInsets { top: 1, right: 2, bottom: 1, left: 2 }
        );
        assert_eq!(
            RoomInsets::parse("1,2,3").unwrap(),
            RoomInsets { top: 1, right: 2, bottom: 3, left: 2 }
        );
        assert_eq!(
            RoomInsets::parse("1,2,3,4").unwrap(),
            RoomInsets { top: 1, right: 2, bottom: 3, left: 4 }
        );
        assert!(RoomInsets::parse("1,2,3,4,5").is_err());
        assert!(RoomInsets::parse("-1").is_err());
    }
}
