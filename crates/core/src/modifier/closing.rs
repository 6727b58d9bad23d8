//! Closing specifications: which walls inside a cell area get permanently
//! closed.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{CellRect, Corner, Direction};
use crate::grid::WallRef;

/// Selects a family of walls relative to a cell area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClosingType {
    /// The outward walls of all four corner cells.
    CornerPaths,
    CornerTopLeft,
    CornerTopRight,
    CornerBottomRight,
    CornerBottomLeft,
    /// Every west-side wall of every cell in the area, and so on.
    DirectionWest,
    DirectionNorth,
    DirectionEast,
    DirectionSouth,
    /// Walls between horizontally adjacent cells inside the area.
    DirectionHorizontal,
    /// Walls between vertically adjacent cells inside the area.
    DirectionVertical,
    /// The outward wall at the midpoint cell of each of the four sides.
    MiddlePaths,
    MiddleWest,
    MiddleNorth,
    MiddleEast,
    MiddleSouth,
}

impl ClosingType {
    pub fn parse(text: &str) -> Result<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "c" | "corner_paths" => Ok(ClosingType::CornerPaths),
            "cnw" | "corner_top_left" => Ok(ClosingType::CornerTopLeft),
            "cne" | "corner_top_right" => Ok(ClosingType::CornerTopRight),
            "cse" | "corner_bottom_right" => Ok(ClosingType::CornerBottomRight),
            "csw" | "corner_bottom_left" => Ok(ClosingType::CornerBottomLeft),
            "dw" | "direction_west" => Ok(ClosingType::DirectionWest),
            "dn" | "direction_north" => Ok(ClosingType::DirectionNorth),
            "de" | "direction_east" => Ok(ClosingType::DirectionEast),
            "ds" | "direction_south" => Ok(ClosingType::DirectionSouth),
            "dh" | "direction_horizontal" => Ok(ClosingType::DirectionHorizontal),
            "dv" | "direction_vertical" => Ok(ClosingType::DirectionVertical),
            "m" | "middle_paths" => Ok(ClosingType::MiddlePaths),
            "mw" | "middle_west" => Ok(ClosingType::MiddleWest),
            "mn" | "middle_north" => Ok(ClosingType::MiddleNorth),
            "me" | "middle_east" => Ok(ClosingType::MiddleEast),
            "ms" | "middle_south" => Ok(ClosingType::MiddleSouth),
            _ => Err(Error::BadClosing(text.to_string())),
        }
    }
}

/// A closing type together with the inversion flag. An inverted closing
/// selects the complement of the candidates within the area's boundary walls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Closing {
    pub closing_type: ClosingType,
    pub inverted: bool,
}

impl Closing {
    pub fn new(closing_type: ClosingType, inverted: bool) -> Self {
        Self { closing_type, inverted }
    }

    /// Parse a closing name with an optional `^` inversion prefix.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        match trimmed.strip_prefix('^') {
            Some(rest) => Ok(Self::new(ClosingType::parse(rest)?, true)),
            None => Ok(Self::new(ClosingType::parse(trimmed)?, false)),
        }
    }

    /// The walls this closing selects within the given area.
    pub(crate) fn selected_walls(self, rect: CellRect) -> Vec<WallRef> {
        let candidates = candidate_walls(self.closing_type, rect);
        if !self.inverted {
            return candidates;
        }
        boundary_walls(rect)
            .into_iter()
            .filter(|wall| !candidates.contains(wall))
            .collect()
    }
}

fn push_unique(walls: &mut Vec<WallRef>, wall: WallRef) {
    if !walls.contains(&wall) {
        walls.push(wall);
    }
}

/// All walls of boundary cells that face out of the area.
fn boundary_walls(rect: CellRect) -> Vec<WallRef> {
    let mut walls = Vec::new();
    for cell in rect.cells() {
        for side in rect.outward_sides(cell) {
            push_unique(&mut walls, WallRef::new(cell, side));
        }
    }
    walls
}

fn candidate_walls(closing_type: ClosingType, rect: CellRect) -> Vec<WallRef> {
    let mut walls = Vec::new();
    match closing_type {
        ClosingType::CornerPaths => {
            for corner in Corner::ALL {
                let cell = rect.corner(corner);
                for side in corner.outward_sides() {
                    push_unique(&mut walls, WallRef::new(cell, side));
                }
            }
        }
        ClosingType::CornerTopLeft => corner_walls(&mut walls, rect, Corner::TopLeft),
        ClosingType::CornerTopRight => corner_walls(&mut walls, rect, Corner::TopRight),
        ClosingType::CornerBottomRight => corner_walls(&mut walls, rect, Corner::BottomRight),
        ClosingType::CornerBottomLeft => corner_walls(&mut walls, rect, Corner::BottomLeft),
        ClosingType::DirectionWest => direction_walls(&mut walls, rect, Direction::West),
        ClosingType::DirectionNorth => direction_walls(&mut walls, rect, Direction::North),
        ClosingType::DirectionEast => direction_walls(&mut walls, rect, Direction::East),
        ClosingType::DirectionSouth => direction_walls(&mut walls, rect, Direction::South),
        ClosingType::DirectionHorizontal => {
            for cell in rect.cells() {
                if cell.x < rect.right() {
                    walls.push(WallRef::new(cell, Direction::East));
                }
            }
        }
        ClosingType::DirectionVertical => {
            for cell in rect.cells() {
                if cell.y < rect.bottom() {
                    walls.push(WallRef::new(cell, Direction::South));
                }
            }
        }
        ClosingType::MiddlePaths => {
            for side in Direction::ALL {
                push_unique(&mut walls, WallRef::new(rect.middle(side), side));
            }
        }
        ClosingType::MiddleWest => walls.push(WallRef::new(rect.middle(Direction::West), Direction::West)),
        ClosingType::MiddleNorth => walls.push(WallRef::new(rect.middle(Direction::North), Direction::North)),
        ClosingType::MiddleEast => walls.push(WallRef::new(rect.middle(Direction::East), Direction::East)),
        ClosingType::MiddleSouth => walls.push(WallRef::new(rect.middle(Direction::South), Direction::South)),
    }
    walls
}

fn corner_walls(walls: &mut Vec<WallRef>, rect: CellRect, corner: Corner) {
    let cell = rect.corner(corner);
    for side in corner.outward_sides() {
        push_unique(walls, WallRef::new(cell, side));
    }
}

fn direction_walls(walls: &mut Vec<WallRef>, rect: CellRect, side: Direction) {
    for cell in rect.cells() {
        walls.push(WallRef::new(cell, side));
    }
}
