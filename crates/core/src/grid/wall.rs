//! Wall state storage. Wall states live in two grid-owned arrays (one for
//! horizontal walls, one for vertical walls), so the wall between two cells
//! is a single entry and both sides always agree.

use crate::geometry::{Direction, RoomLocation, RoomSize};

/// The tri-state of a wall segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WallState {
    /// A wall that is present but may still be carved through.
    Open,
    /// A permanent barrier that the path generator never opens.
    Closed,
    /// A passage that is part of the maze graph.
    Carved,
}

/// A wall addressed by the cell it belongs to and the side it sits on.
/// The same physical wall can be addressed from both adjacent cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WallRef {
    pub cell: RoomLocation,
    pub side: Direction,
}

impl WallRef {
    pub fn new(cell: RoomLocation, side: Direction) -> Self {
        Self { cell, side }
    }

    /// The same wall, addressed from the cell on the other side.
    pub fn mirrored(self) -> Self {
        Self { cell: self.cell.advance(self.side), side: self.side.opposite() }
    }

    /// Lexicographic (x, y, side) key for reproducible wall ordering.
    pub fn sort_key(self) -> (i32, i32, usize) {
        (self.cell.x, self.cell.y, self.side.index())
    }
}

/// Dense storage for all wall states of an nx-by-ny grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WallGrid {
    nx: usize,
    ny: usize,
    /// Walls on the north/south cell boundaries: (ny + 1) rows of nx entries.
    horizontal: Vec<WallState>,
    /// Walls on the west/east cell boundaries: ny rows of (nx + 1) entries.
    vertical: Vec<WallState>,
}

impl WallGrid {
    /// A fresh wall grid: interior walls open, perimeter walls closed.
    pub fn new(size: RoomSize) -> Self {
        let nx = size.width as usize;
        let ny = size.height as usize;
        let mut horizontal = vec![WallState::Open; (ny + 1) * nx];
        let mut vertical = vec![WallState::Open; ny * (nx + 1)];
        for x in 0..nx {
            horizontal[x] = WallState::Closed;
            horizontal[ny * nx + x] = WallState::Closed;
        }
        for y in 0..ny {
            vertical[y * (nx + 1)] = WallState::Closed;
            vertical[y * (nx + 1) + nx] = WallState::Closed;
        }
        Self { nx, ny, horizontal, vertical }
    }

    fn slot(&self, wall: WallRef) -> (bool, usize) {
        let x = wall.cell.x as usize;
        let y = wall.cell.y as usize;
        debug_assert!(x < self.nx && y < self.ny, "wall cell outside the grid");
        match wall.side {
            Direction::North => (true, y * self.nx + x),
            Direction::South => (true, (y + 1) * self.nx + x),
            Direction::West => (false, y * (self.nx + 1) + x),
            Direction::East => (false, y * (self.nx + 1) + x + 1),
        }
    }

    pub fn state(&self, wall: WallRef) -> WallState {
        let (horizontal, index) = self.slot(wall);
        if horizontal {
            self.horizontal[index]
        } else {
            self.vertical[index]
        }
    }

    pub fn set(&mut self, wall: WallRef, state: WallState) {
        let (horizontal, index) = self.slot(wall);
        if horizontal {
            self.horizontal[index] = state;
        } else {
            self.vertical[index] = state;
        }
    }

    /// Whether every wall closed in `pristine` is still closed here.
    pub fn preserves_closed_walls(&self, pristine: &WallGrid) -> bool {
        let closed = |current: &[WallState], before: &[WallState]| {
            before
                .iter()
                .zip(current)
                .all(|(b, c)| *b != WallState::Closed || *c == WallState::Closed)
        };
        closed(&self.horizontal, &pristine.horizontal)
            && closed(&self.vertical, &pristine.vertical)
    }
}
