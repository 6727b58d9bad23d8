//! The room grid: every cell belongs to exactly one room, and all wall state
//! is owned by the grid so both sides of a shared wall always agree.

use slotmap::SlotMap;

use crate::error::{Error, Result};
use crate::geometry::{CellRect, Direction, RoomLocation, RoomSize};

mod room;
mod wall;

pub use room::{Room, RoomId, RoomKind};
pub use wall::{WallGrid, WallRef, WallState};

pub struct RoomGrid {
    size: RoomSize,
    /// Maps every cell to its owning room.
    cells: Vec<RoomId>,
    rooms: SlotMap<RoomId, Room>,
    walls: WallGrid,
}

impl RoomGrid {
    /// Create a grid of single-cell normal rooms with open interior walls
    /// and a closed perimeter.
    pub fn new(size: RoomSize) -> Self {
        let cell_count = size.cell_count();
        let mut rooms = SlotMap::with_key();
        let mut cells = Vec::with_capacity(cell_count);
        for y in 0..size.height as i32 {
            for x in 0..size.width as i32 {
                cells.push(rooms.insert(Room::single_cell(RoomLocation::new(x, y))));
            }
        }
        Self { size, cells, rooms, walls: WallGrid::new(size) }
    }

    pub fn size(&self) -> RoomSize {
        self.size
    }

    /// The rectangle covering the whole grid.
    pub fn bounds(&self) -> CellRect {
        CellRect::new(RoomLocation::new(0, 0), self.size)
    }

    pub fn contains(&self, location: RoomLocation) -> bool {
        self.bounds().contains(location)
    }

    fn cell_index(&self, location: RoomLocation) -> usize {
        debug_assert!(self.contains(location));
        location.y as usize * self.size.width as usize + location.x as usize
    }

    pub fn room_id_at(&self, location: RoomLocation) -> RoomId {
        self.cells[self.cell_index(location)]
    }

    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id]
    }

    pub fn room_mut(&mut self, id: RoomId) -> &mut Room {
        &mut self.rooms[id]
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// All room ids in scan order of their top left cell.
    pub fn room_ids(&self) -> Vec<RoomId> {
        let mut ids = Vec::with_capacity(self.rooms.len());
        for (location, &id) in self.bounds().cells().zip(&self.cells) {
            if self.rooms[id].location() == location {
                ids.push(id);
            }
        }
        ids
    }

    pub fn wall_state(&self, wall: WallRef) -> WallState {
        self.walls.state(wall)
    }

    /// Whether the wall sits on the outer border of the grid.
    pub fn is_perimeter_wall(&self, wall: WallRef) -> bool {
        !self.contains(wall.cell.advance(wall.side))
    }

    /// Permanently close a wall. Idempotent; closing an already carved wall
    /// is a programming error and only checked in debug builds.
    pub fn close_wall(&mut self, wall: WallRef) {
        debug_assert_ne!(self.walls.state(wall), WallState::Carved);
        self.walls.set(wall, WallState::Closed);
    }

    /// Turn an open wall into a carved passage.
    pub fn carve_wall(&mut self, wall: WallRef) {
        debug_assert_eq!(self.walls.state(wall), WallState::Open);
        self.walls.set(wall, WallState::Carved);
    }

    /// Open a perimeter wall for a path endpoint. This is the only place a
    /// closed wall may change state, and it happens before path generation.
    pub fn open_perimeter(&mut self, wall: WallRef) {
        debug_assert!(self.is_perimeter_wall(wall));
        self.walls.set(wall, WallState::Carved);
    }

    /// Cells of the room along one of its sides, in ascending order.
    fn boundary_cells(rect: CellRect, side: Direction) -> Vec<RoomLocation> {
        match side {
            Direction::North => (rect.location.x..=rect.right())
                .map(|x| RoomLocation::new(x, rect.location.y))
                .collect(),
            Direction::South => (rect.location.x..=rect.right())
                .map(|x| RoomLocation::new(x, rect.bottom()))
                .collect(),
            Direction::West => (rect.location.y..=rect.bottom())
                .map(|y| RoomLocation::new(rect.location.x, y))
                .collect(),
            Direction::East => (rect.location.y..=rect.bottom())
                .map(|y| RoomLocation::new(rect.right(), y))
                .collect(),
        }
    }

    /// All walls of a room toward the outside of the room, including the ones
    /// on the grid perimeter. Side order is N, E, S, W with ascending cells.
    pub fn room_walls(&self, id: RoomId) -> Vec<WallRef> {
        let rect = self.rooms[id].rect;
        let mut result = Vec::new();
        for side in Direction::ALL {
            for cell in Self::boundary_cells(rect, side) {
                result.push(WallRef::new(cell, side));
            }
        }
        result
    }

    /// Distinct neighbor rooms reachable from this room through a wall in the
    /// given state, paired with the first such wall in N, E, S, W order.
    /// Blank rooms never appear as neighbors.
    fn neighbors_through(&self, id: RoomId, state: WallState) -> Vec<(RoomId, WallRef)> {
        let rect = self.rooms[id].rect;
        let mut result: Vec<(RoomId, WallRef)> = Vec::new();
        for side in Direction::ALL {
            for cell in Self::boundary_cells(rect, side) {
                let wall = WallRef::new(cell, side);
                let target = cell.advance(side);
                if !self.contains(target) || self.walls.state(wall) != state {
                    continue;
                }
                let neighbor = self.cells[self.cell_index(target)];
                if self.rooms[neighbor].kind == RoomKind::Blank {
                    continue;
                }
                if result.iter().any(|(existing, _)| *existing == neighbor) {
                    continue;
                }
                result.push((neighbor, wall));
            }
        }
        result
    }

    /// Neighbor rooms that can still be carved into.
    pub fn open_neighbors(&self, id: RoomId) -> Vec<(RoomId, WallRef)> {
        self.neighbors_through(id, WallState::Open)
    }

    /// Neighbor rooms already connected through a carved passage.
    pub fn carved_neighbors(&self, id: RoomId) -> Vec<RoomId> {
        self.neighbors_through(id, WallState::Carved)
            .into_iter()
            .map(|(neighbor, _)| neighbor)
            .collect()
    }

    /// Replace the single-cell rooms in `rect` with one merged room. The
    /// interior walls cease to exist; the exterior wall segments keep their
    /// per-cell state, so a closed segment stays closed on the merged room.
    pub fn merge(&mut self, rect: CellRect) -> Result<RoomId> {
        if rect.size.cell_count() < 2 {
            return Err(Error::InvalidMerge(format!(
                "the merge area {} spans less than two cells",
                rect.size
            )));
        }
        debug_assert!(self.bounds().contains_rect(rect));
        let mut any_normal = false;
        for cell in rect.cells() {
            let room = &self.rooms[self.room_id_at(cell)];
            if !room.size().is_single() {
                return Err(Error::InvalidMerge(
                    "the merge area overlaps an already merged room".to_string(),
                ));
            }
            match room.kind {
                RoomKind::Normal => any_normal = true,
                RoomKind::EndpointAnchor => {
                    return Err(Error::InvalidMerge(
                        "the merge area covers a path endpoint".to_string(),
                    ));
                }
                RoomKind::Blank => {}
            }
        }
        if !any_normal {
            return Err(Error::InvalidMerge(
                "the merge area covers only blank rooms".to_string(),
            ));
        }

        let target = self.room_id_at(rect.location);
        for cell in rect.cells() {
            let index = self.cell_index(cell);
            let old = self.cells[index];
            if old != target {
                self.rooms.remove(old);
                self.cells[index] = target;
            }
        }
        let room = &mut self.rooms[target];
        room.rect = rect;
        room.kind = RoomKind::Normal;
        for cell in rect.cells() {
            if cell.x < rect.right() {
                self.walls.set(WallRef::new(cell, Direction::East), WallState::Carved);
            }
            if cell.y < rect.bottom() {
                self.walls.set(WallRef::new(cell, Direction::South), WallState::Carved);
            }
        }
        Ok(target)
    }

    /// Snapshot of all wall states, taken once the layout is final.
    pub fn snapshot_walls(&self) -> WallGrid {
        self.walls.clone()
    }

    /// Reset transient room state and restore walls for another attempt.
    pub fn reset_for_attempt(&mut self, pristine: &WallGrid) {
        for room in self.rooms.values_mut() {
            room.reset_transient();
        }
        self.walls = pristine.clone();
    }

    pub fn walls(&self) -> &WallGrid {
        &self.walls
    }
}
