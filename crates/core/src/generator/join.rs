//! Unites the separately carved path components into as few components as
//! the closed walls allow, and checks that all joinable endpoints end up in
//! one of them together.

use std::collections::BTreeMap;

use crate::endpoint::PathEndpoint;
use crate::error::{Error, Result};
use crate::geometry::{Direction, RoomLocation};
use crate::grid::{RoomGrid, RoomId, WallRef, WallState};
use crate::status::{StatusEvent, StatusSink};

/// Union-find over path ids, sized for a handful of components.
struct PathGroups {
    parent: BTreeMap<u32, u32>,
}

impl PathGroups {
    fn new() -> Self {
        Self { parent: BTreeMap::new() }
    }

    fn find(&mut self, path_id: u32) -> u32 {
        let parent = *self.parent.entry(path_id).or_insert(path_id);
        if parent == path_id {
            return path_id;
        }
        let root = self.find(parent);
        self.parent.insert(path_id, root);
        root
    }

    fn union(&mut self, a: u32, b: u32) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a != root_b {
            self.parent.insert(root_a, root_b);
        }
    }

    fn are_connected(&mut self, a: u32, b: u32) -> bool {
        self.find(a) == self.find(b)
    }
}

fn rooms_across(
    grid: &RoomGrid,
    wall: WallRef,
    state: WallState,
) -> Option<(RoomId, RoomId)> {
    let neighbor_cell = wall.cell.advance(wall.side);
    if !grid.contains(neighbor_cell) || grid.wall_state(wall) != state {
        return None;
    }
    let room_a = grid.room_id_at(wall.cell);
    let room_b = grid.room_id_at(neighbor_cell);
    if room_a == room_b {
        return None;
    }
    Some((room_a, room_b))
}

fn walls_in_scan_order(grid: &RoomGrid) -> Vec<WallRef> {
    let size = grid.size();
    let mut walls = Vec::new();
    for x in 0..size.width as i32 {
        for y in 0..size.height as i32 {
            let cell = RoomLocation::new(x, y);
            for side in [Direction::East, Direction::South] {
                walls.push(WallRef::new(cell, side));
            }
        }
    }
    walls
}

/// Carve one joining wall per pair of separated components, scanning the
/// candidate walls in (x, y, side) order so a fixed seed reproduces the same
/// joins. Components already connected through carved passages (for example
/// a dead-end stub that met the main paths) are never joined twice, which
/// keeps the carved structure free of cycles. Fails when joinable endpoints
/// remain in separate components.
pub(super) fn join_components(
    grid: &mut RoomGrid,
    endpoints: &[PathEndpoint],
    sink: &mut dyn StatusSink,
) -> Result<()> {
    let mut groups = PathGroups::new();

    // Components that already touch through a carved wall count as one.
    for wall in walls_in_scan_order(grid) {
        if let Some((room_a, room_b)) = rooms_across(grid, wall, WallState::Carved) {
            let path_a = grid.room(room_a).path_id;
            let path_b = grid.room(room_b).path_id;
            if path_a != 0 && path_b != 0 {
                groups.union(path_a, path_b);
            }
        }
    }

    for wall in walls_in_scan_order(grid) {
        let Some((room_a, room_b)) = rooms_across(grid, wall, WallState::Open) else {
            continue;
        };
        let path_a = grid.room(room_a).path_id;
        let path_b = grid.room(room_b).path_id;
        if path_a == 0 || path_b == 0 || groups.are_connected(path_a, path_b) {
            continue;
        }
        grid.carve_wall(wall);
        groups.union(path_a, path_b);
        sink.event(&StatusEvent::Joined(path_a, path_b));
    }

    let targets: Vec<u32> = endpoints
        .iter()
        .filter(|endpoint| !endpoint.dead_end)
        .map(|endpoint| grid.room(endpoint.room).path_id)
        .collect();
    if let Some((&first, rest)) = targets.split_first() {
        let disconnected: Vec<u32> =
            rest.iter().copied().filter(|&target| !groups.are_connected(first, target)).collect();
        if !disconnected.is_empty() {
            return Err(Error::CannotJoin(format!(
                "paths {disconnected:?} stay separated from path {first}"
            )));
        }
    }
    Ok(())
}
