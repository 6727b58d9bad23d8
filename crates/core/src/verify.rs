//! Invariant checks run after every generation attempt.

use std::collections::HashSet;

use crate::endpoint::PathEndpoint;
use crate::grid::{RoomGrid, RoomId, RoomKind, WallGrid, WallState};

/// Verify the carved maze. Returns a human-readable reason on failure; the
/// generator reports it and retries.
pub(crate) fn verify(
    grid: &RoomGrid,
    endpoints: &[PathEndpoint],
    pristine: &WallGrid,
) -> Result<(), String> {
    if !grid.walls().preserves_closed_walls(pristine) {
        return Err("a permanently closed wall was carved open".to_string());
    }

    for id in grid.room_ids() {
        let room = grid.room(id);
        match room.kind {
            RoomKind::Blank => {
                for wall in grid.room_walls(id) {
                    if grid.wall_state(wall) == WallState::Carved {
                        let location = room.location();
                        return Err(format!(
                            "blank room at {},{} has a carved wall",
                            location.x, location.y
                        ));
                    }
                }
            }
            RoomKind::Normal if !room.visited => {
                let location = room.location();
                return Err(format!(
                    "room at {},{} was never reached by any path",
                    location.x, location.y
                ));
            }
            _ => {}
        }
    }

    let joinable: Vec<RoomId> = endpoints
        .iter()
        .filter(|endpoint| !endpoint.dead_end)
        .map(|endpoint| endpoint.room)
        .collect();
    if joinable.len() > 1 && !all_connected(grid, &joinable) {
        return Err("not all joinable endpoints share one component".to_string());
    }
    Ok(())
}

/// Breadth-first walk over carved passages from the first room, checking
/// that every other room of interest is reachable.
fn all_connected(grid: &RoomGrid, rooms: &[RoomId]) -> bool {
    let mut reached: HashSet<RoomId> = HashSet::new();
    let mut frontier = vec![rooms[0]];
    reached.insert(rooms[0]);
    while let Some(current) = frontier.pop() {
        for neighbor in grid.carved_neighbors(current) {
            if reached.insert(neighbor) {
                frontier.push(neighbor);
            }
        }
    }
    rooms.iter().all(|room| reached.contains(room))
}
