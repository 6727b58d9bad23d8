//! Randomized depth-first carving: primary paths, dead-end stubs, and
//! decorative island fill.

use rand_chacha::rand_core::RngCore;
use rand_chacha::ChaCha8Rng;

use crate::endpoint::PathEndpoint;
use crate::error::{Error, Result};
use crate::grid::{RoomGrid, RoomId, RoomKind};

/// Steps a dead-end stub may carve inward before it is left as a stub.
const DEAD_END_CARVE_BUDGET: usize = 64;

fn pick<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    slice[(rng.next_u64() as usize) % slice.len()]
}

fn visit(grid: &mut RoomGrid, id: RoomId, path_id: u32) {
    let room = grid.room_mut(id);
    room.visited = true;
    room.path_id = path_id;
}

/// Whether the room anchors a joinable endpoint. The carve root itself is
/// never tested, since visited rooms are not entered again.
fn reaches_foreign_endpoint(grid: &RoomGrid, endpoints: &[PathEndpoint], id: RoomId) -> bool {
    grid.room(id).endpoint.map_or(false, |index| !endpoints[index].dead_end)
}

/// Depth-first carve of a random tree rooted at `root`. Neighbor enumeration
/// is fixed to N, E, S, W order before the uniform random pick, so a fixed
/// seed reproduces the same tree. When `endpoints` is non-empty the carve
/// stops as soon as it reaches another joinable endpoint.
fn carve_tree(
    grid: &mut RoomGrid,
    root: RoomId,
    path_id: u32,
    rng: &mut ChaCha8Rng,
    endpoints: &[PathEndpoint],
) {
    visit(grid, root, path_id);
    let mut stack = vec![root];
    while let Some(&top) = stack.last() {
        let candidates: Vec<_> = grid
            .open_neighbors(top)
            .into_iter()
            .filter(|(neighbor, _)| !grid.room(*neighbor).visited)
            .collect();
        if candidates.is_empty() {
            stack.pop();
            continue;
        }
        let (next, wall) = pick(rng, &candidates);
        grid.carve_wall(wall);
        visit(grid, next, path_id);
        stack.push(next);
        if reaches_foreign_endpoint(grid, endpoints, next) {
            break;
        }
    }
}

/// Carve one path per joinable endpoint that is not already covered by an
/// earlier path. Returns the next free path id.
pub(super) fn carve_primary_paths(
    grid: &mut RoomGrid,
    endpoints: &[PathEndpoint],
    rng: &mut ChaCha8Rng,
) -> u32 {
    let mut next_path_id = 1;
    for endpoint in endpoints.iter().filter(|endpoint| !endpoint.dead_end) {
        if grid.room(endpoint.room).visited {
            // Reached by an earlier carve; the join phase unites the rest.
            continue;
        }
        let path_id = next_path_id;
        next_path_id += 1;
        carve_tree(grid, endpoint.room, path_id, rng, endpoints);
    }
    next_path_id
}

/// Carve a short path inward from every unvisited dead-end endpoint until it
/// meets an existing path, then open the meeting wall. A stub that exhausts
/// its budget stays a stub.
pub(super) fn carve_dead_end_stubs(
    grid: &mut RoomGrid,
    endpoints: &[PathEndpoint],
    rng: &mut ChaCha8Rng,
    next_path_id: &mut u32,
) {
    for endpoint in endpoints.iter().filter(|endpoint| endpoint.dead_end) {
        if grid.room(endpoint.room).visited {
            continue;
        }
        let path_id = *next_path_id;
        *next_path_id += 1;
        visit(grid, endpoint.room, path_id);
        let mut stack = vec![endpoint.room];
        let mut steps = 0usize;
        while let Some(&top) = stack.last() {
            let meeting = grid.open_neighbors(top).into_iter().find(|(neighbor, _)| {
                let room = grid.room(*neighbor);
                room.visited && room.path_id != path_id
            });
            if let Some((_, wall)) = meeting {
                grid.carve_wall(wall);
                break;
            }
            if steps >= DEAD_END_CARVE_BUDGET {
                break;
            }
            let candidates: Vec<_> = grid
                .open_neighbors(top)
                .into_iter()
                .filter(|(neighbor, _)| !grid.room(*neighbor).visited)
                .collect();
            if candidates.is_empty() {
                stack.pop();
                continue;
            }
            let (next, wall) = pick(rng, &candidates);
            grid.carve_wall(wall);
            visit(grid, next, path_id);
            stack.push(next);
            steps += 1;
        }
    }
}

/// Carve a decorative tree through every region the paths did not reach.
/// Returns the number of filled islands, or fails when islands are not
/// allowed and an unvisited room remains.
pub(super) fn fill_islands(
    grid: &mut RoomGrid,
    allow_islands: bool,
    rng: &mut ChaCha8Rng,
    next_path_id: &mut u32,
) -> Result<usize> {
    let unvisited: Vec<RoomId> = grid
        .room_ids()
        .into_iter()
        .filter(|&id| {
            let room = grid.room(id);
            !room.visited && room.kind == RoomKind::Normal
        })
        .collect();
    if !allow_islands {
        if !unvisited.is_empty() {
            return Err(Error::IslandsForbidden { unvisited: unvisited.len() });
        }
        return Ok(0);
    }
    let mut islands = 0;
    for id in unvisited {
        if grid.room(id).visited {
            continue;
        }
        let path_id = *next_path_id;
        *next_path_id += 1;
        carve_tree(grid, id, path_id, rng, &[]);
        islands += 1;
    }
    Ok(islands)
}
