//! The normalized, read-only room and wall model handed to the renderer.

use std::collections::HashMap;

use crate::endpoint::PathEndpoint;
use crate::geometry::{Direction, RoomLocation, RoomSize};
use crate::grid::{RoomGrid, RoomId, RoomKind, WallState};
use crate::layout::CellGeometry;

/// One room of the finished maze.
#[derive(Clone, Debug, PartialEq)]
pub struct MazeRoom {
    pub location: RoomLocation,
    pub size: RoomSize,
    pub kind: RoomKind,
    /// Wall states per side in N, E, S, W order, one entry per cell along
    /// that side in ascending order.
    pub walls: [Vec<WallState>; 4],
}

impl MazeRoom {
    pub fn walls_on(&self, side: Direction) -> &[WallState] {
        &self.walls[side.index()]
    }
}

/// An endpoint record for the renderer: where the mark goes and which side
/// the maze visibly opens through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MazeEndpoint {
    pub room_index: usize,
    pub opening: Direction,
    pub dead_end: bool,
    pub color_index: usize,
}

/// The finished maze. Rooms are listed in scan order of their top left cell;
/// the mm edge coordinates carry the fill-mode geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct Maze {
    pub size: RoomSize,
    pub x_edges: Vec<f64>,
    pub y_edges: Vec<f64>,
    pub rooms: Vec<MazeRoom>,
    pub endpoints: Vec<MazeEndpoint>,
}

impl Maze {
    pub(crate) fn from_grid(
        grid: &RoomGrid,
        geometry: &CellGeometry,
        endpoints: &[PathEndpoint],
    ) -> Self {
        let ids = grid.room_ids();
        let index_of: HashMap<RoomId, usize> =
            ids.iter().copied().enumerate().map(|(index, id)| (id, index)).collect();

        let rooms = ids
            .iter()
            .map(|&id| {
                let room = grid.room(id);
                let mut walls: [Vec<WallState>; 4] = Default::default();
                for wall in grid.room_walls(id) {
                    walls[wall.side.index()].push(grid.wall_state(wall));
                }
                MazeRoom { location: room.location(), size: room.size(), kind: room.kind, walls }
            })
            .collect();

        let endpoints = endpoints
            .iter()
            .map(|endpoint| MazeEndpoint {
                room_index: index_of[&endpoint.room],
                opening: endpoint.opening,
                dead_end: endpoint.dead_end,
                color_index: endpoint.color_index,
            })
            .collect();

        Self {
            size: grid.size(),
            x_edges: geometry.x_edges.clone(),
            y_edges: geometry.y_edges.clone(),
            rooms,
            endpoints,
        }
    }

    /// A canonical byte serialization of the whole model, used to check that
    /// identical configurations and seeds reproduce identical mazes.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.size.width.to_le_bytes());
        bytes.extend(self.size.height.to_le_bytes());
        for edge in self.x_edges.iter().chain(&self.y_edges) {
            bytes.extend(edge.to_le_bytes());
        }
        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            bytes.extend(room.location.x.to_le_bytes());
            bytes.extend(room.location.y.to_le_bytes());
            bytes.extend(room.size.width.to_le_bytes());
            bytes.extend(room.size.height.to_le_bytes());
            bytes.push(match room.kind {
                RoomKind::Normal => 0,
                RoomKind::Blank => 1,
                RoomKind::EndpointAnchor => 2,
            });
            for side in &room.walls {
                for state in side {
                    bytes.push(match state {
                        WallState::Open => 0,
                        WallState::Closed => 1,
                        WallState::Carved => 2,
                    });
                }
            }
        }
        bytes.extend((self.endpoints.len() as u32).to_le_bytes());
        for endpoint in &self.endpoints {
            bytes.extend((endpoint.room_index as u32).to_le_bytes());
            bytes.push(endpoint.opening.index() as u8);
            bytes.push(u8::from(endpoint.dead_end));
            bytes.push(endpoint.color_index as u8);
        }
        bytes
    }

    /// Count of rooms that take part in the maze, blanks excluded.
    pub fn active_room_count(&self) -> usize {
        self.rooms.iter().filter(|room| room.kind != RoomKind::Blank).count()
    }
}
