//! Rooms: the nodes of the maze graph.

use slotmap::new_key_type;

use crate::geometry::{CellRect, RoomLocation, RoomSize};

new_key_type! {
    /// Stable handle for a room in the grid's slot map.
    pub struct RoomId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoomKind {
    /// A regular room that takes part in the maze.
    Normal,
    /// A cell excluded from the maze; all its connections act as closed.
    Blank,
    /// A room that anchors a declared path endpoint.
    EndpointAnchor,
}

/// A room occupying one or more adjacent cells. A room spanning more than one
/// cell is a merged room and participates in the maze graph as a single node.
#[derive(Clone, Debug)]
pub struct Room {
    pub rect: CellRect,
    pub kind: RoomKind,
    /// Transient path-generator state, reset between attempts.
    pub visited: bool,
    /// Transient component label; 0 means not part of any path yet.
    pub path_id: u32,
    /// Index into the generator's endpoint list, if one anchors here.
    pub endpoint: Option<usize>,
}

impl Room {
    pub fn single_cell(location: RoomLocation) -> Self {
        Self {
            rect: CellRect::new(location, RoomSize::single()),
            kind: RoomKind::Normal,
            visited: false,
            path_id: 0,
            endpoint: None,
        }
    }

    pub fn location(&self) -> RoomLocation {
        self.rect.location
    }

    pub fn size(&self) -> RoomSize {
        self.rect.size
    }

    pub fn is_merged(&self) -> bool {
        !self.rect.size.is_single()
    }

    pub fn reset_transient(&mut self) {
        self.visited = false;
        self.path_id = 0;
    }
}
