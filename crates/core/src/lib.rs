//! Layout and path-generation core for rectangular vector mazes.
//!
//! The pipeline resolves a parameterized canvas into a room grid, applies
//! declarative modifiers, anchors the path endpoints, carves a randomized
//! spanning path structure, and emits a normalized room and wall model for a
//! downstream renderer. The core is synchronous, does no I/O, and owns a
//! single seeded random stream per generator instance.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod grid;
pub mod maze;
pub mod modifier;
pub mod status;

mod layout;
mod verify;

pub use config::{FillMode, GeneratorConfig, Parity};
pub use endpoint::{EndpointSpec, PathEndpoint};
pub use error::{Error, Result};
pub use generator::Generator;
pub use geometry::{
    CellRect, Corner, Direction, Placement, RoomInsets, RoomLocation, RoomOffset, RoomSize,
};
pub use grid::{RoomKind, WallState};
pub use maze::{Maze, MazeEndpoint, MazeRoom};
pub use modifier::{Closing, ClosingType, Modifier};
pub use status::{NullStatusSink, RecordingStatusSink, StatusEvent, StatusSink};
