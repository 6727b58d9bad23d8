//! Turns declared endpoints into concrete rooms with an exterior opening.

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{Direction, Placement, RoomLocation, RoomOffset, RoomSize};
use crate::grid::{RoomGrid, RoomId, RoomKind, WallRef};
use crate::modifier::resolve_area;

/// How often a random endpoint placement is redrawn before the last draw is
/// accepted and validated like an explicit placement.
const RANDOM_ENDPOINT_DRAWS: u32 = 100;

/// A declared path endpoint, before it is anchored to a room.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EndpointSpec {
    pub placement: Placement,
    pub offset: RoomOffset,
    /// Dead ends may stay a stub; they are not joined with the other
    /// endpoints into one component.
    pub dead_end: bool,
}

impl EndpointSpec {
    pub fn new(placement: Placement) -> Self {
        Self { placement, offset: RoomOffset::default(), dead_end: false }
    }

    /// Parse `placement[/offset[/x]]`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut parts = text.split('/');
        let placement = Placement::parse(parts.next().unwrap_or_default())?;
        let offset = match parts.next() {
            Some(part) => RoomOffset::parse(part)?,
            None => RoomOffset::default(),
        };
        let dead_end = match parts.next() {
            Some(part) if part.eq_ignore_ascii_case("x") => true,
            Some(_) => return Err(Error::BadPlacement(text.to_string())),
            None => false,
        };
        if parts.next().is_some() {
            return Err(Error::BadPlacement(text.to_string()));
        }
        if placement.is_random() && !offset.is_zero() {
            return Err(Error::BadOffset(text.to_string()));
        }
        Ok(Self { placement, offset, dead_end })
    }

    /// The default endpoints when none are declared: west and east, both
    /// joinable, on the middle row.
    pub fn default_pair() -> Vec<Self> {
        vec![Self::new(Placement::West), Self::new(Placement::East)]
    }
}

impl std::fmt::Display for EndpointSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.placement, self.offset)?;
        if self.dead_end {
            write!(f, "/x")?;
        }
        Ok(())
    }
}

/// An endpoint anchored to a room of the grid.
#[derive(Clone, Debug)]
pub struct PathEndpoint {
    pub room: RoomId,
    /// The exterior side the endpoint opens through. Only carved into the
    /// perimeter when the anchor room actually touches that grid edge;
    /// otherwise it orients the renderer mark.
    pub opening: Direction,
    pub dead_end: bool,
    /// Position in the declaration order; selects the renderer mark color.
    pub color_index: usize,
}

pub(crate) fn place_endpoints(
    grid: &mut RoomGrid,
    specs: &[EndpointSpec],
    rng: &mut ChaCha8Rng,
    ignore_errors: bool,
) -> Result<Vec<PathEndpoint>> {
    let mut endpoints: Vec<PathEndpoint> = Vec::new();
    for spec in specs {
        match place_one(grid, spec, endpoints.len(), rng) {
            Ok(endpoint) => endpoints.push(endpoint),
            Err(error) => {
                if ignore_errors {
                    log::warn!("skipping endpoint '{spec}': {error}");
                } else {
                    return Err(error);
                }
            }
        }
    }
    Ok(endpoints)
}

fn place_one(
    grid: &mut RoomGrid,
    spec: &EndpointSpec,
    index: usize,
    rng: &mut ChaCha8Rng,
) -> Result<PathEndpoint> {
    let location = resolve_location(grid, spec, rng)?;
    let id = grid.room_id_at(location);
    if grid.room(id).kind == RoomKind::EndpointAnchor {
        return Err(Error::Unplaceable(format!(
            "endpoint '{spec}' collides with another endpoint at {},{}",
            location.x, location.y
        )));
    }
    if grid.room(id).kind == RoomKind::Blank {
        // An endpoint on a blank cell converts it back into a normal room.
        grid.room_mut(id).kind = RoomKind::Normal;
    }
    if grid.open_neighbors(id).is_empty() {
        return Err(Error::EndpointTrapped(spec.to_string()));
    }
    grid.room_mut(id).kind = RoomKind::EndpointAnchor;
    grid.room_mut(id).endpoint = Some(index);

    let opening = opening_direction(grid.size(), spec, location);
    carve_opening(grid, id, location, opening);
    Ok(PathEndpoint { room: id, opening, dead_end: spec.dead_end, color_index: index })
}

fn resolve_location(
    grid: &RoomGrid,
    spec: &EndpointSpec,
    rng: &mut ChaCha8Rng,
) -> Result<RoomLocation> {
    if !spec.placement.is_random() {
        let rect =
            resolve_area(grid.size(), spec.placement, RoomSize::single(), spec.offset, rng)?;
        return Ok(rect.location);
    }
    // Random endpoints redraw a few times to find a normal, connectable room.
    let mut location = RoomLocation::new(0, 0);
    for _ in 0..RANDOM_ENDPOINT_DRAWS {
        location = resolve_area(grid.size(), spec.placement, RoomSize::single(), spec.offset, rng)?
            .location;
        let room = grid.room(grid.room_id_at(location));
        if room.kind == RoomKind::Normal && !grid.open_neighbors(grid.room_id_at(location)).is_empty()
        {
            break;
        }
    }
    Ok(location)
}

fn opening_direction(grid_size: RoomSize, spec: &EndpointSpec, location: RoomLocation) -> Direction {
    if let Some(direction) = spec.placement.opening_direction() {
        return direction;
    }
    if spec.placement == Placement::Random {
        return nearest_edge(grid_size, location);
    }
    // Center placements derive the opening from the explicit offset: the
    // axis with the smaller magnitude wins, ties prefer north, then west.
    let (dx, dy) = if spec.offset.diagonal { (0, 0) } else { (spec.offset.x, spec.offset.y) };
    if dx.abs() < dy.abs() {
        if dx <= 0 {
            Direction::West
        } else {
            Direction::East
        }
    } else if dy.abs() < dx.abs() {
        if dy <= 0 {
            Direction::North
        } else {
            Direction::South
        }
    } else if dy <= 0 {
        Direction::North
    } else if dx <= 0 {
        Direction::West
    } else {
        Direction::South
    }
}

fn nearest_edge(grid_size: RoomSize, location: RoomLocation) -> Direction {
    let distances = [
        (location.y, Direction::North),
        (location.x, Direction::West),
        (grid_size.height as i32 - 1 - location.y, Direction::South),
        (grid_size.width as i32 - 1 - location.x, Direction::East),
    ];
    let mut best = distances[0];
    for candidate in &distances[1..] {
        if candidate.0 < best.0 {
            best = *candidate;
        }
    }
    best.1
}

/// Open the perimeter wall on the opening side, at the room's cell nearest
/// to the resolved location. Rooms away from that grid edge keep their
/// perimeter untouched.
fn carve_opening(grid: &mut RoomGrid, id: RoomId, location: RoomLocation, opening: Direction) {
    let rect = grid.room(id).rect;
    let grid_size = grid.size();
    let touches = match opening {
        Direction::North => rect.location.y == 0,
        Direction::West => rect.location.x == 0,
        Direction::South => rect.bottom() == grid_size.height as i32 - 1,
        Direction::East => rect.right() == grid_size.width as i32 - 1,
    };
    if !touches {
        return;
    }
    let cell = match opening {
        Direction::North => RoomLocation::new(location.x, rect.location.y),
        Direction::South => RoomLocation::new(location.x, rect.bottom()),
        Direction::West => RoomLocation::new(rect.location.x, location.y),
        Direction::East => RoomLocation::new(rect.right(), location.y),
    };
    grid.open_perimeter(WallRef::new(cell, opening));
}
