//! Declarative grid modifiers and the engine that applies them in phases:
//! blanks (including frames) first, closings second, merges last.

use rand_chacha::rand_core::RngCore;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{CellRect, Placement, RoomInsets, RoomLocation, RoomOffset, RoomSize};
use crate::grid::{RoomGrid, RoomKind};

mod closing;

pub use closing::{Closing, ClosingType};

/// How often a random placement is redrawn before giving up on a conflict.
const RANDOM_PLACEMENT_DRAWS: u32 = 100;

/// A declarative alteration of the room grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Modifier {
    /// Marks a frame of cells along the grid border as blank.
    Frame { insets: RoomInsets },
    /// Marks all cells of the resolved area as blank.
    Blank { placement: Placement, size: RoomSize, offset: RoomOffset },
    /// Permanently closes the selected walls of the resolved area.
    Closing { closing: Closing, placement: Placement, size: RoomSize, offset: RoomOffset },
    /// Replaces the single-cell rooms of the resolved area with one room.
    Merge { placement: Placement, size: RoomSize, offset: RoomOffset },
}

/// Parse `placement[/size[/offset]]`, the shared tail of the blank, merge,
/// and closing specifications.
fn parse_area_spec(text: &str) -> Result<(Placement, RoomSize, RoomOffset)> {
    let mut parts = text.split('/');
    let placement = Placement::parse(parts.next().unwrap_or_default())?;
    let size = match parts.next() {
        Some(part) => RoomSize::parse(part)?,
        None => RoomSize::single(),
    };
    let offset = match parts.next() {
        Some(part) => RoomOffset::parse(part)?,
        None => RoomOffset::default(),
    };
    if parts.next().is_some() {
        return Err(Error::BadOffset(text.to_string()));
    }
    if placement.is_random() && !offset.is_zero() {
        return Err(Error::BadOffset(text.to_string()));
    }
    Ok((placement, size, offset))
}

impl Modifier {
    pub fn frame_from_spec(text: &str) -> Result<Self> {
        Ok(Modifier::Frame { insets: RoomInsets::parse(text)? })
    }

    pub fn blank_from_spec(text: &str) -> Result<Self> {
        let (placement, size, offset) = parse_area_spec(text)?;
        Ok(Modifier::Blank { placement, size, offset })
    }

    pub fn merge_from_spec(text: &str) -> Result<Self> {
        let (placement, size, offset) = parse_area_spec(text)?;
        Ok(Modifier::Merge { placement, size, offset })
    }

    /// Parse `[^]closing/placement[/size[/offset]]`. Closings cannot be
    /// randomly placed.
    pub fn closing_from_spec(text: &str) -> Result<Self> {
        let Some((closing_text, area_text)) = text.split_once('/') else {
            return Err(Error::BadClosing(text.to_string()));
        };
        let closing = Closing::parse(closing_text)?;
        let (placement, size, offset) = parse_area_spec(area_text)?;
        if placement.is_random() {
            return Err(Error::BadClosing(text.to_string()));
        }
        Ok(Modifier::Closing { closing, placement, size, offset })
    }

    /// Application order within a phase; frames count as center placements.
    fn order_class(&self) -> u8 {
        match self {
            Modifier::Frame { .. } => 0,
            Modifier::Blank { placement, .. }
            | Modifier::Closing { placement, .. }
            | Modifier::Merge { placement, .. } => placement.order_class(),
        }
    }
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Modifier::Frame { insets } => write!(f, "frame {insets}"),
            Modifier::Blank { placement, size, offset } => {
                write!(f, "blank {placement}/{size}/{offset}")
            }
            Modifier::Closing { closing, placement, size, offset } => {
                let prefix = if closing.inverted { "^" } else { "" };
                write!(f, "close {prefix}{:?}/{placement}/{size}/{offset}", closing.closing_type)
            }
            Modifier::Merge { placement, size, offset } => {
                write!(f, "merge {placement}/{size}/{offset}")
            }
        }
    }
}

/// Resolve a symbolic placement, size, and offset into a concrete rectangle
/// on the grid. Random placements draw a uniform in-grid top left cell from
/// the generator's random stream.
pub(crate) fn resolve_area(
    grid_size: RoomSize,
    placement: Placement,
    size: RoomSize,
    offset: RoomOffset,
    rng: &mut ChaCha8Rng,
) -> Result<CellRect> {
    if size.width > grid_size.width || size.height > grid_size.height {
        return Err(Error::Unplaceable(format!(
            "a {size} area does not fit the {grid_size} grid"
        )));
    }
    let location = if placement.is_random() {
        let span_x = (grid_size.width - size.width + 1) as u64;
        let span_y = (grid_size.height - size.height + 1) as u64;
        RoomLocation::new(
            (rng.next_u64() % span_x) as i32,
            (rng.next_u64() % span_y) as i32,
        )
    } else {
        apply_offset(placement.aligned_top_left(grid_size, size), placement, offset)
    };
    let rect = CellRect::new(location, size);
    let bounds = CellRect::new(RoomLocation::new(0, 0), grid_size);
    if !bounds.contains_rect(rect) {
        return Err(Error::Unplaceable(format!(
            "the {size} area at {},{} reaches outside the {grid_size} grid",
            location.x, location.y
        )));
    }
    Ok(rect)
}

fn apply_offset(location: RoomLocation, placement: Placement, offset: RoomOffset) -> RoomLocation {
    if offset.is_zero() {
        return location;
    }
    if offset.diagonal {
        // A positive diagonal offset always moves inward; at the center
        // placement the normals are zero and the offset is a no-op.
        let (normal_x, normal_y) = placement.direction_normals();
        location.translated(-normal_x * offset.x, -normal_y * offset.x)
    } else {
        location.translated(offset.x, offset.y)
    }
}

/// Apply all modifiers in the mandated phase order. With `ignore_errors` an
/// offending modifier is skipped with a warning instead of aborting.
pub(crate) fn apply_modifiers(
    grid: &mut RoomGrid,
    modifiers: &[Modifier],
    rng: &mut ChaCha8Rng,
    ignore_errors: bool,
) -> Result<()> {
    let mut blanks = Vec::new();
    let mut closings = Vec::new();
    let mut merges = Vec::new();
    for modifier in modifiers {
        match modifier {
            Modifier::Frame { .. } | Modifier::Blank { .. } => blanks.push(modifier),
            Modifier::Closing { .. } => closings.push(modifier),
            Modifier::Merge { .. } => merges.push(modifier),
        }
    }
    for phase in [&mut blanks, &mut closings, &mut merges] {
        phase.sort_by_key(|modifier| modifier.order_class());
    }

    for modifier in blanks.into_iter().chain(closings).chain(merges) {
        if let Err(error) = apply_one(grid, modifier, rng) {
            if ignore_errors {
                log::warn!("skipping modifier '{modifier}': {error}");
            } else {
                return Err(error);
            }
        }
    }
    Ok(())
}

fn set_blank(grid: &mut RoomGrid, location: RoomLocation) {
    let id = grid.room_id_at(location);
    grid.room_mut(id).kind = RoomKind::Blank;
}

fn apply_one(grid: &mut RoomGrid, modifier: &Modifier, rng: &mut ChaCha8Rng) -> Result<()> {
    let grid_size = grid.size();
    match modifier {
        Modifier::Frame { insets } => {
            let bounds = grid.bounds();
            for cell in bounds.cells() {
                if bounds.is_in_frame(cell, *insets) {
                    set_blank(grid, cell);
                }
            }
            Ok(())
        }
        Modifier::Blank { placement, size, offset } => {
            let rect = resolve_area(grid_size, *placement, *size, *offset, rng)?;
            for cell in rect.cells() {
                set_blank(grid, cell);
            }
            Ok(())
        }
        Modifier::Closing { closing, placement, size, offset } => {
            let rect = resolve_area(grid_size, *placement, *size, *offset, rng)?;
            for wall in closing.selected_walls(rect) {
                grid.close_wall(wall);
            }
            Ok(())
        }
        Modifier::Merge { placement, size, offset } => {
            if !placement.is_random() {
                let rect = resolve_area(grid_size, *placement, *size, *offset, rng)?;
                return grid.merge(rect).map(|_| ());
            }
            let mut last_error = None;
            for _ in 0..RANDOM_PLACEMENT_DRAWS {
                let rect = resolve_area(grid_size, *placement, *size, *offset, rng)?;
                match grid.merge(rect) {
                    Ok(_) => return Ok(()),
                    Err(error) => last_error = Some(error),
                }
            }
            log::debug!(
                "random merge gave up after {RANDOM_PLACEMENT_DRAWS} draws: {:?}",
                last_error
            );
            Err(Error::ConflictAfterRetries {
                spec: modifier.to_string(),
                attempts: RANDOM_PLACEMENT_DRAWS,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{WallRef, WallState};
    use rand_chacha::rand_core::SeedableRng;

    use crate::geometry::Direction;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(1)
    }

    fn grid_9x9() -> RoomGrid {
        RoomGrid::new(RoomSize::new(9, 9))
    }

    #[test]
    fn blank_spec_parses_with_defaults() {
        assert_eq!(
            Modifier::blank_from_spec("c").unwrap(),
            Modifier::Blank {
                placement: Placement::Center,
                size: RoomSize::single(),
                offset: RoomOffset::default(),
            }
        );
        assert_eq!(
            Modifier::blank_from_spec("nw/2x3/1,1").unwrap(),
            Modifier::Blank {
                placement: Placement::NorthWest,
                size: RoomSize::new(2, 3),
                offset: RoomOffset::explicit(1, 1),
            }
        );
        assert!(Modifier::blank_from_spec("c/1/0/extra").is_err());
        assert!(Modifier::blank_from_spec("r/2/1").is_err());
    }

    #[test]
    fn closing_spec_requires_a_placement_and_rejects_random() {
        let modifier = Modifier::closing_from_spec("^m/c/5").unwrap();
        match modifier {
            Modifier::Closing { closing, placement, size, .. } => {
                assert!(closing.inverted);
                assert_eq!(closing.closing_type, ClosingType::MiddlePaths);
                assert_eq!(placement, Placement::Center);
                assert_eq!(size, RoomSize::new(5, 5));
            }
            other => panic!("unexpected modifier {other:?}"),
        }
        assert!(Modifier::closing_from_spec("m").is_err());
        assert!(Modifier::closing_from_spec("m/r/3").is_err());
    }

    #[test]
    fn diagonal_offsets_move_inward_from_the_placement() {
        let rect = resolve_area(
            RoomSize::new(9, 9),
            Placement::NorthWest,
            RoomSize::new(2, 2),
            RoomOffset::diagonal(3),
            &mut rng(),
        )
        .unwrap();
        assert_eq!(rect.location, RoomLocation::new(3, 3));

        let rect = resolve_area(
            RoomSize::new(9, 9),
            Placement::East,
            RoomSize::single(),
            RoomOffset::diagonal(2),
            &mut rng(),
        )
        .unwrap();
        assert_eq!(rect.location, RoomLocation::new(6, 4));
    }

    #[test]
    fn out_of_grid_areas_are_rejected() {
        let result = resolve_area(
            RoomSize::new(9, 9),
            Placement::NorthWest,
            RoomSize::new(2, 2),
            RoomOffset::explicit(-1, 0),
            &mut rng(),
        );
        assert!(matches!(result, Err(Error::Unplaceable(_))));
    }

    #[test]
    fn random_areas_always_lie_inside_the_grid() {
        let mut rng = rng();
        for _ in 0..200 {
            let rect = resolve_area(
                RoomSize::new(9, 7),
                Placement::Random,
                RoomSize::new(3, 2),
                RoomOffset::default(),
                &mut rng,
            )
            .unwrap();
            assert!(rect.location.x >= 0 && rect.right() <= 8);
            assert!(rect.location.y >= 0 && rect.bottom() <= 6);
        }
    }

    #[test]
    fn frame_blanks_the_border_ring() {
        let mut grid = grid_9x9();
        let frame = Modifier::frame_from_spec("1").unwrap();
        apply_modifiers(&mut grid, &[frame], &mut rng(), false).unwrap();
        let corner = grid.room_id_at(RoomLocation::new(0, 0));
        assert_eq!(grid.room(corner).kind, RoomKind::Blank);
        let inner = grid.room_id_at(RoomLocation::new(1, 1));
        assert_eq!(grid.room(inner).kind, RoomKind::Normal);
        let blanks = grid
            .room_ids()
            .into_iter()
            .filter(|&id| grid.room(id).kind == RoomKind::Blank)
            .count();
        assert_eq!(blanks, 9 * 9 - 7 * 7);
    }

    #[test]
    fn applying_a_blank_twice_changes_nothing_more() {
        let mut first = grid_9x9();
        let mut twice = grid_9x9();
        let blank = Modifier::blank_from_spec("c/3").unwrap();
        apply_modifiers(&mut first, &[blank.clone()], &mut rng(), false).unwrap();
        apply_modifiers(&mut twice, &[blank.clone(), blank], &mut rng(), false).unwrap();
        for (a, b) in first.room_ids().into_iter().zip(twice.room_ids()) {
            assert_eq!(first.room(a).kind, twice.room(b).kind);
        }
    }

    #[test]
    fn closing_marks_the_selected_walls_closed() {
        let mut grid = grid_9x9();
        let closing = Modifier::closing_from_spec("dv/c/3").unwrap();
        apply_modifiers(&mut grid, &[closing], &mut rng(), false).unwrap();
        // Center 3x3 spans cells 3..=5; its inner south walls are closed.
        let wall = WallRef::new(RoomLocation::new(4, 3), Direction::South);
        assert_eq!(grid.wall_state(wall), WallState::Closed);
        let outside = WallRef::new(RoomLocation::new(1, 1), Direction::South);
        assert_eq!(grid.wall_state(outside), WallState::Open);
    }

    #[test]
    fn merge_conflict_is_reported() {
        let mut grid = grid_9x9();
        let merges = [
            Modifier::merge_from_spec("c/3").unwrap(),
            Modifier::merge_from_spec("c/3").unwrap(),
        ];
        let result = apply_modifiers(&mut grid, &merges, &mut rng(), false);
        assert!(matches!(result, Err(Error::InvalidMerge(_))));
    }

    #[test]
    fn ignore_errors_skips_the_offending_modifier() {
        let mut grid = grid_9x9();
        let merges = [
            Modifier::merge_from_spec("c/3").unwrap(),
            Modifier::merge_from_spec("c/3").unwrap(),
        ];
        apply_modifiers(&mut grid, &merges, &mut rng(), true).unwrap();
        let center = grid.room_id_at(RoomLocation::new(4, 4));
        assert_eq!(grid.room(center).size(), RoomSize::new(3, 3));
    }

    #[test]
    fn random_merges_redraw_until_they_fit() {
        let mut grid = RoomGrid::new(RoomSize::new(7, 7));
        let merges = [
            Modifier::merge_from_spec("c/3").unwrap(),
            Modifier::merge_from_spec("r/2").unwrap(),
        ];
        apply_modifiers(&mut grid, &merges, &mut rng(), false).unwrap();
        let merged_rooms = grid
            .room_ids()
            .into_iter()
            .filter(|&id| grid.room(id).is_merged())
            .count();
        assert_eq!(merged_rooms, 2);
    }
}
