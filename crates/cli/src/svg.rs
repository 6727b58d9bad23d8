//! Renders the finished maze model into an SVG document. The document is
//! written by hand; walls become line segments along the cell edge
//! coordinates the core derived from the fill mode.

use std::collections::HashMap;
use std::fmt::Write as _;

use mazegen_core::{Direction, Maze, MazeRoom, RoomKind, WallState};

use crate::color::{self, Color};

pub struct SvgOptions {
    /// Canvas size in mm, as configured.
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub wall_thickness: f64,
    /// Emit px coordinates (converted with `dpi`) instead of mm.
    pub px_unit: bool,
    pub dpi: f64,
    /// Place the document zero point at the canvas center instead of the
    /// top left corner.
    pub zero_at_center: bool,
    pub background: Option<Color>,
    pub wall_color: Color,
    pub endpoint_colors: Vec<Color>,
    pub marks: bool,
}

pub fn render(maze: &Maze, options: &SvgOptions) -> String {
    let scale = if options.px_unit { options.dpi / 25.4 } else { 1.0 };
    let width = options.canvas_width * scale;
    let height = options.canvas_height * scale;
    let (offset_x, offset_y) =
        if options.zero_at_center { (-width / 2.0, -height / 2.0) } else { (0.0, 0.0) };
    let x = |edge: f64| edge * scale + offset_x;
    let y = |edge: f64| edge * scale + offset_y;

    let mut svg = String::new();
    let _ = writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let size_attributes = if options.px_unit {
        format!(r#"width="{width:.2}" height="{height:.2}""#)
    } else {
        format!(r#"width="{width}mm" height="{height}mm""#)
    };
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" {size_attributes} viewBox="{offset_x:.3} {offset_y:.3} {width:.3} {height:.3}">"#,
    );

    if let Some(background) = options.background {
        let _ = writeln!(
            svg,
            r#"  <rect x="{:.3}" y="{:.3}" width="{width:.3}" height="{height:.3}" fill="{}"/>"#,
            offset_x,
            offset_y,
            background.to_hex(),
        );
    }

    let cell_to_room = cell_index(maze);
    let stroke = format!(
        r#"stroke="{}" stroke-width="{:.3}" stroke-linecap="square""#,
        options.wall_color.to_hex(),
        options.wall_thickness * scale,
    );
    for (index, room) in maze.rooms.iter().enumerate() {
        if room.kind == RoomKind::Blank {
            continue;
        }
        for side in Direction::ALL {
            for (offset, state) in room.walls_on(side).iter().enumerate() {
                if *state == WallState::Carved {
                    continue;
                }
                if skip_shared_segment(maze, &cell_to_room, index, room, side, offset) {
                    continue;
                }
                let (cell_x, cell_y) = boundary_cell(room, side, offset);
                let (x1, y1, x2, y2) = match side {
                    Direction::North => (cell_x, cell_y, cell_x + 1, cell_y),
                    Direction::South => (cell_x, cell_y + 1, cell_x + 1, cell_y + 1),
                    Direction::West => (cell_x, cell_y, cell_x, cell_y + 1),
                    Direction::East => (cell_x + 1, cell_y, cell_x + 1, cell_y + 1),
                };
                let _ = writeln!(
                    svg,
                    r#"  <line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}" {stroke}/>"#,
                    x(maze.x_edges[x1 as usize]),
                    y(maze.y_edges[y1 as usize]),
                    x(maze.x_edges[x2 as usize]),
                    y(maze.y_edges[y2 as usize]),
                );
            }
        }
    }

    if options.marks {
        for endpoint in &maze.endpoints {
            let room = &maze.rooms[endpoint.room_index];
            let inset = options.wall_thickness * 1.5 * scale;
            let left = x(maze.x_edges[room.location.x as usize]) + inset;
            let top = y(maze.y_edges[room.location.y as usize]) + inset;
            let right =
                x(maze.x_edges[(room.location.x + room.size.width as i32) as usize]) - inset;
            let bottom =
                y(maze.y_edges[(room.location.y + room.size.height as i32) as usize]) - inset;
            let color = color::endpoint_color(
                endpoint.color_index,
                maze.endpoints.len(),
                &options.endpoint_colors,
            );
            let _ = writeln!(
                svg,
                r#"  <rect x="{left:.3}" y="{top:.3}" width="{:.3}" height="{:.3}" fill="{}"/>"#,
                (right - left).max(0.0),
                (bottom - top).max(0.0),
                color.to_hex(),
            );
        }
    }

    svg.push_str("</svg>\n");
    svg
}

fn cell_index(maze: &Maze) -> HashMap<(i32, i32), usize> {
    let mut map = HashMap::new();
    for (index, room) in maze.rooms.iter().enumerate() {
        for cell_y in room.location.y..room.location.y + room.size.height as i32 {
            for cell_x in room.location.x..room.location.x + room.size.width as i32 {
                map.insert((cell_x, cell_y), index);
            }
        }
    }
    map
}

fn boundary_cell(room: &MazeRoom, side: Direction, offset: usize) -> (i32, i32) {
    let right = room.location.x + room.size.width as i32 - 1;
    let bottom = room.location.y + room.size.height as i32 - 1;
    match side {
        Direction::North => (room.location.x + offset as i32, room.location.y),
        Direction::South => (room.location.x + offset as i32, bottom),
        Direction::West => (room.location.x, room.location.y + offset as i32),
        Direction::East => (right, room.location.y + offset as i32),
    }
}

/// A wall between two drawable rooms would be emitted twice, once from each
/// side. Only the north/west owner draws it.
fn skip_shared_segment(
    maze: &Maze,
    cell_to_room: &HashMap<(i32, i32), usize>,
    index: usize,
    room: &MazeRoom,
    side: Direction,
    offset: usize,
) -> bool {
    if side != Direction::South && side != Direction::East {
        return false;
    }
    let (cell_x, cell_y) = boundary_cell(room, side, offset);
    let neighbor_cell = match side {
        Direction::South => (cell_x, cell_y + 1),
        Direction::East => (cell_x + 1, cell_y),
        _ => unreachable!(),
    };
    match cell_to_room.get(&neighbor_cell) {
        Some(&neighbor) => neighbor != index && maze.rooms[neighbor].kind != RoomKind::Blank,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazegen_core::{Generator, GeneratorConfig, NullStatusSink};

    fn small_maze() -> Maze {
        let mut config = GeneratorConfig::new(40.0, 40.0);
        config.side_length = 5.0;
        config.seed = Some(1);
        Generator::new(config).unwrap().generate(&mut NullStatusSink).unwrap()
    }

    fn default_options() -> SvgOptions {
        SvgOptions {
            canvas_width: 40.0,
            canvas_height: 40.0,
            wall_thickness: 1.7,
            px_unit: false,
            dpi: 96.0,
            zero_at_center: false,
            background: Some(Color::new(230, 230, 230)),
            wall_color: Color::new(51, 51, 51),
            endpoint_colors: Vec::new(),
            marks: true,
        }
    }

    #[test]
    fn document_has_walls_marks_and_background() {
        let svg = render(&small_maze(), &default_options());
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"width="40mm""#));
        // A 9x9 maze has far more standing walls than rooms.
        assert!(svg.matches("<line").count() > 81);
        // Background plus two endpoint marks.
        assert_eq!(svg.matches("<rect").count(), 3);
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn marks_can_be_disabled() {
        let mut options = default_options();
        options.marks = false;
        options.background = None;
        let svg = render(&small_maze(), &options);
        assert_eq!(svg.matches("<rect").count(), 0);
    }

    #[test]
    fn px_unit_scales_the_canvas() {
        let mut options = default_options();
        options.px_unit = true;
        let svg = render(&small_maze(), &options);
        // 40 mm at 96 dpi is roughly 151 px.
        assert!(svg.contains(r#"width="151.18""#));
    }

    #[test]
    fn centered_zero_point_shifts_the_view_box() {
        let mut options = default_options();
        options.zero_at_center = true;
        let svg = render(&small_maze(), &options);
        assert!(svg.contains(r#"viewBox="-20.000 -20.000 40.000 40.000""#));
    }
}
