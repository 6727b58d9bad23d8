//! End-to-end scenarios through the public generator API.

use mazegen_core::{
    Direction, EndpointSpec, Error, Generator, GeneratorConfig, Maze, MazeRoom, Modifier,
    NullStatusSink, Parity, RecordingStatusSink, RoomKind, RoomLocation, StatusEvent, WallState,
};

fn generate(config: GeneratorConfig) -> Maze {
    Generator::new(config)
        .expect("configuration should be accepted")
        .generate(&mut NullStatusSink)
        .expect("generation should succeed")
}

fn room_index_at(maze: &Maze, location: RoomLocation) -> usize {
    maze.rooms
        .iter()
        .position(|room| {
            location.x >= room.location.x
                && location.x < room.location.x + room.size.width as i32
                && location.y >= room.location.y
                && location.y < room.location.y + room.size.height as i32
        })
        .expect("every cell belongs to a room")
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

/// Breadth-first walk over carved passages, reconstructed purely from the
/// output model.
fn carved_component(maze: &Maze, start: usize) -> Vec<bool> {
    let mut cell_to_room = std::collections::HashMap::new();
    for (index, room) in maze.rooms.iter().enumerate() {
        for y in room.location.y..room.location.y + room.size.height as i32 {
            for x in room.location.x..room.location.x + room.size.width as i32 {
                cell_to_room.insert((x, y), index);
            }
        }
    }

    let mut reached = vec![false; maze.rooms.len()];
    reached[start] = true;
    let mut frontier = vec![start];
    while let Some(current) = frontier.pop() {
        let room = &maze.rooms[current];
        let steps =
            [(Direction::North, 0, -1), (Direction::East, 1, 0), (Direction::South, 0, 1), (Direction::West, -1, 0)];
        for (side, dx, dy) in steps {
            for (offset, state) in room.walls_on(side).iter().enumerate() {
                if *state != WallState::Carved {
                    continue;
                }
                let cell = boundary_cell(room, side, offset);
                let Some(&neighbor) = cell_to_room.get(&(cell.0 + dx, cell.1 + dy)) else {
                    continue;
                };
                if neighbor != current && !reached[neighbor] {
                    reached[neighbor] = true;
                    frontier.push(neighbor);
                }
            }
        }
    }
    reached
}

#[test]
fn small_square_maze_connects_all_rooms() {
    let mut config = GeneratorConfig::new(40.0, 40.0);
    config.side_length = 5.0;
    config.seed = Some(1);
    let maze = generate(config);

    assert_eq!(maze.size.width, 9);
    assert_eq!(maze.size.height, 9);
    assert_eq!(maze.rooms.len(), 81);
    assert_eq!(maze.endpoints.len(), 2);
    let west = &maze.rooms[maze.endpoints[0].room_index];
    let east = &maze.rooms[maze.endpoints[1].room_index];
    assert_eq!(west.location, RoomLocation::new(0, 4));
    assert_eq!(east.location, RoomLocation::new(8, 4));
    assert_eq!(maze.endpoints[0].opening, Direction::West);
    assert_eq!(maze.endpoints[1].opening, Direction::East);

    let reached = carved_component(&maze, maze.endpoints[0].room_index);
    assert!(reached.iter().all(|&flag| flag), "every room is part of one component");
}

#[test]
fn framed_maze_with_center_merge_and_dead_ends() {
    let mut config = GeneratorConfig::new(50.0, 50.0);
    config.seed = Some(1);
    config.modifiers = vec![
        Modifier::frame_from_spec("1").unwrap(),
        Modifier::merge_from_spec("c/3").unwrap(),
    ];
    config.endpoints = vec![
        EndpointSpec::parse("w").unwrap(),
        EndpointSpec::parse("c").unwrap(),
        EndpointSpec::parse("n/0/x").unwrap(),
        EndpointSpec::parse("e/0/x").unwrap(),
        EndpointSpec::parse("s/0/x").unwrap(),
    ];
    let maze = generate(config);

    assert_eq!(maze.size.width, 13);
    let center = &maze.rooms[room_index_at(&maze, RoomLocation::new(6, 6))];
    assert_eq!(center.size.width, 3);
    assert_eq!(center.size.height, 3);
    assert_eq!(center.kind, RoomKind::EndpointAnchor);

    // The border stays blank except where endpoints punched through.
    for x in 0..13 {
        let top = &maze.rooms[room_index_at(&maze, RoomLocation::new(x, 0))];
        if x == 6 {
            assert_eq!(top.kind, RoomKind::EndpointAnchor);
        } else {
            assert_eq!(top.kind, RoomKind::Blank);
        }
    }

    // West and center share a component.
    let reached = carved_component(&maze, maze.endpoints[0].room_index);
    assert!(reached[maze.endpoints[1].room_index]);
}

#[test]
fn even_parity_corner_endpoints_connect() {
    let mut config = GeneratorConfig::new(30.0, 30.0);
    config.side_length = 5.0;
    config.width_parity = Parity::Even;
    config.height_parity = Parity::Even;
    config.seed = Some(1);
    config.endpoints =
        vec![EndpointSpec::parse("nw").unwrap(), EndpointSpec::parse("se").unwrap()];
    let maze = generate(config);

    assert_eq!(maze.size.width, 6);
    assert_eq!(maze.size.height, 6);
    assert_eq!(maze.rooms[maze.endpoints[0].room_index].location, RoomLocation::new(0, 0));
    assert_eq!(maze.rooms[maze.endpoints[1].room_index].location, RoomLocation::new(5, 5));
    let reached = carved_component(&maze, maze.endpoints[0].room_index);
    assert!(reached[maze.endpoints[1].room_index]);
}

#[test]
fn center_blank_leaves_the_rest_connected() {
    let mut config = GeneratorConfig::new(60.0, 60.0);
    config.seed = Some(1);
    config.modifiers = vec![Modifier::blank_from_spec("c/7").unwrap()];
    let maze = generate(config);

    assert_eq!(maze.size.width, 15);
    let blanks = maze.rooms.iter().filter(|room| room.kind == RoomKind::Blank).count();
    assert_eq!(blanks, 49);
    assert_eq!(maze.active_room_count(), 15 * 15 - 49);

    let reached = carved_component(&maze, maze.endpoints[0].room_index);
    for (index, room) in maze.rooms.iter().enumerate() {
        if room.kind == RoomKind::Blank {
            assert!(!reached[index], "blank rooms stay outside the maze");
        } else {
            assert!(reached[index], "room at {:?} should be reachable", room.location);
        }
    }
}

#[test]
fn layout_only_closes_walls_but_carves_no_paths() {
    let mut config = GeneratorConfig::new(60.0, 60.0);
    config.wall_thickness = 3.0;
    config.layout_only = true;
    config.seed = Some(1);
    config.modifiers = vec![Modifier::closing_from_spec("dv/c/5x15").unwrap()];
    let mut sink = RecordingStatusSink::default();
    let maze = Generator::new(config).unwrap().generate(&mut sink).unwrap();

    assert_eq!(maze.size.width, 15);
    // The closing covers the full-height center stripe; its inner south
    // walls are permanently closed.
    let center = &maze.rooms[room_index_at(&maze, RoomLocation::new(7, 7))];
    assert_eq!(center.walls_on(Direction::South)[0], WallState::Closed);

    // No carving happened: the only carved walls are the two endpoint
    // openings in the perimeter.
    let carved = maze
        .rooms
        .iter()
        .flat_map(|room| room.walls.iter())
        .flatten()
        .filter(|&&state| state == WallState::Carved)
        .count();
    assert_eq!(carved, 2);
    assert!(!sink.events.iter().any(|event| matches!(event, StatusEvent::PathsCarved)));
    assert_eq!(sink.events.last(), Some(&StatusEvent::Completed));
}

#[test]
fn random_blanks_reproduce_under_a_fixed_seed() {
    let mut config = GeneratorConfig::new(60.0, 60.0);
    config.seed = Some(42);
    config.modifiers = vec![
        Modifier::blank_from_spec("r/3").unwrap(),
        Modifier::blank_from_spec("r/3").unwrap(),
    ];
    let first = generate(config.clone());
    let second = generate(config);
    assert_eq!(first.canonical_bytes(), second.canonical_bytes());
}

#[test]
fn forbidden_islands_surface_after_all_attempts() {
    let mut config = GeneratorConfig::new(40.0, 40.0);
    config.side_length = 5.0;
    config.seed = Some(1);
    config.allow_islands = false;
    config.maximum_attempts = 3;
    // Closing every wall of the center area guarantees unreachable rooms.
    config.modifiers = vec![
        Modifier::closing_from_spec("dn/c/3").unwrap(),
        Modifier::closing_from_spec("de/c/3").unwrap(),
        Modifier::closing_from_spec("ds/c/3").unwrap(),
        Modifier::closing_from_spec("dw/c/3").unwrap(),
    ];
    let result = Generator::new(config).unwrap().generate(&mut NullStatusSink);
    assert_eq!(result.unwrap_err(), Error::MaxAttemptsExceeded { attempts: 3 });
}

#[test]
fn status_events_follow_the_phase_order() {
    let mut config = GeneratorConfig::new(40.0, 40.0);
    config.side_length = 5.0;
    config.seed = Some(7);
    let mut sink = RecordingStatusSink::default();
    Generator::new(config).unwrap().generate(&mut sink).unwrap();

    let position = |predicate: fn(&StatusEvent) -> bool| {
        sink.events.iter().position(predicate).expect("event should be present")
    };
    let layout = position(|event| matches!(event, StatusEvent::LayoutComputed { .. }));
    let attempt = position(|event| matches!(event, StatusEvent::AttemptStarted(_)));
    let carved = position(|event| matches!(event, StatusEvent::PathsCarved));
    let verified = position(|event| matches!(event, StatusEvent::VerifyOk));
    assert!(layout < attempt && attempt < carved && carved < verified);
    assert_eq!(sink.events.last(), Some(&StatusEvent::Completed));
}
