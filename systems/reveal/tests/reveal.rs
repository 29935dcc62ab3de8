//! Event-to-command loop between the world and the reveal system.

use std::time::Duration;

use sandrift_core::{Command, Event, MapCoordinate, PlayerId, TileSize};
use sandrift_system_reveal::Reveal;
use sandrift_world::{apply, query, World};

fn pump(world: &mut World, reveal: &Reveal, commands: Vec<Command>) {
    let mut queue = commands;
    while !queue.is_empty() {
        let mut events = Vec::new();
        for command in queue.drain(..) {
            apply(world, command, &mut events);
        }
        let mut follow_ups = Vec::new();
        reveal.handle(
            &events,
            &query::unit_view(world),
            &query::structure_view(world),
            query::map_view(world),
            &mut follow_ups,
        );
        queue = follow_ups;
    }
}

fn scenario(columns: u32, rows: u32) -> (World, Reveal, PlayerId) {
    let mut world = World::new();
    let reveal = Reveal::default();
    let player = PlayerId::new(1);
    pump(
        &mut world,
        &reveal,
        vec![
            Command::ConfigureMap {
                columns,
                rows,
                tile_size: TileSize::DEFAULT,
            },
            Command::RegisterPlayer { player },
        ],
    );
    (world, reveal, player)
}

#[test]
fn spawning_a_unit_opens_the_shroud_around_it() {
    let (mut world, reveal, player) = scenario(5, 5);
    pump(
        &mut world,
        &reveal,
        vec![Command::SpawnUnit {
            player,
            cell: MapCoordinate::new(3, 3),
            speed: 32.0,
            sight: 2,
            hit_points: 100,
        }],
    );
    assert_eq!(
        query::shroud_ascii(&world, player).as_deref(),
        Some("#####\n#...#\n#...#\n#...#\n#####\n")
    );
}

#[test]
fn sightless_unit_still_uncovers_its_own_cell() {
    let (mut world, reveal, player) = scenario(5, 5);
    pump(
        &mut world,
        &reveal,
        vec![Command::SpawnUnit {
            player,
            cell: MapCoordinate::new(3, 3),
            speed: 32.0,
            sight: 0,
            hit_points: 100,
        }],
    );
    assert_eq!(
        query::shroud_ascii(&world, player).as_deref(),
        Some("#####\n#####\n##.##\n#####\n#####\n")
    );
}

#[test]
fn a_moving_unit_drags_its_reveal_along() {
    let (mut world, reveal, player) = scenario(7, 3);
    pump(
        &mut world,
        &reveal,
        vec![Command::SpawnUnit {
            player,
            cell: MapCoordinate::new(2, 2),
            speed: 32.0,
            sight: 2,
            hit_points: 100,
        }],
    );

    let unit = query::unit_view(&world).iter().next().expect("unit").id;
    pump(
        &mut world,
        &reveal,
        vec![Command::MoveUnit {
            unit,
            destination: MapCoordinate::new(4, 2),
        }],
    );
    for _ in 0..2 {
        pump(
            &mut world,
            &reveal,
            vec![Command::Tick {
                dt: Duration::from_secs(1),
            }],
        );
    }

    // Revealed cells stay revealed: the trail behind the unit remains open.
    assert_eq!(
        query::shroud_ascii(&world, player).as_deref(),
        Some(".....##\n.....##\n.....##\n")
    );
}

#[test]
fn structure_footprint_is_revealed_even_without_sight() {
    let (mut world, reveal, player) = scenario(5, 5);
    pump(
        &mut world,
        &reveal,
        vec![Command::PlaceStructure {
            player,
            cell: MapCoordinate::new(2, 2),
            width_px: 64,
            height_px: 64,
            sight: 0,
            hit_points: 500,
        }],
    );
    assert_eq!(
        query::shroud_ascii(&world, player).as_deref(),
        Some("#####\n#..##\n#..##\n#####\n#####\n")
    );
}

#[test]
fn reveals_only_touch_the_owning_players_shroud() {
    let (mut world, reveal, player) = scenario(5, 5);
    let rival = PlayerId::new(2);
    pump(
        &mut world,
        &reveal,
        vec![
            Command::RegisterPlayer { player: rival },
            Command::SpawnUnit {
                player,
                cell: MapCoordinate::new(3, 3),
                speed: 32.0,
                sight: 2,
                hit_points: 100,
            },
        ],
    );
    assert_eq!(
        query::shroud_ascii(&world, rival).as_deref(),
        Some("#####\n#####\n#####\n#####\n#####\n")
    );
}
