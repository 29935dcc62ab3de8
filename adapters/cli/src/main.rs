#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Sandrift scenario.
//!
//! The scenario paints a small desert, registers one player, places a
//! structure, sends a scout across the map, and prints the terrain and
//! shroud dumps together with the size of the resulting render scene.

use std::fmt::Write as _;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use sandrift_core::{Command, MapCoordinate, PlayerId, TerrainKind, TileSize};
use sandrift_rendering::build_scene;
use sandrift_system_reveal::Reveal;
use sandrift_world::{apply, query, World};

/// Headless scenario runner for the Sandrift engine.
#[derive(Debug, Parser)]
#[command(name = "sandrift")]
struct Args {
    /// Playable columns of the map.
    #[arg(long, default_value_t = 16)]
    columns: u32,
    /// Playable rows of the map.
    #[arg(long, default_value_t = 16)]
    rows: u32,
    /// Simulation ticks to run, one second each.
    #[arg(long, default_value_t = 32)]
    ticks: u32,
    /// Sight radius in cells granted to the scout.
    #[arg(long, default_value_t = 3)]
    sight: u32,
}

/// Entry point for the Sandrift command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let report = run(&args)?;
    print!("{report}");
    Ok(())
}

fn run(args: &Args) -> Result<String> {
    if args.columns < 4 || args.rows < 4 {
        bail!("the scenario needs a map of at least 4x4 playable cells");
    }

    let mut world = World::new();
    let reveal = Reveal::default();
    let player = PlayerId::new(1);

    let mut setup = vec![
        Command::ConfigureMap {
            columns: args.columns,
            rows: args.rows,
            tile_size: TileSize::DEFAULT,
        },
        Command::RegisterPlayer { player },
    ];
    setup.extend(desert_terrain(args.columns, args.rows));
    setup.push(Command::PlaceStructure {
        player,
        cell: MapCoordinate::new(1, 1),
        width_px: 64,
        height_px: 64,
        sight: args.sight,
        hit_points: 500,
    });
    setup.push(Command::SpawnUnit {
        player,
        cell: MapCoordinate::new(3, 3),
        speed: 32.0,
        sight: args.sight,
        hit_points: 100,
    });
    pump(&mut world, &reveal, setup);

    let scout = query::unit_view(&world)
        .iter()
        .next()
        .context("the scenario spawns one unit")?
        .id;
    pump(
        &mut world,
        &reveal,
        vec![Command::MoveUnit {
            unit: scout,
            destination: MapCoordinate::new(args.columns as i32, args.rows as i32),
        }],
    );
    for _ in 0..args.ticks {
        pump(
            &mut world,
            &reveal,
            vec![Command::Tick {
                dt: Duration::from_secs(1),
            }],
        );
    }

    let shroud = query::shroud_view(&world, player).context("the player is registered")?;
    let map = query::map(&world);
    let scene = build_scene(
        query::map_view(&world),
        &shroud,
        &query::unit_view(&world),
        &query::structure_view(&world),
        |cell| {
            map.cell_at_or_none(cell.x(), cell.y())
                .map_or(TerrainKind::Empty, |cell| cell.terrain())
        },
    )?;

    let mut report = String::new();
    writeln!(report, "terrain ({}x{}):", args.columns, args.rows)?;
    report.push_str(&query::terrain_ascii(&world));
    writeln!(report, "shroud after {} ticks:", args.ticks)?;
    report.push_str(
        &query::shroud_ascii(&world, player).context("the player is registered")?,
    );
    writeln!(
        report,
        "scene: {} tiles, {} sprites",
        scene.tiles.len(),
        scene.sprites.len()
    )?;
    Ok(report)
}

/// Applies commands and feeds resulting events back through the reveal
/// system until the command queue drains.
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

/// Deterministic terrain for the demo map: sand with a rock seam and a
/// spice field in the southeast.
fn desert_terrain(columns: u32, rows: u32) -> Vec<Command> {
    let mut commands = Vec::new();
    for y in 1..=rows as i32 {
        for x in 1..=columns as i32 {
            let terrain = if (x + y) % 7 == 0 {
                TerrainKind::Rock
            } else if x > (columns as i32 * 3) / 4 && y > (rows as i32 * 3) / 4 {
                TerrainKind::Spice
            } else {
                TerrainKind::Sand
            };
            commands.push(Command::PaintTerrain {
                cell: MapCoordinate::new(x, y),
                terrain,
            });
        }
    }
    commands
}
