#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic shroud-reveal system driven by world events.
//!
//! Whenever a unit spawns or crosses into a new cell, and whenever a
//! structure is placed, the owner's shroud opens around it. The opening is
//! an approximate circle: concentric pixel rings sampled at whole-degree
//! steps, so large sight radii leave small unrevealed notches between
//! samples. The notches are part of the look and are kept as-is.
//!
//! The system is pure: it reads events and immutable views, and answers
//! with [`Command::RevealCell`] batches. Redundant samples are harmless
//! because revealing is idempotent in the world.

use sandrift_core::{
    Command, Coordinate, Event, MapCoordinate, MapView, PlayerId, StructureView, UnitView,
};

/// Sine and cosine sampled once per whole degree.
///
/// Built once at startup and borrowed by every reveal; the tables are never
/// mutated afterwards.
#[derive(Clone, Debug)]
pub struct DegreeTable {
    sin: [f32; 360],
    cos: [f32; 360],
}

impl DegreeTable {
    /// Computes the 360-entry sine and cosine tables.
    #[must_use]
    pub fn new() -> Self {
        let mut sin = [0.0_f32; 360];
        let mut cos = [0.0_f32; 360];
        for degree in 0..360 {
            let radians = (degree as f32).to_radians();
            sin[degree] = radians.sin();
            cos[degree] = radians.cos();
        }
        Self { sin, cos }
    }
}

impl Default for DegreeTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Pure system that reacts to world events and emits reveal commands.
#[derive(Clone, Debug, Default)]
pub struct Reveal {
    table: DegreeTable,
}

impl Reveal {
    /// Consumes world events and immutable views to emit reveal commands.
    pub fn handle(
        &self,
        events: &[Event],
        unit_view: &UnitView,
        structure_view: &StructureView,
        map_view: MapView,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            match event {
                Event::UnitSpawned { unit, player, cell } => {
                    if let Some(snapshot) = unit_view.get(*unit) {
                        // The occupied cell is uncovered outright; only the
                        // rings depend on sight.
                        out.push(Command::RevealCell {
                            player: *player,
                            cell: map_view.clamp(*cell),
                        });
                        self.reveal_around(*player, *cell, snapshot.sight, map_view, out);
                    }
                }
                Event::UnitAdvanced { unit, to, .. } => {
                    if let Some(snapshot) = unit_view.get(*unit) {
                        out.push(Command::RevealCell {
                            player: snapshot.player,
                            cell: map_view.clamp(*to),
                        });
                        self.reveal_around(snapshot.player, *to, snapshot.sight, map_view, out);
                    }
                }
                Event::StructurePlaced {
                    structure,
                    player,
                    footprint,
                } => {
                    let Some(snapshot) = structure_view.get(*structure) else {
                        continue;
                    };
                    // The footprint itself is always visible to its owner,
                    // whatever the sight radius.
                    for cell in footprint.cells() {
                        out.push(Command::RevealCell {
                            player: *player,
                            cell: map_view.clamp(cell),
                        });
                    }
                    for cell in footprint.cells() {
                        self.reveal_around(*player, cell, snapshot.sight, map_view, out);
                    }
                }
                _ => {}
            }
        }
    }

    /// Opens the shroud in concentric degree-sampled rings around a cell.
    ///
    /// Ring `r` samples a circle of radius `r` tiles around the cell center;
    /// ring zero collapses onto the center cell. A sight radius below one is
    /// a no-op.
    fn reveal_around(
        &self,
        player: PlayerId,
        cell: MapCoordinate,
        sight: u32,
        map_view: MapView,
        out: &mut Vec<Command>,
    ) {
        if sight < 1 {
            return;
        }
        let tile_size = map_view.tile_size();
        let tile = tile_size.get() as f32;
        let center = cell.center_in_pixels(tile_size);
        for ring in 0..sight {
            let radius = ring as f32 * tile;
            for degree in 0..360 {
                let x = (center.x() as f32 + self.table.cos[degree] * radius).ceil() as i32;
                let y = (center.y() as f32 + self.table.sin[degree] * radius).ceil() as i32;
                let sampled = Coordinate::new(x, y).to_map_coordinate(tile_size);
                out.push(Command::RevealCell {
                    player,
                    cell: map_view.clamp(sampled),
                });
            }
        }
    }
}
