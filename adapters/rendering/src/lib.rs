#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Sandrift adapters.
//!
//! Backends receive a [`Scene`]: flat lists of visible tiles and entity
//! sprites already filtered through a player's shroud. Anything the player
//! has not uncovered simply never reaches the backend.

use anyhow::{bail, Result as AnyResult};
use glam::Vec2;
use sandrift_core::{
    EntityId, MapCoordinate, MapView, ShroudView, StructureView, TerrainKind, UnitView,
};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

const SAND_COLOR: Color = Color::from_rgb_u8(194, 161, 92);
const ROCK_COLOR: Color = Color::from_rgb_u8(120, 105, 86);
const MOUNTAIN_COLOR: Color = Color::from_rgb_u8(82, 74, 64);
const SPICE_COLOR: Color = Color::from_rgb_u8(176, 82, 28);
const SPICE_HILL_COLOR: Color = Color::from_rgb_u8(140, 58, 18);
const EMPTY_COLOR: Color = Color::from_rgb_u8(24, 24, 24);
const UNIT_COLOR: Color = Color::from_rgb_u8(64, 110, 180);
const STRUCTURE_COLOR: Color = Color::from_rgb_u8(96, 96, 110);

/// Fill color for a terrain kind in the flat-shaded backend.
#[must_use]
pub const fn terrain_color(terrain: TerrainKind) -> Color {
    match terrain {
        TerrainKind::Sand => SAND_COLOR,
        TerrainKind::Rock => ROCK_COLOR,
        TerrainKind::Mountain => MOUNTAIN_COLOR,
        TerrainKind::Spice => SPICE_COLOR,
        TerrainKind::SpiceHill => SPICE_HILL_COLOR,
        TerrainKind::Empty => EMPTY_COLOR,
    }
}

/// A single visible terrain tile ready for the backend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileInstance {
    /// Cell the tile covers.
    pub cell: MapCoordinate,
    /// Top-left corner in pixels.
    pub position: Vec2,
    /// Flat fill color derived from the terrain.
    pub color: Color,
}

/// A single visible entity sprite ready for the backend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteInstance {
    /// Entity the sprite depicts.
    pub entity: EntityId,
    /// Top-left corner in pixels, sub-tile offset included.
    pub position: Vec2,
    /// Sprite extent in pixels.
    pub size: Vec2,
    /// Row selected in the entity's sprite sheet: facing for units,
    /// animation frame for structures.
    pub frame_row: u32,
    /// Tint, lightened while the entity is selected.
    pub color: Color,
}

/// Everything a backend needs to present one frame for one player.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// Visible terrain tiles in row-major order.
    pub tiles: Vec<TileInstance>,
    /// Visible entity sprites, units before structures, ordered by id.
    pub sprites: Vec<SpriteInstance>,
}

/// Assembles the visible scene for one player.
///
/// Tiles and entities under the player's shroud are dropped here rather than
/// dimmed by the backend; a structure stays visible while any cell of its
/// footprint is uncovered. Fails when the shroud bitmap was built for a
/// different grid.
pub fn build_scene<F>(
    map_view: MapView,
    shroud: &ShroudView<'_>,
    units: &UnitView,
    structures: &StructureView,
    terrain_at: F,
) -> AnyResult<Scene>
where
    F: Fn(MapCoordinate) -> TerrainKind,
{
    let expected = (map_view.bordered_columns(), map_view.bordered_rows());
    if shroud.dimensions() != expected {
        bail!(
            "shroud bitmap is {:?} but the bordered grid is {:?}",
            shroud.dimensions(),
            expected
        );
    }

    let tile_size = map_view.tile_size();
    let tile = tile_size.get() as f32;

    let mut tiles = Vec::new();
    for y in 1..=map_view.rows() as i32 {
        for x in 1..=map_view.columns() as i32 {
            let cell = MapCoordinate::new(x, y);
            if shroud.is_hidden(cell) {
                continue;
            }
            let origin = cell.to_coordinate(tile_size);
            tiles.push(TileInstance {
                cell,
                position: Vec2::new(origin.x() as f32, origin.y() as f32),
                color: terrain_color(terrain_at(cell)),
            });
        }
    }

    let mut sprites = Vec::new();
    for unit in units.iter() {
        if shroud.is_hidden(unit.cell) {
            continue;
        }
        let color = if unit.selected {
            UNIT_COLOR.lighten(0.4)
        } else {
            UNIT_COLOR
        };
        sprites.push(SpriteInstance {
            entity: unit.id,
            position: Vec2::new(
                unit.position.x() as f32 + unit.offset.x,
                unit.position.y() as f32 + unit.offset.y,
            ),
            size: Vec2::splat(tile),
            frame_row: unit.facing.sprite_row(),
            color,
        });
    }
    for structure in structures.iter() {
        if structure.footprint.cells().all(|cell| shroud.is_hidden(cell)) {
            continue;
        }
        let origin = structure.footprint.origin().to_coordinate(tile_size);
        let color = if structure.selected {
            STRUCTURE_COLOR.lighten(0.4)
        } else {
            STRUCTURE_COLOR
        };
        sprites.push(SpriteInstance {
            entity: structure.id,
            position: Vec2::new(origin.x() as f32, origin.y() as f32),
            size: Vec2::new(
                structure.footprint.width_in_cells() as f32 * tile,
                structure.footprint.height_in_cells() as f32 * tile,
            ),
            frame_row: structure.animation_frame,
            color,
        });
    }

    Ok(Scene { tiles, sprites })
}
