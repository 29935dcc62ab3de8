#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Sandrift.
//!
//! The world owns the bordered map grid, one shroud per registered player,
//! and the entity table. Adapters and systems mutate it exclusively through
//! [`apply`], which executes a [`Command`] and pushes resulting [`Event`]s
//! into a caller-owned buffer. The per-tick movement engine lives here:
//! `Command::Tick` advances every living unit's sub-tile offset and reports
//! cell arrivals that downstream systems (shroud reveal) react to.

pub mod map;
mod movement;
pub mod shroud;

use std::time::Duration;

use glam::Vec2;
use sandrift_core::{
    CellBlock, Command, Coordinate, EntityId, Event, Facing, PlayerId, TileSize,
};

use crate::map::Map;
use crate::shroud::Shroud;

const DEFAULT_COLUMNS: u32 = 64;
const DEFAULT_ROWS: u32 = 64;

/// Represents the authoritative Sandrift world state.
#[derive(Debug)]
pub struct World {
    map: Map,
    players: Vec<PlayerState>,
    entities: Vec<Entity>,
    next_entity: u32,
}

impl World {
    /// Creates a new world with the default grid and no players or entities.
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: Map::new(DEFAULT_COLUMNS, DEFAULT_ROWS, TileSize::DEFAULT),
            players: Vec::new(),
            entities: Vec::new(),
            next_entity: 0,
        }
    }

    fn allocate_entity_id(&mut self) -> EntityId {
        let id = EntityId::new(self.next_entity);
        self.next_entity = self.next_entity.saturating_add(1);
        id
    }

    fn player_mut(&mut self, player: PlayerId) -> Option<&mut PlayerState> {
        self.players.iter_mut().find(|state| state.id == player)
    }

    fn has_player(&self, player: PlayerId) -> bool {
        self.players.iter().any(|state| state.id == player)
    }

    fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id == id)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureMap {
            columns,
            rows,
            tile_size,
        } => {
            world.map = Map::new(columns, rows, tile_size);
            world.entities.clear();
            for player in world.players.iter_mut() {
                player.shroud = Shroud::new_hidden(columns, rows);
            }
            out_events.push(Event::MapConfigured {
                columns,
                rows,
                tile_size,
            });
        }
        Command::RegisterPlayer { player } => {
            if world.has_player(player) {
                return;
            }
            let shroud = Shroud::new_hidden(world.map.columns(), world.map.rows());
            world.players.push(PlayerState { id: player, shroud });
            out_events.push(Event::PlayerRegistered { player });
        }
        Command::PaintTerrain { cell, terrain } => {
            // Scenario setup affordance; stray cells are ignored.
            let _ = world.map.set_terrain(cell, terrain);
        }
        Command::SpawnUnit {
            player,
            cell,
            speed,
            sight,
            hit_points,
        } => {
            if !world.has_player(player) || !world.map.is_within_playable_bounds(cell) {
                return;
            }
            let position = cell.to_coordinate(world.map.tile_size());
            let id = world.allocate_entity_id();
            world.entities.push(Entity {
                id,
                player,
                position,
                sight,
                hit_points: HitPointPool::new(hit_points),
                selection: FadingSelection::new(),
                kind: EntityKind::Unit(UnitMotion {
                    offset: Vec2::ZERO,
                    target: position,
                    facing: Facing::Right,
                    speed,
                }),
            });
            out_events.push(Event::UnitSpawned {
                unit: id,
                player,
                cell,
            });
        }
        Command::PlaceStructure {
            player,
            cell,
            width_px,
            height_px,
            sight,
            hit_points,
        } => {
            let tile_size = world.map.tile_size();
            let footprint = CellBlock::from_pixel_footprint(cell, width_px, height_px, tile_size);
            if !world.has_player(player)
                || !world.map.is_within_playable_bounds(cell)
                || world.map.cells_occupied_by(&footprint).is_err()
            {
                return;
            }
            let position = cell.to_coordinate(tile_size);
            let id = world.allocate_entity_id();
            world.entities.push(Entity {
                id,
                player,
                position,
                sight,
                hit_points: HitPointPool::new(hit_points),
                selection: FadingSelection::new(),
                kind: EntityKind::Structure(StructureBody {
                    footprint,
                    animation: AnimationTimer::new(),
                }),
            });
            out_events.push(Event::StructurePlaced {
                structure: id,
                player,
                footprint,
            });
        }
        Command::MoveUnit { unit, destination } => {
            let tile_size = world.map.tile_size();
            let Some(entity) = world.entity_mut(unit) else {
                return;
            };
            if entity.hit_points.is_destroyed() {
                return;
            }
            let position = entity.position;
            let EntityKind::Unit(motion) = &mut entity.kind else {
                return;
            };
            motion.target = destination.to_coordinate(tile_size);
            // Cancelling back onto the occupied cell snaps the sub-tile
            // offset; idle means target == position with a zero offset.
            if motion.target == position {
                motion.offset = Vec2::ZERO;
            }
            // Facing is derived once per order and held for the traversal;
            // a zero delta keeps the prior facing.
            if let Some(facing) = Facing::between(position, motion.target) {
                motion.facing = facing;
            }
            let facing = motion.facing;
            out_events.push(Event::MoveOrdered {
                unit,
                from: position.to_map_coordinate(tile_size),
                to: destination,
                facing,
            });
        }
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
            tick_entities(world, dt, out_events);
        }
        Command::RevealCell { player, cell } => {
            if let Some(state) = world.player_mut(player) {
                state.shroud.reveal_at(cell);
            }
        }
        Command::RevealAll { player } => {
            if let Some(state) = world.player_mut(player) {
                state.shroud.reveal_everything();
            }
        }
        Command::DealDamage { entity, amount } => {
            let Some(target) = world.entity_mut(entity) else {
                return;
            };
            if target.hit_points.is_destroyed() {
                return;
            }
            target.hit_points.take_damage(amount);
            if target.hit_points.is_destroyed() {
                out_events.push(Event::EntityDestroyed { entity });
            }
        }
        Command::Select { entity } => {
            if let Some(target) = world.entity_mut(entity) {
                if !target.hit_points.is_destroyed() {
                    target.selection.select();
                }
            }
        }
        Command::Deselect { entity } => {
            if let Some(target) = world.entity_mut(entity) {
                target.selection.deselect();
            }
        }
    }
}

fn tick_entities(world: &mut World, dt: Duration, out_events: &mut Vec<Event>) {
    let tile_size = world.map.tile_size();
    for entity in world.entities.iter_mut() {
        // Destroyed entities are skipped at the top of the tick with no
        // partial side effects.
        if entity.hit_points.is_destroyed() {
            continue;
        }
        entity.selection.update(dt);
        match &mut entity.kind {
            EntityKind::Unit(motion) => {
                if motion.target == entity.position {
                    continue;
                }
                let outcome = movement::advance(
                    entity.position,
                    motion.offset,
                    motion.target,
                    motion.speed,
                    dt,
                    tile_size,
                );
                let from = entity.position.to_map_coordinate(tile_size);
                entity.position = outcome.position;
                motion.offset = outcome.offset;
                let to = entity.position.to_map_coordinate(tile_size);
                if to != from {
                    out_events.push(Event::UnitAdvanced {
                        unit: entity.id,
                        from,
                        to,
                    });
                }
            }
            EntityKind::Structure(body) => {
                body.animation.update(dt);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{EntityKind, World};
    use crate::map::Map;
    use sandrift_core::{
        MapView, PlayerId, ShroudView, StructureSnapshot, StructureView, UnitSnapshot, UnitView,
    };

    /// Provides read-only access to the map grid.
    #[must_use]
    pub fn map(world: &World) -> &Map {
        &world.map
    }

    /// Captures an immutable description of the grid for systems and adapters.
    #[must_use]
    pub fn map_view(world: &World) -> MapView {
        world.map.view()
    }

    /// Captures a read-only view of all units in deterministic order.
    #[must_use]
    pub fn unit_view(world: &World) -> UnitView {
        let tile_size = world.map.tile_size();
        let snapshots: Vec<UnitSnapshot> = world
            .entities
            .iter()
            .filter_map(|entity| match &entity.kind {
                EntityKind::Unit(motion) => Some(UnitSnapshot {
                    id: entity.id,
                    player: entity.player,
                    cell: entity.position.to_map_coordinate(tile_size),
                    position: entity.position,
                    offset: motion.offset,
                    target: motion.target,
                    facing: motion.facing,
                    sight: entity.sight,
                    speed: motion.speed,
                    hit_points: entity.hit_points.current(),
                    selected: entity.selection.is_selected(),
                    moving: motion.target != entity.position,
                }),
                EntityKind::Structure(_) => None,
            })
            .collect();
        UnitView::from_snapshots(snapshots)
    }

    /// Captures a read-only view of all structures in deterministic order.
    #[must_use]
    pub fn structure_view(world: &World) -> StructureView {
        let snapshots: Vec<StructureSnapshot> = world
            .entities
            .iter()
            .filter_map(|entity| match &entity.kind {
                EntityKind::Structure(body) => Some(StructureSnapshot {
                    id: entity.id,
                    player: entity.player,
                    footprint: body.footprint,
                    sight: entity.sight,
                    hit_points: entity.hit_points.current(),
                    animation_frame: body.animation.frame(),
                    selected: entity.selection.is_selected(),
                }),
                EntityKind::Unit(_) => None,
            })
            .collect();
        StructureView::from_snapshots(snapshots)
    }

    /// Borrows the shroud bitmap of a registered player.
    #[must_use]
    pub fn shroud_view(world: &World, player: PlayerId) -> Option<ShroudView<'_>> {
        world
            .players
            .iter()
            .find(|state| state.id == player)
            .map(|state| state.shroud.view())
    }

    /// ASCII dump of the playable terrain, one row per line.
    #[must_use]
    pub fn terrain_ascii(world: &World) -> String {
        world.map.terrain_ascii()
    }

    /// ASCII dump of a player's shroud: `#` hidden, `.` revealed.
    #[must_use]
    pub fn shroud_ascii(world: &World, player: PlayerId) -> Option<String> {
        world
            .players
            .iter()
            .find(|state| state.id == player)
            .map(|state| world.map.shroud_ascii(&state.shroud))
    }
}

#[derive(Debug)]
struct PlayerState {
    id: PlayerId,
    shroud: Shroud,
}

/// World-side entity record: shared fields plus a variant payload and
/// independently owned capability sub-records.
#[derive(Clone, Debug)]
struct Entity {
    id: EntityId,
    player: PlayerId,
    position: Coordinate,
    sight: u32,
    hit_points: HitPointPool,
    selection: FadingSelection,
    kind: EntityKind,
}

#[derive(Clone, Debug)]
enum EntityKind {
    Unit(UnitMotion),
    Structure(StructureBody),
}

#[derive(Clone, Debug)]
struct UnitMotion {
    offset: Vec2,
    target: Coordinate,
    facing: Facing,
    speed: f32,
}

#[derive(Clone, Debug)]
struct StructureBody {
    footprint: CellBlock,
    animation: AnimationTimer,
}

/// Hit-point based destructibility, attachable to any entity variant.
#[derive(Clone, Debug)]
struct HitPointPool {
    current: u32,
}

impl HitPointPool {
    fn new(hit_points: u32) -> Self {
        Self {
            current: hit_points,
        }
    }

    fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    fn is_destroyed(&self) -> bool {
        self.current == 0
    }

    fn current(&self) -> u32 {
        self.current
    }
}

const SELECTION_FADE_PER_SECOND: f32 = 2.0;
const SELECTION_MIN_INTENSITY: f32 = 0.25;

/// Selection marker with a fading pulse, attachable to any entity variant.
#[derive(Clone, Debug)]
struct FadingSelection {
    selected: bool,
    intensity: f32,
    fading_out: bool,
}

impl FadingSelection {
    fn new() -> Self {
        Self {
            selected: false,
            intensity: 1.0,
            fading_out: true,
        }
    }

    fn select(&mut self) {
        self.selected = true;
        self.intensity = 1.0;
        self.fading_out = true;
    }

    fn deselect(&mut self) {
        self.selected = false;
    }

    fn update(&mut self, dt: Duration) {
        if !self.selected {
            return;
        }
        let step = SELECTION_FADE_PER_SECOND * dt.as_secs_f32();
        if self.fading_out {
            self.intensity -= step;
            if self.intensity <= SELECTION_MIN_INTENSITY {
                self.intensity = SELECTION_MIN_INTENSITY;
                self.fading_out = false;
            }
        } else {
            self.intensity += step;
            if self.intensity >= 1.0 {
                self.intensity = 1.0;
                self.fading_out = true;
            }
        }
    }

    fn is_selected(&self) -> bool {
        self.selected
    }
}

const ANIMATION_FRAME_COUNT: u32 = 2;
const ANIMATION_FRAMES_PER_SECOND: f32 = 5.0;

/// Structure idle animation: wrapped frame accumulator.
#[derive(Clone, Debug)]
struct AnimationTimer {
    timer: f32,
}

impl AnimationTimer {
    fn new() -> Self {
        Self { timer: 0.0 }
    }

    fn update(&mut self, dt: Duration) {
        self.timer = (self.timer + dt.as_secs_f32() * ANIMATION_FRAMES_PER_SECOND)
            % ANIMATION_FRAME_COUNT as f32;
    }

    fn frame(&self) -> u32 {
        self.timer as u32
    }
}
