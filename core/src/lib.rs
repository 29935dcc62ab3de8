#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Sandrift engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.
//!
//! It also owns the coordinate vocabulary: absolute pixel positions
//! ([`Coordinate`]), discrete cell indices ([`MapCoordinate`]), and the
//! [`TileSize`] that converts between the two. The playable area of a map is
//! 1-based; a one-cell invisible border surrounds it on every side, so a map
//! of 64x64 cells is stored as 66x66.

use std::cmp::Ordering;
use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Side length of a square map cell measured in pixels.
///
/// Supplied once at map construction and threaded explicitly into every
/// component that converts between pixels and cells, rather than living in a
/// process-global.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileSize(u32);

impl TileSize {
    /// Conventional 32 pixels per cell used by the stock assets.
    pub const DEFAULT: TileSize = TileSize(32);

    /// Creates a tile size; zero collapses to the default so that pixel/cell
    /// division stays total.
    #[must_use]
    pub const fn new(pixels: u32) -> Self {
        if pixels == 0 {
            Self::DEFAULT
        } else {
            Self(pixels)
        }
    }

    /// Side length in pixels.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Half a tile in pixels, used to locate cell centers.
    #[must_use]
    pub const fn half(&self) -> u32 {
        self.0 / 2
    }
}

/// Absolute position expressed in pixels relative to the bordered grid origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    x: i32,
    y: i32,
}

impl Coordinate {
    /// Creates a new pixel coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal pixel component.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical pixel component.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the coordinate displaced by the provided pixel deltas.
    #[must_use]
    pub const fn translated(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Converts to the cell containing this pixel using truncating division.
    ///
    /// Truncates rather than floors, so pixels just left of the grid resolve
    /// toward cell zero; callers that may probe outside the grid pair this
    /// with a clamped lookup.
    #[must_use]
    pub fn to_map_coordinate(self, tile_size: TileSize) -> MapCoordinate {
        let tile = tile_size.get() as i32;
        MapCoordinate::new(self.x / tile, self.y / tile)
    }
}

/// Discrete cell index into the bordered grid.
///
/// Playable cells run from `(1, 1)` to `(columns, rows)`; index 0 and
/// `columns + 1` / `rows + 1` address the invisible border. Values outside
/// that range are legal to construct — geometric sampling probes them — and
/// are resolved by the grid's clamped or safe accessors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MapCoordinate {
    x: i32,
    y: i32,
}

impl MapCoordinate {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal cell index.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical cell index.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the cell displaced by the provided cell deltas.
    #[must_use]
    pub const fn translated(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Pixel coordinate of this cell's top-left corner.
    #[must_use]
    pub fn to_coordinate(self, tile_size: TileSize) -> Coordinate {
        let tile = tile_size.get() as i32;
        Coordinate::new(self.x * tile, self.y * tile)
    }

    /// Pixel coordinate of this cell's center.
    #[must_use]
    pub fn center_in_pixels(self, tile_size: TileSize) -> Coordinate {
        let half = tile_size.half() as i32;
        self.to_coordinate(tile_size).translated(half, half)
    }
}

/// One of the eight compass directions a unit can face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// Toward decreasing y.
    Up,
    /// Toward increasing x, decreasing y.
    RightUp,
    /// Toward increasing x.
    Right,
    /// Toward increasing x and y.
    RightDown,
    /// Toward increasing y.
    Down,
    /// Toward decreasing x, increasing y.
    LeftDown,
    /// Toward decreasing x.
    Left,
    /// Toward decreasing x and y.
    LeftUp,
}

impl Facing {
    /// Classifies the facing for a move from `from` toward `to`.
    ///
    /// Each axis contributes only its sign, yielding a 3x3 decision table
    /// whose center — source equals destination — is `None`, meaning the
    /// caller keeps its prior facing. Evaluated once per move order, never
    /// per tick.
    #[must_use]
    pub fn between(from: Coordinate, to: Coordinate) -> Option<Facing> {
        match (to.x().cmp(&from.x()), to.y().cmp(&from.y())) {
            (Ordering::Equal, Ordering::Equal) => None,
            (Ordering::Equal, Ordering::Less) => Some(Self::Up),
            (Ordering::Greater, Ordering::Less) => Some(Self::RightUp),
            (Ordering::Greater, Ordering::Equal) => Some(Self::Right),
            (Ordering::Greater, Ordering::Greater) => Some(Self::RightDown),
            (Ordering::Equal, Ordering::Greater) => Some(Self::Down),
            (Ordering::Less, Ordering::Greater) => Some(Self::LeftDown),
            (Ordering::Less, Ordering::Equal) => Some(Self::Left),
            (Ordering::Less, Ordering::Less) => Some(Self::LeftUp),
        }
    }

    /// Row index into a directional sprite sheet.
    #[must_use]
    pub const fn sprite_row(self) -> u32 {
        match self {
            Self::Up => 0,
            Self::RightUp => 1,
            Self::Right => 2,
            Self::RightDown => 3,
            Self::Down => 4,
            Self::LeftDown => 5,
            Self::Left => 6,
            Self::LeftUp => 7,
        }
    }
}

/// Terrain occupying a single map cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainKind {
    /// Unassigned terrain; every cell starts here at map construction.
    Empty,
    /// Open sand.
    Sand,
    /// Buildable rock.
    Rock,
    /// Impassable mountain.
    Mountain,
    /// Harvestable spice field.
    Spice,
    /// Dense spice mound.
    SpiceHill,
}

impl TerrainKind {
    /// Single-character code used by the ASCII terrain dump.
    ///
    /// The mapping is a golden-output contract: `S` sand, `R` rock,
    /// `M` mountain, `#` spice, `H` spice hill, `?` anything else.
    #[must_use]
    pub const fn ascii_code(self) -> char {
        match self {
            Self::Sand => 'S',
            Self::Rock => 'R',
            Self::Mountain => 'M',
            Self::Spice => '#',
            Self::SpiceHill => 'H',
            Self::Empty => '?',
        }
    }
}

/// Edge classification of a terrain cell against its four neighbours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TerrainFacing {
    /// No neighbour shares this cell's terrain.
    Middle,
    /// All four neighbours share this cell's terrain.
    Full,
    /// Only the cell above differs.
    Top,
    /// Only the cell to the right differs.
    Right,
    /// Only the cell below differs.
    Bottom,
    /// Only the cell to the left differs.
    Left,
    /// The cells above and to the right differ.
    TopRight,
    /// The cells below and to the right differ.
    BottomRight,
    /// The cells below and to the left differ.
    BottomLeft,
    /// The cells above and to the left differ.
    TopLeft,
}

/// Classifies a cell's edge exposure from same-terrain flags for the four
/// cardinal neighbours.
///
/// Combinations with opposite or three differing sides have no dedicated
/// tile and fall back to [`TerrainFacing::Middle`]. Which sprite a facing
/// selects is a renderer concern; only the classification lives here.
#[must_use]
pub const fn terrain_facing(
    same_up: bool,
    same_right: bool,
    same_down: bool,
    same_left: bool,
) -> TerrainFacing {
    match (same_up, same_right, same_down, same_left) {
        (true, true, true, true) => TerrainFacing::Full,
        (false, true, true, true) => TerrainFacing::Top,
        (true, false, true, true) => TerrainFacing::Right,
        (true, true, false, true) => TerrainFacing::Bottom,
        (true, true, true, false) => TerrainFacing::Left,
        (false, false, true, true) => TerrainFacing::TopRight,
        (true, false, false, true) => TerrainFacing::BottomRight,
        (true, true, false, false) => TerrainFacing::BottomLeft,
        (false, true, true, false) => TerrainFacing::TopLeft,
        _ => TerrainFacing::Middle,
    }
}

/// Unique identifier assigned to a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Creates a new player identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an entity (unit or structure).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Axis-aligned rectangular block of cells anchored at its top-left cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellBlock {
    origin: MapCoordinate,
    width_in_cells: u32,
    height_in_cells: u32,
}

impl CellBlock {
    /// Constructs a block from an origin cell and explicit cell dimensions.
    #[must_use]
    pub const fn new(origin: MapCoordinate, width_in_cells: u32, height_in_cells: u32) -> Self {
        Self {
            origin,
            width_in_cells,
            height_in_cells,
        }
    }

    /// Derives the block covered by an entity with the given pixel footprint.
    ///
    /// Dimensions round up to whole cells and never collapse below one cell,
    /// so a 48x16 px entity on 32 px tiles occupies a 2x1 block.
    #[must_use]
    pub fn from_pixel_footprint(
        origin: MapCoordinate,
        width_px: u32,
        height_px: u32,
        tile_size: TileSize,
    ) -> Self {
        let tile = tile_size.get();
        Self::new(
            origin,
            width_px.div_ceil(tile).max(1),
            height_px.div_ceil(tile).max(1),
        )
    }

    /// Top-left cell that anchors the block.
    #[must_use]
    pub const fn origin(&self) -> MapCoordinate {
        self.origin
    }

    /// Width of the block in whole cells.
    #[must_use]
    pub const fn width_in_cells(&self) -> u32 {
        self.width_in_cells
    }

    /// Height of the block in whole cells.
    #[must_use]
    pub const fn height_in_cells(&self) -> u32 {
        self.height_in_cells
    }

    /// Iterates the cells of the block in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = MapCoordinate> + '_ {
        let origin = self.origin;
        let width = self.width_in_cells as i32;
        let height = self.height_in_cells as i32;
        (0..height).flat_map(move |dy| (0..width).map(move |dx| origin.translated(dx, dy)))
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Rebuilds the map grid with the provided playable dimensions.
    ConfigureMap {
        /// Playable columns; storage adds the one-cell border on each side.
        columns: u32,
        /// Playable rows; storage adds the one-cell border on each side.
        rows: u32,
        /// Pixel length of a cell edge, threaded into all conversions.
        tile_size: TileSize,
    },
    /// Registers a player, allocating a fully hidden shroud for them.
    RegisterPlayer {
        /// Identifier chosen by the caller for the new player.
        player: PlayerId,
    },
    /// Assigns terrain to a single cell during scenario setup.
    PaintTerrain {
        /// Cell receiving the terrain.
        cell: MapCoordinate,
        /// Terrain to store in the cell.
        terrain: TerrainKind,
    },
    /// Spawns a mobile unit occupying a single cell.
    SpawnUnit {
        /// Owning player.
        player: PlayerId,
        /// Playable cell the unit starts in.
        cell: MapCoordinate,
        /// Movement speed in pixels per second.
        speed: f32,
        /// Sight radius in cells.
        sight: u32,
        /// Starting hit points.
        hit_points: u32,
    },
    /// Places a static structure with a pixel-sized footprint.
    PlaceStructure {
        /// Owning player.
        player: PlayerId,
        /// Top-left playable cell of the structure.
        cell: MapCoordinate,
        /// Footprint width in pixels.
        width_px: u32,
        /// Footprint height in pixels.
        height_px: u32,
        /// Sight radius in cells.
        sight: u32,
        /// Starting hit points.
        hit_points: u32,
    },
    /// Orders a unit to move in a straight line toward a destination cell.
    MoveUnit {
        /// Unit receiving the order.
        unit: EntityId,
        /// Destination cell; equal to the current cell leaves the unit idle.
        destination: MapCoordinate,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time elapsed since the previous tick.
        dt: Duration,
    },
    /// Idempotently reveals a single cell in a player's shroud.
    RevealCell {
        /// Player whose shroud is mutated.
        player: PlayerId,
        /// Cell to reveal; out-of-range cells are ignored.
        cell: MapCoordinate,
    },
    /// Reveals the entire map for a player (debug/victory path).
    RevealAll {
        /// Player whose shroud is cleared.
        player: PlayerId,
    },
    /// Applies damage to an entity's hit points.
    DealDamage {
        /// Entity taking the damage.
        entity: EntityId,
        /// Hit points removed, saturating at zero.
        amount: u32,
    },
    /// Marks an entity as selected, starting its selection fade pulse.
    Select {
        /// Entity to select.
        entity: EntityId,
    },
    /// Clears an entity's selection.
    Deselect {
        /// Entity to deselect.
        entity: EntityId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the map grid was rebuilt.
    MapConfigured {
        /// Playable columns of the new grid.
        columns: u32,
        /// Playable rows of the new grid.
        rows: u32,
        /// Tile size the grid was built with.
        tile_size: TileSize,
    },
    /// Confirms that a player joined with a fully hidden shroud.
    PlayerRegistered {
        /// Identifier of the new player.
        player: PlayerId,
    },
    /// Confirms that a unit entered the world.
    UnitSpawned {
        /// Identifier assigned to the unit.
        unit: EntityId,
        /// Owning player.
        player: PlayerId,
        /// Cell the unit occupies after spawning.
        cell: MapCoordinate,
    },
    /// Confirms that a structure was placed.
    StructurePlaced {
        /// Identifier assigned to the structure.
        structure: EntityId,
        /// Owning player.
        player: PlayerId,
        /// Block of cells covered by the structure.
        footprint: CellBlock,
    },
    /// Confirms that a move order was accepted and a facing derived.
    MoveOrdered {
        /// Unit that received the order.
        unit: EntityId,
        /// Cell the unit occupied when ordered.
        from: MapCoordinate,
        /// Destination cell of the order.
        to: MapCoordinate,
        /// Facing held for the whole traversal.
        facing: Facing,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a unit finished a move and snapped into a new cell.
    UnitAdvanced {
        /// Unit that arrived.
        unit: EntityId,
        /// Cell the unit occupied before the move.
        from: MapCoordinate,
        /// Cell the unit occupies now.
        to: MapCoordinate,
    },
    /// Reports that an entity's hit points reached zero.
    EntityDestroyed {
        /// Entity that was destroyed.
        entity: EntityId,
    },
}

/// Immutable description of the map grid shared with systems and adapters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapView {
    columns: u32,
    rows: u32,
    tile_size: TileSize,
}

impl MapView {
    /// Creates a new map view from playable dimensions.
    #[must_use]
    pub const fn new(columns: u32, rows: u32, tile_size: TileSize) -> Self {
        Self {
            columns,
            rows,
            tile_size,
        }
    }

    /// Playable columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Playable rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Tile size the grid was built with.
    #[must_use]
    pub const fn tile_size(&self) -> TileSize {
        self.tile_size
    }

    /// Columns including the invisible border.
    #[must_use]
    pub const fn bordered_columns(&self) -> u32 {
        self.columns + 2
    }

    /// Rows including the invisible border.
    #[must_use]
    pub const fn bordered_rows(&self) -> u32 {
        self.rows + 2
    }

    /// Clamps each axis independently into the bordered range
    /// `[0, columns + 1] x [0, rows + 1]`.
    #[must_use]
    pub fn clamp(&self, cell: MapCoordinate) -> MapCoordinate {
        let x = cell.x().clamp(0, self.columns as i32 + 1);
        let y = cell.y().clamp(0, self.rows as i32 + 1);
        MapCoordinate::new(x, y)
    }

    /// True iff the cell lies within the 1-based playable area.
    #[must_use]
    pub fn is_within_playable_bounds(&self, cell: MapCoordinate) -> bool {
        cell.x() >= 1
            && cell.x() <= self.columns as i32
            && cell.y() >= 1
            && cell.y() <= self.rows as i32
    }
}

/// Immutable representation of a single unit's state used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitSnapshot {
    /// Unique identifier assigned to the unit.
    pub id: EntityId,
    /// Owning player.
    pub player: PlayerId,
    /// Cell the unit currently occupies.
    pub cell: MapCoordinate,
    /// Pixel coordinate of the occupied cell, always a tile multiple.
    pub position: Coordinate,
    /// Sub-tile pixel displacement from the occupied cell.
    pub offset: Vec2,
    /// Pixel coordinate of the destination cell; equals `position` when idle.
    pub target: Coordinate,
    /// Facing held since the last move order.
    pub facing: Facing,
    /// Sight radius in cells.
    pub sight: u32,
    /// Movement speed in pixels per second.
    pub speed: f32,
    /// Remaining hit points.
    pub hit_points: u32,
    /// Whether the unit is currently selected.
    pub selected: bool,
    /// Whether the unit is mid-traversal toward its target.
    pub moving: bool,
}

/// Read-only snapshot describing all units in the world.
#[derive(Clone, Debug, Default)]
pub struct UnitView {
    snapshots: Vec<UnitSnapshot>,
}

impl UnitView {
    /// Creates a new unit view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<UnitSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured unit snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &UnitSnapshot> {
        self.snapshots.iter()
    }

    /// Finds a unit snapshot by identifier.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&UnitSnapshot> {
        self.snapshots.iter().find(|snapshot| snapshot.id == id)
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<UnitSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single structure's state used for queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructureSnapshot {
    /// Unique identifier assigned to the structure.
    pub id: EntityId,
    /// Owning player.
    pub player: PlayerId,
    /// Block of cells covered by the structure.
    pub footprint: CellBlock,
    /// Sight radius in cells.
    pub sight: u32,
    /// Remaining hit points.
    pub hit_points: u32,
    /// Current idle-animation frame.
    pub animation_frame: u32,
    /// Whether the structure is currently selected.
    pub selected: bool,
}

/// Read-only snapshot describing all structures in the world.
#[derive(Clone, Debug, Default)]
pub struct StructureView {
    snapshots: Vec<StructureSnapshot>,
}

impl StructureView {
    /// Creates a new structure view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<StructureSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured structure snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &StructureSnapshot> {
        self.snapshots.iter()
    }

    /// Finds a structure snapshot by identifier.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&StructureSnapshot> {
        self.snapshots.iter().find(|snapshot| snapshot.id == id)
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<StructureSnapshot> {
        self.snapshots
    }
}

/// Read-only view into a player's shroud bitmap over the bordered grid.
#[derive(Clone, Copy, Debug)]
pub struct ShroudView<'a> {
    hidden: &'a [bool],
    columns: u32,
    rows: u32,
}

impl<'a> ShroudView<'a> {
    /// Captures a new shroud view backed by the provided bitmap slice.
    ///
    /// Dimensions include the invisible border; the slice is row-major.
    #[must_use]
    pub fn new(hidden: &'a [bool], columns: u32, rows: u32) -> Self {
        Self {
            hidden,
            columns,
            rows,
        }
    }

    /// Reports whether the cell is still hidden; out-of-range counts hidden.
    #[must_use]
    pub fn is_hidden(&self, cell: MapCoordinate) -> bool {
        self.index(cell)
            .map_or(true, |index| self.hidden.get(index).copied().unwrap_or(true))
    }

    /// Provides the bordered dimensions of the underlying bitmap.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    fn index(&self, cell: MapCoordinate) -> Option<usize> {
        if cell.x() < 0 || cell.y() < 0 {
            return None;
        }
        let x = cell.x() as u32;
        let y = cell.y() as u32;
        if x >= self.columns || y >= self.rows {
            return None;
        }
        let width = usize::try_from(self.columns).ok()?;
        Some(y as usize * width + x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn tile_size_defaults_to_thirty_two_pixels() {
        assert_eq!(TileSize::DEFAULT.get(), 32);
        assert_eq!(TileSize::new(0), TileSize::DEFAULT);
        assert_eq!(TileSize::new(16).half(), 8);
    }

    #[test]
    fn pixel_and_cell_conversions_are_inverse_on_tile_multiples() {
        let tile = TileSize::DEFAULT;
        let cell = MapCoordinate::new(10, 7);
        let pixels = cell.to_coordinate(tile);
        assert_eq!(pixels, Coordinate::new(320, 224));
        assert_eq!(pixels.to_map_coordinate(tile), cell);
        assert_eq!(cell.center_in_pixels(tile), Coordinate::new(336, 240));
    }

    #[test]
    fn facing_matches_the_sign_table() {
        let origin = Coordinate::new(320, 320);
        let cases = [
            ((0, -1), Facing::Up),
            ((1, -1), Facing::RightUp),
            ((1, 0), Facing::Right),
            ((1, 1), Facing::RightDown),
            ((0, 1), Facing::Down),
            ((-1, 1), Facing::LeftDown),
            ((-1, 0), Facing::Left),
            ((-1, -1), Facing::LeftUp),
        ];
        for ((dx, dy), expected) in cases {
            assert_eq!(
                Facing::between(origin, origin.translated(dx, dy)),
                Some(expected),
                "delta ({dx}, {dy})"
            );
        }
    }

    #[test]
    fn facing_is_unchanged_when_source_equals_destination() {
        let origin = Coordinate::new(320, 320);
        assert_eq!(Facing::between(origin, origin), None);
    }

    #[test]
    fn sprite_rows_cover_all_eight_directions() {
        let mut rows: Vec<u32> = [
            Facing::Up,
            Facing::RightUp,
            Facing::Right,
            Facing::RightDown,
            Facing::Down,
            Facing::LeftDown,
            Facing::Left,
            Facing::LeftUp,
        ]
        .iter()
        .map(|facing| facing.sprite_row())
        .collect();
        rows.sort_unstable();
        assert_eq!(rows, vec![0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn terrain_codes_match_the_dump_contract() {
        assert_eq!(TerrainKind::Sand.ascii_code(), 'S');
        assert_eq!(TerrainKind::Rock.ascii_code(), 'R');
        assert_eq!(TerrainKind::Mountain.ascii_code(), 'M');
        assert_eq!(TerrainKind::Spice.ascii_code(), '#');
        assert_eq!(TerrainKind::SpiceHill.ascii_code(), 'H');
        assert_eq!(TerrainKind::Empty.ascii_code(), '?');
    }

    #[test]
    fn terrain_facing_classifies_isolated_and_surrounded_cells() {
        assert_eq!(
            terrain_facing(false, false, false, false),
            TerrainFacing::Middle
        );
        assert_eq!(terrain_facing(true, true, true, true), TerrainFacing::Full);
    }

    #[test]
    fn terrain_facing_names_the_single_differing_side() {
        assert_eq!(terrain_facing(false, true, true, true), TerrainFacing::Top);
        assert_eq!(
            terrain_facing(true, false, true, true),
            TerrainFacing::Right
        );
        assert_eq!(
            terrain_facing(true, true, false, true),
            TerrainFacing::Bottom
        );
        assert_eq!(terrain_facing(true, true, true, false), TerrainFacing::Left);
    }

    #[test]
    fn terrain_facing_names_adjacent_differing_corners() {
        assert_eq!(
            terrain_facing(false, false, true, true),
            TerrainFacing::TopRight
        );
        assert_eq!(
            terrain_facing(true, false, false, true),
            TerrainFacing::BottomRight
        );
        assert_eq!(
            terrain_facing(true, true, false, false),
            TerrainFacing::BottomLeft
        );
        assert_eq!(
            terrain_facing(false, true, true, false),
            TerrainFacing::TopLeft
        );
    }

    #[test]
    fn cell_block_iterates_row_major() {
        let block = CellBlock::new(MapCoordinate::new(2, 3), 2, 2);
        let cells: Vec<MapCoordinate> = block.cells().collect();
        assert_eq!(
            cells,
            vec![
                MapCoordinate::new(2, 3),
                MapCoordinate::new(3, 3),
                MapCoordinate::new(2, 4),
                MapCoordinate::new(3, 4),
            ]
        );
    }

    #[test]
    fn pixel_footprint_rounds_up_to_whole_cells() {
        let tile = TileSize::DEFAULT;
        let origin = MapCoordinate::new(1, 1);
        let block = CellBlock::from_pixel_footprint(origin, 64, 48, tile);
        assert_eq!(block.width_in_cells(), 2);
        assert_eq!(block.height_in_cells(), 2);

        let sliver = CellBlock::from_pixel_footprint(origin, 16, 1, tile);
        assert_eq!(sliver.width_in_cells(), 1);
        assert_eq!(sliver.height_in_cells(), 1);
    }

    #[test]
    fn map_view_clamps_into_the_bordered_range() {
        let view = MapView::new(4, 3, TileSize::DEFAULT);
        assert_eq!(
            view.clamp(MapCoordinate::new(-7, 2)),
            MapCoordinate::new(0, 2)
        );
        assert_eq!(
            view.clamp(MapCoordinate::new(9, 99)),
            MapCoordinate::new(5, 4)
        );
        assert!(view.is_within_playable_bounds(MapCoordinate::new(1, 1)));
        assert!(view.is_within_playable_bounds(MapCoordinate::new(4, 3)));
        assert!(!view.is_within_playable_bounds(MapCoordinate::new(0, 1)));
        assert!(!view.is_within_playable_bounds(MapCoordinate::new(5, 3)));
    }

    #[test]
    fn shroud_view_treats_out_of_range_as_hidden() {
        let hidden = vec![false; 25];
        let view = ShroudView::new(&hidden, 5, 5);
        assert!(!view.is_hidden(MapCoordinate::new(2, 2)));
        assert!(view.is_hidden(MapCoordinate::new(-1, 2)));
        assert!(view.is_hidden(MapCoordinate::new(5, 2)));
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn map_coordinate_round_trips_through_bincode() {
        assert_round_trip(&MapCoordinate::new(12, -1));
    }

    #[test]
    fn coordinate_round_trips_through_bincode() {
        assert_round_trip(&Coordinate::new(320, 352));
    }

    #[test]
    fn cell_block_round_trips_through_bincode() {
        let block = CellBlock::new(MapCoordinate::new(5, 7), 2, 3);
        assert_round_trip(&block);
    }

    #[test]
    fn identifiers_round_trip_through_bincode() {
        assert_round_trip(&PlayerId::new(1));
        assert_round_trip(&EntityId::new(42));
        assert_round_trip(&TileSize::new(32));
    }
}
