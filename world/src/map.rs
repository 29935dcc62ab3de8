//! Bordered cell grid owned by the world.

use sandrift_core::{CellBlock, Coordinate, MapCoordinate, MapView, TerrainKind, TileSize};
use thiserror::Error;

use crate::shroud::Shroud;

/// Errors raised by the strict grid accessors.
///
/// Only programmer errors reach this type; callers that legitimately probe
/// outside the grid use the clamped or safe accessors instead.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MapError {
    /// Lookup outside the bordered grid.
    #[error(
        "cell ({x}, {y}) is out of bounds; valid range is 0..={max_x} wide, 0..={max_y} high"
    )]
    OutOfBounds {
        /// Offending horizontal index.
        x: i32,
        /// Offending vertical index.
        y: i32,
        /// Largest valid horizontal index (playable columns + 1).
        max_x: i32,
        /// Largest valid vertical index (playable rows + 1).
        max_y: i32,
    },
}

/// A single cell of the map grid.
///
/// Cells are created once at map construction, never destroyed during a
/// session, and referenced (not owned) by the entities occupying them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    coordinate: MapCoordinate,
    terrain: TerrainKind,
}

impl Cell {
    /// Cell index within the bordered grid.
    #[must_use]
    pub const fn coordinate(&self) -> MapCoordinate {
        self.coordinate
    }

    /// Terrain stored in the cell.
    #[must_use]
    pub const fn terrain(&self) -> TerrainKind {
        self.terrain
    }
}

/// The game map: a dense grid of cells with a one-cell invisible border.
///
/// A map of `columns x rows` playable cells allocates
/// `(columns + 2) x (rows + 2)` storage; the border absorbs clamped lookups
/// and shroud reveals so geometric code never needs edge special cases.
#[derive(Clone, Debug)]
pub struct Map {
    columns: u32,
    rows: u32,
    tile_size: TileSize,
    cells: Vec<Cell>,
}

impl Map {
    /// Pre-allocates the bordered grid with empty terrain in row-major order.
    #[must_use]
    pub fn new(columns: u32, rows: u32, tile_size: TileSize) -> Self {
        let bordered_columns = columns as i32 + 2;
        let bordered_rows = rows as i32 + 2;
        let mut cells = Vec::with_capacity((bordered_columns * bordered_rows) as usize);
        for y in 0..bordered_rows {
            for x in 0..bordered_columns {
                cells.push(Cell {
                    coordinate: MapCoordinate::new(x, y),
                    terrain: TerrainKind::Empty,
                });
            }
        }
        Self {
            columns,
            rows,
            tile_size,
            cells,
        }
    }

    /// Playable width of the map in cells.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Playable height of the map in cells.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Tile size the map was constructed with.
    #[must_use]
    pub const fn tile_size(&self) -> TileSize {
        self.tile_size
    }

    /// Captures an immutable description of the grid for systems and adapters.
    #[must_use]
    pub const fn view(&self) -> MapView {
        MapView::new(self.columns, self.rows, self.tile_size)
    }

    /// Strict accessor: the cell at `(x, y)` or [`MapError::OutOfBounds`]
    /// naming the offending coordinate and the valid range.
    pub fn cell_at(&self, x: i32, y: i32) -> Result<&Cell, MapError> {
        self.index(x, y)
            .map(|index| &self.cells[index])
            .ok_or(MapError::OutOfBounds {
                x,
                y,
                max_x: self.columns as i32 + 1,
                max_y: self.rows as i32 + 1,
            })
    }

    /// Strict accessor taking a cell coordinate.
    pub fn cell(&self, cell: MapCoordinate) -> Result<&Cell, MapError> {
        self.cell_at(cell.x(), cell.y())
    }

    /// Protected accessor: clamps each axis independently into the bordered
    /// range before lookup; always succeeds.
    #[must_use]
    pub fn cell_at_clamped(&self, x: i32, y: i32) -> &Cell {
        // Clamped indices are in range by construction, so the row-major
        // arithmetic needs no guard.
        let clamped_x = x.clamp(0, self.columns as i32 + 1) as usize;
        let clamped_y = y.clamp(0, self.rows as i32 + 1) as usize;
        let bordered_columns = self.columns as usize + 2;
        &self.cells[clamped_y * bordered_columns + clamped_x]
    }

    /// Safe accessor: `None` for exactly the inputs that make [`Map::cell_at`]
    /// fail, otherwise the same cell.
    #[must_use]
    pub fn cell_at_or_none(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|index| &self.cells[index])
    }

    /// Resolves the cell containing an absolute pixel coordinate, clamping
    /// into the bordered grid. Used by geometric sampling and viewport math
    /// that must never crash on stray input.
    #[must_use]
    pub fn cell_at_pixel_clamped(&self, coordinate: Coordinate) -> &Cell {
        let cell = coordinate.to_map_coordinate(self.tile_size);
        self.cell_at_clamped(cell.x(), cell.y())
    }

    /// The exact rectangular block of cells covered by a footprint.
    ///
    /// Fails strictly when the block hangs off the bordered grid, which
    /// signals a placement bug upstream.
    pub fn cells_occupied_by(&self, footprint: &CellBlock) -> Result<Vec<&Cell>, MapError> {
        footprint.cells().map(|cell| self.cell(cell)).collect()
    }

    /// True iff the cell lies within the 1-based playable area.
    #[must_use]
    pub fn is_within_playable_bounds(&self, cell: MapCoordinate) -> bool {
        self.view().is_within_playable_bounds(cell)
    }

    /// Assigns terrain to a cell; strict bounds, used by scenario setup.
    pub fn set_terrain(&mut self, cell: MapCoordinate, terrain: TerrainKind) -> Result<(), MapError> {
        let index = self
            .index(cell.x(), cell.y())
            .ok_or(MapError::OutOfBounds {
                x: cell.x(),
                y: cell.y(),
                max_x: self.columns as i32 + 1,
                max_y: self.rows as i32 + 1,
            })?;
        self.cells[index].terrain = terrain;
        Ok(())
    }

    /// Playable width in pixels.
    #[must_use]
    pub const fn width_in_pixels(&self) -> u32 {
        self.columns * self.tile_size.get()
    }

    /// Playable height in pixels.
    #[must_use]
    pub const fn height_in_pixels(&self) -> u32 {
        self.rows * self.tile_size.get()
    }

    /// Number of playable tiles on the map.
    #[must_use]
    pub const fn surface_area_in_tiles(&self) -> u32 {
        self.columns * self.rows
    }

    /// ASCII dump of the playable terrain, one row per line.
    ///
    /// The character mapping is the golden-output contract of
    /// [`TerrainKind::ascii_code`].
    #[must_use]
    pub fn terrain_ascii(&self) -> String {
        self.render_rows(|cell| cell.terrain.ascii_code())
    }

    /// ASCII dump of a player's shroud over the playable area: `#` for
    /// hidden cells, `.` for revealed ones.
    #[must_use]
    pub fn shroud_ascii(&self, shroud: &Shroud) -> String {
        self.render_rows(|cell| {
            if shroud.is_hidden_at(cell.coordinate) {
                '#'
            } else {
                '.'
            }
        })
    }

    fn render_rows<F>(&self, mut glyph: F) -> String
    where
        F: FnMut(&Cell) -> char,
    {
        let bordered_columns = self.columns as usize + 2;
        let mut out = String::with_capacity((self.columns as usize + 1) * self.rows as usize);
        for y in 1..=self.rows as usize {
            for x in 1..=self.columns as usize {
                out.push(glyph(&self.cells[y * bordered_columns + x]));
            }
            out.push('\n');
        }
        out
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let bordered_columns = self.columns as i32 + 2;
        let bordered_rows = self.rows as i32 + 2;
        if x < 0 || y < 0 || x >= bordered_columns || y >= bordered_rows {
            return None;
        }
        Some(y as usize * bordered_columns as usize + x as usize)
    }
}
