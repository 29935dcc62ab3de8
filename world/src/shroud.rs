//! Per-player fog-of-war bitmap.

use sandrift_core::{MapCoordinate, ShroudView};

/// A player's knowledge of the map: `true` means still hidden.
///
/// Covers the full bordered grid so border reveals from clamped geometric
/// sampling succeed silently. Revelation is monotone; nothing in this core
/// re-hides a cell.
#[derive(Clone, Debug)]
pub struct Shroud {
    columns: u32,
    rows: u32,
    hidden: Vec<bool>,
}

impl Shroud {
    /// Creates a fully hidden shroud for a map of the given playable size.
    #[must_use]
    pub fn new_hidden(playable_columns: u32, playable_rows: u32) -> Self {
        let columns = playable_columns + 2;
        let rows = playable_rows + 2;
        Self {
            columns,
            rows,
            hidden: vec![true; (columns * rows) as usize],
        }
    }

    /// Idempotently marks the cell visible; out-of-range cells are ignored.
    pub fn reveal_at(&mut self, cell: MapCoordinate) {
        if let Some(index) = self.index(cell) {
            self.hidden[index] = false;
        }
    }

    /// Reports whether the cell is still hidden; out-of-range counts hidden.
    #[must_use]
    pub fn is_hidden_at(&self, cell: MapCoordinate) -> bool {
        self.index(cell).map_or(true, |index| self.hidden[index])
    }

    /// Marks the entire grid, border included, visible.
    pub fn reveal_everything(&mut self) {
        self.hidden.fill(false);
    }

    /// Captures a read-only view of the bitmap for systems and adapters.
    #[must_use]
    pub fn view(&self) -> ShroudView<'_> {
        ShroudView::new(&self.hidden, self.columns, self.rows)
    }

    /// Bordered dimensions of the bitmap.
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
        Some((y * self.columns + x) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_fully_hidden() {
        let shroud = Shroud::new_hidden(3, 3);
        for y in 0..5 {
            for x in 0..5 {
                assert!(shroud.is_hidden_at(MapCoordinate::new(x, y)));
            }
        }
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut shroud = Shroud::new_hidden(3, 3);
        let cell = MapCoordinate::new(2, 2);

        shroud.reveal_at(cell);
        assert!(!shroud.is_hidden_at(cell));
        let after_once = shroud.clone();

        shroud.reveal_at(cell);
        assert!(!shroud.is_hidden_at(cell));
        assert_eq!(shroud.hidden, after_once.hidden);
    }

    #[test]
    fn out_of_range_reveal_is_a_silent_no_op() {
        let mut shroud = Shroud::new_hidden(3, 3);
        shroud.reveal_at(MapCoordinate::new(-1, 2));
        shroud.reveal_at(MapCoordinate::new(99, 99));
        assert!(shroud.is_hidden_at(MapCoordinate::new(-1, 2)));
    }

    #[test]
    fn border_cells_can_be_revealed() {
        let mut shroud = Shroud::new_hidden(3, 3);
        shroud.reveal_at(MapCoordinate::new(0, 0));
        shroud.reveal_at(MapCoordinate::new(4, 4));
        assert!(!shroud.is_hidden_at(MapCoordinate::new(0, 0)));
        assert!(!shroud.is_hidden_at(MapCoordinate::new(4, 4)));
    }

    #[test]
    fn reveal_everything_clears_the_whole_grid() {
        let mut shroud = Shroud::new_hidden(3, 3);
        shroud.reveal_everything();
        for y in 0..5 {
            for x in 0..5 {
                assert!(!shroud.is_hidden_at(MapCoordinate::new(x, y)));
            }
        }
    }

    #[test]
    fn view_mirrors_the_bitmap() {
        let mut shroud = Shroud::new_hidden(3, 3);
        shroud.reveal_at(MapCoordinate::new(1, 1));
        let view = shroud.view();
        assert_eq!(view.dimensions(), (5, 5));
        assert!(!view.is_hidden(MapCoordinate::new(1, 1)));
        assert!(view.is_hidden(MapCoordinate::new(2, 1)));
    }
}
