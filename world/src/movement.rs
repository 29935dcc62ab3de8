//! Sub-tile movement stepping for mobile units.
//!
//! A unit occupies exactly one cell at all times; motion between cells is a
//! pixel offset animated toward the target. Each axis advances independently
//! by its sign toward the target, and when the accumulated offset on an axis
//! reaches a full tile in the travel direction, that axis snaps one cell
//! closer and the offset resets to zero. The offset therefore never
//! represents more than one tile of travel, and a multi-cell order crosses
//! its cells one at a time.

use std::time::Duration;

use glam::Vec2;
use sandrift_core::{Coordinate, TileSize};

/// Result of advancing a unit's motion by one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct StepOutcome {
    /// Pixel coordinate of the occupied cell after the step.
    pub(crate) position: Coordinate,
    /// Sub-tile offset after the step.
    pub(crate) offset: Vec2,
    /// True when both axes have reached the target.
    pub(crate) arrived: bool,
}

/// Advances `offset` toward `target` by `speed * dt` pixels per axis.
pub(crate) fn advance(
    position: Coordinate,
    offset: Vec2,
    target: Coordinate,
    speed: f32,
    dt: Duration,
    tile_size: TileSize,
) -> StepOutcome {
    let tile = tile_size.get() as f32;
    let step = speed * dt.as_secs_f32();

    let (x, offset_x, arrived_x) = advance_axis(position.x(), offset.x, target.x(), step, tile);
    let (y, offset_y, arrived_y) = advance_axis(position.y(), offset.y, target.y(), step, tile);

    StepOutcome {
        position: Coordinate::new(x, y),
        offset: Vec2::new(offset_x, offset_y),
        arrived: arrived_x && arrived_y,
    }
}

fn advance_axis(position: i32, offset: f32, target: i32, step: f32, tile: f32) -> (i32, f32, bool) {
    let delta = target - position;
    if delta == 0 {
        return (position, offset, true);
    }

    let direction = delta.signum();
    let tentative = offset + step * direction as f32;
    if tentative * direction as f32 >= tile {
        // Snaps are exact and one cell at a time.
        let next = position + direction * tile as i32;
        (next, 0.0, next == target)
    } else {
        (position, tentative, false)
    }
}
