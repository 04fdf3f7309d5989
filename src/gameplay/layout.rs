//! Play-area geometry: where grid cells, ready slots and bay cells sit in the world.
//!
//! World space, y up. The cube grid's row 0 is its bottom row (closest to the
//! shooters); rows grow upward. The ready slots sit in one row under the grid
//! and the bay sits under them, bay row 0 on top, rows growing downward.

#![allow(clippy::cast_precision_loss)] // Grid indices are small; usize->f32 is exact.

use bevy::prelude::*;

use super::lattice::CellPos;

// === Cube Grid ===

/// Rows in the cube grid.
pub const GRID_ROWS: usize = 15;

/// Columns in the cube grid.
pub const GRID_COLS: usize = 10;

/// Distance between neighboring cube centers.
pub const CUBE_SPACING: f32 = 44.0;

/// Rendered cube edge (slightly smaller than the spacing to show gaps).
pub const CUBE_SIZE: f32 = 40.0;

/// World Y of cube row 0.
pub const GRID_BASE_Y: f32 = 80.0;

// === Ready Slots ===

/// Number of ready slots shooters can occupy while firing.
pub const READY_SLOT_COUNT: usize = 5;

/// Distance between ready slot centers.
pub const READY_SLOT_SPACING: f32 = 64.0;

/// World Y of the ready slot row.
pub const READY_SLOT_Y: f32 = -10.0;

// === Shooter Bay ===

/// Columns in the shooter bay.
pub const BAY_COLUMNS: usize = 5;

/// Shooters stacked per bay column.
pub const BAY_ROWS_PER_COLUMN: usize = 3;

/// Horizontal distance between bay columns.
pub const BAY_COLUMN_SPACING: f32 = 64.0;

/// Vertical distance between bay rows.
pub const BAY_ROW_SPACING: f32 = 58.0;

/// World Y of bay row 0.
pub const BAY_TOP_Y: f32 = -100.0;

/// Rendered shooter edge.
pub const SHOOTER_SIZE: f32 = 48.0;

// === Camera ===

/// World height kept visible by the camera.
pub const VIEW_HEIGHT: f32 = 1000.0;

/// World Y the camera centers on.
pub const VIEW_CENTER_Y: f32 = 230.0;

/// X of column `col` in a row of `count` items spaced `spacing` apart, centered on x = 0.
fn centered_x(col: usize, count: usize, spacing: f32) -> f32 {
    (col as f32 - (count as f32 - 1.0) / 2.0) * spacing
}

/// World position of a cube grid cell center.
#[must_use]
pub fn grid_cell_to_world(pos: CellPos) -> Vec2 {
    Vec2::new(
        centered_x(pos.col, GRID_COLS, CUBE_SPACING),
        (pos.row as f32).mul_add(CUBE_SPACING, GRID_BASE_Y),
    )
}

/// World position of a ready slot.
#[must_use]
pub fn ready_slot_to_world(index: usize) -> Vec2 {
    Vec2::new(
        centered_x(index, READY_SLOT_COUNT, READY_SLOT_SPACING),
        READY_SLOT_Y,
    )
}

/// World position of a bay cell center.
#[must_use]
pub fn bay_cell_to_world(pos: CellPos) -> Vec2 {
    Vec2::new(
        centered_x(pos.col, BAY_COLUMNS, BAY_COLUMN_SPACING),
        (pos.row as f32).mul_add(-BAY_ROW_SPACING, BAY_TOP_Y),
    )
}

/// Bay cell under a world position, if any.
#[must_use]
pub fn world_to_bay_cell(world: Vec2) -> Option<CellPos> {
    let half = SHOOTER_SIZE / 2.0;
    (0..BAY_ROWS_PER_COLUMN)
        .flat_map(|row| (0..BAY_COLUMNS).map(move |col| CellPos::new(row, col)))
        .find(|&pos| {
            let center = bay_cell_to_world(pos);
            (world.x - center.x).abs() <= half && (world.y - center.y).abs() <= half
        })
}
