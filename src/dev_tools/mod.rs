//! Development tools, only included with `cargo run --features dev`.
//!
//! - World inspector window.
//! - F1 logs the shooter spawn data and the per-color turn state.
//! - F2 toggles cell outlines for the cube grid, ready slots and bay.

use bevy::prelude::*;
use bevy_inspector_egui::bevy_egui::EguiPlugin;
use bevy_inspector_egui::quick::WorldInspectorPlugin;

use crate::gameplay::layout::{
    BAY_COLUMNS, BAY_ROWS_PER_COLUMN, CUBE_SPACING, GRID_COLS, GRID_ROWS, READY_SLOT_COUNT,
    SHOOTER_SIZE, bay_cell_to_world, grid_cell_to_world, ready_slot_to_world,
};
use crate::gameplay::lattice::CellPos;
use crate::gameplay::{CubeColor, ShooterSpawnSpec, TurnCoordinator};
use crate::screens::GameState;

const OUTLINE_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.15);

/// Whether cell outlines are drawn.
#[derive(Resource, Debug, Default)]
struct ShowCellOutlines(bool);

/// One line per color: batches, active shooter, queue length.
fn describe_turns(spec: &ShooterSpawnSpec, turns: &TurnCoordinator) -> Vec<String> {
    CubeColor::ALL
        .iter()
        .map(|&color| {
            let batches = spec
                .entries
                .iter()
                .find(|(c, _)| *c == color)
                .map_or_else(Vec::new, |(_, batches)| batches.clone());
            let active = turns
                .active(color)
                .map_or_else(|| "none".to_string(), |entity| entity.to_string());
            format!(
                "{}: batches {batches:?}, active {active}, queued {}",
                color.display_name(),
                turns.queued_len(color)
            )
        })
        .collect()
}

fn log_turn_state(
    keyboard: Res<ButtonInput<KeyCode>>,
    spec: Res<ShooterSpawnSpec>,
    turns: Res<TurnCoordinator>,
) {
    if !keyboard.just_pressed(KeyCode::F1) {
        return;
    }
    for line in describe_turns(&spec, &turns) {
        info!("{line}");
    }
}

fn toggle_cell_outlines(keyboard: Res<ButtonInput<KeyCode>>, mut show: ResMut<ShowCellOutlines>) {
    if keyboard.just_pressed(KeyCode::F2) {
        show.0 = !show.0;
    }
}

fn draw_cell_outlines(mut gizmos: Gizmos) {
    let cube_cell = Vec2::splat(CUBE_SPACING);
    for row in 0..GRID_ROWS {
        for col in 0..GRID_COLS {
            let center = grid_cell_to_world(CellPos::new(row, col));
            gizmos.rect_2d(Isometry2d::from_translation(center), cube_cell, OUTLINE_COLOR);
        }
    }
    let shooter_cell = Vec2::splat(SHOOTER_SIZE);
    for index in 0..READY_SLOT_COUNT {
        gizmos.rect_2d(
            Isometry2d::from_translation(ready_slot_to_world(index)),
            shooter_cell,
            OUTLINE_COLOR,
        );
    }
    for row in 0..BAY_ROWS_PER_COLUMN {
        for col in 0..BAY_COLUMNS {
            let center = bay_cell_to_world(CellPos::new(row, col));
            gizmos.rect_2d(Isometry2d::from_translation(center), shooter_cell, OUTLINE_COLOR);
        }
    }
}

pub fn plugin(app: &mut App) {
    app.add_plugins((EguiPlugin::default(), WorldInspectorPlugin::new()));
    app.init_resource::<ShowCellOutlines>();
    app.add_systems(
        Update,
        (
            (log_turn_state, toggle_cell_outlines).in_set(crate::GameSet::Input),
            draw_cell_outlines.run_if(
                in_state(GameState::InGame).and(|show: Res<ShowCellOutlines>| show.0),
            ),
        ),
    );
}
