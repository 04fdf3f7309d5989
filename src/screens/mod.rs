//! Top-level game states and their screens.

mod in_game;
mod loading;

use bevy::camera::ScalingMode;
use bevy::prelude::*;

use crate::gameplay::layout::{VIEW_CENTER_Y, VIEW_HEIGHT};

/// Primary game states.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Loading screen with a progress bar.
    #[default]
    Loading,
    /// Active gameplay. Pause and victory are `Menu` overlays on top of it.
    InGame,
}

pub fn plugin(app: &mut App) {
    app.init_state::<GameState>();
    app.add_systems(Startup, setup_camera);
    app.add_plugins((loading::plugin, in_game::plugin));
}

/// Spawns the global 2D camera. Persists across all states (do NOT add `DespawnOnExit`).
/// The projection keeps the whole play area (grid, ready slots, bay) in view.
fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("Camera"),
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scaling_mode: ScalingMode::FixedVertical {
                viewport_height: VIEW_HEIGHT,
            },
            ..OrthographicProjection::default_2d()
        }),
        Transform::from_xyz(0.0, VIEW_CENTER_Y, 0.0),
    ));
}
