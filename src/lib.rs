//! Cube Volley game library.
//!
//! A grid of colored cubes is cleared by shooters the player sends from the
//! bay to a limited row of ready slots. Each shooter fires at the front row
//! of the grid, one shooter per color at a time.

pub mod audio;
#[cfg(feature = "dev")]
pub mod dev_tools;
pub mod gameplay;
pub mod menus;
pub mod screens;
pub mod settings;
#[cfg(test)]
pub mod testing;
pub mod theme;
pub mod third_party;

use bevy::prelude::*;

use crate::menus::Menu;
use crate::screens::GameState;

// === Z Layers ===

pub const Z_BACKGROUND: f32 = 0.0;
pub const Z_SLOT: f32 = 1.0;
pub const Z_CUBE: f32 = 2.0;
pub const Z_SHOOTER: f32 = 3.0;
pub const Z_PROJECTILE: f32 = 4.0;
pub const Z_EFFECT: f32 = 5.0;

/// Per-frame ordering of gameplay systems.
///
/// Chained in declaration order, so a shooter activated this frame starts
/// moving this frame, and a hit resolved this frame schedules its gravity
/// settle before feedback and UI run.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSet {
    Input,
    Activation,
    Movement,
    Combat,
    Resolve,
    Settle,
    Feedback,
    Ui,
}

/// Run condition: gameplay is active and no menu overlay is open.
pub fn gameplay_running(game_state: Res<State<GameState>>, menu: Res<State<Menu>>) -> bool {
    *game_state.get() == GameState::InGame && *menu.get() == Menu::None
}

/// Chains the `GameSet`s in `Update`.
pub(crate) fn configure_game_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            GameSet::Input,
            GameSet::Activation,
            GameSet::Movement,
            GameSet::Combat,
            GameSet::Resolve,
            GameSet::Settle,
            GameSet::Feedback,
            GameSet::Ui,
        )
            .chain(),
    );
}

/// Root plugin. Headless-safe: works on `MinimalPlugins` for tests.
/// Dev tooling needs a window and renderer, so `main` adds it separately.
pub fn plugin(app: &mut App) {
    configure_game_sets(app);
    app.add_plugins((
        screens::plugin,
        menus::plugin,
        settings::plugin,
        audio::plugin,
        theme::plugin,
        gameplay::plugin,
    ));
}
