//! Menu overlays that appear on top of gameplay.
//!
//! The `Menu` state is orthogonal to `GameState`: `Menu::Pause` and
//! `Menu::Victory` are overlays shown while `GameState::InGame` is active.

mod pause;
mod victory;

use bevy::prelude::*;

use crate::screens::GameState;

/// Menu overlay states. Orthogonal to `GameState`.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Menu {
    /// No overlay: gameplay is running.
    #[default]
    None,
    /// Pause overlay with resume/restart/quit and volume controls.
    Pause,
    /// Victory overlay (every cube cleared).
    Victory,
}

pub fn plugin(app: &mut App) {
    app.init_state::<Menu>();
    app.add_plugins((pause::plugin, victory::plugin));

    // Only the pause overlay stops `Time<Virtual>`. Every gameplay timer
    // (settle delays, fire cooldowns, travel) reads it.
    app.add_systems(OnEnter(Menu::Pause), pause_virtual_time);
    app.add_systems(OnExit(Menu::Pause), unpause_virtual_time);
}

fn pause_virtual_time(mut time: ResMut<Time<Virtual>>) {
    time.pause();
}

fn unpause_virtual_time(mut time: ResMut<Time<Virtual>>) {
    time.unpause();
}

/// Restarts the level: back through the loading screen with a fresh grid.
pub(crate) fn restart_level(
    next_game: &mut NextState<GameState>,
    next_menu: &mut NextState<Menu>,
) {
    next_game.set(GameState::Loading);
    next_menu.set(Menu::None);
}
