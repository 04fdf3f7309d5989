//! In-game keybindings that operate across all `Menu` overlays.

use bevy::prelude::*;

use super::GameState;
use crate::menus::Menu;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        handle_pause_key.run_if(in_state(GameState::InGame)),
    );
}

/// ESC toggles the pause overlay. Victory ignores it.
fn handle_pause_key(
    keyboard: Res<ButtonInput<KeyCode>>,
    menu: Res<State<Menu>>,
    mut next_menu: ResMut<NextState<Menu>>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) {
        return;
    }
    match menu.get() {
        Menu::None => next_menu.set(Menu::Pause),
        Menu::Pause => next_menu.set(Menu::None),
        Menu::Victory => {}
    }
}
