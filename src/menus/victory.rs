//! Victory overlay with bordered panel and clickable buttons.

use bevy::prelude::*;

use super::{Menu, restart_level};
use crate::screens::GameState;
use crate::theme::widget;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Menu::Victory), spawn_victory_screen);
}

fn spawn_victory_screen(mut commands: Commands) {
    commands.spawn((
        widget::overlay_root("Victory Screen"),
        DespawnOnExit(Menu::Victory),
        children![(
            widget::panel("Victory Panel"),
            children![
                widget::title("VICTORY!"),
                widget::button(
                    "Play Again",
                    |_: On<Pointer<Click>>,
                     mut next_game: ResMut<NextState<GameState>>,
                     mut next_menu: ResMut<NextState<Menu>>| {
                        restart_level(&mut next_game, &mut next_menu);
                    },
                ),
                widget::button(
                    "Quit",
                    |_: On<Pointer<Click>>, mut exit: MessageWriter<AppExit>| {
                        exit.write(AppExit::Success);
                    },
                ),
            ],
        )],
    ));
}
