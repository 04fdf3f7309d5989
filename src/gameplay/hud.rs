//! In-game HUD: cleared-cubes progress bar, remaining count, pause button.

use bevy::prelude::*;

use super::grid::{CubeGrid, CubeProgress};
use crate::menus::Menu;
use crate::screens::GameState;
use crate::theme::{palette, widget};
use crate::{GameSet, gameplay_running};

/// Fill node of the cleared-cubes bar.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct ClearedBarFill;

/// Remaining-cubes counter text.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct RemainingDisplay;

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Name::new("HUD"),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(16.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            column_gap: Val::Px(16.0),
            ..default()
        },
        DespawnOnExit(GameState::InGame),
        children![
            widget::progress_bar(ClearedBarFill, palette::PROGRESS_BAR_FILL),
            (
                RemainingDisplay,
                Text::new(""),
                TextFont::from_font_size(palette::FONT_SIZE_HUD),
                TextColor(palette::HEADER_TEXT),
            ),
            widget::small_button(
                "II",
                |_: On<Pointer<Click>>, mut next_menu: ResMut<NextState<Menu>>| {
                    next_menu.set(Menu::Pause);
                },
            ),
        ],
    ));
}

fn update_progress(
    grid: Res<CubeGrid>,
    progress: Res<CubeProgress>,
    mut fill: Single<&mut Node, With<ClearedBarFill>>,
    mut remaining: Single<&mut Text, With<RemainingDisplay>>,
) {
    let left = grid.total_count();
    fill.width = Val::Percent(progress.cleared_fraction(left) * 100.0);
    remaining.0 = format!("{left} left");
}

pub(super) fn plugin(app: &mut App) {
    app.register_type::<ClearedBarFill>()
        .register_type::<RemainingDisplay>();

    app.add_systems(OnEnter(GameState::InGame), spawn_hud);
    app.add_systems(
        Update,
        update_progress.in_set(GameSet::Ui).run_if(gameplay_running),
    );
}
