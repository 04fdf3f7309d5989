//! Pause overlay: resume, restart, quit, and music/sound volume controls.

use bevy::prelude::*;

use super::{Menu, restart_level};
use crate::screens::GameState;
use crate::settings::{VOLUME_STEP, VolumeChannel, VolumeSettings};
use crate::theme::widget;

pub(super) fn plugin(app: &mut App) {
    app.register_type::<VolumeLabel>();
    app.add_systems(OnEnter(Menu::Pause), spawn_pause_menu);
    app.add_systems(
        Update,
        update_volume_labels
            .run_if(in_state(Menu::Pause).and(resource_changed::<VolumeSettings>)),
    );
}

/// Text showing the current value of one volume channel.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
struct VolumeLabel(VolumeChannel);

fn volume_text(channel: VolumeChannel, settings: &VolumeSettings) -> String {
    let percent = (settings.get(channel) * 100.0).round();
    format!("{}: {percent}%", channel.label())
}

fn spawn_pause_menu(mut commands: Commands, settings: Res<VolumeSettings>) {
    commands.spawn((
        widget::overlay_root("Pause Menu"),
        DespawnOnExit(Menu::Pause),
        children![(
            widget::panel("Pause Panel"),
            children![
                widget::header("PAUSED"),
                widget::button(
                    "Resume",
                    |_: On<Pointer<Click>>, mut next_menu: ResMut<NextState<Menu>>| {
                        next_menu.set(Menu::None);
                    },
                ),
                widget::button(
                    "Restart",
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
                volume_row(VolumeChannel::Music, &settings),
                volume_row(VolumeChannel::Sound, &settings),
            ],
        )],
    ));
}

fn volume_row(channel: VolumeChannel, settings: &VolumeSettings) -> impl Bundle {
    (
        Name::new(format!("{} Volume", channel.label())),
        Node {
            align_items: AlignItems::Center,
            column_gap: Val::Px(16.0),
            ..default()
        },
        children![
            widget::small_button(
                "-",
                move |_: On<Pointer<Click>>, mut settings: ResMut<VolumeSettings>| {
                    settings.adjust(channel, -VOLUME_STEP);
                },
            ),
            (
                widget::label(volume_text(channel, settings)),
                Node {
                    width: Val::Px(220.0),
                    justify_content: JustifyContent::Center,
                    ..default()
                },
                VolumeLabel(channel),
            ),
            widget::small_button(
                "+",
                move |_: On<Pointer<Click>>, mut settings: ResMut<VolumeSettings>| {
                    settings.adjust(channel, VOLUME_STEP);
                },
            ),
        ],
    )
}

fn update_volume_labels(
    settings: Res<VolumeSettings>,
    mut labels: Query<(&VolumeLabel, &mut Text)>,
) {
    for (label, mut text) in &mut labels {
        text.0 = volume_text(label.0, &settings);
    }
}
