//! Loading screen: a header and a progress bar that fills over `LOADING_DURATION`.

use bevy::prelude::*;

use super::GameState;
use crate::theme::{palette, widget};

/// Seconds the loading screen stays up before gameplay starts.
pub const LOADING_DURATION: f32 = 5.5;

/// Progress of the loading screen.
#[derive(Resource, Debug, Reflect)]
#[reflect(Resource)]
pub struct LoadingTimer(pub Timer);

impl Default for LoadingTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(LOADING_DURATION, TimerMode::Once))
    }
}

/// Marker for the fill node of the loading bar.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct LoadingBarFill;

pub(super) fn plugin(app: &mut App) {
    app.register_type::<LoadingTimer>()
        .register_type::<LoadingBarFill>();

    app.add_systems(OnEnter(GameState::Loading), setup_loading_screen)
        .add_systems(
            Update,
            (tick_loading, update_loading_bar)
                .chain()
                .run_if(in_state(GameState::Loading)),
        );
}

fn setup_loading_screen(mut commands: Commands) {
    commands.insert_resource(LoadingTimer::default());
    commands.spawn((
        widget::ui_root("Loading Screen"),
        BackgroundColor(palette::BACKGROUND),
        DespawnOnExit(GameState::Loading),
        children![
            widget::header("Loading..."),
            widget::progress_bar(LoadingBarFill, palette::PROGRESS_BAR_FILL),
        ],
    ));
}

fn tick_loading(
    time: Res<Time>,
    mut timer: ResMut<LoadingTimer>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    timer.0.tick(time.delta());
    if timer.0.just_finished() {
        next_state.set(GameState::InGame);
    }
}

fn update_loading_bar(
    timer: Res<LoadingTimer>,
    mut fill: Query<&mut Node, With<LoadingBarFill>>,
) {
    for mut node in &mut fill {
        node.width = Val::Percent(timer.0.fraction() * 100.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn create_loading_test_app() -> App {
        let mut app = crate::testing::create_base_test_app();
        app.add_plugins(plugin);
        app.update(); // Enter Loading
        app
    }

    #[test]
    fn loading_timer_inserted_on_enter() {
        let app = create_loading_test_app();
        let timer = app.world().resource::<LoadingTimer>();
        assert!((timer.0.duration().as_secs_f32() - LOADING_DURATION).abs() < f32::EPSILON);
    }

    #[test]
    fn stays_in_loading_before_timer_finishes() {
        let mut app = create_loading_test_app();
        app.update();
        let next = app.world().resource::<NextState<GameState>>();
        assert!(matches!(*next, NextState::Unchanged));
    }

    #[test]
    fn transitions_to_ingame_when_timer_finishes() {
        let mut app = create_loading_test_app();

        // Any positive wall-clock delta finishes the timer.
        let duration = app.world().resource::<LoadingTimer>().0.duration();
        app.world_mut()
            .resource_mut::<LoadingTimer>()
            .0
            .set_elapsed(duration - Duration::from_nanos(1));
        app.update();
        app.update(); // Apply transition

        let state = app.world().resource::<State<GameState>>();
        assert_eq!(*state.get(), GameState::InGame);
    }
}
