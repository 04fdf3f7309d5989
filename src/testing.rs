//! Testing utilities for Bevy systems.

#![cfg(test)]

use std::time::Duration;

use bevy::input::InputPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use crate::menus::Menu;
use crate::screens::GameState;

/// Fixed frame step used by `advance_frames`.
pub const TEST_FRAME: Duration = Duration::from_millis(20);

/// Creates a minimal app for testing with essential plugins.
pub fn create_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app
}

/// Minimal app with states (`GameState`, `Menu`) and keyboard/mouse input.
pub fn create_base_test_app() -> App {
    let mut app = create_base_test_app_no_input();
    app.add_plugins(InputPlugin);
    app
}

/// Like `create_base_test_app`, but without `InputPlugin` so tests can press
/// keys without the input systems clearing them first.
pub fn create_base_test_app_no_input() -> App {
    let mut app = create_test_app();
    app.add_plugins(StatesPlugin);
    app.init_state::<GameState>();
    app.init_state::<Menu>();
    crate::configure_game_sets(&mut app);
    app
}

/// Inserts bare input resources (used together with `create_base_test_app_no_input`).
pub fn init_input_resources(app: &mut App) {
    app.init_resource::<ButtonInput<KeyCode>>();
    app.init_resource::<ButtonInput<MouseButton>>();
}

/// Moves the app into `GameState::InGame` and applies the transition.
pub fn transition_to_ingame(app: &mut App) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::InGame);
    app.update();
}

/// Replaces wall-clock time with a fixed step so timers advance deterministically.
pub fn use_manual_time(app: &mut App) {
    app.insert_resource(TimeUpdateStrategy::ManualDuration(TEST_FRAME));
}

/// Runs `count` frames. Combine with `use_manual_time` for deterministic deltas.
pub fn advance_frames(app: &mut App, count: usize) {
    for _ in 0..count {
        app.update();
    }
}

/// Distinct entity ids for tests of plain data structures.
pub fn test_entities(count: usize) -> Vec<Entity> {
    let mut world = World::new();
    (0..count).map(|_| world.spawn_empty().id()).collect()
}

/// Asserts the number of entities matching filter `F`.
pub fn assert_entity_count<F: bevy::ecs::query::QueryFilter>(app: &mut App, expected: usize) {
    let actual = app
        .world_mut()
        .query_filtered::<Entity, F>()
        .iter(app.world())
        .count();
    assert_eq!(
        actual,
        expected,
        "expected {expected} entities matching {}, found {actual}",
        std::any::type_name::<F>()
    );
}
