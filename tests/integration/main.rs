//! Integration tests driving the full game plugin headlessly.

mod gameplay_flow;
mod state_transitions;

use std::time::Duration;

use bevy::input::InputPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use cube_volley::gameplay::LevelLayout;
use cube_volley::screens::GameState;
use cube_volley::settings::SettingsPath;

/// Full game on `MinimalPlugins` with a fixed 20 ms frame and a throwaway
/// settings file.
pub fn create_game_app(name: &str) -> App {
    let dir = std::env::temp_dir().join("cube-volley-integration");
    std::fs::create_dir_all(&dir).unwrap();
    let settings = dir.join(format!("{name}-{}.toml", std::process::id()));
    let _ = std::fs::remove_file(&settings);

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin, InputPlugin));
    app.insert_resource(SettingsPath(settings));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(20)));
    app.add_plugins(cube_volley::plugin);
    app
}

/// Like `create_game_app`, but with a fixed level, already in gameplay.
pub fn start_level(name: &str, layout: LevelLayout) -> App {
    let mut app = create_game_app(name);
    app.insert_resource(layout);
    app.update();
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::InGame);
    app.update();
    app
}

pub fn count<F: bevy::ecs::query::QueryFilter>(app: &mut App) -> usize {
    app.world_mut()
        .query_filtered::<Entity, F>()
        .iter(app.world())
        .count()
}
