//! Screen and overlay transitions of the full game.

use bevy::prelude::*;
use cube_volley::gameplay::{CubeColor, CubeGrid, LevelLayout, Shooter};
use cube_volley::menus::Menu;
use cube_volley::screens::GameState;
use pretty_assertions::assert_eq;

use crate::{count, create_game_app, start_level};

fn set_game_state(app: &mut App, state: GameState) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(state);
    app.update();
}

fn set_menu(app: &mut App, menu: Menu) {
    app.world_mut().resource_mut::<NextState<Menu>>().set(menu);
    app.update();
}

#[test]
fn game_initializes_in_loading_state() {
    let mut app = create_game_app("init");
    app.update();
    let state = app.world().resource::<State<GameState>>();
    assert_eq!(*state.get(), GameState::Loading);
    assert_eq!(*app.world().resource::<State<Menu>>().get(), Menu::None);
}

#[test]
fn entering_gameplay_spawns_grid_and_shooters() {
    let mut app = start_level("enter", LevelLayout::uniform(CubeColor::Green, 45));

    assert_eq!(app.world().resource::<CubeGrid>().total_count(), 45);
    // 45 cubes: batches of 5, 20, 20.
    let mut shots: Vec<u32> = app
        .world_mut()
        .query::<&Shooter>()
        .iter(app.world())
        .map(|shooter| shooter.shots)
        .collect();
    shots.sort_unstable();
    assert_eq!(shots, vec![5, 20, 20]);
}

#[test]
fn pause_overlay_stops_and_resumes_virtual_time() {
    let mut app = start_level("pause", LevelLayout::uniform(CubeColor::Red, 10));

    set_menu(&mut app, Menu::Pause);
    assert!(app.world().resource::<Time<Virtual>>().is_paused());

    set_menu(&mut app, Menu::None);
    assert!(!app.world().resource::<Time<Virtual>>().is_paused());
}

#[test]
fn leaving_gameplay_despawns_level_and_reentering_rebuilds_it() {
    let mut app = start_level("restart", LevelLayout::uniform(CubeColor::Blue, 12));
    assert_eq!(count::<With<Shooter>>(&mut app), 1);

    set_game_state(&mut app, GameState::Loading);
    assert_eq!(count::<With<Shooter>>(&mut app), 0);

    set_game_state(&mut app, GameState::InGame);
    assert_eq!(app.world().resource::<CubeGrid>().total_count(), 12);
    assert_eq!(count::<With<Shooter>>(&mut app), 1);
}
