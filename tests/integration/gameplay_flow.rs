//! Whole levels played through the message-driven click path.

use bevy::prelude::*;
use cube_volley::gameplay::{
    CubeColor, CubeGrid, LevelLayout, ReadySlots, Shooter, ShooterClicked, ShooterState,
    TurnCoordinator,
};
use cube_volley::menus::Menu;
use pretty_assertions::assert_eq;

use crate::{count, start_level};

/// Upper bound on frames for a level; a shot takes about 25 frames.
const FRAME_LIMIT: usize = 4000;

fn shooters(app: &mut App) -> Vec<(Entity, Shooter, ShooterState)> {
    app.world_mut()
        .query::<(Entity, &Shooter, &ShooterState)>()
        .iter(app.world())
        .map(|(entity, shooter, state)| (entity, *shooter, *state))
        .collect()
}

fn click_all(app: &mut App) -> Vec<Entity> {
    let entities: Vec<Entity> = shooters(app).into_iter().map(|(e, _, _)| e).collect();
    for &entity in &entities {
        app.world_mut().write_message(ShooterClicked(entity));
    }
    entities
}

#[test]
fn single_shooter_clears_level_and_frees_its_slot() {
    let mut app = start_level("single", LevelLayout::uniform(CubeColor::Red, 20));
    let clicked = click_all(&mut app);
    assert_eq!(clicked.len(), 1);

    let mut frames = 0;
    while count::<With<Shooter>>(&mut app) > 0 && frames < FRAME_LIMIT {
        app.update();
        frames += 1;
    }

    assert!(frames < FRAME_LIMIT, "shooter never retired");
    assert_eq!(app.world().resource::<CubeGrid>().total_count(), 0);
    assert_eq!(app.world().resource::<ReadySlots>().free_count(), 5);
    assert_eq!(app.world().resource::<TurnCoordinator>().active(CubeColor::Red), None);

    app.update();
    assert_eq!(*app.world().resource::<State<Menu>>().get(), Menu::Victory);
}

#[test]
fn same_color_shooters_take_turns_in_arrival_order() {
    let mut app = start_level("turns", LevelLayout::uniform(CubeColor::Purple, 60));
    let clicked = click_all(&mut app);
    assert_eq!(clicked.len(), 3);

    let mut holders: Vec<Entity> = Vec::new();
    let mut frames = 0;
    while count::<With<Shooter>>(&mut app) > 0 && frames < FRAME_LIMIT {
        app.update();
        frames += 1;

        let firing = shooters(&mut app)
            .into_iter()
            .filter(|(_, _, state)| {
                matches!(state, ShooterState::Firing | ShooterState::WaitingForHit)
            })
            .count();
        assert!(firing <= 1, "{firing} purple shooters firing at once");

        let active = app
            .world()
            .resource::<TurnCoordinator>()
            .active(CubeColor::Purple);
        if active.is_some() && holders.last().copied() != active {
            holders.extend(active);
        }
    }

    assert!(frames < FRAME_LIMIT, "shooters never retired");
    assert_eq!(app.world().resource::<CubeGrid>().total_count(), 0);
    assert_eq!(holders.len(), 3, "each shooter holds the turn exactly once");
    let mut sorted_holders = holders.clone();
    sorted_holders.sort();
    let mut sorted_clicked = clicked;
    sorted_clicked.sort();
    assert_eq!(sorted_holders, sorted_clicked);
}

#[test]
fn different_colors_fire_concurrently() {
    let mut rows = LevelLayout::uniform(CubeColor::Red, 10).rows;
    rows[0][5..].fill(Some(CubeColor::Yellow));
    let mut app = start_level("colors", LevelLayout { rows });
    let clicked = click_all(&mut app);
    assert_eq!(clicked.len(), 2);

    let mut both_firing = false;
    for _ in 0..120 {
        app.update();
        let firing = shooters(&mut app)
            .into_iter()
            .filter(|(_, _, state)| {
                matches!(state, ShooterState::Firing | ShooterState::WaitingForHit)
            })
            .count();
        both_firing |= firing == 2;
    }

    assert!(both_firing, "red and yellow never fired together");
}

#[test]
fn clicks_beyond_the_ready_row_are_ignored() {
    // Seven colors' worth of shooters: 7 batches across 5 colors.
    let mut rows = Vec::new();
    for (index, color) in CubeColor::ALL.iter().enumerate() {
        let count = if index < 2 { 30 } else { 10 };
        rows.extend(LevelLayout::uniform(*color, count).rows);
    }
    let mut app = start_level("full-row", LevelLayout { rows });
    let clicked = click_all(&mut app);
    assert_eq!(clicked.len(), 7);
    app.update();

    let idle = shooters(&mut app)
        .into_iter()
        .filter(|(_, _, state)| *state == ShooterState::Idle)
        .count();
    assert_eq!(app.world().resource::<ReadySlots>().free_count(), 0);
    assert_eq!(idle, 2);
}
