//! Homing projectiles fired by shooters at same-colored cubes.

use avian2d::prelude::Collider;
use bevy::prelude::*;

use super::CubeColor;
use super::effects::HitEffect;
use super::grid::{Cube, CubeGrid};
use super::layout::CUBE_SIZE;
use crate::audio::SoundEffect;
use crate::screens::GameState;
use crate::third_party::avian::in_contact;

// === Constants ===

/// Projectile travel speed in world units per second.
pub const PROJECTILE_SPEED: f32 = 480.0;

/// Projectile radius.
pub const PROJECTILE_RADIUS: f32 = 6.0;

// === Components ===

#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Projectile {
    /// Shooter to report back to.
    pub shooter: Entity,
    /// Cube being homed on. May vanish before contact.
    pub target: Entity,
    pub color: CubeColor,
}

/// Collision shapes shared by every contact test.
#[derive(Resource)]
pub struct ContactShapes {
    pub cube: Collider,
    pub projectile: Collider,
}

impl Default for ContactShapes {
    fn default() -> Self {
        Self {
            cube: Collider::rectangle(CUBE_SIZE, CUBE_SIZE),
            projectile: Collider::circle(PROJECTILE_RADIUS),
        }
    }
}

// === Messages ===

/// A projectile destroyed a matching cube.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectileHit {
    pub shooter: Entity,
    pub cube: Entity,
}

/// A projectile's target disappeared before contact.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectileLost {
    pub shooter: Entity,
}

pub(crate) fn projectile_bundle(
    shooter: Entity,
    target: Entity,
    color: CubeColor,
    origin: Vec2,
) -> impl Bundle {
    (
        Name::new(format!("{} Projectile", color.display_name())),
        Projectile {
            shooter,
            target,
            color,
        },
        Sprite::from_color(color.color(), Vec2::splat(PROJECTILE_RADIUS * 2.0)),
        Transform::from_translation(origin.extend(crate::Z_PROJECTILE)),
        DespawnOnExit(GameState::InGame),
    )
}

// === Systems ===

/// Steers each projectile toward its target's live position, then resolves
/// contact. Mismatched cubes are passed through. A cube already removed
/// from the grid cannot be hit again.
fn move_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    shapes: Res<ContactShapes>,
    mut grid: ResMut<CubeGrid>,
    mut projectiles: Query<(Entity, &Projectile, &mut Transform)>,
    cubes: Query<(Entity, &Cube, &Transform), Without<Projectile>>,
    mut hits: MessageWriter<ProjectileHit>,
    mut lost: MessageWriter<ProjectileLost>,
    mut sounds: MessageWriter<SoundEffect>,
    mut effects: MessageWriter<HitEffect>,
) {
    let step = PROJECTILE_SPEED * time.delta_secs();

    for (entity, projectile, mut transform) in &mut projectiles {
        let target_alive = grid.position_of(projectile.target).is_some();
        let Ok((_, _, target_transform)) = cubes.get(projectile.target) else {
            commands.entity(entity).despawn();
            lost.write(ProjectileLost {
                shooter: projectile.shooter,
            });
            continue;
        };
        if !target_alive {
            commands.entity(entity).despawn();
            lost.write(ProjectileLost {
                shooter: projectile.shooter,
            });
            continue;
        }

        let position = transform.translation.truncate();
        let target_position = target_transform.translation.truncate();
        let next = position.move_towards(target_position, step);
        transform.translation = next.extend(transform.translation.z);

        let touches = |cube_transform: &Transform| {
            in_contact(
                &shapes.projectile,
                next,
                &shapes.cube,
                cube_transform.translation.truncate(),
            )
        };
        let struck = if touches(target_transform) {
            Some((projectile.target, target_position))
        } else {
            cubes
                .iter()
                .filter(|(cube, data, cube_transform)| {
                    data.color == projectile.color
                        && *cube != projectile.target
                        && touches(*cube_transform)
                })
                .find(|(cube, _, _)| grid.position_of(*cube).is_some())
                .map(|(cube, _, cube_transform)| (cube, cube_transform.translation.truncate()))
        };
        let Some((cube, cube_position)) = struck else {
            continue;
        };
        if grid.remove_cube(cube).is_none() {
            continue;
        }

        commands.entity(cube).despawn();
        commands.entity(entity).despawn();
        hits.write(ProjectileHit {
            shooter: projectile.shooter,
            cube,
        });
        sounds.write(SoundEffect::Collision);
        effects.write(HitEffect {
            position: cube_position,
            color: projectile.color,
        });
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Projectile>();
    app.init_resource::<ContactShapes>();
    app.add_message::<ProjectileHit>()
        .add_message::<ProjectileLost>();
    app.add_systems(
        Update,
        move_projectiles
            .in_set(crate::GameSet::Combat)
            .after(super::shooter::fire_shooters)
            .run_if(crate::gameplay_running),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::lattice::CellPos;
    use crate::gameplay::layout::grid_cell_to_world;
    use crate::testing::assert_entity_count;
    use pretty_assertions::assert_eq;

    fn create_projectile_test_app() -> App {
        let mut app = crate::testing::create_base_test_app();
        crate::testing::use_manual_time(&mut app);
        app.add_message::<SoundEffect>();
        app.add_message::<HitEffect>();
        app.init_resource::<CubeGrid>();
        app.add_plugins(plugin);
        crate::testing::transition_to_ingame(&mut app);
        app
    }

    fn spawn_cube(app: &mut App, color: CubeColor, pos: CellPos) -> Entity {
        let cube = app
            .world_mut()
            .spawn((
                Cube { color },
                Transform::from_translation(grid_cell_to_world(pos).extend(0.0)),
            ))
            .id();
        app.world_mut()
            .resource_mut::<CubeGrid>()
            .insert(pos, cube, color);
        cube
    }

    fn fire(app: &mut App, target: Entity, color: CubeColor, origin: Vec2) -> Entity {
        let shooter = app.world_mut().spawn_empty().id();
        app.world_mut()
            .spawn(projectile_bundle(shooter, target, color, origin));
        shooter
    }

    fn hits(app: &App) -> Vec<ProjectileHit> {
        app.world()
            .resource::<Messages<ProjectileHit>>()
            .iter_current_update_messages()
            .copied()
            .collect()
    }

    #[test]
    fn projectile_homes_in_and_removes_matching_cube() {
        let mut app = create_projectile_test_app();
        let cell = CellPos::new(0, 4);
        let cube = spawn_cube(&mut app, CubeColor::Red, cell);
        let origin = grid_cell_to_world(cell) - Vec2::new(0.0, 120.0);
        let shooter = fire(&mut app, cube, CubeColor::Red, origin);

        let mut seen = Vec::new();
        for _ in 0..30 {
            app.update();
            seen.extend(hits(&app));
        }

        assert_eq!(seen, vec![ProjectileHit { shooter, cube }]);
        assert_eq!(app.world().resource::<CubeGrid>().total_count(), 0);
        assert_entity_count::<With<Projectile>>(&mut app, 0);
        assert!(app.world().get_entity(cube).is_err());
    }

    #[test]
    fn projectile_passes_through_mismatched_cube() {
        let mut app = create_projectile_test_app();
        let blocker = spawn_cube(&mut app, CubeColor::Blue, CellPos::new(0, 4));
        let target = spawn_cube(&mut app, CubeColor::Red, CellPos::new(1, 4));
        let origin = grid_cell_to_world(CellPos::new(0, 4)) - Vec2::new(0.0, 60.0);
        fire(&mut app, target, CubeColor::Red, origin);

        for _ in 0..30 {
            app.update();
        }

        let grid = app.world().resource::<CubeGrid>();
        assert_eq!(grid.position_of(blocker), Some(CellPos::new(0, 4)));
        assert_eq!(grid.position_of(target), None);
    }

    #[test]
    fn projectile_self_destructs_when_target_removed_elsewhere() {
        let mut app = create_projectile_test_app();
        let cell = CellPos::new(0, 0);
        let cube = spawn_cube(&mut app, CubeColor::Green, cell);
        let origin = grid_cell_to_world(cell) - Vec2::new(0.0, 300.0);
        let shooter = fire(&mut app, cube, CubeColor::Green, origin);
        app.update();

        assert!(app.world_mut().resource_mut::<CubeGrid>().remove_cube(cube).is_some());
        app.world_mut().entity_mut(cube).despawn();
        app.update();

        assert_entity_count::<With<Projectile>>(&mut app, 0);
        let lost: Vec<ProjectileLost> = app
            .world()
            .resource::<Messages<ProjectileLost>>()
            .iter_current_update_messages()
            .copied()
            .collect();
        assert_eq!(lost, vec![ProjectileLost { shooter }]);
        assert!(hits(&app).is_empty());
    }

    #[test]
    fn two_projectiles_on_one_cube_remove_it_once() {
        let mut app = create_projectile_test_app();
        let cell = CellPos::new(0, 2);
        let cube = spawn_cube(&mut app, CubeColor::Yellow, cell);
        let origin = grid_cell_to_world(cell) - Vec2::new(0.0, 100.0);
        fire(&mut app, cube, CubeColor::Yellow, origin);
        fire(&mut app, cube, CubeColor::Yellow, origin);

        let mut seen = Vec::new();
        for _ in 0..30 {
            app.update();
            seen.extend(hits(&app));
        }

        assert_eq!(seen.len(), 1);
        assert_entity_count::<With<Projectile>>(&mut app, 0);
    }
}
