//! Particle feedback: sparks where a cube is destroyed and a burst on victory.

use std::f32::consts::TAU;

use bevy::prelude::*;

use super::CubeColor;
use crate::menus::Menu;
use crate::screens::GameState;

// === Constants ===

const HIT_SPARKS: usize = 8;
const HIT_SPARK_SPEED: f32 = 140.0;
const HIT_SPARK_LIFETIME: f32 = 0.5;

const WIN_SPARKS: usize = 48;
const WIN_SPARK_SPEED: f32 = 320.0;
const WIN_SPARK_LIFETIME: f32 = 1.5;

/// Per-frame velocity damping.
const SPARK_DRAG: f32 = 0.95;

// === Components ===

/// Spark the hit effect or win burst left behind. Fades out over its lifetime.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Spark {
    pub velocity: Vec2,
    pub lifetime: Timer,
}

// === Messages ===

/// A cube was destroyed at `position`.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct HitEffect {
    pub position: Vec2,
    pub color: CubeColor,
}

// === Systems ===

#[allow(clippy::cast_precision_loss)]
fn spark_burst(
    commands: &mut Commands,
    origin: Vec2,
    count: usize,
    speed: f32,
    lifetime: f32,
    color_for: impl Fn(usize) -> Color,
) {
    for i in 0..count {
        let angle = (i as f32 / count as f32) * TAU;
        let jitter = 0.75 + rand::random::<f32>() * 0.5;
        commands.spawn((
            Name::new("Spark"),
            Spark {
                velocity: Vec2::from_angle(angle) * speed * jitter,
                lifetime: Timer::from_seconds(lifetime, TimerMode::Once),
            },
            Sprite::from_color(color_for(i), Vec2::splat(6.0 + rand::random::<f32>() * 4.0)),
            Transform::from_translation(origin.extend(crate::Z_EFFECT)),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

fn spawn_hit_sparks(mut commands: Commands, mut effects: MessageReader<HitEffect>) {
    for effect in effects.read() {
        let color = effect.color.color();
        spark_burst(
            &mut commands,
            effect.position,
            HIT_SPARKS,
            HIT_SPARK_SPEED,
            HIT_SPARK_LIFETIME,
            |_| color,
        );
    }
}

fn spawn_win_burst(mut commands: Commands) {
    spark_burst(
        &mut commands,
        Vec2::new(0.0, crate::gameplay::layout::VIEW_CENTER_Y),
        WIN_SPARKS,
        WIN_SPARK_SPEED,
        WIN_SPARK_LIFETIME,
        |i| CubeColor::ALL[i % CubeColor::ALL.len()].color(),
    );
}

/// Moves, slows, and fades sparks; despawns them when their time is up.
fn update_sparks(
    mut commands: Commands,
    time: Res<Time>,
    mut sparks: Query<(Entity, &mut Spark, &mut Transform, &mut Sprite)>,
) {
    let dt = time.delta_secs();
    for (entity, mut spark, mut transform, mut sprite) in &mut sparks {
        spark.lifetime.tick(time.delta());
        if spark.lifetime.is_finished() {
            commands.entity(entity).despawn();
            continue;
        }
        transform.translation += (spark.velocity * dt).extend(0.0);
        spark.velocity *= SPARK_DRAG;
        sprite.color = sprite.color.with_alpha(1.0 - spark.lifetime.fraction());
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Spark>();
    app.add_message::<HitEffect>();
    app.add_systems(OnEnter(Menu::Victory), spawn_win_burst);
    app.add_systems(
        Update,
        (spawn_hit_sparks, update_sparks).in_set(crate::GameSet::Feedback),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::assert_entity_count;

    fn create_effects_test_app() -> App {
        let mut app = crate::testing::create_base_test_app();
        crate::testing::use_manual_time(&mut app);
        app.add_plugins(plugin);
        crate::testing::transition_to_ingame(&mut app);
        app
    }

    #[test]
    fn hit_effect_spawns_sparks_that_expire() {
        let mut app = create_effects_test_app();

        app.world_mut().write_message(HitEffect {
            position: Vec2::ZERO,
            color: CubeColor::Red,
        });
        app.update();
        assert_entity_count::<With<Spark>>(&mut app, HIT_SPARKS);

        // 0.5 s at 20 ms per frame, plus slack.
        crate::testing::advance_frames(&mut app, 30);
        assert_entity_count::<With<Spark>>(&mut app, 0);
    }

    #[test]
    fn sparks_fly_outward_and_fade() {
        let mut app = create_effects_test_app();
        app.world_mut().write_message(HitEffect {
            position: Vec2::ZERO,
            color: CubeColor::Blue,
        });
        crate::testing::advance_frames(&mut app, 5);

        let mut query = app.world_mut().query::<(&Transform, &Sprite)>();
        for (transform, sprite) in query.iter(app.world()) {
            assert!(transform.translation.truncate().length() > 1.0);
            assert!(sprite.color.alpha() < 1.0);
        }
    }

    #[test]
    fn victory_spawns_win_burst() {
        let mut app = create_effects_test_app();

        app.world_mut()
            .resource_mut::<NextState<Menu>>()
            .set(Menu::Victory);
        app.update();

        assert_entity_count::<With<Spark>>(&mut app, WIN_SPARKS);
    }
}
