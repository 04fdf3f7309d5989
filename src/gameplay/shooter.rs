//! Shooters: picked from the bay by the player, they travel to a ready slot,
//! wait for their color's turn, then fire at the grid's front row until
//! their shots run out.
//!
//! ```text
//! Idle ──click──▶ Moving ──arrive──▶ AwaitingPermission ──granted/promoted──▶ Firing
//!                                                                  ▲            │ shot
//!                                                        hit/lost  │            ▼
//!                                                                  └── WaitingForHit
//!                                                                               │ last hit
//!                                                                               ▼
//!                                                                          Exhausted
//! ```

use std::time::Duration;

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::bay::ShooterBay;
use super::grid::CubeGrid;
use super::lattice::CellPos;
use super::layout::{SHOOTER_SIZE, bay_cell_to_world};
use super::planner::ShooterPlan;
use super::projectile::{ProjectileHit, ProjectileLost, projectile_bundle};
use super::slots::{ReadySlots, SlotId};
use super::turns::{Admission, TurnCoordinator};
use super::CubeColor;
use crate::audio::SoundEffect;
use crate::screens::GameState;
use crate::theme::palette;

// === Constants ===

/// Minimum time between two shots of one shooter.
pub const FIRE_COOLDOWN: Duration = Duration::from_millis(500);

/// Fraction of the remaining distance covered per second while traveling.
pub const TRAVEL_RATE: f32 = 5.0;

/// Distance at which a traveling shooter snaps onto its target.
const ARRIVAL_DISTANCE: f32 = 0.5;

// === Components ===

#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Shooter {
    pub color: CubeColor,
    pub shots: u32,
}

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub enum ShooterState {
    /// Waiting in the bay for a click.
    #[default]
    Idle,
    /// Traveling from the bay to its ready slot.
    Moving,
    /// In its slot, queued behind another shooter of the same color.
    AwaitingPermission,
    /// Holds its color's turn; fires when a target and the cooldown allow.
    Firing,
    /// A projectile is in flight.
    WaitingForHit,
    /// Out of shots; cleaned up this frame.
    Exhausted,
}

/// Bay cell of a shooter that has not been activated yet.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct BayCell(pub CellPos);

/// Ready slot held by an activated shooter.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct ClaimedSlot(pub SlotId);

/// Eases an entity toward `target`. Removed on arrival.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Travel {
    pub target: Vec2,
}

impl Travel {
    #[must_use]
    pub const fn to(target: Vec2) -> Self {
        Self { target }
    }
}

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct FireCooldown(pub Timer);

impl FireCooldown {
    /// A cooldown that has already elapsed, so the first shot is immediate.
    #[must_use]
    pub fn ready() -> Self {
        let mut timer = Timer::new(FIRE_COOLDOWN, TimerMode::Once);
        timer.set_elapsed(FIRE_COOLDOWN);
        Self(timer)
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.0.remaining().is_zero()
    }
}

/// Remaining-shots text on a shooter.
#[derive(Component, Debug, Reflect)]
#[reflect(Component)]
pub struct ShotLabel;

// === Messages ===

/// The player clicked this shooter.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShooterClicked(pub Entity);

// === Bundles ===

/// An idle shooter standing in bay cell `cell`.
pub(crate) fn shooter_bundle(plan: ShooterPlan, cell: CellPos) -> impl Bundle {
    (
        Name::new(format!("{} Shooter", plan.color.display_name())),
        Shooter {
            color: plan.color,
            shots: plan.shots,
        },
        ShooterState::Idle,
        BayCell(cell),
        FireCooldown::ready(),
        Sprite::from_color(plan.color.color(), Vec2::splat(SHOOTER_SIZE)),
        Transform::from_translation(bay_cell_to_world(cell).extend(crate::Z_SHOOTER)),
        DespawnOnExit(GameState::InGame),
        children![(
            Name::new("Shot Label"),
            ShotLabel,
            Text2d::new(plan.shots.to_string()),
            TextFont::from_font_size(palette::FONT_SIZE_SHOTS),
            TextColor(palette::SHOT_LABEL_TEXT),
            Transform::from_xyz(0.0, 0.0, 0.1),
        )],
    )
}

// === Systems ===

/// Topmost shooter whose square contains `point`.
fn shooter_at(point: Vec2, shooters: impl Iterator<Item = (Entity, Vec3)>) -> Option<Entity> {
    let half = SHOOTER_SIZE / 2.0;
    shooters
        .filter(|(_, pos)| (point.x - pos.x).abs() <= half && (point.y - pos.y).abs() <= half)
        .max_by(|(_, a), (_, b)| a.z.total_cmp(&b.z))
        .map(|(entity, _)| entity)
}

fn detect_shooter_clicks(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    shooters: Query<(Entity, &Transform), With<Shooter>>,
    mut clicks: MessageWriter<ShooterClicked>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let Ok(point) = camera.viewport_to_world_2d(camera_transform, cursor) else {
        return;
    };

    let hit = shooter_at(
        point,
        shooters
            .iter()
            .map(|(entity, transform)| (entity, transform.translation)),
    );
    if let Some(shooter) = hit {
        clicks.write(ShooterClicked(shooter));
    }
}

/// Sends clicked idle shooters to the first free ready slot.
/// Every click plays the touch sound, even when nothing happens.
fn activate_shooters(
    mut commands: Commands,
    mut clicks: MessageReader<ShooterClicked>,
    mut shooters: Query<(&Shooter, &mut ShooterState)>,
    mut slots: ResMut<ReadySlots>,
    mut bay: ResMut<ShooterBay>,
    mut sounds: MessageWriter<SoundEffect>,
) {
    for &ShooterClicked(entity) in clicks.read() {
        sounds.write(SoundEffect::CubeTouch);

        let Ok((shooter, mut state)) = shooters.get_mut(entity) else {
            continue;
        };
        if *state != ShooterState::Idle || shooter.shots == 0 {
            continue;
        }
        let Some(slot) = slots.try_acquire() else {
            debug!("No free ready slot for {entity}");
            continue;
        };

        bay.vacate(entity);
        *state = ShooterState::Moving;
        commands
            .entity(entity)
            .remove::<BayCell>()
            .insert((ClaimedSlot(slot), Travel::to(slot.position())));
    }
}

fn move_travelers(
    mut commands: Commands,
    time: Res<Time>,
    mut travelers: Query<(Entity, &mut Transform, &Travel)>,
) {
    let t = (TRAVEL_RATE * time.delta_secs()).min(1.0);
    for (entity, mut transform, travel) in &mut travelers {
        let current = transform.translation.truncate();
        let next = current.lerp(travel.target, t);
        let z = transform.translation.z;
        if next.distance(travel.target) <= ARRIVAL_DISTANCE {
            transform.translation = travel.target.extend(z);
            commands.entity(entity).remove::<Travel>();
        } else {
            transform.translation = next.extend(z);
        }
    }
}

/// Shooters that reached their slot ask for their color's turn.
fn request_permissions(
    mut turns: ResMut<TurnCoordinator>,
    mut shooters: Query<(Entity, &Shooter, &mut ShooterState), Without<Travel>>,
) {
    for (entity, shooter, mut state) in &mut shooters {
        if *state != ShooterState::Moving {
            continue;
        }
        *state = match turns.request(entity, shooter.color) {
            Admission::Granted => ShooterState::Firing,
            Admission::Queued => ShooterState::AwaitingPermission,
        };
    }
}

/// Firing shooters with a front-row target and an elapsed cooldown shoot.
/// Without a target they keep polling.
pub(super) fn fire_shooters(
    mut commands: Commands,
    time: Res<Time>,
    grid: Res<CubeGrid>,
    mut shooters: Query<(
        Entity,
        &Shooter,
        &mut ShooterState,
        &mut FireCooldown,
        &Transform,
    )>,
) {
    for (entity, shooter, mut state, mut cooldown, transform) in &mut shooters {
        cooldown.0.tick(time.delta());
        if *state != ShooterState::Firing || !cooldown.is_ready() {
            continue;
        }
        let Some(target) = grid.first_row_target(shooter.color) else {
            continue;
        };
        commands.spawn(projectile_bundle(
            entity,
            target,
            shooter.color,
            transform.translation.truncate(),
        ));
        cooldown.0.reset();
        *state = ShooterState::WaitingForHit;
    }
}

/// A hit spends one shot; a lost projectile is retried for free.
fn resolve_projectiles(
    mut hits: MessageReader<ProjectileHit>,
    mut lost: MessageReader<ProjectileLost>,
    mut shooters: Query<(&mut Shooter, &mut ShooterState)>,
) {
    for hit in hits.read() {
        let Ok((mut shooter, mut state)) = shooters.get_mut(hit.shooter) else {
            continue;
        };
        if *state != ShooterState::WaitingForHit {
            continue;
        }
        shooter.shots = shooter.shots.saturating_sub(1);
        *state = if shooter.shots == 0 {
            ShooterState::Exhausted
        } else {
            ShooterState::Firing
        };
    }

    for lost in lost.read() {
        let Ok((_, mut state)) = shooters.get_mut(lost.shooter) else {
            continue;
        };
        if *state == ShooterState::WaitingForHit {
            *state = ShooterState::Firing;
        }
    }
}

/// Exhausted shooters free their slot, hand their color's turn to the next
/// queued shooter, and despawn.
fn retire_exhausted(
    mut commands: Commands,
    mut slots: ResMut<ReadySlots>,
    mut turns: ResMut<TurnCoordinator>,
    mut shooters: Query<(Entity, &Shooter, &mut ShooterState, Option<&ClaimedSlot>)>,
) {
    let exhausted: Vec<(Entity, CubeColor, Option<SlotId>)> = shooters
        .iter()
        .filter(|(_, _, state, _)| **state == ShooterState::Exhausted)
        .map(|(entity, shooter, _, slot)| (entity, shooter.color, slot.map(|s| s.0)))
        .collect();

    for (entity, color, slot) in exhausted {
        if let Some(slot) = slot {
            slots.release(slot);
        }
        if turns.active(color) == Some(entity) {
            let mut next = turns.finish(color);
            while let Some(candidate) = next {
                if let Ok((_, _, mut state, _)) = shooters.get_mut(candidate) {
                    *state = ShooterState::Firing;
                    break;
                }
                next = turns.finish(color);
            }
        }
        commands.entity(entity).despawn();
    }
}

fn update_shot_labels(
    shooters: Query<(&Shooter, &Children), Changed<Shooter>>,
    mut labels: Query<&mut Text2d, With<ShotLabel>>,
) {
    for (shooter, children) in &shooters {
        for child in children.iter() {
            if let Ok(mut text) = labels.get_mut(child) {
                text.0 = shooter.shots.to_string();
            }
        }
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Shooter>()
        .register_type::<ShooterState>()
        .register_type::<BayCell>()
        .register_type::<ClaimedSlot>()
        .register_type::<Travel>()
        .register_type::<FireCooldown>()
        .register_type::<ShotLabel>();
    app.add_message::<ShooterClicked>();

    app.add_systems(
        Update,
        (
            detect_shooter_clicks.in_set(crate::GameSet::Input),
            activate_shooters.in_set(crate::GameSet::Activation),
            (move_travelers, request_permissions)
                .chain()
                .in_set(crate::GameSet::Movement),
            fire_shooters.in_set(crate::GameSet::Combat),
            (resolve_projectiles, retire_exhausted)
                .chain()
                .in_set(crate::GameSet::Resolve),
            update_shot_labels.in_set(crate::GameSet::Ui),
        )
            .run_if(crate::gameplay_running),
    );
}
