//! Turns the grid's shot batches into shooters: a round-robin order over
//! colors, laid into the bay row by row, with overflow held in reserve.

use std::collections::VecDeque;

use bevy::prelude::*;

use super::CubeColor;
use super::bay::ShooterBay;
use super::grid::ShooterSpawnSpec;
use super::lattice::CellPos;
use super::layout::{BAY_COLUMNS, BAY_ROWS_PER_COLUMN};
use super::shooter::shooter_bundle;
use crate::screens::GameState;

/// One shooter to be spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShooterPlan {
    pub color: CubeColor,
    pub shots: u32,
}

/// Plans that did not fit in the bay, spawned in order as cells free up.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct ShooterReserve(VecDeque<ShooterPlan>);

impl ShooterReserve {
    pub fn from_plans(plans: impl IntoIterator<Item = ShooterPlan>) -> Self {
        Self(plans.into_iter().collect())
    }

    pub fn pop(&mut self) -> Option<ShooterPlan> {
        self.0.pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn total_shots(&self) -> u32 {
        self.0.iter().map(|plan| plan.shots).sum()
    }
}

/// One batch per color per round, colors in first-seen order, until all run out.
#[must_use]
pub fn interleave(spec: &ShooterSpawnSpec) -> Vec<ShooterPlan> {
    let mut queues: Vec<(CubeColor, VecDeque<u32>)> = spec
        .entries
        .iter()
        .map(|(color, batches)| (*color, batches.iter().copied().collect()))
        .collect();

    let mut order = Vec::new();
    while !queues.is_empty() {
        for (color, batches) in &mut queues {
            if let Some(shots) = batches.pop_front() {
                order.push(ShooterPlan {
                    color: *color,
                    shots,
                });
            }
        }
        queues.retain(|(_, batches)| !batches.is_empty());
    }
    order
}

/// Bay cells in fill order: rows outer, columns inner.
fn bay_fill_order() -> impl Iterator<Item = CellPos> {
    (0..BAY_ROWS_PER_COLUMN).flat_map(|row| (0..BAY_COLUMNS).map(move |col| CellPos::new(row, col)))
}

/// Pairs plans with bay cells; whatever does not fit goes to the reserve.
#[must_use]
pub fn place_in_bay(plans: Vec<ShooterPlan>) -> (Vec<(CellPos, ShooterPlan)>, ShooterReserve) {
    let mut plans = plans.into_iter();
    let placed = bay_fill_order().zip(plans.by_ref()).collect();
    (placed, ShooterReserve::from_plans(plans))
}

pub(super) fn spawn_shooters(mut commands: Commands, spec: Res<ShooterSpawnSpec>) {
    let (placed, reserve) = place_in_bay(interleave(&spec));

    let mut bay = ShooterBay::default();
    for (pos, plan) in placed {
        let shooter = commands.spawn(shooter_bundle(plan, pos)).id();
        bay.place(pos, shooter);
    }
    if !reserve.is_empty() {
        info!(
            "{} shooters ({} shots) wait in reserve for bay space",
            reserve.len(),
            reserve.total_shots()
        );
    }

    commands.insert_resource(bay);
    commands.insert_resource(reserve);
}

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<ShooterReserve>();
    app.add_systems(
        OnEnter(GameState::InGame),
        spawn_shooters.after(super::grid::spawn_grid),
    );
}
