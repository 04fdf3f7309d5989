//! Per-color firing permission: one active shooter per color, the rest wait
//! in FIFO order.

use std::collections::VecDeque;

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use super::CubeColor;
use crate::screens::GameState;

/// Outcome of a permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Granted,
    Queued,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct TurnCoordinator {
    active: HashMap<CubeColor, Entity>,
    waiting: HashMap<CubeColor, VecDeque<Entity>>,
}

impl TurnCoordinator {
    /// Grants `color` to `shooter` if no one holds it, otherwise queues it.
    pub fn request(&mut self, shooter: Entity, color: CubeColor) -> Admission {
        if self.active.contains_key(&color) {
            self.waiting.entry(color).or_default().push_back(shooter);
            Admission::Queued
        } else {
            self.active.insert(color, shooter);
            Admission::Granted
        }
    }

    /// Releases `color` and hands it to the next queued shooter, if any.
    /// The returned shooter is already the active holder.
    pub fn finish(&mut self, color: CubeColor) -> Option<Entity> {
        self.active.remove(&color);
        let next = self.waiting.get_mut(&color)?.pop_front()?;
        self.active.insert(color, next);
        Some(next)
    }

    #[must_use]
    pub fn active(&self, color: CubeColor) -> Option<Entity> {
        self.active.get(&color).copied()
    }

    #[must_use]
    pub fn queued_len(&self, color: CubeColor) -> usize {
        self.waiting.get(&color).map_or(0, VecDeque::len)
    }

    #[must_use]
    pub fn is_queued(&self, shooter: Entity) -> bool {
        self.waiting.values().any(|queue| queue.contains(&shooter))
    }
}

fn reset_turns(mut commands: Commands) {
    commands.insert_resource(TurnCoordinator::default());
}

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<TurnCoordinator>();
    app.add_systems(OnEnter(GameState::InGame), reset_turns);
}
