//! Ready slots: the fixed row of positions shooters fire from.

use bevy::prelude::*;

use super::layout::{READY_SLOT_COUNT, SHOOTER_SIZE, ready_slot_to_world};
use crate::screens::GameState;
use crate::theme::palette;

/// Index of a ready slot, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub struct SlotId(pub usize);

impl SlotId {
    #[must_use]
    pub fn position(self) -> Vec2 {
        ready_slot_to_world(self.0)
    }
}

/// Occupancy of the ready slots.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadySlots {
    occupied: [bool; READY_SLOT_COUNT],
}

impl ReadySlots {
    /// Claims the leftmost free slot.
    pub fn try_acquire(&mut self) -> Option<SlotId> {
        let index = self.occupied.iter().position(|taken| !taken)?;
        self.occupied[index] = true;
        Some(SlotId(index))
    }

    /// Frees a slot. Releasing a free or unknown slot does nothing.
    pub fn release(&mut self, slot: SlotId) {
        if let Some(taken) = self.occupied.get_mut(slot.0) {
            *taken = false;
        }
    }

    #[must_use]
    pub fn is_free(&self, slot: SlotId) -> bool {
        self.occupied.get(slot.0).is_some_and(|taken| !taken)
    }

    #[must_use]
    pub fn free_count(&self) -> usize {
        self.occupied.iter().filter(|taken| !**taken).count()
    }
}

fn reset_ready_slots(mut commands: Commands) {
    commands.insert_resource(ReadySlots::default());
    for index in 0..READY_SLOT_COUNT {
        commands.spawn((
            Name::new(format!("Ready Slot {index}")),
            Sprite::from_color(palette::READY_SLOT, Vec2::splat(SHOOTER_SIZE + 8.0)),
            Transform::from_translation(SlotId(index).position().extend(crate::Z_SLOT)),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<ReadySlots>();
    app.add_systems(OnEnter(GameState::InGame), reset_ready_slots);
}
