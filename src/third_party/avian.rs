//! Avian2d collider geometry for contact tests.
//!
//! Only the shape queries are used; there is no physics simulation.

use avian2d::collision::collider::contact_query;
use avian2d::prelude::*;
use bevy::prelude::*;

/// Minimum distance between two collider *surfaces*.
///
/// Uses avian2d's GJK-based `contact_query::distance()` under the hood.
/// Game systems call this instead of `contact_query` directly: if the
/// physics engine changes, only this wrapper changes.
///
/// Returns `f32::MAX` if the shape pair is unsupported.
#[must_use]
pub fn surface_distance(c1: &Collider, pos1: Vec2, c2: &Collider, pos2: Vec2) -> f32 {
    contact_query::distance(c1, pos1, 0.0, c2, pos2, 0.0).unwrap_or(f32::MAX)
}

/// `true` when the two shapes touch or overlap.
#[must_use]
pub fn in_contact(c1: &Collider, pos1: Vec2, c2: &Collider, pos2: Vec2) -> bool {
    surface_distance(c1, pos1, c2, pos2) <= 0.0
}
