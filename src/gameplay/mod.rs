//! Gameplay domain: the cube grid, the shooter bay, ready slots, turn order,
//! shooters, projectiles and their feedback.

pub(crate) mod bay;
pub(crate) mod effects;
pub(crate) mod endgame;
pub(crate) mod grid;
pub(crate) mod hud;
pub mod lattice;
pub mod layout;
pub(crate) mod planner;
pub(crate) mod projectile;
pub(crate) mod shooter;
pub(crate) mod slots;
pub(crate) mod turns;

use bevy::prelude::*;

use crate::theme::palette;

pub use grid::{CubeGrid, LevelLayout, ShooterSpawnSpec};
pub use shooter::{Shooter, ShooterClicked, ShooterState};
pub use slots::ReadySlots;
pub use turns::TurnCoordinator;

/// Cube and shooter color. A shooter only destroys cubes of its own color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub enum CubeColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

impl CubeColor {
    pub const ALL: [Self; 5] = [
        Self::Red,
        Self::Blue,
        Self::Green,
        Self::Yellow,
        Self::Purple,
    ];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Blue => "Blue",
            Self::Green => "Green",
            Self::Yellow => "Yellow",
            Self::Purple => "Purple",
        }
    }

    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Red => palette::CUBE_RED,
            Self::Blue => palette::CUBE_BLUE,
            Self::Green => palette::CUBE_GREEN,
            Self::Yellow => palette::CUBE_YELLOW,
            Self::Purple => palette::CUBE_PURPLE,
        }
    }
}

pub(super) fn plugin(app: &mut App) {
    app.register_type::<CubeColor>();
    app.add_plugins((
        grid::plugin,
        slots::plugin,
        bay::plugin,
        turns::plugin,
        planner::plugin,
        shooter::plugin,
        projectile::plugin,
        effects::plugin,
        hud::plugin,
        endgame::plugin,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_color_has_a_distinct_tint() {
        for (i, a) in CubeColor::ALL.iter().enumerate() {
            for b in &CubeColor::ALL[i + 1..] {
                assert_ne!(a.color(), b.color(), "{a:?} and {b:?} share a tint");
            }
        }
    }
}
