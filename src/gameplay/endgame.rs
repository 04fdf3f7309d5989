//! Victory detection: the level is won once the grid is empty.

use bevy::prelude::*;

use super::grid::{CubeGrid, CubeProgress};
use crate::audio::SoundEffect;
use crate::menus::Menu;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        detect_victory
            .in_set(crate::GameSet::Resolve)
            .run_if(crate::gameplay_running),
    );
}

/// Opens the victory overlay when the last cube is gone. A level that
/// started empty is never won.
fn detect_victory(
    grid: Res<CubeGrid>,
    progress: Res<CubeProgress>,
    mut next_menu: ResMut<NextState<Menu>>,
    mut sounds: MessageWriter<SoundEffect>,
) {
    if progress.initial == 0 || grid.total_count() > 0 {
        return;
    }
    info!("All {} cubes cleared", progress.initial);
    next_menu.set(Menu::Victory);
    sounds.write(SoundEffect::Win);
}
