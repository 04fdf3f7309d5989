//! The cube grid: occupancy, removal with delayed gravity, front-row
//! targeting, and the per-color shot batches derived from the layout.

use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

use super::CubeColor;
use super::lattice::{CellPos, DelayedSettles, Fall, Lattice, SettleScope};
use super::layout::{CUBE_SIZE, GRID_COLS, GRID_ROWS, grid_cell_to_world};
use crate::screens::GameState;

// === Constants ===

/// Largest number of shots one shooter carries.
pub const SHOTS_PER_SHOOTER: u32 = 20;

/// Delay between a cube leaving the grid and the grid settling.
pub const SETTLE_DELAY: Duration = Duration::from_millis(50);

// === Components ===

/// A cube in the grid.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Cube {
    pub color: CubeColor,
}

// === Resources ===

/// Occupant of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCube {
    pub entity: Entity,
    pub color: CubeColor,
}

/// The live cube grid. Mutated only through its methods.
#[derive(Resource, Debug, Clone)]
pub struct CubeGrid {
    cells: Lattice<GridCube>,
    settles: DelayedSettles,
}

impl Default for CubeGrid {
    fn default() -> Self {
        Self::new(GRID_ROWS, GRID_COLS)
    }
}

impl CubeGrid {
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: Lattice::new(rows, cols),
            settles: DelayedSettles::default(),
        }
    }

    pub fn insert(&mut self, pos: CellPos, entity: Entity, color: CubeColor) -> bool {
        self.cells.place(pos, GridCube { entity, color })
    }

    #[must_use]
    pub fn get(&self, pos: CellPos) -> Option<GridCube> {
        self.cells.get(pos)
    }

    #[must_use]
    pub fn position_of(&self, entity: Entity) -> Option<CellPos> {
        self.cells.find(|cube| cube.entity == entity)
    }

    /// Clears the cube's cell and schedules a grid settle.
    /// Returns `None` (and schedules nothing) if the cube is not in the grid,
    /// so a cube can only be removed once.
    pub fn remove_cube(&mut self, entity: Entity) -> Option<CellPos> {
        let pos = self.position_of(entity)?;
        self.cells.take(pos);
        self.settles.schedule(SETTLE_DELAY, SettleScope::All);
        Some(pos)
    }

    #[must_use]
    pub fn total_count(&self) -> usize {
        self.cells.count()
    }

    /// Leftmost cube of `color` in the front row.
    #[must_use]
    pub fn first_row_target(&self, color: CubeColor) -> Option<Entity> {
        self.cells
            .row(0)
            .find(|(_, cube)| cube.color == color)
            .map(|(_, cube)| cube.entity)
    }

    /// Per-color shot batches, colors in row-major first-seen order.
    #[must_use]
    pub fn spawn_spec(&self) -> ShooterSpawnSpec {
        let mut counts: Vec<(CubeColor, u32)> = Vec::new();
        for (_, cube) in self.cells.iter() {
            match counts.iter_mut().find(|(color, _)| *color == cube.color) {
                Some((_, count)) => *count += 1,
                None => counts.push((cube.color, 1)),
            }
        }
        ShooterSpawnSpec {
            entries: counts
                .into_iter()
                .map(|(color, count)| (color, split_into_batches(count)))
                .collect(),
        }
    }

    /// Advances pending settles and applies the ones that are due.
    pub fn tick(&mut self, delta: Duration) -> Vec<Fall<GridCube>> {
        let due = self.settles.tick(delta);
        if due.is_empty() {
            return Vec::new();
        }
        self.cells.settle()
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.cells.is_settled()
    }
}

/// Splits `count` shots into full batches plus one remainder batch.
#[must_use]
pub fn split_into_batches(count: u32) -> Vec<u32> {
    let mut batches = vec![SHOTS_PER_SHOOTER; (count / SHOTS_PER_SHOOTER) as usize];
    if count % SHOTS_PER_SHOOTER != 0 {
        batches.push(count % SHOTS_PER_SHOOTER);
    }
    batches
}

/// Color → ordered shot batches, captured when the grid is built.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct ShooterSpawnSpec {
    pub entries: Vec<(CubeColor, Vec<u32>)>,
}

impl ShooterSpawnSpec {
    #[must_use]
    pub fn total_shots(&self) -> u32 {
        self.entries
            .iter()
            .flat_map(|(_, batches)| batches)
            .sum()
    }
}

/// Cube count when the level started. Drives the progress bar.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct CubeProgress {
    pub initial: usize,
}

impl CubeProgress {
    /// Fraction of cubes cleared, `0.0..=1.0`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cleared_fraction(&self, remaining: usize) -> f32 {
        if self.initial == 0 {
            return 0.0;
        }
        1.0 - remaining as f32 / self.initial as f32
    }
}

/// Explicit level layout, row 0 first. Without it a random full grid is used.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct LevelLayout {
    pub rows: Vec<Vec<Option<CubeColor>>>,
}

impl LevelLayout {
    /// A full grid of uniformly random colors.
    pub fn random(rng: &mut impl Rng, rows: usize, cols: usize) -> Self {
        Self {
            rows: (0..rows)
                .map(|_| {
                    (0..cols)
                        .map(|_| Some(CubeColor::ALL[rng.random_range(0..CubeColor::ALL.len())]))
                        .collect()
                })
                .collect(),
        }
    }

    /// `count` cubes of one color, filling rows bottom-up.
    #[must_use]
    pub fn uniform(color: CubeColor, count: usize) -> Self {
        let rows = (0..count.div_ceil(GRID_COLS))
            .map(|row| {
                (0..GRID_COLS)
                    .map(|col| (row * GRID_COLS + col < count).then_some(color))
                    .collect()
            })
            .collect();
        Self { rows }
    }
}

// === Systems ===

pub(super) fn spawn_grid(mut commands: Commands, layout: Option<Res<LevelLayout>>) {
    let layout = layout.map_or_else(
        || LevelLayout::random(&mut rand::rng(), GRID_ROWS, GRID_COLS),
        |layout| layout.clone(),
    );

    let mut grid = CubeGrid::default();
    for (row, cells) in layout.rows.iter().enumerate() {
        for (col, color) in cells.iter().enumerate() {
            let Some(color) = *color else {
                continue;
            };
            let pos = CellPos::new(row, col);
            let entity = commands
                .spawn((
                    Name::new(format!("Cube {row},{col}")),
                    Cube { color },
                    Sprite::from_color(color.color(), Vec2::splat(CUBE_SIZE)),
                    Transform::from_translation(grid_cell_to_world(pos).extend(crate::Z_CUBE)),
                    DespawnOnExit(GameState::InGame),
                ))
                .id();
            if !grid.insert(pos, entity, color) {
                error!("Level layout cell {row},{col} is outside the grid; dropping cube");
                commands.entity(entity).despawn();
            }
        }
    }

    let spec = grid.spawn_spec();
    info!("Shooter spawn data:");
    for (color, batches) in &spec.entries {
        info!("  {}: {batches:?}", color.display_name());
    }

    commands.insert_resource(CubeProgress {
        initial: grid.total_count(),
    });
    commands.insert_resource(spec);
    commands.insert_resource(grid);
}

/// Applies due settles, snapping fallen cubes to their new cells.
fn settle_grid(
    time: Res<Time>,
    mut grid: ResMut<CubeGrid>,
    mut cubes: Query<&mut Transform, With<Cube>>,
) {
    for fall in grid.tick(time.delta()) {
        let Ok(mut transform) = cubes.get_mut(fall.item.entity) else {
            continue;
        };
        let z = transform.translation.z;
        transform.translation = grid_cell_to_world(fall.to).extend(z);
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Cube>();
    app.init_resource::<CubeGrid>()
        .init_resource::<ShooterSpawnSpec>()
        .init_resource::<CubeProgress>();
    app.add_systems(OnEnter(GameState::InGame), spawn_grid);
    app.add_systems(
        Update,
        settle_grid
            .in_set(crate::GameSet::Settle)
            .run_if(crate::gameplay_running),
    );
}
