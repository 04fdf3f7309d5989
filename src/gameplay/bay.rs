//! The shooter bay: idle shooters waiting to be sent to a ready slot.
//!
//! Vacating a cell settles only that column after a short delay. Shooters
//! behind the gap glide forward; cells left empty at the back are refilled
//! from the planner's reserve.

use std::time::Duration;

use bevy::prelude::*;

use super::grid::SETTLE_DELAY;
use super::lattice::{CellPos, DelayedSettles, Fall, Lattice, SettleScope};
use super::layout::{BAY_COLUMNS, BAY_ROWS_PER_COLUMN, bay_cell_to_world};
use super::planner::ShooterReserve;
use super::shooter::{BayCell, Travel, shooter_bundle};

/// Shooters settled in one column by a single delayed settle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSettle {
    pub column: usize,
    pub falls: Vec<Fall<Entity>>,
}

/// Bay occupancy. Mutated only through its methods.
#[derive(Resource, Debug, Clone)]
pub struct ShooterBay {
    cells: Lattice<Entity>,
    settles: DelayedSettles,
}

impl Default for ShooterBay {
    fn default() -> Self {
        Self {
            cells: Lattice::new(BAY_ROWS_PER_COLUMN, BAY_COLUMNS),
            settles: DelayedSettles::default(),
        }
    }
}

impl ShooterBay {
    pub fn place(&mut self, pos: CellPos, shooter: Entity) -> bool {
        self.cells.place(pos, shooter)
    }

    #[must_use]
    pub fn get(&self, pos: CellPos) -> Option<Entity> {
        self.cells.get(pos)
    }

    #[must_use]
    pub fn position_of(&self, shooter: Entity) -> Option<CellPos> {
        self.cells.find(|&occupant| occupant == shooter)
    }

    /// Clears the shooter's cell and schedules its column to settle.
    pub fn vacate(&mut self, shooter: Entity) -> Option<CellPos> {
        let pos = self.position_of(shooter)?;
        self.cells.take(pos);
        self.settles
            .schedule(SETTLE_DELAY, SettleScope::Column(pos.col));
        Some(pos)
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.cells.count()
    }

    /// Empty cells of a column, front first.
    #[must_use]
    pub fn empty_cells(&self, column: usize) -> Vec<CellPos> {
        self.cells.empty_cells_in_column(column)
    }

    /// Advances pending settles and applies the ones that are due.
    pub fn tick(&mut self, delta: Duration) -> Vec<ColumnSettle> {
        self.settles
            .tick(delta)
            .into_iter()
            .filter_map(|scope| match scope {
                SettleScope::Column(column) => Some(ColumnSettle {
                    column,
                    falls: self.cells.settle_column(column),
                }),
                SettleScope::All => None,
            })
            .collect()
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.cells.is_settled()
    }
}

/// Applies due column settles: fallen shooters glide to their new cell and
/// the column's empty back cells take shooters from the reserve.
fn settle_bay(
    mut commands: Commands,
    time: Res<Time>,
    mut bay: ResMut<ShooterBay>,
    mut reserve: ResMut<ShooterReserve>,
    mut cells: Query<&mut BayCell>,
) {
    for settle in bay.tick(time.delta()) {
        for fall in settle.falls {
            let Ok(mut cell) = cells.get_mut(fall.item) else {
                continue;
            };
            cell.0 = fall.to;
            commands
                .entity(fall.item)
                .insert(Travel::to(bay_cell_to_world(fall.to)));
        }

        for pos in bay.empty_cells(settle.column) {
            let Some(plan) = reserve.pop() else {
                break;
            };
            let shooter = commands.spawn(shooter_bundle(plan, pos)).id();
            bay.place(pos, shooter);
            debug!(
                "Refilled bay cell {},{} with {} x{}",
                pos.row,
                pos.col,
                plan.color.display_name(),
                plan.shots
            );
        }
    }
}

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<ShooterBay>();
    app.add_systems(
        Update,
        settle_bay
            .in_set(crate::GameSet::Settle)
            .run_if(crate::gameplay_running),
    );
}
