//! Fixed-size 2D occupancy with column gravity.
//!
//! Shared by the cube grid and the shooter bay. Row 0 is the "floor" both
//! structures compact toward: the grid's bottom row and the bay's front row.

use std::time::Duration;

use bevy::prelude::*;

/// Row/column address inside a [`Lattice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// One occupant moved by a settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fall<T> {
    pub item: T,
    pub from: CellPos,
    pub to: CellPos,
}

/// Row-major grid of optional occupants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice<T> {
    rows: usize,
    cols: usize,
    cells: Vec<Option<T>>,
}

impl<T: Copy> Lattice<T> {
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    const fn index(&self, pos: CellPos) -> Option<usize> {
        if pos.row < self.rows && pos.col < self.cols {
            Some(pos.row * self.cols + pos.col)
        } else {
            None
        }
    }

    #[must_use]
    pub fn get(&self, pos: CellPos) -> Option<T> {
        self.index(pos).and_then(|i| self.cells[i])
    }

    /// Puts `item` into an empty in-bounds cell. Returns `false` otherwise.
    pub fn place(&mut self, pos: CellPos, item: T) -> bool {
        match self.index(pos) {
            Some(i) if self.cells[i].is_none() => {
                self.cells[i] = Some(item);
                true
            }
            _ => false,
        }
    }

    /// Empties a cell, returning what was there.
    pub fn take(&mut self, pos: CellPos) -> Option<T> {
        self.index(pos).and_then(|i| self.cells[i].take())
    }

    /// First occupied cell (row-major) whose occupant satisfies `pred`.
    #[must_use]
    pub fn find(&self, pred: impl Fn(&T) -> bool) -> Option<CellPos> {
        self.iter().find(|(_, item)| pred(item)).map(|(pos, _)| pos)
    }

    /// Occupied cells in row-major order: rows outer, columns inner.
    pub fn iter(&self) -> impl Iterator<Item = (CellPos, T)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, cell)| {
            cell.map(|item| (CellPos::new(i / self.cols, i % self.cols), item))
        })
    }

    /// Occupants of one row, left to right.
    pub fn row(&self, row: usize) -> impl Iterator<Item = (CellPos, T)> + '_ {
        (0..self.cols).filter_map(move |col| {
            let pos = CellPos::new(row, col);
            self.get(pos).map(|item| (pos, item))
        })
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Empty cells of a column, lowest row first.
    #[must_use]
    pub fn empty_cells_in_column(&self, col: usize) -> Vec<CellPos> {
        if col >= self.cols {
            return Vec::new();
        }
        (0..self.rows)
            .map(|row| CellPos::new(row, col))
            .filter(|&pos| self.get(pos).is_none())
            .collect()
    }

    /// Compacts one column toward row 0, keeping occupant order.
    /// A single call leaves no occupant above an empty cell.
    pub fn settle_column(&mut self, col: usize) -> Vec<Fall<T>> {
        let mut falls = Vec::new();
        if col >= self.cols {
            return falls;
        }
        let mut floor = 0;
        for row in 0..self.rows {
            let from = CellPos::new(row, col);
            let Some(item) = self.take(from) else {
                continue;
            };
            let to = CellPos::new(floor, col);
            self.place(to, item);
            if to != from {
                falls.push(Fall { item, from, to });
            }
            floor += 1;
        }
        falls
    }

    /// Settles every column.
    pub fn settle(&mut self) -> Vec<Fall<T>> {
        (0..self.cols)
            .flat_map(|col| self.settle_column(col))
            .collect()
    }

    /// `true` when no column has an occupant above an empty cell.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        (0..self.cols).all(|col| {
            let mut seen_gap = false;
            (0..self.rows).all(|row| {
                let occupied = self.get(CellPos::new(row, col)).is_some();
                let ok = !(occupied && seen_gap);
                seen_gap |= !occupied;
                ok
            })
        })
    }
}

/// What a delayed settle compacts when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleScope {
    All,
    Column(usize),
}

/// Settles waiting for their delay to pass. Pending settles may overlap.
#[derive(Debug, Clone, Default)]
pub struct DelayedSettles {
    pending: Vec<(Timer, SettleScope)>,
}

impl DelayedSettles {
    pub fn schedule(&mut self, delay: Duration, scope: SettleScope) {
        self.pending
            .push((Timer::new(delay, TimerMode::Once), scope));
    }

    /// Advances all timers; returns the scopes whose delay elapsed, oldest first.
    pub fn tick(&mut self, delta: Duration) -> Vec<SettleScope> {
        let mut due = Vec::new();
        self.pending.retain_mut(|(timer, scope)| {
            timer.tick(delta);
            if timer.is_finished() {
                due.push(*scope);
                false
            } else {
                true
            }
        });
        due
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
