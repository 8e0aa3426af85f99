// Copyright 2025 the Area Builder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cell storage: the [`Occupancy`] view, the [`CellGrid`] of occupants, and a bit mask.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::types::{CellPos, CellRect};

/// Read-only occupancy view over a fixed `columns × rows` grid.
///
/// Algorithms in this crate ([`find_groups`](crate::find_groups),
/// [`trace_perimeters`](crate::trace_perimeters)) are written against this trait so they
/// can run over a [`CellGrid`], an [`OccupancyMask`], or a caller-provided view.
pub trait Occupancy {
    /// Number of columns.
    fn columns(&self) -> i32;

    /// Number of rows.
    fn rows(&self) -> i32;

    /// Whether the cell is occupied. Out-of-range cells are never occupied.
    fn is_occupied(&self, column: i32, row: i32) -> bool;
}

/// Snapshot of one grid square.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell<P> {
    /// Column index.
    pub column: i32,
    /// Row index.
    pub row: i32,
    /// Whatever currently claims the cell.
    pub occupant: Option<P>,
}

impl<P> Cell<P> {
    /// Position of this cell.
    pub const fn pos(&self) -> CellPos {
        CellPos::new(self.column, self.row)
    }
}

/// Fixed-size grid of cells, each optionally claimed by an occupant `P`.
///
/// Mutation is direct and unvalidated: callers keep footprints consistent.
#[derive(Clone, PartialEq, Eq)]
pub struct CellGrid<P> {
    columns: i32,
    rows: i32,
    cells: Vec<Option<P>>,
}

impl<P: Copy + Eq> CellGrid<P> {
    /// Create an empty grid. Both dimensions must be positive.
    pub fn new(columns: i32, rows: i32) -> Self {
        assert!(columns > 0 && rows > 0, "grid dimensions must be positive");
        Self {
            columns,
            rows,
            cells: vec![None; (columns * rows) as usize],
        }
    }

    #[inline]
    fn slot(&self, column: i32, row: i32) -> Option<usize> {
        if column < 0 || row < 0 || column >= self.columns || row >= self.rows {
            return None;
        }
        Some((row * self.columns + column) as usize)
    }

    /// Whether the indices address a cell of this grid.
    pub fn contains(&self, column: i32, row: i32) -> bool {
        self.slot(column, row).is_some()
    }

    /// The cell at `(column, row)`, or `None` when out of range.
    pub fn get(&self, column: i32, row: i32) -> Option<Cell<P>> {
        let slot = self.slot(column, row)?;
        Some(Cell {
            column,
            row,
            occupant: self.cells[slot],
        })
    }

    /// The occupant of `(column, row)`; `None` when empty or out of range.
    pub fn occupant(&self, column: i32, row: i32) -> Option<P> {
        self.slot(column, row).and_then(|slot| self.cells[slot])
    }

    /// Replace the occupant of a cell. Out-of-range writes are ignored.
    pub fn set_occupant(&mut self, column: i32, row: i32, occupant: Option<P>) {
        debug_assert!(
            self.contains(column, row),
            "cell ({column}, {row}) is outside the grid"
        );
        if let Some(slot) = self.slot(column, row) {
            self.cells[slot] = occupant;
        }
    }

    /// Set every cell of `rect` to `occupant`.
    pub fn fill(&mut self, rect: CellRect, occupant: Option<P>) {
        for cell in rect.cells() {
            self.set_occupant(cell.column, cell.row, occupant);
        }
    }

    /// Empty every cell.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Occupied cells in row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = Cell<P>> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, occupant)| {
            let occupant = (*occupant)?;
            #[allow(
                clippy::cast_possible_truncation,
                reason = "slot count is bounded by columns * rows, which fits in i32"
            )]
            let i = i as i32;
            Some(Cell {
                column: i % self.columns,
                row: i / self.columns,
                occupant: Some(occupant),
            })
        })
    }
}

impl<P: Copy + Eq> Occupancy for CellGrid<P> {
    fn columns(&self) -> i32 {
        self.columns
    }

    fn rows(&self) -> i32 {
        self.rows
    }

    fn is_occupied(&self, column: i32, row: i32) -> bool {
        self.occupant(column, row).is_some()
    }
}

impl<P: Copy + Eq> Debug for CellGrid<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CellGrid")
            .field("columns", &self.columns)
            .field("rows", &self.rows)
            .field("occupied", &self.occupied_count())
            .finish_non_exhaustive()
    }
}

/// Packed boolean grid.
///
/// Used as the visited set during group search and as a lightweight occupancy
/// source for tests and benchmarks.
#[derive(Clone, PartialEq, Eq)]
pub struct OccupancyMask {
    columns: i32,
    rows: i32,
    bits: Vec<u64>,
}

impl OccupancyMask {
    /// Create an all-empty mask.
    pub fn new(columns: i32, rows: i32) -> Self {
        assert!(columns >= 0 && rows >= 0, "mask dimensions must not be negative");
        let len = (columns * rows) as usize;
        Self {
            columns,
            rows,
            bits: vec![0; len.div_ceil(64)],
        }
    }

    /// Build a mask from text rows where `#` marks an occupied cell.
    ///
    /// ```
    /// use area_builder_grid::{Occupancy, OccupancyMask};
    ///
    /// let mask = OccupancyMask::from_pattern(&["#.", "##"]);
    /// assert!(mask.is_occupied(0, 0));
    /// assert!(!mask.is_occupied(1, 0));
    /// ```
    pub fn from_pattern(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "patterns are small, hand-written grids"
        )]
        let mut mask = Self::new(width as i32, rows.len() as i32);
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.bytes().enumerate() {
                if ch == b'#' {
                    #[allow(
                        clippy::cast_possible_truncation,
                        reason = "patterns are small, hand-written grids"
                    )]
                    mask.set(c as i32, r as i32, true);
                }
            }
        }
        mask
    }

    #[inline]
    fn bit(&self, column: i32, row: i32) -> Option<(usize, u64)> {
        if column < 0 || row < 0 || column >= self.columns || row >= self.rows {
            return None;
        }
        let i = (row * self.columns + column) as usize;
        Some((i / 64, 1_u64 << (i % 64)))
    }

    /// Set or clear a cell. Out-of-range writes are ignored.
    pub fn set(&mut self, column: i32, row: i32, occupied: bool) {
        if let Some((word, mask)) = self.bit(column, row) {
            if occupied {
                self.bits[word] |= mask;
            } else {
                self.bits[word] &= !mask;
            }
        }
    }

    /// Set every cell of `rect`.
    pub fn fill(&mut self, rect: CellRect, occupied: bool) {
        for cell in rect.cells() {
            self.set(cell.column, cell.row, occupied);
        }
    }

    /// Clear every cell.
    pub fn clear(&mut self) {
        self.bits.fill(0);
    }

    /// Number of occupied cells.
    pub fn count(&self) -> u32 {
        self.bits.iter().map(|w| w.count_ones()).sum()
    }
}

impl Occupancy for OccupancyMask {
    fn columns(&self) -> i32 {
        self.columns
    }

    fn rows(&self) -> i32 {
        self.rows
    }

    fn is_occupied(&self, column: i32, row: i32) -> bool {
        self.bit(column, row)
            .is_some_and(|(word, mask)| self.bits[word] & mask != 0)
    }
}

impl Debug for OccupancyMask {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OccupancyMask")
            .field("columns", &self.columns)
            .field("rows", &self.rows)
            .field("occupied", &self.count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_is_none_and_unoccupied() {
        let grid: CellGrid<u32> = CellGrid::new(3, 2);
        assert!(grid.get(3, 0).is_none());
        assert!(grid.get(0, -1).is_none());
        assert!(!grid.is_occupied(-1, 0));
        assert!(!grid.is_occupied(0, 2));
        assert_eq!(grid.get(2, 1).map(|c| c.occupant), Some(None));
    }

    #[test]
    fn set_and_fill_occupants() {
        let mut grid: CellGrid<u32> = CellGrid::new(4, 4);
        grid.set_occupant(1, 1, Some(7));
        assert_eq!(grid.occupant(1, 1), Some(7));
        grid.fill(CellRect::new(2, 0, 2, 3), Some(9));
        assert_eq!(grid.occupied_count(), 7);
        let cells: Vec<_> = grid.occupied_cells().map(|c| c.pos()).collect();
        assert_eq!(cells[0], CellPos::new(2, 0));
        assert_eq!(cells[2], CellPos::new(1, 1));
        grid.fill(CellRect::new(2, 0, 2, 3), None);
        assert_eq!(grid.occupied_count(), 1);
        grid.clear();
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "outside the grid")]
    fn writing_outside_grid_is_trapped() {
        let mut grid: CellGrid<u32> = CellGrid::new(2, 2);
        grid.set_occupant(2, 0, Some(1));
    }

    #[test]
    fn mask_pattern_and_count() {
        let mask = OccupancyMask::from_pattern(&["##.", "..#"]);
        assert_eq!(mask.columns(), 3);
        assert_eq!(mask.rows(), 2);
        assert_eq!(mask.count(), 3);
        assert!(mask.is_occupied(2, 1));
        assert!(!mask.is_occupied(3, 1));
    }

    #[test]
    fn mask_spans_word_boundaries() {
        let mut mask = OccupancyMask::new(70, 2);
        mask.set(69, 1, true);
        mask.set(63, 0, true);
        assert!(mask.is_occupied(69, 1));
        assert!(mask.is_occupied(63, 0));
        assert_eq!(mask.count(), 2);
        mask.set(63, 0, false);
        assert_eq!(mask.count(), 1);
    }
}
