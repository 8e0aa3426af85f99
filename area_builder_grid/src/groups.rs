// Copyright 2025 the Area Builder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contiguous-group search over occupied cells (4-neighbour adjacency).

use alloc::vec::Vec;

use crate::grid::{Occupancy, OccupancyMask};
use crate::types::CellPos;

const NEIGHBORS: [(i32, i32); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

/// Find every contiguous group of occupied cells.
///
/// Groups are reported in row-major scan order of their first cell. The search keeps its
/// own visited set, so the occupancy source is never mutated and the result is
/// deterministic for a given snapshot.
pub fn find_groups<O: Occupancy + ?Sized>(occupancy: &O) -> Vec<Vec<CellPos>> {
    let (columns, rows) = (occupancy.columns(), occupancy.rows());
    let mut cataloged = OccupancyMask::new(columns, rows);
    let mut groups = Vec::new();
    let mut stack = Vec::new();

    for row in 0..rows {
        for column in 0..columns {
            if !occupancy.is_occupied(column, row) || cataloged.is_occupied(column, row) {
                continue;
            }
            let mut group = Vec::new();
            cataloged.set(column, row, true);
            stack.push(CellPos::new(column, row));
            while let Some(cell) = stack.pop() {
                group.push(cell);
                for (dc, dr) in NEIGHBORS {
                    let (c, r) = (cell.column + dc, cell.row + dr);
                    if occupancy.is_occupied(c, r) && !cataloged.is_occupied(c, r) {
                        cataloged.set(c, r, true);
                        stack.push(CellPos::new(c, r));
                    }
                }
            }
            groups.push(group);
        }
    }
    groups
}

/// The topmost, then leftmost, cell of a set.
pub fn top_left(cells: &[CellPos]) -> Option<CellPos> {
    cells.iter().copied().min_by_key(|c| c.scan_key())
}

/// Index of the group to keep when shedding orphans: the largest by cell count,
/// with ties going to the group found first.
pub fn largest_group(groups: &[Vec<CellPos>]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, group) in groups.iter().enumerate() {
        match best {
            Some(b) if groups[b].len() >= group.len() => {}
            _ => best = Some(i),
        }
    }
    best
}
