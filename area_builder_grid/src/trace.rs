// Copyright 2025 the Area Builder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marching-squares boundary tracing.
//!
//! The scan position is a grid corner. At each step the four cells around that corner
//! form a [`Corners`] code, which selects the direction of the next unit step. Each step
//! emits the current corner, so a traced loop has exactly one point per unit edge.
//!
//! Codes `6` and `9` (diagonal-only occupancy) are ambiguous and are resolved from the
//! previous step so a loop keeps one winding and never crosses itself:
//!
//! - `6` turns left after moving up, otherwise right.
//! - `9` turns up after moving right, otherwise down.

use alloc::vec::Vec;

use crate::grid::Occupancy;
use crate::groups::{find_groups, top_left};
use crate::perimeter::PerimeterLoop;
use crate::types::{CellPos, GridPoint};

bitflags::bitflags! {
    /// Occupancy of the 2×2 block of cells around a grid corner.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Corners: u8 {
        /// Cell up and to the left of the corner.
        const UPPER_LEFT  = 0b0001;
        /// Cell up and to the right of the corner.
        const UPPER_RIGHT = 0b0010;
        /// Cell down and to the left of the corner.
        const LOWER_LEFT  = 0b0100;
        /// Cell down and to the right of the corner.
        const LOWER_RIGHT = 0b1000;
    }
}

impl Corners {
    /// Sample the four cells around `corner`.
    pub fn sample<O: Occupancy + ?Sized>(occupancy: &O, corner: GridPoint) -> Self {
        let GridPoint { x, y } = corner;
        let mut state = Self::empty();
        state.set(Self::UPPER_LEFT, occupancy.is_occupied(x - 1, y - 1));
        state.set(Self::UPPER_RIGHT, occupancy.is_occupied(x, y - 1));
        state.set(Self::LOWER_LEFT, occupancy.is_occupied(x - 1, y));
        state.set(Self::LOWER_RIGHT, occupancy.is_occupied(x, y));
        state
    }
}

/// A unit step between grid corners.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward smaller `y`.
    Up,
    /// Toward larger `y`.
    Down,
    /// Toward smaller `x`.
    Left,
    /// Toward larger `x`.
    Right,
}

impl Direction {
    /// The `(dx, dy)` offset of one step.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Direction of the next step for a corner code.
///
/// `previous` is the direction of the step that reached this corner (`None` at the start
/// of a walk). Returns `None` for the fully empty and fully occupied codes, which never
/// occur on a boundary.
pub fn next_direction(state: Corners, previous: Option<Direction>) -> Option<Direction> {
    use Direction::{Down, Left, Right, Up};
    match state.bits() {
        1 | 5 | 13 => Some(Up),
        2 | 3 | 7 => Some(Right),
        4 | 12 | 14 => Some(Left),
        8 | 10 | 11 => Some(Down),
        6 => Some(if previous == Some(Up) { Left } else { Right }),
        9 => Some(if previous == Some(Right) { Up } else { Down }),
        _ => None,
    }
}

/// Walk one closed boundary starting at `start`.
///
/// # Panics
///
/// Panics if the walk reaches a corner with no boundary around it, which means `start`
/// was not a boundary corner of `occupancy`.
pub fn trace_loop<O: Occupancy + ?Sized>(occupancy: &O, start: GridPoint) -> PerimeterLoop {
    let mut points = Vec::new();
    let mut position = start;
    let mut previous = None;
    loop {
        let state = Corners::sample(occupancy, position);
        let Some(direction) = next_direction(state, previous) else {
            panic!(
                "marching squares reached invalid state {} at corner ({}, {})",
                state.bits(),
                position.x,
                position.y
            );
        };
        points.push(position);
        let (dx, dy) = direction.offset();
        position = position.offset(dx, dy);
        previous = Some(direction);
        if position == start {
            break;
        }
    }
    PerimeterLoop::new(points)
}

/// Exterior and interior boundary loops of an occupancy snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Perimeters {
    /// One loop per contiguous group, in group scan order.
    pub exterior: Vec<PerimeterLoop>,
    /// One loop per enclosed empty region (hole), topmost-then-leftmost first.
    pub interior: Vec<PerimeterLoop>,
}

/// Trace every exterior and interior perimeter.
///
/// Exterior loops start at the top-left cell of each contiguous group. Empty cells whose
/// centers fall inside any exterior loop are enclosed; holes are traced from the top-left
/// remaining enclosed cell until every enclosed cell is accounted for. Enclosed regions
/// are assumed to be simply connected.
pub fn trace_perimeters<O: Occupancy + ?Sized>(occupancy: &O) -> Perimeters {
    let exterior: Vec<PerimeterLoop> = find_groups(occupancy)
        .iter()
        .filter_map(|group| top_left(group))
        .map(|cell| trace_loop(occupancy, cell.corner()))
        .collect();

    let mut enclosed = Vec::new();
    if !exterior.is_empty() {
        for row in 0..occupancy.rows() {
            for column in 0..occupancy.columns() {
                let cell = CellPos::new(column, row);
                if !occupancy.is_occupied(column, row)
                    && exterior.iter().any(|l| l.contains_cell_center(cell))
                {
                    enclosed.push(cell);
                }
            }
        }
    }

    let mut interior = Vec::new();
    while let Some(start) = top_left(&enclosed) {
        let hole = trace_loop(occupancy, start.corner());
        debug_assert!(
            hole.contains_cell_center(start),
            "hole loop must enclose the cell it was traced from"
        );
        enclosed.retain(|&c| c != start && !hole.contains_cell_center(c));
        interior.push(hole);
    }

    Perimeters { exterior, interior }
}
