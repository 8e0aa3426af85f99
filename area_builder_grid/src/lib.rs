// Copyright 2025 the Area Builder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Area Builder Grid: unit-cell occupancy with group search and perimeter tracing.
//!
//! This crate is the integer core of the area builder board. It knows nothing about world
//! coordinates, shapes, or animation; it answers questions about which cells are filled.
//!
//! - [`CellGrid`]: fixed `columns × rows` cells, each optionally claimed by an occupant.
//! - [`find_groups`]: contiguous groups of occupied cells (4-neighbour adjacency).
//! - [`trace_loop`] / [`trace_perimeters`]: marching-squares walk producing exterior loops
//!   (one per group) and interior loops (one per enclosed hole).
//! - [`PerimeterShape`] / [`CompositeRegion`]: the traced polygon-with-holes, with change
//!   detection and an area/perimeter [`Measurement`].
//!
//! Coordinates follow screen conventions (`y` grows downward). Loops are lists of
//! [`GridPoint`] corners one unit apart, so a loop's length in points equals its length in
//! unit edges and equality checks are exact.
//!
//! # Example
//!
//! ```rust
//! use area_builder_grid::{CellGrid, CellRect, CompositeRegion, Measurement, trace_perimeters};
//!
//! // A 2×2 block with a 3×2 block flush against its right edge.
//! let mut grid: CellGrid<u32> = CellGrid::new(8, 6);
//! grid.fill(CellRect::new(1, 1, 2, 2), Some(1));
//! grid.fill(CellRect::new(3, 1, 3, 2), Some(2));
//!
//! let mut region = CompositeRegion::new();
//! assert!(region.rebuild_from(trace_perimeters(&grid)));
//! assert_eq!(region.shape().exterior().len(), 1);
//! assert_eq!(
//!     region.measure(10),
//!     Measurement::Valid { area: 10, perimeter: 14 }
//! );
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod grid;
pub mod groups;
pub mod perimeter;
pub mod region;
pub mod trace;
pub mod types;

pub use grid::{Cell, CellGrid, Occupancy, OccupancyMask};
pub use groups::{find_groups, largest_group, top_left};
pub use perimeter::{PerimeterLoop, PerimeterShape};
pub use region::{CompositeRegion, Measurement};
pub use trace::{Corners, Direction, Perimeters, next_direction, trace_loop, trace_perimeters};
pub use types::{CellPos, CellRect, GridPoint};
