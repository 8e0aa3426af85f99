// Copyright 2025 the Area Builder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Area Builder Board: a Kurbo-native shape placement board.
//!
//! Movable rectangles are dropped near a grid board; the board snaps each to the nearest
//! free spot, keeps placed shapes in one contiguous composite, and reports the
//! composite's outline, area, and perimeter.
//!
//! - [`MovableShape`] / [`ShapeArena`]: shapes with a home position, motion toward a
//!   destination, and fading. Handles are generational [`ShapeId`]s.
//! - [`Board`]: the placement coordinator. Incoming shapes reserve cells for collision
//!   and adjacency as soon as they are placed but only join the composite once they land.
//! - [`Scene`]: routes grab/drag/release gestures and frame ticks between shapes and
//!   boards.
//! - [`BuildSpec`]: area, perimeter, and color-share targets checked against a board.
//!
//! Cell-level work (groups, perimeter tracing, change detection) lives in
//! [`area_builder_grid`]; its [`Measurement`] and [`PerimeterShape`] are re-exported here.
//!
//! ## Placement rules
//!
//! A shape is accepted when its color is accepted and its bounds touch the board. The
//! search walks square rings of candidate cells outward from the shape's position and
//! takes the nearest cell where the footprint fits, is free of resident and incoming
//! shapes, and (on a non-empty compose board) shares an edge with one of them.
//!
//! Whenever a shape lands or leaves, groups other than the largest are sent home.
//!
//! ## Diagnostics
//!
//! Placement decisions, orphan releases, and composite changes are logged through the
//! [`log`] facade at `debug` level; rejected candidates at `trace`. Install any logger to
//! see them.
//!
//! # Example
//!
//! ```rust
//! use area_builder_board::{Board, BoardConfig, Color, Measurement, MovableShape, Scene};
//! use kurbo::{Point, Size};
//!
//! let mut scene = Scene::new();
//! let board = scene.add_board(Board::new(BoardConfig::new(
//!     Size::new(320.0, 192.0),
//!     32.0,
//!     Point::new(100.0, 0.0),
//! )));
//!
//! let teal = Color::rgb(0, 128, 128);
//! let square = scene.add_shape(MovableShape::new(Size::new(64.0, 64.0), teal, Point::ZERO));
//! let wide = scene.add_shape(MovableShape::new(Size::new(96.0, 64.0), teal, Point::ZERO));
//!
//! for (id, at) in [(square, Point::new(130.0, 30.0)), (wide, Point::new(170.0, 40.0))] {
//!     scene.grab(id);
//!     scene.drag(id, at);
//!     assert_eq!(scene.release(id), Some(board));
//!     for _ in 0..10 {
//!         scene.step(0.1);
//!     }
//! }
//!
//! assert_eq!(
//!     scene.board(board).unwrap().measurement(),
//!     Measurement::Valid { area: 10, perimeter: 14 }
//! );
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod arena;
mod board;
mod build_spec;
mod config;
mod error;
mod events;
mod placement;
mod scene;
mod shape;
mod types;
mod util;

pub use area_builder_grid::{CellPos, CellRect, Measurement, PerimeterLoop, PerimeterShape};

pub use arena::{ShapeArena, ShapeEvent};
pub use board::Board;
pub use build_spec::{BuildSpec, ColorProportion};
pub use config::{BoardConfig, DisplayToggles, SharedFlag};
pub use error::BoardError;
pub use events::BoardEvent;
pub use scene::{BoardId, Scene};
pub use shape::{ANIMATION_SPEED, FADE_RATE, MovableShape, StepOutcome};
pub use types::{AcceptedColor, Color, Fraction, ReleaseMode, ShapeFlags, ShapeId};
