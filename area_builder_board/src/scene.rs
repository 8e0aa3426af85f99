// Copyright 2025 the Area Builder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene driver.
//!
//! ## Overview
//!
//! Owns the [`ShapeArena`] and every [`Board`], and routes user gestures and frame ticks
//! between them.
//!
//! ## Gestures
//!
//! - [`Scene::grab`] marks a shape user-controlled and tells every board, so a resident
//!   is evicted and an incoming shape gives up its reservation.
//! - [`Scene::drag`] moves the held shape.
//! - [`Scene::release`] offers the shape to each board in insertion order. The first
//!   board that accepts it wins; otherwise it animates home. Boards that were watching
//!   the shape then release any orphans it left behind.
//!
//! ## Ticks
//!
//! [`Scene::step`] advances all shapes, turns arrivals into residency on the board the
//! shape was heading for, and drops shapes that made it home or faded out.

use alloc::vec::Vec;

use kurbo::Point;
use log::debug;

use crate::arena::{ShapeArena, ShapeEvent};
use crate::board::Board;
use crate::events::BoardEvent;
use crate::shape::MovableShape;
use crate::types::{ReleaseMode, ShapeId};

/// Index of a board within a [`Scene`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoardId(usize);

/// Shapes and the boards they can be placed on.
#[derive(Default)]
pub struct Scene {
    shapes: ShapeArena,
    boards: Vec<Board>,
    held: Option<ShapeId>,
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scene")
            .field("shapes", &self.shapes.len())
            .field("boards", &self.boards.len())
            .field("held", &self.held)
            .finish_non_exhaustive()
    }
}

impl Scene {
    /// An empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a board. Release tries boards in the order they were added.
    pub fn add_board(&mut self, board: Board) -> BoardId {
        self.boards.push(board);
        BoardId(self.boards.len() - 1)
    }

    /// Borrow a board.
    pub fn board(&self, id: BoardId) -> Option<&Board> {
        self.boards.get(id.0)
    }

    /// Mutably borrow a board, for draining events or changing settings.
    pub fn board_mut(&mut self, id: BoardId) -> Option<&mut Board> {
        self.boards.get_mut(id.0)
    }

    /// All boards with their ids.
    pub fn boards(&self) -> impl Iterator<Item = (BoardId, &Board)> + '_ {
        self.boards.iter().enumerate().map(|(i, b)| (BoardId(i), b))
    }

    /// The shapes.
    pub fn shapes(&self) -> &ShapeArena {
        &self.shapes
    }

    /// The shapes, mutably.
    pub fn shapes_mut(&mut self) -> &mut ShapeArena {
        &mut self.shapes
    }

    /// Add a shape to the scene, not on any board.
    pub fn add_shape(&mut self, shape: MovableShape) -> ShapeId {
        self.shapes.insert(shape)
    }

    /// The shape currently held by the user.
    pub fn held(&self) -> Option<ShapeId> {
        self.held
    }

    /// The user picked up a shape.
    pub fn grab(&mut self, id: ShapeId) {
        let Some(shape) = self.shapes.get_mut(id) else {
            return;
        };
        shape.set_user_controlled(true);
        self.held = Some(id);
        for board in &mut self.boards {
            board.shape_grabbed(&mut self.shapes, id);
        }
    }

    /// The user moved a held shape.
    pub fn drag(&mut self, id: ShapeId, position: Point) {
        if let Some(shape) = self.shapes.get_mut(id) {
            debug_assert!(shape.is_user_controlled(), "only held shapes can be dragged");
            shape.set_position(position);
        }
    }

    /// The user let go of a shape. Returns the board that took it, if any.
    pub fn release(&mut self, id: ShapeId) -> Option<BoardId> {
        let shape = self.shapes.get_mut(id)?;
        shape.set_user_controlled(false);
        if self.held == Some(id) {
            self.held = None;
        }
        let placed = self
            .boards
            .iter_mut()
            .position(|board| board.place_shape(&mut self.shapes, id))
            .map(BoardId);
        for board in &mut self.boards {
            board.shape_dropped(&mut self.shapes, id);
        }
        if placed.is_none() {
            debug!("{id:?} found no board, heading home");
            if let Some(shape) = self.shapes.get_mut(id) {
                shape.return_to_origin(true);
            }
        }
        placed
    }

    /// Drain the notifications of every board, tagged with the board they came from.
    ///
    /// Boards queue events until drained; call this once per frame alongside
    /// [`step`](Self::step).
    pub fn take_events(&mut self) -> Vec<(BoardId, BoardEvent)> {
        self.boards
            .iter_mut()
            .enumerate()
            .flat_map(|(i, board)| {
                board
                    .take_events()
                    .into_iter()
                    .map(move |event| (BoardId(i), event))
            })
            .collect()
    }

    /// Advance the scene by `dt` seconds.
    pub fn step(&mut self, dt: f64) -> Vec<ShapeEvent> {
        let events = self.shapes.step(dt);
        for event in &events {
            match *event {
                ShapeEvent::Landed(id) => {
                    for board in &mut self.boards {
                        if board.shape_landed(&mut self.shapes, id) {
                            break;
                        }
                    }
                }
                ShapeEvent::ReturnedToOrigin(id) | ShapeEvent::FadedOut(id) => {
                    self.shapes.remove(id);
                }
            }
        }
        events
    }

    /// Send a shape straight to a cell of a board, as when showing a solution.
    pub fn place_directly(&mut self, board: BoardId, column: i32, row: i32, id: ShapeId) {
        if let Some(b) = self.boards.get_mut(board.0) {
            b.add_shape_directly_to_cell(&mut self.shapes, column, row, id);
        }
    }

    /// Clear a board.
    pub fn release_all(&mut self, board: BoardId, mode: ReleaseMode) {
        if let Some(b) = self.boards.get_mut(board.0) {
            b.release_all(&mut self.shapes, mode);
        }
    }

    /// Break a resident shape into unit squares in place, returning the squares.
    ///
    /// The original shape is removed from the scene.
    pub fn replace_shape_with_unit_squares(&mut self, board: BoardId, id: ShapeId) -> Vec<ShapeId> {
        let Some(b) = self.boards.get_mut(board.0) else {
            return Vec::new();
        };
        if !b.is_resident(id) {
            return Vec::new();
        }
        let squares = self.shapes.decompose_into_squares(id, b.unit_length());
        b.replace_shape_with_unit_squares(&self.shapes, id, &squares);
        self.shapes.remove(id);
        squares
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size};

    use super::*;
    use crate::{BoardConfig, Color, Measurement};

    const UNIT: f64 = 10.0;
    const GREEN: Color = Color::rgb(0, 160, 0);

    fn run(scene: &mut Scene, seconds: f64) {
        let mut t = 0.0;
        while t < seconds {
            scene.step(0.02);
            t += 0.02;
        }
    }

    fn scene_with_board() -> (Scene, BoardId) {
        let mut scene = Scene::new();
        let board = scene.add_board(Board::new(BoardConfig::new(
            Size::new(60.0, 60.0),
            UNIT,
            Point::new(100.0, 0.0),
        )));
        (scene, board)
    }

    #[test]
    fn drag_and_drop_onto_board() {
        let (mut scene, board) = scene_with_board();
        let id = scene.add_shape(MovableShape::unit_square(UNIT, GREEN, Point::ZERO));
        scene.grab(id);
        assert_eq!(scene.held(), Some(id));
        scene.drag(id, Point::new(118.0, 21.0));
        assert_eq!(scene.release(id), Some(board));
        assert_eq!(scene.held(), None);

        run(&mut scene, 1.0);
        let b = scene.board_mut(board).unwrap();
        assert_eq!(b.occupant(2, 2), Some(id));
        assert_eq!(
            b.measurement(),
            Measurement::Valid {
                area: 1,
                perimeter: 4
            }
        );
        assert!(b.take_events().contains(&BoardEvent::ShapeResident(id)));
    }

    #[test]
    fn missed_drop_goes_home_and_leaves_scene() {
        let (mut scene, _) = scene_with_board();
        let id = scene.add_shape(MovableShape::unit_square(UNIT, GREEN, Point::ZERO));
        scene.grab(id);
        scene.drag(id, Point::new(20.0, 80.0));
        assert_eq!(scene.release(id), None);
        assert!(scene.shapes().get(id).is_some_and(MovableShape::is_animating));
        run(&mut scene, 2.0);
        assert!(!scene.shapes().is_alive(id));
    }

    #[test]
    fn second_board_takes_what_the_first_refuses() {
        let mut scene = Scene::new();
        let reds = scene.add_board(Board::new(
            BoardConfig::new(Size::new(40.0, 40.0), UNIT, Point::ZERO)
                .with_accepted_color(crate::AcceptedColor::Only(Color::rgb(255, 0, 0))),
        ));
        let any = scene.add_board(Board::new(BoardConfig::new(
            Size::new(40.0, 40.0),
            UNIT,
            Point::new(30.0, 0.0),
        )));
        let id = scene.add_shape(MovableShape::unit_square(UNIT, GREEN, Point::new(0.0, 100.0)));
        scene.grab(id);
        scene.drag(id, Point::new(31.0, 2.0));
        assert_eq!(scene.release(id), Some(any));
        assert!(scene.board(any).is_some_and(|b| b.is_incoming(id)));
        assert!(scene.board(reds).is_some_and(Board::is_empty));
    }

    #[test]
    fn regrab_moves_shape_between_cells() {
        let (mut scene, board) = scene_with_board();
        let id = scene.add_shape(MovableShape::unit_square(UNIT, GREEN, Point::ZERO));
        scene.grab(id);
        scene.drag(id, Point::new(100.0, 0.0));
        scene.release(id);
        run(&mut scene, 0.1);
        assert!(scene.board(board).is_some_and(|b| b.is_resident(id)));

        scene.grab(id);
        assert!(scene.board(board).is_some_and(Board::is_empty));
        scene.drag(id, Point::new(150.0, 50.0));
        scene.release(id);
        run(&mut scene, 0.1);
        assert_eq!(scene.board(board).and_then(|b| b.occupant(5, 5)), Some(id));
    }

    #[test]
    fn take_events_drains_every_board() {
        let mut scene = Scene::new();
        let first = scene.add_board(Board::new(BoardConfig::new(
            Size::new(40.0, 40.0),
            UNIT,
            Point::ZERO,
        )));
        let second = scene.add_board(Board::new(BoardConfig::new(
            Size::new(40.0, 40.0),
            UNIT,
            Point::new(100.0, 0.0),
        )));
        let a = scene.add_shape(MovableShape::unit_square(UNIT, GREEN, Point::new(0.0, 80.0)));
        let c = scene.add_shape(MovableShape::unit_square(UNIT, GREEN, Point::new(100.0, 80.0)));
        scene.place_directly(first, 0, 0, a);
        scene.place_directly(second, 1, 1, c);
        run(&mut scene, 1.0);

        let events = scene.take_events();
        assert!(events.contains(&(first, BoardEvent::ShapeResident(a))));
        assert!(events.contains(&(second, BoardEvent::ShapeResident(c))));
        assert!(events.contains(&(second, BoardEvent::CompositeShapeChanged)));
        assert!(scene.take_events().is_empty());
        assert!(scene.board_mut(first).is_some_and(|b| b.take_events().is_empty()));
    }

    #[test]
    fn fade_release_removes_shapes() {
        let (mut scene, board) = scene_with_board();
        let a = scene.add_shape(MovableShape::unit_square(UNIT, GREEN, Point::ZERO));
        let c = scene.add_shape(MovableShape::unit_square(UNIT, GREEN, Point::ZERO));
        scene.place_directly(board, 0, 0, a);
        scene.place_directly(board, 1, 0, c);
        run(&mut scene, 2.0);
        assert_eq!(
            scene.board(board).map(Board::measurement),
            Some(Measurement::Valid {
                area: 2,
                perimeter: 6
            })
        );
        scene.release_all(board, ReleaseMode::Fade);
        run(&mut scene, 1.0);
        assert!(scene.shapes().is_empty());
        assert_eq!(
            scene.board(board).map(Board::measurement),
            Some(Measurement::ZERO)
        );
    }

    #[test]
    fn decomposed_squares_replace_block() {
        let (mut scene, board) = scene_with_board();
        let block = scene.add_shape(MovableShape::new(
            Size::new(30.0, 20.0),
            GREEN,
            Point::ZERO,
        ));
        scene.place_directly(board, 2, 3, block);
        run(&mut scene, 2.0);
        let squares = scene.replace_shape_with_unit_squares(board, block);
        assert_eq!(squares.len(), 6);
        assert!(!scene.shapes().is_alive(block));
        let b = scene.board(board).unwrap();
        assert_eq!(b.resident_shapes().count(), 6);
        assert_eq!(
            b.measurement(),
            Measurement::Valid {
                area: 6,
                perimeter: 10
            }
        );
        // Grabbing one square leaves the rest as one piece.
        scene.grab(squares[0]);
        let b = scene.board(board).unwrap();
        assert_eq!(
            b.measurement(),
            Measurement::Valid {
                area: 5,
                perimeter: 10
            }
        );
    }
}
