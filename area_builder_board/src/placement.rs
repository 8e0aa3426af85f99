// Copyright 2025 the Area Builder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nearest-valid-location search for shapes released over a board.

use alloc::vec::Vec;

use area_builder_grid::{CellPos, CellRect, Occupancy};
use kurbo::Point;
use log::{debug, trace};

use crate::arena::ShapeArena;
use crate::board::Board;
use crate::types::ShapeId;
use crate::util::floor_to_i32;

impl Board {
    /// Try to place a released shape at the valid location nearest its current position.
    ///
    /// On success the shape's destination is set to the chosen cell, its footprint is
    /// reserved immediately, and it becomes resident once it stops animating. Returns
    /// `false` without touching any state when the color is not accepted, the shape does
    /// not overlap the board, or no valid location exists.
    ///
    /// Placing a shape that is still user-controlled is a programming error.
    pub fn place_shape(&mut self, shapes: &mut ShapeArena, id: ShapeId) -> bool {
        let Some(shape) = shapes.get(id) else {
            return false;
        };
        debug_assert!(
            !shape.is_user_controlled(),
            "shapes can't be placed while controlled by the user"
        );
        if !self.accepted_color.accepts(shape.color()) || !self.shape_overlaps_board(shape) {
            return false;
        }
        let (width, height) = self.footprint_size(shape.size());
        let Some(cell) = self.find_open_location(shape.position(), width, height) else {
            debug!("no room for {id:?}");
            return false;
        };
        debug!("placing {id:?} at ({}, {})", cell.column, cell.row);
        let compose = self.compose;
        if let Some(shape) = shapes.get_mut(id) {
            shape.set_invisible_when_still(compose);
        }
        self.add_incoming_shape(
            shapes,
            id,
            CellRect::new(cell.column, cell.row, width, height),
            true,
        );
        true
    }

    /// The valid top-left cell nearest to `near` for a `width × height` footprint.
    ///
    /// Candidates are searched ring by ring outward from the cell under `near`; within a
    /// ring they are ordered by distance, ties keeping ring order.
    pub fn find_open_location(&self, near: Point, width: i32, height: i32) -> Option<CellPos> {
        let levels = self.columns().max(self.rows());
        (0..=levels).find_map(|level| {
            let mut ring = self.ring_candidates(near, level);
            ring.sort_by(|a, b| a.0.total_cmp(&b.0));
            ring.into_iter().map(|(_, cell)| cell).find(|cell| {
                self.is_valid_to_place(CellRect::new(cell.column, cell.row, width, height))
            })
        })
    }

    /// Border cells of the square `2 * (level + 1)` wide around the cell under `near`,
    /// paired with their squared distance to `near`.
    fn ring_candidates(&self, near: Point, level: i32) -> Vec<(f64, CellPos)> {
        let local = near - self.bounds.origin();
        let start_column = floor_to_i32(local.x / self.unit_length) - level;
        let start_row = floor_to_i32(local.y / self.unit_length) - level;
        let side = 2 * (level + 1);
        let mut ring = Vec::new();
        for row in 0..side {
            for column in 0..side {
                let on_border = row == 0 || row == side - 1 || column == 0 || column == side - 1;
                let cell = CellPos::new(start_column + column, start_row + row);
                if on_border && cell.column <= self.columns() && cell.row <= self.rows() {
                    let corner = self.cell_to_world(cell.column, cell.row);
                    ring.push(((corner - near).hypot2(), cell));
                }
            }
        }
        ring
    }

    /// Whether a footprint may be reserved.
    ///
    /// It must lie on the grid and avoid resident and incoming footprints. On a
    /// non-empty compose board it must also share an edge with one of them.
    pub fn is_valid_to_place(&self, footprint: CellRect) -> bool {
        if !footprint.fits_within(self.columns(), self.rows()) {
            return false;
        }
        if self.is_empty() {
            return true;
        }
        if let Some(cell) = footprint
            .cells()
            .find(|c| self.is_cell_reserved(c.column, c.row))
        {
            trace!("({}, {}) is taken", cell.column, cell.row);
            return false;
        }
        if !self.compose {
            return true;
        }
        let touches = footprint.cells().any(|c| {
            [(-1, 0), (1, 0), (0, -1), (0, 1)]
                .into_iter()
                .any(|(dx, dy)| self.is_cell_reserved(c.column + dx, c.row + dy))
        });
        if !touches {
            trace!(
                "({}, {}) would not touch the composite",
                footprint.column,
                footprint.row
            );
        }
        touches
    }

    /// Number of cells reserved by incoming footprints but not yet occupied.
    pub fn reserved_only_count(&self) -> usize {
        self.incoming
            .iter()
            .flat_map(|p| p.footprint.cells())
            .filter(|c| !self.cells.is_occupied(c.column, c.row))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size};

    use crate::{
        AcceptedColor, Board, BoardConfig, BoardEvent, Color, Measurement, MovableShape,
        ShapeArena,
    };
    use area_builder_grid::CellRect;

    const UNIT: f64 = 10.0;
    const RED: Color = Color::rgb(220, 20, 60);
    const BLUE: Color = Color::rgb(30, 144, 255);

    fn board(columns: i32, rows: i32) -> Board {
        Board::new(BoardConfig::new(
            Size::new(f64::from(columns) * UNIT, f64::from(rows) * UNIT),
            UNIT,
            Point::ZERO,
        ))
    }

    fn rect_at(
        shapes: &mut ShapeArena,
        columns: i32,
        rows: i32,
        color: Color,
        at: Point,
    ) -> crate::ShapeId {
        let mut shape = MovableShape::new(
            Size::new(f64::from(columns) * UNIT, f64::from(rows) * UNIT),
            color,
            Point::new(-100.0, -100.0),
        );
        shape.set_position(at);
        shapes.insert(shape)
    }

    /// Run the arena until nothing is moving, landing shapes on `board`.
    fn settle(board: &mut Board, shapes: &mut ShapeArena) {
        for _ in 0..1000 {
            let events = shapes.step(0.05);
            for event in &events {
                if let crate::ShapeEvent::Landed(id) = event {
                    board.shape_landed(shapes, *id);
                }
            }
            if shapes.iter().all(|(_, s)| !s.is_animating()) {
                break;
            }
        }
    }

    #[test]
    fn first_shape_snaps_to_nearest_cell() {
        let mut b = board(6, 6);
        let mut shapes = ShapeArena::new();
        let id = rect_at(&mut shapes, 1, 1, RED, Point::new(23.0, 38.0));
        assert!(b.place_shape(&mut shapes, id));
        assert_eq!(b.footprint(id), Some(CellRect::new(2, 4, 1, 1)));
        assert!(b.is_incoming(id));
        assert!(!b.is_resident(id));
        settle(&mut b, &mut shapes);
        assert!(b.is_resident(id));
        assert_eq!(b.occupant(2, 4), Some(id));
    }

    #[test]
    fn incoming_reserves_without_occupying() {
        let mut b = board(4, 4);
        let mut shapes = ShapeArena::new();
        let id = rect_at(&mut shapes, 2, 1, RED, Point::new(3.0, 2.0));
        assert!(b.place_shape(&mut shapes, id));
        assert!(!b.is_cell_occupied(0, 0));
        assert!(b.is_cell_reserved(0, 0));
        assert!(b.is_cell_reserved(1, 0));
        assert_eq!(b.reserved_only_count(), 2);
        // The composite does not include the incoming shape yet.
        assert!(b.composite_shape().is_empty());
        assert_eq!(b.measurement(), Measurement::ZERO);
    }

    #[test]
    fn second_incoming_shape_avoids_reserved_cells() {
        let mut b = board(4, 4);
        let mut shapes = ShapeArena::new();
        let a = rect_at(&mut shapes, 1, 1, RED, Point::new(1.0, 1.0));
        let c = rect_at(&mut shapes, 1, 1, RED, Point::new(0.0, 0.0));
        assert!(b.place_shape(&mut shapes, a));
        assert!(b.is_incoming(a));
        assert!(b.place_shape(&mut shapes, c));
        let fa = b.footprint(a).unwrap();
        let fc = b.footprint(c).unwrap();
        assert_ne!(fa, fc);
        // Touching a reservation is enough in compose mode.
        assert_eq!((fc.column - fa.column).abs() + (fc.row - fa.row).abs(), 1);
    }

    #[test]
    fn compose_requires_touching() {
        let mut b = board(6, 6);
        let mut shapes = ShapeArena::new();
        let a = rect_at(&mut shapes, 1, 1, RED, Point::new(0.0, 0.0));
        assert!(b.place_shape(&mut shapes, a));
        settle(&mut b, &mut shapes);
        // Every valid spot must touch (0, 0); isolated cells are rejected.
        assert!(!b.is_valid_to_place(CellRect::new(3, 3, 1, 1)));
        assert!(b.is_valid_to_place(CellRect::new(1, 0, 1, 1)));
        assert!(!b.is_valid_to_place(CellRect::new(1, 1, 1, 1)));
        let far = rect_at(&mut shapes, 1, 1, RED, Point::new(50.0, 50.0));
        assert!(b.place_shape(&mut shapes, far));
        let f = b.footprint(far).unwrap();
        assert!(f == CellRect::new(1, 0, 1, 1) || f == CellRect::new(0, 1, 1, 1));
    }

    #[test]
    fn free_placement_without_compose() {
        let mut b = Board::new(
            BoardConfig::new(Size::new(60.0, 60.0), UNIT, Point::ZERO).with_compose(false),
        );
        let mut shapes = ShapeArena::new();
        let a = rect_at(&mut shapes, 1, 1, RED, Point::new(0.0, 0.0));
        let c = rect_at(&mut shapes, 1, 1, RED, Point::new(50.0, 50.0));
        assert!(b.place_shape(&mut shapes, a));
        assert!(b.place_shape(&mut shapes, c));
        assert_eq!(b.footprint(c), Some(CellRect::new(5, 5, 1, 1)));
    }

    #[test]
    fn rejected_placement_changes_nothing() {
        let mut b = board(2, 2);
        let mut shapes = ShapeArena::new();
        let a = rect_at(&mut shapes, 2, 2, RED, Point::new(0.0, 0.0));
        assert!(b.place_shape(&mut shapes, a));
        settle(&mut b, &mut shapes);
        b.take_events();

        let cells = b.cells.clone();
        let residents = b.residents.clone();
        let incoming = b.incoming.clone();
        let measurement = b.measurement();
        let outline = b.composite_shape().clone();

        let full = rect_at(&mut shapes, 1, 1, RED, Point::new(5.0, 5.0));
        let before = shapes.get(full).cloned();
        assert!(!b.place_shape(&mut shapes, full));
        let off_board = rect_at(&mut shapes, 1, 1, RED, Point::new(500.0, 500.0));
        assert!(!b.place_shape(&mut shapes, off_board));

        assert!(b.cells == cells);
        assert_eq!(b.residents, residents);
        assert_eq!(b.incoming, incoming);
        assert_eq!(b.measurement(), measurement);
        assert!(alloc::rc::Rc::ptr_eq(b.composite_shape(), &outline));
        assert!(b.take_events().is_empty());
        assert_eq!(
            shapes.get(full).map(MovableShape::destination),
            before.map(|s| s.destination())
        );
    }

    #[test]
    fn color_filter_rejects() {
        let mut b = Board::new(
            BoardConfig::new(Size::new(40.0, 40.0), UNIT, Point::ZERO)
                .with_accepted_color(AcceptedColor::Only(RED)),
        );
        let mut shapes = ShapeArena::new();
        let blue = rect_at(&mut shapes, 1, 1, BLUE, Point::new(0.0, 0.0));
        let red = rect_at(&mut shapes, 1, 1, RED, Point::new(0.0, 0.0));
        assert!(!b.place_shape(&mut shapes, blue));
        assert!(b.place_shape(&mut shapes, red));
    }

    #[test]
    fn edge_touching_counts_as_overlap() {
        let mut b = board(3, 3);
        let mut shapes = ShapeArena::new();
        // Bounds touch the board's right edge exactly.
        let id = rect_at(&mut shapes, 1, 1, RED, Point::new(30.0, 0.0));
        assert!(b.place_shape(&mut shapes, id));
        assert_eq!(b.footprint(id), Some(CellRect::new(2, 0, 1, 1)));
    }

    #[test]
    fn flush_blocks_measure_ten_by_fourteen() {
        let mut b = board(8, 8);
        let mut shapes = ShapeArena::new();
        let square = rect_at(&mut shapes, 2, 2, RED, Point::new(0.0, 0.0));
        let wide = rect_at(&mut shapes, 3, 2, RED, Point::new(20.0, 0.0));
        assert!(b.place_shape(&mut shapes, square));
        settle(&mut b, &mut shapes);
        assert!(b.place_shape(&mut shapes, wide));
        settle(&mut b, &mut shapes);

        assert_eq!(b.footprint(wide), Some(CellRect::new(2, 0, 3, 2)));
        // Union is a 5x2 block: area 2*2 + 3*2, perimeter 2*(5 + 2).
        assert_eq!(
            b.measurement(),
            Measurement::Valid {
                area: 10,
                perimeter: 14
            }
        );
        let outline = b.composite_shape();
        assert_eq!(outline.exterior().len(), 1);
        assert!(outline.interior().is_empty());
        assert!(b.take_events().contains(&BoardEvent::MeasurementChanged(
            Measurement::Valid {
                area: 10,
                perimeter: 14
            }
        )));
    }

    #[test]
    fn full_board_rejects() {
        let mut b = board(2, 1);
        let mut shapes = ShapeArena::new();
        let a = rect_at(&mut shapes, 2, 1, RED, Point::new(0.0, 0.0));
        assert!(b.place_shape(&mut shapes, a));
        let c = rect_at(&mut shapes, 1, 1, RED, Point::new(0.0, 0.0));
        assert!(!b.place_shape(&mut shapes, c));
        assert!(b.find_open_location(Point::ZERO, 1, 1).is_none());
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "controlled by the user")]
    fn placing_user_controlled_shape_panics() {
        let mut b = board(2, 2);
        let mut shapes = ShapeArena::new();
        let id = rect_at(&mut shapes, 1, 1, RED, Point::ZERO);
        if let Some(s) = shapes.get_mut(id) {
            s.set_user_controlled(true);
        }
        b.place_shape(&mut shapes, id);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "whole multiple")]
    fn fractional_footprint_panics() {
        let mut b = board(4, 4);
        let mut shapes = ShapeArena::new();
        let id = shapes.insert(MovableShape::new(
            Size::new(15.0, 10.0),
            RED,
            Point::ZERO,
        ));
        b.place_shape(&mut shapes, id);
    }
}
