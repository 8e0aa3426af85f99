// Copyright 2025 the Area Builder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shape placement board: residency bookkeeping, orphan release, and composite updates.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::mem;

use area_builder_grid::{
    CellGrid, CellPos, CellRect, CompositeRegion, Measurement, Occupancy, PerimeterLoop,
    PerimeterShape, find_groups, largest_group, trace_perimeters,
};
use kurbo::{Point, Rect, Size, Vec2};
use log::debug;

use crate::arena::ShapeArena;
use crate::config::{BoardConfig, DisplayToggles};
use crate::error::BoardError;
use crate::events::BoardEvent;
use crate::shape::MovableShape;
use crate::types::{AcceptedColor, Color, Fraction, ReleaseMode, ShapeId};
use crate::util::{round_to_i32, whole_multiple};

/// A shape's claim on the board: where it sits (or will sit) and its color.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Placed {
    pub(crate) id: ShapeId,
    pub(crate) footprint: CellRect,
    pub(crate) color: Color,
}

/// A grid board that movable shapes snap onto.
///
/// Shapes live in a [`ShapeArena`]; the board tracks which of them are *incoming*
/// (animating toward a reserved footprint) and which are *resident* (occupying cells).
/// Incoming footprints block other placements immediately but only join the composite
/// perimeter once the shape lands.
///
/// Every mutating operation finishes by re-tracing the composite (unless updates are
/// suspended) and queues [`BoardEvent`]s in the order grid → groups → perimeter → reading.
pub struct Board {
    pub(crate) bounds: Rect,
    pub(crate) unit_length: f64,
    pub(crate) accepted_color: AcceptedColor,
    pub(crate) compose: bool,
    toggles: DisplayToggles,
    pub(crate) cells: CellGrid<ShapeId>,
    pub(crate) residents: Vec<Placed>,
    pub(crate) incoming: Vec<Placed>,
    watched: Vec<ShapeId>,
    region: CompositeRegion,
    measurement: Measurement,
    updates_suspended: bool,
    pub(crate) events: Vec<BoardEvent>,
}

impl core::fmt::Debug for Board {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Board")
            .field("bounds", &self.bounds)
            .field("unit_length", &self.unit_length)
            .field("compose", &self.compose)
            .field("residents", &self.residents.len())
            .field("incoming", &self.incoming.len())
            .field("measurement", &self.measurement)
            .field("updates_suspended", &self.updates_suspended)
            .field("cells", &self.cells)
            .finish_non_exhaustive()
    }
}

impl Board {
    /// Create a board.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid; use [`try_new`](Self::try_new) for
    /// configurations that come from outside the program.
    pub fn new(config: BoardConfig) -> Self {
        match Self::try_new(config) {
            Ok(board) => board,
            Err(err) => panic!("invalid board configuration: {err}"),
        }
    }

    /// Create a board, reporting configuration problems.
    pub fn try_new(config: BoardConfig) -> Result<Self, BoardError> {
        let (columns, rows) = config.grid_dimensions()?;
        Ok(Self {
            bounds: Rect::from_origin_size(config.position, config.size),
            unit_length: config.unit_length,
            accepted_color: config.accepted_color,
            compose: config.compose,
            toggles: config.toggles,
            cells: CellGrid::new(columns, rows),
            residents: Vec::new(),
            incoming: Vec::new(),
            watched: Vec::new(),
            region: CompositeRegion::new(),
            measurement: Measurement::ZERO,
            updates_suspended: false,
            events: Vec::new(),
        })
    }

    // --- geometry -------------------------------------------------------------------

    /// World-space bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Side of one cell in world units.
    pub fn unit_length(&self) -> f64 {
        self.unit_length
    }

    /// Number of columns.
    pub fn columns(&self) -> i32 {
        self.cells.columns()
    }

    /// Number of rows.
    pub fn rows(&self) -> i32 {
        self.cells.rows()
    }

    /// World-space top-left corner of a cell (or grid corner).
    pub fn cell_to_world(&self, column: i32, row: i32) -> Point {
        self.bounds.origin()
            + Vec2::new(
                f64::from(column) * self.unit_length,
                f64::from(row) * self.unit_length,
            )
    }

    /// Nearest grid corner to a world point.
    pub fn world_to_cell(&self, point: Point) -> CellPos {
        let local = point - self.bounds.origin();
        CellPos::new(
            round_to_i32(local.x / self.unit_length),
            round_to_i32(local.y / self.unit_length),
        )
    }

    /// A traced loop in world coordinates.
    pub fn loop_to_world(&self, perimeter: &PerimeterLoop) -> Vec<Point> {
        perimeter
            .points()
            .iter()
            .map(|p| self.cell_to_world(p.x, p.y))
            .collect()
    }

    /// Whether a world rectangle touches the board at all (edges included).
    pub fn overlaps(&self, rect: Rect) -> bool {
        let b = self.bounds;
        rect.x0 <= b.x1 && b.x0 <= rect.x1 && rect.y0 <= b.y1 && b.y0 <= rect.y1
    }

    /// Whether a shape at its current position touches the board.
    pub fn shape_overlaps_board(&self, shape: &MovableShape) -> bool {
        self.overlaps(shape.bounds())
    }

    /// Footprint size of a shape in cells.
    pub(crate) fn footprint_size(&self, size: Size) -> (i32, i32) {
        let width = whole_multiple(size.width, self.unit_length);
        let height = whole_multiple(size.height, self.unit_length);
        debug_assert!(
            width.is_some() && height.is_some(),
            "shape size {}x{} is not a whole multiple of the unit length {}",
            size.width,
            size.height,
            self.unit_length
        );
        (width.unwrap_or(1), height.unwrap_or(1))
    }

    // --- settings -------------------------------------------------------------------

    /// Colors this board takes.
    pub fn accepted_color(&self) -> AcceptedColor {
        self.accepted_color
    }

    /// Whether placed shapes form one composite.
    pub fn is_compose(&self) -> bool {
        self.compose
    }

    /// Switch compose mode. Takes effect for subsequent placements and orphan checks.
    pub fn set_compose(&mut self, compose: bool) {
        self.compose = compose;
    }

    /// The externally owned display toggles.
    pub fn toggles(&self) -> &DisplayToggles {
        &self.toggles
    }

    /// Current grid-visibility toggle.
    pub fn show_grid(&self) -> bool {
        self.toggles.show_grid.get()
    }

    /// Current dimension-label toggle.
    pub fn show_dimensions(&self) -> bool {
        self.toggles.show_dimensions.get()
    }

    // --- queries --------------------------------------------------------------------

    /// Current area/perimeter reading.
    pub fn measurement(&self) -> Measurement {
        self.measurement
    }

    /// Current composite outline. The `Rc` is replaced only when the outline changes.
    pub fn composite_shape(&self) -> &Rc<PerimeterShape> {
        self.region.shape()
    }

    /// Whether the shape occupies cells on this board.
    pub fn is_resident(&self, id: ShapeId) -> bool {
        self.residents.iter().any(|p| p.id == id)
    }

    /// Whether the shape is on its way to this board.
    pub fn is_incoming(&self, id: ShapeId) -> bool {
        self.incoming.iter().any(|p| p.id == id)
    }

    /// Resident shapes in arrival order.
    pub fn resident_shapes(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.residents.iter().map(|p| p.id)
    }

    /// Incoming shapes in placement order.
    pub fn incoming_shapes(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.incoming.iter().map(|p| p.id)
    }

    /// Footprint of a resident or incoming shape.
    pub fn footprint(&self, id: ShapeId) -> Option<CellRect> {
        self.residents
            .iter()
            .chain(&self.incoming)
            .find(|p| p.id == id)
            .map(|p| p.footprint)
    }

    /// True when nothing is resident or incoming.
    pub fn is_empty(&self) -> bool {
        self.residents.is_empty() && self.incoming.is_empty()
    }

    /// Whether a resident shape covers the cell. Out-of-range cells are unoccupied.
    pub fn is_cell_occupied(&self, column: i32, row: i32) -> bool {
        self.cells.is_occupied(column, row)
    }

    /// The resident shape covering a cell.
    pub fn occupant(&self, column: i32, row: i32) -> Option<ShapeId> {
        self.cells.occupant(column, row)
    }

    /// Whether a cell is claimed by a resident or reserved by an incoming shape.
    pub fn is_cell_reserved(&self, column: i32, row: i32) -> bool {
        self.cells.is_occupied(column, row)
            || self.incoming.iter().any(|p| p.footprint.contains(column, row))
    }

    /// Share of resident area covered by `color`, in lowest terms. An empty board
    /// yields `0/0`.
    pub fn proportion_of_color(&self, color: Color) -> Fraction {
        let total: u32 = self.residents.iter().map(|p| p.footprint.area()).sum();
        let matching: u32 = self
            .residents
            .iter()
            .filter(|p| p.color == color)
            .map(|p| p.footprint.area())
            .sum();
        Fraction::new(matching, total).reduced()
    }

    /// Drain queued notifications.
    ///
    /// Events accumulate until drained, so hosts should call this (or
    /// [`Scene::take_events`](crate::Scene::take_events)) once per frame.
    pub fn take_events(&mut self) -> Vec<BoardEvent> {
        mem::take(&mut self.events)
    }

    // --- residency ------------------------------------------------------------------

    /// Reserve `footprint` for a shape and send it there.
    pub(crate) fn add_incoming_shape(
        &mut self,
        shapes: &mut ShapeArena,
        id: ShapeId,
        footprint: CellRect,
        animate: bool,
    ) {
        let destination = self.cell_to_world(footprint.column, footprint.row);
        let Some(shape) = shapes.get_mut(id) else {
            return;
        };
        shape.set_destination(destination, animate);
        let already_there = !shape.is_animating();
        self.incoming.push(Placed {
            id,
            footprint,
            color: shape.color(),
        });
        if already_there {
            self.shape_landed(shapes, id);
        }
    }

    /// Bypass the placement search and send a shape to the given cell.
    ///
    /// Used to play back known layouts (for example, showing a solution). The footprint
    /// must fit on the board; overlap and adjacency are not checked.
    pub fn add_shape_directly_to_cell(
        &mut self,
        shapes: &mut ShapeArena,
        column: i32,
        row: i32,
        id: ShapeId,
    ) {
        let compose = self.compose;
        let Some(shape) = shapes.get_mut(id) else {
            return;
        };
        shape.set_invisible_when_still(compose);
        let (width, height) = self.footprint_size(shape.size());
        let footprint = CellRect::new(column, row, width, height);
        debug_assert!(
            footprint.fits_within(self.columns(), self.rows()),
            "shape added directly to cell ({column}, {row}) does not fit on the board"
        );
        self.add_incoming_shape(shapes, id, footprint, true);
    }

    /// Hold perimeter, reading, and orphan updates until the last incoming shape lands.
    ///
    /// Meant for placing a batch of shapes at once; updates resume automatically.
    pub fn suspend_updates_for_block_placement(&mut self) {
        self.updates_suspended = true;
    }

    /// Whether updates are currently held.
    pub fn updates_suspended(&self) -> bool {
        self.updates_suspended
    }

    /// Move an incoming shape into residency once it has finished animating.
    ///
    /// Returns `false` when the shape was not incoming to this board.
    pub fn shape_landed(&mut self, shapes: &mut ShapeArena, id: ShapeId) -> bool {
        let Some(i) = self.incoming.iter().position(|p| p.id == id) else {
            return false;
        };
        let placed = self.incoming.remove(i);
        self.add_resident(shapes, placed);
        self.resume_if_batch_done(shapes);
        true
    }

    fn add_resident(&mut self, shapes: &mut ShapeArena, placed: Placed) {
        if let Some(shape) = shapes.get(placed.id) {
            debug_assert!(
                !shape.is_user_controlled(),
                "shapes can't become residents while controlled by the user"
            );
            debug_assert!(
                shape.position() == shape.destination(),
                "shapes must finish animating before becoming residents"
            );
        }
        debug_assert!(
            !self.is_resident(placed.id),
            "attempt to add a shape that is already a resident"
        );
        self.residents.push(placed);
        self.cells.fill(placed.footprint, Some(placed.id));
        self.events.push(BoardEvent::ShapeResident(placed.id));
        self.evict_orphans(shapes);
        self.update_all();
    }

    /// Take a resident off the board without refreshing the composite.
    fn detach_resident(&mut self, shapes: &ShapeArena, id: ShapeId) -> Option<Placed> {
        let i = self.residents.iter().position(|p| p.id == id);
        debug_assert!(
            i.is_some(),
            "attempt to remove a shape that is not a resident"
        );
        let placed = self.residents.remove(i?);
        self.cells.fill(placed.footprint, None);
        if shapes.get(id).is_some_and(MovableShape::is_user_controlled) {
            // Watch for the drop so orphans left behind can be released.
            self.watched.push(id);
        }
        Some(placed)
    }

    /// Remove a resident shape and refresh the composite.
    ///
    /// Removing a shape that is not resident is a programming error.
    pub fn remove_resident_shape(&mut self, shapes: &ShapeArena, id: ShapeId) -> bool {
        let removed = self.detach_resident(shapes, id).is_some();
        self.update_all();
        removed
    }

    /// React to the user grabbing a shape (already flagged as user-controlled).
    ///
    /// A resident is evicted immediately; an incoming shape loses its reservation.
    pub fn shape_grabbed(&mut self, shapes: &mut ShapeArena, id: ShapeId) {
        debug_assert!(
            shapes.get(id).is_none_or(MovableShape::is_user_controlled),
            "grabbed shapes must be user-controlled"
        );
        if self.is_resident(id) {
            debug!("user grabbed resident {id:?}");
            self.remove_resident_shape(shapes, id);
        } else if let Some(i) = self.incoming.iter().position(|p| p.id == id) {
            debug!("user grabbed incoming {id:?}");
            self.incoming.remove(i);
            self.watched.push(id);
            self.resume_if_batch_done(shapes);
        }
    }

    /// React to the user dropping a shape this board was watching.
    ///
    /// If the shape did not come back to this board, the pieces it left behind are
    /// checked for orphans right away.
    pub fn shape_dropped(&mut self, shapes: &mut ShapeArena, id: ShapeId) {
        let Some(i) = self.watched.iter().position(|w| *w == id) else {
            return;
        };
        self.watched.swap_remove(i);
        if self.is_incoming(id) || self.is_resident(id) {
            return;
        }
        self.release_orphans(shapes);
    }

    /// In compose mode, keep only the largest contiguous group and send every other
    /// resident home. Ties keep the group found first in row-major order.
    ///
    /// While updates are suspended the check waits for the batch to finish, since pieces
    /// of a planned layout may land before the pieces that join them.
    pub fn release_orphans(&mut self, shapes: &mut ShapeArena) {
        self.evict_orphans(shapes);
        self.update_all();
    }

    fn evict_orphans(&mut self, shapes: &mut ShapeArena) {
        if !self.compose || self.updates_suspended {
            return;
        }
        let groups = find_groups(&self.cells);
        if groups.len() <= 1 {
            return;
        }
        let keep = largest_group(&groups);
        for (i, group) in groups.iter().enumerate() {
            if Some(i) == keep {
                continue;
            }
            for cell in group {
                // A multi-cell shape is released on its first cell.
                let Some(id) = self.cells.occupant(cell.column, cell.row) else {
                    continue;
                };
                if self.detach_resident(shapes, id).is_some() {
                    debug!("releasing orphan {id:?}");
                    if let Some(shape) = shapes.get_mut(id) {
                        shape.return_to_origin(true);
                    }
                    self.events.push(BoardEvent::ShapeReleased(id));
                }
            }
        }
    }

    /// Clear the board, telling every resident and incoming shape what to do next.
    pub fn release_all(&mut self, shapes: &mut ShapeArena, mode: ReleaseMode) {
        let released: Vec<ShapeId> = self
            .residents
            .iter()
            .chain(&self.incoming)
            .map(|p| p.id)
            .collect();
        debug!("releasing {} shapes ({mode:?})", released.len());
        self.residents.clear();
        self.incoming.clear();
        self.watched.clear();
        self.cells.clear();
        self.updates_suspended = false;
        for id in released {
            if let Some(shape) = shapes.get_mut(id) {
                match mode {
                    ReleaseMode::Fade => shape.fade_away(),
                    ReleaseMode::JumpHome => shape.return_to_origin(false),
                    ReleaseMode::AnimateHome => shape.return_to_origin(true),
                }
            }
            self.events.push(BoardEvent::ShapeReleased(id));
        }
        self.update_all();
    }

    /// Swap a resident for unit squares covering the same cells.
    ///
    /// The constituents must already sit at their final positions (see
    /// [`ShapeArena::decompose_into_squares`]). The outline and reading are unchanged, so
    /// no orphan check or update runs.
    pub fn replace_shape_with_unit_squares(
        &mut self,
        shapes: &ShapeArena,
        original: ShapeId,
        constituents: &[ShapeId],
    ) {
        let i = self.residents.iter().position(|p| p.id == original);
        debug_assert!(
            i.is_some(),
            "shape to be replaced is not a resident of this board"
        );
        let Some(i) = i else {
            return;
        };
        let replaced = self.residents.remove(i);
        self.cells.fill(replaced.footprint, None);
        for &id in constituents {
            let Some(shape) = shapes.get(id) else {
                continue;
            };
            let cell = self.world_to_cell(shape.destination());
            let (width, height) = self.footprint_size(shape.size());
            let footprint = CellRect::new(cell.column, cell.row, width, height);
            debug_assert!(
                footprint.cells().all(|c| replaced.footprint.contains(c.column, c.row)),
                "constituent shape lies outside the shape it replaces"
            );
            self.residents.push(Placed {
                id,
                footprint,
                color: shape.color(),
            });
            self.cells.fill(footprint, Some(id));
        }
    }

    fn resume_if_batch_done(&mut self, shapes: &mut ShapeArena) {
        if self.updates_suspended && self.incoming.is_empty() {
            self.updates_suspended = false;
            self.evict_orphans(shapes);
            self.update_all();
        }
    }

    /// Re-trace the composite and recompute the reading, queueing change events.
    fn update_all(&mut self) {
        if self.updates_suspended {
            return;
        }
        if self.region.rebuild_from(trace_perimeters(&self.cells)) {
            let shape = self.region.shape();
            debug!(
                "composite changed: {} exterior, {} interior loops",
                shape.exterior().len(),
                shape.interior().len()
            );
            self.events.push(BoardEvent::CompositeShapeChanged);
        }
        let area = self.residents.iter().map(|p| p.footprint.area()).sum();
        let measurement = self.region.measure(area);
        if measurement != self.measurement {
            self.measurement = measurement;
            self.events.push(BoardEvent::MeasurementChanged(measurement));
        }
    }
}
