// Copyright 2025 the Area Builder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape storage with generational handles.

use alloc::vec::Vec;
use kurbo::Vec2;

use crate::shape::{MovableShape, StepOutcome};
use crate::types::{ShapeFlags, ShapeId};
use crate::util::whole_multiple;

/// Motion milestones reported by [`ShapeArena::step`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShapeEvent {
    /// Finished animating to a destination (for example a board cell).
    Landed(ShapeId),
    /// Finished returning to its origin.
    ReturnedToOrigin(ShapeId),
    /// Faded out completely.
    FadedOut(ShapeId),
}

/// Owner of every movable shape. Boards refer to shapes by [`ShapeId`].
#[derive(Clone, Default)]
pub struct ShapeArena {
    slots: Vec<Option<MovableShape>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl core::fmt::Debug for ShapeArena {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ShapeArena")
            .field("slots_total", &self.slots.len())
            .field("shapes_alive", &self.len())
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl ShapeArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape and return its handle.
    pub fn insert(&mut self, shape: MovableShape) -> ShapeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.slots[idx] = Some(shape);
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.slots.push(Some(shape));
            self.generations.push(generation);
            (self.slots.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ShapeId uses 32-bit indices by design."
        )]
        ShapeId::new(idx as u32, generation)
    }

    /// Remove a shape, returning it if the handle was live.
    pub fn remove(&mut self, id: ShapeId) -> Option<MovableShape> {
        if !self.is_alive(id) {
            return None;
        }
        self.free_list.push(id.idx());
        self.slots[id.idx()].take()
    }

    /// Whether the handle refers to a live shape.
    pub fn is_alive(&self, id: ShapeId) -> bool {
        self.generations.get(id.idx()) == Some(&id.1)
            && self.slots.get(id.idx()).is_some_and(Option::is_some)
    }

    /// Borrow a shape.
    pub fn get(&self, id: ShapeId) -> Option<&MovableShape> {
        if !self.is_alive(id) {
            return None;
        }
        self.slots[id.idx()].as_ref()
    }

    /// Mutably borrow a shape.
    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut MovableShape> {
        if !self.is_alive(id) {
            return None;
        }
        self.slots[id.idx()].as_mut()
    }

    /// Number of live shapes.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// True when no shapes are alive.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live shapes with their handles, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (ShapeId, &MovableShape)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            let shape = s.as_ref()?;
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ShapeId uses 32-bit indices by design."
            )]
            Some((ShapeId::new(i as u32, self.generations[i]), shape))
        })
    }

    /// Advance every shape by `dt` seconds and report what finished.
    pub fn step(&mut self, dt: f64) -> Vec<ShapeEvent> {
        let mut events = Vec::new();
        for (i, slot) in self.slots.iter_mut().enumerate() {
            let Some(shape) = slot.as_mut() else {
                continue;
            };
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ShapeId uses 32-bit indices by design."
            )]
            let id = ShapeId::new(i as u32, self.generations[i]);
            match shape.step(dt) {
                Some(StepOutcome::Arrived) => events.push(ShapeEvent::Landed(id)),
                Some(StepOutcome::ArrivedHome) => events.push(ShapeEvent::ReturnedToOrigin(id)),
                Some(StepOutcome::FadedOut) => events.push(ShapeEvent::FadedOut(id)),
                None => {}
            }
        }
        events
    }

    /// Split a shape into unit squares covering the same footprint.
    ///
    /// Each square's origin is offset from the parent's origin and it already sits at its
    /// final spot within the parent's current position. The parent is left in place; the
    /// caller decides when to remove it. Columns are emitted outer, rows inner.
    pub fn decompose_into_squares(&mut self, id: ShapeId, unit_length: f64) -> Vec<ShapeId> {
        let Some(parent) = self.get(id).cloned() else {
            return Vec::new();
        };
        let size = parent.size();
        let columns = whole_multiple(size.width, unit_length);
        let rows = whole_multiple(size.height, unit_length);
        debug_assert!(
            columns.is_some() && rows.is_some(),
            "shape dimensions are not whole multiples of the unit length"
        );
        let (columns, rows) = (columns.unwrap_or(0), rows.unwrap_or(0));
        let invisible = parent.flags().contains(ShapeFlags::INVISIBLE_WHEN_STILL);
        let mut squares = Vec::new();
        for column in 0..columns {
            for row in 0..rows {
                let offset = Vec2::new(
                    f64::from(column) * unit_length,
                    f64::from(row) * unit_length,
                );
                let mut square = MovableShape::unit_square(
                    unit_length,
                    parent.color(),
                    parent.origin() + offset,
                );
                square.set_destination(parent.position() + offset, false);
                square.set_invisible_when_still(invisible);
                squares.push(self.insert(square));
            }
        }
        squares
    }
}
