// Copyright 2025 the Area Builder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composite region: the current perimeter shape plus area/perimeter readings.

use alloc::rc::Rc;
use alloc::vec::Vec;

use crate::perimeter::{PerimeterLoop, PerimeterShape};
use crate::trace::Perimeters;

/// Area and perimeter of a composite, in unit squares and unit edges.
///
/// Readings are only meaningful while the composite is one connected mass. When more
/// than one exterior loop exists they are [`Measurement::Invalid`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Measurement {
    /// A single (or empty) composite.
    Valid {
        /// Covered unit squares.
        area: u32,
        /// Total boundary length, holes included.
        perimeter: u32,
    },
    /// Several disconnected pieces; no single reading exists.
    Invalid,
}

impl Measurement {
    /// Reading for an empty board.
    pub const ZERO: Self = Self::Valid {
        area: 0,
        perimeter: 0,
    };

    /// Whether the reading holds numbers.
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Area, when valid.
    pub const fn area(&self) -> Option<u32> {
        match self {
            Self::Valid { area, .. } => Some(*area),
            Self::Invalid => None,
        }
    }

    /// Perimeter, when valid.
    pub const fn perimeter(&self) -> Option<u32> {
        match self {
            Self::Valid { perimeter, .. } => Some(*perimeter),
            Self::Invalid => None,
        }
    }
}

/// Holder of the current [`PerimeterShape`].
///
/// The shape is shared behind an [`Rc`] and only replaced when the traced loops actually
/// differ, so observers can detect changes with [`Rc::ptr_eq`].
#[derive(Clone, Debug, Default)]
pub struct CompositeRegion {
    shape: Rc<PerimeterShape>,
}

impl CompositeRegion {
    /// An empty region.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current shape.
    pub fn shape(&self) -> &Rc<PerimeterShape> {
        &self.shape
    }

    /// Install new loops. Returns `false`, keeping the existing shape instance, when the
    /// loops are pointwise equal to the current ones.
    pub fn rebuild(&mut self, exterior: Vec<PerimeterLoop>, interior: Vec<PerimeterLoop>) -> bool {
        if self.shape.exterior() == exterior.as_slice()
            && self.shape.interior() == interior.as_slice()
        {
            return false;
        }
        self.shape = Rc::new(PerimeterShape::new(exterior, interior));
        true
    }

    /// [`rebuild`](Self::rebuild) from tracer output.
    pub fn rebuild_from(&mut self, perimeters: Perimeters) -> bool {
        self.rebuild(perimeters.exterior, perimeters.interior)
    }

    /// Reading for a composite whose resident pieces cover `resident_area` unit squares.
    ///
    /// Area comes from the pieces rather than the traced polygon; perimeter is the
    /// number of traced unit edges.
    pub fn measure(&self, resident_area: u32) -> Measurement {
        if self.shape.exterior().len() > 1 {
            return Measurement::Invalid;
        }
        Measurement::Valid {
            area: resident_area,
            perimeter: self.shape.edge_count(),
        }
    }
}
