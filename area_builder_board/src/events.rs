// Copyright 2025 the Area Builder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notifications queued by a board for its view and state layers.

use area_builder_grid::Measurement;

use crate::types::ShapeId;

/// A change on a [`Board`](crate::Board), drained with
/// [`Board::take_events`](crate::Board::take_events).
///
/// Within one operation events are queued in the order the work happens: residency and
/// release first, then the composite shape, then the reading.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BoardEvent {
    /// The shape finished arriving and now occupies cells.
    ShapeResident(ShapeId),
    /// The shape was sent away (orphan eviction or a release of all shapes).
    ShapeReleased(ShapeId),
    /// The composite perimeter shape was replaced.
    CompositeShapeChanged,
    /// The area/perimeter reading changed.
    MeasurementChanged(Measurement),
}
