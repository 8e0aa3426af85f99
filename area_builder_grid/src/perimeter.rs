// Copyright 2025 the Area Builder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Traced loops and the polygon-with-holes they form.

use alloc::vec::Vec;

use crate::types::{CellPos, CellRect, GridPoint};

/// A closed boundary loop: grid corners one unit step apart, closed implicitly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PerimeterLoop {
    points: Vec<GridPoint>,
}

impl PerimeterLoop {
    /// Wrap a list of corners. The last corner connects back to the first.
    pub fn new(points: Vec<GridPoint>) -> Self {
        Self { points }
    }

    /// Corners in walk order.
    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }

    /// Number of corners, which is also the loop length in unit edges.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True for a loop with no corners.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consecutive corner pairs, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (GridPoint, GridPoint)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Twice the signed enclosed area (shoelace). Sign follows the winding.
    pub fn signed_area2(&self) -> i64 {
        self.edges()
            .map(|(a, b)| i64::from(a.x) * i64::from(b.y) - i64::from(b.x) * i64::from(a.y))
            .sum()
    }

    /// Enclosed area in unit cells.
    pub fn area(&self) -> u32 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "loops live on i32 grids; their area fits in u32"
        )]
        let area = (self.signed_area2().unsigned_abs() / 2) as u32;
        area
    }

    /// Whether the center of `cell` lies inside the loop.
    ///
    /// Uses an even-odd crossing test in doubled coordinates, so cell centers never land
    /// on an edge. Loops are rectilinear, so only vertical edges can cross the ray.
    pub fn contains_cell_center(&self, cell: CellPos) -> bool {
        let px = 2 * i64::from(cell.column) + 1;
        let py = 2 * i64::from(cell.row) + 1;
        let mut inside = false;
        for (a, b) in self.edges() {
            if a.x != b.x {
                continue;
            }
            let (ay, by) = (2 * i64::from(a.y), 2 * i64::from(b.y));
            if (ay > py) != (by > py) && 2 * i64::from(a.x) > px {
                inside = !inside;
            }
        }
        inside
    }

    /// Smallest block of cells covering the loop.
    pub fn bounds(&self) -> Option<CellRect> {
        let first = *self.points.first()?;
        let (mut x0, mut y0, mut x1, mut y1) = (first.x, first.y, first.x, first.y);
        for p in &self.points {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        Some(CellRect::new(x0, y0, x1 - x0, y1 - y0))
    }

    /// The same loop moved by whole cells.
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.points.iter().map(|p| p.offset(dx, dy)).collect())
    }
}

/// Exterior and interior loops of a composite region.
///
/// Interior loops (holes) lie inside some exterior loop and loops never self-intersect;
/// both hold for traced output and are not re-validated here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PerimeterShape {
    exterior: Vec<PerimeterLoop>,
    interior: Vec<PerimeterLoop>,
}

impl PerimeterShape {
    /// Build a shape from exterior and interior loops.
    pub fn new(exterior: Vec<PerimeterLoop>, interior: Vec<PerimeterLoop>) -> Self {
        Self { exterior, interior }
    }

    /// A single rectangular loop covering `rect`, walked the way the tracer walks it.
    pub fn rectangle(rect: CellRect) -> Self {
        let CellRect {
            column,
            row,
            width,
            height,
        } = rect;
        let mut points = Vec::new();
        points.extend((0..height).map(|i| GridPoint::new(column, row + i)));
        points.extend((0..width).map(|i| GridPoint::new(column + i, row + height)));
        points.extend((0..height).map(|i| GridPoint::new(column + width, row + height - i)));
        points.extend((0..width).map(|i| GridPoint::new(column + width - i, row)));
        Self::new(alloc::vec![PerimeterLoop::new(points)], Vec::new())
    }

    /// Outer boundaries, one per contiguous group.
    pub fn exterior(&self) -> &[PerimeterLoop] {
        &self.exterior
    }

    /// Hole boundaries.
    pub fn interior(&self) -> &[PerimeterLoop] {
        &self.interior
    }

    /// True when there are no loops at all.
    pub fn is_empty(&self) -> bool {
        self.exterior.is_empty() && self.interior.is_empty()
    }

    /// Total perimeter length in unit edges, holes included.
    pub fn edge_count(&self) -> u32 {
        let n: usize = self
            .exterior
            .iter()
            .chain(&self.interior)
            .map(PerimeterLoop::len)
            .sum();
        #[allow(
            clippy::cast_possible_truncation,
            reason = "edge counts are bounded by the grid size"
        )]
        let n = n as u32;
        n
    }

    /// Area in unit cells: exterior area minus hole area.
    pub fn unit_area(&self) -> u32 {
        let outer: u32 = self.exterior.iter().map(PerimeterLoop::area).sum();
        let holes: u32 = self.interior.iter().map(PerimeterLoop::area).sum();
        outer.saturating_sub(holes)
    }

    /// Bounds of all exterior loops.
    pub fn bounds(&self) -> Option<CellRect> {
        self.exterior
            .iter()
            .filter_map(PerimeterLoop::bounds)
            .reduce(|a, b| a.union(&b))
    }

    /// Width of the bounds in cells (zero when empty).
    pub fn width(&self) -> u32 {
        self.bounds().map_or(0, |b| b.width.unsigned_abs())
    }

    /// Height of the bounds in cells (zero when empty).
    pub fn height(&self) -> u32 {
        self.bounds().map_or(0, |b| b.height.unsigned_abs())
    }

    /// Whether the cell center is inside the region (inside an exterior, outside every hole).
    pub fn contains_cell_center(&self, cell: CellPos) -> bool {
        self.exterior.iter().any(|l| l.contains_cell_center(cell))
            && !self.interior.iter().any(|l| l.contains_cell_center(cell))
    }

    /// The same shape moved by whole cells.
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.exterior.iter().map(|l| l.translated(dx, dy)).collect(),
            self.interior.iter().map(|l| l.translated(dx, dy)).collect(),
        )
    }
}
