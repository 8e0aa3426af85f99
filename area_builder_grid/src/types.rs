// Copyright 2025 the Area Builder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer coordinate types shared by the grid, the tracer, and the perimeter model.
//!
//! All coordinates use screen conventions: `x`/`column` grows to the right and
//! `y`/`row` grows downward.

/// Position of a single cell, addressed by column and row.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    /// Column index (x).
    pub column: i32,
    /// Row index (y).
    pub row: i32,
}

impl CellPos {
    /// Create a cell position.
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// The grid corner at the top-left of this cell.
    pub const fn corner(self) -> GridPoint {
        GridPoint::new(self.column, self.row)
    }

    /// Ordering used to pick the "top-left" cell of a set: lowest row first, then lowest column.
    pub(crate) const fn scan_key(self) -> (i32, i32) {
        (self.row, self.column)
    }
}

/// A grid corner. Corner `(x, y)` is the top-left corner of cell `(x, y)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GridPoint {
    /// Horizontal corner index.
    pub x: i32,
    /// Vertical corner index.
    pub y: i32,
}

impl GridPoint {
    /// Create a grid corner.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset this corner by whole cells.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Axis-aligned block of cells: the footprint of a shape on the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CellRect {
    /// Leftmost column.
    pub column: i32,
    /// Topmost row.
    pub row: i32,
    /// Width in cells.
    pub width: i32,
    /// Height in cells.
    pub height: i32,
}

impl CellRect {
    /// Create a block from its top-left cell and size in cells.
    pub const fn new(column: i32, row: i32, width: i32, height: i32) -> Self {
        Self {
            column,
            row,
            width,
            height,
        }
    }

    /// One past the rightmost column.
    pub const fn right(&self) -> i32 {
        self.column + self.width
    }

    /// One past the bottom row.
    pub const fn bottom(&self) -> i32 {
        self.row + self.height
    }

    /// Number of cells covered.
    pub const fn area(&self) -> u32 {
        if self.width <= 0 || self.height <= 0 {
            0
        } else {
            self.width.unsigned_abs() * self.height.unsigned_abs()
        }
    }

    /// Whether the block covers the cell.
    pub const fn contains(&self, column: i32, row: i32) -> bool {
        column >= self.column && column < self.right() && row >= self.row && row < self.bottom()
    }

    /// Whether the block lies fully inside a `columns × rows` grid.
    pub const fn fits_within(&self, columns: i32, rows: i32) -> bool {
        self.column >= 0 && self.row >= 0 && self.right() <= columns && self.bottom() <= rows
    }

    /// The same block moved by whole cells.
    pub const fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.column + dx, self.row + dy, self.width, self.height)
    }

    /// Smallest block covering both.
    pub fn union(&self, other: &Self) -> Self {
        let column = self.column.min(other.column);
        let row = self.row.min(other.row);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(column, row, right - column, bottom - row)
    }

    /// Covered cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellPos> + use<> {
        let Self {
            column,
            row,
            width,
            height,
        } = *self;
        (row..row + height.max(0))
            .flat_map(move |r| (column..column + width.max(0)).map(move |c| CellPos::new(c, r)))
    }
}
