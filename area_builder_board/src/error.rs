// Copyright 2025 the Area Builder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors for board construction.

/// Why a [`BoardConfig`](crate::BoardConfig) cannot produce a board.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum BoardError {
    /// The unit length is zero, negative, or not finite.
    #[error("unit length must be positive and finite, got {0}")]
    InvalidUnitLength(f64),
    /// A board side is not a positive whole number of unit lengths.
    #[error(
        "board size {width}x{height} is not a positive whole multiple of unit length {unit_length}"
    )]
    SizeNotMultipleOfUnit {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
        /// Requested unit length.
        unit_length: f64,
    },
    /// The cell count does not fit the grid's index type.
    #[error("board of {columns}x{rows} cells is too large")]
    TooLarge {
        /// Column count.
        columns: i32,
        /// Row count.
        rows: i32,
    },
}
