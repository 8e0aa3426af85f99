// Copyright 2025 the Area Builder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Board construction parameters and validation.

use alloc::rc::Rc;
use core::cell::Cell;

use kurbo::{Point, Size};

use crate::error::BoardError;
use crate::types::AcceptedColor;
use crate::util::whole_multiple;

/// A boolean owned elsewhere (typically by the view layer) and read by the board.
pub type SharedFlag = Rc<Cell<bool>>;

/// Display toggles the board exposes but does not own.
#[derive(Clone, Debug, Default)]
pub struct DisplayToggles {
    /// Whether grid lines are shown.
    pub show_grid: SharedFlag,
    /// Whether dimension labels are shown.
    pub show_dimensions: SharedFlag,
}

/// Parameters for [`Board::new`](crate::Board::new).
#[derive(Clone, Debug)]
pub struct BoardConfig {
    /// World-space size. Both sides must be whole multiples of `unit_length`.
    pub size: Size,
    /// Side of one grid cell in world units.
    pub unit_length: f64,
    /// World-space top-left corner.
    pub position: Point,
    /// Colors the board takes.
    pub accepted_color: AcceptedColor,
    /// Treat placed shapes as one contiguous composite.
    pub compose: bool,
    /// Externally owned display toggles.
    pub toggles: DisplayToggles,
}

impl BoardConfig {
    /// A compose-mode board accepting any color.
    pub fn new(size: Size, unit_length: f64, position: Point) -> Self {
        Self {
            size,
            unit_length,
            position,
            accepted_color: AcceptedColor::Any,
            compose: true,
            toggles: DisplayToggles::default(),
        }
    }

    /// Restrict the accepted color.
    pub fn with_accepted_color(mut self, accepted_color: AcceptedColor) -> Self {
        self.accepted_color = accepted_color;
        self
    }

    /// Enable or disable compose mode.
    pub fn with_compose(mut self, compose: bool) -> Self {
        self.compose = compose;
        self
    }

    /// Share display toggles with the caller.
    pub fn with_toggles(mut self, toggles: DisplayToggles) -> Self {
        self.toggles = toggles;
        self
    }

    /// Grid dimensions `(columns, rows)` implied by this configuration.
    pub fn grid_dimensions(&self) -> Result<(i32, i32), BoardError> {
        let unit = self.unit_length;
        if !(unit.is_finite() && unit > 0.0) {
            return Err(BoardError::InvalidUnitLength(unit));
        }
        let not_multiple = || BoardError::SizeNotMultipleOfUnit {
            width: self.size.width,
            height: self.size.height,
            unit_length: unit,
        };
        let columns = whole_multiple(self.size.width, unit).ok_or_else(not_multiple)?;
        let rows = whole_multiple(self.size.height, unit).ok_or_else(not_multiple)?;
        if columns < 1 || rows < 1 {
            return Err(not_multiple());
        }
        if columns.checked_mul(rows).is_none() {
            return Err(BoardError::TooLarge { columns, rows });
        }
        Ok((columns, rows))
    }
}
