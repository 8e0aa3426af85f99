// Copyright 2025 the Area Builder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build challenges: a target area with optional perimeter and color mix.

use area_builder_grid::Measurement;

use crate::board::Board;
use crate::types::{Color, Fraction};

/// Required share of the area covered by one color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColorProportion {
    /// The color whose share is checked.
    pub color: Color,
    /// Its share of the total area.
    pub proportion: Fraction,
}

/// What a board must hold to complete a build challenge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BuildSpec {
    /// Required area in unit squares.
    pub area: u32,
    /// Required perimeter in unit lengths, if any.
    pub perimeter: Option<u32>,
    /// Required color share, if any.
    pub proportion: Option<ColorProportion>,
}

impl BuildSpec {
    /// Only the area matters.
    pub const fn area_only(area: u32) -> Self {
        Self {
            area,
            perimeter: None,
            proportion: None,
        }
    }

    /// Also require a perimeter.
    pub const fn with_perimeter(mut self, perimeter: u32) -> Self {
        self.perimeter = Some(perimeter);
        self
    }

    /// Also require `color` to cover `proportion` of the area.
    pub const fn with_proportion(mut self, color: Color, proportion: Fraction) -> Self {
        self.proportion = Some(ColorProportion { color, proportion });
        self
    }

    /// Whether a reading and color share meet this challenge.
    ///
    /// An invalid reading never does. Proportions compare in lowest terms.
    pub fn is_met(&self, measurement: Measurement, share: impl Fn(Color) -> Fraction) -> bool {
        let Measurement::Valid { area, perimeter } = measurement else {
            return false;
        };
        area == self.area
            && self.perimeter.is_none_or(|p| p == perimeter)
            && self
                .proportion
                .is_none_or(|c| share(c.color) == c.proportion.reduced())
    }

    /// Whether the board currently meets this challenge.
    pub fn is_satisfied_by(&self, board: &Board) -> bool {
        self.is_met(board.measurement(), |color| board.proportion_of_color(color))
    }
}
