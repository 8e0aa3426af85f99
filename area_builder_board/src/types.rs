// Copyright 2025 the Area Builder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the board: shape identifiers, flags, colors, and fractions.

use core::fmt;

/// Identifier for a shape in a [`ShapeArena`](crate::ShapeArena).
///
/// A small, copyable handle made of a slot index and a generation counter.
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `ShapeId` for that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `ShapeId`.
///
/// Stale ids never alias a different live shape because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ShapeId(pub(crate) u32, pub(crate) u32);

impl ShapeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Color tag of a shape. Boards may accept only one color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Create a color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Which shape colors a board takes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AcceptedColor {
    /// Any color.
    #[default]
    Any,
    /// Only this color.
    Only(Color),
}

impl AcceptedColor {
    /// Whether a shape of `color` may be placed.
    pub fn accepts(&self, color: Color) -> bool {
        match self {
            Self::Any => true,
            Self::Only(c) => *c == color,
        }
    }
}

bitflags::bitflags! {
    /// Motion and interaction state of a movable shape.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ShapeFlags: u8 {
        /// The user is dragging the shape.
        const USER_CONTROLLED      = 0b0000_0001;
        /// The shape is moving toward its destination.
        const ANIMATING            = 0b0000_0010;
        /// The destination is the shape's origin.
        const RETURNING            = 0b0000_0100;
        /// The shape is fading out.
        const FADING               = 0b0000_1000;
        /// Hide the shape when it is not moving (the composite outline stands in for it).
        const INVISIBLE_WHEN_STILL = 0b0001_0000;
    }
}

/// What released shapes do after [`Board::release_all`](crate::Board::release_all).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReleaseMode {
    /// Teleport to the origin.
    JumpHome,
    /// Animate back to the origin.
    AnimateHome,
    /// Fade out in place.
    #[default]
    Fade,
}

/// Non-negative fraction.
///
/// `0/0` is a legal value (the proportion of anything on an empty board); it reduces to
/// itself and has no [`value`](Self::value).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fraction {
    /// Numerator.
    pub numerator: u32,
    /// Denominator.
    pub denominator: u32,
}

impl Fraction {
    /// Create a fraction as given (not reduced).
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Lowest terms.
    pub const fn reduced(self) -> Self {
        let g = gcd(self.numerator, self.denominator);
        if g == 0 {
            self
        } else {
            Self::new(self.numerator / g, self.denominator / g)
        }
    }

    /// Decimal value, or `None` for a zero denominator.
    pub fn value(self) -> Option<f64> {
        (self.denominator != 0).then(|| f64::from(self.numerator) / f64::from(self.denominator))
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

const fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}
