// Copyright 2025 the Area Builder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Movable shapes: position, destination, origin, and per-frame motion.

use kurbo::{Point, Rect, Size};

use crate::types::{Color, ShapeFlags};

/// Speed of animated moves, in world units per second.
pub const ANIMATION_SPEED: f64 = 200.0;

/// Opacity lost per second while fading.
pub const FADE_RATE: f64 = 2.0;

/// What finished during a [`MovableShape::step`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Reached a destination other than the origin.
    Arrived,
    /// Reached the origin after [`MovableShape::return_to_origin`].
    ArrivedHome,
    /// Opacity reached zero.
    FadedOut,
}

/// A rectangular shape that can be dragged, snapped onto a board, and sent home.
///
/// The position is the world-space top-left corner. Size is expected to be a whole
/// multiple of the unit length of any board the shape is placed on.
#[derive(Clone, Debug)]
pub struct MovableShape {
    size: Size,
    color: Color,
    origin: Point,
    position: Point,
    destination: Point,
    flags: ShapeFlags,
    opacity: f64,
}

impl MovableShape {
    /// Create a still shape resting at `origin`.
    pub fn new(size: Size, color: Color, origin: Point) -> Self {
        assert!(
            size.width > 0.0 && size.height > 0.0,
            "shape size must be positive"
        );
        Self {
            size,
            color,
            origin,
            position: origin,
            destination: origin,
            flags: ShapeFlags::empty(),
            opacity: 1.0,
        }
    }

    /// A `unit × unit` square.
    pub fn unit_square(unit_length: f64, color: Color, origin: Point) -> Self {
        Self::new(Size::new(unit_length, unit_length), color, origin)
    }

    /// Width and height in world units.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Color tag.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Where the shape came from and returns to.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Current top-left corner.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Where the shape is headed (equal to the position when still).
    pub fn destination(&self) -> Point {
        self.destination
    }

    /// Current flags.
    pub fn flags(&self) -> ShapeFlags {
        self.flags
    }

    /// Opacity in `[0, 1]`.
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// World-space bounds at the current position.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Whether the user is dragging the shape.
    pub fn is_user_controlled(&self) -> bool {
        self.flags.contains(ShapeFlags::USER_CONTROLLED)
    }

    /// Whether the shape is moving toward its destination.
    pub fn is_animating(&self) -> bool {
        self.flags.contains(ShapeFlags::ANIMATING)
    }

    /// Whether the shape is fading out.
    pub fn is_fading(&self) -> bool {
        self.flags.contains(ShapeFlags::FADING)
    }

    /// Start or stop user control. Grabbing a shape cancels any motion or fade.
    pub fn set_user_controlled(&mut self, controlled: bool) {
        self.flags.set(ShapeFlags::USER_CONTROLLED, controlled);
        if controlled {
            self.flags
                .remove(ShapeFlags::ANIMATING | ShapeFlags::RETURNING | ShapeFlags::FADING);
            self.destination = self.position;
            self.opacity = 1.0;
        }
    }

    /// Move the shape directly, as during a drag.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
        self.destination = position;
        self.flags.remove(ShapeFlags::ANIMATING);
    }

    /// Head for `destination`, either animating there or jumping immediately.
    pub fn set_destination(&mut self, destination: Point, animate: bool) {
        self.destination = destination;
        self.flags.remove(ShapeFlags::RETURNING);
        if animate && self.position != destination {
            self.flags.insert(ShapeFlags::ANIMATING);
        } else {
            self.position = destination;
            self.flags.remove(ShapeFlags::ANIMATING);
        }
    }

    /// Head back to the origin. Arrival is reported by [`step`](Self::step) as
    /// [`StepOutcome::ArrivedHome`], even for a jump.
    pub fn return_to_origin(&mut self, animate: bool) {
        self.set_destination(self.origin, animate);
        self.flags.insert(ShapeFlags::RETURNING);
    }

    /// Start fading out where the shape is.
    pub fn fade_away(&mut self) {
        self.flags.insert(ShapeFlags::FADING);
    }

    /// Set the render hint used while the shape is part of a composite.
    pub fn set_invisible_when_still(&mut self, invisible: bool) {
        self.flags.set(ShapeFlags::INVISIBLE_WHEN_STILL, invisible);
    }

    /// Advance motion and fading by `dt` seconds.
    pub fn step(&mut self, dt: f64) -> Option<StepOutcome> {
        if self.is_user_controlled() {
            return None;
        }
        let mut outcome = None;
        if self.is_animating() {
            let delta = self.destination - self.position;
            let distance = delta.hypot();
            let travel = dt * ANIMATION_SPEED;
            if distance > travel {
                self.position += delta * (travel / distance);
            } else {
                self.position = self.destination;
                self.flags.remove(ShapeFlags::ANIMATING);
                if !self.flags.contains(ShapeFlags::RETURNING) {
                    outcome = Some(StepOutcome::Arrived);
                }
            }
        }
        if !self.is_animating() && self.flags.contains(ShapeFlags::RETURNING) {
            self.flags.remove(ShapeFlags::RETURNING);
            outcome = Some(StepOutcome::ArrivedHome);
        }
        if self.is_fading() {
            self.opacity = (self.opacity - dt * FADE_RATE).max(0.0);
            if self.opacity <= 0.0 {
                self.flags.remove(ShapeFlags::FADING);
                outcome = outcome.or(Some(StepOutcome::FadedOut));
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(200, 0, 0);

    #[test]
    fn animates_at_fixed_speed_then_arrives() {
        let mut s = MovableShape::unit_square(10.0, RED, Point::new(0.0, 0.0));
        s.set_destination(Point::new(300.0, 0.0), true);
        assert!(s.is_animating());
        assert_eq!(s.step(1.0), None);
        assert_eq!(s.position(), Point::new(200.0, 0.0));
        assert_eq!(s.step(1.0), Some(StepOutcome::Arrived));
        assert_eq!(s.position(), Point::new(300.0, 0.0));
        assert!(!s.is_animating());
        assert_eq!(s.step(1.0), None);
    }

    #[test]
    fn jump_needs_no_steps() {
        let mut s = MovableShape::unit_square(10.0, RED, Point::ZERO);
        s.set_destination(Point::new(50.0, 50.0), false);
        assert_eq!(s.position(), Point::new(50.0, 50.0));
        assert!(!s.is_animating());
    }

    #[test]
    fn return_home_reports_arrival_even_when_jumping() {
        let mut s = MovableShape::unit_square(10.0, RED, Point::new(5.0, 5.0));
        s.set_position(Point::new(100.0, 5.0));
        s.return_to_origin(false);
        assert_eq!(s.position(), Point::new(5.0, 5.0));
        assert_eq!(s.step(0.016), Some(StepOutcome::ArrivedHome));
        assert_eq!(s.step(0.016), None);

        s.set_position(Point::new(105.0, 5.0));
        s.return_to_origin(true);
        assert_eq!(s.step(0.1), None);
        assert_eq!(s.step(1.0), Some(StepOutcome::ArrivedHome));
    }

    #[test]
    fn fade_runs_to_zero() {
        let mut s = MovableShape::unit_square(10.0, RED, Point::ZERO);
        s.fade_away();
        assert_eq!(s.step(0.25), None);
        assert_eq!(s.opacity(), 0.5);
        assert_eq!(s.step(0.25), Some(StepOutcome::FadedOut));
        assert!(!s.is_fading());
    }

    #[test]
    fn grabbing_cancels_motion() {
        let mut s = MovableShape::unit_square(10.0, RED, Point::ZERO);
        s.set_destination(Point::new(100.0, 0.0), true);
        s.step(0.1);
        s.set_user_controlled(true);
        assert!(!s.is_animating());
        assert_eq!(s.destination(), s.position());
        assert_eq!(s.step(1.0), None);
    }
}
