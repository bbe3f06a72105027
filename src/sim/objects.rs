//! Game objects: one shared rectangle plus kind-specific payload
//!
//! Every entity owns a [`Rect`]. Width and height are fixed at construction;
//! only the position can change, and never to negative coordinates.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Angle, Point};

/// Penetration below this depth counts as touching, not overlapping
const CONTACT_EPSILON: f64 = 1e-9;

/// Axis-aligned rectangle in grid units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    top_left: Point,
    width: f64,
    height: f64,
}

impl Rect {
    /// Panics if the size is not positive or the position is negative
    pub fn new(top_left: Point, width: f64, height: f64) -> Self {
        assert!(width > 0.0, "rect width must be positive, got {width}");
        assert!(height > 0.0, "rect height must be positive, got {height}");
        assert!(
            top_left.x >= 0.0 && top_left.y >= 0.0,
            "rect position must be non-negative, got {top_left}"
        );
        Self {
            top_left,
            width,
            height,
        }
    }

    #[inline]
    pub fn top_left(&self) -> Point {
        self.top_left
    }

    /// Move to `top_left`; positions with a negative coordinate are ignored
    pub fn set_top_left(&mut self, top_left: Point) {
        if top_left.x >= 0.0 && top_left.y >= 0.0 {
            self.top_left = top_left;
        }
    }

    pub fn translate(&mut self, delta: DVec2) {
        self.set_top_left(self.top_left + delta);
    }

    #[inline]
    pub fn bottom_right(&self) -> Point {
        self.top_left + DVec2::new(self.width, self.height)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn center(&self) -> Point {
        self.top_left + DVec2::new(self.width, self.height) * 0.5
    }

    /// Penetration extents (x, y) when the two rectangles overlap
    ///
    /// Rectangles that only share an edge do not overlap.
    pub fn overlap(&self, other: &Rect) -> Option<DVec2> {
        let a_max = self.bottom_right();
        let b_max = other.bottom_right();
        let x = a_max.x.min(b_max.x) - self.top_left.x.max(other.top_left.x);
        let y = a_max.y.min(b_max.y) - self.top_left.y.max(other.top_left.y);
        if x > CONTACT_EPSILON && y > CONTACT_EPSILON {
            Some(DVec2::new(x, y))
        } else {
            None
        }
    }

    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.overlap(other).is_some()
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub rect: Rect,
    /// Grid units per second along `angle`
    pub velocity: f64,
    pub angle: Angle,
    /// Grid units per second, straight down, added on top of `velocity`
    pub gravity: f64,
    active: bool,
}

impl Ball {
    /// Balls start inactive and wait for a launch
    pub fn new(rect: Rect, velocity: f64, angle: Angle, gravity: f64) -> Self {
        Self {
            rect,
            velocity,
            angle,
            gravity,
            active: false,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Advance the ball by `elapsed_ms` milliseconds
    ///
    /// Gravity is a separate displacement at 90° each call. It never bends
    /// `angle` and does not accumulate between calls.
    pub fn move_by(&mut self, elapsed_ms: f64) {
        if !self.active {
            return;
        }

        let seconds = elapsed_ms / 1000.0;
        let mut delta = DVec2::ZERO;
        if self.velocity != 0.0 {
            delta += self.angle.decompose(seconds * self.velocity);
        }
        if self.gravity != 0.0 {
            delta += Angle::DOWN.decompose(seconds * self.gravity);
        }

        self.rect.translate(delta);
    }
}

/// The player-controlled platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    /// Grid units per second
    pub velocity: f64,
}

impl Platform {
    pub fn new(rect: Rect, velocity: f64) -> Self {
        Self { rect, velocity }
    }

    /// Slide horizontally, staying within `[min_x, max_x]` (right edge included)
    ///
    /// `direction` is negative for left, positive for right, zero to stay put.
    pub fn steer(&mut self, direction: f64, elapsed_ms: f64, min_x: f64, max_x: f64) {
        if direction == 0.0 {
            return;
        }
        let step = direction.signum() * self.velocity * elapsed_ms / 1000.0;
        let right_limit = (max_x - self.rect.width()).max(min_x);
        let x = (self.rect.top_left().x + step).clamp(min_x, right_limit);
        self.rect.set_top_left(Point::new(x, self.rect.top_left().y));
    }
}

/// Immovable border
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub rect: Rect,
}

impl Wall {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }
}

/// Destructible brick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    start_hitpoints: u32,
    hitpoints: u32,
}

impl Brick {
    pub fn new(rect: Rect, hitpoints: u32) -> Self {
        assert!(hitpoints > 0, "brick must start with hitpoints");
        Self {
            rect,
            start_hitpoints: hitpoints,
            hitpoints,
        }
    }

    #[inline]
    pub fn start_hitpoints(&self) -> u32 {
        self.start_hitpoints
    }

    #[inline]
    pub fn hitpoints(&self) -> u32 {
        self.hitpoints
    }

    /// Take one hit; a destroyed brick stays at zero
    pub fn decrease_hitpoints(&mut self) {
        self.hitpoints = self.hitpoints.saturating_sub(1);
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.hitpoints == 0
    }
}

/// Brick without hitpoints; only ever reflects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndestructibleBrick {
    pub rect: Rect,
}

impl IndestructibleBrick {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }
}
