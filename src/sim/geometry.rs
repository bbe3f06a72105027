//! Grid-space geometry: points and quadrant-decomposed angles
//!
//! Angles are in degrees, measured from the +x axis toward +y. The grid's y axis
//! grows downward, so 90° points straight down and 270° straight up.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::normalize_degrees;

/// A position in grid units (not pixels)
pub type Point = DVec2;

/// Tolerance used when a travelled distance is treated as zero
const DISTANCE_EPSILON: f64 = 1e-12;

/// One of the four 90° partitions of the circle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quadrant {
    /// [0, 90)
    I,
    /// [90, 180)
    II,
    /// [180, 270)
    III,
    /// [270, 360)
    IV,
}

/// Direction of travel in degrees, always within [0, 360)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Angle(f64);

impl Angle {
    /// Straight down (direction of gravity)
    pub const DOWN: Angle = Angle(90.0);

    pub fn from_degrees(degrees: f64) -> Self {
        Self(normalize_degrees(degrees))
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.0
    }

    pub fn quadrant(self) -> Quadrant {
        match self.0 {
            d if d < 90.0 => Quadrant::I,
            d if d < 180.0 => Quadrant::II,
            d if d < 270.0 => Quadrant::III,
            _ => Quadrant::IV,
        }
    }

    /// Angle inside its quadrant, in [0, 90)
    #[inline]
    pub fn quadrant_angle(self) -> f64 {
        self.0 % 90.0
    }

    /// Split a travelled distance into (dx, dy) along this angle
    ///
    /// The reduced angle gives the two legs of a right triangle whose
    /// hypotenuse is `distance`; the quadrant decides which leg lands on which
    /// axis and with which sign.
    pub fn decompose(self, distance: f64) -> DVec2 {
        if distance.abs() < DISTANCE_EPSILON {
            return DVec2::ZERO;
        }

        let reduced = self.quadrant_angle().to_radians();
        let opposite = reduced.sin() * distance;
        let adjacent = reduced.cos() * distance;

        match self.quadrant() {
            Quadrant::I => DVec2::new(adjacent, opposite),
            Quadrant::II => DVec2::new(-opposite, adjacent),
            Quadrant::III => DVec2::new(-adjacent, -opposite),
            Quadrant::IV => DVec2::new(opposite, -adjacent),
        }
    }

    /// Unit direction vector
    #[inline]
    pub fn heading(self) -> DVec2 {
        self.decompose(1.0)
    }

    /// Reflect off a vertical surface: the horizontal component flips
    pub fn mirror_horizontal(self) -> Self {
        Self::from_degrees(180.0 - self.0)
    }

    /// Reflect off a horizontal surface: the vertical component flips
    pub fn mirror_vertical(self) -> Self {
        Self::from_degrees(360.0 - self.0)
    }
}

impl From<f64> for Angle {
    fn from(degrees: f64) -> Self {
        Self::from_degrees(degrees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: DVec2, b: DVec2) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_quadrant_partitions() {
        assert_eq!(Angle::from_degrees(0.0).quadrant(), Quadrant::I);
        assert_eq!(Angle::from_degrees(89.9).quadrant(), Quadrant::I);
        assert_eq!(Angle::from_degrees(90.0).quadrant(), Quadrant::II);
        assert_eq!(Angle::from_degrees(180.0).quadrant(), Quadrant::III);
        assert_eq!(Angle::from_degrees(270.0).quadrant(), Quadrant::IV);
        assert_eq!(Angle::from_degrees(-45.0).quadrant(), Quadrant::IV);
    }

    #[test]
    fn test_quadrant_angle() {
        assert!((Angle::from_degrees(135.0).quadrant_angle() - 45.0).abs() < 1e-12);
        assert!((Angle::from_degrees(300.0).quadrant_angle() - 30.0).abs() < 1e-12);
        assert_eq!(Angle::from_degrees(180.0).quadrant_angle(), 0.0);
    }

    #[test]
    fn test_decompose_matches_polar() {
        for deg in [0.0, 30.0, 90.0, 135.0, 200.0, 270.0, 315.0, 359.0] {
            let angle = Angle::from_degrees(deg);
            let rad = f64::to_radians(deg);
            let expected = DVec2::new(rad.cos(), rad.sin()) * 2.5;
            assert!(close(angle.decompose(2.5), expected), "angle {deg}");
        }
    }

    #[test]
    fn test_decompose_zero_distance() {
        assert_eq!(Angle::from_degrees(135.0).decompose(0.0), DVec2::ZERO);
    }

    #[test]
    fn test_down_is_positive_y() {
        assert!(close(Angle::DOWN.heading(), DVec2::new(0.0, 1.0)));
    }

    #[test]
    fn test_mirrors() {
        let angle = Angle::from_degrees(135.0);
        let h = angle.heading();

        let side = angle.mirror_horizontal().heading();
        assert!(close(side, DVec2::new(-h.x, h.y)));

        let top = angle.mirror_vertical().heading();
        assert!(close(top, DVec2::new(h.x, -h.y)));

        assert_eq!(Angle::from_degrees(0.0).mirror_vertical().degrees(), 0.0);
    }
}
