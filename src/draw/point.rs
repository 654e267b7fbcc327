//! Screen-space coordinates.

use serde::{Deserialize, Serialize};

/// A 2D coordinate in screen space (pixels, origin top-left).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns true if both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Midpoint between `self` and `other`.
    pub fn midpoint(&self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Moves `factor` of the way from `self` towards `target`.
    pub fn lerp(&self, target: Point, factor: f64) -> Point {
        Point::new(
            self.x + (target.x - self.x) * factor,
            self.y + (target.y - self.y) * factor,
        )
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Min/max accumulator over points, used for bounding boxes.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    pub fn from_point(p: Point) -> Self {
        Self {
            min_x: p.x,
            min_y: p.y,
            max_x: p.x,
            max_y: p.y,
        }
    }

    pub fn include(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Grows the extent by `amount` on every side.
    pub fn inflate(mut self, amount: f64) -> Self {
        self.min_x -= amount;
        self.min_y -= amount;
        self.max_x += amount;
        self.max_y += amount;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_points_are_detected() {
        assert!(Point::new(1.0, 2.0).is_finite());
        assert!(!Point::new(f64::NAN, 2.0).is_finite());
        assert!(!Point::new(0.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn lerp_moves_partway() {
        let p = Point::new(0.0, 0.0).lerp(Point::new(10.0, -10.0), 0.7);
        assert!((p.x - 7.0).abs() < 1e-9);
        assert!((p.y + 7.0).abs() < 1e-9);
    }

    #[test]
    fn extent_tracks_min_and_max() {
        let mut extent = Extent::from_point(Point::new(3.0, 4.0));
        extent.include(Point::new(-1.0, 10.0));
        let extent = extent.inflate(1.0);
        assert_eq!(
            (extent.min_x, extent.min_y, extent.max_x, extent.max_y),
            (-2.0, 3.0, 4.0, 11.0)
        );
    }
}
