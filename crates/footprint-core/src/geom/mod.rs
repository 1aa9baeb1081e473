//! Integer and floating-point geometry primitives
//!
//! Points and boxes in the parent-image pixel frame. Integer boxes use
//! inclusive minimum/maximum corners; a box with zero width or height is
//! empty and contains nothing.
//!
//! - [`Point2I`] / [`Point2D`] - pixel and sub-pixel positions
//! - [`Box2I`] / [`Box2D`] - axis-aligned boxes
//! - [`Ellipse`] / [`Quadrupole`] / [`PixelRegion`] - ellipses and their rasterization
//! - [`Projection`] - pixel <-> sky mapping used by footprint transforms

mod box_;
pub mod ellipse;
pub mod projection;

pub use box_::{Box2D, Box2I};
pub use ellipse::{Ellipse, PixelRegion, Quadrupole};
pub use projection::{AffineProjection, Projection, SkyPoint, point_to_point};

/// An integer pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Point2I {
    pub x: i32,
    pub y: i32,
}

impl Point2I {
    /// Create a new point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate the point by (dx, dy)
    pub fn shifted(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(i32, i32)> for Point2I {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// A floating-point position, in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    /// Create a new point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Round to the nearest pixel (`floor(v + 0.5)` on each axis).
    pub fn round(self) -> Point2I {
        Point2I {
            x: (self.x + 0.5).floor() as i32,
            y: (self.y + 0.5).floor() as i32,
        }
    }
}

impl From<Point2I> for Point2D {
    fn from(p: Point2I) -> Self {
        Self {
            x: p.x as f64,
            y: p.y as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_round() {
        assert_eq!(Point2D::new(1.49, -0.5).round(), Point2I::new(1, 0));
        assert_eq!(Point2D::new(2.5, -1.51).round(), Point2I::new(3, -2));
    }

    #[test]
    fn test_point_shifted() {
        assert_eq!(Point2I::new(3, 4).shifted(-1, 2), Point2I::new(2, 6));
    }
}
