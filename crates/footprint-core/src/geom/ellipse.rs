//! Ellipses, second moments and ellipse rasterization
//!
//! [`Quadrupole`] holds the second-moment matrix of a shape (the return
//! type of [`Footprint::shape`](crate::Footprint::shape)); [`Ellipse`]
//! places a quadrupole at a centre; [`PixelRegion`] enumerates, row by
//! row, the pixel centres that fall inside an ellipse.

use super::{Box2D, Box2I, Point2D};

/// Second moments `(Ixx, Iyy, Ixy)` of a shape about its centre.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Quadrupole {
    pub ixx: f64,
    pub iyy: f64,
    pub ixy: f64,
}

impl Quadrupole {
    pub const fn new(ixx: f64, iyy: f64, ixy: f64) -> Self {
        Self { ixx, iyy, ixy }
    }

    /// Build from semi-major axis `a`, semi-minor axis `b` and position
    /// angle `theta` (radians, counter-clockwise from +x).
    pub fn from_axes(a: f64, b: f64, theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        let a2 = a * a;
        let b2 = b * b;
        Self {
            ixx: a2 * c * c + b2 * s * s,
            iyy: a2 * s * s + b2 * c * c,
            ixy: (a2 - b2) * s * c,
        }
    }

    /// Determinant of the moment matrix
    #[inline]
    pub fn determinant(&self) -> f64 {
        self.ixx * self.iyy - self.ixy * self.ixy
    }
}

/// An ellipse: a quadrupole centred at a floating-point position.
///
/// A point `p` is inside when `(p - c)^T Q^-1 (p - c) <= 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub core: Quadrupole,
    pub center: Point2D,
}

impl Ellipse {
    pub const fn new(core: Quadrupole, center: Point2D) -> Self {
        Self { core, center }
    }

    /// A circle of the given radius
    pub fn circle(center: Point2D, radius: f64) -> Self {
        Self {
            core: Quadrupole::new(radius * radius, radius * radius, 0.0),
            center,
        }
    }

    /// Floating-point bounding box of the ellipse
    pub fn bbox(&self) -> Box2D {
        let hx = self.core.ixx.max(0.0).sqrt();
        let hy = self.core.iyy.max(0.0).sqrt();
        let mut b = Box2D::new();
        b.include(Point2D::new(self.center.x - hx, self.center.y - hy));
        b.include(Point2D::new(self.center.x + hx, self.center.y + hy));
        b
    }
}

/// One row of a [`PixelRegion`]: columns `x0..=x1` at row `y`.
///
/// Rows that intersect the ellipse's bounding box but contain no pixel
/// centre have `x0 > x1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionRow {
    pub y: i32,
    pub x0: i32,
    pub x1: i32,
}

impl RegionRow {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x0 > self.x1
    }
}

/// Row-by-row rasterization of an ellipse.
///
/// Yields one [`RegionRow`] per integer row between the ellipse's lowest
/// and highest pixel centre, in increasing `y`.
#[derive(Debug, Clone)]
pub struct PixelRegion {
    center: Point2D,
    iyy: f64,
    slope: f64,
    det: f64,
    y: i32,
    y_end: i32,
}

impl PixelRegion {
    pub fn new(ellipse: &Ellipse) -> Self {
        let q = ellipse.core;
        let det = q.determinant().max(0.0);
        let (y, y_end) = if q.iyy > 0.0 {
            let hy = q.iyy.sqrt();
            (
                (ellipse.center.y - hy).ceil() as i32,
                (ellipse.center.y + hy).floor() as i32 + 1,
            )
        } else {
            (0, 0)
        };
        let slope = if q.iyy > 0.0 { q.ixy / q.iyy } else { 0.0 };
        Self {
            center: ellipse.center,
            iyy: q.iyy,
            slope,
            det,
            y,
            y_end,
        }
    }

    /// Integer bounding box of all non-empty rows
    pub fn bbox(&self) -> Box2I {
        let mut bbox = Box2I::default();
        for row in self.clone().filter(|r| !r.is_empty()) {
            bbox.include_point(super::Point2I::new(row.x0, row.y));
            bbox.include_point(super::Point2I::new(row.x1, row.y));
        }
        bbox
    }

    fn row_at(&self, y: i32) -> RegionRow {
        let dy = y as f64 - self.center.y;
        let rem = self.iyy - dy * dy;
        if rem < 0.0 {
            return RegionRow { y, x0: 1, x1: 0 };
        }
        let mid = self.center.x + self.slope * dy;
        let half = (rem * self.det).sqrt() / self.iyy;
        RegionRow {
            y,
            x0: (mid - half).ceil() as i32,
            x1: (mid + half).floor() as i32,
        }
    }
}

impl Iterator for PixelRegion {
    type Item = RegionRow;

    fn next(&mut self) -> Option<RegionRow> {
        if self.y >= self.y_end {
            return None;
        }
        let row = self.row_at(self.y);
        self.y += 1;
        Some(row)
    }
}
