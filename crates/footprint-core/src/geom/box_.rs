//! Box2I, Box2D - Rectangle regions
//!
//! `Box2I` is a pixel rectangle stored as origin plus size. Its corners are
//! inclusive: a box with `x = 0, w = 3` covers columns 0, 1 and 2.

use super::{Point2D, Point2I};
use crate::error::{Error, Result};

/// An integer rectangle region
///
/// A simple Copy type since it's small and frequently copied. The default
/// value is the empty box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Box2I {
    /// Left x coordinate
    pub x: i32,
    /// Bottom (minimum) y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Box2I {
    /// Create a new box
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is negative.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "box dimensions must be non-negative: w={}, h={}",
                w, h
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a box without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a box from two inclusive corner points, in any order
    pub fn from_corners(a: Point2I, b: Point2I) -> Self {
        let (x0, x1) = if a.x <= b.x { (a.x, b.x) } else { (b.x, a.x) };
        let (y0, y1) = if a.y <= b.y { (a.y, b.y) } else { (b.y, a.y) };
        Self {
            x: x0,
            y: y0,
            w: x1 - x0 + 1,
            h: y1 - y0 + 1,
        }
    }

    /// Minimum x (inclusive)
    #[inline]
    pub fn min_x(&self) -> i32 {
        self.x
    }

    /// Minimum y (inclusive)
    #[inline]
    pub fn min_y(&self) -> i32 {
        self.y
    }

    /// Maximum x (inclusive)
    #[inline]
    pub fn max_x(&self) -> i32 {
        self.x + self.w - 1
    }

    /// Maximum y (inclusive)
    #[inline]
    pub fn max_y(&self) -> i32 {
        self.y + self.h - 1
    }

    /// Get the right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Get the top y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Minimum corner
    #[inline]
    pub fn min(&self) -> Point2I {
        Point2I::new(self.min_x(), self.min_y())
    }

    /// Maximum corner (inclusive)
    #[inline]
    pub fn max(&self) -> Point2I {
        Point2I::new(self.max_x(), self.max_y())
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.w
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.h
    }

    /// Get the area
    #[inline]
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// Check if the box is empty (zero area)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Check if a point is inside the box
    #[inline]
    pub fn contains_point(&self, p: Point2I) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Check if this box overlaps with another
    pub fn overlaps(&self, other: &Box2I) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Compute the intersection of two boxes
    pub fn intersect(&self, other: &Box2I) -> Option<Box2I> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Box2I {
                x,
                y,
                w: right - x,
                h: bottom - y,
            })
        } else {
            None
        }
    }

    /// Compute the union (bounding box) of two boxes
    ///
    /// An empty operand does not contribute.
    pub fn union(&self, other: &Box2I) -> Box2I {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());

        Box2I {
            x,
            y,
            w: right - x,
            h: bottom - y,
        }
    }

    /// Grow the box in place so that it contains `p`
    pub fn include_point(&mut self, p: Point2I) {
        if self.is_empty() {
            *self = Box2I::new_unchecked(p.x, p.y, 1, 1);
            return;
        }
        *self = self.union(&Box2I::new_unchecked(p.x, p.y, 1, 1));
    }

    /// Grow the box in place so that it contains `other`
    pub fn include_box(&mut self, other: &Box2I) {
        *self = self.union(other);
    }

    /// Shrink the box in place to its intersection with `other`
    ///
    /// Becomes empty if the boxes do not overlap.
    pub fn clip(&mut self, other: &Box2I) {
        *self = self.intersect(other).unwrap_or_default();
    }

    /// Translate the box in place by (dx, dy)
    pub fn shift(&mut self, dx: i32, dy: i32) {
        if self.is_empty() {
            return;
        }
        self.x += dx;
        self.y += dy;
    }

    /// The four corners, in (min, min), (min, max), (max, min), (max, max) order
    pub fn corners(&self) -> [Point2I; 4] {
        [
            Point2I::new(self.min_x(), self.min_y()),
            Point2I::new(self.min_x(), self.max_y()),
            Point2I::new(self.max_x(), self.min_y()),
            Point2I::new(self.max_x(), self.max_y()),
        ]
    }
}

/// A floating-point rectangle, built up by including points.
///
/// The default value is empty; including a single point gives a
/// zero-size, non-empty box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Box2D {
    min: Point2D,
    max: Point2D,
}

impl Default for Box2D {
    fn default() -> Self {
        Self {
            min: Point2D::new(f64::INFINITY, f64::INFINITY),
            max: Point2D::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }
}

impl Box2D {
    /// Create an empty box
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    #[inline]
    pub fn min(&self) -> Point2D {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Point2D {
        self.max
    }

    /// Grow the box so that it contains `p`
    pub fn include(&mut self, p: Point2D) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Convert to the smallest pixel box whose pixel centres cover this box.
    ///
    /// The minimum corner is `floor(min + 0.5)` and the maximum corner is
    /// `ceil(max - 0.5)`, so a box spanning pixel centres 0..2 maps to
    /// columns 0..=2.
    pub fn to_box2i(&self) -> Box2I {
        if self.is_empty() {
            return Box2I::default();
        }
        let x0 = (self.min.x + 0.5).floor() as i32;
        let y0 = (self.min.y + 0.5).floor() as i32;
        let x1 = (self.max.x - 0.5).ceil() as i32;
        let y1 = (self.max.y - 0.5).ceil() as i32;
        if x1 < x0 || y1 < y0 {
            return Box2I::default();
        }
        Box2I::from_corners(Point2I::new(x0, y0), Point2I::new(x1, y1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_corners_inclusive() {
        let b = Box2I::from_corners(Point2I::new(2, 2), Point2I::new(0, 0));
        assert_eq!(b, Box2I::new_unchecked(0, 0, 3, 3));
        assert_eq!(b.max(), Point2I::new(2, 2));
        assert!(b.contains_point(Point2I::new(2, 2)));
        assert!(!b.contains_point(Point2I::new(3, 2)));
    }

    #[test]
    fn test_box_include_from_empty() {
        let mut b = Box2I::default();
        assert!(b.is_empty());
        b.include_point(Point2I::new(5, -1));
        assert_eq!(b, Box2I::new_unchecked(5, -1, 1, 1));
        b.include_point(Point2I::new(2, 3));
        assert_eq!(b.min(), Point2I::new(2, -1));
        assert_eq!(b.max(), Point2I::new(5, 3));
    }

    #[test]
    fn test_box_clip_disjoint_is_empty() {
        let mut a = Box2I::new_unchecked(0, 0, 4, 4);
        a.clip(&Box2I::new_unchecked(10, 10, 2, 2));
        assert!(a.is_empty());
    }

    #[test]
    fn test_box_shift_empty_stays_empty() {
        let mut b = Box2I::default();
        b.shift(3, 4);
        assert_eq!(b, Box2I::default());
    }

    #[test]
    fn test_box2d_to_box2i() {
        let mut d = Box2D::new();
        assert!(d.to_box2i().is_empty());
        d.include(Point2D::new(5.0, 5.0));
        assert_eq!(d.to_box2i(), Box2I::new_unchecked(5, 5, 1, 1));
        d.include(Point2D::new(7.2, 3.6));
        assert_eq!(
            d.to_box2i(),
            Box2I::from_corners(Point2I::new(5, 4), Point2I::new(7, 5))
        );
    }

    #[test]
    fn test_box_new_rejects_negative() {
        assert!(Box2I::new(0, 0, -1, 2).is_err());
    }
}
