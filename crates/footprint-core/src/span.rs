//! Span - a horizontal run of pixels
//!
//! A span covers columns `x0..=x1` of a single row `y`. Spans order
//! row-major: by `y`, then `x0`, then `x1`.

use std::fmt;

/// A run of pixels `x0..=x1` on row `y`.
///
/// The constructor keeps `x0 <= x1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub(crate) y: i32,
    pub(crate) x0: i32,
    pub(crate) x1: i32,
}

impl Span {
    /// Create a span, swapping the end points if `x1 < x0`.
    pub fn new(y: i32, x0: i32, x1: i32) -> Self {
        if x1 < x0 {
            Self { y, x0: x1, x1: x0 }
        } else {
            Self { y, x0, x1 }
        }
    }

    /// Row
    #[inline]
    pub fn y(&self) -> i32 {
        self.y
    }

    /// First column (inclusive)
    #[inline]
    pub fn x0(&self) -> i32 {
        self.x0
    }

    /// Last column (inclusive)
    #[inline]
    pub fn x1(&self) -> i32 {
        self.x1
    }

    /// Number of pixels in the span
    #[inline]
    pub fn width(&self) -> i32 {
        self.x1 - self.x0 + 1
    }

    /// Check whether pixel (x, y) lies in the span
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        y == self.y && x >= self.x0 && x <= self.x1
    }

    /// Translate the span in place
    pub fn shift(&mut self, dx: i32, dy: i32) {
        self.x0 += dx;
        self.x1 += dx;
        self.y += dy;
    }

    /// Translated copy of the span
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        let mut s = *self;
        s.shift(dx, dy);
        s
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}..{}", self.y, self.x0, self.x1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_swaps_endpoints() {
        let s = Span::new(3, 7, 2);
        assert_eq!((s.y(), s.x0(), s.x1()), (3, 2, 7));
        assert_eq!(s.width(), 6);
    }

    #[test]
    fn test_span_order_is_row_major() {
        let mut v = vec![
            Span::new(1, 0, 4),
            Span::new(0, 5, 6),
            Span::new(0, 1, 9),
            Span::new(0, 1, 2),
        ];
        v.sort();
        assert_eq!(
            v,
            vec![
                Span::new(0, 1, 2),
                Span::new(0, 1, 9),
                Span::new(0, 5, 6),
                Span::new(1, 0, 4),
            ]
        );
    }

    #[test]
    fn test_span_contains() {
        let s = Span::new(2, -1, 1);
        assert!(s.contains(-1, 2));
        assert!(s.contains(1, 2));
        assert!(!s.contains(2, 2));
        assert!(!s.contains(0, 3));
    }

    #[test]
    fn test_span_display() {
        assert_eq!(Span::new(4, 1, 3).to_string(), "4: 1..3");
        assert_eq!(Span::new(4, 1, 3).shifted(1, -4).to_string(), "0: 2..4");
    }
}
