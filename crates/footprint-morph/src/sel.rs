//! Structuring elements for run-length morphology
//!
//! A structuring element is a list of rows, each a [`Span`] whose `y` is
//! the row offset and whose `x0..=x1` is the column offset range. Rows
//! are indexed by their position in the list; erosion relies on that
//! index to check that every row of the element covers a candidate pixel.

use crate::{MorphError, MorphResult};
use footprint_core::Span;

/// Distance metric for isotropic grow and shrink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    /// Euclidean: a discretized disk
    #[default]
    Isotropic,
    /// Manhattan: a diamond
    Manhattan,
}

/// Per-direction extents for directional grow and shrink.
///
/// `up` extends toward increasing `y`, `down` toward decreasing `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Directions {
    pub left: i32,
    pub right: i32,
    pub up: i32,
    pub down: i32,
}

impl Directions {
    /// Create from explicit extents
    pub const fn new(left: i32, right: i32, up: i32, down: i32) -> Self {
        Self {
            left,
            right,
            up,
            down,
        }
    }

    /// Extent `n` in each selected direction, zero elsewhere
    pub fn from_flags(n: i32, left: bool, right: bool, up: bool, down: bool) -> Self {
        let pick = |on: bool| if on { n } else { 0 };
        Self::new(pick(left), pick(right), pick(up), pick(down))
    }

    /// True if every extent is zero or negative
    pub fn is_zero(&self) -> bool {
        self.left <= 0 && self.right <= 0 && self.up <= 0 && self.down <= 0
    }
}

/// Structuring element for grow and shrink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuringElement {
    rows: Vec<Span>,
    y_range: usize,
}

impl StructuringElement {
    /// Element for an isotropic or Manhattan operation of the given radius
    pub fn new(metric: Metric, radius: i32) -> MorphResult<Self> {
        match metric {
            Metric::Isotropic => Self::circle(radius),
            Metric::Manhattan => Self::diamond(radius),
        }
    }

    /// A disk: row `dy` spans `-dx..=dx` with `dx = floor(sqrt(r^2 - dy^2))`
    pub fn circle(radius: i32) -> MorphResult<Self> {
        check_radius(radius)?;
        let rows = (-radius..=radius)
            .map(|dy| {
                let dx = ((radius * radius - dy * dy) as f64).sqrt() as i32;
                Span::new(dy, -dx, dx)
            })
            .collect();
        Ok(Self {
            rows,
            y_range: (2 * radius + 1) as usize,
        })
    }

    /// A diamond: row `dy` spans `-(r - |dy|)..=(r - |dy|)`
    pub fn diamond(radius: i32) -> MorphResult<Self> {
        check_radius(radius)?;
        let rows = (-radius..=radius)
            .map(|dy| {
                let dx = radius - dy.abs();
                Span::new(dy, -dx, dx)
            })
            .collect();
        Ok(Self {
            rows,
            y_range: (2 * radius + 1) as usize,
        })
    }

    /// A cross with independent arm lengths.
    ///
    /// The vertical arms are single-pixel rows; the horizontal arm is the
    /// last row.
    pub fn directional(dirs: Directions) -> MorphResult<Self> {
        let Directions {
            left,
            right,
            up,
            down,
        } = dirs;
        if left < 0 || right < 0 || up < 0 || down < 0 {
            return Err(MorphError::InvalidSel(format!(
                "negative extent in {dirs:?}"
            )));
        }
        let mut rows = Vec::with_capacity((up + down + 1) as usize);
        rows.extend((1..=up).map(|dy| Span::new(dy, 0, 0)));
        rows.extend((1..=down).map(|dy| Span::new(-dy, 0, 0)));
        rows.push(Span::new(0, -left, right));
        Ok(Self {
            rows,
            y_range: (up + down + 1) as usize,
        })
    }

    /// Rows in index order
    #[inline]
    pub fn rows(&self) -> &[Span] {
        &self.rows
    }

    /// Number of distinct row offsets
    #[inline]
    pub fn y_range(&self) -> usize {
        self.y_range
    }
}

fn check_radius(radius: i32) -> MorphResult<()> {
    if radius < 0 {
        return Err(MorphError::InvalidSel(format!(
            "negative radius: {radius}"
        )));
    }
    Ok(())
}
