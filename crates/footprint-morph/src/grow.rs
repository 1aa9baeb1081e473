//! Run-length dilation
//!
//! Every input span is translated by every structuring element row; the
//! translated runs are collected per output row and merged wherever they
//! overlap or touch. Rows come out in increasing `y` and runs in
//! increasing `x`, so the result is appended in series and is already
//! normalized.
//!
//! Reference: Kim, Lee and Kim, "Efficient morphological operations on
//! run-length encoded images", ETRI Journal 27 (2005).

use crate::sel::{Directions, Metric, StructuringElement};
use crate::MorphResult;
use footprint_core::Footprint;
use log::debug;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Grow a footprint by `n` pixels.
///
/// `Metric::Isotropic` dilates with a disk, `Metric::Manhattan` with a
/// diamond. A non-positive `n` or an empty footprint returns a copy.
/// Peaks are copied unchanged.
///
/// # Example
///
/// ```
/// use footprint_core::{Box2I, Footprint, Point2I};
/// use footprint_morph::{Metric, grow_footprint};
///
/// let dot = Footprint::from_box(Box2I::new_unchecked(5, 5, 1, 1), Box2I::default());
/// let grown = grow_footprint(&dot, 1, Metric::Isotropic).unwrap();
/// assert_eq!(grown.area(), 5);
/// assert_eq!(grown.bbox(), Box2I::from_corners(Point2I::new(4, 4), Point2I::new(6, 6)));
/// ```
pub fn grow_footprint(foot: &Footprint, n: i32, metric: Metric) -> MorphResult<Footprint> {
    if n <= 0 || foot.is_empty() {
        return Ok(foot.clone());
    }
    grow_with(foot, &StructuringElement::new(metric, n)?)
}

/// Grow a footprint independently in each direction.
///
/// A footprint with no positive extent, or an empty footprint, is
/// returned as a copy.
pub fn grow_footprint_directional(foot: &Footprint, dirs: Directions) -> MorphResult<Footprint> {
    if dirs.is_zero() || foot.is_empty() {
        return Ok(foot.clone());
    }
    grow_with(foot, &StructuringElement::directional(dirs)?)
}

/// Dilate `foot` with an arbitrary structuring element.
pub fn grow_with(foot: &Footprint, element: &StructuringElement) -> MorphResult<Footprint> {
    debug!(
        "grow: {} spans x {} element rows",
        foot.spans().len(),
        element.rows().len()
    );

    let mut rows: BTreeMap<i32, Vec<(i32, i32)>> = BTreeMap::new();
    for span in foot.spans() {
        for e in element.rows() {
            rows.entry(span.y() + e.y())
                .or_default()
                .push((span.x0() + e.x0(), span.x1() + e.x1()));
        }
    }

    let mut grown = Footprint::with_peak_schema(
        Arc::clone(foot.peaks().schema()),
        rows.len() as i32,
        foot.region(),
    )?;
    for (y, mut runs) in rows {
        runs.sort_unstable();
        let mut iter = runs.into_iter();
        let Some((mut start, mut end)) = iter.next() else {
            continue;
        };
        for (x0, x1) in iter {
            if x0 <= end + 1 {
                end = end.max(x1);
            } else {
                grown.add_span_in_series(y, start, end)?;
                (start, end) = (x0, x1);
            }
        }
        grown.add_span_in_series(y, start, end)?;
    }
    grown.set_peaks(foot.peaks().clone());
    Ok(grown)
}
