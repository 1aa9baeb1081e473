//! Run-length erosion
//!
//! Each (input span, element row) pair whose row fits inside the span
//! yields a primary run: the range of output columns on output row
//! `span.y - row.y` for which that element row is covered by the span.
//! An output pixel survives only if every element row covers it, so for
//! each output row the primary runs of each element row are merged and
//! intersected in turn.
//!
//! Reference: Kim, Lee and Kim, "Efficient morphological operations on
//! run-length encoded images", ETRI Journal 27 (2005).

use crate::sel::{Directions, Metric, StructuringElement};
use crate::MorphResult;
use footprint_core::{Footprint, Point2I};
use log::debug;
use std::sync::Arc;

/// Candidate output run produced by one element row.
///
/// Field order gives the sort order: by output row, then element row,
/// then start column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct PrimaryRun {
    y: i32,
    m: usize,
    xmin: i32,
    xmax: i32,
}

/// Shrink a footprint by `n` pixels.
///
/// `Metric::Isotropic` erodes with a disk, `Metric::Manhattan` with a
/// diamond. A non-positive `n` or an empty footprint returns a copy.
/// Peaks are kept only if the eroded footprint still contains them.
pub fn shrink_footprint(foot: &Footprint, n: i32, metric: Metric) -> MorphResult<Footprint> {
    if n <= 0 || foot.is_empty() {
        return Ok(foot.clone());
    }
    shrink_with(foot, &StructuringElement::new(metric, n)?)
}

/// Shrink a footprint independently in each direction.
pub fn shrink_footprint_directional(foot: &Footprint, dirs: Directions) -> MorphResult<Footprint> {
    if dirs.is_zero() || foot.is_empty() {
        return Ok(foot.clone());
    }
    shrink_with(foot, &StructuringElement::directional(dirs)?)
}

/// Erode `foot` with an arbitrary structuring element.
pub fn shrink_with(foot: &Footprint, element: &StructuringElement) -> MorphResult<Footprint> {
    let mut runs: Vec<PrimaryRun> = Vec::new();
    for span in foot.spans() {
        for (m, e) in element.rows().iter().enumerate() {
            if e.x1() - e.x0() <= span.x1() - span.x0() {
                runs.push(PrimaryRun {
                    y: span.y() - e.y(),
                    m,
                    xmin: span.x0() - e.x0(),
                    xmax: span.x1() - e.x1(),
                });
            }
        }
    }
    runs.sort_unstable();
    debug!(
        "shrink: {} spans x {} element rows -> {} primary runs",
        foot.spans().len(),
        element.rows().len(),
        runs.len()
    );

    let mut shrunk = Footprint::with_peak_schema(
        Arc::clone(foot.peaks().schema()),
        0,
        foot.region(),
    )?;
    let y_range = element.y_range();
    for row in runs.chunk_by(|a, b| a.y == b.y) {
        if row.len() < y_range {
            continue;
        }
        let y = row[0].y;
        let mut good: Vec<(i32, i32)> = Vec::new();
        for m in 0..y_range {
            let lo = row.partition_point(|r| r.m < m);
            let hi = row.partition_point(|r| r.m <= m);
            if lo == hi {
                good.clear();
                break;
            }
            let candidates = consolidate(&row[lo..hi]);
            good = if m == 0 {
                candidates
            } else {
                intersect(&good, &candidates)
            };
            if good.is_empty() {
                break;
            }
        }
        for (x0, x1) in good {
            shrunk.add_span(y, x0, x1);
        }
    }
    shrunk.normalize();

    let mut peaks = foot.peaks().clone();
    peaks.retain(|p| shrunk.contains(Point2I::new(p.ix, p.iy)));
    shrunk.set_peaks(peaks);
    Ok(shrunk)
}

/// Merge the overlapping runs of one element row; `runs` is sorted by
/// start column.
fn consolidate(runs: &[PrimaryRun]) -> Vec<(i32, i32)> {
    let mut out: Vec<(i32, i32)> = Vec::with_capacity(runs.len());
    for r in runs {
        match out.last_mut() {
            Some((_, end)) if r.xmin <= *end => *end = (*end).max(r.xmax),
            _ => out.push((r.xmin, r.xmax)),
        }
    }
    out
}

/// Pairwise intersection of two run lists
fn intersect(good: &[(i32, i32)], candidates: &[(i32, i32)]) -> Vec<(i32, i32)> {
    let mut out = Vec::new();
    for &(g0, g1) in good {
        for &(c0, c1) in candidates {
            let (start, end) = (g0.max(c0), g1.min(c1));
            if end >= start {
                out.push((start, end));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use footprint_core::{Box2I, Span};

    fn spans_of(f: &Footprint) -> Vec<(i32, i32, i32)> {
        f.spans().iter().map(|s| (s.y(), s.x0(), s.x1())).collect()
    }

    #[test]
    fn test_shrink_square() {
        let f = Footprint::from_box(Box2I::new_unchecked(0, 0, 5, 5), Box2I::default());
        let s = shrink_footprint(&f, 1, Metric::Manhattan).unwrap();
        assert_eq!(spans_of(&s), vec![(1, 1, 3), (2, 1, 3), (3, 1, 3)]);
        let s = shrink_footprint(&f, 2, Metric::Isotropic).unwrap();
        assert_eq!(spans_of(&s), vec![(2, 2, 2)]);
        let s = shrink_footprint(&f, 3, Metric::Isotropic).unwrap();
        assert!(s.is_empty());
    }

    #[test]
    fn test_shrink_undoes_grow_of_box() {
        let f = Footprint::from_box(Box2I::new_unchecked(10, 10, 4, 3), Box2I::default());
        let g = crate::grow_footprint(&f, 2, Metric::Manhattan).unwrap();
        let s = shrink_footprint(&g, 2, Metric::Manhattan).unwrap();
        assert_eq!(s.spans(), f.spans());
    }

    #[test]
    fn test_shrink_split_row() {
        // a hole in the middle row removes the pixel above and below it
        let mut f = Footprint::from_spans(
            [
                Span::new(0, 0, 6),
                Span::new(1, 0, 6),
                Span::new(2, 0, 2),
                Span::new(2, 4, 6),
                Span::new(3, 0, 6),
                Span::new(4, 0, 6),
            ],
            Box2I::default(),
        );
        f.normalize();
        let s = shrink_footprint(&f, 1, Metric::Manhattan).unwrap();
        assert_eq!(
            spans_of(&s),
            vec![(1, 1, 2), (1, 4, 5), (2, 1, 1), (2, 5, 5), (3, 1, 2), (3, 4, 5)]
        );
    }

    #[test]
    fn test_shrink_drops_uncovered_peaks() {
        let mut f = Footprint::from_box(Box2I::new_unchecked(0, 0, 3, 3), Box2I::default());
        f.add_peak(1.2, 1.7, 5.0);
        f.add_peak(0.0, 0.0, 2.0);
        let s = shrink_footprint(&f, 1, Metric::Manhattan).unwrap();
        assert_eq!(spans_of(&s), vec![(1, 1, 1)]);
        assert_eq!(s.peaks().len(), 1);
        assert_eq!(s.peaks().get(0).unwrap().peak_value, 5.0);
    }

    #[test]
    fn test_shrink_directional() {
        let f = Footprint::from_box(Box2I::new_unchecked(0, 0, 4, 3), Box2I::default());
        let s = shrink_footprint_directional(&f, Directions::new(1, 0, 0, 1)).unwrap();
        assert_eq!(spans_of(&s), vec![(1, 1, 3), (2, 1, 3)]);
    }

    #[test]
    fn test_shrink_zero_or_empty_is_copy() {
        let f = Footprint::from_box(Box2I::new_unchecked(0, 0, 2, 2), Box2I::default());
        assert_eq!(shrink_footprint(&f, 0, Metric::Isotropic).unwrap().area(), 4);
        let e = Footprint::default();
        assert!(shrink_footprint(&e, 3, Metric::Isotropic).unwrap().is_empty());
    }
}
