//! Union of two footprints
//!
//! Both span lists are sorted row-major, so the union is a single merge
//! sweep: the earlier of the two leading spans is appended as is, and
//! spans from either side that overlap or touch on the same row are
//! coalesced into one run before being appended.

use crate::error::RegionResult;
use footprint_core::{Error, Footprint, Span};
use log::debug;

/// Merge two normalized footprints into a new normalized footprint.
///
/// The result has an empty region. Peaks are concatenated, `a`'s first.
///
/// # Errors
///
/// Returns `InvalidParameter` if either footprint is not normalized, or
/// if both carry peaks with different schemas.
pub fn merge_footprints(a: &Footprint, b: &Footprint) -> RegionResult<Footprint> {
    if !a.is_normalized() || !b.is_normalized() {
        return Err(Error::InvalidParameter(
            "merge_footprints requires normalized footprints".into(),
        )
        .into());
    }
    merge_normalized(a, b)
}

/// Normalize both footprints in place, then merge them.
pub fn merge_footprints_mut(a: &mut Footprint, b: &mut Footprint) -> RegionResult<Footprint> {
    a.normalize();
    b.normalize();
    merge_normalized(a, b)
}

fn merge_normalized(a: &Footprint, b: &Footprint) -> RegionResult<Footprint> {
    let mut peaks = a.peaks().clone();
    peaks.extend_from(b.peaks())?;

    let mut foot = Footprint::default();
    let (aspans, bspans) = (a.spans(), b.spans());
    let (mut i, mut j) = (0, 0);
    while i < aspans.len() && j < bspans.len() {
        let (sa, sb) = (aspans[i], bspans[j]);
        if precedes(&sa, &sb) {
            foot.add_span_in_series(sa.y(), sa.x0(), sa.x1())?;
            i += 1;
            continue;
        }
        if precedes(&sb, &sa) {
            foot.add_span_in_series(sb.y(), sb.x0(), sb.x1())?;
            j += 1;
            continue;
        }

        // same row, overlapping or touching
        let y = sa.y();
        let x0 = sa.x0().min(sb.x0());
        let mut x1 = sa.x1().max(sb.x1());
        i += 1;
        j += 1;
        loop {
            if let Some(s) = aspans.get(i).filter(|s| continues(s, y, x1)) {
                x1 = x1.max(s.x1());
                i += 1;
                continue;
            }
            if let Some(s) = bspans.get(j).filter(|s| continues(s, y, x1)) {
                x1 = x1.max(s.x1());
                j += 1;
                continue;
            }
            break;
        }
        foot.add_span_in_series(y, x0, x1)?;
    }
    for s in aspans[i..].iter().chain(&bspans[j..]) {
        foot.add_span_in_series(s.y(), s.x0(), s.x1())?;
    }
    foot.set_peaks(peaks);

    debug!(
        "merge_footprints: {} + {} spans -> {} spans, area {}",
        aspans.len(),
        bspans.len(),
        foot.spans().len(),
        foot.area()
    );
    Ok(foot)
}

/// True if `s` lies wholly before `t` without touching it
#[inline]
fn precedes(s: &Span, t: &Span) -> bool {
    s.y() < t.y() || (s.y() == t.y() && s.x1() < t.x0() - 1)
}

/// True if `s` extends a run on row `y` ending at `x1`
#[inline]
fn continues(s: &Span, y: i32, x1: i32) -> bool {
    s.y() == y && s.x0() <= x1 + 1
}
