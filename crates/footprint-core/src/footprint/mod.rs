//! Footprint - a run-length encoded pixel region
//!
//! A footprint is a set of [`Span`]s, possibly disjoint, together with a
//! cached area and bounding box, a list of peaks and an advisory parent
//! region. Spans are appended freely; [`Footprint::normalize`] sorts them
//! row-major and merges overlapping or touching spans on the same row so
//! that every pixel is covered once.
//!
//! Operations are split across submodules by concern:
//!
//! - `query` - containment, mask overlap, centroid and second moments
//! - `clip` - clipping to a box, a mask or the non-zero pixels of an image
//! - `transform` - resampling through a pair of projections
//! - `edge` - edge pixel extraction
//! - `raster` - stamping footprints into images and masks
//! - `serial` - catalog persistence

mod clip;
mod edge;
mod query;
pub mod raster;
mod serial;
mod transform;

pub use clip::footprint_and_mask;

use crate::error::{Error, Result};
use crate::geom::{Box2I, Ellipse, PixelRegion, Point2I};
use crate::peak::{PeakCatalog, PeakKey, PeakRecord, PeakSchema};
use crate::span::Span;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of footprint ids; the first footprint gets id 1.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// A run-length encoded set of pixels.
///
/// Cloning deep-copies spans and peaks (sharing only the peak schema) and
/// assigns a fresh id.
#[derive(Debug)]
pub struct Footprint {
    id: u64,
    spans: Vec<Span>,
    area: i64,
    bbox: Box2I,
    region: Box2I,
    normalized: bool,
    peaks: PeakCatalog,
}

impl Footprint {
    /// Create an empty footprint with room for `n_spans` spans.
    ///
    /// # Errors
    ///
    /// Returns an error if `n_spans` is negative.
    pub fn new(n_spans: i32, region: Box2I) -> Result<Self> {
        Self::with_peak_schema(Arc::new(PeakSchema::minimal()), n_spans, region)
    }

    /// Create an empty footprint whose peaks use `schema`.
    ///
    /// # Errors
    ///
    /// Returns an error if `n_spans` is negative.
    pub fn with_peak_schema(schema: Arc<PeakSchema>, n_spans: i32, region: Box2I) -> Result<Self> {
        if n_spans < 0 {
            return Err(Error::InvalidParameter(format!(
                "number of spans requested is negative: {n_spans}"
            )));
        }
        Ok(Self::empty_with(
            PeakCatalog::new(schema),
            n_spans as usize,
            region,
        ))
    }

    fn empty_with(peaks: PeakCatalog, capacity: usize, region: Box2I) -> Self {
        Self {
            id: next_id(),
            spans: Vec::with_capacity(capacity),
            area: 0,
            bbox: Box2I::default(),
            region,
            normalized: true,
            peaks,
        }
    }

    /// A filled rectangle: one full-width span per row of `bbox`.
    pub fn from_box(bbox: Box2I, region: Box2I) -> Self {
        let rows = if bbox.is_empty() { 0 } else { bbox.h as usize };
        let mut foot = Self::empty_with(PeakCatalog::minimal(), rows, region);
        if !bbox.is_empty() {
            for y in bbox.min_y()..=bbox.max_y() {
                foot.add_span(y, bbox.min_x(), bbox.max_x());
            }
        }
        foot.normalized = true;
        foot
    }

    /// A discretized disk centred on a pixel.
    ///
    /// The squared radius is rounded to the nearest integer `r2`; rows
    /// `-r..=r` with `r = floor(sqrt(r2))` get half-width
    /// `floor(sqrt(r2 - dy^2))`.
    pub fn circle(center: Point2I, radius: f64, region: Box2I) -> Self {
        let r2 = (radius * radius + 0.5) as i32;
        let r = (r2 as f64).sqrt() as i32;
        let mut foot = Self::empty_with(PeakCatalog::minimal(), (2 * r + 1).max(0) as usize, region);
        for dy in -r..=r {
            let hlen = ((r2 - dy * dy) as f64).sqrt() as i32;
            foot.add_span(center.y + dy, center.x - hlen, center.x + hlen);
        }
        foot.normalized = true;
        foot
    }

    /// The pixels whose centres lie inside `ellipse`.
    pub fn from_ellipse(ellipse: &Ellipse, region: Box2I) -> Self {
        let mut foot = Self::empty_with(PeakCatalog::minimal(), 0, region);
        for row in PixelRegion::new(ellipse).filter(|r| !r.is_empty()) {
            foot.add_span(row.y, row.x0, row.x1);
        }
        foot.normalized = true;
        foot
    }

    /// Build from an explicit span list, without normalizing.
    pub fn from_spans(spans: impl IntoIterator<Item = Span>, region: Box2I) -> Self {
        let mut foot = Self::empty_with(PeakCatalog::minimal(), 0, region);
        for s in spans {
            foot.add_span(s.y, s.x0, s.x1);
        }
        foot
    }

    /// Replace this footprint's contents with a deep copy of `other`,
    /// keeping this footprint's id.
    pub fn assign_from(&mut self, other: &Footprint) {
        self.region = other.region;
        self.spans.clone_from(&other.spans);
        self.area = other.area;
        self.normalized = other.normalized;
        self.bbox = other.bbox;
        self.peaks = other.peaks.clone();
    }

    /// Process-unique id
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Number of pixels; exact when normalized
    #[inline]
    pub fn area(&self) -> i64 {
        self.area
    }

    /// Bounding box of the spans; exact when normalized
    #[inline]
    pub fn bbox(&self) -> Box2I {
        self.bbox
    }

    /// Extent of the parent image
    #[inline]
    pub fn region(&self) -> Box2I {
        self.region
    }

    pub fn set_region(&mut self, region: Box2I) {
        self.region = region;
    }

    #[inline]
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// True if the footprint has no spans
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn peaks(&self) -> &PeakCatalog {
        &self.peaks
    }

    pub fn peaks_mut(&mut self) -> &mut PeakCatalog {
        &mut self.peaks
    }

    pub fn set_peaks(&mut self, peaks: PeakCatalog) {
        self.peaks = peaks;
    }

    /// Append a span, swapping the end points if `x1 < x0`.
    ///
    /// Area and bounding box are updated incrementally; the footprint is
    /// marked as not normalized.
    pub fn add_span(&mut self, y: i32, x0: i32, x1: i32) -> Span {
        let span = Span::new(y, x0, x1);
        self.spans.push(span);
        self.area += span.width() as i64;
        self.normalized = false;
        self.bbox.include_point(Point2I::new(span.x0, y));
        self.bbox.include_point(Point2I::new(span.x1, y));
        span
    }

    /// Append a copy of `span` translated by (dx, dy)
    pub fn add_span_shifted(&mut self, span: &Span, dx: i32, dy: i32) -> Span {
        self.add_span(span.y + dy, span.x0 + dx, span.x1 + dx)
    }

    /// Append a span that follows the last span in row-major order.
    ///
    /// A span on the same row starting right after the last span extends
    /// it in place. Otherwise the span must lie on a later row, or on the
    /// same row strictly to the right without touching. Appending in
    /// series keeps the footprint normalized.
    ///
    /// # Errors
    ///
    /// Returns an error if the span doesn't follow the last one.
    pub fn add_span_in_series(&mut self, y: i32, x0: i32, x1: i32) -> Result<Span> {
        let (x0, x1) = if x1 < x0 { (x1, x0) } else { (x0, x1) };
        let Some(last) = self.spans.last_mut() else {
            let span = self.add_span(y, x0, x1);
            self.normalized = true;
            return Ok(span);
        };
        if last.y == y && x0 == last.x1 + 1 {
            last.x1 = x1;
            let span = *last;
            self.area += (x1 - x0 + 1) as i64;
            self.bbox.include_point(Point2I::new(x1, y));
            return Ok(span);
        }
        if !(y > last.y || (y == last.y && x0 > last.x1 + 1)) {
            return Err(Error::InvalidParameter(format!(
                "span {} is not in series after {}",
                Span::new(y, x0, x1),
                last
            )));
        }
        let span = self.add_span(y, x0, x1);
        self.normalized = true;
        Ok(span)
    }

    /// Remove all spans, leaving an empty normalized footprint.
    ///
    /// Peaks and region are kept.
    pub fn clear_spans(&mut self) {
        self.spans.clear();
        self.area = 0;
        self.bbox = Box2I::default();
        self.normalized = true;
    }

    /// Translate every span and the bounding box by (dx, dy).
    ///
    /// Peaks and region are not moved.
    pub fn shift(&mut self, dx: i32, dy: i32) {
        for s in &mut self.spans {
            s.shift(dx, dy);
        }
        self.bbox.shift(dx, dy);
    }

    /// Sort spans row-major and merge overlapping or touching spans,
    /// recomputing the exact area and bounding box.
    pub fn normalize(&mut self) {
        if self.normalized {
            return;
        }
        self.normalized = true;
        if self.spans.is_empty() {
            self.bbox = Box2I::default();
            self.area = 0;
            return;
        }

        self.spans.sort_unstable();
        let mut merged: Vec<Span> = Vec::with_capacity(self.spans.len());
        for s in self.spans.drain(..) {
            match merged.last_mut() {
                Some(prev) if prev.y == s.y && s.x0 <= prev.x1 + 1 => {
                    prev.x1 = prev.x1.max(s.x1);
                }
                _ => merged.push(s),
            }
        }

        let mut area = 0i64;
        let mut bbox = Box2I::default();
        for s in &merged {
            area += s.width() as i64;
            bbox.include_point(Point2I::new(s.x0, s.y));
            bbox.include_point(Point2I::new(s.x1, s.y));
        }
        self.spans = merged;
        self.area = area;
        self.bbox = bbox;
    }

    /// Check that the spans already satisfy the normalized conditions:
    /// normalizing a copy changes neither the spans nor the area.
    pub fn check_normalized(&self) -> bool {
        let mut copy = self.clone();
        copy.normalized = false;
        copy.normalize();
        copy.area == self.area && copy.spans == self.spans
    }

    /// Append a peak at sub-pixel position (fx, fy); its integer position
    /// is the truncation of the float one.
    pub fn add_peak(&mut self, fx: f32, fy: f32, value: f32) -> &mut PeakRecord {
        self.peaks.add(fx, fy, value)
    }

    /// Sort peaks from most positive to most negative `key`, which
    /// defaults to the peak value.
    pub fn sort_peaks(&mut self, key: Option<PeakKey>) {
        self.peaks.sort_by_key(key.unwrap_or_default());
    }

    /// An empty footprint sharing this footprint's peak schema and region
    pub(crate) fn empty_like(&self) -> Self {
        Self::empty_with(PeakCatalog::new(Arc::clone(self.peaks.schema())), 0, self.region)
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self::empty_with(PeakCatalog::minimal(), 0, Box2I::default())
    }
}

impl Clone for Footprint {
    fn clone(&self) -> Self {
        Self {
            id: next_id(),
            spans: self.spans.clone(),
            area: self.area,
            bbox: self.bbox,
            region: self.region,
            normalized: self.normalized,
            peaks: self.peaks.clone(),
        }
    }
}
