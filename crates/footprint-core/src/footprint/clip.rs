//! Clipping footprints to boxes, masks and image content

use super::Footprint;
use crate::error::Result;
use crate::geom::{Box2I, Point2I};
use crate::image::{Image, Mask, MaskPixel, Pixel};
use crate::span::Span;

impl Footprint {
    /// Restrict the footprint to `bbox`.
    ///
    /// Spans outside the box are dropped and the rest are clamped to its
    /// columns. Peaks whose integer position lies outside the box are
    /// dropped. The result is normalized.
    pub fn clip_to(&mut self, bbox: Box2I) {
        self.spans.retain(|s| {
            !(s.y < bbox.min_y() || s.y > bbox.max_y() || s.x0 > bbox.max_x() || s.x1 < bbox.min_x())
        });
        for s in &mut self.spans {
            s.x0 = s.x0.max(bbox.min_x());
            s.x1 = s.x1.min(bbox.max_x());
        }
        self.peaks
            .retain(|p| bbox.contains_point(Point2I::new(p.ix, p.iy)));

        if self.spans.is_empty() {
            self.clear_spans();
        } else {
            self.normalized = false;
            self.normalize();
        }
    }

    /// Remove every pixel whose mask value has any of `bitmask` set.
    ///
    /// Spans outside the mask are dropped and the rest are clipped to it.
    /// The bounding box is clipped to the mask's box rather than
    /// recomputed, so it may be looser than the surviving spans.
    pub fn intersect_mask<T: MaskPixel>(&mut self, mask: &Mask<T>, bitmask: T) {
        let mbox = mask.bbox();
        self.normalize();

        let mut kept: Vec<Span> = Vec::with_capacity(self.spans.len());
        let mut area = 0i64;
        for s in self.spans.iter().skip_while(|s| s.y < mbox.min_y()) {
            if s.y > mbox.max_y() {
                break;
            }
            if s.x1 < mbox.min_x() || s.x0 > mbox.max_x() {
                continue;
            }
            let Some(row) = mask.row_data(s.y) else {
                continue;
            };
            let mut x0 = s.x0.max(mbox.min_x());
            let x1 = s.x1.min(mbox.max_x());
            for x in x0..=x1 {
                if row[(x - mbox.min_x()) as usize] & bitmask != T::ZERO {
                    if x > x0 {
                        kept.push(Span::new(s.y, x0, x - 1));
                        area += (x - x0) as i64;
                    }
                    x0 = x + 1;
                }
            }
            if x0 <= x1 {
                kept.push(Span::new(s.y, x0, x1));
                area += (x1 - x0 + 1) as i64;
            }
        }
        self.spans = kept;
        self.area = area;
        self.bbox.clip(&mbox);
    }

    /// Trim zero-valued pixels from both ends of every span, dropping
    /// spans that are entirely zero. Pixels outside `image` count as zero.
    pub fn clip_to_nonzero<T: Pixel>(&mut self, image: &Image<T>) -> Result<()> {
        self.normalize();
        let old = std::mem::take(&mut self.spans);
        self.spans.reserve(old.len());
        self.area = 0;
        self.bbox = Box2I::default();

        let nonzero = |x: i32, y: i32| image.get_pixel(x, y).is_some_and(|v| !v.is_zero());
        for s in &old {
            let Some(left) = (s.x0..=s.x1).find(|&x| nonzero(x, s.y)) else {
                continue;
            };
            let right = (left..=s.x1)
                .rev()
                .find(|&x| nonzero(x, s.y))
                .unwrap_or(left);
            self.add_span_in_series(s.y, left, right)?;
        }
        self.normalized = false;
        self.normalize();
        Ok(())
    }
}

/// A copy of `foot` with every pixel whose mask value has any of
/// `bitmask` set removed. `foot` itself is left untouched.
pub fn footprint_and_mask<T: MaskPixel>(foot: &Footprint, mask: &Mask<T>, bitmask: T) -> Footprint {
    let mut out = foot.clone();
    out.intersect_mask(mask, bitmask);
    out
}

#[cfg(test)]
mod tests {
    use super::footprint_and_mask;
    use crate::geom::{Box2I, Point2I};
    use crate::image::Image;
    use crate::{Footprint, Span};

    fn spans_of(f: &Footprint) -> Vec<(i32, i32, i32)> {
        f.spans().iter().map(|s| (s.y(), s.x0(), s.x1())).collect()
    }

    #[test]
    fn test_clip_to() {
        let mut f = Footprint::from_box(Box2I::new_unchecked(0, 0, 10, 10), Box2I::default());
        f.add_peak(1.0, 1.0, 1.0);
        f.add_peak(8.0, 8.0, 2.0);
        let clip = Box2I::from_corners(Point2I::new(-3, 2), Point2I::new(4, 3));
        f.clip_to(clip);
        assert_eq!(spans_of(&f), vec![(2, 0, 4), (3, 0, 4)]);
        assert_eq!(f.area(), 10);
        assert_eq!(f.peaks().len(), 0);

        f.clip_to(clip);
        assert_eq!(f.area(), 10);

        f.clip_to(Box2I::new_unchecked(50, 50, 2, 2));
        assert!(f.is_empty());
        assert!(f.bbox().is_empty());
        assert!(f.is_normalized());
    }

    #[test]
    fn test_intersect_mask_splits_spans() {
        let mut mask: Image<u16> = Image::new(Box2I::new_unchecked(0, 0, 6, 3));
        mask.set_pixel(2, 1, 0x2).unwrap();
        mask.set_pixel(4, 1, 0x1).unwrap();
        let mut f = Footprint::from_spans(
            [Span::new(-1, 0, 5), Span::new(1, -2, 8), Span::new(3, 0, 0)],
            Box2I::default(),
        );
        f.intersect_mask(&mask, 0x3);
        assert_eq!(spans_of(&f), vec![(1, 0, 1), (1, 3, 3), (1, 5, 5)]);
        assert_eq!(f.area(), 4);
        // bbox is clipped to the mask, not recomputed
        assert_eq!(f.bbox(), Box2I::new_unchecked(0, 0, 6, 3));
    }

    #[test]
    fn test_intersect_mask_ignores_other_bits() {
        let mut mask: Image<u16> = Image::new(Box2I::new_unchecked(0, 0, 3, 1));
        mask.fill(0x4);
        let mut f = Footprint::from_box(Box2I::new_unchecked(0, 0, 3, 1), Box2I::default());
        f.intersect_mask(&mask, 0x1);
        assert_eq!(f.area(), 3);
    }

    #[test]
    fn test_clip_to_nonzero() {
        let mut img: Image<f32> = Image::new(Box2I::new_unchecked(0, 0, 6, 3));
        img.set_pixel(2, 0, 1.0).unwrap();
        img.set_pixel(4, 0, -1.0).unwrap();
        img.set_pixel(1, 2, 3.0).unwrap();
        let mut f = Footprint::from_box(Box2I::new_unchecked(0, 0, 6, 3), Box2I::default());
        f.clip_to_nonzero(&img).unwrap();
        assert_eq!(spans_of(&f), vec![(0, 2, 4), (2, 1, 1)]);
        assert_eq!(f.area(), 4);
        assert_eq!(
            f.bbox(),
            Box2I::from_corners(Point2I::new(1, 0), Point2I::new(4, 2))
        );
    }

    #[test]
    fn test_footprint_and_mask_copies() {
        let mut mask: Image<u8> = Image::new(Box2I::new_unchecked(0, 0, 4, 2));
        mask.set_pixel(1, 0, 0x1).unwrap();
        mask.set_pixel(2, 1, 0x1).unwrap();
        let mut f = Footprint::from_box(Box2I::new_unchecked(0, 0, 4, 2), Box2I::default());
        f.add_peak(3.0, 1.0, 2.0);
        let before = spans_of(&f);

        let g = footprint_and_mask(&f, &mask, 0x1);
        assert_eq!(spans_of(&g), vec![(0, 0, 0), (0, 2, 3), (1, 0, 1), (1, 3, 3)]);
        assert_eq!(g.area(), 6);
        assert_eq!(g.peaks().len(), 1);
        assert_ne!(g.id(), f.id());

        assert_eq!(spans_of(&f), before);
        assert_eq!(f.area(), 8);
    }
}
