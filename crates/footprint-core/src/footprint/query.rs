//! Geometric queries on footprints

use super::Footprint;
use crate::geom::{Point2D, Point2I, Quadrupole};
use crate::image::{Mask, MaskPixel};

impl Footprint {
    /// Check whether pixel `p` belongs to the footprint
    pub fn contains(&self, p: Point2I) -> bool {
        self.bbox.contains_point(p) && self.spans.iter().any(|s| s.contains(p.x, p.y))
    }

    /// Bitwise OR of all mask pixels covered by the footprint.
    ///
    /// Spans are clipped to the mask; rows outside it are skipped.
    pub fn overlaps_mask<T: MaskPixel>(&self, mask: &Mask<T>) -> T {
        let mut bits = T::ZERO;
        if mask.width() == 0 {
            return bits;
        }
        let mx0 = mask.x0();
        let mx1 = mask.x0() + mask.width() - 1;
        for s in &self.spans {
            let Some(row) = mask.row_data(s.y) else {
                continue;
            };
            if s.x1 < mx0 || s.x0 > mx1 {
                continue;
            }
            let x0 = s.x0.max(mx0);
            let x1 = s.x1.min(mx1);
            for &v in &row[(x0 - mx0) as usize..=(x1 - mx0) as usize] {
                bits = bits | v;
            }
        }
        bits
    }

    /// Area-weighted mean pixel position.
    ///
    /// Meaningful only when the footprint is normalized and non-empty.
    pub fn centroid(&self) -> Point2D {
        let mut n = 0i64;
        let mut xc = 0.0;
        let mut yc = 0.0;
        for s in &self.spans {
            let npix = s.width() as f64;
            n += s.width() as i64;
            xc += npix * 0.5 * (s.x1 + s.x0) as f64;
            yc += npix * s.y as f64;
        }
        debug_assert_eq!(n, self.area, "span widths disagree with cached area");
        let area = self.area as f64;
        Point2D::new(xc / area, yc / area)
    }

    /// Second moments about the centroid
    pub fn shape(&self) -> Quadrupole {
        let c = self.centroid();
        let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
        for s in &self.spans {
            let npix = s.width() as f64;
            let dy = s.y as f64 - c.y;
            for x in s.x0..=s.x1 {
                let dx = x as f64 - c.x;
                sxx += dx * dx;
            }
            sxy += npix * (0.5 * (s.x1 + s.x0) as f64 - c.x) * dy;
            syy += npix * dy * dy;
        }
        let area = self.area as f64;
        Quadrupole::new(sxx / area, syy / area, sxy / area)
    }
}

#[cfg(test)]
mod tests {
    use crate::geom::Box2I;
    use crate::image::Image;
    use crate::{Footprint, Point2I, Span};

    #[test]
    fn test_contains() {
        let f = Footprint::from_spans([Span::new(0, 0, 1), Span::new(2, 3, 4)], Box2I::default());
        assert!(f.contains(Point2I::new(1, 0)));
        assert!(f.contains(Point2I::new(3, 2)));
        assert!(!f.contains(Point2I::new(2, 0)));
        assert!(!f.contains(Point2I::new(0, 1)));
        assert!(!f.contains(Point2I::new(9, 9)));
    }

    #[test]
    fn test_overlaps_mask() {
        let mut mask: Image<u16> = Image::new(Box2I::new_unchecked(0, 0, 4, 4));
        mask.set_pixel(3, 1, 0x4).unwrap();
        mask.set_pixel(0, 2, 0x1).unwrap();
        let f = Footprint::from_spans(
            [Span::new(-1, 0, 3), Span::new(1, 2, 10), Span::new(2, 5, 8)],
            Box2I::default(),
        );
        assert_eq!(f.overlaps_mask(&mask), 0x4);
        let g = Footprint::from_spans([Span::new(2, -5, 0)], Box2I::default());
        assert_eq!(g.overlaps_mask(&mask), 0x1);
    }

    #[test]
    fn test_centroid_and_shape() {
        let f = Footprint::from_box(Box2I::new_unchecked(0, 0, 3, 1), Box2I::default());
        let c = f.centroid();
        assert!((c.x - 1.0).abs() < 1e-12);
        assert!(c.y.abs() < 1e-12);
        let q = f.shape();
        assert!((q.ixx - 2.0 / 3.0).abs() < 1e-12);
        assert!(q.iyy.abs() < 1e-12);
        assert!(q.ixy.abs() < 1e-12);

        let d = Footprint::from_spans([Span::new(0, 0, 0), Span::new(1, 1, 1)], Box2I::default());
        let q = d.shape();
        assert!((q.ixy - 0.25).abs() < 1e-12);
        assert!((q.iyy - 0.25).abs() < 1e-12);
    }
}
