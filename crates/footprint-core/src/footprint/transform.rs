//! Resampling a footprint into another image's pixel frame

use super::Footprint;
use crate::geom::{Box2D, Box2I, Point2D, Projection, point_to_point};
use log::debug;

impl Footprint {
    /// Map the footprint from `source`'s pixel frame into `target`'s.
    ///
    /// The output covers the box enclosing the transformed corners of this
    /// footprint's bounding box. Every pixel of that box is mapped back
    /// into the source frame, rounded to the nearest pixel and kept if
    /// this footprint contains it. This point-samples the shape rather
    /// than transforming it exactly. Peaks are mapped forward. The result
    /// has region `region`, and is clipped to it when `do_clip` is set.
    pub fn transform<S, T>(&self, source: &S, target: &T, region: Box2I, do_clip: bool) -> Footprint
    where
        S: Projection + ?Sized,
        T: Projection + ?Sized,
    {
        let mut out = self.empty_like();
        out.region = region;

        if !self.bbox.is_empty() {
            let mut tbox = Box2D::new();
            for corner in self.bbox.corners() {
                tbox.include(point_to_point(source, target, corner.into()));
            }
            let tbox = tbox.to_box2i();
            debug!(
                "transform: source bbox {:?} -> target bbox {:?}",
                self.bbox, tbox
            );

            if !tbox.is_empty() {
                for y in tbox.min_y()..=tbox.max_y() {
                    let mut start: Option<i32> = None;
                    for x in tbox.min_x()..=tbox.max_x() {
                        let p = point_to_point(target, source, Point2D::new(x as f64, y as f64));
                        let inside = self.contains(p.round());
                        match (inside, start) {
                            (true, None) => start = Some(x),
                            (false, Some(x0)) => {
                                out.add_span(y, x0, x - 1);
                                start = None;
                            }
                            _ => {}
                        }
                    }
                    if let Some(x0) = start {
                        out.add_span(y, x0, tbox.max_x());
                    }
                }
            }
        }

        for peak in &self.peaks {
            let tp = point_to_point(
                source,
                target,
                Point2D::new(peak.fx as f64, peak.fy as f64),
            );
            out.add_peak(tp.x as f32, tp.y as f32, peak.peak_value);
        }

        if do_clip {
            out.clip_to(region);
        }
        out
    }
}
