//! Union of a footprint with many others
//!
//! The footprints are stamped into a scratch mask covering all of them,
//! the mask is relabeled into connected components, and the spans of
//! every component become the new span list.

use crate::conncomp::{ConnectivityType, find_footprints};
use crate::error::RegionResult;
use footprint_core::{Box2I, Footprint, Mask, set_mask_from_footprint};
use log::debug;

/// Bit used to mark covered pixels in the scratch mask
const INCLUDE_BIT: u16 = 0x1;

/// Extension trait adding multi-footprint union to [`Footprint`].
pub trait FootprintIncludeExt {
    /// Replace this footprint's spans with the union of its own pixels
    /// (unless `ignore_self`) and those of every footprint in `others`.
    ///
    /// The result is normalized. Peaks and region are untouched. Nothing
    /// happens when `others` is empty, even with `ignore_self`.
    fn include(&mut self, others: &[Footprint], ignore_self: bool) -> RegionResult<()>;
}

impl FootprintIncludeExt for Footprint {
    fn include(&mut self, others: &[Footprint], ignore_self: bool) -> RegionResult<()> {
        if others.is_empty() {
            return Ok(());
        }
        let mut bbox = Box2I::default();
        if ignore_self {
            self.clear_spans();
        } else {
            bbox.include_box(&self.bbox());
        }
        for other in others {
            bbox.include_box(&other.bbox());
        }

        let mut mask: Mask<u16> = Mask::new(bbox);
        if !ignore_self {
            set_mask_from_footprint(&mut mask, self, INCLUDE_BIT);
        }
        for other in others {
            set_mask_from_footprint(&mut mask, other, INCLUDE_BIT);
        }

        let components = find_footprints(&mask, INCLUDE_BIT, ConnectivityType::EightWay)?;
        debug!(
            "include: {} footprints over {:?} -> {} components",
            others.len() + usize::from(!ignore_self),
            bbox,
            components.len()
        );

        self.clear_spans();
        for s in components.iter().flat_map(|c| c.spans()) {
            self.add_span(s.y(), s.x0(), s.x1());
        }
        self.normalize();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use footprint_core::Point2I;

    fn boxed(x: i32, y: i32, w: i32, h: i32) -> Footprint {
        Footprint::from_box(Box2I::new_unchecked(x, y, w, h), Box2I::default())
    }

    #[test]
    fn test_include_disjoint() {
        let mut f = boxed(0, 0, 2, 2);
        f.add_peak(0.5, 0.5, 1.0);
        f.include(&[boxed(5, 5, 1, 1), boxed(1, 1, 2, 2)], false).unwrap();
        assert_eq!(f.area(), 4 + 1 + 3);
        assert!(f.is_normalized());
        assert!(f.contains(Point2I::new(5, 5)));
        assert!(f.contains(Point2I::new(2, 2)));
        assert_eq!(f.peaks().len(), 1);
    }

    #[test]
    fn test_include_ignore_self() {
        let mut f = boxed(0, 0, 3, 3);
        f.include(&[boxed(10, 10, 2, 1)], true).unwrap();
        assert_eq!(f.area(), 2);
        assert!(!f.contains(Point2I::new(0, 0)));
    }

    #[test]
    fn test_include_nothing_is_noop() {
        let mut f = boxed(0, 0, 3, 3);
        f.include(&[], true).unwrap();
        assert_eq!(f.area(), 9);
    }

    #[test]
    fn test_include_into_empty() {
        let mut f = Footprint::default();
        f.include(&[boxed(-3, 2, 2, 2)], false).unwrap();
        assert_eq!(f.bbox(), Box2I::new_unchecked(-3, 2, 2, 2));
        assert_eq!(f.area(), 4);
    }
}
