//! Stamping footprints into images and masks
//!
//! All helpers work in parent coordinates and silently ignore the parts of
//! a footprint that fall outside the target buffer, except
//! [`Footprint::insert_into_image`], which requires the buffer to match
//! the footprint's region exactly.

use super::Footprint;
use crate::error::{Error, Result};
use crate::geom::{Box2I, Point2I};
use crate::image::{Image, Mask, MaskPixel, Pixel};
use crate::span::Span;
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// Options for [`Footprint::insert_into_image_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertOptions {
    /// Replace the existing id instead of adding to it
    pub overwrite_id: bool,
    /// Bits that are never overwritten; the id must not use them
    pub protect_mask: u64,
    /// Region the image covers; defaults to the footprint's region
    pub region: Option<Box2I>,
}

/// Columns of `span` that fall inside `x0..x0 + width`, as indices
/// relative to `x0`.
fn clipped_columns(span: &Span, x0: i32, width: i32) -> Option<RangeInclusive<usize>> {
    let lo = (span.x0 - x0).max(0);
    let hi = (span.x1 - x0).min(width - 1);
    (lo <= hi).then(|| lo as usize..=hi as usize)
}

/// Apply `f` to every image pixel covered by `foot`.
fn for_each_pixel<T: Pixel>(image: &mut Image<T>, foot: &Footprint, mut f: impl FnMut(&mut T)) {
    let (ix0, width) = (image.x0(), image.width());
    for s in foot.spans() {
        let Some(cols) = clipped_columns(s, ix0, width) else {
            continue;
        };
        if let Some(row) = image.row_data_mut(s.y) {
            row[cols].iter_mut().for_each(&mut f);
        }
    }
}

/// OR `bitmask` into every mask pixel covered by `foot`; returns `bitmask`.
pub fn set_mask_from_footprint<T: MaskPixel>(mask: &mut Mask<T>, foot: &Footprint, bitmask: T) -> T {
    for_each_pixel(mask, foot, |p| *p = *p | bitmask);
    bitmask
}

/// Clear `bitmask` in every mask pixel covered by `foot`; returns `bitmask`.
pub fn clear_mask_from_footprint<T: MaskPixel>(
    mask: &mut Mask<T>,
    foot: &Footprint,
    bitmask: T,
) -> T {
    let keep = !bitmask;
    for_each_pixel(mask, foot, |p| *p = *p & keep);
    bitmask
}

/// OR `bitmask` into the mask pixels covered by any of `foots`
pub fn set_mask_from_footprint_list<T: MaskPixel>(
    mask: &mut Mask<T>,
    foots: &[Footprint],
    bitmask: T,
) -> T {
    for foot in foots {
        set_mask_from_footprint(mask, foot, bitmask);
    }
    bitmask
}

/// Set every image pixel covered by `foot` to `value`; returns `value`.
pub fn set_image_from_footprint<T: Pixel>(image: &mut Image<T>, foot: &Footprint, value: T) -> T {
    for_each_pixel(image, foot, |p| *p = value);
    value
}

/// Set the image pixels covered by any of `foots` to `value`
pub fn set_image_from_footprint_list<T: Pixel>(
    image: &mut Image<T>,
    foots: &[Footprint],
    value: T,
) -> T {
    for foot in foots {
        set_image_from_footprint(image, foot, value);
    }
    value
}

/// Copy the pixels covered by `foot` from `input` to `output`.
///
/// Only pixels inside both buffers are copied.
pub fn copy_within_footprint<T: Pixel>(foot: &Footprint, input: &Image<T>, output: &mut Image<T>) {
    let Some(overlap) = input.bbox().intersect(&output.bbox()) else {
        return;
    };
    for s in foot.spans() {
        if s.y < overlap.min_y() || s.y > overlap.max_y() {
            continue;
        }
        let x_start = s.x0.max(overlap.min_x());
        let x_stop = s.x1.min(overlap.max_x());
        if x_start > x_stop {
            continue;
        }
        let si = (x_start - input.x0()) as usize;
        let di = (x_start - output.x0()) as usize;
        let n = (x_stop - x_start + 1) as usize;
        let (Some(src), Some(dst)) = (input.row_data(s.y), output.row_data_mut(s.y)) else {
            continue;
        };
        dst[di..di + n].copy_from_slice(&src[si..si + n]);
    }
}

/// An id image covering `foot`'s bounding box, holding `id` inside the
/// footprint and zero elsewhere.
pub fn set_footprint_id(foot: &Footprint, id: i32) -> Image<i32> {
    let mut image = Image::new(foot.bbox());
    set_image_from_footprint(&mut image, foot, id);
    image
}

/// An id image covering the first footprint's region, holding each
/// footprint's id over its pixels.
///
/// With `relative_ids` the footprints are numbered from 1 in list order;
/// otherwise each footprint's own id is used. Later footprints overwrite
/// earlier ones.
///
/// # Errors
///
/// Returns an error if `foots` is empty.
pub fn set_footprint_array_ids(foots: &[Footprint], relative_ids: bool) -> Result<Image<i32>> {
    let first = foots
        .first()
        .ok_or_else(|| Error::InvalidParameter("no footprints provided".into()))?;
    let mut image = Image::new(first.region());
    for (i, foot) in foots.iter().enumerate() {
        let id = if relative_ids {
            i as i32 + 1
        } else {
            foot.id() as i32
        };
        set_image_from_footprint(&mut image, foot, id);
    }
    Ok(image)
}

/// Decompose a footprint into rectangles.
///
/// Rows are scanned upwards; the first run of set pixels found becomes the
/// base of a rectangle, which is extended upwards while every pixel above
/// it is set. Covered pixels are consumed, and the scan repeats until none
/// are left. The boxes are disjoint and cover the footprint exactly.
pub fn footprint_to_bbox_list(foot: &Footprint) -> Vec<Box2I> {
    let bbox = foot.bbox();
    let mut boxes = Vec::new();
    if bbox.is_empty() {
        return boxes;
    }
    let mut image: Image<u16> = Image::new(bbox);
    set_image_from_footprint(&mut image, foot, 1);

    let (x_org, width) = (bbox.min_x(), bbox.width() as usize);
    let data_row = |image: &Image<u16>, y: i32| -> Vec<u16> {
        image.row_data(y).map(<[u16]>::to_vec).unwrap_or_default()
    };

    for y in bbox.min_y()..=bbox.max_y() {
        loop {
            let row = data_row(&image, y);
            let Some(first) = row.iter().position(|&v| v == 1) else {
                break;
            };
            let last = row[first..]
                .iter()
                .position(|&v| v == 0)
                .map_or(width - 1, |n| first + n - 1);
            if let Some(r) = image.row_data_mut(y) {
                r[first..=last].fill(0);
            }

            let mut top = y;
            while top < bbox.max_y() {
                let Some(above) = image.row_data_mut(top + 1) else {
                    break;
                };
                if above[first..=last].iter().any(|&v| v == 0) {
                    break;
                }
                above[first..=last].fill(0);
                top += 1;
            }
            boxes.push(Box2I::from_corners(
                Point2I::new(x_org + first as i32, y),
                Point2I::new(x_org + last as i32, top),
            ));
        }
    }
    boxes
}

impl Footprint {
    /// Add `id` to every pixel of `image` covered by the footprint.
    ///
    /// `image` is addressed relative to `region` (or the footprint's own
    /// region when `None`), whose size it must match.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the image doesn't match the region,
    /// and `OutOfRange` if `id` doesn't fit the pixel type.
    pub fn insert_into_image<T: MaskPixel>(
        &self,
        image: &mut Image<T>,
        id: u64,
        region: Option<Box2I>,
    ) -> Result<()> {
        let opts = InsertOptions {
            region,
            ..InsertOptions::default()
        };
        self.insert_into_image_with(image, id, &opts).map(|_| ())
    }

    /// Write `id` into every pixel of `image` covered by the footprint.
    ///
    /// Without `overwrite_id` the id is added to the pixel. With it, the
    /// pixel becomes `(pixel & protect_mask) + id` and the previous values
    /// of the unprotected bits, when non-zero, are returned.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the image doesn't match the region,
    /// and `OutOfRange` if `id` doesn't fit the pixel type or uses a
    /// protected bit.
    pub fn insert_into_image_with<T: MaskPixel>(
        &self,
        image: &mut Image<T>,
        id: u64,
        opts: &InsertOptions,
    ) -> Result<BTreeSet<u64>> {
        let region = opts.region.filter(|r| !r.is_empty()).unwrap_or(self.region);
        if region.width() != image.width() || region.height() != image.height() {
            return Err(Error::DimensionMismatch {
                expected: (region.width(), region.height()),
                actual: (image.width(), image.height()),
            });
        }
        if id > T::MAX_ID {
            return Err(Error::OutOfRange(format!(
                "id {id} out of range for image type (max {})",
                T::MAX_ID
            )));
        }
        if id & opts.protect_mask != 0 {
            return Err(Error::OutOfRange(format!(
                "id {id:#x} sets bits in the protected mask {:#x}",
                opts.protect_mask
            )));
        }

        let value = T::from_id(id);
        let protect = T::from_id(opts.protect_mask);
        let mut old_ids = BTreeSet::new();
        for s in &self.spans {
            let sy = s.y - region.min_y();
            if sy < 0 || sy >= region.height() {
                continue;
            }
            let Some(cols) = clipped_columns(s, region.min_x(), region.width()) else {
                continue;
            };
            let Some(row) = image.row_data_mut(image.y0() + sy) else {
                continue;
            };
            for p in &mut row[cols] {
                if opts.overwrite_id {
                    let old = (*p & !protect).to_id();
                    if old != 0 {
                        old_ids.insert(old);
                    }
                    *p = (*p & protect).wrapping_add(value);
                } else {
                    *p = p.wrapping_add(value);
                }
            }
        }
        Ok(old_ids)
    }
}
