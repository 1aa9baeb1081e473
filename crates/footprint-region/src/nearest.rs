//! Nearest-footprint distance map
//!
//! A two-pass Manhattan distance transform: the forward pass propagates
//! distances from the north and west neighbours, the backward pass from
//! the south and east. Each pixel also records the index of the footprint
//! its distance was measured to.

use crate::error::{RegionError, RegionResult};
use footprint_core::{Error, Footprint, Image, set_image_from_footprint};

/// Index marking a pixel with no nearest footprint
pub const NO_FOOTPRINT: u16 = 0xffff;

/// For every pixel of `argmin`, find the nearest pixel belonging to any of
/// `foots` under the Manhattan metric.
///
/// On return `argmin` holds the index into `foots` of the nearest
/// footprint and `dist` the distance to it. Pixels covered by a footprint
/// get distance 0; where footprints overlap the later one wins. Both
/// images must cover the same box, in parent coordinates.
///
/// # Errors
///
/// Returns `DimensionMismatch` if the images cover different boxes,
/// `EmptyInput` if `foots` is empty, and `InvalidParameters` if there are
/// too many footprints to index with `u16`.
pub fn nearest_footprint(
    foots: &[Footprint],
    argmin: &mut Image<u16>,
    dist: &mut Image<u16>,
) -> RegionResult<()> {
    if argmin.bbox() != dist.bbox() {
        return Err(Error::DimensionMismatch {
            expected: (argmin.width(), argmin.height()),
            actual: (dist.width(), dist.height()),
        }
        .into());
    }
    if foots.is_empty() {
        return Err(RegionError::EmptyInput);
    }
    if foots.len() >= NO_FOOTPRINT as usize {
        return Err(RegionError::InvalidParameters(format!(
            "{} footprints exceed the index range",
            foots.len()
        )));
    }

    argmin.fill(0);
    dist.fill(0);
    for (i, foot) in foots.iter().enumerate() {
        set_image_from_footprint(argmin, foot, i as u16);
        set_image_from_footprint(dist, foot, 1);
    }

    let width = dist.width() as usize;
    let height = dist.height() as usize;
    let far = (width + height).min(NO_FOOTPRINT as usize) as u16;
    let d = dist.data_mut();
    let a = argmin.data_mut();

    // forward: north and west
    for y in 0..height {
        for x in 0..width {
            let k = y * width + x;
            if d[k] == 1 {
                d[k] = 0;
                continue;
            }
            d[k] = far;
            a[k] = NO_FOOTPRINT;
            if y > 0 {
                relax(d, a, k, k - width);
            }
            if x > 0 {
                relax(d, a, k, k - 1);
            }
        }
    }

    // backward: south and east
    for y in (0..height).rev() {
        for x in (0..width).rev() {
            let k = y * width + x;
            if y + 1 < height {
                relax(d, a, k, k + width);
            }
            if x + 1 < width {
                relax(d, a, k, k + 1);
            }
        }
    }
    Ok(())
}

/// Take neighbour `n`'s distance plus one if that is closer.
#[inline]
fn relax(d: &mut [u16], a: &mut [u16], k: usize, n: usize) {
    let nd = d[n].saturating_add(1);
    if nd < d[k] {
        d[k] = nd;
        a[k] = a[n];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use footprint_core::Box2I;

    fn boxed(x: i32, y: i32, w: i32, h: i32) -> Footprint {
        Footprint::from_box(Box2I::new_unchecked(x, y, w, h), Box2I::default())
    }

    #[test]
    fn test_two_footprints() {
        let bbox = Box2I::new_unchecked(0, 0, 7, 1);
        let mut argmin = Image::new(bbox);
        let mut dist = Image::new(bbox);
        nearest_footprint(&[boxed(0, 0, 1, 1), boxed(6, 0, 1, 1)], &mut argmin, &mut dist).unwrap();
        assert_eq!(dist.data(), &[0, 1, 2, 3, 2, 1, 0]);
        assert_eq!(argmin.data(), &[0, 0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn test_manhattan_distance_in_2d() {
        let bbox = Box2I::new_unchecked(10, 10, 4, 4);
        let mut argmin = Image::new(bbox);
        let mut dist = Image::new(bbox);
        nearest_footprint(&[boxed(11, 11, 1, 1)], &mut argmin, &mut dist).unwrap();
        assert_eq!(dist.get_pixel(11, 11), Some(0));
        assert_eq!(dist.get_pixel(13, 13), Some(4));
        assert_eq!(dist.get_pixel(10, 13), Some(3));
        assert!(argmin.data().iter().all(|&i| i == 0));
    }

    #[test]
    fn test_footprint_outside_box() {
        let bbox = Box2I::new_unchecked(0, 0, 3, 2);
        let mut argmin = Image::new(bbox);
        let mut dist = Image::new(bbox);
        nearest_footprint(&[boxed(50, 50, 2, 2)], &mut argmin, &mut dist).unwrap();
        assert!(dist.data().iter().all(|&v| v == 5));
        assert!(argmin.data().iter().all(|&i| i == NO_FOOTPRINT));
    }

    #[test]
    fn test_errors() {
        let mut argmin = Image::new(Box2I::new_unchecked(0, 0, 3, 3));
        let mut dist = Image::new(Box2I::new_unchecked(0, 0, 3, 2));
        assert!(nearest_footprint(&[boxed(0, 0, 1, 1)], &mut argmin, &mut dist).is_err());
        let mut dist = Image::new(Box2I::new_unchecked(0, 0, 3, 3));
        assert!(matches!(
            nearest_footprint(&[], &mut argmin, &mut dist),
            Err(RegionError::EmptyInput)
        ));
    }
}
