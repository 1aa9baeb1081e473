//! Pixel <-> sky projections
//!
//! Footprint transforms only need to carry a pixel position through one
//! image's projection onto the sky and back down through another's. The
//! [`Projection`] trait captures exactly that; [`AffineProjection`] is a
//! linear (tangent-plane approximation) implementation.

use super::Point2D;
use crate::error::{Error, Result};

/// A position on the sky, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SkyPoint {
    pub ra: f64,
    pub dec: f64,
}

impl SkyPoint {
    pub const fn new(ra: f64, dec: f64) -> Self {
        Self { ra, dec }
    }
}

/// Maps pixel positions of one image to the sky and back.
pub trait Projection {
    fn pixel_to_sky(&self, pixel: Point2D) -> SkyPoint;
    fn sky_to_pixel(&self, sky: SkyPoint) -> Point2D;
}

/// Carry a pixel position from `source`'s frame into `target`'s frame.
pub fn point_to_point<S, T>(source: &S, target: &T, pixel: Point2D) -> Point2D
where
    S: Projection + ?Sized,
    T: Projection + ?Sized,
{
    target.sky_to_pixel(source.pixel_to_sky(pixel))
}

/// Linear projection `sky = crval + CD * (pixel - crpix)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineProjection {
    crpix: Point2D,
    crval: SkyPoint,
    cd: [[f64; 2]; 2],
    inv: [[f64; 2]; 2],
}

impl AffineProjection {
    /// Create a projection from a reference pixel, the sky position of
    /// that pixel and the 2x2 CD matrix (degrees per pixel).
    ///
    /// # Errors
    ///
    /// Returns an error if the CD matrix is singular.
    pub fn new(crpix: Point2D, crval: SkyPoint, cd: [[f64; 2]; 2]) -> Result<Self> {
        let det = cd[0][0] * cd[1][1] - cd[0][1] * cd[1][0];
        if det == 0.0 || !det.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "CD matrix is singular: {cd:?}"
            )));
        }
        let inv = [
            [cd[1][1] / det, -cd[0][1] / det],
            [-cd[1][0] / det, cd[0][0] / det],
        ];
        Ok(Self {
            crpix,
            crval,
            cd,
            inv,
        })
    }

    /// A projection with square pixels of `scale` degrees, rotated by
    /// `rotation` radians.
    pub fn with_scale(crpix: Point2D, crval: SkyPoint, scale: f64, rotation: f64) -> Result<Self> {
        let (s, c) = rotation.sin_cos();
        Self::new(crpix, crval, [[scale * c, -scale * s], [scale * s, scale * c]])
    }
}

impl Projection for AffineProjection {
    fn pixel_to_sky(&self, pixel: Point2D) -> SkyPoint {
        let dx = pixel.x - self.crpix.x;
        let dy = pixel.y - self.crpix.y;
        SkyPoint {
            ra: self.crval.ra + self.cd[0][0] * dx + self.cd[0][1] * dy,
            dec: self.crval.dec + self.cd[1][0] * dx + self.cd[1][1] * dy,
        }
    }

    fn sky_to_pixel(&self, sky: SkyPoint) -> Point2D {
        let dr = sky.ra - self.crval.ra;
        let dd = sky.dec - self.crval.dec;
        Point2D {
            x: self.crpix.x + self.inv[0][0] * dr + self.inv[0][1] * dd,
            y: self.crpix.y + self.inv[1][0] * dr + self.inv[1][1] * dd,
        }
    }
}
