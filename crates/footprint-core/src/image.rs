//! Image, Mask - pixel buffers with a parent-frame origin
//!
//! A buffer covers a rectangle of the parent pixel grid: its origin
//! `(x0, y0)` is the parent coordinate of its first pixel. All accessors
//! take parent coordinates. Masks are images of an unsigned integer (or
//! `i32`) pixel type manipulated bitwise.

use crate::error::{Error, Result};
use crate::geom::Box2I;
use std::fmt::Debug;
use std::ops::{BitAnd, BitOr, Not};

/// Element type of an [`Image`].
pub trait Pixel: Copy + PartialEq + Debug + 'static {
    const ZERO: Self;

    #[inline]
    fn is_zero(self) -> bool {
        self == Self::ZERO
    }
}

/// Pixel types usable as bit masks and id images.
pub trait MaskPixel:
    Pixel + Eq + BitOr<Output = Self> + BitAnd<Output = Self> + Not<Output = Self>
{
    /// Largest id representable by the pixel type
    const MAX_ID: u64;

    /// Convert an id, truncating to the pixel width
    fn from_id(id: u64) -> Self;

    /// Pixel value as an id
    fn to_id(self) -> u64;

    fn wrapping_add(self, rhs: Self) -> Self;
}

macro_rules! impl_pixel {
    ($($t:ty => $zero:expr),* $(,)?) => {
        $(impl Pixel for $t {
            const ZERO: Self = $zero;
        })*
    };
}

impl_pixel!(u8 => 0, u16 => 0, u32 => 0, u64 => 0, i32 => 0, f32 => 0.0, f64 => 0.0);

macro_rules! impl_mask_pixel {
    ($($t:ty => $u:ty),* $(,)?) => {
        $(impl MaskPixel for $t {
            const MAX_ID: u64 = <$t>::MAX as u64;

            #[inline]
            fn from_id(id: u64) -> Self {
                id as $t
            }

            #[inline]
            fn to_id(self) -> u64 {
                self as $u as u64
            }

            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$t>::wrapping_add(self, rhs)
            }
        })*
    };
}

impl_mask_pixel!(u8 => u8, u16 => u16, u32 => u32, u64 => u64, i32 => u32);

/// A rectangular pixel buffer positioned in the parent frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T: Pixel> {
    x0: i32,
    y0: i32,
    width: i32,
    height: i32,
    data: Vec<T>,
}

/// Bit-mask image
pub type Mask<T = u16> = Image<T>;

impl<T: Pixel> Image<T> {
    /// Create a zero-filled buffer covering `bbox`.
    ///
    /// An empty box gives an empty buffer.
    pub fn new(bbox: Box2I) -> Self {
        let (width, height) = if bbox.is_empty() {
            (0, 0)
        } else {
            (bbox.w, bbox.h)
        };
        Self {
            x0: bbox.x,
            y0: bbox.y,
            width,
            height,
            data: vec![T::ZERO; width as usize * height as usize],
        }
    }

    /// Create a buffer covering `bbox` from row-major data.
    ///
    /// # Errors
    ///
    /// Returns an error if the data length doesn't match the box.
    pub fn from_vec(bbox: Box2I, data: Vec<T>) -> Result<Self> {
        let expected = if bbox.is_empty() { 0 } else { bbox.area() as usize };
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "data length {} does not match {}x{} image",
                data.len(),
                bbox.w,
                bbox.h
            )));
        }
        let mut img = Self::new(bbox);
        img.data = data;
        Ok(img)
    }

    /// Parent x of the first column
    #[inline]
    pub fn x0(&self) -> i32 {
        self.x0
    }

    /// Parent y of the first row
    #[inline]
    pub fn y0(&self) -> i32 {
        self.y0
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The covered rectangle in parent coordinates
    pub fn bbox(&self) -> Box2I {
        Box2I::new_unchecked(self.x0, self.y0, self.width, self.height)
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x < self.x0 + self.width && y >= self.y0 && y < self.y0 + self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.contains(x, y) {
            Some((y - self.y0) as usize * self.width as usize + (x - self.x0) as usize)
        } else {
            None
        }
    }

    /// Pixel at parent position (x, y), or `None` outside the buffer
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<T> {
        self.index(x, y).map(|i| self.data[i])
    }

    /// Set the pixel at parent position (x, y)
    ///
    /// # Errors
    ///
    /// Returns an error if the position is outside the buffer.
    pub fn set_pixel(&mut self, x: i32, y: i32, value: T) -> Result<()> {
        let len = self.data.len();
        let i = self.index(x, y).ok_or(Error::IndexOutOfBounds {
            index: ((y - self.y0) as i64 * self.width as i64 + (x - self.x0) as i64)
                .max(0) as usize,
            len,
        })?;
        self.data[i] = value;
        Ok(())
    }

    /// Row at parent row `y`, indexed from `x0`
    pub fn row_data(&self, y: i32) -> Option<&[T]> {
        if y < self.y0 || y >= self.y0 + self.height {
            return None;
        }
        let start = (y - self.y0) as usize * self.width as usize;
        Some(&self.data[start..start + self.width as usize])
    }

    /// Mutable row at parent row `y`, indexed from `x0`
    pub fn row_data_mut(&mut self, y: i32) -> Option<&mut [T]> {
        if y < self.y0 || y >= self.y0 + self.height {
            return None;
        }
        let start = (y - self.y0) as usize * self.width as usize;
        let w = self.width as usize;
        Some(&mut self.data[start..start + w])
    }

    /// Raw row-major data
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable raw row-major data
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Set every pixel to `value`
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Number of non-zero pixels
    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|v| !v.is_zero()).count()
    }
}
