//! Client-area bounds of a bound surface.
//!
//! [`Bounds`] is the host's cached notion of "how big is the surface right now", expressed
//! in physical pixels with the origin always at `(0, 0)`. Native surfaces report their
//! geometry as floating point [`RectF`]/[`SizeF`] values, which are converted here.
//!
//! # Examples
//!
//! ```
//! use gosub_surface::surface::{Bounds, SizeF};
//!
//! let b = Bounds::from_size(SizeF::new(1024.0, 768.0));
//! assert_eq!(b, Bounds::new(1024, 768));
//! assert_eq!(b.aspect_ratio(), 1024.0 / 768.0);
//! ```
//!
//! Window surfaces report device-independent pixels:
//! ```
//! use gosub_surface::surface::{Bounds, SizeF};
//!
//! let b = Bounds::from_dips(SizeF::new(800.0, 600.0), 144.0);
//! assert_eq!(b, Bounds::new(1200, 900));
//! ```

use crate::config::DEFAULT_DPI;

/// Floating point rectangle as reported by a native surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectF {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn size(&self) -> SizeF {
        SizeF::new(self.width, self.height)
    }
}

/// Floating point size as reported by a native surface or a size-changed notification.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SizeF {
    pub width: f32,
    pub height: f32,
}

impl SizeF {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Size of a surface in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

/// Client rectangle of a surface in physical pixels. The origin is always `(0, 0)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    /// Creates bounds anchored at the origin.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            left: 0,
            top: 0,
            right: clamp_i32(width),
            bottom: clamp_i32(height),
        }
    }

    /// Converts a size that is already in physical pixels. Negative and NaN extents become `0`.
    pub fn from_size(size: SizeF) -> Self {
        Self::new(to_pixels(size.width), to_pixels(size.height))
    }

    /// Converts a size in device-independent pixels using the given DPI.
    pub fn from_dips(size: SizeF, dpi: f32) -> Self {
        Self::new(dips_to_pixels(size.width, dpi), dips_to_pixels(size.height, dpi))
    }

    pub fn width(&self) -> u32 {
        (self.right - self.left).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.bottom - self.top).max(0) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Returns the aspect ratio (`width / height`) as `f32`.
    ///
    /// Returns `0.0` if `height` is `0` to avoid division by zero.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height() == 0 {
            0.0
        } else {
            self.width() as f32 / self.height() as f32
        }
    }

    pub fn as_size(&self) -> SurfaceSize {
        SurfaceSize {
            width: self.width(),
            height: self.height(),
        }
    }
}

impl From<Bounds> for SurfaceSize {
    fn from(b: Bounds) -> Self {
        b.as_size()
    }
}

/// `floor(dips * dpi / 96 + 0.5)`, saturating at the `u32` range.
pub fn dips_to_pixels(dips: f32, dpi: f32) -> u32 {
    to_pixels((dips * dpi / DEFAULT_DPI + 0.5).floor())
}

fn to_pixels(v: f32) -> u32 {
    // `as` saturates and maps NaN to 0
    v as u32
}

fn clamp_i32(v: u32) -> i32 {
    v.min(i32::MAX as u32) as i32
}
