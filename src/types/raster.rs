//! Immutable RGBA raster handle.

use std::fmt;
use std::io::Cursor;
use std::sync::Arc;

use image::{ImageFormat, RgbaImage};

use crate::error::{DecalError, Result};

/// An immutable RGBA8 image.
///
/// Clones share the pixel buffer. Transforms never touch an existing
/// raster; they build a new one with [`RasterImage::map_pixels`] or
/// [`RasterImage::from_rgba`].
#[derive(Clone, PartialEq, Eq)]
pub struct RasterImage {
    pixels: Arc<RgbaImage>,
}

impl RasterImage {
    /// Wrap an owned RGBA buffer.
    pub fn from_rgba(image: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(image),
        }
    }

    /// A raster filled with one colour.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self::from_rgba(RgbaImage::from_pixel(width, height, image::Rgba(rgba)))
    }

    /// Fully decode an encoded image (PNG, JPEG, WebP, ...).
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes).map_err(|e| DecalError::Decode {
            message: format!("Failed to decode image: {}", e),
            help: Some("Upload a PNG, JPEG or WebP file".to_string()),
        })?;
        Ok(Self::from_rgba(decoded.to_rgba8()))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Width divided by height, or 1.0 for an empty raster.
    pub fn aspect_ratio(&self) -> f64 {
        let (w, h) = self.dimensions();
        if w == 0 || h == 0 {
            1.0
        } else {
            f64::from(w) / f64::from(h)
        }
    }

    /// RGBA value at `(x, y)`, if in bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixels.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Borrow the underlying buffer.
    pub fn as_rgba(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Build a new raster by applying `f` to a copy of every pixel.
    pub fn map_pixels(&self, mut f: impl FnMut([u8; 4]) -> [u8; 4]) -> Self {
        let mut out = (*self.pixels).clone();
        for pixel in out.pixels_mut() {
            pixel.0 = f(pixel.0);
        }
        Self::from_rgba(out)
    }

    /// Encode as PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.pixels
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .map_err(|e| DecalError::composite(format!("Failed to encode PNG: {}", e)))?;
        Ok(buf)
    }
}

impl fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_png() {
        let src = RasterImage::filled(3, 2, [1, 2, 3, 4]);
        let bytes = src.encode_png().unwrap();

        let decoded = RasterImage::decode(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get(2, 1), Some([1, 2, 3, 4]));
    }

    #[test]
    fn test_decode_garbage_is_decode_error() {
        let err = RasterImage::decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, DecalError::Decode { .. }));
    }

    #[test]
    fn test_map_pixels_leaves_source_untouched() {
        let src = RasterImage::filled(2, 2, [9, 9, 9, 255]);
        let out = src.map_pixels(|_| [0, 0, 0, 0]);

        assert_eq!(src.get(0, 0), Some([9, 9, 9, 255]));
        assert_eq!(out.get(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(RasterImage::filled(200, 100, [0; 4]).aspect_ratio(), 2.0);
        assert_eq!(RasterImage::filled(0, 0, [0; 4]).aspect_ratio(), 1.0);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let img = RasterImage::filled(1, 1, [0; 4]);
        assert_eq!(img.get(1, 0), None);
    }
}
