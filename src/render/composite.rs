//! Final composition and PNG export.
//!
//! The output canvas is the base image's native size: opaque white first,
//! then the base, then the keyed logo resampled into its mapped rectangle.

use std::fs;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use tracing::{debug, info};

use crate::error::{DecalError, Result};
use crate::types::{PlacementState, RasterImage, Size};

use super::mapping::{to_export_space, ExportRect};

/// File name of every export.
pub const EXPORT_FILENAME: &str = "custom_car.png";

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Somewhere an image can be acquired from at export time.
pub trait ImageSource {
    /// Short human-readable label for error messages.
    fn describe(&self) -> String;

    /// Fetch and fully decode the image.
    fn load(&self) -> Result<RasterImage>;
}

/// An image that is already decoded in memory.
impl ImageSource for RasterImage {
    fn describe(&self) -> String {
        format!("in-memory {}x{} image", self.width(), self.height())
    }

    fn load(&self) -> Result<RasterImage> {
        Ok(self.clone())
    }
}

/// An encoded image file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ImageSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<RasterImage> {
        let bytes = fs::read(&self.path).map_err(|e| DecalError::Io {
            path: self.path.clone(),
            message: format!("Failed to read image: {}", e),
        })?;
        RasterImage::decode(&bytes)
    }
}

/// A finished export, ready to hand to the user.
#[derive(Debug, Clone)]
pub struct ExportResult {
    pub image: RasterImage,
    pub png: Vec<u8>,
    pub filename: &'static str,
}

impl ExportResult {
    /// Write the PNG into `dir` under the fixed export file name.
    ///
    /// The bytes go to a sibling `.part` file first and are renamed into
    /// place, so a failed write never leaves a truncated export behind.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.filename);
        let partial = dir.join(format!("{}.part", self.filename));

        fs::write(&partial, &self.png).map_err(|e| DecalError::Io {
            path: partial.clone(),
            message: format!("Failed to write export: {}", e),
        })?;
        if let Err(e) = fs::rename(&partial, &path) {
            let _ = fs::remove_file(&partial);
            return Err(DecalError::Io {
                path,
                message: format!("Failed to finalize export: {}", e),
            });
        }

        Ok(path)
    }
}

/// Draw `base` and `logo` onto a white canvas the size of `base`.
pub fn composite(base: &RasterImage, logo: &RasterImage, rect: &ExportRect) -> RasterImage {
    let (width, height) = base.dimensions();
    let mut canvas = RgbaImage::from_pixel(width, height, WHITE);

    draw_over(&mut canvas, base.as_rgba(), 0, 0);

    let (x, y, w, h) = rect.to_pixels();
    if logo.width() > 0 && logo.height() > 0 {
        let canvas_area = u64::from(width) * u64::from(height);
        match (u32::try_from(w), u32::try_from(h)) {
            (Ok(sw), Ok(sh)) if w.saturating_mul(h) <= canvas_area => {
                let scaled = imageops::resize(logo.as_rgba(), sw, sh, FilterType::Triangle);
                draw_over(&mut canvas, &scaled, x, y);
            }
            // Larger than the canvas: never materialize the scaled logo.
            _ => draw_sampled(&mut canvas, logo.as_rgba(), (x, y), (w, h)),
        }
    }

    debug!(width, height, x, y, w, h, "composited logo onto base");
    RasterImage::from_rgba(canvas)
}

/// Source-over `top` onto `canvas` with its top-left at `(x, y)`.
///
/// Pixels falling outside the canvas are clipped.
fn draw_over(canvas: &mut RgbaImage, top: &RgbaImage, x: i64, y: i64) {
    let (cw, ch) = (i64::from(canvas.width()), i64::from(canvas.height()));

    for (tx, ty, src) in top.enumerate_pixels() {
        let dx = x + i64::from(tx);
        let dy = y + i64::from(ty);
        if dx < 0 || dy < 0 || dx >= cw || dy >= ch {
            continue;
        }
        let dst = canvas.get_pixel_mut(dx as u32, dy as u32);
        dst.0 = over(dst.0, src.0);
    }
}

/// Source-over `logo` stretched to a `w`×`h` rectangle at `(x, y)`.
///
/// Only canvas pixels inside the rectangle are visited; each one is mapped
/// back into logo space and sampled bilinearly.
fn draw_sampled(
    canvas: &mut RgbaImage,
    logo: &RgbaImage,
    (x, y): (i64, i64),
    (w, h): (u64, u64),
) {
    let Some((x0, x1)) = visible_span(x, w, canvas.width()) else {
        return;
    };
    let Some((y0, y1)) = visible_span(y, h, canvas.height()) else {
        return;
    };

    let sx = f64::from(logo.width()) / w as f64;
    let sy = f64::from(logo.height()) / h as f64;

    for cy in y0..y1 {
        let v = (f64::from(cy) - y as f64 + 0.5) * sy - 0.5;
        for cx in x0..x1 {
            let u = (f64::from(cx) - x as f64 + 0.5) * sx - 0.5;
            let dst = canvas.get_pixel_mut(cx, cy);
            dst.0 = over(dst.0, sample_bilinear(logo, u, v));
        }
    }
}

/// The part of `origin..origin + extent` that lies within `0..limit`.
fn visible_span(origin: i64, extent: u64, limit: u32) -> Option<(u32, u32)> {
    let limit = i64::from(limit);
    let end = origin.saturating_add(i64::try_from(extent).unwrap_or(i64::MAX));
    let start = origin.clamp(0, limit);
    let end = end.clamp(0, limit);
    (start < end).then_some((start as u32, end as u32))
}

fn sample_bilinear(image: &RgbaImage, u: f64, v: f64) -> [u8; 4] {
    let (last_x, last_y) = (image.width() - 1, image.height() - 1);
    let u = u.clamp(0.0, f64::from(last_x));
    let v = v.clamp(0.0, f64::from(last_y));

    let (x0, y0) = (u.floor() as u32, v.floor() as u32);
    let (x1, y1) = ((x0 + 1).min(last_x), (y0 + 1).min(last_y));
    let (fx, fy) = (u - u.floor(), v - v.floor());

    let a = image.get_pixel(x0, y0).0;
    let b = image.get_pixel(x1, y0).0;
    let c = image.get_pixel(x0, y1).0;
    let d = image.get_pixel(x1, y1).0;

    let mut out = [0u8; 4];
    for i in 0..4 {
        let top = f64::from(a[i]) * (1.0 - fx) + f64::from(b[i]) * fx;
        let bottom = f64::from(c[i]) * (1.0 - fx) + f64::from(d[i]) * fx;
        out[i] = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Straight-alpha source-over for one pixel.
///
/// Fully transparent sources leave `dst` untouched and fully opaque ones
/// replace it exactly.
fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = u32::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255 - sa;
    let da = mul_div255(u32::from(dst[3]), inv);
    let out_a = sa + da;

    let mut out = [0u8; 4];
    for i in 0..3 {
        let premul = u32::from(src[i]) * sa + u32::from(dst[i]) * da;
        out[i] = ((premul + out_a / 2) / out_a).min(255) as u8;
    }
    out[3] = out_a.min(255) as u8;
    out
}

fn mul_div255(x: u32, y: u32) -> u32 {
    (x * y + 127) / 255
}

/// Composite and encode an export from already-loaded images.
pub fn export(base: &RasterImage, logo: &RasterImage, rect: &ExportRect) -> Result<ExportResult> {
    let image = composite(base, logo, rect);
    let png = image.encode_png()?;
    info!(bytes = png.len(), filename = EXPORT_FILENAME, "export ready");

    Ok(ExportResult {
        image,
        png,
        filename: EXPORT_FILENAME,
    })
}

/// Acquire both images, map the placement, then composite.
///
/// Both loads must succeed before drawing starts; a failure in either
/// aborts the export as a composite error and nothing is produced.
pub fn export_from_sources(
    base: &dyn ImageSource,
    logo: &dyn ImageSource,
    placement: &PlacementState,
    preview: Size,
) -> Result<ExportResult> {
    let base_image = acquire(base, "base")?;
    let logo_image = acquire(logo, "logo")?;

    let rect = to_export_space(placement, preview, Size::from(base_image.dimensions()))?;
    export(&base_image, &logo_image, &rect)
}

/// Load one image for an export. `role` names it in the error.
///
/// Any failure is reported as a composite error.
pub fn acquire(source: &dyn ImageSource, role: &str) -> Result<RasterImage> {
    source.load().map_err(|e| DecalError::Composite {
        message: format!("Failed to load {} image {}: {}", role, source.describe(), e),
        help: Some("Retry the export once the image is available".to_string()),
    })
}
