//! Preview-space to export-space mapping.
//!
//! The preview shows the base image scaled to fit its container. Gestures
//! move the logo in those preview pixels, but the export draws at the base
//! image's native resolution, so every coordinate is rescaled here.

use serde::{Deserialize, Serialize};

use crate::error::{DecalError, Result};
use crate::types::{PlacementState, Size};

/// The logo rectangle in base-image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ExportRect {
    /// Whole-pixel origin and extent used for drawing.
    ///
    /// The extent never drops below 1×1. Huge values saturate rather than
    /// wrap; nothing here allocates.
    pub fn to_pixels(&self) -> (i64, i64, u64, u64) {
        let x = self.x.round() as i64;
        let y = self.y.round() as i64;
        let w = self.width.round().max(1.0) as u64;
        let h = self.height.round().max(1.0) as u64;
        (x, y, w, h)
    }
}

/// Scale factors from preview pixels to native pixels.
///
/// X and Y are independent: a letterboxed preview can have a different
/// effective aspect ratio than the native image.
pub fn scale_factors(preview: Size, native: Size) -> Result<(f64, f64)> {
    if preview.is_degenerate() {
        return Err(DecalError::InvalidLayout {
            width: preview.width,
            height: preview.height,
        });
    }
    Ok((native.width / preview.width, native.height / preview.height))
}

/// Map a placement into the base image's native pixel space.
///
/// `preview` must be the size the base image is rendered at right now;
/// callers measure it at export time instead of reusing an earlier value.
pub fn to_export_space(
    placement: &PlacementState,
    preview: Size,
    native: Size,
) -> Result<ExportRect> {
    let (scale_x, scale_y) = scale_factors(preview, native)?;

    Ok(ExportRect {
        x: placement.position.x * scale_x,
        y: placement.position.y * scale_y,
        width: placement.size * scale_x,
        height: placement.height() * scale_y,
    })
}
