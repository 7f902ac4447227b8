//! Colour-key transparency.
//!
//! Every pixel whose RGB channels equal the key exactly gets alpha 0.
//! There is no tolerance: anti-aliased edges around a flat background keep
//! their opaque fringe.

use tracing::debug;

use crate::error::Result;
use crate::types::{ColourKey, RasterImage};

/// Make every pixel matching `key` fully transparent.
///
/// Returns a new raster with the same dimensions; non-matching pixels,
/// including their alpha, are copied unchanged.
pub fn apply_colour_key(image: &RasterImage, key: ColourKey) -> RasterImage {
    let mut keyed = 0usize;
    let out = image.map_pixels(|px| {
        if key.matches(px) {
            keyed += 1;
            [px[0], px[1], px[2], 0]
        } else {
            px
        }
    });
    debug!(
        width = image.width(),
        height = image.height(),
        %key,
        keyed,
        "applied colour key"
    );
    out
}

/// Decode an uploaded file and key out `key`.
///
/// A file that cannot be read as pixel data yields a decode error.
pub fn decode_and_key(bytes: &[u8], key: ColourKey) -> Result<RasterImage> {
    let source = RasterImage::decode(bytes)?;
    Ok(apply_colour_key(&source, key))
}
