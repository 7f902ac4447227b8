//! Core domain types for decal.
//!
//! This module contains the values passed between pipeline stages:
//! - `RasterImage` - immutable RGBA pixel grids
//! - `ColourKey` - the RGB colour made transparent
//! - `PlacementState` - logo position and width in preview space
//! - `BaseModel` / `Locale` - selectors read from the invocation context

mod colour;
mod geometry;
mod placement;
mod raster;
mod selector;

pub use colour::ColourKey;
pub use geometry::{Point, Size};
pub use placement::{PlacementState, SizeLimits};
pub use raster::RasterImage;
pub use selector::{BaseModel, Locale};
