//! decal - logo placement and export pipeline
//!
//! Keys a background colour out of an uploaded logo, lets the caller move
//! and resize it over a base vehicle image in preview space, and exports
//! the composite at the base image's native resolution as PNG.

pub mod cli;
pub mod config;
pub mod error;
pub mod gesture;
pub mod i18n;
pub mod output;
pub mod render;
pub mod session;
pub mod types;
pub mod validation;

pub use config::{InvocationContext, Manifest, Variant};
pub use error::{DecalError, Result};
pub use gesture::{GestureController, GestureHandler};
pub use i18n::Translator;
pub use render::{
    apply_colour_key, composite, decode_and_key, export, export_from_sources, to_export_space,
    ExportRect, ExportResult, FileSource, ImageSource,
};
pub use session::{Session, Step, UploadOutcome, UploadTicket};
pub use types::{
    BaseModel, ColourKey, Locale, PlacementState, Point, RasterImage, Size, SizeLimits,
};
pub use validation::{validate_manifest, validate_settings, Diagnostic, Report, Severity};
