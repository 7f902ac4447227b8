//! Compositing pipeline for decal.
//!
//! Keying, preview-to-native coordinate mapping, and final PNG export.

mod chroma;
mod composite;
mod mapping;

pub use chroma::{apply_colour_key, decode_and_key};
pub use composite::{
    acquire, composite, export, export_from_sources, ExportResult, FileSource, ImageSource,
    EXPORT_FILENAME,
};
pub use mapping::{scale_factors, to_export_space, ExportRect};
