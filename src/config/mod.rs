//! Configuration: the project manifest and the invocation context.

mod context;
mod manifest;

pub use context::InvocationContext;
pub use manifest::{InitialPlacement, Manifest, Variant, MANIFEST_FILENAME};
