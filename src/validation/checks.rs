//! Manifest checks.
//!
//! Each check inspects one concern and returns the diagnostics it found.

use std::path::Path;

use crate::config::Manifest;
use crate::types::BaseModel;

use super::diagnostic::Diagnostic;

/// Size limits must be positive and ordered.
pub fn check_size_limits(manifest: &Manifest) -> Vec<Diagnostic> {
    let mut found = Vec::new();
    let limits = manifest.size;

    if !(limits.min.is_finite() && limits.min > 0.0) {
        found.push(
            Diagnostic::error(
                "decal::manifest::size-min",
                format!("size.min must be a positive number, got {}", limits.min),
            )
            .with_help("A zero or negative minimum lets the logo collapse"),
        );
    }

    if limits.min > limits.max {
        found.push(Diagnostic::error(
            "decal::manifest::size-range",
            format!(
                "size.min ({}) is larger than size.max ({})",
                limits.min, limits.max
            ),
        ));
    }

    found
}

/// The initial placement should be usable without clamping.
pub fn check_initial_placement(manifest: &Manifest) -> Vec<Diagnostic> {
    let mut found = Vec::new();
    let initial = manifest.initial;

    if !(initial.x.is_finite() && initial.y.is_finite()) {
        found.push(Diagnostic::error(
            "decal::manifest::initial-position",
            "initial.x and initial.y must be finite numbers",
        ));
    }

    if initial.size < manifest.size.min || initial.size > manifest.size.max {
        found.push(
            Diagnostic::warning(
                "decal::manifest::initial-size",
                format!(
                    "initial.size ({}) is outside size limits [{}, {}]",
                    initial.size, manifest.size.min, manifest.size.max
                ),
            )
            .with_help("It will be clamped when the editor starts"),
        );
    }

    found
}

/// A variant shows between one and three wizard steps.
pub fn check_steps(manifest: &Manifest) -> Vec<Diagnostic> {
    if (1..=3).contains(&manifest.steps) {
        return Vec::new();
    }
    vec![Diagnostic::error(
        "decal::manifest::steps",
        format!("steps must be 1, 2 or 3, got {}", manifest.steps),
    )]
}

/// Base images must exist on disk.
///
/// A missing image for the default model is an error; for other models
/// it only fails when that model is selected.
pub fn check_base_images(manifest: &Manifest, root: &Path) -> Vec<Diagnostic> {
    let mut found = Vec::new();

    for model in BaseModel::ALL {
        let configured = manifest.base_images.contains_key(&model);
        if model != manifest.model && !configured {
            continue;
        }

        let path = manifest.base_image(root, model);
        if path.is_file() {
            continue;
        }

        let message = format!("Base image for '{}' not found: {}", model, path.display());
        let diagnostic = if model == manifest.model {
            Diagnostic::error("decal::manifest::base-image", message)
        } else {
            Diagnostic::warning("decal::manifest::base-image", message)
        };
        found.push(diagnostic.with_help(format!("Set base_images.{} in decal.yaml", model)));
    }

    found
}
