//! Validation for decal manifests.
//!
//! Runs every check against a manifest and reports errors and warnings.
//! Used by `decal validate`.

mod checks;
mod diagnostic;

pub use diagnostic::{Diagnostic, Report, Severity};

use std::path::Path;

use crate::config::Manifest;
use crate::output::{plural, Printer};

/// Run all checks. Relative base image paths resolve against `root`.
pub fn validate_manifest(manifest: &Manifest, root: &Path) -> Report {
    let mut report = validate_settings(manifest);
    report.extend(checks::check_base_images(manifest, root));
    report
}

/// Run the checks that only look at manifest values, not at files.
pub fn validate_settings(manifest: &Manifest) -> Report {
    let mut report = Report::new();

    report.extend(checks::check_size_limits(manifest));
    report.extend(checks::check_initial_placement(manifest));
    report.extend(checks::check_steps(manifest));

    report
}

/// Print diagnostics and a summary line.
pub fn print_report(report: &Report, printer: &Printer) {
    for d in report.iter() {
        let label = printer.severity(&d.severity.to_string(), d.severity == Severity::Error);
        eprintln!("{}[{}]: {}", label, d.code, d.message);
        if let Some(help) = &d.help {
            eprintln!("  {} {}", printer.dim("help:"), help);
        }
    }

    let errors = plural(report.error_count(), "error", "errors");
    let warnings = plural(report.warning_count(), "warning", "warnings");

    if report.has_errors() {
        printer.error("Failed", &format!("{}, {}", errors, warnings));
    } else {
        printer.success("Checked", &format!("manifest ok, {}", warnings));
    }
}
