use std::path::PathBuf;

use clap::Args;

use crate::error::{DecalError, Result};
use crate::output::{display_path, Printer};
use crate::validation::{print_report, validate_manifest};

/// Check a decal.yaml for problems
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Manifest to check (default: nearest decal.yaml)
    pub manifest: Option<PathBuf>,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let (manifest, root) = super::load_manifest(args.manifest.as_deref())?;
    printer.status("Checking", &display_path(&root));

    let report = validate_manifest(&manifest, &root);
    print_report(&report, printer);

    if report.has_errors() {
        return Err(DecalError::Config {
            message: format!("{} error(s) in manifest", report.error_count()),
            help: None,
        });
    }
    Ok(())
}
