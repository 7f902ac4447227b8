//! Key command implementation.
//!
//! Writes just the keyed logo, without compositing.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::error::{DecalError, Result};
use crate::output::{display_path, Printer};
use crate::render::decode_and_key;
use crate::types::ColourKey;

/// Make one colour of a logo transparent
#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Logo image
    pub logo: PathBuf,

    /// Colour to make transparent (#RRGGBB)
    #[arg(long, short, default_value = "#000000")]
    pub key: String,

    /// Output PNG (default: <logo>.keyed.png next to the input)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run(args: KeyArgs, printer: &Printer) -> Result<()> {
    let key = ColourKey::from_hex(&args.key)?;

    let bytes = fs::read(&args.logo).map_err(|e| DecalError::Io {
        path: args.logo.clone(),
        message: format!("Failed to read logo: {}", e),
    })?;
    let keyed = decode_and_key(&bytes, key)?;

    let output = args
        .output
        .unwrap_or_else(|| args.logo.with_extension("keyed.png"));
    fs::write(&output, keyed.encode_png()?).map_err(|e| DecalError::Io {
        path: output.clone(),
        message: format!("Failed to write PNG: {}", e),
    })?;

    printer.success(
        "Keyed",
        &format!(
            "{} ({}x{}, {})",
            display_path(&output),
            keyed.width(),
            keyed.height(),
            key
        ),
    );
    Ok(())
}
