//! Compose command implementation.
//!
//! Runs the whole pipeline the way the editor does: upload, key, place,
//! export.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::config::InvocationContext;
use crate::error::{DecalError, Result};
use crate::gesture::GestureHandler;
use crate::output::{display_path, Printer};
use crate::render::{acquire, FileSource};
use crate::session::Session;
use crate::types::{BaseModel, ColourKey, Size};
use crate::validation::{validate_settings, Severity};

/// Key a logo, place it on a base image and export PNG
#[derive(Args, Debug)]
pub struct ComposeArgs {
    /// Logo image to place
    #[arg(long, short)]
    pub logo: PathBuf,

    /// Base image (default: the manifest's image for the selected model)
    #[arg(long)]
    pub base: Option<PathBuf>,

    /// Base model (vivaro, combo, movano)
    #[arg(long)]
    pub model: Option<String>,

    /// Selectors as a query string, e.g. "model=combo&lang=de"
    #[arg(long)]
    pub query: Option<String>,

    /// Colour to make transparent (#RRGGBB)
    #[arg(long, short)]
    pub key: Option<String>,

    /// Logo left edge in preview pixels
    #[arg(long, allow_negative_numbers = true)]
    pub x: Option<f64>,

    /// Logo top edge in preview pixels
    #[arg(long, allow_negative_numbers = true)]
    pub y: Option<f64>,

    /// Logo width in preview pixels
    #[arg(long)]
    pub size: Option<f64>,

    /// Size the base image was displayed at, e.g. 672x378
    /// (default: its native size)
    #[arg(long)]
    pub preview: Option<String>,

    /// Output directory
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Manifest to use instead of the nearest decal.yaml
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

pub fn run(args: ComposeArgs, lang: Option<&str>, printer: &Printer) -> Result<()> {
    let (manifest, root) = super::load_manifest(args.manifest.as_deref())?;
    let report = validate_settings(&manifest);
    if report.has_errors() {
        let problems: Vec<_> = report
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| d.message.as_str())
            .collect();
        return Err(DecalError::Config {
            message: format!("Invalid manifest: {}", problems.join("; ")),
            help: Some("Run `decal validate` for details".to_string()),
        });
    }

    let defaults = InvocationContext::new(manifest.model, manifest.locale);
    let mut ctx = match &args.query {
        Some(query) => InvocationContext::from_query_or(query, defaults),
        None => defaults,
    };
    if let Some(model) = &args.model {
        ctx.model = BaseModel::from_param(Some(model));
    }
    let t = super::translator(lang, ctx.locale);

    let mut session = Session::from_manifest(&manifest);
    if let Some(key) = &args.key {
        session.set_colour_key(ColourKey::from_hex(key)?);
    }

    // Upload
    let bytes = fs::read(&args.logo).map_err(|e| DecalError::Io {
        path: args.logo.clone(),
        message: format!("Failed to read logo: {}", e),
    })?;
    printer.status("Processing", &display_path(&args.logo));
    let ticket = session.begin_upload();
    session.complete_upload(ticket, &bytes).map_err(|e| match e {
        DecalError::Decode { message, .. } => DecalError::Decode {
            message,
            help: Some(t.t("error.decode").to_string()),
        },
        other => other,
    })?;

    if let Some(logo) = session.logo() {
        printer.status(
            "Keyed",
            &format!(
                "{} ({}x{}, {})",
                t.t("upload.done"),
                logo.width(),
                logo.height(),
                session.colour_key()
            ),
        );
    }

    // Place
    let start = *session.placement();
    let gestures = session.gestures_mut();
    if args.x.is_some() || args.y.is_some() {
        gestures.begin_drag();
        gestures.on_drag_delta(
            args.x.map_or(0.0, |x| x - start.position.x),
            args.y.map_or(0.0, |y| y - start.position.y),
        );
        gestures.end_drag();
    }
    if let Some(size) = args.size {
        gestures.begin_pinch();
        gestures.on_pinch_delta(size - start.size);
        gestures.end_pinch();
    }

    // Export
    let base_path = args
        .base
        .clone()
        .unwrap_or_else(|| manifest.base_image(&root, ctx.model));
    let base = FileSource::new(base_path);

    let result = match &args.preview {
        Some(raw) => {
            let preview = Size::parse(raw).ok_or_else(|| DecalError::Parse {
                message: format!("Invalid preview size: {}", raw),
                help: Some("Use WIDTHxHEIGHT, e.g. 672x378".to_string()),
            })?;
            session.export(&base, preview)?
        }
        None => {
            // No preview given: place in native pixels, from one decode.
            let loaded = acquire(&base, "base")?;
            let native = Size::from(loaded.dimensions());
            session.export(&loaded, native)?
        }
    };

    let Some(result) = result else {
        return Err(DecalError::Composite {
            message: t.t("export.disabled").to_string(),
            help: None,
        });
    };

    let out_dir = args.output.unwrap_or_else(|| root.join(&manifest.output));
    fs::create_dir_all(&out_dir).map_err(|e| DecalError::Io {
        path: out_dir.clone(),
        message: format!("Failed to create output directory: {}", e),
    })?;

    let path = result.write_to(&out_dir)?;
    printer.success(t.t("export.done"), &display_path(&path));

    Ok(())
}
