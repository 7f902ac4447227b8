pub mod completions;
pub mod compose;
pub mod init;
pub mod key;
pub mod validate;

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::Manifest;
use crate::error::Result;
use crate::i18n::Translator;
use crate::types::Locale;

/// decal - Chroma-key a logo and place it on a vehicle image
#[derive(Parser, Debug)]
#[command(name = "decal")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Language for status messages (en, de)
    #[arg(long, global = true)]
    pub lang: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Key a logo, place it on a base image and export PNG
    Compose(compose::ComposeArgs),

    /// Make one colour of a logo transparent
    Key(key::KeyArgs),

    /// Write a default decal.yaml
    Init(init::InitArgs),

    /// Check a decal.yaml for problems
    Validate(validate::ValidateArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Install the stderr tracing subscriber.
///
/// `RUST_LOG` wins over the verbosity flag when set.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Load an explicit manifest, or the nearest one above the working
/// directory, or fall back to defaults.
///
/// Returns the manifest and the directory relative paths resolve against.
pub(crate) fn load_manifest(explicit: Option<&Path>) -> Result<(Manifest, PathBuf)> {
    let cwd = std::env::current_dir()?;
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => Manifest::find(&cwd),
    };

    match path {
        Some(path) => {
            let manifest = Manifest::load(&path)?;
            let root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| cwd.clone());
            tracing::debug!(path = %path.display(), "loaded manifest");
            Ok((manifest, root))
        }
        None => Ok((Manifest::default(), cwd)),
    }
}

/// Translator for `--lang`, falling back to `default`.
pub(crate) fn translator(lang: Option<&str>, default: Locale) -> Translator {
    let locale = match lang {
        Some(lang) => Locale::from_param(Some(lang)),
        None => default,
    };
    Translator::new(locale)
}
