use miette::Diagnostic;
use thiserror::Error;

/// Main error type for decal operations
#[derive(Error, Diagnostic, Debug)]
pub enum DecalError {
    #[error("IO error: {0}")]
    #[diagnostic(code(decal::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(decal::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    /// The uploaded file could not be read as pixel data.
    #[error("Decode error: {message}")]
    #[diagnostic(code(decal::decode))]
    Decode {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// The preview has no usable dimensions yet.
    #[error("Invalid layout: preview is {width}x{height}")]
    #[diagnostic(
        code(decal::layout),
        help("Measure the preview again once layout has settled")
    )]
    InvalidLayout { width: f64, height: f64 },

    /// A source image was unavailable when the export ran.
    #[error("Composite error: {message}")]
    #[diagnostic(code(decal::composite))]
    Composite {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(decal::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(decal::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl DecalError {
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            help: None,
        }
    }

    pub fn composite(message: impl Into<String>) -> Self {
        Self::Composite {
            message: message.into(),
            help: None,
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DecalError>;
