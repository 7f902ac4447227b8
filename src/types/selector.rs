//! Base model and locale selectors.
//!
//! Both are read once from the invocation context. Unknown or missing
//! values fall back to the default rather than failing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DecalError, Result};

/// Which base vehicle image the logo is placed on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BaseModel {
    #[default]
    Vivaro,
    Combo,
    Movano,
}

impl BaseModel {
    pub const ALL: [BaseModel; 3] = [BaseModel::Vivaro, BaseModel::Combo, BaseModel::Movano];

    pub fn as_str(self) -> &'static str {
        match self {
            BaseModel::Vivaro => "vivaro",
            BaseModel::Combo => "combo",
            BaseModel::Movano => "movano",
        }
    }

    /// Default file name of the bundled base image for this model.
    pub fn default_image(self) -> &'static str {
        match self {
            BaseModel::Vivaro => "assets/vivaro.png",
            BaseModel::Combo => "assets/combo.png",
            BaseModel::Movano => "assets/movano.png",
        }
    }

    /// Parse a selector, falling back to the default model.
    pub fn from_param(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for BaseModel {
    type Err = DecalError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DecalError::Parse {
                message: format!("Unknown model: {}", s),
                help: Some("Expected one of: vivaro, combo, movano".to_string()),
            })
    }
}

impl fmt::Display for BaseModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    De,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::De];

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::De => "de",
        }
    }

    /// Parse a selector, falling back to English.
    ///
    /// Region suffixes are ignored, so `de-AT` selects German.
    pub fn from_param(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for Locale {
    type Err = DecalError;

    fn from_str(s: &str) -> Result<Self> {
        let lang = s.trim().split(['-', '_']).next().unwrap_or("");
        Self::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(lang))
            .ok_or_else(|| DecalError::Parse {
                message: format!("Unknown locale: {}", s),
                help: Some("Expected one of: en, de".to_string()),
            })
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
