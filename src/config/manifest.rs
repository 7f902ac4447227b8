//! Project manifest (decal.yaml) parsing.
//!
//! The manifest holds the defaults a deployment variant differs by: the
//! colour key, wizard step count, locale and base images.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DecalError, Result};
use crate::types::{BaseModel, ColourKey, Locale, PlacementState, Point, SizeLimits};

/// Manifest file name looked up by the CLI.
pub const MANIFEST_FILENAME: &str = "decal.yaml";

/// Starting placement of a freshly uploaded logo, in preview pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialPlacement {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

impl Default for InitialPlacement {
    fn default() -> Self {
        Self {
            x: PlacementState::DEFAULT_POSITION.x,
            y: PlacementState::DEFAULT_POSITION.y,
            size: PlacementState::DEFAULT_SIZE,
        }
    }
}

impl InitialPlacement {
    pub fn to_placement(self) -> PlacementState {
        PlacementState::new(Point::new(self.x, self.y), self.size, 1.0)
    }
}

/// The parameters that distinguish one deployment of the editor from another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variant {
    pub colour_key: ColourKey,
    pub steps: u8,
    pub locale: Locale,
}

impl Default for Variant {
    fn default() -> Self {
        Self {
            colour_key: ColourKey::BLACK,
            steps: default_steps(),
            locale: Locale::default(),
        }
    }
}

/// Project manifest loaded from decal.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Colour keyed out of uploaded logos until the user picks another.
    pub colour_key: ColourKey,

    /// Default UI language.
    pub locale: Locale,

    /// Default base model.
    pub model: BaseModel,

    /// Number of wizard steps shown by this variant.
    #[serde(default = "default_steps")]
    pub steps: u8,

    /// Output directory for exports.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Bounds for the logo width in preview pixels.
    pub size: SizeLimits,

    /// Placement of a newly uploaded logo.
    pub initial: InitialPlacement,

    /// Base image per model, relative to the manifest directory.
    /// Models without an entry use their bundled default path.
    pub base_images: BTreeMap<BaseModel, PathBuf>,
}

fn default_steps() -> u8 {
    3
}

fn default_output() -> PathBuf {
    PathBuf::from("dist")
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            colour_key: ColourKey::BLACK,
            locale: Locale::default(),
            model: BaseModel::default(),
            steps: default_steps(),
            output: default_output(),
            size: SizeLimits::default(),
            initial: InitialPlacement::default(),
            base_images: BTreeMap::new(),
        }
    }
}

impl Manifest {
    /// Load manifest from a decal.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DecalError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| DecalError::Config {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check decal.yaml syntax".to_string()),
        })
    }

    /// Find the nearest decal.yaml in `start` or one of its ancestors.
    pub fn find(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(MANIFEST_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    /// Serialize back to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| DecalError::Config {
            message: format!("Failed to serialize manifest: {}", e),
            help: None,
        })
    }

    /// The variant parameters this manifest selects.
    pub fn variant(&self) -> Variant {
        Variant {
            colour_key: self.colour_key,
            steps: self.steps,
            locale: self.locale,
        }
    }

    /// Path of the base image for `model`, resolved against `root`.
    pub fn base_image(&self, root: &Path, model: BaseModel) -> PathBuf {
        match self.base_images.get(&model) {
            Some(path) => root.join(path),
            None => root.join(model.default_image()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_parse_minimal_manifest() {
        let manifest = Manifest::parse("output: build").unwrap();

        assert_eq!(manifest.output, PathBuf::from("build"));
        assert_eq!(manifest.colour_key, ColourKey::BLACK);
        assert_eq!(manifest.steps, 3);
        assert!(manifest.base_images.is_empty());
    }

    #[test]
    fn test_parse_full_manifest() {
        let yaml = r##"
colour_key: "#FFFFFF"
locale: de
model: combo
steps: 2
output: exports
size:
  min: 40
  max: 600
initial:
  x: 10
  y: 20
  size: 80
base_images:
  combo: images/combo.webp
"##;
        let manifest = Manifest::parse(yaml).unwrap();

        assert_eq!(manifest.colour_key, ColourKey::WHITE);
        assert_eq!(manifest.locale, Locale::De);
        assert_eq!(manifest.model, BaseModel::Combo);
        assert_eq!(manifest.steps, 2);
        assert_eq!(manifest.output, PathBuf::from("exports"));
        assert_eq!(manifest.size, SizeLimits::new(40.0, 600.0));
        assert_eq!(
            manifest.initial,
            InitialPlacement {
                x: 10.0,
                y: 20.0,
                size: 80.0
            }
        );
        assert_eq!(
            manifest.base_images.get(&BaseModel::Combo),
            Some(&PathBuf::from("images/combo.webp"))
        );
    }

    #[test]
    fn test_parse_empty_manifest() {
        let manifest = Manifest::parse("").unwrap();
        assert_eq!(manifest.output, PathBuf::from("dist"));
        assert_eq!(manifest.variant(), Variant::default());
    }

    #[test]
    fn test_parse_bad_colour() {
        let err = Manifest::parse("colour_key: \"#12\"").unwrap_err();
        assert!(matches!(err, DecalError::Config { .. }));
    }

    #[test]
    fn test_parse_unknown_model_key() {
        assert!(Manifest::parse("base_images:\n  astra: a.png").is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut manifest = Manifest::default();
        manifest.steps = 2;
        manifest
            .base_images
            .insert(BaseModel::Movano, PathBuf::from("m.png"));

        let parsed = Manifest::parse(&manifest.to_yaml().unwrap()).unwrap();
        assert_eq!(parsed.steps, 2);
        assert_eq!(parsed.base_images, manifest.base_images);
    }

    #[test]
    fn test_base_image_resolution() {
        let mut manifest = Manifest::default();
        manifest
            .base_images
            .insert(BaseModel::Combo, PathBuf::from("custom/combo.png"));

        let root = Path::new("/project");
        assert_eq!(
            manifest.base_image(root, BaseModel::Combo),
            PathBuf::from("/project/custom/combo.png")
        );
        assert_eq!(
            manifest.base_image(root, BaseModel::Vivaro),
            PathBuf::from("/project/assets/vivaro.png")
        );
    }

    #[test]
    fn test_find_walks_up() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILENAME), "steps: 2").unwrap();

        assert_eq!(
            Manifest::find(&nested),
            Some(dir.path().join(MANIFEST_FILENAME))
        );
    }

    #[test]
    fn test_initial_placement() {
        let p = InitialPlacement::default().to_placement();
        assert_eq!(p, PlacementState::default());
    }
}
