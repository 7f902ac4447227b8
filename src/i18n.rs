//! Translated UI text.
//!
//! Bundles are nested JSON objects addressed with dotted keys such as
//! `export.button`. A key that does not resolve to a string is returned
//! unchanged, so a missing translation shows up as its key instead of
//! failing.

use serde_json::Value;
use tracing::warn;

use crate::error::{DecalError, Result};
use crate::types::Locale;

const EN: &str = include_str!("../locales/en.json");
const DE: &str = include_str!("../locales/de.json");

/// Looks up text for one locale.
#[derive(Debug, Clone)]
pub struct Translator {
    locale: Locale,
    bundle: Value,
}

impl Translator {
    /// Load the bundled translations for `locale`.
    ///
    /// An unreadable bundle degrades to key passthrough.
    pub fn new(locale: Locale) -> Self {
        let bundle = match Self::parse_bundle(bundled_source(locale)) {
            Ok(bundle) => bundle,
            Err(e) => {
                warn!(%locale, error = %e, "falling back to translation keys");
                Value::Null
            }
        };
        Self { locale, bundle }
    }

    /// Build a translator from a custom JSON bundle.
    pub fn from_json(locale: Locale, source: &str) -> Result<Self> {
        Ok(Self {
            locale,
            bundle: Self::parse_bundle(source)?,
        })
    }

    fn parse_bundle(source: &str) -> Result<Value> {
        serde_json::from_str(source).map_err(|e| DecalError::Parse {
            message: format!("Invalid translation bundle: {}", e),
            help: None,
        })
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Switch to another bundled locale.
    pub fn set_locale(&mut self, locale: Locale) {
        if locale != self.locale {
            *self = Self::new(locale);
        }
    }

    /// Translate `key`, or return it unchanged if it has no text.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        lookup(&self.bundle, key).unwrap_or(key)
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

fn bundled_source(locale: Locale) -> &'static str {
    match locale {
        Locale::En => EN,
        Locale::De => DE,
    }
}

fn lookup<'a>(bundle: &'a Value, key: &str) -> Option<&'a str> {
    key.split('.')
        .try_fold(bundle, |node, part| node.as_object()?.get(part))?
        .as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_lookup() {
        let t = Translator::new(Locale::En);
        assert_eq!(t.t("export.button"), "Export Image");
        assert_eq!(t.t("title.customize"), "Customize Your Opel");
    }

    #[test]
    fn test_german_bundle() {
        let t = Translator::new(Locale::De);
        assert_eq!(t.t("export.button"), "Bild exportieren");
    }

    #[test]
    fn test_missing_key_returns_key() {
        let t = Translator::new(Locale::En);
        assert_eq!(t.t("export.nope"), "export.nope");
        assert_eq!(t.t("nope"), "nope");
        assert_eq!(t.t(""), "");
    }

    #[test]
    fn test_non_string_leaf_returns_key() {
        let t = Translator::new(Locale::En);
        assert_eq!(t.t("export"), "export");
        assert_eq!(t.t("export.button.deeper"), "export.button.deeper");
    }

    #[test]
    fn test_bundles_share_keys() {
        let en: Value = serde_json::from_str(EN).unwrap();
        let de: Value = serde_json::from_str(DE).unwrap();

        fn keys(v: &Value, prefix: &str, out: &mut Vec<String>) {
            if let Some(obj) = v.as_object() {
                for (k, child) in obj {
                    let path = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{}.{}", prefix, k)
                    };
                    keys(child, &path, out);
                }
            } else {
                out.push(prefix.to_string());
            }
        }

        let mut en_keys = Vec::new();
        let mut de_keys = Vec::new();
        keys(&en, "", &mut en_keys);
        keys(&de, "", &mut de_keys);
        en_keys.sort();
        de_keys.sort();
        pretty_assertions::assert_eq!(en_keys, de_keys);
    }

    #[test]
    fn test_set_locale() {
        let mut t = Translator::default();
        t.set_locale(Locale::De);
        assert_eq!(t.locale(), Locale::De);
        assert_eq!(t.t("step.upload"), "Hochladen");
    }

    #[test]
    fn test_from_json_custom_bundle() {
        let t = Translator::from_json(Locale::En, r#"{"a": {"b": "c"}}"#).unwrap();
        assert_eq!(t.t("a.b"), "c");
        assert!(Translator::from_json(Locale::En, "{").is_err());
    }
}
