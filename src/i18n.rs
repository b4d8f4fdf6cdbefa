//! Translations and the active locale
//!
//! `I18n` is passed explicitly into every render pass instead of living in a
//! global. Dictionaries are flat `key -> string` maps per locale; nested YAML
//! maps are flattened with `.` separators when loaded from disk.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{FolioError, FolioResult};
use crate::yaml;

/// Locale used when a key is missing from the active dictionary
pub const FALLBACK_LOCALE: &str = "en";

const BUILTIN_EN: &[(&str, &str)] = &[
    ("delete", "Delete"),
    ("dimensions", "Dimensions"),
    ("file.sort", "Change position"),
    ("mime", "Media Type"),
    ("open", "Open"),
    ("orientation", "Orientation"),
    ("orientation.landscape", "Landscape"),
    ("orientation.portrait", "Portrait"),
    ("orientation.square", "Square"),
    ("pixel", "Pixel"),
    ("rename", "Rename"),
    ("replace", "Replace"),
    ("size", "Size"),
    ("template", "Template"),
    ("url", "Url"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct I18n {
    locale: String,
    dictionaries: HashMap<String, HashMap<String, String>>,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(FALLBACK_LOCALE)
    }
}

impl I18n {
    /// Create a context for `locale` with the built-in English Panel strings.
    pub fn new(locale: impl Into<String>) -> Self {
        let mut i18n = Self::empty(locale);
        let builtin = BUILTIN_EN
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()));
        i18n.add_dictionary(FALLBACK_LOCALE, builtin);
        i18n
    }

    /// Create a context without any dictionaries.
    pub fn empty(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            dictionaries: HashMap::new(),
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_dictionary<I, K, V>(mut self, locale: &str, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.add_dictionary(locale, entries);
        self
    }

    /// Add entries to a locale's dictionary, replacing existing keys.
    pub fn add_dictionary<I, K, V>(&mut self, locale: &str, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let dictionary = self.dictionaries.entry(locale.to_string()).or_default();
        for (key, value) in entries {
            dictionary.insert(key.into(), value.into());
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.dictionaries.keys().map(String::as_str).collect();
        locales.sort_unstable();
        locales
    }

    /// Look a key up in one locale's dictionary only.
    pub fn translation(&self, locale: &str, key: &str) -> Option<&str> {
        self.dictionaries
            .get(locale)
            .and_then(|d| d.get(key))
            .map(String::as_str)
    }

    /// Translate a key in the active locale, falling back to English.
    pub fn translate(&self, key: &str) -> Option<String> {
        self.translation(&self.locale, key)
            .or_else(|| self.translation(FALLBACK_LOCALE, key))
            .map(str::to_string)
    }

    /// Translate a key, using the key itself when no dictionary has it.
    pub fn translate_or_key(&self, key: &str) -> String {
        self.translate(key).unwrap_or_else(|| key.to_string())
    }

    /// Load every `<locale>.yml` / `<locale>.yaml` / `<locale>.json` in `dir`
    /// on top of the built-in strings.
    pub fn load_dir(dir: &Path, locale: impl Into<String>) -> FolioResult<Self> {
        if !dir.is_dir() {
            return Err(FolioError::DirectoryNotFound {
                path: dir.to_path_buf(),
            });
        }

        let mut i18n = Self::new(locale);
        let mut entries: Vec<_> = fs::read_dir(dir)?.collect::<Result<_, _>>()?;
        entries.sort_by_key(|e| e.path());

        for entry in entries {
            let path = entry.path();
            let is_translation = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| matches!(e, "yml" | "yaml" | "json"));
            let Some(locale) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if !is_translation {
                continue;
            }

            let value = yaml::read(&path)?;

            let mut flat = Vec::new();
            flatten("", &value, &mut flat);
            let keys = flat.len();
            tracing::debug!(locale, keys, path = %path.display(), "loaded translations");
            i18n.add_dictionary(locale, flat);
        }

        Ok(i18n)
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                let key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&key, value, out);
            }
        }
        Value::String(s) => out.push((prefix.to_string(), s.clone())),
        Value::Null => {}
        other => out.push((prefix.to_string(), other.to_string())),
    }
}
