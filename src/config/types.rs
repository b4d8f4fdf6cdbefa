//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::FolioResult;
use crate::i18n::FALLBACK_LOCALE;
use crate::panel::{DragTextType, DEFAULT_PANEL_URL};

use super::loader::{self, ConfigWarning};

/// Translation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct I18nConfig {
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Directory of `<locale>.yml` dictionaries
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            dir: None,
        }
    }
}

fn default_locale() -> String {
    FALLBACK_LOCALE.to_string()
}

/// Panel settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    #[serde(default = "default_panel_url")]
    pub url: String,

    #[serde(default)]
    pub drag_text: DragTextType,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            url: default_panel_url(),
            drag_text: DragTextType::default(),
        }
    }
}

fn default_panel_url() -> String {
    DEFAULT_PANEL_URL.to_string()
}

/// Component definitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ComponentsConfig {
    /// Directory of `<type>.yml` definitions with mixins under `mixins/`
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub verbosity: Verbosity,

    /// Pretty-print rendered JSON
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::default(),
            pretty: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "quiet" => Some(Verbosity::Quiet),
            "normal" => Some(Verbosity::Normal),
            "verbose" => Some(Verbosity::Verbose),
            "debug" => Some(Verbosity::Debug),
            _ => None,
        }
    }

    /// Raise the level by the number of `-v` flags.
    pub fn raised_by(self, count: u8) -> Self {
        match (self, count) {
            (level, 0) => level,
            (Verbosity::Quiet | Verbosity::Normal, 1) => Verbosity::Verbose,
            (Verbosity::Verbose, 1) => Verbosity::Debug,
            _ => Verbosity::Debug,
        }
    }

    /// `tracing` filter directive for this level
    pub fn filter(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::Debug => "debug",
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub i18n: I18nConfig,

    #[serde(default)]
    pub panel: PanelConfig,

    #[serde(default)]
    pub components: ComponentsConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> FolioResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> FolioResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Parse TOML text; `file` is only used for warnings and errors.
    pub fn parse_with_warnings(
        content: &str,
        file: &Path,
    ) -> FolioResult<(Self, Vec<ConfigWarning>)> {
        loader::parse_with_warnings(content, file)
    }

    /// Load from an explicit file, project config, user config, or defaults
    pub fn load_layered(
        explicit: Option<&Path>,
        project_root: Option<&Path>,
    ) -> FolioResult<(Self, Vec<ConfigWarning>)> {
        loader::load_layered(explicit, project_root)
    }

    /// Apply environment variable overrides (FOLIO_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self, |key| std::env::var(key).ok())
    }

    /// Resolve a configured directory against the directory holding the config file.
    pub fn resolve_dir(dir: &Path, base: Option<&Path>) -> PathBuf {
        match base {
            Some(base) if dir.is_relative() => base.join(dir),
            _ => dir.to_path_buf(),
        }
    }
}
