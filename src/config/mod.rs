//! Configuration module for Folio
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (FOLIO_*)
//! 3. Project config (folio.toml)
//! 4. User config (<config dir>/folio/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{user_config_path, with_env_overrides, ConfigWarning, PROJECT_CONFIG};
pub use types::{ComponentsConfig, Config, I18nConfig, OutputConfig, PanelConfig, Verbosity};
