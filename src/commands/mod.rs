pub mod check;
pub mod component;
pub mod file;
pub mod render;

use anyhow::{Context, Result};
use serde_json::Value;

use folio::config::{Config, ConfigWarning};
use folio::I18n;

pub fn print_config_warnings(warnings: &[ConfigWarning]) {
    for w in warnings {
        let file = w.file.display();
        if let Some(line) = w.line {
            eprintln!("⚠ Unknown config key '{}' in {}:{}", w.key, file, line);
        } else {
            eprintln!("⚠ Unknown config key '{}' in {}", w.key, file);
        }

        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{}'?\n", suggestion);
        }
    }
}

/// Translations for the configured locale, from `[i18n] dir` when set.
pub fn load_i18n(config: &Config) -> Result<I18n> {
    match &config.i18n.dir {
        Some(dir) => I18n::load_dir(dir, config.i18n.locale.as_str())
            .with_context(|| format!("failed to load translations from {}", dir.display())),
        None => Ok(I18n::new(config.i18n.locale.as_str())),
    }
}

pub fn print_json(config: &Config, value: &Value) -> Result<()> {
    let out = if config.output.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}
