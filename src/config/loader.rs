//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FolioError, FolioResult};
use crate::panel::DragTextType;

use super::types::{Config, Verbosity};

/// Project configuration file name
pub const PROJECT_CONFIG: &str = "folio.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> FolioResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

pub fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> FolioResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| FolioError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Explicit file, then project `folio.toml`, then user config, then defaults.
///
/// Only the first file found is read. An explicit path must exist; the
/// implicit ones are skipped when missing.
pub fn load_layered(
    explicit: Option<&Path>,
    project_root: Option<&Path>,
) -> FolioResult<(Config, Vec<ConfigWarning>)> {
    let candidate = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => project_root
            .map(|root| root.join(PROJECT_CONFIG))
            .filter(|path| path.exists())
            .or_else(|| user_config_path().filter(|path| path.exists())),
    };

    let (config, warnings) = match candidate {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            load_with_warnings(&path)?
        }
        None => (Config::default(), Vec::new()),
    };

    let config = with_env_overrides(config, |key| std::env::var(key).ok());
    Ok((config, warnings))
}

/// `<config dir>/folio/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("folio").join("config.toml"))
}

/// Apply FOLIO_* overrides read through `var`.
pub fn with_env_overrides<F>(mut config: Config, var: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(locale) = var("FOLIO_LOCALE").filter(|v| !v.trim().is_empty()) {
        config.i18n.locale = locale.trim().to_string();
    }

    if let Some(url) = var("FOLIO_PANEL_URL").filter(|v| !v.trim().is_empty()) {
        config.panel.url = url.trim().to_string();
    }

    if let Some(drag_text) = var("FOLIO_DRAG_TEXT") {
        if let Some(parsed) = DragTextType::from_name(&drag_text.to_lowercase()) {
            config.panel.drag_text = parsed;
        }
    }

    if let Some(verbosity) = var("FOLIO_VERBOSITY") {
        config.output.verbosity = Verbosity::from_name(&verbosity).unwrap_or_default();
    }

    if let Some(val) = var("FOLIO_PRETTY") {
        config.output.pretty = val.to_lowercase() != "false" && val != "0";
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "i18n",
        "locale",
        "dir",
        "panel",
        "url",
        "drag_text",
        "components",
        "output",
        "verbosity",
        "pretty",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    for (i, ac) in a.iter().enumerate() {
        let mut curr = Vec::with_capacity(b.len() + 1);
        curr.push(i + 1);
        for (j, bc) in b.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr.push((prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost));
        }
        prev = curr;
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levenshtein_counts_edits() {
        assert_eq!(levenshtein("locale", "locale"), 0);
        assert_eq!(levenshtein("lcale", "locale"), 1);
        assert_eq!(levenshtein("", "url"), 3);
    }

    #[test]
    fn suggestions_need_a_close_match() {
        assert_eq!(suggest_key("verbosty"), Some("verbosity".to_string()));
        assert_eq!(suggest_key("drag-text"), Some("drag_text".to_string()));
        assert_eq!(suggest_key("completely_different"), None);
    }
}
