//! YAML documents
//!
//! Blueprints, component definitions, translations and model fixtures are
//! all YAML, parsed into `serde_json::Value` trees.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{FolioError, FolioResult};

/// Parse a YAML document; an empty document is `null`.
pub fn parse(content: &str, file: &Path) -> FolioResult<Value> {
    if content.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_yaml_ng::from_str(content).map_err(|e| FolioError::InvalidYaml {
        file: file.to_path_buf(),
        message: format_error(content, &e),
    })
}

pub fn read(path: &Path) -> FolioResult<Value> {
    let content = fs::read_to_string(path)?;
    parse(&content, path)
}

fn format_error(content: &str, err: &serde_yaml_ng::Error) -> String {
    let err_str = err.to_string();
    let mut message = match err.location() {
        Some(loc) => format!("Line {}: {}", loc.line(), err_str),
        None => err_str.clone(),
    };

    if should_hint_colon_quotes(content, &err_str) {
        message.push_str("\nHint: strings with colons need quotes: label: \"Note: read me\"");
    }
    message
}

fn should_hint_colon_quotes(content: &str, err_str: &str) -> bool {
    err_str.contains("mapping values are not allowed")
        || (err_str.contains("unexpected ':'") && content.contains(": "))
}

/// File stem of a YAML file, `None` for other extensions
pub fn yaml_stem(path: &Path) -> Option<&str> {
    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| matches!(e, "yml" | "yaml"));
    if !is_yaml {
        return None;
    }
    path.file_stem().and_then(|s| s.to_str())
}
