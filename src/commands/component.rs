use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};

use folio::config::Config;
use folio::{yaml, Component, ComponentRegistry};

pub fn cmd_component(
    config: &Config,
    component_type: &str,
    attrs: &[String],
    dir: Option<&Path>,
) -> Result<()> {
    let Some(dir) = dir.or(config.components.dir.as_deref()) else {
        bail!("no component directory: pass --dir or set [components] dir in folio.toml");
    };

    let registry = ComponentRegistry::new();
    let count = registry
        .load_dir(dir)
        .with_context(|| format!("failed to load components from {}", dir.display()))?;
    tracing::info!(count, dir = %dir.display(), "registered component definitions");

    let component = Component::new(&registry, component_type, parse_attrs(attrs)?)?;
    super::print_json(config, &Value::Object(component.to_array()))
}

/// `key=value` pairs; values are YAML scalars or collections.
fn parse_attrs(attrs: &[String]) -> Result<Map<String, Value>> {
    let mut map = Map::new();
    for attr in attrs {
        let Some((key, raw)) = attr.split_once('=') else {
            bail!("invalid attribute '{attr}': expected KEY=VALUE");
        };
        let value = yaml::parse(raw, Path::new("--attr"))
            .with_context(|| format!("invalid value for attribute '{key}'"))?;
        map.insert(key.trim().to_string(), value);
    }
    Ok(map)
}
