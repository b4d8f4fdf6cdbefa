use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use folio::blueprint::{locate, BlueprintSet};
use folio::config::Config;
use folio::model::ModelKind;
use folio::{MemoryStore, RenderContext};

pub fn cmd_render(config: &Config, blueprint: &Path, site: &Path, model_id: &str) -> Result<()> {
    let (kind, name) = locate_in_path(blueprint)?;
    let content = fs::read_to_string(blueprint)
        .with_context(|| format!("failed to read {}", blueprint.display()))?;
    let blueprint = BlueprintSet::parse_str(kind, &name, &content, blueprint)?;

    let store = MemoryStore::load(site)
        .with_context(|| format!("failed to load site fixture {}", site.display()))?;
    let model = store.find(model_id)?;
    let i18n = super::load_i18n(config)?;

    tracing::info!(blueprint = %blueprint.id, model = model_id, "rendering blueprint");
    let ctx = RenderContext::new(&model, &i18n);
    super::print_json(config, &Value::Object(blueprint.render(&ctx)))
}

/// Model kind and name from the trailing `site.yml` / `pages/..` part of a path.
fn locate_in_path(path: &Path) -> Result<(ModelKind, String)> {
    let parts: Vec<Component<'_>> = path.components().collect();
    for start in 0..parts.len() {
        let suffix: PathBuf = parts[start..].iter().collect();
        if let Ok(found) = locate(&suffix) {
            return Ok(found);
        }
    }
    Ok(locate(path)?)
}
