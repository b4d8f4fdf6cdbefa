use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use folio::blueprint::BlueprintSet;
use folio::config::Config;
use folio::error::FolioError;
use folio::{FileView, MemoryStore, PanelContext};

pub fn cmd_file(
    config: &Config,
    fixture: &Path,
    file_id: &str,
    blueprints: Option<&Path>,
    tab: Option<String>,
    dropdown: bool,
) -> Result<()> {
    let mut store = MemoryStore::load(fixture)
        .with_context(|| format!("failed to load site fixture {}", fixture.display()))?;
    if let Some(dir) = blueprints {
        let set = BlueprintSet::load_dir(dir)
            .with_context(|| format!("failed to load blueprints from {}", dir.display()))?;
        store = store.with_blueprints(set);
    }

    let file = store.file(file_id).ok_or_else(|| FolioError::ModelNotFound {
        id: file_id.to_string(),
    })?;

    let mut request = Map::new();
    if let Some(tab) = tab {
        request.insert("tab".to_string(), Value::String(tab));
    }
    let ctx = PanelContext::new(super::load_i18n(config)?, config.panel.url.as_str())
        .with_request(request)
        .with_drag_text(config.panel.drag_text);

    let view = FileView::new(&file, &ctx);
    let output = if dropdown {
        Value::Array(view.dropdown(&Map::new()))
    } else {
        Value::Object(view.view().resolve())
    };
    super::print_json(config, &output)
}
