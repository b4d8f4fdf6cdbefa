//! Panel view models
//!
//! Read-only projections of content models into the mappings the Panel UI
//! consumes. A view model borrows its model and a [`PanelContext`] and is
//! rebuilt for every request.

mod file;
mod view;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::i18n::I18n;
use crate::model::{ContentModel, ModelKind};

pub use file::{FileView, PickerParams};
pub use view::ViewData;

/// Menu separator in dropdowns
pub const SEPARATOR: &str = "-";

/// Default Panel base URL
pub const DEFAULT_PANEL_URL: &str = "/panel";

/// Syntax of the text inserted when a file is dragged into a textarea
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragTextType {
    #[default]
    Kirbytext,
    Markdown,
}

impl DragTextType {
    /// `auto` (or anything unknown) is `None`
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "kirbytext" => Some(DragTextType::Kirbytext),
            "markdown" => Some(DragTextType::Markdown),
            _ => None,
        }
    }
}

/// Request-scoped Panel state
#[derive(Debug, Clone)]
pub struct PanelContext {
    pub i18n: I18n,
    pub base_url: String,
    /// Query parameters of the current request
    pub request: Map<String, Value>,
    pub drag_text: DragTextType,
}

impl Default for PanelContext {
    fn default() -> Self {
        Self::new(I18n::default(), DEFAULT_PANEL_URL)
    }
}

impl PanelContext {
    pub fn new(i18n: I18n, base_url: impl Into<String>) -> Self {
        Self {
            i18n,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            request: Map::new(),
            drag_text: DragTextType::default(),
        }
    }

    pub fn with_request(mut self, request: Map<String, Value>) -> Self {
        self.request = request;
        self
    }

    pub fn with_drag_text(mut self, drag_text: DragTextType) -> Self {
        self.drag_text = drag_text;
        self
    }

    pub fn translate(&self, key: &str) -> String {
        self.i18n.translate_or_key(key)
    }

    /// `/<path>` when relative, `<base_url>/<path>` otherwise
    pub fn url(&self, path: &str, relative: bool) -> String {
        if relative {
            format!("/{path}")
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

/// Panel path of a site, page or user. File paths depend on the parent
/// and are built by [`FileView::path`].
pub fn panel_path(model: &dyn ContentModel) -> String {
    match model.kind() {
        ModelKind::Site => "site".to_string(),
        ModelKind::Page => format!("pages/{}", model.id().replace('/', "+")),
        ModelKind::User => format!("users/{}", model.id()),
        ModelKind::File => format!("files/{}", model.id()),
    }
}

pub fn panel_url(ctx: &PanelContext, model: &dyn ContentModel, relative: bool) -> String {
    ctx.url(&panel_path(model), relative)
}

/// Permission flags for the Panel. A locked model has every action
/// disabled except the ones in `unlock`.
pub fn options(model: &dyn ContentModel, unlock: &[&str]) -> Map<String, Value> {
    let locked = is_locked(&model.lock());
    model
        .permissions()
        .into_iter()
        .map(|(action, allowed)| {
            let allowed = allowed && (!locked || unlock.contains(&action.as_str()));
            (action, Value::Bool(allowed))
        })
        .collect()
}

fn is_locked(lock: &Value) -> bool {
    match lock {
        Value::Bool(locked) => *locked,
        Value::Object(lock) => {
            let locked = lock.get("isLocked").and_then(Value::as_bool);
            locked.unwrap_or(false)
        }
        _ => false,
    }
}

/// A dropdown entry is disabled when the permission is denied or the
/// caller passed `false` (or `"false"`) for it.
pub fn is_disabled_dropdown_option(
    action: &str,
    options: &Map<String, Value>,
    permissions: &Map<String, Value>,
) -> bool {
    let denied = permissions.get(action) == Some(&Value::Bool(false));
    let option = options.get(action);
    denied || option == Some(&Value::Bool(false)) || option.and_then(Value::as_str) == Some("false")
}

/// Navigation link to a neighbouring model
pub fn to_prev_next_link(link: String, tooltip: String) -> Value {
    let mut entry = Map::new();
    entry.insert("link".into(), link.into());
    entry.insert("tooltip".into(), tooltip.into());
    Value::Object(entry)
}

const SIZE_UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB", "PB"];

/// Human readable file size, e.g. `1.5 KB`
pub fn nice_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 KB".to_string();
    }

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    let rounded = (size * 100.0).round() / 100.0;
    format!("{rounded} {}", SIZE_UNITS[unit])
}
