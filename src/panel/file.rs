//! Panel view model of a file

use serde_json::{Map, Value};

use super::view::ViewData;
use super::{
    is_disabled_dropdown_option, nice_size, panel_path, panel_url, to_prev_next_link,
    DragTextType, PanelContext, SEPARATOR,
};
use crate::blueprint::{Blueprint, BlueprintImage};
use crate::model::{ContentModel, FileModel, FileType, ModelKind};
use crate::render::RenderContext;

/// Placeholder for details that do not apply
const NOT_APPLICABLE: &str = "—";

/// Options of [`FileView::picker_data`]
#[derive(Default)]
pub struct PickerParams<'p> {
    pub image: Option<BlueprintImage>,
    pub info: Option<String>,
    /// Defaults to `{{ file.filename }}`
    pub text: Option<String>,
    /// Model the picker belongs to; files of that model get relative ids
    pub model: Option<&'p dyn ContentModel>,
}

#[derive(Clone, Copy)]
pub struct FileView<'a> {
    file: &'a dyn FileModel,
    ctx: &'a PanelContext,
}

impl std::fmt::Debug for FileView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileView")
            .field("file", &self.file.id())
            .finish()
    }
}

fn entry<const N: usize>(pairs: [(&str, Value); N]) -> Value {
    Value::Object(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
}

impl<'a> FileView<'a> {
    pub fn new(file: &'a dyn FileModel, ctx: &'a PanelContext) -> Self {
        Self { file, ctx }
    }

    pub fn file(&self) -> &'a dyn FileModel {
        self.file
    }

    fn render_context(&self) -> RenderContext<'a> {
        RenderContext::new(self.file.as_content(), &self.ctx.i18n)
    }

    fn blueprint(&self) -> Option<&'a Blueprint> {
        self.file.blueprint()
    }

    /// Ancestors of the file, root first, then the file itself
    pub fn breadcrumb(&self) -> Vec<Value> {
        let parent = self.file.parent();
        let mut breadcrumb = Vec::new();

        match parent.kind() {
            // no breadcrumb on the account view
            ModelKind::User if !parent.is_logged_in() => {
                let label = parent.username().unwrap_or_else(|| parent.title());
                breadcrumb.push(entry([
                    ("label", label.into()),
                    ("link", panel_url(self.ctx, &*parent, true).into()),
                ]));
            }
            ModelKind::Page => {
                for page in self.file.parents().iter().rev() {
                    breadcrumb.push(entry([
                        ("label", page.title().into()),
                        ("link", panel_url(self.ctx, &**page, true).into()),
                    ]));
                }
            }
            _ => {}
        }

        breadcrumb.push(entry([
            ("label", self.file.filename().into()),
            ("link", self.url(true).into()),
        ]));
        breadcrumb
    }

    /// Tag inserted when the file is dragged into a textarea
    pub fn drag_text(&self, kind: Option<DragTextType>, absolute: bool) -> String {
        let kind = kind.unwrap_or(self.ctx.drag_text);
        let filename = self.file.filename();
        let url = if absolute {
            self.file.id()
        } else {
            filename.clone()
        };

        match (kind, self.file.file_type()) {
            (DragTextType::Markdown, FileType::Image) => {
                format!("![{}]({url})", self.file.alt().unwrap_or_default())
            }
            (DragTextType::Markdown, _) => format!("[{filename}]({url})"),
            (DragTextType::Kirbytext, FileType::Image) => format!("(image: {url})"),
            (DragTextType::Kirbytext, FileType::Video) => format!("(video: {url})"),
            (DragTextType::Kirbytext, _) => format!("(file: {url})"),
        }
    }

    /// Context menu entries; `options` override the request's
    /// `view`, `update` and `delete` parameters.
    pub fn dropdown(&self, options: &Map<String, Value>) -> Vec<Value> {
        let request = &self.ctx.request;
        let mut merged: Map<String, Value> = ["view", "update", "delete"]
            .into_iter()
            .filter_map(|key| Some((key.to_string(), request.get(key)?.clone())))
            .collect();
        for (key, value) in options {
            merged.insert(key.clone(), value.clone());
        }
        let options = merged;

        let permissions = self.options(&["preview"]);
        let list = options.get("view").and_then(Value::as_str) == Some("list");
        let url = self.url(true);
        let disabled =
            |action: &str| Value::Bool(is_disabled_dropdown_option(action, &options, &permissions));
        let mut result = Vec::new();

        if list {
            result.push(entry([
                ("link", self.file.preview_url().into()),
                ("target", "_blank".into()),
                ("icon", "open".into()),
                ("text", self.ctx.translate("open").into()),
            ]));
            result.push(SEPARATOR.into());
        }

        result.push(entry([
            ("dialog", format!("{url}/changeName").into()),
            ("icon", "title".into()),
            ("text", self.ctx.translate("rename").into()),
            ("disabled", disabled("changeName")),
        ]));

        result.push(entry([
            ("click", "replace".into()),
            ("icon", "upload".into()),
            ("text", self.ctx.translate("replace").into()),
            ("disabled", disabled("replace")),
        ]));

        if list {
            result.push(SEPARATOR.into());
            result.push(entry([
                ("dialog", format!("{url}/changeSort").into()),
                ("icon", "sort".into()),
                ("text", self.ctx.translate("file.sort").into()),
                ("disabled", disabled("update")),
            ]));
        }

        result.push(SEPARATOR.into());
        result.push(entry([
            ("dialog", format!("{url}/delete").into()),
            ("icon", "trash".into()),
            ("text", self.ctx.translate("delete").into()),
            ("disabled", disabled("delete")),
        ]));

        result
    }

    /// Entry for the file in other models' dropdowns
    pub fn dropdown_option(&self) -> Map<String, Value> {
        let black = BlueprintImage {
            back: Some("black".into()),
            ..BlueprintImage::default()
        };

        let mut option = Map::new();
        option.insert("icon".into(), "image".into());
        option.insert("text".into(), self.file.filename().into());
        let image = self.image(Some(&black)).map_or(Value::Null, Value::Object);
        option.insert("image".into(), image);
        option.insert("link".into(), self.url(true).into());
        option
    }

    /// Icon and colour by file type; files that are images show themselves.
    pub fn image_defaults(&self) -> BlueprintImage {
        let file_type = self.file.file_type();
        let (icon, color) = match file_type {
            FileType::Image => ("image", "orange-500"),
            FileType::Video => ("video", "yellow-500"),
            FileType::Document => ("document", "red-500"),
            FileType::Audio => ("audio", "aqua-500"),
            FileType::Code => ("code", "blue-500"),
            FileType::Archive => ("archive", "gray-500"),
            FileType::Unknown => ("file", "gray-500"),
        };

        BlueprintImage {
            back: Some("pattern".into()),
            color: Some(color.into()),
            cover: Some(false),
            disabled: None,
            icon: Some(icon.into()),
            query: (file_type == FileType::Image).then(|| "file".to_string()),
            ratio: Some("3/2".into()),
        }
    }

    /// Defaults, then the blueprint's image, then `settings`.
    /// `None` when the image is disabled.
    pub fn image(&self, settings: Option<&BlueprintImage>) -> Option<Map<String, Value>> {
        let blueprint_image = self.blueprint().and_then(|b| b.image.as_ref());
        self.image_defaults()
            .merge(blueprint_image)
            .merge(settings)
            .render(&self.render_context())
    }

    fn accepted(&self) -> bool {
        self.blueprint()
            .and_then(|b| b.accept.as_ref())
            .map_or(true, |accept| accept.accepts(self.file))
    }

    /// Panel permissions; `replace` is off for files the blueprint no
    /// longer accepts.
    pub fn options(&self, unlock: &[&str]) -> Map<String, Value> {
        let mut options = super::options(self.file.as_content(), unlock);
        if !self.accepted() {
            options.insert("replace".into(), Value::Bool(false));
        }
        options
    }

    /// Path below the parent, without leading slash
    pub fn path(&self) -> String {
        format!("files/{}", self.file.filename())
    }

    pub fn url(&self, relative: bool) -> String {
        let parent = self.file.parent();
        let base = panel_url(self.ctx, &*parent, relative);
        format!("{base}/{}", self.path())
    }

    pub fn content(&self) -> Map<String, Value> {
        self.file.content()
    }

    /// Item data for file pickers and file fields
    pub fn picker_data(&self, params: &PickerParams<'_>) -> Map<String, Value> {
        let id = self.file.id();
        let filename = self.file.filename();

        let same_parent = params.model.map(|model| {
            let parent = self.file.parent();
            parent.kind() == model.kind() && parent.id() == model.id()
        });
        let uuid = if same_parent == Some(true) {
            filename.clone()
        } else {
            id.clone()
        };
        let absolute = same_parent == Some(false);

        let text = params.text.as_deref().unwrap_or("{{ file.filename }}");
        let info = params
            .info
            .as_deref()
            .map_or_else(String::new, |info| self.file.to_safe_string(info));

        let mut data = Map::new();
        data.insert("id".into(), id.into());
        let image = self.image(params.image.as_ref());
        data.insert("image".into(), image.map_or(Value::Null, Value::Object));
        data.insert("info".into(), info.into());
        data.insert("link".into(), self.url(true).into());
        data.insert("sortable".into(), true.into());
        data.insert("text".into(), self.file.to_safe_string(text).into());
        data.insert("filename".into(), filename.into());
        data.insert("dragText".into(), self.drag_text(None, absolute).into());
        data.insert("type".into(), self.file.file_type().as_str().into());
        data.insert("url".into(), self.file.url().into());
        data.insert("uuid".into(), uuid.into());
        data
    }

    fn siblings(&self) -> Vec<Box<dyn FileModel + 'a>> {
        let mut siblings = self.file.template_siblings();
        siblings.sort_by(|a, b| {
            a.sort()
                .cmp(&b.sort())
                .then_with(|| a.filename().cmp(&b.filename()))
        });
        siblings
    }

    fn neighbour(&self, offset: isize) -> Value {
        let siblings = self.siblings();
        let id = self.file.id();
        let neighbour = siblings
            .iter()
            .position(|f| f.id() == id)
            .and_then(|index| index.checked_add_signed(offset))
            .and_then(|index| siblings.get(index));

        match neighbour {
            Some(sibling) => {
                let view = FileView::new(&**sibling, self.ctx);
                to_prev_next_link(view.url(true), sibling.filename())
            }
            None => Value::Null,
        }
    }

    /// Lazy `next` / `prev` links among files of the same template,
    /// ordered by sort number, then filename
    pub fn prev_next(&self) -> ViewData<'a> {
        let view = *self;
        let mut links = ViewData::new();
        links.insert_lazy("next", move || view.neighbour(1));
        links.insert_lazy("prev", move || view.neighbour(-1));
        links
    }

    fn details(&self) -> Vec<Value> {
        let file = self.file;
        let is_image = file.file_type() == FileType::Image;
        let dimensions = file.dimensions();
        let t = |key: &str| self.ctx.translate(key);

        let dimension_text = if is_image {
            format!("{dimensions} {}", t("pixel"))
        } else {
            NOT_APPLICABLE.to_string()
        };
        let orientation_text = match dimensions.orientation() {
            Some(orientation) if is_image => t(&format!("orientation.{orientation}")),
            _ => NOT_APPLICABLE.to_string(),
        };

        let template = file.template().unwrap_or_else(|| NOT_APPLICABLE.into());

        vec![
            entry([("title", t("template").into()), ("text", template.into())]),
            entry([("title", t("mime").into()), ("text", file.mime().into())]),
            entry([
                ("title", t("url").into()),
                ("text", file.id().into()),
                ("link", file.preview_url().into()),
            ]),
            entry([
                ("title", t("size").into()),
                ("text", nice_size(file.size()).into()),
            ]),
            entry([
                ("title", t("dimensions").into()),
                ("text", dimension_text.into()),
            ]),
            entry([
                ("title", t("orientation").into()),
                ("text", orientation_text.into()),
            ]),
        ]
    }

    fn model_data(&self) -> Map<String, Value> {
        let file = self.file;
        let parent = file.parent();

        let mut model = Map::new();
        model.insert("content".into(), Value::Object(self.content()));
        let dimensions = file.dimensions().to_array();
        model.insert("dimensions".into(), Value::Object(dimensions));
        model.insert("extension".into(), file.extension().into());
        model.insert("filename".into(), file.filename().into());
        model.insert("link".into(), self.url(true).into());
        model.insert("mime".into(), file.mime().into());
        model.insert("niceSize".into(), nice_size(file.size()).into());
        model.insert("id".into(), file.id().into());
        model.insert("parent".into(), panel_path(&*parent).into());
        model.insert("template".into(), file.template().into());
        model.insert("type".into(), file.file_type().as_str().into());
        model.insert("url".into(), file.url().into());
        model
    }

    /// Props of the file view component
    pub fn props(&self) -> ViewData<'a> {
        let file = self.file;
        let ctx = self.render_context();
        let tabs: Vec<Value> = self
            .blueprint()
            .map(|b| {
                b.tabs
                    .iter()
                    .map(|tab| Value::Object(tab.render(&ctx)))
                    .collect()
            })
            .unwrap_or_default();
        let requested = self.ctx.request.get("tab").and_then(Value::as_str);
        let tab = tabs
            .iter()
            .find(|tab| requested.is_some() && tab.get("name").and_then(Value::as_str) == requested)
            .or_else(|| tabs.first())
            .cloned();

        let permissions: Map<String, Value> = file
            .permissions()
            .into_iter()
            .map(|(action, allowed)| (action, Value::Bool(allowed)))
            .collect();

        let mut props = ViewData::new();
        props.insert("lock", file.lock());
        props.insert("permissions", Value::Object(permissions));
        props.insert("tabs", Value::Array(tabs));
        if let Some(tab) = tab {
            props.insert("tab", tab);
        }
        props.extend(self.prev_next());
        let blueprint = file.template().unwrap_or_else(|| "default".into());
        props.insert("blueprint", blueprint);
        props.insert("model", Value::Object(self.model_data()));

        let mut preview = Map::new();
        let image = self.image(None).map_or(Value::Null, Value::Object);
        preview.insert("image".into(), image);
        preview.insert("url".into(), file.preview_url().into());
        preview.insert("details".into(), Value::Array(self.details()));
        props.insert("preview", Value::Object(preview));
        props
    }

    /// Full view data; the breadcrumb is evaluated on demand.
    pub fn view(&self) -> ViewData<'a> {
        let this = *self;
        let mut view = ViewData::new();
        view.insert_lazy("breadcrumb", move || Value::Array(this.breadcrumb()));
        view.insert("component", "k-file-view");
        view.insert_view("props", self.props());
        view.insert("search", "files");
        view.insert("title", self.file.filename());
        view
    }
}
