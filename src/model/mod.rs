//! Content model collaborator
//!
//! Blueprint nodes and Panel view models read live data through these traits.
//! They never own a model: a model is only borrowed for the length of one
//! render pass (see [`crate::render::RenderContext`]).
//!
//! - `ContentModel` - anything with content (site, page, file, user)
//! - `FileModel` - a file with navigation to its parent and siblings
//! - `memory` - an in-memory implementation loaded from YAML fixtures

pub mod memory;
pub mod template;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::blueprint::Blueprint;

/// Kind of content entity a model (and its blueprint) describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Site,
    Page,
    File,
    User,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Site => "site",
            ModelKind::Page => "page",
            ModelKind::File => "file",
            ModelKind::User => "user",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file resolved from a blueprint query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub id: String,
    pub url: String,
}

/// Read-only view of a content entity.
pub trait ContentModel {
    fn kind(&self) -> ModelKind;

    fn id(&self) -> String;

    fn title(&self) -> String;

    fn url(&self) -> String;

    fn content(&self) -> Map<String, Value>;

    /// All permission flags for the acting user, in blueprint option order
    fn permissions(&self) -> Vec<(String, bool)>;

    /// Resolve a file query such as `page.image` or `file`
    fn query_file(&self, query: &str) -> Option<FileRef>;

    /// Resolve a template placeholder path such as `page.title`
    fn placeholder(&self, path: &str) -> Option<String>;

    fn can(&self, action: &str) -> bool {
        self.permissions()
            .into_iter()
            .find(|(name, _)| name == action)
            .map(|(_, allowed)| allowed)
            .unwrap_or(false)
    }

    /// Resolve `{{ ... }}` placeholders with HTML-escaped values
    fn to_safe_string(&self, template: &str) -> String {
        template::safe_template(template, |path| self.placeholder(path))
    }

    fn kirbytext(&self, text: &str) -> String {
        template::kirbytext(text)
    }

    /// Content lock status; `false` when nobody else is editing
    fn lock(&self) -> Value {
        Value::Bool(false)
    }

    fn username(&self) -> Option<String> {
        None
    }

    /// Whether this model is the user currently signed in
    fn is_logged_in(&self) -> bool {
        false
    }

    /// Blueprint that describes this model, if one is registered
    fn blueprint(&self) -> Option<&Blueprint> {
        None
    }
}

/// A file entity with navigation.
pub trait FileModel: ContentModel {
    fn as_content(&self) -> &dyn ContentModel;

    fn filename(&self) -> String;

    fn mime(&self) -> String;

    /// Size in bytes
    fn size(&self) -> u64;

    fn dimensions(&self) -> Dimensions;

    fn template(&self) -> Option<String>;

    fn sort(&self) -> Option<i64>;

    fn parent(&self) -> Box<dyn ContentModel + '_>;

    /// Ancestor pages, direct parent first; empty unless the parent is a page
    fn parents(&self) -> Vec<Box<dyn ContentModel + '_>>;

    /// Files of the same parent sharing this file's template, including itself
    fn template_siblings(&self) -> Vec<Box<dyn FileModel + '_>>;

    fn extension(&self) -> String {
        let filename = self.filename();
        filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default()
    }

    fn file_type(&self) -> FileType {
        FileType::from_extension(&self.extension())
    }

    fn alt(&self) -> Option<String> {
        self.content()
            .get("alt")
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn preview_url(&self) -> String {
        self.url()
    }
}

/// Broad file category derived from the extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Archive,
    Audio,
    Code,
    Document,
    Image,
    Video,
    Unknown,
}

impl FileType {
    pub fn from_extension(extension: &str) -> Self {
        match extension {
            "gz" | "tar" | "tgz" | "zip" => FileType::Archive,
            "aif" | "aiff" | "m4a" | "mp3" | "ogg" | "wav" => FileType::Audio,
            "css" | "js" | "json" | "php" | "rs" | "xml" | "yml" | "yaml" => FileType::Code,
            "csv" | "doc" | "docx" | "md" | "odt" | "pdf" | "txt" | "xls" | "xlsx" => {
                FileType::Document
            }
            "avif" | "gif" | "jpeg" | "jpg" | "png" | "svg" | "webp" => FileType::Image,
            "m4v" | "mov" | "mp4" | "ogv" | "webm" => FileType::Video,
            _ => FileType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Archive => "archive",
            FileType::Audio => "audio",
            FileType::Code => "code",
            FileType::Document => "document",
            FileType::Image => "image",
            FileType::Video => "video",
            FileType::Unknown => "unknown",
        }
    }

    /// Guess a mime type for an extension
    pub fn mime_for(extension: &str) -> &'static str {
        match extension {
            "gif" => "image/gif",
            "jpeg" | "jpg" => "image/jpeg",
            "png" => "image/png",
            "svg" => "image/svg+xml",
            "webp" => "image/webp",
            "avif" => "image/avif",
            "mp4" | "m4v" => "video/mp4",
            "webm" => "video/webm",
            "mov" => "video/quicktime",
            "mp3" => "audio/mpeg",
            "wav" => "audio/wav",
            "pdf" => "application/pdf",
            "zip" => "application/zip",
            "json" => "application/json",
            "txt" | "md" => "text/plain",
            "csv" => "text/csv",
            _ => "application/octet-stream",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pixel dimensions of a file; zero for non-image files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height, rounded to two decimals
    pub fn ratio(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        let ratio = f64::from(self.width) / f64::from(self.height);
        (ratio * 100.0).round() / 100.0
    }

    pub fn orientation(&self) -> Option<&'static str> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        Some(match self.width.cmp(&self.height) {
            std::cmp::Ordering::Greater => "landscape",
            std::cmp::Ordering::Less => "portrait",
            std::cmp::Ordering::Equal => "square",
        })
    }

    pub fn to_array(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("width".into(), self.width.into());
        map.insert("height".into(), self.height.into());
        map.insert("ratio".into(), self.ratio().into());
        map.insert(
            "orientation".into(),
            self.orientation().map_or(Value::Bool(false), Value::from),
        );
        map
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} × {}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_type_from_extension() {
        assert_eq!(FileType::from_extension("jpg"), FileType::Image);
        assert_eq!(FileType::from_extension("mp4"), FileType::Video);
        assert_eq!(FileType::from_extension("pdf"), FileType::Document);
        assert_eq!(FileType::from_extension("xyz"), FileType::Unknown);
    }

    #[test]
    fn dimensions_orientation_and_ratio() {
        let landscape = Dimensions::new(1200, 800);
        assert_eq!(landscape.orientation(), Some("landscape"));
        assert_eq!(landscape.ratio(), 1.5);
        assert_eq!(landscape.to_string(), "1200 × 800");

        assert_eq!(Dimensions::new(10, 10).orientation(), Some("square"));
        assert_eq!(Dimensions::new(10, 20).orientation(), Some("portrait"));
        assert_eq!(Dimensions::default().orientation(), None);
        assert_eq!(Dimensions::default().ratio(), 0.0);
    }

    #[test]
    fn dimensions_to_array_keys() {
        let array = Dimensions::default().to_array();
        let keys: Vec<&str> = array.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["width", "height", "ratio", "orientation"]);
        assert_eq!(array["orientation"], Value::Bool(false));
    }
}
