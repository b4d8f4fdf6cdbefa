//! In-memory content store
//!
//! Loads a site tree from a YAML fixture:
//!
//! ```yaml
//! site:
//!   title: Example
//!   url: https://example.com
//! pages:
//!   - slug: blog
//!     template: blog
//!     files:
//!       - filename: cover.jpg
//!         width: 1200
//!         height: 800
//!     children:
//!       - slug: first-post
//! users:
//!   - id: ada
//!     username: Ada
//!     role: admin
//! current_user: ada
//! ```
//!
//! Models are handed out as borrowed handles ([`MemoryModel`],
//! [`MemoryFile`]) into the store's arenas.

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::{ContentModel, Dimensions, FileModel, FileRef, FileType, ModelKind};
use crate::blueprint::{Blueprint, BlueprintSet, ModelOptions, DEFAULT_NAME};
use crate::error::{FolioError, FolioResult};
use crate::yaml;

/// Acting role when the fixture names none
pub const DEFAULT_ROLE: &str = "admin";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Fixture {
    site: SiteFixture,
    pages: Vec<PageFixture>,
    users: Vec<UserFixture>,
    current_user: Option<String>,
    role: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SiteFixture {
    title: Option<String>,
    url: Option<String>,
    content: Map<String, Value>,
    files: Vec<FileFixture>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PageFixture {
    slug: String,
    title: Option<String>,
    template: Option<String>,
    #[serde(default)]
    content: Map<String, Value>,
    #[serde(default)]
    files: Vec<FileFixture>,
    #[serde(default)]
    children: Vec<PageFixture>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct UserFixture {
    id: String,
    username: Option<String>,
    email: Option<String>,
    role: Option<String>,
    #[serde(default)]
    content: Map<String, Value>,
    #[serde(default)]
    files: Vec<FileFixture>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileFixture {
    filename: String,
    template: Option<String>,
    mime: Option<String>,
    #[serde(default)]
    size: u64,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    sort: Option<i64>,
    #[serde(default)]
    content: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entity {
    Site,
    Page(usize),
    User(usize),
    File(usize),
}

#[derive(Debug)]
struct SiteRecord {
    title: String,
    url: String,
    content: Map<String, Value>,
    files: Vec<usize>,
}

#[derive(Debug)]
struct PageRecord {
    id: String,
    slug: String,
    title: Option<String>,
    template: Option<String>,
    content: Map<String, Value>,
    parent: Option<usize>,
    files: Vec<usize>,
}

#[derive(Debug)]
struct UserRecord {
    id: String,
    username: Option<String>,
    email: Option<String>,
    role: String,
    content: Map<String, Value>,
    files: Vec<usize>,
}

#[derive(Debug)]
struct FileRecord {
    filename: String,
    template: Option<String>,
    mime: Option<String>,
    size: u64,
    dimensions: Dimensions,
    sort: Option<i64>,
    content: Map<String, Value>,
    parent: Entity,
}

#[derive(Debug)]
pub struct MemoryStore {
    site: SiteRecord,
    pages: Vec<PageRecord>,
    users: Vec<UserRecord>,
    files: Vec<FileRecord>,
    current_user: Option<String>,
    role: String,
    blueprints: BlueprintSet,
}

impl MemoryStore {
    pub fn from_yaml(content: &str) -> FolioResult<Self> {
        Self::parse(content, Path::new("<fixture>"))
    }

    pub fn load(path: &Path) -> FolioResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, file: &Path) -> FolioResult<Self> {
        let value = yaml::parse(content, file)?;
        let fixture: Fixture = if value.is_null() {
            Fixture::default()
        } else {
            serde_json::from_value(value).map_err(|e| FolioError::InvalidYaml {
                file: file.to_path_buf(),
                message: e.to_string(),
            })?
        };
        Ok(Self::from_fixture(fixture))
    }

    fn from_fixture(fixture: Fixture) -> Self {
        let mut store = Self {
            site: SiteRecord {
                title: fixture.site.title.unwrap_or_default(),
                url: fixture
                    .site
                    .url
                    .unwrap_or_default()
                    .trim_end_matches('/')
                    .to_string(),
                content: fixture.site.content,
                files: Vec::new(),
            },
            pages: Vec::new(),
            users: Vec::new(),
            files: Vec::new(),
            current_user: fixture.current_user,
            role: DEFAULT_ROLE.to_string(),
            blueprints: BlueprintSet::new(),
        };

        store.site.files = store.add_files(Entity::Site, fixture.site.files);
        for page in fixture.pages {
            store.add_page(None, page);
        }
        for user in fixture.users {
            let index = store.users.len();
            store.users.push(UserRecord {
                id: user.id,
                username: user.username,
                email: user.email,
                role: user.role.unwrap_or_else(|| DEFAULT_ROLE.to_string()),
                content: user.content,
                files: Vec::new(),
            });
            let files = store.add_files(Entity::User(index), user.files);
            store.users[index].files = files;
        }

        let current_role = store
            .current_user
            .as_deref()
            .and_then(|id| store.users.iter().find(|u| u.id == id))
            .map(|u| u.role.clone());
        if let Some(role) = fixture.role.or(current_role) {
            store.role = role;
        }
        store
    }

    fn add_page(&mut self, parent: Option<usize>, page: PageFixture) {
        let index = self.pages.len();
        let id = match parent {
            Some(parent) => format!("{}/{}", self.pages[parent].id, page.slug),
            None => page.slug.clone(),
        };
        self.pages.push(PageRecord {
            id,
            slug: page.slug,
            title: page.title,
            template: page.template,
            content: page.content,
            parent,
            files: Vec::new(),
        });
        let files = self.add_files(Entity::Page(index), page.files);
        self.pages[index].files = files;
        for child in page.children {
            self.add_page(Some(index), child);
        }
    }

    fn add_files(&mut self, parent: Entity, files: Vec<FileFixture>) -> Vec<usize> {
        files
            .into_iter()
            .map(|file| {
                self.files.push(FileRecord {
                    filename: file.filename,
                    template: file.template,
                    mime: file.mime,
                    size: file.size,
                    dimensions: Dimensions::new(file.width, file.height),
                    sort: file.sort,
                    content: file.content,
                    parent,
                });
                self.files.len() - 1
            })
            .collect()
    }

    pub fn with_blueprints(mut self, blueprints: BlueprintSet) -> Self {
        self.blueprints = blueprints;
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn blueprints(&self) -> &BlueprintSet {
        &self.blueprints
    }

    /// Role permissions are resolved for
    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn site(&self) -> MemoryModel<'_> {
        self.model(Entity::Site)
    }

    pub fn page(&self, id: &str) -> Option<MemoryModel<'_>> {
        self.pages
            .iter()
            .position(|p| p.id == id)
            .map(|i| self.model(Entity::Page(i)))
    }

    pub fn user(&self, id: &str) -> Option<MemoryModel<'_>> {
        self.users
            .iter()
            .position(|u| u.id == id)
            .map(|i| self.model(Entity::User(i)))
    }

    /// File by id: `<parent id>/<filename>`, or the bare filename for site files
    pub fn file(&self, id: &str) -> Option<MemoryFile<'_>> {
        (0..self.files.len())
            .map(|i| MemoryFile::new(self, i))
            .find(|f| f.id() == id)
    }

    /// `site`, a page id, a user id or a file id
    pub fn find(&self, id: &str) -> FolioResult<MemoryModel<'_>> {
        if id == "site" {
            return Ok(self.site());
        }
        self.page(id)
            .or_else(|| self.user(id))
            .or_else(|| self.file(id).map(|f| f.model))
            .ok_or_else(|| FolioError::ModelNotFound { id: id.to_string() })
    }

    pub fn page_ids(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(|p| p.id.as_str())
    }

    pub fn file_ids(&self) -> Vec<String> {
        (0..self.files.len())
            .map(|i| MemoryFile::new(self, i).id())
            .collect()
    }

    fn model(&self, entity: Entity) -> MemoryModel<'_> {
        MemoryModel {
            store: self,
            entity,
        }
    }
}

/// A site, page, user or file of a [`MemoryStore`]
#[derive(Debug, Clone, Copy)]
pub struct MemoryModel<'s> {
    store: &'s MemoryStore,
    entity: Entity,
}

impl<'s> MemoryModel<'s> {
    fn file_record(&self) -> Option<&'s FileRecord> {
        match self.entity {
            Entity::File(i) => self.store.files.get(i),
            _ => None,
        }
    }

    fn files(&self) -> &'s [usize] {
        match self.entity {
            Entity::Site => &self.store.site.files,
            Entity::Page(i) => &self.store.pages[i].files,
            Entity::User(i) => &self.store.users[i].files,
            Entity::File(_) => &[],
        }
    }

    fn parent_entity(&self) -> Option<Entity> {
        match self.entity {
            Entity::Site => None,
            Entity::Page(i) => {
                let parent = self.store.pages[i].parent;
                Some(parent.map_or(Entity::Site, Entity::Page))
            }
            Entity::User(_) => Some(Entity::Site),
            Entity::File(i) => Some(self.store.files[i].parent),
        }
    }

    /// Closest model of `kind`, starting with this one
    fn nearest(&self, kind: ModelKind) -> Option<MemoryModel<'s>> {
        let mut current = Some(*self);
        while let Some(model) = current {
            if model.kind() == kind {
                return Some(model);
            }
            current = model.parent_entity().map(|e| self.store.model(e));
        }
        None
    }

    /// Template name used to find the model's blueprint
    pub fn template(&self) -> String {
        match self.entity {
            Entity::Site => "site".to_string(),
            Entity::Page(i) => self.store.pages[i]
                .template
                .clone()
                .unwrap_or_else(|| DEFAULT_NAME.to_string()),
            Entity::User(i) => self.store.users[i].role.clone(),
            Entity::File(i) => self.store.files[i]
                .template
                .clone()
                .unwrap_or_else(|| DEFAULT_NAME.to_string()),
        }
    }

    fn file_ref(&self, index: usize) -> FileRef {
        let file = MemoryFile::new(self.store, index);
        FileRef {
            id: file.id(),
            url: file.url(),
        }
    }

    fn first_file(&self, images_only: bool) -> Option<FileRef> {
        self.files()
            .iter()
            .copied()
            .find(|i| {
                !images_only
                    || FileType::from_extension(&extension(&self.store.files[*i].filename))
                        == FileType::Image
            })
            .map(|i| self.file_ref(i))
    }

    fn named_file(&self, filename: &str) -> Option<FileRef> {
        self.files()
            .iter()
            .copied()
            .find(|i| self.store.files[*i].filename == filename)
            .map(|i| self.file_ref(i))
    }

    /// Model a query or placeholder path starts at
    fn resolve_root(&self, root: &str) -> Option<MemoryModel<'s>> {
        match root {
            "model" => Some(*self),
            "site" => Some(self.store.site()),
            "page" => self.nearest(ModelKind::Page),
            "file" => self.nearest(ModelKind::File),
            "user" => self.nearest(ModelKind::User).or_else(|| {
                self.store
                    .current_user
                    .as_deref()
                    .and_then(|id| self.store.user(id))
            }),
            _ => None,
        }
    }

    fn field(&self, name: &str) -> Option<String> {
        let value = match name {
            "id" => return Some(self.id()),
            "title" => return Some(self.title()),
            "url" => return Some(self.url()),
            "template" => return Some(self.template()),
            "slug" => match self.entity {
                Entity::Page(i) => return Some(self.store.pages[i].slug.clone()),
                _ => return None,
            },
            "filename" => return self.file_record().map(|f| f.filename.clone()),
            "username" => return self.username(),
            "email" => match self.entity {
                Entity::User(i) => return self.store.users[i].email.clone(),
                _ => return None,
            },
            "role" => match self.entity {
                Entity::User(i) => return Some(self.store.users[i].role.clone()),
                _ => return None,
            },
            key => self.content_map().get(key)?.clone(),
        };
        match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        }
    }

    fn content_map(&self) -> &'s Map<String, Value> {
        match self.entity {
            Entity::Site => &self.store.site.content,
            Entity::Page(i) => &self.store.pages[i].content,
            Entity::User(i) => &self.store.users[i].content,
            Entity::File(i) => &self.store.files[i].content,
        }
    }
}

fn extension(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

const QUERY_ROOTS: &[&str] = &["model", "site", "page", "file", "user"];

/// `name("argument")` call syntax in queries
fn call_argument<'q>(query: &'q str, name: &str) -> Option<&'q str> {
    let rest = query.strip_prefix(name)?.strip_prefix('(')?;
    let rest = rest.strip_suffix(')')?;
    Some(rest.trim().trim_matches(|c| c == '"' || c == '\''))
}

impl ContentModel for MemoryModel<'_> {
    fn kind(&self) -> ModelKind {
        match self.entity {
            Entity::Site => ModelKind::Site,
            Entity::Page(_) => ModelKind::Page,
            Entity::User(_) => ModelKind::User,
            Entity::File(_) => ModelKind::File,
        }
    }

    fn id(&self) -> String {
        match self.entity {
            Entity::Site => "site".to_string(),
            Entity::Page(i) => self.store.pages[i].id.clone(),
            Entity::User(i) => self.store.users[i].id.clone(),
            Entity::File(i) => {
                let file = &self.store.files[i];
                match file.parent {
                    Entity::Site => file.filename.clone(),
                    parent => format!("{}/{}", self.store.model(parent).id(), file.filename),
                }
            }
        }
    }

    fn title(&self) -> String {
        match self.entity {
            Entity::Site => self.store.site.title.clone(),
            Entity::Page(i) => {
                let page = &self.store.pages[i];
                page.title.clone().unwrap_or_else(|| page.slug.clone())
            }
            Entity::User(i) => {
                let user = &self.store.users[i];
                user.username
                    .clone()
                    .or_else(|| user.email.clone())
                    .unwrap_or_else(|| user.id.clone())
            }
            Entity::File(i) => self.store.files[i].filename.clone(),
        }
    }

    fn url(&self) -> String {
        let site = &self.store.site.url;
        match self.entity {
            Entity::Site => site.clone(),
            Entity::Page(i) => format!("{site}/{}", self.store.pages[i].id),
            Entity::User(i) => format!("{site}/users/{}", self.store.users[i].id),
            Entity::File(i) => {
                let file = &self.store.files[i];
                let parent = self.store.model(file.parent).url();
                format!("{parent}/{}", file.filename)
            }
        }
    }

    fn content(&self) -> Map<String, Value> {
        self.content_map().clone()
    }

    fn permissions(&self) -> Vec<(String, bool)> {
        let role = self.store.role.as_str();
        match self.blueprint() {
            Some(blueprint) => blueprint.options.resolve(role),
            None => ModelOptions::default_for(self.kind()).resolve(role),
        }
    }

    fn query_file(&self, query: &str) -> Option<FileRef> {
        let query = query.trim();
        if query == "file" {
            return match self.entity {
                Entity::File(i) => Some(self.file_ref(i)),
                _ => None,
            };
        }

        let (root, rest) = match query.split_once('.') {
            Some((root, rest)) if QUERY_ROOTS.contains(&root) => (root, rest),
            _ => ("model", query),
        };
        let model = self.resolve_root(root)?;
        match rest {
            "image" => model.first_file(true),
            "files.first" | "images.first" => model.first_file(rest.starts_with("images")),
            call => call_argument(call, "image")
                .or_else(|| call_argument(call, "file"))
                .and_then(|name| model.named_file(name)),
        }
    }

    fn placeholder(&self, path: &str) -> Option<String> {
        let (root, name) = path.split_once('.')?;
        self.resolve_root(root)?.field(name)
    }

    fn username(&self) -> Option<String> {
        match self.entity {
            Entity::User(i) => self.store.users[i].username.clone(),
            _ => None,
        }
    }

    fn is_logged_in(&self) -> bool {
        match self.entity {
            Entity::User(i) => {
                let id = self.store.users[i].id.as_str();
                self.store.current_user.as_deref() == Some(id)
            }
            _ => false,
        }
    }

    fn blueprint(&self) -> Option<&Blueprint> {
        let blueprints = &self.store.blueprints;
        blueprints.for_model(self.kind(), &self.template())
    }
}

/// A file of a [`MemoryStore`]
#[derive(Debug, Clone, Copy)]
pub struct MemoryFile<'s> {
    model: MemoryModel<'s>,
    index: usize,
}

impl<'s> MemoryFile<'s> {
    fn new(store: &'s MemoryStore, index: usize) -> Self {
        Self {
            model: store.model(Entity::File(index)),
            index,
        }
    }

    /// The file as a plain content model handle
    pub fn model(&self) -> MemoryModel<'s> {
        self.model
    }

    fn record(&self) -> &'s FileRecord {
        &self.model.store.files[self.index]
    }

    fn siblings(&self) -> Vec<MemoryFile<'s>> {
        let store = self.model.store;
        store
            .model(self.record().parent)
            .files()
            .iter()
            .map(|i| MemoryFile::new(store, *i))
            .collect()
    }
}

impl ContentModel for MemoryFile<'_> {
    fn kind(&self) -> ModelKind {
        ModelKind::File
    }

    fn id(&self) -> String {
        self.model.id()
    }

    fn title(&self) -> String {
        self.model.title()
    }

    fn url(&self) -> String {
        self.model.url()
    }

    fn content(&self) -> Map<String, Value> {
        self.model.content()
    }

    fn permissions(&self) -> Vec<(String, bool)> {
        self.model.permissions()
    }

    fn query_file(&self, query: &str) -> Option<FileRef> {
        self.model.query_file(query)
    }

    fn placeholder(&self, path: &str) -> Option<String> {
        self.model.placeholder(path)
    }

    fn blueprint(&self) -> Option<&Blueprint> {
        self.model.blueprint()
    }
}

impl FileModel for MemoryFile<'_> {
    fn as_content(&self) -> &dyn ContentModel {
        self
    }

    fn filename(&self) -> String {
        self.record().filename.clone()
    }

    fn mime(&self) -> String {
        let record = self.record();
        record
            .mime
            .clone()
            .unwrap_or_else(|| FileType::mime_for(&extension(&record.filename)).to_string())
    }

    fn size(&self) -> u64 {
        self.record().size
    }

    fn dimensions(&self) -> Dimensions {
        self.record().dimensions
    }

    fn template(&self) -> Option<String> {
        self.record().template.clone()
    }

    fn sort(&self) -> Option<i64> {
        self.record().sort
    }

    fn parent(&self) -> Box<dyn ContentModel + '_> {
        Box::new(self.model.store.model(self.record().parent))
    }

    fn parents(&self) -> Vec<Box<dyn ContentModel + '_>> {
        let store = self.model.store;
        let mut parents: Vec<Box<dyn ContentModel + '_>> = Vec::new();
        let mut current = match self.record().parent {
            Entity::Page(i) => Some(i),
            _ => None,
        };
        while let Some(i) = current {
            parents.push(Box::new(store.model(Entity::Page(i))));
            current = store.pages[i].parent;
        }
        parents
    }

    fn template_siblings(&self) -> Vec<Box<dyn FileModel + '_>> {
        let template = self.template();
        self.siblings()
            .into_iter()
            .filter(|f| f.template() == template)
            .map(|f| Box::new(f) as Box<dyn FileModel + '_>)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
site:
  title: Example
  url: https://example.com/
  files:
    - filename: logo.svg
pages:
  - slug: blog
    title: Blog
    template: blog
    content:
      intro: Latest news
    files:
      - filename: cover.jpg
        template: image
        size: 2048
        width: 1200
        height: 800
      - filename: notes.pdf
    children:
      - slug: first-post
        files:
          - filename: photo.png
            template: image
users:
  - id: ada
    username: Ada
    role: editor
current_user: ada
"#;

    fn store() -> MemoryStore {
        MemoryStore::from_yaml(FIXTURE).unwrap()
    }

    #[test]
    fn ids_and_urls() {
        let store = store();
        let post = store.page("blog/first-post").unwrap();
        assert_eq!(post.url(), "https://example.com/blog/first-post");
        assert_eq!(post.title(), "first-post");

        let photo = store.file("blog/first-post/photo.png").unwrap();
        assert_eq!(photo.url(), "https://example.com/blog/first-post/photo.png");
        assert_eq!(photo.mime(), "image/png");

        let logo = store.file("logo.svg").unwrap();
        assert_eq!(logo.url(), "https://example.com/logo.svg");
        assert_eq!(logo.parent().kind(), ModelKind::Site);
    }

    #[test]
    fn find_resolves_any_model() {
        let store = store();
        assert_eq!(store.find("site").unwrap().kind(), ModelKind::Site);
        assert_eq!(store.find("blog").unwrap().kind(), ModelKind::Page);
        assert_eq!(store.find("ada").unwrap().kind(), ModelKind::User);
        assert_eq!(
            store.find("blog/cover.jpg").unwrap().kind(),
            ModelKind::File
        );
        assert!(matches!(store.find("nope"), Err(FolioError::ModelNotFound { .. })));
    }

    #[test]
    fn placeholders_resolve_against_nearest_model() {
        let store = store();
        let cover = store.file("blog/cover.jpg").unwrap();
        assert_eq!(cover.placeholder("page.title").as_deref(), Some("Blog"));
        assert_eq!(
            cover.placeholder("page.intro").as_deref(),
            Some("Latest news")
        );
        assert_eq!(
            cover.placeholder("file.filename").as_deref(),
            Some("cover.jpg")
        );
        assert_eq!(cover.placeholder("site.title").as_deref(), Some("Example"));
        assert_eq!(cover.placeholder("user.username").as_deref(), Some("Ada"));
        assert_eq!(cover.placeholder("page.missing"), None);
        assert_eq!(
            cover.to_safe_string("{{ page.title }} / {{ file.filename }}"),
            "Blog / cover.jpg"
        );
    }

    #[test]
    fn queries_find_files() {
        let store = store();
        let blog = store.page("blog").unwrap();
        assert_eq!(blog.query_file("page.image").unwrap().id, "blog/cover.jpg");
        assert_eq!(blog.query_file("site.files.first").unwrap().id, "logo.svg");
        assert_eq!(
            blog.query_file("page.file(\"notes.pdf\")").unwrap().id,
            "blog/notes.pdf"
        );
        assert_eq!(
            blog.query_file("image(\"cover.jpg\")").unwrap().id,
            "blog/cover.jpg"
        );
        assert_eq!(blog.query_file("file"), None);

        let cover = store.file("blog/cover.jpg").unwrap();
        assert_eq!(cover.query_file("file").unwrap().id, "blog/cover.jpg");
    }

    #[test]
    fn parents_are_direct_parent_first() {
        let store = store();
        let photo = store.file("blog/first-post/photo.png").unwrap();
        let ids: Vec<String> = photo.parents().iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["blog/first-post", "blog"]);
        assert!(store.file("logo.svg").unwrap().parents().is_empty());
    }

    #[test]
    fn template_siblings_share_template() {
        let store = store();
        let cover = store.file("blog/cover.jpg").unwrap();
        let ids: Vec<String> = cover.template_siblings().iter().map(|f| f.id()).collect();
        assert_eq!(ids, vec!["blog/cover.jpg"]);
    }

    #[test]
    fn role_and_login_come_from_current_user() {
        let store = store();
        assert_eq!(store.role(), "editor");
        assert!(store.user("ada").unwrap().is_logged_in());
        assert!(!store.site().is_logged_in());
    }

    #[test]
    fn permissions_default_to_allowed() {
        let store = store();
        let cover = store.file("blog/cover.jpg").unwrap();
        assert!(cover.can("replace"));
        assert!(!cover.can("fly"));
    }

    #[test]
    fn unknown_fixture_keys_are_rejected() {
        let err = MemoryStore::from_yaml("pages:\n  - slug: a\n    colour: red\n").unwrap_err();
        assert!(matches!(err, FolioError::InvalidYaml { .. }));
    }
}
