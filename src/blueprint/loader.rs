//! Blueprint directories
//!
//! ```text
//! blueprints/
//! ├── site.yml
//! ├── pages/default.yml
//! ├── pages/blog/article.yml   # name "blog/article"
//! ├── files/image.yml
//! └── users/editor.yml
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use super::document::Blueprint;
use super::ignore::IgnorePatterns;
use crate::error::{FolioError, FolioResult};
use crate::model::ModelKind;
use crate::yaml;

/// Blueprint looked up when a model has no blueprint of its own
pub const DEFAULT_NAME: &str = "default";

/// Blueprints by id
#[derive(Debug, Default)]
pub struct BlueprintSet {
    blueprints: BTreeMap<String, Blueprint>,
}

impl BlueprintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any blueprint with the same id
    pub fn insert(&mut self, blueprint: Blueprint) -> Option<Blueprint> {
        self.blueprints.insert(blueprint.id.clone(), blueprint)
    }

    pub fn with(mut self, blueprint: Blueprint) -> Self {
        self.insert(blueprint);
        self
    }

    pub fn get(&self, id: &str) -> Option<&Blueprint> {
        self.blueprints.get(id)
    }

    /// Blueprint of a model, falling back to the kind's `default` blueprint
    pub fn for_model(&self, kind: ModelKind, name: &str) -> Option<&Blueprint> {
        self.get(&Blueprint::id_for(kind, name))
            .or_else(|| self.get(&Blueprint::id_for(kind, DEFAULT_NAME)))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.blueprints.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Blueprint> {
        self.blueprints.values()
    }

    pub fn len(&self) -> usize {
        self.blueprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty()
    }

    /// Parse one blueprint document
    pub fn parse_str(
        kind: ModelKind,
        name: &str,
        content: &str,
        file: &Path,
    ) -> FolioResult<Blueprint> {
        let document = yaml::parse(content, file)?;
        Ok(Blueprint::factory(kind, name, document)?)
    }

    /// Load every blueprint under `dir`, honoring `.folioignore`.
    pub fn load_dir(dir: &Path) -> FolioResult<Self> {
        let mut set = Self::new();
        for relative in blueprint_files(dir)? {
            let blueprint = load_file(dir, &relative)?;
            tracing::debug!(id = %blueprint.id, path = %relative.display(), "loaded blueprint");
            set.insert(blueprint);
        }
        Ok(set)
    }
}

/// Outcome of one file in [`check_dir`]
#[derive(Debug)]
pub struct CheckEntry {
    /// Path relative to the checked directory
    pub path: PathBuf,
    /// Blueprint id, or why the file was rejected
    pub result: FolioResult<String>,
}

/// Parse every blueprint under `dir` without stopping at the first failure.
pub fn check_dir(dir: &Path) -> FolioResult<Vec<CheckEntry>> {
    Ok(blueprint_files(dir)?
        .into_iter()
        .map(|relative| {
            let result = load_file(dir, &relative).map(|blueprint| blueprint.id);
            if let Err(err) = &result {
                tracing::debug!(path = %relative.display(), error = %err, "blueprint rejected");
            }
            CheckEntry {
                path: relative,
                result,
            }
        })
        .collect())
}

/// Sorted relative paths of the YAML files under `dir`
fn blueprint_files(dir: &Path) -> FolioResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(FolioError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let ignore = IgnorePatterns::load(dir)?;
    let mut files = Vec::new();
    collect_files(dir, dir, &ignore, &mut files)?;
    files.sort();
    Ok(files)
}

fn load_file(root: &Path, relative: &Path) -> FolioResult<Blueprint> {
    let (kind, name) = locate(relative)?;
    let path = root.join(relative);
    let content = fs::read_to_string(&path)?;
    BlueprintSet::parse_str(kind, &name, &content, &path)
}

/// Model kind and blueprint name of a path relative to the blueprint root
pub fn locate(relative: &Path) -> FolioResult<(ModelKind, String)> {
    let unknown = || FolioError::UnknownBlueprintLocation {
        file: relative.to_path_buf(),
    };

    let parts: Vec<&str> = relative
        .components()
        .map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect::<Option<_>>()
        .ok_or_else(unknown)?;

    let Some((file, dirs)) = parts.split_last() else {
        return Err(unknown());
    };
    let stem = yaml::yaml_stem(Path::new(file)).ok_or_else(unknown)?;

    match dirs {
        [] if stem == "site" => Ok((ModelKind::Site, "site".to_string())),
        [kind, rest @ ..] => {
            let kind = match *kind {
                "pages" => ModelKind::Page,
                "files" => ModelKind::File,
                "users" => ModelKind::User,
                _ => return Err(unknown()),
            };
            let mut name: Vec<&str> = rest.to_vec();
            name.push(stem);
            Ok((kind, name.join("/")))
        }
        _ => Err(unknown()),
    }
}

fn collect_files(
    root: &Path,
    current: &Path,
    ignore: &IgnorePatterns,
    files: &mut Vec<PathBuf>,
) -> FolioResult<()> {
    for entry in fs::read_dir(current)? {
        let path = entry?.path();
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.'));
        let is_dir = path.is_dir();

        if hidden || ignore.is_ignored(relative, is_dir) {
            continue;
        }

        if is_dir {
            collect_files(root, &path, ignore, files)?;
        } else if yaml::yaml_stem(&path).is_some() {
            files.push(relative.to_path_buf());
        }
    }
    Ok(())
}
