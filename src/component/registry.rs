//! Component definition registry
//!
//! Types and mixins are registered inline or as paths to YAML files. File
//! definitions are read on first use and cached until invalidated.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;

use super::error::{ComponentError, ComponentResult};
use crate::error::{FolioError, FolioResult};
use crate::merge::{replace_all, replace_recursive};
use crate::yaml;

/// Subdirectory of a component directory holding mixins
pub const MIXINS_DIR: &str = "mixins";

#[derive(Debug, Clone)]
enum Source {
    Inline(Value),
    File {
        path: PathBuf,
        loaded: Option<Value>,
    },
}

#[derive(Debug, Clone, Copy)]
enum Kind {
    Type,
    Mixin,
}

#[derive(Debug, Default)]
struct Definitions {
    types: HashMap<String, Source>,
    mixins: HashMap<String, Source>,
}

impl Definitions {
    fn sources(&mut self, kind: Kind) -> &mut HashMap<String, Source> {
        match kind {
            Kind::Type => &mut self.types,
            Kind::Mixin => &mut self.mixins,
        }
    }
}

#[derive(Debug, Default)]
pub struct ComponentRegistry {
    defaults: Value,
    inner: RwLock<Definitions>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options every definition is merged on top of
    pub fn with_defaults(mut self, defaults: Value) -> Self {
        self.defaults = defaults;
        self
    }

    fn read(&self) -> ComponentResult<RwLockReadGuard<'_, Definitions>> {
        self.inner
            .read()
            .map_err(|_| ComponentError::RegistryPoisoned)
    }

    fn write(&self) -> ComponentResult<RwLockWriteGuard<'_, Definitions>> {
        self.inner
            .write()
            .map_err(|_| ComponentError::RegistryPoisoned)
    }

    fn register(&self, kind: Kind, name: &str, source: Source) -> ComponentResult<()> {
        self.write()?.sources(kind).insert(name.to_string(), source);
        Ok(())
    }

    pub fn register_type(&self, name: &str, definition: Value) -> ComponentResult<()> {
        self.register(Kind::Type, name, Source::Inline(definition))
    }

    pub fn register_type_file(&self, name: &str, path: impl Into<PathBuf>) -> ComponentResult<()> {
        let path = path.into();
        self.register(Kind::Type, name, Source::File { path, loaded: None })
    }

    pub fn register_mixin(&self, name: &str, definition: Value) -> ComponentResult<()> {
        self.register(Kind::Mixin, name, Source::Inline(definition))
    }

    pub fn register_mixin_file(&self, name: &str, path: impl Into<PathBuf>) -> ComponentResult<()> {
        let path = path.into();
        self.register(Kind::Mixin, name, Source::File { path, loaded: None })
    }

    pub fn has_type(&self, name: &str) -> ComponentResult<bool> {
        Ok(self.read()?.types.contains_key(name))
    }

    /// Registered type names, sorted
    pub fn types(&self) -> ComponentResult<Vec<String>> {
        let mut names: Vec<String> = self.read()?.types.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn resolve(&self, kind: Kind, name: &str) -> ComponentResult<Option<Value>> {
        {
            let inner = self.read()?;
            let sources = match kind {
                Kind::Type => &inner.types,
                Kind::Mixin => &inner.mixins,
            };
            match sources.get(name) {
                None => return Ok(None),
                Some(Source::Inline(value)) | Some(Source::File { loaded: Some(value), .. }) => {
                    return Ok(Some(value.clone()))
                }
                Some(Source::File { loaded: None, .. }) => {}
            }
        }

        let mut inner = self.write()?;
        match inner.sources(kind).get_mut(name) {
            None => Ok(None),
            Some(Source::Inline(value)) => Ok(Some(value.clone())),
            Some(Source::File { path, loaded }) => {
                if let Some(value) = loaded {
                    return Ok(Some(value.clone()));
                }
                let value = read_definition(name, path)?;
                tracing::debug!(name, path = %path.display(), "component definition loaded");
                *loaded = Some(value.clone());
                Ok(Some(value))
            }
        }
    }

    /// Definition of a type, read from disk the first time
    pub fn load(&self, component_type: &str) -> ComponentResult<Value> {
        self.resolve(Kind::Type, component_type)?
            .ok_or_else(|| ComponentError::UndefinedType(component_type.to_string()))
    }

    /// Full options of a type: `defaults <- extends <- definition`, then
    /// each named mixin underneath (`mixin <- options`).
    pub fn setup(&self, component_type: &str) -> ComponentResult<Value> {
        let definition = self.load(component_type)?;

        let mut options = match definition.get("extends").and_then(Value::as_str) {
            Some(base) => {
                let base = self.load(base)?;
                replace_all([&self.defaults, &base, &definition])
            }
            None => replace_recursive(&self.defaults, &definition),
        };

        let mixins: Vec<String> = options
            .get("mixins")
            .and_then(Value::as_array)
            .map(|names| {
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        for mixin in mixins {
            match self.resolve(Kind::Mixin, &mixin)? {
                Some(mixin) => options = replace_recursive(&mixin, &options),
                None => tracing::warn!(component = component_type, %mixin, "unknown mixin skipped"),
            }
        }
        Ok(options)
    }

    /// Forget the cached contents of a file definition (type or mixin).
    ///
    /// Returns whether a cached definition was dropped.
    pub fn invalidate(&self, name: &str) -> ComponentResult<bool> {
        let mut inner = self.write()?;
        let mut dropped = false;
        for kind in [Kind::Type, Kind::Mixin] {
            if let Some(Source::File { loaded, .. }) = inner.sources(kind).get_mut(name) {
                dropped |= loaded.take().is_some();
            }
        }
        Ok(dropped)
    }

    /// Remove every registered type and mixin.
    pub fn clear(&self) -> ComponentResult<()> {
        let mut inner = self.write()?;
        inner.types.clear();
        inner.mixins.clear();
        Ok(())
    }

    /// Register `<dir>/*.yml` as types and `<dir>/mixins/*.yml` as mixins.
    ///
    /// Files are only read when first used. Returns the number of
    /// definitions registered.
    pub fn load_dir(&self, dir: &Path) -> FolioResult<usize> {
        if !dir.is_dir() {
            return Err(FolioError::DirectoryNotFound {
                path: dir.to_path_buf(),
            });
        }

        let mut count = 0;
        for (name, path) in yaml_files(dir)? {
            self.register_type_file(&name, path)?;
            count += 1;
        }

        let mixins = dir.join(MIXINS_DIR);
        if mixins.is_dir() {
            for (name, path) in yaml_files(&mixins)? {
                self.register_mixin_file(&name, path)?;
                count += 1;
            }
        }

        tracing::debug!(dir = %dir.display(), count, "component definitions registered");
        Ok(count)
    }
}

fn read_definition(name: &str, path: &Path) -> ComponentResult<Value> {
    if !path.is_file() {
        return Err(ComponentError::MissingDefinition {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    yaml::parse(&content, path).map_err(|e| ComponentError::InvalidDefinition {
        name: name.to_string(),
        message: e.to_string(),
    })
}

/// Visible YAML files directly inside `dir`, sorted by name
fn yaml_files(dir: &Path) -> FolioResult<Vec<(String, PathBuf)>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(stem) = yaml::yaml_stem(&path) else {
            continue;
        };
        if stem.starts_with('.') {
            continue;
        }
        files.push((stem.to_string(), path.clone()));
    }
    files.sort();
    Ok(files)
}
