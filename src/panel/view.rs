//! View data with lazily evaluated entries

use std::fmt;

use serde_json::{Map, Value};

enum Entry<'a> {
    Value(Value),
    Lazy(Box<dyn Fn() -> Value + 'a>),
    Nested(ViewData<'a>),
}

/// Ordered view mapping. Lazy entries are only evaluated when read.
#[derive(Default)]
pub struct ViewData<'a> {
    entries: Vec<(String, Entry<'a>)>,
}

impl fmt::Debug for ViewData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, entry) in &self.entries {
            match entry {
                Entry::Value(value) => map.entry(key, value),
                Entry::Lazy(_) => map.entry(key, &"<lazy>"),
                Entry::Nested(view) => map.entry(key, view),
            };
        }
        map.finish()
    }
}

impl<'a> ViewData<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&mut self, key: String, entry: Entry<'a>) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = entry,
            None => self.entries.push((key, entry)),
        }
    }

    /// Insert or replace a value; a replaced key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.set(key.into(), Entry::Value(value.into()));
    }

    pub fn insert_lazy<F>(&mut self, key: impl Into<String>, f: F)
    where
        F: Fn() -> Value + 'a,
    {
        self.set(key.into(), Entry::Lazy(Box::new(f)));
    }

    pub fn insert_view(&mut self, key: impl Into<String>, view: ViewData<'a>) {
        self.set(key.into(), Entry::Nested(view));
    }

    /// Take over every entry of `other`, replacing existing keys.
    pub fn extend(&mut self, other: ViewData<'a>) {
        for (key, entry) in other.entries {
            self.set(key, entry);
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn is_lazy(&self, key: &str) -> bool {
        self.entries
            .iter()
            .any(|(k, entry)| k == key && matches!(entry, Entry::Lazy(_)))
    }

    pub fn nested(&self, key: &str) -> Option<&ViewData<'a>> {
        self.entries.iter().find_map(|(k, entry)| match entry {
            Entry::Nested(view) if k == key => Some(view),
            _ => None,
        })
    }

    /// Value of one entry, evaluating it if lazy
    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, entry)| resolve(entry))
    }

    /// Evaluate every entry into a plain mapping.
    pub fn resolve(&self) -> Map<String, Value> {
        self.entries
            .iter()
            .map(|(key, entry)| (key.clone(), resolve(entry)))
            .collect()
    }
}

fn resolve(entry: &Entry<'_>) -> Value {
    match entry {
        Entry::Value(value) => value.clone(),
        Entry::Lazy(f) => f(),
        Entry::Nested(view) => Value::Object(view.resolve()),
    }
}
