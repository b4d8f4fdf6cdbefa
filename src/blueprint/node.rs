//! Node properties
//!
//! Small typed wrappers around single configuration values. Each has a
//! `factory` that normalizes the raw value and a `render` that projects it
//! for the current render pass.

use std::collections::BTreeMap;

use serde_json::Value;

use super::error::{BlueprintError, BlueprintResult};
use crate::i18n::{I18n, FALLBACK_LOCALE};
use crate::render::RenderContext;

/// Wildcard key of a translation map
pub const WILDCARD: &str = "*";

/// A configuration value with a plain representation
pub trait Property {
    fn value(&self) -> Value;

    fn as_text(&self) -> String {
        match self.value() {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// A node property rendered against the current model
pub trait NodeProperty {
    type Output;

    fn render(&self, ctx: &RenderContext<'_>) -> Self::Output;
}

/// Translatable string: locale (or `*`) -> text or dictionary key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeI18n {
    pub translations: BTreeMap<String, String>,
}

impl NodeI18n {
    pub fn new<I, K, V>(translations: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            translations: translations
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Single wildcard translation
    pub fn wildcard(value: impl Into<String>) -> Self {
        Self::new([(WILDCARD, value.into())])
    }

    /// `null` and `false` produce no node; a scalar becomes the wildcard entry.
    pub fn factory(translations: Value) -> BlueprintResult<Option<Self>> {
        match translations {
            Value::Null | Value::Bool(false) => Ok(None),
            Value::String(s) => Ok(Some(Self::wildcard(s))),
            Value::Number(n) => Ok(Some(Self::wildcard(n.to_string()))),
            Value::Object(map) => {
                let mut translations = BTreeMap::new();
                for (locale, value) in map {
                    let text = match value {
                        Value::String(s) => s,
                        Value::Number(n) => n.to_string(),
                        _ => return Err(BlueprintError::invalid_type("NodeI18n", locale, "string")),
                    };
                    translations.insert(locale, text);
                }
                Ok(Some(Self { translations }))
            }
            Value::Bool(true) | Value::Array(_) => Err(BlueprintError::invalid(
                "NodeI18n",
                "expected a string or a map of translations",
            )),
        }
    }

    /// Exact locale, then the wildcard looked up in the locale's dictionary
    /// (or taken literally), then English.
    pub fn translate(&self, i18n: &I18n) -> Option<String> {
        let locale = i18n.locale();

        if let Some(text) = self.translations.get(locale) {
            return Some(text.clone());
        }

        if let Some(key) = self.translations.get(WILDCARD) {
            return Some(i18n.translation(locale, key).unwrap_or(key).to_string());
        }

        self.translations.get(FALLBACK_LOCALE).cloned()
    }
}

impl NodeProperty for NodeI18n {
    type Output = Option<String>;

    fn render(&self, ctx: &RenderContext<'_>) -> Option<String> {
        self.translate(ctx.i18n)
    }
}

/// Translatable text with `{{ }}` placeholders resolved against the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeText {
    pub text: NodeI18n,
}

impl NodeText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: NodeI18n::wildcard(text),
        }
    }

    pub fn factory(value: Value) -> BlueprintResult<Option<Self>> {
        Ok(NodeI18n::factory(value)?.map(|text| Self { text }))
    }
}

impl NodeProperty for NodeText {
    type Output = Option<String>;

    fn render(&self, ctx: &RenderContext<'_>) -> Option<String> {
        self.text
            .render(ctx)
            .map(|text| ctx.model.to_safe_string(&text))
    }
}

/// Text rendered to HTML through the model's kirbytext formatter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeKirbytext {
    pub text: NodeText,
}

impl NodeKirbytext {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: NodeText::new(text),
        }
    }

    pub fn factory(value: Value) -> BlueprintResult<Option<Self>> {
        Ok(NodeText::factory(value)?.map(|text| Self { text }))
    }
}

impl NodeProperty for NodeKirbytext {
    type Output = Option<String>;

    fn render(&self, ctx: &RenderContext<'_>) -> Option<String> {
        self.text.render(ctx).map(|text| ctx.model.kirbytext(&text))
    }
}

/// A URL option such as a blueprint's `preview`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeUrl {
    /// Template; `None` means the model's own URL
    pub url: Option<String>,
    pub disabled: bool,
}

impl NodeUrl {
    pub fn factory(value: Value) -> BlueprintResult<Self> {
        match value {
            Value::Null | Value::Bool(true) => Ok(Self::default()),
            Value::Bool(false) => Ok(Self {
                url: None,
                disabled: true,
            }),
            Value::String(url) => Ok(Self {
                url: Some(url),
                disabled: false,
            }),
            _ => Err(BlueprintError::invalid("NodeUrl", "expected a boolean or a URL template")),
        }
    }
}

impl NodeProperty for NodeUrl {
    type Output = Value;

    /// `false` when disabled, the resolved URL otherwise
    fn render(&self, ctx: &RenderContext<'_>) -> Value {
        if self.disabled {
            return Value::Bool(false);
        }
        match &self.url {
            Some(template) => Value::String(ctx.model.to_safe_string(template)),
            None => Value::String(ctx.model.url()),
        }
    }
}

/// Declare a string enum property with a `factory` and [`Property`] impl.
macro_rules! enum_property {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const VALUES: &'static [&'static str] = &[$($value),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }

            pub fn factory(value: serde_json::Value) -> $crate::blueprint::BlueprintResult<Self> {
                let serde_json::Value::String(raw) = value else {
                    return Err($crate::blueprint::BlueprintError::invalid(
                        stringify!($name),
                        "expected a string",
                    ));
                };
                match raw.as_str() {
                    $($value => Ok($name::$variant),)+
                    other => Err($crate::blueprint::BlueprintError::invalid(
                        stringify!($name),
                        format!("'{other}' is not one of {}", Self::VALUES.join(", ")),
                    )),
                }
            }
        }

        impl $crate::blueprint::Property for $name {
            fn value(&self) -> serde_json::Value {
                serde_json::Value::String(self.as_str().to_string())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use enum_property;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::memory::MemoryStore;
    use serde_json::json;

    const FIXTURE: &str = r#"
site:
  title: Example
  url: https://example.com
pages:
  - slug: blog
    title: Blog
"#;

    fn store() -> MemoryStore {
        MemoryStore::from_yaml(FIXTURE).unwrap()
    }

    #[test]
    fn i18n_factory_shapes() {
        assert_eq!(NodeI18n::factory(Value::Null).unwrap(), None);
        assert_eq!(NodeI18n::factory(json!(false)).unwrap(), None);
        assert_eq!(
            NodeI18n::factory(json!("Title")).unwrap(),
            Some(NodeI18n::wildcard("Title"))
        );
        assert_eq!(
            NodeI18n::factory(json!({"en": "Title", "de": "Titel"})).unwrap(),
            Some(NodeI18n::new([("de", "Titel"), ("en", "Title")]))
        );
        assert!(NodeI18n::factory(json!(true)).is_err());
        assert!(NodeI18n::factory(json!({"en": ["nested"]})).is_err());
    }

    #[test]
    fn i18n_exact_locale_wins() {
        let node = NodeI18n::new([("de", "Titel"), ("*", "title"), ("en", "Title")]);
        let i18n = I18n::new("de");
        assert_eq!(node.translate(&i18n).as_deref(), Some("Titel"));
    }

    #[test]
    fn i18n_wildcard_uses_locale_dictionary() {
        let node = NodeI18n::wildcard("field.title");
        let i18n = I18n::new("de").with_dictionary("de", [("field.title", "Titel")]);
        assert_eq!(node.translate(&i18n).as_deref(), Some("Titel"));
    }

    #[test]
    fn i18n_wildcard_falls_back_to_literal() {
        let node = NodeI18n::wildcard("field.title");
        let i18n = I18n::new("de").with_dictionary("en", [("field.title", "Title")]);
        // only the current locale's dictionary is consulted
        assert_eq!(node.translate(&i18n).as_deref(), Some("field.title"));
    }

    #[test]
    fn i18n_falls_back_to_english_then_absent() {
        let english = NodeI18n::new([("en", "Title"), ("fr", "Titre")]);
        assert_eq!(
            english.translate(&I18n::new("de")).as_deref(),
            Some("Title")
        );

        let french = NodeI18n::new([("fr", "Titre")]);
        assert_eq!(french.translate(&I18n::new("de")), None);
    }

    #[test]
    fn text_resolves_placeholders() {
        let store = store();
        let page = store.page("blog").unwrap();
        let i18n = I18n::default();
        let ctx = RenderContext::new(&page, &i18n);

        let text = NodeText::new("About {{ page.title }}");
        assert_eq!(text.render(&ctx).as_deref(), Some("About Blog"));

        let kirbytext = NodeKirbytext::new("Hello {{ page.title }}");
        assert_eq!(kirbytext.render(&ctx).as_deref(), Some("<p>Hello Blog</p>"));
    }

    #[test]
    fn url_renders_model_url_template_or_false() {
        let store = store();
        let page = store.page("blog").unwrap();
        let i18n = I18n::default();
        let ctx = RenderContext::new(&page, &i18n);

        assert_eq!(
            NodeUrl::factory(json!(true)).unwrap().render(&ctx),
            json!("https://example.com/blog")
        );
        assert_eq!(
            NodeUrl::factory(json!("/preview/{{ page.id }}"))
                .unwrap()
                .render(&ctx),
            json!("/preview/blog")
        );
        assert_eq!(
            NodeUrl::factory(json!(false)).unwrap().render(&ctx),
            json!(false)
        );
        assert!(NodeUrl::factory(json!(1)).is_err());
    }
}
