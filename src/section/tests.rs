use super::*;
use crate::i18n::I18n;
use crate::model::memory::MemoryStore;
use serde_json::json;

const FIXTURE: &str = r#"
site:
  title: Example
  url: https://example.com
pages:
  - slug: about
    title: About us
    files:
      - filename: team.jpg
"#;

fn keys(map: &Map<String, Value>) -> Vec<&str> {
    map.keys().map(String::as_str).collect()
}

#[test]
fn models_section_defaults_are_unset() {
    let section = ModelsSection::new("test", "pages");

    assert_eq!(section.columns, None);
    assert_eq!(section.empty, None);
    assert_eq!(section.help, None);
    assert_eq!(section.image, None);
    assert_eq!(section.info, None);
    assert_eq!(section.label, None);
    assert_eq!(section.layout, None);
    assert_eq!(section.parent, None);
    assert_eq!(section.size, None);
    assert_eq!(section.text, None);
}

#[test]
fn type_defaults_to_id() {
    let section = section_from("info", json!({"text": "Hello"})).unwrap();
    assert_eq!(section.id(), "info");
    assert_eq!(section.section_type(), "info");

    let err = section_from("gallery", Value::Null).unwrap_err();
    assert_eq!(
        err,
        BlueprintError::UnknownSectionType {
            id: "gallery".into(),
            kind: "gallery".into(),
        }
    );
}

#[test]
fn info_section_renders_kirbytext_and_theme() {
    let store = MemoryStore::from_yaml(FIXTURE).unwrap();
    let page = store.page("about").unwrap();
    let i18n = I18n::default();
    let ctx = RenderContext::new(&page, &i18n);

    let section = section_from(
        "note",
        json!({"type": "info", "label": "Note", "text": "Welcome to {{ page.title }}", "theme": "positive"}),
    )
    .unwrap();
    let rendered = section.render(&ctx);

    assert_eq!(
        keys(&rendered),
        vec!["id", "type", "help", "label", "text", "theme"]
    );
    assert_eq!(rendered["text"], json!("<p>Welcome to About us</p>"));
    assert_eq!(rendered["theme"], json!("positive"));
    assert_eq!(rendered["help"], Value::Null);
}

#[test]
fn theme_rejects_unknown_values() {
    let err = section_from("note", json!({"type": "info", "theme": "purple"})).unwrap_err();
    assert!(matches!(err, BlueprintError::Invalid { node: "InfoSectionTheme", .. }));
}

#[test]
fn files_section_extends_models_section() {
    let store = MemoryStore::from_yaml(FIXTURE).unwrap();
    let page = store.page("about").unwrap();
    let i18n = I18n::default();
    let ctx = RenderContext::new(&page, &i18n);

    let section = section_from(
        "gallery",
        json!({"type": "files", "layout": "cards", "size": "small", "image": {"query": "file", "cover": true}, "template": "image"}),
    )
    .unwrap();
    let rendered = section.render(&ctx);

    assert_eq!(
        keys(&rendered),
        vec![
            "id", "type", "columns", "empty", "help", "image", "info", "label", "layout", "parent",
            "size", "text", "template"
        ]
    );
    assert_eq!(rendered["layout"], json!("cards"));
    assert_eq!(rendered["size"], json!("small"));
    assert_eq!(rendered["template"], json!("image"));
    assert_eq!(rendered["image"]["cover"], json!(true));
}

#[test]
fn disabled_image_renders_false() {
    let store = MemoryStore::from_yaml(FIXTURE).unwrap();
    let page = store.page("about").unwrap();
    let i18n = I18n::default();
    let ctx = RenderContext::new(&page, &i18n);

    let section = section_from("subpages", json!({"type": "pages", "image": false})).unwrap();
    let rendered = section.render(&ctx);
    assert_eq!(rendered["image"], json!(false));
    assert_eq!(rendered["status"], json!("all"));
    assert_eq!(rendered["templates"], Value::Null);
}

#[test]
fn fields_section_renders_fields_by_id() {
    let store = MemoryStore::from_yaml(FIXTURE).unwrap();
    let page = store.page("about").unwrap();
    let i18n = I18n::default();
    let ctx = RenderContext::new(&page, &i18n);

    let section = section_from(
        "content",
        json!({"type": "fields", "fields": {"headline": true, "summary": {"type": "text"}}}),
    )
    .unwrap();
    assert_eq!(section.fields().len(), 2);

    let rendered = section.render(&ctx);
    let fields = rendered["fields"].as_object().unwrap();
    assert_eq!(keys(fields), vec!["headline", "summary"]);
    assert_eq!(fields["summary"]["type"], json!("text"));
}
