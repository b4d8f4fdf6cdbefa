use super::*;
use crate::i18n::I18n;
use crate::model::memory::MemoryStore;
use serde_json::json;

const FIXTURE: &str = r#"
site:
  title: Example
  url: https://example.com
pages:
  - slug: notes
    title: Notes
"#;

fn store() -> MemoryStore {
    MemoryStore::from_yaml(FIXTURE).unwrap()
}

fn keys(map: &Map<String, Value>) -> Vec<&str> {
    map.keys().map(String::as_str).collect()
}

#[test]
fn type_defaults_to_id() {
    let field = field_from("headline", Value::Null).unwrap();
    assert_eq!(field.id(), "headline");
    assert_eq!(field.field_type(), "headline");

    let field = field_from("title", json!({"type": "text"})).unwrap();
    assert_eq!(field.id(), "title");
    assert_eq!(field.field_type(), "text");
}

#[test]
fn unknown_type_is_an_error() {
    let err = field_from("title", Value::Null).unwrap_err();
    assert_eq!(
        err,
        BlueprintError::UnknownFieldType {
            id: "title".into(),
            kind: "title".into(),
        }
    );
}

#[test]
fn unknown_property_is_an_error() {
    let err = field_from("title", json!({"type": "text", "colour": "red"})).unwrap_err();
    assert_eq!(
        err,
        BlueprintError::UnknownProperty {
            node: "TextField",
            property: "colour".into(),
        }
    );
}

#[test]
fn derived_render_is_superset_of_base() {
    let store = store();
    let page = store.page("notes").unwrap();
    let i18n = I18n::default();
    let ctx = RenderContext::new(&page, &i18n);

    let number = Factory::make::<NumberField>(
        match json!({"id": "price", "type": "number", "min": 1}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        },
    )
    .unwrap();
    let range = field_from("price", json!({"type": "range", "min": 1})).unwrap();

    let base = number.render(&ctx);
    let derived = range.render(&ctx);

    for key in keys(&base) {
        assert!(derived.contains_key(key), "missing {key}");
    }
    assert_eq!(derived["type"], json!("range"));
    assert_eq!(derived["tooltip"], json!(true));
    assert_eq!(derived["max"], json!(100.0));
    assert_eq!(derived["min"], json!(1.0));
}

#[test]
fn base_render_resolves_label_and_help() {
    let store = store();
    let page = store.page("notes").unwrap();
    let i18n = I18n::new("de");
    let ctx = RenderContext::new(&page, &i18n);

    let field = field_from(
        "intro",
        json!({
            "type": "headline",
            "label": {"en": "Intro", "de": "Einleitung"},
            "help": "About {{ page.title }}"
        }),
    )
    .unwrap();
    let rendered = field.render(&ctx);

    assert_eq!(
        keys(&rendered),
        vec!["help", "id", "label", "name", "type", "width", "when", "numbered"]
    );
    assert_eq!(rendered["label"], json!("Einleitung"));
    assert_eq!(rendered["help"], json!("About Notes"));
    assert_eq!(rendered["numbered"], json!(true));
    assert_eq!(rendered["width"], json!("1/1"));
}

#[test]
fn text_field_validates_through_value() {
    let definition = json!({"type": "text", "required": true, "maxlength": 5});
    let field = field_from("title", definition).unwrap();
    assert_eq!(field.validate(&json!("")), Err(ValueError::Required));
    assert_eq!(
        field.validate(&json!("too long")),
        Err(ValueError::TooLong { max: 5 })
    );
    assert_eq!(field.submit(json!(" ok ")), Ok(json!("ok")));

    let headline = field_from("headline", Value::Null).unwrap();
    assert!(headline.value().is_none());
    assert_eq!(headline.validate(&json!(42)), Ok(()));
}

#[test]
fn text_field_defaults() {
    let store = store();
    let page = store.page("notes").unwrap();
    let i18n = I18n::default();
    let ctx = RenderContext::new(&page, &i18n);

    let field = field_from("title", json!({"type": "text"})).unwrap();
    let rendered = field.render(&ctx);
    assert_eq!(rendered["counter"], json!(true));
    assert_eq!(rendered["spellcheck"], json!(false));
    assert_eq!(rendered["translate"], json!(true));
    assert_eq!(rendered["autofocus"], json!(false));
    assert_eq!(rendered["maxlength"], Value::Null);
}

#[test]
fn blocks_fieldsets_polyfill() {
    let props = BlocksField::polyfill(match json!({"fieldsets": ["text"]}) {
        Value::Object(map) => map,
        _ => unreachable!(),
    });
    assert_eq!(props.get("types"), Some(&json!(["text"])));
    assert!(!props.contains_key("fieldsets"));

    let field = Factory::make::<BlocksField>(BlocksField::polyfill(
        match json!({"id": "body", "fieldsets": ["text", "image"]}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        },
    ))
    .unwrap();
    assert_eq!(field.types().types(), vec!["text", "image"]);
}

#[test]
fn blocks_field_defaults() {
    let store = store();
    let page = store.page("notes").unwrap();
    let i18n = I18n::default();
    let ctx = RenderContext::new(&page, &i18n);

    let field = field_from("blocks", Value::Null).unwrap();
    let rendered = field.render(&ctx);
    assert_eq!(rendered["group"], json!("blocks"));
    assert_eq!(rendered["empty"], Value::Null);
    assert_eq!(rendered["max"], Value::Null);

    let blocks = Factory::make::<BlocksField>(match json!({"id": "blocks"}) {
        Value::Object(map) => map,
        _ => unreachable!(),
    })
    .unwrap();
    assert!(blocks.types.is_none());
    assert_eq!(blocks.types().types(), DEFAULT_TYPES.to_vec());
    assert!(!blocks.pretty);
}

#[test]
fn writer_defaults_fill_marks_and_nodes() {
    let store = store();
    let page = store.page("notes").unwrap();
    let i18n = I18n::default();
    let ctx = RenderContext::new(&page, &i18n);

    let field = field_from("writer", json!({"marks": false})).unwrap();
    let rendered = field.render(&ctx);
    assert_eq!(rendered["inline"], json!(false));
    assert_eq!(rendered["marks"], json!(false));
    assert_eq!(rendered["nodes"], Nodes::default().render());
}

#[test]
fn fields_from_map_and_list() {
    let fields = fields_from(json!({"headline": true, "body": {"type": "writer"}})).unwrap();
    let ids: Vec<&str> = fields.iter().map(|f| f.id()).collect();
    assert_eq!(ids, vec!["headline", "body"]);

    let fields = fields_from(json!(["headline", "blocks"])).unwrap();
    assert_eq!(fields.len(), 2);
    assert!(fields_from(json!("headline")).is_err());
}

#[test]
fn extend_keeps_base_positions() {
    let base = match json!({"a": 1, "b": 2}) {
        Value::Object(map) => map,
        _ => unreachable!(),
    };
    let merged = extend(base, [("b", json!(3)), ("c", json!(4))]);
    assert_eq!(keys(&merged), vec!["a", "b", "c"]);
    assert_eq!(merged["b"], json!(3));
}
