use super::*;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn attrs(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn keys(map: &Map<String, Value>) -> Vec<&str> {
    map.keys().map(String::as_str).collect()
}

fn button_registry() -> ComponentRegistry {
    let registry = ComponentRegistry::new();
    registry
        .register_type(
            "button",
            json!({
                "props": {
                    "icon": "page",
                    "label": {"type": "string"},
                    "size": {
                        "type": "string",
                        "default": "medium",
                        "values": ["small", "medium", "large"]
                    }
                },
                "computed": {
                    "title": "{{ label }} ({{ size }})",
                    "heading": "<{{ title }}>"
                },
                "methods": {
                    "greet": "Hello {{ 0 }}, this is {{ label }}"
                }
            }),
        )
        .unwrap();
    registry
}

#[test]
fn undefined_type_names_the_type() {
    let registry = ComponentRegistry::new();
    let err = Component::new(&registry, "card", Map::new()).unwrap_err();
    assert_eq!(err.to_string(), "Undefined component type: card");
}

#[test]
fn props_take_attrs_or_defaults() {
    let registry = button_registry();
    let button = Component::new(&registry, "button", attrs(json!({"label": "Save"}))).unwrap();

    assert_eq!(button.props()["icon"], json!("page"));
    assert_eq!(button.props()["label"], json!("Save"));
    assert_eq!(button.props()["size"], json!("medium"));
    assert_eq!(keys(button.props()), vec!["icon", "label", "size"]);
}

#[test]
fn plain_props_ignore_attrs() {
    let registry = button_registry();
    let given = attrs(json!({"label": "Save", "icon": "trash"}));
    let button = Component::new(&registry, "button", given).unwrap();
    assert_eq!(button.props()["icon"], json!("page"));
    // the attribute is still reachable, just shadowed
    assert_eq!(button.attrs()["icon"], json!("trash"));
    assert_eq!(button.get("icon"), Some(&json!("page")));
}

#[test]
fn missing_required_prop_is_named() {
    let registry = button_registry();
    let err = Component::new(&registry, "button", Map::new()).unwrap_err();
    assert!(matches!(err, ComponentError::MissingValue(ref name) if name == "label"));
    assert_eq!(err.to_string(), "Please provide a value for \"label\"");

    // null counts as not given
    let err = Component::new(&registry, "button", attrs(json!({"label": null}))).unwrap_err();
    assert!(matches!(err, ComponentError::MissingValue(_)));
}

#[test]
fn invalid_prop_value_is_named() {
    let registry = button_registry();
    let err = Component::new(&registry, "button", attrs(json!({"label": 3}))).unwrap_err();
    assert_eq!(err.to_string(), "Invalid value for \"label\"");

    let given = attrs(json!({"label": "Save", "size": "huge"}));
    let err = Component::new(&registry, "button", given).unwrap_err();
    assert!(matches!(err, ComponentError::InvalidValue(ref name) if name == "size"));
}

#[test]
fn computed_reads_props_and_earlier_computed() {
    let registry = button_registry();
    let button = Component::new(&registry, "button", attrs(json!({"label": "Save"}))).unwrap();
    assert_eq!(button.get("title"), Some(&json!("Save (medium)")));
    assert_eq!(button.get("heading"), Some(&json!("<Save (medium)>")));
}

#[test]
fn lookup_precedence_and_slots() {
    let registry = button_registry();
    let given = attrs(json!({"label": "Save", "extra": 1}));
    let button = Component::new(&registry, "button", given).unwrap();

    assert_eq!(button.slot("title"), Some(Slot::Computed));
    assert_eq!(button.slot("label"), Some(Slot::Prop));
    assert_eq!(button.slot("greet"), Some(Slot::Method));
    assert_eq!(button.slot("extra"), Some(Slot::Attr));
    assert_eq!(button.slot("nothing"), None);

    assert_eq!(
        button.call("greet", &[json!("Ada")]),
        Some(json!("Hello Ada, this is Save"))
    );
    assert_eq!(button.call("extra", &[]), Some(json!(1)));
    assert_eq!(button.call("nothing", &[]), None);
    assert_eq!(button.get("greet"), None);

    assert!(button.has("extra"));
    assert!(!button.has("greet"));
}

#[test]
fn to_array_sorts_and_prefers_props() {
    let registry = button_registry();
    let given = attrs(json!({"label": "Save", "icon": "trash", "z": 0}));
    let button = Component::new(&registry, "button", given).unwrap();
    let array = button.to_array();

    assert_eq!(
        keys(&array),
        vec!["heading", "icon", "label", "size", "title", "z"]
    );
    assert_eq!(array["icon"], json!("page"));
}

#[test]
fn custom_to_array_overrides() {
    let registry = ComponentRegistry::new();
    let badge = json!({
        "props": {"text": {"type": "string", "default": "new"}},
        "toArray": ["text", "missing"]
    });
    registry.register_type("badge", badge).unwrap();
    let badge = Component::new(&registry, "badge", Map::new()).unwrap();
    assert_eq!(
        Value::Object(badge.to_array()),
        json!({"text": "new", "missing": null})
    );
}

#[test]
fn native_definition_with_closures() {
    let definition = Definition::new()
        .prop_fn("count", |_, attr| match attr {
            Some(Value::Number(n)) => Ok(json!(n.as_i64().unwrap_or(0) * 2)),
            Some(_) => Err(PropError::InvalidType { expected: "number" }),
            None => Err(PropError::Missing),
        })
        .computed("label", |c| {
            let count = c.get("count").unwrap_or(&Value::Null);
            json!(format!("{count} items"))
        })
        .method("add", |c, args| {
            let base = c.get("count").and_then(Value::as_i64).unwrap_or(0);
            json!(base + args.first().and_then(Value::as_i64).unwrap_or(0))
        });

    let given = attrs(json!({"count": 2}));
    let counter = Component::from_definition("counter", definition, given).unwrap();
    assert_eq!(counter.get("count"), Some(&json!(4)));
    assert_eq!(counter.get("label"), Some(&json!("4 items")));
    assert_eq!(counter.call("add", &[json!(3)]), Some(json!(7)));
}

#[test]
fn recompute_replaces_stale_value() {
    let definition = Definition::new()
        .prop("n", json!(1))
        .computed("seen", |c| json!(c.computed().contains_key("seen")));
    let mut component = Component::from_definition("tracker", definition, Map::new()).unwrap();

    assert_eq!(component.get("seen"), Some(&json!(false)));
    assert_eq!(component.recompute("seen"), Some(&json!(false)));
    assert_eq!(component.recompute("unknown"), None);
}

#[test]
fn extends_merges_defaults_base_and_definition() {
    let defaults = json!({"props": {"theme": "light", "icon": "none"}});
    let registry = ComponentRegistry::new().with_defaults(defaults);
    let button = json!({"props": {"icon": "page", "label": "Button"}});
    registry.register_type("button", button).unwrap();
    let delete = json!({"extends": "button", "props": {"icon": "trash"}});
    registry.register_type("delete", delete).unwrap();

    let delete = Component::new(&registry, "delete", Map::new()).unwrap();
    assert_eq!(
        Value::Object(delete.props().clone()),
        json!({"theme": "light", "icon": "trash", "label": "Button"})
    );

    let err = {
        registry
            .register_type("broken", json!({"extends": "missing"}))
            .unwrap();
        Component::new(&registry, "broken", Map::new()).unwrap_err()
    };
    assert!(matches!(err, ComponentError::UndefinedType(ref name) if name == "missing"));
}

#[test]
fn mixins_sit_under_options_and_unknown_are_skipped() {
    let registry = ComponentRegistry::new();
    let sizeable = json!({"props": {"size": "medium", "icon": "mixin"}});
    registry.register_mixin("sizeable", sizeable).unwrap();
    let card = json!({"mixins": ["sizeable", "nowhere"], "props": {"icon": "card"}});
    registry.register_type("card", card).unwrap();

    let card = Component::new(&registry, "card", Map::new()).unwrap();
    assert_eq!(card.props()["icon"], json!("card"));
    assert_eq!(card.props()["size"], json!("medium"));
    assert_eq!(card.options()["mixins"], json!(["sizeable", "nowhere"]));
}

#[test]
fn file_definitions_load_lazily_and_invalidate() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("note.yml");
    fs::write(&path, "props:\n  text: first\n").unwrap();

    let registry = ComponentRegistry::new();
    registry.register_type_file("note", &path).unwrap();

    let note = Component::new(&registry, "note", Map::new()).unwrap();
    assert_eq!(note.props()["text"], json!("first"));

    fs::write(&path, "props:\n  text: second\n").unwrap();
    let cached = Component::new(&registry, "note", Map::new()).unwrap();
    assert_eq!(cached.props()["text"], json!("first"));

    assert!(registry.invalidate("note").unwrap());
    assert!(!registry.invalidate("note").unwrap());
    let reloaded = Component::new(&registry, "note", Map::new()).unwrap();
    assert_eq!(reloaded.props()["text"], json!("second"));
}

#[test]
fn missing_definition_file_is_an_error() {
    let registry = ComponentRegistry::new();
    registry
        .register_type_file("ghost", "/nonexistent/ghost.yml")
        .unwrap();
    let err = Component::new(&registry, "ghost", Map::new()).unwrap_err();
    assert!(matches!(err, ComponentError::MissingDefinition { .. }));
}

#[test]
fn invalid_definition_yaml_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.yml");
    fs::write(&path, "props: [unclosed\n").unwrap();

    let registry = ComponentRegistry::new();
    registry.register_type_file("bad", &path).unwrap();
    let err = registry.load("bad").unwrap_err();
    assert!(matches!(err, ComponentError::InvalidDefinition { ref name, .. } if name == "bad"));
}

#[test]
fn load_dir_registers_types_and_mixins() {
    let dir = TempDir::new().unwrap();
    let button = "mixins: [sizeable]\nprops:\n  label: Go\n";
    fs::write(dir.path().join("button.yml"), button).unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
    fs::write(dir.path().join(".hidden.yml"), "props: {}").unwrap();
    let mixins = dir.path().join(MIXINS_DIR);
    fs::create_dir(&mixins).unwrap();
    fs::write(mixins.join("sizeable.yml"), "props:\n  size: small\n").unwrap();

    let registry = ComponentRegistry::new();
    assert_eq!(registry.load_dir(dir.path()).unwrap(), 2);
    assert_eq!(registry.types().unwrap(), vec!["button".to_string()]);

    let button = Component::new(&registry, "button", Map::new()).unwrap();
    assert_eq!(button.props()["size"], json!("small"));

    registry.clear().unwrap();
    assert!(!registry.has_type("button").unwrap());
}

#[test]
fn typed_prop_checks_declared_type() {
    let empty = Component::from_definition("empty", Definition::new(), Map::new()).unwrap();
    let integer = typed_prop(PropType::Integer, Some(json!(1)), None);
    assert_eq!(integer(&empty, None), Ok(json!(1)));
    assert_eq!(integer(&empty, Some(&json!(4))), Ok(json!(4)));
    let expected = "integer";
    assert_eq!(
        integer(&empty, Some(&json!(1.5))),
        Err(PropError::InvalidType { expected })
    );

    let required = typed_prop(PropType::Any, None, None);
    assert_eq!(required(&empty, None), Err(PropError::Missing));
}

#[test]
fn prop_functions_see_attrs_and_earlier_props() {
    let definition = Definition::new()
        .prop("unit", json!("px"))
        .prop_fn("width", |c, attr| {
            let unit = c.get("unit").and_then(Value::as_str).unwrap_or("");
            let size = attr.or_else(|| c.attrs().get("size")).cloned();
            let size = size.unwrap_or(json!(0));
            Ok(json!(format!("{size}{unit}")))
        })
        .prop_fn("later", |c, _| Ok(json!(c.props().contains_key("later"))));

    let given = attrs(json!({"size": 40}));
    let image = Component::from_definition("image", definition, given).unwrap();
    assert_eq!(image.get("width"), Some(&json!("40px")));
    assert_eq!(image.get("later"), Some(&json!(false)));
}

#[test]
fn unknown_prop_type_is_rejected() {
    let definition = json!({"props": {"a": {"type": "color"}}});
    let err = Definition::from_value("x", definition).unwrap_err();
    assert!(matches!(err, ComponentError::InvalidDefinition { .. }));
}
