use super::*;
use crate::blueprint::ModelOption;
use crate::i18n::I18n;
use crate::model::memory::MemoryStore;
use serde_json::json;

const FIXTURE: &str = r#"
site:
  title: Example
  url: https://example.com
pages:
  - slug: blog
    title: Blog
    files:
      - filename: cover.jpg
"#;

fn keys(map: &Map<String, Value>) -> Vec<&str> {
    map.keys().map(String::as_str).collect()
}

#[test]
fn ids_follow_kind_and_name() {
    assert_eq!(Blueprint::id_for(ModelKind::Site, "site"), "site");
    assert_eq!(Blueprint::id_for(ModelKind::Page, "blog"), "pages/blog");
    assert_eq!(Blueprint::id_for(ModelKind::File, "image"), "files/image");
    assert_eq!(Blueprint::id_for(ModelKind::User, "editor"), "users/editor");
}

#[test]
fn empty_document_uses_defaults() {
    let blueprint = Blueprint::factory(ModelKind::Page, "article", Value::Null).unwrap();
    assert_eq!(blueprint.id, "pages/article");
    assert_eq!(blueprint.title, NodeI18n::wildcard("Article"));
    assert!(blueprint.tabs.is_empty());
    assert!(blueprint.preview.is_some());
    assert!(blueprint.accept.is_none());

    let site = Blueprint::factory(ModelKind::Site, "site", json!({})).unwrap();
    assert_eq!(site.title, NodeI18n::wildcard("Site"));

    let file = Blueprint::default_for(ModelKind::File, "image");
    assert!(file.preview.is_none());
    assert!(file.accept.is_some());
}

#[test]
fn fields_shorthand_wraps_main_tab() {
    let blueprint = Blueprint::factory(
        ModelKind::Page,
        "note",
        json!({"fields": {"subtitle": {"type": "text"}}}),
    )
    .unwrap();

    assert_eq!(blueprint.tabs.len(), 1);
    let tab = blueprint.tab(MAIN_TAB).unwrap();
    assert_eq!(tab.columns.len(), 1);

    let column = &tab.columns[0];
    assert_eq!(column.id, "main-col-0");
    assert_eq!(column.width, FULL_WIDTH);
    assert_eq!(column.sections.len(), 1);
    assert_eq!(column.sections[0].id(), "fields");
    assert_eq!(column.sections[0].section_type(), "fields");

    assert_eq!(
        blueprint.field("subtitle").map(|f| f.field_type()),
        Some("text")
    );
}

#[test]
fn sections_shorthand_wraps_one_column() {
    let blueprint = Blueprint::factory(
        ModelKind::Page,
        "blog",
        json!({"sections": {"drafts": {"type": "pages", "status": "draft"}, "intro": {"type": "info"}}}),
    )
    .unwrap();

    let ids: Vec<&str> = blueprint.sections().map(|s| s.id()).collect();
    assert_eq!(ids, vec!["drafts", "intro"]);
}

#[test]
fn explicit_tabs_keep_declared_order() {
    let blueprint = Blueprint::factory(
        ModelKind::Page,
        "project",
        json!({
            "tabs": {
                "content": {"label": "Content", "fields": {"text": {"type": "text"}}},
                "seo": {
                    "icon": "search",
                    "columns": [{
                        "width": "1/2",
                        "sections": {"meta": {"type": "fields", "fields": {"description": {"type": "text"}}}}
                    }]
                }
            }
        }),
    )
    .unwrap();

    let names: Vec<&str> = blueprint.tabs.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["content", "seo"]);

    let seo = blueprint.tab("seo").unwrap();
    assert_eq!(seo.icon.as_deref(), Some("search"));
    assert_eq!(seo.columns[0].id, "seo-col-0");
    assert_eq!(seo.columns[0].width, "1/2");

    let fields: Vec<&str> = blueprint.fields().map(|f| f.id()).collect();
    assert_eq!(fields, vec!["text", "description"]);
}

#[test]
fn tab_list_names_come_from_entries() {
    let blueprint = Blueprint::factory(
        ModelKind::Page,
        "project",
        json!({"tabs": [{"name": "content"}, {"label": "Extra"}]}),
    )
    .unwrap();

    let names: Vec<&str> = blueprint.tabs.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["content", "tab-1"]);
}

#[test]
fn unknown_keys_are_rejected() {
    let err = Blueprint::factory(ModelKind::Page, "blog", json!({"colour": "red"})).unwrap_err();
    let BlueprintError::UnknownProperty { property, .. } = err else {
        panic!("expected an unknown property error");
    };
    assert_eq!(property, "colour");

    let err = Blueprint::factory(
        ModelKind::Page,
        "blog",
        json!({"tabs": {"main": {"size": 1}}}),
    )
    .unwrap_err();
    assert!(matches!(err, BlueprintError::UnknownProperty { node: "Tab", .. }));

    let err = Blueprint::factory(
        ModelKind::Page,
        "blog",
        json!({"columns": [{"width": "1/2", "float": "left"}]}),
    )
    .unwrap_err();
    assert!(matches!(err, BlueprintError::UnknownProperty { node: "Column", .. }));
}

#[test]
fn accept_only_for_file_blueprints() {
    let accept = json!({"accept": "image/*"});
    let err = Blueprint::factory(ModelKind::Page, "blog", accept.clone()).unwrap_err();
    assert!(matches!(err, BlueprintError::Invalid { node: "Blueprint", .. }));

    let file = Blueprint::factory(ModelKind::File, "image", accept).unwrap();
    assert_eq!(
        file.accept.and_then(|a| a.mime),
        Some(vec!["image/*".to_string()])
    );
}

#[test]
fn options_follow_model_kind() {
    let options = json!({"options": {"delete": false}});
    let blueprint = Blueprint::factory(ModelKind::Page, "blog", options.clone()).unwrap();
    assert_eq!(
        blueprint.options.get("delete"),
        Some(&ModelOption::Allowed(false))
    );

    assert!(Blueprint::factory(ModelKind::Site, "site", options).is_err());
}

#[test]
fn validate_collects_failures_by_field() {
    let blueprint = Blueprint::factory(
        ModelKind::Page,
        "note",
        json!({
            "fields": {
                "title": {"type": "text", "required": true},
                "summary": {"type": "text", "maxlength": 5},
                "rating": {"type": "number", "max": 5},
                "intro": {"type": "headline"}
            }
        }),
    )
    .unwrap();

    let content = json!({"summary": "far too long", "rating": 3});
    let errors = blueprint.validate(content.as_object().unwrap());
    assert_eq!(
        errors,
        vec![
            ("title".to_string(), ValueError::Required),
            ("summary".to_string(), ValueError::TooLong { max: 5 }),
        ]
    );
}

#[test]
fn render_lists_blueprint_keys() {
    let store = MemoryStore::from_yaml(FIXTURE).unwrap();
    let page = store.page("blog").unwrap();
    let i18n = I18n::default();
    let ctx = RenderContext::new(&page, &i18n);

    let blueprint = Blueprint::factory(
        ModelKind::Page,
        "blog",
        json!({"title": "Blog", "image": "page.image", "fields": {"text": {"type": "text"}}}),
    )
    .unwrap();
    let rendered = blueprint.render(&ctx);

    assert_eq!(
        keys(&rendered),
        vec!["id", "type", "name", "title", "icon", "options", "preview", "image", "tabs"]
    );
    assert_eq!(rendered["title"], json!("Blog"));
    assert_eq!(rendered["preview"], json!("https://example.com/blog"));
    assert_eq!(
        rendered["image"]["src"],
        json!("https://example.com/blog/cover.jpg")
    );

    let tab = &rendered["tabs"][0];
    assert_eq!(tab["label"], json!("Main"));
    assert_eq!(tab["columns"][0]["id"], json!("main-col-0"));
    assert_eq!(
        tab["columns"][0]["sections"]["fields"]["type"],
        json!("fields")
    );
}
