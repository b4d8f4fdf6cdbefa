//! Property tests for blueprint normalization.

use proptest::prelude::*;
use serde_json::Value;

use folio::field::field_from;
use folio::model::ModelKind;
use folio::section::section_from;
use folio::{Blueprint, I18n, MemoryStore, RenderContext};

use crate::strategies::tree;

const FIXTURE: &str = r#"
site:
  title: Example
  url: https://example.com
pages:
  - slug: blog
    files:
      - filename: cover.jpg
"#;

fn kind() -> impl Strategy<Value = ModelKind> {
    prop_oneof![
        Just(ModelKind::Site),
        Just(ModelKind::Page),
        Just(ModelKind::File),
        Just(ModelKind::User),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Arbitrary configuration never panics; accepted blueprints render.
    #[test]
    fn property_blueprint_factory_never_panics(kind in kind(), document in tree()) {
        let store = MemoryStore::from_yaml(FIXTURE).unwrap();
        let page = store.page("blog").unwrap();
        let i18n = I18n::default();
        let ctx = RenderContext::new(&page, &i18n);

        if let Ok(blueprint) = Blueprint::factory(kind, "sample", document) {
            let rendered = blueprint.render(&ctx);
            prop_assert_eq!(rendered.keys().next().map(String::as_str), Some("id"));
            prop_assert_eq!(
                &rendered["id"],
                &Value::String(Blueprint::id_for(kind, "sample"))
            );
        }
    }

    /// PROPERTY: Normalization is deterministic.
    #[test]
    fn property_blueprint_factory_is_deterministic(document in tree()) {
        let first = Blueprint::factory(ModelKind::Page, "sample", document.clone()).map(|b| b.tabs.len());
        let second = Blueprint::factory(ModelKind::Page, "sample", document).map(|b| b.tabs.len());
        prop_assert_eq!(first.ok(), second.ok());
    }

    /// PROPERTY: Fields and sections reject or accept, never panic.
    #[test]
    fn property_field_and_section_factories_never_panic(
        id in "[a-z]{1,8}",
        definition in tree(),
    ) {
        if let Ok(field) = field_from(&id, definition.clone()) {
            prop_assert_eq!(field.id(), id.as_str());
        }
        if let Ok(section) = section_from(&id, definition) {
            prop_assert_eq!(section.id(), id.as_str());
        }
    }
}
