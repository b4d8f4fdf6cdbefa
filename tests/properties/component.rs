//! Property tests for component setup.

use proptest::prelude::*;
use serde_json::{json, Value};

use folio::Component;
use folio::ComponentRegistry;

use crate::strategies::flat_map;

fn registry() -> ComponentRegistry {
    let registry = ComponentRegistry::new();
    registry
        .register_type(
            "badge",
            json!({
                "props": {
                    "label": {"type": "string"},
                    "size": {"type": "string", "default": "medium", "values": ["small", "medium", "large"]}
                },
                "computed": {"title": "{{ label }} ({{ size }})"}
            }),
        )
        .unwrap();
    registry
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Unrelated attributes never change props or computed values.
    #[test]
    fn property_extra_attrs_do_not_leak_into_props(
        mut attrs in flat_map(),
        label in "[A-Za-z0-9]{1,12}",
    ) {
        attrs.remove("size");
        attrs.insert("label".to_string(), Value::String(label.clone()));

        let badge = Component::new(&registry(), "badge", attrs.clone()).unwrap();
        prop_assert_eq!(badge.props().len(), 2);
        prop_assert_eq!(&badge.props()["label"], &Value::String(label.clone()));
        prop_assert_eq!(
            badge.get("title"),
            Some(&Value::String(format!("{label} (medium)")))
        );
        prop_assert_eq!(badge.attrs(), &attrs);
    }

    /// PROPERTY: Values outside the allowed list are always rejected.
    #[test]
    fn property_constrained_prop_rejects_other_values(size in "[a-z]{1,8}") {
        prop_assume!(!["small", "medium", "large"].contains(&size.as_str()));

        let attrs = json!({"label": "x", "size": size});
        let attrs = attrs.as_object().unwrap().clone();
        prop_assert!(Component::new(&registry(), "badge", attrs).is_err());
    }
}
