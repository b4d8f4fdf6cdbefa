//! Property tests for recursive replacement merges.

use proptest::prelude::*;
use serde_json::Value;

use folio::merge::{replace_all, replace_recursive};

use crate::strategies::{flat_map, tree};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Merging a tree onto itself changes nothing.
    #[test]
    fn property_merge_with_self_is_identity(value in tree()) {
        prop_assert_eq!(replace_recursive(&value, &value), value);
    }

    /// PROPERTY: Keys from the later layer win; other base keys survive.
    #[test]
    fn property_later_layer_wins(base in flat_map(), over in flat_map()) {
        let merged = replace_recursive(&Value::Object(base.clone()), &Value::Object(over.clone()));
        let merged = merged.as_object().expect("maps merge into a map");

        for (key, value) in &over {
            prop_assert_eq!(&merged[key], value);
        }
        for (key, value) in &base {
            if !over.contains_key(key) {
                prop_assert_eq!(&merged[key], value);
            }
        }
        prop_assert_eq!(
            merged.len(),
            base.keys().chain(over.keys()).collect::<std::collections::HashSet<_>>().len()
        );
    }

    /// PROPERTY: Base keys keep their position; new keys are appended.
    #[test]
    fn property_base_key_order_is_kept(base in flat_map(), over in flat_map()) {
        let merged = replace_recursive(&Value::Object(base.clone()), &Value::Object(over));
        let merged = merged.as_object().expect("maps merge into a map");

        let leading: Vec<&String> = merged.keys().take(base.len()).collect();
        let expected: Vec<&String> = base.keys().collect();
        prop_assert_eq!(leading, expected);
    }

    /// PROPERTY: Folding layers equals merging them pairwise.
    #[test]
    fn property_replace_all_folds_left(a in tree(), b in tree(), c in tree()) {
        let folded = replace_all([&a, &b, &c]);
        let pairwise = replace_recursive(&replace_recursive(&a, &b), &c);
        prop_assert_eq!(folded, pairwise);
    }
}
