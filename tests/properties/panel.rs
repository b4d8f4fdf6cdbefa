//! Property tests for Panel helpers.

use proptest::prelude::*;
use serde_json::{Map, Value};

use folio::panel::{is_disabled_dropdown_option, nice_size};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Sizes always render as a bounded number and a known unit.
    #[test]
    fn property_nice_size_is_well_formed(bytes in 0u64..(1u64 << 60)) {
        let text = nice_size(bytes);
        let (number, unit) = text.split_once(' ').expect("number and unit");

        prop_assert!(["B", "KB", "MB", "GB", "TB", "PB"].contains(&unit));
        let number: f64 = number.parse().expect("numeric size");
        prop_assert!((0.0..=1024.0).contains(&number));
    }

    /// PROPERTY: A denied permission disables the entry whatever the caller passes.
    #[test]
    fn property_denied_permission_always_disables(
        action in "[a-zA-Z]{1,10}",
        option in prop_oneof![Just(Value::Null), any::<bool>().prop_map(Value::Bool), "[a-z]{0,5}".prop_map(Value::String)],
    ) {
        let mut permissions = Map::new();
        permissions.insert(action.clone(), Value::Bool(false));
        let mut options = Map::new();
        options.insert(action.clone(), option);

        prop_assert!(is_disabled_dropdown_option(&action, &options, &permissions));
    }
}
