#![no_main]

use libfuzzer_sys::fuzz_target;

use folio::{yaml, Component, ComponentRegistry};

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(definition) = yaml::parse(content, std::path::Path::new("fuzz.yml")) else {
        return;
    };

    let registry = ComponentRegistry::new();
    if registry.register_type("fuzz", definition).is_ok() {
        let _ = Component::new(&registry, "fuzz", serde_json::Map::new()).map(|c| c.to_array());
    }
});
