#![no_main]

use libfuzzer_sys::fuzz_target;

use folio::model::ModelKind;
use folio::BlueprintSet;

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };

    // Blueprint normalization rejects bad input with an error, never a panic
    for kind in [ModelKind::Site, ModelKind::Page, ModelKind::File, ModelKind::User] {
        let _ = BlueprintSet::parse_str(kind, "fuzz", content, std::path::Path::new("fuzz.yml"));
    }
});
