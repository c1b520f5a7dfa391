#![no_main]

use libfuzzer_sys::fuzz_target;
use litmock::shape::validate;
use litmock::{ApiShape, MockShape};

fuzz_target!(|data: &[u8]| {
    if let Ok(json_str) = std::str::from_utf8(data) {
        let Ok(api) = ApiShape::from_json(json_str) else {
            return;
        };
        let mock = MockShape {
            type_name: "Fuzzed".to_string(),
            methods: Vec::new(),
            properties: Vec::new(),
        };
        let result = validate(&mock, &api);
        assert_eq!(result.is_valid, result.mismatches.is_empty());

        if let Ok(mock) = serde_json::from_str::<MockShape>(json_str) {
            let _ = validate(&mock, &api);
        }
    }
});
