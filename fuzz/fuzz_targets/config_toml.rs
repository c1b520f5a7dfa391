#![no_main]

use libfuzzer_sys::fuzz_target;
use litmock::config::Config;

fuzz_target!(|data: &[u8]| {
    if let Ok(toml_str) = std::str::from_utf8(data) {
        if let Ok(config) = Config::parse(toml_str) {
            assert!(config.builder.setup_capacity >= 1);
            assert!(config.builder.partial_capacity >= 1);
        }
    }
});
