#![no_main]

use libfuzzer_sys::fuzz_target;
use tastedeck_core::DeckConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Loading may fail but must never panic, and anything accepted is valid.
    for loaded in [DeckConfig::from_json_str(text), DeckConfig::from_toml_str(text)] {
        if let Ok(config) = loaded {
            assert!(config.validate().is_empty());
        }
    }
});
