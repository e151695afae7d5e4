//! Fuzz target for the TOML configuration parser.
//!
//! Run with: cargo +nightly fuzz run fuzz_config_parser
//!
//! Feeds arbitrary text through `AppConfig::parse()` and, when it parses,
//! builds the tool filter from the result.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(config) = devforge_config::AppConfig::parse(s) {
            let filter = config.tools.filter();
            let _ = filter.is_enabled("json.formatter");
        }
    }
});
