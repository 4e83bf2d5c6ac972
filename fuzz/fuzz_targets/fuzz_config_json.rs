//! Fuzz target: `FeederConfig::from_json`
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - Any document that parses also passes validation
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use libfuzzer_sys::fuzz_target;
use petfeeder::config::FeederConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(doc) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = FeederConfig::from_json(doc) {
        assert!(config.validate().is_ok());
    }
});
