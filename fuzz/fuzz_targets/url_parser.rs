//! Fuzz target for the connection-string parser.
//!
//! Feeds arbitrary strings through parsing, option resolution and planning.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_url_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use redis_topology_url::{CredentialsOverride, MapEnvSource, RedisUrl};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Never panic, only return errors
        let env = MapEnvSource::new();
        if let Ok(url) = RedisUrl::with_env(Some(input), CredentialsOverride::new(), &env) {
            assert_eq!(url.raw_url(), input);
            assert!(!url.endpoints().is_empty());
            let _ = url.redis_options();
            let _ = url.cluster_options();
            let _ = url.client_plan();
        }
    }
});
