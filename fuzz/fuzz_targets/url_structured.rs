//! Structured fuzz target: well-formed schemes and hosts, arbitrary query values.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_url_structured
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use redis_topology_url::{CredentialsOverride, MapEnvSource, RedisUrl};

const SCHEMES: [&str; 7] = [
    "redis",
    "rediss",
    "redis-sentinel",
    "rediss-sentinel",
    "redis-cluster",
    "rediss-cluster",
    "memcached",
];

#[derive(Debug, Arbitrary)]
struct FuzzUrl {
    scheme: u8,
    hosts: Vec<(u8, Option<u16>)>,
    params: Vec<(String, String)>,
}

impl FuzzUrl {
    fn render(&self) -> String {
        let scheme = SCHEMES[usize::from(self.scheme) % SCHEMES.len()];
        let hosts: Vec<String> = self
            .hosts
            .iter()
            .take(16)
            .map(|(host, port)| match port {
                Some(port) => format!("h{host}:{port}"),
                None => format!("h{host}"),
            })
            .collect();
        let query: Vec<String> = self
            .params
            .iter()
            .take(32)
            .map(|(k, v)| format!("{}={}", sanitize(k), sanitize(v)))
            .collect();
        format!("{scheme}://{}?{}", hosts.join(","), query.join("&"))
    }
}

fn sanitize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '&' | '=' | '#'))
        .take(64)
        .collect()
}

fuzz_target!(|input: FuzzUrl| {
    let raw = input.render();
    let result = RedisUrl::with_env(Some(&raw), CredentialsOverride::new(), &MapEnvSource::new());

    // Any non-empty host list rendered above is valid
    if !input.hosts.is_empty() {
        let url = result.expect("structured url must parse");
        assert_eq!(url.endpoints().len(), input.hosts.len().min(16));
        assert!(url.redis_options().connect_timeout > 0);
        assert!(url.cluster_options().max_redirections > 0);
        if url.topology().is_supported() {
            assert!(url.client_plan().is_ok());
        }
    }
});
