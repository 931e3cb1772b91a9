//! Benchmarks for connection-string parsing and option resolution.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use redis_topology::url::{
    ConnectionString, CredentialsOverride, MapEnvSource, ParameterTable, RedisOptions, RedisUrl,
};
use std::hint::black_box;

const SINGLE: &str = "redis://127.0.0.1:6379";
const SENTINEL: &str =
    "rediss-sentinel://s1:26379,s2:26379,s3:26379?name=mymaster&db=2&connectTimeout=5000";
const CLUSTER_QUERY: &str = "redis-cluster://n1:7000,n2:7001,n3:7002?maxRedirections=8\
    &scaleReads=slave&enableAutoPipelining=true&autoPipeliningIgnoredCommands=ping,info,echo\
    &keyPrefix=app%3A&lazyConnect=true";

fn cluster_url(nodes: usize) -> String {
    let hosts: Vec<String> = (0..nodes).map(|i| format!("node{i}:{}", 7000 + i)).collect();
    format!("redis-cluster://{}", hosts.join(","))
}

/// Benchmark the raw parser.
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    group.bench_function("single", |b| {
        b.iter(|| black_box(ConnectionString::parse(black_box(SINGLE))))
    });

    group.bench_function("sentinel", |b| {
        b.iter(|| black_box(ConnectionString::parse(black_box(SENTINEL))))
    });

    group.bench_function("cluster_with_query", |b| {
        b.iter(|| black_box(ConnectionString::parse(black_box(CLUSTER_QUERY))))
    });

    for nodes in [3, 12, 48] {
        let url = cluster_url(nodes);
        group.throughput(Throughput::Elements(nodes as u64));
        group.bench_with_input(BenchmarkId::new("cluster_nodes", nodes), &url, |b, url| {
            b.iter(|| black_box(ConnectionString::parse(black_box(url))))
        });
    }

    group.finish();
}

/// Benchmark option resolution.
fn bench_options(c: &mut Criterion) {
    let mut group = c.benchmark_group("options");

    let empty = ParameterTable::new();
    group.bench_function("defaults", |b| {
        b.iter(|| black_box(RedisOptions::from_params(black_box(&empty))))
    });

    let conn = ConnectionString::parse(CLUSTER_QUERY).expect("valid url");
    group.bench_function("populated", |b| {
        b.iter(|| black_box(RedisOptions::from_params(black_box(conn.params()))))
    });

    group.finish();
}

/// Benchmark the full path up to a client plan.
fn bench_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan");
    let env = MapEnvSource::new().set("REDIS_PASSWORD", "secret");

    for (name, raw) in [("single", SINGLE), ("sentinel", SENTINEL), ("cluster", CLUSTER_QUERY)] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let url = RedisUrl::with_env(Some(raw), CredentialsOverride::new(), &env)
                    .expect("valid url");
                black_box(url.client_plan())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_options, bench_plan);
criterion_main!(benches);
