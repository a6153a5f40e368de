//! Benchmarks for frame URL resolution and message relay
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use novatrace::frame::{
    attach, Environment, MessageTarget, Microfrontend, Origin, OriginPolicy, RouteTable,
};
use serde_json::json;
use std::cell::Cell;
use std::rc::Rc;

fn create_test_table(count: usize) -> RouteTable {
    let entries = (0..count)
        .map(|i| {
            let origin = Origin::parse(&format!("http://localhost:{}", 6000 + i)).unwrap();
            Microfrontend::new(
                format!("app{}", i),
                format!("/app{}", i),
                origin,
                format!("/bundles/app{}", i),
            )
            .sub_path("/status")
            .sub_path("/events")
        })
        .collect();
    RouteTable::new(entries).unwrap()
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_frame_url");

    for size in [2, 16, 128] {
        let table = create_test_table(size);
        let hit = format!("/app{}/events", size - 1);

        group.throughput(Throughput::Elements(1));

        group.bench_function(format!("hit_{}", size), |b| {
            b.iter(|| table.resolve_frame_url(black_box(&hit), Environment::Production))
        });

        group.bench_function(format!("miss_{}", size), |b| {
            b.iter(|| table.resolve_frame_url(black_box("/nowhere/at/all"), Environment::Development))
        });
    }

    let standard = RouteTable::standard();
    group.bench_function("standard_table", |b| {
        b.iter(|| standard.resolve_frame_url(black_box("/novatrace/status?page=2"), Environment::Production))
    });

    group.finish();
}

fn bench_relay(c: &mut Criterion) {
    let mut group = c.benchmark_group("relay");

    let target = MessageTarget::new();
    let policy = OriginPolicy::new().allow(Origin::parse("http://localhost:5174").unwrap());
    let count = Rc::new(Cell::new(0u64));
    let seen = Rc::clone(&count);
    let _subscription = attach(&target, policy, move |_| seen.set(seen.get() + 1));

    let navigate = json!({ "type": "navigate", "path": "/novatrace/status" });
    let unrelated = json!({ "type": "resize", "height": 480 });

    group.bench_function("dispatch_navigate", |b| {
        b.iter(|| target.post(black_box("http://localhost:5174"), navigate.clone()))
    });

    group.bench_function("dispatch_foreign_origin", |b| {
        b.iter(|| target.post(black_box("http://evil.example"), navigate.clone()))
    });

    group.bench_function("dispatch_unrelated", |b| {
        b.iter(|| target.post(black_box("http://localhost:5174"), unrelated.clone()))
    });

    group.finish();
    assert!(count.get() > 0);
}

criterion_group!(benches, bench_resolve, bench_relay);
criterion_main!(benches);
