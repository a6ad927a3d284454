// Conversion and tree-building benchmarks, heap versus arena.
// Run with: cargo bench -p confval-core

use confval_core::{Arena, ArenaValue, Value};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

const SECTIONS: usize = 64;

fn bench_checked_reads(c: &mut Criterion) {
    let mut v = Value::new();
    v.assign(8080);
    let mut f = Value::new();
    f.assign(3.5);
    let mut s = Value::new();
    s.assign("12345");

    c.bench_function("try_get_i64_to_u16", |b| {
        b.iter(|| black_box(&v).try_get::<u16>())
    });
    c.bench_function("try_get_f64_to_i32_fractional", |b| {
        b.iter(|| black_box(&f).try_get::<i32>())
    });
    c.bench_function("coerce_string_to_i32", |b| {
        b.iter(|| black_box(&s).try_coerce::<i32>())
    });
}

fn bench_build_heap(c: &mut Criterion) {
    c.bench_function("build_tree_heap", |b| {
        b.iter(|| {
            let mut root = Value::new();
            for i in 0..SECTIONS {
                let section = &mut root["sections"].push(None::<i32>)["settings"];
                section["name"].assign("section");
                section["index"].assign(i);
                section["enabled"].assign(i % 2 == 0);
            }
            black_box(root);
        });
    });
}

fn bench_build_arena(c: &mut Criterion) {
    let mut arena = Arena::new();
    c.bench_function("build_tree_arena", |b| {
        b.iter(|| {
            {
                let mut root = ArenaValue::new_in(&arena);
                for i in 0..SECTIONS {
                    let section = &mut root["sections"].push(None::<i32>)["settings"];
                    section["name"].assign("section");
                    section["index"].assign(i);
                    section["enabled"].assign(i % 2 == 0);
                }
                black_box(&root);
            }
            arena.reset();
        });
    });
}

fn bench_lookup(c: &mut Criterion) {
    let mut root = Value::new();
    for i in 0..SECTIONS {
        root[format!("key{i}").as_str()].assign(i);
    }

    c.bench_function("at_last_key", |b| {
        b.iter(|| black_box(&root).at(black_box("key63")).is_ok())
    });
}

criterion_group!(
    benches,
    bench_checked_reads,
    bench_build_heap,
    bench_build_arena,
    bench_lookup
);
criterion_main!(benches);
