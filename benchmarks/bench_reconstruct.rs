use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use logchain::{encode_hex, reconstruct, render_text};

/// A single chain of `len` records, emitted in a scrambled order.
/// Record `i` links to `i + 1`; the last one carries the sentinel.
fn scrambled_chain(pipeline: &str, len: usize, hex: bool) -> String {
    // Coprime with every length benchmarked below, so each index is visited once
    let stride = 7919 % len.max(1);
    let stride = if stride == 0 { 1 } else { stride };
    let mut out = String::with_capacity(len * 48);

    for step in 0..len {
        let i = (step * stride) % len;
        let next = if i + 1 == len {
            "-1".to_string()
        } else {
            format!("m{}", i + 1)
        };
        let text = format!("event number {} in {}", i, pipeline);
        if hex {
            out.push_str(&format!("{} m{} 1 [{}] {}\n", pipeline, i, encode_hex(&text), next));
        } else {
            out.push_str(&format!("{} m{} 0 [{}] {}\n", pipeline, i, text, next));
        }
    }
    out
}

fn bench_reconstruct_single_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconstruct_single_chain");
    for len in [100usize, 1_000, 10_000] {
        let input = scrambled_chain("p", len, false);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &input, |b, input| {
            b.iter(|| black_box(reconstruct(black_box(input))));
        });
    }
    group.finish();
}

fn bench_reconstruct_hex_bodies(c: &mut Criterion) {
    let input = scrambled_chain("p", 1_000, true);
    c.bench_function("reconstruct_hex_1000", |b| {
        b.iter(|| black_box(reconstruct(black_box(&input))));
    });
}

fn bench_reconstruct_many_pipelines(c: &mut Criterion) {
    let input: String = (0..100)
        .map(|p| scrambled_chain(&format!("pipe{}", p), 100, false))
        .collect();
    c.bench_function("reconstruct_100x100", |b| {
        b.iter(|| black_box(reconstruct(black_box(&input))));
    });
}

fn bench_cycle_heavy_input(c: &mut Criterion) {
    // Every id is referenced, so no pipeline has a tail
    let input: String = (0..1_000)
        .map(|i| format!("ring m{} 0 [x] m{}\n", i, (i + 1) % 1_000))
        .collect();
    c.bench_function("reconstruct_ring_1000", |b| {
        b.iter(|| black_box(reconstruct(black_box(&input))));
    });
}

fn bench_render_text(c: &mut Criterion) {
    let pipelines = reconstruct(&scrambled_chain("p", 10_000, false)).pipelines;
    c.bench_function("render_text_10000", |b| {
        b.iter(|| black_box(render_text(black_box(&pipelines))));
    });
}

criterion_group!(
    benches,
    bench_reconstruct_single_chain,
    bench_reconstruct_hex_bodies,
    bench_reconstruct_many_pipelines,
    bench_cycle_heavy_input,
    bench_render_text
);
criterion_main!(benches);
