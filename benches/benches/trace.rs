// Copyright 2025 the Area Builder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use area_builder_grid::{CellRect, CompositeRegion, OccupancyMask, find_groups, trace_perimeters};
use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

/// `k × k` separate 3×3 rings on a 4-cell pitch: `k²` exterior and `k²` interior loops.
fn rings(k: i32) -> OccupancyMask {
    let mut mask = OccupancyMask::new(k * 4, k * 4);
    for y in 0..k {
        for x in 0..k {
            mask.fill(CellRect::new(x * 4, y * 4, 3, 3), true);
            mask.set(x * 4 + 1, y * 4 + 1, false);
        }
    }
    mask
}

/// One solid `n × n` block with a one-cell notch every other column along the top.
fn comb(n: i32) -> OccupancyMask {
    let mut mask = OccupancyMask::new(n, n);
    mask.fill(CellRect::new(0, 0, n, n), true);
    for x in (1..n).step_by(2) {
        mask.set(x, 0, false);
    }
    mask
}

fn bench_groups(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_groups");
    for &k in &[4, 8, 16] {
        let mask = rings(k);
        group.throughput(Throughput::Elements(u64::from(mask.count())));
        group.bench_function(format!("rings_k{k}"), |b| {
            b.iter(|| black_box(find_groups(&mask).len()));
        });
    }
    group.finish();
}

fn bench_trace(c: &mut Criterion) {
    let mut group = c.benchmark_group("trace_perimeters");
    for &k in &[4, 8, 16] {
        let mask = rings(k);
        group.throughput(Throughput::Elements(u64::from(mask.count())));
        group.bench_function(format!("rings_k{k}"), |b| {
            b.iter(|| black_box(trace_perimeters(&mask)));
        });
    }
    for &n in &[16, 32, 64] {
        let mask = comb(n);
        group.throughput(Throughput::Elements(u64::from(mask.count())));
        group.bench_function(format!("comb_n{n}"), |b| {
            b.iter(|| black_box(trace_perimeters(&mask)));
        });
    }
    group.finish();
}

fn bench_rebuild_unchanged(c: &mut Criterion) {
    let mask = rings(8);
    let mut region = CompositeRegion::new();
    region.rebuild_from(trace_perimeters(&mask));
    c.bench_function("rebuild_unchanged_rings_k8", |b| {
        b.iter(|| black_box(region.rebuild_from(trace_perimeters(&mask))));
    });
}

criterion_group!(benches, bench_groups, bench_trace, bench_rebuild_unchanged);
criterion_main!(benches);
