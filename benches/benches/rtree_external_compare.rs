// Copyright 2025 the DLSC BVH Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use dlsc_bvh::{DlscBvh, SampleEntry};
use glam::Vec3;

use rstar::RTree;
use rstar::primitives::GeomWithData;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_f32(&mut self) -> f32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        ((x >> 40) as f32) / ((1u64 << 24) as f32)
    }
    fn next_vec3(&mut self) -> Vec3 {
        Vec3::new(self.next_f32(), self.next_f32(), self.next_f32())
    }
}

/// Volume entries only, so both sides answer the same radius question.
fn gen_volume_entries(count: usize, extent: f32) -> Vec<SampleEntry> {
    let mut rng = Rng::new(0xFACE_FEED_CAFE_BABE);
    (0..count)
        .map(|_| SampleEntry::volume(rng.next_vec3() * extent))
        .collect()
}

fn to_rstar_points(v: &[SampleEntry]) -> Vec<GeomWithData<[f32; 3], usize>> {
    v.iter()
        .enumerate()
        .map(|(i, e)| GeomWithData::new(e.position.to_array(), i))
        .collect()
}

fn bench_rtree_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_external_compare");
    let radius = 1.0_f32;
    for &n in &[10_000usize, 100_000] {
        let entries = gen_volume_entries(n, 100.0);
        let mut rng = Rng::new(0x1234_5678_9ABC_DEF0);
        let queries: Vec<Vec3> = (0..10_000).map(|_| rng.next_vec3() * 100.0).collect();
        group.throughput(Throughput::Elements(n as u64));

        group.bench_function(format!("dlsc_build_n{n}"), |b| {
            b.iter(|| {
                let bvh = DlscBvh::new(black_box(&entries), radius, 10.0);
                black_box(bvh.node_count());
            });
        });

        group.bench_function(format!("rstar_build_bulk_n{n}"), |b| {
            b.iter_batched(
                || to_rstar_points(&entries),
                |points| {
                    let tree = RTree::bulk_load(points);
                    black_box(tree.size());
                },
                BatchSize::SmallInput,
            );
        });

        let bvh = DlscBvh::new(&entries, radius, 10.0);
        group.bench_function(format!("dlsc_query_n{n}"), |b| {
            b.iter(|| {
                let hits = queries
                    .iter()
                    .filter(|&&p| bvh.get_entry_index(p, Vec3::ZERO, true).is_some())
                    .count();
                black_box(hits);
            });
        });

        let tree = RTree::bulk_load(to_rstar_points(&entries));
        group.bench_function(format!("rstar_query_n{n}"), |b| {
            b.iter(|| {
                let hits = queries
                    .iter()
                    .filter(|p| {
                        tree.locate_within_distance(p.to_array(), radius * radius)
                            .next()
                            .is_some()
                    })
                    .count();
                black_box(hits);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rtree_external_compare);
criterion_main!(benches);
