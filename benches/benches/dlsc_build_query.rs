// Copyright 2025 the DLSC BVH Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use dlsc_bvh::{BuildQuality, DlscBvh, DlscParams, SampleEntry};
use glam::Vec3;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f32(&mut self) -> f32 {
        let v = self.next_u64() >> 40;
        (v as f32) / ((1u64 << 24) as f32)
    }
    fn next_vec3(&mut self) -> Vec3 {
        Vec3::new(self.next_f32(), self.next_f32(), self.next_f32())
    }
    fn unit_vector(&mut self) -> Vec3 {
        (self.next_vec3() * 2.0 - Vec3::ONE).normalize_or(Vec3::Z)
    }
}

fn gen_uniform_entries(count: usize, extent: f32) -> Vec<SampleEntry> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| {
            let p = rng.next_vec3() * extent;
            if rng.next_u64() % 8 == 0 {
                SampleEntry::volume(p)
            } else {
                SampleEntry::surface(p, rng.unit_vector())
            }
        })
        .collect()
}

/// Entries on a few planes, the way surface samples cluster on scene geometry.
fn gen_plane_entries(n_planes: usize, per_plane: usize, extent: f32) -> Vec<SampleEntry> {
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    let mut out = Vec::with_capacity(n_planes * per_plane);
    for plane in 0..n_planes {
        let z = plane as f32 * extent / n_planes as f32;
        for _ in 0..per_plane {
            let p = Vec3::new(rng.next_f32() * extent, rng.next_f32() * extent, z);
            out.push(SampleEntry::surface(p, Vec3::Z));
        }
    }
    out
}

fn gen_queries(count: usize, extent: f32) -> Vec<(Vec3, Vec3, bool)> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    (0..count)
        .map(|_| {
            let is_volume = rng.next_u64() % 8 == 0;
            (rng.next_vec3() * extent, rng.unit_vector(), is_volume)
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[1_000usize, 10_000, 100_000] {
        let entries = gen_uniform_entries(n, 100.0);
        group.throughput(Throughput::Elements(n as u64));
        for quality in [BuildQuality::Low, BuildQuality::Medium, BuildQuality::High] {
            let params = DlscParams::new(0.5, 10.0).with_quality(quality);
            group.bench_function(format!("{quality:?}_n{n}"), |b| {
                b.iter(|| {
                    let bvh = DlscBvh::with_params(black_box(&entries), &params);
                    black_box(bvh.node_count());
                });
            });
        }
    }
    group.finish();
}

fn bench_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("fanout");
    let entries = gen_uniform_entries(50_000, 100.0);
    let queries = gen_queries(10_000, 100.0);
    let params = DlscParams::new(1.0, 15.0);
    group.throughput(Throughput::Elements(queries.len() as u64));

    let bvh2 = DlscBvh::<_, 2>::build(&entries, &params);
    group.bench_function("query_k2", |b| {
        b.iter(|| {
            let hits = queries
                .iter()
                .filter(|&&(p, n, v)| bvh2.get_entry_index(p, n, v).is_some())
                .count();
            black_box(hits);
        });
    });
    let bvh4 = DlscBvh::<_, 4>::build(&entries, &params);
    group.bench_function("query_k4", |b| {
        b.iter(|| {
            let hits = queries
                .iter()
                .filter(|&&(p, n, v)| bvh4.get_entry_index(p, n, v).is_some())
                .count();
            black_box(hits);
        });
    });
    let bvh8 = DlscBvh::<_, 8>::build(&entries, &params);
    group.bench_function("query_k8", |b| {
        b.iter(|| {
            let hits = queries
                .iter()
                .filter(|&&(p, n, v)| bvh8.get_entry_index(p, n, v).is_some())
                .count();
            black_box(hits);
        });
    });
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    let queries = gen_queries(10_000, 100.0);
    group.throughput(Throughput::Elements(queries.len() as u64));

    let uniform = gen_uniform_entries(100_000, 100.0);
    let planes = gen_plane_entries(8, 12_500, 100.0);
    for (name, entries) in [("uniform", &uniform), ("planes", &planes)] {
        let bvh = DlscBvh::new(entries, 1.0, 15.0);
        group.bench_function(format!("{name}_mixed"), |b| {
            b.iter(|| {
                let hits = queries
                    .iter()
                    .filter(|&&(p, n, v)| bvh.get_entry(p, n, v).is_some())
                    .count();
                black_box(hits);
            });
        });
    }

    // Every query lands on an entry, so the walk stops early.
    let hits_only: Vec<_> = uniform
        .iter()
        .step_by(10)
        .map(|e| (e.position, e.normal, e.is_volume))
        .collect();
    let bvh = DlscBvh::new(&uniform, 1.0, 15.0);
    group.bench_function("uniform_all_hits", |b| {
        b.iter_batched(
            || hits_only.clone(),
            |qs| {
                let hits = qs
                    .into_iter()
                    .filter(|&(p, n, v)| bvh.get_entry_index(p, n, v).is_some())
                    .count();
                black_box(hits);
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_fanout, bench_query);
criterion_main!(benches);
