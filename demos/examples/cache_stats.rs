// Copyright 2025 the DLSC BVH Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build indexes over a synthetic cache at every quality and fanout, then report
//! build time, shape, and hit rate.
//!
//! Run with logging from the index enabled, optionally passing the entry count:
//! - `RUST_LOG=debug cargo run -p dlsc_demos --example cache_stats --release -- 200000`

use std::time::Instant;

use dlsc_bvh::{BuildQuality, DlscBvh, DlscParams, SampleEntry};
use glam::Vec3;

/// Logs the elapsed time of a phase when dropped.
struct Timed {
    name: String,
    start: Instant,
}

impl Timed {
    fn info(name: impl Into<String>) -> Self {
        let name = name.into();
        log::debug!("{name}...");
        Self {
            name,
            start: Instant::now(),
        }
    }
}

impl Drop for Timed {
    fn drop(&mut self) {
        log::info!("{} took {:.2?}", self.name, self.start.elapsed());
    }
}

struct Rng(u64);

impl Rng {
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

/// Surface samples on the walls of a box room plus a sprinkling of volume samples.
fn room_entries(rng: &mut Rng, count: usize, size: f32) -> Vec<SampleEntry> {
    let walls = [
        (Vec3::X, Vec3::ZERO),
        (-Vec3::X, Vec3::X * size),
        (Vec3::Y, Vec3::ZERO),
        (-Vec3::Y, Vec3::Y * size),
        (Vec3::Z, Vec3::ZERO),
        (-Vec3::Z, Vec3::Z * size),
    ];
    (0..count)
        .map(|i| {
            let p = rng.next_vec3() * size;
            if i % 10 == 0 {
                return SampleEntry::volume(p);
            }
            let (normal, origin) = walls[i % walls.len()];
            // Project onto the wall plane.
            let on_wall = p - normal * (p - origin).dot(normal);
            SampleEntry::surface(on_wall, normal)
        })
        .collect()
}

fn report<const K: usize>(
    entries: &[SampleEntry],
    queries: &[SampleEntry],
    params: &DlscParams,
) {
    let bvh = {
        let _t = Timed::info(format!("build {:?} K={K}", params.quality));
        DlscBvh::<_, K>::build(entries, params)
    };
    let start = Instant::now();
    let hits = queries
        .iter()
        .filter(|q| bvh.get_entry(q.position, q.normal, q.is_volume).is_some())
        .count();
    let elapsed = start.elapsed();
    println!(
        "{:?} K={K}: {:>7} nodes, depth {:>2}, {:>6} KiB, {:>5.1}% hits, {:>7.1} ns/query",
        params.quality,
        bvh.node_count(),
        bvh.depth(),
        bvh.as_bytes().len() / 1024,
        100.0 * hits as f64 / queries.len() as f64,
        elapsed.as_nanos() as f64 / queries.len() as f64,
    );
}

fn main() {
    env_logger::init();

    let count = match std::env::args().nth(1) {
        Some(arg) => match arg.parse::<usize>() {
            Ok(n) => n,
            Err(err) => {
                eprintln!("invalid entry count {arg:?}: {err}");
                std::process::exit(2);
            }
        },
        None => 200_000,
    };

    let mut rng = Rng(0x9E37_79B9_7F4A_7C15);
    let entries = room_entries(&mut rng, count, 50.0);
    let queries = room_entries(&mut rng, (count / 4).max(1), 50.0);
    println!("{} entries, {} queries", entries.len(), queries.len());

    for quality in [BuildQuality::Low, BuildQuality::Medium, BuildQuality::High] {
        let params = DlscParams::new(0.25, 10.0).with_quality(quality);
        report::<2>(&entries, &queries, &params);
        report::<4>(&entries, &queries, &params);
        report::<8>(&entries, &queries, &params);
    }
}
