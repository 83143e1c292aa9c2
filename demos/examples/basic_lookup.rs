// Copyright 2025 the DLSC BVH Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of DLSC BVH: index a few cache entries and look them up.
//!
//! Run:
//! - `cargo run -p dlsc_demos --example basic_lookup`

use dlsc_bvh::{DlscBvh, SampleEntry};
use glam::Vec3;

fn main() {
    let entries = vec![
        SampleEntry::surface(Vec3::new(0.0, 0.0, 0.0), Vec3::Y),
        SampleEntry::surface(Vec3::new(0.1, 0.0, 0.0), Vec3::X),
        SampleEntry::surface(Vec3::new(2.0, 0.0, 0.0), Vec3::Y),
        SampleEntry::volume(Vec3::new(0.0, 1.0, 0.0)),
    ];
    let bvh = DlscBvh::new(&entries, 0.15, 10.0);
    println!("{bvh:?}");

    // Floor-facing normal near the origin: only the first entry qualifies.
    let hit = bvh.get_entry_index(Vec3::new(0.05, 0.0, 0.0), Vec3::Y, false);
    println!("surface lookup at (0.05, 0, 0) facing +Y: {hit:?}");

    // Same point, facing +X: the second entry's normal matches instead.
    let hit = bvh.get_entry_index(Vec3::new(0.05, 0.0, 0.0), Vec3::X, false);
    println!("surface lookup at (0.05, 0, 0) facing +X: {hit:?}");

    // Volume lookups ignore the normal and never see surface entries.
    let hit = bvh.get_entry(Vec3::new(0.0, 1.1, 0.0), Vec3::ZERO, true);
    println!("volume lookup at (0, 1.1, 0): {:?}", hit.map(|e| e.position));

    // Nothing within reach.
    let miss = bvh.get_entry(Vec3::new(1.0, 0.0, 0.0), Vec3::Y, false);
    println!("surface lookup at (1, 0, 0): {miss:?}");
}
