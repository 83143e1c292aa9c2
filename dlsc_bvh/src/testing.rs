// Copyright 2025 the DLSC BVH Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic inputs shared by the unit tests.

use alloc::vec::Vec;

use glam::Vec3;

use crate::entry::SampleEntry;

#[derive(Clone)]
pub(crate) struct Rng(u64);

impl Rng {
    pub(crate) fn new(seed: u64) -> Self {
        Self(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1)
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// Uniform in `[0, 1)`.
    pub(crate) fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1_u64 << 24) as f32
    }

    pub(crate) fn unit_vector(&mut self) -> Vec3 {
        loop {
            let v = Vec3::new(
                self.next_f32() * 2.0 - 1.0,
                self.next_f32() * 2.0 - 1.0,
                self.next_f32() * 2.0 - 1.0,
            );
            let len2 = v.length_squared();
            if len2 > 1e-4 && len2 <= 1.0 {
                return v.normalize();
            }
        }
    }
}

/// `n` entries scattered in a 20-unit cube, roughly one in four of them volumetric.
pub(crate) fn random_entries(n: usize, seed: u64) -> Vec<SampleEntry> {
    let mut rng = Rng::new(seed);
    (0..n)
        .map(|_| {
            let p = Vec3::new(rng.next_f32(), rng.next_f32(), rng.next_f32()) * 20.0;
            if rng.next_u64() % 4 == 0 {
                SampleEntry::volume(p)
            } else {
                SampleEntry::surface(p, rng.unit_vector())
            }
        })
        .collect()
}
