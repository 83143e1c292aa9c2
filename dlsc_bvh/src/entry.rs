// Copyright 2025 the DLSC BVH Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cache entries as seen by the index.

use glam::Vec3;

/// A direct-light sampling cache entry that can be indexed.
///
/// The index never owns or mutates entries. It reads these three properties once while
/// building and again for every candidate leaf it tests during a query.
pub trait CacheEntry {
    /// Sample position.
    fn position(&self) -> Vec3;

    /// Surface normal. Ignored for volume samples.
    fn normal(&self) -> Vec3;

    /// Whether the sample was taken inside a participating medium.
    fn is_volume(&self) -> bool;
}

impl<E: CacheEntry + ?Sized> CacheEntry for &E {
    #[inline]
    fn position(&self) -> Vec3 {
        (**self).position()
    }

    #[inline]
    fn normal(&self) -> Vec3 {
        (**self).normal()
    }

    #[inline]
    fn is_volume(&self) -> bool {
        (**self).is_volume()
    }
}

/// A plain cache entry carrying only what the index needs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SampleEntry {
    /// Sample position.
    pub position: Vec3,
    /// Surface normal (unit length). Ignored for volume samples.
    pub normal: Vec3,
    /// Volume sample flag.
    pub is_volume: bool,
}

impl SampleEntry {
    /// A surface sample at `position` with unit normal `normal`.
    pub const fn surface(position: Vec3, normal: Vec3) -> Self {
        Self {
            position,
            normal,
            is_volume: false,
        }
    }

    /// A volume sample at `position`.
    pub const fn volume(position: Vec3) -> Self {
        Self {
            position,
            normal: Vec3::ZERO,
            is_volume: true,
        }
    }
}

impl CacheEntry for SampleEntry {
    #[inline]
    fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    fn normal(&self) -> Vec3 {
        self.normal
    }

    #[inline]
    fn is_volume(&self) -> bool {
        self.is_volume
    }
}
