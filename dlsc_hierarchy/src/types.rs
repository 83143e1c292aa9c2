// Copyright 2025 the DLSC BVH Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use glam::Vec3;

/// Axis-aligned bounding box in 3D.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb3 {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb3 {
    /// The inverted box: the identity for [`Aabb3::union`].
    pub const EMPTY: Self = Self {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    /// Create a new AABB from min/max corners.
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// A cube centered on `center`, extended by `radius` along every axis.
    pub fn from_center_radius(center: Vec3, radius: f32) -> Self {
        let r = Vec3::splat(radius);
        Self {
            min: center - r,
            max: center + r,
        }
    }

    /// Whether this AABB contains the point. Bounds are inclusive; NaN never matches.
    #[inline]
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// The smallest box enclosing both `self` and `other`.
    ///
    /// A NaN coordinate on one side is ignored in favor of the other side, so a single
    /// malformed box never poisons the bounds of its siblings.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: lane_min(self.min, other.min),
            max: lane_max(self.max, other.max),
        }
    }

    /// Grow the box to enclose `p`. NaN coordinates of `p` are ignored.
    #[inline]
    pub fn include_point(&mut self, p: Vec3) {
        self.min = lane_min(self.min, p);
        self.max = lane_max(self.max, p);
    }

    /// Return true if the AABB is inverted on any axis. Assumes no NaN.
    pub fn is_empty(&self) -> bool {
        self.max.cmplt(self.min).any()
    }

    /// Box center.
    #[inline]
    pub fn centroid(&self) -> Vec3 {
        0.5 * (self.min + self.max)
    }

    /// Extent along each axis, clamped at zero.
    #[inline]
    pub fn extent(&self) -> Vec3 {
        (self.max - self.min).max(Vec3::ZERO)
    }

    /// Half the surface area; the SAH only ever compares ratios so the factor is dropped.
    ///
    /// Widened to `f64` so large scenes do not lose precision in cost sums.
    #[inline]
    pub fn half_area(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let e = self.extent();
        let (x, y, z) = (f64::from(e.x), f64::from(e.y), f64::from(e.z));
        x * y + y * z + z * x
    }

    /// Index of the axis with the largest extent (0 = x, 1 = y, 2 = z).
    pub fn longest_axis(&self) -> usize {
        let e = self.extent();
        if e.x >= e.y && e.x >= e.z {
            0
        } else if e.y >= e.z {
            1
        } else {
            2
        }
    }
}

// `Vec3::min`/`max` leave NaN handling to the SIMD backend; `f32::min`/`max` pick the
// non-NaN operand on every target.
#[inline]
fn lane_min(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z))
}

#[inline]
fn lane_max(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z))
}

impl Default for Aabb3 {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// One input item of a build: a box tagged with a caller-chosen identifier.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BuildPrimitive {
    /// Bounds of the primitive.
    pub bounds: Aabb3,
    /// Caller identifier, handed back through `create_leaf`.
    pub id: u32,
}

impl BuildPrimitive {
    /// Create a new primitive.
    pub const fn new(bounds: Aabb3, id: u32) -> Self {
        Self { bounds, id }
    }
}

/// Union of the bounds of every primitive in `prims`. Returns [`Aabb3::EMPTY`] for an empty slice.
pub fn bounds_of(prims: &[BuildPrimitive]) -> Aabb3 {
    prims
        .iter()
        .fold(Aabb3::EMPTY, |acc, p| acc.union(&p.bounds))
}

/// Bounds of the primitive centroids. Splits are chosen over these.
pub fn centroid_bounds_of(prims: &[BuildPrimitive]) -> Aabb3 {
    let mut acc = Aabb3::EMPTY;
    for p in prims {
        acc.include_point(p.bounds.centroid());
    }
    acc
}
