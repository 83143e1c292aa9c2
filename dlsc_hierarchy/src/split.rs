// Copyright 2025 the DLSC BVH Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Split strategies used by the builder.
//!
//! Every strategy reorders the cluster in place and returns a split point `k` with
//! `0 < k < len`, so that `prims[..k]` and `prims[k..]` become two sibling clusters.
//!
//! SAH note
//! --------
//! For a split point `k` along a sorted axis we minimize:
//!
//! `cost(k) = area(LB_k) * k + area(RB_k) * (n - k)`
//!
//! where `LB_k` and `RB_k` are the bounding boxes of the first `k` and remaining `n - k` items.
//! Areas are accumulated in `f64`.

use alloc::vec;
use alloc::vec::Vec;

use crate::types::{Aabb3, BuildPrimitive, centroid_bounds_of};

/// Order by centroid along `axis`, then by identifier so the result never depends on
/// the incoming order.
///
/// `total_cmp` keeps the order total when centroids are NaN.
fn sort_along_axis(prims: &mut [BuildPrimitive], axis: usize) {
    prims.sort_by(|a, b| {
        let ca = a.bounds.centroid()[axis];
        let cb = b.bounds.centroid()[axis];
        ca.total_cmp(&cb).then(a.id.cmp(&b.id))
    });
}

/// Whether a centroid extent leaves room for a split along its axis.
#[inline]
fn splittable(extent: f32) -> bool {
    extent.is_finite() && extent > 0.0
}

/// Whether a split with `cost` and `k` primitives on the left beats `best`, given as
/// `(cost, left count)`. Equal costs go to the more balanced split; NaN costs never win.
#[inline]
fn improves(best: Option<(f64, usize)>, cost: f64, k: usize, n: usize) -> bool {
    if cost.is_nan() {
        return false;
    }
    best.is_none_or(|(bc, bk)| {
        cost < bc || (cost == bc && (2 * k).abs_diff(n) < (2 * bk).abs_diff(n))
    })
}

/// Half/half split on the longest centroid axis. Used when every other strategy degenerates.
pub(crate) fn split_object_median(prims: &mut [BuildPrimitive]) -> usize {
    let axis = centroid_bounds_of(prims).longest_axis();
    sort_along_axis(prims, axis);
    prims.len() / 2
}

/// Split at the spatial middle of the longest centroid axis.
pub(crate) fn split_middle(prims: &mut [BuildPrimitive]) -> usize {
    let cb = centroid_bounds_of(prims);
    let axis = cb.longest_axis();
    let mid = cb.centroid()[axis];
    sort_along_axis(prims, axis);
    let k = prims.partition_point(|p| p.bounds.centroid()[axis] < mid);
    if k == 0 || k == prims.len() {
        prims.len() / 2
    } else {
        k
    }
}

#[derive(Copy, Clone)]
struct Bin {
    bounds: Aabb3,
    count: usize,
}

impl Default for Bin {
    fn default() -> Self {
        Self {
            bounds: Aabb3::EMPTY,
            count: 0,
        }
    }
}

/// Bin index of a centroid coordinate, clamped into `0..bin_count`.
#[inline]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "The scaled coordinate is clamped into 0..bin_count before conversion."
)]
fn bin_of(c: f32, min: f32, scale: f32, bin_count: usize) -> usize {
    let b = ((c - min) * scale) as usize;
    b.min(bin_count - 1)
}

/// Binned SAH over the centroid bounds.
pub(crate) fn split_binned_sah(prims: &mut [BuildPrimitive], bin_count: usize) -> usize {
    let n = prims.len();
    let cb = centroid_bounds_of(prims);
    let extent = cb.extent();
    // (cost, axis, first bin of the right side, left count)
    let mut best: Option<(f64, usize, usize, usize)> = None;
    let mut bins = vec![Bin::default(); bin_count];
    let mut suffix = vec![(Aabb3::EMPTY, 0_usize); bin_count];
    for axis in 0..3 {
        if !splittable(extent[axis]) {
            continue;
        }
        #[allow(
            clippy::cast_precision_loss,
            reason = "Bin counts are tiny compared to the f32 mantissa."
        )]
        let scale = bin_count as f32 / extent[axis];
        bins.fill(Bin::default());
        for p in prims.iter() {
            let b = bin_of(p.bounds.centroid()[axis], cb.min[axis], scale, bin_count);
            bins[b].bounds = bins[b].bounds.union(&p.bounds);
            bins[b].count += 1;
        }

        // Suffix sweep, then evaluate every split while growing the prefix.
        let mut acc = (Aabb3::EMPTY, 0_usize);
        for b in (0..bin_count).rev() {
            acc = (acc.0.union(&bins[b].bounds), acc.1 + bins[b].count);
            suffix[b] = acc;
        }
        let mut left = (Aabb3::EMPTY, 0_usize);
        for split in 1..bin_count {
            left = (left.0.union(&bins[split - 1].bounds), left.1 + bins[split - 1].count);
            let (rb, rc) = suffix[split];
            if left.1 == 0 || rc == 0 {
                continue;
            }
            #[allow(
                clippy::cast_precision_loss,
                reason = "Counts only weight the SAH cost; exactness is not required."
            )]
            let cost = left.0.half_area() * left.1 as f64 + rb.half_area() * rc as f64;
            if improves(best.map(|b| (b.0, b.3)), cost, left.1, n) {
                best = Some((cost, axis, split, left.1));
            }
        }
    }

    let Some((_, axis, split, _)) = best else {
        return split_object_median(prims);
    };
    #[allow(
        clippy::cast_precision_loss,
        reason = "Bin counts are tiny compared to the f32 mantissa."
    )]
    let scale = bin_count as f32 / extent[axis];
    let min = cb.min[axis];
    sort_along_axis(prims, axis);
    let k = prims
        .partition_point(|p| bin_of(p.bounds.centroid()[axis], min, scale, bin_count) < split);
    if k == 0 || k == n { n / 2 } else { k }
}

/// Full sweep SAH: sort along each axis, precompute prefix/suffix AABBs, and
/// choose `k` that minimizes `area(LB_k) * k + area(RB_k) * (n - k)`.
///
/// Axes along which every centroid coincides are skipped; if none remain the split
/// falls back to the object median.
pub(crate) fn split_sweep_sah(prims: &mut [BuildPrimitive]) -> usize {
    let n = prims.len();
    let extent = centroid_bounds_of(prims).extent();
    // (cost, axis, k)
    let mut best: Option<(f64, usize, usize)> = None;
    let mut prefix: Vec<Aabb3> = Vec::with_capacity(n);
    let mut suffix: Vec<Aabb3> = Vec::with_capacity(n);
    for axis in 0..3 {
        if !splittable(extent[axis]) {
            continue;
        }
        sort_along_axis(prims, axis);

        // Precompute prefix/suffix bboxes for O(1) split evaluation
        prefix.clear();
        let mut acc = Aabb3::EMPTY;
        for p in prims.iter() {
            acc = acc.union(&p.bounds);
            prefix.push(acc);
        }
        suffix.clear();
        acc = Aabb3::EMPTY;
        for p in prims.iter().rev() {
            acc = acc.union(&p.bounds);
            suffix.push(acc);
        }
        suffix.reverse();

        for k in 1..n {
            #[allow(
                clippy::cast_precision_loss,
                reason = "Counts only weight the SAH cost; exactness is not required."
            )]
            let cost =
                prefix[k - 1].half_area() * k as f64 + suffix[k].half_area() * (n - k) as f64;
            if improves(best.map(|(c, _, bk)| (c, bk)), cost, k, n) {
                best = Some((cost, axis, k));
            }
        }
    }

    match best {
        Some((_, axis, k)) => {
            sort_along_axis(prims, axis);
            k
        }
        None => split_object_median(prims),
    }
}
