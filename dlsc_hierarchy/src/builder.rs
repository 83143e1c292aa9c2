// Copyright 2025 the DLSC BVH Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Top-down wide BVH builder driving [`NodeCallbacks`].

use alloc::vec::Vec;

use crate::callbacks::NodeCallbacks;
use crate::error::BuildError;
use crate::split::{split_binned_sah, split_middle, split_sweep_sah};
use crate::types::{Aabb3, BuildPrimitive, bounds_of};

/// Largest supported number of children per inner node.
pub const MAX_BRANCHING_FACTOR: usize = 8;

/// Trade-off between build time and hierarchy quality.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BuildQuality {
    /// Spatial-middle splits. Fastest to build.
    Low,
    /// Binned SAH splits.
    #[default]
    Medium,
    /// Exhaustive sweep SAH splits. Slowest to build, best to query.
    High,
}

/// Parameters of one [`build_hierarchy`] call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BuildArguments {
    /// Split strategy.
    pub quality: BuildQuality,
    /// Maximum number of children per inner node.
    pub max_branching_factor: usize,
    /// Ranges with at most this many primitives become leaves.
    pub max_leaf_size: usize,
    /// Number of bins used by [`BuildQuality::Medium`].
    pub bin_count: usize,
}

impl Default for BuildArguments {
    fn default() -> Self {
        Self {
            quality: BuildQuality::Medium,
            max_branching_factor: 2,
            max_leaf_size: 1,
            bin_count: 16,
        }
    }
}

impl BuildArguments {
    /// Set the split strategy.
    #[must_use]
    pub const fn with_quality(mut self, quality: BuildQuality) -> Self {
        self.quality = quality;
        self
    }

    /// Set the maximum number of children per inner node.
    #[must_use]
    pub const fn with_branching_factor(mut self, max_branching_factor: usize) -> Self {
        self.max_branching_factor = max_branching_factor;
        self
    }

    /// Set the maximum leaf occupancy.
    #[must_use]
    pub const fn with_max_leaf_size(mut self, max_leaf_size: usize) -> Self {
        self.max_leaf_size = max_leaf_size;
        self
    }

    /// Set the bin count for binned SAH.
    #[must_use]
    pub const fn with_bin_count(mut self, bin_count: usize) -> Self {
        self.bin_count = bin_count;
        self
    }

    fn validate(&self, primitive_count: usize) -> Result<(), BuildError> {
        if primitive_count == 0 {
            return Err(BuildError::EmptyInput);
        }
        if u32::try_from(primitive_count).is_err() {
            return Err(BuildError::TooManyPrimitives(primitive_count));
        }
        if !(2..=MAX_BRANCHING_FACTOR).contains(&self.max_branching_factor) {
            return Err(BuildError::InvalidBranchingFactor(self.max_branching_factor));
        }
        if self.max_leaf_size == 0 {
            return Err(BuildError::InvalidLeafSize(self.max_leaf_size));
        }
        if self.quality == BuildQuality::Medium && self.bin_count < 2 {
            return Err(BuildError::InvalidBinCount(self.bin_count));
        }
        Ok(())
    }
}

/// Build a hierarchy over `prims`, materializing every node through `callbacks`.
///
/// `prims` is reordered in place. Returns the root node handle. A single primitive
/// (or any count up to `max_leaf_size`) yields a root that is itself a leaf.
///
/// The build is deterministic: the same primitives, in any order, with the same
/// arguments produce the same sequence of callback invocations.
pub fn build_hierarchy<C: NodeCallbacks>(
    args: &BuildArguments,
    prims: &mut [BuildPrimitive],
    callbacks: &mut C,
) -> Result<C::Node, BuildError> {
    args.validate(prims.len())?;
    log::trace!(
        "building hierarchy: {} primitives, {:?}, branching factor {}",
        prims.len(),
        args.quality,
        args.max_branching_factor
    );
    let mut builder = Builder { args, callbacks };
    Ok(builder.build(prims))
}

struct Builder<'a, C> {
    args: &'a BuildArguments,
    callbacks: &'a mut C,
}

/// A contiguous run of primitives that will become one child.
#[derive(Copy, Clone)]
struct Cluster {
    start: usize,
    end: usize,
    bounds: Aabb3,
}

impl Cluster {
    fn len(&self) -> usize {
        self.end - self.start
    }
}

/// An inner node whose children are still being built.
struct Frame<N> {
    node: N,
    clusters: Vec<Cluster>,
    children: Vec<N>,
}

impl<C: NodeCallbacks> Builder<'_, C> {
    /// Build depth-first with an explicit stack, so the hierarchy depth is not bounded
    /// by the call stack. Nodes are still created in pre-order and each inner node gets
    /// its children once all of them are complete.
    fn build(&mut self, prims: &mut [BuildPrimitive]) -> C::Node {
        let mut stack: Vec<Frame<C::Node>> = Vec::new();
        let (mut start, mut end) = (0, prims.len());
        loop {
            let range = &mut prims[start..end];
            if range.len() > self.args.max_leaf_size {
                let clusters = self.open_clusters(range, start);
                let node = self.callbacks.create_node(clusters.len());
                (start, end) = (clusters[0].start, clusters[0].end);
                stack.push(Frame {
                    node,
                    children: Vec::with_capacity(clusters.len()),
                    clusters,
                });
                continue;
            }

            let mut done = self.callbacks.create_leaf(range);
            loop {
                let Some(mut frame) = stack.pop() else {
                    return done;
                };
                frame.children.push(done);
                if let Some(next) = frame.clusters.get(frame.children.len()) {
                    (start, end) = (next.start, next.end);
                    stack.push(frame);
                    break;
                }
                let bounds: Vec<Aabb3> = frame.clusters.iter().map(|c| c.bounds).collect();
                self.callbacks.set_children(frame.node, &frame.children);
                self.callbacks.set_bounds(frame.node, &bounds);
                done = frame.node;
            }
        }
    }

    /// Partition `prims` (starting at `offset` in the full slice) into up to
    /// `max_branching_factor` clusters by repeatedly splitting the largest cluster that
    /// can still be split. Ties go to the cluster with more primitives.
    fn open_clusters(&self, prims: &mut [BuildPrimitive], offset: usize) -> Vec<Cluster> {
        let mut clusters: Vec<Cluster> = Vec::with_capacity(self.args.max_branching_factor);
        clusters.push(Cluster {
            start: 0,
            end: prims.len(),
            bounds: bounds_of(prims),
        });
        while clusters.len() < self.args.max_branching_factor {
            let mut pick: Option<(usize, f64, usize)> = None;
            for (i, c) in clusters.iter().enumerate() {
                if c.len() <= self.args.max_leaf_size {
                    continue;
                }
                let a = c.bounds.half_area();
                if pick.is_none_or(|(_, best, len)| a > best || (a == best && c.len() > len)) {
                    pick = Some((i, a, c.len()));
                }
            }
            let Some((i, _, _)) = pick else {
                break;
            };
            let c = clusters[i];
            let k = self.split(&mut prims[c.start..c.end]);
            let mid = c.start + k;
            clusters[i] = Cluster {
                start: c.start,
                end: mid,
                bounds: bounds_of(&prims[c.start..mid]),
            };
            clusters.insert(
                i + 1,
                Cluster {
                    start: mid,
                    end: c.end,
                    bounds: bounds_of(&prims[mid..c.end]),
                },
            );
        }

        for c in &mut clusters {
            c.start += offset;
            c.end += offset;
        }
        clusters
    }

    fn split(&self, prims: &mut [BuildPrimitive]) -> usize {
        debug_assert!(prims.len() >= 2, "only ranges of two or more primitives are split");
        match self.args.quality {
            BuildQuality::Low => split_middle(prims),
            BuildQuality::Medium => split_binned_sah(prims, self.args.bin_count),
            BuildQuality::High => split_sweep_sah(prims),
        }
    }
}
