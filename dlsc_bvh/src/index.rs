// Copyright 2025 the DLSC BVH Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `DlscBvh` API: construction and the stackless entry lookup.

use alloc::vec::Vec;
use core::fmt::{self, Debug};

use dlsc_hierarchy::BuildQuality;
use glam::Vec3;

use crate::array::{ArrayNode, is_leaf, skip_index};
use crate::entry::CacheEntry;
use crate::flatten::flatten;
use crate::glue::GenericTreeBuilder;

/// Construction parameters of a [`DlscBvh`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DlscParams {
    /// Lookup radius. Also the half-size of each entry's box in the hierarchy.
    pub radius: f32,
    /// Largest accepted angle between query and entry normals, in degrees.
    pub normal_angle_deg: f32,
    /// Hierarchy build quality. The index is built once and queried many times, so
    /// [`BuildQuality::High`] is the default.
    pub quality: BuildQuality,
}

impl Default for DlscParams {
    fn default() -> Self {
        Self::new(0.15, 10.0)
    }
}

impl DlscParams {
    /// Parameters with the given tolerances and the default build quality.
    pub const fn new(radius: f32, normal_angle_deg: f32) -> Self {
        Self {
            radius,
            normal_angle_deg,
            quality: BuildQuality::High,
        }
    }

    /// Set the build quality.
    #[must_use]
    pub const fn with_quality(mut self, quality: BuildQuality) -> Self {
        self.quality = quality;
        self
    }
}

#[cfg(feature = "std")]
fn cos_degrees(deg: f32) -> f32 {
    deg.to_radians().cos()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
fn cos_degrees(deg: f32) -> f32 {
    libm::cosf(deg.to_radians())
}

/// A read-only index over a borrowed slice of cache entries.
///
/// `K` is the branching factor of the hierarchy the array is flattened from.
///
/// The index borrows `entries` for `'a` and never outlives them. Once built it is
/// immutable, so any number of threads may query it at once.
pub struct DlscBvh<'a, E, const K: usize = 4> {
    entries: &'a [E],
    radius: f32,
    radius2: f32,
    normal_cos_angle: f32,
    nodes: Vec<ArrayNode>,
}

impl<'a, E: CacheEntry> DlscBvh<'a, E> {
    /// Build an index with the default branching factor and build quality.
    pub fn new(entries: &'a [E], radius: f32, normal_angle_deg: f32) -> Self {
        Self::build(entries, &DlscParams::new(radius, normal_angle_deg))
    }

    /// Build an index with the default branching factor.
    pub fn with_params(entries: &'a [E], params: &DlscParams) -> Self {
        Self::build(entries, params)
    }
}

impl<'a, E: CacheEntry, const K: usize> DlscBvh<'a, E, K> {
    /// Build an index over `entries`.
    ///
    /// An empty `entries` slice yields an empty index. If the hierarchy builder refuses
    /// the input, the failure is logged and the index is left empty as well; every query
    /// on an empty index reports no match.
    pub fn build(entries: &'a [E], params: &DlscParams) -> Self {
        let built = GenericTreeBuilder::<K>::build_tree(entries, params.radius, params.quality);
        let nodes = match built {
            Ok(Some(tree)) => flatten(&tree),
            Ok(None) => {
                log::debug!("no cache entries, the index is empty");
                Vec::new()
            }
            Err(err) => {
                log::warn!("cache index build failed ({err}), the index is left empty");
                Vec::new()
            }
        };

        let bvh = Self {
            entries,
            radius: params.radius,
            radius2: params.radius * params.radius,
            normal_cos_angle: cos_degrees(params.normal_angle_deg),
            nodes,
        };
        if !bvh.is_empty() {
            log::debug!(
                "cache index built: {} entries, {} nodes, depth {}",
                entries.len(),
                bvh.node_count(),
                bvh.depth()
            );
        }
        bvh
    }

    /// The first entry, in hierarchy pre-order, usable at `p` with normal `n`.
    ///
    /// An entry is usable when it lies within the radius of `p`, has the same volume flag,
    /// and (for surface queries) its normal is within the angle tolerance of `n`. This is
    /// not a nearest-entry search.
    pub fn get_entry(&self, p: Vec3, n: Vec3, is_volume: bool) -> Option<&'a E> {
        let entries = self.entries;
        self.get_entry_index(p, n, is_volume)
            .map(|index| &entries[index])
    }

    /// Like [`DlscBvh::get_entry`], returning the entry's index in the borrowed slice.
    pub fn get_entry_index(&self, p: Vec3, n: Vec3, is_volume: bool) -> Option<usize> {
        let mut current_node = 0_usize;
        let stop_node = self
            .nodes
            .first()
            .map_or(0, |root| skip_index(root.node_data) as usize);

        while current_node < stop_node {
            let node = &self.nodes[current_node];
            let node_data = node.node_data;
            if is_leaf(node_data) {
                let index = node.leaf_entry() as usize;
                let entry = &self.entries[index];
                if p.distance_squared(entry.position()) <= self.radius2
                    && is_volume == entry.is_volume()
                    && (is_volume || n.dot(entry.normal()) >= self.normal_cos_angle)
                {
                    return Some(index);
                }
                current_node += 1;
            } else if node.contains_point(p) {
                current_node += 1;
            } else {
                // The tag is known to be clear here.
                current_node = node_data as usize;
            }
        }

        None
    }

    /// Number of array nodes. Zero for an empty index.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// True if the index has no nodes and therefore never matches.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The flattened hierarchy.
    pub fn nodes(&self) -> &[ArrayNode] {
        &self.nodes
    }

    /// The indexed entries.
    pub fn entries(&self) -> &'a [E] {
        self.entries
    }

    /// Lookup radius.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Cosine of the normal angle tolerance.
    pub fn normal_cos_angle(&self) -> f32 {
        self.normal_cos_angle
    }

    /// Number of nodes on the longest root-to-leaf path. Zero for an empty index.
    pub fn depth(&self) -> usize {
        // Ends of the inner subtrees enclosing the current position.
        let mut open: Vec<usize> = Vec::new();
        let mut depth = 0;
        for (i, node) in self.nodes.iter().enumerate() {
            while open.last().is_some_and(|&end| end <= i) {
                open.pop();
            }
            depth = depth.max(open.len() + 1);
            if !node.is_leaf() {
                open.push(node.skip_index() as usize);
            }
        }
        depth
    }

    /// The flattened hierarchy as raw bytes, for upload to a GPU buffer.
    #[cfg(feature = "bytemuck")]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.nodes)
    }
}

impl<E, const K: usize> Debug for DlscBvh<'_, E, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let leaves = self.nodes.iter().filter(|n| n.is_leaf()).count();
        f.debug_struct("DlscBvh")
            .field("branching_factor", &K)
            .field("entries", &self.entries.len())
            .field("nodes", &self.nodes.len())
            .field("leaves", &leaves)
            .field("radius", &self.radius)
            .field("normal_cos_angle", &self.normal_cos_angle)
            .finish_non_exhaustive()
    }
}
