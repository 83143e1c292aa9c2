// Copyright 2025 the DLSC BVH Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-size nodes of the flattened hierarchy.
//!
//! Every node is seven 32-bit words. The last word, `node_data`, selects the
//! interpretation of the other six:
//!
//! - high bit clear: an inner node. The six words are the box min/max and `node_data` is
//!   the skip index, the position just past this node's subtree.
//! - high bit set ([`LEAF_FLAG`]): a leaf. The first word holds the entry index and the
//!   low bits of `node_data` hold the position following the leaf.
//!
//! Children of an inner node follow it immediately (pre-order layout), so a query only
//! ever moves forward: one step to descend or to reach the next sibling, a jump to the
//! skip index to prune a subtree.

use dlsc_hierarchy::Aabb3;
use glam::Vec3;

/// Tag bit marking a leaf in `node_data`.
pub const LEAF_FLAG: u32 = 0x8000_0000;

/// Whether `node_data` describes a leaf.
#[inline]
pub const fn is_leaf(node_data: u32) -> bool {
    node_data & LEAF_FLAG != 0
}

/// `node_data` with the leaf tag stripped.
#[inline]
pub const fn skip_index(node_data: u32) -> u32 {
    node_data & !LEAF_FLAG
}

/// One slot of the flattened hierarchy.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "bytemuck", derive(bytemuck::Pod, bytemuck::Zeroable))]
pub struct ArrayNode {
    /// Box min/max as `f32` bits for inner nodes; `words[0]` is the entry index for leaves.
    words: [u32; 6],
    pub(crate) node_data: u32,
}

impl ArrayNode {
    /// A leaf referencing entry `entry_index`, followed by slot `next`.
    pub(crate) const fn leaf(entry_index: u32, next: u32) -> Self {
        Self {
            words: [entry_index, 0, 0, 0, 0, 0],
            node_data: next | LEAF_FLAG,
        }
    }

    /// Store the bounds of an inner node, leaving `node_data` untouched.
    pub(crate) fn set_bounds(&mut self, bounds: &Aabb3) {
        let (min, max) = (bounds.min, bounds.max);
        self.words = [
            min.x.to_bits(),
            min.y.to_bits(),
            min.z.to_bits(),
            max.x.to_bits(),
            max.y.to_bits(),
            max.z.to_bits(),
        ];
    }

    /// Raw `node_data` word.
    #[inline]
    pub const fn node_data(&self) -> u32 {
        self.node_data
    }

    /// Whether this slot is a leaf.
    #[inline]
    pub const fn is_leaf(&self) -> bool {
        is_leaf(self.node_data)
    }

    /// For an inner node, the position just past its subtree. For a leaf, the next position.
    #[inline]
    pub const fn skip_index(&self) -> u32 {
        skip_index(self.node_data)
    }

    /// The referenced entry index, if this slot is a leaf.
    pub fn entry_index(&self) -> Option<u32> {
        self.is_leaf().then(|| self.leaf_entry())
    }

    /// The entry index without checking the tag.
    #[inline]
    pub(crate) fn leaf_entry(&self) -> u32 {
        self.words[0]
    }

    /// The stored bounds, if this slot is an inner node.
    pub fn bounds(&self) -> Option<Aabb3> {
        (!self.is_leaf()).then(|| Aabb3::new(self.bbox_min(), self.bbox_max()))
    }

    #[inline]
    fn bbox_min(&self) -> Vec3 {
        Vec3::new(
            f32::from_bits(self.words[0]),
            f32::from_bits(self.words[1]),
            f32::from_bits(self.words[2]),
        )
    }

    #[inline]
    fn bbox_max(&self) -> Vec3 {
        Vec3::new(
            f32::from_bits(self.words[3]),
            f32::from_bits(self.words[4]),
            f32::from_bits(self.words[5]),
        )
    }

    /// Inclusive point-in-box test against the stored bounds. NaN never matches.
    #[inline]
    pub(crate) fn contains_point(&self, p: Vec3) -> bool {
        let (min, max) = (self.bbox_min(), self.bbox_max());
        p.x >= min.x
            && p.x <= max.x
            && p.y >= min.y
            && p.y <= max.y
            && p.z >= min.z
            && p.z <= max.z
    }
}
