// Copyright 2025 the DLSC BVH Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Callback trait through which the builder materializes its tree.

use crate::types::{Aabb3, BuildPrimitive};

/// Node construction callbacks invoked by [`build_hierarchy`](crate::build_hierarchy).
///
/// The builder never stores nodes itself. Every node it decides on is created through
/// these callbacks and referred to afterwards only by the returned [`NodeCallbacks::Node`]
/// handle, so implementors own both the node layout and its storage. Implementors are
/// also where a per-build node counter belongs.
pub trait NodeCallbacks {
    /// Handle to a node created by this implementation.
    type Node: Copy;

    /// Create a default-initialized inner node that will receive `child_count` children.
    fn create_node(&mut self, child_count: usize) -> Self::Node;

    /// Create a leaf holding `prims`.
    ///
    /// With `max_leaf_size == 1` this is always exactly one primitive.
    fn create_leaf(&mut self, prims: &[BuildPrimitive]) -> Self::Node;

    /// Attach `children` to the inner node `node`, in order.
    fn set_children(&mut self, node: Self::Node, children: &[Self::Node]);

    /// Attach the per-child bounds of the inner node `node`, in the same order as its children.
    fn set_bounds(&mut self, node: Self::Node, bounds: &[Aabb3]);
}
