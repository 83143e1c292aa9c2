// Copyright 2025 the DLSC BVH Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bridge between the hierarchy builder's callbacks and a build-scoped generic tree.

use alloc::vec::Vec;

use dlsc_hierarchy::{
    Aabb3, BuildArguments, BuildError, BuildPrimitive, BuildQuality, NodeCallbacks,
    build_hierarchy,
};

use crate::entry::CacheEntry;

/// Most entries a single index can reference.
///
/// A K-ary tree with one entry per leaf has fewer than `2 * n` nodes, and node positions
/// must fit below the leaf tag bit.
pub const MAX_ENTRIES: usize = 1 << 30;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeIdx(u32);

impl NodeIdx {
    const fn new(i: u32) -> Self {
        Self(i)
    }

    pub(crate) const fn get(self) -> usize {
        self.0 as usize
    }
}

/// A node of the builder's output, before flattening.
#[derive(Clone, Debug)]
pub(crate) enum GenericNode<const K: usize> {
    Inner {
        children: [Option<NodeIdx>; K],
        bounds: [Aabb3; K],
    },
    Leaf {
        index: u32,
    },
}

/// The builder's output: an arena of nodes plus the root. Dropped right after flattening.
#[derive(Debug)]
pub(crate) struct GenericTree<const K: usize> {
    pub(crate) arena: Vec<GenericNode<K>>,
    pub(crate) root: NodeIdx,
    pub(crate) node_count: usize,
}

impl<const K: usize> GenericTree<K> {
    pub(crate) fn node(&self, idx: NodeIdx) -> &GenericNode<K> {
        &self.arena[idx.get()]
    }

    #[cfg(test)]
    pub(crate) fn is_leaf(&self, idx: NodeIdx) -> bool {
        matches!(self.node(idx), GenericNode::Leaf { .. })
    }
}

/// [`NodeCallbacks`] implementation allocating [`GenericNode`]s from its own arena.
///
/// One instance serves exactly one build; the node counter is its only state besides
/// the arena.
#[derive(Debug)]
pub(crate) struct GenericTreeBuilder<const K: usize> {
    arena: Vec<GenericNode<K>>,
    node_counter: u32,
}

impl<const K: usize> GenericTreeBuilder<K> {
    fn new(capacity: usize) -> Self {
        Self {
            arena: Vec::with_capacity(capacity),
            node_counter: 0,
        }
    }

    fn alloc(&mut self, node: GenericNode<K>) -> NodeIdx {
        let idx = NodeIdx::new(self.node_counter);
        self.node_counter += 1;
        self.arena.push(node);
        idx
    }

    /// Build the generic tree over `entries`, one box of half-size `radius` per entry.
    ///
    /// Returns `Ok(None)` for an empty entry list: the builder is never invoked without
    /// primitives.
    pub(crate) fn build_tree<E: CacheEntry>(
        entries: &[E],
        radius: f32,
        quality: BuildQuality,
    ) -> Result<Option<GenericTree<K>>, BuildError> {
        if entries.is_empty() {
            return Ok(None);
        }
        if entries.len() > MAX_ENTRIES {
            return Err(BuildError::TooManyPrimitives(entries.len()));
        }

        #[allow(
            clippy::cast_possible_truncation,
            reason = "Entry count is bounded by MAX_ENTRIES above."
        )]
        let mut prims: Vec<BuildPrimitive> = entries
            .iter()
            .enumerate()
            .map(|(i, e)| {
                BuildPrimitive::new(Aabb3::from_center_radius(e.position(), radius), i as u32)
            })
            .collect();

        let args = BuildArguments::default()
            .with_quality(quality)
            .with_branching_factor(K)
            .with_max_leaf_size(1);
        let mut callbacks = Self::new(2 * entries.len());
        let root = build_hierarchy(&args, &mut prims, &mut callbacks)?;

        Ok(Some(GenericTree {
            node_count: callbacks.node_counter as usize,
            arena: callbacks.arena,
            root,
        }))
    }
}

impl<const K: usize> NodeCallbacks for GenericTreeBuilder<K> {
    type Node = NodeIdx;

    fn create_node(&mut self, child_count: usize) -> NodeIdx {
        debug_assert!(child_count <= K, "child count exceeds branching factor");
        self.alloc(GenericNode::Inner {
            children: [None; K],
            bounds: [Aabb3::EMPTY; K],
        })
    }

    fn create_leaf(&mut self, prims: &[BuildPrimitive]) -> NodeIdx {
        // The build runs with a maximum leaf size of 1.
        debug_assert_eq!(prims.len(), 1, "leaves hold exactly one entry");
        self.alloc(GenericNode::Leaf { index: prims[0].id })
    }

    fn set_children(&mut self, node: NodeIdx, children: &[NodeIdx]) {
        if let GenericNode::Inner { children: slots, .. } = &mut self.arena[node.get()] {
            for (slot, child) in slots.iter_mut().zip(children) {
                *slot = Some(*child);
            }
        }
    }

    fn set_bounds(&mut self, node: NodeIdx, bounds: &[Aabb3]) {
        if let GenericNode::Inner { bounds: slots, .. } = &mut self.arena[node.get()] {
            for (slot, b) in slots.iter_mut().zip(bounds) {
                *slot = *b;
            }
        }
    }
}
