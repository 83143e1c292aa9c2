// Copyright 2025 the DLSC BVH Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Depth-first serialization of a [`GenericTree`] into [`ArrayNode`]s.

use alloc::vec;
use alloc::vec::Vec;

use dlsc_hierarchy::Aabb3;

use crate::array::ArrayNode;
use crate::glue::{GenericNode, GenericTree, NodeIdx};

/// Flatten `tree` into exactly `tree.node_count` slots in pre-order.
///
/// Every inner node ends up with its skip index, one past its last descendant, and every
/// leaf with the position following it. For the root this is the array length, with the
/// leaf tag kept when the root is a leaf.
///
/// The walk uses an explicit stack, so deep trees do not exhaust the call stack.
pub(crate) fn flatten<const K: usize>(tree: &GenericTree<K>) -> Vec<ArrayNode> {
    enum Step {
        Enter(NodeIdx),
        /// All descendants of the inner node at this slot have been written.
        Exit(usize),
    }

    let mut nodes = vec![ArrayNode::default(); tree.node_count];
    let mut offset: u32 = 0;
    let mut stack = vec![Step::Enter(tree.root)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(node) => {
                let slot = offset as usize;
                offset += 1;
                match tree.node(node) {
                    GenericNode::Leaf { index } => nodes[slot] = ArrayNode::leaf(*index, offset),
                    GenericNode::Inner { children, bounds } => {
                        let bbox = children
                            .iter()
                            .zip(bounds)
                            .filter(|(child, _)| child.is_some())
                            .fold(Aabb3::EMPTY, |acc, (_, b)| acc.union(b));
                        nodes[slot].set_bounds(&bbox);
                        stack.push(Step::Exit(slot));
                        stack.extend(children.iter().rev().flatten().map(|&c| Step::Enter(c)));
                    }
                }
            }
            Step::Exit(slot) => nodes[slot].node_data = offset,
        }
    }
    debug_assert_eq!(offset as usize, nodes.len(), "one slot per generic node");
    nodes
}
