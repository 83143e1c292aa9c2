// Copyright 2025 the DLSC BVH Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DLSC Hierarchy: a callback-driven wide BVH builder over tagged 3D AABBs.
//!
//! The builder decides the shape of the hierarchy and nothing else:
//!
//! - Input is a slice of [`BuildPrimitive`]s, each an [`Aabb3`] tagged with a `u32` id.
//! - Every node is created through the [`NodeCallbacks`] trait, so callers choose the node
//!   layout and own its storage (typically a build-scoped arena).
//! - Inner nodes have up to [`BuildArguments::max_branching_factor`] children; leaves hold at
//!   most [`BuildArguments::max_leaf_size`] primitives.
//!
//! [`BuildQuality`] selects the split strategy: spatial middle, binned SAH, or a full sweep SAH.
//!
//! # Example
//!
//! ```rust
//! use dlsc_hierarchy::{Aabb3, BuildArguments, BuildPrimitive, NodeCallbacks, build_hierarchy};
//! use glam::Vec3;
//!
//! // Count nodes without storing anything.
//! #[derive(Default)]
//! struct Counter(usize);
//!
//! impl NodeCallbacks for Counter {
//!     type Node = ();
//!     fn create_node(&mut self, _child_count: usize) { self.0 += 1; }
//!     fn create_leaf(&mut self, _prims: &[BuildPrimitive]) { self.0 += 1; }
//!     fn set_children(&mut self, _node: (), _children: &[()]) {}
//!     fn set_bounds(&mut self, _node: (), _bounds: &[Aabb3]) {}
//! }
//!
//! let mut prims: Vec<_> = (0..3)
//!     .map(|i| BuildPrimitive::new(Aabb3::from_center_radius(Vec3::X * i as f32, 0.1), i))
//!     .collect();
//! let mut counter = Counter::default();
//! build_hierarchy(&BuildArguments::default(), &mut prims, &mut counter).unwrap();
//! // Three leaves below two binary inner nodes.
//! assert_eq!(counter.0, 5);
//! ```
//!
//! ### Float semantics
//!
//! Coordinates are not validated. NaN bounds do not panic; they simply produce boxes that
//! never contain anything.

#![no_std]

extern crate alloc;

pub mod builder;
pub mod callbacks;
pub mod error;
mod split;
pub mod types;

pub use builder::{BuildArguments, BuildQuality, MAX_BRANCHING_FACTOR, build_hierarchy};
pub use callbacks::NodeCallbacks;
pub use error::BuildError;
pub use types::{Aabb3, BuildPrimitive};
