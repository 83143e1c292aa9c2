// Copyright 2025 the DLSC BVH Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DLSC BVH: a flattened, stackless bounding volume hierarchy over direct-light sampling
//! cache entries.
//!
//! A renderer that caches light samples needs to answer one question per shading point:
//! is there a cached entry close enough to reuse? [`DlscBvh`] answers it:
//!
//! - Each entry becomes an axis-aligned cube of half-size `radius` around its position.
//! - The cubes are organized by the `dlsc_hierarchy` builder into a K-ary tree.
//! - The tree is flattened into a pre-order array of fixed-size [`ArrayNode`]s with skip
//!   indices, so queries walk it forward without a stack.
//!
//! A query returns the first entry (in array order) within `radius` of the point that
//! shares its volume flag and, for surface samples, whose normal lies within the angle
//! tolerance. It is a satisficing search, not a nearest-neighbor search.
//!
//! # Example
//!
//! ```rust
//! use dlsc_bvh::{DlscBvh, SampleEntry};
//! use glam::Vec3;
//!
//! let entries = vec![
//!     SampleEntry::surface(Vec3::new(0.0, 0.0, 0.0), Vec3::Z),
//!     SampleEntry::surface(Vec3::new(1.0, 0.0, 0.0), Vec3::Z),
//!     SampleEntry::volume(Vec3::new(0.0, 1.0, 0.0)),
//! ];
//! let bvh = DlscBvh::new(&entries, 0.15, 10.0);
//!
//! // Close to the second entry, with a matching normal.
//! let hit = bvh.get_entry(Vec3::new(1.05, 0.0, 0.0), Vec3::Z, false);
//! assert_eq!(hit.map(|e| e.position), Some(Vec3::new(1.0, 0.0, 0.0)));
//!
//! // Same place, but the normal points the other way.
//! assert!(bvh.get_entry(Vec3::new(1.05, 0.0, 0.0), -Vec3::Z, false).is_none());
//!
//! // Volume queries only see volume entries.
//! assert_eq!(bvh.get_entry_index(Vec3::new(0.0, 1.1, 0.0), Vec3::ZERO, true), Some(2));
//! ```
//!
//! ### Float semantics
//!
//! Positions and normals are not validated. A NaN query point never matches anything;
//! entries with NaN positions are never returned.
//!
//! ## Features
//!
//! - `std` (enabled by default): use the standard library for float math.
//! - `libm`: use `libm` for float math in `no_std` builds.
//! - `bytemuck`: derive `Pod` for [`ArrayNode`] and expose [`DlscBvh::as_bytes`].

#![no_std]

extern crate alloc;

#[cfg(any(feature = "std", test))]
extern crate std;

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("dlsc_bvh requires either the `std` or `libm` feature");

pub mod array;
pub mod entry;
mod flatten;
mod glue;
pub mod index;

#[cfg(test)]
mod testing;

pub use array::{ArrayNode, LEAF_FLAG, is_leaf, skip_index};
pub use dlsc_hierarchy::BuildQuality;
pub use entry::{CacheEntry, SampleEntry};
pub use glue::MAX_ENTRIES;
pub use index::{DlscBvh, DlscParams};
