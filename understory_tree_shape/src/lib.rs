// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tree_shape --heading-base-level=0

//! Understory Tree Shape: an ordered tree stored as flat link records, with move notifications.
//!
//! Understory Tree Shape is the structural half of a tree-shaped data source.
//! It is a building block for incremental consumers (recalculation engines, views, caches)
//! that need to follow how nodes move without owning the nodes themselves.
//!
//! - Stores each node's parent, first/last child, and next/previous sibling in one flat array
//!   addressed by small integer handles. There is no per-node allocation.
//! - Keeps an implicit root at [`NodeId::ROOT`] that is always present.
//! - Describes positions with [`Location`] (after a node, or first child of a node) rather than
//!   `(parent, index)` pairs.
//! - Notifies registered [`TreeShapeConsumer`]s synchronously, in registration order, after
//!   every move or removal, passing the node's previous location.
//!
//! ## Not a content store
//!
//! Nodes carry no payload. Keep your data in a side table keyed by [`NodeId`]. This crate only
//! answers "who is my parent, child, sibling" and "where did this node come from".
//! It has no traversal or query layer beyond direct lookups and [`TreeShape::children`].
//!
//! ## API overview
//!
//! - [`TreeShape`]: owns the shape, handle table, and consumer registrations.
//! - [`TreeShapeReader`]: read surface (link lookups and [`Location`] derivations).
//!   Consumers receive it as `&dyn TreeShapeReader`.
//! - [`TreeShapeConsumer`]: observer callback for moves and removals.
//! - [`ShapeError`]: reasons an operation was rejected. Rejected operations never mutate.
//! - [`HandleTable`] and [`FrugalList`]: the handle allocator and small registration list
//!   the tree is built on, usable on their own.
//!
//! Key operations:
//! - [`TreeShape::create_node`] → unattached [`NodeId`]
//! - [`TreeShape::move_node`] / [`TreeShape::remove_node`]
//! - [`TreeShape::delete_node`] / [`TreeShape::delete_subtree`]
//! - [`TreeShape::open_tree`] / [`TreeShape::close_tree`]
//!
//! ## Handles and liveness
//!
//! Deleted handles are reissued by later creations. A deleted node is still alive while its
//! removal notification is delivered, so a notification alone does not tell a removal from a
//! deletion. Whoever calls [`TreeShape::delete_node`] or [`TreeShape::delete_subtree`] knows
//! which handles went away and must drop them from any cache keyed by [`NodeId`].
//! Operations given a dead handle fail with [`ShapeError::InvalidHandle`] instead of touching
//! the shape.
//!
//! ## Reentrancy
//!
//! The tree is exclusively borrowed while a notification is delivered, so consumers cannot
//! mutate it from inside [`TreeShapeConsumer::node_moved`]. This is narrower than a protocol
//! that lets observers edit the tree mid-notification: here that is ruled out at compile time.
//! Queue follow-up edits and apply them once the mutating call returns.
//!
//! ```compile_fail
//! use understory_tree_shape::{Location, NodeId, TreeShapeConsumer, TreeShapeReader};
//!
//! struct Reparent;
//!
//! impl TreeShapeConsumer for Reparent {
//!     fn node_moved(&self, node: NodeId, _: Option<Location>, tree: &dyn TreeShapeReader) {
//!         // The reader has no mutating surface.
//!         tree.move_node(node, Location::FirstChildOf(NodeId::ROOT));
//!     }
//! }
//! ```
//!
//! ## Minimal usage
//!
//! ```
//! use understory_tree_shape::{NodeId, TreeShape, TreeShapeReader};
//!
//! let mut tree = TreeShape::new();
//!
//! // Append three children to the root.
//! let mut nodes = Vec::new();
//! for _ in 0..3 {
//!     let node = tree.create_node();
//!     let end = tree.last_child_of(NodeId::ROOT).unwrap();
//!     tree.move_node(node, end).unwrap();
//!     nodes.push(node);
//! }
//! let (a, b, c) = (nodes[0], nodes[1], nodes[2]);
//! assert_eq!(tree.children(NodeId::ROOT).unwrap().collect::<Vec<_>>(), [a, b, c]);
//!
//! // Detach the middle one.
//! tree.remove_node(b).unwrap();
//! assert_eq!(tree.next_sibling(a), Ok(Some(c)));
//! assert_eq!(tree.parent(b), Ok(None));
//! ```
//!
//! ### Following moves
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use understory_tree_shape::{Location, NodeId, TreeShape, TreeShapeConsumer, TreeShapeReader};
//!
//! #[derive(Default)]
//! struct CountMoves(Cell<usize>);
//!
//! impl TreeShapeConsumer for CountMoves {
//!     fn node_moved(&self, _: NodeId, _: Option<Location>, _: &dyn TreeShapeReader) {
//!         self.0.set(self.0.get() + 1);
//!     }
//! }
//!
//! let mut tree = TreeShape::new();
//! let counter = Rc::new(CountMoves::default());
//! let _ = tree.open_tree(counter.clone());
//!
//! let n = tree.create_node();
//! tree.move_node(n, Location::FirstChildOf(NodeId::ROOT)).unwrap();
//! tree.delete_node(n).unwrap();
//! assert_eq!(counter.0.get(), 2);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod frugal;
mod handles;
mod store;
mod traits;
mod tree;
mod types;

pub use error::ShapeError;
pub use frugal::FrugalList;
pub use handles::HandleTable;
pub use traits::{TreeShapeConsumer, TreeShapeReader};
pub use tree::{Children, TreeShape};
pub use types::{Location, NodeId};
