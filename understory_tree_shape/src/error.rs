// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by tree shape operations.

use thiserror::Error;

use crate::types::{Location, NodeId};

/// Reasons a tree shape operation was rejected.
///
/// Every check runs before the shape is touched, so a rejected call leaves the tree and its
/// consumers exactly as they were.
#[derive(Error, Copy, Clone, Debug, Eq, PartialEq)]
pub enum ShapeError {
    /// The handle was never issued, or has been deleted.
    #[error("invalid node handle {0}")]
    InvalidHandle(NodeId),

    /// The implicit root cannot be moved, removed, or deleted.
    #[error("the root node cannot be moved, removed, or deleted")]
    RootImmutable,

    /// The anchor of an after-node location has no parent.
    #[error("anchor node {0} is not attached to a parent")]
    DetachedAnchor(NodeId),

    /// The target location lies inside the moved node's own subtree.
    #[error("moving node {node} to {location:?} would create a cycle")]
    Cycle {
        /// The node being moved.
        node: NodeId,
        /// The rejected destination.
        location: Location,
    },

    /// The node still has children; deleting it would leave them parented to a retired handle.
    #[error("node {0} still has children")]
    HasChildren(NodeId),
}
