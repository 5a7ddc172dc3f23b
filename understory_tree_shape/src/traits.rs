// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reader and consumer traits: the seam between a tree shape and the code that follows it.

use crate::error::ShapeError;
use crate::types::{Location, NodeId};

/// Read access to a tree's shape.
///
/// Every query validates its handle and fails with [`ShapeError::InvalidHandle`] for handles
/// that were never issued or have been deleted. [`NodeId::ROOT`] is always valid.
pub trait TreeShapeReader {
    /// Returns true if `node` is the root or a live, issued handle.
    fn is_alive(&self, node: NodeId) -> bool;

    /// Parent of `node`, or `None` if it is unattached or the root.
    fn parent(&self, node: NodeId) -> Result<Option<NodeId>, ShapeError>;

    /// First child of `node`, or `None` if it is childless.
    fn first_child(&self, node: NodeId) -> Result<Option<NodeId>, ShapeError>;

    /// Last child of `node`, or `None` if it is childless.
    fn last_child(&self, node: NodeId) -> Result<Option<NodeId>, ShapeError>;

    /// Following sibling of `node`, or `None` if it is last (or unattached).
    fn next_sibling(&self, node: NodeId) -> Result<Option<NodeId>, ShapeError>;

    /// Preceding sibling of `node`, or `None` if it is first (or unattached).
    fn prev_sibling(&self, node: NodeId) -> Result<Option<NodeId>, ShapeError>;

    /// The location immediately after `node`.
    ///
    /// Fails with [`ShapeError::DetachedAnchor`] if `node` has no parent.
    fn after_node(&self, node: NodeId) -> Result<Location, ShapeError> {
        match self.parent(node)? {
            Some(_) => Ok(Location::AfterNode(node)),
            None => Err(ShapeError::DetachedAnchor(node)),
        }
    }

    /// The location at the head of `parent`'s child list.
    fn first_child_of(&self, parent: NodeId) -> Result<Location, ShapeError> {
        if self.is_alive(parent) {
            Ok(Location::FirstChildOf(parent))
        } else {
            Err(ShapeError::InvalidHandle(parent))
        }
    }

    /// The location at the end of `parent`'s child list (append).
    fn last_child_of(&self, parent: NodeId) -> Result<Location, ShapeError> {
        Ok(match self.last_child(parent)? {
            Some(last) => Location::AfterNode(last),
            None => Location::FirstChildOf(parent),
        })
    }

    /// The location `node` currently occupies, expressed relative to its neighbors.
    ///
    /// Moving `node` to this location leaves the tree unchanged.
    /// Fails with [`ShapeError::DetachedAnchor`] if `node` has no parent.
    fn before_node(&self, node: NodeId) -> Result<Location, ShapeError> {
        let Some(parent) = self.parent(node)? else {
            return Err(ShapeError::DetachedAnchor(node));
        };
        Ok(match self.prev_sibling(node)? {
            Some(prev) => Location::AfterNode(prev),
            None => Location::FirstChildOf(parent),
        })
    }

    /// The parent a node placed at `location` would have.
    fn parent_of_location(&self, location: Location) -> Result<NodeId, ShapeError> {
        match location {
            Location::AfterNode(anchor) => self
                .parent(anchor)?
                .ok_or(ShapeError::DetachedAnchor(anchor)),
            Location::FirstChildOf(parent) => {
                if self.is_alive(parent) {
                    Ok(parent)
                } else {
                    Err(ShapeError::InvalidHandle(parent))
                }
            }
        }
    }
}

/// A party interested in structural changes to a tree shape.
///
/// Register with [`TreeShape::open_tree`](crate::TreeShape::open_tree).
pub trait TreeShapeConsumer {
    /// Called after `node` was moved or removed.
    ///
    /// `old_location` is where the node sat before the change, or `None` if it was unattached.
    /// Resolve it against `tree`, which already reflects the change; handles cached from
    /// earlier notifications may have been deleted and reissued since.
    ///
    /// When the change is a deletion, `node` is still alive during this call and retired
    /// right after it returns.
    fn node_moved(&self, node: NodeId, old_location: Option<Location>, tree: &dyn TreeShapeReader);
}
