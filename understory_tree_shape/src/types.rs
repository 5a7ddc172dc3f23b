// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the tree shape: node handles and insertion locations.

use core::fmt;

/// Identifier for a node in a [`TreeShape`](crate::TreeShape).
///
/// This is a small, copyable handle issued by [`TreeShape::create_node`](crate::TreeShape::create_node).
///
/// ## Semantics
///
/// - Handle `0` is the implicit root ([`NodeId::ROOT`]). It is always present and is never
///   issued by node creation.
/// - On delete, the handle is released; a later creation may hand out the same integer again.
/// - Unlike a generational id, a reused handle is indistinguishable from the one it replaces.
///   Consumers holding handles across a delete must track liveness themselves.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The implicit root node.
    pub const ROOT: Self = Self(0);

    pub(crate) const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Returns the raw integer value of this handle.
    pub const fn to_raw(self) -> u32 {
        self.0
    }

    /// Returns true if this is [`NodeId::ROOT`].
    pub const fn is_root(self) -> bool {
        self.0 == Self::ROOT.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("NodeId(root)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A position within the tree.
///
/// Locations are what [`TreeShape::move_node`](crate::TreeShape::move_node) accepts and what
/// [`TreeShapeConsumer::node_moved`](crate::TreeShapeConsumer::node_moved) reports as a node's
/// previous position. They name an insertion point relative to an existing node rather than a
/// `(parent, index)` pair, so they stay valid while unrelated siblings come and go.
///
/// Use the derivations on [`TreeShapeReader`](crate::TreeShapeReader) to build them:
/// [`after_node`](crate::TreeShapeReader::after_node),
/// [`before_node`](crate::TreeShapeReader::before_node),
/// [`first_child_of`](crate::TreeShapeReader::first_child_of) and
/// [`last_child_of`](crate::TreeShapeReader::last_child_of).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Location {
    /// Immediately following the given node in its parent's child list.
    ///
    /// The anchor must be attached.
    AfterNode(NodeId),
    /// At the head of the given node's child list.
    FirstChildOf(NodeId),
}

impl Location {
    /// The node this location is expressed relative to.
    ///
    /// For [`Location::AfterNode`] this is the preceding sibling, for
    /// [`Location::FirstChildOf`] the parent.
    pub const fn anchor(self) -> NodeId {
        match self {
            Self::AfterNode(node) | Self::FirstChildOf(node) => node,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn root_is_zero() {
        assert_eq!(NodeId::ROOT.to_raw(), 0);
        assert!(NodeId::ROOT.is_root());
        assert!(!NodeId::new(3).is_root());
    }

    #[test]
    fn debug_names_the_root() {
        assert_eq!(format!("{:?}", NodeId::ROOT), "NodeId(root)");
        assert_eq!(format!("{:?}", NodeId::new(7)), "NodeId(7)");
        assert_eq!(format!("{}", NodeId::new(7)), "#7");
    }

    #[test]
    fn anchor_of_both_variants() {
        let n = NodeId::new(4);
        assert_eq!(Location::AfterNode(n).anchor(), n);
        assert_eq!(Location::FirstChildOf(n).anchor(), n);
        assert_ne!(Location::AfterNode(n), Location::FirstChildOf(n));
    }
}
