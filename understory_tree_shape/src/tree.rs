// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: node lifecycle, structural moves, and consumer notification.

use alloc::rc::Rc;
use tracing::{debug, instrument};

use crate::error::ShapeError;
use crate::frugal::FrugalList;
use crate::handles::HandleTable;
use crate::store::{Field, ShapeStore};
use crate::traits::{TreeShapeConsumer, TreeShapeReader};
use crate::types::{Location, NodeId};

impl Default for TreeShape {
    fn default() -> Self {
        Self::new()
    }
}

/// An ordered, multi-child tree stored as flat link records.
///
/// The tree starts out holding only the implicit root ([`NodeId::ROOT`]). Nodes are created
/// unattached and become reachable once moved under the root or one of its descendants.
/// Read access goes through [`TreeShapeReader`].
pub struct TreeShape {
    shape: ShapeStore,
    handles: HandleTable<()>,
    consumers: FrugalList<Rc<dyn TreeShapeConsumer>>,
    /// Ancestors visited by cycle checks.
    #[cfg(test)]
    ancestor_steps: core::cell::Cell<usize>,
}

impl core::fmt::Debug for TreeShape {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TreeShape")
            .field("high_water", &self.handles.high_water())
            .field("nodes_alive", &self.handles.len())
            .field("handles", &self.handles)
            .field("consumers", &self.consumers.len())
            .finish_non_exhaustive()
    }
}

impl TreeShape {
    /// Create a tree holding only the root.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a tree with room for `nodes` nodes besides the root before reallocating.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            shape: ShapeStore::with_capacity(nodes),
            handles: HandleTable::with_capacity(nodes),
            consumers: FrugalList::new(),
            #[cfg(test)]
            ancestor_steps: core::cell::Cell::new(0),
        }
    }

    /// Number of live nodes, not counting the root.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Returns true if no nodes besides the root exist.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    // --- producer ---

    /// Register `consumer` for move notifications and return a read view of the tree.
    ///
    /// Consumers are notified in registration order. The same consumer may be registered
    /// more than once, in which case it is notified once per registration.
    pub fn open_tree(&mut self, consumer: Rc<dyn TreeShapeConsumer>) -> &Self {
        self.consumers.push(consumer);
        debug!(consumers = self.consumers.len(), "consumer opened tree");
        self
    }

    /// Remove the earliest registration of `consumer`.
    ///
    /// Registrations are matched by pointer identity. Returns false if none matched.
    pub fn close_tree(&mut self, consumer: &Rc<dyn TreeShapeConsumer>) -> bool {
        let removed = self
            .consumers
            .remove_first_by(|c| Rc::ptr_eq(c, consumer))
            .is_some();
        debug!(removed, consumers = self.consumers.len(), "consumer closed tree");
        removed
    }

    /// Create an unattached, childless node.
    ///
    /// The returned handle may equal one previously passed to [`TreeShape::delete_node`].
    ///
    /// # Panics
    ///
    /// Panics if the handle space is exhausted.
    #[instrument(level = "trace", skip(self), ret)]
    pub fn create_node(&mut self) -> NodeId {
        let node = NodeId::new(self.handles.add(()));
        self.shape.reset(node);
        node
    }

    /// Remove `node` from the tree and release its handle.
    ///
    /// Consumers are notified as for [`TreeShape::remove_node`]. Afterwards `node` must not
    /// be used again; a later [`TreeShape::create_node`] may reissue it.
    ///
    /// Fails with [`ShapeError::HasChildren`] if `node` still has children; use
    /// [`TreeShape::delete_subtree`] or move them elsewhere first.
    #[instrument(level = "trace", skip(self), err(level = "debug"))]
    pub fn delete_node(&mut self, node: NodeId) -> Result<(), ShapeError> {
        self.check_writable(node)?;
        if self.shape.first_child(node).is_some() {
            return Err(ShapeError::HasChildren(node));
        }
        self.release(node);
        Ok(())
    }

    /// Delete `node` and all of its descendants, children before parents.
    ///
    /// Each deletion notifies consumers. Returns the number of nodes deleted.
    #[instrument(level = "trace", skip(self), err(level = "debug"))]
    pub fn delete_subtree(&mut self, node: NodeId) -> Result<usize, ShapeError> {
        self.check_writable(node)?;
        let mut deleted = 0;
        let mut cursor = node;
        loop {
            while let Some(child) = self.shape.first_child(cursor) {
                cursor = child;
            }
            let parent = self.shape.parent(cursor);
            let done = cursor == node;
            self.release(cursor);
            deleted += 1;
            match parent {
                Some(parent) if !done => cursor = parent,
                _ => return Ok(deleted),
            }
        }
    }

    // --- writer ---

    /// Move `node` to `location`, detaching it from wherever it was.
    ///
    /// `location` may be derived before the call from the current tree, including from
    /// `node`'s own position: moving a node to its [`before_node`](TreeShapeReader::before_node)
    /// (or after itself) leaves the tree unchanged but still notifies.
    ///
    /// Fails without touching the tree if `node` is the root or not live, if the location's
    /// anchor is not live or (for [`Location::AfterNode`]) not attached, or if the location lies
    /// inside `node`'s own subtree.
    #[instrument(level = "trace", skip(self), err(level = "debug"))]
    pub fn move_node(&mut self, node: NodeId, location: Location) -> Result<(), ShapeError> {
        let location = self.resolve_destination(node, location)?;
        let old_location = self.unlink(node);
        match location {
            Location::AfterNode(prev) => self.link_after(node, prev),
            Location::FirstChildOf(parent) => self.link_first_child(node, parent),
        }
        self.notify(node, old_location);
        Ok(())
    }

    /// Detach `node` from its parent.
    ///
    /// The node stays live and keeps its own children, so it can be reattached later with
    /// [`TreeShape::move_node`]. Consumers see this as a move to nowhere.
    #[instrument(level = "trace", skip(self), err(level = "debug"))]
    pub fn remove_node(&mut self, node: NodeId) -> Result<(), ShapeError> {
        self.check_writable(node)?;
        let old_location = self.detach(node);
        self.notify(node, old_location);
        Ok(())
    }

    /// Iterate the direct children of `parent`, first to last.
    pub fn children(&self, parent: NodeId) -> Result<Children<'_>, ShapeError> {
        self.check(parent)?;
        Ok(Children {
            shape: &self.shape,
            next: self.shape.first_child(parent),
        })
    }

    // --- internals ---

    fn check(&self, node: NodeId) -> Result<(), ShapeError> {
        if self.is_alive(node) {
            Ok(())
        } else {
            Err(ShapeError::InvalidHandle(node))
        }
    }

    fn check_writable(&self, node: NodeId) -> Result<(), ShapeError> {
        if node.is_root() {
            return Err(ShapeError::RootImmutable);
        }
        self.check(node)
    }

    /// Validate a move and map a self-anchored location onto the node's current position.
    fn resolve_destination(
        &self,
        node: NodeId,
        location: Location,
    ) -> Result<Location, ShapeError> {
        self.check_writable(node)?;
        let target_parent = self.parent_of_location(location)?;
        if location == Location::AfterNode(node) {
            return self.before_node(node);
        }
        if self.is_ancestor_or_self(node, target_parent) {
            return Err(ShapeError::Cycle { node, location });
        }
        Ok(location)
    }

    /// Returns true if `node` is `descendant` or one of its ancestors.
    ///
    /// A childless node has no descendants, so only the identity case needs checking.
    fn is_ancestor_or_self(&self, node: NodeId, descendant: NodeId) -> bool {
        if node == descendant {
            return true;
        }
        if self.shape.first_child(node).is_none() {
            return false;
        }
        let mut cursor = self.shape.parent(descendant);
        while let Some(ancestor) = cursor {
            #[cfg(test)]
            self.ancestor_steps.set(self.ancestor_steps.get() + 1);
            if ancestor == node {
                return true;
            }
            cursor = self.shape.parent(ancestor);
        }
        false
    }

    /// Take `node` out of its parent's child list and report where it was.
    ///
    /// Leaves `node`'s own link fields stale; callers relink or clear them.
    fn unlink(&mut self, node: NodeId) -> Option<Location> {
        let parent = self.shape.parent(node)?;
        let next = self.shape.next_sibling(node);
        let prev = self.shape.prev_sibling(node);

        if self.shape.first_child(parent) == Some(node) {
            self.shape.set(parent, Field::FirstChild, next);
        }
        if self.shape.last_child(parent) == Some(node) {
            self.shape.set(parent, Field::LastChild, prev);
        }
        if let Some(next) = next {
            self.shape.set(next, Field::PrevSibling, prev);
        }

        match prev {
            None => Some(Location::FirstChildOf(parent)),
            Some(prev) => {
                self.shape.set(prev, Field::NextSibling, next);
                Some(Location::AfterNode(prev))
            }
        }
    }

    fn link_after(&mut self, node: NodeId, prev: NodeId) {
        let parent = self.shape.parent(prev);
        self.shape.set(node, Field::Parent, parent);
        if let Some(parent) = parent.filter(|&p| self.shape.last_child(p) == Some(prev)) {
            self.shape.set(parent, Field::LastChild, Some(node));
        }

        let next = self.shape.next_sibling(prev);
        self.shape.set(node, Field::NextSibling, next);
        if let Some(next) = next {
            self.shape.set(next, Field::PrevSibling, Some(node));
        }

        self.shape.set(node, Field::PrevSibling, Some(prev));
        self.shape.set(prev, Field::NextSibling, Some(node));
    }

    fn link_first_child(&mut self, node: NodeId, parent: NodeId) {
        self.shape.set(node, Field::Parent, Some(parent));

        let next = self.shape.first_child(parent);
        match next {
            None => self.shape.set(parent, Field::LastChild, Some(node)),
            Some(next) => self.shape.set(next, Field::PrevSibling, Some(node)),
        }

        self.shape.set(node, Field::PrevSibling, None);
        self.shape.set(node, Field::NextSibling, next);
        self.shape.set(parent, Field::FirstChild, Some(node));
    }

    fn detach(&mut self, node: NodeId) -> Option<Location> {
        let old_location = self.unlink(node);
        self.shape.set(node, Field::Parent, None);
        self.shape.set(node, Field::NextSibling, None);
        self.shape.set(node, Field::PrevSibling, None);
        old_location
    }

    /// Detach, notify, and free a validated, childless node.
    fn release(&mut self, node: NodeId) {
        let old_location = self.detach(node);
        self.notify(node, old_location);
        self.handles.delete(node.to_raw());
    }

    fn notify(&self, node: NodeId, old_location: Option<Location>) {
        for consumer in self.consumers.iter() {
            consumer.node_moved(node, old_location, self);
        }
    }
}

impl TreeShapeReader for TreeShape {
    fn is_alive(&self, node: NodeId) -> bool {
        node.is_root() || self.handles.contains(node.to_raw())
    }

    fn parent(&self, node: NodeId) -> Result<Option<NodeId>, ShapeError> {
        self.check(node)?;
        Ok(self.shape.parent(node))
    }

    fn first_child(&self, node: NodeId) -> Result<Option<NodeId>, ShapeError> {
        self.check(node)?;
        Ok(self.shape.first_child(node))
    }

    fn last_child(&self, node: NodeId) -> Result<Option<NodeId>, ShapeError> {
        self.check(node)?;
        Ok(self.shape.last_child(node))
    }

    fn next_sibling(&self, node: NodeId) -> Result<Option<NodeId>, ShapeError> {
        self.check(node)?;
        Ok(self.shape.next_sibling(node))
    }

    fn prev_sibling(&self, node: NodeId) -> Result<Option<NodeId>, ShapeError> {
        self.check(node)?;
        Ok(self.shape.prev_sibling(node))
    }
}

/// Iterator over the direct children of a node.
///
/// Returned by [`TreeShape::children`].
#[derive(Clone, Debug)]
pub struct Children<'a> {
    shape: &'a ShapeStore,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.next?;
        self.next = self.shape.next_sibling(node);
        Some(node)
    }
}
