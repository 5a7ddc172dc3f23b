// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat shape storage: five link fields per node in one contiguous array.

use alloc::vec::Vec;

use crate::types::NodeId;

/// One of the five link fields stored per node.
///
/// The discriminant is the field's offset within the node's record.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Field {
    Parent = 0,
    FirstChild = 1,
    NextSibling = 2,
    LastChild = 3,
    PrevSibling = 4,
}

const FIELD_COUNT: usize = 5;

/// Stored value for an absent link. Never a valid handle.
const NONE: u32 = u32::MAX;

#[inline]
fn encode(node: Option<NodeId>) -> u32 {
    node.map_or(NONE, NodeId::to_raw)
}

#[inline]
fn decode(raw: u32) -> Option<NodeId> {
    (raw != NONE).then_some(NodeId::new(raw))
}

/// Link fields for every handle, addressed as `node * FIELD_COUNT + field`.
///
/// Record 0 belongs to the implicit root and exists from construction.
#[derive(Clone)]
pub(crate) struct ShapeStore {
    shape: Vec<u32>,
}

impl core::fmt::Debug for ShapeStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ShapeStore")
            .field("records", &self.records())
            .finish()
    }
}

impl ShapeStore {
    pub(crate) fn with_capacity(nodes: usize) -> Self {
        let mut shape = Vec::with_capacity((nodes + 1) * FIELD_COUNT);
        shape.extend_from_slice(&[NONE; FIELD_COUNT]);
        Self { shape }
    }

    #[inline]
    fn index(node: NodeId, field: Field) -> usize {
        node.idx() * FIELD_COUNT + field as usize
    }

    /// Number of records, including the root's.
    pub(crate) fn records(&self) -> usize {
        self.shape.len() / FIELD_COUNT
    }

    #[inline]
    pub(crate) fn get(&self, node: NodeId, field: Field) -> Option<NodeId> {
        decode(self.shape[Self::index(node, field)])
    }

    #[inline]
    pub(crate) fn set(&mut self, node: NodeId, field: Field, value: Option<NodeId>) {
        self.shape[Self::index(node, field)] = encode(value);
    }

    /// Reset `node`'s record to detached and childless, growing the array if needed.
    pub(crate) fn reset(&mut self, node: NodeId) {
        let end = (node.idx() + 1) * FIELD_COUNT;
        if self.shape.len() < end {
            self.shape.resize(end, NONE);
        }
        let start = Self::index(node, Field::Parent);
        self.shape[start..end].copy_from_slice(&[NONE; FIELD_COUNT]);
    }

    pub(crate) fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node, Field::Parent)
    }

    pub(crate) fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.get(node, Field::FirstChild)
    }

    pub(crate) fn last_child(&self, node: NodeId) -> Option<NodeId> {
        self.get(node, Field::LastChild)
    }

    pub(crate) fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.get(node, Field::NextSibling)
    }

    pub(crate) fn prev_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.get(node, Field::PrevSibling)
    }

    /// Snapshot of one record, for diagnostics.
    #[cfg(test)]
    pub(crate) fn record(&self, node: NodeId) -> [Option<NodeId>; FIELD_COUNT] {
        [
            self.parent(node),
            self.first_child(node),
            self.next_sibling(node),
            self.last_child(node),
            self.prev_sibling(node),
        ]
    }
}
