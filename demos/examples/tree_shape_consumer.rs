// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree shape consumer.
//!
//! A consumer keeps a per-parent child count in sync using only move notifications,
//! the way an incremental engine would track structure without rescanning the tree.
//!
//! Run:
//! - `cargo run -p understory_demos --example tree_shape_consumer`

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use understory_tree_shape::{Location, NodeId, TreeShape, TreeShapeConsumer, TreeShapeReader};

/// Child counts per parent, maintained incrementally.
#[derive(Default)]
struct ChildCounts {
    counts: RefCell<HashMap<NodeId, usize>>,
}

impl TreeShapeConsumer for ChildCounts {
    fn node_moved(
        &self,
        node: NodeId,
        old_location: Option<Location>,
        tree: &dyn TreeShapeReader,
    ) {
        let mut counts = self.counts.borrow_mut();
        if let Some(old_parent) = old_location.and_then(|loc| tree.parent_of_location(loc).ok()) {
            if let Some(count) = counts.get_mut(&old_parent) {
                *count -= 1;
            }
        }
        if let Ok(Some(new_parent)) = tree.parent(node) {
            *counts.entry(new_parent).or_default() += 1;
        }
        println!("moved {node}: from {old_location:?} to parent {:?}", tree.parent(node));
    }
}

fn main() {
    let mut tree = TreeShape::new();
    let counts = Rc::new(ChildCounts::default());
    let view = tree.open_tree(counts.clone());
    println!("opened tree with {} nodes", view.len());

    let list = tree.create_node();
    tree.move_node(list, Location::FirstChildOf(NodeId::ROOT)).unwrap();
    let items: Vec<_> = (0..4)
        .map(|_| {
            let item = tree.create_node();
            let end = tree.last_child_of(list).unwrap();
            tree.move_node(item, end).unwrap();
            item
        })
        .collect();

    // Hoist one item out of the list, then drop another entirely.
    tree.move_node(items[1], tree.after_node(list).unwrap()).unwrap();
    tree.delete_node(items[3]).unwrap();

    let expected = tree.children(list).unwrap().count();
    let tracked = counts.counts.borrow().get(&list).copied().unwrap_or(0);
    println!("list has {expected} children; consumer tracked {tracked}");
    assert_eq!(tracked, expected, "incremental count must match the tree");

    let consumer: Rc<dyn TreeShapeConsumer> = counts;
    assert!(tree.close_tree(&consumer));
}
