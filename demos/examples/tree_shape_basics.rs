// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree shape basics.
//!
//! Build a small tree, move and remove nodes, and see how locations describe positions.
//!
//! Run:
//! - `cargo run -p understory_demos --example tree_shape_basics`

use understory_tree_shape::{Location, NodeId, ShapeError, TreeShape, TreeShapeReader};

fn children(tree: &TreeShape, parent: NodeId) -> Vec<NodeId> {
    tree.children(parent).unwrap().collect()
}

fn append(tree: &mut TreeShape) -> NodeId {
    let node = tree.create_node();
    let end = tree.last_child_of(NodeId::ROOT).unwrap();
    tree.move_node(node, end).unwrap();
    node
}

fn main() {
    let mut tree = TreeShape::new();

    // Append A, B, C under the root.
    let a = append(&mut tree);
    let b = append(&mut tree);
    let c = append(&mut tree);
    println!("root children: {:?}", children(&tree, NodeId::ROOT));

    // Nest C under A, then put B in front of it.
    tree.move_node(c, Location::FirstChildOf(a)).unwrap();
    tree.move_node(b, tree.before_node(c).unwrap()).unwrap();
    println!("children of {a}: {:?}", children(&tree, a));
    assert_eq!(children(&tree, a), vec![b, c], "B should precede C under A");

    // A location names a position relative to a neighbor, not an index.
    let where_c_is = tree.before_node(c).unwrap();
    println!(
        "C sits at {where_c_is:?}, under {}",
        tree.parent_of_location(where_c_is).unwrap()
    );

    // Moving A into its own subtree is rejected and changes nothing.
    let err = tree.move_node(a, Location::FirstChildOf(c)).unwrap_err();
    println!("rejected: {err}");
    assert!(matches!(err, ShapeError::Cycle { .. }));

    // Remove detaches but keeps the node (and its children) alive.
    tree.remove_node(a).unwrap();
    println!(
        "after remove: root children {:?}, {a} still has {:?}",
        children(&tree, NodeId::ROOT),
        children(&tree, a)
    );

    // Delete the detached subtree; the handles become free for reuse.
    let deleted = tree.delete_subtree(a).unwrap();
    let reused = tree.create_node();
    println!("deleted {deleted} nodes, next handle is {reused}");
    assert_eq!(tree.len(), 1, "only the fresh node should remain");
}
