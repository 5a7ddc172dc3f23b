// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_tree_shape::{
    Location, NodeId, TreeShape, TreeShapeConsumer, TreeShapeReader,
};

/// A root with `n` children, each appended in order.
fn flat_tree(n: usize) -> (TreeShape, Vec<NodeId>) {
    let mut tree = TreeShape::with_capacity(n);
    let mut nodes = Vec::with_capacity(n);
    for _ in 0..n {
        let node = tree.create_node();
        let end = tree.last_child_of(NodeId::ROOT).unwrap();
        tree.move_node(node, end).unwrap();
        nodes.push(node);
    }
    (tree, nodes)
}

struct Noop;

impl TreeShapeConsumer for Noop {
    fn node_moved(&self, node: NodeId, old: Option<Location>, tree: &dyn TreeShapeReader) {
        black_box((node, old, tree.parent(node).ok()));
    }
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[256usize, 4096] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("append_n{}", n), |b| {
            b.iter(|| black_box(flat_tree(n)));
        });
        group.bench_function(format!("chain_n{}", n), |b| {
            b.iter(|| {
                let mut tree = TreeShape::with_capacity(n);
                let mut parent = NodeId::ROOT;
                for _ in 0..n {
                    let node = tree.create_node();
                    tree.move_node(node, Location::FirstChildOf(parent)).unwrap();
                    parent = node;
                }
                black_box(tree)
            });
        });
    }
    group.finish();
}

fn bench_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("moves");
    for &n in &[256usize, 4096] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("rotate_front_to_back_n{}", n), |b| {
            b.iter_batched(
                || flat_tree(n).0,
                |mut tree| {
                    for _ in 0..n {
                        let first = tree.first_child(NodeId::ROOT).unwrap().unwrap();
                        let end = tree.last_child_of(NodeId::ROOT).unwrap();
                        tree.move_node(first, end).unwrap();
                    }
                    black_box(tree)
                },
                BatchSize::SmallInput,
            );
        });
        group.bench_function(format!("rotate_with_consumer_n{}", n), |b| {
            b.iter_batched(
                || {
                    let (mut tree, _) = flat_tree(n);
                    let _ = tree.open_tree(Rc::new(Noop));
                    tree
                },
                |mut tree| {
                    for _ in 0..n {
                        let first = tree.first_child(NodeId::ROOT).unwrap().unwrap();
                        let end = tree.last_child_of(NodeId::ROOT).unwrap();
                        tree.move_node(first, end).unwrap();
                    }
                    black_box(tree)
                },
                BatchSize::SmallInput,
            );
        });
        group.bench_function(format!("nest_siblings_n{}", n), |b| {
            b.iter_batched(
                || flat_tree(n),
                |(mut tree, nodes)| {
                    // Each node becomes the first child of its former previous sibling.
                    for pair in nodes.windows(2) {
                        tree.move_node(pair[1], Location::FirstChildOf(pair[0]))
                            .unwrap();
                    }
                    black_box(tree)
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn");
    let n = 1024usize;
    group.throughput(Throughput::Elements(n as u64));
    group.bench_function("delete_recreate_n1024", |b| {
        b.iter_batched(
            || flat_tree(n),
            |(mut tree, nodes)| {
                for node in nodes.iter().copied().step_by(2) {
                    tree.delete_node(node).unwrap();
                }
                for _ in 0..n / 2 {
                    let node = tree.create_node();
                    tree.move_node(node, Location::FirstChildOf(NodeId::ROOT))
                        .unwrap();
                }
                black_box(tree)
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("delete_subtree_chain_n1024", |b| {
        b.iter_batched(
            || flat_tree(n),
            |(mut tree, nodes)| {
                for pair in nodes.windows(2).rev() {
                    tree.move_node(pair[1], Location::FirstChildOf(pair[0]))
                        .unwrap();
                }
                black_box(tree.delete_subtree(nodes[0]).unwrap())
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_moves, bench_churn);
criterion_main!(benches);
