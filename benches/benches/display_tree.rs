// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for display tree picking, update, and reordering.
//!
//! Trees are synthetic grids of containers, each holding a row of leaves, so
//! that picking has to descend and reject siblings at every level.

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Point;
use understory_display_tree::{
    ContainerConfig, DisplayTree, FrameTime, HitMode, NodeConfig, NodeId, SortProperty,
};

const CELL: f64 = 20.0;

/// `rows` containers stacked vertically, each with `cols` leaves side by side.
fn build_grid(rows: usize, cols: usize) -> (DisplayTree, NodeId) {
    let mut tree = DisplayTree::new();
    let root = tree.create_container(ContainerConfig::default(), None);
    for r in 0..rows {
        let row = tree.create_container(
            ContainerConfig {
                node: NodeConfig {
                    y: r as f64 * CELL,
                    ..NodeConfig::default()
                },
                autosize: true,
                ..ContainerConfig::default()
            },
            None,
        );
        let leaves: Vec<NodeId> = (0..cols)
            .map(|c| {
                tree.create_leaf(
                    NodeConfig {
                        x: c as f64 * CELL,
                        width: CELL,
                        height: CELL,
                        ..NodeConfig::default()
                    },
                    None,
                )
            })
            .collect();
        tree.add_child(row, leaves)
            .expect("fresh leaves into a fresh container");
        tree.add_child(root, [row])
            .expect("fresh container into the root");
    }
    (tree, root)
}

fn bench_display_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_display_tree");

    for (rows, cols) in [(10, 10), (50, 50)] {
        let (tree, root) = build_grid(rows, cols);
        // Back corner: the last row and column tested, after every other sibling.
        let back = Point::new(1.0, 1.0);
        let front = Point::new(
            (cols as f64 - 0.5) * CELL,
            (rows as f64 - 0.5) * CELL,
        );

        group.bench_function(format!("pick_first_front(r={rows},c={cols})"), |b| {
            b.iter(|| black_box(tree.object_under_point(root, black_box(front), HitMode::Bounds)));
        });
        group.bench_function(format!("pick_first_back(r={rows},c={cols})"), |b| {
            b.iter(|| black_box(tree.object_under_point(root, black_box(back), HitMode::Bounds)));
        });
        group.bench_function(format!("pick_all(r={rows},c={cols})"), |b| {
            b.iter(|| black_box(tree.objects_under_point(root, black_box(back), HitMode::Bounds)));
        });

        group.bench_function(format!("update(r={rows},c={cols})"), |b| {
            b.iter_batched(
                || build_grid(rows, cols),
                |(mut tree, root)| {
                    tree.update(root, &FrameTime::default());
                    tree
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("sort_rows_by_y(r={rows},c={cols})"), |b| {
            b.iter_batched(
                || build_grid(rows, cols),
                |(mut tree, root)| {
                    tree.sort_children_by_property(root, SortProperty::Y);
                    tree
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_display_tree);
criterion_main!(benches);
