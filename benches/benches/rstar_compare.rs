// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use std::num::NonZeroUsize;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use quadtree_index::{Aabb2D, Coord, QuadTree};

use rstar::{AABB, RTree};

fn gen_grid_points(n: usize, step: Coord) -> Vec<[Coord; 2]> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n as Coord {
        for x in 0..n as Coord {
            out.push([1 + x * step, 1 + y * step]);
        }
    }
    out
}

fn bench_range_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_external_compare");
    let bounds = Aabb2D::new(0.0, 0.0, 1024.0, 1024.0);
    for &n in &[32usize, 64] {
        let points = gen_grid_points(n, 15);
        let query = Aabb2D::new(100, 100, 500, 500);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("quadtree_build_query_n{n}"), |b| {
            b.iter_batched(
                || QuadTree::with_bounds(bounds, NonZeroUsize::new(8).unwrap()),
                |mut tree| {
                    for &[x, y] in &points {
                        let _ = tree.insert(x, y);
                    }
                    black_box(tree.count_in_range(query));
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("rstar_build_query_bulk_n{n}"), |b| {
            b.iter_batched(
                || points.clone(),
                |points| {
                    let tree = RTree::bulk_load(points);
                    let aabb = AABB::from_corners(
                        [query.min_x, query.min_y],
                        [query.max_x, query.max_y],
                    );
                    black_box(tree.locate_in_envelope(&aabb).count());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_range_external_compare);
criterion_main!(benches);
