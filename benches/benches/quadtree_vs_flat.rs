// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::num::NonZeroUsize;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use quadtree_index::{Aabb2D, Coord, FlatPoints, PointIndex, QuadTree};

const SIDE: f64 = 1024.0;

fn bounds() -> Aabb2D<f64> {
    Aabb2D::new(0.0, 0.0, SIDE, SIDE)
}

fn cap(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

fn gen_grid_points(n: usize, step: Coord) -> Vec<(Coord, Coord)> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n as Coord {
        for x in 0..n as Coord {
            out.push((1 + x * step, 1 + y * step));
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn coord(&mut self) -> Coord {
        1 + (self.next_u64() % (SIDE as u64 - 1)) as Coord
    }
}

fn gen_random_points(count: usize) -> Vec<(Coord, Coord)> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count).map(|_| (rng.coord(), rng.coord())).collect()
}

fn gen_clustered_points(n_clusters: usize, per_cluster: usize, spread: u64) -> Vec<(Coord, Coord)> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    for _ in 0..n_clusters {
        let (cx, cy) = (rng.coord(), rng.coord());
        for _ in 0..per_cluster {
            let dx = (rng.next_u64() % spread) as Coord;
            let dy = (rng.next_u64() % spread) as Coord;
            out.push(((cx + dx).min(SIDE as Coord - 1), (cy + dy).min(SIDE as Coord - 1)));
        }
    }
    out
}

fn build_tree(points: &[(Coord, Coord)], capacity: usize) -> QuadTree {
    let mut tree = QuadTree::with_bounds(bounds(), cap(capacity));
    for &(x, y) in points {
        let _ = tree.insert(x, y);
    }
    tree
}

fn build_flat(points: &[(Coord, Coord)]) -> FlatPoints {
    let mut flat = FlatPoints::new();
    for &(x, y) in points {
        let _ = flat.insert(x, y);
    }
    flat
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &n in &[32usize, 64] {
        let points = gen_grid_points(n, 15);
        group.throughput(Throughput::Elements((n * n) as u64));
        for capacity in [1, 4, 16] {
            group.bench_function(format!("quadtree_grid_n{n}_cap{capacity}"), |b| {
                b.iter(|| black_box(build_tree(&points, capacity).stats()));
            });
        }
        group.bench_function(format!("flat_grid_n{n}"), |b| {
            b.iter(|| black_box(build_flat(&points).len()));
        });
    }
    let clustered = gen_clustered_points(16, 128, 24);
    group.throughput(Throughput::Elements(clustered.len() as u64));
    group.bench_function("quadtree_clustered_cap1", |b| {
        b.iter(|| black_box(build_tree(&clustered, 1).stats()));
    });
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    let points = gen_random_points(4096);
    let tree = build_tree(&points, 8);
    let flat = build_flat(&points);
    let rect = Aabb2D::new(200, 200, 400, 400);

    group.bench_function("quadtree_range", |b| {
        b.iter(|| black_box(tree.query_range(rect).len()));
    });
    group.bench_function("quadtree_range_walk", |b| {
        b.iter(|| black_box(tree.range_walk(rect).count()));
    });
    group.bench_function("quadtree_points_considered", |b| {
        b.iter(|| black_box(tree.points_considered(rect)));
    });
    group.bench_function("flat_range", |b| {
        b.iter(|| black_box(PointIndex::query_range(&flat, rect).count()));
    });

    let probes = gen_random_points(256);
    group.throughput(Throughput::Elements(probes.len() as u64));
    group.bench_function("quadtree_contains", |b| {
        b.iter(|| probes.iter().filter(|&&(x, y)| tree.contains(x, y)).count());
    });
    group.bench_function("flat_contains", |b| {
        b.iter(|| probes.iter().filter(|&&(x, y)| flat.contains(x, y)).count());
    });
    group.finish();
}

fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebuild");
    let points = gen_random_points(2048);
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("set_capacity_8_to_2", |b| {
        b.iter_batched(
            || build_tree(&points, 8),
            |mut tree| black_box(tree.set_capacity(cap(2))),
            BatchSize::SmallInput,
        );
    });
    group.bench_function("remove_last", |b| {
        b.iter_batched(
            || build_tree(&points, 4),
            |mut tree| black_box(tree.remove_last()),
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_insert, bench_query, bench_rebuild);
criterion_main!(benches);
