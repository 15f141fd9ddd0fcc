// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Quadtree Index: insert, look up, range query, rebuild.

use std::num::NonZeroUsize;

use quadtree_index::{Aabb2D, QuadTree};

fn main() {
    let mut tree = QuadTree::new();
    for (x, y) in [(10, 10), (20, 20), (30, 30), (40, 40)] {
        let id = tree.insert(x, y).unwrap();
        println!("inserted ({x}, {y}) as {}", id.get());
    }
    println!("stats: {:?}", tree.stats());

    // Duplicates are reported, not inserted.
    if let Err(err) = tree.insert(30, 30) {
        println!("rejected: {err}");
    }

    println!("contains (20, 20): {}", tree.contains(20, 20));
    let hits = tree.query_range(Aabb2D::new(15, 15, 35, 35));
    println!("hits in [15,35]x[15,35]: {hits:?}");

    let stats = tree.set_capacity(NonZeroUsize::MIN);
    println!("capacity 1: {stats:?}");
}
