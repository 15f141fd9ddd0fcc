// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Emit stats, shape, and search traces as JSON.
//!
//! This is the payload a browser front end would consume to draw the tree and
//! animate a search.
//!
//! Run:
//! - `cargo run -p quadtree_demos --example trace_json`

use quadtree_index::{Aabb2D, QuadTree};

fn main() -> Result<(), serde_json::Error> {
    let mut tree = QuadTree::new();
    for (x, y) in [(1, 1), (2, 2), (99, 99), (60, 40), (61, 41)] {
        let _ = tree.insert(x, y);
    }
    let payload = serde_json::json!({
        "stats": tree.stats(),
        "shape": tree.shape(),
        "point_search": tree.search_point(61, 41),
        "range_search": tree.search_range(Aabb2D::new(1, 1, 2, 2)),
        "range_considered": tree.points_considered(Aabb2D::new(1, 1, 2, 2)),
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
