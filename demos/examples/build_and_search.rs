// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build a tree and replay its searches.
//!
//! Plays the part of an animation driver without the timing: inserts points,
//! then pulls search steps one at a time and reports each, the way a renderer
//! would highlight nodes and points.
//!
//! Run:
//! - `cargo run -p quadtree_demos --example build_and_search`
//! - `RUST_LOG=quadtree_index=debug cargo run -p quadtree_demos --example build_and_search`

use std::num::NonZeroUsize;

use quadtree_index::{Aabb2D, NodeVisit, QuadTree, RangeStep, SearchStep};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const POINTS: &[(i64, i64)] = &[
    (10, 10),
    (20, 20),
    (30, 30),
    (40, 40),
    (75, 80),
    (60, 55),
    (20, 20),
    (88, 12),
    (45, 70),
];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut tree = QuadTree::new();
    for &(x, y) in POINTS {
        match tree.insert(x, y) {
            Ok(id) => info!(id = id.get(), x, y, "inserted"),
            Err(err) => warn!("{err}"),
        }
    }
    info!(?tree, "built");

    // Point search, one step per "tick".
    let (x, y) = (60, 55);
    for step in tree.point_walk(x, y) {
        match step {
            SearchStep::Node(node) => {
                let view = tree.node(node).expect("walk yields live nodes");
                info!(node = node.get(), bounds = ?view.bounds(), "visit node");
            }
            SearchStep::Compare { point, matched } => {
                let p = tree.point(point).expect("walk yields stored points");
                info!(x = p.x, y = p.y, matched, "compare point");
            }
        }
    }

    // Range search; the driver knows it is done once every considered point was shown.
    let rect = Aabb2D::new(15, 15, 50, 75);
    let expected = tree.points_considered(rect);
    let mut shown = 0;
    for step in tree.range_walk(rect) {
        match step {
            RangeStep::Node { node, visit } => {
                let colour = match visit {
                    NodeVisit::Pruned => "red",
                    NodeVisit::Leaf => "green",
                    NodeVisit::Inner => "blue",
                };
                info!(node = node.get(), colour, "range node");
            }
            RangeStep::Point { point, hit } => {
                shown += 1;
                let p = tree.point(point).expect("walk yields stored points");
                info!(x = p.x, y = p.y, hit, shown, of = expected, "range point");
            }
        }
    }
    info!(matches = tree.count_in_range(rect), "range search complete");

    let stats = tree.set_capacity(NonZeroUsize::MIN);
    info!(?stats, "capacity 1");
    let stats = tree.remove_last();
    info!(?stats, points = tree.len(), "removed last point");
    let stats = tree.erase_all();
    info!(?stats, "erased");
}
