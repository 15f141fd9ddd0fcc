// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree Index: a point quadtree built for teaching and visualization.
//!
//! Quadtree Index stores integer points in a fixed square region and exposes
//! every step of its algorithms so a presentation layer can animate them.
//!
//! - Insert points; a leaf holding more than `capacity` points splits into four
//!   quadrants, cascading until every leaf is back under capacity.
//! - Look up points by coordinate, or search a closed rectangle.
//! - Replay either search one step at a time through a lazy walk, or collect the
//!   whole visitation trace at once.
//! - Change the capacity or drop the newest point; both rebuild the tree from
//!   the retained, ordered point list.
//!
//! The core is synchronous and has no notion of time. Animation drivers pull
//! steps from a walk at whatever pace they like and can stop by dropping it.
//!
//! # Example
//!
//! ```rust
//! use core::num::NonZeroUsize;
//! use quadtree_index::{Aabb2D, QuadTree, RangeStep};
//!
//! let mut tree = QuadTree::with_capacity(NonZeroUsize::new(3).unwrap());
//! for (x, y) in [(10, 10), (20, 20), (30, 30), (40, 40)] {
//!     tree.insert(x, y).unwrap();
//! }
//! // The fourth point overflowed the root and then its bottom-left child.
//! assert_eq!(tree.stats().node_count, 9);
//! assert_eq!(tree.stats().depth, 2);
//!
//! // Duplicates are rejected without touching the tree.
//! assert!(tree.insert(20, 20).is_err());
//!
//! // Hits come back in visitation order: top-right quadrants before bottom-left ones.
//! let rect = Aabb2D::new(15, 15, 35, 35);
//! let hits: Vec<_> = tree.query_range(rect).iter().map(|p| (p.x, p.y)).collect();
//! assert_eq!(hits, [(30, 30), (20, 20)]);
//!
//! // Replay the same search step by step.
//! let tested = tree
//!     .range_walk(rect)
//!     .filter(|step| matches!(step, RangeStep::Point { .. }))
//!     .count();
//! assert_eq!(tested, tree.points_considered(rect));
//! ```
//!
//! ## Geometry
//!
//! The plane is y-up. A node splits at `mid = (min + max) / 2` on both axes; a
//! point goes to the top half when `y > mid_y` and to the left half when
//! `x < mid_x`, so points on a split line land bottom/right. Node regions are
//! `f64` because midpoints of odd extents are fractional. The core does not
//! validate coordinates; points outside the root region are routed to the
//! nearest edge leaf, which stops splitting once it is smaller than one unit.
//!
//! ## Features
//!
//! - `std` (default): forwards to `tracing` and `thiserror`.
//! - `serde`: `Serialize`/`Deserialize` for the public value types, for
//!   handing shapes and traces to a renderer.
//!
//! Structural changes are logged through `tracing` at `debug` level and
//! individual inserts at `trace` level.

#![no_std]

extern crate alloc;

pub mod backend;
pub mod backends;
pub mod error;
pub mod query;
pub mod stats;
pub mod trace;
pub mod tree;
pub mod types;

pub use backend::PointIndex;
pub use backends::flat::FlatPoints;
pub use error::InsertError;
pub use query::{PointWalk, RangeWalk};
pub use stats::Stats;
pub use trace::{NodeVisit, PointSearch, RangeSearch, RangeStep, SearchStep};
pub use tree::{
    DEFAULT_BOUNDS, DEFAULT_CAPACITY, NodeId, NodeShape, NodeView, Point, PointId, QuadTree,
    TreeShape,
};
pub use types::{Aabb2D, Coord, Quadrant};

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::num::NonZeroUsize;

    fn cap(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn random_points(rng: &mut fastrand::Rng, n: usize) -> Vec<(Coord, Coord)> {
        (0..n).map(|_| (rng.i64(1..100), rng.i64(1..100))).collect()
    }

    fn sorted_ids(points: impl Iterator<Item = Point>) -> Vec<u32> {
        let mut ids: Vec<u32> = points.map(|p| p.id.get()).collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn quadtree_agrees_with_linear_scan() {
        let mut rng = fastrand::Rng::with_seed(0x5EED_0001);
        for capacity in [1, 2, 3, 5] {
            let mut tree = QuadTree::with_capacity(cap(capacity));
            let mut flat = FlatPoints::new();
            for (x, y) in random_points(&mut rng, 300) {
                assert_eq!(tree.insert(x, y), flat.insert(x, y));
            }
            assert_eq!(tree.points(), flat.points());

            for _ in 0..200 {
                let (x0, x1) = (rng.i64(0..101), rng.i64(0..101));
                let (y0, y1) = (rng.i64(0..101), rng.i64(0..101));
                let rect = Aabb2D::new(x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1));
                let expected = sorted_ids(PointIndex::query_range(&flat, rect));
                assert_eq!(sorted_ids(tree.query_range(rect).into_iter()), expected);
                assert_eq!(tree.count_in_range(rect), expected.len());
                assert!(tree.points_considered(rect) >= expected.len());
                assert_eq!(
                    tree.points_considered(rect),
                    tree.search_range(rect).considered
                );
            }
            for (x, y) in random_points(&mut rng, 100) {
                assert_eq!(tree.contains(x, y), flat.contains(x, y));
            }
        }
    }

    #[test]
    fn structure_invariants_hold_after_every_insert() {
        let mut rng = fastrand::Rng::with_seed(0x5EED_0002);
        let mut tree = QuadTree::with_capacity(cap(2));
        for (x, y) in random_points(&mut rng, 200) {
            let _ = tree.insert(x, y);
            let stats = tree.stats();
            assert!(stats.leaf_count >= 1);
            assert_eq!(stats.node_count, stats.inner_count() + stats.leaf_count);
            assert_eq!(stats.node_count, 4 * stats.inner_count() + 1);
            let mut held = 0;
            for view in tree.nodes().filter(|n| n.is_leaf()) {
                assert!(view.points().len() <= 2, "leaf over capacity");
                held += view.points().len();
            }
            assert_eq!(held, tree.len());
        }
        for p in tree.points() {
            let search = tree.search_point(p.x, p.y);
            assert_eq!(search.found, Some(p.id));
            assert!(tree.node(search.leaf).unwrap().points().contains(&p.id));
        }
    }

    #[test]
    fn same_inserts_same_shape() {
        let mut rng = fastrand::Rng::with_seed(0x5EED_0003);
        let pts = random_points(&mut rng, 120);
        let build = || {
            let mut tree = QuadTree::with_capacity(cap(2));
            for &(x, y) in &pts {
                let _ = tree.insert(x, y);
            }
            tree
        };
        assert_eq!(build().shape(), build().shape());
    }

    #[test]
    fn redundant_capacity_change_is_noop() {
        let mut rng = fastrand::Rng::with_seed(0x5EED_0004);
        let mut tree = QuadTree::new();
        for (x, y) in random_points(&mut rng, 60) {
            let _ = tree.insert(x, y);
        }
        tree.set_capacity(cap(4));
        let shape = tree.shape();
        tree.set_capacity(cap(4));
        assert_eq!(tree.shape(), shape);
    }

    #[test]
    fn remove_last_equals_erase_and_replay() {
        let mut tree = QuadTree::new();
        for (x, y) in [(12, 40), (77, 3), (50, 50)] {
            tree.insert(x, y).unwrap();
        }
        tree.remove_last();

        let mut replay = QuadTree::new();
        replay.insert(1, 1).unwrap();
        replay.erase_all();
        replay.insert(12, 40).unwrap();
        replay.insert(77, 3).unwrap();
        assert_eq!(tree.shape(), replay.shape());
        assert_eq!(tree.stats(), replay.stats());
    }

    #[test]
    fn trait_objects_share_ids() {
        let mut tree = QuadTree::new();
        let mut flat = FlatPoints::new();
        let backends: [&mut dyn PointIndex; 2] = [&mut tree, &mut flat];
        for index in backends {
            assert_eq!(index.insert(4, 4).map(PointId::get), Ok(1));
            assert!(index.insert(4, 4).is_err());
            assert_eq!(index.insert(5, 4).map(PointId::get), Ok(2));
            index.clear();
            assert!(index.is_empty());
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn shape_serializes_for_renderers() {
        let mut tree = QuadTree::with_capacity(cap(1));
        tree.insert(10, 10).unwrap();
        tree.insert(90, 90).unwrap();
        let json = serde_json::to_value(tree.shape()).unwrap();
        assert_eq!(json["capacity"], 1);
        assert_eq!(json["nodes"][0]["children"], serde_json::json!([1, 2, 3, 4]));
        assert_eq!(json["points"][1]["x"], 90);

        let trace = serde_json::to_string(&tree.search_point(90, 90)).unwrap();
        let back: PointSearch = serde_json::from_str(&trace).unwrap();
        assert_eq!(back, tree.search_point(90, 90));
    }
}
