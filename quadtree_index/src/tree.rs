// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, insertion, splitting, rebuilds.

use alloc::vec;
use alloc::vec::Vec;
use core::num::NonZeroUsize;

use tracing::{debug, trace};

use crate::error::InsertError;
use crate::stats::Stats;
use crate::types::{Aabb2D, Coord, Quadrant};

/// Region covered by a tree built with [`QuadTree::new`].
pub const DEFAULT_BOUNDS: Aabb2D<f64> = Aabb2D::new(0.0, 0.0, 100.0, 100.0);

/// Leaf capacity used by [`QuadTree::new`].
pub const DEFAULT_CAPACITY: NonZeroUsize = NonZeroUsize::new(3).unwrap();

/// Identifier of a node.
///
/// Ids are handed out in creation order: the root is `0` and each split
/// allocates the next four ids for its top-left, top-right, bottom-left, and
/// bottom-right children. Ids restart from `0` after a rebuild or erase.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(u32);

impl NodeId {
    /// The root node.
    pub const ROOT: Self = Self(0);

    #[allow(
        clippy::cast_possible_truncation,
        reason = "Node ids are intentionally 32-bit."
    )]
    const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Numeric value of the id.
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Identifier of a stored point.
///
/// The first point inserted after a reset gets id `1`; every successful
/// insertion takes the next id and rejected duplicates take none.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointId(u32);

impl PointId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Point ids are intentionally 32-bit."
    )]
    pub(crate) const fn from_index(idx: usize) -> Self {
        Self(idx as u32 + 1)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize - 1
    }

    /// Numeric value of the id.
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// A stored point.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Id assigned at insertion.
    pub id: PointId,
    /// X coordinate.
    pub x: Coord,
    /// Y coordinate.
    pub y: Coord,
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) bounds: Aabb2D<f64>,
    pub(crate) children: Option<[NodeId; 4]>,
    // Only leaves hold points.
    pub(crate) points: Vec<PointId>,
}

impl Node {
    fn leaf(bounds: Aabb2D<f64>) -> Self {
        Self {
            bounds,
            children: None,
            points: Vec::new(),
        }
    }

    /// Whether splitting can still separate distinct integer points.
    ///
    /// A closed interval shorter than 1 holds at most one integer, so once both
    /// extents drop below 1 every in-bounds point in the leaf is identical.
    /// An axis also stops counting once its midpoint rounds onto an edge, which
    /// happens for extents past the exact integer range of `f64`.
    fn divisible(&self) -> bool {
        let b = &self.bounds;
        let x = b.width() >= 1.0 && b.min_x < b.mid_x() && b.mid_x() < b.max_x;
        let y = b.height() >= 1.0 && b.min_y < b.mid_y() && b.mid_y() < b.max_y;
        x || y
    }
}

/// Point quadtree over a fixed square region.
///
/// Leaves hold up to `capacity` points; inserting past that splits the leaf
/// into four children at its midpoint and redistributes its points, cascading
/// until no leaf in the affected subtree is over capacity.
///
/// The tree retains every inserted point in insertion order, which makes
/// capacity changes and [`remove_last`](Self::remove_last) full rebuilds whose
/// result depends only on the capacity and that ordered list.
#[derive(Clone)]
pub struct QuadTree {
    bounds: Aabb2D<f64>,
    capacity: NonZeroUsize,
    // Arena indexed by `NodeId`; its length is the next node id.
    pub(crate) nodes: Vec<Node>,
    // Indexed by `PointId - 1`; its length plus one is the next point id.
    pub(crate) points: Vec<Point>,
    stats: Stats,
}

impl core::fmt::Debug for QuadTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadTree")
            .field("bounds", &self.bounds)
            .field("capacity", &self.capacity)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Default for QuadTree {
    fn default() -> Self {
        Self::new()
    }
}

impl QuadTree {
    /// Create an empty tree over [`DEFAULT_BOUNDS`] with [`DEFAULT_CAPACITY`].
    pub fn new() -> Self {
        Self::with_bounds(DEFAULT_BOUNDS, DEFAULT_CAPACITY)
    }

    /// Create an empty tree over [`DEFAULT_BOUNDS`] with the given leaf capacity.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self::with_bounds(DEFAULT_BOUNDS, capacity)
    }

    /// Create an empty tree over `bounds` with the given leaf capacity.
    pub fn with_bounds(bounds: Aabb2D<f64>, capacity: NonZeroUsize) -> Self {
        debug_assert!(bounds.has_area(), "tree bounds must have positive area");
        Self {
            bounds,
            capacity,
            nodes: vec![Node::leaf(bounds)],
            points: Vec::new(),
            stats: Stats::EMPTY,
        }
    }

    /// Region covered by the root.
    pub fn bounds(&self) -> Aabb2D<f64> {
        self.bounds
    }

    /// Maximum number of points a leaf holds before it splits.
    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    /// Current shape summary.
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Every stored point in insertion order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if no points are stored.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Look up a point by id.
    pub fn point(&self, id: PointId) -> Option<Point> {
        // Ids can come back from a renderer, so `0` is not ruled out.
        let idx = (id.get() as usize).checked_sub(1)?;
        self.points.get(idx).copied()
    }

    /// Insert a point, splitting leaves as needed.
    ///
    /// Fails with [`InsertError::Duplicate`] when `(x, y)` is already stored;
    /// the tree is unchanged in that case.
    pub fn insert(&mut self, x: Coord, y: Coord) -> Result<PointId, InsertError> {
        let (id, split) = self.insert_point(x, y)?;
        if split {
            self.refresh_stats();
        } else {
            self.stats.point_count = self.points.len();
        }
        Ok(id)
    }

    /// Change the leaf capacity, rebuilding the whole tree from the stored points.
    ///
    /// Does nothing when `capacity` equals the current capacity.
    pub fn set_capacity(&mut self, capacity: NonZeroUsize) -> Stats {
        if capacity == self.capacity {
            return self.stats;
        }
        self.capacity = capacity;
        let snapshot = core::mem::take(&mut self.points);
        debug!(
            capacity = capacity.get(),
            points = snapshot.len(),
            "rebuild after capacity change"
        );
        self.rebuild(&snapshot)
    }

    /// Drop the most recently inserted point by rebuilding from the others.
    ///
    /// Does nothing on an empty tree.
    pub fn remove_last(&mut self) -> Stats {
        let mut snapshot = core::mem::take(&mut self.points);
        if snapshot.pop().is_none() {
            return self.stats;
        }
        debug!(points = snapshot.len(), "rebuild without last point");
        self.rebuild(&snapshot)
    }

    /// Remove every point and every node except an empty root.
    pub fn erase_all(&mut self) -> Stats {
        debug!(points = self.points.len(), "erase tree");
        self.reset();
        self.stats
    }

    fn reset(&mut self) {
        self.nodes.clear();
        self.nodes.push(Node::leaf(self.bounds));
        self.points.clear();
        self.stats = Stats::EMPTY;
    }

    fn rebuild(&mut self, snapshot: &[Point]) -> Stats {
        self.reset();
        for p in snapshot {
            let inserted = self.insert_point(p.x, p.y);
            debug_assert!(inserted.is_ok(), "stored points are distinct");
        }
        self.refresh_stats();
        self.stats
    }

    /// Insert without refreshing stats. Also reports whether a split happened.
    fn insert_point(&mut self, x: Coord, y: Coord) -> Result<(PointId, bool), InsertError> {
        let leaf = self.descend(x, y);
        if self.bucket_match(leaf, x, y).is_some() {
            trace!(x, y, "duplicate rejected");
            return Err(InsertError::Duplicate { x, y });
        }
        let id = PointId::from_index(self.points.len());
        self.points.push(Point { id, x, y });
        let node = &mut self.nodes[leaf.idx()];
        node.points.push(id);
        trace!(id = id.get(), x, y, leaf = leaf.get(), "point inserted");
        if node.points.len() > self.capacity.get() && node.divisible() {
            self.split(leaf, 0);
            return Ok((id, true));
        }
        Ok((id, false))
    }

    /// Turn a leaf into an inner node and push its points down one level.
    fn split(&mut self, id: NodeId, cascade: usize) {
        let bounds = self.nodes[id.idx()].bounds;
        let first = self.nodes.len();
        let children = [0, 1, 2, 3].map(|i| NodeId::new(first + i));
        for q in Quadrant::ALL {
            self.nodes.push(Node::leaf(bounds.quadrant(q)));
        }

        let bucket = core::mem::take(&mut self.nodes[id.idx()].points);
        debug!(
            node = id.get(),
            cascade,
            points = bucket.len(),
            "split leaf"
        );
        for pid in bucket {
            let p = self.points[pid.idx()];
            let child = children[bounds.quadrant_of(p.x, p.y).index()];
            self.nodes[child.idx()].points.push(pid);
        }
        self.nodes[id.idx()].children = Some(children);

        for child in children {
            let node = &self.nodes[child.idx()];
            if node.points.len() > self.capacity.get() && node.divisible() {
                self.split(child, cascade + 1);
            }
        }
    }

    /// The unique leaf whose region owns `(x, y)`.
    pub(crate) fn descend(&self, x: Coord, y: Coord) -> NodeId {
        let mut id = NodeId::ROOT;
        while let Some(children) = self.nodes[id.idx()].children {
            id = children[self.nodes[id.idx()].bounds.quadrant_of(x, y).index()];
        }
        id
    }

    /// Id of the point in `leaf`'s bucket equal to `(x, y)`.
    pub(crate) fn bucket_match(&self, leaf: NodeId, x: Coord, y: Coord) -> Option<PointId> {
        self.nodes[leaf.idx()]
            .points
            .iter()
            .copied()
            .find(|pid| {
                let p = &self.points[pid.idx()];
                p.x == x && p.y == y
            })
    }

    fn refresh_stats(&mut self) {
        self.stats = Stats::measure(&self.nodes, NodeId::ROOT, self.points.len());
    }

    /// Read-only view of a node, or `None` if `id` does not exist.
    pub fn node(&self, id: NodeId) -> Option<NodeView<'_>> {
        let node = self.nodes.get(id.idx())?;
        Some(NodeView { id, node })
    }

    /// View of the root node.
    pub fn root(&self) -> NodeView<'_> {
        NodeView {
            id: NodeId::ROOT,
            node: &self.nodes[0],
        }
    }

    /// Views of every node in id order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeView<'_>> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| NodeView {
                id: NodeId::new(i),
                node,
            })
    }

    /// Owned snapshot of the whole tree for an external renderer.
    pub fn shape(&self) -> TreeShape {
        TreeShape {
            bounds: self.bounds,
            capacity: self.capacity.get(),
            nodes: self.nodes().map(|n| n.to_shape()).collect(),
            points: self.points.clone(),
        }
    }
}

/// Borrowed view of one node.
#[derive(Copy, Clone, Debug)]
pub struct NodeView<'a> {
    id: NodeId,
    node: &'a Node,
}

impl<'a> NodeView<'a> {
    /// This node's id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Region covered by this node.
    pub fn bounds(&self) -> Aabb2D<f64> {
        self.node.bounds
    }

    /// Children in top-left, top-right, bottom-left, bottom-right order.
    pub fn children(&self) -> Option<[NodeId; 4]> {
        self.node.children
    }

    /// True if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.node.children.is_none()
    }

    /// Points held by this node, in bucket order. Empty for inner nodes.
    pub fn points(&self) -> &'a [PointId] {
        &self.node.points
    }

    fn to_shape(self) -> NodeShape {
        NodeShape {
            id: self.id,
            bounds: self.node.bounds,
            children: self.node.children,
            points: self.node.points.clone(),
        }
    }
}

/// Owned description of one node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeShape {
    /// Node id.
    pub id: NodeId,
    /// Region covered by the node.
    pub bounds: Aabb2D<f64>,
    /// Child ids, if the node has been split.
    pub children: Option<[NodeId; 4]>,
    /// Ids of the points held by a leaf.
    pub points: Vec<PointId>,
}

/// Owned description of a whole tree, indexed by node id.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeShape {
    /// Region covered by the root.
    pub bounds: Aabb2D<f64>,
    /// Leaf capacity.
    pub capacity: usize,
    /// Every node; `nodes[i].id == NodeId(i)`.
    pub nodes: Vec<NodeShape>,
    /// Every point in insertion order.
    pub points: Vec<Point>,
}
