// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point lookup and rectangle range queries.
//!
//! Each search comes in three forms: a plain answer, a lazy walk that yields
//! one visitation step per call to `next`, and an eager variant that collects
//! the walk into a trace. Walks borrow the tree, so it cannot change while a
//! traversal is being replayed; dropping a walk early abandons the search.

use alloc::vec;
use alloc::vec::Vec;

use crate::tree::{NodeId, Point, PointId, QuadTree};
use crate::trace::{NodeVisit, PointSearch, RangeSearch, RangeStep, SearchStep};
use crate::types::{Aabb2D, Coord};

impl QuadTree {
    /// Whether a point with exactly these coordinates is stored.
    pub fn contains(&self, x: Coord, y: Coord) -> bool {
        self.point_at(x, y).is_some()
    }

    /// Id of the point stored at `(x, y)`.
    pub fn point_at(&self, x: Coord, y: Coord) -> Option<PointId> {
        self.bucket_match(self.descend(x, y), x, y)
    }

    /// Step-by-step point search: the root-to-leaf path, then the leaf scan.
    ///
    /// The scan stops at the first match.
    pub fn point_walk(&self, x: Coord, y: Coord) -> PointWalk<'_> {
        PointWalk {
            tree: self,
            x,
            y,
            state: PointWalkState::Node(NodeId::ROOT),
        }
    }

    /// Run [`point_walk`](Self::point_walk) to completion and record it.
    pub fn search_point(&self, x: Coord, y: Coord) -> PointSearch {
        let mut search = PointSearch {
            found: None,
            leaf: NodeId::ROOT,
            steps: Vec::new(),
        };
        for step in self.point_walk(x, y) {
            match step {
                SearchStep::Node(id) => search.leaf = id,
                SearchStep::Compare {
                    point,
                    matched: true,
                } => search.found = Some(point),
                SearchStep::Compare { .. } => {}
            }
            search.steps.push(step);
        }
        search
    }

    /// Points inside the closed rectangle, in visitation order.
    ///
    /// A rectangle without positive area yields nothing.
    pub fn query_range(&self, rect: Aabb2D<Coord>) -> Vec<Point> {
        self.range_walk(rect)
            .filter_map(|step| match step {
                RangeStep::Point { point, hit: true } => Some(self.points[point.idx()]),
                _ => None,
            })
            .collect()
    }

    /// Number of points inside the closed rectangle.
    pub fn count_in_range(&self, rect: Aabb2D<Coord>) -> usize {
        self.range_walk(rect)
            .filter(|step| matches!(step, RangeStep::Point { hit: true, .. }))
            .count()
    }

    /// Number of points a range search will test.
    ///
    /// This is the total size of every leaf whose region meets the rectangle,
    /// computed without visiting the points. A replay is complete once this many
    /// [`RangeStep::Point`] events have been consumed.
    pub fn points_considered(&self, rect: Aabb2D<Coord>) -> usize {
        if !rect.has_area() {
            return 0;
        }
        self.considered_below(NodeId::ROOT, &rect.to_f64())
    }

    fn considered_below(&self, id: NodeId, rect: &Aabb2D<f64>) -> usize {
        let node = &self.nodes[id.idx()];
        if !node.bounds.intersects(rect) {
            return 0;
        }
        match node.children {
            None => node.points.len(),
            Some(children) => children
                .iter()
                .map(|&c| self.considered_below(c, rect))
                .sum(),
        }
    }

    /// Step-by-step range search in depth-first child order.
    pub fn range_walk(&self, rect: Aabb2D<Coord>) -> RangeWalk<'_> {
        let stack = if rect.has_area() {
            vec![Frame::Node(NodeId::ROOT)]
        } else {
            Vec::new()
        };
        RangeWalk {
            tree: self,
            rect,
            region: rect.to_f64(),
            stack,
        }
    }

    /// Run [`range_walk`](Self::range_walk) to completion and record it.
    pub fn search_range(&self, rect: Aabb2D<Coord>) -> RangeSearch {
        let mut search = RangeSearch {
            matches: Vec::new(),
            considered: 0,
            steps: Vec::new(),
        };
        for step in self.range_walk(rect) {
            if let RangeStep::Point { point, hit } = step {
                search.considered += 1;
                if hit {
                    search.matches.push(point);
                }
            }
            search.steps.push(step);
        }
        search
    }
}

#[derive(Copy, Clone, Debug)]
enum PointWalkState {
    Node(NodeId),
    Scan { leaf: NodeId, next: usize },
    Done,
}

/// Lazy point search returned by [`QuadTree::point_walk`].
#[derive(Clone, Debug)]
pub struct PointWalk<'a> {
    tree: &'a QuadTree,
    x: Coord,
    y: Coord,
    state: PointWalkState,
}

impl Iterator for PointWalk<'_> {
    type Item = SearchStep;

    fn next(&mut self) -> Option<SearchStep> {
        match self.state {
            PointWalkState::Node(id) => {
                let node = &self.tree.nodes[id.idx()];
                self.state = match node.children {
                    Some(children) => {
                        let q = node.bounds.quadrant_of(self.x, self.y);
                        PointWalkState::Node(children[q.index()])
                    }
                    None => PointWalkState::Scan { leaf: id, next: 0 },
                };
                Some(SearchStep::Node(id))
            }
            PointWalkState::Scan { leaf, next } => {
                let Some(&pid) = self.tree.nodes[leaf.idx()].points.get(next) else {
                    self.state = PointWalkState::Done;
                    return None;
                };
                let p = self.tree.points[pid.idx()];
                let matched = p.x == self.x && p.y == self.y;
                self.state = if matched {
                    PointWalkState::Done
                } else {
                    PointWalkState::Scan {
                        leaf,
                        next: next + 1,
                    }
                };
                Some(SearchStep::Compare {
                    point: pid,
                    matched,
                })
            }
            PointWalkState::Done => None,
        }
    }
}

impl core::iter::FusedIterator for PointWalk<'_> {}

#[derive(Copy, Clone, Debug)]
enum Frame {
    Node(NodeId),
    Points { leaf: NodeId, next: usize },
}

/// Lazy range search returned by [`QuadTree::range_walk`].
///
/// Nodes are visited depth-first with children in top-left, top-right,
/// bottom-left, bottom-right order; a leaf's points are tested right after the
/// leaf itself is visited.
#[derive(Clone, Debug)]
pub struct RangeWalk<'a> {
    tree: &'a QuadTree,
    rect: Aabb2D<Coord>,
    region: Aabb2D<f64>,
    stack: Vec<Frame>,
}

impl Iterator for RangeWalk<'_> {
    type Item = RangeStep;

    fn next(&mut self) -> Option<RangeStep> {
        loop {
            match self.stack.pop()? {
                Frame::Node(id) => {
                    let node = &self.tree.nodes[id.idx()];
                    let visit = if !node.bounds.intersects(&self.region) {
                        NodeVisit::Pruned
                    } else if let Some(children) = node.children {
                        self.stack.extend(children.iter().rev().map(|&c| Frame::Node(c)));
                        NodeVisit::Inner
                    } else {
                        self.stack.push(Frame::Points { leaf: id, next: 0 });
                        NodeVisit::Leaf
                    };
                    return Some(RangeStep::Node { node: id, visit });
                }
                Frame::Points { leaf, next } => {
                    let Some(&pid) = self.tree.nodes[leaf.idx()].points.get(next) else {
                        continue;
                    };
                    self.stack.push(Frame::Points {
                        leaf,
                        next: next + 1,
                    });
                    let p = self.tree.points[pid.idx()];
                    return Some(RangeStep::Point {
                        point: pid,
                        hit: self.rect.contains_point(p.x, p.y),
                    });
                }
            }
        }
    }
}

impl core::iter::FusedIterator for RangeWalk<'_> {}
