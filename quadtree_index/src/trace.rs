// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visitation events recorded by searches.
//!
//! A search visits nodes and compares points in a fixed order. The events here
//! describe that order so a renderer can replay it one step at a time without
//! knowing how the tree is stored.

use alloc::vec::Vec;

use crate::tree::{NodeId, PointId};

/// One step of a point search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStep {
    /// Entered a node on the root-to-leaf path.
    Node(NodeId),
    /// Compared a point in the target leaf against the query coordinates.
    Compare {
        /// The compared point.
        point: PointId,
        /// Whether its coordinates equal the query.
        matched: bool,
    },
}

/// How a range search treated a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeVisit {
    /// The node's region misses the rectangle; its subtree was skipped.
    Pruned,
    /// A leaf overlapping the rectangle; its points follow.
    Leaf,
    /// An inner node overlapping the rectangle; its children follow.
    Inner,
}

/// One step of a range search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RangeStep {
    /// Visited a node.
    Node {
        /// The visited node.
        node: NodeId,
        /// Classification of the visit.
        visit: NodeVisit,
    },
    /// Tested a point of an overlapping leaf.
    Point {
        /// The tested point.
        point: PointId,
        /// Whether it lies inside the rectangle.
        hit: bool,
    },
}

/// Result of [`QuadTree::search_point`](crate::QuadTree::search_point).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointSearch {
    /// The matching point, if any.
    pub found: Option<PointId>,
    /// Leaf whose region owns the query coordinates.
    pub leaf: NodeId,
    /// Every step in visitation order.
    pub steps: Vec<SearchStep>,
}

/// Result of [`QuadTree::search_range`](crate::QuadTree::search_range).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeSearch {
    /// Points inside the rectangle, in visitation order.
    pub matches: Vec<PointId>,
    /// Number of points tested, matching or not.
    pub considered: usize,
    /// Every step in visitation order.
    pub steps: Vec<RangeStep>,
}

impl RangeSearch {
    /// Nodes that were skipped without descending.
    pub fn pruned(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.steps.iter().filter_map(|s| match s {
            RangeStep::Node {
                node,
                visit: NodeVisit::Pruned,
            } => Some(*node),
            _ => None,
        })
    }
}
