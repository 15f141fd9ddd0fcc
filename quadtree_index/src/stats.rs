// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Aggregate tree statistics.

use crate::tree::{Node, NodeId};

/// Shape summary of a tree, refreshed after every structural mutation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    /// Longest root-to-leaf edge count. A lone root has depth 0.
    pub depth: usize,
    /// Number of nodes, inner and leaf.
    pub node_count: usize,
    /// Number of leaves.
    pub leaf_count: usize,
    /// Number of stored points.
    pub point_count: usize,
}

impl Stats {
    /// Stats of a tree holding only an empty root.
    pub const EMPTY: Self = Self {
        depth: 0,
        node_count: 1,
        leaf_count: 1,
        point_count: 0,
    };

    /// Number of inner (split) nodes.
    pub const fn inner_count(&self) -> usize {
        self.node_count - self.leaf_count
    }

    pub(crate) fn measure(nodes: &[Node], root: NodeId, point_count: usize) -> Self {
        Self {
            depth: depth(nodes, root),
            node_count: node_count(nodes, root),
            leaf_count: leaf_count(nodes, root),
            point_count,
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::EMPTY
    }
}

fn depth(nodes: &[Node], id: NodeId) -> usize {
    match nodes[id.idx()].children {
        None => 0,
        Some(children) => 1 + children.iter().map(|&c| depth(nodes, c)).max().unwrap_or(0),
    }
}

fn node_count(nodes: &[Node], id: NodeId) -> usize {
    match nodes[id.idx()].children {
        None => 1,
        Some(children) => 1 + children.iter().map(|&c| node_count(nodes, c)).sum::<usize>(),
    }
}

fn leaf_count(nodes: &[Node], id: NodeId) -> usize {
    match nodes[id.idx()].children {
        None => 1,
        Some(children) => children.iter().map(|&c| leaf_count(nodes, c)).sum(),
    }
}
