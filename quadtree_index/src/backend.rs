// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trait shared by point containers that answer the same queries.

use alloc::boxed::Box;

use crate::error::InsertError;
use crate::tree::{Point, PointId, QuadTree};
use crate::types::{Aabb2D, Coord};

/// Point container abstraction.
///
/// Implementations assign ids the same way: `1, 2, 3, ...` in insertion order,
/// skipping nothing for rejected duplicates. Two implementations fed the same
/// inserts therefore report the same ids.
pub trait PointIndex {
    /// Insert a point, rejecting exact duplicates.
    fn insert(&mut self, x: Coord, y: Coord) -> Result<PointId, InsertError>;

    /// Remove every point and restart id assignment.
    fn clear(&mut self);

    /// Number of stored points.
    fn len(&self) -> usize;

    /// True if no points are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a point with exactly these coordinates is stored.
    fn contains(&self, x: Coord, y: Coord) -> bool;

    /// Points inside the closed rectangle. Empty for rectangles without area.
    fn query_range<'a>(&'a self, rect: Aabb2D<Coord>) -> Box<dyn Iterator<Item = Point> + 'a>;
}

impl PointIndex for QuadTree {
    fn insert(&mut self, x: Coord, y: Coord) -> Result<PointId, InsertError> {
        Self::insert(self, x, y)
    }

    fn clear(&mut self) {
        self.erase_all();
    }

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn contains(&self, x: Coord, y: Coord) -> bool {
        Self::contains(self, x, y)
    }

    fn query_range<'a>(&'a self, rect: Aabb2D<Coord>) -> Box<dyn Iterator<Item = Point> + 'a> {
        Box::new(Self::query_range(self, rect).into_iter())
    }
}
