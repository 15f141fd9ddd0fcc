// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector of points with linear scans. Small and simple; the reference
//! answer for anything the quadtree computes.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::PointIndex;
use crate::error::InsertError;
use crate::tree::{Point, PointId};
use crate::types::{Aabb2D, Coord};

/// Flat vector backend with linear scans.
#[derive(Clone, Default)]
pub struct FlatPoints {
    points: Vec<Point>,
}

impl FlatPoints {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored point in insertion order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

impl Debug for FlatPoints {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlatPoints")
            .field("len", &self.points.len())
            .finish_non_exhaustive()
    }
}

impl PointIndex for FlatPoints {
    fn insert(&mut self, x: Coord, y: Coord) -> Result<PointId, InsertError> {
        if self.contains(x, y) {
            return Err(InsertError::Duplicate { x, y });
        }
        let id = PointId::from_index(self.points.len());
        self.points.push(Point { id, x, y });
        Ok(id)
    }
    fn clear(&mut self) {
        self.points.clear();
    }
    fn len(&self) -> usize {
        self.points.len()
    }
    fn contains(&self, x: Coord, y: Coord) -> bool {
        self.points.iter().any(|p| p.x == x && p.y == y)
    }
    fn query_range<'a>(&'a self, rect: Aabb2D<Coord>) -> Box<dyn Iterator<Item = Point> + 'a> {
        let mut out = Vec::new();
        if rect.has_area() {
            for p in &self.points {
                if rect.contains_point(p.x, p.y) {
                    out.push(*p);
                }
            }
        }
        Box::new(out.into_iter())
    }
}
