// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.
//!
//! The plane is y-up: `min_y` is the bottom edge and `max_y` the top edge.

use core::cmp::Ordering;

/// Integer coordinate of a stored point.
pub type Coord = i64;

/// Axis-aligned rectangle in 2D.
///
/// Used with `f64` for node regions and with [`Coord`] for range queries.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb2D<T> {
    /// Minimum x (left)
    pub min_x: T,
    /// Minimum y (bottom)
    pub min_y: T,
    /// Maximum x (right)
    pub max_x: T,
    /// Maximum y (top)
    pub max_y: T,
}

impl<T> Aabb2D<T> {
    /// Create a new AABB from min/max corners.
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Copy + PartialOrd> Aabb2D<T> {
    /// Whether this AABB contains the point. Bounds are closed on every side.
    pub fn contains_point(&self, x: T, y: T) -> bool {
        le(self.min_x, x) && le(self.min_y, y) && le(x, self.max_x) && le(y, self.max_y)
    }

    /// Closed-interval overlap test.
    ///
    /// Two rectangles intersect unless one lies entirely left of, right of,
    /// above, or below the other. Shared edges and corners count as overlap.
    pub fn intersects(&self, other: &Self) -> bool {
        !(lt(self.max_x, other.min_x)
            || lt(other.max_x, self.min_x)
            || lt(self.max_y, other.min_y)
            || lt(other.max_y, self.min_y))
    }

    /// True if `max > min` on both axes. Assumes no NaN.
    pub fn has_area(&self) -> bool {
        lt(self.min_x, self.max_x) && lt(self.min_y, self.max_y)
    }
}

impl Aabb2D<Coord> {
    /// Widen integer bounds to the region scalar.
    pub fn to_f64(self) -> Aabb2D<f64> {
        Aabb2D::new(
            self.min_x as f64,
            self.min_y as f64,
            self.max_x as f64,
            self.max_y as f64,
        )
    }
}

impl Aabb2D<f64> {
    /// Horizontal split line.
    #[inline]
    pub fn mid_x(&self) -> f64 {
        0.5 * (self.min_x + self.max_x)
    }

    /// Vertical split line.
    #[inline]
    pub fn mid_y(&self) -> f64 {
        0.5 * (self.min_y + self.max_y)
    }

    /// Width of the region.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the region.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// The quadrant of this region that owns `(x, y)`.
    ///
    /// `y > mid_y` selects the top half and `x < mid_x` the left half, so a
    /// point on a split line belongs to the bottom/right side.
    pub fn quadrant_of(&self, x: Coord, y: Coord) -> Quadrant {
        let (x, y) = (x as f64, y as f64);
        match (y > self.mid_y(), x < self.mid_x()) {
            (true, true) => Quadrant::TopLeft,
            (true, false) => Quadrant::TopRight,
            (false, true) => Quadrant::BottomLeft,
            (false, false) => Quadrant::BottomRight,
        }
    }

    /// Sub-region covered by quadrant `q`.
    pub fn quadrant(&self, q: Quadrant) -> Self {
        let (mx, my) = (self.mid_x(), self.mid_y());
        match q {
            Quadrant::TopLeft => Self::new(self.min_x, my, mx, self.max_y),
            Quadrant::TopRight => Self::new(mx, my, self.max_x, self.max_y),
            Quadrant::BottomLeft => Self::new(self.min_x, self.min_y, mx, my),
            Quadrant::BottomRight => Self::new(mx, self.min_y, self.max_x, my),
        }
    }
}

/// One of the four children of an inner node, in child order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Quadrant {
    /// `x < mid_x`, `y > mid_y`
    TopLeft = 0,
    /// `x >= mid_x`, `y > mid_y`
    TopRight = 1,
    /// `x < mid_x`, `y <= mid_y`
    BottomLeft = 2,
    /// `x >= mid_x`, `y <= mid_y`
    BottomRight = 3,
}

impl Quadrant {
    /// All quadrants in child order.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Position of this quadrant among a node's children.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

pub(crate) fn le<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Greater)
        .unwrap_or(false)
}
pub(crate) fn lt<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o == Ordering::Less)
        .unwrap_or(false)
}
