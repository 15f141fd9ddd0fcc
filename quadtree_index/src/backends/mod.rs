// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Alternative [`PointIndex`](crate::PointIndex) implementations.
//!
//! - `flat`: flat vector with linear scans, used as a correctness reference
//!   and a benchmark baseline for the quadtree.

pub mod flat;
