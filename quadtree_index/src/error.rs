// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by tree mutations.

use thiserror::Error;

use crate::types::Coord;

/// Why an insertion was rejected.
///
/// Rejections are recoverable and leave the tree untouched: no point id is
/// consumed and the stats are unchanged.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum InsertError {
    /// A point with the same coordinates is already stored.
    #[error("({x}, {y}) is already in the tree")]
    Duplicate {
        /// Rejected x coordinate.
        x: Coord,
        /// Rejected y coordinate.
        y: Coord,
    },
}
