// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boundary vertex record

use crate::orient::{self, Orientation};
use nalgebra::Point2;

/// One vertex of a polygon boundary during processing.
///
/// Carries the coordinate, the index into the engine's output vertex array
/// (preserved across splits so triangle indices stay meaningful), and the
/// turn cached by the last classification pass. Sub-polygons receive
/// detached copies, never shared references.
#[derive(Debug, Clone, Copy)]
pub struct BoundaryVertex {
    /// Coordinate
    pub pos: Point2<f64>,
    /// Index into the engine's output vertex array
    pub index: usize,
    /// Turn relative to the immediate neighbors at last classification
    pub turn: Orientation,
}

impl BoundaryVertex {
    /// Create an unclassified vertex
    pub fn new(pos: Point2<f64>, index: usize) -> Self {
        Self {
            pos,
            index,
            turn: Orientation::Unset,
        }
    }

    /// A copy with the cached turn cleared, for splicing into a new
    /// sub-polygon boundary.
    pub fn detached(&self) -> Self {
        Self::new(self.pos, self.index)
    }

    /// Classify and cache the turn between `prev` and `next`.
    pub fn set_turn(&mut self, prev: Point2<f64>, next: Point2<f64>) -> Orientation {
        self.turn = orient::classify(prev, self.pos, next);
        self.turn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_is_cached() {
        let mut v = BoundaryVertex::new(Point2::new(1.0, 0.0), 3);
        assert_eq!(v.turn, Orientation::Unset);
        let turn = v.set_turn(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0));
        assert_eq!(turn, Orientation::CounterClockwise);
        assert_eq!(v.turn, Orientation::CounterClockwise);
    }

    #[test]
    fn test_detached_clears_cache() {
        let mut v = BoundaryVertex::new(Point2::new(1.0, 0.0), 3);
        v.set_turn(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0));
        let d = v.detached();
        assert_eq!(d.index, 3);
        assert_eq!(d.turn, Orientation::Unset);
    }
}
