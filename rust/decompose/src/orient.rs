// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Turn classification via the 2D cross product
//!
//! Every convexity decision in the crate funnels through [`cross2`] so the
//! collinearity tolerance is applied in exactly one place. Splicing keeps
//! producing synthesized vertices with accumulated rounding error; a vertex
//! that one pass calls collinear must stay collinear on the next pass.

use nalgebra::{Point2, Vector2};

/// Magnitudes below this snap to zero in [`cross2`] and [`dot2`].
pub const EPS: f64 = 1e-5;

/// Winding of a vertex sequence, or the cached turn at one vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
    Collinear,
    /// Not yet classified
    Unset,
}

impl Orientation {
    /// The opposite winding; `Collinear` and `Unset` map to themselves.
    pub fn reversed(self) -> Self {
        match self {
            Orientation::Clockwise => Orientation::CounterClockwise,
            Orientation::CounterClockwise => Orientation::Clockwise,
            other => other,
        }
    }
}

/// 2D cross product of `a` and `b`, snapped to zero within [`EPS`].
#[inline]
pub fn cross2(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    let v = a.x * b.y - b.x * a.y;
    if v.abs() < EPS {
        0.0
    } else {
        v
    }
}

/// Dot product of `a` and `b`, snapped to zero within [`EPS`].
///
/// The rectangle perpendicularity test uses the same tolerance as the
/// turn predicate so that vertices synthesized by splitting still register
/// as right angles.
#[inline]
pub fn dot2(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    let v = a.dot(&b);
    if v.abs() < EPS {
        0.0
    } else {
        v
    }
}

/// Classify the turn at `point` between its boundary neighbors.
///
/// Sign of the cross product of (`point` − `prev`) and (`next` − `prev`):
/// positive turns counter-clockwise, negative clockwise, a snapped zero is
/// collinear.
#[inline]
pub fn classify(prev: Point2<f64>, point: Point2<f64>, next: Point2<f64>) -> Orientation {
    let v = cross2(point - prev, next - prev);
    if v > 0.0 {
        Orientation::CounterClockwise
    } else if v < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_turns() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        assert_eq!(
            classify(a, b, Point2::new(1.0, 1.0)),
            Orientation::CounterClockwise
        );
        assert_eq!(
            classify(a, b, Point2::new(1.0, -1.0)),
            Orientation::Clockwise
        );
        assert_eq!(
            classify(a, b, Point2::new(2.0, 0.0)),
            Orientation::Collinear
        );
    }

    #[test]
    fn test_classify_antisymmetric() {
        // reversing traversal order flips the reported winding
        let a = Point2::new(0.3, -1.2);
        let b = Point2::new(2.0, 0.5);
        let c = Point2::new(-0.7, 1.9);
        assert_eq!(classify(a, b, c), classify(c, b, a).reversed());
    }

    #[test]
    fn test_near_zero_snaps_to_collinear() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        let c = Point2::new(2.0, 1e-6);
        assert_eq!(classify(a, b, c), Orientation::Collinear);
    }

    #[test]
    fn test_dot_snap() {
        let u = Vector2::new(1.0, 0.0);
        assert_eq!(dot2(u, Vector2::new(1e-6, 1.0)), 0.0);
        assert!(dot2(u, Vector2::new(0.5, 0.0)) > 0.0);
    }
}
