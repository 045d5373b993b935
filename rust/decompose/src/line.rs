// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Line / ray / segment intersection primitive
//!
//! A `Line2` is a 2D line in vertical, horizontal or slope-intercept form
//! together with an explicit domain (`min_x..max_x`) and range
//! (`min_y..max_y`). Infinite bounds encode rays and full lines, which is
//! what the concave-split visibility test casts against boundary segments.

use crate::error::{Error, Result};
use nalgebra::Point2;

/// Tolerance for the on-line membership check.
const ON_LINE_EPS: f64 = 1e-4;

#[derive(Debug, Clone, Copy)]
enum Form {
    /// `x = const`
    Vertical { x: f64 },
    /// `y = const`
    Horizontal { y: f64 },
    /// `y = slope * x + intercept`
    Sloped { slope: f64, intercept: f64 },
}

/// 2D line, ray or segment with explicit domain and range bounds.
///
/// Immutable once constructed.
#[derive(Debug, Clone, Copy)]
pub struct Line2 {
    form: Form,
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Line2 {
    /// Build a line through `p1` and `p2` with explicit x and y bounds.
    ///
    /// Bound pairs may be given in either order; an infinite entry leaves
    /// that side of the domain or range open (a ray, or a full line when
    /// both are infinite). Coincident points are rejected.
    pub fn new(
        p1: Point2<f64>,
        p2: Point2<f64>,
        x_range: (f64, f64),
        y_range: (f64, f64),
    ) -> Result<Self> {
        if p1 == p2 {
            return Err(Error::DegenerateLine(p1, p2));
        }
        if p1.x == p2.x {
            return Ok(Self {
                form: Form::Vertical { x: p1.x },
                min_x: p1.x,
                max_x: p1.x,
                min_y: y_range.0.min(y_range.1),
                max_y: y_range.0.max(y_range.1),
            });
        }
        if p1.y == p2.y {
            return Ok(Self {
                form: Form::Horizontal { y: p1.y },
                min_x: x_range.0.min(x_range.1),
                max_x: x_range.0.max(x_range.1),
                min_y: p1.y,
                max_y: p1.y,
            });
        }
        let slope = (p1.y - p2.y) / (p1.x - p2.x);
        let intercept = p1.y - slope * p1.x;
        let min_x = x_range.0.min(x_range.1);
        let max_x = x_range.0.max(x_range.1);
        // A positive slope maps the minimum-x bound to `max_y` and the
        // maximum-x bound to `min_y`; a negative slope maps them the other
        // way round. Infinite x bounds keep the matching y bound open.
        let (min_y, max_y) = if slope > 0.0 {
            let max_y = if min_x == f64::NEG_INFINITY {
                f64::INFINITY
            } else {
                slope * min_x + intercept
            };
            let min_y = if max_x == f64::INFINITY {
                f64::NEG_INFINITY
            } else {
                slope * max_x + intercept
            };
            (min_y, max_y)
        } else {
            let min_y = if min_x == f64::NEG_INFINITY {
                f64::NEG_INFINITY
            } else {
                slope * min_x + intercept
            };
            let max_y = if max_x == f64::INFINITY {
                f64::INFINITY
            } else {
                slope * max_x + intercept
            };
            (min_y, max_y)
        };
        Ok(Self {
            form: Form::Sloped { slope, intercept },
            min_x,
            max_x,
            min_y,
            max_y,
        })
    }

    /// Finite segment between `a` and `b`.
    pub fn segment(a: Point2<f64>, b: Point2<f64>) -> Result<Self> {
        Self::new(a, b, (a.x, b.x), (a.y, b.y))
    }

    /// Ray starting at `start`, passing through `end` and extending beyond
    /// it to infinity. Equal coordinates pin the matching bound.
    pub fn ray_through(start: Point2<f64>, end: Point2<f64>) -> Result<Self> {
        let rx = if start.x < end.x {
            f64::INFINITY
        } else if start.x == end.x {
            start.x
        } else {
            f64::NEG_INFINITY
        };
        let ry = if start.y > end.y {
            f64::NEG_INFINITY
        } else if start.y == end.y {
            start.y
        } else {
            f64::INFINITY
        };
        Self::new(start, end, (start.x, rx), (start.y, ry))
    }

    /// Is the line vertical (`x = const`)?
    #[inline]
    pub fn is_vertical(&self) -> bool {
        matches!(self.form, Form::Vertical { .. })
    }

    /// Is the line horizontal (`y = const`)?
    #[inline]
    pub fn is_horizontal(&self) -> bool {
        matches!(self.form, Form::Horizontal { .. })
    }

    /// Evaluate y at `x` if `x` lies in the domain. Vertical lines report
    /// `0.0`; [`contains`](Self::contains) then falls back to the y range.
    pub fn y_at(&self, x: f64) -> Option<f64> {
        if x < self.min_x || x > self.max_x {
            return None;
        }
        Some(match self.form {
            Form::Vertical { .. } => 0.0,
            Form::Horizontal { y } => y,
            Form::Sloped { slope, intercept } => slope * x + intercept,
        })
    }

    /// Is `p` on the line, within its domain and range bounds?
    pub fn contains(&self, p: Point2<f64>) -> bool {
        match self.y_at(p.x) {
            Some(ty) => {
                if (ty - p.y).abs() < ON_LINE_EPS || ty == 0.0 {
                    if ty == 0.0 && (p.y < self.min_y || p.y > self.max_y) {
                        return false;
                    }
                    true
                } else {
                    false
                }
            }
            None => false,
        }
    }

    /// Intersection point of two lines, if one exists within the domain
    /// and range bounds of **both**.
    ///
    /// Parallel verticals, parallel horizontals and equal-slope lines
    /// report no intersection.
    pub fn intersect(&self, other: &Line2) -> Option<Point2<f64>> {
        use Form::*;
        let candidate = match (self.form, other.form) {
            (Vertical { .. }, Vertical { .. }) => return None,
            (Horizontal { .. }, Horizontal { .. }) => return None,
            (Vertical { x }, Horizontal { y }) => Point2::new(x, y),
            (Horizontal { y }, Vertical { x }) => Point2::new(x, y),
            (Vertical { x }, Sloped { slope, intercept }) => {
                Point2::new(x, slope * x + intercept)
            }
            (Sloped { slope, intercept }, Vertical { x }) => {
                Point2::new(x, slope * x + intercept)
            }
            (Horizontal { y }, Sloped { slope, intercept }) => {
                Point2::new((y - intercept) / slope, y)
            }
            (Sloped { slope, intercept }, Horizontal { y }) => {
                Point2::new((y - intercept) / slope, y)
            }
            (
                Sloped {
                    slope: k1,
                    intercept: b1,
                },
                Sloped {
                    slope: k2,
                    intercept: b2,
                },
            ) => {
                if k1 == k2 {
                    return None;
                }
                let x = (b2 - b1) / (k1 - k2);
                Point2::new(x, k1 * x + b1)
            }
        };
        if self.contains(candidate) && other.contains(candidate) {
            Some(candidate)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_coincident_points_are_degenerate() {
        let p = Point2::new(1.0, 1.0);
        assert!(matches!(
            Line2::segment(p, p),
            Err(Error::DegenerateLine(_, _))
        ));
    }

    #[test]
    fn test_form_detection() {
        let v = Line2::segment(Point2::new(2.0, 0.0), Point2::new(2.0, 5.0)).unwrap();
        assert!(v.is_vertical());
        let h = Line2::segment(Point2::new(0.0, 3.0), Point2::new(4.0, 3.0)).unwrap();
        assert!(h.is_horizontal());
        let s = Line2::segment(Point2::new(0.0, 0.0), Point2::new(2.0, 4.0)).unwrap();
        assert!(!s.is_vertical() && !s.is_horizontal());
        assert_relative_eq!(s.y_at(1.0).unwrap(), 2.0);
    }

    #[test]
    fn test_vertical_horizontal_intersection() {
        let v = Line2::segment(Point2::new(2.0, 0.0), Point2::new(2.0, 5.0)).unwrap();
        let h = Line2::segment(Point2::new(0.0, 3.0), Point2::new(4.0, 3.0)).unwrap();
        let p = v.intersect(&h).unwrap();
        assert_relative_eq!(p.x, 2.0);
        assert_relative_eq!(p.y, 3.0);
        // and symmetrically
        assert!(h.intersect(&v).is_some());
    }

    #[test]
    fn test_sloped_intersections() {
        let s1 = Line2::segment(Point2::new(0.0, 1.0), Point2::new(4.0, 5.0)).unwrap();
        let s2 = Line2::segment(Point2::new(0.0, 5.0), Point2::new(4.0, 1.0)).unwrap();
        let p = s1.intersect(&s2).unwrap();
        assert_relative_eq!(p.x, 2.0);
        assert_relative_eq!(p.y, 3.0);

        let v = Line2::segment(Point2::new(1.0, 0.0), Point2::new(1.0, 6.0)).unwrap();
        let p = s1.intersect(&v).unwrap();
        assert_relative_eq!(p.y, 2.0);
    }

    #[test]
    fn test_parallel_lines_do_not_intersect() {
        let s1 = Line2::segment(Point2::new(0.0, 1.0), Point2::new(4.0, 5.0)).unwrap();
        let s2 = Line2::segment(Point2::new(0.0, 2.0), Point2::new(4.0, 6.0)).unwrap();
        assert!(s1.intersect(&s2).is_none());

        let v1 = Line2::segment(Point2::new(0.0, 0.0), Point2::new(0.0, 1.0)).unwrap();
        let v2 = Line2::segment(Point2::new(1.0, 0.0), Point2::new(1.0, 1.0)).unwrap();
        assert!(v1.intersect(&v2).is_none());
    }

    #[test]
    fn test_segment_bounds_reject_off_segment_candidate() {
        // the carrier lines cross at (2, 3) but the second segment stops short
        let s1 = Line2::segment(Point2::new(0.0, 1.0), Point2::new(4.0, 5.0)).unwrap();
        let short = Line2::segment(Point2::new(0.0, 5.0), Point2::new(1.0, 4.0)).unwrap();
        assert!(s1.intersect(&short).is_none());
    }

    #[test]
    fn test_ray_extends_past_second_point() {
        // ray from (4,2) through (2,2) keeps going left
        let ray = Line2::ray_through(Point2::new(4.0, 2.0), Point2::new(2.0, 2.0)).unwrap();
        let far = Line2::segment(Point2::new(0.0, 0.0), Point2::new(0.0, 4.0)).unwrap();
        let p = ray.intersect(&far).unwrap();
        assert_relative_eq!(p.x, 0.0);
        assert_relative_eq!(p.y, 2.0);

        // but never backwards past its start
        let behind = Line2::segment(Point2::new(5.0, 0.0), Point2::new(5.0, 4.0)).unwrap();
        assert!(ray.intersect(&behind).is_none());
    }

    #[test]
    fn test_sloped_ray_hits_distant_segment() {
        let ray = Line2::ray_through(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)).unwrap();
        let seg = Line2::segment(Point2::new(5.0, 0.0), Point2::new(5.0, 10.0)).unwrap();
        let p = ray.intersect(&seg).unwrap();
        assert_relative_eq!(p.x, 5.0);
        assert_relative_eq!(p.y, 5.0);
    }

    #[test]
    fn test_vertical_ray_downward() {
        let ray = Line2::ray_through(Point2::new(1.0, 5.0), Point2::new(1.0, 3.0)).unwrap();
        let seg = Line2::segment(Point2::new(0.0, 0.0), Point2::new(2.0, 0.0)).unwrap();
        let p = ray.intersect(&seg).unwrap();
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 0.0);

        let above = Line2::segment(Point2::new(0.0, 6.0), Point2::new(2.0, 6.0)).unwrap();
        assert!(ray.intersect(&above).is_none());
    }
}
