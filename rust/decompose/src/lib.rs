// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # decompose2d
//!
//! Convex decomposition and fan triangulation of simple polygons.
//!
//! The entry point is [`SimplePolygon`]: feed it an ordered boundary,
//! call [`execute`](SimplePolygon::execute), and read mesh-ready
//! triangle indices, vertices and UVs back out. Concave boundaries are
//! split into convex regions along visibility chords first; the points
//! synthesized on the boundary during splitting are reported alongside
//! the results. Associated max-area queries return the decomposition
//! whose largest convex region wins over both traversal orders of the
//! boundary, optionally restricted to rectangles.
//!
//! ```
//! use decompose2d::{Point2, SimplePolygon};
//!
//! let boundary = [
//!     Point2::new(0.0, 0.0),
//!     Point2::new(4.0, 0.0),
//!     Point2::new(4.0, 2.0),
//!     Point2::new(2.0, 2.0),
//!     Point2::new(2.0, 4.0),
//!     Point2::new(0.0, 4.0),
//! ];
//! let mut polygon = SimplePolygon::new(&boundary)?;
//! polygon.execute()?;
//! assert_eq!(polygon.triangles(false).len() % 3, 0);
//! assert_eq!(polygon.regions().len(), 2);
//! # Ok::<(), decompose2d::Error>(())
//! ```

pub mod error;
pub mod line;
pub mod orient;
pub mod polygon;
pub mod rect;
pub mod ring;
pub mod vertex;

pub use error::{Error, Result};
pub use line::Line2;
pub use orient::{Orientation, EPS};
pub use polygon::{Convexity, Region, SimplePolygon};
pub use rect::Rect2;
pub use ring::Ring;
pub use vertex::BoundaryVertex;

// Re-export the math types used throughout the public API.
pub use nalgebra::{Point2, Vector2};
