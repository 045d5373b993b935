// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for polygon decomposition

use nalgebra::Point2;
use thiserror::Error;

/// Result type for decomposition operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decomposing a polygon
#[derive(Error, Debug)]
pub enum Error {
    #[error("coincident points ({0:?}, {1:?}) do not define a line")]
    DegenerateLine(Point2<f64>, Point2<f64>),

    #[error("invalid polygon: {0}")]
    InvalidPolygon(String),

    #[error("index {index} out of bounds for ring of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}
