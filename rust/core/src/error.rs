// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for layer and sample data operations.

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the layer model.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A precise surface could not answer a closest-point query.
    #[error("surface query failed: {0}")]
    SurfaceQuery(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Geometry helper error.
    #[error("geometry error: {0}")]
    Geometry(#[from] strata_lite_geometry::Error),
}
