// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for drilling analysis
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the validating entry points
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid detection config: {0}")]
    InvalidConfig(String),

    #[error("Drilling depth must be positive and finite, got {0}")]
    InvalidDepth(f64),

    #[error("Drilling radius must be positive and finite, got {0}")]
    InvalidRadius(f64),
}
