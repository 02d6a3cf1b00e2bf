// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON serialization for sample results.
//!
//! The sample aggregate is the only artifact that leaves the engine, so it is
//! the only type with convenience helpers here. Layer keys are written as
//! slotmap key data and are only meaningful within one sample.

use crate::error::{Error, Result};
use crate::sample::GeologicalSampleData;

impl GeologicalSampleData {
    /// Serializes the sample to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Serializes the sample to an indented JSON string.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Deserializes a sample from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))
    }
}
