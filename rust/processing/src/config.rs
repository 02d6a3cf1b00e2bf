// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Analyzer configuration.
//!
//! Fixed when a [`crate::DrillingAnalyzer`] is constructed. Loadable from
//! environment variables or any serde format; missing fields take defaults.

use serde::{Deserialize, Serialize};
use strata_lite_geometry::DEFAULT_CIRCLE_SEGMENTS;

use crate::error::{Error, Result};

/// Detection and classification parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Depth step between slices. Layers thinner than this can be missed.
    pub sample_resolution: f64,
    /// Vertices of the circular footprint polygon.
    pub circle_segments: usize,
    /// Per-layer minimum area share for a layer to enter a slice.
    pub acceptance_threshold: f64,
    /// Slice-level floor below which a layer entry is discarded outright.
    /// Kept separate from `acceptance_threshold`.
    pub discard_threshold: f64,
    /// Maximum area-share difference for two slices to merge.
    pub composition_tolerance: f64,
    /// Contacts below this angle (degrees) are conformable.
    pub conformable_max_angle: f64,
    /// Contacts above this angle (degrees) are unconformable.
    pub unconformable_min_angle: f64,
    /// A layer participates iff `layer.mask_bits & layer_mask != 0`.
    pub layer_mask: u32,
    /// Closest-point distance that counts as "inside" for point containment.
    pub contact_point_tolerance: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            sample_resolution: 0.2,
            circle_segments: DEFAULT_CIRCLE_SEGMENTS,
            acceptance_threshold: 0.1,
            discard_threshold: 0.001,
            composition_tolerance: 0.1,
            conformable_max_angle: 10.0,
            unconformable_min_angle: 45.0,
            layer_mask: u32::MAX,
            contact_point_tolerance: 0.01,
        }
    }
}

impl DetectionConfig {
    /// Load configuration from `STRATA_*` environment variables.
    ///
    /// Unset or unparsable variables keep their default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            sample_resolution: env_or("STRATA_SAMPLE_RESOLUTION", defaults.sample_resolution),
            circle_segments: env_or("STRATA_CIRCLE_SEGMENTS", defaults.circle_segments),
            acceptance_threshold: env_or(
                "STRATA_ACCEPTANCE_THRESHOLD",
                defaults.acceptance_threshold,
            ),
            discard_threshold: env_or("STRATA_DISCARD_THRESHOLD", defaults.discard_threshold),
            composition_tolerance: env_or(
                "STRATA_COMPOSITION_TOLERANCE",
                defaults.composition_tolerance,
            ),
            conformable_max_angle: env_or(
                "STRATA_CONFORMABLE_MAX_ANGLE",
                defaults.conformable_max_angle,
            ),
            unconformable_min_angle: env_or(
                "STRATA_UNCONFORMABLE_MIN_ANGLE",
                defaults.unconformable_min_angle,
            ),
            layer_mask: env_or("STRATA_LAYER_MASK", defaults.layer_mask),
            contact_point_tolerance: env_or(
                "STRATA_CONTACT_POINT_TOLERANCE",
                defaults.contact_point_tolerance,
            ),
        }
    }

    pub fn with_sample_resolution(mut self, sample_resolution: f64) -> Self {
        self.sample_resolution = sample_resolution;
        self
    }

    pub fn with_circle_segments(mut self, circle_segments: usize) -> Self {
        self.circle_segments = circle_segments;
        self
    }

    pub fn with_layer_mask(mut self, layer_mask: u32) -> Self {
        self.layer_mask = layer_mask;
        self
    }

    /// Check that the parameters describe a terminating, meaningful run.
    pub fn validate(&self) -> Result<()> {
        if !(self.sample_resolution > 0.0 && self.sample_resolution.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "sample_resolution must be positive and finite, got {}",
                self.sample_resolution
            )));
        }
        if self.circle_segments < 3 {
            return Err(Error::InvalidConfig(format!(
                "circle_segments must be at least 3, got {}",
                self.circle_segments
            )));
        }
        for (name, value) in [
            ("acceptance_threshold", self.acceptance_threshold),
            ("discard_threshold", self.discard_threshold),
            ("composition_tolerance", self.composition_tolerance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        if !(0.0..=180.0).contains(&self.conformable_max_angle)
            || !(0.0..=180.0).contains(&self.unconformable_min_angle)
            || self.conformable_max_angle > self.unconformable_min_angle
        {
            return Err(Error::InvalidConfig(format!(
                "contact angles must satisfy 0 <= conformable ({}) <= unconformable ({}) <= 180",
                self.conformable_max_angle, self.unconformable_min_angle
            )));
        }
        if !(self.contact_point_tolerance >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "contact_point_tolerance must be non-negative, got {}",
                self.contact_point_tolerance
            )));
        }
        Ok(())
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
