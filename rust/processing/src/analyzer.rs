// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Drilling path analysis: the entry point of the engine.
//!
//! A run snapshots the offered layers, walks the drill path downward in fixed
//! `sample_resolution` steps, builds one slice per step, merges runs of equal
//! composition and rolls up per-layer statistics. Nothing is interpolated
//! between steps, so a layer thinner than the resolution can be skipped.
//!
//! Runs are synchronous and share no state; cost grows with
//! `depth / sample_resolution * layer_count`.

use std::sync::Arc;
use std::time::Instant;

use nalgebra::{Point3, Vector3};
use strata_lite_core::{GeologicalSampleData, Layer, LayerRegistry, LayerSampleSegment};

use crate::config::DetectionConfig;
use crate::error::{Error, Result};
use crate::optimizer::optimize_segments;
use crate::segment::SegmentBuilder;
use crate::statistics::{calculate_layer_statistics, identified_formations};

/// Stateless stratigraphic profile analyzer.
#[derive(Debug, Clone, Default)]
pub struct DrillingAnalyzer {
    config: DetectionConfig,
}

impl DrillingAnalyzer {
    /// Create an analyzer, validating the configuration once.
    pub fn new(config: DetectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Analyze a vertical drill path starting at `start`.
    ///
    /// Never fails: a non-positive or non-finite `depth` or `radius` yields a
    /// sample with no segments. Non-finite values are recorded as `0.0`.
    pub fn analyze_drilling_sample(
        &self,
        layers: &[Arc<Layer>],
        start: Point3<f64>,
        depth: f64,
        radius: f64,
    ) -> GeologicalSampleData {
        match self.try_analyze_drilling_sample(layers, start, depth, radius) {
            Ok(sample) => sample,
            Err(e) => {
                tracing::warn!(error = %e, "Degenerate drilling request, returning empty sample");
                // Non-finite values do not survive JSON
                let finite_or_zero = |v: f64| if v.is_finite() { v } else { 0.0 };
                GeologicalSampleData::new(start, finite_or_zero(depth), finite_or_zero(radius))
            }
        }
    }

    /// Like [`Self::analyze_drilling_sample`], but rejects invalid depth or
    /// radius instead of degrading.
    pub fn try_analyze_drilling_sample(
        &self,
        layers: &[Arc<Layer>],
        start: Point3<f64>,
        depth: f64,
        radius: f64,
    ) -> Result<GeologicalSampleData> {
        check_request(depth, radius)?;

        let started = Instant::now();
        tracing::info!(
            x = start.x,
            y = start.y,
            z = start.z,
            depth,
            radius,
            layers = layers.len(),
            "Starting drilling sample analysis"
        );

        let registry = LayerRegistry::snapshot(layers, self.config.layer_mask);
        let raw = self.sample_path(&registry, start, depth, radius)?;
        let raw_count = raw.len();

        let mut sample = GeologicalSampleData::new(start, depth, radius);
        sample.segments = optimize_segments(raw, self.config.composition_tolerance);
        sample.layer_stats = calculate_layer_statistics(&sample.segments);
        sample.identified_formations = identified_formations(&sample.layer_stats);
        sample.total_layers = sample.layer_stats.len();

        tracing::info!(
            sample_id = %sample.sample_id,
            raw_slices = raw_count,
            segments = sample.segments.len(),
            layer_types = sample.total_layers,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Drilling sample analysis complete"
        );

        Ok(sample)
    }

    /// Raw non-empty slices along the path, in increasing depth order.
    ///
    /// Rejects the same depth and radius values as
    /// [`Self::try_analyze_drilling_sample`].
    pub fn sample_path(
        &self,
        registry: &LayerRegistry,
        start: Point3<f64>,
        depth: f64,
        radius: f64,
    ) -> Result<Vec<LayerSampleSegment>> {
        check_request(depth, radius)?;

        let builder = SegmentBuilder::new(registry, &self.config, radius);
        let resolution = self.config.sample_resolution;
        let down = -Vector3::y();

        let segments: Vec<_> = (0u64..)
            .map(|step| step as f64 * resolution)
            .take_while(|&relative_depth| relative_depth < depth)
            .map(|relative_depth| builder.build(start + down * relative_depth, relative_depth))
            .filter(|segment| !segment.is_empty())
            .collect();

        tracing::debug!(slices = segments.len(), "Sampled drill path");
        Ok(segments)
    }

    /// Layers whose bounds the drill path enters within `depth`, top first,
    /// paired with the entry depth.
    pub fn layers_in_drilling_range(
        &self,
        layers: &[Arc<Layer>],
        start: Point3<f64>,
        depth: f64,
    ) -> Vec<(Arc<Layer>, f64)> {
        let registry = LayerRegistry::snapshot(layers, self.config.layer_mask);
        registry
            .layers_along_path(&start, &-Vector3::y(), depth)
            .into_iter()
            .filter_map(|(key, entry_depth)| {
                registry
                    .get(key)
                    .map(|entry| (Arc::clone(&entry.layer), entry_depth))
            })
            .collect()
    }

    /// Layers containing `point`, using precise surfaces where available.
    pub fn layers_at_point(&self, layers: &[Arc<Layer>], point: Point3<f64>) -> Vec<Arc<Layer>> {
        let registry = LayerRegistry::snapshot(layers, self.config.layer_mask);
        registry
            .layers_containing(&point, self.config.contact_point_tolerance)
            .into_iter()
            .filter_map(|key| registry.get(key).map(|entry| Arc::clone(&entry.layer)))
            .collect()
    }
}

/// Depth and radius must both be positive and finite.
fn check_request(depth: f64, radius: f64) -> Result<()> {
    if !(depth > 0.0 && depth.is_finite()) {
        return Err(Error::InvalidDepth(depth));
    }
    if !(radius > 0.0 && radius.is_finite()) {
        return Err(Error::InvalidRadius(radius));
    }
    Ok(())
}
