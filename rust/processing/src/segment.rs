// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-slice layer detection.
//!
//! A slice is the drill cylinder's horizontal cross-section at one depth. Each
//! registered layer is tested against the circular footprint and, if it covers
//! enough of it, recorded with its area share, normal and visual attributes.

use nalgebra::{Point2, Point3, Vector3};
use strata_lite_core::{LayerInfo, LayerKey, LayerRegistry, LayerSampleSegment, RegisteredLayer};
use strata_lite_geometry::circle_to_polygon;

use crate::config::DetectionConfig;
use crate::contact::analyze_layer_contacts;

/// Builds slices for one run. The footprint polygon depends only on the
/// radius and segment count, so it is computed once here.
#[derive(Debug)]
pub struct SegmentBuilder<'a> {
    registry: &'a LayerRegistry,
    config: &'a DetectionConfig,
    radius: f64,
    footprint: Vec<Point2<f64>>,
}

impl<'a> SegmentBuilder<'a> {
    pub fn new(registry: &'a LayerRegistry, config: &'a DetectionConfig, radius: f64) -> Self {
        Self {
            registry,
            config,
            radius,
            footprint: circle_to_polygon(&Point2::origin(), radius, config.circle_segments),
        }
    }

    /// Footprint polygon in slice-local XZ coordinates.
    pub fn footprint(&self) -> &[Point2<f64>] {
        &self.footprint
    }

    /// Analyze the slice centered at `center`. `depth` is only recorded.
    ///
    /// A slice with no layers is a valid result; callers filter those out.
    pub fn build(&self, center: Point3<f64>, depth: f64) -> LayerSampleSegment {
        let mut segment = LayerSampleSegment::new(depth, center, self.config.sample_resolution);

        for (key, entry) in self.registry.iter() {
            if let Some(info) = self.layer_info(key, entry, &center) {
                if info.area_share > self.config.discard_threshold {
                    segment.layers.push(info);
                }
            }
        }

        if segment.layers.len() > 1 {
            segment.interfaces = analyze_layer_contacts(&segment.layers, self.config);
        }

        segment
    }

    /// Fraction of the footprint covered by a layer, or `None` when the
    /// slice center is farther than the radius from the layer's bounds.
    ///
    /// With a precise surface the footprint vertices are tested against the
    /// bounding volume; without one, passing the distance check counts as full
    /// coverage.
    pub fn area_share(&self, entry: &RegisteredLayer, center: &Point3<f64>) -> Option<f64> {
        if entry.distance_to(center) > self.radius {
            return None;
        }

        if !entry.layer.has_precise_surface() || self.footprint.is_empty() {
            return Some(1.0);
        }

        let hits = self
            .footprint
            .iter()
            .filter(|p| entry.bounds.contains(&(center + Vector3::new(p.x, 0.0, p.y))))
            .count();
        Some(hits as f64 / self.footprint.len() as f64)
    }

    fn layer_info(
        &self,
        key: LayerKey,
        entry: &RegisteredLayer,
        center: &Point3<f64>,
    ) -> Option<LayerInfo> {
        let area_share = self.area_share(entry, center)?;
        if area_share < self.config.acceptance_threshold {
            return None;
        }

        let layer = &entry.layer;
        Some(LayerInfo {
            layer: key,
            name: layer.name.clone(),
            layer_type: layer.layer_type,
            formation: layer.formation.clone(),
            area_share,
            // Presentation outline only: the footprint scaled by the share
            boundary_shape: self
                .footprint
                .iter()
                .map(|p| Point2::from(p.coords * area_share))
                .collect(),
            normal: layer.normal_at_point(center),
            thickness: layer.thickness_at_point(center),
            color: layer.color,
            material: layer.material.clone(),
            strike_direction: layer.strike_direction,
            dip_angle: layer.dip_angle,
            center_point: *center,
        })
    }
}
