// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-run snapshot of the layers participating in an analysis.
//!
//! The [`LayerRegistry`] is built once at the start of a run from whatever the
//! host passes in. Layers added to or removed from the scene afterwards are
//! not seen by that run. Each entry caches the layer's world bounding volume so
//! the per-slice loop never re-resolves it.

use std::sync::Arc;

use nalgebra::{Point3, Vector3};
use slotmap::SlotMap;
use strata_lite_geometry::Aabb;

use crate::keys::LayerKey;
use crate::layer::Layer;

/// A layer plus the bounding volume resolved for this run.
#[derive(Debug, Clone)]
pub struct RegisteredLayer {
    pub layer: Arc<Layer>,
    pub bounds: Aabb,
    /// `true` if `bounds` is the unit-box fallback
    pub fallback_bounds: bool,
}

impl RegisteredLayer {
    /// Validate the layer's bounds for this run. Missing or malformed bounds
    /// fall back to a unit box at the layer position.
    fn resolve(layer: Arc<Layer>) -> Self {
        match layer.bounds.map(|b| Aabb::try_new(b.min, b.max)) {
            Some(Ok(bounds)) => Self {
                layer,
                bounds,
                fallback_bounds: false,
            },
            Some(Err(e)) => {
                tracing::warn!(
                    layer = %layer.name,
                    error = %e,
                    "Layer bounds are invalid, using unit box at its position"
                );
                Self::unit_box(layer)
            }
            None => {
                tracing::warn!(
                    layer = %layer.name,
                    x = layer.position.x,
                    y = layer.position.y,
                    z = layer.position.z,
                    "Layer has no bounds, using unit box at its position"
                );
                Self::unit_box(layer)
            }
        }
    }

    fn unit_box(layer: Arc<Layer>) -> Self {
        let bounds = Aabb::unit_at(layer.position);
        Self {
            layer,
            bounds,
            fallback_bounds: true,
        }
    }

    /// Distance from `point` to this layer's bounding volume.
    #[inline]
    pub fn distance_to(&self, point: &Point3<f64>) -> f64 {
        self.bounds.distance_to(point)
    }
}

/// Snapshot of all layers taking part in one analysis run.
#[derive(Debug, Default)]
pub struct LayerRegistry {
    layers: SlotMap<LayerKey, RegisteredLayer>,
}

impl LayerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots every layer whose `mask_bits` intersect `mask`.
    pub fn snapshot(layers: &[Arc<Layer>], mask: u32) -> Self {
        let mut registry = Self::new();
        for layer in layers.iter().filter(|l| l.mask_bits & mask != 0) {
            registry.insert(Arc::clone(layer));
        }
        tracing::debug!(
            offered = layers.len(),
            registered = registry.len(),
            "Layer registry snapshot taken"
        );
        registry
    }

    /// Registers one layer and returns its key.
    pub fn insert(&mut self, layer: Arc<Layer>) -> LayerKey {
        self.layers.insert(RegisteredLayer::resolve(layer))
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn get(&self, key: LayerKey) -> Option<&RegisteredLayer> {
        self.layers.get(key)
    }

    /// Iterates layers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (LayerKey, &RegisteredLayer)> {
        self.layers.iter()
    }

    /// Layers whose bounding volume the drill ray enters within
    /// `max_distance`, ordered by entry distance.
    pub fn layers_along_path(
        &self,
        start: &Point3<f64>,
        direction: &Vector3<f64>,
        max_distance: f64,
    ) -> Vec<(LayerKey, f64)> {
        let mut hits: Vec<(LayerKey, f64)> = self
            .layers
            .iter()
            .filter_map(|(key, entry)| {
                entry
                    .bounds
                    .intersect_ray(start, direction)
                    .filter(|&t| t <= max_distance)
                    .map(|t| (key, t))
            })
            .collect();
        hits.sort_by(|a, b| a.1.total_cmp(&b.1));
        hits
    }

    /// Layers containing `point`, checked against precise surfaces where the
    /// layer has one.
    pub fn layers_containing(&self, point: &Point3<f64>, tolerance: f64) -> Vec<LayerKey> {
        self.layers
            .iter()
            .filter(|(_, entry)| entry.layer.contains_point(point, &entry.bounds, tolerance))
            .map(|(key, _)| key)
            .collect()
    }
}
