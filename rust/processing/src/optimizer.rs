// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Run-length merging of consecutive slices.
//!
//! Adjacent slices with the same layer composition collapse into one segment.
//! The merged segment keeps the first slice's depth, center and layer entries;
//! later slices only add height. Callers needing per-slice fidelity should
//! lower the sample resolution instead.

use strata_lite_core::LayerSampleSegment;

/// Whether two segments hold the same layers with area shares within
/// `tolerance` of each other.
pub fn same_composition(a: &LayerSampleSegment, b: &LayerSampleSegment, tolerance: f64) -> bool {
    a.layers.len() == b.layers.len()
        && a.layers.iter().all(|la| {
            b.layers
                .iter()
                .any(|lb| lb.layer == la.layer && (la.area_share - lb.area_share).abs() < tolerance)
        })
}

/// Merge consecutive segments with the same composition.
///
/// Order is preserved. Re-running on an already optimized list returns it
/// unchanged.
pub fn optimize_segments(
    segments: Vec<LayerSampleSegment>,
    tolerance: f64,
) -> Vec<LayerSampleSegment> {
    let mut optimized: Vec<LayerSampleSegment> = Vec::with_capacity(segments.len());

    for segment in segments {
        match optimized.last_mut() {
            Some(current) if same_composition(current, &segment, tolerance) => {
                current.segment_height += segment.segment_height;
            }
            _ => optimized.push(segment),
        }
    }

    optimized
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point2, Point3, Vector3};
    use std::sync::Arc;
    use strata_lite_core::{Color, Layer, LayerInfo, LayerKey, LayerRegistry, LayerType};

    fn info(key: LayerKey, share: f64) -> LayerInfo {
        LayerInfo {
            layer: key,
            name: String::new(),
            layer_type: LayerType::Sedimentary,
            formation: String::new(),
            area_share: share,
            boundary_shape: vec![Point2::origin()],
            normal: Vector3::y(),
            thickness: 1.0,
            color: Color::default(),
            material: None,
            strike_direction: Vector3::z(),
            dip_angle: 0.0,
            center_point: Point3::origin(),
        }
    }

    fn segment(depth: f64, layers: &[(LayerKey, f64)]) -> LayerSampleSegment {
        let mut s = LayerSampleSegment::new(depth, Point3::new(0.0, -depth, 0.0), 0.2);
        s.layers.extend(layers.iter().map(|&(k, share)| info(k, share)));
        s
    }

    fn keys() -> (LayerKey, LayerKey) {
        let mut registry = LayerRegistry::new();
        (
            registry.insert(Arc::new(Layer::new("A", LayerType::Soil))),
            registry.insert(Arc::new(Layer::new("B", LayerType::Bedrock))),
        )
    }

    #[test]
    fn merges_runs_keeping_first_metadata() {
        let (a, b) = keys();
        let raw = vec![
            segment(0.0, &[(a, 1.0)]),
            segment(0.2, &[(a, 0.95)]),
            segment(0.4, &[(a, 1.0)]),
            segment(0.6, &[(b, 1.0)]),
            segment(0.8, &[(b, 1.0)]),
        ];

        let optimized = optimize_segments(raw, 0.1);
        assert_eq!(optimized.len(), 2);
        assert_eq!(optimized[0].depth, 0.0);
        assert!((optimized[0].segment_height - 0.6).abs() < 1e-12);
        assert_eq!(optimized[0].layers[0].area_share, 1.0);
        assert_eq!(optimized[1].depth, 0.6);
        assert!((optimized[1].segment_height - 0.4).abs() < 1e-12);
    }

    #[test]
    fn composition_rules() {
        let (a, b) = keys();
        let tol = 0.1;

        assert!(same_composition(
            &segment(0.0, &[(a, 1.0), (b, 0.5)]),
            &segment(0.2, &[(b, 0.55), (a, 1.0)]),
            tol
        ));
        assert!(!same_composition(&segment(0.0, &[(a, 1.0)]), &segment(0.2, &[(a, 0.85)]), tol));
        assert!(!same_composition(
            &segment(0.0, &[(a, 1.0)]),
            &segment(0.2, &[(a, 1.0), (b, 1.0)]),
            tol
        ));
        assert!(!same_composition(&segment(0.0, &[(a, 1.0)]), &segment(0.2, &[(b, 1.0)]), tol));
    }

    #[test]
    fn optimizer_is_idempotent() {
        let (a, b) = keys();
        let raw = vec![
            segment(0.0, &[(a, 1.0)]),
            segment(0.2, &[(a, 1.0)]),
            segment(0.4, &[(a, 1.0), (b, 1.0)]),
            segment(0.6, &[(b, 1.0)]),
            segment(0.8, &[(b, 0.5)]),
        ];

        let once = optimize_segments(raw, 0.1);
        let twice = optimize_segments(once.clone(), 0.1);
        assert_eq!(once.len(), 4);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_input() {
        assert!(optimize_segments(Vec::new(), 0.1).is_empty());
    }
}
