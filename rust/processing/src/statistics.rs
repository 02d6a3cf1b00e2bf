// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-layer rollups over optimized segments.

use rustc_hash::{FxHashMap, FxHashSet};
use strata_lite_core::{LayerKey, LayerSampleSegment, LayerStatistics};
use strata_lite_geometry::compass_label;

/// Reduce segments to one statistics entry per distinct layer.
///
/// Entries come out in order of first appearance, not sorted.
/// `total_thickness` is the sum of `segment_height * area_share`;
/// `average_dip_angle` is an unweighted mean over appearances.
pub fn calculate_layer_statistics(segments: &[LayerSampleSegment]) -> Vec<LayerStatistics> {
    let mut index: FxHashMap<LayerKey, usize> = FxHashMap::default();
    let mut stats: Vec<LayerStatistics> = Vec::new();

    for segment in segments {
        for info in &segment.layers {
            let slot = *index.entry(info.layer).or_insert_with(|| {
                stats.push(LayerStatistics {
                    layer: info.layer,
                    layer_name: info.name.clone(),
                    layer_type: info.layer_type,
                    formation: info.formation.clone(),
                    total_thickness: 0.0,
                    percentage_of_sample: 0.0,
                    number_of_segments: 0,
                    average_dip_angle: 0.0,
                    dominant_strike: compass_label(&info.strike_direction).map(str::to_string),
                });
                stats.len() - 1
            });

            let stat = &mut stats[slot];
            stat.total_thickness += segment.segment_height * info.area_share;
            stat.number_of_segments += 1;
            // Running sum; divided below
            stat.average_dip_angle += info.dip_angle;
        }
    }

    let grand_total: f64 = stats.iter().map(|s| s.total_thickness).sum();
    for stat in &mut stats {
        stat.average_dip_angle /= stat.number_of_segments as f64;
        if grand_total > 0.0 {
            stat.percentage_of_sample = stat.total_thickness / grand_total * 100.0;
        }
    }

    stats
}

/// Distinct non-empty formation names, in order of first appearance.
pub fn identified_formations(stats: &[LayerStatistics]) -> Vec<String> {
    let mut seen = FxHashSet::default();
    stats
        .iter()
        .filter(|s| !s.formation.is_empty() && seen.insert(s.formation.as_str()))
        .map(|s| s.formation.clone())
        .collect()
}
