// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stratigraphic sample data model.
//!
//! Everything here is plain data: the analyzer fills it in and hands the
//! [`GeologicalSampleData`] aggregate to whoever renders or stores it.

use std::fmt;

use chrono::{DateTime, Utc};
use nalgebra::{Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use uuid::Uuid;

use crate::keys::LayerKey;
use crate::layer::{Color, LayerType};

/// Geometric relationship between two layers in contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactType {
    Conformable,
    Unconformable,
    Disconformable,
    // Not produced by the angle classifier
    Intrusive,
    Fault,
    Gradational,
}

impl ContactType {
    /// Returns the type name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactType::Conformable => "Conformable",
            ContactType::Unconformable => "Unconformable",
            ContactType::Disconformable => "Disconformable",
            ContactType::Intrusive => "Intrusive",
            ContactType::Fault => "Fault",
            ContactType::Gradational => "Gradational",
        }
    }
}

impl fmt::Display for ContactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contribution of one layer to one slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerInfo {
    pub layer: LayerKey,
    pub name: String,
    pub layer_type: LayerType,
    pub formation: String,
    /// Fraction of the circular footprint attributed to this layer, in [0, 1]
    pub area_share: f64,
    /// Simplified outline: the footprint circle scaled by `area_share`
    pub boundary_shape: Vec<Point2<f64>>,
    /// Surface normal at the slice center
    pub normal: Vector3<f64>,
    pub thickness: f64,
    pub color: Color,
    pub material: Option<String>,
    pub strike_direction: Vector3<f64>,
    pub dip_angle: f64,
    pub center_point: Point3<f64>,
}

/// Pairwise contact between two layers sharing a slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInterface {
    pub layer_a: LayerKey,
    pub layer_b: LayerKey,
    /// Approximate contact point set; may be empty
    pub contact_line: Vec<Point2<f64>>,
    /// Angle between the two layer normals, degrees in [0, 180]
    pub contact_angle: f64,
    pub contact_type: ContactType,
    pub contact_normal: Vector3<f64>,
}

/// Layers in a slice. Most slices hold one or two.
pub type SliceLayers = SmallVec<[LayerInfo; 4]>;

/// One raw slice, or a merged run of slices with the same composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSampleSegment {
    /// Depth below the drilling start, measured along the drill path
    pub depth: f64,
    pub sample_center: Point3<f64>,
    pub segment_height: f64,
    pub layers: SliceLayers,
    pub interfaces: Vec<ContactInterface>,
}

impl LayerSampleSegment {
    /// Create an empty segment
    pub fn new(depth: f64, sample_center: Point3<f64>, segment_height: f64) -> Self {
        Self {
            depth,
            sample_center,
            segment_height,
            layers: SmallVec::new(),
            interfaces: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Entry for `key`, if that layer is present in this segment
    pub fn layer(&self, key: LayerKey) -> Option<&LayerInfo> {
        self.layers.iter().find(|info| info.layer == key)
    }
}

/// Per-layer rollup over the optimized segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerStatistics {
    pub layer: LayerKey,
    pub layer_name: String,
    pub layer_type: LayerType,
    pub formation: String,
    /// Sum of segment height times area share
    pub total_thickness: f64,
    /// Share of the summed thickness of all layers, in percent
    pub percentage_of_sample: f64,
    pub number_of_segments: usize,
    /// Unweighted mean over appearances
    pub average_dip_angle: f64,
    /// 8-point compass bearing of the strike; `None` when undefined
    pub dominant_strike: Option<String>,
}

/// Result of one drilling analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeologicalSampleData {
    pub sample_id: Uuid,
    pub drilling_position: Point3<f64>,
    pub drilling_depth: f64,
    pub drilling_radius: f64,
    pub collection_time: DateTime<Utc>,
    /// Optimized segments in increasing depth order
    pub segments: Vec<LayerSampleSegment>,
    /// Ordered by first appearance
    pub layer_stats: Vec<LayerStatistics>,
    pub identified_formations: Vec<String>,
    pub total_layers: usize,
}

impl GeologicalSampleData {
    /// Create an empty sample with a fresh id and the current time
    pub fn new(drilling_position: Point3<f64>, drilling_depth: f64, drilling_radius: f64) -> Self {
        Self {
            sample_id: Uuid::new_v4(),
            drilling_position,
            drilling_depth,
            drilling_radius,
            collection_time: Utc::now(),
            segments: Vec::new(),
            layer_stats: Vec::new(),
            identified_formations: Vec::new(),
            total_layers: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Statistics entry for a layer, by name
    pub fn stats_for(&self, layer_name: &str) -> Option<&LayerStatistics> {
        self.layer_stats.iter().find(|s| s.layer_name == layer_name)
    }
}
