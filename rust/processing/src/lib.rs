// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Strata-Lite Processing
//!
//! Stratigraphic profile extraction along a virtual drill path: per-slice
//! layer detection, contact classification, run-length segment merging and
//! per-layer statistics.
//!
//! ```
//! use std::sync::Arc;
//! use strata_lite_core::{Layer, LayerType};
//! use strata_lite_geometry::{Aabb, Point3};
//! use strata_lite_processing::DrillingAnalyzer;
//!
//! let layers = vec![Arc::new(Layer::new("Topsoil", LayerType::Soil).with_box(Aabb::new(
//!     Point3::new(-5.0, 0.0, -5.0),
//!     Point3::new(5.0, 10.0, 5.0),
//! )))];
//!
//! let analyzer = DrillingAnalyzer::default();
//! let sample = analyzer.analyze_drilling_sample(&layers, Point3::new(0.0, 10.0, 0.0), 2.0, 0.5);
//! assert_eq!(sample.segments.len(), 1);
//! ```

pub mod analyzer;
pub mod config;
pub mod contact;
pub mod error;
pub mod optimizer;
pub mod segment;
pub mod statistics;

pub use analyzer::DrillingAnalyzer;
pub use config::DetectionConfig;
pub use contact::{analyze_contact, analyze_layer_contacts, classify_contact};
pub use error::{Error, Result};
pub use optimizer::{optimize_segments, same_composition};
pub use segment::SegmentBuilder;
pub use statistics::{calculate_layer_statistics, identified_formations};
