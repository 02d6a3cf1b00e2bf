// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Strata-Lite Core
//!
//! Layer model and sample data types for stratigraphic drill sampling.
//!
//! The host scene owns [`Layer`] values and shares them as `Arc<Layer>`. An
//! analysis run snapshots them into a [`LayerRegistry`], whose [`LayerKey`]s
//! are what the resulting [`GeologicalSampleData`] refers to.

pub mod error;
pub mod keys;
pub mod layer;
pub mod registry;
pub mod sample;
pub mod serialization;

pub use error::{Error, Result};
pub use keys::LayerKey;
pub use layer::{BoxSurface, Color, Layer, LayerSurface, LayerType};
pub use registry::{LayerRegistry, RegisteredLayer};
pub use sample::{
    ContactInterface, ContactType, GeologicalSampleData, LayerInfo, LayerSampleSegment,
    LayerStatistics, SliceLayers,
};
