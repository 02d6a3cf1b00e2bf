// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Strata-Lite Geometry
//!
//! Stateless geometry helpers for drill-core sampling: 2D footprint polygons,
//! world-space bounding volumes and strike/dip orientation math, built on
//! nalgebra.

pub mod bounds;
pub mod error;
pub mod orientation;
pub mod polygon;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, UnitQuaternion, Vector2, Vector3};

pub use bounds::Aabb;
pub use error::{Error, Result};
pub use orientation::{angle_between_degrees, compass_label, strike_dip_normal};
pub use polygon::{
    circle_to_polygon, intersect_polygons, point_in_polygon, polygon_area, signed_area,
    DEFAULT_CIRCLE_SEGMENTS,
};
