// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geological layer volumes.
//!
//! A [`Layer`] is owned by the host scene and handed to the engine as an
//! `Arc<Layer>`. The engine only reads it. Visual attributes (color, material)
//! are opaque descriptors passed through to results untouched.

use std::fmt;
use std::sync::Arc;

use nalgebra::{Point3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};
use strata_lite_geometry::{strike_dip_normal, Aabb};

use crate::error::Result;

/// Rock/soil classification of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LayerType {
    #[default]
    Sedimentary,
    Igneous,
    Metamorphic,
    Soil,
    Alluvium,
    Bedrock,
}

impl LayerType {
    /// Returns the type name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerType::Sedimentary => "Sedimentary",
            LayerType::Igneous => "Igneous",
            LayerType::Metamorphic => "Metamorphic",
            LayerType::Soil => "Soil",
            LayerType::Alluvium => "Alluvium",
            LayerType::Bedrock => "Bedrock",
        }
    }
}

impl fmt::Display for LayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Linear RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const GRAY: Color = Color::rgb(0.5, 0.5, 0.5);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::GRAY
    }
}

/// Precise surface of a layer volume (e.g. a collision mesh).
///
/// Implementations may fail on ill-formed geometry; callers treat any error
/// as "no precise answer" and fall back to the bounding volume.
pub trait LayerSurface: fmt::Debug + Send + Sync {
    /// Closest point on the solid to `point`. Points inside a solid convex
    /// surface map to themselves.
    fn closest_point(&self, point: &Point3<f64>) -> Result<Point3<f64>>;

    /// Whether closest-point queries are meaningful for normal estimation.
    fn is_convex(&self) -> bool {
        true
    }
}

/// Convex solid box surface.
#[derive(Debug, Clone, Copy)]
pub struct BoxSurface {
    pub bounds: Aabb,
}

impl BoxSurface {
    pub fn new(bounds: Aabb) -> Self {
        Self { bounds }
    }
}

impl LayerSurface for BoxSurface {
    fn closest_point(&self, point: &Point3<f64>) -> Result<Point3<f64>> {
        Ok(self.bounds.closest_point(point))
    }
}

/// A named, typed stratum volume with physical and orientation attributes.
#[derive(Debug, Clone)]
pub struct Layer {
    pub name: String,
    pub layer_type: LayerType,
    pub geological_age: String,
    pub formation: String,
    pub description: String,
    pub formation_environment: String,

    // Physical / visual
    pub color: Color,
    /// Opaque material reference, passed through without interpretation
    pub material: Option<String>,
    pub density: f64,
    pub hardness: f64,

    // Geometry
    pub average_thickness: f64,
    pub position: Point3<f64>,
    /// Local-to-world rotation applied to the strike/dip normal
    pub orientation: UnitQuaternion<f64>,
    pub strike_direction: Vector3<f64>,
    /// Degrees from horizontal
    pub dip_angle: f64,
    /// World-space visual bounds, if the host has them
    pub bounds: Option<Aabb>,
    pub surface: Option<Arc<dyn LayerSurface>>,

    /// Scene layer bits matched against the analyzer's layer mask
    pub mask_bits: u32,
}

impl Layer {
    /// Create a layer with default physical attributes and no geometry.
    pub fn new(name: impl Into<String>, layer_type: LayerType) -> Self {
        Self {
            name: name.into(),
            layer_type,
            geological_age: String::new(),
            formation: String::new(),
            description: String::new(),
            formation_environment: String::new(),
            color: Color::default(),
            material: None,
            density: 2.5,
            hardness: 5.0,
            average_thickness: 1.0,
            position: Point3::origin(),
            orientation: UnitQuaternion::identity(),
            strike_direction: Vector3::z(),
            dip_angle: 0.0,
            bounds: None,
            surface: None,
            mask_bits: 1,
        }
    }

    /// Set world bounds and use the box itself as the precise surface.
    pub fn with_box(mut self, bounds: Aabb) -> Self {
        self.position = bounds.center();
        self.bounds = Some(bounds);
        self.surface = Some(Arc::new(BoxSurface::new(bounds)));
        self
    }

    /// Like [`Self::with_box`], but takes explicit corners and rejects
    /// inverted or non-finite ones instead of reordering them.
    pub fn try_with_box(self, min: Point3<f64>, max: Point3<f64>) -> Result<Self> {
        Ok(self.with_box(Aabb::try_new(min, max)?))
    }

    pub fn with_bounds(mut self, bounds: Aabb) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_surface(mut self, surface: Arc<dyn LayerSurface>) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn with_position(mut self, position: Point3<f64>) -> Self {
        self.position = position;
        self
    }

    pub fn with_strike_dip(mut self, strike: Vector3<f64>, dip_angle: f64) -> Self {
        self.strike_direction = strike;
        self.dip_angle = dip_angle;
        self
    }

    pub fn with_formation(mut self, formation: impl Into<String>) -> Self {
        self.formation = formation.into();
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_mask_bits(mut self, mask_bits: u32) -> Self {
        self.mask_bits = mask_bits;
        self
    }

    pub fn has_precise_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// Normal of the layer plane from strike and dip, in world space.
    pub fn general_normal(&self) -> Vector3<f64> {
        strike_dip_normal(&self.strike_direction, self.dip_angle, &self.orientation)
    }

    /// Best-effort surface normal near `point`.
    ///
    /// Uses the direction from the closest surface point when a convex precise
    /// surface exists; otherwise (or when the query fails or the point is
    /// inside) the general normal.
    pub fn normal_at_point(&self, point: &Point3<f64>) -> Vector3<f64> {
        if let Some(surface) = self.surface.as_ref().filter(|s| s.is_convex()) {
            match surface.closest_point(point) {
                Ok(closest) => {
                    if let Some(normal) = (point - closest).try_normalize(f64::EPSILON) {
                        return normal;
                    }
                }
                Err(e) => {
                    tracing::debug!(
                        layer = %self.name,
                        error = %e,
                        "Closest-point query failed, using general normal"
                    );
                }
            }
        }
        self.general_normal()
    }

    /// Layer thickness at a point. Currently the configured average.
    pub fn thickness_at_point(&self, _point: &Point3<f64>) -> f64 {
        self.average_thickness
    }

    /// Point containment against the precise surface when available, else
    /// against `fallback_bounds`.
    pub fn contains_point(
        &self,
        point: &Point3<f64>,
        fallback_bounds: &Aabb,
        tolerance: f64,
    ) -> bool {
        if let Some(surface) = &self.surface {
            match surface.closest_point(point) {
                Ok(closest) => return (point - closest).norm() < tolerance,
                Err(e) => {
                    tracing::debug!(
                        layer = %self.name,
                        error = %e,
                        "Containment query failed, using bounds"
                    );
                }
            }
        }
        fallback_bounds.contains(point)
    }
}
