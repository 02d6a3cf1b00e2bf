// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! World-space axis-aligned bounding volumes
//!
//! Layer volumes are approximated by boxes. The queries here are the cheap
//! tests the sampler runs for every layer at every slice, so everything is
//! `Copy` and allocation free.

use crate::error::{Error, Result};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box (closed on all faces)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: Point3<f64>,
    /// Maximum corner
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create bounds from corners, reordering each axis so `min <= max`
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Create bounds from explicit corners, rejecting inverted or non-finite input
    pub fn try_new(min: Point3<f64>, max: Point3<f64>) -> Result<Self> {
        if !min.iter().chain(max.iter()).all(|v| v.is_finite()) {
            return Err(Error::InvalidBounds(format!(
                "non-finite corner: min={:?} max={:?}",
                min, max
            )));
        }
        if min.x > max.x || min.y > max.y || min.z > max.z {
            return Err(Error::InvalidBounds(format!(
                "min {:?} exceeds max {:?}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    /// Create bounds from a center point and full extents
    pub fn from_center_size(center: Point3<f64>, size: Vector3<f64>) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Unit cube centered on `center`
    #[inline]
    pub fn unit_at(center: Point3<f64>) -> Self {
        Self::from_center_size(center, Vector3::new(1.0, 1.0, 1.0))
    }

    /// Center of the box
    #[inline]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Full extents of the box
    #[inline]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Grow the box to include a point
    #[inline]
    pub fn expand(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Check if the box contains a point (faces included)
    #[inline]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Closest point on or inside the box; interior points map to themselves
    #[inline]
    pub fn closest_point(&self, point: &Point3<f64>) -> Point3<f64> {
        Point3::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
            point.z.clamp(self.min.z, self.max.z),
        )
    }

    /// Euclidean distance from a point to the box (0 inside)
    #[inline]
    pub fn distance_to(&self, point: &Point3<f64>) -> f64 {
        (point - self.closest_point(point)).norm()
    }

    /// Ray/box slab test
    ///
    /// Returns the distance along `direction` (normalized internally) at which
    /// the ray enters the box, 0 when the origin is already inside, or `None`
    /// when the box is missed or lies behind the origin.
    pub fn intersect_ray(&self, origin: &Point3<f64>, direction: &Vector3<f64>) -> Option<f64> {
        let dir = direction.try_normalize(f64::EPSILON)?;

        let mut t_min = f64::NEG_INFINITY;
        let mut t_max = f64::INFINITY;

        for axis in 0..3 {
            let o = origin[axis];
            let d = dir[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() < f64::EPSILON {
                // Parallel to this slab: must already be between the planes
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let (t0, t1) = {
                let a = (lo - o) * inv;
                let b = (hi - o) * inv;
                if a <= b {
                    (a, b)
                } else {
                    (b, a)
                }
            };
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        if t_max < 0.0 {
            return None;
        }
        Some(t_min.max(0.0))
    }
}
