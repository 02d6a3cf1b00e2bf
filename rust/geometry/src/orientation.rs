// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Strike/dip orientation math
//!
//! World axes: +Y is up, +Z is north, +X is east. Dip angles are in degrees
//! measured from horizontal.

use nalgebra::{UnitQuaternion, Vector3};

const COMPASS_POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Surface normal of a planar stratum from its strike direction and dip
///
/// `normalize(up * cos(dip) + cross(up, strike) * sin(dip))`, rotated into
/// world space by `orientation`. A strike parallel to up contributes no dip
/// component; a fully degenerate result falls back to up.
pub fn strike_dip_normal(
    strike: &Vector3<f64>,
    dip_degrees: f64,
    orientation: &UnitQuaternion<f64>,
) -> Vector3<f64> {
    let up = Vector3::y();
    let strike = strike.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::zeros);
    let dip_axis = up.cross(&strike);

    let dip = dip_degrees.to_radians();
    let local = up * dip.cos() + dip_axis * dip.sin();

    (orientation * local)
        .try_normalize(f64::EPSILON)
        .unwrap_or_else(|| orientation * up)
}

/// Angle between two vectors in degrees, in [0, 180]
///
/// Zero-length input yields 0.
pub fn angle_between_degrees(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let denom = a.norm() * b.norm();
    if denom < 1e-15 {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

/// 8-point compass label for the horizontal bearing of a direction
///
/// Returns `None` for vertical or zero-length directions.
pub fn compass_label(direction: &Vector3<f64>) -> Option<&'static str> {
    if direction.x.hypot(direction.z) < 1e-9 {
        return None;
    }
    let azimuth = direction.x.atan2(direction.z).to_degrees().rem_euclid(360.0);
    let index = ((azimuth + 22.5) / 45.0).floor() as usize % COMPASS_POINTS.len();
    Some(COMPASS_POINTS[index])
}
