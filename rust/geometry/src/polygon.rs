// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D polygon helpers for drill footprints
//!
//! Polygons are plain vertex loops (`&[Point2<f64>]`), implicitly closed, with
//! no repeated closing vertex. All functions are pure.

use nalgebra::Point2;
use std::f64::consts::PI;

/// Default number of vertices used to approximate the circular drill footprint
pub const DEFAULT_CIRCLE_SEGMENTS: usize = 16;

/// Check if a point is inside a polygon using the crossing-number test
///
/// The polygon is assumed to be simple. Points exactly on an edge may land on
/// either side.
pub fn point_in_polygon(point: &Point2<f64>, polygon: &[Point2<f64>]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let n = polygon.len();

    let mut j = n - 1;
    for i in 0..n {
        let pi = &polygon[i];
        let pj = &polygon[j];

        if ((pi.y > point.y) != (pj.y > point.y))
            && (point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x)
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Compute the signed area of a polygon (shoelace formula)
/// Positive = counter-clockwise, Negative = clockwise
pub fn signed_area(polygon: &[Point2<f64>]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    let n = polygon.len();

    for i in 0..n {
        let j = (i + 1) % n;
        area += polygon[i].x * polygon[j].y;
        area -= polygon[j].x * polygon[i].y;
    }

    area * 0.5
}

/// Unsigned polygon area. Fewer than 3 vertices yields 0.
#[inline]
pub fn polygon_area(polygon: &[Point2<f64>]) -> f64 {
    signed_area(polygon).abs()
}

/// Approximate a circle with a regular polygon of `segments` vertices
///
/// Vertices are emitted counter-clockwise starting at angle 0. The result is
/// used as the drill footprint, so it is usually built once per run.
pub fn circle_to_polygon(center: &Point2<f64>, radius: f64, segments: usize) -> Vec<Point2<f64>> {
    if segments == 0 {
        return Vec::new();
    }

    let angle_step = 2.0 * PI / segments as f64;
    (0..segments)
        .map(|i| {
            let angle = i as f64 * angle_step;
            Point2::new(
                center.x + angle.cos() * radius,
                center.y + angle.sin() * radius,
            )
        })
        .collect()
}

/// Approximate intersection of two polygons
///
/// Returns the vertices of `a` that fall inside `b`, followed by the vertices
/// of `b` that fall inside `a`. This is NOT a clipped polygon: no edge/edge
/// crossing points are synthesized and the result carries no winding order.
/// Callers should treat it as a point set that hints at the overlap. An empty
/// result is a valid answer (e.g. two coincident outlines).
pub fn intersect_polygons(a: &[Point2<f64>], b: &[Point2<f64>]) -> Vec<Point2<f64>> {
    a.iter()
        .filter(|p| point_in_polygon(p, b))
        .chain(b.iter().filter(|p| point_in_polygon(p, a)))
        .copied()
        .collect()
}
