// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Segment-triangle intersection and point-in-triangle classification

use nalgebra::Point3;

/// Boundary slack for barycentric point-in-triangle tests
pub const DEFAULT_POINT_EPSILON: f64 = 1e-4;

/// Intersect the bounded segment `[p0, p1]` with triangle `(v0, v1, v2)`.
///
/// Returns the hit point. Segments parallel to the triangle plane never hit.
pub fn segment_intersects_triangle(
    p0: &Point3<f64>,
    p1: &Point3<f64>,
    v0: &Point3<f64>,
    v1: &Point3<f64>,
    v2: &Point3<f64>,
) -> Option<Point3<f64>> {
    segment_triangle_parameter(p0, p1, v0, v1, v2).map(|(_, point)| point)
}

/// Moller-Trumbore on a bounded segment.
///
/// Returns the segment parameter `t` in `[0, 1]` together with the hit point
/// `p0 + (p1 - p0) * t`, so callers can order several crossings along one edge.
pub fn segment_triangle_parameter(
    p0: &Point3<f64>,
    p1: &Point3<f64>,
    v0: &Point3<f64>,
    v1: &Point3<f64>,
    v2: &Point3<f64>,
) -> Option<(f64, Point3<f64>)> {
    let dir = p1 - p0;
    let e1 = v1 - v0;
    let e2 = v2 - v0;

    let h = dir.cross(&e2);
    let a = e1.dot(&h);
    if a.abs() < f64::EPSILON {
        return None; // Parallel to the triangle plane
    }

    let f = 1.0 / a;
    let s = p0 - v0;
    let u = f * s.dot(&h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(&e1);
    let v = f * dir.dot(&q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * e2.dot(&q);
    if !(0.0..=1.0).contains(&t) {
        return None; // Past an end of the segment
    }

    Some((t, p0 + dir * t))
}

/// Closed-triangle barycentric test.
///
/// The point is measured in the triangle's own plane; callers that need
/// coplanarity must check the plane distance themselves. Triangles whose edges
/// are (nearly) collinear are degenerate and contain nothing.
pub fn point_in_triangle(
    point: &Point3<f64>,
    v0: &Point3<f64>,
    v1: &Point3<f64>,
    v2: &Point3<f64>,
    epsilon: f64,
) -> bool {
    let v0v1 = v1 - v0;
    let v0v2 = v2 - v0;
    let v0p = point - v0;

    let d00 = v0v1.dot(&v0v1);
    let d01 = v0v1.dot(&v0v2);
    let d11 = v0v2.dot(&v0v2);
    let d20 = v0p.dot(&v0v1);
    let d21 = v0p.dot(&v0v2);

    // denom = |e1|^2 |e2|^2 sin^2(angle), so this compares sin(angle) to epsilon
    let denom = d00 * d11 - d01 * d01;
    if denom.abs() <= epsilon * epsilon * d00 * d11 {
        return false;
    }

    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    let u = 1.0 - v - w;

    let within = |c: f64| c >= -epsilon && c <= 1.0 + epsilon;
    within(u) && within(v) && within(w)
}
