// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Convex polygon ordering and triangulation

use nalgebra::{Point3, Vector3};

/// Arithmetic mean of the points; the origin for an empty slice
pub fn centroid(points: &[Point3<f64>]) -> Point3<f64> {
    if points.is_empty() {
        return Point3::origin();
    }
    let sum = points.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Point3::from(sum / points.len() as f64)
}

/// Orthonormal `(u, v)` spanning the plane with normal `normal`, oriented so
/// that `u x v = normal`.
pub fn plane_basis(normal: &Vector3<f64>) -> Option<(Vector3<f64>, Vector3<f64>)> {
    let n = normal.try_normalize(f64::EPSILON)?;
    // Least-aligned world axis keeps the cross product well conditioned.
    let helper = if n.x.abs() <= n.y.abs() && n.x.abs() <= n.z.abs() {
        Vector3::x()
    } else if n.y.abs() <= n.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };
    let u = helper.cross(&n).normalize();
    let v = n.cross(&u);
    Some((u, v))
}

/// Sort points counter-clockwise (seen from the tip of `normal`) around their
/// centroid, measuring angles inside the plane the normal defines.
///
/// Falls back to the XY projection when `normal` has no direction.
pub fn sort_by_angle(points: &mut [Point3<f64>], normal: &Vector3<f64>) {
    let center = centroid(points);
    let (u, v) = plane_basis(normal).unwrap_or((Vector3::x(), Vector3::y()));

    let angle = |p: &Point3<f64>| {
        let d = p - center;
        d.dot(&v).atan2(d.dot(&u))
    };
    points.sort_by(|a, b| angle(a).total_cmp(&angle(b)));
}

/// Newell normal of a closed polygon (not normalized).
///
/// Matches the right-hand normal of any non-degenerate corner triple of a
/// convex polygon, and stays defined when the first three points are collinear.
pub fn polygon_normal(points: &[Point3<f64>]) -> Vector3<f64> {
    let mut normal = Vector3::zeros();
    for (i, current) in points.iter().enumerate() {
        let next = &points[(i + 1) % points.len()];
        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }
    normal
}

/// Fan-triangulate an ordered convex polygon from its first point.
///
/// Emits `(0, i, i + 1)`; when the polygon winds against `normal` every
/// triangle is emitted as `(0, i + 1, i)` so the output faces along `normal`.
pub fn triangulate_convex_polygon(points: &[Point3<f64>], normal: &Vector3<f64>) -> Vec<u32> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    let flip = polygon_normal(points).dot(normal) < 0.0;
    let mut indices = Vec::with_capacity((n - 2) * 3);
    for i in 1..(n - 1) as u32 {
        if flip {
            indices.extend_from_slice(&[0, i + 1, i]);
        } else {
            indices.extend_from_slice(&[0, i, i + 1]);
        }
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> Vec<Point3<f64>> {
        // Counter-clockwise seen from +z
        vec![
            Point3::new(-1.0, -1.0, 0.0),
            Point3::new(1.0, -1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(-1.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_centroid() {
        assert_relative_eq!(centroid(&square()), Point3::origin());
        assert_eq!(centroid(&[]), Point3::origin());
    }

    #[test]
    fn test_triangulation_follows_normal() {
        let indices = triangulate_convex_polygon(&square(), &Vector3::z());
        assert_eq!(indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_triangulation_flips_for_opposite_normal() {
        let indices = triangulate_convex_polygon(&square(), &-Vector3::z());
        assert_eq!(indices, vec![0, 2, 1, 0, 3, 2]);
    }

    #[test]
    fn test_triangulation_needs_three_points() {
        assert!(triangulate_convex_polygon(&square()[..2], &Vector3::z()).is_empty());
    }

    #[test]
    fn test_collinear_lead_points_keep_orientation() {
        // First three points collinear along the bottom edge
        let points = vec![
            Point3::new(-1.0, -1.0, 0.0),
            Point3::new(0.0, -1.0, 0.0),
            Point3::new(1.0, -1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(-1.0, 1.0, 0.0),
        ];
        assert!(polygon_normal(&points).z > 0.0);
        assert_eq!(triangulate_convex_polygon(&points, &-Vector3::z())[..3], [0, 2, 1]);
    }

    #[test]
    fn test_sort_in_vertical_plane() {
        // A square in the XZ plane; an XY-only angle would see a line here.
        let mut points = vec![
            Point3::new(1.0, 2.0, 1.0),
            Point3::new(-1.0, 2.0, -1.0),
            Point3::new(-1.0, 2.0, 1.0),
            Point3::new(1.0, 2.0, -1.0),
        ];
        let normal = Vector3::new(0.0, 1.0, 0.0);
        sort_by_angle(&mut points, &normal);

        assert!(polygon_normal(&points).dot(&normal) > 0.0);
        // A simple quad has every consecutive pair sharing an x or z value.
        for i in 0..4 {
            let (a, b) = (points[i], points[(i + 1) % 4]);
            assert!(a.x == b.x || a.z == b.z, "diagonal step {a:?} -> {b:?}");
        }
    }

    #[test]
    fn test_plane_basis_is_right_handed() {
        for normal in [
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(1.0, 2.0, -3.0),
            Vector3::new(0.0, -1.0, 0.0),
        ] {
            let (u, v) = plane_basis(&normal).unwrap();
            assert_relative_eq!(u.cross(&v), normal.normalize(), epsilon = 1e-12);
            assert_relative_eq!(u.dot(&normal), 0.0, epsilon = 1e-12);
        }
        assert!(plane_basis(&Vector3::zeros()).is_none());
    }
}
