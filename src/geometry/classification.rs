// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Face planes and half-space containment for convex solids

use super::mesh::{Mesh, Transform};
use nalgebra::{Point3, Vector3};

/// Distance a point may sit outside a face plane and still count as inside.
/// Absorbs rounding when a mesh's own vertices are classified.
pub const CONTAINMENT_EPSILON: f64 = 1e-6;

/// Unit normal of the triangle `(v0, v1, v2)` by the right-hand rule, or
/// `None` when the triangle has no area.
pub fn triangle_normal(v0: &Point3<f64>, v1: &Point3<f64>, v2: &Point3<f64>) -> Option<Vector3<f64>> {
    (v1 - v0).cross(&(v2 - v0)).try_normalize(f64::EPSILON)
}

/// World-space face normal of every triangle, in index-buffer order.
///
/// Zero-area triangles yield a zero vector so the output stays parallel to
/// the triangle list; consumers skip near-zero axes.
pub fn face_normals(mesh: &Mesh, transform: &Transform) -> Vec<Vector3<f64>> {
    mesh.world_triangles(transform)
        .map(|[v0, v1, v2]| triangle_normal(&v0, &v1, &v2).unwrap_or_else(Vector3::zeros))
        .collect()
}

/// Half-space test against a convex solid given as welded world positions.
///
/// The point is inside when it lies on the non-positive side of every face
/// plane. Convexity is not checked.
pub fn is_inside_convex_mesh(point: &Point3<f64>, positions: &[Point3<f64>], indices: &[u32]) -> bool {
    indices.chunks_exact(3).all(|t| {
        let v0 = &positions[t[0] as usize];
        let v1 = &positions[t[1] as usize];
        let v2 = &positions[t[2] as usize];
        match triangle_normal(v0, v1, v2) {
            Some(normal) => normal.dot(&(point - v0)) <= CONTAINMENT_EPSILON,
            None => true,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{canonicalize, Primitive};
    use approx::assert_relative_eq;

    #[test]
    fn test_face_normals_follow_triangle_order() {
        let mesh = Primitive::unit_box().to_mesh();
        let normals = face_normals(&mesh, &Transform::identity());

        assert_eq!(normals.len(), 12);
        // Front face first, then back.
        assert_relative_eq!(normals[0], Vector3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(normals[1], Vector3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(normals[2], Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_face_normals_rotate_with_transform() {
        let mesh = Primitive::unit_box().to_mesh();
        let rotation = Transform::from_euler_angles(0.0, 0.0, std::f64::consts::FRAC_PI_2);
        let normals = face_normals(&mesh, &rotation);

        // Front stays +z, the right face (+x) turns to +y.
        assert_relative_eq!(normals[0], Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
        assert_relative_eq!(normals[6], Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_inside_and_outside_points() {
        let canonical = canonicalize(&Primitive::unit_box().to_mesh(), None);
        let inside = |p| is_inside_convex_mesh(&p, &canonical.positions, &canonical.indices);

        assert!(inside(Point3::origin()));
        assert!(inside(Point3::new(0.49, -0.49, 0.2)));
        assert!(!inside(Point3::new(0.51, 0.0, 0.0)));
        assert!(!inside(Point3::new(0.0, 0.0, -2.0)));
    }

    #[test]
    fn test_own_vertices_are_inside() {
        for primitive in [
            Primitive::unit_box(),
            Primitive::sphere(1.3, 24, 12),
            Primitive::cylinder(0.7, 2.0, 20),
        ] {
            let canonical = canonicalize(&primitive.to_mesh(), None);
            for vertex in &canonical.positions {
                assert!(
                    is_inside_convex_mesh(vertex, &canonical.positions, &canonical.indices),
                    "{primitive:?} vertex {vertex:?} classified outside its own mesh"
                );
            }
        }
    }

    #[test]
    fn test_degenerate_triangle_has_no_normal() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert!(triangle_normal(&p, &p, &Point3::new(2.0, 2.0, 3.0)).is_none());
    }
}
