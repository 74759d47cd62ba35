// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Separating-axis broad phase for convex meshes
//!
//! The default axis set is the face normals of both meshes. That proves
//! face-aligned separation but misses edge-edge separation, so a `true` result
//! means "possibly intersecting". [`SatAxes::FaceAndEdgeNormals`] adds the
//! cross products of every edge direction pair, which is the complete axis set
//! for two convex polyhedra.

use super::classification::face_normals;
use super::mesh::{Mesh, Transform};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Axes shorter than this are skipped rather than tested
pub const AXIS_EPSILON: f64 = 1e-6;

/// Candidate axis families
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SatAxes {
    /// Face normals of both meshes only
    FaceNormals,
    /// Face normals plus edge-direction cross products
    #[default]
    FaceAndEdgeNormals,
}

/// Face-normal SAT: `false` proves the meshes disjoint, `true` means they may
/// overlap.
pub fn intersects_sat(mesh_a: &Mesh, transform_a: &Transform, mesh_b: &Mesh, transform_b: &Transform) -> bool {
    separating_axis(mesh_a, transform_a, mesh_b, transform_b, SatAxes::FaceNormals, AXIS_EPSILON).is_none()
}

/// First axis along which the projected extents of the two meshes are
/// disjoint, if any.
pub fn separating_axis(
    mesh_a: &Mesh,
    transform_a: &Transform,
    mesh_b: &Mesh,
    transform_b: &Transform,
    axes: SatAxes,
    axis_epsilon: f64,
) -> Option<Vector3<f64>> {
    let points_a: Vec<_> = mesh_a.world_positions(transform_a).collect();
    let points_b: Vec<_> = mesh_b.world_positions(transform_b).collect();

    let separates = |axis: &Vector3<f64>| {
        let (min_a, max_a) = project_onto_axis(&points_a, axis);
        let (min_b, max_b) = project_onto_axis(&points_b, axis);
        max_a < min_b || max_b < min_a
    };

    let mut candidates = face_normals(mesh_a, transform_a);
    candidates.extend(face_normals(mesh_b, transform_b));

    if let Some(axis) = candidates
        .iter()
        .filter(|axis| axis.norm() >= axis_epsilon)
        .find(|axis| separates(axis))
    {
        tracing::debug!(?axis, "separating face axis found");
        return Some(*axis);
    }

    if axes == SatAxes::FaceAndEdgeNormals {
        let edges_a = edge_directions(mesh_a, transform_a);
        let edges_b = edge_directions(mesh_b, transform_b);

        for ea in &edges_a {
            for eb in &edges_b {
                let Some(axis) = ea.cross(eb).try_normalize(axis_epsilon) else {
                    continue; // Parallel edges
                };
                if separates(&axis) {
                    tracing::debug!(?axis, "separating edge axis found");
                    return Some(axis);
                }
            }
        }
    }

    None
}

/// `[min, max]` of the points' projections onto `axis`
pub fn project_onto_axis(points: &[Point3<f64>], axis: &Vector3<f64>) -> (f64, f64) {
    points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), p| {
        let projection = p.coords.dot(axis);
        (min.min(projection), max.max(projection))
    })
}

/// Unit edge directions of the mesh in world space, one per parallel class
pub fn edge_directions(mesh: &Mesh, transform: &Transform) -> Vec<Vector3<f64>> {
    let mut directions: Vec<Vector3<f64>> = Vec::new();

    for [v0, v1, v2] in mesh.world_triangles(transform) {
        for (a, b) in [(v0, v1), (v1, v2), (v2, v0)] {
            let Some(dir) = (b - a).try_normalize(AXIS_EPSILON) else {
                continue;
            };
            if !directions.iter().any(|d| d.cross(&dir).norm() < AXIS_EPSILON) {
                directions.push(dir);
            }
        }
    }

    directions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Primitive;

    fn translation(x: f64, y: f64, z: f64) -> Transform {
        Transform::new_translation(&Vector3::new(x, y, z))
    }

    #[test]
    fn test_overlapping_boxes_intersect() {
        let cube = Primitive::unit_box().to_mesh();
        assert!(intersects_sat(&cube, &Transform::identity(), &cube, &translation(0.5, 0.0, 0.0)));
    }

    #[test]
    fn test_distant_boxes_are_separated() {
        let cube = Primitive::unit_box().to_mesh();
        let axis = separating_axis(
            &cube,
            &Transform::identity(),
            &cube,
            &translation(2.0, 0.0, 0.0),
            SatAxes::FaceNormals,
            AXIS_EPSILON,
        )
        .expect("boxes two units apart are separated");

        assert!(axis.x.abs() > 0.99);
    }

    #[test]
    fn test_touching_boxes_count_as_intersecting() {
        let cube = Primitive::unit_box().to_mesh();
        assert!(intersects_sat(&cube, &Transform::identity(), &cube, &translation(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_empty_mesh_is_separated() {
        let cube = Primitive::unit_box().to_mesh();
        let empty = Mesh::empty();
        // An empty projection interval is [inf, -inf], which compares as disjoint.
        assert!(!intersects_sat(&cube, &Transform::identity(), &empty, &Transform::identity()));
    }

    #[test]
    fn test_projection_extent() {
        let points = [Point3::new(1.0, 2.0, 3.0), Point3::new(-1.0, 0.0, 5.0)];
        assert_eq!(project_onto_axis(&points, &Vector3::z()), (3.0, 5.0));
        assert_eq!(project_onto_axis(&points, &Vector3::x()), (-1.0, 1.0));
    }

    #[test]
    fn test_box_edge_directions() {
        let cube = Primitive::unit_box().to_mesh();
        // Three axis directions plus one diagonal per pair of opposite faces.
        assert_eq!(edge_directions(&cube, &Transform::identity()).len(), 6);
    }
}
