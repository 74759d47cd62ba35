// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Reconstruction of the polygonal faces bounding A∩B
//!
//! Every triangle of the source mesh is clipped to the other convex solid by
//! collecting the points that bound its surviving fragment: crossings of its
//! edges with the other surface, crossings of the other mesh's edges with the
//! triangle, and enclosed vertices of either mesh that lie on the triangle.
//! For convex inputs these points are the corners of a convex polygon, which
//! is ordered around its centroid and fan-triangulated.

use super::boundary::vertices_within_world;
use super::canonical::{canonicalize_with_tolerance, CanonicalMesh};
use super::classification::triangle_normal;
use super::mesh::{Mesh, Transform};
use super::point_set::PointSet;
use super::polygon::{polygon_normal, sort_by_angle, triangulate_convex_polygon};
use super::sat::{separating_axis, SatAxes};
use super::tolerance::Tolerances;
use super::triangle_intersection::{point_in_triangle, segment_intersects_triangle};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// One polygon fragment of a source triangle lying inside the other mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersectionFace {
    /// Unit normal of the source triangle
    pub normal: Vector3<f64>,
    /// Boundary, counter-clockwise around `normal`
    pub points: Vec<Point3<f64>>,
    /// Triangle triples into `points`
    pub indices: Vec<u32>,
}

impl IntersectionFace {
    pub fn triangles(&self) -> impl Iterator<Item = [Point3<f64>; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| {
            [
                self.points[t[0] as usize],
                self.points[t[1] as usize],
                self.points[t[2] as usize],
            ]
        })
    }

    pub fn area(&self) -> f64 {
        self.triangles()
            .map(|[a, b, c]| (b - a).cross(&(c - a)).norm() * 0.5)
            .sum()
    }
}

/// Faces of A∩B contributed by A's triangles.
///
/// Returns nothing when the face-normal SAT separates the meshes.
pub fn intersection_faces(
    mesh_a: &Mesh,
    transform_a: &Transform,
    mesh_b: &Mesh,
    transform_b: &Transform,
) -> Vec<IntersectionFace> {
    intersection_faces_with(
        mesh_a,
        transform_a,
        mesh_b,
        transform_b,
        &Tolerances::default(),
        SatAxes::FaceNormals,
    )
}

pub fn intersection_faces_with(
    mesh_a: &Mesh,
    transform_a: &Transform,
    mesh_b: &Mesh,
    transform_b: &Transform,
    tolerances: &Tolerances,
    sat_axes: SatAxes,
) -> Vec<IntersectionFace> {
    if separating_axis(mesh_a, transform_a, mesh_b, transform_b, sat_axes, tolerances.axis).is_some() {
        return Vec::new();
    }

    let a = canonicalize_with_tolerance(mesh_a, Some(transform_a), tolerances.weld);
    let b = canonicalize_with_tolerance(mesh_b, Some(transform_b), tolerances.weld);
    reconstruct(&a, &b, tolerances)
}

/// Faces of A∩B from both meshes: A's fragments inside B followed by B's
/// fragments inside A.
pub fn intersection_boundary(
    mesh_a: &Mesh,
    transform_a: &Transform,
    mesh_b: &Mesh,
    transform_b: &Transform,
) -> Vec<IntersectionFace> {
    intersection_boundary_with(
        mesh_a,
        transform_a,
        mesh_b,
        transform_b,
        &Tolerances::default(),
        SatAxes::FaceNormals,
    )
}

pub fn intersection_boundary_with(
    mesh_a: &Mesh,
    transform_a: &Transform,
    mesh_b: &Mesh,
    transform_b: &Transform,
    tolerances: &Tolerances,
    sat_axes: SatAxes,
) -> Vec<IntersectionFace> {
    if separating_axis(mesh_a, transform_a, mesh_b, transform_b, sat_axes, tolerances.axis).is_some() {
        return Vec::new();
    }

    let a = canonicalize_with_tolerance(mesh_a, Some(transform_a), tolerances.weld);
    let b = canonicalize_with_tolerance(mesh_b, Some(transform_b), tolerances.weld);
    let mut faces = reconstruct(&a, &b, tolerances);
    faces.extend(reconstruct(&b, &a, tolerances));
    faces
}

/// Clip every triangle of `source` against the solid `other`
fn reconstruct(source: &CanonicalMesh, other: &CanonicalMesh, tolerances: &Tolerances) -> Vec<IntersectionFace> {
    let source_inside = vertices_within_world(&source.positions, &other.positions, &other.indices);
    let other_inside = vertices_within_world(&other.positions, &source.positions, &source.indices);
    let other_edges = unique_edges(&other.indices);

    let mut faces = Vec::new();
    for (index, [v0, v1, v2]) in source.triangles().enumerate() {
        let Some(normal) = triangle_normal(&v0, &v1, &v2) else {
            continue;
        };

        let mut points = PointSet::with_tolerance(tolerances.point);
        for (p, q) in [(v0, v1), (v0, v2), (v1, v2)] {
            for [w0, w1, w2] in other.triangles() {
                if let Some(hit) = segment_intersects_triangle(&p, &q, &w0, &w1, &w2) {
                    points.insert(hit);
                }
            }
        }
        for &(i, j) in &other_edges {
            let (p, q) = (&other.positions[i as usize], &other.positions[j as usize]);
            if let Some(hit) = segment_intersects_triangle(p, q, &v0, &v1, &v2) {
                points.insert(hit);
            }
        }

        let eps = tolerances.point_epsilon;
        let on_triangle = |p: &Point3<f64>| {
            normal.dot(&(p - v0)).abs() <= eps && point_in_triangle(p, &v0, &v1, &v2, eps)
        };
        points.extend(source_inside.iter().chain(&other_inside).filter(|p| on_triangle(p)).copied());

        if points.len() < 3 {
            continue;
        }

        let mut points = points.into_vec();
        sort_by_angle(&mut points, &normal);
        if polygon_normal(&points).norm() * 0.5 < tolerances.point * tolerances.point {
            tracing::trace!(triangle = index, "dropping zero-area fragment");
            continue;
        }

        let indices = triangulate_convex_polygon(&points, &normal);
        faces.push(IntersectionFace {
            normal,
            points,
            indices,
        });
    }

    tracing::debug!(
        triangles = source.triangle_count(),
        faces = faces.len(),
        "reconstructed intersection faces"
    );
    faces
}

/// Undirected edges of an index buffer, smaller id first, sorted
fn unique_edges(indices: &[u32]) -> Vec<(u32, u32)> {
    let mut edges: Vec<(u32, u32)> = indices
        .chunks_exact(3)
        .flat_map(|t| [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])])
        .map(|(a, b)| (a.min(b), a.max(b)))
        .collect();
    edges.sort_unstable();
    edges.dedup();
    edges
}
