// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Boundary point harvesting between two convex meshes
//!
//! A boundary point is either a vertex of one mesh enclosed by the other, or a
//! point where an edge of one mesh leaves the other through one of its faces.

use super::canonical::{canonicalize_with_tolerance, CanonicalMesh};
use super::classification::is_inside_convex_mesh;
use super::mesh::{Mesh, Transform};
use super::mesh_utils::connected_vertices;
use super::point_set::PointSet;
use super::tolerance::Tolerances;
use super::triangle_intersection::segment_triangle_parameter;
use nalgebra::Point3;

/// Ids (into A's welded world-space position list) of A's vertices enclosed by B
pub fn vertices_within(mesh_a: &Mesh, transform_a: &Transform, mesh_b: &Mesh, transform_b: &Transform) -> Vec<u32> {
    let tolerances = Tolerances::default();
    let a = canonicalize_with_tolerance(mesh_a, Some(transform_a), tolerances.weld);
    let b = canonicalize_with_tolerance(mesh_b, Some(transform_b), tolerances.weld);

    (0..a.positions.len() as u32)
        .filter(|&id| is_inside_convex_mesh(&a.positions[id as usize], &b.positions, &b.indices))
        .collect()
}

/// Positions of `positions_a` enclosed by the solid `(positions_b, indices_b)`.
///
/// Both inputs must already be welded and in world space.
pub fn vertices_within_world(
    positions_a: &[Point3<f64>],
    positions_b: &[Point3<f64>],
    indices_b: &[u32],
) -> Vec<Point3<f64>> {
    positions_a
        .iter()
        .filter(|p| is_inside_convex_mesh(p, positions_b, indices_b))
        .copied()
        .collect()
}

/// Where the segment `[p0, p1]` crosses the surface `(positions, indices)`.
///
/// Hits are ordered along the segment and merged within `tolerance` (an edge
/// through a shared mesh edge reports both triangles). A convex surface is
/// crossed at most twice, so only the nearest and farthest hits are kept.
pub fn edge_crossings(
    p0: &Point3<f64>,
    p1: &Point3<f64>,
    positions: &[Point3<f64>],
    indices: &[u32],
    tolerance: f64,
) -> Vec<Point3<f64>> {
    let mut hits: Vec<(f64, Point3<f64>)> = indices
        .chunks_exact(3)
        .filter_map(|t| {
            segment_triangle_parameter(
                p0,
                p1,
                &positions[t[0] as usize],
                &positions[t[1] as usize],
                &positions[t[2] as usize],
            )
        })
        .collect();
    hits.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut unique = PointSet::with_tolerance(tolerance);
    unique.extend(hits.into_iter().map(|(_, p)| p));

    let mut crossings = unique.into_vec();
    if crossings.len() > 2 {
        let far = crossings[crossings.len() - 1];
        crossings.truncate(1);
        crossings.push(far);
    }
    crossings
}

/// Boundary points of A∩B: enclosed vertices of each mesh plus the crossings
/// of their incident edges with the other mesh's surface.
pub fn intersection_points(
    mesh_a: &Mesh,
    transform_a: &Transform,
    mesh_b: &Mesh,
    transform_b: &Transform,
) -> Vec<Point3<f64>> {
    intersection_points_with(mesh_a, transform_a, mesh_b, transform_b, &Tolerances::default())
}

pub fn intersection_points_with(
    mesh_a: &Mesh,
    transform_a: &Transform,
    mesh_b: &Mesh,
    transform_b: &Transform,
    tolerances: &Tolerances,
) -> Vec<Point3<f64>> {
    let a = canonicalize_with_tolerance(mesh_a, Some(transform_a), tolerances.weld);
    let b = canonicalize_with_tolerance(mesh_b, Some(transform_b), tolerances.weld);

    let mut points = PointSet::with_tolerance(tolerances.point);
    harvest(&a, &b, tolerances.point, &mut points);
    harvest(&b, &a, tolerances.point, &mut points);

    tracing::debug!(points = points.len(), "harvested boundary points");
    points.into_vec()
}

fn harvest(from: &CanonicalMesh, into: &CanonicalMesh, tolerance: f64, points: &mut PointSet) {
    for (id, vertex) in from.positions.iter().enumerate() {
        if !is_inside_convex_mesh(vertex, &into.positions, &into.indices) {
            continue;
        }
        points.insert(*vertex);

        let mut ring: Vec<u32> = connected_vertices(&from.indices, id as u32).into_iter().collect();
        ring.sort_unstable();

        for neighbor in ring {
            let end = &from.positions[neighbor as usize];
            points.extend(edge_crossings(vertex, end, &into.positions, &into.indices, tolerance));
        }
    }
}
