// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - mesh representation and convex intersection

mod analytics;
mod bbox;
mod boundary;
mod canonical;
mod classification;
mod faces;
mod mesh;
mod mesh_utils;
mod point_set;
mod polygon;
mod primitives;
mod sat;
mod tolerance;
mod triangle_intersection;

pub use analytics::{analyze_faces, FaceStats};
pub use bbox::BoundingBox;
pub use boundary::{
    edge_crossings, intersection_points, intersection_points_with, vertices_within, vertices_within_world,
};
pub use canonical::{canonicalize, canonicalize_with_tolerance, CanonicalMesh, WELD_TOLERANCE};
pub use classification::{face_normals, is_inside_convex_mesh, triangle_normal, CONTAINMENT_EPSILON};
pub use faces::{
    intersection_boundary, intersection_boundary_with, intersection_faces, intersection_faces_with,
    IntersectionFace,
};
pub use mesh::{Mesh, Transform, Vertex, VERTEX_STRIDE};
pub use mesh_utils::{connected_vertices, is_closed, is_manifold};
pub use point_set::{PointSet, POINT_TOLERANCE};
pub use polygon::{centroid, plane_basis, polygon_normal, sort_by_angle, triangulate_convex_polygon};
pub use primitives::{Primitive, DEFAULT_COLOR};
pub use sat::{edge_directions, intersects_sat, project_onto_axis, separating_axis, SatAxes, AXIS_EPSILON};
pub use tolerance::Tolerances;
pub use triangle_intersection::{
    point_in_triangle, segment_intersects_triangle, segment_triangle_parameter, DEFAULT_POINT_EPSILON,
};
