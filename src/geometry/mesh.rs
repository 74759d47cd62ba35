// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Indexed triangle mesh in the interleaved 9-float vertex layout

use crate::error::MeshError;
use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Floats per vertex: position(3) + normal(3) + color(3)
pub const VERTEX_STRIDE: usize = 9;

/// Affine local-to-world matrix supplied per kernel call
pub type Transform = Matrix4<f64>;

/// Vertex record with position, normal and color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
    pub color: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>, color: Vector3<f32>) -> Self {
        Self {
            position,
            normal,
            color,
        }
    }

    fn write_to(&self, buffer: &mut Vec<f32>) {
        buffer.extend_from_slice(&[
            self.position.x,
            self.position.y,
            self.position.z,
            self.normal.x,
            self.normal.y,
            self.normal.z,
            self.color.x,
            self.color.y,
            self.color.z,
        ]);
    }
}

/// Indexed triangle surface.
///
/// The vertex buffer is the inbound wire layout: nine `f32` per vertex, of
/// which only the first three (the position) take part in geometry. Normal and
/// color are carried through untouched for the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    vertices: Vec<f32>,
    indices: Vec<u32>,
}

impl Mesh {
    /// Build a mesh from raw buffers, validating stride and index range
    pub fn new(vertices: Vec<f32>, indices: Vec<u32>) -> Result<Self, MeshError> {
        if vertices.len() % VERTEX_STRIDE != 0 {
            return Err(MeshError::VertexStride {
                len: vertices.len(),
                stride: VERTEX_STRIDE,
            });
        }
        if indices.len() % 3 != 0 {
            return Err(MeshError::IndexCount(indices.len()));
        }

        let vertex_count = vertices.len() / VERTEX_STRIDE;
        if let Some((position, &index)) = indices
            .iter()
            .enumerate()
            .find(|(_, &index)| index as usize >= vertex_count)
        {
            return Err(MeshError::IndexOutOfBounds {
                index,
                position,
                vertex_count,
            });
        }

        Ok(Self { vertices, indices })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a mesh from vertex records
    pub fn from_vertices(vertices: &[Vertex], indices: Vec<u32>) -> Result<Self, MeshError> {
        let mut buffer = Vec::with_capacity(vertices.len() * VERTEX_STRIDE);
        for vertex in vertices {
            vertex.write_to(&mut buffer);
        }
        Self::new(buffer, indices)
    }

    /// Raw interleaved vertex buffer
    pub fn vertex_buffer(&self) -> &[f32] {
        &self.vertices
    }

    /// Triangle index buffer
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / VERTEX_STRIDE
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Local-space position of vertex `index`, promoted to f64
    pub fn position(&self, index: u32) -> Point3<f64> {
        let base = index as usize * VERTEX_STRIDE;
        Point3::new(
            self.vertices[base] as f64,
            self.vertices[base + 1] as f64,
            self.vertices[base + 2] as f64,
        )
    }

    /// Full vertex record of vertex `index`
    pub fn vertex(&self, index: u32) -> Vertex {
        let v = &self.vertices[index as usize * VERTEX_STRIDE..][..VERTEX_STRIDE];
        Vertex::new(
            Point3::new(v[0], v[1], v[2]),
            Vector3::new(v[3], v[4], v[5]),
            Vector3::new(v[6], v[7], v[8]),
        )
    }

    /// Position of vertex `index` mapped through `transform`
    pub fn world_position(&self, index: u32, transform: &Transform) -> Point3<f64> {
        transform.transform_point(&self.position(index))
    }

    /// All vertex positions in world space, in buffer order
    pub fn world_positions(&self, transform: &Transform) -> impl Iterator<Item = Point3<f64>> + '_ {
        let transform = *transform;
        (0..self.vertex_count() as u32).map(move |i| self.world_position(i, &transform))
    }

    /// Triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// World-space corners of every triangle
    pub fn world_triangles<'a>(
        &'a self,
        transform: &'a Transform,
    ) -> impl Iterator<Item = [Point3<f64>; 3]> + 'a {
        self.triangles().map(move |[a, b, c]| {
            [
                self.world_position(a, transform),
                self.world_position(b, transform),
                self.world_position(c, transform),
            ]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_buffer() -> Vec<f32> {
        let mut buffer = Vec::new();
        for p in [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]] {
            buffer.extend_from_slice(&p);
            buffer.extend_from_slice(&[0.0, 0.0, 1.0, 1.0, 0.5, 0.25]);
        }
        buffer
    }

    #[test]
    fn test_rejects_bad_stride() {
        let err = Mesh::new(vec![0.0; 10], vec![]).unwrap_err();
        assert_eq!(err, MeshError::VertexStride { len: 10, stride: 9 });
    }

    #[test]
    fn test_rejects_partial_triangle() {
        let err = Mesh::new(triangle_buffer(), vec![0, 1]).unwrap_err();
        assert_eq!(err, MeshError::IndexCount(2));
    }

    #[test]
    fn test_rejects_out_of_bounds_index() {
        let err = Mesh::new(triangle_buffer(), vec![0, 1, 3]).unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfBounds {
                index: 3,
                position: 2,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn test_reads_positions_and_payload() {
        let mesh = Mesh::new(triangle_buffer(), vec![0, 1, 2]).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.position(1), Point3::new(1.0, 0.0, 0.0));

        let vertex = mesh.vertex(2);
        assert_eq!(vertex.normal, Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(vertex.color, Vector3::new(1.0, 0.5, 0.25));
    }

    #[test]
    fn test_world_position_applies_transform() {
        let mesh = Mesh::new(triangle_buffer(), vec![0, 1, 2]).unwrap();
        let transform = Transform::new_translation(&Vector3::new(2.0, 0.0, -1.0));
        assert_eq!(
            mesh.world_position(1, &transform),
            Point3::new(3.0, 0.0, -1.0)
        );
    }
}
