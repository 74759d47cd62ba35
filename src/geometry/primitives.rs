// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Convex primitive generators
//!
//! All primitives are centered on the origin and wound counter-clockwise when
//! viewed from outside.

use super::mesh::{Mesh, Vertex};
use crate::error::{MeshError, SceneError};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Color used when a caller does not care about the render payload
pub const DEFAULT_COLOR: [f32; 3] = [0.8, 0.8, 0.8];

/// Convex primitives
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Primitive {
    Box {
        width: f64,
        height: f64,
        length: f64,
    },
    Sphere {
        radius: f64,
        sectors: u32,
        stacks: u32,
    },
    Cylinder {
        radius: f64,
        height: f64,
        sectors: u32,
    },
}

impl Primitive {
    pub fn cuboid(width: f64, height: f64, length: f64) -> Self {
        Self::Box {
            width,
            height,
            length,
        }
    }

    pub fn unit_box() -> Self {
        Self::cuboid(1.0, 1.0, 1.0)
    }

    pub fn sphere(radius: f64, sectors: u32, stacks: u32) -> Self {
        Self::Sphere {
            radius,
            sectors,
            stacks,
        }
    }

    pub fn cylinder(radius: f64, height: f64, sectors: u32) -> Self {
        Self::Cylinder {
            radius,
            height,
            sectors,
        }
    }

    /// Check that dimensions and tessellation produce a closed convex solid
    pub fn validate(&self) -> Result<(), SceneError> {
        match *self {
            Self::Box {
                width,
                height,
                length,
            } => {
                positive("width", width)?;
                positive("height", height)?;
                positive("length", length)
            }
            Self::Sphere {
                radius,
                sectors,
                stacks,
            } => {
                positive("radius", radius)?;
                at_least("sectors", 3, sectors)?;
                at_least("stacks", 2, stacks)
            }
            Self::Cylinder {
                radius,
                height,
                sectors,
            } => {
                positive("radius", radius)?;
                positive("height", height)?;
                at_least("sectors", 3, sectors)
            }
        }
    }

    pub fn to_mesh(&self) -> Mesh {
        self.to_mesh_with_color(DEFAULT_COLOR)
    }

    pub fn to_mesh_with_color(&self, color: [f32; 3]) -> Mesh {
        let color = Vector3::from(color);
        let (vertices, indices) = match *self {
            Self::Box {
                width,
                height,
                length,
            } => generate_box(width, height, length, color),
            Self::Sphere {
                radius,
                sectors,
                stacks,
            } => generate_sphere(radius, sectors, stacks, color),
            Self::Cylinder {
                radius,
                height,
                sectors,
            } => generate_cylinder(radius, height, sectors, color),
        };

        // Generators only emit indices into their own vertex list.
        Mesh::from_vertices(&vertices, indices).unwrap_or_else(|err: MeshError| {
            tracing::error!(%err, "primitive generator produced an invalid mesh");
            Mesh::empty()
        })
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), SceneError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SceneError::InvalidDimension { name, value })
    }
}

fn at_least(name: &'static str, min: u32, value: u32) -> Result<(), SceneError> {
    if value >= min {
        Ok(())
    } else {
        Err(SceneError::TooFewSegments { name, min, value })
    }
}

fn vertex(position: [f64; 3], normal: [f64; 3], color: Vector3<f32>) -> Vertex {
    Vertex::new(
        Point3::new(position[0] as f32, position[1] as f32, position[2] as f32),
        Vector3::new(normal[0] as f32, normal[1] as f32, normal[2] as f32),
        color,
    )
}

fn generate_box(width: f64, height: f64, length: f64, color: Vector3<f32>) -> (Vec<Vertex>, Vec<u32>) {
    let (w, h, l) = (width / 2.0, height / 2.0, length / 2.0);

    // Each face carries its own four corners so per-face normals survive.
    let faces = [
        // Front (z+)
        ([0.0, 0.0, 1.0], [[-w, -h, l], [w, -h, l], [w, h, l], [-w, h, l]]),
        // Back (z-)
        ([0.0, 0.0, -1.0], [[-w, -h, -l], [-w, h, -l], [w, h, -l], [w, -h, -l]]),
        // Left (x-)
        ([-1.0, 0.0, 0.0], [[-w, -h, -l], [-w, -h, l], [-w, h, l], [-w, h, -l]]),
        // Right (x+)
        ([1.0, 0.0, 0.0], [[w, -h, -l], [w, h, -l], [w, h, l], [w, -h, l]]),
        // Top (y+)
        ([0.0, 1.0, 0.0], [[-w, h, -l], [-w, h, l], [w, h, l], [w, h, -l]]),
        // Bottom (y-)
        ([0.0, -1.0, 0.0], [[-w, -h, -l], [w, -h, -l], [w, -h, l], [-w, -h, l]]),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, corners) in faces {
        let base = vertices.len() as u32;
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        vertices.extend(corners.iter().map(|&c| vertex(c, normal, color)));
    }

    (vertices, indices)
}

fn generate_sphere(radius: f64, sectors: u32, stacks: u32, color: Vector3<f32>) -> (Vec<Vertex>, Vec<u32>) {
    let mut vertices = Vec::with_capacity(((stacks + 1) * (sectors + 1)) as usize);
    let mut indices = Vec::new();

    for i in 0..=stacks {
        // From +pi/2 (north pole) down to -pi/2
        let stack_angle = PI / 2.0 - i as f64 * PI / stacks as f64;
        let xy = radius * stack_angle.cos();
        let z = radius * stack_angle.sin();

        for j in 0..=sectors {
            let sector_angle = j as f64 * 2.0 * PI / sectors as f64;
            let position = [xy * sector_angle.cos(), xy * sector_angle.sin(), z];
            let n = Vector3::from(position).normalize();
            vertices.push(vertex(position, [n.x, n.y, n.z], color));
        }
    }

    for i in 0..stacks {
        let mut k1 = i * (sectors + 1);
        let mut k2 = k1 + sectors + 1;

        for _ in 0..sectors {
            // The pole rows would produce zero-area triangles.
            if i != 0 {
                indices.extend_from_slice(&[k1, k2, k1 + 1]);
            }
            if i != stacks - 1 {
                indices.extend_from_slice(&[k1 + 1, k2, k2 + 1]);
            }
            k1 += 1;
            k2 += 1;
        }
    }

    (vertices, indices)
}

fn generate_cylinder(radius: f64, height: f64, sectors: u32, color: Vector3<f32>) -> (Vec<Vertex>, Vec<u32>) {
    let half = height / 2.0;
    let step = 2.0 * PI / sectors as f64;
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    // Side surface: bottom/top pairs, seam duplicated at the last sector
    for i in 0..=sectors {
        let (y, x) = (i as f64 * step).sin_cos();
        let normal = [x, y, 0.0];
        vertices.push(vertex([radius * x, radius * y, -half], normal, color));
        vertices.push(vertex([radius * x, radius * y, half], normal, color));
    }
    for i in 0..sectors {
        let k1 = i * 2;
        let k2 = k1 + 2;
        indices.extend_from_slice(&[k1, k2, k1 + 1, k1 + 1, k2, k2 + 1]);
    }

    let bottom_center = vertices.len() as u32;
    let top_center = bottom_center + 1;
    vertices.push(vertex([0.0, 0.0, -half], [0.0, 0.0, -1.0], color));
    vertices.push(vertex([0.0, 0.0, half], [0.0, 0.0, 1.0], color));

    for i in 0..sectors {
        let (y0, x0) = (i as f64 * step).sin_cos();
        let (y1, x1) = ((i + 1) as f64 * step).sin_cos();

        let b = vertices.len() as u32;
        vertices.push(vertex([radius * x1, radius * y1, -half], [0.0, 0.0, -1.0], color));
        vertices.push(vertex([radius * x0, radius * y0, -half], [0.0, 0.0, -1.0], color));
        indices.extend_from_slice(&[bottom_center, b, b + 1]);

        let t = vertices.len() as u32;
        vertices.push(vertex([radius * x0, radius * y0, half], [0.0, 0.0, 1.0], color));
        vertices.push(vertex([radius * x1, radius * y1, half], [0.0, 0.0, 1.0], color));
        indices.extend_from_slice(&[top_center, t, t + 1]);
    }

    (vertices, indices)
}
