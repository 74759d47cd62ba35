// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Two-shape scene descriptions
//!
//! ```toml
//! [a]
//! shape = { kind = "box", width = 1.0, height = 1.0, length = 1.0 }
//!
//! [b]
//! shape = { kind = "sphere", radius = 0.6, sectors = 24, stacks = 12 }
//! transform = { translate = [0.5, 0.0, 0.0], rotate = [0.0, 0.0, 45.0] }
//! ```

use crate::error::SceneError;
use crate::geometry::{Mesh, Primitive, Transform, DEFAULT_COLOR};
use crate::kernel::MeshPair;
use anyhow::{Context, Result};
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Local-to-world placement: scale, then rotate, then translate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placement {
    pub translate: [f64; 3],
    /// Euler angles in degrees, applied x then y then z
    pub rotate: [f64; 3],
    pub scale: [f64; 3],
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            translate: [0.0; 3],
            rotate: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

impl Placement {
    pub fn to_matrix(&self) -> Transform {
        let [rx, ry, rz] = self.rotate.map(f64::to_radians);
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), rz)
            * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), ry)
            * UnitQuaternion::from_axis_angle(&Vector3::x_axis(), rx);

        Transform::new_translation(&Vector3::from(self.translate))
            * rotation.to_homogeneous()
            * Transform::new_nonuniform_scaling(&Vector3::from(self.scale))
    }

    /// Mirroring or collapsing scales would turn the solid inside out
    pub fn validate(&self) -> Result<(), SceneError> {
        for (axis, value) in ['x', 'y', 'z'].into_iter().zip(self.scale) {
            if !(value.is_finite() && value > 0.0) {
                return Err(SceneError::InvalidScale { axis, value });
            }
        }
        Ok(())
    }
}

/// One placed primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub shape: Primitive,
    #[serde(default)]
    pub transform: Placement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<[f32; 3]>,
}

impl Shape {
    pub fn new(shape: Primitive, transform: Placement) -> Self {
        Self {
            shape,
            transform,
            color: None,
        }
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        self.shape.validate()?;
        self.transform.validate()
    }

    pub fn to_mesh(&self) -> Mesh {
        self.shape.to_mesh_with_color(self.color.unwrap_or(DEFAULT_COLOR))
    }
}

/// Shapes A and B of an intersection query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub a: Shape,
    pub b: Shape,
}

/// Meshes and transforms built from a [`Scene`]
#[derive(Debug, Clone)]
pub struct SceneMeshes {
    pub mesh_a: Mesh,
    pub transform_a: Transform,
    pub mesh_b: Mesh,
    pub transform_b: Transform,
}

impl SceneMeshes {
    pub fn pair(&self) -> MeshPair<'_> {
        MeshPair::new(&self.mesh_a, self.transform_a, &self.mesh_b, self.transform_b)
    }
}

impl Scene {
    /// Load and validate a scene file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read scene file: {:?}", path))?;
        Self::parse(&content).with_context(|| format!("Invalid scene file: {:?}", path))
    }

    pub fn parse(source: &str) -> Result<Self> {
        let scene: Scene = toml::from_str(source).context("Failed to parse scene")?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize scene")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write scene file: {:?}", path.as_ref()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        self.a.validate()?;
        self.b.validate()
    }

    pub fn build(&self) -> SceneMeshes {
        SceneMeshes {
            mesh_a: self.a.to_mesh(),
            transform_a: self.a.transform.to_matrix(),
            mesh_b: self.b.to_mesh(),
            transform_b: self.b.transform.to_matrix(),
        }
    }
}
