// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Convex Intersection Kernel
//!
//! Boolean intersection of two closed convex triangle meshes, each placed in
//! world space by its own affine transform. The kernel answers whether the
//! meshes may overlap (separating-axis test) and reconstructs the polygonal
//! faces bounding their intersection.

pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod kernel;
pub mod scene;

pub use config::KernelConfig;
pub use error::{MeshError, SceneError};
pub use geometry::{
    canonicalize, intersection_boundary, intersection_faces, intersection_points, intersects_sat,
    vertices_within, IntersectionFace, Mesh, Primitive, SatAxes, Transform,
};
pub use kernel::{Kernel, MeshPair, PairReport};
pub use scene::Scene;

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn test_basic_intersection() {
        let cube = Primitive::unit_box().to_mesh();
        let offset = Transform::new_translation(&Vector3::new(0.5, 0.0, 0.0));

        assert!(intersects_sat(&cube, &Transform::identity(), &cube, &offset));
        assert!(!intersection_faces(&cube, &Transform::identity(), &cube, &offset).is_empty());
    }
}
