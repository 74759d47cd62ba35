// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Kernel API for convex intersection queries

use crate::config::KernelConfig;
use crate::geometry::{
    self, canonicalize_with_tolerance, CanonicalMesh, IntersectionFace, Mesh, Transform,
};
use nalgebra::{Point3, Vector3};
use rayon::prelude::*;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Two placed meshes to intersect
#[derive(Debug, Clone, Copy)]
pub struct MeshPair<'a> {
    pub mesh_a: &'a Mesh,
    pub transform_a: Transform,
    pub mesh_b: &'a Mesh,
    pub transform_b: Transform,
}

impl<'a> MeshPair<'a> {
    pub fn new(mesh_a: &'a Mesh, transform_a: Transform, mesh_b: &'a Mesh, transform_b: Transform) -> Self {
        Self {
            mesh_a,
            transform_a,
            mesh_b,
            transform_b,
        }
    }
}

/// Outcome of one pair in a batch
#[derive(Debug, Clone, Serialize)]
pub struct PairReport {
    /// Position of the pair in the input batch
    pub index: usize,
    /// Axis proving the meshes disjoint, if the overlap test found one
    pub separating_axis: Option<Vector3<f64>>,
    /// Boundary faces of A∩B from both meshes
    pub faces: Vec<IntersectionFace>,
    /// Total area of `faces`
    pub area: f64,
    pub duration: Duration,
}

impl PairReport {
    pub fn overlapping(&self) -> bool {
        self.separating_axis.is_none()
    }
}

/// Stateless intersection kernel bound to one configuration
#[derive(Debug, Clone, Default)]
pub struct Kernel {
    config: KernelConfig,
}

impl Kernel {
    /// Create a kernel with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: KernelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// Overlap test: `false` proves the meshes disjoint
    pub fn intersects(&self, mesh_a: &Mesh, transform_a: &Transform, mesh_b: &Mesh, transform_b: &Transform) -> bool {
        self.separating_axis(mesh_a, transform_a, mesh_b, transform_b).is_none()
    }

    pub fn separating_axis(
        &self,
        mesh_a: &Mesh,
        transform_a: &Transform,
        mesh_b: &Mesh,
        transform_b: &Transform,
    ) -> Option<Vector3<f64>> {
        geometry::separating_axis(
            mesh_a,
            transform_a,
            mesh_b,
            transform_b,
            self.config.sat_axes,
            self.config.axis_epsilon,
        )
    }

    /// Welded world-space positions of `mesh`
    pub fn canonicalize(&self, mesh: &Mesh, transform: Option<&Transform>) -> CanonicalMesh {
        canonicalize_with_tolerance(mesh, transform, self.config.weld_tolerance)
    }

    pub fn vertices_within(
        &self,
        mesh_a: &Mesh,
        transform_a: &Transform,
        mesh_b: &Mesh,
        transform_b: &Transform,
    ) -> Vec<u32> {
        let a = self.canonicalize(mesh_a, Some(transform_a));
        let b = self.canonicalize(mesh_b, Some(transform_b));
        (0..a.positions.len() as u32)
            .filter(|&id| geometry::is_inside_convex_mesh(&a.positions[id as usize], &b.positions, &b.indices))
            .collect()
    }

    pub fn intersection_points(
        &self,
        mesh_a: &Mesh,
        transform_a: &Transform,
        mesh_b: &Mesh,
        transform_b: &Transform,
    ) -> Vec<Point3<f64>> {
        geometry::intersection_points_with(mesh_a, transform_a, mesh_b, transform_b, &self.config.tolerances())
    }

    pub fn intersection_faces(
        &self,
        mesh_a: &Mesh,
        transform_a: &Transform,
        mesh_b: &Mesh,
        transform_b: &Transform,
    ) -> Vec<IntersectionFace> {
        geometry::intersection_faces_with(
            mesh_a,
            transform_a,
            mesh_b,
            transform_b,
            &self.config.tolerances(),
            self.config.sat_axes,
        )
    }

    pub fn intersection_boundary(
        &self,
        mesh_a: &Mesh,
        transform_a: &Transform,
        mesh_b: &Mesh,
        transform_b: &Transform,
    ) -> Vec<IntersectionFace> {
        geometry::intersection_boundary_with(
            mesh_a,
            transform_a,
            mesh_b,
            transform_b,
            &self.config.tolerances(),
            self.config.sat_axes,
        )
    }

    /// Evaluate independent pairs, in parallel when configured.
    ///
    /// Reports come back in input order.
    pub fn intersect_pairs(&self, pairs: &[MeshPair<'_>]) -> Vec<PairReport> {
        let start = Instant::now();
        let reports: Vec<PairReport> = if self.config.parallel {
            pairs
                .par_iter()
                .enumerate()
                .map(|(index, pair)| self.evaluate_pair(index, pair))
                .collect()
        } else {
            pairs
                .iter()
                .enumerate()
                .map(|(index, pair)| self.evaluate_pair(index, pair))
                .collect()
        };

        tracing::debug!(
            pairs = pairs.len(),
            overlapping = reports.iter().filter(|r| r.overlapping()).count(),
            elapsed = ?start.elapsed(),
            "evaluated pair batch"
        );
        reports
    }

    fn evaluate_pair(&self, index: usize, pair: &MeshPair<'_>) -> PairReport {
        let start = Instant::now();
        let separating_axis = self.separating_axis(pair.mesh_a, &pair.transform_a, pair.mesh_b, &pair.transform_b);
        let faces = match separating_axis {
            Some(_) => Vec::new(),
            None => self.intersection_boundary(pair.mesh_a, &pair.transform_a, pair.mesh_b, &pair.transform_b),
        };
        let area = faces.iter().map(IntersectionFace::area).sum();

        PairReport {
            index,
            separating_axis,
            faces,
            area,
            duration: start.elapsed(),
        }
    }
}
