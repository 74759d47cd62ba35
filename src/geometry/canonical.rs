// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Position deduplication and compact re-indexing
//!
//! Primitive generators duplicate corners per face (for flat normals) and seams
//! (for texture wrap). Geometry wants one id per location, so the index buffer
//! is rewritten against a welded position list.

use super::mesh::{Mesh, Transform};
use ahash::AHashMap;
use nalgebra::Point3;

/// Component-wise tolerance under which two positions are the same vertex
pub const WELD_TOLERANCE: f64 = 1e-6;

/// Welded positions plus an index buffer re-expressed against them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalMesh {
    pub positions: Vec<Point3<f64>>,
    pub indices: Vec<u32>,
}

impl CanonicalMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Corners of every triangle
    pub fn triangles(&self) -> impl Iterator<Item = [Point3<f64>; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| {
            [
                self.positions[t[0] as usize],
                self.positions[t[1] as usize],
                self.positions[t[2] as usize],
            ]
        })
    }
}

/// Weld the positions referenced by `mesh`, optionally mapping them to world
/// space first.
///
/// Ids are handed out in first-reference order while walking the index
/// buffer, so the output is deterministic for a given mesh and transform.
pub fn canonicalize(mesh: &Mesh, transform: Option<&Transform>) -> CanonicalMesh {
    canonicalize_with_tolerance(mesh, transform, WELD_TOLERANCE)
}

pub fn canonicalize_with_tolerance(
    mesh: &Mesh,
    transform: Option<&Transform>,
    tolerance: f64,
) -> CanonicalMesh {
    let mut welder = Welder::new(tolerance);
    let mut out = CanonicalMesh {
        positions: Vec::new(),
        indices: Vec::with_capacity(mesh.indices().len()),
    };

    for &index in mesh.indices() {
        let position = match transform {
            Some(transform) => mesh.world_position(index, transform),
            None => mesh.position(index),
        };
        let id = welder.resolve(position, &mut out.positions);
        out.indices.push(id);
    }

    out
}

/// Quantized-cell lookup. Points closer than `tolerance` on every axis land in
/// the same or an adjacent cell, so probing the 27-cell neighborhood is exact.
struct Welder {
    tolerance: f64,
    cells: AHashMap<[i64; 3], Vec<u32>>,
}

impl Welder {
    fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            cells: AHashMap::new(),
        }
    }

    fn cell_of(&self, p: &Point3<f64>) -> [i64; 3] {
        [
            (p.x / self.tolerance).floor() as i64,
            (p.y / self.tolerance).floor() as i64,
            (p.z / self.tolerance).floor() as i64,
        ]
    }

    fn resolve(&mut self, position: Point3<f64>, positions: &mut Vec<Point3<f64>>) -> u32 {
        let cell = self.cell_of(&position);

        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let key = [cell[0] + dx, cell[1] + dy, cell[2] + dz];
                    let Some(ids) = self.cells.get(&key) else {
                        continue;
                    };
                    for &id in ids {
                        let d = position - positions[id as usize];
                        if d.x.abs() < self.tolerance
                            && d.y.abs() < self.tolerance
                            && d.z.abs() < self.tolerance
                        {
                            return id;
                        }
                    }
                }
            }
        }

        let id = positions.len() as u32;
        positions.push(position);
        self.cells.entry(cell).or_default().push(id);
        id
    }
}
