// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Statistics over reconstructed intersection faces

use super::bbox::BoundingBox;
use super::faces::IntersectionFace;
use super::polygon::centroid;
use serde::{Deserialize, Serialize};

/// Summary of a face list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceStats {
    /// Number of polygon fragments
    pub face_count: usize,
    /// Boundary points summed over all faces (shared corners counted per face)
    pub point_count: usize,
    /// Triangles produced by fan triangulation
    pub triangle_count: usize,
    /// Total surface area in square units
    pub surface_area: f64,
    /// Bounding box [min_x, min_y, min_z, max_x, max_y, max_z]
    pub bbox: [f64; 6],
    /// Mean of all face points [x, y, z]
    pub centroid: [f64; 3],
}

impl FaceStats {
    /// Create empty stats
    pub fn empty() -> Self {
        Self {
            face_count: 0,
            point_count: 0,
            triangle_count: 0,
            surface_area: 0.0,
            bbox: [0.0; 6],
            centroid: [0.0; 3],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.face_count == 0
    }

    /// Extent along x, y, z
    pub fn size(&self) -> [f64; 3] {
        [
            self.bbox[3] - self.bbox[0],
            self.bbox[4] - self.bbox[1],
            self.bbox[5] - self.bbox[2],
        ]
    }

    /// Pretty print statistics
    pub fn print(&self) {
        let size = self.size();
        println!("╔══════════════════════════════════════════════════════════╗");
        println!("║              INTERSECTION ANALYTICS                      ║");
        println!("╠══════════════════════════════════════════════════════════╣");
        println!("║ Faces:           {:>10}                              ║", self.face_count);
        println!("║ Points:          {:>10}                              ║", self.point_count);
        println!("║ Triangles:       {:>10}                              ║", self.triangle_count);
        println!("║ Surface Area:    {:>10.4}                              ║", self.surface_area);
        println!(
            "║ Centroid:        ({:>7.2}, {:>7.2}, {:>7.2})            ║",
            self.centroid[0], self.centroid[1], self.centroid[2]
        );
        println!("║                                                          ║");
        println!("║ Bounding Box:                                            ║");
        println!(
            "║   Min: ({:>7.2}, {:>7.2}, {:>7.2})                      ║",
            self.bbox[0], self.bbox[1], self.bbox[2]
        );
        println!(
            "║   Max: ({:>7.2}, {:>7.2}, {:>7.2})                      ║",
            self.bbox[3], self.bbox[4], self.bbox[5]
        );
        println!(
            "║   Size: {:>7.2} × {:>7.2} × {:>7.2}                     ║",
            size[0], size[1], size[2]
        );
        println!("╚══════════════════════════════════════════════════════════╝");
    }
}

/// Analyze a face list
pub fn analyze_faces(faces: &[IntersectionFace]) -> FaceStats {
    if faces.is_empty() {
        return FaceStats::empty();
    }

    let all_points: Vec<_> = faces.iter().flat_map(|f| f.points.iter().copied()).collect();
    let bbox = BoundingBox::from_points(&all_points);
    let center = centroid(&all_points);

    FaceStats {
        face_count: faces.len(),
        point_count: all_points.len(),
        triangle_count: faces.iter().map(|f| f.indices.len() / 3).sum(),
        surface_area: faces.iter().map(IntersectionFace::area).sum(),
        bbox: [
            bbox.min.x, bbox.min.y, bbox.min.z, bbox.max.x, bbox.max.y, bbox.max.z,
        ],
        centroid: [center.x, center.y, center.z],
    }
}
