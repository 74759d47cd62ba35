// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Binary STL exporter for intersection faces

use crate::geometry::IntersectionFace;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;
use stl_io::{Normal, Triangle, Vertex};

/// One STL facet per output triangle, normal taken from the source triangle
fn stl_triangles(faces: &[IntersectionFace]) -> Vec<Triangle> {
    faces
        .iter()
        .flat_map(|face| {
            let n = face.normal;
            face.triangles().map(move |tri| Triangle {
                normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: tri.map(|p| Vertex::new([p.x as f32, p.y as f32, p.z as f32])),
            })
        })
        .collect()
}

/// Encode faces as binary STL
pub fn faces_to_stl_bytes(faces: &[IntersectionFace]) -> Result<Vec<u8>> {
    let triangles = stl_triangles(faces);
    let mut cursor = Cursor::new(Vec::new());
    stl_io::write_stl(&mut cursor, triangles.iter()).context("Failed to encode STL")?;
    Ok(cursor.into_inner())
}

/// Write faces to a binary STL file
pub fn export_faces_stl(faces: &[IntersectionFace], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let triangles = stl_triangles(faces);

    let file = File::create(path).with_context(|| format!("Failed to create STL file: {:?}", path))?;
    let mut writer = BufWriter::new(file);
    stl_io::write_stl(&mut writer, triangles.iter())
        .with_context(|| format!("Failed to write STL file: {:?}", path))?;
    writer.flush()?;

    tracing::debug!(triangles = triangles.len(), path = %path.display(), "exported STL");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{intersection_faces, Primitive, Transform};

    #[test]
    fn test_stl_size_matches_triangle_count() {
        let small = Primitive::cuboid(0.5, 0.5, 0.5).to_mesh();
        let large = Primitive::cuboid(2.0, 2.0, 2.0).to_mesh();
        let faces = intersection_faces(&small, &Transform::identity(), &large, &Transform::identity());

        let bytes = faces_to_stl_bytes(&faces).unwrap();
        // 80-byte header, u32 count, 50 bytes per facet
        assert_eq!(bytes.len(), 84 + 50 * 12);
    }

    #[test]
    fn test_empty_face_list_is_valid_stl() {
        let bytes = faces_to_stl_bytes(&[]).unwrap();
        assert_eq!(bytes.len(), 84);
    }
}
