// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! JSON exporter for intersection faces

use crate::geometry::IntersectionFace;
use anyhow::{Context, Result};
use std::path::Path;

pub fn faces_to_json(faces: &[IntersectionFace]) -> Result<String> {
    serde_json::to_string_pretty(faces).context("Failed to serialize faces")
}

/// Write faces as pretty-printed JSON
pub fn export_faces_json(faces: &[IntersectionFace], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = faces_to_json(faces)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write JSON file: {:?}", path))?;

    tracing::debug!(faces = faces.len(), path = %path.display(), "exported JSON");
    Ok(())
}

/// Load faces written by [`export_faces_json`]
pub fn read_faces_json(path: impl AsRef<Path>) -> Result<Vec<IntersectionFace>> {
    let path = path.as_ref();
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read JSON file: {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse JSON file: {:?}", path))
}
