// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - exporting intersection faces

mod export_json;
mod export_stl;

pub use export_json::{export_faces_json, faces_to_json, read_faces_json};
pub use export_stl::{export_faces_stl, faces_to_stl_bytes};
