// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for mesh construction and scene description

use thiserror::Error;

/// Raised when raw vertex/index buffers do not describe a valid indexed mesh
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    #[error("vertex buffer length {len} is not a multiple of the {stride}-float vertex stride")]
    VertexStride { len: usize, stride: usize },

    #[error("index buffer length {0} is not a multiple of 3")]
    IndexCount(usize),

    #[error("index {index} at position {position} is out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds {
        index: u32,
        position: usize,
        vertex_count: usize,
    },
}

/// Raised when a scene shape cannot be turned into a mesh
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("shape dimension `{name}` must be positive and finite, got {value}")]
    InvalidDimension { name: &'static str, value: f64 },

    #[error("scale component {axis} must be positive and finite, got {value}")]
    InvalidScale { axis: char, value: f64 },

    #[error("shape `{name}` needs at least {min} segments, got {value}")]
    TooFewSegments {
        name: &'static str,
        min: u32,
        value: u32,
    },
}
