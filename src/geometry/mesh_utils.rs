// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Index-buffer connectivity helpers

use ahash::{AHashMap, AHashSet};

/// Undirected edge, smaller id first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Edge {
    v0: u32,
    v1: u32,
}

impl Edge {
    fn new(v0: u32, v1: u32) -> Self {
        if v0 < v1 {
            Self { v0, v1 }
        } else {
            Self { v0: v1, v1: v0 }
        }
    }
}

/// 1-ring neighbors of `vertex_id`: every other id of every triangle that
/// references it.
pub fn connected_vertices(indices: &[u32], vertex_id: u32) -> AHashSet<u32> {
    let mut neighbors = AHashSet::new();

    for triangle in indices.chunks_exact(3) {
        if triangle.contains(&vertex_id) {
            neighbors.extend(triangle.iter().copied().filter(|&id| id != vertex_id));
        }
    }

    neighbors
}

fn edge_counts(indices: &[u32]) -> AHashMap<Edge, u32> {
    let mut counts = AHashMap::new();
    for t in indices.chunks_exact(3) {
        for edge in [Edge::new(t[0], t[1]), Edge::new(t[1], t[2]), Edge::new(t[2], t[0])] {
            *counts.entry(edge).or_insert(0) += 1;
        }
    }
    counts
}

/// Each edge shared by at most two triangles
pub fn is_manifold(indices: &[u32]) -> bool {
    edge_counts(indices).values().all(|&count| count <= 2)
}

/// Each edge shared by exactly two triangles (a watertight surface).
/// Only meaningful on welded indices.
pub fn is_closed(indices: &[u32]) -> bool {
    let counts = edge_counts(indices);
    !counts.is_empty() && counts.values().all(|&count| count == 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tetrahedron over ids 0..4
    const TETRA: [u32; 12] = [0, 2, 1, 0, 1, 3, 1, 2, 3, 2, 0, 3];

    #[test]
    fn test_connected_vertices_one_ring() {
        let ring = connected_vertices(&TETRA, 0);
        assert_eq!(ring, AHashSet::from_iter([1, 2, 3]));
    }

    #[test]
    fn test_connected_vertices_of_unreferenced_id() {
        assert!(connected_vertices(&TETRA, 7).is_empty());
    }

    #[test]
    fn test_connected_vertices_open_strip() {
        // Two triangles sharing edge 1-2
        let strip = [0, 1, 2, 2, 1, 3];
        assert_eq!(connected_vertices(&strip, 0), AHashSet::from_iter([1, 2]));
        assert_eq!(connected_vertices(&strip, 1), AHashSet::from_iter([0, 2, 3]));
    }

    #[test]
    fn test_tetrahedron_is_closed() {
        assert!(is_manifold(&TETRA));
        assert!(is_closed(&TETRA));
        assert!(!is_closed(&TETRA[..9]));
        assert!(!is_closed(&[]));
    }
}
