// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Tolerance-deduplicated point collection

use nalgebra::Point3;

/// Points closer than this (Euclidean) are the same intersection point
pub const POINT_TOLERANCE: f64 = 1e-3;

/// Insertion-ordered point set with a distance-based uniqueness rule.
///
/// Lookups are a linear scan; sets stay small (one polygon or one mesh pair).
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    tolerance: f64,
    points: Vec<Point3<f64>>,
}

impl PointSet {
    pub fn new() -> Self {
        Self::with_tolerance(POINT_TOLERANCE)
    }

    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            points: Vec::new(),
        }
    }

    /// Add `point` unless an existing point lies within the tolerance.
    /// Returns whether it was added.
    pub fn insert(&mut self, point: Point3<f64>) -> bool {
        if self.contains(&point) {
            return false;
        }
        self.points.push(point);
        true
    }

    pub fn contains(&self, point: &Point3<f64>) -> bool {
        self.points
            .iter()
            .any(|existing| (point - existing).norm() < self.tolerance)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn as_slice(&self) -> &[Point3<f64>] {
        &self.points
    }

    pub fn into_vec(self) -> Vec<Point3<f64>> {
        self.points
    }
}

impl Default for PointSet {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<Point3<f64>> for PointSet {
    fn extend<I: IntoIterator<Item = Point3<f64>>>(&mut self, iter: I) {
        for point in iter {
            self.insert(point);
        }
    }
}
