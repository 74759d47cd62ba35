// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Numeric thresholds shared by the intersection passes

use super::canonical::WELD_TOLERANCE;
use super::point_set::POINT_TOLERANCE;
use super::sat::AXIS_EPSILON;
use super::triangle_intersection::DEFAULT_POINT_EPSILON;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Component-wise distance under which mesh positions weld
    pub weld: f64,
    /// Euclidean distance under which intersection points merge
    pub point: f64,
    /// Barycentric slack and plane-distance bound for points on a triangle
    pub point_epsilon: f64,
    /// Minimum SAT axis length
    pub axis: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            weld: WELD_TOLERANCE,
            point: POINT_TOLERANCE,
            point_epsilon: DEFAULT_POINT_EPSILON,
            axis: AXIS_EPSILON,
        }
    }
}
