// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Kernel configuration system

use crate::geometry::{
    SatAxes, Tolerances, AXIS_EPSILON, DEFAULT_POINT_EPSILON, POINT_TOLERANCE, WELD_TOLERANCE,
};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file looked up by [`KernelConfig::load`]
pub const CONFIG_FILE: &str = "kernel.toml";

/// Kernel configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Euclidean distance under which intersection points merge
    pub point_tolerance: f64,
    /// Component-wise distance under which mesh positions weld
    pub weld_tolerance: f64,
    /// Slack for points lying on a triangle
    pub point_epsilon: f64,
    /// Minimum SAT axis length
    pub axis_epsilon: f64,
    /// Candidate axes for the overlap test
    pub sat_axes: SatAxes,
    /// Evaluate batches of pairs on the rayon pool
    pub parallel: bool,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            point_tolerance: POINT_TOLERANCE,
            weld_tolerance: WELD_TOLERANCE,
            point_epsilon: DEFAULT_POINT_EPSILON,
            axis_epsilon: AXIS_EPSILON,
            sat_axes: SatAxes::default(),
            parallel: true,
        }
    }
}

impl KernelConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: KernelConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if Path::new(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `CONVEX_INTERSECT_*` overrides read through `var`
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(axes) = var("CONVEX_INTERSECT_SAT_AXES") {
            self.sat_axes = match axes.trim() {
                "face_normals" => SatAxes::FaceNormals,
                "face_and_edge_normals" => SatAxes::FaceAndEdgeNormals,
                other => bail!("Unknown CONVEX_INTERSECT_SAT_AXES value: {other}"),
            };
        }

        if let Some(tolerance) = var("CONVEX_INTERSECT_POINT_TOLERANCE") {
            self.point_tolerance = tolerance
                .trim()
                .parse()
                .with_context(|| format!("Invalid CONVEX_INTERSECT_POINT_TOLERANCE: {tolerance}"))?;
        }

        if let Some(parallel) = var("CONVEX_INTERSECT_PARALLEL") {
            self.parallel = parallel.trim().parse().unwrap_or(self.parallel);
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Every tolerance must be a positive finite number
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("point_tolerance", self.point_tolerance),
            ("weld_tolerance", self.weld_tolerance),
            ("point_epsilon", self.point_epsilon),
            ("axis_epsilon", self.axis_epsilon),
        ] {
            if !(value.is_finite() && value > 0.0) {
                bail!("{name} must be positive, got {value}");
            }
        }
        Ok(())
    }

    pub fn tolerances(&self) -> Tolerances {
        Tolerances {
            weld: self.weld_tolerance,
            point: self.point_tolerance,
            point_epsilon: self.point_epsilon,
            axis: self.axis_epsilon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_module_constants() {
        let config = KernelConfig::default();
        assert_eq!(config.tolerances(), Tolerances::default());
        assert_eq!(config.sat_axes, SatAxes::FaceAndEdgeNormals);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: KernelConfig = toml::from_str("sat_axes = \"face_normals\"\nparallel = false\n").unwrap();
        assert_eq!(config.sat_axes, SatAxes::FaceNormals);
        assert!(!config.parallel);
        assert_eq!(config.point_tolerance, POINT_TOLERANCE);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = KernelConfig::default();
        config
            .apply_env(env(&[
                ("CONVEX_INTERSECT_SAT_AXES", "face_normals"),
                ("CONVEX_INTERSECT_POINT_TOLERANCE", "0.01"),
                ("CONVEX_INTERSECT_PARALLEL", "false"),
            ]))
            .unwrap();

        assert_eq!(config.sat_axes, SatAxes::FaceNormals);
        assert_eq!(config.point_tolerance, 0.01);
        assert!(!config.parallel);
    }

    #[test]
    fn test_bad_env_values_are_rejected() {
        let mut config = KernelConfig::default();
        assert!(config.apply_env(env(&[("CONVEX_INTERSECT_SAT_AXES", "vertices")])).is_err());
        assert!(config.apply_env(env(&[("CONVEX_INTERSECT_POINT_TOLERANCE", "tiny")])).is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive() {
        let config = KernelConfig {
            weld_tolerance: 0.0,
            ..KernelConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
