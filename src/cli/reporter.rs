// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::geometry::FaceStats;
use colored::*;
use nalgebra::{Point3, Vector3};
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report the overlap test for a scene
    pub fn report_overlap(scene: &str, separating_axis: Option<&Vector3<f64>>, duration: Duration) {
        Self::header("Scene:", scene);

        match separating_axis {
            None => println!(
                "{} {}",
                "●".green(),
                "Meshes may intersect (no separating axis)".green().bold()
            ),
            Some(axis) => {
                println!("{} {}", "○".yellow(), "Meshes are disjoint".yellow().bold());
                println!(
                    "  {} {}",
                    "Separating axis:".bright_black(),
                    Self::format_vector(axis).cyan()
                );
            }
        }

        Self::print_time(duration);
        Self::rule();
    }

    /// Report reconstructed faces
    pub fn report_faces(scene: &str, stats: &FaceStats, duration: Duration) {
        Self::header("Intersection:", scene);

        if stats.is_empty() {
            println!("{} {}", "○".yellow(), "No intersection faces".yellow().bold());
        } else {
            Self::print_value("Faces", stats.face_count);
            Self::print_value("Triangles", stats.triangle_count);
            Self::print_value("Surface area", format!("{:.6}", stats.surface_area));
            Self::print_value(
                "Bounds",
                format!(
                    "{} .. {}",
                    Self::format_point(&Point3::new(stats.bbox[0], stats.bbox[1], stats.bbox[2])),
                    Self::format_point(&Point3::new(stats.bbox[3], stats.bbox[4], stats.bbox[5])),
                ),
            );
        }

        Self::print_time(duration);
        Self::rule();
    }

    /// Report harvested boundary points
    pub fn report_points(scene: &str, points: &[Point3<f64>], duration: Duration) {
        Self::header("Boundary points:", scene);

        Self::print_value("Count", points.len());
        for point in points {
            println!("    {}", Self::format_point(point).cyan());
        }

        Self::print_time(duration);
        Self::rule();
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }

    fn header(label: &str, name: &str) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", label.bold(), name.cyan());
        println!("{}", "━".repeat(80).bright_black());
    }

    fn rule() {
        println!("{}", "━".repeat(80).bright_black());
    }

    fn print_value(name: &str, value: impl ToString) {
        println!(
            "  {} {}",
            format!("{}:", name).bright_black(),
            value.to_string().cyan()
        );
    }

    fn print_time(duration: Duration) {
        println!(
            "  {} {}",
            "Time:".bright_black(),
            Self::format_duration(duration).yellow()
        );
    }

    fn format_point(p: &Point3<f64>) -> String {
        format!("({:.4}, {:.4}, {:.4})", p.x, p.y, p.z)
    }

    fn format_vector(v: &Vector3<f64>) -> String {
        format!("[{:.4}, {:.4}, {:.4}]", v.x, v.y, v.z)
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(
            Reporter::format_duration(Duration::from_micros(500)),
            "500µs"
        );
        assert_eq!(
            Reporter::format_duration(Duration::from_millis(5)),
            "5.00ms"
        );
        assert_eq!(Reporter::format_duration(Duration::from_secs(2)), "2.00s");
    }

    #[test]
    fn test_format_point() {
        assert_eq!(
            Reporter::format_point(&Point3::new(0.5, -0.25, 1.0)),
            "(0.5000, -0.2500, 1.0000)"
        );
    }
}
