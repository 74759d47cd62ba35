// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Convex intersection CLI

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use convex_intersect::cli::Reporter;
use convex_intersect::geometry::{analyze_faces, SatAxes};
use convex_intersect::{io, Kernel, KernelConfig, Scene};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "convex-intersect")]
#[command(about = "Convex mesh intersection kernel - overlap tests and intersection faces", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Kernel configuration file (defaults to kernel.toml plus environment overrides)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Skip edge-cross axes in the overlap test (faster, may report false overlaps)
    #[arg(long, global = true)]
    face_axes_only: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the separating-axis overlap test on a scene
    Test {
        /// Scene file (TOML)
        scene: PathBuf,
    },

    /// Reconstruct the faces of A∩B
    Faces {
        /// Scene file (TOML)
        scene: PathBuf,

        /// Include B's faces inside A (the closed boundary)
        #[arg(short, long)]
        boundary: bool,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Stl)]
        format: Format,

        /// Print the full analytics table
        #[arg(long)]
        stats: bool,
    },

    /// Harvest the boundary points of A∩B
    Points {
        /// Scene file (TOML)
        scene: PathBuf,

        /// Write points as JSON instead of listing them
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Stl,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(&cli) {
        Reporter::report_error(&format!("{err:#}"));
        std::process::exit(1);
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Test { scene } => test_command(&kernel(cli)?, scene),
        Commands::Faces {
            scene,
            boundary,
            output,
            format,
            stats,
        } => faces_command(&kernel(cli)?, scene, *boundary, output.as_deref(), *format, *stats, cli.verbose),
        Commands::Points { scene, output } => points_command(&kernel(cli)?, scene, output.as_deref()),
        Commands::Version => {
            println!("convex-intersect v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn kernel(cli: &Cli) -> Result<Kernel> {
    let mut config = match &cli.config {
        Some(path) => KernelConfig::from_file(path)?,
        None => KernelConfig::load()?,
    };
    if cli.face_axes_only {
        config.sat_axes = SatAxes::FaceNormals;
    }
    tracing::debug!(?config, "kernel configuration");
    Ok(Kernel::with_config(config))
}

fn load_scene(path: &Path) -> Result<Scene> {
    if !path.exists() {
        bail!("Scene file not found: {}", path.display());
    }
    Scene::from_file(path)
}

fn test_command(kernel: &Kernel, scene_path: &Path) -> Result<()> {
    let scene = load_scene(scene_path)?.build();

    let start = Instant::now();
    let axis = kernel.separating_axis(&scene.mesh_a, &scene.transform_a, &scene.mesh_b, &scene.transform_b);
    Reporter::report_overlap(&scene_path.display().to_string(), axis.as_ref(), start.elapsed());
    Ok(())
}

fn faces_command(
    kernel: &Kernel,
    scene_path: &Path,
    boundary: bool,
    output: Option<&Path>,
    format: Format,
    stats: bool,
    verbose: bool,
) -> Result<()> {
    let scene = load_scene(scene_path)?.build();

    let start = Instant::now();
    let faces = if boundary {
        kernel.intersection_boundary(&scene.mesh_a, &scene.transform_a, &scene.mesh_b, &scene.transform_b)
    } else {
        kernel.intersection_faces(&scene.mesh_a, &scene.transform_a, &scene.mesh_b, &scene.transform_b)
    };
    let elapsed = start.elapsed();

    let analytics = analyze_faces(&faces);
    Reporter::report_faces(&scene_path.display().to_string(), &analytics, elapsed);
    if stats {
        analytics.print();
    }

    if let Some(output) = output {
        match format {
            Format::Stl => io::export_faces_stl(&faces, output)?,
            Format::Json => io::export_faces_json(&faces, output)?,
        }
        if verbose {
            Reporter::report_info(&format!("{} faces written", faces.len()));
        }
        Reporter::success(&format!("Exported {}", output.display()));
    }

    Ok(())
}

fn points_command(kernel: &Kernel, scene_path: &Path, output: Option<&Path>) -> Result<()> {
    let scene = load_scene(scene_path)?.build();

    let start = Instant::now();
    let points = kernel.intersection_points(&scene.mesh_a, &scene.transform_a, &scene.mesh_b, &scene.transform_b);
    let elapsed = start.elapsed();

    match output {
        Some(path) => {
            std::fs::write(path, serde_json::to_string_pretty(&points)?)?;
            Reporter::success(&format!("{} points written to {}", points.len(), path.display()));
        }
        None => Reporter::report_points(&scene_path.display().to_string(), &points, elapsed),
    }

    if points.is_empty() {
        Reporter::report_warning("The shapes do not overlap");
    }
    Ok(())
}
