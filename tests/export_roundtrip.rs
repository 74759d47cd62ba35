// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Round-trip export, scene and configuration tests

use anyhow::Result;
use convex_intersect::geometry::{analyze_faces, Primitive, SatAxes};
use convex_intersect::scene::{Placement, Shape};
use convex_intersect::{io, Kernel, KernelConfig, Scene};
use std::fs::File;
use tempfile::{tempdir, NamedTempFile};

fn offset_boxes() -> Scene {
    Scene {
        a: Shape::new(Primitive::unit_box(), Placement::default()),
        b: Shape::new(
            Primitive::unit_box(),
            Placement {
                translate: [0.5, 0.25, 0.25],
                ..Placement::default()
            },
        ),
    }
}

#[test]
fn test_roundtrip_stl_export() -> Result<()> {
    let scene = offset_boxes().build();
    let faces = Kernel::new().intersection_boundary(&scene.mesh_a, &scene.transform_a, &scene.mesh_b, &scene.transform_b);
    let triangles: usize = faces.iter().map(|f| f.indices.len() / 3).sum();

    let file = NamedTempFile::with_suffix(".stl")?;
    io::export_faces_stl(&faces, file.path())?;

    let stl = stl_io::read_stl(&mut File::open(file.path())?)?;
    assert_eq!(stl.faces.len(), triangles);

    // Every written vertex lies in the overlap [0, 0.5] x [-0.25, 0.5] x [-0.25, 0.5]
    for v in &stl.vertices {
        assert!(v[0] > -1e-5 && v[0] < 0.5 + 1e-5);
        assert!(v[1] > -0.25 - 1e-5 && v[1] < 0.5 + 1e-5);
        assert!(v[2] > -0.25 - 1e-5 && v[2] < 0.5 + 1e-5);
    }

    Ok(())
}

#[test]
fn test_roundtrip_json_export() -> Result<()> {
    let scene = offset_boxes().build();
    let faces = Kernel::new().intersection_faces(&scene.mesh_a, &scene.transform_a, &scene.mesh_b, &scene.transform_b);
    assert!(!faces.is_empty());

    let file = NamedTempFile::with_suffix(".json")?;
    io::export_faces_json(&faces, file.path())?;
    let loaded = io::read_faces_json(file.path())?;

    assert_eq!(loaded.len(), faces.len());
    assert_eq!(analyze_faces(&loaded).triangle_count, analyze_faces(&faces).triangle_count);
    for (a, b) in loaded.iter().zip(&faces) {
        assert_eq!(a.indices, b.indices);
        for (p, q) in a.points.iter().zip(&b.points) {
            assert!((p - q).norm() < 1e-12);
        }
    }

    Ok(())
}

#[test]
fn test_scene_file_roundtrip() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("scene.toml");

    let scene = offset_boxes();
    scene.save(&path)?;
    let loaded = Scene::from_file(&path)?;

    assert_eq!(loaded, scene);
    Ok(())
}

#[test]
fn test_scene_file_drives_the_kernel() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("scene.toml");
    std::fs::write(
        &path,
        r#"
        [a]
        shape = { kind = "box", width = 2.0, height = 2.0, length = 2.0 }

        [b]
        shape = { kind = "sphere", radius = 0.5, sectors = 16, stacks = 8 }
        transform = { translate = [0.2, 0.1, 0.0] }
        "#,
    )?;

    let scene = Scene::from_file(&path)?.build();
    let kernel = Kernel::new();

    // The sphere sits inside the box, so A contributes nothing and B its whole surface.
    assert!(kernel.intersects(&scene.mesh_a, &scene.transform_a, &scene.mesh_b, &scene.transform_b));
    assert!(kernel
        .intersection_faces(&scene.mesh_a, &scene.transform_a, &scene.mesh_b, &scene.transform_b)
        .is_empty());

    let report = &kernel.intersect_pairs(&[scene.pair()])[0];
    assert!(report.overlapping());
    let sphere_area: f64 = {
        let swapped = kernel.intersection_faces(&scene.mesh_b, &scene.transform_b, &scene.mesh_a, &scene.transform_a);
        swapped.iter().map(|f| f.area()).sum()
    };
    assert!((report.area - sphere_area).abs() < 1e-9);
    assert!(sphere_area > 0.0 && sphere_area < 4.0 * std::f64::consts::PI * 0.25);

    Ok(())
}

#[test]
fn test_missing_scene_file_is_an_error() {
    let dir = tempdir().unwrap();
    let err = Scene::from_file(dir.path().join("missing.toml")).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to read scene file"));
}

#[test]
fn test_config_file_roundtrip() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("kernel.toml");

    let config = KernelConfig {
        point_tolerance: 5e-4,
        sat_axes: SatAxes::FaceAndEdgeNormals,
        parallel: false,
        ..KernelConfig::default()
    };
    config.save(&path)?;

    assert_eq!(KernelConfig::from_file(&path)?, config);
    Ok(())
}

#[test]
fn test_invalid_config_file_is_rejected() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("kernel.toml");
    std::fs::write(&path, "point_tolerance = -1.0\n")?;

    assert!(KernelConfig::from_file(&path).is_err());
    Ok(())
}
