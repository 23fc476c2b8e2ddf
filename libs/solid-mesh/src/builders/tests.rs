//! Tests for the solid builders.

use std::f64::consts::{PI, TAU};

use approx::assert_relative_eq;
use config::kernel::{KernelConfig, SeamPolicy};
use glam::{DVec2, DVec3};

use super::*;
use crate::error::ValidationError;
use crate::mesh::boundary_edges;

fn poly(points: &[(f64, f64)]) -> Polygon {
    Polygon::new(points.iter().map(|&(x, y)| DVec2::new(x, y)).collect()).unwrap()
}

fn unit_square() -> Polygon {
    poly(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])
}

// =============================================================================
// EXTRUSION
// =============================================================================

#[test]
fn test_two_slice_square_has_six_faces() {
    let extrusion = Extrusion::new(vec![
        PlanarPolygon::new(Basis::XY, unit_square()),
        PlanarPolygon::new(Basis::XY + DVec3::Z, unit_square()),
    ])
    .unwrap();

    let faces = extrusion.faces();
    assert_eq!(faces.face_count(), 6);
    assert!(faces.is_watertight());

    let mesh = extrusion.mesh().unwrap();
    assert!(mesh.is_triangulated());
    assert_eq!(mesh.face_count(), 12);
    assert_relative_eq!(mesh.volume(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_mismatched_arity_is_rejected() {
    let triangle = poly(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
    let err = Extrusion::new(vec![
        PlanarPolygon::new(Basis::XY, triangle),
        PlanarPolygon::new(Basis::XY + DVec3::Z, unit_square()),
    ])
    .unwrap_err();
    assert_eq!(
        err,
        SolidError::Arity {
            expected: 3,
            found: 4,
            index: 1
        }
    );
}

#[test]
fn test_too_few_slices_are_rejected() {
    let err = Extrusion::new(vec![PlanarPolygon::new(Basis::XY, unit_square())]).unwrap_err();
    assert_eq!(err, SolidError::InsufficientSlices { count: 1 });
    let err = Extrusion::new(Vec::new()).unwrap_err();
    assert_eq!(err, SolidError::InsufficientSlices { count: 0 });
}

#[test]
fn test_duplicate_points_collapse_into_triangles() {
    let pinched = poly(&[(0.0, 0.0), (0.0, 1.0), (0.0, 1.0), (1.0, 1.0)]);
    let extrusion = Extrusion::new(vec![
        PlanarPolygon::new(Basis::XY, unit_square()),
        PlanarPolygon::new(Basis::XY + DVec3::Z, pinched),
        PlanarPolygon::new(Basis::XY + DVec3::Z * 2.0, unit_square()),
    ])
    .unwrap();

    let faces = extrusion.faces();
    let mut sizes: Vec<usize> = faces.faces().iter().map(|f| f.len()).collect();
    sizes.sort_unstable();
    sizes.dedup();
    assert_eq!(sizes, vec![3, 4]);
    assert!(extrusion.mesh().is_ok());
}

#[test]
fn test_slice_collapsing_to_apex_forms_pyramid() {
    let apex = poly(&[(0.5, 0.5); 4]);
    let pyramid = Extrusion::new(vec![
        PlanarPolygon::new(Basis::XY, unit_square()),
        PlanarPolygon::new(Basis::XY + DVec3::Z, apex),
    ])
    .unwrap();

    assert_eq!(pyramid.faces().face_count(), 5);
    let mesh = pyramid.mesh().unwrap();
    assert_relative_eq!(mesh.volume(), 1.0 / 3.0, epsilon = 1e-12);
}

#[test]
fn test_winding_does_not_change_orientation() {
    let ccw = unit_square().reversed();
    let mesh = Extrusion::new(vec![
        PlanarPolygon::new(Basis::XY, ccw.clone()),
        PlanarPolygon::new(Basis::XY + DVec3::Z * 3.0, ccw),
    ])
    .unwrap()
    .mesh()
    .unwrap();
    assert_relative_eq!(mesh.volume(), 3.0, epsilon = 1e-12);
}

#[test]
fn test_parallelogram_to_square_slices() {
    let parallelogram = poly(&[(0.0, 0.0), (0.0, 1.0), (1.0, 2.0), (1.0, 1.0)]);
    let mesh = Extrusion::new(vec![
        PlanarPolygon::new(Basis::XY, parallelogram),
        PlanarPolygon::new(Basis::XY + DVec3::Z, unit_square()),
    ])
    .unwrap()
    .mesh()
    .unwrap();
    assert!(mesh.is_watertight());
    assert!(mesh.volume() > 0.0);
}

#[test]
fn test_polygon_extrusion_along_slanted_vector() {
    let base = PlanarPolygon::new(Basis::XY, Polygon::rectangle(2.0, 2.0).unwrap());
    let extrusion = PolygonExtrusion::new(base, DVec3::new(1.0, 0.0, 3.0));
    assert_eq!(extrusion.faces().face_count(), 6);
    assert_relative_eq!(extrusion.mesh().unwrap().volume(), 12.0, epsilon = 1e-12);
}

// =============================================================================
// PRIMITIVES
// =============================================================================

#[test]
fn test_cuboid() {
    let mesh = cuboid(DVec3::new(1.0, 2.0, 3.0), DVec3::new(2.0, 3.0, 4.0)).unwrap();
    assert_relative_eq!(mesh.volume(), 24.0, epsilon = 1e-12);
    assert_eq!(
        mesh.bounding_box(),
        Some((DVec3::new(1.0, 2.0, 3.0), DVec3::new(3.0, 5.0, 7.0)))
    );
}

#[test]
fn test_cylinder_volume_matches_polygon_area() {
    let segments = 24;
    let mesh = cylinder(DVec3::ZERO, DVec3::new(0.0, 0.0, 5.0), 2.0, Some(segments)).unwrap();
    let n = segments as f64;
    let area = 0.5 * n * 4.0 * (TAU / n).sin();
    assert_relative_eq!(mesh.volume(), area * 5.0, epsilon = 1e-9);
    assert!(mesh.is_watertight());
}

#[test]
fn test_cylinder_with_zero_axis_fails() {
    assert!(matches!(
        cylinder(DVec3::ZERO, DVec3::ZERO, 1.0, None),
        Err(SolidError::DegenerateBasis { .. })
    ));
}

#[test]
fn test_cylinder_uses_configured_segments() {
    let cfg = KernelConfig::new(8).unwrap();
    let axis = DVec3::new(0.0, 0.0, 2.0);
    let coarse = cylinder_with_config(&cfg, DVec3::ZERO, axis, 1.0, None).unwrap();
    assert_eq!(coarse.vertex_count(), 16);
    let explicit = cylinder_with_config(&cfg, DVec3::ZERO, axis, 1.0, Some(5)).unwrap();
    assert_eq!(explicit.vertex_count(), 10);
    let default = cylinder(DVec3::ZERO, axis, 1.0, None).unwrap();
    assert_eq!(default.vertex_count(), 2 * config::constants::DEFAULT_SEGMENTS as usize);
}

// =============================================================================
// SPUN
// =============================================================================

fn offset_square(inner: f64, outer: f64) -> Polygon {
    poly(&[(inner, 0.0), (outer, 0.0), (outer, 1.0), (inner, 1.0)])
}

#[test]
fn test_repeated_profile_closes_without_boundary() {
    let n = 24;
    let spun = Spun::new(DVec3::Z, DVec3::X, vec![offset_square(2.0, 3.0); n]).unwrap();
    let faces = spun.faces();
    assert!(boundary_edges(&faces).is_empty());

    let mesh = spun.mesh().unwrap();
    let expected = n as f64 * 0.5 * (TAU / n as f64).sin() * (9.0 - 4.0);
    assert_relative_eq!(mesh.volume(), expected, epsilon = 1e-9);
}

#[test]
fn test_profile_touching_axis_collapses() {
    let n = 16;
    let profile = poly(&[(0.0, 0.0), (1.0, 0.0), (1.0, 2.0), (0.0, 2.0)]);
    let spun = Spun::new(DVec3::Y, DVec3::Z, vec![profile; n]).unwrap();
    let mesh = spun.mesh().unwrap();
    let expected = n as f64 * (TAU / n as f64).sin();
    assert_relative_eq!(mesh.volume(), expected, epsilon = 1e-9);
    let (min, max) = mesh.bounding_box().unwrap();
    assert_relative_eq!(min.y, 0.0, epsilon = 1e-12);
    assert_relative_eq!(max.y, 2.0, epsilon = 1e-12);
}

#[test]
fn test_open_sweep_is_capped() {
    let spun = Spun::new(DVec3::Z, DVec3::X, vec![offset_square(1.0, 2.0); 5])
        .unwrap()
        .with_options(SpunOptions {
            seam: SeamPolicy::Open,
            sweep: PI,
        })
        .unwrap();
    let angles = spun.angles();
    assert_relative_eq!(angles[4], PI, epsilon = 1e-12);

    let mesh = spun.mesh().unwrap();
    let expected = 4.0 * 0.5 * (PI / 4.0).sin() * (4.0 - 1.0);
    assert_relative_eq!(mesh.volume(), expected, epsilon = 1e-9);
}

#[test]
fn test_open_full_turn_with_identical_ends_fails_validation() {
    let spun = Spun::new(DVec3::Z, DVec3::X, vec![offset_square(1.0, 2.0); 9])
        .unwrap()
        .with_options(SpunOptions {
            seam: SeamPolicy::Open,
            sweep: TAU,
        })
        .unwrap();
    assert!(matches!(
        spun.mesh(),
        Err(SolidError::Validation(ValidationError::NonManifoldEdge { .. }))
    ));
}

#[test]
fn test_with_config_applies_seam_policy() {
    let open = KernelConfig::default().with_seam_policy(SeamPolicy::Open);
    let spun = Spun::new(DVec3::Z, DVec3::X, vec![offset_square(1.0, 2.0); 3])
        .unwrap()
        .with_options(SpunOptions {
            seam: SeamPolicy::Weld,
            sweep: PI,
        })
        .unwrap()
        .with_config(&open)
        .unwrap();
    let angles = spun.angles();
    assert_relative_eq!(angles[1], PI / 2.0, epsilon = 1e-12);
    assert_relative_eq!(angles[2], PI, epsilon = 1e-12);
    assert!(spun.mesh().unwrap().is_watertight());

    let welded = spun.with_config(&KernelConfig::default()).unwrap();
    assert_relative_eq!(welded.angles()[1], TAU / 3.0, epsilon = 1e-12);
}

#[test]
fn test_welded_angles_skip_full_turn() {
    let spun = Spun::new(DVec3::Z, DVec3::X, vec![offset_square(1.0, 2.0); 4]).unwrap();
    let angles = spun.angles();
    assert_eq!(angles.len(), 4);
    assert_relative_eq!(angles[1], PI / 2.0);
    assert_relative_eq!(angles[3], 3.0 * PI / 2.0);
}

#[test]
fn test_placed_profiles_follow_rotation() {
    let spun = Spun::new(DVec3::Z * 2.0, DVec3::X, vec![offset_square(1.0, 2.0); 4])
        .unwrap()
        .with_origin(DVec3::new(0.0, 0.0, 1.0));
    let placed = spun.placed_profiles();
    let p = placed[1].polygon3d()[0];
    assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
    assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);
    assert_relative_eq!(p.z, 1.0, epsilon = 1e-12);
}

#[test]
fn test_spun_rejects_bad_orientation() {
    let profiles = vec![offset_square(1.0, 2.0); 4];
    assert!(matches!(
        Spun::new(DVec3::Z, DVec3::new(1.0, 0.0, 0.1), profiles.clone()),
        Err(SolidError::Orientation { .. })
    ));
    assert!(matches!(
        Spun::new(DVec3::ZERO, DVec3::X, profiles.clone()),
        Err(SolidError::Orientation { .. })
    ));
    assert!(matches!(
        Spun::new(DVec3::Z, DVec3::ZERO, profiles),
        Err(SolidError::Orientation { .. })
    ));
}

#[test]
fn test_spun_rejects_bad_profiles() {
    let err = Spun::new(DVec3::Z, DVec3::X, vec![offset_square(1.0, 2.0)]).unwrap_err();
    assert_eq!(err, SolidError::InsufficientSlices { count: 1 });

    let triangle = poly(&[(1.0, 0.0), (2.0, 0.0), (1.0, 1.0)]);
    let err = Spun::new(DVec3::Z, DVec3::X, vec![offset_square(1.0, 2.0), triangle]).unwrap_err();
    assert!(matches!(err, SolidError::Arity { expected: 4, found: 3, index: 1 }));
}

#[test]
fn test_spun_rejects_bad_sweep() {
    let spun = Spun::new(DVec3::Z, DVec3::X, vec![offset_square(1.0, 2.0); 4]).unwrap();
    let err = spun
        .with_options(SpunOptions {
            seam: SeamPolicy::Open,
            sweep: 0.0,
        })
        .unwrap_err();
    assert!(matches!(err, SolidError::Orientation { .. }));
}
