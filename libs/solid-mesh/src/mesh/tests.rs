//! Tests for the indexed mesh and its validation.

use super::*;
use approx::assert_relative_eq;

fn unit_cube() -> Mesh {
    let vertices = vec![
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(1.0, 1.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
        DVec3::new(0.0, 0.0, 1.0),
        DVec3::new(1.0, 0.0, 1.0),
        DVec3::new(1.0, 1.0, 1.0),
        DVec3::new(0.0, 1.0, 1.0),
    ];
    Mesh::from_loops(
        vertices,
        vec![
            vec![0, 3, 2, 1],
            vec![4, 5, 6, 7],
            vec![0, 1, 5, 4],
            vec![2, 3, 7, 6],
            vec![0, 4, 7, 3],
            vec![1, 2, 6, 5],
        ],
    )
}

// =============================================================================
// MEASUREMENT
// =============================================================================

#[test]
fn test_cube_measurements() {
    let cube = unit_cube();
    assert_relative_eq!(cube.volume(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(cube.surface_area(), 6.0, epsilon = 1e-12);
    assert_eq!(cube.bounding_box(), Some((DVec3::ZERO, DVec3::ONE)));
    assert_relative_eq!(cube.face_normal(0).z, -1.0, epsilon = 1e-12);
}

#[test]
fn test_empty_mesh() {
    let mesh = Mesh::new();
    assert!(mesh.is_empty());
    assert_eq!(mesh.bounding_box(), None);
    assert_eq!(mesh.volume(), 0.0);
    assert!(mesh.is_watertight());
}

// =============================================================================
// VALIDATION
// =============================================================================

#[test]
fn test_cube_is_watertight() {
    assert!(unit_cube().validate().is_ok());
    assert!(boundary_edges(&unit_cube()).is_empty());
}

#[test]
fn test_missing_face_reports_boundary_edge() {
    let cube = unit_cube();
    let open = Mesh::from_parts(cube.vertices().to_vec(), cube.faces()[1..].to_vec());
    assert!(matches!(
        open.validate(),
        Err(ValidationError::BoundaryEdge { .. })
    ));
    assert_eq!(boundary_edges(&open).len(), 4);
}

#[test]
fn test_flipped_face_reports_orientation() {
    let cube = unit_cube();
    let mut faces = cube.faces().to_vec();
    faces[2] = faces[2].reversed();
    let bad = Mesh::from_parts(cube.vertices().to_vec(), faces);
    assert!(matches!(
        bad.validate(),
        Err(ValidationError::InconsistentOrientation { .. })
    ));
}

#[test]
fn test_inverted_cube_reports_inverted_volume() {
    let err = unit_cube().inverted().validate().unwrap_err();
    match err {
        ValidationError::InvertedVolume { volume } => assert_relative_eq!(volume, -1.0),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_duplicate_face_is_non_manifold() {
    let mut cube = unit_cube();
    cube.add_face(vec![4, 5, 6, 7]);
    cube.add_face(vec![7, 6, 5, 4]);
    assert!(matches!(
        cube.validate(),
        Err(ValidationError::NonManifoldEdge { count: 4, .. })
    ));
}

#[test]
fn test_check_indices() {
    let mut mesh = unit_cube();
    assert_eq!(mesh.check_indices(), Ok(()));
    mesh.add_face(vec![0, 8, 2]);
    assert_eq!(
        mesh.check_indices(),
        Err(ValidationError::IndexOutOfRange {
            face: 6,
            index: 8,
            count: 8
        })
    );
}

#[test]
fn test_bad_index_and_degenerate_face() {
    let mut mesh = unit_cube();
    mesh.add_face(vec![0, 1, 99]);
    assert!(matches!(
        mesh.validate(),
        Err(ValidationError::IndexOutOfRange { index: 99, .. })
    ));

    let mut mesh = unit_cube();
    mesh.add_face(vec![0, 1, 1]);
    assert!(matches!(
        mesh.validate(),
        Err(ValidationError::DegenerateFace { face: 6 })
    ));
}

// =============================================================================
// DERIVED MESHES
// =============================================================================

#[test]
fn test_triangulated_keeps_volume_and_topology() {
    let tris = unit_cube().triangulated();
    assert!(tris.is_triangulated());
    assert_eq!(tris.face_count(), 12);
    assert_relative_eq!(tris.volume(), 1.0, epsilon = 1e-12);
    assert!(tris.is_watertight());
}

#[test]
fn test_mirror_transform_keeps_outward_faces() {
    let mirrored = unit_cube().scaled(DVec3::new(-2.0, 1.0, 1.0));
    assert_relative_eq!(mirrored.volume(), 2.0, epsilon = 1e-12);
    assert!(mirrored.is_watertight());
}

#[test]
fn test_rotation_and_translation_preserve_volume() {
    let moved = unit_cube()
        .rotated(DVec3::new(1.0, 2.0, 3.0), 0.7)
        .translated(DVec3::new(5.0, -1.0, 2.0));
    assert_relative_eq!(moved.volume(), 1.0, epsilon = 1e-9);
    assert!(moved.is_watertight());
}

#[test]
fn test_from_polygons_welds_shared_corners() {
    let cube = unit_cube();
    let soup: Vec<Vec<DVec3>> = cube
        .polygons()
        .into_iter()
        .map(|poly| poly.into_iter().map(|p| p + DVec3::splat(1e-7)).collect())
        .collect();
    let rebuilt = Mesh::from_polygons(&soup);
    assert_eq!(rebuilt.vertex_count(), 8);
    assert!(rebuilt.is_watertight());
}

#[test]
fn test_merged_disjoint_cubes() {
    let a = unit_cube();
    let b = unit_cube().translated(DVec3::new(3.0, 0.0, 0.0));
    let both = a.merged(&b);
    assert_eq!(both.vertex_count(), 16);
    assert_relative_eq!(both.volume(), 2.0, epsilon = 1e-12);
    assert!(both.is_watertight());
}
