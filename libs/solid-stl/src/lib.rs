//! # Solid STL
//!
//! STL import and export for [`Mesh`].
//!
//! Mesh coordinates are millimetres; the [`LengthUnit`] argument names the
//! unit used inside the file.
//!
//! ```rust
//! use std::io::Cursor;
//! use glam::DVec3;
//! use solid_mesh::builders::cuboid;
//! use solid_stl::{read_stl, write_stl, LengthUnit};
//!
//! let cube = cuboid(DVec3::ZERO, DVec3::splat(10.0)).unwrap();
//! let mut buf = Cursor::new(Vec::new());
//! write_stl(&cube, &mut buf, LengthUnit::Centimetre).unwrap();
//!
//! buf.set_position(0);
//! let back = read_stl(&mut buf, LengthUnit::Centimetre).unwrap();
//! assert!((back.volume() - 1000.0).abs() < 1e-3);
//! ```

use std::io::{Read, Seek, Write};

use glam::DVec3;
use solid_mesh::Mesh;
use stl_io::{Normal, Triangle, Vertex};
use tracing::debug;

mod error;
mod units;


pub use error::StlError;
pub use units::LengthUnit;

/// Result alias for STL operations.
pub type StlResult<T> = Result<T, StlError>;

/// Triangles of `mesh` in file units.
fn file_triangles(mesh: &Mesh, unit: LengthUnit) -> StlResult<Vec<Triangle>> {
    let scale = LengthUnit::Millimetre.factor_to(unit);
    let mesh = mesh.triangulated();
    if u32::try_from(mesh.face_count()).is_err() {
        return Err(StlError::invalid_mesh(format!(
            "{} triangles exceed the STL limit",
            mesh.face_count()
        )));
    }

    let to_file = |p: DVec3| -> StlResult<[f32; 3]> {
        let p = (p * scale).as_vec3();
        if !p.is_finite() {
            return Err(StlError::invalid_mesh("non-finite vertex"));
        }
        Ok(p.to_array())
    };

    (0..mesh.face_count())
        .map(|i| {
            let points = mesh.face_points(i);
            let normal = mesh.face_normal(i).as_vec3().to_array();
            Ok(Triangle {
                normal: Normal::new(normal),
                vertices: [
                    Vertex::new(to_file(points[0])?),
                    Vertex::new(to_file(points[1])?),
                    Vertex::new(to_file(points[2])?),
                ],
            })
        })
        .collect()
}

/// Writes `mesh` as binary STL.
pub fn write_stl<W: Write>(mesh: &Mesh, writer: &mut W, unit: LengthUnit) -> StlResult<()> {
    let triangles = file_triangles(mesh, unit)?;
    stl_io::write_stl(writer, triangles.iter())?;
    debug!(triangles = triangles.len(), %unit, "Wrote binary STL");
    Ok(())
}

/// Writes `mesh` as ASCII STL.
pub fn write_ascii_stl<W: Write>(mesh: &Mesh, writer: &mut W, unit: LengthUnit) -> StlResult<()> {
    let triangles = file_triangles(mesh, unit)?;
    writeln!(writer, "solid mesh")?;
    for tri in &triangles {
        let n = &tri.normal;
        writeln!(writer, "  facet normal {} {} {}", n[0], n[1], n[2])?;
        writeln!(writer, "    outer loop")?;
        for v in &tri.vertices {
            writeln!(writer, "      vertex {} {} {}", v[0], v[1], v[2])?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }
    writeln!(writer, "endsolid mesh")?;
    debug!(triangles = triangles.len(), %unit, "Wrote ASCII STL");
    Ok(())
}

/// Reads binary or ASCII STL into an indexed mesh.
///
/// Identical file vertices are shared; triangles that collapse onto a
/// repeated vertex are dropped. The result is not validated.
pub fn read_stl<R: Read + Seek>(reader: &mut R, unit: LengthUnit) -> StlResult<Mesh> {
    let indexed = stl_io::read_stl(reader).map_err(|e| StlError::Parse(e.to_string()))?;
    let scale = unit.factor_to(LengthUnit::Millimetre);

    let vertices = indexed
        .vertices
        .iter()
        .map(|v| DVec3::new(v[0] as f64, v[1] as f64, v[2] as f64) * scale)
        .collect();
    let loops: Vec<Vec<usize>> = indexed
        .faces
        .iter()
        .map(|f| f.vertices)
        .filter(|[a, b, c]| a != b && b != c && c != a)
        .map(|tri| tri.to_vec())
        .collect();
    let dropped = indexed.faces.len() - loops.len();

    let mesh = Mesh::from_loops(vertices, loops);
    debug!(
        triangles = mesh.face_count(),
        vertices = mesh.vertex_count(),
        dropped,
        %unit,
        "Read STL"
    );
    Ok(mesh)
}

/// Reads STL and checks that it describes a closed solid.
pub fn read_closed_stl<R: Read + Seek>(reader: &mut R, unit: LengthUnit) -> StlResult<Mesh> {
    let mesh = read_stl(reader, unit)?;
    mesh.validate()?;
    Ok(mesh)
}
