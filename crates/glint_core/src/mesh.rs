//! Triangle mesh data loaded from model files.
//!
//! A `Mesh` is plain geometry: positions, optional normals, triangle
//! indices and bounds. It carries no material or intersection logic, so
//! loaders stay byte-level codecs and the renderer decides how to lift a
//! mesh into intersectable shapes.

use glint_math::{Aabb, Vec3};

/// A triangle mesh: vertex positions, optional normals, triangle indices.
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Vertex positions (one Vec3 per vertex)
    pub positions: Vec<Vec3>,

    /// Vertex normals (optional, same length as positions when present)
    pub normals: Option<Vec<Vec3>>,

    /// Triangle indices (every 3 indices form a triangle)
    pub indices: Vec<u32>,

    /// Material record number from the source file
    pub material_no: u32,

    /// Axis-aligned bounding box over all vertices
    pub bounds: Aabb,
}

impl Mesh {
    /// Create a mesh from positions and indices, optionally with normals.
    ///
    /// Normals are not generated automatically; call `compute_normals`
    /// when the source data lacks them.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>, normals: Option<Vec<Vec3>>) -> Self {
        let bounds = Self::compute_bounds(&positions);
        Self {
            positions,
            normals,
            indices,
            material_no: 0,
            bounds,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Compute the axis-aligned bounding box from positions.
    fn compute_bounds(positions: &[Vec3]) -> Aabb {
        let mut bounds = Aabb::empty();
        for pos in positions {
            bounds.grow(*pos);
        }
        bounds
    }

    /// Compute smooth vertex normals by averaging face normals.
    ///
    /// Replaces any existing normals. Accumulation is area weighted since
    /// the cross products are left unnormalized until the final pass.
    pub fn compute_normals(&mut self) {
        let vertex_count = self.positions.len();
        let mut normals = vec![Vec3::ZERO; vertex_count];

        for face in self.indices.chunks_exact(3) {
            let i0 = face[0] as usize;
            let i1 = face[1] as usize;
            let i2 = face[2] as usize;

            if i0 >= vertex_count || i1 >= vertex_count || i2 >= vertex_count {
                log::warn!("face indices {:?} out of range, skipped", face);
                continue;
            }

            let edge1 = self.positions[i1] - self.positions[i0];
            let edge2 = self.positions[i2] - self.positions[i0];
            let face_normal = edge1.cross(edge2);

            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }

        for normal in &mut normals {
            *normal = normal.normalize_or_zero();
        }

        self.normals = Some(normals);
    }
}
