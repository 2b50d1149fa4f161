//! Triangle-set shapes built from loaded meshes.

use std::path::Path;

use glint_core::{load_g3dm, LoadResult, Medium, Mesh, Surface};
use glint_math::{Aabb, Ray, Vec3, THRESHOLD};

use crate::hit::{Hit, HitAux};
use crate::shape::Shape;
use crate::triangle::Triangle;

/// A bag of triangles from one mesh, pre-rejected through its bounding
/// box before any per-triangle work.
pub struct TriangleSet {
    triangles: Vec<Triangle>,
    bounds: Aabb,
    surface: Surface,
    medium: Medium,
}

impl TriangleSet {
    /// Build from a mesh, skipping degenerate or out-of-range faces.
    ///
    /// Vertex normals are interpolated when the mesh carries a full set,
    /// otherwise every face shades flat.
    pub fn from_mesh(mesh: &Mesh, surface: Surface) -> Self {
        let positions = &mesh.positions;
        let normals = mesh
            .normals
            .as_ref()
            .filter(|ns| ns.len() == positions.len());

        let mut triangles = Vec::with_capacity(mesh.triangle_count());
        let mut skipped = 0usize;

        for face in mesh.indices.chunks_exact(3) {
            let (i0, i1, i2) = (face[0] as usize, face[1] as usize, face[2] as usize);
            if i0 >= positions.len() || i1 >= positions.len() || i2 >= positions.len() {
                skipped += 1;
                continue;
            }
            let (p0, p1, p2) = (positions[i0], positions[i1], positions[i2]);
            if (p1 - p0).cross(p2 - p0).length_squared() <= THRESHOLD {
                skipped += 1;
                continue;
            }
            triangles.push(match normals {
                Some(ns) => Triangle::with_normals(p0, p1, p2, [ns[i0], ns[i1], ns[i2]], surface),
                None => Triangle::new(p0, p1, p2, surface),
            });
        }

        if skipped > 0 {
            log::warn!("skipped {skipped} degenerate or out-of-range triangles");
        }

        Self {
            triangles,
            bounds: mesh.bounds,
            surface,
            medium: Medium::AIR,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

impl Shape for TriangleSet {
    fn intersect<'a>(&'a self, ray: &Ray) -> Option<Hit<'a>> {
        if !self.bounds.hit(ray, THRESHOLD, f64::INFINITY) {
            return None;
        }
        let mut best: Option<Hit> = None;
        for triangle in &self.triangles {
            if let Some(hit) = triangle.intersect(ray) {
                if best.as_ref().map_or(true, |b| hit.t < b.t) {
                    best = Some(hit);
                }
            }
        }
        let inner = best?;
        Some(Hit::with_aux(inner.t, self, HitAux::Nested(Box::new(inner))))
    }

    fn all_intersections<'a>(&'a self, ray: &Ray, out: &mut Vec<Hit<'a>>) {
        if !self.bounds.hit(ray, THRESHOLD, f64::INFINITY) {
            return;
        }
        let start = out.len();
        for triangle in &self.triangles {
            if let Some(hit) = triangle.intersect(ray) {
                out.push(Hit::with_aux(
                    hit.t,
                    self as &dyn Shape,
                    HitAux::Nested(Box::new(hit)),
                ));
            }
        }
        out[start..].sort_by(|x, y| x.t.total_cmp(&y.t));
    }

    fn normal(&self, hit: &Hit, point: Vec3) -> Vec3 {
        match &hit.aux {
            HitAux::Nested(inner) => inner.shape.normal(inner, point),
            _ => Vec3::ZERO,
        }
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn medium(&self) -> &Medium {
        &self.medium
    }
}

/// A whole model file: one triangle set per mesh, shaded with a single
/// material.
pub struct Model {
    sets: Vec<TriangleSet>,
    surface: Surface,
    medium: Medium,
}

impl Model {
    /// Load every mesh of a model file into one shape.
    pub fn load<P: AsRef<Path>>(path: P, surface: Surface) -> LoadResult<Self> {
        let meshes = load_g3dm(path)?;
        Ok(Self::from_meshes(&meshes, surface))
    }

    pub fn from_meshes(meshes: &[Mesh], surface: Surface) -> Self {
        let sets = meshes
            .iter()
            .map(|mesh| TriangleSet::from_mesh(mesh, surface))
            .collect();
        Self {
            sets,
            surface,
            medium: Medium::AIR,
        }
    }

    /// Interior medium used once refraction enters the model.
    pub fn with_medium(mut self, medium: Medium) -> Self {
        self.medium = medium;
        self
    }

    pub fn triangle_count(&self) -> usize {
        self.sets.iter().map(TriangleSet::triangle_count).sum()
    }
}

impl Shape for Model {
    fn intersect<'a>(&'a self, ray: &Ray) -> Option<Hit<'a>> {
        let mut best: Option<Hit> = None;
        for set in &self.sets {
            if let Some(hit) = set.intersect(ray) {
                if best.as_ref().map_or(true, |b| hit.t < b.t) {
                    best = Some(hit);
                }
            }
        }
        let inner = best?;
        Some(Hit::with_aux(inner.t, self, HitAux::Nested(Box::new(inner))))
    }

    fn all_intersections<'a>(&'a self, ray: &Ray, out: &mut Vec<Hit<'a>>) {
        let start = out.len();
        for set in &self.sets {
            let mut hits = Vec::new();
            set.all_intersections(ray, &mut hits);
            out.extend(
                hits.into_iter()
                    .map(|h| Hit::with_aux(h.t, self as &dyn Shape, HitAux::Nested(Box::new(h)))),
            );
        }
        out[start..].sort_by(|x, y| x.t.total_cmp(&y.t));
    }

    fn normal(&self, hit: &Hit, point: Vec3) -> Vec3 {
        match &hit.aux {
            HitAux::Nested(inner) => inner.shape.normal(inner, point),
            _ => Vec3::ZERO,
        }
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn medium(&self) -> &Medium {
        &self.medium
    }
}
