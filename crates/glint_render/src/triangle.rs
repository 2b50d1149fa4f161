//! Triangle primitive with a precomputed barycentric basis.

use glint_core::{Medium, Surface};
use glint_math::{Ray, Vec3, THRESHOLD};

use crate::hit::{Hit, HitAux};
use crate::shape::Shape;

/// A triangle reduced at build time to its plane and an affine basis
/// that maps plane points straight to barycentric `(u, v)`.
///
/// `u` weights the second vertex and `v` the third; the first carries
/// `1 - u - v`. A degenerate triangle gets a zero plane normal and can
/// never be hit.
pub struct Triangle {
    normal: Vec3,
    d: f64,
    u1: Vec3,
    u0: f64,
    v1: Vec3,
    v0: f64,
    vertex_normals: Option<[Vec3; 3]>,
    surface: Surface,
    medium: Medium,
}

impl Triangle {
    /// Flat-shaded triangle using the plane normal everywhere.
    pub fn new(p0: Vec3, p1: Vec3, p2: Vec3, surface: Surface) -> Self {
        Self::build(p0, p1, p2, None, surface)
    }

    /// Smooth-shaded triangle interpolating per-vertex normals.
    pub fn with_normals(
        p0: Vec3,
        p1: Vec3,
        p2: Vec3,
        normals: [Vec3; 3],
        surface: Surface,
    ) -> Self {
        Self::build(p0, p1, p2, Some(normals), surface)
    }

    fn build(
        p0: Vec3,
        p1: Vec3,
        p2: Vec3,
        vertex_normals: Option<[Vec3; 3]>,
        surface: Surface,
    ) -> Self {
        let s1 = p1 - p0;
        let s2 = p2 - p0;
        let normal = s1.cross(s2).normalize_or_zero();

        let s11 = s1.length_squared();
        let s22 = s2.length_squared();
        let s12 = s1.dot(s2);
        let denom = s11 * s22 - s12 * s12;
        let u1 = (s1 * s22 - s2 * s12) / denom;
        let v1 = (s2 * s11 - s1 * s12) / denom;

        Self {
            normal,
            d: normal.dot(p0),
            u1,
            u0: p0.dot(u1),
            v1,
            v0: p0.dot(v1),
            vertex_normals,
            surface,
            medium: Medium::AIR,
        }
    }
}

impl Shape for Triangle {
    fn intersect<'a>(&'a self, ray: &Ray) -> Option<Hit<'a>> {
        let nd = self.normal.dot(ray.direction);
        if nd.abs() <= THRESHOLD {
            return None;
        }
        let t = (self.d - self.normal.dot(ray.origin)) / nd;
        if t <= THRESHOLD {
            return None;
        }

        let p = ray.at(t);
        let u = p.dot(self.u1) - self.u0;
        let v = p.dot(self.v1) - self.v0;
        if u >= 0.0 && v >= 0.0 && u + v <= 1.0 {
            Some(Hit::with_aux(t, self, HitAux::Barycentric { u, v }))
        } else {
            None
        }
    }

    fn normal(&self, hit: &Hit, _point: Vec3) -> Vec3 {
        match (&hit.aux, &self.vertex_normals) {
            (HitAux::Barycentric { u, v }, Some([n0, n1, n2])) => {
                let (u, v) = (*u, *v);
                (*n0 * (1.0 - u - v) + *n1 * u + *n2 * v).normalize_or_zero()
            }
            _ => self.normal,
        }
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn medium(&self) -> &Medium {
        &self.medium
    }
}
