//! Intersection records.
//!
//! A [`Hit`] is deliberately cheap: the geometry kernel only records the
//! ray parameter, the shape that was struck and whatever per-shape data
//! the normal computation will need later. The world-space point and the
//! normal are resolved once, via [`Hit::resolve`], and only for the hit
//! that actually wins. Shadow and coverage queries never pay for them.

use glint_math::{Ray, Vec3};

use crate::shape::Shape;

/// Shape-specific data stashed at intersection time for the later
/// normal lookup.
pub enum HitAux<'a> {
    /// Nothing to remember (spheres, planes).
    None,
    /// Index of the struck axis-aligned face.
    Face(u8),
    /// Barycentric coordinates of the struck triangle point.
    Barycentric { u: f64, v: f64 },
    /// The winning child hit of a composite shape.
    Nested(Box<Hit<'a>>),
}

/// A single ray-shape intersection, not yet resolved to a surface point.
pub struct Hit<'a> {
    /// Ray parameter of the intersection.
    pub t: f64,
    /// The shape that reported the hit.
    pub shape: &'a dyn Shape,
    /// Data the shape stashed for its normal computation.
    pub aux: HitAux<'a>,
}

/// A resolved hit: world-space position and outward geometric normal.
#[derive(Debug, Clone, Copy)]
pub struct SurfacePoint {
    pub t: f64,
    pub point: Vec3,
    pub normal: Vec3,
}

impl<'a> Hit<'a> {
    /// Hit with no auxiliary data.
    pub fn new(t: f64, shape: &'a dyn Shape) -> Self {
        Self {
            t,
            shape,
            aux: HitAux::None,
        }
    }

    /// Hit carrying shape-specific auxiliary data.
    pub fn with_aux(t: f64, shape: &'a dyn Shape, aux: HitAux<'a>) -> Self {
        Self { t, shape, aux }
    }

    /// Compute the world-space point and outward normal for this hit.
    pub fn resolve(&self, ray: &Ray) -> SurfacePoint {
        let point = ray.at(self.t);
        SurfacePoint {
            t: self.t,
            point,
            normal: self.shape.normal(self, point),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sphere::Sphere;
    use glint_core::Surface;

    #[test]
    fn test_resolve_point_and_normal() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, Surface::default());
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));

        let hit = sphere.intersect(&ray).unwrap();
        let sp = hit.resolve(&ray);

        assert!((sp.t - 4.0).abs() < 1e-9);
        assert!((sp.point - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-9);
        assert!((sp.normal - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-9);
    }

    #[test]
    fn test_aux_defaults_to_none() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, Surface::default());
        let hit = Hit::new(1.0, &sphere);
        assert!(matches!(hit.aux, HitAux::None));
    }
}
