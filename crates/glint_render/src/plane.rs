//! Infinite plane primitive.

use glint_core::{Medium, Surface};
use glint_math::{Ray, Vec3, THRESHOLD};

use crate::hit::Hit;
use crate::shape::Shape;

/// A plane stored as unit normal and offset, `normal . P = d`.
pub struct Plane {
    normal: Vec3,
    d: f64,
    checkered: bool,
    surface: Surface,
    medium: Medium,
}

impl Plane {
    /// Plane through `point` with the given (not necessarily unit) normal.
    pub fn new(point: Vec3, normal: Vec3, surface: Surface) -> Self {
        let normal = normal.normalize();
        Self {
            normal,
            d: normal.dot(point),
            checkered: false,
            surface,
            medium: Medium::AIR,
        }
    }

    /// Plane through three points.
    pub fn from_points(p0: Vec3, p1: Vec3, p2: Vec3, surface: Surface) -> Self {
        let normal = (p2 - p0).cross(p1 - p0);
        Self::new(p0, normal, surface)
    }

    /// Shade with the alternating checkerboard ambient pattern.
    pub fn checkerboard(mut self) -> Self {
        self.checkered = true;
        self
    }
}

impl Shape for Plane {
    fn intersect<'a>(&'a self, ray: &Ray) -> Option<Hit<'a>> {
        let nd = self.normal.dot(ray.direction);
        if nd.abs() <= THRESHOLD {
            return None;
        }
        let t = (self.d - self.normal.dot(ray.origin)) / nd;
        (t > THRESHOLD).then(|| Hit::new(t, self))
    }

    fn normal(&self, _hit: &Hit, _point: Vec3) -> Vec3 {
        self.normal
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn medium(&self) -> &Medium {
        &self.medium
    }

    fn checkered(&self) -> bool {
        self.checkered
    }
}
