//! Sphere primitive.

use glint_core::{Medium, Surface};
use glint_math::{Ray, Vec3, THRESHOLD};

use crate::hit::Hit;
use crate::shape::Shape;

/// A sphere given by center and radius.
pub struct Sphere {
    center: Vec3,
    radius: f64,
    radius2: f64,
    surface: Surface,
    medium: Medium,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f64, surface: Surface) -> Self {
        Self {
            center,
            radius,
            radius2: radius * radius,
            surface,
            medium: Medium::AIR,
        }
    }

    /// Interior medium used once refraction enters the sphere.
    pub fn with_medium(mut self, medium: Medium) -> Self {
        self.medium = medium;
        self
    }
}

impl Shape for Sphere {
    fn intersect<'a>(&'a self, ray: &Ray) -> Option<Hit<'a>> {
        // A degenerate direction never reaches the surface, even from
        // inside.
        if ray.direction == Vec3::ZERO {
            return None;
        }

        // Distance from the center to its projection on the ray, and the
        // squared half-chord at that closest approach.
        let oc = self.center - ray.origin;
        let oc2 = oc.length_squared();
        let ok = oc.dot(ray.direction);
        let half2 = self.radius2 - (oc2 - ok * ok);

        if oc2 < self.radius2 {
            // Origin inside: the exit crossing is the only one ahead.
            let t = ok + half2.sqrt();
            return (t > THRESHOLD).then(|| Hit::new(t, self));
        }
        if ok < 0.0 || half2 < 0.0 {
            return None;
        }
        let t = ok - half2.sqrt();
        (t > THRESHOLD).then(|| Hit::new(t, self))
    }

    fn all_intersections<'a>(&'a self, ray: &Ray, out: &mut Vec<Hit<'a>>) {
        if ray.direction == Vec3::ZERO {
            return;
        }
        let oc = self.center - ray.origin;
        let ok = oc.dot(ray.direction);
        let half2 = self.radius2 - (oc.length_squared() - ok * ok);
        if half2 < THRESHOLD {
            return;
        }
        let half = half2.sqrt();
        let t_enter = ok - half;
        let t_leave = ok + half;
        if t_enter > THRESHOLD {
            out.push(Hit::new(t_enter, self));
        }
        if t_leave > THRESHOLD {
            out.push(Hit::new(t_leave, self));
        }
    }

    fn normal(&self, _hit: &Hit, point: Vec3) -> Vec3 {
        (point - self.center) / self.radius
    }

    fn is_inside(&self, point: Vec3) -> bool {
        (point - self.center).length_squared() - self.radius2 <= THRESHOLD
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn medium(&self) -> &Medium {
        &self.medium
    }
}
