//! Axis-aligned bounding box.

use crate::{Ray, Vec3};

/// An axis-aligned box kept as per-axis min/max corners.
///
/// Used as a cheap pre-reject test in front of triangle sets; the slab
/// test here only answers yes/no, it does not report hit distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// An empty box that any `grow` call will snap to a point.
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f64::INFINITY),
            max: Vec3::splat(f64::NEG_INFINITY),
        }
    }

    /// Build from two corners that are already ordered per axis.
    pub fn from_points(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Expand to cover a point.
    pub fn grow(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Slab test: does the ray cross the box anywhere in [t_min, t_max]?
    pub fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> bool {
        let mut t0 = t_min;
        let mut t1 = t_max;
        for axis in 0..3 {
            let inv = 1.0 / ray.direction[axis];
            let mut near = (self.min[axis] - ray.origin[axis]) * inv;
            let mut far = (self.max[axis] - ray.origin[axis]) * inv;
            if inv < 0.0 {
                std::mem::swap(&mut near, &mut far);
            }
            t0 = t0.max(near);
            t1 = t1.min(far);
            if t1 < t0 {
                return false;
            }
        }
        true
    }
}
