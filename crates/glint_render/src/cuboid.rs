//! Axis-aligned box primitive.

use glint_core::{Medium, Surface};
use glint_math::{Ray, Vec3, THRESHOLD};

use crate::hit::{Hit, HitAux};
use crate::shape::Shape;

/// Outward normals indexed by face: -X, +X, -Y, +Y, -Z, +Z.
const FACE_NORMALS: [Vec3; 6] = [
    Vec3::NEG_X,
    Vec3::X,
    Vec3::NEG_Y,
    Vec3::Y,
    Vec3::NEG_Z,
    Vec3::Z,
];

/// An axis-aligned box given by two opposite corners.
pub struct Cuboid {
    min: Vec3,
    max: Vec3,
    surface: Surface,
    medium: Medium,
}

impl Cuboid {
    /// Corners may come in any order; they are normalized per axis.
    pub fn new(a: Vec3, b: Vec3, surface: Surface) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
            surface,
            medium: Medium::AIR,
        }
    }

    /// Interior medium used once refraction enters the box.
    pub fn with_medium(mut self, medium: Medium) -> Self {
        self.medium = medium;
        self
    }

    /// Slab walk returning entry and exit parameters with the face
    /// struck at each, or `None` when the ray misses entirely.
    ///
    /// Face index is `axis * 2` for the min face, `axis * 2 + 1` for max.
    fn slab_crossings(&self, ray: &Ray) -> Option<(f64, u8, f64, u8)> {
        // A degenerate direction leaves every slab interval unbounded
        // and would report an infinite exit from inside.
        if ray.direction == Vec3::ZERO {
            return None;
        }

        let mut t_near = f64::NEG_INFINITY;
        let mut t_far = f64::INFINITY;
        let mut near_face = 0u8;
        let mut far_face = 0u8;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            let lo = self.min[axis];
            let hi = self.max[axis];

            if dir.abs() <= THRESHOLD {
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let t_lo = (lo - origin) * inv;
            let t_hi = (hi - origin) * inv;
            let (t_enter, enter_face, t_exit, exit_face) = if inv > 0.0 {
                (t_lo, (axis * 2) as u8, t_hi, (axis * 2 + 1) as u8)
            } else {
                (t_hi, (axis * 2 + 1) as u8, t_lo, (axis * 2) as u8)
            };

            if t_enter > t_near {
                t_near = t_enter;
                near_face = enter_face;
            }
            if t_exit < t_far {
                t_far = t_exit;
                far_face = exit_face;
            }
        }

        if t_near > t_far || t_far <= THRESHOLD {
            return None;
        }
        Some((t_near, near_face, t_far, far_face))
    }
}

impl Shape for Cuboid {
    fn intersect<'a>(&'a self, ray: &Ray) -> Option<Hit<'a>> {
        let (t_near, near_face, t_far, far_face) = self.slab_crossings(ray)?;
        if t_near > THRESHOLD {
            Some(Hit::with_aux(t_near, self, HitAux::Face(near_face)))
        } else {
            // Origin inside: the first boundary ahead is the exit face.
            Some(Hit::with_aux(t_far, self, HitAux::Face(far_face)))
        }
    }

    fn all_intersections<'a>(&'a self, ray: &Ray, out: &mut Vec<Hit<'a>>) {
        if let Some((t_near, near_face, t_far, far_face)) = self.slab_crossings(ray) {
            if t_near > THRESHOLD {
                out.push(Hit::with_aux(t_near, self, HitAux::Face(near_face)));
            }
            if t_far > THRESHOLD {
                out.push(Hit::with_aux(t_far, self, HitAux::Face(far_face)));
            }
        }
    }

    fn normal(&self, hit: &Hit, _point: Vec3) -> Vec3 {
        match &hit.aux {
            HitAux::Face(face) => FACE_NORMALS[*face as usize],
            _ => Vec3::ZERO,
        }
    }

    fn is_inside(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn medium(&self) -> &Medium {
        &self.medium
    }
}
