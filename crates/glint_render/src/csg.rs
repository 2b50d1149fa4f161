//! Constructive solid geometry over two child shapes.

use glint_core::{Medium, Surface};
use glint_math::{Ray, Vec3};

use crate::hit::{Hit, HitAux};
use crate::shape::Shape;

/// Boolean operation combining the two children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsgOp {
    Union,
    Intersection,
    Difference,
}

/// A boolean composite of two solids.
///
/// The composite owns its look: hits are reported with the composite's
/// surface and medium while the winning child only supplies geometry,
/// carried along as a nested hit for the normal lookup.
pub struct Csg {
    op: CsgOp,
    a: Box<dyn Shape>,
    b: Box<dyn Shape>,
    surface: Surface,
    medium: Medium,
}

impl Csg {
    pub fn new(op: CsgOp, a: Box<dyn Shape>, b: Box<dyn Shape>, surface: Surface) -> Self {
        Self {
            op,
            a,
            b,
            surface,
            medium: Medium::AIR,
        }
    }

    /// Interior medium used once refraction enters the composite.
    pub fn with_medium(mut self, medium: Medium) -> Self {
        self.medium = medium;
        self
    }

    /// Child boundary crossings that survive on the composite's surface.
    ///
    /// A crossing of one child counts when the point's membership in the
    /// other child keeps it on the result's boundary: outside the other
    /// child for union and the minuend of difference, inside it for
    /// intersection and the subtrahend.
    fn boundary_crossings<'a>(&'a self, ray: &Ray, out: &mut Vec<Hit<'a>>) {
        let mut from_a = Vec::new();
        let mut from_b = Vec::new();
        self.a.all_intersections(ray, &mut from_a);
        self.b.all_intersections(ray, &mut from_b);

        match self.op {
            CsgOp::Union => {
                out.extend(
                    from_a
                        .into_iter()
                        .filter(|h| !self.b.is_inside(ray.at(h.t))),
                );
                out.extend(
                    from_b
                        .into_iter()
                        .filter(|h| !self.a.is_inside(ray.at(h.t))),
                );
            }
            CsgOp::Intersection => {
                out.extend(
                    from_a
                        .into_iter()
                        .filter(|h| self.b.is_inside(ray.at(h.t))),
                );
                out.extend(
                    from_b
                        .into_iter()
                        .filter(|h| self.a.is_inside(ray.at(h.t))),
                );
            }
            CsgOp::Difference => {
                out.extend(
                    from_a
                        .into_iter()
                        .filter(|h| !self.b.is_inside(ray.at(h.t))),
                );
                out.extend(
                    from_b
                        .into_iter()
                        .filter(|h| self.a.is_inside(ray.at(h.t))),
                );
            }
        }
    }

    fn wrap<'a>(&'a self, inner: Hit<'a>) -> Hit<'a> {
        Hit::with_aux(inner.t, self, HitAux::Nested(Box::new(inner)))
    }
}

impl Shape for Csg {
    fn intersect<'a>(&'a self, ray: &Ray) -> Option<Hit<'a>> {
        match self.op {
            // For a union seen from outside, the nearer child surface is
            // the composite surface.
            CsgOp::Union => {
                let inner = match (self.a.intersect(ray), self.b.intersect(ray)) {
                    (Some(a), Some(b)) => Some(if a.t <= b.t { a } else { b }),
                    (a, b) => a.or(b),
                }?;
                Some(self.wrap(inner))
            }
            CsgOp::Intersection | CsgOp::Difference => {
                let mut crossings = Vec::new();
                self.boundary_crossings(ray, &mut crossings);
                let best = crossings
                    .into_iter()
                    .min_by(|x, y| x.t.total_cmp(&y.t))?;
                Some(self.wrap(best))
            }
        }
    }

    fn all_intersections<'a>(&'a self, ray: &Ray, out: &mut Vec<Hit<'a>>) {
        let mut crossings = Vec::new();
        self.boundary_crossings(ray, &mut crossings);
        crossings.sort_by(|x, y| x.t.total_cmp(&y.t));
        out.extend(crossings.into_iter().map(|h| self.wrap(h)));
    }

    fn normal(&self, hit: &Hit, point: Vec3) -> Vec3 {
        match &hit.aux {
            HitAux::Nested(inner) => inner.shape.normal(inner, point),
            _ => Vec3::ZERO,
        }
    }

    fn is_inside(&self, point: Vec3) -> bool {
        match self.op {
            CsgOp::Union => self.a.is_inside(point) || self.b.is_inside(point),
            CsgOp::Intersection => self.a.is_inside(point) && self.b.is_inside(point),
            CsgOp::Difference => self.a.is_inside(point) && !self.b.is_inside(point),
        }
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn medium(&self) -> &Medium {
        &self.medium
    }
}
