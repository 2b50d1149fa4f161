//! The shape trait every primitive and composite implements.

use glint_core::{Medium, Surface};
use glint_math::{Ray, Vec3};

use crate::hit::Hit;

/// A renderable shape.
///
/// Implementations report intersections lazily: a [`Hit`] carries only
/// the ray parameter and whatever the shape needs to answer
/// [`Shape::normal`] later. All `t` values at or below
/// [`glint_math::THRESHOLD`] are rejected so rays never re-hit the
/// surface they just left.
pub trait Shape: Send + Sync {
    /// Nearest intersection ahead of the ray origin, if any.
    fn intersect<'a>(&'a self, ray: &Ray) -> Option<Hit<'a>>;

    /// Append every boundary crossing ahead of the ray origin,
    /// ascending in `t`.
    ///
    /// The default forwards the nearest hit, which is the full answer
    /// for thin shapes with a single crossing.
    fn all_intersections<'a>(&'a self, ray: &Ray, out: &mut Vec<Hit<'a>>) {
        if let Some(hit) = self.intersect(ray) {
            out.push(hit);
        }
    }

    /// Outward geometric normal for a hit resolved at `point`.
    fn normal(&self, hit: &Hit, point: Vec3) -> Vec3;

    /// Point-in-solid test. Thin shapes answer `false`.
    fn is_inside(&self, _point: Vec3) -> bool {
        false
    }

    /// Material coefficients used to shade this shape.
    fn surface(&self) -> &Surface;

    /// Interior medium entered when a ray refracts into this shape.
    fn medium(&self) -> &Medium;

    /// True for surfaces shaded with the alternating checkerboard
    /// ambient pattern.
    fn checkered(&self) -> bool {
        false
    }
}
