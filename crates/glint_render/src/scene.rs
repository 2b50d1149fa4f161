//! Scene container and ray queries.

use glint_core::Medium;
use glint_math::{Ray, Vec3};

use crate::hit::Hit;
use crate::light::Light;
use crate::shape::Shape;

/// Shapes, lights and the global shading parameters.
///
/// The scene is assembled up front and borrowed immutably for the whole
/// render, so mid-render mutation is ruled out by the borrow checker
/// rather than by convention.
pub struct Scene {
    shapes: Vec<Box<dyn Shape>>,
    lights: Vec<Box<dyn Light>>,
    /// Ambient light color.
    pub ambient: Vec3,
    /// Color returned for rays that leave the scene.
    pub background: Vec3,
    /// Fog color, kept for scene descriptions that set it.
    pub fog: Vec3,
    /// Recursion depth at which tracing gives up.
    pub max_depth: u32,
    /// Contribution below which refraction recursion is cut off.
    pub color_threshold: f64,
    /// Medium surrounding the scene.
    pub air: Medium,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            shapes: Vec::new(),
            lights: Vec::new(),
            ambient: Vec3::splat(0.1),
            background: Vec3::new(0.30, 0.47, 0.80),
            fog: Vec3::ZERO,
            max_depth: 4,
            color_threshold: 1.0e-4,
            air: Medium::AIR,
        }
    }

    pub fn add_shape(&mut self, shape: Box<dyn Shape>) -> &mut Self {
        self.shapes.push(shape);
        self
    }

    pub fn add_light(&mut self, light: Box<dyn Light>) -> &mut Self {
        self.lights.push(light);
        self
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
        self.lights.clear();
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn lights(&self) -> &[Box<dyn Light>] {
        &self.lights
    }

    /// Nearest hit across every shape.
    pub fn intersect(&self, ray: &Ray) -> Option<Hit<'_>> {
        let mut best: Option<Hit> = None;
        for shape in &self.shapes {
            if let Some(hit) = shape.intersect(ray) {
                if best.as_ref().map_or(true, |b| hit.t < b.t) {
                    best = Some(hit);
                }
            }
        }
        best
    }

    /// First hit in shape insertion order, not necessarily the nearest.
    ///
    /// Occlusion tests only ask whether anything blocks the ray, so this
    /// stops at the first shape that answers. A farther shape earlier in
    /// the list can win over a nearer one later in it.
    pub fn first_intersect(&self, ray: &Ray) -> Option<Hit<'_>> {
        self.shapes.iter().find_map(|shape| shape.intersect(ray))
    }

    /// Every boundary crossing of every shape; ordering across shapes is
    /// not guaranteed.
    pub fn all_intersections<'a>(&'a self, ray: &Ray, out: &mut Vec<Hit<'a>>) {
        for shape in &self.shapes {
            shape.all_intersections(ray, out);
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
