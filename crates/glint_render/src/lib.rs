//! Recursive Whitted ray tracer.
//!
//! This crate provides:
//! - **Geometry kernel**: analytic primitives (`Sphere`, `Plane`, `Cuboid`,
//!   `Triangle`), boolean composites (`Csg`) and mesh shapes
//!   (`TriangleSet`, `Model`) behind the [`Shape`] trait
//! - **Lights**: directional and point sources behind the [`Light`] trait
//! - **Scene**: shape and light container with nearest-hit, any-hit and
//!   all-crossings ray queries
//! - **Shading**: recursive [`trace`] with Phong lighting, hard and
//!   transmissive shadows, reflection, refraction and Beer-Lambert decay
//! - **Scheduler**: row-claiming worker pool writing into a shared
//!   [`glint_core::FrameBuffer`], with cooperative cancellation

pub mod csg;
pub mod cuboid;
pub mod hit;
pub mod light;
pub mod model;
pub mod plane;
pub mod render;
pub mod scene;
pub mod shade;
pub mod shape;
pub mod sphere;
pub mod triangle;

pub use csg::{Csg, CsgOp};
pub use cuboid::Cuboid;
pub use hit::{Hit, HitAux, SurfacePoint};
pub use light::{DirectionalLight, Light, LightSample, PointLight};
pub use model::{Model, TriangleSet};
pub use plane::Plane;
pub use render::{
    default_workers, render, render_with_workers, RenderControl, RenderSession, RenderStats,
};
pub use scene::Scene;
pub use shade::trace;
pub use shape::Shape;
pub use sphere::Sphere;
pub use triangle::Triangle;
