//! Core data types and codecs for the glint ray tracer.
//!
//! This crate provides:
//!
//! - **Material data**: `Coef` coefficient triples, `Surface`, `Medium`
//! - **Mesh geometry**: `Mesh` plus the G3DM binary model codec
//! - **Frame buffer**: thread-safe `FrameBuffer` with TGA and PNG output
//!
//! Shapes, lights and the tracer itself live in `glint_render`; this crate
//! stays free of intersection logic so codecs and materials can be reused
//! without pulling in the renderer.

pub mod frame;
pub mod g3dm;
pub mod medium;
pub mod mesh;
pub mod surface;
pub mod tga;

// Re-export commonly used types
pub use frame::{pack_color, FrameBuffer};
pub use g3dm::{load_g3dm, parse_g3dm, LoadError, LoadResult};
pub use medium::Medium;
pub use mesh::Mesh;
pub use surface::{Coef, Surface};
