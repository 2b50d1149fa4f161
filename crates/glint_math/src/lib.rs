// Re-export the double-precision glam types for convenience
pub use glam::{DVec2, DVec3, DVec4};

/// Vector type used throughout the tracer.
pub type Vec3 = DVec3;

/// Shared epsilon for intersection distances, parallel-ray rejection and
/// negligible-coefficient tests.
pub const THRESHOLD: f64 = 1.0e-7;

mod aabb;
mod camera;
mod ray;

pub use aabb::Aabb;
pub use camera::Camera;
pub use ray::Ray;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a.dot(b), 32.0);
    }
}
