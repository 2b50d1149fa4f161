//! Light sources.

use glint_math::{Vec3, THRESHOLD};

/// Illumination answer for one shaded point: unit direction to the
/// light, distance to it, light color and an intensity scalar already
/// folded with falloff.
#[derive(Debug, Clone, Copy)]
pub struct LightSample {
    pub to_light: Vec3,
    pub dist: f64,
    pub color: Vec3,
    pub intensity: f64,
}

/// A light source queried per shaded point.
pub trait Light: Send + Sync {
    fn sample(&self, point: Vec3) -> LightSample;
}

/// Parallel rays from infinitely far away, no falloff.
pub struct DirectionalLight {
    to_light: Vec3,
    color: Vec3,
}

impl DirectionalLight {
    /// `direction` is the direction the light travels.
    pub fn new(direction: Vec3, color: Vec3) -> Self {
        Self {
            to_light: -direction.normalize(),
            color,
        }
    }
}

impl Light for DirectionalLight {
    fn sample(&self, _point: Vec3) -> LightSample {
        LightSample {
            to_light: self.to_light,
            dist: 1.0e6,
            color: self.color,
            intensity: 1.0,
        }
    }
}

/// Point source with inverse-distance falloff.
pub struct PointLight {
    position: Vec3,
    color: Vec3,
    power: f64,
}

impl PointLight {
    pub fn new(position: Vec3, color: Vec3, power: f64) -> Self {
        Self {
            position,
            color,
            power,
        }
    }
}

impl Light for PointLight {
    fn sample(&self, point: Vec3) -> LightSample {
        let offset = self.position - point;
        let dist = offset.length().max(THRESHOLD);
        LightSample {
            to_light: offset / dist,
            dist,
            color: self.color,
            intensity: self.power / dist,
        }
    }
}
