//! Participating medium parameters.

/// The volume a ray travels through: refractive index for Snell's law and
/// a decay coefficient for Beer-Lambert attenuation with distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Medium {
    pub refraction: f64,
    pub decay: f64,
}

impl Medium {
    /// Ambient air: near-unit refractive index, slight absorption.
    pub const AIR: Medium = Medium {
        refraction: 1.0003,
        decay: 0.1,
    };

    pub const fn new(refraction: f64, decay: f64) -> Self {
        Self { refraction, decay }
    }
}

impl Default for Medium {
    fn default() -> Self {
        Self::AIR
    }
}
