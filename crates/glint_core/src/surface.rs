//! Surface material description.

use glint_math::{Vec3, THRESHOLD};

/// One illumination coefficient triple with a cached usage flag.
///
/// The flag is true when any channel exceeds the shared threshold, letting
/// the shading engine skip zero-weight work without re-testing channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coef {
    pub k: Vec3,
    pub in_use: bool,
}

impl Coef {
    pub fn new(k: Vec3) -> Self {
        Self {
            k,
            in_use: k.max_element() > THRESHOLD,
        }
    }

    pub fn zero() -> Self {
        Self::new(Vec3::ZERO)
    }

    /// Largest channel, used as the scalar weight of recursive rays.
    #[inline]
    pub fn max_component(&self) -> f64 {
        self.k.max_element()
    }
}

impl From<Vec3> for Coef {
    fn from(k: Vec3) -> Self {
        Self::new(k)
    }
}

/// Phong surface: ambient/diffuse/specular triples, shininess exponent,
/// reflection and transmission coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub ka: Coef,
    pub kd: Coef,
    pub ks: Coef,
    pub shininess: f64,
    pub kr: Coef,
    pub kt: Coef,
}

impl Surface {
    /// Create an opaque surface; reflection and transmission start at zero.
    pub fn new(ka: Vec3, kd: Vec3, ks: Vec3, shininess: f64) -> Self {
        Self {
            ka: Coef::new(ka),
            kd: Coef::new(kd),
            ks: Coef::new(ks),
            shininess,
            kr: Coef::zero(),
            kt: Coef::zero(),
        }
    }

    /// Set the reflection coefficient.
    pub fn with_reflection(mut self, kr: Vec3) -> Self {
        self.kr = Coef::new(kr);
        self
    }

    /// Set the transmission coefficient.
    pub fn with_transmission(mut self, kt: Vec3) -> Self {
        self.kt = Coef::new(kt);
        self
    }
}

impl Default for Surface {
    /// Matte near-white: Ka 0.1, Kd 0.9, no specular, no recursion terms.
    fn default() -> Self {
        Self::new(
            Vec3::splat(0.1),
            Vec3::splat(0.9),
            Vec3::ZERO,
            47.0,
        )
    }
}
