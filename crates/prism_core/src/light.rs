//! Point light sources.

use prism_math::Vec3;

/// An isotropic point light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    /// World-space position
    pub position: Vec3,

    /// Light color (RGB)
    pub color: Vec3,

    /// Scalar intensity multiplier
    pub intensity: f32,
}

impl PointLight {
    pub fn new(position: Vec3, color: Vec3, intensity: f32) -> Self {
        Self {
            position,
            color,
            intensity,
        }
    }

    /// Radiance reaching a point at the given distance, before the cosine term.
    ///
    /// Uses the soft falloff `1 / (1 + 0.12 d^2)`.
    pub fn radiance_at(&self, distance: f32) -> Vec3 {
        self.color * self.intensity * Self::falloff(distance)
    }

    /// Distance attenuation factor.
    pub fn falloff(distance: f32) -> f32 {
        1.0 / (1.0 + 0.12 * distance * distance)
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }
}
