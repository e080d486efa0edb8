//! Surface material description.
//!
//! A [`Material`] is plain data: Phong coefficients for local lighting plus
//! the reflection, refraction and emission parameters read by the
//! integrator. Materials are built once during scene setup and then shared
//! read-only, typically as `Arc<Material>`.

use prism_math::Vec3;

/// Color type alias (linear RGB, typically 0-1)
pub type Color = Vec3;

/// Phong + Whitted material parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Ambient term, added unconditionally at every hit
    pub ambient: Color,

    /// Diffuse (Lambert) coefficient
    pub diffuse: Color,

    /// Specular (Phong highlight) coefficient
    pub specular: Color,

    /// Phong exponent
    pub shininess: f32,

    /// Mirror reflection weight (0 = none, 1 = perfect mirror)
    pub reflectivity: f32,

    /// Transmission weight; any value above zero makes the surface refractive
    pub transparency: f32,

    /// Index of refraction (1.0 = air, 1.5 = glass)
    pub ior: f32,

    /// Reflection jitter for brushed metals. Stored but not sampled.
    pub fuzz: f32,

    /// Multiplier applied to refracted light
    pub transmission_tint: Color,

    /// Per-channel exponential absorption rate inside the medium
    pub absorption: Color,

    /// Self emission, added to the outgoing color at every hit
    pub emissive: Color,

    /// Whether the surface blocks shadow rays
    pub casts_shadow: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Color::splat(0.05),
            diffuse: Color::splat(0.8),
            specular: Color::ZERO,
            shininess: 32.0,
            reflectivity: 0.0,
            transparency: 0.0,
            ior: 1.0,
            fuzz: 0.0,
            transmission_tint: Color::ONE,
            absorption: Color::ZERO,
            emissive: Color::ZERO,
            casts_shadow: true,
        }
    }
}

impl Material {
    /// Pure diffuse surface.
    pub fn lambertian(color: Color) -> Self {
        Self {
            diffuse: color,
            specular: Color::ZERO,
            shininess: 8.0,
            ..Default::default()
        }
    }

    /// Specular metal with a mirror term.
    ///
    /// - `color`: specular color of the metal
    /// - `fuzz`: roughness, 0.0 = perfect mirror
    /// - `reflectivity`: weight of the mirror reflection
    pub fn metal(color: Color, fuzz: f32, reflectivity: f32) -> Self {
        Self {
            diffuse: Color::ZERO,
            specular: color,
            shininess: 128.0,
            reflectivity,
            fuzz,
            ..Default::default()
        }
    }

    /// Glass-like dielectric: fully reflective and refractive, no diffuse
    /// response, and transparent to shadow rays.
    pub fn dielectric(ior: f32, tint: Color) -> Self {
        Self {
            ambient: Color::ZERO,
            diffuse: Color::ZERO,
            specular: Color::ONE,
            shininess: 200.0,
            reflectivity: 1.0,
            transparency: 1.0,
            ior,
            transmission_tint: tint,
            absorption: Color::ZERO,
            casts_shadow: false,
            ..Default::default()
        }
    }

    /// Set the emitted color.
    pub fn with_emissive(mut self, emissive: Color) -> Self {
        self.emissive = emissive;
        self
    }

    /// Enable or disable shadow casting.
    pub fn with_casts_shadow(mut self, casts_shadow: bool) -> Self {
        self.casts_shadow = casts_shadow;
        self
    }

    /// Set the absorption rate used for light traveling inside the medium.
    pub fn with_absorption(mut self, absorption: Color) -> Self {
        self.absorption = absorption;
        self
    }

    /// Set the mirror reflection weight.
    pub fn with_reflectivity(mut self, reflectivity: f32) -> Self {
        self.reflectivity = reflectivity;
        self
    }

    /// Set the ambient term.
    pub fn with_ambient(mut self, ambient: Color) -> Self {
        self.ambient = ambient;
        self
    }

    #[inline]
    pub fn is_reflective(&self) -> bool {
        self.reflectivity > 0.0
    }

    #[inline]
    pub fn is_refractive(&self) -> bool {
        self.transparency > 0.0
    }

    /// Check if this material emits light.
    pub fn is_emissive(&self) -> bool {
        self.emissive.length_squared() > 0.0
    }
}
