//! Reflection, refraction and Fresnel reflectance.

use crate::Vec3;

/// Mirror `v` about the unit normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit direction `uv` through a surface with unit normal `n`
/// facing the incoming side, using Snell's law.
///
/// `eta_ratio` is `ior_incident / ior_transmitted`. Returns `None` on total
/// internal reflection.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, eta_ratio: f32) -> Option<Vec3> {
    let cos_theta = (-uv).dot(n).min(1.0);
    let sin_theta_sq = 1.0 - cos_theta * cos_theta;

    if eta_ratio * eta_ratio * sin_theta_sq > 1.0 {
        return None;
    }

    let r_out_perp = eta_ratio * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    Some(r_out_perp + r_out_parallel)
}

/// Schlick's approximation of Fresnel reflectance for light passing from a
/// medium of index `ior_from` into one of index `ior_to`.
#[inline]
pub fn schlick_fresnel(cos_theta: f32, ior_from: f32, ior_to: f32) -> f32 {
    let r0 = ((ior_from - ior_to) / (ior_from + ior_to)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cos_theta).powi(5)
}
