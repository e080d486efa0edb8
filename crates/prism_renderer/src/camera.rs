//! Pinhole camera for ray generation.

use crate::{Ray, Vec3};

/// Pinhole camera with a virtual viewport one unit in front of the eye.
///
/// Viewport coordinates `(s, t)` run over `[0, 1]²` with `(0, 0)` at the
/// lower-left corner and `t` increasing upward.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,

    // Orthonormal basis: w points backward, u right, v up
    u: Vec3,
    v: Vec3,
    w: Vec3,
}

impl Camera {
    /// Build a camera looking from `look_from` toward `look_at`.
    ///
    /// `vfov` is the vertical field of view in degrees and `aspect` the
    /// viewport width divided by its height.
    pub fn new(look_from: Vec3, look_at: Vec3, vup: Vec3, vfov: f32, aspect: f32) -> Self {
        let theta = vfov.to_radians();
        let viewport_height = 2.0 * (theta / 2.0).tan();
        let viewport_width = aspect * viewport_height;

        let w = (look_from - look_at).normalize_or_zero();
        let u = vup.cross(w).normalize_or_zero();
        let v = w.cross(u);

        let horizontal = viewport_width * u;
        let vertical = viewport_height * v;
        let lower_left_corner = look_from - horizontal / 2.0 - vertical / 2.0 - w;

        Self {
            origin: look_from,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
        }
    }

    /// Ray from the eye through viewport point `(s, t)`.
    pub fn get_ray(&self, s: f32, t: f32) -> Ray {
        let target = self.lower_left_corner + s * self.horizontal + t * self.vertical;
        Ray::new(self.origin, target - self.origin)
    }

    /// Eye position.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Camera basis `(u, v, w)`: right, up and backward.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, 90.0, 16.0 / 9.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_basis() {
        let camera = Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y, 90.0, 1.0);
        let (u, v, w) = camera.basis();

        assert!((u - Vec3::X).length() < 0.001);
        assert!((v - Vec3::Y).length() < 0.001);
        assert!((w - Vec3::Z).length() < 0.001);
        assert_eq!(camera.origin(), Vec3::ZERO);
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let look_from = Vec3::new(0.0, 1.0, 4.0);
        let look_at = Vec3::new(0.0, 1.0, 0.0);
        let camera = Camera::new(look_from, look_at, Vec3::Y, 50.0, 16.0 / 9.0);

        let ray = camera.get_ray(0.5, 0.5);
        assert_eq!(ray.origin(), look_from);
        assert!((ray.direction() - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
        assert!((ray.direction().length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_viewport_corners() {
        // fov 90 => viewport height 2 at distance 1
        let camera = Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y, 90.0, 2.0);

        let lower_left = camera.get_ray(0.0, 0.0).direction();
        let expected = Vec3::new(-2.0, -1.0, -1.0).normalize();
        assert!((lower_left - expected).length() < 1e-5);

        let upper_right = camera.get_ray(1.0, 1.0).direction();
        let expected = Vec3::new(2.0, 1.0, -1.0).normalize();
        assert!((upper_right - expected).length() < 1e-5);
    }

    #[test]
    fn test_t_increases_upward() {
        let camera = Camera::default();
        let low = camera.get_ray(0.5, 0.1).direction();
        let high = camera.get_ray(0.5, 0.9).direction();
        assert!(high.y > low.y);
    }
}
