//! Infinite plane primitive.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use prism_math::{Interval, Vec3};

/// Below this `|n . d|` the ray is treated as parallel to the plane.
const PARALLEL_EPSILON: f32 = 1e-9;

/// The infinite plane `n . p + d = 0`.
#[derive(Clone, Debug)]
pub struct Plane {
    /// Unit normal
    normal: Vec3,
    /// Signed offset
    d: f32,
    material: Arc<Material>,
}

impl Plane {
    /// Create a plane from a normal (normalized here) and offset `d`.
    ///
    /// `Plane::new(Vec3::Y, 0.0, ..)` is the floor `y = 0`;
    /// `Plane::new(Vec3::Z, 4.0, ..)` is the wall `z = -4`.
    pub fn new(normal: Vec3, d: f32, material: Arc<Material>) -> Self {
        Self {
            normal: normal.normalize(),
            d,
            material,
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let denom = self.normal.dot(ray.direction());

        // Ray is parallel to the plane
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = -(self.normal.dot(ray.origin()) + self.d) / denom;
        if !ray_t.contains(t) {
            return None;
        }

        Some(HitRecord::new(ray, t, self.normal, &self.material))
    }
}
