//! Closed set of scene primitives.
//!
//! Dispatch is a `match` over a flat enum rather than a `Box<dyn Hittable>`
//! list, which keeps primitives contiguous in the scene's object vector.

use crate::{HitRecord, Hittable, Plane, Ray, Sphere, Triangle};
use prism_math::Interval;

/// Any primitive that can be placed in a [`Scene`](crate::Scene).
#[derive(Clone, Debug)]
pub enum Primitive {
    Sphere(Sphere),
    Plane(Plane),
    Triangle(Triangle),
}

impl Hittable for Primitive {
    #[inline]
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        match self {
            Primitive::Sphere(sphere) => sphere.hit(ray, ray_t),
            Primitive::Plane(plane) => plane.hit(ray, ray_t),
            Primitive::Triangle(triangle) => triangle.hit(ray, ray_t),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<Plane> for Primitive {
    fn from(plane: Plane) -> Self {
        Primitive::Plane(plane)
    }
}

impl From<Triangle> for Primitive {
    fn from(triangle: Triangle) -> Self {
        Primitive::Triangle(triangle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Vec3};
    use std::sync::Arc;

    #[test]
    fn test_dispatch_matches_concrete_primitive() {
        let material = Arc::new(Material::default());
        let sphere = Sphere::new(Vec3::ZERO, 1.0, material);
        let primitive = Primitive::from(sphere.clone());

        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let window = Interval::new(1e-4, 1e9);

        let direct = sphere.hit(&ray, window).unwrap();
        let dispatched = primitive.hit(&ray, window).unwrap();
        assert_eq!(direct.t, dispatched.t);
        assert_eq!(direct.normal, dispatched.normal);
    }
}
