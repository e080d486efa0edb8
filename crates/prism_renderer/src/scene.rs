//! Scene aggregate: primitives, lights and background.

use log::debug;

use crate::{Color, HitRecord, Hittable, PointLight, Primitive, Ray};
use prism_math::Interval;

/// A renderable scene.
///
/// Built once before rendering and read-only afterwards, so it can be
/// shared by reference across render threads.
#[derive(Clone, Debug)]
pub struct Scene {
    objects: Vec<Primitive>,
    lights: Vec<PointLight>,
    /// Color returned for rays that escape the scene
    pub background: Color,
}

impl Scene {
    /// Create an empty scene with a sky-blue background.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
            background: Color::new(0.7, 0.8, 1.0),
        }
    }

    /// Add a primitive to the scene.
    pub fn add_object(&mut self, object: impl Into<Primitive>) {
        self.objects.push(object.into());
    }

    /// Add a point light to the scene.
    pub fn add_light(&mut self, light: PointLight) {
        debug!("Adding light at {:?}", light.position);
        self.lights.push(light);
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    /// Get the number of primitives.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene has no primitives.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Shadow query: true if any shadow-casting primitive intersects the
    /// ray within `ray_t`.
    ///
    /// Stops at the first shadow caster found, which need not be the
    /// nearest. Primitives whose material does not cast shadows are
    /// ignored.
    pub fn is_occluded(&self, ray: &Ray, ray_t: Interval) -> bool {
        self.objects
            .iter()
            .filter_map(|object| object.hit(ray, ray_t))
            .any(|rec| rec.material.casts_shadow)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for Scene {
    /// Nearest hit over all primitives.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}
