//! Recursive Whitted-style light transport.
//!
//! Outgoing radiance at a hit is
//! - ambient + emission, always
//! - Phong diffuse/specular from every unoccluded point light, for
//!   non-refractive materials only
//! - mirror reflection and Fresnel-weighted refraction, recursing with
//!   `depth - 1`
//!
//! Recursion ends at depth 0 with the scene background.

use crate::{Color, HitRecord, Hittable, Ray, Scene};
use prism_math::{reflect, refract, schlick_fresnel, Interval, Vec3};

/// Offset applied along the normal when spawning secondary rays.
pub const SURFACE_BIAS: f32 = 1e-4;

/// Parameter window for camera, reflected and refracted ray queries.
pub const SEARCH_WINDOW: Interval = Interval::new(SURFACE_BIAS, 1e9);

/// Index of refraction outside every object.
const AIR_IOR: f32 = 1.0;

/// Trace `ray` into `scene` and return the radiance it carries back.
pub fn trace(scene: &Scene, ray: &Ray, depth: u32) -> Color {
    if depth == 0 {
        return scene.background;
    }

    let Some(rec) = scene.hit(ray, SEARCH_WINDOW) else {
        return scene.background;
    };

    let material = rec.material;
    let mut color = material.ambient + material.emissive;

    // Transparent surfaces receive no direct light
    if !material.is_refractive() {
        color += direct_lighting(scene, ray, &rec);
    }

    if material.is_reflective() || material.is_refractive() {
        color += specular_transport(scene, ray, &rec, depth);
    }

    color
}

/// Phong diffuse + specular from every point light with hard shadows.
fn direct_lighting(scene: &Scene, ray: &Ray, rec: &HitRecord) -> Color {
    let material = rec.material;
    let view_dir = -ray.direction();
    let shadow_origin = rec.p + rec.normal * SURFACE_BIAS;

    let mut color = Color::ZERO;
    for light in scene.lights() {
        let to_light = light.position - rec.p;
        let distance = to_light.length();
        let light_dir = to_light / distance;

        let shadow_ray = Ray::new(shadow_origin, light_dir);
        if scene.is_occluded(&shadow_ray, Interval::new(SURFACE_BIAS, distance - SURFACE_BIAS)) {
            continue;
        }

        let radiance = light.radiance_at(distance);

        let n_dot_l = rec.normal.dot(light_dir).max(0.0);
        let diffuse = material.diffuse * radiance * n_dot_l;

        let r_dot_v = reflect(-light_dir, rec.normal).dot(view_dir).max(0.0);
        let specular = material.specular * radiance * r_dot_v.powf(material.shininess);

        color += diffuse + specular;
    }
    color
}

/// Mirror reflection and refraction, recursing one level deeper.
fn specular_transport(scene: &Scene, ray: &Ray, rec: &HitRecord, depth: u32) -> Color {
    let material = rec.material;
    let unit_direction = ray.direction();
    let reflect_origin = rec.p + rec.normal * SURFACE_BIAS;

    let refl_color = if material.is_reflective() {
        let reflected = Ray::new(reflect_origin, reflect(unit_direction, rec.normal));
        trace(scene, &reflected, depth - 1)
    } else {
        Color::ZERO
    };

    if !material.is_refractive() {
        return material.reflectivity * refl_color;
    }

    let refraction_ratio = if rec.front_face {
        AIR_IOR / material.ior
    } else {
        material.ior
    };

    let refr_color = match refract(unit_direction, rec.normal, refraction_ratio) {
        Some(refracted) => {
            let refracted_ray = Ray::new(rec.p - rec.normal * SURFACE_BIAS, refracted);

            // Path length through the medium, measured to the next surface
            let distance_inside = if rec.front_face {
                scene
                    .hit(&refracted_ray, SEARCH_WINDOW)
                    .map_or(0.0, |exit| exit.t)
            } else {
                0.0
            };

            let attenuation = absorption_attenuation(material.absorption, distance_inside);
            trace(scene, &refracted_ray, depth - 1) * attenuation * material.transmission_tint
        }
        None => {
            // Total internal reflection
            let reflected = Ray::new(reflect_origin, reflect(unit_direction, rec.normal));
            trace(scene, &reflected, depth - 1)
        }
    };

    let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
    let (kr, kt) = fresnel_weights(cos_theta, rec.front_face, material.ior);
    kr * refl_color + kt * refr_color
}

/// Reflected and transmitted weights `(R, 1 - R)` for a dielectric
/// boundary, using Schlick's approximation.
pub fn fresnel_weights(cos_theta: f32, front_face: bool, ior: f32) -> (f32, f32) {
    let (ior_from, ior_to) = if front_face {
        (AIR_IOR, ior)
    } else {
        (ior, AIR_IOR)
    };
    let kr = schlick_fresnel(cos_theta, ior_from, ior_to);
    (kr, 1.0 - kr)
}

/// Beer-Lambert style per-channel attenuation `exp(-absorption * distance)`.
fn absorption_attenuation(absorption: Vec3, distance: f32) -> Vec3 {
    Vec3::from_array(absorption.to_array().map(|k| (-k * distance).exp()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Plane, PointLight, Sphere};
    use std::sync::Arc;

    fn approx_eq(a: Color, b: Color) -> bool {
        (a - b).abs().max_element() < 1e-4
    }

    /// A floor at y=0 lit by one white light straight above the origin.
    fn lit_floor(material: Material) -> Scene {
        let mut scene = Scene::new();
        scene.background = Color::new(0.1, 0.2, 0.3);
        scene.add_object(Plane::new(Vec3::Y, 0.0, Arc::new(material)));
        scene.add_light(PointLight::new(Vec3::new(0.0, 2.0, 0.0), Color::ONE, 1.0));
        scene
    }

    fn looking_down() -> Ray {
        Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0))
    }

    #[test]
    fn test_depth_zero_returns_background() {
        let scene = lit_floor(Material::lambertian(Color::ONE).with_emissive(Color::ONE));
        assert_eq!(trace(&scene, &looking_down(), 0), scene.background);
    }

    #[test]
    fn test_miss_returns_background() {
        let scene = lit_floor(Material::default());
        let up = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Y);
        assert_eq!(trace(&scene, &up, 5), scene.background);
    }

    #[test]
    fn test_diffuse_lighting() {
        let scene = lit_floor(Material::lambertian(Color::splat(0.5)));
        let color = trace(&scene, &looking_down(), 4);

        // ambient + kd * falloff(2) * cos(0)
        let expected = Color::splat(0.05 + 0.5 / 1.48);
        assert!(approx_eq(color, expected), "got {color:?}");
    }

    #[test]
    fn test_specular_highlight() {
        let mut material = Material::lambertian(Color::ZERO);
        material.specular = Color::ONE;
        material.shininess = 16.0;
        let scene = lit_floor(material);

        // Eye, light and normal aligned: r . v = 1
        let color = trace(&scene, &looking_down(), 4);
        assert!(approx_eq(color, Color::splat(0.05 + 1.0 / 1.48)), "got {color:?}");
    }

    #[test]
    fn test_emission_is_added() {
        let scene = lit_floor(
            Material::lambertian(Color::ZERO)
                .with_ambient(Color::ZERO)
                .with_emissive(Color::new(0.9, 0.5, 0.1)),
        );
        let color = trace(&scene, &looking_down(), 1);
        assert!(approx_eq(color, Color::new(0.9, 0.5, 0.1)));
    }

    #[test]
    fn test_shadow_caster_blocks_light() {
        let mut scene = lit_floor(Material::lambertian(Color::splat(0.5)));
        scene.add_object(Sphere::new(
            Vec3::new(0.0, 1.5, 0.0),
            0.2,
            Arc::new(Material::lambertian(Color::ONE)),
        ));

        let color = trace(&scene, &looking_down(), 4);
        assert!(approx_eq(color, Color::splat(0.05)), "got {color:?}");
    }

    #[test]
    fn test_non_shadow_caster_lets_light_through() {
        let mut scene = lit_floor(Material::lambertian(Color::splat(0.5)));
        scene.add_object(Sphere::new(
            Vec3::new(0.0, 1.5, 0.0),
            0.2,
            Arc::new(Material::lambertian(Color::ONE).with_casts_shadow(false)),
        ));

        let color = trace(&scene, &looking_down(), 4);
        assert!(approx_eq(color, Color::splat(0.05 + 0.5 / 1.48)), "got {color:?}");
    }

    #[test]
    fn test_mirror_weights_reflection_by_reflectivity() {
        let scene = lit_floor(Material::metal(Color::ZERO, 0.0, 0.5));

        // At depth 1 the reflected ray returns the background
        let color = trace(&scene, &looking_down(), 1);
        let expected = Color::splat(0.05) + 0.5 * scene.background;
        assert!(approx_eq(color, expected), "got {color:?}");
    }

    #[test]
    fn test_mirror_reflects_emitter() {
        let mut scene = Scene::new();
        scene.background = Color::ZERO;
        let mirror = Material::metal(Color::ZERO, 0.0, 1.0).with_ambient(Color::ZERO);
        let lamp = Material::lambertian(Color::ZERO)
            .with_ambient(Color::ZERO)
            .with_emissive(Color::new(1.0, 0.0, 0.0));
        scene.add_object(Plane::new(Vec3::Y, 0.0, Arc::new(mirror)));
        scene.add_object(Sphere::new(Vec3::new(0.0, 3.0, 0.0), 0.5, Arc::new(lamp)));

        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        assert!(approx_eq(trace(&scene, &ray, 2), Color::new(1.0, 0.0, 0.0)));
        assert!(approx_eq(trace(&scene, &ray, 1), Color::ZERO));
    }

    #[test]
    fn test_refractive_surface_ignores_lights() {
        let mut scene = Scene::new();
        scene.background = Color::new(0.2, 0.4, 0.6);
        scene.add_object(Sphere::new(Vec3::ZERO, 1.0, Arc::new(Material::dielectric(1.5, Color::ONE))));
        scene.add_light(PointLight::new(Vec3::new(0.0, 0.0, 5.0), Color::ONE, 10.0));

        // Both branches see the background, and R + (1 - R) = 1
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let color = trace(&scene, &ray, 1);
        assert!(approx_eq(color, scene.background), "got {color:?}");
    }

    #[test]
    fn test_glass_sphere_transmits_tinted_background() {
        let mut scene = Scene::new();
        scene.background = Color::ONE;
        let tint = Color::new(1.0, 0.5, 0.25);
        scene.add_object(Sphere::new(Vec3::ZERO, 1.0, Arc::new(Material::dielectric(1.5, tint))));

        // Straight through the center: enter, exit, escape
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let color = trace(&scene, &ray, 3);

        let r0 = 0.04;
        let kr = Color::splat(r0);
        // Depth 1: internal bounce back at the entry side, both branches escape
        let bounce = kr + (1.0 - r0) * tint;
        // Depth 2: exit surface, reflecting into the bounce or escaping
        let exit = r0 * bounce + (1.0 - r0) * tint;
        // Depth 3: entry surface
        let expected = kr + (1.0 - r0) * (exit * tint);
        assert!(approx_eq(color, expected), "got {color:?} expected {expected:?}");
    }

    #[test]
    fn test_total_internal_reflection_follows_reflected_ray() {
        let mut scene = Scene::new();
        scene.background = Color::ZERO;
        scene.add_object(Sphere::new(Vec3::ZERO, 1.0, Arc::new(Material::dielectric(1.5, Color::ONE))));

        // Grazing exit from inside the glass at (0.436, 0.9, 0)
        let ray = Ray::new(Vec3::new(0.0, 0.9, 0.0), Vec3::X);
        let rec = scene.hit(&ray, SEARCH_WINDOW).unwrap();
        assert!(!rec.front_face);
        assert!(refract(ray.direction(), rec.normal, 1.5).is_none());

        // Small red emitter at the middle of the internal chord
        let bounce = reflect(ray.direction(), rec.normal);
        let emitter_center = rec.p + 0.436 * bounce;
        let emitter = Material::lambertian(Color::ZERO)
            .with_ambient(Color::ZERO)
            .with_emissive(Color::new(1.0, 0.0, 0.0));
        scene.add_object(Sphere::new(emitter_center, 0.05, Arc::new(emitter)));

        // Both Fresnel branches see the emitter, so the weights sum it back to red
        let color = trace(&scene, &ray, 2);
        assert!(approx_eq(color, Color::new(1.0, 0.0, 0.0)), "got {color:?}");
    }

    #[test]
    fn test_absorption_darkens_transmission() {
        let mut scene = Scene::new();
        scene.background = Color::ONE;
        let clear = Material::dielectric(1.5, Color::ONE);
        let absorbing = clear.clone().with_absorption(Color::new(1.0, 0.0, 0.0));

        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));

        scene.add_object(Sphere::new(Vec3::ZERO, 1.0, Arc::new(clear)));
        let clear_color = trace(&scene, &ray, 3);

        let mut scene_abs = Scene::new();
        scene_abs.background = Color::ONE;
        scene_abs.add_object(Sphere::new(Vec3::ZERO, 1.0, Arc::new(absorbing)));
        let absorbed_color = trace(&scene_abs, &ray, 3);

        assert!(absorbed_color.x < clear_color.x);
        assert!((absorbed_color.y - clear_color.y).abs() < 1e-5);
    }

    #[test]
    fn test_fresnel_weights_sum_to_one() {
        for ior in [1.0f32, 1.33, 1.5, 2.4] {
            for step in 0..=10 {
                let cos_theta = step as f32 / 10.0;
                for front_face in [true, false] {
                    let (kr, kt) = fresnel_weights(cos_theta, front_face, ior);
                    assert!((0.0..=1.0).contains(&kr));
                    assert!((kr + kt - 1.0).abs() <= f32::EPSILON);
                }
            }
        }
    }

    #[test]
    fn test_fresnel_normal_incidence() {
        let (kr, _) = fresnel_weights(1.0, true, 1.5);
        assert!((kr - 0.04).abs() < 1e-6);
    }

    #[test]
    fn test_absorption_attenuation() {
        let att = absorption_attenuation(Vec3::new(0.0, 1.0, 2.0), 0.5);
        assert!((att.x - 1.0).abs() < 1e-6);
        assert!((att.y - (-0.5f32).exp()).abs() < 1e-6);
        assert!((att.z - (-1.0f32).exp()).abs() < 1e-6);
        assert_eq!(absorption_attenuation(Vec3::ONE, 0.0), Vec3::ONE);
    }
}
