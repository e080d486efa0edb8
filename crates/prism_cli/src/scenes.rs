//! Built-in scenes and their camera presets.

use std::sync::Arc;

use prism_core::{Color, Material, PointLight};
use prism_math::Vec3;
use prism_renderer::{Camera, Plane, Scene, Sphere, Triangle};

use crate::cli::{CameraView, SceneKind};

/// Build the selected scene and a camera for the given view.
pub fn build_scene(kind: SceneKind, view: CameraView, aspect: f32) -> (Scene, Camera) {
    match kind {
        SceneKind::Base => (base_scene(), base_camera(view, aspect)),
        SceneKind::Final => (final_scene(), final_camera(view, aspect)),
    }
}

/// Add a quad as two triangles `(a, b, d)` and `(b, c, d)`.
fn add_quad(scene: &mut Scene, a: Vec3, b: Vec3, c: Vec3, d: Vec3, material: &Arc<Material>) {
    scene.add_object(Triangle::new(a, b, d, Arc::clone(material)));
    scene.add_object(Triangle::new(b, c, d, Arc::clone(material)));
}

/// Floor, back wall, three spheres and an emissive two-colour panel seen
/// through the glass sphere.
fn base_scene() -> Scene {
    let floor = Arc::new(Material::lambertian(Color::splat(0.75)));
    let diffuse = Arc::new(Material::lambertian(Color::new(0.80, 0.25, 0.25)));
    let mirror = Arc::new(Material::metal(Color::splat(0.90), 0.02, 1.0));
    let glass = Arc::new(Material::dielectric(1.5, Color::ONE));
    let red = Arc::new(
        Material::lambertian(Color::new(0.5, 0.1, 0.1)).with_emissive(Color::new(0.75, 0.1, 0.1)),
    );
    let orange = Arc::new(
        Material::lambertian(Color::new(0.5, 0.3, 0.1)).with_emissive(Color::new(0.85, 0.5, 0.1)),
    );

    let mut scene = Scene::new();
    scene.background = Color::new(0.2, 0.2, 0.3);

    scene.add_object(Plane::new(Vec3::Y, 0.0, Arc::clone(&floor))); // y = 0
    scene.add_object(Plane::new(Vec3::Z, 4.0, floor)); // z = -4

    scene.add_object(Sphere::new(Vec3::new(-0.9, 0.5, -2.4), 0.5, diffuse));
    scene.add_object(Sphere::new(Vec3::new(0.0, 0.5, -2.8), 0.5, mirror));
    scene.add_object(Sphere::new(Vec3::new(1.0, 0.5, -2.2), 0.5, glass));

    // Panel behind the glass sphere, split red | orange
    let z = -3.4;
    let (left, right) = (0.5, 2.1);
    let mid = 0.5 * (left + right);
    let (bottom, top) = (-0.2, 1.5);
    add_quad(
        &mut scene,
        Vec3::new(left, bottom, z),
        Vec3::new(mid, bottom, z),
        Vec3::new(mid, top, z),
        Vec3::new(left, top, z),
        &red,
    );
    add_quad(
        &mut scene,
        Vec3::new(mid, bottom, z),
        Vec3::new(right, bottom, z),
        Vec3::new(right, top, z),
        Vec3::new(mid, top, z),
        &orange,
    );

    scene.add_light(PointLight::new(Vec3::new(0.0, 2.2, -2.2), Color::ONE, 0.9));
    scene.add_light(PointLight::new(Vec3::new(-1.6, 1.6, -3.2), Color::new(1.0, 0.95, 0.9), 0.4));

    scene
}

fn base_camera(view: CameraView, aspect: f32) -> Camera {
    let (look_from, look_at, vfov) = match view {
        CameraView::Front => (Vec3::new(0.0, 1.0, 1.2), Vec3::new(0.0, 0.4, -2.6), 50.0),
        CameraView::Top => (Vec3::new(0.0, 2.2, 0.6), Vec3::new(0.0, 0.25, -2.4), 70.0),
        CameraView::Side => (Vec3::new(-1.8, 1.0, -2.6), Vec3::new(0.0, 0.4, -2.6), 65.0),
    };
    Camera::new(look_from, look_at, Vec3::Y, vfov, aspect)
}

/// Wooden room with a framed mirror on the back wall, two lamps, two
/// spheres and a small tent on the floor.
fn final_scene() -> Scene {
    let wood = Arc::new(Material::lambertian(Color::new(0.55, 0.36, 0.22)));
    let frame = Arc::new(Material::lambertian(Color::splat(0.05)));
    let mirror = Arc::new(Material::metal(Color::splat(0.95), 0.02, 1.0));
    let red = Arc::new(Material::lambertian(Color::new(0.80, 0.25, 0.25)));
    let white_metal = Arc::new(Material::metal(Color::splat(0.85), 0.05, 1.0));
    let grey = Arc::new(Material::lambertian(Color::splat(0.6)));
    let lamp = Arc::new(
        Material::lambertian(Color::new(0.95, 0.95, 0.9))
            .with_emissive(Color::new(0.9, 0.9, 0.85))
            .with_casts_shadow(false),
    );

    let mut scene = Scene::new();
    scene.background = Color::new(0.7, 0.8, 1.0);

    // Room
    scene.add_object(Plane::new(Vec3::Y, 0.0, Arc::clone(&wood))); // floor
    scene.add_object(Plane::new(Vec3::NEG_Y, 2.5, Arc::clone(&wood))); // ceiling
    scene.add_object(Plane::new(Vec3::X, 2.0, Arc::clone(&wood))); // left wall
    scene.add_object(Plane::new(Vec3::NEG_X, 2.0, Arc::clone(&wood))); // right wall
    scene.add_object(Plane::new(Vec3::Z, 6.0, wood)); // back wall

    // Mirror, just in front of the back wall
    let z_mirror = -5.9995;
    let (xl, xr, yb, yt) = (-1.8, 1.8, 0.2, 2.3);
    add_quad(
        &mut scene,
        Vec3::new(xl, yb, z_mirror),
        Vec3::new(xr, yb, z_mirror),
        Vec3::new(xr, yt, z_mirror),
        Vec3::new(xl, yt, z_mirror),
        &mirror,
    );

    // Frame: left, right, bottom and top strips around the mirror
    let z_frame = -5.9993;
    for (x0, x1, y0, y1) in [
        (-2.0, xl, 0.0, 2.5),
        (xr, 2.0, 0.0, 2.5),
        (xl, xr, 0.0, yb),
        (xl, xr, yt, 2.5),
    ] {
        add_quad(
            &mut scene,
            Vec3::new(x0, y0, z_frame),
            Vec3::new(x1, y0, z_frame),
            Vec3::new(x1, y1, z_frame),
            Vec3::new(x0, y1, z_frame),
            &frame,
        );
    }

    // Ceiling lamp
    let y_lamp = 2.30;
    let (lx0, lx1, lz_far, lz_near) = (-0.35, 0.35, -3.6, -2.8);
    add_quad(
        &mut scene,
        Vec3::new(lx0, y_lamp, lz_far),
        Vec3::new(lx1, y_lamp, lz_far),
        Vec3::new(lx1, y_lamp, lz_near),
        Vec3::new(lx0, y_lamp, lz_near),
        &lamp,
    );

    // Wall lamp on the left wall
    let x_lamp = -1.9993;
    let (wy0, wy1, wz_near, wz_far) = (1.1, 1.7, -2.6, -3.2);
    add_quad(
        &mut scene,
        Vec3::new(x_lamp, wy0, wz_near),
        Vec3::new(x_lamp, wy1, wz_near),
        Vec3::new(x_lamp, wy1, wz_far),
        Vec3::new(x_lamp, wy0, wz_far),
        &lamp,
    );

    scene.add_object(Sphere::new(Vec3::new(-0.8, 0.5, -2.2), 0.5, red));
    scene.add_object(Sphere::new(Vec3::new(1.1, 0.5, -2.8), 0.5, white_metal));

    // Two-faced tent standing on the floor
    let apex = Vec3::new(0.0, 0.58, -1.50);
    scene.add_object(Triangle::new(
        Vec3::new(-0.35, 0.0, -1.42),
        Vec3::new(0.35, 0.0, -1.55),
        apex,
        Arc::clone(&grey),
    ));
    scene.add_object(Triangle::new(
        Vec3::new(0.35, 0.0, -1.42),
        Vec3::new(-0.35, 0.0, -1.55),
        apex,
        grey,
    ));

    scene.add_light(PointLight::new(Vec3::new(0.0, 2.22, -3.2), Color::ONE, 0.9));
    scene.add_light(PointLight::new(Vec3::new(-1.90, 1.40, -2.90), Color::new(1.0, 0.9, 0.8), 0.4));

    scene
}

fn final_camera(view: CameraView, aspect: f32) -> Camera {
    let (look_from, look_at, vfov) = match view {
        CameraView::Front => (Vec3::new(0.0, 1.0, 1.8), Vec3::new(0.0, 0.7, -3.2), 45.0),
        CameraView::Top => (Vec3::new(0.0, 2.45, 1.0), Vec3::new(0.0, 0.30, -2.4), 75.0),
        CameraView::Side => (Vec3::new(-1.95, 1.0, -3.2), Vec3::new(0.0, 0.7, -3.2), 70.0),
    };
    Camera::new(look_from, look_at, Vec3::Y, vfov, aspect)
}
