//! Prism Renderer - Whitted-style CPU ray tracing
//!
//! Recursive ray tracer combining Phong direct lighting with hard shadows,
//! mirror reflection and Fresnel-weighted refraction.
//!
//! Primitives are intersected by a linear scan; there is no acceleration
//! structure.

mod bucket;
mod camera;
mod hittable;
mod integrator;
mod plane;
mod primitive;
mod renderer;
mod scene;
mod sphere;
mod triangle;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use hittable::{HitRecord, Hittable};
pub use integrator::{fresnel_weights, trace, SEARCH_WINDOW, SURFACE_BIAS};
pub use plane::Plane;
pub use primitive::Primitive;
pub use renderer::{render, render_pixel, sample_radiance, ImageBuffer, RenderConfig, RenderMode};
pub use scene::Scene;
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export the shared math and scene data types
pub use prism_core::{Color, Material, PointLight};
pub use prism_math::{Interval, Ray, Vec3};
