//! Prism Core - surface materials, lights and image output.
//!
//! This crate provides:
//!
//! - **Material model**: immutable Phong + reflection/refraction parameters,
//!   shared between primitives through `Arc<Material>`
//! - **Point lights**
//! - **Image sink**: plain PPM output and PNG via an external converter

pub mod light;
pub mod material;
pub mod output;

// Re-export commonly used types
pub use light::PointLight;
pub use material::{Color, Material};
pub use output::{write_image, write_png, write_ppm, OutputError, OutputResult};
