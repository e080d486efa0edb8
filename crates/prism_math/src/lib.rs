// Re-export glam for convenience
pub use glam::*;

// Prism math types
mod interval;
mod optics;
mod ray;

pub use interval::Interval;
pub use optics::{reflect, refract, schlick_fresnel};
pub use ray::Ray;
