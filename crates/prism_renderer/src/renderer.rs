//! Pixel sampling and image assembly.
//!
//! Each pixel averages `samples_per_pixel` camera rays. With more than one
//! sample the ray passes through a uniformly jittered point of the pixel,
//! otherwise through its center. The image is split into buckets rendered
//! in parallel with rayon.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use log::{debug, info};
use rand::{Rng, RngCore};
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, DEFAULT_BUCKET_SIZE};
use crate::integrator::{trace, SEARCH_WINDOW};
use crate::{Camera, Color, Hittable, Ray, Scene};

/// What a camera sample evaluates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Full recursive shading
    #[default]
    Final,
    /// Nearest-hit normal mapped to `0.5 * (n + 1)`, black on a miss
    Normals,
}

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum recursion depth
    pub max_depth: u32,
    /// Shading mode
    pub mode: RenderMode,
    /// Edge length of a render bucket in pixels
    pub bucket_size: u32,
    /// Base seed for jitter; `None` draws one from OS entropy
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 450,
            samples_per_pixel: 1,
            max_depth: 6,
            mode: RenderMode::Final,
            bucket_size: DEFAULT_BUCKET_SIZE,
            seed: None,
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_bucket_size(mut self, bucket_size: u32) -> Self {
        self.bucket_size = bucket_size;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Viewport aspect ratio (width / height).
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Radiance carried back along a single camera ray.
pub fn sample_radiance(scene: &Scene, ray: &Ray, config: &RenderConfig) -> Color {
    match config.mode {
        RenderMode::Final => trace(scene, ray, config.max_depth),
        RenderMode::Normals => scene
            .hit(ray, SEARCH_WINDOW)
            .map_or(Color::ZERO, |rec| 0.5 * (rec.normal + Color::ONE)),
    }
}

/// Render a single pixel with multi-sampling.
///
/// `(x, y)` is in image space with row 0 at the top.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let spp = config.samples_per_pixel.max(1);
    let width = config.width as f32;
    let height = config.height as f32;

    // Viewport t grows upward, image rows grow downward
    let j = config.height.saturating_sub(1).saturating_sub(y);

    let mut pixel_color = Color::ZERO;
    for _ in 0..spp {
        let (jitter_u, jitter_v) = if spp > 1 {
            (rng.gen::<f32>(), rng.gen::<f32>())
        } else {
            (0.5, 0.5)
        };

        let s = (x as f32 + jitter_u) / width;
        let t = (j as f32 + jitter_v) / height;
        let ray = camera.get_ray(s, t);
        pixel_color += sample_radiance(scene, &ray, config);
    }

    pixel_color / spp as f32
}

/// Row-major image, top row first.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Render the whole image.
///
/// Buckets are rendered in parallel. Each bucket draws its jitter from a
/// generator seeded with the base seed and its index, so a fixed
/// `config.seed` gives identical output on every run.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let mut image = ImageBuffer::new(config.width, config.height);
    let buckets = generate_buckets(config.width, config.height, config.bucket_size);
    let base_seed = config.seed.unwrap_or_else(rand::random);

    info!(
        "Rendering {}x{} at {} spp, max depth {} ({} buckets on {} threads)",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth,
        buckets.len(),
        rayon::current_num_threads()
    );

    let start = Instant::now();
    let completed = AtomicUsize::new(0);
    let total = buckets.len();

    let results: Vec<_> = buckets
        .par_iter()
        .map(|bucket| {
            let result = render_bucket(bucket, camera, scene, config, base_seed);
            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            debug!("Progress: {:.1}%", done as f32 * 100.0 / total as f32);
            result
        })
        .collect();

    for result in results {
        let bucket = result.bucket;
        for (i, color) in result.pixels.into_iter().enumerate() {
            let local_x = i as u32 % bucket.width;
            let local_y = i as u32 / bucket.width;
            image.set(bucket.x + local_x, bucket.y + local_y, color);
        }
    }

    info!("Render finished in {:.2?}", start.elapsed());
    image
}
