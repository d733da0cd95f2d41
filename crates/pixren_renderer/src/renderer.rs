//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a hard depth cap
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma correction on quantization

use crate::{Camera, Hittable, RenderError, Scene};
use pixren_math::random::random_f64;
use pixren_math::{Color, Interval, Ray};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Worker threads per frame; `None` uses the available parallelism
    pub workers: Option<usize>,
    /// Base seed; the same seed renders the same image
    pub seed: u64,
    /// Hits closer than this are ignored to avoid self-intersection
    pub t_min: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 225,
            samples_per_pixel: 10,
            max_depth: 50,
            workers: None,
            seed: 0,
            t_min: 0.001,
        }
    }
}

impl RenderConfig {
    /// Reject settings that cannot produce a frame.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::EmptyImage {
                width: self.width,
                height: self.height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::ZeroSamples);
        }
        if self.max_depth == 0 {
            return Err(RenderError::ZeroDepth);
        }
        if self.workers == Some(0) {
            return Err(RenderError::ZeroWorkers);
        }
        Ok(())
    }

    /// Number of workers a frame is split across.
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Width over height, for matching the camera to the image.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// Everything a frame reads: built by the frame loop, then shared
/// read-only with every worker.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub scene: Scene,
    pub camera: Camera,
    /// Frame number, folded into the per-row seeds
    pub frame: u64,
}

impl RenderContext {
    pub fn new(scene: Scene, camera: Camera) -> Self {
        Self {
            scene,
            camera,
            frame: 0,
        }
    }
}

/// Compute the color seen by a ray.
///
/// Bounces until the ray escapes, is absorbed, or `depth` runs out.
pub fn ray_color(
    ray: &Ray,
    scene: &Scene,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = scene.hit(ray, Interval::new(config.t_min, f64::INFINITY)) else {
        return sky_gradient(ray);
    };

    match scene.material(rec.material).scatter(ray, &rec, rng) {
        Some(result) => {
            result.attenuation * ray_color(&result.scattered, scene, depth - 1, config, rng)
        }
        None => Color::ZERO,
    }
}

/// Compute sky gradient background.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Render a single pixel with multi-sampling.
///
/// Row 0 is the top of the image. Returns the linear mean of all samples.
/// `(x, y)` must lie inside the configured image.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    debug_assert!(
        x < config.width && y < config.height,
        "pixel ({x}, {y}) outside {}x{} image",
        config.width,
        config.height
    );

    // Single-pixel rows/columns still need a finite divisor.
    let u_span = config.width.saturating_sub(1).max(1) as f64;
    let v_span = config.height.saturating_sub(1).max(1) as f64;
    let row_from_bottom = (config.height - 1 - y) as f64;

    let mut pixel_color = Color::ZERO;
    for _ in 0..config.samples_per_pixel {
        let s = (x as f64 + random_f64(rng)) / u_span;
        let t = (row_from_bottom + random_f64(rng)) / v_span;
        let ray = camera.get_ray(s, t, rng);
        pixel_color += ray_color(&ray, scene, config.max_depth, config, rng);
    }

    pixel_color / config.samples_per_pixel as f64
}

/// Generator for one scanline of one frame.
///
/// Seeding per row keeps images identical however rows are scheduled.
pub fn scanline_rng(seed: u64, frame: u64, row: u32) -> StdRng {
    let mixed = seed
        ^ frame.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (row as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
    StdRng::seed_from_u64(mixed)
}

/// Render one row into `pixels`.
pub fn render_scanline(ctx: &RenderContext, config: &RenderConfig, row: u32, pixels: &mut [Color]) {
    let mut rng = scanline_rng(config.seed, ctx.frame, row);
    for (x, pixel) in pixels.iter_mut().enumerate() {
        *pixel = render_pixel(&ctx.camera, &ctx.scene, x as u32, row, config, &mut rng);
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Gamma-correct and quantize a linear color to 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    const INTENSITY: Interval = Interval {
        min: 0.0,
        max: 0.999,
    };
    let quantize = |c: f64| (256.0 * INTENSITY.clamp(linear_to_gamma(c))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Linear color image, row-major with row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
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

    /// Gamma-corrected RGB bytes, three per pixel.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|color| color_to_rgb8(*color))
            .collect()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Running mean of successive frames of a static view.
#[derive(Debug, Clone)]
pub struct Accumulator {
    sum: ImageBuffer,
    frames: u32,
}

impl Accumulator {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            sum: ImageBuffer::new(width, height),
            frames: 0,
        }
    }

    /// Fold another frame into the running sum.
    pub fn add(&mut self, frame: &ImageBuffer) -> Result<(), RenderError> {
        if (frame.width, frame.height) != (self.sum.width, self.sum.height) {
            return Err(RenderError::SizeMismatch {
                expected: (self.sum.width, self.sum.height),
                actual: (frame.width, frame.height),
            });
        }
        for (sum, color) in self.sum.pixels.iter_mut().zip(&frame.pixels) {
            *sum += *color;
        }
        self.frames += 1;
        Ok(())
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Drop all history, e.g. after the camera moved.
    pub fn reset(&mut self) {
        self.sum.pixels.fill(Color::ZERO);
        self.frames = 0;
    }

    /// Mean of all frames so far (black before the first frame).
    pub fn resolve(&self) -> ImageBuffer {
        let mut image = self.sum.clone();
        if self.frames > 0 {
            let scale = 1.0 / self.frames as f64;
            for pixel in &mut image.pixels {
                *pixel *= scale;
            }
        }
        image
    }
}

/// Render the entire scene on the calling thread.
///
/// Produces exactly the image [`render_frame`](crate::render_frame) does
/// for the same context and seed.
pub fn render(ctx: &RenderContext, config: &RenderConfig) -> Result<ImageBuffer, RenderError> {
    config.validate()?;
    let mut image = ImageBuffer::new(config.width, config.height);

    for (row, pixels) in image.pixels.chunks_mut(config.width as usize).enumerate() {
        render_scanline(ctx, config, row as u32, pixels);
    }

    Ok(image)
}
