//! pixren - CPU path tracing core
//!
//! A Monte Carlo path tracer: camera rays are intersected against spheres,
//! triangles and cubes, shaded by diffuse, metal and glass materials, and
//! averaged per pixel. Frames are split across workers by scanline.

mod camera;
mod cube;
mod error;
mod hittable;
mod material;
mod primitive;
mod renderer;
mod scanline;
mod scene;
mod sphere;
mod triangle;

pub use camera::Camera;
pub use cube::Cube;
pub use error::RenderError;
pub use hittable::{closest_hit, HitRecord, Hittable};
pub use material::{reflectance, Material, MaterialId, ScatterResult};
pub use primitive::Primitive;
pub use renderer::{
    color_to_rgb8, linear_to_gamma, ray_color, render, render_pixel, render_scanline,
    scanline_rng, sky_gradient, Accumulator, ImageBuffer, RenderConfig, RenderContext,
};
pub use scanline::{render_frame, stride_rows, ScanlineProgress};
pub use scene::Scene;
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export the math types the public API is expressed in
pub use pixren_math::{Color, Interval, Point3, Ray, Vec3};
