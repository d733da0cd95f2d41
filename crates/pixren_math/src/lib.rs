//! Vector algebra for pixren.
//!
//! Thin layer over glam's double-precision vectors plus the ray, interval
//! and sampling helpers the path tracer is built on.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod ray;
mod vector;
pub mod random;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{MathError, Vec3Ext};

/// Three-component double-precision vector.
pub type Vec3 = DVec3;
/// A position in world space.
pub type Point3 = DVec3;
/// Linear RGB color, one channel per component.
pub type Color = DVec3;
