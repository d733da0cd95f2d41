// Geometric helpers for DVec3
//
// glam already covers arithmetic, dot, cross, length, normalize and the
// unit-vector `reflect`/`refract` used for scattering; this adds rotation
// and the degenerate-direction test.

use crate::Vec3;
use thiserror::Error;

/// Components smaller than this are treated as zero by [`Vec3Ext::near_zero`].
const NEAR_ZERO: f64 = 1e-8;

/// Errors from checked vector access.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    #[error("vector component index {0} out of range (expected 0, 1 or 2)")]
    ComponentOutOfRange(usize),
}

/// Extension trait for DVec3 to provide ray tracing operations.
pub trait Vec3Ext: Sized {
    /// Rotate by `angle` radians around `axis` (Rodrigues' formula).
    fn rotate(self, angle: f64, axis: Vec3) -> Vec3;

    /// True if every component is below 1e-8 in magnitude.
    fn near_zero(self) -> bool;

    /// Checked component access. Indexing with `[]` panics instead.
    fn component(self, index: usize) -> Result<f64, MathError>;
}

impl Vec3Ext for Vec3 {
    fn rotate(self, angle: f64, axis: Vec3) -> Vec3 {
        let k = axis.normalize();
        let (sin, cos) = angle.sin_cos();
        self * cos + k.cross(self) * sin + k * k.dot(self) * (1.0 - cos)
    }

    #[inline]
    fn near_zero(self) -> bool {
        self.abs().max_element() < NEAR_ZERO
    }

    fn component(self, index: usize) -> Result<f64, MathError> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            _ => Err(MathError::ComponentOutOfRange(index)),
        }
    }
}
