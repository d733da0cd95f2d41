//! Errors surfaced before a frame starts rendering.
//!
//! Numeric degeneracies inside the tracer are never errors: they fall back
//! to a safe value. Everything here is rejected up front.

use crate::MaterialId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("image must be at least 1x1 pixels, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("samples per pixel must be positive")]
    ZeroSamples,

    #[error("max depth must be positive")]
    ZeroDepth,

    #[error("worker count must be positive")]
    ZeroWorkers,

    #[error("material handle {0:?} is not in this scene")]
    UnknownMaterial(MaterialId),

    #[error("primitive index {index} out of range (scene has {len})")]
    PrimitiveIndex { index: usize, len: usize },

    #[error("frame is {actual:?} but the accumulator holds {expected:?}")]
    SizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
