//! Parallel scanline scheduling for one frame.
//!
//! Each frame forks a fixed set of workers and joins them before returning.
//! Worker `i` of `n` owns rows `i, i + n, i + 2n, ...`, so every row is
//! written by exactly one worker and the pixel buffer needs no locking.

use crate::renderer::render_scanline;
use crate::{ImageBuffer, RenderConfig, RenderContext, RenderError};
use log::{debug, trace};
use pixren_math::Color;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

/// How often the orchestrating thread checks on the workers.
const PROGRESS_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Rows claimed by `worker` out of `workers` for an image `height` rows tall.
pub fn stride_rows(worker: usize, workers: usize, height: usize) -> impl Iterator<Item = usize> {
    (worker..height).step_by(workers.max(1))
}

/// Count of scanlines finished in the current frame.
///
/// Monotonic within a frame; reset when the next frame starts.
#[derive(Debug, Default)]
pub struct ScanlineProgress {
    completed: AtomicUsize,
}

impl ScanlineProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.completed.store(0, Ordering::Relaxed);
    }

    fn increment(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }
}

/// Bumps the finished-worker count even if the worker unwinds.
struct WorkerDone<'a>(&'a AtomicUsize);

impl Drop for WorkerDone<'_> {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::Release);
    }
}

/// Render one frame across a freshly built worker pool.
///
/// `progress` is reset on entry and reaches `config.height` on success.
pub fn render_frame(
    ctx: &RenderContext,
    config: &RenderConfig,
    progress: &ScanlineProgress,
) -> Result<ImageBuffer, RenderError> {
    config.validate()?;
    progress.reset();

    let workers = config.worker_count();
    let height = config.height as usize;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("pixren-scanline-{i}"))
        .build()?;

    let mut image = ImageBuffer::new(config.width, config.height);

    // Hand each worker mutable access to its own rows only.
    let assignments = {
        let mut rows: Vec<Option<&mut [Color]>> = image
            .pixels
            .chunks_mut(config.width as usize)
            .map(Some)
            .collect();
        let mut assignments = Vec::with_capacity(workers);
        for worker in 0..workers {
            let claimed: Vec<(usize, &mut [Color])> = stride_rows(worker, workers, height)
                .filter_map(|row| rows[row].take().map(|pixels| (row, pixels)))
                .collect();
            assignments.push(claimed);
        }
        assignments
    };

    debug!(
        "frame {}: {}x{} @ {} spp on {} workers",
        ctx.frame, config.width, config.height, config.samples_per_pixel, workers
    );

    let finished = AtomicUsize::new(0);
    pool.in_place_scope(|s| {
        for (worker, rows) in assignments.into_iter().enumerate() {
            let finished = &finished;
            s.spawn(move |_| {
                let _done = WorkerDone(finished);
                let count = rows.len();
                for (row, pixels) in rows {
                    render_scanline(ctx, config, row as u32, pixels);
                    progress.increment();
                }
                trace!("worker {worker} finished {count} scanlines");
            });
        }

        wait_for_scanlines(progress, &finished, height, workers);
    });

    Ok(image)
}

/// Poll until every row is done or every worker has exited.
fn wait_for_scanlines(
    progress: &ScanlineProgress,
    finished: &AtomicUsize,
    height: usize,
    workers: usize,
) {
    let mut reported = 0;
    while progress.completed() < height && finished.load(Ordering::Acquire) < workers {
        thread::sleep(PROGRESS_POLL_INTERVAL);
        let completed = progress.completed();
        if completed != reported {
            trace!("scanlines {completed}/{height}");
            reported = completed;
        }
    }
}
