use anyhow::{Context, Result};
use clap::Parser;
use pixren_renderer::{render_frame, Accumulator, RenderContext, ScanlineProgress};
use std::time::Instant;

mod cli;
mod export;
mod scenes;

use cli::Args;
use scenes::Demo;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level.into())
        .parse_default_env()
        .init();

    log::info!("Starting pixren");

    let config = args.render_config()?;
    let Demo {
        scene,
        camera,
        orbiter,
    } = scenes::build(args.scene, config.aspect_ratio())?;

    log::info!(
        "{:?} scene: {} primitives, {}x{} @ {} spp, depth {}, {} workers",
        args.scene,
        scene.len(),
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth,
        config.worker_count()
    );

    if args.save {
        std::fs::create_dir_all(&args.output_dir)
            .with_context(|| format!("creating {}", args.output_dir.display()))?;
    }

    let mut ctx = RenderContext::new(scene, camera);
    let progress = ScanlineProgress::new();
    let mut accumulator = Accumulator::new(config.width, config.height);
    let orbit_step = args.orbit_speed.to_radians();

    for frame in 0..args.frames {
        // Scene and camera only change between frames
        if !args.progressive {
            if frame > 0 {
                ctx.camera.orbit(orbit_step);
            }
            if let Some(orbiter) = &orbiter {
                ctx.scene.replace(orbiter.index, orbiter.sphere_at(frame))?;
            }
        }
        ctx.frame = frame;

        let start = Instant::now();
        let image = render_frame(&ctx, &config, &progress)?;
        let elapsed = start.elapsed();

        log::info!(
            "Frame {} rendered in {:.1?} ({:.2} fps)",
            frame + 1,
            elapsed,
            1.0 / elapsed.as_secs_f64().max(f64::EPSILON)
        );

        let output = if args.progressive {
            accumulator.add(&image)?;
            log::debug!("Accumulated {} frames", accumulator.frames());
            accumulator.resolve()
        } else {
            image
        };

        if args.save {
            let path = export::frame_path(&args.output_dir, frame + 1);
            export::save_jpeg(&output, &path)?;
            log::info!("Saved {}", path.display());
        }
    }

    Ok(())
}
