use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use pixren_renderer::RenderConfig;
use std::path::PathBuf;

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Ground plus a single diffuse sphere, viewed head-on
    Spheres,
    /// Diffuse, glass and metal objects with an orbiting sphere
    Materials,
    /// A lone rotated cube
    Cube,
}

#[derive(Debug, Parser)]
#[command(name = "pixren")]
#[command(about = "CPU path tracer rendering animated frames")]
pub struct Args {
    /// JSON render settings; flags below override individual fields
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum bounces per path
    #[arg(long)]
    pub depth: Option<u32>,

    /// Worker threads per frame (defaults to available parallelism)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Base random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of frames to render
    #[arg(long, default_value_t = 1)]
    pub frames: u64,

    #[arg(long, value_enum, default_value = "materials")]
    pub scene: SceneKind,

    /// Camera orbit per frame in degrees
    #[arg(long, default_value_t = 2.0)]
    pub orbit_speed: f64,

    /// Keep the view still and average frames together
    #[arg(long)]
    pub progressive: bool,

    /// Write every frame as a JPEG
    #[arg(long)]
    pub save: bool,

    /// Directory frames are written to with --save
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Render settings from `--config` (or defaults) with flag overrides applied.
    pub fn render_config(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => RenderConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(samples) = self.samples {
            config.samples_per_pixel = samples;
        }
        if let Some(depth) = self.depth {
            config.max_depth = depth;
        }
        if let Some(workers) = self.workers {
            config.workers = Some(workers);
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["pixren"]);
        assert_eq!(args.frames, 1);
        assert_eq!(args.scene, SceneKind::Materials);
        assert!(!args.save);
        assert_eq!(args.render_config().unwrap(), RenderConfig::default());
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "pixren", "--width", "64", "--height", "32", "-s", "3", "--seed", "7", "--scene", "cube",
        ]);
        let config = args.render_config().unwrap();
        assert_eq!((config.width, config.height), (64, 32));
        assert_eq!(config.samples_per_pixel, 3);
        assert_eq!(config.seed, 7);
        assert_eq!(args.scene, SceneKind::Cube);
    }

    #[test]
    fn test_config_file() {
        let path = std::env::temp_dir().join(format!("pixren-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "width": 80, "height": 40, "max_depth": 8 }"#).unwrap();

        let args = Args::parse_from([
            "pixren".to_string(),
            "--config".to_string(),
            path.display().to_string(),
            "--height".to_string(),
            "20".to_string(),
        ]);
        let config = args.render_config().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.width, 80);
        assert_eq!(config.height, 20);
        assert_eq!(config.max_depth, 8);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let args = Args::parse_from(["pixren", "--samples", "0"]);
        assert!(args.render_config().is_err());
    }
}
