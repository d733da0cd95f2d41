//! Frame export.

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::ColorType;
use pixren_renderer::ImageBuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const JPEG_QUALITY: u8 = 100;

/// Path of frame `index` (1-based) inside `dir`.
pub fn frame_path(dir: &Path, index: u64) -> PathBuf {
    dir.join(format!("frame_{index}.jpg"))
}

/// Gamma-correct `image` and write it as a JPEG.
pub fn save_jpeg(image: &ImageBuffer, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY)
        .encode(&image.to_rgb8(), image.width, image.height, ColorType::Rgb8)
        .with_context(|| format!("encoding {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("writing {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;
    use pixren_renderer::Color;

    #[test]
    fn test_frame_path() {
        assert_eq!(
            frame_path(Path::new("output"), 3),
            PathBuf::from("output/frame_3.jpg")
        );
    }

    #[test]
    fn test_save_jpeg_round_trip_dimensions() {
        let mut frame = ImageBuffer::new(8, 4);
        frame.set(0, 0, Color::ONE);

        let path = std::env::temp_dir().join(format!("pixren-export-{}.jpg", std::process::id()));
        save_jpeg(&frame, &path).unwrap();

        let decoded = image::open(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(decoded.dimensions(), (8, 4));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_save_jpeg_reports_full_device() {
        let frame = ImageBuffer::new(8, 4);
        assert!(save_jpeg(&frame, Path::new("/dev/full")).is_err());
    }
}
