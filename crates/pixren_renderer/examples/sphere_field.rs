//! Render a field of small spheres with the scanline scheduler.
//!
//! Writes `sphere_field.ppm` to the working directory.

use pixren_renderer::{
    color_to_rgb8, render_frame, Camera, Color, Material, Point3, RenderConfig, RenderContext,
    ScanlineProgress, Scene, Sphere, Vec3,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() -> Result<(), Box<dyn Error>> {
    println!("pixren - sphere field");

    let start = std::time::Instant::now();
    let scene = build_scene()?;
    println!("Scene built in {:?} ({} primitives)", start.elapsed(), scene.len());

    let config = RenderConfig {
        width: 600,
        height: 338,
        samples_per_pixel: 32,
        max_depth: 10,
        ..RenderConfig::default()
    };

    let look_from = Point3::new(13.0, 2.0, 3.0);
    let camera = Camera::new()
        .with_position(look_from, Point3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.1, 10.0)
        .with_aspect_ratio(config.aspect_ratio());

    println!(
        "Rendering {}x{} @ {} spp on {} workers...",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.worker_count()
    );

    let ctx = RenderContext::new(scene, camera);
    let start = std::time::Instant::now();
    let image = render_frame(&ctx, &config, &ScanlineProgress::new())?;
    println!("Rendered in {:?}", start.elapsed());

    let filename = "sphere_field.ppm";
    save_ppm(&image, filename)?;
    println!("Saved to {filename}");
    Ok(())
}

fn build_scene() -> Result<Scene, Box<dyn Error>> {
    let mut scene = Scene::new();

    let ground = scene.add_material(Material::lambertian(Color::splat(0.5)));
    scene.add(Sphere::new(Point3::new(0.0, -1000.0, 0.0), 1000.0, ground))?;

    let glass = scene.add_material(Material::dielectric(1.5));
    let brown = scene.add_material(Material::lambertian(Color::new(0.4, 0.2, 0.1)));
    let steel = scene.add_material(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0));
    scene.add(Sphere::new(Point3::new(0.0, 1.0, 0.0), 1.0, glass))?;
    scene.add(Sphere::new(Point3::new(-4.0, 1.0, 0.0), 1.0, brown))?;
    scene.add(Sphere::new(Point3::new(4.0, 1.0, 0.0), 1.0, steel))?;

    let mut rng = StdRng::seed_from_u64(7);
    for a in -5..5 {
        for b in -5..5 {
            let center = Point3::new(
                a as f64 + 0.9 * rng.gen::<f64>(),
                0.2,
                b as f64 + 0.9 * rng.gen::<f64>(),
            );
            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let choose: f64 = rng.gen();
            let material = if choose < 0.8 {
                let albedo = Color::new(
                    rng.gen::<f64>() * rng.gen::<f64>(),
                    rng.gen::<f64>() * rng.gen::<f64>(),
                    rng.gen::<f64>() * rng.gen::<f64>(),
                );
                scene.add_material(Material::lambertian(albedo))
            } else if choose < 0.95 {
                let albedo = Color::new(
                    rng.gen_range(0.5..1.0),
                    rng.gen_range(0.5..1.0),
                    rng.gen_range(0.5..1.0),
                );
                scene.add_material(Material::metal(albedo, rng.gen_range(0.0..0.5)))
            } else {
                glass
            };
            scene.add(Sphere::new(center, 0.2, material))?;
        }
    }

    Ok(scene)
}

fn save_ppm(image: &pixren_renderer::ImageBuffer, filename: &str) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(filename)?);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for y in 0..image.height {
        for x in 0..image.width {
            let [r, g, b] = color_to_rgb8(image.get(x, y));
            writeln!(writer, "{r} {g} {b}")?;
        }
    }

    Ok(())
}
