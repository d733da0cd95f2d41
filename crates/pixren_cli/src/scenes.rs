//! Built-in demo scenes.

use crate::cli::SceneKind;
use pixren_math::Vec3Ext;
use pixren_renderer::{
    Camera, Color, Cube, Material, MaterialId, Point3, RenderError, Scene, Sphere, Vec3,
};

/// A scene, the camera that frames it and an optional animated sphere.
pub struct Demo {
    pub scene: Scene,
    pub camera: Camera,
    pub orbiter: Option<Orbiter>,
}

/// A sphere circling a pivot in the XZ plane, one step per frame.
#[derive(Debug, Clone, Copy)]
pub struct Orbiter {
    /// Slot in the scene's primitive list
    pub index: usize,
    pub pivot: Point3,
    pub orbit_radius: f64,
    pub radius: f64,
    pub radians_per_frame: f64,
    pub material: MaterialId,
}

impl Orbiter {
    pub fn sphere_at(&self, frame: u64) -> Sphere {
        let angle = frame as f64 * self.radians_per_frame;
        let offset = (Vec3::X * self.orbit_radius).rotate(angle, Vec3::Y);
        Sphere::new(self.pivot + offset, self.radius, self.material)
    }
}

pub fn build(kind: SceneKind, aspect_ratio: f64) -> Result<Demo, RenderError> {
    let mut demo = match kind {
        SceneKind::Spheres => spheres()?,
        SceneKind::Materials => materials()?,
        SceneKind::Cube => cube()?,
    };
    demo.camera = demo.camera.with_aspect_ratio(aspect_ratio);
    Ok(demo)
}

fn add_ground(scene: &mut Scene, albedo: Color) -> Result<(), RenderError> {
    let ground = scene.add_material(Material::lambertian(albedo));
    scene.add(Sphere::new(Point3::new(0.0, -100.5, -1.0), 100.0, ground))?;
    Ok(())
}

fn spheres() -> Result<Demo, RenderError> {
    let mut scene = Scene::new();
    add_ground(&mut scene, Color::splat(0.5))?;

    let grey = scene.add_material(Material::lambertian(Color::splat(0.5)));
    scene.add(Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5, grey))?;

    Ok(Demo {
        scene,
        camera: Camera::new(),
        orbiter: None,
    })
}

fn materials() -> Result<Demo, RenderError> {
    let mut scene = Scene::new();
    add_ground(&mut scene, Color::new(0.8, 0.8, 0.0))?;

    let diffuse = scene.add_material(Material::lambertian(Color::new(0.1, 0.2, 0.5)));
    let glass = scene.add_material(Material::dielectric(1.5));
    let gold = scene.add_material(Material::metal(Color::new(0.8, 0.6, 0.2), 0.1));
    let chrome = scene.add_material(Material::metal(Color::splat(0.9), 0.0));

    scene.add(Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5, diffuse))?;
    scene.add(Sphere::new(Point3::new(-1.0, 0.0, -1.0), 0.5, glass))?;

    let yaw = 30f64.to_radians();
    scene.add(Cube::new(
        Point3::new(1.0, -0.15, -1.0),
        0.7,
        Vec3::Y,
        Vec3::Z.rotate(yaw, Vec3::Y),
        Vec3::X.rotate(yaw, Vec3::Y),
        gold,
    ))?;

    let mut orbiter = Orbiter {
        index: 0,
        pivot: Point3::new(0.0, 0.1, -1.0),
        orbit_radius: 0.85,
        radius: 0.12,
        radians_per_frame: 6f64.to_radians(),
        material: chrome,
    };
    orbiter.index = scene.add(orbiter.sphere_at(0))?;

    let look_from = Point3::new(-2.0, 2.0, 1.0);
    let look_at = Point3::new(0.0, 0.0, -1.0);
    let camera = Camera::new()
        .with_position(look_from, look_at, Vec3::Y)
        .with_lens(30.0, 0.05, (look_from - look_at).length());

    Ok(Demo {
        scene,
        camera,
        orbiter: Some(orbiter),
    })
}

fn cube() -> Result<Demo, RenderError> {
    let mut scene = Scene::new();
    add_ground(&mut scene, Color::splat(0.5))?;

    let red = scene.add_material(Material::lambertian(Color::new(0.7, 0.1, 0.1)));
    let yaw = 45f64.to_radians();
    scene.add(Cube::new(
        Point3::new(0.0, 0.0, -2.0),
        1.0,
        Vec3::Y,
        Vec3::Z.rotate(yaw, Vec3::Y),
        Vec3::X.rotate(yaw, Vec3::Y),
        red,
    ))?;

    let camera = Camera::new()
        .with_position(Point3::new(0.0, 1.0, 1.0), Point3::new(0.0, 0.0, -2.0), Vec3::Y)
        .with_lens(50.0, 0.0, 1.0);

    Ok(Demo {
        scene,
        camera,
        orbiter: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixren_renderer::Primitive;

    #[test]
    fn test_every_scene_builds() {
        for kind in [SceneKind::Spheres, SceneKind::Materials, SceneKind::Cube] {
            let demo = build(kind, 2.0).unwrap();
            assert!(!demo.scene.is_empty());
            assert_eq!(demo.camera.aspect_ratio(), 2.0);
        }
    }

    #[test]
    fn test_spheres_layout() {
        let demo = build(SceneKind::Spheres, 16.0 / 9.0).unwrap();
        assert_eq!(demo.scene.len(), 2);
        assert!(demo.orbiter.is_none());
    }

    #[test]
    fn test_orbiter_slot_holds_orbiting_sphere() {
        let demo = build(SceneKind::Materials, 16.0 / 9.0).unwrap();
        let orbiter = demo.orbiter.unwrap();

        match demo.scene.get(orbiter.index) {
            Some(Primitive::Sphere(sphere)) => assert_eq!(*sphere, orbiter.sphere_at(0)),
            other => panic!("expected orbiting sphere, got {other:?}"),
        }
    }

    #[test]
    fn test_orbiter_keeps_distance_from_pivot() {
        let demo = build(SceneKind::Materials, 16.0 / 9.0).unwrap();
        let orbiter = demo.orbiter.unwrap();

        let start = orbiter.sphere_at(0).center;
        for frame in 1..60 {
            let center = orbiter.sphere_at(frame).center;
            assert!(((center - orbiter.pivot).length() - orbiter.orbit_radius).abs() < 1e-9);
            assert!((center.y - orbiter.pivot.y).abs() < 1e-9);
            assert_ne!(center, start);
        }
    }
}
