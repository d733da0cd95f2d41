//! Surface scattering models.

use crate::hittable::HitRecord;
use pixren_math::random::{random_f64, random_in_unit_sphere, random_unit_vector};
use pixren_math::{Color, Ray, Vec3Ext};
use rand::RngCore;

/// Handle of a material stored in a [`Scene`](crate::Scene)'s arena.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(usize);

impl MaterialId {
    /// Wrap a raw arena index. Scenes reject handles they did not issue.
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

/// Outgoing light direction and the color it is filtered by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    pub attenuation: Color,
    pub scattered: Ray,
}

/// How light interacts with a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Diffuse surface.
    Lambertian { albedo: Color },
    /// Reflective surface; `fuzz` in [0, 1] roughens the reflection.
    Metal { albedo: Color, fuzz: f64 },
    /// Clear refractive surface such as glass (1.5) or water (1.33).
    Dielectric { refractive_index: f64 },
}

impl Material {
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian { albedo }
    }

    /// Metal with `fuzz` clamped to [0, 1].
    pub fn metal(albedo: Color, fuzz: f64) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn dielectric(refractive_index: f64) -> Self {
        Material::Dielectric { refractive_index }
    }

    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match *self {
            Material::Lambertian { albedo } => Some(scatter_lambertian(albedo, rec, rng)),
            Material::Metal { albedo, fuzz } => scatter_metal(albedo, fuzz, ray_in, rec, rng),
            Material::Dielectric { refractive_index } => {
                Some(scatter_dielectric(refractive_index, ray_in, rec, rng))
            }
        }
    }
}

fn scatter_lambertian(albedo: Color, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult {
    let mut scatter_direction = rec.normal + random_unit_vector(rng);

    // Catch degenerate scatter direction
    if scatter_direction.near_zero() {
        scatter_direction = rec.normal;
    }

    ScatterResult {
        attenuation: albedo,
        scattered: Ray::new(rec.p, scatter_direction),
    }
}

fn scatter_metal(
    albedo: Color,
    fuzz: f64,
    ray_in: &Ray,
    rec: &HitRecord,
    rng: &mut dyn RngCore,
) -> Option<ScatterResult> {
    let reflected = ray_in.direction().normalize().reflect(rec.normal);
    let scattered = Ray::new(rec.p, reflected + fuzz * random_in_unit_sphere(rng));

    // Fuzz pushed the reflection below the surface.
    if scattered.direction().dot(rec.normal) <= 0.0 {
        return None;
    }

    Some(ScatterResult {
        attenuation: albedo,
        scattered,
    })
}

fn scatter_dielectric(
    refractive_index: f64,
    ray_in: &Ray,
    rec: &HitRecord,
    rng: &mut dyn RngCore,
) -> ScatterResult {
    let refraction_ratio = if rec.front_face {
        1.0 / refractive_index
    } else {
        refractive_index
    };

    let unit_direction = ray_in.direction().normalize();
    let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

    // Total internal reflection
    let cannot_refract = refraction_ratio * sin_theta > 1.0;

    let direction =
        if cannot_refract || reflectance(cos_theta, refraction_ratio) > random_f64(rng) {
            unit_direction.reflect(rec.normal)
        } else {
            unit_direction.refract(rec.normal, refraction_ratio)
        };

    ScatterResult {
        attenuation: Color::ONE,
        scattered: Ray::new(rec.p, direction),
    }
}

/// Schlick's approximation of Fresnel reflectance.
pub fn reflectance(cosine: f64, refraction_ratio: f64) -> f64 {
    let r0 = ((1.0 - refraction_ratio) / (1.0 + refraction_ratio)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixren_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn front_hit(normal: Vec3) -> (Ray, HitRecord) {
        let ray = Ray::new(normal * 2.0, -normal);
        let rec = HitRecord::new(&ray, 2.0, normal, MaterialId::default());
        (ray, rec)
    }

    #[test]
    fn test_lambertian_never_absorbs() {
        let mut rng = StdRng::seed_from_u64(42);
        let albedo = Color::new(0.5, 0.25, 0.125);
        let material = Material::lambertian(albedo);
        let (ray, rec) = front_hit(Vec3::new(0.2, 1.0, -0.3).normalize());

        for _ in 0..1000 {
            let result = material
                .scatter(&ray, &rec, &mut rng)
                .expect("lambertian always scatters");
            assert_eq!(result.attenuation, albedo);
            assert_eq!(result.scattered.origin(), rec.p);
            assert!(!result.scattered.direction().near_zero());
            assert!(result.scattered.direction().dot(rec.normal) >= 0.0);
        }
    }

    #[test]
    fn test_metal_mirror_reflection() {
        let mut rng = StdRng::seed_from_u64(42);
        let material = Material::metal(Color::new(0.8, 0.8, 0.8), 0.0);
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let rec = HitRecord::new(&ray, 1.0, Vec3::Y, MaterialId::default());

        let result = material
            .scatter(&ray, &rec, &mut rng)
            .expect("front-face mirror hit scatters");
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((result.scattered.direction() - expected).length() < 1e-12);
    }

    #[test]
    fn test_metal_front_face_never_absorbs() {
        let mut rng = StdRng::seed_from_u64(42);
        let material = Material::metal(Color::new(0.7, 0.6, 0.5), 0.9);
        let (ray, rec) = front_hit(Vec3::Z);

        for _ in 0..1000 {
            assert!(material.scatter(&ray, &rec, &mut rng).is_some());
        }
    }

    #[test]
    fn test_metal_grazing_fuzz_can_absorb() {
        let mut rng = StdRng::seed_from_u64(42);
        let material = Material::metal(Color::ONE, 1.0);
        let ray = Ray::new(Vec3::new(-1.0, 0.01, 0.0), Vec3::new(1.0, -0.01, 0.0));
        let rec = HitRecord::new(&ray, 1.0, Vec3::Y, MaterialId::default());

        let absorbed = (0..1000)
            .filter(|_| material.scatter(&ray, &rec, &mut rng).is_none())
            .count();
        assert!(absorbed > 0);
    }

    #[test]
    fn test_metal_fuzz_is_clamped() {
        assert_eq!(
            Material::metal(Color::ONE, 3.0),
            Material::Metal { albedo: Color::ONE, fuzz: 1.0 }
        );
    }

    #[test]
    fn test_reflectance_at_normal_incidence() {
        for ratio in [1.0_f64 / 1.5, 1.5, 2.4] {
            let r0 = ((1.0 - ratio) / (1.0 + ratio)).powi(2);
            assert!((reflectance(1.0, ratio) - r0).abs() < 1e-15);
        }
        // Grazing incidence reflects everything.
        assert!((reflectance(0.0, 1.5) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_dielectric_attenuation_is_white() {
        let mut rng = StdRng::seed_from_u64(42);
        let material = Material::dielectric(1.5);
        let (ray, rec) = front_hit(Vec3::Y);

        for _ in 0..100 {
            let result = material
                .scatter(&ray, &rec, &mut rng)
                .expect("dielectric never absorbs");
            assert_eq!(result.attenuation, Color::ONE);
        }
    }

    #[test]
    fn test_dielectric_normal_incidence_mostly_refracts() {
        let mut rng = StdRng::seed_from_u64(42);
        let material = Material::dielectric(1.5);
        let (ray, rec) = front_hit(Vec3::Y);

        let samples = 10_000;
        let reflected = (0..samples)
            .filter_map(|_| material.scatter(&ray, &rec, &mut rng))
            .filter(|r| r.scattered.direction().dot(rec.normal) > 0.0)
            .count();

        // Schlick at cos = 1 with ratio 1/1.5 gives 0.04.
        let fraction = reflected as f64 / samples as f64;
        assert!((fraction - reflectance(1.0, 1.0 / 1.5)).abs() < 0.01);
    }

    #[test]
    fn test_dielectric_refraction_follows_snell() {
        let mut rng = StdRng::seed_from_u64(42);
        let material = Material::dielectric(1.5);
        let direction = Vec3::new(1.0, -1.0, 0.0);
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), direction);
        let rec = HitRecord::new(&ray, 1.0, Vec3::Y, MaterialId::default());
        let sin_in = direction.normalize().x;

        let mut refracted = 0;
        for _ in 0..200 {
            let out = material
                .scatter(&ray, &rec, &mut rng)
                .expect("dielectric never absorbs")
                .scattered
                .direction();
            if out.y < 0.0 {
                refracted += 1;
                // Tangential component scales by the index ratio.
                assert!((out.x - sin_in / 1.5).abs() < 1e-12);
                assert!((out.length() - 1.0).abs() < 1e-12);
                assert_eq!(out.z, 0.0);
            }
        }
        assert!(refracted > 0);
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let mut rng = StdRng::seed_from_u64(42);
        let material = Material::dielectric(1.5);
        // Leaving the glass at a shallow angle.
        let ray = Ray::new(Vec3::new(-1.0, -0.2, 0.0), Vec3::new(1.0, 0.2, 0.0));
        let rec = HitRecord::new(&ray, 1.0, Vec3::Y, MaterialId::default());
        assert!(!rec.front_face);

        for _ in 0..100 {
            let result = material.scatter(&ray, &rec, &mut rng).expect("scatters");
            assert!(result.scattered.direction().y < 0.0);
        }
    }
}
