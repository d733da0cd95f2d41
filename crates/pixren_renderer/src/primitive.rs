//! Closed set of scene primitives.

use crate::{Cube, HitRecord, Hittable, MaterialId, Sphere, Triangle};
use pixren_math::{Interval, Ray};

/// Any geometry a [`Scene`](crate::Scene) can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
    Triangle(Triangle),
    Cube(Cube),
}

impl Primitive {
    /// The material this primitive shades with.
    pub fn material(&self) -> MaterialId {
        match self {
            Primitive::Sphere(sphere) => sphere.material,
            Primitive::Triangle(triangle) => triangle.material(),
            Primitive::Cube(cube) => cube.material(),
        }
    }
}

impl Hittable for Primitive {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        match self {
            Primitive::Sphere(sphere) => sphere.hit(ray, ray_t),
            Primitive::Triangle(triangle) => triangle.hit(ray, ray_t),
            Primitive::Cube(cube) => cube.hit(ray, ray_t),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<Triangle> for Primitive {
    fn from(triangle: Triangle) -> Self {
        Primitive::Triangle(triangle)
    }
}

impl From<Cube> for Primitive {
    fn from(cube: Cube) -> Self {
        Primitive::Cube(cube)
    }
}
