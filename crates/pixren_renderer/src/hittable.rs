//! Hittable trait and HitRecord for ray-object intersection.

use crate::MaterialId;
use pixren_math::{Interval, Point3, Ray, Vec3};

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Point of intersection
    pub p: Point3,
    /// Unit surface normal, always pointing against the incoming ray
    pub normal: Vec3,
    /// Handle of the material to shade with
    pub material: MaterialId,
    /// Barycentric coordinates for triangle hits, zero otherwise
    pub u: f64,
    pub v: f64,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl HitRecord {
    /// Build a record at `t` along `ray`, orienting `outward_normal` against it.
    pub fn new(ray: &Ray, t: f64, outward_normal: Vec3, material: MaterialId) -> Self {
        let mut rec = Self {
            p: ray.at(t),
            normal: outward_normal,
            material,
            u: 0.0,
            v: 0.0,
            t,
            front_face: true,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction().dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Closest intersection strictly inside `ray_t`, if any.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord>;
}

/// Closest-hit reduction over a sequence of hittables.
///
/// The search interval shrinks to the nearest accepted hit, so on exactly
/// equal `t` the earlier object wins.
pub fn closest_hit<'a, H, I>(objects: I, ray: &Ray, ray_t: Interval) -> Option<HitRecord>
where
    H: Hittable + 'a,
    I: IntoIterator<Item = &'a H>,
{
    let mut closest: Option<HitRecord> = None;
    let mut closest_so_far = ray_t.max;

    for object in objects {
        if let Some(rec) = object.hit(ray, ray_t.with_max(closest_so_far)) {
            closest_so_far = rec.t;
            closest = Some(rec);
        }
    }

    closest
}
