//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::{
    hittable::{HitRecord, Hittable},
    MaterialId,
};
use pixren_math::{Interval, Point3, Ray, Vec3};

/// Determinants below this magnitude mean the ray runs parallel to the plane.
const PARALLEL_EPSILON: f64 = 1e-8;

/// A triangle primitive. Vertex order fixes the side the normal faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertices
    v0: Point3,
    v1: Point3,
    v2: Point3,
    /// Unit normal of `cross(v1 - v0, v2 - v0)`
    normal: Vec3,
    material: MaterialId,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Point3, v1: Point3, v2: Point3, material: MaterialId) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize();

        Self {
            v0,
            v1,
            v2,
            normal,
            material,
        }
    }

    /// The three vertices in construction order.
    pub fn vertices(&self) -> [Point3; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// Unit plane normal following the vertex winding.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }

    pub fn centroid(&self) -> Point3 {
        (self.v0 + self.v1 + self.v2) / 3.0
    }
}

impl Hittable for Triangle {
    /// Möller-Trumbore ray-triangle intersection algorithm.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction().cross(edge2);
        let a = edge1.dot(h);

        // Ray is parallel to triangle
        if a.abs() < PARALLEL_EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin() - self.v0;
        let u = f * s.dot(h);

        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction().dot(q);

        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        if !ray_t.surrounds(t) {
            return None;
        }

        let mut rec = HitRecord::new(ray, t, self.normal, self.material);
        rec.u = u;
        rec.v = v;

        Some(rec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xy_triangle() -> Triangle {
        // Triangle in XY plane at z=-1, normal +Z
        Triangle::new(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
            MaterialId::default(),
        )
    }

    #[test]
    fn test_triangle_hit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = xy_triangle()
            .hit(&ray, Interval::new(0.001, f64::INFINITY))
            .expect("ray at the interior must hit");

        assert!((rec.t - 1.0).abs() < 1e-12);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_triangle_centroid_along_normal() {
        let tri = Triangle::new(
            Vec3::new(0.2, 0.1, -2.0),
            Vec3::new(1.5, 0.4, -2.6),
            Vec3::new(0.7, 1.9, -1.4),
            MaterialId::default(),
        );
        let origin = tri.centroid() + 3.0 * tri.normal();
        let ray = Ray::new(origin, -tri.normal());

        let rec = tri
            .hit(&ray, Interval::new(0.001, f64::INFINITY))
            .expect("centroid ray must hit");

        assert!(rec.u >= 0.0 && rec.v >= 0.0 && rec.u + rec.v <= 1.0);
        assert!((rec.u - 1.0 / 3.0).abs() < 1e-9);
        assert!((rec.v - 1.0 / 3.0).abs() < 1e-9);
        assert!((rec.t - 3.0).abs() < 1e-9);
        assert!((rec.p - tri.centroid()).length() < 1e-9);
        assert!(ray.direction().dot(rec.normal) < 0.0);
    }

    #[test]
    fn test_triangle_miss() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        assert!(xy_triangle()
            .hit(&ray, Interval::new(0.001, f64::INFINITY))
            .is_none());
    }

    #[test]
    fn test_triangle_parallel_ray_misses() {
        let ray = Ray::new(Vec3::new(-5.0, 0.0, -0.5), Vec3::X);
        assert!(xy_triangle()
            .hit(&ray, Interval::new(0.001, f64::INFINITY))
            .is_none());

        // Even when the ray lies in the plane itself.
        let in_plane = Ray::new(Vec3::new(-5.0, 0.0, -1.0), Vec3::X);
        assert!(xy_triangle()
            .hit(&in_plane, Interval::new(0.001, f64::INFINITY))
            .is_none());
    }

    #[test]
    fn test_triangle_outside_barycentric_range() {
        let ray = Ray::new(Vec3::new(0.9, 0.9, 0.0), Vec3::NEG_Z);
        assert!(xy_triangle()
            .hit(&ray, Interval::new(0.001, f64::INFINITY))
            .is_none());
    }

    #[test]
    fn test_triangle_back_face() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -3.0), Vec3::Z);
        let rec = xy_triangle()
            .hit(&ray, Interval::new(0.001, f64::INFINITY))
            .expect("back face is still hit");

        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::NEG_Z);
    }

    #[test]
    fn test_triangle_interval_is_open() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(xy_triangle().hit(&ray, Interval::new(0.001, 1.0)).is_none());
        assert!(xy_triangle().hit(&ray, Interval::new(1.0, 2.0)).is_none());
    }
}
