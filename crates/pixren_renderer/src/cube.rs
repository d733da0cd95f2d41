//! Oriented cube built from twelve triangles.

use crate::{
    hittable::{closest_hit, HitRecord, Hittable},
    MaterialId, Triangle,
};
use pixren_math::{Interval, Point3, Ray, Vec3};

/// A cube around `center`, oriented by the `up`/`front`/`right` frame.
///
/// The faces are decomposed into two triangles each at construction time.
/// Whichever triangle is struck, the cube shades with its own material.
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    center: Point3,
    side_length: f64,
    up: Vec3,
    front: Vec3,
    right: Vec3,
    triangles: [Triangle; 12],
    material: MaterialId,
}

impl Cube {
    /// Create a cube. The basis vectors are used as given (expected unit length).
    pub fn new(
        center: Point3,
        side_length: f64,
        up: Vec3,
        front: Vec3,
        right: Vec3,
        material: MaterialId,
    ) -> Self {
        let f = front * side_length / 2.0;
        let u = up * side_length / 2.0;
        let r = right * side_length / 2.0;

        let fr_t_l = center + f + u - r;
        let fr_t_r = center + f + u + r;
        let fr_b_l = center + f - u - r;
        let fr_b_r = center + f - u + r;
        let bk_t_l = center - f + u - r;
        let bk_t_r = center - f + u + r;
        let bk_b_l = center - f - u - r;
        let bk_b_r = center - f - u + r;

        let tri = |a, b, c| Triangle::new(a, b, c, material);
        let triangles = [
            // front
            tri(fr_t_l, fr_t_r, fr_b_l),
            tri(fr_t_r, fr_b_l, fr_b_r),
            // back
            tri(bk_t_l, bk_t_r, bk_b_l),
            tri(bk_t_r, bk_b_l, bk_b_r),
            // top
            tri(fr_t_l, fr_t_r, bk_t_l),
            tri(fr_t_r, bk_t_l, bk_t_r),
            // bottom
            tri(fr_b_l, fr_b_r, bk_b_l),
            tri(fr_b_r, bk_b_l, bk_b_r),
            // left
            tri(fr_t_l, fr_b_l, bk_t_l),
            tri(fr_b_l, bk_t_l, bk_b_l),
            // right
            tri(fr_t_r, fr_b_r, bk_t_r),
            tri(fr_b_r, bk_t_r, bk_b_r),
        ];

        Self {
            center,
            side_length,
            up,
            front,
            right,
            triangles,
            material,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn side_length(&self) -> f64 {
        self.side_length
    }

    /// The `(up, front, right)` frame the cube was built with.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.up, self.front, self.right)
    }

    pub fn triangles(&self) -> &[Triangle; 12] {
        &self.triangles
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }
}

impl Hittable for Cube {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut rec = closest_hit(&self.triangles, ray, ray_t)?;

        // Triangle winding is not consistent across faces, so the plane
        // normal is re-oriented to point away from the center first.
        let plane_normal = rec.normal;
        let outward_normal = if plane_normal.dot(rec.p - self.center) >= 0.0 {
            plane_normal
        } else {
            -plane_normal
        };

        rec.p = ray.at(rec.t);
        rec.set_face_normal(ray, outward_normal);
        rec.material = self.material;

        Some(rec)
    }
}
